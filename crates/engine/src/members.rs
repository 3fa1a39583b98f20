//! The module contains the `Member` struct and its database model.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// A participant in a group who can pay for or owe shares of expenses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    /// Stable identifier, generated once and persisted.
    pub id: Uuid,
    pub name: String,
}

impl Member {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub group_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::groups::Entity",
        from = "Column::GroupId",
        to = "super::groups::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Groups,
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Member> for ActiveModel {
    fn from(value: &Member) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            group_id: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Member {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::KeyNotFound(format!("invalid member id: {}", model.id)))?;
        Ok(Member {
            id,
            name: model.name,
        })
    }
}
