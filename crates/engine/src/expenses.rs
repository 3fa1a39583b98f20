//! The module contains the `Expense` struct and its database model.
//!
//! An `Expense` is a single payment made by one member on behalf of the
//! whole group. The amount is stored in integer minor units.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: Money,
    /// The member who paid.
    pub paid_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        title: String,
        amount: Money,
        paid_by: Uuid,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(EngineError::InvalidName("expense title is empty".to_string()));
        }
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            title,
            amount,
            paid_by,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub amount_minor: i64,
    pub paid_by: String,
    pub group_id: String,
    pub created_at: DateTime<Utc>,
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
    #[sea_orm(
        belongs_to = "super::members::Entity",
        from = "Column::PaidBy",
        to = "super::members::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Members,
}

impl Related<super::groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Groups.def()
    }
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(value: &Expense) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            title: ActiveValue::Set(value.title.clone()),
            amount_minor: ActiveValue::Set(value.amount.minor()),
            paid_by: ActiveValue::Set(value.paid_by.to_string()),
            group_id: ActiveValue::NotSet,
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        let id = Uuid::parse_str(&model.id)
            .map_err(|_| EngineError::KeyNotFound(format!("invalid expense id: {}", model.id)))?;
        let paid_by = Uuid::parse_str(&model.paid_by)
            .map_err(|_| EngineError::KeyNotFound(format!("invalid payer id: {}", model.paid_by)))?;
        Ok(Expense {
            id,
            title: model.title,
            amount: Money::new(model.amount_minor),
            paid_by,
            created_at: model.created_at,
        })
    }
}
