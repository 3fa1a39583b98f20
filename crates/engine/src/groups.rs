//! The `Group` holds the members and expenses of a single trip.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, prelude::*};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine, expenses, expenses::Expense, ledger::Ledger, members,
    members::Member,
};

/// A named collection of members and shared expenses.
#[derive(Debug)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub members: HashMap<Uuid, Member>,
    pub expenses: HashMap<Uuid, Expense>,
}

impl Group {
    pub fn new(name: &str, created_at: DateTime<Utc>) -> ResultEngine<Self> {
        let name = valid_name(name)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            created_at,
            members: HashMap::new(),
            expenses: HashMap::new(),
        })
    }

    /// Validates a new name and returns it together with the row to
    /// persist. The caller stores the name once the write succeeds.
    pub fn rename(&self, name: &str) -> ResultEngine<(String, ActiveModel)> {
        let name = valid_name(name)?;
        let group_model = ActiveModel {
            id: ActiveValue::Set(self.id.clone()),
            name: ActiveValue::Set(name.clone()),
            ..Default::default()
        };
        Ok((name, group_model))
    }

    /// Validates and builds a new member together with its row. Nothing is
    /// stored until the caller persists the row and commits the member with
    /// [`Group::insert_member`].
    ///
    /// Member names are unique within a group: the settlement output is keyed
    /// by display name, so duplicates would be ambiguous for clients.
    pub fn new_member(&self, name: &str) -> ResultEngine<(Member, members::ActiveModel)> {
        let name = valid_name(name)?;
        if self.members.values().any(|member| member.name == name) {
            return Err(EngineError::ExistingKey(name));
        }

        let member = Member::new(name);
        let mut member_model: members::ActiveModel = (&member).into();
        member_model.group_id = ActiveValue::Set(self.id.clone());

        Ok((member, member_model))
    }

    /// Commits a member built by [`Group::new_member`] once its row is
    /// persisted.
    pub fn insert_member(&mut self, member: Member) -> Uuid {
        let member_id = member.id;
        self.members.insert(member_id, member);
        member_id
    }

    pub fn member(&self, member_id: Uuid) -> ResultEngine<&Member> {
        self.members
            .get(&member_id)
            .ok_or_else(|| EngineError::KeyNotFound(member_id.to_string()))
    }

    /// Validates and builds a new expense paid by `paid_by` together with
    /// its row; committed with [`Group::insert_expense`] once persisted.
    pub fn new_expense(
        &self,
        title: &str,
        amount: Money,
        paid_by: Uuid,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<(Expense, expenses::ActiveModel)> {
        if !self.members.contains_key(&paid_by) {
            return Err(EngineError::PayerNotInGroup(paid_by.to_string()));
        }

        let expense = Expense::new(title.to_string(), amount, paid_by, created_at)?;
        let mut expense_model: expenses::ActiveModel = (&expense).into();
        expense_model.group_id = ActiveValue::Set(self.id.clone());

        Ok((expense, expense_model))
    }

    /// Validates new values for an existing expense and returns the updated
    /// expense (same id and creation time) with the row to persist. The
    /// stored expense is untouched until the caller commits the returned one
    /// with [`Group::insert_expense`], so a failed write changes nothing.
    pub fn updated_expense(
        &self,
        expense_id: Uuid,
        title: &str,
        amount: Money,
        paid_by: Uuid,
    ) -> ResultEngine<(Expense, expenses::ActiveModel)> {
        if !self.members.contains_key(&paid_by) {
            return Err(EngineError::PayerNotInGroup(paid_by.to_string()));
        }
        let current = self.expense(expense_id)?;

        let mut updated = Expense::new(title.to_string(), amount, paid_by, current.created_at)?;
        updated.id = current.id;

        let expense_model = expenses::ActiveModel {
            id: ActiveValue::Set(updated.id.to_string()),
            title: ActiveValue::Set(updated.title.clone()),
            amount_minor: ActiveValue::Set(updated.amount.minor()),
            paid_by: ActiveValue::Set(updated.paid_by.to_string()),
            ..Default::default()
        };
        Ok((updated, expense_model))
    }

    /// Commits an expense built by [`Group::new_expense`] or
    /// [`Group::updated_expense`]; an update replaces the stored expense
    /// under the same id.
    pub fn insert_expense(&mut self, expense: Expense) -> Uuid {
        let expense_id = expense.id;
        self.expenses.insert(expense_id, expense);
        expense_id
    }

    pub fn expense(&self, expense_id: Uuid) -> ResultEngine<&Expense> {
        self.expenses
            .get(&expense_id)
            .ok_or_else(|| EngineError::KeyNotFound(expense_id.to_string()))
    }

    pub fn remove_expense(&mut self, expense_id: Uuid) -> Option<Expense> {
        self.expenses.remove(&expense_id)
    }

    /// Members in id order.
    pub fn members_sorted(&self) -> Vec<&Member> {
        let mut members: Vec<&Member> = self.members.values().collect();
        members.sort_by_key(|member| member.id);
        members
    }

    /// Expenses in creation order.
    pub fn expenses_sorted(&self) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = self.expenses.values().collect();
        expenses.sort_by_key(|expense| (expense.created_at, expense.id));
        expenses
    }

    /// Immutable snapshot of members and expenses at query time.
    pub fn ledger(&self) -> ResultEngine<Ledger> {
        Ledger::new(
            self.members.values().cloned().collect(),
            self.expenses_sorted().into_iter().cloned().collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "groups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::members::Entity")]
    Members,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
}

impl Related<super::members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Group> for ActiveModel {
    fn from(value: &Group) -> Self {
        Self {
            id: ActiveValue::Set(value.id.clone()),
            name: ActiveValue::Set(value.name.clone()),
            created_at: ActiveValue::Set(value.created_at),
        }
    }
}

fn valid_name(name: &str) -> ResultEngine<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::InvalidName("name is empty".to_string()));
    }
    Ok(name.to_string())
}
