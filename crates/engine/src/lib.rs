use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

pub use balance::{BalanceSheet, MemberBalance, balance_sheet};
pub use error::EngineError;
pub use expenses::Expense;
pub use groups::Group;
pub use ledger::Ledger;
pub use members::Member;
pub use money::Money;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
pub use settlement::{Transfer, plan};
pub use summary::{Summary, summarize};

mod balance;
mod error;
mod expenses;
mod groups;
mod ledger;
mod members;
mod money;
mod settlement;
mod summary;

type ResultEngine<T> = Result<T, EngineError>;

/// The split-bill engine: all groups in memory, backed by a database.
///
/// Writes persist to the database first within each operation and then
/// update the in-memory state; reads (listings, summaries, settlements)
/// are served from memory and recomputed from scratch on every call.
#[derive(Debug)]
pub struct Engine {
    groups: HashMap<String, Group>,
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Create a new group.
    pub async fn new_group(&mut self, name: &str) -> ResultEngine<String> {
        let group = Group::new(name, Utc::now())?;
        let group_model: groups::ActiveModel = (&group).into();
        group_model.insert(&self.database).await?;

        let group_id = group.id.clone();
        tracing::info!("group \"{}\" created", group.name);
        self.groups.insert(group_id.clone(), group);
        Ok(group_id)
    }

    /// Rename an existing group.
    pub async fn rename_group(&mut self, group_id: &str, name: &str) -> ResultEngine<()> {
        match self.groups.get_mut(group_id) {
            Some(group) => {
                let (name, group_model) = group.rename(name)?;
                group_model.update(&self.database).await?;
                group.name = name;
                Ok(())
            }
            None => Err(EngineError::KeyNotFound(group_id.to_string())),
        }
    }

    /// Delete a group and everything it owns.
    ///
    /// The three deletes run in one transaction; either the whole subtree
    /// is gone or none of it is.
    pub async fn delete_group(&mut self, group_id: &str) -> ResultEngine<()> {
        if !self.groups.contains_key(group_id) {
            return Err(EngineError::KeyNotFound(group_id.to_string()));
        }

        let txn = self.database.begin().await?;
        expenses::Entity::delete_many()
            .filter(expenses::Column::GroupId.eq(group_id))
            .exec(&txn)
            .await?;
        members::Entity::delete_many()
            .filter(members::Column::GroupId.eq(group_id))
            .exec(&txn)
            .await?;
        groups::Entity::delete_by_id(group_id.to_string())
            .exec(&txn)
            .await?;
        txn.commit().await?;

        if let Some(group) = self.groups.remove(group_id) {
            tracing::info!("group \"{}\" deleted", group.name);
        }
        Ok(())
    }

    /// Return a group.
    pub fn group(&self, group_id: &str) -> ResultEngine<&Group> {
        self.groups
            .get(group_id)
            .ok_or_else(|| EngineError::KeyNotFound(group_id.to_string()))
    }

    /// All groups, oldest first.
    pub fn groups(&self) -> Vec<&Group> {
        let mut groups: Vec<&Group> = self.groups.values().collect();
        groups.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        groups
    }

    /// Add a member to a group.
    pub async fn add_member(&mut self, group_id: &str, name: &str) -> ResultEngine<Uuid> {
        match self.groups.get_mut(group_id) {
            Some(group) => {
                let (member, member_model) = group.new_member(name)?;
                member_model.insert(&self.database).await?;
                Ok(group.insert_member(member))
            }
            None => Err(EngineError::KeyNotFound(group_id.to_string())),
        }
    }

    /// Record an expense paid by a member of the group.
    pub async fn add_expense(
        &mut self,
        group_id: &str,
        title: &str,
        amount: Money,
        paid_by: Uuid,
    ) -> ResultEngine<Uuid> {
        match self.groups.get_mut(group_id) {
            Some(group) => {
                let (expense, expense_model) =
                    group.new_expense(title, amount, paid_by, Utc::now())?;
                expense_model.insert(&self.database).await?;
                tracing::info!(
                    "expense \"{title}\" of {amount} added to group \"{}\"",
                    group.name
                );
                Ok(group.insert_expense(expense))
            }
            None => Err(EngineError::KeyNotFound(group_id.to_string())),
        }
    }

    /// Update title, amount and payer of an expense.
    pub async fn update_expense(
        &mut self,
        group_id: &str,
        expense_id: Uuid,
        title: &str,
        amount: Money,
        paid_by: Uuid,
    ) -> ResultEngine<()> {
        match self.groups.get_mut(group_id) {
            Some(group) => {
                let (updated, expense_model) =
                    group.updated_expense(expense_id, title, amount, paid_by)?;
                expense_model.update(&self.database).await?;
                group.insert_expense(updated);
                Ok(())
            }
            None => Err(EngineError::KeyNotFound(group_id.to_string())),
        }
    }

    /// Delete an expense from a group.
    pub async fn delete_expense(&mut self, group_id: &str, expense_id: Uuid) -> ResultEngine<()> {
        match self.groups.get_mut(group_id) {
            Some(group) => {
                let mut expense_model: expenses::ActiveModel = group.expense(expense_id)?.into();
                expense_model.group_id = ActiveValue::Set(group.id.clone());
                expense_model.delete(&self.database).await?;
                group.remove_expense(expense_id);
                Ok(())
            }
            None => Err(EngineError::KeyNotFound(group_id.to_string())),
        }
    }

    /// Compute the full summary (balances + settlement plan) for a group.
    ///
    /// Derived from a fresh ledger snapshot on every call; nothing is
    /// cached across mutations.
    pub fn summary(&self, group_id: &str) -> ResultEngine<Summary> {
        let ledger = self.group(group_id)?.ledger()?;
        summary::summarize(&ledger)
    }
}

/// The builder for `Engine`: loads all groups, members and expenses from
/// the database into memory.
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let mut groups = HashMap::new();

        let group_models: Vec<groups::Model> =
            groups::Entity::find().all(&self.database).await?;

        for group_model in group_models {
            let mut group_members = HashMap::new();
            let member_models: Vec<members::Model> = members::Entity::find()
                .filter(members::Column::GroupId.eq(group_model.id.clone()))
                .all(&self.database)
                .await?;
            for member_model in member_models {
                let member = Member::try_from(member_model)?;
                group_members.insert(member.id, member);
            }

            let mut group_expenses = HashMap::new();
            let expense_models: Vec<expenses::Model> = expenses::Entity::find()
                .filter(expenses::Column::GroupId.eq(group_model.id.clone()))
                .all(&self.database)
                .await?;
            for expense_model in expense_models {
                let expense = Expense::try_from(expense_model)?;
                group_expenses.insert(expense.id, expense);
            }

            groups.insert(
                group_model.id.clone(),
                Group {
                    id: group_model.id,
                    name: group_model.name,
                    created_at: group_model.created_at,
                    members: group_members,
                    expenses: group_expenses,
                },
            );
        }

        Ok(Engine {
            groups,
            database: self.database,
        })
    }
}
