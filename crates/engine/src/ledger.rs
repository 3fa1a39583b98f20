//! Validated, immutable snapshot of a group's members and expenses.
//!
//! All derived views (balances, settlements) are computed from a `Ledger`
//! taken at query time. Nothing derived is ever stored, so there is no
//! staleness to manage; computation must simply be deterministic.

use crate::{EngineError, ResultEngine, expenses::Expense, members::Member};

/// Snapshot of `{members, expenses}` for one group.
///
/// Members are held sorted by id so every downstream iteration order is
/// stable across repeated calls.
#[derive(Clone, Debug)]
pub struct Ledger {
    members: Vec<Member>,
    expenses: Vec<Expense>,
}

impl Ledger {
    /// Validates and builds a snapshot.
    ///
    /// Rules: member names non-empty after trimming, expense amounts > 0,
    /// every payer references a member of the snapshot.
    pub fn new(mut members: Vec<Member>, expenses: Vec<Expense>) -> ResultEngine<Self> {
        for member in &members {
            if member.name.trim().is_empty() {
                return Err(EngineError::InvalidName(format!(
                    "member {} has an empty name",
                    member.id
                )));
            }
        }
        for expense in &expenses {
            if !expense.amount.is_positive() {
                return Err(EngineError::InvalidAmount(format!(
                    "expense \"{}\" has a non-positive amount",
                    expense.title
                )));
            }
            if !members.iter().any(|member| member.id == expense.paid_by) {
                return Err(EngineError::PayerNotInGroup(expense.paid_by.to_string()));
            }
        }

        members.sort_by_key(|member| member.id);
        Ok(Self { members, expenses })
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }
}
