//! Group summary: totals, per-member balances and the settlement plan,
//! composed for the HTTP boundary.

use crate::{
    Money, ResultEngine,
    balance::{self, MemberBalance},
    ledger::Ledger,
    settlement::{self, Transfer},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub total: Money,
    pub per_person: Money,
    pub balances: Vec<MemberBalance>,
    pub settlements: Vec<Transfer>,
}

/// Pure function of a ledger snapshot; safe to call repeatedly and
/// concurrently, and idempotent for an unmodified ledger.
pub fn summarize(ledger: &Ledger) -> ResultEngine<Summary> {
    let sheet = balance::balance_sheet(ledger)?;
    let settlements = settlement::plan(&sheet);

    Ok(Summary {
        total: sheet.total,
        per_person: sheet.per_person,
        balances: sheet.rows,
        settlements,
    })
}
