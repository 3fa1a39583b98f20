//! Settlement planning: turn a set of net balances into point-to-point
//! transfers that drive every balance to zero.
//!
//! Greedy largest-creditor / largest-debtor matching. Not guaranteed
//! minimum-transfer-count in every pathological case, but it produces at
//! most N-1 transfers for N members with nonzero balance and is fully
//! deterministic: ties are broken by member id ascending.

use uuid::Uuid;

use crate::{Money, balance::BalanceSheet};

/// "`from` pays `to` this amount."
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: Uuid,
    pub to: Uuid,
    pub amount: Money,
}

/// Plans the transfers that zero out a balance sheet.
///
/// Already-settled groups (all balances zero) yield an empty plan.
pub fn plan(sheet: &BalanceSheet) -> Vec<Transfer> {
    let mut creditors: Vec<(Uuid, Money)> = sheet
        .rows
        .iter()
        .filter(|row| row.balance.is_positive())
        .map(|row| (row.member_id, row.balance))
        .collect();
    let mut debtors: Vec<(Uuid, Money)> = sheet
        .rows
        .iter()
        .filter(|row| row.balance.is_negative())
        .map(|row| (row.member_id, -row.balance))
        .collect();

    let mut transfers = Vec::new();
    while !creditors.is_empty() && !debtors.is_empty() {
        let creditor = largest(&creditors);
        let debtor = largest(&debtors);
        let amount = creditors[creditor].1.min(debtors[debtor].1);

        transfers.push(Transfer {
            from: debtors[debtor].0,
            to: creditors[creditor].0,
            amount,
        });

        creditors[creditor].1 -= amount;
        debtors[debtor].1 -= amount;
        if creditors[creditor].1.is_zero() {
            creditors.remove(creditor);
        }
        if debtors[debtor].1.is_zero() {
            debtors.remove(debtor);
        }
    }

    transfers
}

/// Index of the entry with the largest amount, smallest id on ties.
fn largest(parties: &[(Uuid, Money)]) -> usize {
    let mut best = 0;
    for (index, party) in parties.iter().enumerate().skip(1) {
        let (best_id, best_amount) = parties[best];
        if party.1 > best_amount || (party.1 == best_amount && party.0 < best_id) {
            best = index;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::MemberBalance;
    use std::collections::HashMap;

    fn sheet(balances: &[(u128, i64)]) -> BalanceSheet {
        let rows = balances
            .iter()
            .map(|&(id, balance)| MemberBalance {
                member_id: Uuid::from_u128(id),
                paid: Money::ZERO,
                share: Money::ZERO,
                balance: Money::new(balance),
            })
            .collect();
        BalanceSheet {
            total: Money::ZERO,
            per_person: Money::ZERO,
            rows,
        }
    }

    fn apply(sheet: &BalanceSheet, transfers: &[Transfer]) -> Vec<i64> {
        let mut balances: HashMap<Uuid, i64> = sheet
            .rows
            .iter()
            .map(|row| (row.member_id, row.balance.minor()))
            .collect();
        for transfer in transfers {
            *balances.get_mut(&transfer.from).unwrap() += transfer.amount.minor();
            *balances.get_mut(&transfer.to).unwrap() -= transfer.amount.minor();
        }
        balances.into_values().collect()
    }

    #[test]
    fn one_payer_two_debtors() {
        let sheet = sheet(&[(1, 60), (2, -30), (3, -30)]);
        let transfers = plan(&sheet);

        // Equal debts: the smaller id pays first.
        assert_eq!(
            transfers,
            vec![
                Transfer {
                    from: Uuid::from_u128(2),
                    to: Uuid::from_u128(1),
                    amount: Money::new(30),
                },
                Transfer {
                    from: Uuid::from_u128(3),
                    to: Uuid::from_u128(1),
                    amount: Money::new(30),
                },
            ]
        );
    }

    #[test]
    fn transfers_zero_out_all_balances() {
        let sheet = sheet(&[(1, 70), (2, -10), (3, -25), (4, -35), (5, 0)]);
        let transfers = plan(&sheet);

        assert!(apply(&sheet, &transfers).iter().all(|&b| b == 0));
        assert!(transfers.iter().all(|t| t.amount.is_positive()));
    }

    #[test]
    fn at_most_n_minus_one_transfers() {
        let sheet = sheet(&[(1, 100), (2, 50), (3, -60), (4, -40), (5, -50)]);
        let transfers = plan(&sheet);

        let nonzero = sheet
            .rows
            .iter()
            .filter(|row| !row.balance.is_zero())
            .count();
        assert!(transfers.len() <= nonzero - 1);
        assert!(apply(&sheet, &transfers).iter().all(|&b| b == 0));
    }

    #[test]
    fn settled_group_yields_empty_plan() {
        let sheet = sheet(&[(1, 0), (2, 0)]);
        assert!(plan(&sheet).is_empty());
    }

    #[test]
    fn deterministic_across_calls() {
        let sheet = sheet(&[(1, 40), (2, 40), (3, -40), (4, -40)]);
        assert_eq!(plan(&sheet), plan(&sheet));
    }
}
