//! Equal-split balance computation.
//!
//! Everything here runs in integer minor units. When the total does not
//! divide evenly by the member count, the remainder is distributed one
//! minor unit at a time to the first `total % n` members in id order, so
//! `Σ share == total` and `Σ balance == 0` hold exactly, never merely
//! approximately.

use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine, ledger::Ledger};

/// Net position of one member: `balance = paid - share`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberBalance {
    pub member_id: Uuid,
    pub paid: Money,
    pub share: Money,
    pub balance: Money,
}

/// Balances for a whole group, rows in member id order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceSheet {
    pub total: Money,
    /// Display value for "per person": the ceiling of `total / n`, the
    /// amount no member's exact share exceeds.
    pub per_person: Money,
    pub rows: Vec<MemberBalance>,
}

/// Derives each member's net balance from a ledger snapshot.
///
/// A group with zero members has no one to own a share and fails with
/// [`EngineError::EmptyGroup`]. A group with no expenses yields all-zero
/// balances.
pub fn balance_sheet(ledger: &Ledger) -> ResultEngine<BalanceSheet> {
    let members = ledger.members();
    let n = members.len() as i64;
    if n == 0 {
        return Err(EngineError::EmptyGroup(
            "no member to own a share".to_string(),
        ));
    }

    let total: i64 = ledger
        .expenses()
        .iter()
        .map(|expense| expense.amount.minor())
        .sum();
    let base_share = total / n;
    let remainder = total % n;
    let per_person = if remainder == 0 {
        base_share
    } else {
        base_share + 1
    };

    let rows = members
        .iter()
        .enumerate()
        .map(|(index, member)| {
            let paid: i64 = ledger
                .expenses()
                .iter()
                .filter(|expense| expense.paid_by == member.id)
                .map(|expense| expense.amount.minor())
                .sum();
            // Members are already in id order, so the first `remainder`
            // rows carry the extra minor unit.
            let share = if (index as i64) < remainder {
                base_share + 1
            } else {
                base_share
            };
            MemberBalance {
                member_id: member.id,
                paid: Money::new(paid),
                share: Money::new(share),
                balance: Money::new(paid - share),
            }
        })
        .collect();

    Ok(BalanceSheet {
        total: Money::new(total),
        per_person: Money::new(per_person),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{expenses::Expense, members::Member};
    use chrono::Utc;

    fn member(n: u128, name: &str) -> Member {
        Member {
            id: Uuid::from_u128(n),
            name: name.to_string(),
        }
    }

    fn expense(title: &str, amount: i64, paid_by: Uuid) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            title: title.to_string(),
            amount: Money::new(amount),
            paid_by,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn splits_evenly() {
        let a = Uuid::from_u128(1);
        let ledger = Ledger::new(
            vec![member(1, "A"), member(2, "B")],
            vec![expense("Taxi", 100, a)],
        )
        .unwrap();

        let sheet = balance_sheet(&ledger).unwrap();
        assert_eq!(sheet.total, Money::new(100));
        assert_eq!(sheet.per_person, Money::new(50));
        assert_eq!(sheet.rows[0].balance, Money::new(50));
        assert_eq!(sheet.rows[1].balance, Money::new(-50));
    }

    #[test]
    fn spreads_remainder_over_first_members_by_id() {
        let a = Uuid::from_u128(1);
        let ledger = Ledger::new(
            vec![member(2, "B"), member(3, "C"), member(1, "A")],
            vec![expense("Snacks", 100, a)],
        )
        .unwrap();

        let sheet = balance_sheet(&ledger).unwrap();
        let shares: Vec<i64> = sheet.rows.iter().map(|row| row.share.minor()).collect();
        assert_eq!(shares, [34, 33, 33]);
        assert_eq!(sheet.total, Money::new(100));
    }

    #[test]
    fn balances_always_sum_to_zero() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let ledger = Ledger::new(
            vec![member(1, "A"), member(2, "B"), member(3, "C")],
            vec![
                expense("Dinner", 9001, a),
                expense("Hotel", 12345, b),
                expense("Fuel", 77, a),
            ],
        )
        .unwrap();

        let sheet = balance_sheet(&ledger).unwrap();
        let share_sum: Money = sheet.rows.iter().map(|row| row.share).sum();
        let balance_sum: Money = sheet.rows.iter().map(|row| row.balance).sum();
        assert_eq!(share_sum, sheet.total);
        assert!(balance_sum.is_zero());
    }

    #[test]
    fn no_expenses_means_all_zero() {
        let ledger = Ledger::new(vec![member(1, "A"), member(2, "B")], vec![]).unwrap();
        let sheet = balance_sheet(&ledger).unwrap();
        assert_eq!(sheet.total, Money::ZERO);
        assert!(sheet.rows.iter().all(|row| row.balance.is_zero()));
    }

    #[test]
    #[should_panic(expected = "EmptyGroup")]
    fn fail_without_members() {
        let ledger = Ledger::new(vec![], vec![]).unwrap();
        balance_sheet(&ledger).unwrap();
    }
}
