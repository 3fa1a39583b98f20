use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod group {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupNew {
        pub name: String,
    }

    /// Request body for renaming a group.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupRename {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupCreated {
        pub id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupView {
        pub id: String,
        pub name: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupsResponse {
        pub groups: Vec<GroupView>,
    }

    /// A group with its members and expenses nested, the shape clients use
    /// for the group detail page.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GroupDetail {
        pub id: String,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub members: Vec<super::member::MemberView>,
        pub expenses: Vec<super::expense::ExpenseView>,
    }
}

pub mod member {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberView {
        pub id: Uuid,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MembersResponse {
        pub members: Vec<MemberView>,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        /// Amount in integer minor units; must be > 0.
        pub amount_minor: i64,
        pub paid_by: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub title: String,
        pub amount_minor: i64,
        pub paid_by: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: Uuid,
        pub title: String,
        pub amount_minor: i64,
        pub paid_by: Uuid,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesResponse {
        pub expenses: Vec<ExpenseView>,
    }
}

pub mod summary {
    use super::*;

    /// One member's position: `balance_minor = paid_minor - share_minor`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub member_id: Uuid,
        pub name: String,
        pub paid_minor: i64,
        pub share_minor: i64,
        pub balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub total_minor: i64,
        pub per_person_minor: i64,
        pub balances: Vec<BalanceView>,
    }
}

pub mod settlement {
    use super::*;

    /// "`from` pays `to`", resolved to display names for the client.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransferView {
        pub from: String,
        pub to: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementResponse {
        pub settlements: Vec<TransferView>,
    }
}
