//! Canonical capability name constants.
//!
//! Every capability-name string literal should reference these constants.
//! When a capability is renamed, only this file needs to change. Renaming
//! is a breaking change for any orchestrator dispatching by name.

pub const GET_TRANSACTIONS: &str = "get_transactions";
pub const GET_ACCOUNTS: &str = "get_accounts";
pub const GET_BALANCE_SHEET: &str = "get_balance_sheet";
pub const GET_INCOME_STATEMENT: &str = "get_income_statement";

/// Default capability names in their contractual order.
pub const DEFAULT_ORDER: [&str; 4] = [
    GET_TRANSACTIONS,
    GET_ACCOUNTS,
    GET_BALANCE_SHEET,
    GET_INCOME_STATEMENT,
];
