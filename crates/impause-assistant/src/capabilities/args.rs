//! Argument types for the default capabilities.
//!
//! These types exist to generate the JSON Schema each capability advertises
//! (see [`json_schema_for`](crate::json_schema_for)). Handlers that
//! implement the capabilities may deserialize model-issued arguments into
//! them, so the advertised schema and the parsing logic cannot drift apart.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sort order for transaction listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// How `amount` is compared against each transaction's amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AmountOperator {
    Equal,
    Less,
    Greater,
}

/// Filters for `get_transactions`. Results are paginated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GetTransactionsArgs {
    /// Page number, starting at 1.
    pub page: u32,
    /// Sort order by date. Defaults to newest first.
    #[serde(default)]
    pub order: SortOrder,
    /// Free-text search over transaction names and notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Amount to filter by, in the account's currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Comparison applied to `amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_operator: Option<AmountOperator>,
    /// Earliest transaction date, formatted YYYY-MM-DD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Latest transaction date, formatted YYYY-MM-DD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Account names to include.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<String>,
    /// Category names to include.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Merchant names to include.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merchants: Vec<String>,
    /// Tag names to include.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// `get_accounts` takes no arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetAccountsArgs {}

/// `get_balance_sheet` takes no arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetBalanceSheetArgs {}

/// Period for `get_income_statement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GetIncomeStatementArgs {
    /// Start of the period, formatted YYYY-MM-DD.
    pub start_date: String,
    /// End of the period, formatted YYYY-MM-DD.
    pub end_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_schema_for;

    #[test]
    fn transactions_schema_requires_only_page() {
        let schema = json_schema_for::<GetTransactionsArgs>();
        assert_eq!(schema["type"], "object");
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required, &vec![serde_json::Value::from("page")]);
        assert!(schema["properties"]["start_date"].is_object());
    }

    #[test]
    fn income_statement_requires_both_dates() {
        let schema = json_schema_for::<GetIncomeStatementArgs>();
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&"start_date".into()));
        assert!(required.contains(&"end_date".into()));
    }

    #[test]
    fn transactions_args_parse_with_defaults() {
        let args: GetTransactionsArgs =
            serde_json::from_str(r#"{"page": 2, "categories": ["Dining"]}"#).unwrap();
        assert_eq!(args.page, 2);
        assert_eq!(args.order, SortOrder::Desc);
        assert_eq!(args.categories, vec!["Dining".to_string()]);
        assert!(args.amount_operator.is_none());
    }
}
