//! Capability registries.
//!
//! A registry is anything implementing [`CapabilitySet`]. The composer asks
//! it for an ordered list and never filters or reorders what comes back, so
//! variation (per-user subsets, experiments) is expressed by swapping in a
//! different registry rather than by branching inside one.
//!
//! [`DefaultCapabilities`] serves the four read-only finance capabilities in
//! their contractual order. The list is declared once and shared by every
//! composition.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use super::args::{GetAccountsArgs, GetBalanceSheetArgs, GetIncomeStatementArgs, GetTransactionsArgs};
use super::descriptor::CapabilityDescriptor;
use super::names::{GET_ACCOUNTS, GET_BALANCE_SHEET, GET_INCOME_STATEMENT, GET_TRANSACTIONS};
use super::spec::CapabilitySpec;
use crate::error::ConfigError;

/// A source of capability descriptors.
///
/// Implementations must return the same list, in the same order, on every
/// call. The returned slice is shared, never copied per composition.
pub trait CapabilitySet: Send + Sync {
    fn capabilities(&self) -> Arc<[CapabilityDescriptor]>;
}

static DEFAULT_CAPABILITIES: LazyLock<Arc<[CapabilityDescriptor]>> = LazyLock::new(|| {
    Arc::from(vec![
        get_transactions(),
        get_accounts(),
        get_balance_sheet(),
        get_income_statement(),
    ])
});

/// The default capability list: transactions, accounts, balance sheet,
/// income statement, in that order.
///
/// Some runtimes treat earlier entries as preferred; reordering is a
/// breaking change.
pub fn list_default_capabilities() -> Arc<[CapabilityDescriptor]> {
    Arc::clone(&DEFAULT_CAPABILITIES)
}

fn get_transactions() -> CapabilityDescriptor {
    CapabilitySpec::builder(
        GET_TRANSACTIONS,
        "Search and list the user's transactions, newest first, one page at a time",
    )
    .when_to_use(
        "When the user asks about specific purchases, merchants, categories, or spending \
         within a date range",
    )
    .when_not_to_use(
        "For totals of income and expenses over a period, use get_income_statement",
    )
    .parameters_for::<GetTransactionsArgs>()
    .example(
        r#"get_transactions(page=1, categories=["Dining"], start_date="2024-03-01")"#,
        "First page of dining transactions since March 1",
    )
    .output_format("JSON object with the page of transactions and pagination totals")
    .build()
    .into()
}

fn get_accounts() -> CapabilityDescriptor {
    CapabilitySpec::builder(
        GET_ACCOUNTS,
        "List the user's accounts with their type, balance, and currency",
    )
    .when_to_use("When the user asks about a particular account or which accounts they have")
    .when_not_to_use("For net worth or assets versus liabilities, use get_balance_sheet")
    .parameters_for::<GetAccountsArgs>()
    .output_format("JSON array of accounts")
    .build()
    .into()
}

fn get_balance_sheet() -> CapabilityDescriptor {
    CapabilitySpec::builder(
        GET_BALANCE_SHEET,
        "Summarize the user's net worth, total assets, and total liabilities",
    )
    .when_to_use("When the user asks about net worth, what they own, or what they owe")
    .when_not_to_use("For details of a single account, use get_accounts")
    .parameters_for::<GetBalanceSheetArgs>()
    .disambiguate(
        "User asks how much is in their checking account",
        GET_ACCOUNTS,
        "the balance sheet only reports totals",
    )
    .output_format("JSON object with net worth, assets, liabilities, and their trends")
    .build()
    .into()
}

fn get_income_statement() -> CapabilityDescriptor {
    CapabilitySpec::builder(
        GET_INCOME_STATEMENT,
        "Summarize income and expenses by category for a date range",
    )
    .when_to_use(
        "When the user asks how much they earned or spent over a period, or where their \
         money went",
    )
    .when_not_to_use("To see individual purchases, use get_transactions")
    .parameters_for::<GetIncomeStatementArgs>()
    .example(
        r#"get_income_statement(start_date="2024-02-01", end_date="2024-02-29")"#,
        "February income and expense totals by category",
    )
    .output_format("JSON object with income and expense totals broken down by category")
    .build()
    .into()
}

/// Registry serving [`list_default_capabilities`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCapabilities;

impl CapabilitySet for DefaultCapabilities {
    fn capabilities(&self) -> Arc<[CapabilityDescriptor]> {
        list_default_capabilities()
    }
}

/// A subset of another registry, keeping the inner registry's order.
///
/// The subset is computed once at construction. Names in the allow-list that
/// the inner registry does not offer are ignored.
#[derive(Debug, Clone)]
pub struct RestrictedCapabilities {
    capabilities: Arc<[CapabilityDescriptor]>,
}

impl RestrictedCapabilities {
    pub fn new<I, S>(inner: &dyn CapabilitySet, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed: HashSet<String> = allowed
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        let capabilities = inner
            .capabilities()
            .iter()
            .filter(|c| allowed.contains(c.name()))
            .cloned()
            .collect::<Vec<_>>();
        Self {
            capabilities: Arc::from(capabilities),
        }
    }
}

impl CapabilitySet for RestrictedCapabilities {
    fn capabilities(&self) -> Arc<[CapabilityDescriptor]> {
        Arc::clone(&self.capabilities)
    }
}

/// Check a capability list is non-empty and uniquely named.
pub fn validate_capabilities(capabilities: &[CapabilityDescriptor]) -> Result<(), ConfigError> {
    if capabilities.is_empty() {
        return Err(ConfigError::EmptyCapabilityList);
    }
    let mut seen = HashSet::new();
    for capability in capabilities {
        if !seen.insert(capability.name()) {
            return Err(ConfigError::DuplicateCapability {
                name: capability.name().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::names::DEFAULT_ORDER;

    fn names(list: &[CapabilityDescriptor]) -> Vec<&str> {
        list.iter().map(CapabilityDescriptor::name).collect()
    }

    #[test]
    fn default_list_has_contractual_order() {
        assert_eq!(names(&list_default_capabilities()), DEFAULT_ORDER);
    }

    #[test]
    fn default_list_is_shared_not_rebuilt() {
        let a = list_default_capabilities();
        let b = DefaultCapabilities.capabilities();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn default_list_is_valid() {
        validate_capabilities(&list_default_capabilities()).unwrap();
    }

    #[test]
    fn default_descriptions_carry_guidance() {
        for capability in list_default_capabilities().iter() {
            let def = capability.definition();
            assert!(def.function.description.contains("\nAvoid: "));
            assert_eq!(def.function.parameters["type"], "object");
        }
    }

    #[test]
    fn restricted_keeps_inner_order() {
        let restricted = RestrictedCapabilities::new(
            &DefaultCapabilities,
            [GET_INCOME_STATEMENT, GET_TRANSACTIONS, "no_such_capability"],
        );
        assert_eq!(
            names(&restricted.capabilities()),
            vec![GET_TRANSACTIONS, GET_INCOME_STATEMENT]
        );
    }

    #[test]
    fn restricted_to_nothing_fails_validation() {
        let restricted = RestrictedCapabilities::new(&DefaultCapabilities, Vec::<String>::new());
        assert_eq!(
            validate_capabilities(&restricted.capabilities()),
            Err(ConfigError::EmptyCapabilityList)
        );
    }

    #[test]
    fn duplicate_names_fail_validation() {
        let defaults = list_default_capabilities();
        let doubled = vec![defaults[1].clone(), defaults[0].clone(), defaults[1].clone()];
        assert_eq!(
            validate_capabilities(&doubled),
            Err(ConfigError::DuplicateCapability {
                name: GET_ACCOUNTS.into()
            })
        );
    }
}
