//! Currency display parameters and the catalog they are looked up from.
//!
//! A household stores only an ISO 4217 code. Everything the instructions
//! need to tell the agent how to write money (symbol, precision, separators,
//! display format) is derived from that code through a [`CurrencyCatalog`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display settings for one currency.
///
/// `default_format` uses `%u` for the unit (symbol) and `%n` for the
/// formatted number, e.g. `"%u%n"` renders `$1,234.56`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyParams {
    pub symbol: String,
    pub iso_code: String,
    pub precision: u8,
    pub separator: String,
    pub delimiter: String,
    pub default_format: String,
}

impl CurrencyParams {
    /// Format an amount given in minor units (cents for a precision-2
    /// currency) using this currency's separator, delimiter and format.
    ///
    /// Works on the decimal digits directly, so any precision renders.
    pub fn format_minor_units(&self, minor_units: i64) -> String {
        let precision = usize::from(self.precision);
        let digits = format!(
            "{:0>width$}",
            minor_units.unsigned_abs(),
            width = precision + 1
        );
        let (whole, fraction) = digits.split_at(digits.len() - precision);
        self.format_number(minor_units < 0, whole, fraction)
    }

    /// A sample amount (one thousand two hundred thirty-four and change)
    /// rendered in this currency, for showing the agent a concrete example.
    pub fn example_amount(&self) -> String {
        let fraction: String = "56"
            .chars()
            .chain(std::iter::repeat('0'))
            .take(usize::from(self.precision))
            .collect();
        self.format_number(false, "1234", &fraction)
    }

    fn format_number(&self, negative: bool, whole: &str, fraction: &str) -> String {
        let mut number = group_digits(whole, &self.delimiter);
        if !fraction.is_empty() {
            number.push_str(&self.separator);
            number.push_str(fraction);
        }

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        let mut chars = self.default_format.chars().peekable();
        while let Some(c) = chars.next() {
            match (c, chars.peek()) {
                ('%', Some('u')) => {
                    out.push_str(&self.symbol);
                    chars.next();
                }
                ('%', Some('n')) => {
                    out.push_str(&number);
                    chars.next();
                }
                _ => out.push(c),
            }
        }
        out
    }
}

fn group_digits(digits: &str, delimiter: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * delimiter.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(delimiter);
        }
        out.push(c);
    }
    out
}

/// Read-only source of currency display parameters.
///
/// Implementations are shared between concurrent compositions, so they must
/// be `Send + Sync` and must not mutate on lookup.
pub trait CurrencyCatalog: Send + Sync {
    /// Look up a currency by ISO code. Returns `None` for unknown codes.
    fn lookup_currency(&self, code: &str) -> Option<CurrencyParams>;
}

/// Normalize a stored currency code for lookup (`" eur "` → `"EUR"`).
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

struct CurrencyEntry {
    iso_code: &'static str,
    symbol: &'static str,
    precision: u8,
    separator: &'static str,
    delimiter: &'static str,
    default_format: &'static str,
}

impl CurrencyEntry {
    fn to_params(&self) -> CurrencyParams {
        CurrencyParams {
            symbol: self.symbol.to_string(),
            iso_code: self.iso_code.to_string(),
            precision: self.precision,
            separator: self.separator.to_string(),
            delimiter: self.delimiter.to_string(),
            default_format: self.default_format.to_string(),
        }
    }
}

macro_rules! currency {
    ($iso:literal, $symbol:literal, $precision:literal, $sep:literal, $delim:literal, $fmt:literal) => {
        CurrencyEntry {
            iso_code: $iso,
            symbol: $symbol,
            precision: $precision,
            separator: $sep,
            delimiter: $delim,
            default_format: $fmt,
        }
    };
}

const BUILTIN_CURRENCIES: &[CurrencyEntry] = &[
    currency!("USD", "$", 2, ".", ",", "%u%n"),
    currency!("EUR", "€", 2, ",", ".", "%u%n"),
    currency!("GBP", "£", 2, ".", ",", "%u%n"),
    currency!("CAD", "C$", 2, ".", ",", "%u%n"),
    currency!("AUD", "A$", 2, ".", ",", "%u%n"),
    currency!("JPY", "¥", 0, ".", ",", "%u%n"),
    currency!("CHF", "CHF", 2, ".", "'", "%u %n"),
    currency!("INR", "₹", 2, ".", ",", "%u%n"),
    currency!("NZD", "NZ$", 2, ".", ",", "%u%n"),
    currency!("SEK", "kr", 2, ",", " ", "%n %u"),
    currency!("NOK", "kr", 2, ",", " ", "%n %u"),
    currency!("DKK", "kr.", 2, ",", ".", "%n %u"),
    currency!("PLN", "zł", 2, ",", " ", "%n %u"),
    currency!("BRL", "R$", 2, ",", ".", "%u %n"),
    currency!("MXN", "MX$", 2, ".", ",", "%u%n"),
    currency!("SGD", "S$", 2, ".", ",", "%u%n"),
    currency!("HKD", "HK$", 2, ".", ",", "%u%n"),
    currency!("CNY", "¥", 2, ".", ",", "%u%n"),
    currency!("KRW", "₩", 0, ".", ",", "%u%n"),
    currency!("ZAR", "R", 2, ".", " ", "%u%n"),
];

/// The catalog compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCurrencyCatalog;

impl BuiltinCurrencyCatalog {
    /// ISO codes of every built-in currency, in declaration order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> {
        BUILTIN_CURRENCIES.iter().map(|c| c.iso_code)
    }
}

impl CurrencyCatalog for BuiltinCurrencyCatalog {
    fn lookup_currency(&self, code: &str) -> Option<CurrencyParams> {
        let code = normalize_code(code);
        BUILTIN_CURRENCIES
            .iter()
            .find(|c| c.iso_code == code)
            .map(CurrencyEntry::to_params)
    }
}

/// A catalog backed by caller-supplied entries.
///
/// Useful when currency settings come from a database or when a deployment
/// overrides the built-in display conventions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCurrencyCatalog {
    currencies: HashMap<String, CurrencyParams>,
}

impl InMemoryCurrencyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of every built-in currency.
    pub fn from_builtin() -> Self {
        BUILTIN_CURRENCIES
            .iter()
            .map(CurrencyEntry::to_params)
            .fold(Self::new(), Self::with_currency)
    }

    /// Add or replace a currency (builder pattern).
    pub fn with_currency(mut self, params: CurrencyParams) -> Self {
        self.insert(params);
        self
    }

    /// Add or replace a currency, keyed by its normalized ISO code.
    pub fn insert(&mut self, params: CurrencyParams) {
        self.currencies.insert(normalize_code(&params.iso_code), params);
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl CurrencyCatalog for InMemoryCurrencyCatalog {
    fn lookup_currency(&self, code: &str) -> Option<CurrencyParams> {
        self.currencies.get(&normalize_code(code)).cloned()
    }
}
