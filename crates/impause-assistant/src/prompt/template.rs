//! Named-slot templates with single-pass literal substitution.
//!
//! A template is plain text containing `{{slot_name}}` markers. Parsing
//! checks every marker against the closed [`Slot`] set, so a malformed
//! template is rejected before any value is looked at. Rendering walks the
//! parsed segments once and copies each value in verbatim: inserted text is
//! never scanned again, so a value that happens to contain `{{...}}` comes
//! out exactly as given.

use std::borrow::Cow;
use std::fmt;

use crate::error::ConfigError;

pub const SLOT_OPEN: &str = "{{";
pub const SLOT_CLOSE: &str = "}}";

/// Every slot an instruction template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    AssistantName,
    ProductName,
    CurrencySymbol,
    CurrencyIsoCode,
    CurrencyPrecision,
    CurrencyDefaultFormat,
    CurrencySeparator,
    CurrencyDelimiter,
    CurrencyExample,
    DateFormat,
    DateExample,
    CurrentDate,
}

impl Slot {
    pub const ALL: [Slot; 12] = [
        Self::AssistantName,
        Self::ProductName,
        Self::CurrencySymbol,
        Self::CurrencyIsoCode,
        Self::CurrencyPrecision,
        Self::CurrencyDefaultFormat,
        Self::CurrencySeparator,
        Self::CurrencyDelimiter,
        Self::CurrencyExample,
        Self::DateFormat,
        Self::DateExample,
        Self::CurrentDate,
    ];

    /// The name used between the braces, e.g. `currency_symbol`.
    pub fn name(self) -> &'static str {
        match self {
            Self::AssistantName => "assistant_name",
            Self::ProductName => "product_name",
            Self::CurrencySymbol => "currency_symbol",
            Self::CurrencyIsoCode => "currency_iso_code",
            Self::CurrencyPrecision => "currency_precision",
            Self::CurrencyDefaultFormat => "currency_default_format",
            Self::CurrencySeparator => "currency_separator",
            Self::CurrencyDelimiter => "currency_delimiter",
            Self::CurrencyExample => "currency_example",
            Self::DateFormat => "date_format",
            Self::DateExample => "date_example",
            Self::CurrentDate => "current_date",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    /// The full marker for this slot, e.g. `{{currency_symbol}}`.
    pub fn marker(self) -> String {
        format!("{SLOT_OPEN}{}{SLOT_CLOSE}", self.name())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Supplies a value for each slot at render time.
pub trait SlotValues {
    fn slot_value(&self, slot: Slot) -> Cow<'_, str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template source, validating every slot marker.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some((text, after_open)) = rest.split_once(SLOT_OPEN) {
            if !text.is_empty() {
                segments.push(Segment::Text(text.to_string()));
            }
            let (name, after_close) = after_open.split_once(SLOT_CLOSE).ok_or_else(|| {
                ConfigError::template(
                    truncate_for_error(after_open),
                    "unterminated slot marker",
                )
            })?;
            let name = name.trim();
            let slot = Slot::from_name(name)
                .ok_or_else(|| ConfigError::template(name, "unknown slot"))?;
            segments.push(Segment::Slot(slot));
            rest = after_close;
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Slots referenced by this template, in order of first appearance.
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::new();
        for segment in &self.segments {
            if let Segment::Slot(slot) = segment
                && !slots.contains(slot)
            {
                slots.push(*slot);
            }
        }
        slots
    }

    /// Fill every slot from `values`.
    ///
    /// Fails on the first slot whose value is empty; no partial output is
    /// returned.
    pub fn render(&self, values: &impl SlotValues) -> Result<String, ConfigError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => {
                    let value = values.slot_value(*slot);
                    if value.is_empty() {
                        return Err(ConfigError::template(slot.name(), "value is empty"));
                    }
                    out.push_str(&value);
                }
            }
        }
        Ok(out)
    }
}

fn truncate_for_error(s: &str) -> String {
    s.chars().take(24).collect()
}

/// Whether `text` still contains anything that looks like a slot marker.
pub fn has_slot_marker(text: &str) -> bool {
    text.split_once(SLOT_OPEN)
        .is_some_and(|(_, after)| after.contains(SLOT_CLOSE))
}
