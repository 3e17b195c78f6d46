//! The fixed set of date display formats a household or user can choose.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A supported date display preference. Serialized as its strftime pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DateFormat {
    /// `%m-%d-%Y`
    #[default]
    MonthDayYearDash,
    /// `%d.%m.%Y`
    DayMonthYearDot,
    /// `%d-%m-%Y`
    DayMonthYearDash,
    /// `%Y-%m-%d`
    Iso,
    /// `%d/%m/%Y`
    DayMonthYearSlash,
    /// `%Y/%m/%d`
    YearMonthDaySlash,
    /// `%m/%d/%Y`
    MonthDayYearSlash,
    /// `%e/%m/%Y`
    PaddedDayMonthYearSlash,
    /// `%Y.%m.%d`
    YearMonthDayDot,
}

impl DateFormat {
    pub const ALL: [DateFormat; 9] = [
        Self::MonthDayYearDash,
        Self::DayMonthYearDot,
        Self::DayMonthYearDash,
        Self::Iso,
        Self::DayMonthYearSlash,
        Self::YearMonthDaySlash,
        Self::MonthDayYearSlash,
        Self::PaddedDayMonthYearSlash,
        Self::YearMonthDayDot,
    ];

    /// The strftime pattern for this format.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::MonthDayYearDash => "%m-%d-%Y",
            Self::DayMonthYearDot => "%d.%m.%Y",
            Self::DayMonthYearDash => "%d-%m-%Y",
            Self::Iso => "%Y-%m-%d",
            Self::DayMonthYearSlash => "%d/%m/%Y",
            Self::YearMonthDaySlash => "%Y/%m/%d",
            Self::MonthDayYearSlash => "%m/%d/%Y",
            Self::PaddedDayMonthYearSlash => "%e/%m/%Y",
            Self::YearMonthDayDot => "%Y.%m.%d",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

impl FromStr for DateFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.pattern() == pattern)
            .ok_or_else(|| ConfigError::UnknownDateFormat {
                pattern: s.to_string(),
            })
    }
}

impl TryFrom<String> for DateFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateFormat> for String {
    fn from(value: DateFormat) -> Self {
        value.pattern().to_string()
    }
}

/// The date display pattern handed to the instruction renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFormatSpec {
    pub format: DateFormat,
}

impl DateFormatSpec {
    pub fn new(format: DateFormat) -> Self {
        Self { format }
    }

    pub fn pattern(&self) -> &'static str {
        self.format.pattern()
    }

    /// Render `date` with this pattern.
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

impl From<DateFormat> for DateFormatSpec {
    fn from(format: DateFormat) -> Self {
        Self::new(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_pattern() {
        for format in DateFormat::ALL {
            assert_eq!(format.pattern().parse::<DateFormat>().unwrap(), format);
        }
    }

    #[test]
    fn unknown_pattern_is_rejected() {
        let err = "%B %d, %Y".parse::<DateFormat>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownDateFormat {
                pattern: "%B %d, %Y".into()
            }
        );
    }

    #[test]
    fn serde_uses_pattern_strings() {
        let json = serde_json::to_string(&DateFormat::DayMonthYearDot).unwrap();
        assert_eq!(json, r#""%d.%m.%Y""#);

        let parsed: DateFormat = serde_json::from_str(r#""%Y-%m-%d""#).unwrap();
        assert_eq!(parsed, DateFormat::Iso);

        assert!(serde_json::from_str::<DateFormat>(r#""%Y""#).is_err());
    }

    #[test]
    fn format_date_applies_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            DateFormatSpec::new(DateFormat::DayMonthYearDot).format_date(date),
            "05.03.2024"
        );
        assert_eq!(
            DateFormatSpec::new(DateFormat::PaddedDayMonthYearSlash).format_date(date),
            " 5/03/2024"
        );
    }
}
