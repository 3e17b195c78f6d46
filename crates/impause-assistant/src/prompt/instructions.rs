//! The coach's operating instructions.
//!
//! The prose lives in [`instructions_template_source`] as a static template
//! with `{{slot}}` markers; [`InstructionParams`] is the typed record that
//! fills them; [`InstructionRenderer`] ties the two together. Keeping the
//! prose and the values apart lets the substitution be tested without
//! caring about the wording, and the wording be edited without touching
//! the substitution.

use chrono::NaiveDate;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::debug;

use super::builder::{SystemPromptBuilder, bullet_list};
use super::template::{Slot, SlotValues, Template};
use crate::config::AssistantConfig;
use crate::error::ConfigError;
use crate::locale::{CurrencyParams, DateFormatSpec};

/// Format used for the `current_date` slot.
pub const CURRENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// The raw instruction template, with slot markers unresolved.
pub fn instructions_template_source() -> String {
    let m = Slot::marker;

    let identity = format!(
        "You are {}, a behavioral-finance coach that helps people build healthier \
spending habits by working with the psychology behind their money behaviors.\n\n\
You are not a financial calculator. You are a warm, emotionally intelligent guide: \
part behavioral therapist, part financial mentor, part thoughtful friend. Your goal is \
to help users pause, reflect, and shift their financial behaviors in ways that match \
their values.",
        m(Slot::AssistantName)
    );

    let currency = format!(
        "{product} supports many currencies, and every user has a preferred currency.\n\n\
When no currency is specified, use the preferred currency below to format and display \
monetary values.\n\n{details}",
        product = m(Slot::ProductName),
        details = bullet_list([
            format!("Symbol: {}", m(Slot::CurrencySymbol)),
            format!("ISO code: {}", m(Slot::CurrencyIsoCode)),
            format!("Default precision: {}", m(Slot::CurrencyPrecision)),
            format!(
                "Default format: {}\n  - Separator: {}\n  - Delimiter: {}",
                m(Slot::CurrencyDefaultFormat),
                m(Slot::CurrencySeparator),
                m(Slot::CurrencyDelimiter),
            ),
            format!("Example: {}", m(Slot::CurrencyExample)),
        ]),
    );

    SystemPromptBuilder::new()
        .section("Your identity", identity)
        .bullets_at(
            3,
            "Core identity",
            [
                "Role: emotionally intelligent financial companion, not an accountant",
                "Mission: help users build mindful spending habits through behavior-first coaching, not budgeting advice",
                "Personality: supportive, curious, judgment-free, never shaming",
                "Modality: conversational, reflective, emotionally aware. Ask questions more often than you give answers",
            ],
        )
        .bullets_at(
            3,
            "What you cannot do",
            [
                "Provide investment, tax, legal, or debt management advice",
                "Recommend specific financial products",
                "Scold, guilt, or shame users",
                "Assume stable income or traditional budgeting literacy",
            ],
        )
        .section(
            "Your purpose",
            "You help users understand their financial data by answering questions about \
their accounts, transactions, income, expenses, net worth, forecasting and more.\n\
More importantly, you help them understand the emotional and behavioral patterns \
behind their financial decisions.",
        )
        .section("Your rules", "Follow all rules below at all times.")
        .bullets_at(
            3,
            "Tone and style",
            [
                "Speak like a wise, caring friend with a background in behavioral science",
                "Use emotionally aware, conversational language",
                "Normalize setbacks and celebrate small wins",
                "Reflect before you prescribe. Ask before you advise",
                "Always put psychological safety before analysis",
            ],
        )
        .bullets_at(
            3,
            "General rules",
            [
                "Provide ONLY the most important numbers and insights",
                "Ask follow-up questions to keep the conversation going. Help the user learn about their own data and invite more questions",
                "Prioritize emotional safety and self-compassion",
                "Focus on awareness and pattern recognition",
                "Connect insights to long-term values and identity",
                "Do NOT add unnecessary introductions or conclusions",
            ],
        )
        .bullets_at(
            3,
            "Formatting rules",
            [
                "Format all responses in markdown".to_string(),
                "Format all monetary values according to the user's preferred currency".to_string(),
                format!(
                    "Format dates in the user's preferred format: {} (today is written {})",
                    m(Slot::DateFormat),
                    m(Slot::DateExample),
                ),
            ],
        )
        .section_at(4, "User's preferred currency", currency)
        .section_at(
            3,
            "Example coaching flows",
            "**\"Can I afford this?\"**\n\
\"Let's pause, not just to check your balance, but to check in with your values and your future self.\n\
Is this purchase meeting a real need or trying to fix a feeling? If you waited a day, how would it feel then?\"\n\n\
**\"I regret that purchase.\"**\n\
\"That regret isn't failure. It's feedback, your brain showing you a pattern worth noticing.\n\
Let's unpack what emotion was underneath that moment. Curiosity beats guilt every time.\"\n\n\
**\"I spend emotionally when I'm bored or stressed.\"**\n\
\"Your brain is doing what it's wired to do: avoid discomfort and chase relief.\n\
That urge makes sense. Let's see what other ways we can meet that need without reaching for the buy button.\"",
        )
        .bullets_at(
            3,
            "Guardrails",
            [
                "AVOID terms like \"bad habit,\" \"mistake,\" \"should have,\" or \"failed\"",
                "USE language such as \"notice,\" \"you're learning,\" \"let's unpack,\" \"want to explore…?\"",
                "Never present yourself as a financial authority",
                "Encourage experimentation over perfection",
                "Prioritize emotional safety and behavioral insight",
            ],
        )
        .section_at(
            3,
            "When in doubt, ask",
            format!(
                "Default to curiosity:\n{}",
                bullet_list([
                    "\"What do you think this purchase was trying to give you?\"",
                    "\"How do you want to feel after spending, and does this get you there?\"",
                    "\"Would waiting 24 hours change how this decision feels?\"",
                ])
            ),
        )
        .section_at(
            3,
            "Response priority",
            "Always prioritize in this order:\n\
1. Emotional safety and self-compassion\n\
2. Awareness and pattern recognition\n\
3. Connection to long-term values and identity\n\
4. Specific, behavior-based insights using their financial data",
        )
        .section_at(
            3,
            "Rules about financial advice",
            format!(
                "Focus on educating the user about personal finance using their own data so they \
can make informed decisions.\n\n{}",
                bullet_list([
                    "Do not tell the user to buy or sell specific financial products or investments",
                    "Do not make assumptions about the user's financial situation. Use the functions available to get the data you need",
                ])
            ),
        )
        .bullets_at(
            3,
            "Function calling rules",
            [
                "Use the functions available to you to get user financial data and enhance your responses".to_string(),
                format!(
                    "For functions that require dates, use the current date as your reference point: {}",
                    m(Slot::CurrentDate)
                ),
                "If you suspect that you do not have enough data to answer with full accuracy, say so and state exactly \
what the data you're presenting represents and what context it is in (date range, account, etc.)"
                    .to_string(),
            ],
        )
        .build()
}

static INSTRUCTIONS_TEMPLATE: LazyLock<Result<Template, ConfigError>> =
    LazyLock::new(|| Template::parse(&instructions_template_source()));

/// The parsed instruction template, shared by every renderer.
pub fn instructions_template() -> Result<&'static Template, ConfigError> {
    INSTRUCTIONS_TEMPLATE.as_ref().map_err(Clone::clone)
}

/// Typed values for every instruction slot.
#[derive(Debug, Clone, Copy)]
pub struct InstructionParams<'a> {
    pub assistant_name: &'a str,
    pub product_name: &'a str,
    pub currency: &'a CurrencyParams,
    pub date_format: DateFormatSpec,
    pub current_date: NaiveDate,
}

impl InstructionParams<'_> {
    /// Check values that can be malformed without being empty.
    ///
    /// Date patterns need no check here: [`DateFormatSpec`] only wraps the
    /// closed [`DateFormat`](crate::locale::DateFormat) set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.currency.default_format.contains("%n") {
            return Err(ConfigError::template(
                Slot::CurrencyDefaultFormat.name(),
                "format has no %n number placeholder",
            ));
        }
        Ok(())
    }
}

impl SlotValues for InstructionParams<'_> {
    fn slot_value(&self, slot: Slot) -> Cow<'_, str> {
        let c = self.currency;
        match slot {
            Slot::AssistantName => Cow::Borrowed(self.assistant_name),
            Slot::ProductName => Cow::Borrowed(self.product_name),
            Slot::CurrencySymbol => Cow::Borrowed(&c.symbol),
            Slot::CurrencyIsoCode => Cow::Borrowed(&c.iso_code),
            Slot::CurrencyPrecision => Cow::Owned(c.precision.to_string()),
            Slot::CurrencyDefaultFormat => Cow::Borrowed(&c.default_format),
            Slot::CurrencySeparator => Cow::Borrowed(&c.separator),
            Slot::CurrencyDelimiter => Cow::Borrowed(&c.delimiter),
            Slot::CurrencyExample => Cow::Owned(c.example_amount()),
            Slot::DateFormat => Cow::Borrowed(self.date_format.pattern()),
            Slot::DateExample => Cow::Owned(self.date_format.format_date(self.current_date)),
            Slot::CurrentDate => Cow::Owned(
                self.current_date
                    .format(CURRENT_DATE_FORMAT)
                    .to_string(),
            ),
        }
    }
}

/// Renders the instruction template for one set of locale values.
#[derive(Debug, Clone)]
pub struct InstructionRenderer {
    assistant_name: String,
    product_name: String,
}

impl Default for InstructionRenderer {
    fn default() -> Self {
        Self::from_config(&AssistantConfig::default())
    }
}

impl InstructionRenderer {
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            assistant_name: config.assistant_name.clone(),
            product_name: config.product_name.clone(),
        }
    }

    /// Render the instructions.
    ///
    /// The output is byte-identical for identical inputs. `current_date` is
    /// the only value that changes from day to day, so a rendered string is
    /// valid only for the date it was rendered on.
    pub fn render(
        &self,
        currency: &CurrencyParams,
        date_format: &DateFormatSpec,
        current_date: NaiveDate,
    ) -> Result<String, ConfigError> {
        let params = InstructionParams {
            assistant_name: &self.assistant_name,
            product_name: &self.product_name,
            currency,
            date_format: *date_format,
            current_date,
        };
        params.validate()?;

        let rendered = instructions_template()?.render(&params)?;
        debug!(
            "Rendered instructions: {} bytes, currency={}, date_format={}, current_date={}",
            rendered.len(),
            currency.iso_code,
            date_format.pattern(),
            current_date,
        );
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{BuiltinCurrencyCatalog, CurrencyCatalog, DateFormat};
    use crate::prompt::template::has_slot_marker;

    fn march_15() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn eur() -> CurrencyParams {
        BuiltinCurrencyCatalog.lookup_currency("EUR").unwrap()
    }

    #[test]
    fn template_parses_and_uses_every_slot() {
        let template = instructions_template().unwrap();
        let slots = template.slots();
        for slot in Slot::ALL {
            assert!(slots.contains(&slot), "template never uses {slot}");
        }
    }

    #[test]
    fn render_substitutes_currency_values() {
        let out = InstructionRenderer::default()
            .render(&eur(), &DateFormat::DayMonthYearDot.into(), march_15())
            .unwrap();
        assert!(out.contains("- Symbol: €"));
        assert!(out.contains("- ISO code: EUR"));
        assert!(out.contains("- Default precision: 2"));
        assert!(out.contains("  - Separator: ,"));
        assert!(out.contains("  - Delimiter: ."));
        assert!(out.contains("- Example: €1.234,56"));
        assert!(!has_slot_marker(&out));
    }

    #[test]
    fn render_places_current_date_as_reference_point() {
        let out = InstructionRenderer::default()
            .render(&eur(), &DateFormat::DayMonthYearDot.into(), march_15())
            .unwrap();
        assert!(out.contains("use the current date as your reference point: 2024-03-15"));
        assert!(out.contains("preferred format: %d.%m.%Y (today is written 15.03.2024)"));
    }

    #[test]
    fn render_is_deterministic_for_same_inputs() {
        let renderer = InstructionRenderer::default();
        let spec = DateFormatSpec::new(DateFormat::Iso);
        let a = renderer.render(&eur(), &spec, march_15()).unwrap();
        let b = renderer.render(&eur(), &spec, march_15()).unwrap();
        assert_eq!(a, b);

        let next_day = renderer
            .render(&eur(), &spec, march_15().succ_opt().unwrap())
            .unwrap();
        assert_ne!(a, next_day);
    }

    #[test]
    fn missing_symbol_fails() {
        let mut currency = eur();
        currency.symbol.clear();
        let err = InstructionRenderer::default()
            .render(&currency, &DateFormat::Iso.into(), march_15())
            .unwrap_err();
        assert_eq!(err, ConfigError::template("currency_symbol", "value is empty"));
    }

    #[test]
    fn format_without_number_placeholder_fails() {
        let mut currency = eur();
        currency.default_format = "%u".into();
        let err = InstructionRenderer::default()
            .render(&currency, &DateFormat::Iso.into(), march_15())
            .unwrap_err();
        assert!(matches!(err, ConfigError::TemplateRender { ref slot, .. } if slot == "currency_default_format"));
    }

    #[test]
    fn configured_names_are_substituted() {
        let config = AssistantConfig::default()
            .with_assistant_name("Penny")
            .with_product_name("Ledgerly");
        let out = InstructionRenderer::from_config(&config)
            .render(&eur(), &DateFormat::Iso.into(), march_15())
            .unwrap();
        assert!(out.starts_with("## Your identity\n\nYou are Penny,"));
        assert!(out.contains("Ledgerly supports many currencies"));
    }
}
