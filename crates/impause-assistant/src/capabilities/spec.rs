//! Structured capability descriptions with usage guidance.
//!
//! `CapabilitySpec` replaces free-form description strings with structured
//! metadata: purpose, when to use, when not to use, examples and output
//! format. The fields are flattened into the single description string the
//! function-calling API accepts.

use crate::ToolDef;

/// A structured capability specification.
///
/// `when_not_to_use` is the field that keeps the model from confusing
/// similar capabilities (accounts vs. balance sheet, for instance).
#[derive(Debug, Clone)]
pub struct CapabilitySpec {
    /// Capability name (must be unique within a registry).
    pub name: String,
    /// One-sentence imperative purpose: "List the user's transactions".
    pub purpose: String,
    pub when_to_use: String,
    pub when_not_to_use: String,
    /// JSON Schema for the arguments.
    pub parameters: serde_json::Value,
    pub examples: Vec<ExampleCall>,
    /// Description of the output format. Empty omits the line.
    pub output_format: String,
    pub confusions: Vec<Confusion>,
}

/// A request that looks like it belongs to this capability but is better
/// served by another one.
#[derive(Debug, Clone)]
pub struct Confusion {
    pub scenario: String,
    pub use_instead: String,
    pub reason: String,
}

/// A sample call and what it returns, in words.
#[derive(Debug, Clone)]
pub struct ExampleCall {
    pub call: String,
    pub returns: String,
}

impl CapabilitySpec {
    /// Start a spec. Name and purpose are the only required fields.
    pub fn builder(name: impl Into<String>, purpose: impl Into<String>) -> CapabilitySpecBuilder {
        CapabilitySpecBuilder {
            spec: CapabilitySpec {
                name: name.into(),
                purpose: purpose.into(),
                when_to_use: String::new(),
                when_not_to_use: String::new(),
                parameters: empty_object_schema(),
                examples: Vec::new(),
                output_format: String::new(),
                confusions: Vec::new(),
            },
        }
    }

    /// Flatten this spec into the description string the model reads.
    ///
    /// One line per guidance field, in a fixed order; empty fields are left
    /// out so a bare spec describes itself with its purpose alone.
    pub fn to_description(&self) -> String {
        let mut lines = vec![format!("{}.", self.purpose.trim_end_matches('.'))];
        push_labeled(&mut lines, "Use", &self.when_to_use);
        push_labeled(&mut lines, "Avoid", &self.when_not_to_use);

        if !self.examples.is_empty() {
            lines.push("Example calls:".to_string());
            lines.extend(
                self.examples
                    .iter()
                    .map(|ex| format!("  - {} returns {}", ex.call, ex.returns)),
            );
        }

        push_labeled(&mut lines, "Result", &self.output_format);

        for confusion in &self.confusions {
            lines.push(format!(
                "Not for: {}. Call {} instead, because {}.",
                confusion.scenario,
                confusion.use_instead,
                confusion.reason.trim_end_matches('.')
            ));
        }

        lines.join("\n")
    }

    /// Convert to the function-calling wire shape.
    pub fn to_tool_def(&self) -> ToolDef {
        ToolDef::new(
            self.name.clone(),
            self.to_description(),
            self.parameters.clone(),
        )
    }
}

fn push_labeled(lines: &mut Vec<String>, label: &str, text: &str) {
    if !text.is_empty() {
        lines.push(format!("{label}: {text}"));
    }
}

fn empty_object_schema() -> serde_json::Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

/// Builder for [`CapabilitySpec`].
#[derive(Debug, Clone)]
pub struct CapabilitySpecBuilder {
    spec: CapabilitySpec,
}

impl CapabilitySpecBuilder {
    pub fn when_to_use(mut self, when: impl Into<String>) -> Self {
        self.spec.when_to_use = when.into();
        self
    }

    pub fn when_not_to_use(mut self, when_not: impl Into<String>) -> Self {
        self.spec.when_not_to_use = when_not.into();
        self
    }

    pub fn parameters(mut self, params: serde_json::Value) -> Self {
        self.spec.parameters = params;
        self
    }

    /// Derive the argument schema from a type implementing `schemars::JsonSchema`.
    pub fn parameters_for<T: schemars::JsonSchema>(self) -> Self {
        self.parameters(crate::json_schema_for::<T>())
    }

    pub fn example(mut self, call: impl Into<String>, returns: impl Into<String>) -> Self {
        self.spec.examples.push(ExampleCall {
            call: call.into(),
            returns: returns.into(),
        });
        self
    }

    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.spec.output_format = format.into();
        self
    }

    /// Point the model at `use_instead` for requests matching `scenario`.
    pub fn disambiguate(
        mut self,
        scenario: impl Into<String>,
        use_instead: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.spec.confusions.push(Confusion {
            scenario: scenario.into(),
            use_instead: use_instead.into(),
            reason: reason.into(),
        });
        self
    }

    pub fn build(self) -> CapabilitySpec {
        self.spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_includes_guidance_sections() {
        let spec = CapabilitySpec::builder("get_accounts", "List the user's accounts")
            .when_to_use("When the user asks about a specific account")
            .when_not_to_use("For net worth totals, use get_balance_sheet")
            .example("get_accounts()", "Every account with its balance")
            .output_format("JSON array of accounts")
            .disambiguate("User asks for net worth", "get_balance_sheet", "it aggregates by classification")
            .build();

        let desc = spec.to_description();
        let expected = [
            "List the user's accounts.",
            "Use: When the user asks about a specific account",
            "Avoid: For net worth totals, use get_balance_sheet",
            "Example calls:",
            "  - get_accounts() returns Every account with its balance",
            "Result: JSON array of accounts",
            "Not for: User asks for net worth. Call get_balance_sheet instead, because it \
             aggregates by classification.",
        ];
        assert_eq!(desc, expected.join("\n"));
    }

    #[test]
    fn optional_sections_are_omitted() {
        let desc = CapabilitySpec::builder("noop", "Do nothing.").build().to_description();
        assert_eq!(desc, "Do nothing.");
    }

    #[test]
    fn to_tool_def_carries_name_and_schema() {
        let def = CapabilitySpec::builder("noop", "Do nothing").build().to_tool_def();
        assert_eq!(def.function.name, "noop");
        assert_eq!(def.function.parameters["type"], "object");
    }
}
