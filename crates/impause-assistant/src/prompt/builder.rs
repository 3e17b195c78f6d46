//! Markdown section builder for instruction prose.
//!
//! [`SystemPromptBuilder`] assembles headed sections and bullet lists into
//! a single markdown document. The instruction template is
//! written with it so that prose stays structured instead of living in one
//! large string literal.

/// Builder for multi-section markdown prompts.
///
/// Blocks are joined with blank lines. Empty sections are skipped.
///
/// # Example
///
/// ```
/// use impause_assistant::prompt::SystemPromptBuilder;
///
/// let prompt = SystemPromptBuilder::new()
///     .section("Your identity", "You are a coach.")
///     .section_at(3, "Rules", "Be kind.")
///     .bullets_at(3, "Tone", ["Warm", "Curious"])
///     .section("Missing", "")
///     .build();
///
/// assert!(prompt.starts_with("## Your identity\n\nYou are a coach."));
/// assert!(prompt.contains("### Rules\n\nBe kind."));
/// assert!(prompt.contains("- Warm\n- Curious"));
/// assert!(!prompt.contains("Missing"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SystemPromptBuilder {
    blocks: Vec<String>,
}

/// Heading level used by [`SystemPromptBuilder::section`].
const TOP_LEVEL: u8 = 2;

impl SystemPromptBuilder {
    /// Create an empty builder. Sections default to `##` headings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named `##` section.
    ///
    /// Skipped if `content` is empty.
    pub fn section(self, heading: &str, content: impl Into<String>) -> Self {
        self.section_at(TOP_LEVEL, heading, content)
    }

    /// Append a named section at a specific heading level.
    ///
    /// Skipped if `content` is empty.
    pub fn section_at(mut self, level: u8, heading: &str, content: impl Into<String>) -> Self {
        let content = content.into();
        if !content.is_empty() {
            let prefix = "#".repeat(level as usize);
            self.blocks.push(format!("{prefix} {heading}\n\n{content}"));
        }
        self
    }

    /// Append a section whose body is a `- ` bullet list.
    ///
    /// Skipped if `items` is empty.
    pub fn bullets_at<I, S>(self, level: u8, heading: &str, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.section_at(level, heading, bullet_list(items))
    }

    /// Join all blocks with blank lines.
    pub fn build(self) -> String {
        self.blocks.join("\n\n")
    }
}

/// Render items as a markdown bullet list, one `- item` per line.
pub fn bullet_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("- {}", item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_produces_empty_string() {
        assert_eq!(SystemPromptBuilder::new().build(), "");
    }

    #[test]
    fn sections_default_to_level_two() {
        let prompt = SystemPromptBuilder::new()
            .section("Context", "Some context")
            .build();
        assert_eq!(prompt, "## Context\n\nSome context");
    }

    #[test]
    fn section_at_overrides_level_once() {
        let prompt = SystemPromptBuilder::new()
            .section("Normal", "a")
            .section_at(4, "Deep", "b")
            .section("Again", "c")
            .build();
        assert!(prompt.contains("## Normal"));
        assert!(prompt.contains("#### Deep"));
        assert!(prompt.contains("## Again"));
    }

    #[test]
    fn empty_section_and_bullets_skipped() {
        let prompt = SystemPromptBuilder::new()
            .section("Empty", "")
            .bullets_at(3, "No items", Vec::<&str>::new())
            .section("Present", "content")
            .build();
        assert_eq!(prompt, "## Present\n\ncontent");
    }

    #[test]
    fn bullet_list_formats_each_line() {
        assert_eq!(bullet_list(["one", "two"]), "- one\n- two");
    }
}
