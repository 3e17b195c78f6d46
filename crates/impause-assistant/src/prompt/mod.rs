//! Instruction text: section builder, slot templates, and the coach template.
//!
//! 1. **[`SystemPromptBuilder`]** assembles markdown sections. The static
//!    instruction prose is written with it.
//! 2. **[`Template`]** parses `{{slot}}` markers against the closed [`Slot`]
//!    set and substitutes values in a single literal pass.
//! 3. **[`InstructionRenderer`]** fills the coach template from an
//!    [`InstructionParams`] record built out of locale settings and the date.

pub mod builder;
pub mod instructions;
pub mod template;

pub use builder::SystemPromptBuilder;
pub use instructions::{InstructionParams, InstructionRenderer, instructions_template};
pub use template::{Slot, SlotValues, Template, has_slot_marker};
