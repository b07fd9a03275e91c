pub mod assembler;
pub mod prompt;

pub use assembler::{assemble, changelog_footer, simple_notes, EMPTY_NOTES};
pub use prompt::format_prompt;
