//! CLI command handlers. Each command is in its own file.

mod completions;
mod man;
mod submit;

pub use completions::run_completions;
pub use man::run_man;
pub use submit::{run_submit, wants_spinner, write_outcome, Report};
