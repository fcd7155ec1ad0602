//! Terminal rendering of the single-page early warning view.

mod prompt;
mod render;

pub use prompt::{run_prompt, Command, HELP};
pub use render::{progress_bar, startup_failure_message, Page, METER_WIDTH};
