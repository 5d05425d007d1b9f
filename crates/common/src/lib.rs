//! Shared types for the level border workspace.

mod mode;
mod types;

pub use mode::{BorderMode, ParseModeError};
pub use types::{BlockPos, PlayerId};
