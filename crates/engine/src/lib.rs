//! Level Border Engine: per-player world borders sized by experience level.
//!
//! # Invariants
//! - A border exists for a player iff `init_border` ran and `on_leave` has not.
//! - Every size is `max(experience * blocks_per_level, min_size)`, never below `min_size`.
//! - Changing the mode pushes a fresh size to every connected player immediately.
//! - The engine never talks to the network; every effect goes through [`BorderAdapter`].

pub mod adapter;
pub mod config;
pub mod engine;
pub mod event;
pub mod shared;

#[cfg(test)]
mod testing;

pub use adapter::BorderAdapter;
pub use config::{BorderConfig, ConfigError};
pub use engine::{BorderEngine, BorderState};
pub use event::{BorderEvent, GameEvent};
pub use levelborder_common::{BlockPos, BorderMode, PlayerId};
pub use shared::SharedBorderEngine;

pub fn crate_info() -> &'static str {
    "levelborder-engine v0.1.0"
}
