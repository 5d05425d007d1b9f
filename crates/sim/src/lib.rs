//! Simulated game server implementing [`BorderAdapter`](levelborder_engine::BorderAdapter).
//!
//! # Invariants
//! - Time only moves through [`SimServer::advance`]; runs are fully deterministic.
//! - Players iterate in `PlayerId` order (BTreeMap).
//! - Border messages land in a per-player outbox instead of a socket.

mod border;
mod server;

pub use border::SimBorder;
pub use server::{BorderPacket, MAX_HEALTH, SimPlayer, SimServer, run_tick};

pub fn crate_info() -> &'static str {
    "levelborder-sim v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("sim"));
    }
}
