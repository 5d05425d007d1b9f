use glam::DVec2;
use levelborder_common::{BorderMode, PlayerId};
use serde::Serialize;

/// A record of every effect the engine pushed through its adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BorderEvent {
    /// Border created and shown at its initial size.
    Created {
        player: PlayerId,
        center: DVec2,
        size: f64,
    },
    /// Border told to move toward a new size.
    Resized {
        player: PlayerId,
        size: f64,
        duration_millis: u64,
    },
    /// Player stopped being tracked.
    Removed { player: PlayerId },
    /// Player was hurt for standing too far outside.
    Damaged {
        player: PlayerId,
        distance: f64,
        amount: f32,
    },
    ModeChanged { old: BorderMode, new: BorderMode },
    /// Shared mode raised every listed player to `level`.
    ExperienceEqualized { level: i32, players: Vec<PlayerId> },
}

/// Lifecycle events the surrounding game loop feeds into the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent<P> {
    /// Player spawned for the first time and should get a border.
    Join(P),
    /// Player's experience level changed.
    LevelChange(P),
    /// Periodic border check for a player.
    Tick(P),
    Leave(P),
    SetMode(BorderMode),
}
