use std::time::Duration;

use levelborder_common::{BlockPos, PlayerId};

/// Platform capabilities the engine calls into.
///
/// An implementation translates these into whatever the game server needs:
/// border objects, network messages, player attributes. The engine only ever
/// sees the opaque `Player` and `Border` handles.
pub trait BorderAdapter {
    /// Handle to a live player. Cloned when iterating the online population.
    type Player: Clone;
    /// Native border object, owned by the engine for as long as the player is tracked.
    type Border;

    /// Create a fresh border object for `player`.
    fn create_border(&mut self, player: &Self::Player) -> Self::Border;

    fn set_center(&mut self, border: &mut Self::Border, x: f64, z: f64);

    /// Set the size with no transition and show the border to the player.
    fn initialize_size(&mut self, player: &Self::Player, border: &mut Self::Border, size: f64);

    /// Animate from the border's current size to `size` over `duration`.
    fn interpolate_size(
        &mut self,
        player: &Self::Player,
        border: &mut Self::Border,
        size: f64,
        duration: Duration,
    );

    /// Signed distance from the player to the border; negative means outside.
    fn distance_to_border(&self, player: &Self::Player, border: &Self::Border) -> f64;

    fn apply_damage(&mut self, player: &Self::Player, amount: f32);

    /// Snapshot of every connected player. Order is irrelevant.
    fn connected_players(&self) -> Vec<Self::Player>;

    fn experience_level(&self, player: &Self::Player) -> i32;

    fn set_experience_level(&mut self, player: &Self::Player, level: i32);

    fn player_id(&self, player: &Self::Player) -> PlayerId;

    /// The world's shared spawn block.
    fn shared_spawn(&self) -> BlockPos;
}
