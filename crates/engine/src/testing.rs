//! Call-recording adapter for engine tests.

use std::collections::BTreeMap;
use std::time::Duration;

use levelborder_common::{BlockPos, PlayerId};
use uuid::Uuid;

use crate::adapter::BorderAdapter;

/// Effectful adapter calls, in the order the engine made them.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(u32),
    SetCenter(u32, f64, f64),
    Initialize(u32, f64),
    Interpolate(u32, f64, Duration),
    Distance(u32),
    Damage(u32, f32),
    SetLevel(u32, i32),
}

#[derive(Debug)]
pub struct FakeBorder {
    pub owner: u32,
}

/// Players are plain numbers; `online` is the connected population.
#[derive(Debug, Default)]
pub struct RecordingAdapter {
    pub spawn: BlockPos,
    pub online: Vec<u32>,
    pub levels: BTreeMap<u32, i32>,
    pub distance: f64,
    ids: BTreeMap<u32, PlayerId>,
    calls: std::cell::RefCell<Vec<Call>>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self {
            distance: 10.0,
            ..Self::default()
        }
    }

    pub fn connect(&mut self, player: u32, level: i32) {
        self.online.push(player);
        self.levels.insert(player, level);
        self.ids.entry(player).or_insert_with(PlayerId::new);
    }

    pub fn disconnect(&mut self, player: u32) {
        self.online.retain(|p| *p != player);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn interpolations_for(&self, player: u32) -> Vec<f64> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Interpolate(p, size, _) if *p == player => Some(*size),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

/// Stable id for a player that was never connected.
pub fn unknown_id(player: u32) -> PlayerId {
    PlayerId(Uuid::from_u128(u128::from(player)))
}

impl BorderAdapter for RecordingAdapter {
    type Player = u32;
    type Border = FakeBorder;

    fn create_border(&mut self, player: &u32) -> FakeBorder {
        self.record(Call::Create(*player));
        FakeBorder { owner: *player }
    }

    fn set_center(&mut self, border: &mut FakeBorder, x: f64, z: f64) {
        self.record(Call::SetCenter(border.owner, x, z));
    }

    fn initialize_size(&mut self, player: &u32, _border: &mut FakeBorder, size: f64) {
        self.record(Call::Initialize(*player, size));
    }

    fn interpolate_size(
        &mut self,
        player: &u32,
        _border: &mut FakeBorder,
        size: f64,
        duration: Duration,
    ) {
        self.record(Call::Interpolate(*player, size, duration));
    }

    fn distance_to_border(&self, player: &u32, _border: &FakeBorder) -> f64 {
        self.record(Call::Distance(*player));
        self.distance
    }

    fn apply_damage(&mut self, player: &u32, amount: f32) {
        self.record(Call::Damage(*player, amount));
    }

    fn connected_players(&self) -> Vec<u32> {
        self.online.clone()
    }

    fn experience_level(&self, player: &u32) -> i32 {
        self.levels.get(player).copied().unwrap_or(0)
    }

    fn set_experience_level(&mut self, player: &u32, level: i32) {
        self.levels.insert(*player, level);
        self.record(Call::SetLevel(*player, level));
    }

    fn player_id(&self, player: &u32) -> PlayerId {
        self.ids
            .get(player)
            .copied()
            .unwrap_or_else(|| unknown_id(*player))
    }

    fn shared_spawn(&self) -> BlockPos {
        self.spawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_players_have_stable_ids() {
        let adapter = RecordingAdapter::new();
        assert_eq!(adapter.player_id(&9), adapter.player_id(&9));
        assert_eq!(adapter.player_id(&9), unknown_id(9));
        assert_ne!(adapter.player_id(&9), adapter.player_id(&10));
    }
}
