use std::collections::BTreeMap;
use std::time::Duration;

use glam::{DVec2, DVec3};
use levelborder_common::{BlockPos, PlayerId};
use levelborder_engine::{BorderAdapter, BorderEngine};
use serde::Serialize;

use crate::border::SimBorder;

pub const MAX_HEALTH: f32 = 20.0;

/// Border message a real server would send over the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BorderPacket {
    /// Full border state, sent once when the border is created.
    Initialize { center: DVec2, size: f64 },
    /// Start of a size transition.
    LerpSize {
        from: f64,
        to: f64,
        duration_millis: u64,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct SimPlayer {
    pub id: PlayerId,
    pub name: String,
    pub position: DVec3,
    pub level: i32,
    pub health: f32,
    outbox: Vec<BorderPacket>,
}

impl SimPlayer {
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn packets(&self) -> &[BorderPacket] {
        &self.outbox
    }
}

/// Single-world server with a millisecond clock.
#[derive(Debug, Default)]
pub struct SimServer {
    players: BTreeMap<PlayerId, SimPlayer>,
    spawn: BlockPos,
    now_millis: u64,
}

impl SimServer {
    pub fn new(spawn: BlockPos) -> Self {
        Self {
            spawn,
            ..Self::default()
        }
    }

    pub fn now_millis(&self) -> u64 {
        self.now_millis
    }

    pub fn advance(&mut self, millis: u64) {
        self.now_millis += millis;
    }

    /// Connect a player standing on the spawn block. Returns their id.
    pub fn connect(&mut self, name: impl Into<String>, level: i32) -> PlayerId {
        let id = PlayerId::new();
        let c = self.spawn.border_center();
        let player = SimPlayer {
            id,
            name: name.into(),
            position: DVec3::new(c.x, f64::from(self.spawn.y), c.y),
            level,
            health: MAX_HEALTH,
            outbox: Vec::new(),
        };
        tracing::debug!(%id, name = %player.name, level, "player connected");
        self.players.insert(id, player);
        id
    }

    pub fn disconnect(&mut self, id: PlayerId) -> Option<SimPlayer> {
        self.players.remove(&id)
    }

    pub fn player(&self, id: PlayerId) -> Option<&SimPlayer> {
        self.players.get(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &SimPlayer> {
        self.players.values()
    }

    pub fn set_level(&mut self, id: PlayerId, level: i32) -> bool {
        match self.players.get_mut(&id) {
            Some(p) => {
                p.level = level;
                true
            }
            None => false,
        }
    }

    pub fn move_by(&mut self, id: PlayerId, delta: DVec3) -> bool {
        match self.players.get_mut(&id) {
            Some(p) => {
                p.position += delta;
                true
            }
            None => false,
        }
    }

    /// Put a player back on `pos` with full health.
    pub fn respawn(&mut self, id: PlayerId, pos: BlockPos) {
        if let Some(p) = self.players.get_mut(&id) {
            let c = pos.border_center();
            p.position = DVec3::new(c.x, f64::from(pos.y), c.y);
            p.health = MAX_HEALTH;
            tracing::info!(%id, ?pos, "player respawned");
        }
    }

    pub fn take_packets(&mut self, id: PlayerId) -> Vec<BorderPacket> {
        self.players
            .get_mut(&id)
            .map(|p| std::mem::take(&mut p.outbox))
            .unwrap_or_default()
    }

    fn send(&mut self, id: PlayerId, packet: BorderPacket) {
        if let Some(p) = self.players.get_mut(&id) {
            tracing::trace!(%id, ?packet, "send");
            p.outbox.push(packet);
        }
    }
}

impl BorderAdapter for SimServer {
    type Player = PlayerId;
    type Border = SimBorder;

    fn create_border(&mut self, _player: &PlayerId) -> SimBorder {
        SimBorder::default()
    }

    fn set_center(&mut self, border: &mut SimBorder, x: f64, z: f64) {
        border.set_center(DVec2::new(x, z));
    }

    fn initialize_size(&mut self, player: &PlayerId, border: &mut SimBorder, size: f64) {
        border.set_size(size);
        self.send(
            *player,
            BorderPacket::Initialize {
                center: border.center(),
                size,
            },
        );
    }

    fn interpolate_size(
        &mut self,
        player: &PlayerId,
        border: &mut SimBorder,
        size: f64,
        duration: Duration,
    ) {
        let from = border.size_at(self.now_millis);
        let duration_millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        border.lerp_between(from, size, self.now_millis, duration_millis);
        self.send(
            *player,
            BorderPacket::LerpSize {
                from,
                to: size,
                duration_millis,
            },
        );
    }

    fn distance_to_border(&self, player: &PlayerId, border: &SimBorder) -> f64 {
        match self.players.get(player) {
            Some(p) => {
                let pos = DVec2::new(p.position.x, p.position.z);
                border.distance_to(pos, self.now_millis)
            }
            None => f64::INFINITY,
        }
    }

    fn apply_damage(&mut self, player: &PlayerId, amount: f32) {
        if let Some(p) = self.players.get_mut(player) {
            p.health = (p.health - amount).max(0.0);
        }
    }

    fn connected_players(&self) -> Vec<PlayerId> {
        self.players.keys().copied().collect()
    }

    fn experience_level(&self, player: &PlayerId) -> i32 {
        self.players.get(player).map_or(0, |p| p.level)
    }

    fn set_experience_level(&mut self, player: &PlayerId, level: i32) {
        self.set_level(*player, level);
    }

    fn player_id(&self, player: &PlayerId) -> PlayerId {
        *player
    }

    fn shared_spawn(&self) -> BlockPos {
        self.spawn
    }
}

/// One game loop tick: advance the clock, check every border, respawn the dead.
///
/// Returns the players that were respawned.
pub fn run_tick(engine: &mut BorderEngine<SimServer>, millis: u64) -> Vec<PlayerId> {
    engine.adapter_mut().advance(millis);
    let mut respawned = Vec::new();
    for id in engine.adapter().connected_players() {
        engine.check_outside_border(&id);
        if engine.adapter().player(id).is_some_and(SimPlayer::is_dead) {
            let pos = engine.respawn_pos();
            engine.adapter_mut().respawn(id, pos);
            respawned.push(id);
        }
    }
    respawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelborder_common::BorderMode;

    #[test]
    fn connect_places_player_on_spawn() {
        let mut s = SimServer::new(BlockPos::new(4, 70, -2));
        let id = s.connect("alex", 3);
        let p = s.player(id).unwrap();
        assert_eq!(p.position, DVec3::new(4.5, 70.0, -1.5));
        assert_eq!(p.health, MAX_HEALTH);
    }

    #[test]
    fn init_sends_initialize_packet() {
        let server = SimServer::new(BlockPos::new(0, 64, 0));
        let mut engine = BorderEngine::with_mode(server, BorderMode::Own);
        let id = engine.adapter_mut().connect("alex", 5);
        engine.init_border(&id);

        assert_eq!(
            engine.adapter_mut().take_packets(id),
            vec![BorderPacket::Initialize {
                center: DVec2::new(0.5, 0.5),
                size: 10.0
            }]
        );
    }

    #[test]
    fn interpolation_starts_from_current_size() {
        let mut engine = BorderEngine::with_mode(SimServer::default(), BorderMode::Own);
        let id = engine.adapter_mut().connect("alex", 5);
        engine.init_border(&id);
        engine.adapter_mut().set_level(id, 10);
        engine.on_change_level(&id);
        engine.adapter_mut().advance(1000);
        engine.adapter_mut().set_level(id, 0);
        engine.on_change_level(&id);

        let packets = engine.adapter_mut().take_packets(id);
        assert_eq!(
            packets[1..],
            [
                BorderPacket::LerpSize {
                    from: 10.0,
                    to: 20.0,
                    duration_millis: 2000
                },
                BorderPacket::LerpSize {
                    from: 15.0,
                    to: 1.0,
                    duration_millis: 2000
                },
            ]
        );
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut s = SimServer::default();
        let id = s.connect("alex", 0);
        s.apply_damage(&id, 50.0);
        assert!(s.player(id).unwrap().is_dead());
        assert_eq!(s.player(id).unwrap().health, 0.0);
    }

    #[test]
    fn distance_for_unknown_player_is_safe() {
        let s = SimServer::default();
        let d = s.distance_to_border(&PlayerId::new(), &SimBorder::default());
        assert_eq!(d, f64::INFINITY);
    }
}
