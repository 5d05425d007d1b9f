use std::collections::HashMap;

use levelborder_common::{BlockPos, BorderMode, PlayerId};

use crate::adapter::BorderAdapter;
use crate::config::{BorderConfig, ConfigError};
use crate::event::{BorderEvent, GameEvent};

/// Engine-side record for one tracked player.
#[derive(Debug)]
pub struct BorderState<B> {
    border: B,
    size: f64,
}

impl<B> BorderState<B> {
    /// The adapter's native border object.
    pub fn border(&self) -> &B {
        &self.border
    }

    /// Size most recently pushed to the adapter.
    pub fn size(&self) -> f64 {
        self.size
    }
}

/// Per-player world borders sized by experience level.
///
/// Owns the adapter and the player-to-border map. All entry points are
/// synchronous and expect to be called from one game loop; wrap the engine
/// in a [`SharedBorderEngine`](crate::SharedBorderEngine) for multi-threaded access.
///
/// Calls for players without a border are silent no-ops: a player may be
/// connected before their first spawn, and the game loop does not need to
/// know the difference.
pub struct BorderEngine<A: BorderAdapter> {
    adapter: A,
    config: BorderConfig,
    mode: BorderMode,
    borders: HashMap<PlayerId, BorderState<A::Border>>,
    events: Vec<BorderEvent>,
}

impl<A: BorderAdapter> BorderEngine<A> {
    /// Create an engine over `adapter`, starting in `config.mode`.
    ///
    /// Rejects configs that could produce a non-positive border size.
    pub fn new(adapter: A, config: BorderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(adapter, config))
    }

    /// Create an engine with default sizing rules and the given mode.
    pub fn with_mode(adapter: A, mode: BorderMode) -> Self {
        Self::from_parts(adapter, BorderConfig::with_mode(mode))
    }

    fn from_parts(adapter: A, config: BorderConfig) -> Self {
        Self {
            adapter,
            mode: config.mode,
            config,
            borders: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Read-only access to the platform adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable access to the platform adapter, e.g. to connect players.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn config(&self) -> &BorderConfig {
        &self.config
    }

    /// Active aggregation mode.
    pub fn mode(&self) -> BorderMode {
        self.mode
    }

    /// Number of players with a border.
    pub fn tracked_count(&self) -> usize {
        self.borders.len()
    }

    /// Whether `player` currently has a border.
    pub fn is_tracked(&self, player: &A::Player) -> bool {
        self.borders.contains_key(&self.adapter.player_id(player))
    }

    /// Engine-side record for `player`, if tracked.
    pub fn state(&self, player: &A::Player) -> Option<&BorderState<A::Border>> {
        self.borders.get(&self.adapter.player_id(player))
    }

    /// Last size pushed for `player`, if tracked.
    pub fn size_of(&self, player: &A::Player) -> Option<f64> {
        self.state(player).map(BorderState::size)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[BorderEvent] {
        &self.events
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<BorderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Target border size for `player` under the current mode.
    ///
    /// In shared mode this reads the player's own level; equalizing levels
    /// across the population is the job of [`on_change_level`](Self::on_change_level).
    pub fn calculate_size(&self, player: &A::Player) -> f64 {
        let experience = match self.mode {
            BorderMode::Own | BorderMode::Shared => {
                i64::from(self.adapter.experience_level(player))
            }
            BorderMode::Sum => self
                .adapter
                .connected_players()
                .iter()
                .map(|p| i64::from(self.adapter.experience_level(p)))
                .sum(),
        };
        self.config.size_for(experience)
    }

    /// Create and show a border for a newly spawned player, then refresh everyone else.
    pub fn init_border(&mut self, player: &A::Player) {
        let id = self.adapter.player_id(player);
        let center = self.adapter.shared_spawn().border_center();

        let mut border = self.adapter.create_border(player);
        self.adapter.set_center(&mut border, center.x, center.y);
        let size = self.calculate_size(player);
        self.adapter.initialize_size(player, &mut border, size);

        if self.borders.insert(id, BorderState { border, size }).is_some() {
            tracing::debug!(%id, "replaced existing border");
        }
        tracing::info!(%id, size, "border created");
        self.events.push(BorderEvent::Created {
            player: id,
            center,
            size,
        });

        for other in self.adapter.connected_players() {
            if self.adapter.player_id(&other) != id {
                self.update_world_border(&other);
            }
        }
    }

    /// React to a change in `player`'s experience level.
    ///
    /// Outside shared mode only that player's border moves. In shared mode
    /// every connected player's level is overwritten with the highest level
    /// online, then every border is resized to match.
    pub fn on_change_level(&mut self, player: &A::Player) {
        if self.mode != BorderMode::Shared {
            self.update_world_border(player);
            return;
        }

        let players = self.adapter.connected_players();
        let level = players
            .iter()
            .map(|p| self.adapter.experience_level(p))
            .max()
            .unwrap_or(0);
        tracing::debug!(level, players = players.len(), "equalizing shared level");

        let mut ids = Vec::with_capacity(players.len());
        for p in &players {
            self.adapter.set_experience_level(p, level);
            ids.push(self.adapter.player_id(p));
            self.update_world_border(p);
        }
        if !ids.is_empty() {
            self.events
                .push(BorderEvent::ExperienceEqualized { level, players: ids });
        }
    }

    /// Recompute the player's size and start a transition toward it.
    pub fn update_world_border(&mut self, player: &A::Player) {
        let id = self.adapter.player_id(player);
        let size = self.calculate_size(player);
        let duration = self.config.transition();
        let Some(state) = self.borders.get_mut(&id) else {
            tracing::trace!(%id, "update skipped, player untracked");
            return;
        };

        self.adapter
            .interpolate_size(player, &mut state.border, size, duration);
        state.size = size;
        tracing::debug!(%id, size, "border resized");
        self.events.push(BorderEvent::Resized {
            player: id,
            size,
            duration_millis: self.config.transition_millis,
        });
    }

    /// Hurt the player if they stand beyond the grace margin outside their border.
    pub fn check_outside_border(&mut self, player: &A::Player) {
        let id = self.adapter.player_id(player);
        let Some(state) = self.borders.get(&id) else {
            return;
        };

        let distance = self.adapter.distance_to_border(player, &state.border);
        tracing::trace!(%id, distance, "border check");
        if distance + self.config.damage_grace < 0.0 {
            let amount = self.config.damage_amount;
            self.adapter.apply_damage(player, amount);
            tracing::debug!(%id, distance, amount, "player outside border");
            self.events.push(BorderEvent::Damaged {
                player: id,
                distance,
                amount,
            });
        }
    }

    /// Stop tracking the player and refresh everyone still connected.
    pub fn on_leave(&mut self, player: &A::Player) {
        let id = self.adapter.player_id(player);
        if self.borders.remove(&id).is_some() {
            tracing::info!(%id, "border removed");
            self.events.push(BorderEvent::Removed { player: id });
        }
        self.update_all();
    }

    /// Switch aggregation mode and push new sizes to every connected player.
    pub fn set_mode(&mut self, mode: BorderMode) {
        let old = std::mem::replace(&mut self.mode, mode);
        tracing::info!(%old, new = %mode, "border mode changed");
        self.events.push(BorderEvent::ModeChanged { old, new: mode });
        self.update_all();
    }

    /// Where players respawn. Does not touch any border.
    pub fn respawn_pos(&self) -> BlockPos {
        self.adapter.shared_spawn()
    }

    /// Route a game loop event to the matching entry point.
    pub fn dispatch(&mut self, event: GameEvent<A::Player>) {
        match event {
            GameEvent::Join(p) => self.init_border(&p),
            GameEvent::LevelChange(p) => self.on_change_level(&p),
            GameEvent::Tick(p) => self.check_outside_border(&p),
            GameEvent::Leave(p) => self.on_leave(&p),
            GameEvent::SetMode(mode) => self.set_mode(mode),
        }
    }

    fn update_all(&mut self) {
        for p in self.adapter.connected_players() {
            self.update_world_border(&p);
        }
    }
}
