//! Session state: the roster and its mutation operations.
//!
//! A [`Session`] is the root state value: a configured starting life
//! and an ordered roster of 1 to 6 [`Player`]s. All state changes go
//! through its methods, which clamp out-of-range inputs and treat a
//! lookup of an unknown player id as a silent no-op. Nothing here does
//! I/O; persistence is layered on top by the controller.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::player::Player;

/// Minimum roster size.
pub const MIN_PLAYERS: usize = 1;

/// Maximum roster size.
pub const MAX_PLAYERS: usize = 6;

/// Smallest configurable starting life.
pub const MIN_STARTING_LIFE: i64 = 1;

/// Starting life used when nothing is configured.
pub const DEFAULT_STARTING_LIFE: i64 = 40;

/// Roster size used when nothing is configured.
pub const DEFAULT_PLAYER_COUNT: usize = 4;

/// A whole game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Life total applied to newly created players and to resets.
    starting_life: i64,

    /// Players in seating order.
    players: Vec<Player>,

    /// Monotonic counter feeding the id generator. Persisted so a
    /// truncated player's id is never reissued.
    #[serde(default)]
    next_player_seq: u64,

    /// When this session was first created.
    #[serde(default = "chrono::Utc::now")]
    created_at: chrono::DateTime<chrono::Utc>,
}

impl Session {
    /// Create a session with `player_count` fresh players. Both inputs
    /// are clamped to their valid ranges.
    pub fn new(starting_life: i64, player_count: usize) -> Self {
        let mut session = Self {
            starting_life: starting_life.max(MIN_STARTING_LIFE),
            players: Vec::new(),
            next_player_seq: 0,
            created_at: chrono::Utc::now(),
        };
        session.ensure_count(player_count);
        session
    }

    /// The configured starting life.
    pub fn starting_life(&self) -> i64 {
        self.starting_life
    }

    /// When this session was first created.
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }

    /// Players in seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Look up a player by id.
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    /// Produce a fresh id that no live player holds.
    ///
    /// Loaded sessions may carry ids in a foreign shape, so taken ids
    /// are skipped rather than assumed absent.
    fn next_player_id(&mut self) -> String {
        loop {
            let id = format!("player-{}", self.next_player_seq);
            self.next_player_seq += 1;
            if self.players.iter().all(|p| p.id() != id) {
                return id;
            }
        }
    }

    /// Grow or shrink the roster to `count` players, clamped to
    /// [[`MIN_PLAYERS`], [`MAX_PLAYERS`]]. Returns the clamped count.
    ///
    /// A longer roster is truncated from the tail, permanently
    /// discarding those players. A shorter one is grown with fresh
    /// players at the default starting life. Calling twice with the
    /// same count changes nothing the second time.
    pub fn ensure_count(&mut self, count: usize) -> usize {
        let count = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self.players.truncate(count);
        while self.players.len() < count {
            let position = self.players.len();
            let id = self.next_player_id();
            self.players.push(Player::new(id, position, self.starting_life));
        }
        count
    }

    /// Set the starting life used for future resets and future player
    /// creation, clamped to at least [`MIN_STARTING_LIFE`]. Returns the
    /// clamped value.
    ///
    /// Existing players' current life totals are not touched.
    pub fn set_starting_life(&mut self, value: i64) -> i64 {
        self.starting_life = value.max(MIN_STARTING_LIFE);
        self.starting_life
    }

    /// Adjust a player's life total. Returns `false` for an unknown id.
    pub fn change_life(&mut self, id: &str, delta: i64) -> bool {
        match self.player_mut(id) {
            Some(p) => {
                p.change_life(delta);
                true
            }
            None => false,
        }
    }

    /// Adjust a player's poison counter. Returns `false` for an
    /// unknown id.
    pub fn change_poison(&mut self, id: &str, delta: i32) -> bool {
        match self.player_mut(id) {
            Some(p) => {
                p.change_poison(delta);
                true
            }
            None => false,
        }
    }

    /// Deal commander damage to `target_id` from `source_id`,
    /// subtracting the same amount of life. Returns `false` for an
    /// unknown target or a zero amount.
    pub fn apply_commander_damage(&mut self, target_id: &str, source_id: &str, amount: u32) -> bool {
        match self.player_mut(target_id) {
            Some(p) => p.apply_commander_damage(source_id, amount),
            None => false,
        }
    }

    /// Remove one commander damage from a source, restoring 1 life.
    /// Returns `false` for an unknown target or an absent entry.
    pub fn decrement_commander_damage(&mut self, target_id: &str, source_id: &str) -> bool {
        match self.player_mut(target_id) {
            Some(p) => p.decrement_commander_damage(source_id),
            None => false,
        }
    }

    /// Remove all commander damage from a source, restoring that much
    /// life. Returns `false` for an unknown target or an absent entry.
    pub fn clear_commander_damage(&mut self, target_id: &str, source_id: &str) -> bool {
        match self.player_mut(target_id) {
            Some(p) => p.clear_commander_damage(source_id),
            None => false,
        }
    }

    /// Set commander damage from a source to an exact value, moving
    /// life by the difference. Returns `false` for an unknown target.
    pub fn set_commander_damage(&mut self, target_id: &str, source_id: &str, new_value: u32) -> bool {
        match self.player_mut(target_id) {
            Some(p) => {
                p.set_commander_damage(source_id, new_value);
                true
            }
            None => false,
        }
    }

    /// Rename a player. Returns `false` for an unknown id.
    pub fn set_name(&mut self, id: &str, name: &str) -> bool {
        match self.player_mut(id) {
            Some(p) => {
                p.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Change a player's accent color. Returns `false` for an unknown
    /// id.
    pub fn set_color(&mut self, id: &str, color: &str) -> bool {
        match self.player_mut(id) {
            Some(p) => {
                p.color = color.to_string();
                true
            }
            None => false,
        }
    }

    /// Reset a player's counters to defaults, keeping id, name, and
    /// color. Returns `false` for an unknown id.
    pub fn reset_player(&mut self, id: &str) -> bool {
        let starting_life = self.starting_life;
        match self.player_mut(id) {
            Some(p) => {
                p.reset(starting_life);
                true
            }
            None => false,
        }
    }

    /// Reset every player's counters to defaults.
    pub fn reset_all(&mut self) {
        let starting_life = self.starting_life;
        for p in &mut self.players {
            p.reset(starting_life);
        }
    }

    /// Check the session invariants. A loaded session failing this is
    /// discarded as if it were unparsable.
    pub fn is_valid(&self) -> bool {
        if self.starting_life < MIN_STARTING_LIFE {
            return false;
        }
        if self.players.len() < MIN_PLAYERS || self.players.len() > MAX_PLAYERS {
            return false;
        }
        let mut ids = HashSet::new();
        for p in &self.players {
            if !p.is_valid() {
                return false;
            }
            if !ids.insert(p.id()) {
                return false;
            }
        }
        true
    }

    /// Convert the whole session to a JSON snapshot for display.
    pub fn to_json(&self) -> serde_json::Value {
        let players: Vec<serde_json::Value> = self.players.iter().map(Player::to_json).collect();
        serde_json::json!({
            "startingLife": self.starting_life,
            "players": players,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_LIFE, DEFAULT_PLAYER_COUNT)
    }
}
