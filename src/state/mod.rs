//! State management module for the commander life counter.
//!
//! This module provides the core state types:
//!
//! - `player` - Per-player record (life, poison, commander damage)
//! - `session` - The roster and all mutation operations
//! - `store` - JSON file persistence for the whole session
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Tracker                             │
//! │                                                             │
//! │   ┌────────────────────────┐      ┌────────────────────┐    │
//! │   │        Session         │      │    SessionStore    │    │
//! │   │                        │      │                    │    │
//! │   │  starting_life         │ save │  one JSON blob,    │    │
//! │   │  players: Vec<Player>  │─────▶│  fixed storage key │    │
//! │   │                        │      │                    │    │
//! │   │  life / poison /       │ load │  corrupt or absent │    │
//! │   │  commander damage ops  │◀─────│  reads as None     │    │
//! │   └────────────────────────┘      └────────────────────┘    │
//! │                                                             │
//! │   every applied mutation is followed by a save; a           │
//! │   presentation layer re-reads state to redraw, nothing      │
//! │   is pushed                                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use commander_life_state::state::{SessionStore, Tracker};
//!
//! let store = SessionStore::in_dir("/var/lib/life-counter");
//! let mut tracker = Tracker::new(store);
//!
//! let id = tracker.session().players()[0].id().to_string();
//! tracker.change_life(&id, -5);
//! ```

pub mod player;
pub mod session;
pub mod store;

// Re-export commonly used types
pub use player::{
    default_color, PaletteColor, Player, COMMANDER_DAMAGE_LETHAL, DEFAULT_COLORS, LIFE_FLOOR,
};
pub use session::{
    Session, DEFAULT_PLAYER_COUNT, DEFAULT_STARTING_LIFE, MAX_PLAYERS, MIN_PLAYERS,
    MIN_STARTING_LIFE,
};
pub use store::{SessionStore, StoreError, STORAGE_KEY};

/// Controller owning the session and its store.
///
/// Construction loads the saved session, falling back to a fresh
/// default one when nothing usable is on disk. Every mutating call is
/// forwarded to the session and, when it applied, persisted
/// immediately. Persistence is best-effort: a failed save is logged
/// and never interrupts the mutation.
///
/// Mutations that target a player hand back the touched player so a
/// presentation layer can redraw just that card; `None` means the
/// operation did not apply and nothing changed.
#[derive(Debug)]
pub struct Tracker {
    session: Session,
    store: SessionStore,
}

impl Tracker {
    /// Open a tracker with the stock defaults (40 starting life,
    /// 4 players) when no saved session exists.
    pub fn new(store: SessionStore) -> Self {
        Self::with_defaults(store, DEFAULT_STARTING_LIFE, DEFAULT_PLAYER_COUNT)
    }

    /// Open a tracker, building a fresh session from the given
    /// defaults when no saved session exists. A fresh session is
    /// persisted right away.
    pub fn with_defaults(store: SessionStore, starting_life: i64, player_count: usize) -> Self {
        let (session, fresh) = match store.load() {
            Some(session) => (session, false),
            None => {
                log::info!("no saved session found, starting a fresh one");
                (Session::new(starting_life, player_count), true)
            }
        };
        let tracker = Self { session, store };
        if fresh {
            tracker.persist();
        }
        tracker
    }

    /// The current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Look up a player by id.
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.session.player(id)
    }

    /// Grow or shrink the roster, clamped to the valid range, then
    /// persist. Returns the clamped count.
    pub fn ensure_count(&mut self, count: usize) -> usize {
        let count = self.session.ensure_count(count);
        self.persist();
        count
    }

    /// Set the starting life for future resets and players, clamped,
    /// then persist. Returns the clamped value.
    pub fn set_starting_life(&mut self, value: i64) -> i64 {
        let value = self.session.set_starting_life(value);
        self.persist();
        value
    }

    /// Adjust a player's life total.
    pub fn change_life(&mut self, id: &str, delta: i64) -> Option<&Player> {
        self.apply(id, |s| s.change_life(id, delta))
    }

    /// Adjust a player's poison counter.
    pub fn change_poison(&mut self, id: &str, delta: i32) -> Option<&Player> {
        self.apply(id, |s| s.change_poison(id, delta))
    }

    /// Deal commander damage, debiting the same amount of life.
    pub fn apply_commander_damage(
        &mut self,
        target_id: &str,
        source_id: &str,
        amount: u32,
    ) -> Option<&Player> {
        self.apply(target_id, |s| {
            s.apply_commander_damage(target_id, source_id, amount)
        })
    }

    /// Remove one commander damage from a source, restoring 1 life.
    pub fn decrement_commander_damage(
        &mut self,
        target_id: &str,
        source_id: &str,
    ) -> Option<&Player> {
        self.apply(target_id, |s| {
            s.decrement_commander_damage(target_id, source_id)
        })
    }

    /// Remove all commander damage from a source, restoring that much
    /// life.
    pub fn clear_commander_damage(
        &mut self,
        target_id: &str,
        source_id: &str,
    ) -> Option<&Player> {
        self.apply(target_id, |s| s.clear_commander_damage(target_id, source_id))
    }

    /// Set commander damage from a source to an exact value, moving
    /// life by the difference.
    pub fn set_commander_damage(
        &mut self,
        target_id: &str,
        source_id: &str,
        new_value: u32,
    ) -> Option<&Player> {
        self.apply(target_id, |s| {
            s.set_commander_damage(target_id, source_id, new_value)
        })
    }

    /// Rename a player.
    pub fn set_name(&mut self, id: &str, name: &str) -> Option<&Player> {
        self.apply(id, |s| s.set_name(id, name))
    }

    /// Change a player's accent color.
    pub fn set_color(&mut self, id: &str, color: &str) -> Option<&Player> {
        self.apply(id, |s| s.set_color(id, color))
    }

    /// Reset a player's counters, keeping id, name, and color.
    pub fn reset_player(&mut self, id: &str) -> Option<&Player> {
        self.apply(id, |s| s.reset_player(id))
    }

    /// Reset every player's counters, then persist.
    pub fn reset_all(&mut self) {
        self.session.reset_all();
        self.persist();
    }

    /// Run one mutation; persist and return the touched player only if
    /// it applied.
    fn apply(&mut self, id: &str, op: impl FnOnce(&mut Session) -> bool) -> Option<&Player> {
        if op(&mut self.session) {
            self.persist();
            self.session.player(id)
        } else {
            None
        }
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.session) {
            log::warn!("failed to persist session state: {}", err);
        }
    }
}
