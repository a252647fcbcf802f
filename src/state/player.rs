//! Player record and death predicate.
//!
//! A [`Player`] tracks one seat at the table: a life total, a poison
//! counter, and commander damage taken per opposing source. Commander
//! damage and life are co-mutated by a single operation so the two can
//! never drift apart: dealing N commander damage always subtracts N
//! life, and removing commander damage restores the same amount.
//!
//! Death is never stored. [`Player::is_dead`] recomputes it on demand
//! from the current counters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Hard lower bound on a life total.
pub const LIFE_FLOOR: i64 = -999;

/// Commander damage from a single source that kills on its own.
pub const COMMANDER_DAMAGE_LETHAL: u32 = 21;

/// A named accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub hex: &'static str,
}

/// Default player colors, assigned by seat position at creation.
pub const DEFAULT_COLORS: [PaletteColor; 12] = [
    PaletteColor { name: "Red", hex: "#ef476f" },
    PaletteColor { name: "Yellow", hex: "#ffd166" },
    PaletteColor { name: "Green", hex: "#06d6a0" },
    PaletteColor { name: "Blue", hex: "#118ab2" },
    PaletteColor { name: "Purple", hex: "#f72585" },
    PaletteColor { name: "Orange", hex: "#ff8c42" },
    PaletteColor { name: "Pink", hex: "#ff6b9d" },
    PaletteColor { name: "Cyan", hex: "#00d4ff" },
    PaletteColor { name: "Lime", hex: "#7fff00" },
    PaletteColor { name: "Teal", hex: "#20b2aa" },
    PaletteColor { name: "Indigo", hex: "#4b0082" },
    PaletteColor { name: "Brown", hex: "#8b4513" },
];

/// Get the default accent color for a seat position.
pub fn default_color(position: usize) -> &'static str {
    DEFAULT_COLORS[position % DEFAULT_COLORS.len()].hex
}

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Unique id, immutable for the player's lifetime.
    id: String,

    /// Display label.
    pub name: String,

    /// Life total. Clamped to [`LIFE_FLOOR`], unbounded above.
    life: i64,

    /// Poison counters. Never negative, unbounded above.
    poison: u32,

    /// Commander damage taken, keyed by source player id.
    ///
    /// Values are always positive. Keys are weak references: a removed
    /// player's id may linger here, and lookups of absent keys read
    /// as 0.
    #[serde(default)]
    commander_damage: HashMap<String, u32>,

    /// Display accent color (hex).
    pub color: String,
}

impl Player {
    /// Create a player for a seat position with the given fresh id.
    pub fn new(id: String, position: usize, starting_life: i64) -> Self {
        Self {
            id,
            name: format!("Player {}", position + 1),
            life: starting_life,
            poison: 0,
            commander_damage: HashMap::new(),
            color: default_color(position).to_string(),
        }
    }

    /// The player's unique id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current life total.
    pub fn life(&self) -> i64 {
        self.life
    }

    /// Current poison counters.
    pub fn poison(&self) -> u32 {
        self.poison
    }

    /// Commander damage taken, keyed by source player id.
    pub fn commander_damage(&self) -> &HashMap<String, u32> {
        &self.commander_damage
    }

    /// Commander damage taken from one source. Absent sources read as 0.
    pub fn commander_damage_from(&self, source_id: &str) -> u32 {
        self.commander_damage.get(source_id).copied().unwrap_or(0)
    }

    /// Adjust the life total by `delta`, clamping to [`LIFE_FLOOR`].
    pub fn change_life(&mut self, delta: i64) {
        self.life = self.life.saturating_add(delta).max(LIFE_FLOOR);
    }

    /// Adjust the poison counter by `delta`. Poison cannot go below 0.
    pub fn change_poison(&mut self, delta: i32) {
        self.poison = self.poison.saturating_add_signed(delta);
    }

    /// Take `amount` commander damage from a source.
    ///
    /// Adds to the source's entry (creating it if absent) and subtracts
    /// the same amount from life. An `amount` of 0 is a no-op and
    /// returns `false`.
    pub fn apply_commander_damage(&mut self, source_id: &str, amount: u32) -> bool {
        if amount == 0 {
            return false;
        }
        let entry = self.commander_damage.entry(source_id.to_string()).or_insert(0);
        *entry = entry.saturating_add(amount);
        self.life = self.life.saturating_sub(i64::from(amount)).max(LIFE_FLOOR);
        true
    }

    /// Remove one commander damage from a source, restoring 1 life.
    ///
    /// An entry reaching 0 is deleted rather than stored. Returns
    /// `false` without touching anything if there is no entry for the
    /// source.
    pub fn decrement_commander_damage(&mut self, source_id: &str) -> bool {
        let current = match self.commander_damage.get(source_id).copied() {
            Some(current) => current,
            None => return false,
        };
        if current <= 1 {
            self.commander_damage.remove(source_id);
        } else {
            self.commander_damage.insert(source_id.to_string(), current - 1);
        }
        self.life = self.life.saturating_add(1);
        true
    }

    /// Remove all commander damage from a source, restoring that much
    /// life. Returns `false` if there is no entry for the source.
    pub fn clear_commander_damage(&mut self, source_id: &str) -> bool {
        match self.commander_damage.remove(source_id) {
            Some(amount) => {
                self.life = self.life.saturating_add(i64::from(amount));
                true
            }
            None => false,
        }
    }

    /// Set the commander damage from a source to an exact value.
    ///
    /// Life moves by the difference: raising the entry debits life,
    /// lowering it credits life. A `new_value` of 0 deletes the entry.
    pub fn set_commander_damage(&mut self, source_id: &str, new_value: u32) {
        let previous = self.commander_damage_from(source_id);
        let delta = i64::from(new_value) - i64::from(previous);
        if new_value == 0 {
            self.commander_damage.remove(source_id);
        } else {
            self.commander_damage.insert(source_id.to_string(), new_value);
        }
        self.life = self.life.saturating_sub(delta).max(LIFE_FLOOR);
    }

    /// Restore life, poison, and commander damage to their defaults.
    /// Id, name, and color are untouched.
    pub fn reset(&mut self, starting_life: i64) {
        self.life = starting_life;
        self.poison = 0;
        self.commander_damage.clear();
    }

    /// Check whether the player is dead: life at or below 0, or at
    /// least [`COMMANDER_DAMAGE_LETHAL`] commander damage from any
    /// single source. Poison is tracked but not lethal.
    pub fn is_dead(&self) -> bool {
        self.life <= 0
            || self
                .commander_damage
                .values()
                .any(|&v| v >= COMMANDER_DAMAGE_LETHAL)
    }

    /// Check the player's own invariants. Used when loading persisted
    /// state.
    pub fn is_valid(&self) -> bool {
        self.life >= LIFE_FLOOR && self.commander_damage.values().all(|&v| v > 0)
    }

    /// Convert to a JSON snapshot for display, including the computed
    /// death flag.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "life": self.life,
            "poison": self.poison,
            "commanderDamage": self.commander_damage,
            "color": self.color,
            "isDead": self.is_dead(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_player(position: usize) -> Player {
        Player::new(format!("player-{}", position), position, 40)
    }

    #[test]
    fn test_new_defaults() {
        let p = make_player(0);
        assert_eq!(p.id(), "player-0");
        assert_eq!(p.name, "Player 1");
        assert_eq!(p.life(), 40);
        assert_eq!(p.poison(), 0);
        assert!(p.commander_damage().is_empty());
        assert_eq!(p.color, "#ef476f");
        assert!(!p.is_dead());
    }

    #[test]
    fn test_default_color_cycles() {
        assert_eq!(default_color(0), DEFAULT_COLORS[0].hex);
        assert_eq!(default_color(11), DEFAULT_COLORS[11].hex);
        assert_eq!(default_color(12), DEFAULT_COLORS[0].hex);
        assert_eq!(default_color(25), DEFAULT_COLORS[1].hex);
    }

    #[test]
    fn test_change_life_clamps_at_floor() {
        let mut p = make_player(0);
        p.change_life(-5000);
        assert_eq!(p.life(), LIFE_FLOOR);
        p.change_life(-5000);
        assert_eq!(p.life(), LIFE_FLOOR);
        p.change_life(1);
        assert_eq!(p.life(), LIFE_FLOOR + 1);
    }

    #[test]
    fn test_change_life_unbounded_above() {
        let mut p = make_player(0);
        p.change_life(10_000);
        assert_eq!(p.life(), 10_040);
    }

    #[test]
    fn test_poison_floor() {
        let mut p = make_player(0);
        p.change_poison(-3);
        assert_eq!(p.poison(), 0);
        p.change_poison(2);
        p.change_poison(-1);
        assert_eq!(p.poison(), 1);
        p.change_poison(-5);
        assert_eq!(p.poison(), 0);
    }

    #[test]
    fn test_commander_damage_co_mutates_life() {
        let mut p = make_player(0);
        assert!(p.apply_commander_damage("src", 7));
        assert_eq!(p.commander_damage_from("src"), 7);
        assert_eq!(p.life(), 33);

        assert!(p.apply_commander_damage("src", 3));
        assert_eq!(p.commander_damage_from("src"), 10);
        assert_eq!(p.life(), 30);
    }

    #[test]
    fn test_commander_damage_zero_amount_is_noop() {
        let mut p = make_player(0);
        assert!(!p.apply_commander_damage("src", 0));
        assert!(p.commander_damage().is_empty());
        assert_eq!(p.life(), 40);
    }

    #[test]
    fn test_decrement_commander_damage() {
        let mut p = make_player(0);
        p.apply_commander_damage("src", 2);
        assert_eq!(p.life(), 38);

        assert!(p.decrement_commander_damage("src"));
        assert_eq!(p.commander_damage_from("src"), 1);
        assert_eq!(p.life(), 39);

        // Reaching 0 deletes the entry instead of storing it.
        assert!(p.decrement_commander_damage("src"));
        assert_eq!(p.commander_damage_from("src"), 0);
        assert!(!p.commander_damage().contains_key("src"));
        assert_eq!(p.life(), 40);

        // Absent entry is a no-op.
        assert!(!p.decrement_commander_damage("src"));
        assert_eq!(p.life(), 40);
    }

    #[test]
    fn test_clear_commander_damage() {
        let mut p = make_player(0);
        p.apply_commander_damage("src", 10);
        assert_eq!(p.life(), 30);

        assert!(p.clear_commander_damage("src"));
        assert!(!p.commander_damage().contains_key("src"));
        assert_eq!(p.life(), 40);

        assert!(!p.clear_commander_damage("src"));
    }

    #[test]
    fn test_set_commander_damage_exact() {
        let mut p = make_player(0);
        p.apply_commander_damage("src", 10);
        assert_eq!(p.life(), 30);

        // Lowering the entry credits life by the difference.
        p.set_commander_damage("src", 5);
        assert_eq!(p.commander_damage_from("src"), 5);
        assert_eq!(p.life(), 35);

        // Raising it debits life by the difference.
        p.set_commander_damage("src", 8);
        assert_eq!(p.commander_damage_from("src"), 8);
        assert_eq!(p.life(), 32);

        // Setting to 0 deletes the key and restores the full value.
        p.set_commander_damage("src", 0);
        assert!(!p.commander_damage().contains_key("src"));
        assert_eq!(p.life(), 40);
    }

    #[test]
    fn test_set_commander_damage_from_absent() {
        let mut p = make_player(0);
        p.set_commander_damage("src", 4);
        assert_eq!(p.commander_damage_from("src"), 4);
        assert_eq!(p.life(), 36);
    }

    #[test]
    fn test_is_dead_at_zero_life() {
        let mut p = make_player(0);
        p.change_life(-40);
        assert_eq!(p.life(), 0);
        assert!(p.is_dead());
    }

    #[test]
    fn test_is_dead_below_zero_life() {
        let mut p = make_player(0);
        p.change_life(-45);
        assert_eq!(p.life(), -5);
        assert!(p.is_dead());
    }

    #[test]
    fn test_is_dead_from_commander_damage_with_positive_life() {
        let mut p = make_player(0);
        p.apply_commander_damage("src", 21);
        assert_eq!(p.life(), 19);
        assert!(p.is_dead());
    }

    #[test]
    fn test_not_dead_below_lethal_commander_damage() {
        let mut p = make_player(0);
        p.apply_commander_damage("src", 20);
        assert_eq!(p.life(), 20);
        assert!(!p.is_dead());
    }

    #[test]
    fn test_poison_is_not_lethal() {
        let mut p = make_player(0);
        p.change_poison(10);
        assert_eq!(p.poison(), 10);
        assert!(!p.is_dead());
    }

    #[test]
    fn test_reset_preserves_identity() {
        let mut p = make_player(2);
        p.name = "Alice".to_string();
        p.color = "#000000".to_string();
        p.change_life(-12);
        p.change_poison(3);
        p.apply_commander_damage("src", 5);

        p.reset(40);

        assert_eq!(p.id(), "player-2");
        assert_eq!(p.name, "Alice");
        assert_eq!(p.color, "#000000");
        assert_eq!(p.life(), 40);
        assert_eq!(p.poison(), 0);
        assert!(p.commander_damage().is_empty());
    }

    #[test]
    fn test_is_valid() {
        let mut p = make_player(0);
        assert!(p.is_valid());
        p.change_life(-5000);
        assert!(p.is_valid()); // clamped at the floor, still valid
    }

    #[test]
    fn test_to_json_includes_death_flag() {
        let mut p = make_player(0);
        p.apply_commander_damage("src", 21);
        let json = p.to_json();
        assert_eq!(json["life"], 19);
        assert_eq!(json["isDead"], true);
        assert_eq!(json["commanderDamage"]["src"], 21);
    }
}
