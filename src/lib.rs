//! Commander Life State Library
//!
//! This crate provides the player state engine for a commander life
//! counter: 1 to 6 players, each with a life total, a poison counter,
//! and commander damage tracked per opposing source, persisted across
//! restarts as a single JSON blob.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Player Records** - Life, poison, and per-source commander
//!   damage, with commander damage and life co-mutated by a single
//!   operation so the two never drift apart.
//!
//! - **Session Roster** - Grow/shrink between 1 and 6 players, a
//!   configurable starting life, and reset operations. Out-of-range
//!   inputs are clamped and unknown player ids are silent no-ops.
//!
//! - **Death Evaluation** - A pure predicate, recomputed on demand:
//!   dead at life 0 or below, or at 21+ commander damage from any
//!   single source. Poison is tracked but not lethal.
//!
//! - **Persistence** - The whole session saved as one JSON document
//!   after every applied mutation; corrupt or missing state falls back
//!   to a fresh default session.
//!
//! # Design Principles
//!
//! 1. **Pure state, no UI** - This crate never draws anything. A
//!    presentation layer calls in, then re-reads state (or the
//!    [`state::Player::to_json`] snapshots) to redraw.
//!
//! 2. **Clamp, don't error** - Mutations degrade to a safe no-op or a
//!    clamped value rather than surfacing failures.
//!
//! 3. **Single writer** - One [`state::Tracker`] owns the session;
//!    each mutation completes, including its save, before the next is
//!    observed.
//!
//! # Example
//!
//! ```rust
//! use commander_life_state::state::Session;
//!
//! let mut session = Session::new(40, 2);
//! let attacker = session.players()[0].id().to_string();
//! let defender = session.players()[1].id().to_string();
//!
//! // 21 commander damage from one source is lethal even at positive life.
//! session.apply_commander_damage(&defender, &attacker, 21);
//!
//! let hit = session.player(&defender).unwrap();
//! assert_eq!(hit.life(), 19);
//! assert!(hit.is_dead());
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
