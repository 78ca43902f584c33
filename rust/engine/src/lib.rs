//! # organpair-engine: Organ/Function Matching Game Core
//!
//! A deterministic session engine for a timed matching game: the player pairs
//! an organ tile with the tile describing its function, clears auto-generated
//! levels and builds combo-multiplied score before the clock runs out.
//!
//! ## Core Modules
//!
//! - [`catalog`] - Base items (organ + function) and the built-in catalog
//! - [`tile`] - Tile identity, pair keys, faces and tile state
//! - [`deck`] - Deck generation with seeded ChaCha20 shuffling
//! - [`rules`] - Match evaluation and score arithmetic
//! - [`combo`] - Consecutive-match tracking
//! - [`progression`] - Level completion and advancement
//! - [`clock`] - Countdown with bonus-time injection
//! - [`session`] - The session state machine driven by the host
//! - [`state`] - Snapshots, events and the final summary
//! - [`settings`] - Tunable rule constants
//! - [`logger`] - Score records and persistence sinks
//! - [`errors`] - Error types for construction and persistence
//!
//! ## Quick Start
//!
//! ```rust
//! use organpair_engine::session::GameSession;
//!
//! let mut session = GameSession::with_defaults(Some(42));
//! let step = session.start();
//! println!("level {} with {} pairs", step.state.level, step.state.pairs_in_level);
//!
//! // the host forwards taps and one tick per second
//! let first = session.deck().unwrap().tiles()[0].id;
//! session.select(first);
//! session.tick();
//! ```
//!
//! ## Deterministic Decks
//!
//! Every deck of a session comes from one seeded generator:
//!
//! ```rust
//! use organpair_engine::catalog::Catalog;
//! use organpair_engine::deck::CardSetGenerator;
//!
//! let catalog = Catalog::default();
//! let a = CardSetGenerator::new_with_seed(7).generate(&catalog, 1);
//! let b = CardSetGenerator::new_with_seed(7).generate(&catalog, 1);
//! assert_eq!(a, b);
//! ```

pub mod catalog;
pub mod clock;
pub mod combo;
pub mod deck;
pub mod errors;
pub mod logger;
pub mod progression;
pub mod rules;
pub mod session;
pub mod settings;
pub mod state;
pub mod tile;
