//! Game-state engine for a mine-avoidance puzzle where stepping on a mine starts a timed
//! word-unscramble challenge instead of ending the game outright.
//!
//! The engine owns no rendering, audio or input handling. A presentation layer drives a
//! [`Session`] with activations, challenge keystrokes and periodic ticks, and reads back
//! [`CellView`]s, [`ChallengeView`]s and the current [`Phase`].

pub use board::*;
pub use cell::*;
pub use challenge::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use session::*;
pub use types::*;
pub use view::*;

pub use web_time::Instant;

mod board;
mod cell;
mod challenge;
mod config;
mod engine;
mod error;
mod session;
mod types;
mod view;
