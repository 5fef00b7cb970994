//! Port implementations.
//!
//! `live` talks to the real world, `recording` wraps a live adapter and
//! captures its interactions into a cassette, `replaying` serves them back.

pub mod live;
pub mod recording;
pub mod replaying;
