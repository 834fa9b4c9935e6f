//! Utility Module
//!
//! - [`time`]: frame clock driving playback

pub mod time;

pub use time::Timer;
