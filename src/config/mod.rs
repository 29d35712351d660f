//! Configuration constants
//!
//! - [`defaults`] - Default option values and bounds
//! - [`paths`] - Fixed paths on the remote machine
//! - [`urls`] - Download locations

pub mod defaults;
pub mod paths;
pub mod urls;
