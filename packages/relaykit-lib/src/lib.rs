//! # relaykit-lib
//!
//! `relaykit-lib` is a collection of utilities used by the various `relaykit-*` crates.

pub mod config;
pub mod defaults;
pub mod utils;
