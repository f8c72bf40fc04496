//! This is the main file to house data collection functions.

pub mod error;
pub mod network;
