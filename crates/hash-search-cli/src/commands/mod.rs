//! CLI command implementations.

pub mod fixed;
pub mod hash;
pub mod hex_utils;
pub mod range;
pub mod search;
