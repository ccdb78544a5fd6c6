#![cfg_attr(not(test), no_std)]

/// Blocking I2C implementation
pub mod blocking_impl;
/// Types + data decoding
pub mod core;
