//! Infrastructure implementations.
//!
//! Configuration loading and the random-number adapters behind the domain
//! dice ports.

pub mod config;
pub mod random;
