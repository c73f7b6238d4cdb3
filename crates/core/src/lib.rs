//! Core business logic for chatter.

pub mod services;

pub use services::*;
