//! Core business logic for desk.

pub mod services;

pub use services::*;
