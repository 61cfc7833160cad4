//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod user;
pub mod validation;

pub use user::{NewUser, User, UserChanges, UserResponse};
