//! Domain layer for the zmeals plugin.
//!
//! Core types independent of Zellij APIs: the error type and the recipe models
//! decoded from the remote API.
//!
//! - [`error`]: Error types and result aliases
//! - [`recipe`]: Recipe summary/detail models and ingredient extraction

pub mod error;
pub mod recipe;

pub use error::{Result, ZmealsError};
pub use recipe::{RecipeDetail, RecipeSummary};
