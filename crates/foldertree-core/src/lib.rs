//! # foldertree-core
//!
//! Core crate for the media-library folder tree. Contains the folder
//! identifier type, configuration schemas, the persistence trait consumed
//! by the engine, and the unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
