//! Shared primitives and traits for the contacta workspace.
//!
//! `contacta-core` is the foundation the annotation crates build on:
//!
//! - **Error types** — [`ContactaError`] and [`Result`] for structured error handling
//! - **Traits** — [`Annotated`], [`Summarizable`], [`ContentAddressable`]
//! - **Hashing** — SHA-256 content addressing for annotated graphs

pub mod error;
pub mod hash;
pub mod traits;

pub use error::{ContactaError, Result};
pub use traits::*;
