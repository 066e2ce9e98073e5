//! Keysift Core - Shared foundation for the keysift crates.
//!
//! This crate provides:
//!
//! - `Error` / `Result`: Error types reported on caller misuse
//! - `RowId`: The canonical payload stored against index keys
//!
//! # Example
//!
//! ```rust
//! use keysift_core::{Error, RowId};
//!
//! let row: RowId = 42;
//! let err = Error::invalid_argument("key must be present");
//! assert_eq!(row, 42);
//! assert_eq!(err.to_string(), "Invalid argument: key must be present");
//! ```

#![no_std]

extern crate alloc;

mod error;
mod row;

pub use error::{Error, Result};
pub use row::RowId;
