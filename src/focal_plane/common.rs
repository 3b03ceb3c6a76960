//! Common utilities module
//!
//! This module contains shared utilities used across the focal plane crate.

pub mod error;

pub use error::{MaskError, Result};
