//! Bus-agnostic abstractions for character-cell LCD modules
//!
//! This crate contains the pieces that do not depend on a specific
//! controller or bus transport:
//!
//! - `CharDisplay` trait for write-only character displays
//! - `ScrollDirection` for display-window shifts
//! - `CharDisplayExt` convenience helpers

#![no_std]
#![deny(unsafe_code)]

pub mod traits;

pub use traits::{CharDisplay, CharDisplayExt, ScrollDirection};
