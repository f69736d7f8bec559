//! Hardware abstraction traits
//!
//! These traits define the interface between application code and
//! controller-specific display drivers.

pub mod display;

pub use display::{CharDisplay, CharDisplayExt, ScrollDirection};
