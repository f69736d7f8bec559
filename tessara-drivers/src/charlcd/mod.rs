//! Character LCD drivers
//!
//! HD44780-family modules wired behind a PCF8574 I2C expander ("backpack").
//! The expander's high nibble carries the controller's 4-bit data bus, the
//! low nibble carries the control lines, so every logical byte travels as a
//! fixed 4-byte burst (see [`frame`]).
//!
//! [`hd44780`] holds the blocking driver, [`asynch`] its async twin.

pub mod asynch;
pub mod frame;
pub mod hd44780;

pub use frame::{frame_byte, Register, FRAME_LEN};
pub use hd44780::{Hd44780, Hd44780Config};
