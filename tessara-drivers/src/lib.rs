//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tessara-core:
//!
//! - Character LCD modules (HD44780 behind a PCF8574 I2C backpack),
//!   with blocking and async session layers sharing one framing core

#![no_std]
#![deny(unsafe_code)]

pub mod charlcd;
