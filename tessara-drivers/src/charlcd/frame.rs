//! Nibble framing for the PCF8574 backpack
//!
//! The expander drives the LCD controller's 4-bit bus from its high nibble
//! (P4-P7) and the control lines from its low nibble (P0-P3). One logical
//! 8-bit command or character byte therefore becomes a burst of four
//! expander bytes:
//!
//! - upper nibble, enable high
//! - upper nibble, enable low
//! - lower nibble, enable high
//! - lower nibble, enable low
//!
//! The controller latches a nibble on the enable line's high-to-low edge;
//! upper nibble first, then lower. This ordering is controller-mandated and
//! never varies. The register-select line in every byte of the burst marks
//! it as a command (configuration) or data (character to render).

/// Register-select line (P0): high routes the byte to the data register.
pub const RS: u8 = 0x01;

/// Read/write line (P1): never driven high, the backpack is write-only.
pub const RW: u8 = 0x02;

/// Enable strobe (P2): the controller latches on the high-to-low edge.
pub const EN: u8 = 0x04;

/// Backlight drive (P3): not seen by the controller at all.
pub const BACKLIGHT: u8 = 0x08;

/// Mask selecting the data-bus nibble (P4-P7).
pub const DATA_MASK: u8 = 0xF0;

/// Expander bytes per logical command/data byte.
pub const FRAME_LEN: usize = 4;

/// Target register inside the LCD controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Instruction register: configuration and cursor/display actions.
    Command,
    /// Data register: a character code to render at the cursor.
    Data,
}

impl Register {
    /// Control-line bit pattern selecting this register.
    pub const fn select_bits(self) -> u8 {
        match self {
            Register::Command => 0,
            Register::Data => RS,
        }
    }
}

/// Build the 4-byte burst carrying one logical byte to the controller.
///
/// Pure function: no transport involved, so the framing is testable in
/// isolation. Any 8-bit value is accepted; the controller itself defines
/// which bit patterns are meaningful.
pub const fn frame_byte(value: u8, register: Register, backlight: bool) -> [u8; FRAME_LEN] {
    let upper = value & DATA_MASK;
    let lower = (value << 4) & DATA_MASK;
    let ctl = register.select_bits() | if backlight { BACKLIGHT } else { 0 };

    [upper | ctl | EN, upper | ctl, lower | ctl | EN, lower | ctl]
}
