//! HD44780 character LCD driver (blocking, I2C backpack)
//!
//! Drives a 2x16 HD44780-family module through a PCF8574 expander in 4-bit
//! mode. The driver is write-only: the controller exposes no readable
//! status over the backpack, so every operation relies on worst-case
//! settle delays instead of busy-flag polling, and a transfer that never
//! reached the controller is indistinguishable from one that did. Bus
//! errors are surfaced to the caller unmodified; there are no retries.
//!
//! The driver itself holds no display state. The physical controller owns
//! the surface and the true cursor position; each call here is an
//! independent command emission.
//!
//! # Usage
//!
//! ```ignore
//! let mut lcd = Hd44780::new(i2c, delay, Hd44780Config::default());
//! lcd.initialize()?;
//! lcd.write_at(0, 0, "ready")?;
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use tessara_core::{CharDisplay, ScrollDirection};

use super::frame::{self, frame_byte, Register};

/// Default 7-bit address of common PCF8574 backpacks.
pub const DEFAULT_ADDRESS: u8 = 0x27;

/// Visible columns per row.
pub const COLS: u8 = 16;

/// Visible rows.
pub const ROWS: u8 = 2;

/// HD44780 instruction bytes
pub mod cmd {
    /// Clear the whole display and reset the address counter.
    pub const CLEAR_DISPLAY: u8 = 0x01;
    /// Entry mode: auto-increment cursor, no display shift.
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    /// Display off (display, cursor, blink all disabled).
    pub const DISPLAY_OFF: u8 = 0x08;
    /// Display on, cursor and blink off.
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Shift the visible window one position left.
    pub const SHIFT_LEFT: u8 = 0x18;
    /// Shift the visible window one position right.
    pub const SHIFT_RIGHT: u8 = 0x1C;
    /// 8-bit interface select (reset handshake only).
    pub const FUNCTION_SET_8BIT: u8 = 0x30;
    /// 4-bit interface select.
    pub const FUNCTION_SET_4BIT: u8 = 0x20;
    /// 4-bit interface, two lines, 5x8 font.
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    /// Set DDRAM address, row 0 base.
    pub const ROW0_BASE: u8 = 0x80;
    /// Set DDRAM address, row 1 base.
    pub const ROW1_BASE: u8 = 0xC0;
}

// Settle delays in milliseconds. The controller gives no completion
// feedback, so these are the datasheet's worst-case figures.
pub(crate) const POWER_ON_MS: u32 = 40;
pub(crate) const RESET_FIRST_MS: u32 = 5;
pub(crate) const RESET_SECOND_MS: u32 = 1;
pub(crate) const RESET_THIRD_MS: u32 = 10;
pub(crate) const MODE_SWITCH_MS: u32 = 10;
pub(crate) const SETTLE_MS: u32 = 1;
pub(crate) const CLEAR_SETTLE_MS: u32 = 2;

/// HD44780 backpack configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hd44780Config {
    /// 7-bit I2C address of the expander.
    pub address: u8,
    /// Whether the backlight bit is asserted in every transfer.
    pub backlight: bool,
}

impl Default for Hd44780Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            backlight: true,
        }
    }
}

/// Blocking HD44780 driver over an I2C backpack
///
/// Generic over the bus and delay providers; the bus implementation owns
/// the per-transfer timeout bound and its error type is the only failure
/// the driver can report. Single caller assumed - the driver performs no
/// locking of its own.
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    config: Hd44780Config,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new driver. No bus traffic until [`initialize`](Self::initialize).
    pub fn new(i2c: I2C, delay: D, config: Hd44780Config) -> Self {
        Self { i2c, delay, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Hd44780Config {
        &self.config
    }

    /// Consume the driver and hand back the bus and delay providers.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Send an instruction byte to the controller.
    pub fn send_command(&mut self, command: u8) -> Result<(), I2C::Error> {
        self.send(command, Register::Command)
    }

    /// Send a character byte to be rendered at the current cursor.
    pub fn send_data(&mut self, data: u8) -> Result<(), I2C::Error> {
        self.send(data, Register::Data)
    }

    fn send(&mut self, value: u8, register: Register) -> Result<(), I2C::Error> {
        let burst = frame_byte(value, register, self.config.backlight);
        self.i2c.write(self.config.address, &burst)
    }

    /// Run the power-on reset and configuration handshake.
    ///
    /// Three 8-bit interface selects with shrinking settle delays, then the
    /// switch to 4-bit mode, then function set / display off / clear /
    /// entry mode / display on. The ordering comes from the controller's
    /// datasheet reset procedure; reordering or omitting a step leaves the
    /// controller in an undefined state. Call once at startup.
    pub fn initialize(&mut self) -> Result<(), I2C::Error> {
        self.delay.delay_ms(POWER_ON_MS);
        self.send_command(cmd::FUNCTION_SET_8BIT)?;
        self.delay.delay_ms(RESET_FIRST_MS);
        self.send_command(cmd::FUNCTION_SET_8BIT)?;
        self.delay.delay_ms(RESET_SECOND_MS);
        self.send_command(cmd::FUNCTION_SET_8BIT)?;
        self.delay.delay_ms(RESET_THIRD_MS);
        self.send_command(cmd::FUNCTION_SET_4BIT)?;
        self.delay.delay_ms(MODE_SWITCH_MS);

        self.send_command(cmd::FUNCTION_SET_4BIT_2LINE)?;
        self.delay.delay_ms(SETTLE_MS);
        self.send_command(cmd::DISPLAY_OFF)?;
        self.delay.delay_ms(SETTLE_MS);
        self.send_command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_ms(CLEAR_SETTLE_MS);
        self.send_command(cmd::ENTRY_MODE_INCREMENT)?;
        self.delay.delay_ms(SETTLE_MS);
        self.send_command(cmd::DISPLAY_ON)
    }

    /// Home the cursor to row 0 and fill the row with spaces.
    ///
    /// Only row 0 is cleared; the controller's clear-display instruction is
    /// deliberately not used here, so row 1 keeps its content. Combine with
    /// [`set_cursor`](Self::set_cursor) to blank the second row.
    pub fn clear(&mut self) -> Result<(), I2C::Error> {
        self.send_command(cmd::ROW0_BASE)?;
        for _ in 0..COLS {
            self.send_data(b' ')?;
        }
        Ok(())
    }

    /// Move the cursor to `row` (0 or 1), `col` (0..16).
    ///
    /// A row outside {0, 1} gets no row base OR-ed in: the column value is
    /// issued as the raw DDRAM address command, so out-of-range rows behave
    /// as raw column addressing.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), I2C::Error> {
        let address = match row {
            0 => cmd::ROW0_BASE | col,
            1 => cmd::ROW1_BASE | col,
            _ => col,
        };
        self.send_command(address)
    }

    /// Render each byte of `text` in order at the advancing cursor.
    ///
    /// No wrapping or bounds checks: bytes past column 15 land wherever the
    /// controller's address counter overflows to. Intended for ASCII; other
    /// bytes select whatever the controller's character ROM maps them to.
    pub fn write_text(&mut self, text: &str) -> Result<(), I2C::Error> {
        for &byte in text.as_bytes() {
            self.send_data(byte)?;
        }
        Ok(())
    }

    /// Shift the visible window one position in `direction`.
    pub fn scroll(&mut self, direction: ScrollDirection) -> Result<(), I2C::Error> {
        let command = match direction {
            ScrollDirection::Left => cmd::SHIFT_LEFT,
            ScrollDirection::Right => cmd::SHIFT_RIGHT,
        };
        self.send_command(command)
    }

    /// Shift the visible window one position left.
    pub fn scroll_left(&mut self) -> Result<(), I2C::Error> {
        self.scroll(ScrollDirection::Left)
    }

    /// Shift the visible window one position right.
    pub fn scroll_right(&mut self) -> Result<(), I2C::Error> {
        self.scroll(ScrollDirection::Right)
    }

    /// Switch the backlight and make the change effective immediately.
    ///
    /// Issues a control-only byte with no enable edge, so the controller
    /// ignores it; every following frame carries the new backlight bit.
    pub fn set_backlight(&mut self, on: bool) -> Result<(), I2C::Error> {
        self.config.backlight = on;
        let ctl = if on { frame::BACKLIGHT } else { 0 };
        self.i2c.write(self.config.address, &[ctl])
    }
}

impl<I2C, D> CharDisplay for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = I2C::Error;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        Hd44780::initialize(self)
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        Hd44780::clear(self)
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
        Hd44780::set_cursor(self, row, col)
    }

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        Hd44780::write_text(self, text)
    }

    fn scroll(&mut self, direction: ScrollDirection) -> Result<(), Self::Error> {
        Hd44780::scroll(self, direction)
    }
}

impl<I2C, D> core::fmt::Write for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_text(s).map_err(|_| core::fmt::Error)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    //! Fake bus and delay providers recording one interleaved transcript.

    use core::cell::RefCell;
    use core::convert::Infallible;

    use embedded_hal::delay::DelayNs;
    use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
    use heapless::Vec;

    use crate::charlcd::frame::{self, FRAME_LEN};

    /// One observable effect of the driver, in emission order.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        /// Bus write: target address and transmitted bytes.
        Write(u8, Vec<u8, 8>),
        /// Blocking delay in milliseconds.
        DelayMs(u32),
    }

    /// Compact view of a transcript for golden-trace comparisons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Step {
        /// Command byte reassembled from its 4-byte burst.
        Cmd(u8),
        /// Data byte reassembled from its 4-byte burst.
        Data(u8),
        /// Delay in milliseconds.
        Wait(u32),
    }

    pub struct Trace {
        events: RefCell<Vec<Event, 96>>,
    }

    impl Trace {
        pub fn new() -> Self {
            Self {
                events: RefCell::new(Vec::new()),
            }
        }

        pub fn record(&self, event: Event) {
            self.events.borrow_mut().push(event).unwrap();
        }

        pub fn events(&self) -> Vec<Event, 96> {
            self.events.borrow().clone()
        }

        /// Reassemble each burst back into (value, register) form.
        ///
        /// Panics if a burst is malformed: wrong length, wrong address,
        /// nibble mismatch between the strobe-high and strobe-low bytes, or
        /// a missing high-to-low strobe transition.
        pub fn steps(&self, expect_address: u8) -> Vec<Step, 96> {
            let mut steps = Vec::new();
            for event in self.events.borrow().iter() {
                let step = match event {
                    Event::DelayMs(ms) => Step::Wait(*ms),
                    Event::Write(address, bytes) => {
                        assert_eq!(*address, expect_address);
                        assert_eq!(bytes.len(), FRAME_LEN);
                        // Each nibble must repeat across its strobe pair.
                        assert_eq!(bytes[0] & 0xF0, bytes[1] & 0xF0);
                        assert_eq!(bytes[2] & 0xF0, bytes[3] & 0xF0);
                        assert_eq!(bytes[0] & frame::EN, frame::EN);
                        assert_eq!(bytes[1] & frame::EN, 0);
                        assert_eq!(bytes[2] & frame::EN, frame::EN);
                        assert_eq!(bytes[3] & frame::EN, 0);
                        let value = (bytes[0] & 0xF0) | (bytes[2] >> 4);
                        if bytes[0] & frame::RS != 0 {
                            Step::Data(value)
                        } else {
                            Step::Cmd(value)
                        }
                    }
                };
                steps.push(step).unwrap();
            }
            steps
        }
    }

    /// Bus fake: records every write into the shared trace.
    pub struct TraceBus<'a>(pub &'a Trace);

    impl ErrorType for TraceBus<'_> {
        type Error = Infallible;
    }

    impl I2c for TraceBus<'_> {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            for operation in operations.iter() {
                if let Operation::Write(bytes) = operation {
                    let mut copy = Vec::new();
                    copy.extend_from_slice(bytes).unwrap();
                    self.0.record(Event::Write(address, copy));
                }
            }
            Ok(())
        }
    }

    /// Delay fake: records requested durations instead of sleeping.
    pub struct TraceDelay<'a>(pub &'a Trace);

    impl DelayNs for TraceDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.0.record(Event::DelayMs(ns / 1_000_000));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.0.record(Event::DelayMs(ms));
        }
    }

    /// Error returned by [`FailingBus`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BusFault;

    impl embedded_hal::i2c::Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Bus fake that rejects every transaction.
    pub struct FailingBus;

    impl ErrorType for FailingBus {
        type Error = BusFault;
    }

    impl I2c for FailingBus {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            Err(BusFault)
        }
    }

    /// Delay fake that does nothing.
    pub struct NoopDelay;

    impl DelayNs for NoopDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }
}
