//! HD44780 character LCD driver (async, I2C backpack)
//!
//! Async twin of [`hd44780`](super::hd44780): identical framing, command
//! sequences, and settle delays, with the bus and delay calls awaited
//! instead of blocking. Use this variant from executor tasks that must not
//! stall other tasks during the multi-millisecond init handshake.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use tessara_core::ScrollDirection;

use super::frame::{self, frame_byte, Register};
use super::hd44780::{
    cmd, Hd44780Config, CLEAR_SETTLE_MS, COLS, MODE_SWITCH_MS, POWER_ON_MS, RESET_FIRST_MS,
    RESET_SECOND_MS, RESET_THIRD_MS, SETTLE_MS,
};

/// Async HD44780 driver over an I2C backpack
///
/// Same write-only, fire-and-forget contract as the blocking driver; the
/// bus error is the only failure kind and is surfaced unmodified.
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
    pub async fn send_command(&mut self, command: u8) -> Result<(), I2C::Error> {
        self.send(command, Register::Command).await
    }

    /// Send a character byte to be rendered at the current cursor.
    pub async fn send_data(&mut self, data: u8) -> Result<(), I2C::Error> {
        self.send(data, Register::Data).await
    }

    async fn send(&mut self, value: u8, register: Register) -> Result<(), I2C::Error> {
        let burst = frame_byte(value, register, self.config.backlight);
        self.i2c.write(self.config.address, &burst).await
    }

    /// Run the power-on reset and configuration handshake.
    ///
    /// Same sequence and delays as the blocking driver. Call once at
    /// startup.
    pub async fn initialize(&mut self) -> Result<(), I2C::Error> {
        self.delay.delay_ms(POWER_ON_MS).await;
        self.send_command(cmd::FUNCTION_SET_8BIT).await?;
        self.delay.delay_ms(RESET_FIRST_MS).await;
        self.send_command(cmd::FUNCTION_SET_8BIT).await?;
        self.delay.delay_ms(RESET_SECOND_MS).await;
        self.send_command(cmd::FUNCTION_SET_8BIT).await?;
        self.delay.delay_ms(RESET_THIRD_MS).await;
        self.send_command(cmd::FUNCTION_SET_4BIT).await?;
        self.delay.delay_ms(MODE_SWITCH_MS).await;

        self.send_command(cmd::FUNCTION_SET_4BIT_2LINE).await?;
        self.delay.delay_ms(SETTLE_MS).await;
        self.send_command(cmd::DISPLAY_OFF).await?;
        self.delay.delay_ms(SETTLE_MS).await;
        self.send_command(cmd::CLEAR_DISPLAY).await?;
        self.delay.delay_ms(CLEAR_SETTLE_MS).await;
        self.send_command(cmd::ENTRY_MODE_INCREMENT).await?;
        self.delay.delay_ms(SETTLE_MS).await;
        self.send_command(cmd::DISPLAY_ON).await
    }

    /// Home the cursor to row 0 and fill the row with spaces.
    ///
    /// Row 0 only, as in the blocking driver; combine with
    /// [`set_cursor`](Self::set_cursor) to blank row 1.
    pub async fn clear(&mut self) -> Result<(), I2C::Error> {
        self.send_command(cmd::ROW0_BASE).await?;
        for _ in 0..COLS {
            self.send_data(b' ').await?;
        }
        Ok(())
    }

    /// Move the cursor to `row` (0 or 1), `col` (0..16).
    ///
    /// Rows outside {0, 1} behave as raw column addressing.
    pub async fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), I2C::Error> {
        let address = match row {
            0 => cmd::ROW0_BASE | col,
            1 => cmd::ROW1_BASE | col,
            _ => col,
        };
        self.send_command(address).await
    }

    /// Render each byte of `text` in order at the advancing cursor.
    pub async fn write_text(&mut self, text: &str) -> Result<(), I2C::Error> {
        for &byte in text.as_bytes() {
            self.send_data(byte).await?;
        }
        Ok(())
    }

    /// Shift the visible window one position in `direction`.
    pub async fn scroll(&mut self, direction: ScrollDirection) -> Result<(), I2C::Error> {
        let command = match direction {
            ScrollDirection::Left => cmd::SHIFT_LEFT,
            ScrollDirection::Right => cmd::SHIFT_RIGHT,
        };
        self.send_command(command).await
    }

    /// Shift the visible window one position left.
    pub async fn scroll_left(&mut self) -> Result<(), I2C::Error> {
        self.scroll(ScrollDirection::Left).await
    }

    /// Shift the visible window one position right.
    pub async fn scroll_right(&mut self) -> Result<(), I2C::Error> {
        self.scroll(ScrollDirection::Right).await
    }

    /// Switch the backlight and make the change effective immediately.
    pub async fn set_backlight(&mut self, on: bool) -> Result<(), I2C::Error> {
        self.config.backlight = on;
        let ctl = if on { frame::BACKLIGHT } else { 0 };
        self.i2c.write(self.config.address, &[ctl]).await
    }
}
