//! Character display driver trait
//!
//! Models write-only character-cell modules (HD44780 and friends): the
//! controller owns the visible surface and the true cursor position, the
//! driver only emits commands and character data. There is no read-back
//! path, so every operation is fire-and-forget with the transport's own
//! timeout as the only bound.

/// Direction for a display-window shift.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    /// Shift the visible window one position to the left.
    Left,
    /// Shift the visible window one position to the right.
    Right,
}

/// Trait for write-only character displays
///
/// Implementations keep no mirror of the display contents; the physical
/// controller holds all state. A failed bus transfer leaves the display
/// showing stale or garbled content with no diagnostic - implementations
/// surface the transport error and nothing more.
pub trait CharDisplay {
    /// Error type for display operations (typically the bus error)
    type Error;

    /// Run the controller's power-on reset and configuration handshake.
    ///
    /// Call once at startup, before any other operation.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Clear display content and return the cursor to the top-left cell.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor to the given row and column.
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error>;

    /// Render each byte of `text` at the advancing cursor.
    ///
    /// No wrapping or bounds checking; writes past the last column follow
    /// the controller's own address-overflow behavior.
    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Shift the whole visible window one position in `direction`.
    fn scroll(&mut self, direction: ScrollDirection) -> Result<(), Self::Error>;
}

/// Helper trait for common display compositions
pub trait CharDisplayExt: CharDisplay {
    /// Position the cursor, then render `text` from there.
    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), Self::Error> {
        self.set_cursor(row, col)?;
        self.write_text(text)
    }
}

// Blanket implementation for all CharDisplay types
impl<T: CharDisplay> CharDisplayExt for T {}
