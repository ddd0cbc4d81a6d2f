//! HD44780 display data RAM model
//!
//! Interprets instruction and data bytes the way a 2-line HD44780 does:
//! two 40-byte DDRAM lines at 0x00 and 0x40, an address counter that the
//! entry mode advances after every data write, and cursor-shift
//! instructions that move it by one. Only the first 16 columns of each
//! line are visible. Display shift, CGRAM contents and the busy flag are
//! not modelled.

use heapless::String;
use rangewatch_core::traits::display::{INIT_SEQUENCE, ROW_STRIDE};
use rangewatch_core::traits::CharacterDisplay;

/// Number of character rows on the display
pub const SCREEN_ROWS: usize = 2;

/// Number of visible columns per row
pub const SCREEN_COLS: usize = 16;

/// DDRAM bytes per row
pub const DDRAM_COLS: usize = 40;

/// Where data writes land
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Ddram,
    Cgram,
}

/// Screen model for a 2x16 HD44780
#[derive(Clone)]
pub struct CharacterScreen {
    ddram: [[u8; DDRAM_COLS]; SCREEN_ROWS],
    /// Address counter as (row, col)
    cursor: (usize, usize),
    /// Entry mode I/D bit
    increment: bool,
    /// Display control D bit
    display_on: bool,
    target: Target,
    /// Whether a byte changed since the last `mark_clean`
    dirty: bool,
}

impl Default for CharacterScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterScreen {
    /// Create a blank screen in the controller's reset state
    pub fn new() -> Self {
        Self {
            ddram: [[b' '; DDRAM_COLS]; SCREEN_ROWS],
            cursor: (0, 0),
            increment: true,
            display_on: false,
            target: Target::Ddram,
            dirty: true,
        }
    }

    /// Apply one instruction byte
    pub fn command(&mut self, command: u8) {
        match command.leading_zeros() {
            // Set DDRAM address
            0 => {
                let address = command & 0x7F;
                let row = usize::from(address >= ROW_STRIDE);
                let col = usize::from(address - row as u8 * ROW_STRIDE);
                // Addresses past the end of a line are undefined; park at its end
                self.cursor = (row, col.min(DDRAM_COLS - 1));
                self.target = Target::Ddram;
            }
            // Set CGRAM address
            1 => self.target = Target::Cgram,
            // Function set
            2 => {}
            // Cursor or display shift
            3 => {
                let display_shift = command & 0x08 != 0;
                if !display_shift {
                    if command & 0x04 != 0 {
                        self.advance();
                    } else {
                        self.retreat();
                    }
                }
            }
            // Display on/off control
            4 => self.display_on = command & 0x04 != 0,
            // Entry mode set
            5 => self.increment = command & 0x02 != 0,
            // Return home
            6 => {
                self.cursor = (0, 0);
                self.target = Target::Ddram;
            }
            // Clear display
            7 => self.clear(),
            _ => {}
        }
    }

    /// Write one character code at the address counter
    pub fn data(&mut self, data: u8) {
        if self.target == Target::Cgram {
            return;
        }
        let (row, col) = self.cursor;
        self.ddram[row][col] = data;
        self.dirty = true;
        if self.increment {
            self.advance();
        } else {
            self.retreat();
        }
    }

    /// Blank both lines and home the cursor
    pub fn clear(&mut self) {
        self.ddram = [[b' '; DDRAM_COLS]; SCREEN_ROWS];
        self.cursor = (0, 0);
        self.increment = true;
        self.target = Target::Ddram;
        self.dirty = true;
    }

    // Line 0 runs into line 1 and line 1 wraps back to line 0
    fn advance(&mut self) {
        let (row, col) = self.cursor;
        self.cursor = if col + 1 < DDRAM_COLS {
            (row, col + 1)
        } else {
            ((row + 1) % SCREEN_ROWS, 0)
        };
    }

    fn retreat(&mut self) {
        let (row, col) = self.cursor;
        self.cursor = if col > 0 {
            (row, col - 1)
        } else {
            ((row + SCREEN_ROWS - 1) % SCREEN_ROWS, DDRAM_COLS - 1)
        };
    }

    /// Visible text of a row
    ///
    /// Codes outside printable ASCII show as `?`.
    pub fn row(&self, row: usize) -> Option<String<SCREEN_COLS>> {
        let line = self.ddram.get(row)?;
        let mut text = String::new();
        for &byte in &line[..SCREEN_COLS] {
            let c = if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '?'
            };
            let _ = text.push(c);
        }
        Some(text)
    }

    /// Raw DDRAM byte at a row/column
    pub fn byte_at(&self, row: usize, col: usize) -> Option<u8> {
        self.ddram.get(row)?.get(col).copied()
    }

    /// Address counter as (row, col)
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Check if the display has been switched on
    pub fn is_display_on(&self) -> bool {
        self.display_on
    }

    /// Check if the content changed since the last `mark_clean`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after logging)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl CharacterDisplay for CharacterScreen {
    fn initialize(&mut self) {
        for command in INIT_SEQUENCE {
            self.command(command);
        }
    }

    fn write_command(&mut self, command: u8) {
        self.command(command);
    }

    fn write_data(&mut self, data: u8) {
        self.data(data);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CharacterScreen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for row in 0..SCREEN_ROWS {
            if row > 0 {
                defmt::write!(f, " | ");
            }
            if let Some(text) = self.row(row) {
                defmt::write!(f, "{}", text.as_str());
            }
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangewatch_core::traits::display::cmd;
    use rangewatch_core::traits::CharacterDisplayExt;

    fn screen() -> CharacterScreen {
        let mut screen = CharacterScreen::new();
        screen.initialize();
        screen
    }

    #[test]
    fn test_initialize() {
        let screen = screen();
        assert!(screen.is_display_on());
        assert_eq!(screen.cursor(), (0, 0));
        assert_eq!(screen.row(0).unwrap(), "                ");
    }

    #[test]
    fn test_write_at_address() {
        let mut screen = screen();
        screen.set_cursor(1, 14);
        screen.write_string(b"56");
        assert_eq!(screen.row(1).unwrap(), "              56");
        assert_eq!(screen.cursor(), (1, 16));
    }

    #[test]
    fn test_cursor_shift() {
        let mut screen = screen();
        screen.set_cursor(0, 1);
        screen.write_data(b'3');
        screen.write_command(cmd::CURSOR_RIGHT);
        screen.write_command(cmd::CURSOR_LEFT);
        screen.write_data(b'0');
        assert_eq!(screen.row(0).unwrap(), " 30             ");
    }

    #[test]
    fn test_overwrite_with_shift_back() {
        let mut screen = screen();
        screen.set_cursor(0, 1);
        screen.write_string(b"Alert");
        for _ in 0..5 {
            screen.write_command(cmd::CURSOR_LEFT);
        }
        screen.write_string(b"  cm ");
        assert_eq!(screen.row(0).unwrap(), "   cm           ");
    }

    #[test]
    fn test_line_wrap() {
        let mut screen = screen();
        screen.set_cursor(0, 39);
        screen.write_string(b"xy");
        assert_eq!(screen.byte_at(0, 39), Some(b'x'));
        assert_eq!(screen.byte_at(1, 0), Some(b'y'));

        screen.set_cursor(0, 0);
        screen.write_command(cmd::CURSOR_LEFT);
        assert_eq!(screen.cursor(), (1, 39));
    }

    #[test]
    fn test_clear() {
        let mut screen = screen();
        screen.write_string(b"hello");
        screen.mark_clean();
        screen.write_command(cmd::CLEAR);
        assert!(screen.is_dirty());
        assert_eq!(screen.row(0).unwrap(), "                ");
        assert_eq!(screen.cursor(), (0, 0));
    }

    #[test]
    fn test_cgram_writes_skip_ddram() {
        let mut screen = screen();
        screen.write_command(0x40);
        screen.write_data(0x1F);
        assert_eq!(screen.byte_at(0, 0), Some(b' '));

        screen.set_cursor(0, 0);
        screen.write_data(0x01);
        assert_eq!(screen.row(0).unwrap(), "?               ");
    }

    #[test]
    fn test_out_of_range_row() {
        assert!(screen().row(2).is_none());
        assert_eq!(screen().byte_at(0, DDRAM_COLS), None);
    }
}
