//! Character display driver trait for the HD44780-style LCD

/// HD44780 instruction bytes used by the firmware
pub mod cmd {
    /// Clear display, cursor to address 0
    pub const CLEAR: u8 = 0x01;
    /// Cursor to address 0, undo display shift
    pub const RETURN_HOME: u8 = 0x02;
    /// Entry mode: increment address, no display shift
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON_CURSOR_OFF: u8 = 0x0C;
    /// Move the cursor one position left
    pub const CURSOR_LEFT: u8 = 0x10;
    /// Move the cursor one position right
    pub const CURSOR_RIGHT: u8 = 0x14;
    /// 4-bit interface, 2 lines, 5x7 font
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    /// Set DDRAM address (OR with the address)
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// DDRAM address offset between the two display rows
pub const ROW_STRIDE: u8 = 0x40;

/// Visible columns per row
pub const DISPLAY_COLS: u8 = 16;

/// Power-up instruction sequence (4-bit, 2-line, display on, clear)
pub const INIT_SEQUENCE: [u8; 5] = [
    cmd::RETURN_HOME,
    cmd::FUNCTION_SET_4BIT_2LINE,
    cmd::DISPLAY_ON_CURSOR_OFF,
    cmd::ENTRY_MODE_INCREMENT,
    cmd::CLEAR,
];

/// "Set DDRAM address" command for a row/column position
///
/// Row 0 col 1 is `0x81`, row 1 col 14 is `0xCE`.
pub const fn ddram_address(row: u8, col: u8) -> u8 {
    cmd::SET_DDRAM_ADDR | (row * ROW_STRIDE + col)
}

/// Trait for the character display
///
/// The display is a write-only capability: the core never reads back
/// what is on screen. Every call is expected to block until the
/// controller has accepted the byte, including its settle time.
pub trait CharacterDisplay {
    /// Bring the controller into 4-bit, 2-line, 5x7 mode with a cleared screen
    fn initialize(&mut self);

    /// Send an instruction byte
    fn write_command(&mut self, command: u8);

    /// Send one character code at the current cursor position
    fn write_data(&mut self, data: u8);

    /// Send a run of character codes
    fn write_string(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.write_data(byte);
        }
    }
}

impl<T: CharacterDisplay + ?Sized> CharacterDisplay for &mut T {
    fn initialize(&mut self) {
        (**self).initialize();
    }

    fn write_command(&mut self, command: u8) {
        (**self).write_command(command);
    }

    fn write_data(&mut self, data: u8) {
        (**self).write_data(data);
    }

    fn write_string(&mut self, bytes: &[u8]) {
        (**self).write_string(bytes);
    }
}

/// Cursor positioning helper
pub trait CharacterDisplayExt: CharacterDisplay {
    /// Move the cursor to a row/column position
    fn set_cursor(&mut self, row: u8, col: u8) {
        self.write_command(ddram_address(row, col));
    }
}

// Blanket implementation for all CharacterDisplay types
impl<T: CharacterDisplay> CharacterDisplayExt for T {}
