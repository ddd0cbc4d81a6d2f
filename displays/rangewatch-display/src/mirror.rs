//! Display mirroring

use rangewatch_core::traits::CharacterDisplay;

use crate::screen::CharacterScreen;

/// Forwards every byte to a display and to a [`CharacterScreen`] shadow
pub struct Mirrored<D> {
    inner: D,
    shadow: CharacterScreen,
}

impl<D: CharacterDisplay> Mirrored<D> {
    /// Wrap a display
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            shadow: CharacterScreen::new(),
        }
    }

    /// The shadow screen
    pub fn screen(&self) -> &CharacterScreen {
        &self.shadow
    }

    /// The wrapped display
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Unwrap, dropping the shadow
    pub fn into_inner(self) -> D {
        self.inner
    }

    /// Log the visible rows if anything changed since the last call
    pub fn log_rows(&mut self) {
        if !self.shadow.is_dirty() {
            return;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("{}", self.shadow);
        self.shadow.mark_clean();
    }
}

impl<D: CharacterDisplay> CharacterDisplay for Mirrored<D> {
    fn initialize(&mut self) {
        self.inner.initialize();
        self.shadow.initialize();
    }

    fn write_command(&mut self, command: u8) {
        self.inner.write_command(command);
        self.shadow.command(command);
    }

    fn write_data(&mut self, data: u8) {
        self.inner.write_data(data);
        self.shadow.data(data);
    }
}
