//! Digital pin abstractions
//!
//! Trigger lines, LCD bus lines and alarm outputs are [`OutputPin`]s; echo
//! lines are [`InputPin`]s. Pin access is treated as infallible: a ranging
//! display has no way to report an I/O fault, so implementations swallow
//! whatever error the underlying HAL produces.

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Level for a boolean "is high" flag
    pub const fn from_high(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }

    /// Check if this is the high level
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

/// Digital output line
pub trait OutputPin {
    /// Drive the line to `level`
    fn set_level(&mut self, level: Level);

    /// Level the line is currently driven to
    fn level(&self) -> Level;

    /// Drive the line high
    fn set_high(&mut self) {
        self.set_level(Level::High);
    }

    /// Drive the line low
    fn set_low(&mut self) {
        self.set_level(Level::Low);
    }

    /// Check if the line is currently driven high
    fn is_set_high(&self) -> bool {
        self.level().is_high()
    }
}

/// Digital input line
pub trait InputPin {
    /// Sample the line
    fn level(&self) -> Level;

    /// Check if the line reads high
    fn is_high(&self) -> bool {
        self.level().is_high()
    }

    /// Check if the line reads low
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockOutput {
        level: Level,
    }

    impl OutputPin for MockOutput {
        fn set_level(&mut self, level: Level) {
            self.level = level;
        }

        fn level(&self) -> Level {
            self.level
        }
    }

    struct MockInput(Level);

    impl InputPin for MockInput {
        fn level(&self) -> Level {
            self.0
        }
    }

    #[test]
    fn test_output_helpers() {
        let mut pin = MockOutput { level: Level::Low };
        assert!(!pin.is_set_high());

        pin.set_high();
        assert!(pin.is_set_high());
        assert_eq!(pin.level(), Level::High);

        pin.set_low();
        assert_eq!(pin.level(), Level::Low);
    }

    #[test]
    fn test_input_helpers() {
        assert!(MockInput(Level::High).is_high());
        assert!(MockInput(Level::Low).is_low());
    }

    #[test]
    fn test_level_conversions() {
        assert_eq!(Level::from_high(true), Level::High);
        assert_eq!(Level::from_high(false), Level::Low);
        assert_eq!(Level::default(), Level::Low);
    }
}
