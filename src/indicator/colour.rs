//! Indicator colours.
//!
//! The light has three independent binary channels. Only the combinations
//! listed here are ever driven; anything else read back from a latch is
//! rejected by [`Colour::from_bits`].

/// Colour as a red/green/blue channel bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Colour {
    #[default]
    Off = 0b000,
    Red = 0b001,
    Green = 0b010,
    Blue = 0b100,
}

impl Colour {
    /// Colour shown while no OCCUPIED/FREE condition has been reported.
    pub const NEUTRAL: Colour = Colour::Blue;

    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn from_bits(bits: u8) -> Option<Colour> {
        match bits {
            0b000 => Some(Self::Off),
            0b001 => Some(Self::Red),
            0b010 => Some(Self::Green),
            0b100 => Some(Self::Blue),
            _ => None,
        }
    }

    /// Channel levels as `[red, green, blue]`.
    pub const fn channels(self) -> [bool; 3] {
        let b = self.bits();
        [b & 0b001 != 0, b & 0b010 != 0, b & 0b100 != 0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_follow_bits() {
        assert_eq!(Colour::Off.channels(), [false, false, false]);
        assert_eq!(Colour::Red.channels(), [true, false, false]);
        assert_eq!(Colour::Green.channels(), [false, true, false]);
        assert_eq!(Colour::Blue.channels(), [false, false, true]);
    }

    #[test]
    fn mixed_bits_are_not_a_colour() {
        assert_eq!(Colour::from_bits(0b011), None);
        assert_eq!(Colour::from_bits(0b111), None);
        assert_eq!(Colour::from_bits(Colour::Green.bits()), Some(Colour::Green));
    }
}
