//! Common types shared by the producer, the queue and the consumer
//!
//! A [`Color`] is the item that flows through the queue: three independent
//! lamp bits packed into one byte.

use core::fmt;

/// One of the three lamps of the RGB LED
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
#[repr(u8)]
pub enum Lamp {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Lamp {
    /// All lamps, in bit order
    pub const ALL: [Lamp; 3] = [Lamp::Red, Lamp::Green, Lamp::Blue];

    /// Bit mask of this lamp inside a [`Color`]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Lamp::Red => "red",
            Lamp::Green => "green",
            Lamp::Blue => "blue",
        }
    }
}

/// 3-bit lamp combination: bit 0 red, bit 1 green, bit 2 blue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "rp2040", derive(defmt::Format))]
pub struct Color(u8);

impl Color {
    pub const BITS_MASK: u8 = 0b111;
    pub const OFF: Color = Color(0);
    pub const WHITE: Color = Color(Self::BITS_MASK);

    /// Create a color, rejecting values with bits above the three lamps
    pub const fn new(bits: u8) -> Option<Self> {
        if bits & !Self::BITS_MASK == 0 {
            Some(Color(bits))
        } else {
            None
        }
    }

    /// Create a color from the low three bits of `bits`
    pub const fn from_bits(bits: u8) -> Self {
        Color(bits & Self::BITS_MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `lamp` is lit in this color
    pub const fn is_lit(self, lamp: Lamp) -> bool {
        self.0 & lamp.mask() != 0
    }

    /// Lamp states in [`Lamp::ALL`] order
    pub fn lamp_states(self) -> [(Lamp, bool); 3] {
        Lamp::ALL.map(|lamp| (lamp, self.is_lit(lamp)))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = if self.is_lit(Lamp::Red) { 'R' } else { '-' };
        let g = if self.is_lit(Lamp::Green) { 'G' } else { '-' };
        let b = if self.is_lit(Lamp::Blue) { 'B' } else { '-' };
        write!(f, "{}{}{} ({})", r, g, b, self.0)
    }
}

/// Application version information
pub struct AppVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl AppVersion {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self { major, minor, patch }
    }

    pub fn as_string(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

/// Current application version
pub const APP_VERSION: AppVersion = AppVersion::new(0, 1, 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_all_colors() {
        for bits in 0u8..8 {
            let color = Color::new(bits).unwrap();
            assert_eq!(color.is_lit(Lamp::Red), bits & 0b001 != 0);
            assert_eq!(color.is_lit(Lamp::Green), bits & 0b010 != 0);
            assert_eq!(color.is_lit(Lamp::Blue), bits & 0b100 != 0);
        }
    }

    #[test]
    fn magenta_is_red_and_blue() {
        let color = Color::from_bits(5);
        assert_eq!(
            color.lamp_states(),
            [(Lamp::Red, true), (Lamp::Green, false), (Lamp::Blue, true)]
        );
    }

    #[test]
    fn new_rejects_wide_values() {
        assert_eq!(Color::new(8), None);
        assert_eq!(Color::new(0xFF), None);
        assert_eq!(Color::new(7), Some(Color::WHITE));
    }

    #[test]
    fn from_bits_masks_to_three_bits() {
        assert_eq!(Color::from_bits(0b1010_1101).bits(), 0b101);
    }

    #[test]
    fn display_shows_lamps() {
        assert_eq!(format!("{}", Color::from_bits(3)), "RG- (3)");
        assert_eq!(format!("{}", Color::OFF), "--- (0)");
    }

    #[test]
    fn lamp_names_follow_bit_order() {
        let names: [&str; 3] = Lamp::ALL.map(Lamp::name);
        assert_eq!(names, ["red", "green", "blue"]);
    }
}
