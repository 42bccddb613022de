//! Colour values and colour-space helpers.
//!
//! [`Color`] is the exact 8-bit RGB value every reduction produces. [`Hsl`]
//! exists only as a sort key: frames are ordered by hue when picking the
//! median and when laying out dominant-colour bands.
//!
//! # Example
//!
//! ```
//! use spectrafilm::Color;
//!
//! let orange = Color::new(255, 128, 0);
//! assert_eq!(orange.hex(), "FF8000");
//! assert_eq!(orange.to_string(), "#FF8000");
//! assert!(orange.to_hsl().hue < Color::new(0, 0, 255).to_hsl().hue);
//! ```

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};

use image::{Rgb, Rgba};

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

/// Hue, saturation and lightness, each normalised to `0.0..=1.0`.
///
/// `hue` is always in `0.0..1.0`. Achromatic colours have hue and
/// saturation of zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue as a fraction of a full turn.
    pub hue: f64,
    /// Saturation.
    pub saturation: f64,
    /// Lightness.
    pub lightness: f64,
}

impl Color {
    /// Pure black.
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Color = Color::new(255, 255, 255);

    /// Create a colour from its three channels.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// The channels as a `[red, green, blue]` array.
    pub const fn channels(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Six uppercase hex digits, `RRGGBB`, with no prefix and no alpha.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Convert to hue/saturation/lightness.
    ///
    /// Channels are normalised to `0.0..=1.0` first. When every channel is
    /// equal the colour is grey: hue and saturation are zero and no division
    /// takes place.
    pub fn to_hsl(self) -> Hsl {
        let red = f64::from(self.red) / 255.0;
        let green = f64::from(self.green) / 255.0;
        let blue = f64::from(self.blue) / 255.0;

        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let lightness = (max + min) / 2.0;

        let delta = max - min;
        if delta == 0.0 {
            return Hsl {
                hue: 0.0,
                saturation: 0.0,
                lightness,
            };
        }

        let saturation = if lightness < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        let mut hue = if red == max {
            (green - blue) / delta / 6.0
        } else if green == max {
            (2.0 + (blue - red) / delta) / 6.0
        } else {
            (4.0 + (red - green) / delta) / 6.0
        };

        if hue < 0.0 {
            hue += 1.0;
        } else if hue >= 1.0 {
            hue -= 1.0;
        }

        Hsl {
            hue,
            saturation,
            lightness,
        }
    }
}

/// Order two colours by ascending hue.
///
/// Colours with equal hue compare as [`Ordering::Equal`]; which one a sort
/// places first is left to the sort (callers here use stable sorts, so
/// input order survives), and is not part of the contract.
pub fn compare_by_hue(a: &Color, b: &Color) -> Ordering {
    a.to_hsl().hue.total_cmp(&b.to_hsl().hue)
}

/// Sort colours in place by ascending hue, keeping input order for ties.
pub fn sort_by_hue(colors: &mut [Color]) {
    // Hue is computed once per element rather than once per comparison.
    colors.sort_by_cached_key(|color| HueKey(color.to_hsl().hue));
}

struct HueKey(f64);

impl PartialEq for HueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HueKey {}

impl PartialOrd for HueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{}", self.hex())
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        Self::from(pixel.0)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb(color.channels())
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba([color.red, color.green, color.blue, u8::MAX])
    }
}
