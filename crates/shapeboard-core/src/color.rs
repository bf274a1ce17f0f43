//! 24-bit RGB color with hex-string serialization.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid hex color: {0:?}")]
pub struct ParseColorError(pub String);

/// A 24-bit RGB color.
///
/// Formats as `#rrggbb`; parsing also accepts the `#rgb` shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pick a fill color for a newly placed shape.
    ///
    /// Uses a counter + hash approach (splitmix-style) mixed with the clock
    /// so consecutive shapes get distinct colors without an RNG dependency.
    pub fn random() -> Self {
        use std::sync::atomic::{AtomicU32, Ordering};

        static COLOR_COUNTER: AtomicU32 = AtomicU32::new(1);

        let counter = COLOR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0);

        let mut x = counter.wrapping_mul(0x9E37_79B9) ^ nanos;
        x ^= x >> 16;
        x = x.wrapping_mul(0x85EB_CA6B);
        x ^= x >> 13;
        x = x.wrapping_mul(0xC2B2_AE35);
        x ^= x >> 16;

        Self::new((x >> 16) as u8, (x >> 8) as u8, x as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let parse =
            |chunk: &str| u8::from_str_radix(chunk, 16).map_err(|_| ParseColorError(s.to_string()));

        match hex.len() {
            // Shorthand: each digit doubles (#f80 -> #ff8800)
            3 => {
                let r = parse(&hex[0..1])?;
                let g = parse(&hex[1..2])?;
                let b = parse(&hex[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = parse(&hex[0..2])?;
                let g = parse(&hex[2..4])?;
                let b = parse(&hex[4..6])?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_hex() {
        assert_eq!("#a3f2c1".parse::<Rgb>().unwrap(), Rgb::new(0xa3, 0xf2, 0xc1));
        assert_eq!("ff0000".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_parse_shorthand() {
        assert_eq!("#f80".parse::<Rgb>().unwrap(), Rgb::new(0xff, 0x88, 0x00));
        assert_eq!("#000".parse::<Rgb>().unwrap(), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
        assert!("".parse::<Rgb>().is_err());
        assert!("blue".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let color = Rgb::new(0x12, 0xab, 0xef);
        assert_eq!(color.to_string(), "#12abef");
        assert_eq!(color.to_string().parse::<Rgb>().unwrap(), color);
    }

    #[test]
    fn test_random_varies() {
        let a = Rgb::random();
        let b = Rgb::random();
        let c = Rgb::random();
        // Three consecutive draws should not all collide.
        assert!(a != b || b != c);
    }

    #[test]
    fn test_serde_as_string() {
        let color = Rgb::new(0xa3, 0xf2, 0xc1);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#a3f2c1\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }
}
