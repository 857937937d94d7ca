//! RGB colour values and hex rendering

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit RGB colour triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Render as a `#rrggbb` hex colour code
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel values as a real-valued vector
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.r as f64, self.g as f64, self.b as f64)
    }

    /// Round a real-valued colour to bytes, clipping each channel to [0, 255]
    pub fn from_vector_clipped(v: &Vector3<f64>) -> Self {
        Self {
            r: clip_channel(v.x),
            g: clip_channel(v.y),
            b: clip_channel(v.z),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

fn clip_channel(x: f64) -> u8 {
    x.clamp(0.0, 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rendering() {
        assert_eq!(Rgb::new(0, 0, 0).to_hex(), "#000000");
        assert_eq!(Rgb::new(255, 191, 104).to_hex(), "#ffbf68");
        assert_eq!(Rgb::new(90, 67, 100).to_string(), "#5a4364");
    }

    #[test]
    fn test_vector_round_trip() {
        let rgb = Rgb::new(204, 119, 34);
        assert_eq!(Rgb::from_vector_clipped(&rgb.to_vector()), rgb);
    }

    #[test]
    fn test_clipping_out_of_range_channels() {
        let clipped = Rgb::from_vector_clipped(&Vector3::new(300.0, -12.5, 127.6));
        assert_eq!(clipped, Rgb::new(255, 0, 128));
    }
}
