//! Colors.

use strata_typed_buf::impl_struct_codec;

impl_struct_codec! {
    /// RGB color with components nominally in `0.0..=1.0`.
    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    pub struct Color3 as "Color3" {
        r: f64,
        g: f64,
        b: f64,
    }
}

impl Color3 {
    /// Constructs a color from 8 bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }
}

impl_struct_codec! {
    /// Palette color, carried on the wire as its RGB value.
    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    pub struct BrickColor as "BrickColor" {
        r: f64,
        g: f64,
        b: f64,
    }
}

impl BrickColor {
    /// Gets the color this brick color displays as.
    pub fn color(&self) -> Color3 {
        Color3::new(self.r, self.g, self.b)
    }
}

impl From<Color3> for BrickColor {
    fn from(c: Color3) -> Self {
        Self::new(c.r(), c.g(), c.b())
    }
}
