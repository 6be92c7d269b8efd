//! UI dimensions.

use strata_typed_buf::impl_struct_codec;

impl_struct_codec! {
    /// One UI axis as a fraction of the parent plus a pixel offset.
    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    pub struct UDim as "UDim" {
        scale: f64,
        offset: i64,
    }
}

impl_struct_codec! {
    /// Two UI axes.
    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    pub struct UDim2 as "UDim2" {
        x_scale: f64,
        x_offset: i64,
        y_scale: f64,
        y_offset: i64,
    }
}

impl UDim2 {
    /// Constructs from a pair of [`UDim`]s.
    pub fn from_udims(x: UDim, y: UDim) -> Self {
        Self::new(x.scale(), x.offset(), y.scale(), y.offset())
    }

    /// Gets the X axis.
    pub fn x(&self) -> UDim {
        UDim::new(self.x_scale, self.x_offset)
    }

    /// Gets the Y axis.
    pub fn y(&self) -> UDim {
        UDim::new(self.y_scale, self.y_offset)
    }
}
