//! Vectors and coordinate frames.

use strata_typed_buf::impl_struct_codec;

impl_struct_codec! {
    /// 2D vector with double precision components.
    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    pub struct Vector2 as "Vector2" {
        x: f64,
        y: f64,
    }
}

impl_struct_codec! {
    /// 3D vector with double precision components.
    #[derive(Copy, Clone, Debug, Default, PartialEq)]
    pub struct Vector3 as "Vector3" {
        x: f64,
        y: f64,
        z: f64,
    }
}

impl_struct_codec! {
    /// 2D vector with 16 bit integer components.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Vector2int16 as "Vector2int16" {
        x: i16,
        y: i16,
    }
}

impl_struct_codec! {
    /// 3D vector with 16 bit integer components.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Vector3int16 as "Vector3int16" {
        x: i16,
        y: i16,
        z: i16,
    }
}

impl_struct_codec! {
    /// Position plus a row-major 3x3 rotation matrix.
    #[derive(Copy, Clone, Debug, PartialEq)]
    pub struct CFrame as "CFrame" {
        x: f64,
        y: f64,
        z: f64,
        r00: f64,
        r01: f64,
        r02: f64,
        r10: f64,
        r11: f64,
        r12: f64,
        r20: f64,
        r21: f64,
        r22: f64,
    }
}

impl CFrame {
    /// Constructs a frame at a position with no rotation.
    pub fn from_position(pos: Vector3) -> Self {
        Self::new(
            pos.x(),
            pos.y(),
            pos.z(),
            1.0,
            0.0,
            0.0,
            0.0,
            1.0,
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Gets the position component.
    pub fn position(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}
