//! Timestamps and tween parameters.

use strata_typed_buf::impl_struct_codec;

impl_struct_codec! {
    /// Point in time as milliseconds since the unix epoch.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
    pub struct DateTime as "DateTime" {
        unix_millis: i64,
    }
}

impl_struct_codec! {
    /// Animation timing parameters.
    ///
    /// Easing style and direction are the host engine's enum ordinals.
    #[derive(Copy, Clone, Debug, PartialEq)]
    pub struct TweenInfo as "TweenInfo" {
        time: f32,
        easing_style: u8,
        easing_direction: u8,
        repeat_count: i32,
        reverses: bool,
        delay_time: f64,
    }
}

impl Default for TweenInfo {
    fn default() -> Self {
        // Matches the host's default: one second, quad style, out direction.
        Self::new(1.0, 3, 1, 0, false, 0.0)
    }
}
