//! Plugin codecs for the host engine's composite value types.
//!
//! Each type here is a flat run of scalars registered under its own name.
//! [`standard_registry`] builds a registry with all of them plus the numeric
//! primitives, using the ids of the wire-format table.

mod color;
mod geometry;
mod misc;
mod registry;
mod udim;

pub use color::{BrickColor, Color3};
pub use geometry::{CFrame, Vector2, Vector2int16, Vector3, Vector3int16};
pub use misc::{DateTime, TweenInfo};
pub use registry::{STANDARD_TYPES, register_standard_types, standard_registry};
pub use udim::{UDim, UDim2};
