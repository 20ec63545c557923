// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Double-precision vector used for directions, offsets and colors.
pub type Vec3 = glam::DVec3;

/// A position in world space. Same representation as [`Vec3`].
pub type Point3 = glam::DVec3;
