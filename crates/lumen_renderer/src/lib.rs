//! Lumen renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over spheres, triangles, quads and boxes with
//! diffuse, checkered, metal, glass and emissive materials. Rendering fans
//! out over a rayon pool using one of several [`Schedule`]s; each pixel
//! draws from its own seeded stream, so a fixed seed gives the same image
//! regardless of schedule or thread count.

mod bucket;
mod buffer;
mod camera;
mod cuboid;
mod error;
mod hittable;
mod material;
mod progress;
mod quad;
mod renderer;
mod sampling;
mod scheduler;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult};
pub use buffer::{color_to_rgba, linear_to_gamma, ImageBuffer};
pub use camera::Camera;
pub use cuboid::Cuboid;
pub use error::{RenderError, RenderResult};
pub use hittable::{Group, HitRecord, Hittable};
pub use material::{
    reflect, refract, CheckeredLambertian, Color, Dielectric, Lambertian, Light, Material, Metal,
    ScatterResult,
};
pub use progress::Progress;
pub use quad::Quad;
pub use renderer::{
    radiance, render, render_pixel, Background, RenderConfig, DEFAULT_BOUNCE_ATTENUATION,
    HIT_EPSILON,
};
pub use scheduler::{
    batch_ranges, build_pool, dispatch_batched, dispatch_dynamic, Schedule, DEFAULT_BUCKET_SIZE,
};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types used throughout the public API
pub use lumen_math::{Interval, Point3, Ray, Vec3};
