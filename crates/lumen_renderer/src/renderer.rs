//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Fixed-depth path truncation (no Russian roulette)
//! - Sky gradient or solid background
//! - Anti-aliasing via jittered multi-sampling

use std::time::Instant;

use crate::scheduler::{self, Schedule};
use crate::material::diffuse_direction;
use crate::sampling::pixel_seed;
use crate::{Camera, Color, Hittable, ImageBuffer, Ray, RenderResult};
use lumen_math::Interval;
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Smallest accepted hit distance, keeps bounced rays off their own surface.
pub const HIT_EPSILON: f64 = 0.001;

/// Energy kept per bounce on surfaces without a material.
pub const DEFAULT_BOUNCE_ATTENUATION: f64 = 0.7;

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Background {
    /// Vertical gradient from white at the horizon to sky blue at the zenith
    #[default]
    Sky,
    /// A constant color
    Solid(Color),
}

impl Background {
    /// Radiance arriving along `ray` from outside the scene.
    pub fn radiance(&self, ray: &Ray) -> Color {
        match self {
            Background::Sky => sky_gradient(ray),
            Background::Solid(color) => *color,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Number of worker threads
    pub threads: u32,
    /// How rows are distributed over the workers
    pub schedule: Schedule,
    /// Radiance for rays that escape the scene
    pub background: Background,
    /// Base seed for the per-pixel sample streams; random when `None`
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism()
                .map(|n| n.get() as u32)
                .unwrap_or(1),
            schedule: Schedule::Dynamic,
            background: Background::Sky,
            seed: None,
        }
    }
}

/// Compute the radiance carried back along a ray.
///
/// Walks the path iteratively, carrying the accumulated attenuation,
/// until it escapes, is absorbed or runs out of depth.
pub fn radiance(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(HIT_EPSILON, f64::INFINITY)) else {
            return throughput * config.background.radiance(&ray);
        };

        match rec.material {
            Some(material) => match material.scatter(&ray, &rec, rng) {
                Some(result) => {
                    throughput *= result.attenuation;
                    ray = result.scattered;
                }
                None => return throughput * material.emitted(&ray, &rec),
            },
            None => {
                throughput *= DEFAULT_BOUNCE_ATTENUATION;
                ray = Ray::new(rec.p, diffuse_direction(rec.normal, rng));
            }
        }
    }

    // Path budget exhausted
    Color::ZERO
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
///
/// The sample stream is seeded from `(seed, x, y)`, so a pixel's value does
/// not depend on which worker renders it or in what order.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    seed: u64,
) -> Color {
    if camera.samples_per_pixel == 0 {
        return Color::ZERO;
    }

    let mut rng = SmallRng::seed_from_u64(pixel_seed(seed, x, y));
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(x, y, &mut rng);
        pixel_color += radiance(&ray, world, camera.max_depth, config, &mut rng);
    }

    // Average the samples
    pixel_color / camera.samples_per_pixel as f64
}

/// Render the entire scene to an image buffer.
///
/// Initializes a copy of `camera`, then fans the image out over
/// `config.threads` workers according to `config.schedule` and joins them.
/// Returns `Ok(None)` without rendering when there are no threads or no
/// samples to take.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> RenderResult<Option<ImageBuffer>> {
    let mut camera = camera.clone();
    camera.initialize()?;

    if config.threads == 0 || camera.samples_per_pixel == 0 {
        log::warn!(
            "Nothing to render: {} threads, {} samples per pixel",
            config.threads,
            camera.samples_per_pixel
        );
        return Ok(None);
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    log::debug!("Render seed: {}", seed);
    log::info!(
        "Rendering {}x{} @ {} spp, depth {}, {} threads ({:?})",
        camera.image_width,
        camera.image_height,
        camera.samples_per_pixel,
        camera.max_depth,
        config.threads,
        config.schedule
    );

    let start = Instant::now();
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    scheduler::run(&camera, world, config, seed, &mut image)?;
    log::info!("Rendered in {:?}", start.elapsed());

    Ok(Some(image))
}
