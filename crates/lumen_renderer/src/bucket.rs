//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon.

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::progress::Progress;
use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, ImageBuffer, RenderConfig};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Generate buckets for an image, sorted center-out.
///
/// Edge buckets are cropped to the image. A `bucket_size` of 0 is treated as 1.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
            x = x.saturating_add(bucket_size);
        }
        y = y.saturating_add(bucket_size);
    }

    sort_spiral(&mut buckets, width, height);

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center. Stable, so ties keep scan order.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render a single bucket. Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(
                camera,
                world,
                bucket.x + local_x,
                bucket.y + local_y,
                config,
                seed,
            );
            pixels.push(color);
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into their place in `image`.
    pub fn blit(&self, image: &mut ImageBuffer) {
        let width = self.bucket.width as usize;
        if width == 0 {
            return;
        }

        for (local_y, line) in self.pixels.chunks(width).enumerate() {
            let start = (self.bucket.y as usize + local_y) * image.width as usize
                + self.bucket.x as usize;
            image.pixels[start..start + width].copy_from_slice(line);
        }
    }
}

/// Render every bucket on `pool` and assemble them into `image`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn render_tiled(
    pool: &ThreadPool,
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
    bucket_size: u32,
    image: &mut ImageBuffer,
    progress: &Progress,
) {
    let buckets = generate_buckets(image.width, image.height, bucket_size);
    log::debug!(
        "Rendering {} buckets of up to {}px",
        buckets.len(),
        bucket_size.max(1)
    );

    let results: Vec<BucketResult> = pool.install(|| {
        buckets
            .par_iter()
            .map(|bucket| {
                let pixels = render_bucket(bucket, camera, world, config, seed);
                progress.advance(u64::from(bucket.pixel_count()));
                BucketResult::new(*bucket, pixels)
            })
            .collect()
    });

    for result in &results {
        result.blit(image);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use lumen_math::Point3;
    use std::sync::Arc;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 100, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 100);
        assert!(buckets.iter().all(|b| b.x + b.width <= 100 && b.y + b.height <= 100));
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);

        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.index, i);
        }
    }

    #[test]
    fn test_zero_bucket_size_is_one_pixel() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
        assert!(buckets.iter().all(|b| b.pixel_count() == 1));
    }

    #[test]
    fn test_buckets_cover_every_pixel_once() {
        let (width, height) = (37, 23);
        let mut hits = vec![0u32; (width * height) as usize];
        for bucket in generate_buckets(width, height, 8) {
            for y in bucket.y..bucket.y + bucket.height {
                for x in bucket.x..bucket.x + bucket.width {
                    hits[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(hits.iter().all(|&n| n == 1));
    }

    #[test]
    fn test_blit_places_pixels() {
        let mut image = ImageBuffer::new(4, 3);
        let bucket = Bucket::new(1, 1, 2, 2, 0);
        let pixels = (0..4).map(|i| Color::splat(i as f64 + 1.0)).collect();
        BucketResult::new(bucket, pixels).blit(&mut image);

        assert_eq!(image.get(1, 1), Color::splat(1.0));
        assert_eq!(image.get(2, 1), Color::splat(2.0));
        assert_eq!(image.get(1, 2), Color::splat(3.0));
        assert_eq!(image.get(2, 2), Color::splat(4.0));
        assert_eq!(image.get(0, 0), Color::ZERO);
        assert_eq!(image.get(3, 2), Color::ZERO);
    }

    #[test]
    fn test_render_bucket_matches_render_pixel() {
        let mut camera = Camera::new().with_resolution(8, 6).with_quality(2, 3);
        camera.initialize().unwrap();

        let world = Sphere::new(
            Point3::new(0.0, 0.0, 1.0),
            0.5,
            Arc::new(Lambertian::new(Color::splat(0.5))),
        );
        let config = RenderConfig {
            threads: 1,
            ..Default::default()
        };

        let bucket = Bucket::new(2, 1, 3, 2, 0);
        let pixels = render_bucket(&bucket, &camera, &world, &config, 7);
        assert_eq!(pixels.len(), 6);
        assert_eq!(pixels[4], render_pixel(&camera, &world, 3, 2, &config, 7));
    }
}
