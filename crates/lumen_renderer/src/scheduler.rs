//! Work partitioning across render threads.
//!
//! Every policy hands each worker exclusive `&mut` access to whole rows (or
//! tiles), so the only shared mutable state is the dynamic row queue.

use std::ops::Range;
use std::sync::Mutex;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::bucket::render_tiled;
use crate::progress::Progress;
use crate::renderer::render_pixel;
use crate::{Camera, Color, Hittable, ImageBuffer, RenderConfig, RenderResult};

/// Default bucket size in pixels for [`Schedule::Tiled`].
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// How the image is split between workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Workers repeatedly claim the next unrendered row from a shared queue.
    #[default]
    Dynamic,
    /// Height is cut into one contiguous block of rows per worker, plus a
    /// tail block for the remainder.
    Batched,
    /// Square buckets, rendered center-out on the rayon pool.
    Tiled { bucket_size: u32 },
}

/// Static row partition for `threads` workers.
///
/// Each of the first `threads` ranges holds `height / threads` rows; any
/// remaining rows go to one extra range at the end. `threads` is clamped to
/// `height` so no range is empty.
pub fn batch_ranges(height: u32, threads: u32) -> Vec<Range<u32>> {
    if height == 0 || threads == 0 {
        return Vec::new();
    }

    let threads = threads.min(height);
    let range_size = height / threads;

    let mut ranges: Vec<Range<u32>> = (0..threads)
        .map(|i| i * range_size..(i + 1) * range_size)
        .collect();

    let covered = threads * range_size;
    if covered < height {
        ranges.push(covered..height);
    }

    ranges
}

/// Build a pool of named render threads.
pub fn build_pool(threads: u32) -> RenderResult<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads.max(1) as usize)
        .thread_name(|i| format!("lumen-render-{i}"))
        .build()?;
    Ok(pool)
}

/// Render contiguous row blocks, one spawned task per range.
///
/// `ranges` must tile `0..rows` in order, as produced by [`batch_ranges`].
pub fn dispatch_batched<F>(
    pool: &ThreadPool,
    pixels: &mut [Color],
    width: usize,
    ranges: &[Range<u32>],
    render_row: &F,
) where
    F: Fn(u32, &mut [Color]) + Sync,
{
    if width == 0 {
        return;
    }

    pool.scope(|s| {
        let mut rest = pixels;
        for range in ranges.iter().cloned() {
            let rows = (range.end - range.start) as usize;
            let (block, tail) = std::mem::take(&mut rest).split_at_mut(rows * width);
            rest = tail;

            s.spawn(move |_| {
                for (y, line) in range.zip(block.chunks_mut(width)) {
                    render_row(y, line);
                }
            });
        }
    });
}

/// Render rows claimed one at a time from a shared queue by `workers` tasks.
pub fn dispatch_dynamic<F>(
    pool: &ThreadPool,
    pixels: &mut [Color],
    width: usize,
    workers: u32,
    render_row: &F,
) where
    F: Fn(u32, &mut [Color]) + Sync,
{
    if width == 0 {
        return;
    }

    let queue = Mutex::new(pixels.chunks_mut(width).enumerate());

    pool.scope(|s| {
        for _ in 0..workers {
            s.spawn(|_| loop {
                // Lock is released before the row is rendered
                let claimed = queue.lock().ok().and_then(|mut rows| rows.next());
                match claimed {
                    Some((y, line)) => render_row(y as u32, line),
                    None => break,
                }
            });
        }
    });
}

/// Per-row work shared by the row-based policies.
fn row_renderer<'a>(
    camera: &'a Camera,
    world: &'a dyn Hittable,
    config: &'a RenderConfig,
    seed: u64,
    progress: &'a Progress,
) -> impl Fn(u32, &mut [Color]) + Sync + 'a {
    move |y: u32, line: &mut [Color]| {
        for (x, pixel) in line.iter_mut().enumerate() {
            *pixel = render_pixel(camera, world, x as u32, y, config, seed);
        }
        progress.advance(1);
    }
}

/// Fill `image` using the policy in `config.schedule`.
pub(crate) fn run(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    seed: u64,
    image: &mut ImageBuffer,
) -> RenderResult<()> {
    let width = image.width as usize;

    match config.schedule {
        Schedule::Dynamic => {
            let progress = Progress::new(u64::from(image.height), "rows");
            let render_row = row_renderer(camera, world, config, seed, &progress);
            let pool = build_pool(config.threads)?;
            dispatch_dynamic(&pool, &mut image.pixels, width, config.threads, &render_row);
        }
        Schedule::Batched => {
            let ranges = batch_ranges(image.height, config.threads);
            log::debug!("Row batches: {:?}", ranges);

            let progress = Progress::new(u64::from(image.height), "rows");
            let render_row = row_renderer(camera, world, config, seed, &progress);
            let pool = build_pool(ranges.len() as u32)?;
            dispatch_batched(&pool, &mut image.pixels, width, &ranges, &render_row);
        }
        Schedule::Tiled { bucket_size } => {
            let progress = Progress::new(image.pixels.len() as u64, "pixels");
            let pool = build_pool(config.threads)?;
            render_tiled(&pool, camera, world, config, seed, bucket_size, image, &progress);
        }
    }

    Ok(())
}
