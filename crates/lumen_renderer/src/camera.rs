//! Pinhole camera for ray generation.

use crate::error::{RenderError, RenderResult};
use crate::sampling::sample_square;
use crate::Ray;
use lumen_math::{Point3, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    /// Vertical field of view in degrees
    vfov: f64,

    // Cached computed values (set by initialize())
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 10,
            max_depth: 10,
            look_from: Point3::new(0.0, 0.0, -1.0),
            look_at: Point3::ZERO,
            vup: Vec3::Y,
            vfov: 90.0,
            // Cached values (initialized to defaults)
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, vfov: f64) -> Self {
        self.vfov = vfov;
        self
    }

    pub fn look_from(&self) -> Point3 {
        self.look_from
    }

    pub fn look_at(&self) -> Point3 {
        self.look_at
    }

    pub fn vfov(&self) -> f64 {
        self.vfov
    }

    /// Orthonormal basis (u, v, w) computed by [`Camera::initialize`].
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Initialize the camera (must be called before generating rays).
    ///
    /// Fails on settings that would produce a degenerate basis or viewport.
    pub fn initialize(&mut self) -> RenderResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::InvalidFieldOfView(self.vfov));
        }

        let view = self.look_from - self.look_at;
        let focal_length = view.length();
        if !(focal_length > 0.0 && focal_length.is_finite()) {
            return Err(RenderError::DegenerateCamera("look_from equals look_at"));
        }

        let side = self.vup.cross(view);
        if !(side.length_squared() > 0.0 && side.is_finite()) {
            return Err(RenderError::DegenerateCamera(
                "vup is zero or parallel to the view direction",
            ));
        }

        self.center = self.look_from;

        // Calculate camera basis vectors
        self.w = view / focal_length;
        self.u = side.normalize();
        self.v = self.w.cross(self.u);

        // Calculate viewport dimensions
        let h = (self.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h * focal_length;
        let viewport_width =
            viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Image rows grow downward while v points up
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left =
            self.center - focal_length * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        Ok(())
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        self.ray_through(i as f64 + offset.x, j as f64 + offset.y)
    }

    /// Ray through a continuous pixel position, where (i, j) is the center of pixel (i, j).
    pub fn ray_through(&self, x: f64, y: f64) -> Ray {
        let pixel_sample = self.pixel00_loc + x * self.pixel_delta_u + y * self.pixel_delta_v;
        Ray::new(self.center, pixel_sample - self.center)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
