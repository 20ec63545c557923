//! Material trait for surface scattering.

use lumen_math::{Point3, Vec3};
use rand::RngCore;

use crate::sampling::random_unit_vector;
use crate::{error::RenderError, error::RenderResult, hittable::HitRecord, Ray};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a scattering event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Fraction of the incoming light carried by the scattered ray
    pub attenuation: Color,
    /// The next ray of the path, starting at the hit point
    pub scattered: Ray,
}

impl ScatterResult {
    pub fn new(attenuation: Color, scattered: Ray) -> Self {
        Self {
            attenuation,
            scattered,
        }
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore)
        -> Option<ScatterResult>;

    /// Get emitted light from this material.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let scattered = Ray::new(rec.p, diffuse_direction(rec.normal, rng));
        Some(ScatterResult::new(self.albedo, scattered))
    }
}

/// Diffuse material alternating two albedos in a 3D checker pattern.
#[derive(Debug, Clone)]
pub struct CheckeredLambertian {
    inv_scale: f64,
    even: Color,
    odd: Color,
}

impl CheckeredLambertian {
    /// Create a checker with cells of edge `scale` in world units.
    pub fn new(scale: f64, even: Color, odd: Color) -> RenderResult<Self> {
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(RenderError::InvalidCheckerScale(scale));
        }

        Ok(Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        })
    }

    /// Albedo of the cell containing `p`.
    pub fn albedo_at(&self, p: Point3) -> Color {
        let cell = (self.inv_scale * p).floor();
        let parity = (cell.x as i64 + cell.y as i64 + cell.z as i64).rem_euclid(2);

        if parity == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

impl Material for CheckeredLambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let scattered = Ray::new(rec.p, diffuse_direction(rec.normal, rng));
        Some(ScatterResult::new(self.albedo_at(rec.p), scattered))
    }
}

/// Metal (perfect mirror) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
}

impl Metal {
    /// Create a new Metal material.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        Some(ScatterResult::new(self.albedo, Ray::new(rec.p, reflected)))
    }
}

/// Dielectric (glass) material.
///
/// Always refracts: there is no Fresnel reflection branch.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f64,
}

impl Dielectric {
    /// Light kept per transmission event.
    pub const TRANSMITTANCE: f64 = 0.9;

    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f64) -> Self {
        Self { ior }
    }

    /// Ratio of indices across the boundary for this hit.
    fn refraction_ratio(&self, front_face: bool) -> f64 {
        if front_face {
            1.0 / self.ior
        } else {
            self.ior
        }
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let attenuation = Color::splat(Self::TRANSMITTANCE);
        let unit_direction = ray_in.direction().normalize();
        let refracted = refract(
            unit_direction,
            rec.normal,
            self.refraction_ratio(rec.front_face),
        );

        Some(ScatterResult::new(attenuation, Ray::new(rec.p, refracted)))
    }
}

/// Diffuse light emitter.
#[derive(Debug, Clone)]
pub struct Light {
    emit: Color,
}

impl Light {
    /// Create a new light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }
}

impl Material for Light {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        // Lights don't scatter rays
        None
    }

    fn emitted(&self, _ray_in: &Ray, _rec: &HitRecord) -> Color {
        self.emit
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Cosine-weighted bounce direction around `normal`.
pub(crate) fn diffuse_direction(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let direction = normal + random_unit_vector(rng);

    // Catch degenerate scatter direction
    if direction.length_squared() < 1e-16 {
        normal
    } else {
        direction
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with Snell's law.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
