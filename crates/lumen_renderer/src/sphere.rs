//! Sphere primitive for ray tracing.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lumen_math::{Interval, Point3, Vec3};

/// A sphere primitive.
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Option<Arc<dyn Material>>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material: Some(material),
        }
    }

    /// Create a sphere that shades with the default diffuse response.
    pub fn without_material(center: Point3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material: None,
        }
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> (f64, f64) {
        // theta: angle down from +Y
        // phi: angle around Y axis from +X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if self.radius <= 0.0 {
            return None;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        let (u, v) = Self::get_sphere_uv(outward_normal);

        Some(HitRecord::new(ray, root, outward_normal, self.material.as_deref()).with_uv(u, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn window() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::new(0.5, 0.5, 0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, window()).expect("should hit");
        assert!((rec.t - 0.5).abs() < 1e-9);
        assert!(rec.front_face);
        assert!(rec.material.is_some());
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, grey());

        // Ray pointing away from sphere
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, window()).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside_uses_far_root() {
        let sphere = Sphere::without_material(Point3::ZERO, 2.0);
        let ray = Ray::new(Point3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, window()).expect("should hit from inside");
        assert!((rec.t - 2.0).abs() < 1e-9);
        assert!(!rec.front_face);
        // Normal flipped to face back toward the origin
        assert!((rec.normal - (-Vec3::X)).length() < 1e-9);
        assert!(rec.material.is_none());
    }

    #[test]
    fn test_sphere_zero_radius_is_miss() {
        let sphere = Sphere::without_material(Point3::new(0.0, 0.0, 2.0), 0.0);
        let ray = Ray::new(Point3::ZERO, Vec3::Z);
        assert!(sphere.hit(&ray, window()).is_none());
    }

    #[test]
    fn test_sphere_normal_is_unit_and_faces_ray() {
        let mut rng = StdRng::seed_from_u64(1234);
        let spheres = [
            Sphere::without_material(Point3::ZERO, 1.0),
            Sphere::without_material(Point3::new(1.0, -2.0, 0.5), 3.0),
            Sphere::without_material(Point3::new(-4.0, 0.0, 0.0), 0.25),
        ];

        let mut hits = 0;
        for _ in 0..2000 {
            let origin = crate::sampling::random_vec3(&mut rng, -6.0, 6.0);
            let direction = crate::sampling::random_unit_vector(&mut rng)
                * crate::sampling::gen_range_f64(&mut rng, 0.1, 4.0);
            let ray = Ray::new(origin, direction);

            for sphere in &spheres {
                if let Some(rec) = sphere.hit(&ray, window()) {
                    hits += 1;
                    assert!((rec.normal.length() - 1.0).abs() < 1e-9);
                    assert!(rec.normal.dot(ray.direction()) <= 0.0);
                    assert!(window().surrounds(rec.t));
                    assert!((0.0..=1.0).contains(&rec.u));
                    assert!((0.0..=1.0).contains(&rec.v));
                }
            }
        }
        assert!(hits > 0);
    }
}
