//! Planar parallelogram primitive.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lumen_math::{Interval, Point3, Vec3};

/// A parallelogram spanned by `u` and `v` from corner `q`.
pub struct Quad {
    q: Point3,
    u: Vec3,
    v: Vec3,
    /// Unit plane normal
    normal: Vec3,
    /// Plane offset, `normal . x = d`
    d: f64,
    /// Projects a plane offset onto (alpha, beta)
    w: Vec3,
    material: Option<Arc<dyn Material>>,
}

impl Quad {
    /// Create a new quad.
    pub fn new(q: Point3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        Self::build(q, u, v, Some(material))
    }

    /// Create a quad that shades with the default diffuse response.
    pub fn without_material(q: Point3, u: Vec3, v: Vec3) -> Self {
        Self::build(q, u, v, None)
    }

    pub(crate) fn build(q: Point3, u: Vec3, v: Vec3, material: Option<Arc<dyn Material>>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize_or_zero();

        Self {
            q,
            u,
            v,
            normal,
            d: normal.dot(q),
            w: n / n.dot(n),
            material,
        }
    }

    /// Plane-local coordinates of a point lying in the quad's plane.
    pub fn plane_coordinates(&self, p: Point3) -> (f64, f64) {
        let planar = p - self.q;
        let alpha = self.w.dot(planar.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar));
        (alpha, beta)
    }

    /// Interior test in plane coordinates, boundaries included.
    pub fn is_interior(alpha: f64, beta: f64) -> bool {
        (0.0..=1.0).contains(&alpha) && (0.0..=1.0).contains(&beta)
    }
}

impl Hittable for Quad {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let denom = self.normal.dot(ray.direction());

        // No hit if the ray is parallel to the plane
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return None;
        }

        let (alpha, beta) = self.plane_coordinates(ray.at(t));
        if !Self::is_interior(alpha, beta) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.normal, self.material.as_deref()).with_uv(alpha, beta))
    }
}
