//! Axis-aligned box built from six quads.

use std::sync::Arc;

use crate::{
    hittable::{Group, HitRecord, Hittable},
    Material, Quad, Ray,
};
use lumen_math::{Interval, Point3, Vec3};

/// A box spanning two opposite corners.
///
/// Has no intersection logic of its own; hits resolve through the
/// group of its faces.
pub struct Cuboid {
    faces: Group,
}

impl Cuboid {
    /// Create a box from two opposite corners, in any order.
    pub fn new(a: Point3, b: Point3, material: Arc<dyn Material>) -> Self {
        Self::build(a, b, Some(material))
    }

    /// Create a box that shades with the default diffuse response.
    pub fn without_material(a: Point3, b: Point3) -> Self {
        Self::build(a, b, None)
    }

    fn build(a: Point3, b: Point3, material: Option<Arc<dyn Material>>) -> Self {
        let min = a.min(b);
        let max = a.max(b);

        let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
        let dy = Vec3::new(0.0, max.y - min.y, 0.0);
        let dz = Vec3::new(0.0, 0.0, max.z - min.z);

        let sides = [
            (Point3::new(min.x, min.y, max.z), dx, dy),  // front
            (Point3::new(max.x, min.y, max.z), -dz, dy), // right
            (Point3::new(max.x, min.y, min.z), -dx, dy), // back
            (Point3::new(min.x, min.y, min.z), dz, dy),  // left
            (Point3::new(min.x, max.y, max.z), dx, -dz), // top
            (Point3::new(min.x, min.y, min.z), dx, dz),  // bottom
        ];

        let mut faces = Group::new();
        for (q, u, v) in sides {
            faces.push(Quad::build(q, u, v, material.clone()));
        }

        Self { faces }
    }

    /// The six faces of the box.
    pub fn faces(&self) -> &Group {
        &self.faces
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.faces.hit(ray, ray_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian};

    fn window() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_cuboid_has_six_faces() {
        let cuboid = Cuboid::without_material(Point3::splat(1.0), Point3::splat(-1.0));
        assert_eq!(cuboid.faces().len(), 6);
    }

    #[test]
    fn test_cuboid_hit_from_each_axis() {
        let cuboid = Cuboid::without_material(Point3::splat(-1.0), Point3::splat(1.0));

        for axis in [Vec3::X, Vec3::Y, Vec3::Z, -Vec3::X, -Vec3::Y, -Vec3::Z] {
            let ray = Ray::new(axis * 5.0, -axis);
            let rec = cuboid.hit(&ray, window()).expect("box should be hit");

            // Nearest face is 4 units away along every axis
            assert!((rec.t - 4.0).abs() < 1e-9, "axis {axis:?} gave t={}", rec.t);
            assert!(rec.front_face);
            assert!((rec.normal - axis).length() < 1e-9);
        }
    }

    #[test]
    fn test_cuboid_hit_from_inside() {
        let cuboid = Cuboid::without_material(Point3::splat(-4.0), Point3::splat(4.0));
        let ray = Ray::new(Point3::ZERO, Vec3::Y);

        let rec = cuboid.hit(&ray, window()).expect("inside ray hits the ceiling");
        assert!((rec.t - 4.0).abs() < 1e-9);
        assert!(rec.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_cuboid_faces_share_material() {
        let material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
        let cuboid = Cuboid::new(Point3::ZERO, Point3::ONE, material.clone());

        // One reference held here, one per face
        assert_eq!(Arc::strong_count(&material), 7);

        let ray = Ray::new(Point3::new(0.5, 0.5, 3.0), -Vec3::Z);
        let rec = cuboid.hit(&ray, window()).expect("should hit");
        let hit_material = rec.material.expect("faces carry the material");
        assert!(std::ptr::addr_eq(hit_material, material.as_ref()));
    }

    #[test]
    fn test_cuboid_miss() {
        let cuboid = Cuboid::without_material(Point3::ZERO, Point3::ONE);
        let ray = Ray::new(Point3::new(2.0, 2.0, 2.0), Vec3::X);
        assert!(cuboid.hit(&ray, window()).is_none());
    }
}
