//! Hittable trait, HitRecord and the Group aggregate.

use std::sync::Arc;

use crate::{Material, Ray};
use lumen_math::{Interval, Point3, Vec3};

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point, `None` for the default diffuse response
    pub material: Option<&'a dyn Material>,
    /// Surface coordinates, where the primitive provides them
    pub u: f64,
    pub v: f64,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record at parameter `t` with the normal already faced against the ray.
    pub fn new(
        ray: &Ray,
        t: f64,
        outward_normal: Vec3,
        material: Option<&'a dyn Material>,
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            u: 0.0,
            v: 0.0,
            t,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }

    /// Attach surface coordinates.
    pub fn with_uv(mut self, u: f64, v: f64) -> Self {
        self.u = u;
        self.v = v;
        self
    }
}

impl std::fmt::Debug for HitRecord<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitRecord")
            .field("p", &self.p)
            .field("normal", &self.normal)
            .field("t", &self.t)
            .field("front_face", &self.front_face)
            .field("has_material", &self.material.is_some())
            .finish()
    }
}

/// Trait for objects that can be hit by rays.
///
/// A miss is `None`, never an error.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this object within the given interval.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// An ordered collection of hittables resolved by nearest hit.
///
/// Children are shared, so one primitive may belong to several groups.
#[derive(Clone, Default)]
pub struct Group {
    objects: Vec<Arc<dyn Hittable>>,
}

impl Group {
    /// Create a new empty group.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add a shared object to the group.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Add an owned object to the group.
    pub fn push(&mut self, object: impl Hittable + 'static) {
        self.objects.push(Arc::new(object));
    }

    /// Clear all objects from the group.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the group is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Hittable>> {
        self.objects.iter()
    }
}

impl Hittable for Group {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Metal, Sphere};

    fn window() -> Interval {
        Interval::new(0.001, f64::INFINITY)
    }

    #[test]
    fn test_set_face_normal() {
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let front = HitRecord::new(&ray, 1.0, Vec3::Z, None);
        assert!(front.front_face);
        assert_eq!(front.normal, Vec3::Z);

        let back = HitRecord::new(&ray, 1.0, -Vec3::Z, None);
        assert!(!back.front_face);
        assert_eq!(back.normal, Vec3::Z);
    }

    #[test]
    fn test_empty_group_misses() {
        let group = Group::new();
        let ray = Ray::new(Point3::ZERO, Vec3::Z);
        assert!(group.is_empty());
        assert!(group.hit(&ray, window()).is_none());
    }

    #[test]
    fn test_group_returns_nearest_hit() {
        let near: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(1.0, 0.0, 0.0)));
        let far: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.0, 0.0, 1.0)));

        // Far sphere first so the scan has to narrow past it
        let mut group = Group::new();
        group.push(Sphere::new(Point3::new(0.0, 0.0, 5.0), 0.5, far.clone()));
        group.push(Sphere::new(Point3::new(0.0, 0.0, 2.0), 0.5, near.clone()));
        assert_eq!(group.len(), 2);

        let ray = Ray::new(Point3::ZERO, Vec3::Z);
        let rec = group.hit(&ray, window()).expect("ray should hit");

        assert!((rec.t - 1.5).abs() < 1e-9);
        let hit_material = rec.material.expect("sphere carries a material");
        assert!(std::ptr::addr_eq(hit_material, near.as_ref()));
        assert!(!std::ptr::addr_eq(hit_material, far.as_ref()));
    }

    #[test]
    fn test_group_respects_interval() {
        let mut group = Group::new();
        group.push(Sphere::without_material(Point3::new(0.0, 0.0, 2.0), 0.5));
        group.push(Sphere::without_material(Point3::new(0.0, 0.0, 5.0), 0.5));

        let ray = Ray::new(Point3::ZERO, Vec3::Z);
        let rec = group
            .hit(&ray, Interval::new(3.0, f64::INFINITY))
            .expect("far sphere is inside the window");
        assert!((rec.t - 4.5).abs() < 1e-9);

        assert!(group.hit(&ray, Interval::new(0.001, 1.0)).is_none());
    }

    #[test]
    fn test_shared_child_in_two_groups() {
        let sphere: Arc<dyn Hittable> =
            Arc::new(Sphere::without_material(Point3::new(0.0, 0.0, 3.0), 1.0));

        let mut a = Group::new();
        let mut b = Group::new();
        a.add(sphere.clone());
        b.add(sphere);

        let ray = Ray::new(Point3::ZERO, Vec3::Z);
        let ta = a.hit(&ray, window()).map(|r| r.t);
        let tb = b.hit(&ray, window()).map(|r| r.t);
        assert_eq!(ta, tb);
        assert_eq!(ta, Some(2.0));
    }
}
