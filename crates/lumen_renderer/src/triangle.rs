//! Triangle primitive for ray tracing.
//!
//! Intersects the supporting plane first, then runs a same-side test
//! against each directed edge.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lumen_math::{Interval, Point3, Vec3};

/// Rays closer to parallel than this are treated as misses.
const PARALLEL_EPSILON: f64 = 1e-4;

/// A triangle primitive.
pub struct Triangle {
    /// Vertices, counter-clockwise around `normal`
    vertices: [Point3; 3],
    /// Directed edges v0->v1, v1->v2, v2->v0
    edges: [Vec3; 3],
    /// Un-normalized plane normal (edge1 x edge2)
    normal: Vec3,
    /// Unit face normal
    unit_normal: Vec3,
    material: Option<Arc<dyn Material>>,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Point3, v1: Point3, v2: Point3, material: Arc<dyn Material>) -> Self {
        Self::build([v0, v1, v2], Some(material))
    }

    /// Create a triangle that shades with the default diffuse response.
    pub fn without_material(v0: Point3, v1: Point3, v2: Point3) -> Self {
        Self::build([v0, v1, v2], None)
    }

    fn build(vertices: [Point3; 3], material: Option<Arc<dyn Material>>) -> Self {
        let [v0, v1, v2] = vertices;
        let normal = (v1 - v0).cross(v2 - v0);

        Self {
            vertices,
            edges: [v1 - v0, v2 - v1, v0 - v2],
            normal,
            unit_normal: normal.normalize_or_zero(),
            material,
        }
    }

    pub fn v0(&self) -> Point3 {
        self.vertices[0]
    }

    pub fn v1(&self) -> Point3 {
        self.vertices[1]
    }

    pub fn v2(&self) -> Point3 {
        self.vertices[2]
    }

    /// Unit face normal, zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        self.unit_normal
    }

    /// Triangle area.
    pub fn area(&self) -> f64 {
        0.5 * self.normal.length()
    }

    /// Same-side test for a point lying in the triangle's plane.
    ///
    /// The point is inside iff it is on the inner side of all three edges.
    pub fn contains_point(&self, p: Point3) -> bool {
        self.edges
            .iter()
            .zip(&self.vertices)
            .all(|(edge, vertex)| self.normal.dot(edge.cross(p - *vertex)) >= 0.0)
    }

    /// Translated copy of this triangle sharing the same material.
    pub fn translate(&self, offset: Vec3) -> Self {
        Self::build(self.vertices.map(|v| v + offset), self.material.clone())
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let n_dot_dir = self.normal.dot(ray.direction());

        // Ray is parallel to the plane (also catches degenerate triangles)
        if n_dot_dir.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = self.normal.dot(self.vertices[0] - ray.origin()) / n_dot_dir;
        if t < 0.0 || !ray_t.contains(t) {
            return None;
        }

        let p = ray.at(t);
        if !self.contains_point(p) {
            return None;
        }

        Some(HitRecord::new(ray, t, self.unit_normal, self.material.as_deref()))
    }
}
