//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Sphere};
use glint_math::{Interval, Point3, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal.
    ///
    /// `outward_normal` is assumed to be unit length. The stored normal is
    /// flipped when the ray arrives from inside the surface.
    pub fn new(
        ray: &Ray,
        p: Point3,
        t: f32,
        outward_normal: Vec3,
        material: &'a Material,
    ) -> Self {
        let mut rec = Self {
            p,
            normal: outward_normal,
            material,
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
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with parameter strictly inside `ray_t`, if any.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}

/// Closed set of primitive shapes a scene can hold.
pub enum Primitive {
    Sphere(Sphere),
}

impl Hittable for Primitive {
    #[inline]
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

/// A list of primitives tested one after another.
///
/// Insertion order is kept so repeated renders visit objects identically.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Primitive>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        self.objects.push(object.into());
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Primitive> {
        self.objects.iter()
    }
}

impl Hittable for HittableList {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;
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
    use crate::{Color, Lambertian};
    use std::sync::Arc;

    fn gray() -> Arc<Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)).into())
    }

    fn sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, gray())
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(world.is_empty());
        assert!(world.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_list_returns_nearest_regardless_of_order() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let range = Interval::new(0.001, f32::INFINITY);

        // Far sphere inserted first so the list must narrow past it
        let mut world = HittableList::new();
        world.add(sphere(Vec3::new(0.0, 0.0, -10.0), 1.0));
        world.add(sphere(Vec3::new(0.0, 0.0, -3.0), 1.0));
        world.add(sphere(Vec3::new(0.0, 0.0, -6.0), 1.0));
        assert_eq!(world.len(), 3);

        let rec = world.hit(&ray, range).expect("ray should hit");
        assert!((rec.t - 2.0).abs() < 1e-5);

        for object in world.iter() {
            if let Some(own) = object.hit(&ray, range) {
                assert!(rec.t <= own.t);
            }
        }
    }

    #[test]
    fn test_list_respects_range() {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut world = HittableList::new();
        world.add(sphere(Vec3::new(0.0, 0.0, -5.0), 1.0));

        assert!(world.hit(&ray, Interval::new(0.001, 3.0)).is_none());
        assert!(world.hit(&ray, Interval::new(0.001, 5.0)).is_some());
    }

    #[test]
    fn test_clear() {
        let mut world = HittableList::new();
        world.add(sphere(Vec3::ZERO, 1.0));
        world.clear();
        assert_eq!(world.len(), 0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(world.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_normals_always_oppose_ray() {
        let mut world = HittableList::new();
        world.add(sphere(Vec3::new(0.0, 0.0, -2.0), 1.0));
        world.add(sphere(Vec3::new(1.5, 0.3, -4.0), 0.7));
        world.add(sphere(Vec3::new(0.0, -100.5, -1.0), 100.0));

        let origins = [Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.2, 0.1, -1.8)];
        let range = Interval::new(0.001, f32::INFINITY);

        for origin in origins {
            for i in 0..32 {
                let angle = i as f32 * 0.19;
                let dir = Vec3::new(angle.sin(), (angle * 0.7).cos() - 0.5, -angle.cos());
                let ray = Ray::new(origin, dir);
                if let Some(rec) = world.hit(&ray, range) {
                    assert!(ray.direction().dot(rec.normal) <= 0.0);
                }
            }
        }
    }
}
