use crate::system::{HitRecord, Intersectable, Ray};
use crate::vector::Vec3;

/// Infinite plane through `origin` with unit `normal`. The reported normal
/// is never flipped toward the ray.
#[derive(Debug, Copy, Clone)]
pub struct Plane {
    pub origin: Vec3,
    pub normal: Vec3,
    pub material_index: u8,
}

impl Plane {
    pub fn new(origin: Vec3, normal: Vec3, material_index: u8) -> Plane {
        Plane {
            origin,
            normal,
            material_index,
        }
    }
}

impl Intersectable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        // A ray parallel to the plane divides by zero here; the resulting
        // infinity or NaN fails the range check below and reads as a miss.
        let t = (self.origin - ray.origin).dot(self.normal) / ray.direction.dot(self.normal);

        if t >= ray.tmin && t <= ray.tmax {
            Some(HitRecord {
                point: ray.point_at(t),
                normal: self.normal,
                t,
                material_index: self.material_index,
            })
        } else {
            None
        }
    }

    fn intersect_any(&self, ray: &Ray) -> bool {
        self.intersect(ray).is_some()
    }
}
