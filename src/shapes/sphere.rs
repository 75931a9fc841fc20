use crate::system::{HitRecord, Intersectable, Ray};
use crate::vector::Vec3;

#[derive(Debug, Copy, Clone)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    pub material_index: u8,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64, material_index: u8) -> Sphere {
        Sphere {
            center,
            radius,
            material_index,
        }
    }
}

impl Intersectable for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant <= 0.0 {
            return None;
        }

        // Prefer the near root; a ray starting inside the sphere falls
        // through to the far one.
        let sqrt_discriminant = discriminant.sqrt();
        let mut t = (-b - sqrt_discriminant) / (2.0 * a);
        if t < ray.tmin {
            t = (-b + sqrt_discriminant) / (2.0 * a);
        }

        if t >= ray.tmin && t <= ray.tmax {
            let point = ray.point_at(t);
            Some(HitRecord {
                point,
                normal: (point - self.center) / self.radius,
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
