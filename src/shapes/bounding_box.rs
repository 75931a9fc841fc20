use crate::matrix::Matrix;
use crate::system::Ray;
use crate::vector::Vec3;

/// Axis-aligned bounding box as a (min, max) corner pair.
#[derive(Debug, Copy, Clone)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Aabb {
        Aabb { min, max }
    }

    pub fn from_points(points: &[Vec3]) -> Aabb {
        let first = points.first().copied().unwrap_or_else(Vec3::zero);
        points.iter().fold(Aabb::new(first, first), |aabb, p| {
            Aabb::new(aabb.min.min(*p), aabb.max.max(*p))
        })
    }

    /// The axis-aligned box enclosing all eight transformed corners. The
    /// result grows under rotation; it bounds the transformed contents, not
    /// the tightest fit.
    pub fn transformed(&self, m: &Matrix) -> Aabb {
        let (min, max) = (self.min, self.max);
        let corners = [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];

        let mut out = {
            let c = m.transform_point(corners[0]);
            Aabb::new(c, c)
        };
        for corner in &corners[1..] {
            let c = m.transform_point(*corner);
            out.min = out.min.min(c);
            out.max = out.max.max(c);
        }
        out
    }

    /// Three-axis slab test. Rejects when the exit parameter is behind the
    /// ray origin or before the entry parameter. Zero direction components
    /// produce infinities that resolve correctly through min/max.
    pub fn slab_test(&self, ray: &Ray) -> bool {
        let tx1 = (self.min.x - ray.origin.x) / ray.direction.x;
        let tx2 = (self.max.x - ray.origin.x) / ray.direction.x;

        let mut tmin = tx1.min(tx2);
        let mut tmax = tx1.max(tx2);

        let ty1 = (self.min.y - ray.origin.y) / ray.direction.y;
        let ty2 = (self.max.y - ray.origin.y) / ray.direction.y;

        tmin = tmin.max(ty1.min(ty2));
        tmax = tmax.min(ty1.max(ty2));

        let tz1 = (self.min.z - ray.origin.z) / ray.direction.z;
        let tz2 = (self.max.z - ray.origin.z) / ray.direction.z;

        tmin = tmin.max(tz1.min(tz2));
        tmax = tmax.min(tz1.max(tz2));

        tmax > 0.0 && tmax >= tmin
    }
}
