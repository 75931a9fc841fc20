use crate::algebra::are_equal;
use crate::system::{HitRecord, Intersectable, Ray};
use crate::vector::Vec3;

/// Which side of a triangle is invisible to closest-hit rays.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CullMode {
    FrontFaceCulling,
    BackFaceCulling,
    NoCulling,
}

#[derive(Debug, Copy, Clone)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub normal: Vec3,
    pub cull_mode: CullMode,
    pub material_index: u8,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Triangle {
        Triangle {
            v0,
            v1,
            v2,
            normal: (v1 - v0).cross(v2 - v0).normalize(),
            cull_mode: CullMode::FrontFaceCulling,
            material_index: 0,
        }
    }

    pub fn with_normal(v0: Vec3, v1: Vec3, v2: Vec3, normal: Vec3) -> Triangle {
        Triangle {
            v0,
            v1,
            v2,
            normal: normal.normalize(),
            cull_mode: CullMode::FrontFaceCulling,
            material_index: 0,
        }
    }

    /// Shared closest-hit/any-hit kernel. The cull sign flips between the
    /// two query kinds on purpose: a face that is invisible to the camera
    /// must still occlude a light shining on its visible side.
    fn hit_test(&self, ray: &Ray, any_hit: bool) -> Option<HitRecord> {
        let edge_a = self.v1 - self.v0;
        let edge_b = self.v2 - self.v0;
        let n = edge_a.cross(edge_b).normalize();
        let n_dot_d = n.dot(ray.direction);

        let culled = match self.cull_mode {
            CullMode::NoCulling => are_equal(n_dot_d, 0.0),
            CullMode::FrontFaceCulling => {
                if any_hit {
                    n_dot_d > 0.0
                } else {
                    n_dot_d < 0.0
                }
            }
            CullMode::BackFaceCulling => {
                if any_hit {
                    n_dot_d < 0.0
                } else {
                    n_dot_d > 0.0
                }
            }
        };
        if culled {
            return None;
        }

        let t = (self.v0 - ray.origin).dot(n) / n_dot_d;
        if !(t >= ray.tmin && t <= ray.tmax) {
            return None;
        }

        let p = ray.point_at(t);

        // Inside test: the point must lie to the left of all three edges.
        let edges = [self.v1 - self.v0, self.v2 - self.v1, self.v0 - self.v2];
        let to_point = [p - self.v0, p - self.v1, p - self.v2];
        for (edge, tp) in edges.iter().zip(to_point.iter()) {
            if edge.cross(*tp).dot(n) < 0.0 {
                return None;
            }
        }

        Some(HitRecord {
            point: p,
            normal: self.normal,
            t,
            material_index: self.material_index,
        })
    }
}

impl Intersectable for Triangle {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        self.hit_test(ray, false)
    }

    fn intersect_any(&self, ray: &Ray) -> bool {
        self.hit_test(ray, true).is_some()
    }
}
