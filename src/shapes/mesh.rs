use crate::matrix::Matrix;
use crate::shapes::bounding_box::Aabb;
use crate::shapes::triangle::{CullMode, Triangle};
use crate::system::{HitRecord, Intersectable, Ray};
use crate::vector::Vec3;

/// Indexed triangle mesh with a cached world-space copy of its geometry.
///
/// The mesh stores its model transform as separate scale, rotation and
/// translation factors; `update_transforms` composes them (scale first,
/// translation last), rewrites `transformed_positions`/`transformed_normals`
/// and refits the world-space bounding box. Callers must invoke it after
/// changing any of the factors or the source positions.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<usize>,
    pub material_index: u8,
    pub cull_mode: CullMode,
    scale_transform: Matrix,
    rotation_transform: Matrix,
    translation_transform: Matrix,
    pub transformed_positions: Vec<Vec3>,
    pub transformed_normals: Vec<Vec3>,
    local_bounds: Aabb,
    world_bounds: Aabb,
}

impl TriangleMesh {
    pub fn new(cull_mode: CullMode, material_index: u8) -> TriangleMesh {
        let empty = Aabb::new(Vec3::zero(), Vec3::zero());
        TriangleMesh {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            material_index,
            cull_mode,
            scale_transform: Matrix::identity(),
            rotation_transform: Matrix::identity(),
            translation_transform: Matrix::identity(),
            transformed_positions: Vec::new(),
            transformed_normals: Vec::new(),
            local_bounds: empty,
            world_bounds: empty,
        }
    }

    /// Builds a ready-to-trace mesh: face normals, bounds and the world
    /// cache are all derived from the given geometry.
    pub fn with_geometry(
        positions: Vec<Vec3>,
        indices: Vec<usize>,
        cull_mode: CullMode,
        material_index: u8,
    ) -> TriangleMesh {
        let mut mesh = TriangleMesh::new(cull_mode, material_index);
        mesh.positions = positions;
        mesh.indices = indices;
        mesh.calculate_normals();
        mesh.update_aabb();
        mesh.update_transforms();
        mesh
    }

    /// Appends a triangle's vertices, indices and face normal. The world
    /// cache is not refreshed; call `update_transforms` once after the last
    /// append.
    pub fn append_triangle(&mut self, triangle: &Triangle) {
        let start = self.positions.len();
        self.positions.push(triangle.v0);
        self.positions.push(triangle.v1);
        self.positions.push(triangle.v2);
        self.indices.extend([start, start + 1, start + 2]);
        self.normals.push(triangle.normal);
    }

    /// Derives one face normal per index triplet from the triangle edges.
    pub fn calculate_normals(&mut self) {
        self.normals.clear();
        for face in self.indices.chunks_exact(3) {
            let v0 = self.positions[face[0]];
            let edge_a = self.positions[face[1]] - v0;
            let edge_b = self.positions[face[2]] - v0;
            self.normals.push(edge_a.cross(edge_b).normalize());
        }
    }

    pub fn translate(&mut self, translation: Vec3) {
        self.translation_transform = Matrix::translation(translation);
    }

    pub fn rotate_y(&mut self, yaw: f64) {
        self.rotation_transform = Matrix::rotation_y(yaw);
    }

    pub fn scale(&mut self, scale: Vec3) {
        self.scale_transform = Matrix::scaling(scale);
    }

    /// Refits the local-space bounds to the current source positions.
    pub fn update_aabb(&mut self) {
        if !self.positions.is_empty() {
            self.local_bounds = Aabb::from_points(&self.positions);
        }
    }

    /// Recomputes the world-space position/normal cache and bounding box.
    /// Normals go through the same transform without renormalization; the
    /// scenes use uniform scales, and the per-triangle hit kernel
    /// normalizes the stored normal on construction anyway.
    pub fn update_transforms(&mut self) {
        let final_transform =
            self.scale_transform * self.rotation_transform * self.translation_transform;

        self.transformed_positions.clear();
        self.transformed_positions
            .extend(self.positions.iter().map(|p| final_transform.transform_point(*p)));

        self.transformed_normals.clear();
        self.transformed_normals
            .extend(self.normals.iter().map(|n| final_transform.transform_vector(*n)));

        self.world_bounds = self.local_bounds.transformed(&final_transform);
    }

    pub fn world_bounds(&self) -> Aabb {
        self.world_bounds
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Materializes one face from the world-space cache, inheriting the
    /// mesh's cull mode and material.
    fn face(&self, index: usize) -> Triangle {
        let mut triangle = Triangle::with_normal(
            self.transformed_positions[self.indices[index * 3]],
            self.transformed_positions[self.indices[index * 3 + 1]],
            self.transformed_positions[self.indices[index * 3 + 2]],
            self.transformed_normals[index],
        );
        triangle.cull_mode = self.cull_mode;
        triangle.material_index = self.material_index;
        triangle
    }
}

impl Intersectable for TriangleMesh {
    fn intersect(&self, ray: &Ray) -> Option<HitRecord> {
        if !self.world_bounds.slab_test(ray) {
            return None;
        }

        (0..self.face_count())
            .filter_map(|i| self.face(i).intersect(ray))
            .min_by(|a, b| a.t.partial_cmp(&b.t).unwrap())
    }

    fn intersect_any(&self, ray: &Ray) -> bool {
        if !self.world_bounds.slab_test(ray) {
            return false;
        }

        (0..self.face_count()).any(|i| self.face(i).intersect_any(ray))
    }
}
