use crate::camera::Camera;
use crate::color::Color;
use crate::lights::Light;
use crate::materials::Material;
use crate::shapes::{Plane, Sphere, Triangle, TriangleMesh};
use crate::system::{HitRecord, Intersectable, Ray};
use crate::vector::Vec3;

/// Per-frame animation hook. Receives the total elapsed time in seconds;
/// scenes that animate rewrite transforms or primitive fields and refresh
/// the affected caches.
pub type UpdateFn = fn(&mut Scene, f64);

/// Owns every primitive, light and material of a renderable world, plus
/// the camera. Scene-specific setup and animation live in builder
/// functions and the optional update hook rather than in subclasses.
pub struct Scene {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub materials: Vec<Material>,
    pub planes: Vec<Plane>,
    pub spheres: Vec<Sphere>,
    pub triangles: Vec<Triangle>,
    pub meshes: Vec<TriangleMesh>,
    update_fn: Option<UpdateFn>,
}

impl Scene {
    /// An empty scene with the default camera and the default solid red
    /// material at index 0, so a material index of 0 is always valid.
    pub fn new() -> Scene {
        Scene {
            camera: Camera::default(),
            lights: Vec::new(),
            materials: vec![Material::SolidColor { color: Color::red() }],
            planes: Vec::new(),
            spheres: Vec::new(),
            triangles: Vec::new(),
            meshes: Vec::new(),
            update_fn: None,
        }
    }

    pub fn set_update(&mut self, update_fn: UpdateFn) {
        self.update_fn = Some(update_fn);
    }

    /// Runs the animation hook, if any. Must be called before rendering a
    /// frame, never during one.
    pub fn update(&mut self, total_time: f64) {
        if let Some(update_fn) = self.update_fn {
            update_fn(self, total_time);
        }
    }

    pub fn add_material(&mut self, material: Material) -> u8 {
        self.materials.push(material);
        (self.materials.len() - 1) as u8
    }

    pub fn material(&self, index: u8) -> &Material {
        &self.materials[index as usize]
    }

    pub fn add_point_light(&mut self, origin: Vec3, intensity: f64, color: Color) {
        self.lights.push(Light::point(origin, intensity, color));
    }

    pub fn add_directional_light(&mut self, direction: Vec3, intensity: f64, color: Color) {
        self.lights.push(Light::directional(direction, intensity, color));
    }

    pub fn add_plane(&mut self, origin: Vec3, normal: Vec3, material_index: u8) {
        self.planes.push(Plane::new(origin, normal, material_index));
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f64, material_index: u8) {
        self.spheres.push(Sphere::new(center, radius, material_index));
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn add_mesh(&mut self, mesh: TriangleMesh) {
        self.meshes.push(mesh);
    }

    /// Closest-hit search over every primitive, walking spheres, planes,
    /// free triangles and meshes in that order and keeping the minimum t.
    pub fn closest_hit(&self, ray: &Ray) -> Option<HitRecord> {
        let sphere_hits = self.spheres.iter().filter_map(|s| s.intersect(ray));
        let plane_hits = self.planes.iter().filter_map(|p| p.intersect(ray));
        let triangle_hits = self.triangles.iter().filter_map(|t| t.intersect(ray));
        let mesh_hits = self.meshes.iter().filter_map(|m| m.intersect(ray));

        sphere_hits
            .chain(plane_hits)
            .chain(triangle_hits)
            .chain(mesh_hits)
            .min_by(|a, b| a.t.partial_cmp(&b.t).unwrap())
    }

    /// Any-hit search for shadow rays: true as soon as one primitive
    /// occludes within the ray's [tmin, tmax] window.
    pub fn any_hit(&self, ray: &Ray) -> bool {
        self.spheres.iter().any(|s| s.intersect_any(ray))
            || self.planes.iter().any(|p| p.intersect_any(ray))
            || self.triangles.iter().any(|t| t.intersect_any(ray))
            || self.meshes.iter().any(|m| m.intersect_any(ray))
    }
}

impl Default for Scene {
    fn default() -> Scene {
        Scene::new()
    }
}
