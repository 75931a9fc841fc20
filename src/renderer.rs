use rayon::prelude::*;

use crate::algebra::TO_RADIANS;
use crate::color::Color;
use crate::matrix::Matrix;
use crate::scene::Scene;
use crate::system::Ray;
use crate::vector::Vec3;

/// Debug views into the lighting integrator, cycled at runtime. Combined
/// is the full render: radiance * BRDF * observed area per light.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LightingMode {
    ObservedArea,
    Radiance,
    Brdf,
    Combined,
}

impl LightingMode {
    pub fn next(self) -> LightingMode {
        match self {
            LightingMode::ObservedArea => LightingMode::Radiance,
            LightingMode::Radiance => LightingMode::Brdf,
            LightingMode::Brdf => LightingMode::Combined,
            LightingMode::Combined => LightingMode::ObservedArea,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LightingMode::ObservedArea => "observed area (Lambert's cosine law)",
            LightingMode::Radiance => "radiance",
            LightingMode::Brdf => "BRDF",
            LightingMode::Combined => "combined",
        }
    }
}

/// Row-major framebuffer of packed 0x00RRGGBB pixels.
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Framebuffer {
        Framebuffer {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

/// Read-only state shared by every pixel task of one frame. Assembled
/// after all scene mutation is done, so the parallel dispatch only ever
/// sees an immutable world.
struct FrameContext<'a> {
    scene: &'a Scene,
    camera_origin: Vec3,
    camera_to_world: Matrix,
    width: u32,
    height: u32,
    fov_scale: f64,
    aspect: f64,
    lighting_mode: LightingMode,
    shadows_enabled: bool,
}

pub struct Renderer {
    framebuffer: Framebuffer,
    lighting_mode: LightingMode,
    shadows_enabled: bool,
    parallel: bool,
    fov_scale: f64,
    aspect: f64,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Renderer {
        Renderer {
            framebuffer: Framebuffer::new(width, height),
            lighting_mode: LightingMode::Combined,
            shadows_enabled: true,
            parallel: true,
            fov_scale: 1.0,
            aspect: width as f64 / height as f64,
        }
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn lighting_mode(&self) -> LightingMode {
        self.lighting_mode
    }

    pub fn set_lighting_mode(&mut self, mode: LightingMode) {
        self.lighting_mode = mode;
    }

    pub fn shadows_enabled(&self) -> bool {
        self.shadows_enabled
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Caches the scene-derived projection constants. Called once per frame
    /// before `render`, so a runtime fov change can never go stale.
    pub fn set_scene(&mut self, scene: &Scene) {
        self.fov_scale = ((TO_RADIANS * scene.camera.fov_angle) / 2.0).tan();
        self.aspect = self.framebuffer.width as f64 / self.framebuffer.height as f64;
    }

    /// Renders one frame: rebuilds the camera basis, then shades every
    /// pixel. Each task writes exactly one pixel, so parallel rows need no
    /// synchronization and match the sequential path bit for bit.
    pub fn render(&mut self, scene: &mut Scene) {
        scene.camera.calculate_camera_to_world();
        let scene = &*scene;

        let context = FrameContext {
            scene,
            camera_origin: scene.camera.origin,
            camera_to_world: scene.camera.camera_to_world,
            width: self.framebuffer.width,
            height: self.framebuffer.height,
            fov_scale: self.fov_scale,
            aspect: self.aspect,
            lighting_mode: self.lighting_mode,
            shadows_enabled: self.shadows_enabled,
        };

        let row_width = self.framebuffer.width as usize;
        if self.parallel {
            self.framebuffer
                .pixels
                .par_chunks_mut(row_width)
                .enumerate()
                .for_each(|(py, row)| {
                    for (px, pixel) in row.iter_mut().enumerate() {
                        *pixel = render_pixel(&context, px as u32, py as u32);
                    }
                });
        } else {
            for (py, row) in self.framebuffer.pixels.chunks_mut(row_width).enumerate() {
                for (px, pixel) in row.iter_mut().enumerate() {
                    *pixel = render_pixel(&context, px as u32, py as u32);
                }
            }
        }
    }

    pub fn save_buffer_to_image(&self, path: &str) -> image::ImageResult<()> {
        let mut imgbuf = image::RgbImage::new(self.framebuffer.width, self.framebuffer.height);
        for (x, y, pixel) in imgbuf.enumerate_pixels_mut() {
            let packed = self.framebuffer.pixel(x, y);
            *pixel = image::Rgb([(packed >> 16) as u8, (packed >> 8) as u8, packed as u8]);
        }
        imgbuf.save(path)
    }

    pub fn cycle_lighting_mode(&mut self) {
        self.lighting_mode = self.lighting_mode.next();
        println!("Lighting mode: {}", self.lighting_mode.label());
    }

    pub fn toggle_shadows(&mut self) {
        self.shadows_enabled = !self.shadows_enabled;
    }
}

/// Builds the primary ray through the center of pixel (px, py) and shades
/// the closest hit, one light at a time.
fn render_pixel(context: &FrameContext, px: u32, py: u32) -> u32 {
    let rx = px as f64 + 0.5;
    let ry = py as f64 + 0.5;
    let world_x = (2.0 * (rx / context.width as f64) - 1.0) * context.aspect * context.fov_scale;
    let world_y = (1.0 - 2.0 * (ry / context.height as f64)) * context.fov_scale;

    let direction = context
        .camera_to_world
        .transform_vector(Vec3::new(world_x, world_y, 1.0))
        .normalize();
    let ray = Ray::primary(context.camera_origin, direction);

    let mut color = Color::black();

    if let Some(hit) = context.scene.closest_hit(&ray) {
        for light in &context.scene.lights {
            let (l, radiance, distance) = light.illuminate(hit.point);
            let observed_area = hit.normal.dot(l);
            let shadow_ray = Ray::shadow(hit.point, l, distance);

            if context.shadows_enabled && context.scene.any_hit(&shadow_ray) {
                // Occluded lights dim everything gathered so far instead of
                // merely skipping their own contribution. Deliberate: this
                // reproduces the renderer's established shadow look.
                color *= 0.5;
            } else {
                match context.lighting_mode {
                    LightingMode::ObservedArea => {
                        if observed_area > 0.0 {
                            color += Color::white() * observed_area;
                        }
                    }
                    LightingMode::Radiance => {
                        color += radiance;
                    }
                    LightingMode::Brdf => {
                        color += context
                            .scene
                            .material(hit.material_index)
                            .shade(&hit, l, -ray.direction);
                    }
                    LightingMode::Combined => {
                        if observed_area > 0.0 {
                            color += radiance
                                * context
                                    .scene
                                    .material(hit.material_index)
                                    .shade(&hit, l, -ray.direction)
                                * observed_area;
                        }
                    }
                }
            }
        }
    }

    color.max_to_one();
    Framebuffer::pack_rgb(
        (color.r * 255.0) as u8,
        (color.g * 255.0) as u8,
        (color.b * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::Material;
    use crate::test_utils::*;
    use std::f64::consts::PI;

    fn red(pixel: u32) -> u8 {
        (pixel >> 16) as u8
    }

    // Default camera at the origin looking down +Z, one sphere big enough
    // to cover the whole 90-degree frustum of a 2x2 image.
    fn sphere_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), 3.0, 0);
        scene
    }

    #[test]
    fn all_pixels_hit_the_sphere() {
        let scene = sphere_scene();
        for py in 0..2u32 {
            for px in 0..2u32 {
                let rx = px as f64 + 0.5;
                let ry = py as f64 + 0.5;
                let world_x = 2.0 * (rx / 2.0) - 1.0;
                let world_y = 1.0 - 2.0 * (ry / 2.0);
                let ray = Ray::primary(
                    Vec3::zero(),
                    Vec3::new(world_x, world_y, 1.0).normalize(),
                );
                let hit = scene.closest_hit(&ray).expect("pixel ray must hit");
                assert!(hit.t >= ray.tmin && hit.t <= ray.tmax);
                assert!((hit.point - ray.point_at(hit.t)).length() < 1e-3);
            }
        }
    }

    #[test]
    fn observed_area_without_lights_is_black() {
        let mut scene = sphere_scene();
        let mut renderer = Renderer::new(2, 2);
        renderer.set_lighting_mode(LightingMode::ObservedArea);
        renderer.set_scene(&scene);
        renderer.render(&mut scene);

        assert!(renderer.framebuffer().pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn combined_with_point_light_is_brighter_than_black() {
        let mut scene = sphere_scene();
        scene.add_point_light(Vec3::zero(), 25.0, Color::white());

        let mut renderer = Renderer::new(2, 2);
        renderer.set_lighting_mode(LightingMode::Combined);
        renderer.set_scene(&scene);
        renderer.render(&mut scene);

        for &pixel in renderer.framebuffer().pixels() {
            assert!(red(pixel) > 0);
        }
    }

    #[test]
    fn shadowed_wall_is_darker_than_lit_wall() {
        // Wall at z=10 facing the camera, unit sphere in front of it, light
        // well off to the side so its shadow lands left of the sphere's
        // silhouette.
        let mut scene = Scene::new();
        let white = scene.add_material(Material::Lambert {
            color: Color::white(),
            diffuse_reflectance: 1.0,
        });
        scene.add_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), white);
        scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, white);
        scene.add_point_light(Vec3::new(6.0, 0.0, 0.0), 500.0, Color::white());

        let mut renderer = Renderer::new(11, 11);
        renderer.set_lighting_mode(LightingMode::Combined);
        renderer.set_scene(&scene);
        renderer.render(&mut scene);

        let fb = renderer.framebuffer();
        let sphere_pixel = fb.pixel(5, 5); // lit side of the sphere
        let shadow_pixel = fb.pixel(2, 5); // wall inside the shadow cone
        let lit_pixel = fb.pixel(9, 5); // open wall

        assert!(red(sphere_pixel) > red(shadow_pixel));
        assert!(red(lit_pixel) > red(shadow_pixel));
    }

    #[test]
    fn occluded_light_halves_accumulated_color() {
        // One clear light straight ahead, then a second light whose shadow
        // ray is blocked: the second light must halve what the first one
        // contributed rather than just adding nothing.
        let mut scene = Scene::new();
        let white = scene.add_material(Material::Lambert {
            color: Color::white(),
            diffuse_reflectance: 1.0,
        });
        scene.add_plane(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0), white);
        scene.add_sphere(Vec3::new(1.0, 0.0, 1.5), 0.2, white);
        scene.add_point_light(Vec3::zero(), 4.0, Color::white());
        scene.add_point_light(Vec3::new(2.0, 0.0, 1.0), 5.0, Color::white());

        let mut renderer = Renderer::new(1, 1);
        renderer.set_lighting_mode(LightingMode::Combined);
        renderer.set_scene(&scene);
        renderer.render(&mut scene);

        // First light contributes exactly 1/pi, the occluded one halves it.
        let expected = ((1.0 / (2.0 * PI)) * 255.0) as u8;
        assert_eq!(red(renderer.framebuffer().pixel(0, 0)), expected);
    }

    #[test]
    fn disabling_shadows_restores_full_contribution() {
        let mut scene = Scene::new();
        let white = scene.add_material(Material::Lambert {
            color: Color::white(),
            diffuse_reflectance: 1.0,
        });
        scene.add_plane(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0), white);
        scene.add_sphere(Vec3::new(1.0, 0.0, 1.5), 0.2, white);
        scene.add_point_light(Vec3::zero(), 4.0, Color::white());
        scene.add_point_light(Vec3::new(2.0, 0.0, 1.0), 5.0, Color::white());

        let mut renderer = Renderer::new(1, 1);
        renderer.set_lighting_mode(LightingMode::Combined);
        renderer.toggle_shadows();
        assert!(!renderer.shadows_enabled());
        renderer.set_scene(&scene);
        renderer.render(&mut scene);

        let halved = ((1.0 / (2.0 * PI)) * 255.0) as u8;
        assert!(red(renderer.framebuffer().pixel(0, 0)) > halved);
    }

    #[test]
    fn directional_light_shades_and_casts_unbounded_shadows() {
        let mut scene = Scene::new();
        let white = scene.add_material(Material::Lambert {
            color: Color::white(),
            diffuse_reflectance: 1.0,
        });
        scene.add_plane(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), white);
        scene.add_directional_light(Vec3::unit_z(), 1.0, Color::white());

        let mut renderer = Renderer::new(1, 1);
        renderer.set_lighting_mode(LightingMode::Combined);
        renderer.set_scene(&scene);
        renderer.render(&mut scene);

        // Head-on directional light on a white Lambert wall: 1/pi.
        let lit = ((1.0 / PI) * 255.0) as u8;
        assert_eq!(red(renderer.framebuffer().pixel(0, 0)), lit);

        // An occluder far behind the camera still blocks the light: the
        // shadow ray toward a directional light is unbounded.
        scene.add_sphere(Vec3::new(0.0, 0.0, -30.0), 1.0, white);
        renderer.render(&mut scene);
        assert_eq!(red(renderer.framebuffer().pixel(0, 0)), 0);
    }

    #[test]
    fn sequential_and_parallel_dispatch_match_bit_for_bit() {
        let mut scene = crate::presets::ScenePreset::W3.build();

        let mut renderer = Renderer::new(16, 12);
        renderer.set_scene(&scene);
        renderer.render(&mut scene);
        let parallel_pixels = renderer.framebuffer().pixels().to_vec();

        renderer.set_parallel(false);
        renderer.render(&mut scene);
        assert_eq!(renderer.framebuffer().pixels(), &parallel_pixels[..]);
    }

    #[test]
    fn lighting_mode_cycles_through_all_four() {
        let mut renderer = Renderer::new(1, 1);
        assert_eq!(renderer.lighting_mode(), LightingMode::Combined);
        renderer.cycle_lighting_mode();
        assert_eq!(renderer.lighting_mode(), LightingMode::ObservedArea);
        renderer.cycle_lighting_mode();
        assert_eq!(renderer.lighting_mode(), LightingMode::Radiance);
        renderer.cycle_lighting_mode();
        assert_eq!(renderer.lighting_mode(), LightingMode::Brdf);
        renderer.cycle_lighting_mode();
        assert_eq!(renderer.lighting_mode(), LightingMode::Combined);
    }

    #[test]
    fn pack_rgb_layout() {
        assert_eq!(Framebuffer::pack_rgb(0xff, 0, 0), 0xff0000);
        assert_eq!(Framebuffer::pack_rgb(0, 0xff, 0), 0x00ff00);
        assert_eq!(Framebuffer::pack_rgb(0, 0, 0xff), 0x0000ff);
        assert_eq!(Framebuffer::pack_rgb(0x12, 0x34, 0x56), 0x123456);
    }

    #[test]
    fn fov_scale_follows_scene_camera() {
        let mut scene = Scene::new();
        scene.camera.fov_angle = 60.0;
        let mut renderer = Renderer::new(4, 2);
        renderer.set_scene(&scene);
        assert_approx_eq!(renderer.fov_scale, (30.0 * TO_RADIANS).tan());
        assert_approx_eq!(renderer.aspect, 2.0);
    }
}
