//! Built-in demo scenes. Each preset is a builder function producing a
//! fully initialized `Scene`; animated presets also install an update hook.

use std::f64::consts::FRAC_PI_2;

use crate::color::Color;
use crate::materials::Material;
use crate::obj;
use crate::scene::Scene;
use crate::shapes::{CullMode, Triangle, TriangleMesh};
use crate::vector::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenePreset {
    /// Solid-color box with two large spheres.
    W1,
    /// Room with six spheres and a single point light.
    W2,
    /// Cook-Torrance sphere array under three colored lights.
    W3,
    /// Rotating two-triangle quad.
    W4Test,
    /// Sphere array plus three rotating triangles with differing cull modes.
    W4Reference,
    /// OBJ-loaded mesh, back-face culled.
    W4Bunny,
    /// Pulsing sphere with a second sphere orbiting it.
    W4Extra,
}

impl ScenePreset {
    pub fn build(self) -> Scene {
        match self {
            ScenePreset::W1 => scene_w1(),
            ScenePreset::W2 => scene_w2(),
            ScenePreset::W3 => scene_w3(),
            ScenePreset::W4Test => scene_w4_test(),
            ScenePreset::W4Reference => scene_w4_reference(),
            ScenePreset::W4Bunny => scene_w4_bunny(),
            ScenePreset::W4Extra => scene_w4_extra(),
        }
    }
}

fn gray_blue() -> Color {
    Color::new(0.49, 0.57, 0.57)
}

fn gray_metal() -> Color {
    Color::new(0.972, 0.960, 0.915)
}

fn gray_plastic() -> Color {
    Color::new(0.75, 0.75, 0.75)
}

/// Adds the five walls shared by the room scenes, all in matte gray-blue.
fn add_room(scene: &mut Scene, material_index: u8) {
    scene.add_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), material_index); // back
    scene.add_plane(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), material_index); // bottom
    scene.add_plane(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0), material_index); // top
    scene.add_plane(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), material_index); // right
    scene.add_plane(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), material_index); // left
}

fn add_three_point_lights(scene: &mut Scene) {
    scene.add_point_light(Vec3::new(0.0, 5.0, 5.0), 50.0, Color::new(1.0, 0.61, 0.45)); // backlight
    scene.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Color::new(1.0, 0.8, 0.45)); // front left
    scene.add_point_light(Vec3::new(2.5, 2.5, -5.0), 50.0, Color::new(0.34, 0.47, 0.68));
}

fn rotate_meshes(scene: &mut Scene, total_time: f64) {
    for mesh in &mut scene.meshes {
        mesh.rotate_y(FRAC_PI_2 * total_time);
        mesh.update_transforms();
    }
}

fn scene_w1() -> Scene {
    let mut scene = Scene::new();

    let mat_solid_red = 0;
    let mat_solid_blue = scene.add_material(Material::SolidColor { color: Color::blue() });
    let mat_solid_yellow = scene.add_material(Material::SolidColor { color: Color::yellow() });
    let mat_solid_green = scene.add_material(Material::SolidColor { color: Color::green() });
    let mat_solid_magenta = scene.add_material(Material::SolidColor { color: Color::magenta() });

    scene.add_sphere(Vec3::new(-25.0, 0.0, 100.0), 50.0, mat_solid_red);
    scene.add_sphere(Vec3::new(25.0, 0.0, 100.0), 50.0, mat_solid_blue);

    scene.add_plane(Vec3::new(-75.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), mat_solid_green);
    scene.add_plane(Vec3::new(75.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), mat_solid_green);
    scene.add_plane(Vec3::new(0.0, -75.0, 0.0), Vec3::new(0.0, 1.0, 0.0), mat_solid_yellow);
    scene.add_plane(Vec3::new(0.0, 75.0, 0.0), Vec3::new(0.0, -1.0, 0.0), mat_solid_yellow);
    scene.add_plane(Vec3::new(0.0, 0.0, 125.0), Vec3::new(0.0, 0.0, -1.0), mat_solid_magenta);

    scene
}

fn scene_w2() -> Scene {
    let mut scene = Scene::new();
    scene.camera.origin = Vec3::new(0.0, 3.0, -9.0);
    scene.camera.fov_angle = 45.0;

    let mat_solid_red = 0;
    let mat_solid_blue = scene.add_material(Material::SolidColor { color: Color::blue() });
    let mat_solid_yellow = scene.add_material(Material::SolidColor { color: Color::yellow() });
    let mat_solid_green = scene.add_material(Material::SolidColor { color: Color::green() });
    let mat_solid_magenta = scene.add_material(Material::SolidColor { color: Color::magenta() });

    scene.add_plane(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), mat_solid_green);
    scene.add_plane(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), mat_solid_green);
    scene.add_plane(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), mat_solid_yellow);
    scene.add_plane(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0), mat_solid_yellow);
    scene.add_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), mat_solid_magenta);

    scene.add_sphere(Vec3::new(-1.75, 1.0, 0.0), 0.75, mat_solid_red);
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 0.75, mat_solid_blue);
    scene.add_sphere(Vec3::new(1.75, 1.0, 0.0), 0.75, mat_solid_red);
    scene.add_sphere(Vec3::new(-1.75, 3.0, 0.0), 0.75, mat_solid_blue);
    scene.add_sphere(Vec3::new(0.0, 3.0, 0.0), 0.75, mat_solid_red);
    scene.add_sphere(Vec3::new(1.75, 3.0, 0.0), 0.75, mat_solid_blue);

    scene.add_point_light(Vec3::new(0.0, 5.0, -5.0), 70.0, Color::white());

    scene
}

/// Shared by W3 and the W4 reference scene: the six-sphere Cook-Torrance
/// array showing the metal/plastic roughness ladder.
fn add_cook_torrance_sphere_array(scene: &mut Scene) {
    let mat_ct_rough_metal = scene.add_material(Material::CookTorrance {
        albedo: gray_metal(),
        metalness: 1.0,
        roughness: 1.0,
    });
    let mat_ct_medium_metal = scene.add_material(Material::CookTorrance {
        albedo: gray_metal(),
        metalness: 1.0,
        roughness: 0.6,
    });
    let mat_ct_smooth_metal = scene.add_material(Material::CookTorrance {
        albedo: gray_metal(),
        metalness: 1.0,
        roughness: 0.1,
    });
    let mat_ct_rough_plastic = scene.add_material(Material::CookTorrance {
        albedo: gray_plastic(),
        metalness: 0.0,
        roughness: 1.0,
    });
    let mat_ct_medium_plastic = scene.add_material(Material::CookTorrance {
        albedo: gray_plastic(),
        metalness: 0.0,
        roughness: 0.6,
    });
    let mat_ct_smooth_plastic = scene.add_material(Material::CookTorrance {
        albedo: gray_plastic(),
        metalness: 0.0,
        roughness: 0.1,
    });

    scene.add_sphere(Vec3::new(-1.75, 1.0, 0.0), 0.75, mat_ct_rough_metal);
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 0.75, mat_ct_medium_metal);
    scene.add_sphere(Vec3::new(1.75, 1.0, 0.0), 0.75, mat_ct_smooth_metal);
    scene.add_sphere(Vec3::new(-1.75, 3.0, 0.0), 0.75, mat_ct_rough_plastic);
    scene.add_sphere(Vec3::new(0.0, 3.0, 0.0), 0.75, mat_ct_medium_plastic);
    scene.add_sphere(Vec3::new(1.75, 3.0, 0.0), 0.75, mat_ct_smooth_plastic);
}

fn scene_w3() -> Scene {
    let mut scene = Scene::new();
    scene.camera.origin = Vec3::new(0.0, 3.0, -9.0);
    scene.camera.fov_angle = 45.0;

    add_cook_torrance_sphere_array(&mut scene);

    let mat_lambert_gray_blue = scene.add_material(Material::Lambert {
        color: gray_blue(),
        diffuse_reflectance: 1.0,
    });
    add_room(&mut scene, mat_lambert_gray_blue);

    scene.add_point_light(Vec3::new(0.0, 5.0, 5.0), 50.0, Color::new(1.0, 0.61, 0.45));
    scene.add_point_light(Vec3::new(-2.5, 5.0, -5.0), 70.0, Color::new(1.0, 0.8, 0.45));
    scene.add_point_light(Vec3::new(2.5, 2.5, -5.0), 50.0, Color::new(0.34, 0.47, 0.68));

    scene
}

fn scene_w4_test() -> Scene {
    let mut scene = Scene::new();
    scene.camera.origin = Vec3::new(0.0, 1.0, -5.0);
    scene.camera.fov_angle = 45.0;

    let mat_lambert_gray_blue = scene.add_material(Material::Lambert {
        color: gray_blue(),
        diffuse_reflectance: 1.0,
    });
    let mat_lambert_white = scene.add_material(Material::Lambert {
        color: Color::white(),
        diffuse_reflectance: 1.0,
    });

    add_room(&mut scene, mat_lambert_gray_blue);

    let mut quad = TriangleMesh::new(CullMode::NoCulling, mat_lambert_white);
    quad.positions = vec![
        Vec3::new(-0.75, -1.0, 0.0),
        Vec3::new(-0.75, 1.0, 0.0),
        Vec3::new(0.75, 1.0, 1.0),
        Vec3::new(0.75, -1.0, 0.0),
    ];
    quad.indices = vec![0, 1, 2, 0, 2, 3];
    quad.calculate_normals();
    quad.update_aabb();
    quad.translate(Vec3::new(0.0, 1.5, 0.0));
    quad.update_transforms();
    scene.add_mesh(quad);

    add_three_point_lights(&mut scene);
    scene.set_update(rotate_meshes);

    scene
}

fn scene_w4_reference() -> Scene {
    let mut scene = Scene::new();
    scene.camera.origin = Vec3::new(0.0, 3.0, -9.0);
    scene.camera.fov_angle = 45.0;

    add_cook_torrance_sphere_array(&mut scene);

    let mat_lambert_gray_blue = scene.add_material(Material::Lambert {
        color: gray_blue(),
        diffuse_reflectance: 1.0,
    });
    let mat_lambert_white = scene.add_material(Material::Lambert {
        color: Color::white(),
        diffuse_reflectance: 1.0,
    });

    add_room(&mut scene, mat_lambert_gray_blue);

    // Clockwise winding; the three meshes differ only in cull mode.
    let base_triangle = Triangle::new(
        Vec3::new(-0.75, 1.5, 0.0),
        Vec3::new(0.75, 0.0, 0.0),
        Vec3::new(-0.75, 0.0, 0.0),
    );

    let placements = [
        (CullMode::BackFaceCulling, Vec3::new(-1.75, 4.5, 0.0)),
        (CullMode::FrontFaceCulling, Vec3::new(0.0, 4.5, 0.0)),
        (CullMode::NoCulling, Vec3::new(1.75, 4.5, 0.0)),
    ];
    for (cull_mode, position) in placements {
        let mut mesh = TriangleMesh::new(cull_mode, mat_lambert_white);
        mesh.append_triangle(&base_triangle);
        mesh.update_aabb();
        mesh.translate(position);
        mesh.update_transforms();
        scene.add_mesh(mesh);
    }

    add_three_point_lights(&mut scene);
    scene.set_update(rotate_meshes);

    scene
}

fn scene_w4_bunny() -> Scene {
    let mut scene = Scene::new();
    scene.camera.origin = Vec3::new(0.0, 1.0, -5.0);
    scene.camera.fov_angle = 45.0;

    let mat_lambert_gray_blue = scene.add_material(Material::Lambert {
        color: gray_blue(),
        diffuse_reflectance: 1.0,
    });
    let mat_lambert_white = scene.add_material(Material::Lambert {
        color: Color::white(),
        diffuse_reflectance: 1.0,
    });

    add_room(&mut scene, mat_lambert_gray_blue);

    let mut bunny = match obj::load_obj("resources/bunny.obj") {
        Ok(data) => TriangleMesh::with_geometry(
            data.positions,
            data.indices,
            CullMode::BackFaceCulling,
            mat_lambert_white,
        ),
        // A missing model is not fatal; the scene renders without it.
        Err(err) => {
            eprintln!("warning: {}", err);
            TriangleMesh::new(CullMode::BackFaceCulling, mat_lambert_white)
        }
    };
    bunny.scale(Vec3::new(1.5, 1.5, 1.5));
    bunny.update_transforms();
    scene.add_mesh(bunny);

    add_three_point_lights(&mut scene);
    scene.set_update(rotate_meshes);

    scene
}

fn scene_w4_extra() -> Scene {
    let mut scene = Scene::new();
    scene.camera.origin = Vec3::new(0.0, 3.0, -8.0);
    scene.camera.fov_angle = 45.0;

    let mat_ct_medium_metal = scene.add_material(Material::CookTorrance {
        albedo: gray_metal(),
        metalness: 1.0,
        roughness: 0.6,
    });
    let mat_ct_smooth_metal = scene.add_material(Material::CookTorrance {
        albedo: gray_metal(),
        metalness: 1.0,
        roughness: 0.1,
    });
    scene.add_material(Material::CookTorrance {
        albedo: gray_plastic(),
        metalness: 0.0,
        roughness: 0.1,
    });

    scene.add_material(Material::Lambert {
        color: gray_blue(),
        diffuse_reflectance: 1.0,
    });
    let mat_lambert_red = scene.add_material(Material::Lambert {
        color: Color::red(),
        diffuse_reflectance: 1.0,
    });
    let mat_lambert_green = scene.add_material(Material::Lambert {
        color: Color::green(),
        diffuse_reflectance: 1.0,
    });
    let mat_lambert_blue = scene.add_material(Material::Lambert {
        color: Color::blue(),
        diffuse_reflectance: 1.0,
    });
    let mat_lambert_phong_floor = scene.add_material(Material::LambertPhong {
        color: Color::white(),
        diffuse_reflectance: 0.7,
        specular_reflectance: 0.8,
        phong_exponent: 0.7,
    });
    let mat_lambert_phong_ceiling = scene.add_material(Material::LambertPhong {
        color: Color::white(),
        diffuse_reflectance: 0.3,
        specular_reflectance: 0.2,
        phong_exponent: 0.3,
    });

    scene.add_plane(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0), mat_lambert_green);
    scene.add_plane(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), mat_lambert_phong_floor);
    scene.add_plane(Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, -1.0, 0.0), mat_lambert_phong_ceiling);
    scene.add_plane(Vec3::new(5.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), mat_lambert_blue);
    scene.add_plane(Vec3::new(-5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), mat_lambert_red);

    scene.add_sphere(Vec3::new(0.0, 3.0, 0.0), 0.5, mat_ct_smooth_metal);
    scene.add_sphere(Vec3::new(0.0, 3.0, 0.0), 0.5, mat_ct_medium_metal);

    add_three_point_lights(&mut scene);
    scene.set_update(pulse_and_orbit);

    scene
}

/// W4Extra animation: the first sphere's radius follows |sin(t)| while the
/// second orbits it at a fixed distance.
fn pulse_and_orbit(scene: &mut Scene, total_time: f64) {
    scene.spheres[0].radius = total_time.sin().abs();

    let orbit_radius = 2.0;
    let center = scene.spheres[0].center;
    scene.spheres[1].center = Vec3::new(
        center.x + orbit_radius * total_time.cos(),
        center.y + orbit_radius * total_time.sin(),
        center.z,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn w1_contains_box_and_two_spheres() {
        let scene = ScenePreset::W1.build();
        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.planes.len(), 5);
        assert_eq!(scene.lights.len(), 0);
        assert_eq!(scene.materials.len(), 5);
    }

    #[test]
    fn w2_has_one_light_and_six_spheres() {
        let scene = ScenePreset::W2.build();
        assert_eq!(scene.spheres.len(), 6);
        assert_eq!(scene.lights.len(), 1);
        assert_approx_eq!(scene.camera.fov_angle, 45.0);
    }

    #[test]
    fn w3_sphere_array_is_cook_torrance() {
        let scene = ScenePreset::W3.build();
        assert_eq!(scene.spheres.len(), 6);
        assert_eq!(scene.lights.len(), 3);
        for sphere in &scene.spheres {
            match scene.material(sphere.material_index) {
                Material::CookTorrance { .. } => {}
                other => panic!("expected Cook-Torrance, got {:?}", other),
            }
        }
    }

    #[test]
    fn w4_reference_mesh_cull_modes() {
        let scene = ScenePreset::W4Reference.build();
        assert_eq!(scene.meshes.len(), 3);
        assert_eq!(scene.meshes[0].cull_mode, CullMode::BackFaceCulling);
        assert_eq!(scene.meshes[1].cull_mode, CullMode::FrontFaceCulling);
        assert_eq!(scene.meshes[2].cull_mode, CullMode::NoCulling);
        for mesh in &scene.meshes {
            assert_eq!(mesh.face_count(), 1);
        }
    }

    #[test]
    fn w4_test_update_rotates_the_quad() {
        let mut scene = ScenePreset::W4Test.build();
        let before = scene.meshes[0].transformed_positions.clone();
        scene.update(1.0);
        let after = &scene.meshes[0].transformed_positions;
        assert_eq!(before.len(), after.len());
        assert!((before[0] - after[0]).length() > 1e-6);
    }

    #[test]
    fn w4_extra_update_moves_and_resizes_spheres() {
        let mut scene = ScenePreset::W4Extra.build();
        scene.update(1.0);
        assert_approx_eq!(scene.spheres[0].radius, 1.0_f64.sin());
        let offset = scene.spheres[1].center - scene.spheres[0].center;
        assert_approx_eq!(offset.length(), 2.0);
    }

    #[test]
    fn every_preset_builds_with_default_material() {
        let presets = [
            ScenePreset::W1,
            ScenePreset::W2,
            ScenePreset::W3,
            ScenePreset::W4Test,
            ScenePreset::W4Reference,
            ScenePreset::W4Bunny,
            ScenePreset::W4Extra,
        ];
        for preset in presets {
            let scene = preset.build();
            assert!(!scene.materials.is_empty());
        }
    }
}
