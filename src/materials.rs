use crate::algebra::are_equal;
use crate::brdf;
use crate::color::Color;
use crate::system::HitRecord;
use crate::vector::Vec3;

/// Surface response as a tagged variant. The scene owns a contiguous
/// `Vec<Material>` indexed by the `u8` material index carried in every
/// primitive and hit record, which keeps dispatch off the heap on the
/// shading hot path.
#[derive(Debug, Copy, Clone)]
pub enum Material {
    /// Unlit constant color, for debug scenes.
    SolidColor { color: Color },
    Lambert {
        color: Color,
        diffuse_reflectance: f64,
    },
    LambertPhong {
        color: Color,
        diffuse_reflectance: f64,
        specular_reflectance: f64,
        phong_exponent: f64,
    },
    CookTorrance {
        albedo: Color,
        metalness: f64,
        roughness: f64,
    },
}

impl Material {
    /// Evaluates the BRDF for a light direction `l` and view direction `v`,
    /// both unit vectors pointing away from the surface.
    pub fn shade(&self, hit: &HitRecord, l: Vec3, v: Vec3) -> Color {
        match *self {
            Material::SolidColor { color } => color,
            Material::Lambert {
                color,
                diffuse_reflectance,
            } => brdf::lambert(diffuse_reflectance, color),
            Material::LambertPhong {
                color,
                diffuse_reflectance,
                specular_reflectance,
                phong_exponent,
            } => {
                brdf::lambert(diffuse_reflectance, color)
                    + brdf::phong(specular_reflectance, phong_exponent, l, v, hit.normal)
            }
            Material::CookTorrance {
                albedo,
                metalness,
                roughness,
            } => cook_torrance(hit.normal, l, v, albedo, metalness, roughness),
        }
    }
}

/// Cook-Torrance microfacet model: specular = D*F*G / (4 (n.v)(n.l)),
/// with the diffuse lobe weighted by the energy the Fresnel term leaves
/// over. Metals keep their albedo as F0 and have no diffuse component.
fn cook_torrance(n: Vec3, l: Vec3, v: Vec3, albedo: Color, metalness: f64, roughness: f64) -> Color {
    let h = (v + l).normalize();
    let f0 = if are_equal(metalness, 0.0) {
        Color::new(0.04, 0.04, 0.04)
    } else {
        albedo
    };

    let f = brdf::fresnel_schlick(h, v, f0);
    let d = brdf::ggx_normal_distribution(n, h, roughness);
    let g = brdf::smith_geometry(n, v, l, roughness);

    let specular = f * (d * g) / (4.0 * v.dot(n) * l.dot(n));
    let kd = if are_equal(metalness, 1.0) {
        Color::black()
    } else {
        Color::white() - f
    };
    let diffuse = brdf::lambert_color(kd, albedo);

    diffuse + specular
}
