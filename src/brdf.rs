//! The BRDF building blocks shared by the material variants: Lambert
//! diffuse, Phong specular, and the Cook-Torrance microfacet terms
//! (Fresnel-Schlick, GGX normal distribution, Smith geometry).
//!
//! All functions assume `l` (toward the light), `v` (toward the eye) and
//! `n` are unit vectors on the upper hemisphere; the shading loop clamps
//! n.l before adding contributions.

use std::f64::consts::PI;

use crate::color::Color;
use crate::vector::Vec3;

/// Lambert diffuse with a scalar reflectance: color * kd / pi.
pub fn lambert(diffuse_reflectance: f64, diffuse_color: Color) -> Color {
    diffuse_color * diffuse_reflectance / PI
}

/// Lambert diffuse with a per-channel reflectance, used by Cook-Torrance
/// where kd = 1 - F is a color.
pub fn lambert_color(diffuse_reflectance: Color, diffuse_color: Color) -> Color {
    diffuse_color * diffuse_reflectance / PI
}

/// Phong specular lobe: ks * cos^exponent of the angle between the view
/// direction and the light direction mirrored about the normal.
pub fn phong(specular_reflectance: f64, exponent: f64, l: Vec3, v: Vec3, n: Vec3) -> Color {
    let reflected = (-l).reflect(n);
    let cos_alpha = reflected.dot(v).max(0.0);
    Color::white() * (specular_reflectance * cos_alpha.powf(exponent))
}

/// Schlick approximation of the Fresnel term: F0 + (1 - F0)(1 - h.v)^5.
pub fn fresnel_schlick(h: Vec3, v: Vec3, f0: Color) -> Color {
    let cos_theta = h.dot(v).max(0.0);
    f0 + (Color::white() - f0) * (1.0 - cos_theta).powi(5)
}

/// GGX/Trowbridge-Reitz normal distribution with alpha = roughness^2.
pub fn ggx_normal_distribution(n: Vec3, h: Vec3, roughness: f64) -> f64 {
    let alpha_squared = roughness.powi(4);
    let n_dot_h = n.dot(h);
    let denom = n_dot_h * n_dot_h * (alpha_squared - 1.0) + 1.0;
    alpha_squared / (PI * denom * denom)
}

fn smith_g1(n_dot_x: f64, k: f64) -> f64 {
    n_dot_x / (n_dot_x * (1.0 - k) + k)
}

/// Smith shadowing-masking term for direct lighting, k = (roughness+1)^2/8.
pub fn smith_geometry(n: Vec3, v: Vec3, l: Vec3, roughness: f64) -> f64 {
    let k = (roughness + 1.0).powi(2) / 8.0;
    smith_g1(n.dot(v), k) * smith_g1(n.dot(l), k)
}
