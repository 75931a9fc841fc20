use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::vector::Vec3;

/// Bias keeping primary rays from self-intersecting the surface they
/// start on.
pub const PRIMARY_RAY_MIN: f64 = 1e-4;

/// Shadow rays need a larger bias: they start exactly on a shaded surface
/// and a near-zero t would report the surface as occluding itself.
pub const SHADOW_RAY_MIN: f64 = 0.01;

#[derive(Debug, Copy, Clone)]
pub struct Options {
    pub num_threads: usize,
    pub width: u32,
    pub height: u32,
    pub frames: u32,
    pub timestep: f64,
}

#[derive(Debug, Copy, Clone)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub tmin: f64,
    pub tmax: f64,
}

impl Ray {
    /// Camera ray: effectively unbounded, with the small self-intersection
    /// bias. The bound is f64::MAX rather than infinity so that the
    /// infinite t of a ray running exactly parallel to a plane or culled
    /// triangle fails the range check instead of producing a NaN hit.
    pub fn primary(origin: Vec3, direction: Vec3) -> Ray {
        Ray {
            origin,
            direction,
            tmin: PRIMARY_RAY_MIN,
            tmax: f64::MAX,
        }
    }

    /// Occlusion ray toward a light; `distance` bounds the search so
    /// geometry beyond the light does not cast a shadow.
    pub fn shadow(origin: Vec3, direction: Vec3, distance: f64) -> Ray {
        Ray {
            origin,
            direction,
            tmin: SHADOW_RAY_MIN,
            tmax: distance,
        }
    }

    pub fn point_at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Surface interaction record produced by a successful closest-hit query.
#[derive(Debug, Copy, Clone)]
pub struct HitRecord {
    pub point: Vec3,
    pub normal: Vec3,
    pub t: f64,
    pub material_index: u8,
}

pub trait Intersectable {
    /// Closest-hit query: the nearest intersection with t in
    /// [ray.tmin, ray.tmax], or None.
    fn intersect(&self, ray: &Ray) -> Option<HitRecord>;

    /// Any-hit query: whether any intersection exists in
    /// [ray.tmin, ray.tmax]. Used for shadow rays, where triangle culling
    /// applies inverted signs so lit-side geometry still occludes.
    fn intersect_any(&self, ray: &Ray) -> bool;
}

pub trait RenderProgress {
    fn render_started(&mut self, options: &Options);
    fn frame_finished(&mut self, options: &Options, frame: u32);
    fn render_finished(&mut self, options: &Options);
}

/// Offline frame loop: steps the scene's animation hook, refreshes the
/// renderer's cached camera parameters and renders each frame in turn.
/// Scene mutation happens strictly before the parallel dispatch inside
/// `Renderer::render`; the final framebuffer is left in the renderer.
pub fn render_frames<T>(options: &Options, scene: &mut Scene, renderer: &mut Renderer, progress: &mut T)
where
    T: RenderProgress,
{
    progress.render_started(options);

    let mut total_time = 0.0;
    for frame in 0..options.frames {
        scene.update(total_time);
        renderer.set_scene(scene);
        renderer.render(scene);
        progress.frame_finished(options, frame + 1);
        total_time += options.timestep;
    }

    progress.render_finished(options);
}
