#[cfg(test)]
#[macro_use]
mod test_utils;

mod algebra;
mod brdf;
mod camera;
mod color;
mod lights;
mod materials;
mod matrix;
mod obj;
mod presets;
mod renderer;
mod scene;
mod shapes;
mod system;
mod vector;

use std::io::Stdout;
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread::sleep;
use std::thread::spawn;
use std::thread::JoinHandle;
use std::time::Duration;

use clap::Parser;
use pbr::ProgressBar;
use rayon::ThreadPoolBuilder;

use crate::presets::ScenePreset;
use crate::renderer::{LightingMode, Renderer};
use crate::system::{render_frames, Options, RenderProgress};

#[derive(Parser)]
#[command(version = "0.1.0", about = "Offline CPU ray tracer")]
struct CommandLineOptions {
    /// Scene preset to render
    #[arg(long, value_enum, default_value_t = ScenePreset::W3)]
    scene: ScenePreset,

    /// Image width
    #[arg(long, default_value = "640", value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Image height
    #[arg(long, default_value = "480", value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Number of render threads
    #[arg(short('t'), long, value_parser = clap::value_parser!(usize))]
    threads: Option<usize>,

    /// Number of frames to step through; animated scenes advance between
    /// frames and the last frame is the one written to disk
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,

    /// Simulated seconds between frames
    #[arg(long, default_value_t = 1.0 / 30.0)]
    timestep: f64,

    /// Lighting mode to render with
    #[arg(long, value_enum, default_value_t = CliLightingMode::Combined)]
    mode: CliLightingMode,

    /// Disable shadow rays
    #[arg(long)]
    no_shadows: bool,

    /// Render pixels sequentially instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Output image path
    #[arg(long, default_value = "RayTracing_Buffer.bmp")]
    output: String,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliLightingMode {
    /// Clamped cosine between surface normal and light direction
    ObservedArea,
    /// Incident light color and intensity only
    Radiance,
    /// Material response only
    Brdf,
    /// Radiance * BRDF * observed area
    Combined,
}

impl From<CliLightingMode> for LightingMode {
    fn from(mode: CliLightingMode) -> Self {
        match mode {
            CliLightingMode::ObservedArea => LightingMode::ObservedArea,
            CliLightingMode::Radiance => LightingMode::Radiance,
            CliLightingMode::Brdf => LightingMode::Brdf,
            CliLightingMode::Combined => LightingMode::Combined,
        }
    }
}

fn main() {
    let opts: CommandLineOptions = CommandLineOptions::parse();

    let options = Options {
        num_threads: opts.threads.unwrap_or_else(num_cpus::get),
        width: opts.width,
        height: opts.height,
        frames: opts.frames,
        timestep: opts.timestep,
    };

    ThreadPoolBuilder::new()
        .num_threads(options.num_threads)
        .build_global()
        .expect("could not configure threadpool");

    let mut scene = opts.scene.build();
    let mut renderer = Renderer::new(options.width, options.height);
    renderer.set_lighting_mode(opts.mode.into());
    renderer.set_parallel(!opts.sequential);
    if opts.no_shadows {
        renderer.toggle_shadows();
    }

    println!(
        "Scene {:?}, {} lighting, shadows {}.",
        opts.scene,
        renderer.lighting_mode().label(),
        if renderer.shadows_enabled() { "on" } else { "off" }
    );

    let mut progress = Arc::new(Mutex::new(CliRenderProgress::new()));
    let (stop_ticker, ticker_handle) = spawn_progress_ticker(&progress);

    render_frames(&options, &mut scene, &mut renderer, &mut progress);

    stop_ticker.store(true, Ordering::Relaxed);
    ticker_handle.join().unwrap();

    match renderer.save_buffer_to_image(&opts.output) {
        Ok(()) => println!("Saved render to {}", opts.output),
        Err(err) => {
            eprintln!("Could not save render to {}: {}", opts.output, err);
            process::exit(1);
        }
    }
}

fn spawn_progress_ticker(
    progress: &Arc<Mutex<CliRenderProgress>>,
) -> (Arc<AtomicBool>, JoinHandle<()>) {
    let stop = Arc::new(AtomicBool::new(false));
    let thread_handle = {
        let stop = stop.clone();
        let progress = progress.clone();
        spawn(move || loop {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            {
                let mut progress = progress.lock().unwrap();
                progress.tick();
            }
            sleep(Duration::from_millis(250));
        })
    };
    (stop, thread_handle)
}

struct CliRenderProgress {
    start_time: time::Tm,
    steady_start_time: time::SteadyTime,
    pb: ProgressBar<Stdout>,
}

impl CliRenderProgress {
    fn new() -> CliRenderProgress {
        CliRenderProgress {
            start_time: time::now(),
            steady_start_time: time::SteadyTime::now(),
            pb: ProgressBar::new(0),
        }
    }

    fn tick(&mut self) {
        self.pb.tick();
    }
}

impl RenderProgress for CliRenderProgress {
    fn render_started(&mut self, options: &Options) {
        println!(
            "Rendering {}x{}, {} frame(s), using {} threads.",
            options.width, options.height, options.frames, options.num_threads
        );
        println!("Started at {}", self.start_time.rfc822());

        // Trigger initial progress bar draw
        self.pb.show_tick = true;
        self.pb.total = options.frames as u64;
        self.pb.message("Frames: ");
        self.pb.set(0);
    }

    fn frame_finished(&mut self, _options: &Options, _frame: u32) {
        self.pb.inc();
    }

    fn render_finished(&mut self, _options: &Options) {
        let end_time = time::now();
        let elapsed = time::SteadyTime::now() - self.steady_start_time;

        self.pb.finish_println(&format!(
            "Finished at {} ({})",
            end_time.rfc822(),
            format_duration(elapsed)
        ));
    }
}

impl RenderProgress for Arc<Mutex<CliRenderProgress>> {
    fn render_started(&mut self, options: &Options) {
        self.lock().unwrap().render_started(options);
    }

    fn frame_finished(&mut self, options: &Options, frame: u32) {
        self.lock().unwrap().frame_finished(options, frame);
    }

    fn render_finished(&mut self, options: &Options) {
        self.lock().unwrap().render_finished(options);
    }
}

fn format_duration(mut d: time::Duration) -> String {
    let mut s = String::new();
    let hours = d.num_hours();
    d = d - time::Duration::hours(hours);
    if hours > 0 {
        s += &format!("{}h ", hours);
    }
    let minutes = d.num_minutes();
    d = d - time::Duration::minutes(minutes);
    if minutes > 0 {
        s += &format!("{}m ", minutes);
    }
    let seconds = d.num_seconds();
    d = d - time::Duration::seconds(seconds);
    let milliseconds = d.num_milliseconds();
    s += &format!("{}.{:03}s", seconds, milliseconds);
    s
}
