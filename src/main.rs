use anyhow::Context;
use bunny_rig::animation::{Frame, MotionTable, PoseEvaluator, controller};
use bunny_rig::frame_loop::{FrameLoop, FrameSink};
use bunny_rig::model::{JointId, JointValues, bunny};
use bunny_rig::renderer::{DrawRecord, uniform_bytes};
use bunny_rig::settings::Settings;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bunny-rig", about = "Evaluate the bunny rig headlessly and dump its frames")]
struct Cli {
    /// Number of frames to evaluate
    #[arg(long, default_value_t = 120)]
    frames: u32,
    /// Frame rate of the simulated clock (defaults to the saved setting)
    #[arg(long)]
    fps: Option<u32>,
    /// Start with the gait running
    #[arg(long)]
    animate: bool,
    /// Place the rig at its voxel-world anchor
    #[arg(long)]
    world: bool,
    #[arg(long, value_name = "SECONDS")]
    explode_at: Option<f32>,
    #[arg(long, value_name = "SECONDS")]
    release_at: Option<f32>,
    #[arg(long, value_name = "SECONDS")]
    reset_at: Option<f32>,
    /// Base angle, e.g. `--base front_left_hip=10`; repeatable
    #[arg(long = "base", value_name = "JOINT=DEGREES", value_parser = JointId::parse_assignment)]
    bases: Vec<(JointId, f32)>,
    /// Gait table (JSON) to use instead of the built-in trot
    #[arg(long)]
    gait: Option<String>,
    /// Horizontal and vertical drag applied to the saved view, in pixels
    #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
    drag: Option<Vec<f32>>,
    /// Frame dump destination; stdout when absent
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also write every frame's packed uniform blocks here
    #[arg(long)]
    uniforms: Option<PathBuf>,
    /// Read and write settings in this directory instead of the user config dir
    #[arg(long)]
    config_dir: Option<PathBuf>,
    /// Persist the resolved animation, view and placement settings
    #[arg(long)]
    save_settings: bool,
    /// Print the built-in trot table as JSON and exit
    #[arg(long)]
    print_gait: bool,
}

#[derive(Serialize)]
struct FrameDump {
    seconds: f32,
    magnitude: f32,
    exploding: bool,
    pose: JointValues,
    view: [[f32; 4]; 4],
    draws: Vec<DrawRecord>,
}

#[derive(Default)]
struct DumpSink {
    frames: Vec<FrameDump>,
    uniforms: Vec<u8>,
}

impl FrameSink for DumpSink {
    fn submit(&mut self, frame: &Frame) {
        self.frames.push(FrameDump {
            seconds: frame.seconds,
            magnitude: frame.magnitude,
            exploding: frame.exploding,
            pose: frame.pose,
            view: frame.view.into(),
            draws: frame.commands.iter().map(|c| c.record()).collect(),
        });
        self.uniforms.extend(uniform_bytes(&frame.commands));
    }
}

/// Fires a one-shot command the first time the clock passes `at`.
fn crossed(at: Option<f32>, previous: f32, now: f32) -> bool {
    at.is_some_and(|t| previous < t && t <= now)
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    Ok(match &cli.config_dir {
        Some(dir) => Settings::load_from(dir)?,
        None => Settings::load(),
    })
}

/// Folds the command line into the settings it overrides.
fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if cli.animate {
        settings.animation.animate_on_start = true;
    }
    if let Some(fps) = cli.fps {
        settings.animation.target_fps = fps;
    }
    if cli.gait.is_some() {
        settings.animation.gait_path = cli.gait.clone();
    }
    if cli.world {
        settings.placement.translation = [0.0, -0.15, -2.0];
        settings.placement.yaw_degrees = 180.0;
    }
    if let Some([dx, dy]) = cli.drag.as_deref().and_then(|d| <[f32; 2]>::try_from(d).ok()) {
        let mut orbit = settings.view.orbit();
        orbit.drag(dx, dy);
        settings.view.angle_x = orbit.angle_x;
        settings.view.angle_y = orbit.angle_y;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.print_gait {
        println!("{}", controller::trot().to_json()?);
        return Ok(());
    }

    let mut settings = load_settings(&cli)?;
    apply_overrides(&cli, &mut settings);

    if cli.save_settings {
        match &cli.config_dir {
            Some(dir) => settings.save_in(dir)?,
            None => settings.save()?,
        }
        log::info!("Settings saved");
    }

    let motions = match &settings.animation.gait_path {
        Some(path) => {
            log::info!("Loading gait from {}", path);
            MotionTable::load(path)?
        }
        None => controller::trot(),
    };

    let mut frame_loop = FrameLoop::new(PoseEvaluator::new(bunny::skeleton(), motions))
        .with_root(settings.placement.root())
        .with_view(settings.view.orbit());
    frame_loop.set_animation(settings.animation.animate_on_start);
    for (joint, angle) in &cli.bases {
        frame_loop.set_base(*joint, *angle);
    }

    let fps = settings.animation.target_fps.max(1);
    let step = 1.0 / fps as f32;
    log::info!(
        "Rig initialized: {} bones, {} drawable, {} frames at {} fps",
        frame_loop.evaluator().skeleton().bone_count(),
        frame_loop.evaluator().skeleton().drawable_count(),
        cli.frames,
        fps
    );

    let mut sink = DumpSink::default();
    let mut previous = -step;
    frame_loop.start();
    for i in 0..cli.frames {
        let now = i as f32 * step;
        if crossed(cli.explode_at, previous, now) {
            log::info!("Explosion triggered at {:.3}s", now);
            frame_loop.trigger_explosion(now);
        }
        if crossed(cli.release_at, previous, now) {
            frame_loop.release_explosion();
        }
        if crossed(cli.reset_at, previous, now) {
            log::info!("Reset at {:.3}s", now);
            frame_loop.reset();
        }
        if !frame_loop.tick(now, &mut sink) {
            break;
        }
        previous = now;
    }
    frame_loop.cancel();

    log::info!("Evaluated {} frames", frame_loop.frames_rendered());

    if let Some(path) = &cli.uniforms {
        std::fs::write(path, &sink.uniforms)
            .with_context(|| format!("writing uniforms to {}", path.display()))?;
    }

    let json = serde_json::to_string_pretty(&sink.frames)?;
    match &cli.out {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("writing frame dump to {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_and_bases_parse() {
        let cli = Cli::try_parse_from([
            "bunny-rig",
            "--frames=3",
            "--animate",
            "--base",
            "front_left_hip=10",
            "--base",
            "ear=-5",
            "--drag",
            "-30",
            "12.5",
        ])
        .unwrap();
        assert_eq!(cli.frames, 3);
        assert!(cli.animate);
        assert_eq!(cli.bases, vec![(JointId::FrontLeftHip, 10.0), (JointId::Ear, -5.0)]);
        assert_eq!(cli.drag, Some(vec![-30.0, 12.5]));
    }

    #[test]
    fn unknown_joint_is_rejected() {
        let err = Cli::try_parse_from(["bunny-rig", "--base", "front_left_paw=10"]).unwrap_err();
        assert!(err.to_string().contains("unknown-joint"), "{err}");
    }

    #[test]
    fn overrides_land_in_settings() {
        let cli = Cli::try_parse_from(["bunny-rig", "--world", "--fps", "30", "--drag", "90", "0"]).unwrap();
        let mut settings = Settings::default();
        apply_overrides(&cli, &mut settings);
        assert_eq!(settings.animation.target_fps, 30);
        assert_eq!(settings.view.angle_y, 90.0);

        let root = settings.placement.root();
        let anchor = bunny::world_anchor();
        assert!(root.iter().zip(anchor.iter()).all(|(a, b)| (a - b).abs() < 1e-6));
    }

    #[test]
    fn crossed_fires_once() {
        assert!(crossed(Some(0.5), 0.49, 0.51));
        assert!(!crossed(Some(0.5), 0.51, 0.53));
        assert!(!crossed(None, 0.0, 1.0));
    }
}
