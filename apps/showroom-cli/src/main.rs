use anyhow::bail;
use clap::{Parser, Subcommand};
use glam::Vec3;
use showroom_common::CameraPose;
use showroom_input::{CaptureError, InputEvent, PointerCapture};
use showroom_kernel::{Response, Session, ShowroomConfig};
use showroom_render::{DebugTextRenderer, RenderView, Renderer, build_showroom};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "showroom-cli", about = "Headless showroom tool")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and effective settings
    Info,
    /// List catalog entries
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Simulate holding keys for a while and report where the camera ends up
    Walk {
        /// Key codes to hold, e.g. KeyW ShiftLeft
        #[arg(default_values_t = vec![String::from("KeyW")])]
        keys: Vec<String>,
        /// Simulated seconds
        #[arg(short, long, default_value = "1.0")]
        seconds: f32,
        /// Simulated frame rate
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Horizontal mouse counts applied before walking
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        turn: f32,
    },
    /// Pick from a pose and print the selected item
    Pick {
        #[command(flatten)]
        pose: PoseArgs,
    },
    /// Dump the dressed scene as text
    Render {
        #[command(flatten)]
        pose: PoseArgs,
        /// Include decoration, not just catalog items
        #[arg(long)]
        all: bool,
    },
}

/// Camera pose overrides; unset fields keep the configured start pose.
#[derive(clap::Args)]
struct PoseArgs {
    #[arg(long, allow_hyphen_values = true)]
    x: Option<f32>,
    #[arg(long, allow_hyphen_values = true)]
    y: Option<f32>,
    #[arg(long, allow_hyphen_values = true)]
    z: Option<f32>,
    /// Yaw in radians, 0 looks down -Z
    #[arg(long, allow_hyphen_values = true)]
    yaw: Option<f32>,
    /// Pitch in radians, positive looks up
    #[arg(long, allow_hyphen_values = true)]
    pitch: Option<f32>,
}

impl PoseArgs {
    fn apply(&self, start: CameraPose) -> CameraPose {
        let p = start.position;
        CameraPose::new(
            Vec3::new(
                self.x.unwrap_or(p.x),
                self.y.unwrap_or(p.y),
                self.z.unwrap_or(p.z),
            ),
            self.yaw.unwrap_or(start.yaw),
            self.pitch.unwrap_or(start.pitch),
        )
    }
}

/// Capture that always succeeds; there is no pointer to grab headless.
struct HeadlessCapture;

impl PointerCapture for HeadlessCapture {
    fn is_supported(&self) -> bool {
        true
    }

    fn lock(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn unlock(&mut self) {}
}

/// A session for `config` that is already captured.
fn captured_session(config: &ShowroomConfig) -> anyhow::Result<(Session, showroom_render::SceneGraph)> {
    let mut session = Session::from_config(config)?;
    let scene = build_showroom(session.catalog());
    session.request_capture(&mut HeadlessCapture)?;
    session.handle(
        InputEvent::Capture(showroom_input::CaptureSignal::Locked),
        &scene,
    );
    Ok((session, scene))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = ShowroomConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            let catalog = config.catalog()?;
            println!("showroom-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", showroom_render::crate_info());
            println!("assets: {}", showroom_assets::crate_info());
            println!("catalog: {} items", catalog.len());
            let m = &config.motion;
            println!(
                "motion: damping={} speed={} sprint={} height=[{}, {}]",
                m.damping, m.base_speed, m.sprint_boost, m.min_height, m.max_height
            );
            println!("look sensitivity: {} rad/count", config.look_sensitivity);
        }
        Commands::Catalog { json } => {
            let catalog = config.catalog()?;
            if json {
                let entries: Vec<_> = catalog.iter().collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for e in catalog.iter() {
                    let p = e.position;
                    println!(
                        "{:<10} {:<20} {:?} at ({:.1}, {:.1}, {:.1})",
                        e.id.as_str(),
                        e.name,
                        e.kind,
                        p.x,
                        p.y,
                        p.z
                    );
                }
            }
        }
        Commands::Walk {
            keys,
            seconds,
            fps,
            turn,
        } => {
            if fps == 0 {
                bail!("fps must be positive");
            }
            let (mut session, scene) = captured_session(&config)?;
            let start = session.pose().position;
            session.handle(InputEvent::LookDelta { dx: turn, dy: 0.0 }, &scene);
            for key in &keys {
                session.handle(InputEvent::key(key.as_str(), true), &scene);
            }
            if !session.intent().has_movement() {
                tracing::warn!(?keys, "no movement key held");
            }

            let dt = 1.0 / fps as f32;
            let frames = (seconds.max(0.0) * fps as f32).round() as u32;
            for _ in 0..frames {
                session.tick(dt);
            }

            let pose = session.pose();
            let moved = pose.position - start;
            println!("frames: {frames} at {fps} fps");
            println!(
                "start: ({:.3}, {:.3}, {:.3})",
                start.x, start.y, start.z
            );
            println!(
                "end:   ({:.3}, {:.3}, {:.3})",
                pose.position.x, pose.position.y, pose.position.z
            );
            println!(
                "moved: {:.3} units (horizontal {:.3})",
                moved.length(),
                Vec3::new(moved.x, 0.0, moved.z).length()
            );
            let v = session.velocity();
            println!("velocity: strafe={:.3} forward={:.3}", v.x, v.y);
        }
        Commands::Pick { pose } => {
            config.start = pose.apply(config.start);
            let (mut session, scene) = captured_session(&config)?;
            match session.handle(InputEvent::PrimaryClick, &scene) {
                Response::Selected(id) => {
                    println!("selected: {id}");
                    if let Some(panel) = session.panel() {
                        println!("{}", panel.title);
                        println!("{}", panel.body);
                    }
                }
                _ => println!("nothing selected"),
            }
        }
        Commands::Render { pose, all } => {
            config.start = pose.apply(config.start);
            let session = Session::from_config(&config)?;
            let scene = build_showroom(session.catalog());
            let view = RenderView {
                pose: *session.pose(),
                ..RenderView::default()
            };
            print!("{}", DebugTextRenderer { verbose: all }.render(&scene, &view));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_args_override_only_what_is_set() {
        let args = PoseArgs {
            x: Some(1.0),
            y: None,
            z: None,
            yaw: Some(0.5),
            pitch: None,
        };
        let pose = args.apply(CameraPose::default());
        assert_eq!(pose.position, Vec3::new(1.0, 1.7, 9.0));
        assert_eq!(pose.yaw, 0.5);
        assert_eq!(pose.pitch, 0.0);
    }

    #[test]
    fn headless_session_walks_forward() {
        let (mut session, scene) = captured_session(&ShowroomConfig::default()).unwrap();
        session.handle(InputEvent::key("KeyW", true), &scene);
        for _ in 0..60 {
            session.tick(1.0 / 60.0);
        }
        let z = session.pose().position.z;
        assert!(z < 9.0);
        assert!(9.0 - z < 6.0);
    }

    #[test]
    fn cli_parses_walk() {
        let cli = Cli::try_parse_from(["showroom-cli", "walk", "KeyW", "ShiftLeft", "--seconds", "2"]).unwrap();
        match cli.command {
            Commands::Walk { keys, seconds, .. } => {
                assert_eq!(keys, vec!["KeyW", "ShiftLeft"]);
                assert_eq!(seconds, 2.0);
            }
            _ => panic!("expected walk"),
        }
    }
}
