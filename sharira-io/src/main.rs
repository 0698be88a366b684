//! ShariraIO - Motion-capture suit console
//!
//! Activates a suit from a TOML configuration, optionally lists its sensors,
//! then calibrates, acquires a few frames and prints pose and segment
//! readings.
//!
//! Usage:
//!   sharira-io --config sharira.toml --calibration Npose --frames 20
//!   RUST_LOG=debug sharira-io --list

use clap::Parser;
use sharira_io::core::types::SensorKind;
use sharira_io::error::Result;
use sharira_io::sensors::{PoseSensor, Sensor, VirtualLinkKinSensor};
use sharira_io::{Suit, SuitConfig};
use std::thread;
use std::time::Duration;

/// Motion-capture suit console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "sharira.toml")]
    config: String,

    /// Calibration routine (empty = configured default)
    #[arg(long, default_value = "")]
    calibration: String,

    /// Number of frames to print
    #[arg(short, long, default_value = "10")]
    frames: usize,

    /// Delay between printed frames (ms)
    #[arg(long, default_value = "100")]
    interval_ms: u64,

    /// List all sensors per kind
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("ShariraIO v{} starting...", env!("CARGO_PKG_VERSION"));
    log::info!("Using config: {}", args.config);
    let config = SuitConfig::load(&args.config)?;

    let mut suit = Suit::new();
    suit.activate(&config)?;

    if args.list {
        list_sensors(&suit);
    }

    suit.calibrate(&args.calibration)?;
    suit.start_acquisition()?;

    let result = print_frames(&suit, &args);

    suit.stop_acquisition()?;
    suit.close()?;
    result
}

fn list_sensors(suit: &Suit) {
    for kind in SensorKind::SUIT_KINDS {
        let sensors = suit.sensors(kind);
        println!("{:?} ({})", kind, sensors.len());
        for sensor in sensors {
            println!("  {}", sensor.name());
        }
    }
}

fn print_frames(suit: &Suit, args: &Args) -> Result<()> {
    let prefix = suit.wearable_name().to_string();
    let names = |kind: SensorKind| -> Vec<String> {
        suit.sensors(kind)
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    };
    let poses: Vec<_> = names(SensorKind::Pose)
        .iter()
        .filter_map(|name| suit.pose_sensor(name))
        .collect();
    let links: Vec<_> = names(SensorKind::VirtualLinkKin)
        .iter()
        .filter_map(|name| suit.virtual_link_kin_sensor(name))
        .collect();

    for frame in 0..args.frames {
        thread::sleep(Duration::from_millis(args.interval_ms));
        let stamp = suit.timestamp()?;
        println!("frame {} t={:.3} status={}", frame, stamp.time, suit.status());

        for sensor in &poses {
            match sensor.pose() {
                Ok(pose) => println!(
                    "  {:<40} p=[{:+.3} {:+.3} {:+.3}] q=[{:+.3} {:+.3} {:+.3} {:+.3}]",
                    sensor.name().trim_start_matches(&prefix),
                    pose.position[0],
                    pose.position[1],
                    pose.position[2],
                    pose.orientation[0],
                    pose.orientation[1],
                    pose.orientation[2],
                    pose.orientation[3]
                ),
                Err(e) => log::warn!("{}: {}", sensor.name(), e),
            }
        }

        for sensor in &links {
            match sensor.link_velocity() {
                Ok(v) => println!(
                    "  {:<40} v=[{:+.3} {:+.3} {:+.3}] w=[{:+.3} {:+.3} {:+.3}]",
                    sensor.name().trim_start_matches(&prefix),
                    v.linear[0],
                    v.linear[1],
                    v.linear[2],
                    v.angular[0],
                    v.angular[1],
                    v.angular[2]
                ),
                Err(e) => log::warn!("{}: {}", sensor.name(), e),
            }
        }
    }

    Ok(())
}
