use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "voxtrace")]
#[command(about = "Ray traces ellipsoids and CT volumes with Phong shading")]
pub struct Args {
    /// Scene description (TOML)
    #[arg(short, long, default_value = "scene.toml")]
    pub config: PathBuf,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels, overriding the scene file
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels, overriding the scene file
    #[arg(long)]
    pub height: Option<u32>,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, help = "Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_scene_settings_alone() {
        let args = Args::try_parse_from(["voxtrace"]).unwrap();
        assert_eq!(args.config, PathBuf::from("scene.toml"));
        assert!(args.width.is_none() && args.height.is_none() && args.output.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let args = Args::try_parse_from([
            "voxtrace", "-c", "demos/head.toml", "--width", "64", "--height", "32", "-o", "x.exr",
            "--debug-level", "trace",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("demos/head.toml"));
        assert_eq!(args.width, Some(64));
        assert_eq!(args.height, Some(32));
        assert_eq!(args.output, Some(PathBuf::from("x.exr")));
        assert_eq!(LevelFilter::from(args.debug_level), LevelFilter::Trace);
    }
}
