//! Command-line options and the settings derived from them.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use pathlab_core::Bounds;
use pathlab_search::DEFAULT_DEPTH_LIMIT;

/// Verbosity of the in-app log panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, name = "pathlab")]
pub struct Args {
    /// Grid height in cells
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(2..=200))]
    pub rows: i32,

    /// Grid width in cells
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(2..=200))]
    pub cols: i32,

    /// Depth limit for depth-limited search
    #[arg(short, long, default_value_t = DEFAULT_DEPTH_LIMIT)]
    pub depth_limit: usize,

    /// Delay between search steps, in milliseconds
    #[arg(long = "delay", default_value_t = 20)]
    pub delay_ms: u64,

    /// Share of cells turned into walls by `g`, from 0 to 1
    #[arg(long, default_value_t = 0.3, value_parser = parse_density)]
    pub density: f64,

    /// Seed for wall scattering; random when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Lowest level shown in the log panel
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Do not capture the mouse
    #[arg(long)]
    pub no_mouse: bool,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&d) {
        Ok(d)
    } else {
        Err(format!("{d} is not between 0 and 1"))
    }
}

/// Runtime settings for the visualizer.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bounds: Bounds,
    pub depth_limit: usize,
    pub step_delay: Duration,
    pub density: f64,
    pub seed: Option<u64>,
    pub log_level: log::LevelFilter,
    pub mouse: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            depth_limit: DEFAULT_DEPTH_LIMIT,
            step_delay: Duration::from_millis(20),
            density: 0.3,
            seed: None,
            log_level: log::LevelFilter::Info,
            mouse: true,
        }
    }
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Self {
            bounds: Bounds::new(args.rows, args.cols),
            depth_limit: args.depth_limit,
            step_delay: Duration::from_millis(args.delay_ms),
            density: args.density,
            seed: args.seed,
            log_level: args.log_level.into(),
            mouse: !args.no_mouse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_settings() {
        let settings = Settings::from(Args::parse_from(["pathlab"]));
        let default = Settings::default();
        assert_eq!(settings.bounds, default.bounds);
        assert_eq!(settings.depth_limit, default.depth_limit);
        assert_eq!(settings.step_delay, default.step_delay);
        assert_eq!(settings.density, default.density);
        assert_eq!(settings.log_level, default.log_level);
        assert!(settings.mouse);
    }

    #[test]
    fn flags() {
        let args = Args::parse_from([
            "pathlab",
            "--rows",
            "12",
            "-c",
            "40",
            "--depth-limit",
            "7",
            "--delay",
            "0",
            "--seed",
            "9",
            "--log-level",
            "debug",
            "--no-mouse",
        ]);
        let s = Settings::from(args);
        assert_eq!(s.bounds, Bounds::new(12, 40));
        assert_eq!(s.depth_limit, 7);
        assert_eq!(s.step_delay, Duration::ZERO);
        assert_eq!(s.seed, Some(9));
        assert_eq!(s.log_level, log::LevelFilter::Debug);
        assert!(!s.mouse);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from(["pathlab", "--density", "1.5"]).is_err());
        assert!(Args::try_parse_from(["pathlab", "--rows", "1"]).is_err());
    }
}
