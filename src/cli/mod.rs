//! Command-line parsing for the kiln cooling projector.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.
//!
//! Projection defaults can come from the environment (or a `.env` file):
//! `KILN_AMBIENT_TEMP`, `KILN_DECAY_RATE`, `KILN_EXTRAPOLATE_HOURS`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Segment;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "kiln", version, about = "Kiln firing log and cooling-curve projector")]
pub struct Cli {
    /// Verbose logging to stderr (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a firing log, fit the cooling phase, print a summary and plot.
    Fit(FitArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Generate a synthetic firing and run it through the fit pipeline.
    Demo(DemoArgs),
}

/// Options shared by every command that projects a cooling curve.
#[derive(Debug, Args, Clone)]
pub struct ProjectionArgs {
    /// Ambient temperature the kiln cools toward (°C).
    #[arg(short = 'a', long, env = "KILN_AMBIENT_TEMP", default_value_t = 20.0)]
    pub ambient: f64,

    /// Decay rate (per hour) used when auto-fit is off or has too little data.
    #[arg(short = 'k', long, env = "KILN_DECAY_RATE", default_value_t = 0.5)]
    pub decay_rate: f64,

    /// Projection horizon (hours) from the start of the cooling phase, at most 10000.
    #[arg(short = 'x', long, env = "KILN_EXTRAPOLATE_HOURS", default_value_t = 12.0)]
    pub extrapolate: f64,

    /// Use the manual decay rate even when the cooling phase could be fitted.
    #[arg(long)]
    pub no_auto_fit: bool,

    /// Series index where cooling starts (default: temperature peak).
    #[arg(long, value_name = "INDEX")]
    pub cooling_start: Option<usize>,

    /// Planned heating segment `SPEED,STOP,HOLD` (°C/h, °C, H:MM). Repeatable.
    #[arg(long = "segment", value_name = "SPEED,STOP,HOLD", value_parser = parse_segment)]
    pub segments: Vec<Segment>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the projected curve to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export readings + projection to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,
}

/// Options for fitting a recorded log.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Firing log: one `H:MM<TAB|,|space>temp` reading per line (`-` for stdin).
    #[arg(short = 'f', long, value_name = "FILE")]
    pub data: PathBuf,

    /// Print the reading table.
    #[arg(long)]
    pub table: bool,

    #[command(flatten)]
    pub projection: ProjectionArgs,
}

/// Options for a synthetic firing.
#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Random seed for the sensor noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// First reading (H:MM).
    #[arg(long, default_value = "8:00")]
    pub start: String,

    /// Peak temperature (°C).
    #[arg(long, default_value_t = 1220.0)]
    pub peak: f64,

    /// Ramp speed (°C/h).
    #[arg(long, default_value_t = 150.0)]
    pub heating_rate: f64,

    /// Decay rate used to generate the cooling readings.
    #[arg(long, default_value_t = 0.35)]
    pub true_decay_rate: f64,

    /// Hours of cooling readings after the peak.
    #[arg(long, default_value_t = 6.0)]
    pub cooling_hours: f64,

    /// Minutes between readings.
    #[arg(long, default_value_t = 30)]
    pub interval: u32,

    /// Reading noise standard deviation (°C).
    #[arg(long, default_value_t = 3.0)]
    pub noise: f64,

    /// Print the reading table.
    #[arg(long)]
    pub table: bool,

    #[command(flatten)]
    pub projection: ProjectionArgs,
}

/// Options for plotting a saved curve.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Curve JSON file produced by `kiln fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Parse `SPEED,STOP,HOLD` into a segment. Range checks happen in the schedule.
pub fn parse_segment(s: &str) -> Result<Segment, String> {
    let fields: Vec<&str> = s.split(',').map(str::trim).collect();
    let [speed, stop, hold] = fields.as_slice() else {
        return Err(format!("expected SPEED,STOP,HOLD, got '{s}'"));
    };

    let heating_speed = speed
        .parse::<f64>()
        .map_err(|_| format!("invalid heating speed '{speed}'"))?;
    let stop_temp = stop
        .parse::<f64>()
        .map_err(|_| format!("invalid stop temperature '{stop}'"))?;

    Ok(Segment {
        heating_speed,
        stop_temp,
        hold: hold.to_string(),
    })
}
