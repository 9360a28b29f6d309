//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads a firing log (or generates a synthetic one)
//! - runs cooling-phase selection + decay fitting + projection
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Command, DemoArgs, FitArgs, PlotArgs, ProjectionArgs};
use crate::data::{SampleConfig, generate_firing};
use crate::domain::{ProjectionConfig, parse_time};
use crate::error::AppError;
use crate::plot::PlotLayers;

pub mod pipeline;

use pipeline::{LoadedSession, RunOutput};

/// Entry point for the `kiln` binary.
pub fn run() -> Result<(), AppError> {
    // Pick up KILN_* defaults from a local .env before clap reads the environment.
    dotenvy::dotenv().ok();

    let cli = crate::cli::Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Plot(args) => handle_plot(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = projection_config_from_args(&args.projection);
    let text = crate::io::ingest::read_log(&args.data)?;
    info!(path = %args.data.display(), bytes = text.len(), "firing log read");

    let loaded = pipeline::load_session(&text, &config)?;
    present(&loaded, &config, args.table)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = projection_config_from_args(&args.projection);
    let sample_config = SampleConfig {
        seed: args.seed,
        start_hours: parse_time(&args.start)?,
        start_temp: config.ambient_temp,
        peak_temp: args.peak,
        heating_rate: args.heating_rate,
        ambient_temp: config.ambient_temp,
        decay_rate: args.true_decay_rate,
        cooling_hours: args.cooling_hours,
        interval_minutes: args.interval,
        noise_sd: args.noise,
    };

    let sample = generate_firing(&sample_config)?;
    debug!(
        seed = args.seed,
        n_points = sample.n_points,
        peak_hours = sample.peak_hours,
        "synthetic firing generated"
    );
    println!(
        "Synthetic firing: seed={} | true k={:.3} /h | {} reading(s)\n",
        args.seed, args.true_decay_rate, sample.n_points
    );

    let loaded = pipeline::load_session(&sample.text, &config)?;
    present(&loaded, &config, args.table)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

/// Run the projection on a loaded session, print it, and write exports.
fn present(
    loaded: &LoadedSession,
    config: &ProjectionConfig,
    table: bool,
) -> Result<(), AppError> {
    let run = pipeline::run_projection(&loaded.session, config)?;
    print_run(&run, loaded, config, table);
    write_exports(&run, config)
}

fn print_run(run: &RunOutput, loaded: &LoadedSession, config: &ProjectionConfig, table: bool) {
    let summary = crate::report::format_run_summary(run, Some(&loaded.import), config);
    println!("{summary}");

    if table {
        let rows = crate::report::format_series_table(&run.observations, Some(run.cooling_start));
        println!("{rows}");
    }
    if !loaded.session.schedule().is_empty() {
        let schedule = crate::report::format_schedule(loaded.session.schedule(), &run.plan);
        println!("{schedule}");
    }

    if config.plot {
        let layers = PlotLayers {
            observations: &run.observations,
            curve: &run.curve,
            plan: &run.plan,
            cooling_start: Some(run.cooling_start),
        };
        let plot = crate::plot::render_ascii_plot(
            &layers,
            run.bounds,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }
}

fn write_exports(run: &RunOutput, config: &ProjectionConfig) -> Result<(), AppError> {
    if let Some(path) = &config.export_csv {
        crate::io::export::write_curve_csv(path, &run.curve)?;
    }
    if let Some(path) = &config.export_curve {
        crate::io::curve::write_curve_json(path, run, config)?;
    }
    Ok(())
}

pub fn projection_config_from_args(args: &ProjectionArgs) -> ProjectionConfig {
    ProjectionConfig {
        ambient_temp: args.ambient,
        decay_rate: args.decay_rate,
        extrapolate_hours: args.extrapolate,
        auto_fit: !args.no_auto_fit,
        cooling_start: args.cooling_start,
        segments: args.segments.clone(),
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export.clone(),
        export_curve: args.export_curve.clone(),
    }
}
