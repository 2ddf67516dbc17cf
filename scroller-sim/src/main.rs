use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use scroller_core::{AnimatorConfig, ScrollerOptions};
use scroller_sim::{render_json, render_table, simulate, Simulation};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Run the auto scroller loop without a browser", long_about = None)]
struct Args {
    /// Scroll height of the simulated content in pixels
    #[arg(long, default_value_t = 300.0)]
    scroll_height: f64,

    /// Speed in units; 0 uses the default of one unit
    #[arg(short, long, default_value_t = 0.0)]
    speed: f64,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 400)]
    ticks: usize,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 16)]
    interval_ms: u32,

    /// Fire a native scroll event every N ticks
    #[arg(long)]
    scroll_every: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let simulation = Simulation {
        scroll_height: args.scroll_height,
        options: ScrollerOptions::default().with_animator(
            AnimatorConfig::default()
                .with_speed_units(args.speed)
                .with_tick_interval_ms(args.interval_ms),
        ),
        ticks: args.ticks,
        scroll_every: args.scroll_every,
    };

    let samples = simulate(&simulation).context("Simulation failed")?;
    let output = match args.format {
        Format::Table => render_table(&samples),
        Format::Json => render_json(&samples)?,
    };
    print!("{}", output);

    Ok(())
}
