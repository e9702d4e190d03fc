mod app;
mod background;
mod config;
mod display;
mod error;
mod fullscreen;
mod menu;
mod region;
mod settings;
mod time_format;
mod time_source;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use crate::app::ClockApp;
use crate::background::BackgroundId;
use crate::config::{ClockConfig, load_clock_config};
use crate::display::LineTarget;
use crate::menu::StyleId;
use crate::region::{REGION_OPTIONS, RegionId};
use crate::time_format::HourFormat;
use crate::time_source::select_source;

#[derive(Parser, Debug)]
#[command(
    name = "zoneclock",
    version,
    about = "Decorative region-aware desktop clock"
)]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    region: Option<String>,

    #[arg(long = "hour-format", visible_alias = "format")]
    hour_format: Option<HourFormat>,

    #[arg(long)]
    dark: bool,

    #[arg(long)]
    style: Option<StyleId>,

    #[arg(long)]
    background: Option<BackgroundId>,

    #[arg(long)]
    print: bool,

    #[arg(long)]
    at: Option<String>,

    #[arg(long)]
    list_regions: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(if cli.verbose {
        "debug"
    } else {
        "warn"
    }))
    .init();

    if cli.list_regions {
        for option in REGION_OPTIONS {
            println!("{:<22} {}", option.id, option.display_text);
        }
        return Ok(());
    }

    let config = resolve_config(&cli)?;
    let selected = select_source(cli.at.as_deref())?;
    info!(
        "starting in {} ({}), time source {}",
        config.region,
        config.hour_format.label(),
        selected.label
    );
    let mut clock = ClockApp::new(&config, selected.source);

    if cli.print {
        return print_once(&mut clock);
    }

    ui::app::run_gui(clock)
}

fn resolve_config(cli: &Cli) -> Result<ClockConfig> {
    let mut config = match &cli.config {
        Some(path) => load_clock_config(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => ClockConfig::default(),
    };

    if let Some(region) = &cli.region {
        config.region = RegionId::new(region.clone());
    }
    if let Some(hour_format) = cli.hour_format {
        config.hour_format = hour_format;
    }
    if cli.dark {
        config.dark_mode = true;
    }
    if let Some(style) = cli.style {
        config.style = style;
    }
    if let Some(background) = cli.background {
        config.background = background;
    }

    if let Err(err) = config.region.resolve() {
        warn!("{err}; the clock will stay blank until another region is chosen");
    }
    Ok(config)
}

fn print_once(clock: &mut ClockApp) -> Result<()> {
    let mut line = LineTarget::default();
    if let Err(err) = clock.render_into(&mut line) {
        bail!("nothing to display: {err}");
    }
    println!("{}", line.time_line);
    println!("{}", line.date_line);
    println!("{}", clock.region_label());
    Ok(())
}
