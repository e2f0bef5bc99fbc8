use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use sketch::config::{ConfigError, EngineConfig};
use sketch::doc::{FloorPlanData, MeasurementUnit, PlanError};
use sketch::editor::EditorState;
use sketch::geometry::{distance, format_area, format_length, wall_length};
use sketch::render::{build_scene, Overlay};
use sketch::selection::SelectionState;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("invalid engine config: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "sketch-cli", about = "Inspect, validate and render floor-plan documents")]
struct Cli {
    /// Display units for lengths and areas; defaults to the plan's own units.
    #[arg(long, env = "SKETCH_UNITS", value_enum, global = true)]
    units: Option<Units>,

    /// Engine configuration file (JSON, partial allowed).
    #[arg(long, env = "SKETCH_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a plan for duplicate ids, dangling wall references and out-of-range fields.
    Validate { plan: PathBuf },
    /// Print element counts and measurements.
    Summary { plan: PathBuf },
    /// Dump the rendered scene as JSON.
    Render {
        plan: PathBuf,
        /// Omit the grid layer's lines.
        #[arg(long, default_value_t = false)]
        no_grid: bool,
        /// Highlight this element as selected.
        #[arg(long)]
        select: Option<String>,
    },
    /// Print the effective engine configuration.
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Units {
    Imperial,
    Metric,
}

impl From<Units> for MeasurementUnit {
    fn from(units: Units) -> Self {
        match units {
            Units::Imperial => Self::Imperial,
            Units::Metric => Self::Metric,
        }
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let units = cli.units.map(MeasurementUnit::from);

    match cli.command {
        Command::Validate { plan } => run_validate(&plan),
        Command::Summary { plan } => run_summary(&plan, units),
        Command::Render { plan, no_grid, select } => run_render(&plan, units, no_grid, select),
        Command::Config => print_json(&serde_json::to_value(&config)?),
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_owned(), source })
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    debug!(path = %path.display(), "loading engine config");
    Ok(EngineConfig::from_json(&read(path)?)?)
}

fn load_plan(path: &Path) -> Result<FloorPlanData, CliError> {
    let plan = FloorPlanData::from_json(&read(path)?)?;
    info!(path = %path.display(), elements = plan.element_count(), "loaded plan");
    Ok(plan)
}

fn run_validate(path: &Path) -> Result<(), CliError> {
    let plan = load_plan(path)?;
    println!("ok: {} elements, {} trade layers", plan.element_count(), plan.trade_layers.len());
    Ok(())
}

fn run_summary(path: &Path, units: Option<MeasurementUnit>) -> Result<(), CliError> {
    let plan = load_plan(path)?;
    let units = units.unwrap_or(plan.units);

    let straight: f64 = plan.walls.iter().map(wall_length).sum();
    let curved: f64 = plan.arc_walls.iter().map(|a| distance(a.start, a.end)).sum();
    println!("walls:      {} ({})", plan.walls.len(), format_length(straight, units));
    println!("arc walls:  {} ({} chord)", plan.arc_walls.len(), format_length(curved, units));
    println!("doors:      {}", plan.doors.len());
    println!("windows:    {}", plan.windows.len());
    println!("fixtures:   {}", plan.fixtures.len());
    println!("labels:     {}", plan.labels.len());
    println!("dimensions: {}", plan.dimensions.len());
    for dim in &plan.dimensions {
        println!("  {}: {}", dim.id, format_length(distance(dim.start, dim.end), units));
    }
    println!("rooms:      {}", plan.rooms.len());
    for room in &plan.rooms {
        println!("  {}: {}", room.name, format_area(room.area, units));
    }
    for layer in &plan.trade_layers {
        let state = if layer.visible { "visible" } else { "hidden" };
        println!("trade layer {} ({}, {state})", layer.name, layer.layer_type);
    }
    Ok(())
}

fn run_render(path: &Path, units: Option<MeasurementUnit>, no_grid: bool, select: Option<String>) -> Result<(), CliError> {
    let plan = load_plan(path)?;
    let editor = EditorState { units: units.unwrap_or(plan.units), show_grid: !no_grid, ..EditorState::default() };
    let selection = match select.and_then(|id| plan.kind_of(&id).map(|kind| (id, kind))) {
        Some((id, kind)) => SelectionState::single(id, kind),
        None => SelectionState::empty(),
    };
    let scene = build_scene(&plan, &editor, &selection, &Overlay::default());
    print_json(&serde_json::to_value(&scene)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
