//! BoardPlan CLI - component placement and design rules from the command line.

use anyhow::Context;
use boardplan::{BoardPlanCore, ConstraintSet, DesignAnalysis, DesignExport, LayoutPlan, PlannerConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boardplan")]
#[command(about = "PCB component placement and design rule generation tool", long_about = None)]
#[command(version)]
struct Cli {
    /// Planner configuration file (JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place every component of a design export
    Layout {
        /// Path to the design export (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        board: BoardArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Emit move_component commands for a design export (JSON)
    #[command(name = "commands")]
    Moves {
        /// Path to the design export (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        board: BoardArgs,
    },

    /// Generate design rules and net classes from the nets of a design export
    Rules {
        /// Path to the design export (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: RulesFormat,
    },

    /// Summarize a design and review it for common problems
    Analyze {
        /// Path to the design export (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

/// Board overrides applied on top of the configuration file.
#[derive(Args, Clone, Default)]
struct BoardArgs {
    /// Board width in mm
    #[arg(long)]
    width: Option<f64>,

    /// Board height in mm
    #[arg(long)]
    height: Option<f64>,

    /// Board edge margin in mm
    #[arg(long)]
    margin: Option<f64>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON document
    Json,
}

#[derive(Clone, ValueEnum)]
enum RulesFormat {
    /// Human-readable output
    Human,
    /// Rules and net classes as JSON
    Json,
    /// Rule creation script for the CAD tool
    Script,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Layout { file, board, format } => handle_layout(&file, cli.config.as_deref(), &board, format),
        Commands::Moves { file, board } => handle_commands(&file, cli.config.as_deref(), &board),
        Commands::Rules { file, format } => handle_rules(&file, cli.config.as_deref(), format),
        Commands::Analyze { file, format } => handle_analyze(&file, cli.config.as_deref(), format),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, board: &BoardArgs) -> anyhow::Result<PlannerConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            PlannerConfig::from_json_str(&json)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => PlannerConfig::default(),
    };

    if let Some(width) = board.width {
        config.layout.board_width_mm = width;
    }
    if let Some(height) = board.height {
        config.layout.board_height_mm = height;
    }
    if let Some(margin) = board.margin {
        config.layout.margin_mm = margin;
    }
    Ok(config)
}

fn build_core(config_path: Option<&Path>, board: &BoardArgs) -> anyhow::Result<BoardPlanCore> {
    let config = load_config(config_path, board)?;
    Ok(BoardPlanCore::new(config)?)
}

fn load_export(path: &Path) -> anyhow::Result<DesignExport> {
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let export = BoardPlanCore::load_export(&json)
        .with_context(|| format!("Failed to decode design export {}", path.display()))?;
    tracing::info!(
        "Loaded {} components and {} nets from {}",
        export.components.len(),
        export.nets.len(),
        path.display()
    );
    Ok(export)
}

fn handle_layout(
    file: &Path,
    config: Option<&Path>,
    board: &BoardArgs,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let core = build_core(config, board)?;
    let export = load_export(file)?;
    let plan = core.plan_layout(&export);

    match format {
        OutputFormat::Human => output_layout_human(file, &plan),
        OutputFormat::Json => println!("{}", plan.to_json()?),
    }
    Ok(())
}

fn output_layout_human(file: &Path, plan: &LayoutPlan) {
    println!("\nLayout: {}", file.display());
    println!("{}", "─".repeat(60));
    println!("  Board: {} x {} mm", plan.board.width_mm, plan.board.height_mm);

    if plan.placements.is_empty() {
        println!("  No components to place");
    } else {
        println!("\n  Placements:");
        for p in &plan.placements {
            println!(
                "    {:<8} {:<11} x {:>7.2}  y {:>7.2}  {}",
                p.designator,
                p.block_name,
                p.x,
                p.y,
                p.layer.as_str()
            );
        }
    }

    if !plan.overflows.is_empty() {
        println!("\n  Zone overflow (placements may overlap):");
        for overflow in &plan.overflows {
            println!(
                "    - {} zone full for {} block, restarted at {}",
                overflow.zone, overflow.block, overflow.designator
            );
        }
    }

    let summary = plan.summary();
    println!("\n  Summary:");
    println!("    Components:  {}", summary.total_components);
    for (block, count) in &summary.by_block {
        println!("      {:<11} {}", block, count);
    }
    println!("    Constraints: {}", summary.constraints_count);
}

fn handle_commands(file: &Path, config: Option<&Path>, board: &BoardArgs) -> anyhow::Result<()> {
    let core = build_core(config, board)?;
    let export = load_export(file)?;
    let commands = core.commands(&export);
    println!("{}", serde_json::to_string_pretty(&commands)?);
    Ok(())
}

fn handle_rules(file: &Path, config: Option<&Path>, format: RulesFormat) -> anyhow::Result<()> {
    let core = build_core(config, &BoardArgs::default())?;
    let export = load_export(file)?;
    let set = core.generate_constraints(&export.nets);

    match format {
        RulesFormat::Human => output_rules_human(file, &set),
        RulesFormat::Json => println!("{}", set.to_json()?),
        RulesFormat::Script => println!("{}", set.to_script()),
    }
    Ok(())
}

fn output_rules_human(file: &Path, set: &ConstraintSet) {
    println!("\nDesign rules: {}", file.display());
    println!("{}", "─".repeat(60));

    if set.net_classes.is_empty() {
        println!("  No named nets");
    } else {
        println!("\n  Net classes:");
        for class in &set.net_classes {
            println!("    {} ({} nets): {}", class.name, class.nets.len(), class.nets.join(", "));
        }
    }

    println!("\n  Rules:");
    for rule in &set.rules {
        println!("    - {} [{}] priority {} scope {}", rule.name, rule.rule_type, rule.priority, rule.scope);
        if let Some(description) = rule.properties.get("description").and_then(|v| v.as_str()) {
            println!("      {}", description);
        }
    }

    let summary = set.summary();
    println!("\n  Summary:");
    println!("    Net classes: {}", summary.net_classes);
    println!("    Rules:       {}", summary.rules);
    for (rule_type, count) in summary.rules_by_type.iter().filter(|(_, count)| **count > 0) {
        println!("      {:<18} {}", rule_type.as_str(), count);
    }
}

fn handle_analyze(file: &Path, config: Option<&Path>, format: OutputFormat) -> anyhow::Result<()> {
    let core = build_core(config, &BoardArgs::default())?;
    let export = load_export(file)?;
    let analysis = core.analyze(&export);

    match format {
        OutputFormat::Human => output_analysis_human(file, &analysis),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
    }
    Ok(())
}

fn output_analysis_human(file: &Path, analysis: &DesignAnalysis) {
    println!("\nAnalysis: {}", file.display());
    println!("{}", "─".repeat(60));
    println!("  Design type: {}", analysis.design_type);

    let summary = &analysis.component_summary;
    println!("\n  Components: {}", summary.total);
    for (kind, count) in &summary.by_type {
        println!("    {:<16} {}", kind, count);
    }

    if !analysis.critical_components.is_empty() {
        println!("\n  Critical components:");
        for critical in &analysis.critical_components {
            println!("    - {} ({:?}): {}", critical.designator, critical.criticality, critical.reason);
        }
    }

    let signals = &analysis.signals;
    println!("\n  Signals:");
    for (label, nets) in [
        ("Power", &signals.power_nets),
        ("Ground", &signals.ground_nets),
        ("High-speed", &signals.high_speed_nets),
        ("Analog", &signals.analog_nets),
    ] {
        if !nets.is_empty() {
            println!("    {:<12} {}", label, nets.join(", "));
        }
    }
    if signals.has_differential_pairs() {
        println!("    Differential pairs: {}", signals.differential_pairs.join(", "));
    }

    println!("\n  Review score: {}/100", analysis.review.score);
    if analysis.review.issues.is_empty() {
        println!("  No issues found");
    }
    for issue in &analysis.review.issues {
        println!("    - [{}] {}", issue.category, issue.message);
        println!("      {}", issue.recommendation);
    }
}
