//! Simple layout example: plan a design export and print placements and rules.

use boardplan::prelude::*;
use std::path::Path;

fn main() -> Result<(), BoardPlanError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/mcu_board.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example simple_layout [path/to/design.json]");
        std::process::exit(1);
    }

    let export = BoardPlanCore::load_export(&std::fs::read_to_string(path)?)?;
    let core = BoardPlanCore::new(PlannerConfig::default())?;
    let plan = core.plan_layout(&export);

    println!("Layout for: {}", path.display());
    println!(
        "Board: {} x {} mm, {} components",
        plan.board.width_mm,
        plan.board.height_mm,
        plan.placements.len()
    );
    println!();

    for placement in &plan.placements {
        println!(
            "  {:<6} {:<12} ({:>7.2}, {:>7.2})",
            placement.designator, placement.block_name, placement.x, placement.y
        );
    }

    if !plan.overflows.is_empty() {
        println!("\nZones out of room (placements may overlap):");
        for overflow in &plan.overflows {
            println!("  - {} ({}) from {}", overflow.zone, overflow.block, overflow.designator);
        }
    }

    println!("\nDesign rules:");
    for rule in &plan.constraints {
        println!("  - {} [{}] scope {}", rule.name, rule.rule_type, rule.scope);
    }

    Ok(())
}
