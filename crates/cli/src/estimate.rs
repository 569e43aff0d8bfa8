//! `renoplan estimate`, `renoplan timeline`, `renoplan config`.

use std::path::Path;

use serde::Deserialize;

use renoplan_engine::{estimate, timeline, CostTotals, EngineConfig, ProjectDescriptor, QualityTier};

use crate::exit_codes::{EXIT_INVALID_CONFIG, EXIT_INVALID_PROJECT};
use crate::{emit_json, load_config, CliError};

/// Project file layout: the intake form plus the known cost totals.
#[derive(Debug, Deserialize)]
struct ProjectFile {
    project: ProjectDescriptor,
    costs: CostInput,
}

#[derive(Debug, Deserialize)]
struct CostInput {
    #[serde(default)]
    materials: f64,
    #[serde(default)]
    labor: f64,
    #[serde(default)]
    permits: f64,
    total: f64,
}

fn read_project(path: &Path) -> Result<(ProjectDescriptor, CostTotals), CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("cannot read project {}: {e}", path.display())))?;
    let file: ProjectFile = toml::from_str(&text).map_err(|e| {
        CliError::new(EXIT_INVALID_PROJECT, format!("{}: {e}", path.display()))
            .with_hint("expected [project] and [costs] tables")
    })?;
    let c = file.costs;
    Ok((file.project, CostTotals::new(c.materials, c.labor, c.permits, c.total)))
}

pub fn cmd_estimate(
    project_path: &Path,
    config_path: Option<&Path>,
    json: bool,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let (project, totals) = read_project(project_path)?;
    let result = estimate(&project, &totals, &config);

    emit_json(&result.to_prompt_payload(), json, output)?;
    if json {
        return Ok(());
    }

    let b = &result.breakdown;
    println!(
        "{} ({}, {} sq ft): total {:.0}, {:.2}/sq ft, confidence {}",
        project.category,
        project.quality_tier,
        project.area_sq_ft,
        b.total,
        b.cost_per_sq_ft(),
        result.confidence,
    );
    for section in b.sections() {
        println!("  {:<22} {:>12.0}", section.label, section.subtotal);
        for item in &section.items {
            println!(
                "    {:<28} {:>10.0}  {} {}",
                item.name, item.cost, item.quantity, item.unit
            );
        }
    }
    println!(
        "timeline: {} phases, {} (critical: {})",
        result.timeline.phases.len(),
        result.timeline.total_duration,
        result.timeline.critical_path.join(", "),
    );
    match &result.payment_schedule {
        Some(schedule) => {
            for m in &schedule.milestones {
                println!(
                    "  {:<20} {:>3}% {:>12.0}  {}  {}",
                    m.name, m.percentage, m.amount, m.due_date, m.status
                );
            }
        }
        None => println!("payments: no start date, schedule skipped"),
    }
    Ok(())
}

pub fn cmd_timeline(project_type: &str, quality: &str, json: bool) -> Result<(), CliError> {
    let category = renoplan_engine::classify(project_type);
    let tier = QualityTier::parse_lenient(quality);
    let t = timeline::generate(category, tier);

    emit_json(&t, json, None)?;
    if json {
        return Ok(());
    }

    println!("{category} ({tier}): {}", t.total_duration);
    for phase in &t.phases {
        let marker = if phase.critical { "*" } else { " " };
        println!("{marker}{:>2}. {:<38} {}", phase.order, phase.name, phase.duration);
    }
    Ok(())
}

pub fn cmd_config_validate(path: &Path) -> Result<(), CliError> {
    load_config(Some(path))?;
    eprintln!("{}: ok", path.display());
    Ok(())
}

pub fn cmd_config_defaults() -> Result<(), CliError> {
    let text = toml::to_string_pretty(&EngineConfig::default())
        .map_err(|e| CliError::new(EXIT_INVALID_CONFIG, format!("cannot render defaults: {e}")))?;
    print!("{text}");
    Ok(())
}
