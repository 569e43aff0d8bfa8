//! `renoplan roi` and `renoplan schedule`.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use renoplan_engine::payment::{self, PaymentSchedule, PaymentStatus};
use renoplan_engine::roi::{self, RoiAnalysis, RoiInputs};

use crate::exit_codes::EXIT_INVALID_TRANSITION;
use crate::{emit_json, load_config, CliError};

#[derive(Serialize)]
struct RoiReport {
    #[serde(flatten)]
    analysis: RoiAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<TargetPrice>,
}

#[derive(Serialize)]
struct TargetPrice {
    target_roi: f64,
    max_purchase_price: f64,
}

pub fn cmd_roi(
    inputs: RoiInputs,
    target_roi: Option<f64>,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let analysis = roi::analyze(&inputs, &config.roi);
    let target = target_roi.map(|t| TargetPrice {
        target_roi: t,
        max_purchase_price: roi::max_purchase_for_target_roi(
            inputs.after_repair_value,
            inputs.rehab_budget,
            t,
            &config.roi,
        )
        .round(),
    });

    let report = RoiReport { analysis, target };
    if json {
        return emit_json(&report, true, None);
    }

    let r = &report.analysis.result;
    println!("total investment   {:>14.2}", r.total_investment);
    println!("estimated profit   {:>14.2}", r.estimated_profit);
    println!(
        "roi                {:>13.2}%  ({}, {} risk)",
        r.roi_percentage,
        r.quality.label(),
        r.risk_tier
    );
    println!("breakeven price    {:>14.2}", r.breakeven_sale_price);
    println!("margin of safety   {:>13.2}%", r.margin_of_safety);
    for s in &report.analysis.scenarios {
        println!(
            "  {:<34} roi {:>7.2}% ({:+.2})  profit {:>12.2}",
            s.name, s.result.roi_percentage, s.roi_delta, s.result.estimated_profit
        );
    }
    if let Some(t) = &report.target {
        println!("max purchase for {:.1}% roi: {:.0}", t.target_roi, t.max_purchase_price);
    }
    Ok(())
}

fn parse_date(flag: &str, value: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        CliError::usage(format!("--{flag}: cannot parse date '{value}': {e}"))
            .with_hint("use YYYY-MM-DD")
    })
}

fn parse_status(value: &str) -> Option<PaymentStatus> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pending" => Some(PaymentStatus::Pending),
        "due" => Some(PaymentStatus::Due),
        "paid" => Some(PaymentStatus::Paid),
        "overdue" => Some(PaymentStatus::Overdue),
        _ => None,
    }
}

/// Parse `id=status`.
fn parse_mark(mark: &str) -> Result<(&str, PaymentStatus), CliError> {
    let (id, status) = mark
        .split_once('=')
        .ok_or_else(|| CliError::usage(format!("--mark '{mark}': expected ID=STATUS")))?;
    let status = parse_status(status).ok_or_else(|| {
        CliError::usage(format!("--mark '{mark}': unknown status"))
            .with_hint("statuses: pending, due, paid, overdue")
    })?;
    Ok((id.trim(), status))
}

pub fn cmd_schedule(
    cost: f64,
    start: &str,
    end: &str,
    marks: &[String],
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path)?;
    let start = parse_date("start", start)?;
    let end = parse_date("end", end)?;

    let mut schedule: PaymentSchedule = payment::generate(cost, start, end, &config.payments);
    for mark in marks {
        let (id, status) = parse_mark(mark)?;
        schedule = schedule
            .update_status(id, status)
            .map_err(|e| CliError::new(EXIT_INVALID_TRANSITION, e.to_string()))?;
    }

    if json {
        return emit_json(&schedule, true, None);
    }

    println!("{} → {} ({} days)", schedule.start_date, schedule.end_date, schedule.duration_days);
    for m in &schedule.milestones {
        println!(
            "  {:<20} {:>3}% {:>12.0}  {}  {}",
            m.name, m.percentage, m.amount, m.due_date, m.status
        );
    }
    println!(
        "paid {:.0}, outstanding {:.0}",
        schedule.paid_total(),
        schedule.outstanding_total()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mark_ok() {
        let (id, status) = parse_mark("progress=Due").unwrap();
        assert_eq!(id, "progress");
        assert_eq!(status, PaymentStatus::Due);
    }

    #[test]
    fn parse_mark_rejects_garbage() {
        assert!(parse_mark("progress").is_err());
        assert!(parse_mark("progress=done").is_err());
    }

    #[test]
    fn parse_date_reports_flag() {
        let err = parse_date("start", "01/02/2025").unwrap_err();
        assert!(err.message.contains("--start"));
        assert_eq!(err.code, crate::exit_codes::EXIT_USAGE);
    }
}
