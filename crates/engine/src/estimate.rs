use serde::Serialize;

use crate::allocation::{allocate, CostBreakdown};
use crate::confidence::{score_project, Confidence};
use crate::config::EngineConfig;
use crate::model::{CostTotals, ProjectDescriptor};
use crate::payment::{self, PaymentSchedule};
use crate::timeline::{self, ProjectTimeline};

/// Everything the engine can say about one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectEstimate {
    pub project: ProjectDescriptor,
    pub totals: CostTotals,
    pub breakdown: CostBreakdown,
    pub confidence: Confidence,
    pub timeline: ProjectTimeline,
    /// Present only when the project has a start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_schedule: Option<PaymentSchedule>,
}

/// Run every calculator for a project.
///
/// Without an end date the schedule runs to the upper bound of the
/// total-duration table.
pub fn estimate(
    project: &ProjectDescriptor,
    totals: &CostTotals,
    config: &EngineConfig,
) -> ProjectEstimate {
    let breakdown = allocate(totals, project.category, project.quality_tier, project.area_sq_ft);
    let timeline = timeline::generate(project.category, project.quality_tier);

    let payment_schedule = project.start_date.map(|start| {
        let end = project
            .end_date
            .unwrap_or_else(|| timeline.total_duration.end_date(start));
        payment::generate(totals.total, start, end, &config.payments)
    });
    if payment_schedule.is_none() {
        log::debug!("no start date for '{}'; skipping payment schedule", project.raw_type_text);
    }

    ProjectEstimate {
        project: project.clone(),
        totals: *totals,
        breakdown,
        confidence: score_project(project),
        timeline,
        payment_schedule,
    }
}

impl ProjectEstimate {
    /// Opaque JSON view of the estimate for embedding in a prompt.
    pub fn to_prompt_payload(&self) -> serde_json::Value {
        // Every field is plain data; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::quality::QualityTier;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn full_estimate_with_dates() {
        let project = ProjectDescriptor::new("Kitchen remodel", 200.0, QualityTier::Standard)
            .with_zip_code("94110")
            .with_dates(date("2025-01-01"), Some(date("2025-03-01")));
        let totals = CostTotals::new(10_000.0, 8_000.0, 1_000.0, 30_000.0);
        let e = estimate(&project, &totals, &EngineConfig::default());

        assert_eq!(e.breakdown.category, Category::Kitchen);
        assert_eq!(e.confidence, Confidence::High);
        assert_eq!(e.timeline.phases.len(), 9);
        let schedule = e.payment_schedule.unwrap();
        assert_eq!(schedule.scheduled_total(), 30_000.0);
        assert_eq!(schedule.end_date, date("2025-03-01"));
    }

    #[test]
    fn end_date_projected_from_duration_table() {
        let project = ProjectDescriptor::new("Bathroom", 60.0, QualityTier::Standard)
            .with_dates(date("2025-01-01"), None);
        let totals = CostTotals::new(5_000.0, 5_000.0, 500.0, 12_000.0);
        let e = estimate(&project, &totals, &EngineConfig::default());
        let schedule = e.payment_schedule.unwrap();
        // Bathroom/Standard is 3-4 weeks
        assert_eq!(schedule.end_date, date("2025-01-29"));
        assert_eq!(e.confidence, Confidence::Low);
    }

    #[test]
    fn start_near_latest_date_projects_to_max() {
        let start = NaiveDate::MAX - chrono::Duration::days(3);
        let project = ProjectDescriptor::new("Kitchen", 150.0, QualityTier::Standard)
            .with_dates(start, None);
        let totals = CostTotals::new(5_000.0, 5_000.0, 500.0, 12_000.0);
        let e = estimate(&project, &totals, &EngineConfig::default());
        let schedule = e.payment_schedule.unwrap();
        assert_eq!(schedule.end_date, NaiveDate::MAX);
        assert_eq!(schedule.duration_days, 3);
    }

    #[test]
    fn no_start_no_schedule() {
        let project = ProjectDescriptor::new("Deck", 100.0, QualityTier::Budget);
        let totals = CostTotals::new(1_000.0, 1_000.0, 0.0, 2_000.0);
        let e = estimate(&project, &totals, &EngineConfig::default());
        assert!(e.payment_schedule.is_none());
        let payload = e.to_prompt_payload();
        assert!(payload.get("payment_schedule").is_none());
        assert_eq!(payload["breakdown"]["category"], "generic");
        assert_eq!(payload["project"]["quality_tier"], "budget");
    }
}
