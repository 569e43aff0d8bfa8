use chrono::NaiveDate;

use renoplan_engine::allocation::allocate;
use renoplan_engine::config::{EngineConfig, MilestonePlan, RoiConfig};
use renoplan_engine::confidence::{score, score_project, Confidence};
use renoplan_engine::payment;
use renoplan_engine::roi::{self, RiskTier, RoiInputs};
use renoplan_engine::timeline;
use renoplan_engine::{estimate, Category, CostTotals, ProjectDescriptor, QualityTier};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// -------------------------------------------------------------------------
// Reference scenarios
// -------------------------------------------------------------------------

#[test]
fn roi_reference_deal() {
    let r = roi::calculate(
        &RoiInputs::new(500_000.0, 75_000.0, 650_000.0),
        &RoiConfig::default(),
    );
    assert_eq!(r.total_investment, 615_000.0);
    assert_eq!(r.estimated_profit, 35_000.0);
    assert!((r.roi_percentage - 5.69).abs() < 0.005);
    assert_eq!(r.risk_tier, RiskTier::High);
}

#[test]
fn kitchen_cabinets_line() {
    let totals = CostTotals::new(10_000.0, 6_000.0, 800.0, 20_000.0);
    let b = allocate(&totals, Category::Kitchen, QualityTier::Standard, 200.0);
    let cabinets = b.materials.items.iter().find(|i| i.name == "Cabinets").unwrap();
    assert_eq!(cabinets.cost, 3_500.0);
}

#[test]
fn payment_reference_schedule() {
    let s = payment::generate(
        30_000.0,
        date("2025-01-01"),
        date("2025-03-01"),
        &MilestonePlan::default(),
    );
    let amounts: Vec<f64> = s.milestones.iter().map(|m| m.amount).collect();
    let dues: Vec<NaiveDate> = s.milestones.iter().map(|m| m.due_date).collect();
    assert_eq!(amounts, vec![7_500.0, 9_000.0, 9_000.0, 4_500.0]);
    assert_eq!(
        dues,
        vec![date("2025-01-01"), date("2025-01-13"), date("2025-02-05"), date("2025-03-01")]
    );
}

#[test]
fn addition_overrides_zip() {
    assert_eq!(score(true, false, Category::Addition), Confidence::Low);
    let p = ProjectDescriptor::new("Second-story addition", 400.0, QualityTier::Premium)
        .with_zip_code("02139");
    assert_eq!(score_project(&p), Confidence::Low);
}

#[test]
fn bathroom_premium_durations() {
    let standard = timeline::generate(Category::Bathroom, QualityTier::Standard);
    let premium = timeline::generate(Category::Bathroom, QualityTier::Premium);
    let pairs: Vec<(&str, &str)> = standard
        .phases
        .iter()
        .zip(&premium.phases)
        .map(|(s, p)| (s.duration.as_str(), p.duration.as_str()))
        .collect();
    assert!(pairs.contains(&("1-2 days", "2-3 days")));
    assert!(pairs.contains(&("1-2 weeks", "2-3 weeks")));
    assert!(pairs.contains(&("3-5 days", "4-6 days")));
}

// -------------------------------------------------------------------------
// End-to-end
// -------------------------------------------------------------------------

#[test]
fn estimate_from_toml_project() {
    let project: ProjectDescriptor = toml::from_str(
        r#"
project_type = "Basement finishing"
area_sq_ft = 800
quality = "Mid-Range"
zip_code = "55401"
start_date = "2025-06-02"
end_date = "2025-08-01"
"#,
    )
    .unwrap();
    let config = EngineConfig::from_toml("[roi]\nclosing_cost_rate = 0.05\n").unwrap();
    let totals = CostTotals::new(24_000.0, 20_000.0, 1_500.0, 52_000.0);

    let e = estimate(&project, &totals, &config);
    assert_eq!(e.project.category, Category::Basement);
    assert_eq!(e.breakdown.materials.multiplier, 1.2);
    assert_eq!(e.breakdown.overhead.subtotal, 6_500.0);
    assert_eq!(e.confidence, Confidence::Medium);
    assert_eq!(e.timeline.total_duration.to_string(), "8-10 weeks");

    let schedule = e.payment_schedule.as_ref().unwrap();
    assert_eq!(schedule.milestones.len(), 4);
    assert_eq!(schedule.scheduled_total(), 52_000.0);
    assert!(schedule
        .milestones
        .windows(2)
        .all(|w| w[0].due_date < w[1].due_date));

    let payload = e.to_prompt_payload();
    assert_eq!(payload["confidence"], "medium");
    assert_eq!(payload["timeline"]["phases"][0]["order"], 1);
    assert_eq!(payload["payment_schedule"]["milestones"][0]["status"], "paid");
}

#[test]
fn inconsistent_totals_yield_negative_overhead() {
    let project = ProjectDescriptor::new("kitchen", 150.0, QualityTier::Standard);
    let totals = CostTotals::new(20_000.0, 15_000.0, 2_000.0, 30_000.0);
    let e = estimate(&project, &totals, &EngineConfig::default());
    assert_eq!(e.breakdown.overhead.subtotal, -7_000.0);
    assert!(e.breakdown.overhead.items_total() < 0.0);
}

#[test]
fn estimate_is_idempotent() {
    let project = ProjectDescriptor::new("Luxury kitchen", 320.0, QualityTier::Luxury)
        .with_zip_code("10011")
        .with_dates(date("2025-03-03"), None);
    let totals = CostTotals::new(60_000.0, 40_000.0, 3_000.0, 120_000.0);
    let config = EngineConfig::default();
    assert_eq!(
        estimate(&project, &totals, &config),
        estimate(&project, &totals, &config)
    );
}
