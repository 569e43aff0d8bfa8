//! Phase-based project timelines.
//!
//! Phase templates and the total-duration table are kept separately and are
//! not reconciled: the total is an independent estimate, not a phase sum.

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::category::Category;
use crate::quality::QualityTier;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePhase {
    pub id: String,
    pub name: String,
    pub duration: String,
    pub order: u32,
    /// Blocks downstream phases; cannot be skipped or run in parallel.
    pub critical: bool,
    pub tasks: Vec<String>,
}

/// Whole-week range for a project's total duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationRange {
    pub min_weeks: u32,
    pub max_weeks: u32,
}

impl DurationRange {
    /// Projected completion using the upper bound. Saturates at
    /// `NaiveDate::MAX`.
    pub fn end_date(&self, start: NaiveDate) -> NaiveDate {
        start
            .checked_add_signed(Duration::weeks(i64::from(self.max_weeks)))
            .unwrap_or_else(|| {
                log::warn!("projected end past {start} is out of range; using the latest date");
                NaiveDate::MAX
            })
    }
}

impl std::fmt::Display for DurationRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} weeks", self.min_weeks, self.max_weeks)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTimeline {
    pub category: Category,
    pub quality_tier: QualityTier,
    pub phases: Vec<TimelinePhase>,
    pub total_duration: DurationRange,
    /// Names of critical phases in order.
    pub critical_path: Vec<String>,
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

struct PhaseTemplate {
    id: &'static str,
    name: &'static str,
    duration: &'static str,
    critical: bool,
    tasks: &'static [&'static str],
}

const fn phase(
    id: &'static str,
    name: &'static str,
    duration: &'static str,
    critical: bool,
    tasks: &'static [&'static str],
) -> PhaseTemplate {
    PhaseTemplate { id, name, duration, critical, tasks }
}

const KITCHEN_PHASES: &[PhaseTemplate] = &[
    phase("design", "Design & Planning", "1-2 weeks", false, &[
        "Finalize layout",
        "Select cabinets and finishes",
        "Order long-lead items",
    ]),
    phase("permits", "Permits & Approvals", "1-3 weeks", true, &[
        "Submit permit application",
        "Respond to plan review",
    ]),
    phase("demolition", "Demolition", "2-3 days", false, &[
        "Protect adjacent areas",
        "Remove cabinets and counters",
        "Haul debris",
    ]),
    phase("rough_in", "Rough-In Plumbing & Electrical", "3-5 days", true, &[
        "Relocate supply and drain lines",
        "Run new circuits",
        "Rough-in inspection",
    ]),
    phase("walls", "Drywall & Paint", "3-4 days", false, &[
        "Patch and hang drywall",
        "Prime and paint",
    ]),
    phase("cabinets", "Cabinet Installation", "3-5 days", false, &[
        "Install base and wall cabinets",
        "Level and secure",
    ]),
    phase("countertops", "Countertops", "1-2 weeks", false, &[
        "Template countertops",
        "Fabricate and install",
    ]),
    phase("finishes", "Backsplash, Fixtures & Appliances", "3-5 days", false, &[
        "Install backsplash",
        "Set sink and faucet",
        "Connect appliances",
    ]),
    phase("closeout", "Final Inspection & Walkthrough", "1-2 days", false, &[
        "Final inspection",
        "Punch list",
        "Client walkthrough",
    ]),
];

const BATHROOM_PHASES: &[PhaseTemplate] = &[
    phase("design", "Design & Planning", "1-2 weeks", false, &[
        "Finalize layout",
        "Select tile and fixtures",
    ]),
    phase("permits", "Permits & Approvals", "1-2 weeks", true, &[
        "Submit permit application",
    ]),
    phase("demolition", "Demolition", "1-2 days", false, &[
        "Remove fixtures and tile",
        "Inspect subfloor",
    ]),
    phase("rough_in", "Rough-In Plumbing & Electrical", "2-4 days", true, &[
        "Relocate drains and supply",
        "Install shower valve",
        "Wire GFCI circuits and fan",
    ]),
    phase("waterproofing", "Waterproofing", "1-2 days", true, &[
        "Install backer board",
        "Apply membrane",
        "Flood test",
    ]),
    phase("tile", "Tile Installation", "3-5 days", false, &[
        "Set floor tile",
        "Set wall and shower tile",
        "Grout and seal",
    ]),
    phase("fixtures", "Fixture Installation", "1-2 days", false, &[
        "Set vanity and toilet",
        "Install trim and accessories",
    ]),
    phase("closeout", "Final Touches & Inspection", "1-2 days", false, &[
        "Caulk and paint touch-up",
        "Final inspection",
    ]),
];

const BASEMENT_PHASES: &[PhaseTemplate] = &[
    phase("design", "Design & Planning", "1-2 weeks", false, &[
        "Assess moisture",
        "Finalize layout",
    ]),
    phase("permits", "Permits & Approvals", "2-3 weeks", true, &[
        "Submit permit application",
        "Egress review",
    ]),
    phase("framing", "Framing", "1-2 weeks", false, &[
        "Frame walls and soffits",
        "Install egress window",
    ]),
    phase("rough_in", "Rough-In Plumbing, Electrical & HVAC", "1-2 weeks", true, &[
        "Run circuits",
        "Extend ductwork",
        "Rough-in inspection",
    ]),
    phase("insulation", "Insulation & Drywall", "1-2 weeks", false, &[
        "Insulate walls and rim joists",
        "Hang and finish drywall",
    ]),
    phase("finishes", "Flooring, Trim & Paint", "1-2 weeks", false, &[
        "Install flooring",
        "Hang doors and trim",
        "Paint",
    ]),
    phase("closeout", "Final Inspection & Walkthrough", "1-2 days", false, &[
        "Final inspection",
        "Client walkthrough",
    ]),
];

const ADDITION_PHASES: &[PhaseTemplate] = &[
    phase("design", "Architectural Design", "3-6 weeks", false, &[
        "Survey and drawings",
        "Structural engineering",
    ]),
    phase("permits", "Permits & Approvals", "4-8 weeks", true, &[
        "Zoning review",
        "Building permit",
    ]),
    phase("foundation", "Excavation & Foundation", "2-3 weeks", true, &[
        "Excavate",
        "Pour footings and foundation",
        "Foundation inspection",
    ]),
    phase("framing", "Framing & Roofing", "3-4 weeks", true, &[
        "Frame floor, walls and roof",
        "Dry-in with sheathing and roofing",
    ]),
    phase("rough_in", "Rough-In Mechanicals", "2-3 weeks", true, &[
        "Plumbing, electrical and HVAC rough-in",
        "Rough-in inspection",
    ]),
    phase("exterior", "Exterior Finishes", "2-3 weeks", false, &[
        "Windows and doors",
        "Siding and trim",
    ]),
    phase("interior", "Interior Finishes", "3-5 weeks", false, &[
        "Insulation and drywall",
        "Flooring, trim and paint",
    ]),
    phase("closeout", "Final Inspection & Walkthrough", "1-2 weeks", false, &[
        "Final inspection",
        "Certificate of occupancy",
    ]),
];

fn phase_templates(category: Category) -> &'static [PhaseTemplate] {
    match category {
        Category::Kitchen | Category::Generic => KITCHEN_PHASES,
        Category::Bathroom => BATHROOM_PHASES,
        Category::Basement => BASEMENT_PHASES,
        Category::Addition => ADDITION_PHASES,
    }
}

/// Independent total-duration estimate per category and tier.
pub fn total_duration(category: Category, tier: QualityTier) -> DurationRange {
    let (min_weeks, max_weeks) = match (category, tier) {
        (Category::Kitchen, QualityTier::Budget) => (4, 6),
        (Category::Kitchen, QualityTier::Standard) => (6, 8),
        (Category::Kitchen, QualityTier::MidRange) => (8, 10),
        (Category::Kitchen, QualityTier::Premium) => (10, 14),
        (Category::Kitchen, QualityTier::Luxury) => (12, 16),
        (Category::Bathroom, QualityTier::Budget) => (2, 3),
        (Category::Bathroom, QualityTier::Standard) => (3, 4),
        (Category::Bathroom, QualityTier::MidRange) => (4, 6),
        (Category::Bathroom, QualityTier::Premium) => (6, 8),
        (Category::Bathroom, QualityTier::Luxury) => (8, 10),
        (Category::Basement, QualityTier::Budget) => (4, 6),
        (Category::Basement, QualityTier::Standard) => (6, 8),
        (Category::Basement, QualityTier::MidRange) => (8, 10),
        (Category::Basement, QualityTier::Premium) => (10, 12),
        (Category::Basement, QualityTier::Luxury) => (12, 16),
        (Category::Addition, QualityTier::Budget) => (8, 12),
        (Category::Addition, QualityTier::Standard) => (12, 16),
        (Category::Addition, QualityTier::MidRange) => (14, 18),
        (Category::Addition, QualityTier::Premium) => (16, 20),
        (Category::Addition, QualityTier::Luxury) => (20, 26),
        (Category::Generic, QualityTier::Budget) => (2, 4),
        (Category::Generic, QualityTier::Standard) => (3, 5),
        (Category::Generic, QualityTier::MidRange) => (4, 6),
        (Category::Generic, QualityTier::Premium) => (6, 8),
        (Category::Generic, QualityTier::Luxury) => (8, 10),
    };
    DurationRange { min_weeks, max_weeks }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Add one to every integer in a duration string: "2-3 days" → "3-4 days".
pub fn extend_duration(duration: &str) -> String {
    NUMBER
        .replace_all(duration, |caps: &Captures| match caps[0].parse::<u64>() {
            Ok(n) => (n + 1).to_string(),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}

pub fn generate(category: Category, tier: QualityTier) -> ProjectTimeline {
    let extend = tier.extends_durations();
    let phases: Vec<TimelinePhase> = phase_templates(category)
        .iter()
        .enumerate()
        .map(|(i, t)| TimelinePhase {
            id: t.id.to_string(),
            name: t.name.to_string(),
            duration: if extend {
                extend_duration(t.duration)
            } else {
                t.duration.to_string()
            },
            order: i as u32 + 1,
            critical: t.critical,
            tasks: t.tasks.iter().map(|s| s.to_string()).collect(),
        })
        .collect();

    let critical_path = phases
        .iter()
        .filter(|p| p.critical)
        .map(|p| p.name.clone())
        .collect();

    log::debug!("timeline for {category}/{tier}: {} phases", phases.len());

    ProjectTimeline {
        category,
        quality_tier: tier,
        phases,
        total_duration: total_duration(category, tier),
        critical_path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn durations(t: &ProjectTimeline) -> Vec<&str> {
        t.phases.iter().map(|p| p.duration.as_str()).collect()
    }

    #[test]
    fn extend_duration_bumps_every_number() {
        assert_eq!(extend_duration("2-3 days"), "3-4 days");
        assert_eq!(extend_duration("1-2 weeks"), "2-3 weeks");
        assert_eq!(extend_duration("9-10 days"), "10-11 days");
        assert_eq!(extend_duration("a while"), "a while");
    }

    #[test]
    fn bathroom_premium_extends_all_phases() {
        let standard = generate(Category::Bathroom, QualityTier::Standard);
        let premium = generate(Category::Bathroom, QualityTier::Premium);
        assert_eq!(standard.phases.len(), premium.phases.len());
        for (s, p) in standard.phases.iter().zip(&premium.phases) {
            assert_eq!(extend_duration(&s.duration), p.duration);
        }
        let demo = premium.phases.iter().find(|p| p.id == "demolition").unwrap();
        assert_eq!(demo.duration, "2-3 days");
    }

    #[test]
    fn lower_tiers_unchanged() {
        let budget = generate(Category::Kitchen, QualityTier::Budget);
        let mid = generate(Category::Kitchen, QualityTier::MidRange);
        assert_eq!(durations(&budget), durations(&mid));
        assert_eq!(budget.phases[2].duration, "2-3 days");
    }

    #[test]
    fn luxury_also_extends() {
        let t = generate(Category::Kitchen, QualityTier::Luxury);
        assert_eq!(t.phases[2].duration, "3-4 days");
    }

    #[test]
    fn phases_ordered_from_one() {
        for category in Category::ALL {
            let t = generate(category, QualityTier::Standard);
            let orders: Vec<u32> = t.phases.iter().map(|p| p.order).collect();
            let expected: Vec<u32> = (1..=t.phases.len() as u32).collect();
            assert_eq!(orders, expected, "{category}");
        }
    }

    #[test]
    fn generic_uses_kitchen_template() {
        let generic = generate(Category::Generic, QualityTier::Standard);
        let kitchen = generate(Category::Kitchen, QualityTier::Standard);
        assert_eq!(generic.phases, kitchen.phases);
        assert_ne!(generic.total_duration, kitchen.total_duration);
    }

    #[test]
    fn critical_gates() {
        let t = generate(Category::Bathroom, QualityTier::Standard);
        assert_eq!(
            t.critical_path,
            vec!["Permits & Approvals", "Rough-In Plumbing & Electrical", "Waterproofing"]
        );
        for category in Category::ALL {
            let t = generate(category, QualityTier::Standard);
            assert!(t.phases.iter().any(|p| p.id == "permits" && p.critical));
        }
    }

    #[test]
    fn total_duration_table() {
        let kitchen = total_duration(Category::Kitchen, QualityTier::Standard);
        assert_eq!(kitchen.to_string(), "6-8 weeks");
        let bathroom = total_duration(Category::Bathroom, QualityTier::Premium);
        assert_eq!(bathroom.to_string(), "6-8 weeks");
        for category in Category::ALL {
            for tier in QualityTier::ALL {
                let d = total_duration(category, tier);
                assert!(d.min_weeks <= d.max_weeks);
            }
        }
    }

    #[test]
    fn duration_end_date() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let d = total_duration(Category::Bathroom, QualityTier::Standard);
        assert_eq!(d.end_date(start), NaiveDate::from_ymd_opt(2025, 1, 29).unwrap());
    }

    #[test]
    fn duration_end_date_saturates() {
        let start = NaiveDate::MAX - Duration::days(3);
        let d = total_duration(Category::Kitchen, QualityTier::Standard);
        assert_eq!(d.end_date(start), NaiveDate::MAX);
    }
}
