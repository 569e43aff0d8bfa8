use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::category::{classify, Category};
use crate::quality::QualityTier;

// ---------------------------------------------------------------------------
// Input sanitizing
// ---------------------------------------------------------------------------

/// Upper bound for any amount or area the engine accepts. Keeps every sum,
/// product and ratio the calculators form well inside `f64` range.
pub const MAX_AMOUNT: f64 = 1e15;

/// Coerce a money/area amount into a finite value in `[0, MAX_AMOUNT]`.
///
/// NaN, infinities and negatives become 0 so a bad form field degrades the
/// estimate instead of failing it.
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        if value > MAX_AMOUNT {
            log::warn!("clamping amount {value} to {MAX_AMOUNT}");
            MAX_AMOUNT
        } else {
            value
        }
    } else {
        if value != 0.0 {
            log::warn!("coercing invalid amount {value} to 0");
        }
        0.0
    }
}

/// Coerce to a finite value in `[-MAX_AMOUNT, MAX_AMOUNT]`; sign is kept.
pub fn sanitize_signed(value: f64) -> f64 {
    if !value.is_finite() {
        log::warn!("coercing non-finite value {value} to 0");
        0.0
    } else if value.abs() > MAX_AMOUNT {
        log::warn!("clamping value {value} to +/-{MAX_AMOUNT}");
        value.clamp(-MAX_AMOUNT, MAX_AMOUNT)
    } else {
        value
    }
}

// ---------------------------------------------------------------------------
// Project descriptor
// ---------------------------------------------------------------------------

/// Coarse description of a renovation project as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProjectSpec")]
pub struct ProjectDescriptor {
    pub category: Category,
    pub raw_type_text: String,
    pub area_sq_ft: f64,
    pub quality_tier: QualityTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl ProjectDescriptor {
    /// Category is always derived from the type text.
    pub fn new(
        raw_type_text: impl Into<String>,
        area_sq_ft: f64,
        quality_tier: QualityTier,
    ) -> Self {
        let raw_type_text = raw_type_text.into();
        Self {
            category: classify(&raw_type_text),
            raw_type_text,
            area_sq_ft: sanitize_amount(area_sq_ft),
            quality_tier,
            zip_code: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn with_zip_code(mut self, zip: impl Into<String>) -> Self {
        self.zip_code = Some(zip.into());
        self
    }

    pub fn with_dates(mut self, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        self.start_date = Some(start);
        self.end_date = end;
        self
    }

    /// A postal code counts as supplied when it is exactly five characters.
    pub fn has_postal_code(&self) -> bool {
        self.zip_code
            .as_deref()
            .is_some_and(|z| z.trim().chars().count() == 5)
    }
}

/// On-disk / wire shape of a project. Field names follow the intake form.
#[derive(Debug, Clone, Deserialize)]
struct ProjectSpec {
    #[serde(alias = "raw_type_text")]
    project_type: String,
    #[serde(default)]
    area_sq_ft: f64,
    #[serde(default, alias = "quality_tier")]
    quality: Option<String>,
    #[serde(default)]
    zip_code: Option<String>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    end_date: Option<NaiveDate>,
}

impl From<ProjectSpec> for ProjectDescriptor {
    fn from(spec: ProjectSpec) -> Self {
        let tier = spec
            .quality
            .as_deref()
            .map(QualityTier::parse_lenient)
            .unwrap_or_default();
        let mut project = ProjectDescriptor::new(spec.project_type, spec.area_sq_ft, tier);
        project.zip_code = spec.zip_code.filter(|z| !z.trim().is_empty());
        project.start_date = spec.start_date;
        project.end_date = spec.end_date;
        project
    }
}

// ---------------------------------------------------------------------------
// Cost totals + line items
// ---------------------------------------------------------------------------

/// Category totals for a project. `overhead` is whatever `total` leaves over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostTotals {
    pub materials: f64,
    pub labor: f64,
    pub permits: f64,
    pub overhead: f64,
    pub total: f64,
}

impl CostTotals {
    /// Overhead may come out negative when the parts exceed `total`; it is
    /// left that way so upstream can see the inconsistency.
    pub fn new(materials: f64, labor: f64, permits: f64, total: f64) -> Self {
        let materials = sanitize_amount(materials);
        let labor = sanitize_amount(labor);
        let permits = sanitize_amount(permits);
        let total = sanitize_signed(total);
        let overhead = total - materials - labor - permits;
        if overhead < 0.0 {
            log::warn!(
                "cost parts ({}) exceed total ({total}); overhead is negative",
                materials + labor + permits
            );
        }
        Self {
            materials,
            labor,
            permits,
            overhead,
            total,
        }
    }
}

/// One display row of a cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub cost: f64,
    pub unit: String,
    pub quantity: f64,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overhead_is_remainder() {
        let totals = CostTotals::new(10_000.0, 8_000.0, 1_000.0, 25_000.0);
        assert_eq!(totals.overhead, 6_000.0);
    }

    #[test]
    fn overhead_may_go_negative() {
        let totals = CostTotals::new(10_000.0, 8_000.0, 1_000.0, 15_000.0);
        assert_eq!(totals.overhead, -4_000.0);
    }

    #[test]
    fn invalid_amounts_coerce_to_zero() {
        let totals = CostTotals::new(f64::NAN, -5.0, f64::INFINITY, f64::NAN);
        assert_eq!(totals.materials, 0.0);
        assert_eq!(totals.labor, 0.0);
        assert_eq!(totals.permits, 0.0);
        assert_eq!(totals.total, 0.0);
        assert_eq!(totals.overhead, 0.0);
    }

    #[test]
    fn huge_amounts_clamp() {
        assert_eq!(sanitize_amount(1e308), MAX_AMOUNT);
        assert_eq!(sanitize_signed(-1e308), -MAX_AMOUNT);
        assert_eq!(sanitize_signed(f64::MAX), MAX_AMOUNT);

        let totals = CostTotals::new(f64::MAX, f64::MAX, f64::MAX, -f64::MAX);
        assert_eq!(totals.materials, MAX_AMOUNT);
        assert_eq!(totals.total, -MAX_AMOUNT);
        assert!(totals.overhead.is_finite());
    }

    #[test]
    fn descriptor_derives_category() {
        let p = ProjectDescriptor::new("Kitchen remodel", 200.0, QualityTier::Standard);
        assert_eq!(p.category, Category::Kitchen);
        let p = ProjectDescriptor::new("Deck", -10.0, QualityTier::Standard);
        assert_eq!(p.category, Category::Generic);
        assert_eq!(p.area_sq_ft, 0.0);
    }

    #[test]
    fn postal_code_must_be_five_chars() {
        let p = ProjectDescriptor::new("Kitchen", 100.0, QualityTier::Standard);
        assert!(!p.has_postal_code());
        assert!(p.clone().with_zip_code("90210").has_postal_code());
        assert!(p.clone().with_zip_code(" 90210 ").has_postal_code());
        assert!(!p.clone().with_zip_code("9021").has_postal_code());
        assert!(!p.with_zip_code("90210-1234").has_postal_code());
    }

    #[test]
    fn deserialize_from_toml() {
        let input = r#"
project_type = "Master Bathroom Remodel"
area_sq_ft = 85
quality = "premium"
zip_code = "10001"
start_date = "2025-04-01"
"#;
        let p: ProjectDescriptor = toml::from_str(input).unwrap();
        assert_eq!(p.category, Category::Bathroom);
        assert_eq!(p.quality_tier, QualityTier::Premium);
        assert_eq!(p.area_sq_ft, 85.0);
        assert_eq!(p.start_date, NaiveDate::from_ymd_opt(2025, 4, 1));
        assert!(p.end_date.is_none());
    }

    #[test]
    fn deserialize_unknown_quality_defaults() {
        let p: ProjectDescriptor =
            serde_json::from_str(r#"{"project_type":"attic","quality":"gold"}"#).unwrap();
        assert_eq!(p.quality_tier, QualityTier::Standard);
        assert_eq!(p.area_sq_ft, 0.0);
    }

    #[test]
    fn json_roundtrip_keeps_category() {
        let p = ProjectDescriptor::new("Basement finish", 600.0, QualityTier::MidRange)
            .with_zip_code("60601");
        let json = serde_json::to_string(&p).unwrap();
        let back: ProjectDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
