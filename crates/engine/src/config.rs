use serde::{Deserialize, Serialize};

use crate::error::EstimateError;
use crate::payment::PaymentStatus;
use crate::roi::{RoiField, WhatIf};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Tunable defaults for the calculators. An empty TOML document yields the
/// stock configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub roi: RoiConfig,
    pub payments: MilestonePlan,
}

// ---------------------------------------------------------------------------
// ROI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    /// Closing costs as a fraction of purchase price when not supplied.
    pub closing_cost_rate: f64,
    /// Carrying costs as a fraction of purchase price when not supplied.
    pub carrying_cost_rate: f64,
    /// ROI at or above this is Low risk.
    pub low_risk_min_roi: f64,
    /// ROI at or above this (and below the Low threshold) is Moderate risk.
    pub moderate_risk_min_roi: f64,
    pub scenarios: Vec<WhatIf>,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            closing_cost_rate: 0.06,
            carrying_cost_rate: 0.02,
            low_risk_min_roi: 20.0,
            moderate_risk_min_roi: 15.0,
            scenarios: default_scenarios(),
        }
    }
}

fn default_scenarios() -> Vec<WhatIf> {
    vec![
        WhatIf::new("Negotiate 5% off purchase price", RoiField::PurchasePrice, 0.95),
        WhatIf::new("ARV comes in 5% higher", RoiField::AfterRepairValue, 1.05),
        WhatIf::new("Rehab 10% under budget", RoiField::RehabBudget, 0.90),
        WhatIf::new("ARV comes in 5% lower", RoiField::AfterRepairValue, 0.95),
        WhatIf::new("Rehab 10% over budget", RoiField::RehabBudget, 1.10),
    ]
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

/// One milestone slot in a payment plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneTemplate {
    pub id: String,
    pub name: String,
    /// Whole-number share of the project cost.
    pub percentage: u32,
    /// Position along the project timeline, 0.0 = start, 1.0 = end.
    pub offset: f64,
    #[serde(default = "default_status")]
    pub initial_status: PaymentStatus,
    #[serde(default)]
    pub tasks: Vec<String>,
}

fn default_status() -> PaymentStatus {
    PaymentStatus::Pending
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestonePlan {
    pub milestones: Vec<MilestoneTemplate>,
}

impl Default for MilestonePlan {
    fn default() -> Self {
        let m = |id: &str, name: &str, percentage, offset, initial_status, tasks: &[&str]| {
            MilestoneTemplate {
                id: id.to_string(),
                name: name.to_string(),
                percentage,
                offset,
                initial_status,
                tasks: tasks.iter().map(|t| t.to_string()).collect(),
            }
        };
        Self {
            milestones: vec![
                m("deposit", "Deposit", 25, 0.0, PaymentStatus::Paid, &[
                    "Contract signed",
                    "Permits submitted",
                    "Project scheduled",
                ]),
                m("materials", "Materials & Setup", 30, 0.2, PaymentStatus::Due, &[
                    "Materials ordered",
                    "Site prepared",
                    "Demolition complete",
                ]),
                m("progress", "Progress Payment", 30, 0.6, PaymentStatus::Pending, &[
                    "Rough-in complete",
                    "Inspections passed",
                    "Major installations complete",
                ]),
                m("final", "Final Payment", 15, 1.0, PaymentStatus::Pending, &[
                    "Finishes complete",
                    "Final inspection passed",
                    "Punch list closed",
                ]),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl EngineConfig {
    pub fn from_toml(input: &str) -> Result<Self, EstimateError> {
        let config: EngineConfig =
            toml::from_str(input).map_err(|e| EstimateError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EstimateError> {
        let roi = &self.roi;
        for (name, rate) in [
            ("closing_cost_rate", roi.closing_cost_rate),
            ("carrying_cost_rate", roi.carrying_cost_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(EstimateError::ConfigValidation(format!(
                    "roi.{name} must be between 0 and 1, got {rate}"
                )));
            }
        }

        if !roi.low_risk_min_roi.is_finite()
            || !roi.moderate_risk_min_roi.is_finite()
            || roi.moderate_risk_min_roi > roi.low_risk_min_roi
        {
            return Err(EstimateError::ConfigValidation(format!(
                "roi thresholds must satisfy moderate ({}) <= low ({})",
                roi.moderate_risk_min_roi, roi.low_risk_min_roi
            )));
        }

        for s in &roi.scenarios {
            if !s.factor.is_finite() || s.factor < 0.0 {
                return Err(EstimateError::ConfigValidation(format!(
                    "scenario '{}': factor must be a non-negative number, got {}",
                    s.name, s.factor
                )));
            }
        }

        let plan = &self.payments.milestones;
        if plan.is_empty() {
            return Err(EstimateError::ConfigValidation(
                "payments.milestones must not be empty".into(),
            ));
        }

        if let Some(m) = plan.iter().find(|m| m.percentage > 100) {
            return Err(EstimateError::ConfigValidation(format!(
                "milestone '{}': percentage must be at most 100, got {}",
                m.id, m.percentage
            )));
        }
        let pct_sum: u64 = plan.iter().map(|m| u64::from(m.percentage)).sum();
        if pct_sum != 100 {
            return Err(EstimateError::ConfigValidation(format!(
                "milestone percentages must sum to 100, got {pct_sum}"
            )));
        }

        let mut prev_offset = 0.0;
        for m in plan {
            if !(0.0..=1.0).contains(&m.offset) {
                return Err(EstimateError::ConfigValidation(format!(
                    "milestone '{}': offset must be between 0 and 1, got {}",
                    m.id, m.offset
                )));
            }
            if m.offset < prev_offset {
                return Err(EstimateError::ConfigValidation(format!(
                    "milestone '{}': offsets must not decrease",
                    m.id
                )));
            }
            prev_offset = m.offset;
        }

        let mut ids: Vec<&str> = plan.iter().map(|m| m.id.as_str()).collect();
        ids.sort_unstable();
        if let Some(dup) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(EstimateError::ConfigValidation(format!(
                "duplicate milestone id '{}'",
                dup[0]
            )));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
