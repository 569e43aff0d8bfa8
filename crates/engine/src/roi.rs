//! Investment return analysis for fix-and-flip style projects.

use serde::{Deserialize, Serialize};

use crate::config::RoiConfig;
use crate::model::{sanitize_amount, sanitize_signed, MAX_AMOUNT};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoiInputs {
    pub purchase_price: f64,
    pub rehab_budget: f64,
    pub after_repair_value: f64,
    /// Defaults to a share of the purchase price when absent.
    #[serde(default)]
    pub closing_costs: Option<f64>,
    #[serde(default)]
    pub carrying_costs: Option<f64>,
}

impl RoiInputs {
    pub fn new(purchase_price: f64, rehab_budget: f64, after_repair_value: f64) -> Self {
        Self {
            purchase_price,
            rehab_budget,
            after_repair_value,
            closing_costs: None,
            carrying_costs: None,
        }
    }

    fn sanitized(&self) -> Self {
        Self {
            purchase_price: sanitize_amount(self.purchase_price),
            rehab_budget: sanitize_amount(self.rehab_budget),
            after_repair_value: sanitize_amount(self.after_repair_value),
            closing_costs: self.closing_costs.map(sanitize_amount),
            carrying_costs: self.carrying_costs.map(sanitize_amount),
        }
    }

    fn get(&self, field: RoiField) -> f64 {
        match field {
            RoiField::PurchasePrice => self.purchase_price,
            RoiField::RehabBudget => self.rehab_budget,
            RoiField::AfterRepairValue => self.after_repair_value,
        }
    }

    fn with(mut self, field: RoiField, value: f64) -> Self {
        match field {
            RoiField::PurchasePrice => self.purchase_price = value,
            RoiField::RehabBudget => self.rehab_budget = value,
            RoiField::AfterRepairValue => self.after_repair_value = value,
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Moderate => write!(f, "moderate"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiQuality {
    Excellent,
    Good,
    Fair,
    BelowAverage,
    Poor,
}

impl RoiQuality {
    pub fn from_roi(roi: f64) -> Self {
        if roi >= 25.0 {
            Self::Excellent
        } else if roi >= 20.0 {
            Self::Good
        } else if roi >= 15.0 {
            Self::Fair
        } else if roi >= 10.0 {
            Self::BelowAverage
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::BelowAverage => "Below Average",
            Self::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiResult {
    pub closing_costs: f64,
    pub carrying_costs: f64,
    pub total_investment: f64,
    pub estimated_profit: f64,
    pub roi_percentage: f64,
    pub breakeven_sale_price: f64,
    pub margin_of_safety: f64,
    pub risk_tier: RiskTier,
    pub quality: RoiQuality,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

pub fn risk_tier(roi: f64, config: &RoiConfig) -> RiskTier {
    if roi >= config.low_risk_min_roi {
        RiskTier::Low
    } else if roi >= config.moderate_risk_min_roi {
        RiskTier::Moderate
    } else {
        RiskTier::High
    }
}

/// `part / whole` as a percentage; 0 when `whole` is not positive. A
/// near-zero `whole` saturates at `MAX_AMOUNT` instead of overflowing.
fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole * 100.0).clamp(-MAX_AMOUNT, MAX_AMOUNT)
    } else {
        0.0
    }
}

/// Evaluate the ROI formulas. Never fails; zero denominators yield 0.
pub fn calculate(inputs: &RoiInputs, config: &RoiConfig) -> RoiResult {
    let i = inputs.sanitized();
    let closing_costs = i
        .closing_costs
        .unwrap_or(i.purchase_price * config.closing_cost_rate);
    let carrying_costs = i
        .carrying_costs
        .unwrap_or(i.purchase_price * config.carrying_cost_rate);

    let total_investment = i.purchase_price + i.rehab_budget + closing_costs + carrying_costs;
    let estimated_profit = i.after_repair_value - total_investment;
    let roi_percentage = percent_of(estimated_profit, total_investment);
    let breakeven_sale_price = total_investment;
    let margin_of_safety =
        percent_of(i.after_repair_value - breakeven_sale_price, i.after_repair_value);

    log::debug!(
        "roi: investment={total_investment} profit={estimated_profit} roi={roi_percentage:.2}%"
    );

    RoiResult {
        closing_costs,
        carrying_costs,
        total_investment,
        estimated_profit,
        roi_percentage,
        breakeven_sale_price,
        margin_of_safety,
        risk_tier: risk_tier(roi_percentage, config),
        quality: RoiQuality::from_roi(roi_percentage),
    }
}

// ---------------------------------------------------------------------------
// What-if scenarios
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiField {
    PurchasePrice,
    RehabBudget,
    AfterRepairValue,
}

/// One input scaled by a fixed factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIf {
    pub name: String,
    pub field: RoiField,
    pub factor: f64,
}

impl WhatIf {
    pub fn new(name: impl Into<String>, field: RoiField, factor: f64) -> Self {
        Self { name: name.into(), field, factor }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub field: RoiField,
    pub factor: f64,
    pub result: RoiResult,
    /// Change in ROI percentage points against the baseline.
    pub roi_delta: f64,
    pub profit_delta: f64,
}

/// Re-run the formulas once per scenario. Defaulted closing/carrying costs
/// follow a perturbed purchase price; supplied ones stay fixed.
pub fn evaluate_scenarios(
    inputs: &RoiInputs,
    baseline: &RoiResult,
    scenarios: &[WhatIf],
    config: &RoiConfig,
) -> Vec<ScenarioOutcome> {
    let base = inputs.sanitized();
    scenarios
        .iter()
        .map(|s| {
            let value = base.get(s.field) * sanitize_signed(s.factor);
            let result = calculate(&base.with(s.field, value), config);
            ScenarioOutcome {
                name: s.name.clone(),
                field: s.field,
                factor: s.factor,
                result,
                roi_delta: result.roi_percentage - baseline.roi_percentage,
                profit_delta: result.estimated_profit - baseline.estimated_profit,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiAnalysis {
    pub inputs: RoiInputs,
    pub result: RoiResult,
    pub scenarios: Vec<ScenarioOutcome>,
}

/// Baseline plus the configured what-if scenarios.
pub fn analyze(inputs: &RoiInputs, config: &RoiConfig) -> RoiAnalysis {
    let result = calculate(inputs, config);
    let scenarios = evaluate_scenarios(inputs, &result, &config.scenarios, config);
    RoiAnalysis {
        inputs: *inputs,
        result,
        scenarios,
    }
}

/// Highest purchase price that still reaches `target_roi` percent, with
/// closing and carrying costs defaulted from that price.
///
/// Solves `arv = (1 + t) * (p * (1 + closing + carrying) + rehab)` for `p`.
/// Returns 0 when the target cannot be reached at any price.
pub fn max_purchase_for_target_roi(
    after_repair_value: f64,
    rehab_budget: f64,
    target_roi: f64,
    config: &RoiConfig,
) -> f64 {
    let arv = sanitize_amount(after_repair_value);
    let rehab = sanitize_amount(rehab_budget);
    let growth = 1.0 + sanitize_signed(target_roi) / 100.0;
    if growth <= 0.0 {
        return 0.0;
    }
    let cost_factor = 1.0 + config.closing_cost_rate + config.carrying_cost_rate;
    let price = (arv / growth - rehab) / cost_factor;
    price.clamp(0.0, MAX_AMOUNT)
}
