//! Cost allocation: category totals → itemized line entries.
//!
//! Each item is costed independently and rounded to whole currency units, so
//! a section's items can drift a few units from its subtotal. That drift is
//! reported, never redistributed.

use serde::Serialize;

use crate::allocation_tables::{allocation_table, ItemTemplate, OVERHEAD_ITEMS, PERMIT_ITEMS};
use crate::category::Category;
use crate::model::{sanitize_amount, CostTotals, LineItem, MAX_AMOUNT};
use crate::quality::QualityTier;

/// One section (materials, labor, permits, overhead) of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSection {
    pub label: String,
    pub subtotal: f64,
    /// Multiplier applied to every item in this section.
    pub multiplier: f64,
    pub items: Vec<LineItem>,
}

impl BreakdownSection {
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|i| i.cost).sum()
    }

    /// Items total minus the scaled subtotal; nonzero only through rounding.
    pub fn rounding_drift(&self) -> f64 {
        self.items_total() - (self.subtotal * self.multiplier).round()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub category: Category,
    pub quality_tier: QualityTier,
    pub area_sq_ft: f64,
    pub materials: BreakdownSection,
    pub labor: BreakdownSection,
    pub permits: BreakdownSection,
    pub overhead: BreakdownSection,
    pub total: f64,
}

impl CostBreakdown {
    pub fn sections(&self) -> [&BreakdownSection; 4] {
        [&self.materials, &self.labor, &self.permits, &self.overhead]
    }

    /// Sum of every line item across all sections.
    pub fn items_total(&self) -> f64 {
        self.sections().iter().map(|s| s.items_total()).sum()
    }

    pub fn cost_per_sq_ft(&self) -> f64 {
        if self.area_sq_ft > 0.0 {
            (self.total / self.area_sq_ft).clamp(-MAX_AMOUNT, MAX_AMOUNT)
        } else {
            0.0
        }
    }
}

/// Itemize `totals` for a project.
pub fn allocate(
    totals: &CostTotals,
    category: Category,
    tier: QualityTier,
    area_sq_ft: f64,
) -> CostBreakdown {
    let area = sanitize_amount(area_sq_ft);
    let multiplier = tier.multiplier();
    let table = allocation_table(category);

    log::debug!(
        "allocating {category} breakdown: total={} tier={tier} area={area}",
        totals.total
    );

    CostBreakdown {
        category,
        quality_tier: tier,
        area_sq_ft: area,
        materials: build_section("Materials", totals.materials, multiplier, table.materials, area),
        labor: build_section("Labor", totals.labor, 1.0, table.labor, area),
        permits: build_section("Permits & Fees", totals.permits, 1.0, PERMIT_ITEMS, area),
        overhead: build_section("Equipment & Overhead", totals.overhead, 1.0, OVERHEAD_ITEMS, area),
        total: totals.total,
    }
}

fn build_section(
    label: &str,
    subtotal: f64,
    multiplier: f64,
    templates: &[ItemTemplate],
    area: f64,
) -> BreakdownSection {
    let items = templates
        .iter()
        .map(|t| LineItem {
            name: t.name.to_string(),
            cost: (subtotal * t.weight * multiplier).round(),
            unit: t.unit.to_string(),
            quantity: t.quantity.quantity(area),
            description: t.description.to_string(),
        })
        .collect();

    BreakdownSection {
        label: label.to_string(),
        subtotal,
        multiplier,
        items,
    }
}
