//! Static line-item tables for cost allocation.
//!
//! Each group's weights sum to 1.0. Order here is the order items are emitted.

use crate::category::Category;

/// How a line item's displayed quantity is derived from project area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityRule {
    Fixed(f64),
    Area,
    AreaTimes(f64),
}

impl QuantityRule {
    pub fn quantity(&self, area_sq_ft: f64) -> f64 {
        let raw = match *self {
            Self::Fixed(q) => q,
            Self::Area => area_sq_ft,
            Self::AreaTimes(factor) => area_sq_ft * factor,
        };
        ((raw * 100.0).round() / 100.0).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTemplate {
    pub name: &'static str,
    pub weight: f64,
    pub unit: &'static str,
    pub quantity: QuantityRule,
    pub description: &'static str,
}

const fn item(
    name: &'static str,
    weight: f64,
    unit: &'static str,
    quantity: QuantityRule,
    description: &'static str,
) -> ItemTemplate {
    ItemTemplate { name, weight, unit, quantity, description }
}

use QuantityRule::{Area, AreaTimes, Fixed};

/// Material and labor tables for one category.
#[derive(Debug, Clone, Copy)]
pub struct AllocationTable {
    pub materials: &'static [ItemTemplate],
    pub labor: &'static [ItemTemplate],
}

pub fn allocation_table(category: Category) -> AllocationTable {
    match category {
        Category::Kitchen => AllocationTable {
            materials: KITCHEN_MATERIALS,
            labor: KITCHEN_LABOR,
        },
        Category::Bathroom => AllocationTable {
            materials: BATHROOM_MATERIALS,
            labor: BATHROOM_LABOR,
        },
        Category::Basement => AllocationTable {
            materials: BASEMENT_MATERIALS,
            labor: BASEMENT_LABOR,
        },
        Category::Addition => AllocationTable {
            materials: ADDITION_MATERIALS,
            labor: ADDITION_LABOR,
        },
        Category::Generic => AllocationTable {
            materials: GENERIC_MATERIALS,
            labor: GENERIC_LABOR,
        },
    }
}

// ---------------------------------------------------------------------------
// Kitchen
// ---------------------------------------------------------------------------

const KITCHEN_MATERIALS: &[ItemTemplate] = &[
    item("Cabinets", 0.35, "linear ft", AreaTimes(0.15), "Base and wall cabinets with hardware"),
    item("Countertops", 0.20, "sq ft", AreaTimes(0.25), "Countertop slabs including fabrication"),
    item("Appliances", 0.20, "each", Fixed(5.0), "Range, refrigerator, dishwasher and hood"),
    item("Flooring", 0.10, "sq ft", Area, "Floor covering and underlayment"),
    item("Backsplash & Tile", 0.05, "sq ft", AreaTimes(0.15), "Wall tile, grout and thinset"),
    item("Sink & Fixtures", 0.05, "each", Fixed(3.0), "Sink, faucet and disposal"),
    item("Lighting", 0.05, "each", Fixed(6.0), "Recessed, pendant and under-cabinet fixtures"),
];

const KITCHEN_LABOR: &[ItemTemplate] = &[
    item("Demolition", 0.10, "hours", AreaTimes(0.1), "Remove cabinets, counters and flooring"),
    item("Cabinet Installation", 0.25, "hours", AreaTimes(0.2), "Set, level and secure cabinets"),
    item("Plumbing", 0.15, "hours", Fixed(16.0), "Supply, drain and appliance connections"),
    item("Electrical", 0.15, "hours", Fixed(16.0), "Circuits, outlets and lighting"),
    item("Countertop Installation", 0.10, "hours", Fixed(8.0), "Template, set and seal tops"),
    item("Flooring Installation", 0.10, "sq ft", Area, "Install floor covering"),
    item("Tile Work", 0.05, "sq ft", AreaTimes(0.15), "Backsplash setting and grouting"),
    item("Painting & Finishing", 0.10, "hours", AreaTimes(0.05), "Wall prep, paint and trim"),
];

// ---------------------------------------------------------------------------
// Bathroom
// ---------------------------------------------------------------------------

const BATHROOM_MATERIALS: &[ItemTemplate] = &[
    item("Vanity & Sink", 0.20, "each", Fixed(1.0), "Vanity cabinet, top and sink"),
    item("Toilet", 0.08, "each", Fixed(1.0), "Toilet with seat and supply line"),
    item("Shower/Tub", 0.25, "each", Fixed(1.0), "Shower pan or tub with surround"),
    item("Tile", 0.25, "sq ft", AreaTimes(2.5), "Floor and wall tile with setting materials"),
    item("Fixtures & Faucets", 0.12, "each", Fixed(4.0), "Faucets, shower valve and trim"),
    item("Lighting & Ventilation", 0.10, "each", Fixed(3.0), "Vanity lighting and exhaust fan"),
];

const BATHROOM_LABOR: &[ItemTemplate] = &[
    item("Demolition", 0.10, "hours", Fixed(12.0), "Remove fixtures, tile and drywall"),
    item("Plumbing", 0.30, "hours", Fixed(24.0), "Rough-in and finish plumbing"),
    item("Electrical", 0.10, "hours", Fixed(8.0), "GFCI circuits, lighting and fan wiring"),
    item("Waterproofing", 0.10, "sq ft", AreaTimes(1.5), "Membrane for shower and wet areas"),
    item("Tile Installation", 0.25, "sq ft", AreaTimes(2.5), "Set and grout floor and wall tile"),
    item("Fixture Installation", 0.10, "hours", Fixed(8.0), "Set vanity, toilet and trim"),
    item("Painting", 0.05, "hours", Fixed(6.0), "Moisture-resistant paint and touch-up"),
];

// ---------------------------------------------------------------------------
// Basement
// ---------------------------------------------------------------------------

const BASEMENT_MATERIALS: &[ItemTemplate] = &[
    item("Framing Lumber", 0.15, "board ft", AreaTimes(1.2), "Studs, plates and blocking"),
    item("Insulation", 0.12, "sq ft", AreaTimes(1.1), "Rigid foam and batt insulation"),
    item("Drywall", 0.15, "sheets", AreaTimes(0.1), "Drywall sheets, tape and compound"),
    item("Flooring", 0.20, "sq ft", Area, "Moisture-tolerant floor covering"),
    item("Electrical Supplies", 0.10, "lot", Fixed(1.0), "Wire, boxes, outlets and fixtures"),
    item("Plumbing Supplies", 0.08, "lot", Fixed(1.0), "Pipe, fittings and fixtures"),
    item("Doors & Trim", 0.10, "each", Fixed(4.0), "Interior doors, casing and base trim"),
    item("Paint", 0.05, "gallons", AreaTimes(0.01), "Primer and finish paint"),
    item("Egress Window", 0.05, "each", Fixed(1.0), "Code-compliant egress window and well"),
];

const BASEMENT_LABOR: &[ItemTemplate] = &[
    item("Framing", 0.20, "hours", AreaTimes(0.05), "Frame walls and soffits"),
    item("Electrical", 0.15, "hours", Fixed(24.0), "Circuits, outlets and lighting"),
    item("Plumbing", 0.10, "hours", Fixed(16.0), "Rough-in for bar or bathroom"),
    item("Insulation", 0.10, "sq ft", AreaTimes(1.1), "Install wall and rim-joist insulation"),
    item("Drywall", 0.20, "sq ft", AreaTimes(3.0), "Hang, tape and finish drywall"),
    item("Flooring Installation", 0.10, "sq ft", Area, "Install floor covering"),
    item("Painting & Trim", 0.15, "hours", AreaTimes(0.04), "Paint, doors and trim carpentry"),
];

// ---------------------------------------------------------------------------
// Addition
// ---------------------------------------------------------------------------

const ADDITION_MATERIALS: &[ItemTemplate] = &[
    item("Foundation", 0.15, "cu yd", AreaTimes(0.05), "Concrete, rebar and forms"),
    item("Framing Lumber", 0.20, "board ft", AreaTimes(2.5), "Walls, floor and roof framing"),
    item("Roofing", 0.15, "squares", AreaTimes(0.012), "Sheathing, underlayment and shingles"),
    item("Windows & Doors", 0.15, "each", Fixed(6.0), "Exterior windows and doors"),
    item("Siding", 0.10, "sq ft", AreaTimes(1.2), "Exterior cladding and wrap"),
    item("Insulation", 0.05, "sq ft", AreaTimes(2.0), "Wall and attic insulation"),
    item("Drywall", 0.05, "sheets", AreaTimes(0.12), "Drywall sheets, tape and compound"),
    item("Flooring", 0.10, "sq ft", Area, "Floor covering and underlayment"),
    item("Electrical & HVAC", 0.05, "lot", Fixed(1.0), "Wire, devices, ductwork and registers"),
];

const ADDITION_LABOR: &[ItemTemplate] = &[
    item("Excavation & Foundation", 0.15, "hours", AreaTimes(0.1), "Excavate, form and pour"),
    item("Framing", 0.25, "hours", AreaTimes(0.2), "Frame floor, walls and roof"),
    item("Roofing", 0.10, "hours", AreaTimes(0.05), "Install roof system and flashing"),
    item("Electrical", 0.10, "hours", Fixed(32.0), "Service extension, circuits and devices"),
    item("Plumbing", 0.05, "hours", Fixed(16.0), "Supply and drain extensions"),
    item("HVAC", 0.10, "hours", Fixed(24.0), "Extend or add heating and cooling"),
    item("Drywall & Finishing", 0.15, "sq ft", AreaTimes(3.5), "Hang, tape, finish and paint"),
    item("Exterior Finishing", 0.10, "hours", AreaTimes(0.06), "Siding, trim and weatherproofing"),
];

// ---------------------------------------------------------------------------
// Generic
// ---------------------------------------------------------------------------

const GENERIC_MATERIALS: &[ItemTemplate] = &[
    item("Primary Materials", 0.50, "sq ft", Area, "Main materials for the scope of work"),
    item("Finishing Materials", 0.25, "sq ft", Area, "Trim, paint and finish products"),
    item("Hardware & Fasteners", 0.10, "lot", Fixed(1.0), "Fasteners, adhesives and hardware"),
    item("Miscellaneous Supplies", 0.15, "lot", Fixed(1.0), "Consumables and protection"),
];

const GENERIC_LABOR: &[ItemTemplate] = &[
    item("General Labor", 0.50, "hours", AreaTimes(0.1), "Preparation, installation and handling"),
    item("Skilled Trades", 0.35, "hours", AreaTimes(0.05), "Licensed trade work as required"),
    item("Cleanup", 0.15, "hours", Fixed(8.0), "Debris removal and final clean"),
];

// ---------------------------------------------------------------------------
// Shared permit + overhead tables (never quality-scaled)
// ---------------------------------------------------------------------------

pub const PERMIT_ITEMS: &[ItemTemplate] = &[
    item("Building Permit", 0.60, "each", Fixed(1.0), "Municipal building permit"),
    item("Inspection Fees", 0.25, "each", Fixed(3.0), "Rough-in and final inspections"),
    item("Plan Review", 0.15, "each", Fixed(1.0), "Plan review and processing"),
];

pub const OVERHEAD_ITEMS: &[ItemTemplate] = &[
    item("Equipment Rental", 0.30, "lot", Fixed(1.0), "Tools, lifts and temporary equipment"),
    item("Project Management", 0.30, "lot", Fixed(1.0), "Scheduling, supervision and coordination"),
    item("Insurance", 0.15, "lot", Fixed(1.0), "Liability and builder's risk coverage"),
    item("Waste Disposal", 0.15, "each", Fixed(2.0), "Dumpster rental and haul-away"),
    item("Contingency", 0.10, "lot", Fixed(1.0), "Allowance for unforeseen conditions"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_sum(items: &[ItemTemplate]) -> f64 {
        items.iter().map(|i| i.weight).sum()
    }

    #[test]
    fn every_group_sums_to_one() {
        for category in Category::ALL {
            let table = allocation_table(category);
            assert!((weight_sum(table.materials) - 1.0).abs() < 0.01, "{category} materials");
            assert!((weight_sum(table.labor) - 1.0).abs() < 0.01, "{category} labor");
        }
        assert!((weight_sum(PERMIT_ITEMS) - 1.0).abs() < 0.01);
        assert!((weight_sum(OVERHEAD_ITEMS) - 1.0).abs() < 0.01);
    }

    #[test]
    fn quantity_rules() {
        assert_eq!(Fixed(5.0).quantity(200.0), 5.0);
        assert_eq!(Area.quantity(200.0), 200.0);
        assert_eq!(AreaTimes(0.15).quantity(200.0), 30.0);
        assert_eq!(AreaTimes(0.012).quantity(333.0), 4.0);
    }

    #[test]
    fn item_names_unique_within_group() {
        for category in Category::ALL {
            let table = allocation_table(category);
            for group in [table.materials, table.labor] {
                let mut names: Vec<_> = group.iter().map(|i| i.name).collect();
                names.sort_unstable();
                names.dedup();
                assert_eq!(names.len(), group.len());
            }
        }
    }
}
