//! Milestone-based payment schedules.
//!
//! Statuses never advance on their own; only `PaymentSchedule::update_status`
//! moves a milestone, and only along the allowed lifecycle edges.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::MilestonePlan;
use crate::error::EstimateError;
use crate::model::sanitize_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Due,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, next),
            (Pending, Due) | (Pending, Paid) | (Due, Paid) | (Due, Overdue) | (Overdue, Paid)
        )
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Due => write!(f, "due"),
            Self::Paid => write!(f, "paid"),
            Self::Overdue => write!(f, "overdue"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMilestone {
    pub id: String,
    pub name: String,
    pub percentage: u32,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    pub associated_tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSchedule {
    pub project_cost: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    pub milestones: Vec<PaymentMilestone>,
}

/// Split `project_cost` across the plan's milestones.
///
/// Intermediate due dates sit at `start + round(duration × offset)` days,
/// kept within `[start, end]`; a milestone at offset 1.0 lands exactly on
/// `end`. An end date before the start is replaced by the start, giving a
/// zero-day schedule with every due date on `start`.
pub fn generate(
    project_cost: f64,
    start: NaiveDate,
    end: NaiveDate,
    plan: &MilestonePlan,
) -> PaymentSchedule {
    let cost = sanitize_amount(project_cost);
    let end = if end < start {
        log::warn!("payment schedule end {end} precedes start {start}; using start as end");
        start
    } else {
        end
    };
    let duration_days = (end - start).num_days();

    let milestones = plan
        .milestones
        .iter()
        .map(|t| {
            let due_date = if t.offset >= 1.0 {
                end
            } else {
                let offset_days =
                    ((duration_days as f64 * t.offset).round() as i64).clamp(0, duration_days);
                start.checked_add_signed(Duration::days(offset_days)).unwrap_or(end)
            };
            PaymentMilestone {
                id: t.id.clone(),
                name: t.name.clone(),
                percentage: t.percentage,
                amount: (cost * f64::from(t.percentage) / 100.0).round(),
                due_date,
                status: t.initial_status,
                associated_tasks: t.tasks.clone(),
            }
        })
        .collect();

    PaymentSchedule {
        project_cost: cost,
        start_date: start,
        end_date: end,
        duration_days,
        milestones,
    }
}

impl PaymentSchedule {
    /// Return a copy with one milestone moved to `status`.
    pub fn update_status(&self, id: &str, status: PaymentStatus) -> Result<Self, EstimateError> {
        let mut next = self.clone();
        let milestone = next
            .milestones
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| EstimateError::UnknownMilestone(id.to_string()))?;

        if !milestone.status.can_transition_to(status) {
            return Err(EstimateError::InvalidTransition {
                id: id.to_string(),
                from: milestone.status,
                to: status,
            });
        }
        log::debug!("milestone '{id}': {} -> {status}", milestone.status);
        milestone.status = status;
        Ok(next)
    }

    pub fn milestone(&self, id: &str) -> Option<&PaymentMilestone> {
        self.milestones.iter().find(|m| m.id == id)
    }

    pub fn total_percentage(&self) -> u64 {
        self.milestones.iter().map(|m| u64::from(m.percentage)).sum()
    }

    pub fn scheduled_total(&self) -> f64 {
        self.milestones.iter().map(|m| m.amount).sum()
    }

    pub fn paid_total(&self) -> f64 {
        self.milestones
            .iter()
            .filter(|m| m.status == PaymentStatus::Paid)
            .map(|m| m.amount)
            .sum()
    }

    pub fn outstanding_total(&self) -> f64 {
        self.scheduled_total() - self.paid_total()
    }

    /// Earliest unpaid milestone.
    pub fn next_due(&self) -> Option<&PaymentMilestone> {
        self.milestones
            .iter()
            .filter(|m| m.status != PaymentStatus::Paid)
            .min_by_key(|m| m.due_date)
    }

    /// Scheduled amounts minus project cost; nonzero only through rounding.
    pub fn rounding_drift(&self) -> f64 {
        self.scheduled_total() - self.project_cost.round()
    }
}
