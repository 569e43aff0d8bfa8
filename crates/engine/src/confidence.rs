use serde::Serialize;

use crate::category::Category;
use crate::model::ProjectDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Rate how much an estimate can be trusted given what the user supplied.
///
/// Missing postal code or an addition project always scores Low, ahead of
/// everything else.
pub fn score(has_postal_code: bool, is_common_category: bool, category: Category) -> Confidence {
    if !has_postal_code || category == Category::Addition {
        Confidence::Low
    } else if is_common_category {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

/// Kitchen and bathroom jobs, plus generic flooring work, have the most
/// pricing history behind them.
pub fn is_common_category(category: Category, raw_type_text: &str) -> bool {
    match category {
        Category::Kitchen | Category::Bathroom => true,
        Category::Generic => raw_type_text.to_lowercase().contains("flooring"),
        Category::Basement | Category::Addition => false,
    }
}

pub fn score_project(project: &ProjectDescriptor) -> Confidence {
    score(
        project.has_postal_code(),
        is_common_category(project.category, &project.raw_type_text),
        project.category,
    )
}
