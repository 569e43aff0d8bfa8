use serde::{Deserialize, Serialize};

/// Material and finish grade. Scales material costs and, at the top end,
/// stretches phase durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Budget,
    #[default]
    Standard,
    MidRange,
    Premium,
    Luxury,
}

impl QualityTier {
    pub const ALL: [QualityTier; 5] = [
        Self::Budget,
        Self::Standard,
        Self::MidRange,
        Self::Premium,
        Self::Luxury,
    ];

    /// Cost multiplier applied to material line items.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Budget => 0.8,
            Self::Standard => 1.0,
            Self::MidRange => 1.2,
            Self::Premium => 1.5,
            Self::Luxury => 2.0,
        }
    }

    /// Premium and above get longer phase durations.
    pub fn extends_durations(&self) -> bool {
        *self >= Self::Premium
    }

    /// Lenient parse from form input. Unknown text falls back to Standard.
    pub fn parse_lenient(text: &str) -> Self {
        let normalized: String = text
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match normalized.as_str() {
            "budget" | "basic" | "economy" => Self::Budget,
            "standard" => Self::Standard,
            "midrange" | "mid" => Self::MidRange,
            "premium" | "high" | "highend" => Self::Premium,
            "luxury" => Self::Luxury,
            _ => {
                if !normalized.is_empty() {
                    log::warn!("unknown quality tier '{text}', using standard");
                }
                Self::Standard
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Standard => "Standard",
            Self::MidRange => "Mid-Range",
            Self::Premium => "Premium",
            Self::Luxury => "Luxury",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_strictly_increase() {
        let values: Vec<f64> = QualityTier::ALL.iter().map(|t| t.multiplier()).collect();
        assert_eq!(values, vec![0.8, 1.0, 1.2, 1.5, 2.0]);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn lenient_parse_variants() {
        assert_eq!(QualityTier::parse_lenient("Mid-Range"), QualityTier::MidRange);
        assert_eq!(QualityTier::parse_lenient("mid_range"), QualityTier::MidRange);
        assert_eq!(QualityTier::parse_lenient(" LUXURY "), QualityTier::Luxury);
        assert_eq!(QualityTier::parse_lenient("platinum"), QualityTier::Standard);
        assert_eq!(QualityTier::parse_lenient(""), QualityTier::Standard);
    }

    #[test]
    fn premium_and_up_extend_durations() {
        assert!(!QualityTier::MidRange.extends_durations());
        assert!(QualityTier::Premium.extends_durations());
        assert!(QualityTier::Luxury.extends_durations());
    }
}
