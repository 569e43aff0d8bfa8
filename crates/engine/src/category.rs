use serde::{Deserialize, Serialize};

/// Closed set of project categories the estimate tables are keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Kitchen,
    Bathroom,
    Basement,
    Addition,
    #[default]
    Generic,
}

/// Keyword checks in priority order. First hit wins.
const KEYWORDS: [(&str, Category); 4] = [
    ("kitchen", Category::Kitchen),
    ("bathroom", Category::Bathroom),
    ("basement", Category::Basement),
    ("addition", Category::Addition),
];

/// Classify free-form project type text.
///
/// Case-insensitive substring match; text mentioning several keywords
/// resolves by kitchen > bathroom > basement > addition.
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Generic)
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::Kitchen,
        Self::Bathroom,
        Self::Basement,
        Self::Addition,
        Self::Generic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Kitchen => "Kitchen",
            Self::Bathroom => "Bathroom",
            Self::Basement => "Basement",
            Self::Addition => "Addition",
            Self::Generic => "General Renovation",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_each_keyword() {
        assert_eq!(classify("Kitchen Remodel"), Category::Kitchen);
        assert_eq!(classify("master BATHROOM refresh"), Category::Bathroom);
        assert_eq!(classify("Finish the basement"), Category::Basement);
        assert_eq!(classify("Two-story addition"), Category::Addition);
    }

    #[test]
    fn unmatched_is_generic() {
        assert_eq!(classify("Hardwood flooring"), Category::Generic);
        assert_eq!(classify(""), Category::Generic);
        // "bath" alone is not the bathroom keyword
        assert_eq!(classify("bath refresh"), Category::Generic);
    }

    #[test]
    fn priority_order_resolves_ambiguity() {
        assert_eq!(classify("basement kitchen"), Category::Kitchen);
        assert_eq!(classify("addition with bathroom"), Category::Bathroom);
        assert_eq!(classify("basement addition"), Category::Basement);
    }
}
