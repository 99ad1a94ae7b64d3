/// Closed set of categories a transaction can be filed under.
///
/// Stored records keep their category as a raw string so that values written
/// by other versions survive a load/save cycle untouched. `Category` is what
/// those strings mean for display and filtering controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Bills,
    Entertainment,
    Healthcare,
    Education,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Entertainment,
        Category::Healthcare,
        Category::Education,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Bills => "bills",
            Category::Entertainment => "entertainment",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
            Category::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Interpret a stored category value, treating anything unrecognized as
    /// `Other`.
    pub fn for_display(raw: &str) -> Self {
        Self::from_str(raw).unwrap_or(Category::Other)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food & Dining",
            Category::Transport => "Transportation",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills & Utilities",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which records a listing should include.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact match on the stored category string
    Only(String),
}

impl CategoryFilter {
    /// Sentinel value meaning "no filtering"
    pub const ALL_SENTINEL: &'static str = "all";

    pub fn parse(value: &str) -> Self {
        if value == Self::ALL_SENTINEL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_roundtrip() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_unknown_category_displays_as_other() {
        assert_eq!(Category::from_str("groceries"), None);
        assert_eq!(Category::for_display("groceries"), Category::Other);
        assert_eq!(Category::for_display("groceries").label(), "Other");
        assert_eq!(Category::for_display("bills").label(), "Bills & Utilities");
    }

    #[test]
    fn test_category_matching_is_case_sensitive() {
        assert_eq!(Category::from_str("Food"), None);
        assert!(!CategoryFilter::parse("food").matches("Food"));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("food"),
            CategoryFilter::Only("food".to_string())
        );
        assert_eq!(CategoryFilter::from(Category::Bills), CategoryFilter::parse("bills"));
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches("anything"));
        assert!(CategoryFilter::parse("food").matches("food"));
        assert!(!CategoryFilter::parse("food").matches("transport"));
        // Unknown stored values are still matched verbatim, not as "other"
        assert!(CategoryFilter::parse("groceries").matches("groceries"));
        assert!(!CategoryFilter::parse("other").matches("groceries"));
    }
}
