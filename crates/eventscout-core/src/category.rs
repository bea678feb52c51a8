//! Category name to discovery segment id lookup.

use std::str::FromStr;

use crate::CategoryError;

/// Event categories the search form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// No segment filter.
    Default,
    Music,
    Sports,
    Arts,
    Theatre,
    Film,
    Miscellaneous,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Default,
        Category::Music,
        Category::Sports,
        Category::Arts,
        Category::Theatre,
        Category::Film,
        Category::Miscellaneous,
    ];

    /// Discovery segment id for this category; empty for [`Category::Default`].
    ///
    /// Arts and theatre share one upstream segment.
    #[must_use]
    pub fn segment_id(self) -> &'static str {
        match self {
            Category::Default => "",
            Category::Music => "KZFzniwnSyZfZ7v7nJ",
            Category::Sports => "KZFzniwnSyZfZ7v7nE",
            Category::Arts | Category::Theatre => "KZFzniwnSyZfZ7v7na",
            Category::Film => "KZFzniwnSyZfZ7v7nn",
            Category::Miscellaneous => "KZFzniwnSyZfZ7v7n1",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Category::Default => "default",
            Category::Music => "music",
            Category::Sports => "sports",
            Category::Arts => "arts",
            Category::Theatre => "theatre",
            Category::Film => "film",
            Category::Miscellaneous => "miscellaneous",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryError;

    /// Case-insensitive match on the trimmed input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.name() == key)
            .ok_or_else(|| CategoryError::Unrecognized(s.to_string()))
    }
}

/// Resolves a free-text category name to its discovery segment id.
///
/// `Ok("")` means "do not filter by segment".
///
/// # Errors
///
/// Returns [`CategoryError::Unrecognized`] for `None`, empty, or unknown
/// names. Callers must surface this as a validation failure.
pub fn resolve_segment(category: Option<&str>) -> Result<&'static str, CategoryError> {
    let name = category.ok_or_else(|| CategoryError::Unrecognized(String::new()))?;
    name.parse::<Category>().map(Category::segment_id)
}
