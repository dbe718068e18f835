use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Product categories known to the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Wearables,
    Audio,
    Optics,
    Power,
    Accessories,
    Protection,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Wearables,
        Self::Audio,
        Self::Optics,
        Self::Power,
        Self::Accessories,
        Self::Protection,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wearables => "Wearables",
            Self::Audio => "Audio",
            Self::Optics => "Optics",
            Self::Power => "Power",
            Self::Accessories => "Accessories",
            Self::Protection => "Protection",
        }
    }
}

/// The shop's category selector: everything, or exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Returns true if a product in `category` passes this filter.
    #[must_use]
    pub fn admits(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.as_str(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Sort order applied by the query pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOption {
    /// Highest rating first.
    #[default]
    #[serde(rename = "rating")]
    RatingDesc,
    #[serde(rename = "price-asc")]
    PriceAsc,
    #[serde(rename = "price-desc")]
    PriceDesc,
}

impl SortOption {
    pub const ALL: [Self; 3] = [Self::RatingDesc, Self::PriceAsc, Self::PriceDesc];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RatingDesc => "rating",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Label shown in the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::RatingDesc => "Rating_Desc",
            Self::PriceAsc => "Price_Asc",
            Self::PriceDesc => "Price_Desc",
        }
    }

    /// Cycle to the next option, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::RatingDesc => Self::PriceAsc,
            Self::PriceAsc => Self::PriceDesc,
            Self::PriceDesc => Self::RatingDesc,
        }
    }
}

/// Tabs of the product detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailTab {
    #[default]
    Overview,
    Specs,
    Reviews,
}

impl DetailTab {
    pub const ALL: [Self; 3] = [Self::Overview, Self::Specs, Self::Reviews];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Specs => "specs",
            Self::Reviews => "reviews",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Overview => Self::Specs,
            Self::Specs => Self::Reviews,
            Self::Reviews => Self::Overview,
        }
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Overview => Self::Reviews,
            Self::Specs => Self::Overview,
            Self::Reviews => Self::Specs,
        }
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DetailTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ParseEnumError {
                expected: "category",
                got: s.to_string(),
            })
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize(s) == "all" {
            return Ok(Self::All);
        }
        s.parse::<Category>().map(Self::Only)
    }
}

impl FromStr for SortOption {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "rating" | "rating-desc" => Ok(Self::RatingDesc),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            _ => Err(ParseEnumError {
                expected: "sort option",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for DetailTab {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "overview" => Ok(Self::Overview),
            "specs" => Ok(Self::Specs),
            "reviews" => Ok(Self::Reviews),
            _ => Err(ParseEnumError {
                expected: "detail tab",
                got: s.to_string(),
            }),
        }
    }
}
