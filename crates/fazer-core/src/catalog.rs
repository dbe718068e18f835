//! Catalog store: the immutable product list and category filter labels.
//!
//! A [`Catalog`] is built once per session by a [`CatalogProvider`] and never
//! mutated afterwards. Two providers ship with the crate:
//!
//! - [`SeedCatalog`]: the built-in five-product seed.
//! - [`FileCatalog`]: a TOML or JSON file with the same shape as the seed.
//!
//! File catalogs are validated on load (unique ids, ratings in range, non-empty
//! names) so every product id the rest of the engine sees is well-formed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{Category, CategoryFilter, Product, ProductId, ProductSpec, Review};

/// Filter labels offered by the shop, in display order.
pub const DEFAULT_CATEGORIES: [CategoryFilter; 6] = [
    CategoryFilter::All,
    CategoryFilter::Only(Category::Wearables),
    CategoryFilter::Only(Category::Audio),
    CategoryFilter::Only(Category::Optics),
    CategoryFilter::Only(Category::Power),
    CategoryFilter::Only(Category::Accessories),
];

/// Errors returned while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported catalog format '{0}': expected .toml or .json")]
    UnsupportedFormat(String),

    #[error("duplicate product id '{0}'")]
    DuplicateId(ProductId),

    #[error("product '{id}' has rating {rating} outside 0..=5")]
    RatingOutOfRange { id: ProductId, rating: f64 },

    #[error("review '{review}' on product '{id}' has rating {rating} above 5")]
    ReviewRatingOutOfRange {
        id: ProductId,
        review: String,
        rating: u8,
    },

    #[error("product '{0}' has an empty name")]
    EmptyName(ProductId),

    #[error("catalog contains no products")]
    Empty,
}

/// Source of the storefront's product data.
pub trait CatalogProvider {
    /// Build the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the source cannot be read or fails
    /// validation.
    fn load(&self) -> Result<Catalog, CatalogError>;

    /// Short description of the source for logs.
    fn describe(&self) -> String;
}

/// The built-in seed catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedCatalog;

impl CatalogProvider for SeedCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Ok(Catalog::seed())
    }

    fn describe(&self) -> String {
        "built-in seed".to_string()
    }
}

/// A catalog read from a `.toml` or `.json` file.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// On-disk catalog shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryFilter>>,
    pub products: Vec<Product>,
}

impl CatalogProvider for FileCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let catalog = parse_catalog(&content, &extension).map_err(|err| match err {
            CatalogError::Parse { message, .. } => CatalogError::Parse {
                path: self.path.clone(),
                message,
            },
            other => other,
        })?;
        info!(
            path = %self.path.display(),
            products = catalog.len(),
            "loaded catalog file"
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse and validate catalog text in the given format (`toml` or `json`).
///
/// # Errors
///
/// Returns [`CatalogError::UnsupportedFormat`] for other formats,
/// [`CatalogError::Parse`] for malformed input, or a validation error.
pub fn parse_catalog(content: &str, format: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile = match format {
        "toml" => toml::from_str(content).map_err(|err| CatalogError::Parse {
            path: PathBuf::new(),
            message: err.to_string(),
        })?,
        "json" => serde_json::from_str(content).map_err(|err| CatalogError::Parse {
            path: PathBuf::new(),
            message: err.to_string(),
        })?,
        other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
    };
    let categories = file
        .categories
        .unwrap_or_else(|| DEFAULT_CATEGORIES.to_vec());
    Catalog::new(file.products, categories)
}

/// Immutable, ordered product list plus the shop's category labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<CategoryFilter>,
}

impl Catalog {
    /// Build a validated catalog.
    ///
    /// `All` is always offered first, even if `categories` omits it.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the products fail validation.
    pub fn new(
        products: Vec<Product>,
        mut categories: Vec<CategoryFilter>,
    ) -> Result<Self, CatalogError> {
        validate(&products)?;
        let mut seen = HashSet::new();
        categories.retain(|c| *c != CategoryFilter::All && seen.insert(*c));
        categories.insert(0, CategoryFilter::All);
        debug!(products = products.len(), "catalog validated");
        Ok(Self {
            products,
            categories,
        })
    }

    /// The built-in seed catalog.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            products: seed_products(),
            categories: DEFAULT_CATEGORIES.to_vec(),
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[CategoryFilter] {
        &self.categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Index of the product in catalog order.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id.as_str() == id)
    }

    /// Up to `limit` products other than `id`, in catalog order.
    #[must_use]
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.id.as_str() != id)
            .take(limit)
            .collect()
    }

    /// The first `limit` products, used by the home page's featured grid.
    #[must_use]
    pub fn featured(&self, limit: usize) -> &[Product] {
        &self.products[..limit.min(self.products.len())]
    }

    /// Serializable form of this catalog.
    #[must_use]
    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            products: self.products.clone(),
            categories: Some(self.categories.clone()),
        }
    }
}

fn validate(products: &[Product]) -> Result<(), CatalogError> {
    if products.is_empty() {
        return Err(CatalogError::Empty);
    }
    let mut seen = HashSet::new();
    for product in products {
        if !seen.insert(product.id.as_str()) {
            return Err(CatalogError::DuplicateId(product.id.clone()));
        }
        if product.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(product.id.clone()));
        }
        if !(0.0..=5.0).contains(&product.rating) {
            return Err(CatalogError::RatingOutOfRange {
                id: product.id.clone(),
                rating: product.rating,
            });
        }
        if let Some(review) = product.reviews.iter().find(|r| r.rating > 5) {
            return Err(CatalogError::ReviewRatingOutOfRange {
                id: product.id.clone(),
                review: review.id.clone(),
                rating: review.rating,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn seed_reviews() -> Vec<Review> {
    vec![
        Review {
            id: "r1".to_string(),
            user_name: "Alex Chen".to_string(),
            rating: 5,
            comment: "Transformed my productivity. The neural lag is practically zero.".to_string(),
            date: day(2024, 3, 15),
            avatar: None,
        },
        Review {
            id: "r2".to_string(),
            user_name: "Sarah V.".to_string(),
            rating: 4,
            comment: "Sleek design, but takes some time to calibrate to your brain waves."
                .to_string(),
            date: day(2024, 3, 10),
            avatar: None,
        },
    ]
}

fn image(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{photo}?auto=format&fit=crop&q=80&w=800")
}

fn specs(pairs: &[(&str, &str)]) -> Vec<ProductSpec> {
    pairs
        .iter()
        .map(|(label, value)| ProductSpec::new(*label, *value))
        .collect()
}

#[allow(clippy::too_many_lines)]
fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("1"),
            name: "Neural Link X1".to_string(),
            price: 2499,
            category: Category::Wearables,
            image: image("1593305841991-05c297ba4575"),
            description: "Direct cortical interface with 10ms latency.".to_string(),
            long_description: "The Neural Link X1 represents the pinnacle of human-computer \
                interaction. Utilizing high-density micro-electrode arrays, it provides a \
                seamless bridge between your conscious thought and digital environments. \
                Engineered for professionals who require instantaneous data throughput."
                .to_string(),
            rating: 4.9,
            review_count: 1240,
            is_new: true,
            is_bestseller: true,
            specs: specs(&[
                ("Bandwidth", "1.2 Tbps"),
                ("Latency", "10ms"),
                ("Battery", "72 Hours"),
                ("Material", "Liquid Titanium"),
            ]),
            reviews: seed_reviews(),
        },
        Product {
            id: ProductId::new("2"),
            name: "Quantum Watch".to_string(),
            price: 899,
            category: Category::Accessories,
            image: image("1523275335684-37898b6baf30"),
            description: "Timekeeping powered by atomic resonance.".to_string(),
            long_description: "Never lose a nanosecond. The Quantum Watch uses a localized \
                cold-atom clock to maintain absolute precision. Integrated with FazerOS, it \
                monitors your bio-metrics and atmospheric conditions in real-time."
                .to_string(),
            rating: 4.7,
            review_count: 850,
            is_new: false,
            is_bestseller: false,
            specs: specs(&[
                ("Precision", "1e-15"),
                ("Depth", "500m"),
                ("Sync", "Atomic"),
            ]),
            reviews: seed_reviews(),
        },
        Product {
            id: ProductId::new("3"),
            name: "Pulse Audio Buds".to_string(),
            price: 349,
            category: Category::Audio,
            image: image("1505740420928-5e560c06d30e"),
            description: "Adaptive spatial audio.".to_string(),
            long_description: "Experience sound as a physical dimension. Pulse Buds utilize \
                sonar-mapping to adapt their soundstage to the exact geometry of your ear \
                canal and current environment."
                .to_string(),
            rating: 4.5,
            review_count: 3200,
            is_new: true,
            is_bestseller: false,
            specs: specs(&[
                ("Driver", "Graphene"),
                ("Noise Cancellation", "90dB Active"),
                ("Weight", "4g"),
            ]),
            reviews: seed_reviews(),
        },
        Product {
            id: ProductId::new("4"),
            name: "Aero Glass Pro".to_string(),
            price: 1599,
            category: Category::Optics,
            image: image("1572635196237-14b3f281503f"),
            description: "8K AR overlays on a retinal level.".to_string(),
            long_description: "The world, enhanced. Aero Glass Pro projects high-fidelity AR \
                content directly onto your retina, eliminating the \"screen door\" effect of \
                traditional headsets."
                .to_string(),
            rating: 4.8,
            review_count: 520,
            is_new: false,
            is_bestseller: false,
            specs: specs(&[
                ("Resolution", "8K Retinal"),
                ("FOV", "140 Degrees"),
                ("Weight", "65g"),
            ]),
            reviews: seed_reviews(),
        },
        Product {
            id: ProductId::new("5"),
            name: "Titanium Shell V3".to_string(),
            price: 129,
            category: Category::Protection,
            image: image("1581091226825-a6a2a5aee158"),
            description: "Military-grade kinetic dampening.".to_string(),
            long_description: "Ultimate protection for your tech. The Shell V3 uses \
                non-Newtonian fluid layers that harden instantly upon impact, then return to \
                a flexible state."
                .to_string(),
            rating: 4.2,
            review_count: 45,
            is_new: false,
            is_bestseller: false,
            specs: specs(&[("Impact Rating", "MIL-STD-810G"), ("Thickness", "1.5mm")]),
            reviews: seed_reviews(),
        },
    ]
}
