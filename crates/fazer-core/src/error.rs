use std::fmt;

use crate::catalog::CatalogError;
use crate::model::ProductId;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigLoadFailed,
    CatalogReadFailed,
    CatalogParseError,
    CatalogInvalid,
    ProductNotFound,
    NoProductSelected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigLoadFailed => "E1001",
            Self::CatalogReadFailed => "E1002",
            Self::CatalogParseError => "E1003",
            Self::CatalogInvalid => "E1004",
            Self::ProductNotFound => "E2001",
            Self::NoProductSelected => "E2003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigLoadFailed => "Configuration could not be loaded",
            Self::CatalogReadFailed => "Catalog file could not be read",
            Self::CatalogParseError => "Catalog file parse error",
            Self::CatalogInvalid => "Catalog failed validation",
            Self::ProductNotFound => "Product not found",
            Self::NoProductSelected => "No product selected",
        }
    }

    /// Optional remediation hint that can be surfaced to the user.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigLoadFailed => {
                Some("Check the --config path and the syntax of .fazer/config.toml.")
            }
            Self::CatalogReadFailed => Some("Check the --catalog path and read permissions."),
            Self::CatalogParseError => {
                Some("Catalog files must be .toml or .json with a `products` list.")
            }
            Self::CatalogInvalid => {
                Some("Product ids must be unique and ratings must stay within 0..=5.")
            }
            Self::ProductNotFound => Some("Run `fz catalog` to list product ids."),
            Self::NoProductSelected => Some("Open a product before visiting the detail page."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised at the storefront session boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("product '{0}' not found in catalog")]
    UnknownProduct(ProductId),

    #[error("no product selected")]
    NoProductSelected,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl StoreError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownProduct(_) => ErrorCode::ProductNotFound,
            Self::NoProductSelected => ErrorCode::NoProductSelected,
            Self::Catalog(err) => match err {
                CatalogError::Read { .. } => ErrorCode::CatalogReadFailed,
                CatalogError::Parse { .. } | CatalogError::UnsupportedFormat(_) => {
                    ErrorCode::CatalogParseError
                }
                _ => ErrorCode::CatalogInvalid,
            },
        }
    }

    /// Remediation hint for this error, if any.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        self.error_code().hint()
    }
}
