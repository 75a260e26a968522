//! Query-string validation and the structured product filter
//!
//! Raw parameters arrive as optional strings. [`ProductFilter::try_from`]
//! turns them into a typed filter or a 400-class [`ProductError`] before any
//! storage call is made.

use serde::Deserialize;
use std::cmp::Ordering;
use std::str::FromStr;
use utoipa::IntoParams;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductCategory};

/// Longest accepted `search` term, in characters
pub const MAX_SEARCH_LEN: usize = 100;

/// Raw list-endpoint query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// One of: scarves, hats, bags, home-decor, amigurumi, blankets
    pub category: Option<String>,
    /// `true` or `false`
    pub featured: Option<String>,
    /// `true` or `false`
    pub in_stock: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<String>,
    /// Inclusive upper price bound
    pub max_price: Option<String>,
    /// Case-insensitive match on name, description or tag
    pub search: Option<String>,
}

/// Validated product filter.
///
/// Fields are crate-private: callers build one from a [`ProductQuery`] or an
/// endpoint scope and hand it to a repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub(crate) category: Option<ProductCategory>,
    pub(crate) featured: Option<bool>,
    pub(crate) in_stock: Option<bool>,
    pub(crate) min_price: Option<f64>,
    pub(crate) max_price: Option<f64>,
    pub(crate) search: Option<String>,
}

fn present(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a category exactly as spelled in the catalog (case-sensitive).
pub fn parse_category(raw: &str) -> ProductResult<ProductCategory> {
    ProductCategory::from_str(raw).map_err(|_| ProductError::InvalidCategory)
}

fn parse_bool(param: &str, raw: &str) -> ProductResult<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ProductError::Validation(format!(
            "{} must be 'true' or 'false'",
            param
        )))
    }
}

fn parse_price(param: &str, raw: &str) -> ProductResult<f64> {
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ProductError::Validation(format!(
            "{} must be a non-negative number",
            param
        ))),
    }
}

impl TryFrom<ProductQuery> for ProductFilter {
    type Error = ProductError;

    fn try_from(query: ProductQuery) -> ProductResult<Self> {
        let category = present(query.category)
            .map(|raw| parse_category(&raw))
            .transpose()?;
        let featured = present(query.featured)
            .map(|raw| parse_bool("featured", &raw))
            .transpose()?;
        let in_stock = present(query.in_stock)
            .map(|raw| parse_bool("inStock", &raw))
            .transpose()?;
        let min_price = present(query.min_price)
            .map(|raw| parse_price("minPrice", &raw))
            .transpose()?;
        let max_price = present(query.max_price)
            .map(|raw| parse_price("maxPrice", &raw))
            .transpose()?;

        if let (Some(min), Some(max)) = (min_price, max_price) {
            if min > max {
                return Err(ProductError::Validation(
                    "minPrice cannot be greater than maxPrice".to_string(),
                ));
            }
        }

        let search = present(query.search);
        if let Some(ref term) = search {
            if term.chars().count() > MAX_SEARCH_LEN {
                return Err(ProductError::Validation(format!(
                    "search must be at most {} characters",
                    MAX_SEARCH_LEN
                )));
            }
            if term.chars().any(char::is_control) {
                return Err(ProductError::Validation(
                    "search must not contain control characters".to_string(),
                ));
            }
        }

        Ok(Self {
            category,
            featured,
            in_stock,
            min_price,
            max_price,
            search,
        })
    }
}

impl ProductFilter {
    /// In-stock products of one category
    pub fn category_scope(category: ProductCategory) -> Self {
        Self {
            category: Some(category),
            in_stock: Some(true),
            ..Self::default()
        }
    }

    /// In-stock featured products
    pub fn featured_scope() -> Self {
        Self {
            featured: Some(true),
            in_stock: Some(true),
            ..Self::default()
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Evaluate the filter against a product in memory.
    ///
    /// Same semantics as the MongoDB translation: inclusive price bounds,
    /// search as a literal case-insensitive substring of name, description
    /// or any tag.
    pub fn matches(&self, product: &Product) -> bool {
        if self.category.is_some_and(|category| product.category != category) {
            return false;
        }
        if self.featured.is_some_and(|featured| product.featured != featured) {
            return false;
        }
        if self.in_stock.is_some_and(|in_stock| product.in_stock != in_stock) {
            return false;
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }

        match self.search {
            Some(ref term) => {
                let needle = term.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
                    || product.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// Result ordering. Ties always fall back to `_id` descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// `createdAt` descending
    #[default]
    Newest,
    /// `featured` descending, then `createdAt` descending
    FeaturedThenNewest,
}

impl ProductSort {
    /// Total order matching the storage sort document.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        let newest = b
            .created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id));

        match self {
            ProductSort::Newest => newest,
            ProductSort::FeaturedThenNewest => b.featured.cmp(&a.featured).then(newest),
        }
    }
}
