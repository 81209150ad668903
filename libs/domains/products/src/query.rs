//! Listing query parsing
//!
//! Raw query-string values are turned into a [`ProductQuery`]. Parsing never
//! fails: anything missing or unusable falls back to its default.

use serde::Deserialize;
use std::num::NonZeroU64;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

/// Page size used when the request does not name one.
pub const DEFAULT_LIMIT: u64 = 9;

/// Result ordering requested through `sortBy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, ToSchema)]
#[strum(serialize_all = "camelCase")]
#[schema(rename_all = "camelCase")]
pub enum SortOrder {
    // store order, no sort applied
    #[default]
    #[strum(serialize = "none")]
    #[schema(rename = "none")]
    Natural,
    PriceLowToHigh,
    PriceHighToLow,
    NewestFirst,
}

/// Listing limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingConfig {
    pub default_limit: u64,
    /// Upper bound for `limit`; `None` leaves page size unbounded.
    pub max_limit: Option<NonZeroU64>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: None,
        }
    }
}

/// Raw `GET /products` query parameters, exactly as received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// 1-based page number (default 1)
    #[param(value_type = Option<u64>, example = 1)]
    pub page: Option<String>,
    /// Page size (default 9)
    #[param(value_type = Option<u64>, example = 9)]
    pub limit: Option<String>,
    /// Case-insensitive substring of the product name
    pub search: Option<String>,
    /// Case-insensitive substring of the category
    pub category: Option<String>,
    /// Lower price bound (default 0)
    #[param(value_type = Option<f64>)]
    pub min_price: Option<String>,
    /// Upper price bound (default unbounded)
    #[param(value_type = Option<f64>)]
    pub max_price: Option<String>,
    #[param(value_type = Option<SortOrder>)]
    pub sort_by: Option<String>,
    /// Case-insensitive substring of the brand name
    pub brand: Option<String>,
}

impl ListingParams {
    /// Collects parameters from decoded query pairs.
    ///
    /// Unknown keys are ignored. A repeated key keeps its first value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "search" => &mut params.search,
                "category" => &mut params.category,
                "minPrice" => &mut params.min_price,
                "maxPrice" => &mut params.max_price,
                "sortBy" => &mut params.sort_by,
                "brand" => &mut params.brand,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    pub fn into_query(self, config: &ListingConfig) -> ProductQuery {
        let page = self.page.as_deref().and_then(parse_count).unwrap_or(1);
        let mut limit = self
            .limit
            .as_deref()
            .and_then(parse_count)
            .unwrap_or(config.default_limit)
            .max(1);
        if let Some(max) = config.max_limit {
            limit = limit.min(max.get());
        }

        let sort = self
            .sort_by
            .as_deref()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();

        ProductQuery {
            search: non_empty(self.search),
            category: non_empty(self.category),
            brand: non_empty(self.brand),
            price: PriceRange::from_bounds(
                self.min_price.as_deref().and_then(parse_price),
                self.max_price.as_deref().and_then(parse_price),
            ),
            sort,
            page,
            limit,
        }
    }
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    /// Combines parsed bounds. Zero counts as "not given" when deciding
    /// whether a range applies at all, so `minPrice=0` on its own filters
    /// nothing.
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        let max = max.filter(|m| *m != f64::INFINITY);
        let min_given = min.is_some_and(|m| m != 0.0);
        let max_given = max.is_some_and(|m| m != 0.0);

        (min_given || max_given).then(|| Self {
            min: min.unwrap_or(0.0),
            max,
        })
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

/// A fully resolved listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price: Option<PriceRange>,
    pub sort: SortOrder,
    /// 1-based, echoed back as `currentPage`
    pub page: u64,
    pub limit: u64,
}

impl Default for ProductQuery {
    fn default() -> Self {
        ListingParams::default().into_query(&ListingConfig::default())
    }
}

impl ProductQuery {
    pub fn window(&self) -> PageWindow {
        PageWindow {
            skip: (self.page - 1).saturating_mul(self.limit),
            limit: self.limit,
        }
    }

    /// `ceil(count / limit)`
    pub fn total_pages(&self, count: u64) -> u64 {
        count.div_ceil(self.limit)
    }
}

/// Slice of the matching documents to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Leading decimal digits of `raw` (after whitespace and an optional `+`),
/// when they form a positive number. `"2.7"` and `"2abc"` both give 2.
fn parse_count(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());

    unsigned[..end].parse::<u64>().ok().filter(|n| *n > 0)
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| !p.is_nan())
}
