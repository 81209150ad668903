//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for the workspace crates:
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongodb")
//! - `TestDataBuilder`: Deterministic test data generation (always available)
//! - `assertions`: Custom assertion helpers (always available)
//!
//! # Features
//!
//! - `mongodb`: Enables MongoDB test infrastructure and product fixtures
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongodb"] }
//! ```
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! #[ignore] // Requires Docker
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!     let products = mongo.seed("products", builder.products(20)).await;
//! }
//! ```

#[cfg(feature = "mongodb")]
mod mongo;

#[cfg(feature = "mongodb")]
pub use mongo::TestMongo;

#[cfg(feature = "mongodb")]
const CATEGORIES: [&str; 4] = ["Apparel", "Electronics", "Home & Kitchen", "Sports"];
#[cfg(feature = "mongodb")]
const BRANDS: [&str; 4] = ["Acme", "Northwind", "Globex", "Initech"];
#[cfg(feature = "mongodb")]
const ADJECTIVES: [&str; 5] = ["Blue", "Classic", "Compact", "Deluxe", "Rugged"];
#[cfg(feature = "mongodb")]
const NOUNS: [&str; 5] = ["Shirt", "Headphones", "Kettle", "Backpack", "Lamp"];

/// First creation timestamp handed out by [`TestDataBuilder::products`]
/// (2024-01-01T00:00:00Z, in milliseconds).
pub const FIXTURE_EPOCH_MILLIS: i64 = 1_704_067_200_000;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded random data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_list_products");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing, e.g. a collection name
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("products", "main"), "test-products-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Deterministic pseudo-random value for slot `index` (splitmix64).
    pub fn value(&self, index: u64) -> u64 {
        let mut z = self
            .seed
            .wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// `count` product documents with the fields the listing reads.
    ///
    /// Prices are between 1.00 and 200.99 with cent precision; creation
    /// dates are one hour apart starting at [`FIXTURE_EPOCH_MILLIS`].
    #[cfg(feature = "mongodb")]
    pub fn products(&self, count: usize) -> Vec<mongodb::bson::Document> {
        use mongodb::bson::{DateTime, doc};

        (0..count as u64)
            .map(|i| {
                let r = self.value(i);
                let pick = |list: &[&'static str], shift: u32| {
                    list[((r >> shift) % list.len() as u64) as usize]
                };
                let cents = (r % 20_000) as i64 + 100;
                let name = format!("{} {}", pick(&ADJECTIVES[..], 8), pick(&NOUNS[..], 16));
                let created = FIXTURE_EPOCH_MILLIS + i as i64 * 3_600_000;

                doc! {
                    "product_name": name,
                    "category": pick(&CATEGORIES[..], 24),
                    "brand_name": pick(&BRANDS[..], 32),
                    "price": cents as f64 / 100.0,
                    "product_creation_date": DateTime::from_millis(created),
                    "sku": format!("SKU-{:04}", i),
                }
            })
            .collect()
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Assert that values never decrease, naming the first offending position
    pub fn assert_non_decreasing(values: &[f64], context: &str) {
        for (i, pair) in values.windows(2).enumerate() {
            assert!(
                pair[0] <= pair[1],
                "{}: value at {} ({}) is greater than the next ({})",
                context,
                i,
                pair[0],
                pair[1]
            );
        }
    }

    /// Assert that values never increase, naming the first offending position
    pub fn assert_non_increasing(values: &[f64], context: &str) {
        for (i, pair) in values.windows(2).enumerate() {
            assert!(
                pair[0] >= pair[1],
                "{}: value at {} ({}) is less than the next ({})",
                context,
                i,
                pair[0],
                pair[1]
            );
        }
    }

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
