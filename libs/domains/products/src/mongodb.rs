//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
    options::FindOptions,
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, fields};
use crate::query::{ProductQuery, SortOrder};
use crate::repository::ProductRepository;

/// Collection read when none is configured.
pub const DEFAULT_COLLECTION: &str = "products";

pub struct MongoProductRepository {
    collection: Collection<Document>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Document>(collection_name);
        Self { collection }
    }
}

/// Build the filter document for a listing query.
///
/// Text filters are case-insensitive substring matches on the literal value.
pub fn filter_document(query: &ProductQuery) -> Document {
    let mut filter = doc! {};

    if let Some(ref search) = query.search {
        filter.insert(fields::NAME, contains_ignore_case(search));
    }

    if let Some(ref category) = query.category {
        filter.insert(fields::CATEGORY, contains_ignore_case(category));
    }

    if let Some(range) = query.price {
        let mut bounds = doc! { "$gte": range.min };
        if let Some(max) = range.max {
            bounds.insert("$lte", max);
        }
        filter.insert(fields::PRICE, bounds);
    }

    if let Some(ref brand) = query.brand {
        filter.insert(fields::BRAND, contains_ignore_case(brand));
    }

    filter
}

/// Sort document for an ordering; `None` keeps store order.
pub fn sort_document(order: SortOrder) -> Option<Document> {
    match order {
        SortOrder::PriceLowToHigh => Some(sort_on(fields::PRICE, 1)),
        SortOrder::PriceHighToLow => Some(sort_on(fields::PRICE, -1)),
        SortOrder::NewestFirst => Some(sort_on(fields::CREATED_AT, -1)),
        SortOrder::Natural => None,
    }
}

fn sort_on(field: &str, direction: i32) -> Document {
    let mut sort = Document::new();
    sort.insert(field, direction);
    sort
}

fn contains_ignore_case(text: &str) -> Document {
    doc! { "$regex": regex::escape(text), "$options": "i" }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self), fields(page = query.page, limit = query.limit))]
    async fn find_page(&self, query: &ProductQuery) -> ProductResult<Vec<Product>> {
        let window = query.window();

        let options = FindOptions::builder()
            .sort(sort_document(query.sort))
            .skip(window.skip)
            .limit(i64::try_from(window.limit).unwrap_or(i64::MAX))
            .build();

        let cursor = self
            .collection
            .find(filter_document(query))
            .with_options(options)
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_matching(&self, query: &ProductQuery) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(filter_document(query))
            .await?;
        Ok(count)
    }
}
