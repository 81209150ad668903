//! Product Service - listing orchestration

use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::ProductPage;
use crate::query::{ListingConfig, ProductQuery};
use crate::repository::ProductRepository;

/// Product service answering listing requests.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    listing: ListingConfig,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository and default listing limits
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            listing: ListingConfig::default(),
        }
    }

    pub fn with_listing(mut self, listing: ListingConfig) -> Self {
        self.listing = listing;
        self
    }

    /// Limits applied when parsing listing parameters
    pub fn listing(&self) -> &ListingConfig {
        &self.listing
    }

    /// Fetch one page of matching products together with the page count.
    ///
    /// The page read and the count read run concurrently against the same
    /// filter. Either failing fails the whole request.
    #[instrument(skip(self), fields(page = query.page, limit = query.limit))]
    pub async fn list_products(&self, query: &ProductQuery) -> ProductResult<ProductPage> {
        let (products, count) = tokio::try_join!(
            self.repository.find_page(query),
            self.repository.count_matching(query),
        )?;

        tracing::debug!(count, returned = products.len(), "Listed products");

        Ok(ProductPage {
            products,
            total_pages: query.total_pages(count),
            current_page: query.page,
        })
    }
}
