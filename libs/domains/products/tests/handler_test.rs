//! Handler tests for the products listing
//!
//! These drive `GET /products` through the domain router against an
//! in-memory repository that applies the same query semantics as MongoDB:
//! - Parameter defaults and lenient parsing
//! - Filtering, sorting and paging
//! - Response shape and the opaque 500 on store failure

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_products::{
    ListingConfig, Product, ProductError, ProductQuery, ProductRepository, ProductResult,
    ProductService, SortOrder, handlers,
};
use http_body_util::BodyExt;
use mongodb::bson::{DateTime, Document, doc};
use regex::RegexBuilder;
use serde_json::Value;
use std::cmp::Ordering;
use test_utils::TestDataBuilder;
use test_utils::assertions::{assert_non_decreasing, assert_non_increasing};
use tower::ServiceExt; // For oneshot()

/// Evaluates listing queries over a fixed set of documents.
struct InMemoryRepository {
    documents: Vec<Document>,
}

impl InMemoryRepository {
    fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    fn matching(&self, query: &ProductQuery) -> Vec<Product> {
        let contains = |value: Option<&str>, needle: &Option<String>| match needle {
            None => true,
            Some(needle) => {
                let re = RegexBuilder::new(&regex::escape(needle))
                    .case_insensitive(true)
                    .build()
                    .unwrap();
                value.is_some_and(|v| re.is_match(v))
            }
        };

        let mut products: Vec<Product> = self
            .documents
            .iter()
            .cloned()
            .map(Product::from)
            .filter(|p| contains(p.name(), &query.search))
            .filter(|p| contains(p.category(), &query.category))
            .filter(|p| contains(p.brand(), &query.brand))
            .filter(|p| match query.price {
                None => true,
                Some(range) => p.price().is_some_and(|price| range.contains(price)),
            })
            .collect();

        let by_price = |a: &Product, b: &Product| {
            a.price()
                .partial_cmp(&b.price())
                .unwrap_or(Ordering::Equal)
        };
        match query.sort {
            SortOrder::PriceLowToHigh => products.sort_by(by_price),
            SortOrder::PriceHighToLow => products.sort_by(|a, b| by_price(b, a)),
            SortOrder::NewestFirst => products.sort_by_key(|p| std::cmp::Reverse(p.created_at())),
            SortOrder::Natural => {}
        }
        products
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn find_page(&self, query: &ProductQuery) -> ProductResult<Vec<Product>> {
        let window = query.window();
        Ok(self
            .matching(query)
            .into_iter()
            .skip(window.skip as usize)
            .take(window.limit as usize)
            .collect())
    }

    async fn count_matching(&self, query: &ProductQuery) -> ProductResult<u64> {
        Ok(self.matching(query).len() as u64)
    }
}

struct FailingRepository;

#[async_trait]
impl ProductRepository for FailingRepository {
    async fn find_page(&self, _query: &ProductQuery) -> ProductResult<Vec<Product>> {
        Err(ProductError::Database("server selection timeout".to_string()))
    }

    async fn count_matching(&self, _query: &ProductQuery) -> ProductResult<u64> {
        Err(ProductError::Database("server selection timeout".to_string()))
    }
}

fn product(name: &str, category: &str, brand: &str, price: f64, day: i64) -> Document {
    doc! {
        "product_name": name,
        "category": category,
        "brand_name": brand,
        "price": price,
        "product_creation_date": DateTime::from_millis(1_700_000_000_000 + day * 86_400_000),
    }
}

fn catalogue() -> Vec<Document> {
    vec![
        product("Blue Shirt", "Apparel", "Acme", 15.0, 1),
        product("SHIRT", "Apparel", "Globex", 25.0, 2),
        product("Shoe", "Footwear", "Acme", 10.0, 3),
        product("Kettle", "Home & Kitchen", "Northwind", 20.0, 4),
        product("Desk Lamp", "Home & Kitchen", "Initech", 9.99, 5),
        product("Trail Backpack", "Sports", "Acme", 80.0, 6),
    ]
}

fn app(documents: Vec<Document>) -> axum::Router {
    handlers::router(ProductService::new(InMemoryRepository::new(documents)))
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

fn names(body: &Value) -> Vec<String> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["product_name"].as_str().unwrap().to_string())
        .collect()
}

fn prices(body: &Value) -> Vec<f64> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_f64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_products_defaults() {
    let documents = TestDataBuilder::from_test_name("handler_defaults").products(20);
    let (status, body) = get(app(documents), "/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 9);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["currentPage"], 1);
}

#[tokio::test]
async fn test_list_products_empty_catalogue() {
    let (status, body) = get(app(vec![]), "/products").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], serde_json::json!([]));
    assert_eq!(body["totalPages"], 0);
    assert_eq!(body["currentPage"], 1);
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() {
    let (_, body) = get(app(catalogue()), "/products?search=shirt").await;

    assert_eq!(names(&body), vec!["Blue Shirt", "SHIRT"]);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn test_search_treats_pattern_characters_literally() {
    let mut documents = catalogue();
    documents.push(product("C++ Primer (5th ed.)", "Books", "Acme", 40.0, 7));

    let (_, body) = get(app(documents.clone()), "/products?search=%2B%2B%20Primer%20(").await;
    assert_eq!(names(&body), vec!["C++ Primer (5th ed.)"]);

    let (_, body) = get(app(documents), "/products?search=.*").await;
    assert!(names(&body).is_empty());
}

#[tokio::test]
async fn test_category_and_brand_filters_combine() {
    let (_, body) = get(app(catalogue()), "/products?category=apparel&brand=acme").await;
    assert_eq!(names(&body), vec!["Blue Shirt"]);

    let (_, body) = get(app(catalogue()), "/products?category=kitchen").await;
    assert_eq!(names(&body), vec!["Kettle", "Desk Lamp"]);
}

#[tokio::test]
async fn test_sort_price_low_to_high() {
    let (_, body) = get(app(catalogue()), "/products?sortBy=priceLowToHigh").await;

    let prices = prices(&body);
    assert_eq!(prices.len(), 6);
    assert_non_decreasing(&prices, "priceLowToHigh");
}

#[tokio::test]
async fn test_sort_price_high_to_low_and_newest_first() {
    let (_, body) = get(app(catalogue()), "/products?sortBy=priceHighToLow").await;
    assert_non_increasing(&prices(&body), "priceHighToLow");

    let (_, body) = get(app(catalogue()), "/products?sortBy=newestFirst&limit=2").await;
    assert_eq!(names(&body), vec!["Trail Backpack", "Desk Lamp"]);
}

#[tokio::test]
async fn test_unknown_sort_keeps_store_order() {
    let (_, body) = get(app(catalogue()), "/products?sortBy=cheapest").await;
    assert_eq!(names(&body)[0], "Blue Shirt");
}

#[tokio::test]
async fn test_price_range_is_inclusive() {
    let (_, body) = get(app(catalogue()), "/products?minPrice=10&maxPrice=20").await;

    let prices = prices(&body);
    assert_eq!(prices.len(), 3);
    assert!(prices.iter().all(|p| (10.0..=20.0).contains(p)));
}

#[tokio::test]
async fn test_min_price_zero_does_not_filter() {
    let mut documents = catalogue();
    documents.push(doc! { "product_name": "Mystery Box" });

    let (_, body) = get(app(documents), "/products?minPrice=0&limit=50").await;
    assert_eq!(body["products"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn test_pagination_window() {
    let documents = TestDataBuilder::from_test_name("handler_pagination").products(12);
    let sixth = documents[5].get_str("sku").unwrap().to_string();

    let (_, body) = get(app(documents), "/products?page=2&limit=5").await;

    assert_eq!(body["products"][0]["sku"], sixth.as_str());
    assert_eq!(body["products"].as_array().unwrap().len(), 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["currentPage"], 2);
}

#[tokio::test]
async fn test_page_beyond_end_is_echoed() {
    let (status, body) = get(app(catalogue()), "/products?page=99").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["products"].as_array().unwrap().is_empty());
    assert_eq!(body["currentPage"], 99);
    assert_eq!(body["totalPages"], 1);
}

#[tokio::test]
async fn test_count_agrees_with_pages() {
    let documents = TestDataBuilder::from_test_name("handler_count").products(23);
    let app = app(documents);

    let (_, first) = get(app.clone(), "/products?limit=4&sortBy=priceLowToHigh").await;
    let total_pages = first["totalPages"].as_u64().unwrap();
    assert_eq!(total_pages, 6);

    let mut seen = 0;
    for page in 1..=total_pages {
        let (_, body) = get(
            app.clone(),
            &format!("/products?limit=4&sortBy=priceLowToHigh&page={page}"),
        )
        .await;
        seen += body["products"].as_array().unwrap().len();
    }
    assert_eq!(seen, 23);
}

#[tokio::test]
async fn test_malformed_parameters_fall_back_to_defaults() {
    let documents = TestDataBuilder::from_test_name("handler_malformed").products(10);
    let (status, body) = get(
        app(documents),
        "/products?page=abc&limit=-4&minPrice=cheap&sortBy=&page=3",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentPage"], 1);
    assert_eq!(body["products"].as_array().unwrap().len(), 9);
    assert_eq!(body["totalPages"], 2);
}

#[tokio::test]
async fn test_products_pass_through_unknown_fields() {
    let documents = vec![doc! {
        "product_name": "Lamp",
        "price": 12,
        "ratings": { "average": 4.5, "count": 10 },
    }];
    let (_, body) = get(app(documents), "/products").await;

    assert_eq!(body["products"][0]["price"], 12);
    assert_eq!(body["products"][0]["ratings"]["count"], 10);
}

#[tokio::test]
async fn test_store_failure_returns_500() {
    let app = handlers::router(ProductService::new(FailingRepository));

    let response = app
        .oneshot(Request::builder().uri("/products").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Server Error");
}

#[tokio::test]
async fn test_listing_cap_applies() {
    let documents = TestDataBuilder::from_test_name("handler_cap").products(30);
    let service =
        ProductService::new(InMemoryRepository::new(documents)).with_listing(ListingConfig {
            default_limit: 9,
            max_limit: std::num::NonZeroU64::new(10),
        });

    let (_, body) = get(handlers::router(service), "/products?limit=25").await;
    assert_eq!(body["products"].as_array().unwrap().len(), 10);
    assert_eq!(body["totalPages"], 3);
}
