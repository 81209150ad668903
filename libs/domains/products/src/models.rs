use mongodb::bson::{Bson, DateTime, Document};
use serde::{Serialize, Serializer};
use utoipa::ToSchema;

/// Stored field names the listing reads.
pub mod fields {
    pub const NAME: &str = "product_name";
    pub const CATEGORY: &str = "category";
    pub const BRAND: &str = "brand_name";
    pub const PRICE: &str = "price";
    pub const CREATED_AT: &str = "product_creation_date";
}

/// A product document, passed through exactly as stored.
///
/// Only the fields in [`fields`] are ever interpreted. Serializing to JSON
/// renders object ids as hex strings and dates as RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, ToSchema)]
#[schema(value_type = Object)]
pub struct Product(Document);

impl Product {
    pub fn name(&self) -> Option<&str> {
        self.0.get_str(fields::NAME).ok()
    }

    pub fn category(&self) -> Option<&str> {
        self.0.get_str(fields::CATEGORY).ok()
    }

    pub fn brand(&self) -> Option<&str> {
        self.0.get_str(fields::BRAND).ok()
    }

    /// Numeric price, whichever BSON number type it was stored as.
    pub fn price(&self) -> Option<f64> {
        match self.0.get(fields::PRICE)? {
            Bson::Double(v) => Some(*v),
            Bson::Int32(v) => Some(f64::from(*v)),
            Bson::Int64(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn created_at(&self) -> Option<DateTime> {
        self.0.get_datetime(fields::CREATED_AT).ok().copied()
    }

    pub fn as_document(&self) -> &Document {
        &self.0
    }
}

impl From<Document> for Product {
    fn from(doc: Document) -> Self {
        Self(doc)
    }
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, JsonBson(v))))
    }
}

/// Plain-JSON view of a BSON value.
struct JsonBson<'a>(&'a Bson);

impl Serialize for JsonBson<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Bson::ObjectId(oid) => serializer.serialize_str(&oid.to_hex()),
            Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
                Ok(text) => serializer.serialize_str(&text),
                Err(_) => serializer.serialize_i64(dt.timestamp_millis()),
            },
            // JSON has no NaN or infinity
            Bson::Double(v) if !v.is_finite() => serializer.serialize_none(),
            Bson::Double(v) => serializer.serialize_f64(*v),
            Bson::Int32(v) => serializer.serialize_i32(*v),
            Bson::Int64(v) => serializer.serialize_i64(*v),
            Bson::String(v) => serializer.serialize_str(v),
            Bson::Boolean(v) => serializer.serialize_bool(*v),
            Bson::Null | Bson::Undefined => serializer.serialize_none(),
            Bson::Array(items) => serializer.collect_seq(items.iter().map(JsonBson)),
            Bson::Document(doc) => {
                serializer.collect_map(doc.iter().map(|(k, v)| (k, JsonBson(v))))
            }
            other => other.clone().into_relaxed_extjson().serialize(serializer),
        }
    }
}

/// One page of listing results.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// `ceil(matching / limit)`
    pub total_pages: u64,
    /// The requested page, echoed
    pub current_page: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};
    use serde_json::json;

    #[test]
    fn test_accessors() {
        let created = DateTime::from_millis(1_700_000_000_000);
        let product = Product::from(doc! {
            "product_name": "Blue Shirt",
            "category": "Apparel",
            "brand_name": "Acme",
            "price": 19,
            "product_creation_date": created,
        });

        assert_eq!(product.name(), Some("Blue Shirt"));
        assert_eq!(product.category(), Some("Apparel"));
        assert_eq!(product.brand(), Some("Acme"));
        assert_eq!(product.price(), Some(19.0));
        assert_eq!(product.created_at(), Some(created));
    }

    #[test]
    fn test_accessors_tolerate_missing_or_odd_fields() {
        let product = Product::from(doc! { "price": "cheap" });
        assert_eq!(product.name(), None);
        assert_eq!(product.price(), None);
        assert_eq!(product.created_at(), None);
    }

    #[test]
    fn test_serialize_shapes_store_values() {
        let oid = ObjectId::parse_str("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let product = Product::from(doc! {
            "_id": oid,
            "product_name": "Lamp",
            "price": 24.5,
            "stock": 3_i64,
            "product_creation_date": DateTime::from_millis(0),
            "tags": ["home", 1],
            "seller": { "rating": 4.8, "verified": true, "note": null },
        });

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
                "product_name": "Lamp",
                "price": 24.5,
                "stock": 3,
                "product_creation_date": "1970-01-01T00:00:00Z",
                "tags": ["home", 1],
                "seller": { "rating": 4.8, "verified": true, "note": null },
            })
        );
    }

    #[test]
    fn test_serialize_keeps_field_order() {
        let product = Product::from(doc! { "z": 1, "a": 2 });
        let text = serde_json::to_string(&product).unwrap();
        assert_eq!(text, r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_serialize_non_finite_double_as_null() {
        let product = Product::from(doc! { "price": f64::NAN });
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["price"], serde_json::Value::Null);
    }

    #[test]
    fn test_product_page_camel_case() {
        let page = ProductPage {
            products: vec![],
            total_pages: 4,
            current_page: 2,
        };
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value, json!({ "products": [], "totalPages": 4, "currentPage": 2 }));
    }
}
