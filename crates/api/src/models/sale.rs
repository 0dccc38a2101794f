//! Sale documents and their projected read shapes.
//!
//! A sale is never read back whole: every read operation projects a subset
//! of fields, so each projection gets its own deserialize target. Timestamps
//! are stored as BSON datetimes; response types convert them to chrono so
//! JSON clients see RFC 3339 strings rather than extended-JSON wrappers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use supply_store_core::ReviewId;

/// One line item in a sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub price: f64,
    pub quantity: i64,
}

/// Customer metadata embedded in a sale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub gender: String,
    pub age: i64,
    pub email: String,
    pub satisfaction: i64,
}

/// A review embedded in a sale's `reviews` array (storage shape).
///
/// The `review_id` is generated once at creation and reasserted, never
/// regenerated, on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub review_id: ReviewId,
    pub user: String,
    pub rating: f64,
    pub comment: String,
    pub date: bson::DateTime,
}

/// A validated sale creation payload, ready for insert.
///
/// `saleDate` is deliberately absent: it is stamped server-side at insert
/// time, never trusted from the caller on creation.
#[derive(Debug, Clone, Serialize)]
pub struct NewSale {
    pub items: Vec<LineItem>,
    #[serde(rename = "storeLocation")]
    pub store_location: String,
    pub customer: Customer,
    #[serde(rename = "couponUsed")]
    pub coupon_used: bool,
    #[serde(rename = "purchaseMethod")]
    pub purchase_method: String,
}

/// A validated full-replace payload.
///
/// Unlike creation, `saleDate` here is taken from the caller.
#[derive(Debug, Clone)]
pub struct SaleReplacement {
    pub sale_date: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub store_location: String,
    pub customer: Customer,
    pub coupon_used: bool,
    pub purchase_method: String,
}

/// List row: projection `{_id: 0, storeLocation: 1, items: 1, "customer.email": 1}`.
///
/// Doubles as the JSON response shape (it contains no timestamps).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleSummary {
    #[serde(rename = "storeLocation")]
    pub store_location: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub customer: CustomerEmail,
}

/// The customer field reduced to its email by projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerEmail {
    pub email: String,
}

/// Search row: projection `{_id: 0, items: 1, storeLocation: 1, purchaseMethod: 1}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(rename = "storeLocation")]
    pub store_location: String,
    #[serde(rename = "purchaseMethod")]
    pub purchase_method: String,
}

/// Get-by-id row: everything except `_id` and `items`.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleDetail {
    #[serde(
        rename = "saleDate",
        with = "bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub sale_date: DateTime<Utc>,
    #[serde(rename = "storeLocation")]
    pub store_location: String,
    pub customer: Customer,
    #[serde(rename = "couponUsed")]
    pub coupon_used: bool,
    #[serde(rename = "purchaseMethod")]
    pub purchase_method: String,
    #[serde(default)]
    pub reviews: Option<Vec<Review>>,
}

/// JSON response body for get-by-id.
#[derive(Debug, Clone, Serialize)]
pub struct SaleDetailResponse {
    #[serde(rename = "saleDate")]
    pub sale_date: DateTime<Utc>,
    #[serde(rename = "storeLocation")]
    pub store_location: String,
    pub customer: Customer,
    #[serde(rename = "couponUsed")]
    pub coupon_used: bool,
    #[serde(rename = "purchaseMethod")]
    pub purchase_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewResponse>>,
}

/// JSON response shape of an embedded review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub review_id: ReviewId,
    pub user: String,
    pub rating: f64,
    pub comment: String,
    pub date: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            review_id: review.review_id,
            user: review.user,
            rating: review.rating,
            comment: review.comment,
            date: review.date.to_chrono(),
        }
    }
}

impl From<SaleDetail> for SaleDetailResponse {
    fn from(detail: SaleDetail) -> Self {
        Self {
            sale_date: detail.sale_date,
            store_location: detail.store_location,
            customer: detail.customer,
            coupon_used: detail.coupon_used,
            purchase_method: detail.purchase_method,
            reviews: detail
                .reviews
                .map(|reviews| reviews.into_iter().map(ReviewResponse::from).collect()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sale_serializes_collection_field_names() {
        let sale = NewSale {
            items: vec![LineItem {
                name: "notepad".to_string(),
                tags: vec!["school".to_string(), "work".to_string()],
                price: 1.0,
                quantity: 2,
            }],
            store_location: "Singapore".to_string(),
            customer: Customer {
                gender: "M".to_string(),
                age: 40,
                email: "roger@roger.com".to_string(),
                satisfaction: 5,
            },
            coupon_used: true,
            purchase_method: "Online".to_string(),
        };

        let doc = bson::to_document(&sale).unwrap();
        assert!(doc.contains_key("storeLocation"));
        assert!(doc.contains_key("couponUsed"));
        assert!(doc.contains_key("purchaseMethod"));
        assert!(!doc.contains_key("saleDate"));
        assert!(!doc.contains_key("reviews"));
    }

    #[test]
    fn test_summary_deserializes_projected_customer() {
        let doc = bson::doc! {
            "storeLocation": "Singapore",
            "items": [{ "name": "notepad", "tags": [], "price": 1.0, "quantity": 2_i64 }],
            "customer": { "email": "roger@roger.com" },
        };

        let summary: SaleSummary = bson::from_document(doc).unwrap();
        assert_eq!(summary.customer.email, "roger@roger.com");
        assert_eq!(summary.items.len(), 1);
    }

    #[test]
    fn test_detail_response_omits_absent_reviews() {
        let detail = SaleDetail {
            sale_date: Utc::now(),
            store_location: "Singapore".to_string(),
            customer: Customer {
                gender: "M".to_string(),
                age: 40,
                email: "roger@roger.com".to_string(),
                satisfaction: 5,
            },
            coupon_used: true,
            purchase_method: "Online".to_string(),
            reviews: None,
        };

        let json = serde_json::to_value(SaleDetailResponse::from(detail)).unwrap();
        assert!(json.get("reviews").is_none());
        assert!(json.get("saleDate").is_some());
    }

    #[test]
    fn test_review_date_converts_to_rfc3339() {
        let review = Review {
            review_id: ReviewId::generate(),
            user: "roger".to_string(),
            rating: 5.0,
            comment: "great".to_string(),
            date: bson::DateTime::now(),
        };

        let json = serde_json::to_value(ReviewResponse::from(review)).unwrap();
        let date = json.get("date").unwrap().as_str().unwrap();
        // chrono's default serde output is RFC 3339
        assert!(date.contains('T'));
    }
}
