//! Search filter construction for the sales collection.
//!
//! Translates the optional `/search` query parameters into a MongoDB filter
//! document. Each present parameter contributes one case-insensitive
//! substring constraint; absent parameters impose no constraint, so an empty
//! filter matches every sale.

use bson::{Document, doc};
use serde::Deserialize;

/// Optional search parameters for the sales collection.
///
/// Field names match the query string keys the frontend sends.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaleFilter {
    /// Substring match against `purchaseMethod`.
    #[serde(rename = "purchaseMethod")]
    pub purchase_method: Option<String>,
    /// Substring match against any line item's `name`.
    pub item: Option<String>,
    /// Substring match against `storeLocation`.
    #[serde(rename = "storeLocation")]
    pub store_location: Option<String>,
}

impl SaleFilter {
    /// Build the filter document: the logical AND of the present constraints.
    ///
    /// Inputs are escaped with [`regex::escape`] before being handed to
    /// `$regex`, so metacharacters match literally - the contract is
    /// substring matching, not user-supplied regex.
    #[must_use]
    pub fn into_document(self) -> Document {
        let mut filter = Document::new();

        if let Some(purchase_method) = self.purchase_method {
            filter.insert("purchaseMethod", case_insensitive_substring(&purchase_method));
        }

        if let Some(item) = self.item {
            filter.insert("items.name", case_insensitive_substring(&item));
        }

        if let Some(store_location) = self.store_location {
            filter.insert("storeLocation", case_insensitive_substring(&store_location));
        }

        filter
    }
}

/// A `$regex` clause matching `needle` as a case-insensitive substring.
fn case_insensitive_substring(needle: &str) -> Document {
    doc! {
        "$regex": regex::escape(needle),
        "$options": "i",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = SaleFilter::default().into_document();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_single_constraint() {
        let filter = SaleFilter {
            item: Some("mouse".to_string()),
            ..SaleFilter::default()
        }
        .into_document();

        assert_eq!(filter.len(), 1);
        let clause = filter.get_document("items.name").unwrap();
        assert_eq!(clause.get_str("$regex").unwrap(), "mouse");
        assert_eq!(clause.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_all_constraints_are_anded() {
        let filter = SaleFilter {
            purchase_method: Some("online".to_string()),
            item: Some("notepad".to_string()),
            store_location: Some("singapore".to_string()),
        }
        .into_document();

        assert_eq!(filter.len(), 3);
        assert!(filter.contains_key("purchaseMethod"));
        assert!(filter.contains_key("items.name"));
        assert!(filter.contains_key("storeLocation"));
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        let filter = SaleFilter {
            item: Some("a.b*c".to_string()),
            ..SaleFilter::default()
        }
        .into_document();

        let clause = filter.get_document("items.name").unwrap();
        assert_eq!(clause.get_str("$regex").unwrap(), r"a\.b\*c");
    }

    #[test]
    fn test_query_string_field_names() {
        let filter: SaleFilter = serde_json::from_str(
            r#"{"purchaseMethod": "Online", "storeLocation": "Singapore"}"#,
        )
        .unwrap();

        assert_eq!(filter.purchase_method.as_deref(), Some("Online"));
        assert_eq!(filter.store_location.as_deref(), Some("Singapore"));
        assert!(filter.item.is_none());
    }
}
