//! Sales repository: document CRUD and embedded-review mutations.
//!
//! Every mutation here is a single `update_one`/`insert_one`/`delete_one`
//! against one sale document, so MongoDB's per-document atomicity is the
//! whole consistency story: a review append (`$push`), in-place overwrite
//! (positional `$set`) or removal (`$pull`) is never observable half-applied
//! by a concurrent reader.

use bson::{Document, doc, oid::ObjectId};
use futures::stream::TryStreamExt;
use mongodb::{Collection, Database};

use supply_store_core::{ReviewId, SaleId};

use super::RepositoryError;
use crate::db::filter::SaleFilter;
use crate::models::sale::{NewSale, SaleDetail, SaleReplacement, SaleSummary, SearchHit};

/// Name of the sales collection.
pub const COLLECTION: &str = "sales";

/// Fixed cap on list and search result sets.
const RESULT_LIMIT: i64 = 10;

/// Validated payload for adding or overwriting a review.
#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub user: String,
    pub rating: f64,
    pub comment: String,
}

/// Outcome of a review deletion.
///
/// The two failure cases are computed independently and map to distinct
/// not-found responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteReviewOutcome {
    Deleted,
    SaleNotFound,
    ReviewNotFound,
}

/// Repository for sale document operations.
pub struct SaleRepository<'a> {
    db: &'a Database,
}

impl<'a> SaleRepository<'a> {
    /// Create a new sale repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn collection<T: Send + Sync>(&self) -> Collection<T> {
        self.db.collection(COLLECTION)
    }

    /// List up to ten sale summaries: store location, line items, and the
    /// customer's email. No filter, no other fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_summaries(&self) -> Result<Vec<SaleSummary>, RepositoryError> {
        let cursor = self
            .collection::<SaleSummary>()
            .find(doc! {})
            .projection(doc! {
                "_id": 0,
                "storeLocation": 1,
                "items": 1,
                "customer.email": 1,
            })
            .limit(RESULT_LIMIT)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Search sales with the given filter, capped at ten results and
    /// projected to items, store location, and purchase method only.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn search(&self, filter: SaleFilter) -> Result<Vec<SearchHit>, RepositoryError> {
        let cursor = self
            .collection::<SearchHit>()
            .find(filter.into_document())
            .projection(doc! {
                "_id": 0,
                "items": 1,
                "storeLocation": 1,
                "purchaseMethod": 1,
            })
            .limit(RESULT_LIMIT)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// Look up one sale by id, projecting out `_id` and `items`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_detail(&self, id: SaleId) -> Result<Option<SaleDetail>, RepositoryError> {
        let detail = self
            .collection::<SaleDetail>()
            .find_one(doc! { "_id": id.as_object_id() })
            .projection(doc! { "_id": 0, "items": 0 })
            .await?;

        Ok(detail)
    }

    /// Insert a new sale, stamping `saleDate` with the current server time.
    ///
    /// Returns the newly assigned sale id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if serialization or the insert fails.
    pub async fn create(&self, new_sale: &NewSale) -> Result<SaleId, RepositoryError> {
        let id = ObjectId::new();

        let mut document = bson::to_document(new_sale)?;
        document.insert("_id", id);
        document.insert("saleDate", bson::DateTime::now());

        self.collection::<Document>().insert_one(document).await?;

        Ok(SaleId::from(id))
    }

    /// Overwrite every top-level field of a sale except `reviews`.
    ///
    /// The `$set` names each replaced field explicitly, so existing reviews
    /// are preserved. Returns `false` when no sale matched the id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if serialization or the update fails.
    pub async fn replace(
        &self,
        id: SaleId,
        replacement: &SaleReplacement,
    ) -> Result<bool, RepositoryError> {
        let update = doc! {
            "$set": {
                "saleDate": bson::DateTime::from_chrono(replacement.sale_date),
                "items": bson::to_bson(&replacement.items)?,
                "storeLocation": &replacement.store_location,
                "customer": bson::to_bson(&replacement.customer)?,
                "couponUsed": replacement.coupon_used,
                "purchaseMethod": &replacement.purchase_method,
            }
        };

        let result = self
            .collection::<Document>()
            .update_one(doc! { "_id": id.as_object_id() }, update)
            .await?;

        Ok(result.matched_count > 0)
    }

    /// Delete one sale. Embedded reviews go with the document.
    ///
    /// Returns `false` when no sale matched the id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: SaleId) -> Result<bool, RepositoryError> {
        let result = self
            .collection::<Document>()
            .delete_one(doc! { "_id": id.as_object_id() })
            .await?;

        Ok(result.deleted_count > 0)
    }

    // =========================================================================
    // Review sub-document operations
    // =========================================================================

    /// Append a review to a sale's `reviews` array.
    ///
    /// Generates a fresh review id and stamps the current time, then appends
    /// with an atomic append-if-matched (`$push` conditioned on `_id`).
    /// Returns `None` when the parent sale does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn add_review(
        &self,
        sale_id: SaleId,
        input: ReviewInput,
    ) -> Result<Option<ReviewId>, RepositoryError> {
        let review_id = ReviewId::generate();

        let result = self
            .collection::<Document>()
            .update_one(
                doc! { "_id": sale_id.as_object_id() },
                doc! {
                    "$push": {
                        "reviews": {
                            "review_id": review_id.as_str(),
                            "user": &input.user,
                            "rating": input.rating,
                            "comment": &input.comment,
                            "date": bson::DateTime::now(),
                        }
                    }
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Ok(None);
        }

        Ok(Some(review_id))
    }

    /// Overwrite the review with the given id inside the given sale.
    ///
    /// This is a full replacement of the array element via the positional
    /// operator: the filter matches both the sale and the element, and
    /// `reviews.$` swaps the matched element in place. The review id is
    /// reasserted from the caller, not regenerated; the timestamp is reset
    /// to now. Siblings are untouched.
    ///
    /// Returns `false` when the compound condition (sale id AND element
    /// review id) matched nothing; a missing sale and a missing review are
    /// indistinguishable here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_review(
        &self,
        sale_id: SaleId,
        review_id: &ReviewId,
        input: ReviewInput,
    ) -> Result<bool, RepositoryError> {
        let result = self
            .collection::<Document>()
            .update_one(
                doc! {
                    "_id": sale_id.as_object_id(),
                    "reviews.review_id": review_id.as_str(),
                },
                doc! {
                    "$set": {
                        "reviews.$": {
                            "review_id": review_id.as_str(),
                            "user": &input.user,
                            "rating": input.rating,
                            "comment": &input.comment,
                            "date": bson::DateTime::now(),
                        }
                    }
                },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    /// Remove the review with the given id from a sale's `reviews` array.
    ///
    /// The two failure modes are computed independently: the parent is
    /// checked for existence first, then an atomic remove-if-matched
    /// (`$pull`) runs and reports whether an element actually left the
    /// array.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn delete_review(
        &self,
        sale_id: SaleId,
        review_id: &ReviewId,
    ) -> Result<DeleteReviewOutcome, RepositoryError> {
        let parent = self
            .collection::<Document>()
            .find_one(doc! { "_id": sale_id.as_object_id() })
            .projection(doc! { "_id": 1 })
            .await?;

        if parent.is_none() {
            return Ok(DeleteReviewOutcome::SaleNotFound);
        }

        let result = self
            .collection::<Document>()
            .update_one(
                doc! { "_id": sale_id.as_object_id() },
                doc! { "$pull": { "reviews": { "review_id": review_id.as_str() } } },
            )
            .await?;

        if result.modified_count == 0 {
            return Ok(DeleteReviewOutcome::ReviewNotFound);
        }

        Ok(DeleteReviewOutcome::Deleted)
    }
}
