//! Store outcome bodies and success envelopes shared by the handlers.
//!
//! Write routes answer with the store's acknowledgement shape
//! (`acknowledged`, `insertedId`, `matchedCount`, ...); several routes wrap
//! that result or a document list in a `success: true` envelope.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DeleteOutcome, InsertOutcome, UpdateOutcome};

use super::loan_applications::LoanApplicationBody;
use super::loan_offers::LoanOfferBody;

/// Acknowledgement of an insert.
///
/// Example JSON:
/// `{"acknowledged":true,"insertedId":"64b7f0c2a1b2c3d4e5f60718"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResultBody {
    /// Always `true`; failed writes are reported as errors.
    pub acknowledged: bool,
    /// Identifier assigned by the store, as 24 hexadecimal characters.
    #[schema(example = "64b7f0c2a1b2c3d4e5f60718")]
    pub inserted_id: String,
}

impl From<InsertOutcome> for InsertResultBody {
    fn from(value: InsertOutcome) -> Self {
        Self {
            acknowledged: true,
            inserted_id: value.inserted_id.to_string(),
        }
    }
}

/// Acknowledgement of a single-document update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResultBody {
    /// Always `true`; failed writes are reported as errors.
    pub acknowledged: bool,
    /// Documents matched by the identifier filter (0 or 1).
    pub matched_count: u64,
    /// Documents whose stored value actually changed.
    pub modified_count: u64,
}

impl From<UpdateOutcome> for UpdateResultBody {
    fn from(value: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: value.matched_count,
            modified_count: value.modified_count,
        }
    }
}

/// Acknowledgement of a single-document delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResultBody {
    /// Always `true`; failed writes are reported as errors.
    pub acknowledged: bool,
    /// Documents removed (0 or 1).
    pub deleted_count: u64,
}

impl From<DeleteOutcome> for DeleteResultBody {
    fn from(value: DeleteOutcome) -> Self {
        Self {
            acknowledged: true,
            deleted_count: value.deleted_count,
        }
    }
}

/// `{success:true, loan}` returned by the loan details route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoanEnvelope {
    /// Always `true`.
    pub success: bool,
    /// The requested offer.
    pub loan: LoanOfferBody,
}

/// `{success:true, message, result}` returned after an application insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmissionEnvelope {
    /// Always `true`.
    pub success: bool,
    /// Confirmation text.
    #[schema(example = "Loan Application Submitted")]
    pub message: String,
    /// Store acknowledgement.
    pub result: InsertResultBody,
}

/// `{success:true, message, result}` returned after a cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CancellationEnvelope {
    /// Always `true`.
    pub success: bool,
    /// Confirmation text.
    #[schema(example = "Application cancelled")]
    pub message: String,
    /// Store acknowledgement.
    pub result: DeleteResultBody,
}

/// `{success:true, result}` returned after a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateEnvelope {
    /// Always `true`.
    pub success: bool,
    /// Store acknowledgement.
    pub result: UpdateResultBody,
}

/// `{success:true, loans}` wrapping a list of applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoansEnvelope {
    /// Always `true`.
    pub success: bool,
    /// Matching applications in store order.
    pub loans: Vec<LoanApplicationBody>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DocumentId;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn insert_result_uses_store_field_names() {
        let id = DocumentId::new("64b7f0c2a1b2c3d4e5f60718").expect("valid id");
        let body = InsertResultBody::from(InsertOutcome { inserted_id: id });
        assert_eq!(
            serde_json::to_value(body).expect("serialise"),
            json!({ "acknowledged": true, "insertedId": "64b7f0c2a1b2c3d4e5f60718" })
        );
    }

    #[rstest]
    fn update_and_delete_results_report_counts() {
        let update = UpdateResultBody::from(UpdateOutcome {
            matched_count: 1,
            modified_count: 0,
        });
        let delete = DeleteResultBody::from(DeleteOutcome { deleted_count: 1 });
        assert_eq!(
            serde_json::to_value(update).expect("serialise"),
            json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 0 })
        );
        assert_eq!(
            serde_json::to_value(delete).expect("serialise"),
            json!({ "acknowledged": true, "deletedCount": 1 })
        );
    }
}
