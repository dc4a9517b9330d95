//! Loan application API handlers.
//!
//! ```text
//! POST /loan-application              {"email":"ada@example.com","loanTitle":"Clinic"}
//! GET /loan-applications
//! GET /loan-applications/{email}
//! GET /my-loans/{email}               {success, loans}
//! DELETE /loan-applications/{id}      only while Pending
//! PUT /loan-applications/{id}/status  {"status":"Approved"}
//! GET /approved-loans                 {success, loans}
//! ```
//!
//! E-mail filters are exact, case-sensitive matches on the stored value.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use utoipa::ToSchema;

use crate::domain::{ApplicationStatus, Error, LoanApplication, LoanApplicationDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelopes::{
    CancellationEnvelope, LoansEnvelope, SubmissionEnvelope, UpdateEnvelope,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_application_status, parse_attributes, parse_document_id, parse_email,
    require,
};

const ID: FieldName = FieldName::new("id");
const EMAIL: FieldName = FieldName::new("email");
const STATUS: FieldName = FieldName::new("status");

/// Message returned after a successful submission.
pub const SUBMITTED_MESSAGE: &str = "Loan Application Submitted";
/// Message returned after a successful cancellation.
pub const CANCELLED_MESSAGE: &str = "Application cancelled";

/// Loan application as stored: `_id`, `email`, `status`, then free-form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoanApplicationBody {
    /// Store identifier.
    #[serde(rename = "_id")]
    #[schema(example = "64b7f0c2a1b2c3d4e5f60719")]
    pub id: String,
    /// Applicant email.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Review state.
    #[schema(example = "Pending")]
    pub status: String,
    /// Remaining submitted fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<&LoanApplication> for LoanApplicationBody {
    fn from(value: &LoanApplication) -> Self {
        Self {
            id: value.id().to_string(),
            email: value.email().to_string(),
            status: value.status().to_string(),
            fields: value.attributes().as_map().clone(),
        }
    }
}

fn application_bodies(applications: &[LoanApplication]) -> Vec<LoanApplicationBody> {
    applications.iter().map(LoanApplicationBody::from).collect()
}

/// Loan application submission.
///
/// `status` may be omitted or set to `Pending`; every application starts
/// pending.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoanApplicationRequest {
    /// Applicant email; required.
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    /// Initial status; only `Pending` is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Free-form application fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Review state update.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ApplicationStatusRequest {
    /// New review state.
    #[schema(example = "Approved")]
    pub status: Option<String>,
}

fn initial_status_error(status: ApplicationStatus) -> Error {
    Error::invalid_request(format!(
        "new applications start as Pending; status {status} cannot be submitted"
    ))
    .with_details(json!({
        "field": "status",
        "value": status.as_str(),
        "code": "invalid_initial_status",
    }))
}

impl TryFrom<LoanApplicationRequest> for LoanApplicationDraft {
    type Error = Error;

    fn try_from(value: LoanApplicationRequest) -> Result<Self, Self::Error> {
        let LoanApplicationRequest {
            email,
            status,
            fields,
        } = value;
        if let Some(raw) = status {
            let status = parse_application_status(raw, STATUS)?;
            if status != ApplicationStatus::Pending {
                return Err(initial_status_error(status));
            }
        }
        let email = parse_email(require(email, EMAIL)?, EMAIL)?;
        Ok(Self::new(email, parse_attributes(fields)?))
    }
}

/// Submit a loan application.
#[utoipa::path(
    post,
    path = "/loan-application",
    request_body = LoanApplicationRequest,
    responses(
        (status = 200, description = "Application stored as Pending", body = SubmissionEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["loan-applications"],
    operation_id = "submitLoanApplication"
)]
#[post("/loan-application")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    payload: web::Json<LoanApplicationRequest>,
) -> ApiResult<web::Json<SubmissionEnvelope>> {
    let draft = LoanApplicationDraft::try_from(payload.into_inner())?;
    let outcome = state.loan_applications.submit(draft).await?;
    Ok(web::Json(SubmissionEnvelope {
        success: true,
        message: SUBMITTED_MESSAGE.to_owned(),
        result: outcome.into(),
    }))
}

/// List every loan application.
#[utoipa::path(
    get,
    path = "/loan-applications",
    responses(
        (status = 200, description = "All applications", body = [LoanApplicationBody]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["loan-applications"],
    operation_id = "listLoanApplications"
)]
#[get("/loan-applications")]
pub async fn list_applications(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LoanApplicationBody>>> {
    let applications = state.loan_applications_query.all_applications().await?;
    Ok(web::Json(application_bodies(&applications)))
}

/// List the applications submitted under one e-mail address.
#[utoipa::path(
    get,
    path = "/loan-applications/{email}",
    params(("email" = String, Path, description = "Applicant e-mail, matched exactly")),
    responses(
        (status = 200, description = "Matching applications", body = [LoanApplicationBody]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["loan-applications"],
    operation_id = "listApplicationsByEmail"
)]
#[get("/loan-applications/{email}")]
pub async fn applications_by_email(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<LoanApplicationBody>>> {
    let applications = state
        .loan_applications_query
        .applications_for(&path.into_inner())
        .await?;
    Ok(web::Json(application_bodies(&applications)))
}

/// Borrower view of their own applications.
#[utoipa::path(
    get,
    path = "/my-loans/{email}",
    params(("email" = String, Path, description = "Applicant e-mail, matched exactly")),
    responses(
        (status = 200, description = "Matching applications", body = LoansEnvelope),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["loan-applications"],
    operation_id = "listMyLoans"
)]
#[get("/my-loans/{email}")]
pub async fn my_loans(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<LoansEnvelope>> {
    let applications = state
        .loan_applications_query
        .applications_for(&path.into_inner())
        .await?;
    Ok(web::Json(LoansEnvelope {
        success: true,
        loans: application_bodies(&applications),
    }))
}

/// Cancel an application that is still pending.
#[utoipa::path(
    delete,
    path = "/loan-applications/{id}",
    params(("id" = String, Path, description = "Application ObjectId")),
    responses(
        (status = 200, description = "Application cancelled", body = CancellationEnvelope),
        (status = 400, description = "Malformed identifier or application not pending", body = ErrorSchema),
        (status = 404, description = "Application not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["loan-applications"],
    operation_id = "cancelLoanApplication"
)]
#[delete("/loan-applications/{id}")]
pub async fn cancel_application(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CancellationEnvelope>> {
    let id = parse_document_id(&path.into_inner(), ID)?;
    let outcome = state.loan_applications.cancel(&id).await?;
    Ok(web::Json(CancellationEnvelope {
        success: true,
        message: CANCELLED_MESSAGE.to_owned(),
        result: outcome.into(),
    }))
}

/// Record a review decision.
#[utoipa::path(
    put,
    path = "/loan-applications/{id}/status",
    params(("id" = String, Path, description = "Application ObjectId")),
    request_body = ApplicationStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UpdateEnvelope),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["loan-applications"],
    operation_id = "setLoanApplicationStatus"
)]
#[put("/loan-applications/{id}/status")]
pub async fn set_application_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ApplicationStatusRequest>,
) -> ApiResult<web::Json<UpdateEnvelope>> {
    let id = parse_document_id(&path.into_inner(), ID)?;
    let raw = require(payload.into_inner().status, STATUS)?;
    let status = parse_application_status(raw, STATUS)?;
    let outcome = state.loan_applications.set_status(&id, status).await?;
    Ok(web::Json(UpdateEnvelope {
        success: true,
        result: outcome.into(),
    }))
}

/// List approved applications.
#[utoipa::path(
    get,
    path = "/approved-loans",
    responses(
        (status = 200, description = "Approved applications", body = LoansEnvelope),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["loan-applications"],
    operation_id = "listApprovedLoans"
)]
#[get("/approved-loans")]
pub async fn approved_loans(state: web::Data<HttpState>) -> ApiResult<web::Json<LoansEnvelope>> {
    let applications = state
        .loan_applications_query
        .approved_applications()
        .await?;
    Ok(web::Json(LoansEnvelope {
        success: true,
        loans: application_bodies(&applications),
    }))
}

#[cfg(test)]
mod tests;
