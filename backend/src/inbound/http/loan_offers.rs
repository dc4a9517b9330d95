//! Loan offer API handlers.
//!
//! ```text
//! GET /LoanRequests               up to six offers for the landing page
//! GET /AllLoans                   every offer
//! GET /loan-details/{id}          one offer wrapped as {success, loan}
//! POST /LoanRequests              {"amount":500,"purpose":"medical"}
//! DELETE /loans/{id}
//! PUT /loans/{id}/home            {"showOnHome":true}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{LoanOffer, LoanOfferDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelopes::{
    DeleteResultBody, InsertResultBody, LoanEnvelope, UpdateResultBody,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_attributes, parse_document_id, require};

const ID: FieldName = FieldName::new("id");
const SHOW_ON_HOME: FieldName = FieldName::new("showOnHome");

/// Loan offer as stored: `_id`, optional `showOnHome`, then free-form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoanOfferBody {
    /// Store identifier.
    #[serde(rename = "_id")]
    #[schema(example = "64b7f0c2a1b2c3d4e5f60718")]
    pub id: String,
    /// Whether the offer is featured on the home page.
    #[serde(rename = "showOnHome", default, skip_serializing_if = "Option::is_none")]
    pub show_on_home: Option<bool>,
    /// Lender-supplied offer fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<&LoanOffer> for LoanOfferBody {
    fn from(value: &LoanOffer) -> Self {
        Self {
            id: value.id().to_string(),
            show_on_home: value.show_on_home(),
            fields: value.attributes().as_map().clone(),
        }
    }
}

fn offer_bodies(offers: &[LoanOffer]) -> Vec<LoanOfferBody> {
    offers.iter().map(LoanOfferBody::from).collect()
}

/// Loan offer submission: free-form fields plus an optional visibility flag.
///
/// Example JSON:
/// `{"amount":500,"purpose":"medical","showOnHome":false}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoanOfferRequest {
    /// Home page flag; must be a boolean when present.
    #[serde(rename = "showOnHome", default, skip_serializing_if = "Option::is_none")]
    pub show_on_home: Option<bool>,
    /// Free-form offer fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Landing-page visibility update.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomeVisibilityRequest {
    /// New home page flag; required.
    pub show_on_home: Option<bool>,
}

/// List the offers shown on the landing page (at most six).
#[utoipa::path(
    get,
    path = "/LoanRequests",
    responses(
        (status = 200, description = "Up to six loan offers", body = [LoanOfferBody]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["loan-offers"],
    operation_id = "listHomeOffers"
)]
#[get("/LoanRequests")]
pub async fn list_home_offers(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LoanOfferBody>>> {
    let offers = state.loan_offers_query.home_offers().await?;
    Ok(web::Json(offer_bodies(&offers)))
}

/// List every loan offer.
#[utoipa::path(
    get,
    path = "/AllLoans",
    responses(
        (status = 200, description = "All loan offers", body = [LoanOfferBody]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["loan-offers"],
    operation_id = "listAllOffers"
)]
#[get("/AllLoans")]
pub async fn list_all_offers(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<LoanOfferBody>>> {
    let offers = state.loan_offers_query.all_offers().await?;
    Ok(web::Json(offer_bodies(&offers)))
}

/// Fetch one loan offer.
#[utoipa::path(
    get,
    path = "/loan-details/{id}",
    params(("id" = String, Path, description = "Loan offer ObjectId")),
    responses(
        (status = 200, description = "Loan offer", body = LoanEnvelope),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Loan not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["loan-offers"],
    operation_id = "getLoanDetails"
)]
#[get("/loan-details/{id}")]
pub async fn loan_details(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<LoanEnvelope>> {
    let id = parse_document_id(&path.into_inner(), ID)?;
    let offer = state.loan_offers_query.offer(&id).await?;
    Ok(web::Json(LoanEnvelope {
        success: true,
        loan: LoanOfferBody::from(&offer),
    }))
}

/// Create a loan offer.
#[utoipa::path(
    post,
    path = "/LoanRequests",
    request_body = LoanOfferRequest,
    responses(
        (status = 200, description = "Insert acknowledgement", body = InsertResultBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["loan-offers"],
    operation_id = "createLoanOffer"
)]
#[post("/LoanRequests")]
pub async fn create_offer(
    state: web::Data<HttpState>,
    payload: web::Json<LoanOfferRequest>,
) -> ApiResult<web::Json<InsertResultBody>> {
    let LoanOfferRequest {
        show_on_home,
        fields,
    } = payload.into_inner();
    let draft = LoanOfferDraft {
        show_on_home,
        attributes: parse_attributes(fields)?,
    };
    let outcome = state.loan_offers.submit(draft).await?;
    Ok(web::Json(outcome.into()))
}

/// Delete a loan offer.
#[utoipa::path(
    delete,
    path = "/loans/{id}",
    params(("id" = String, Path, description = "Loan offer ObjectId")),
    responses(
        (status = 200, description = "Delete acknowledgement", body = DeleteResultBody),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["loan-offers"],
    operation_id = "deleteLoanOffer"
)]
#[delete("/loans/{id}")]
pub async fn delete_offer(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResultBody>> {
    let id = parse_document_id(&path.into_inner(), ID)?;
    let outcome = state.loan_offers.remove(&id).await?;
    Ok(web::Json(outcome.into()))
}

/// Show or hide a loan offer on the landing page.
#[utoipa::path(
    put,
    path = "/loans/{id}/home",
    params(("id" = String, Path, description = "Loan offer ObjectId")),
    request_body = HomeVisibilityRequest,
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateResultBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["loan-offers"],
    operation_id = "setLoanHomeVisibility"
)]
#[put("/loans/{id}/home")]
pub async fn set_home_visibility(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<HomeVisibilityRequest>,
) -> ApiResult<web::Json<UpdateResultBody>> {
    let id = parse_document_id(&path.into_inner(), ID)?;
    let show_on_home = require(payload.into_inner().show_on_home, SHOW_ON_HOME)?;
    let outcome = state
        .loan_offers
        .set_home_visibility(&id, show_on_home)
        .await?;
    Ok(web::Json(outcome.into()))
}
