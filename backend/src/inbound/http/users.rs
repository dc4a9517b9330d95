//! User account API handlers.
//!
//! ```text
//! GET /users
//! POST /users                {"email":"ada@example.com","name":"Ada","role":"borrower"}
//! PUT /users/{id}/role       {"role":"admin"}
//! PUT /users/{id}/status     {"status":"suspended"}
//! ```
//!
//! New accounts always start `active`; a submitted `status` is discarded.

use actix_web::{get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{Error, UserAccount, UserDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelopes::{InsertResultBody, UpdateResultBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_account_status, parse_attributes, parse_document_id, parse_email,
    parse_role, require,
};

const ID: FieldName = FieldName::new("id");
const EMAIL: FieldName = FieldName::new("email");
const ROLE: FieldName = FieldName::new("role");
const STATUS: FieldName = FieldName::new("status");

/// User account as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserBody {
    /// Store identifier.
    #[serde(rename = "_id")]
    #[schema(example = "64b7f0c2a1b2c3d4e5f6071a")]
    pub id: String,
    /// Account email.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Assigned role, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Account status.
    #[schema(example = "active")]
    pub status: String,
    /// Remaining profile fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl From<&UserAccount> for UserBody {
    fn from(value: &UserAccount) -> Self {
        Self {
            id: value.id().to_string(),
            email: value.email().to_string(),
            role: value.role().map(ToString::to_string),
            status: value.status().to_string(),
            fields: value.attributes().as_map().clone(),
        }
    }
}

/// Account registration.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserRequest {
    /// Account email; required and unique.
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    /// Requested role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Accepted for compatibility and ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Free-form profile fields.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = Error;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        let UserRequest {
            email, role, fields, ..
        } = value;
        let email = parse_email(require(email, EMAIL)?, EMAIL)?;
        let role = role.map(|raw| parse_role(raw, ROLE)).transpose()?;
        Ok(Self::new(email, role, parse_attributes(fields)?))
    }
}

/// Role change.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RoleRequest {
    /// New role.
    #[schema(example = "admin")]
    pub role: Option<String>,
}

/// Account status change.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AccountStatusRequest {
    /// New account status.
    #[schema(example = "suspended")]
    pub status: Option<String>,
}

/// List every user account.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = [UserBody]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserBody>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.iter().map(UserBody::from).collect()))
}

/// Register a user account.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 200, description = "Insert acknowledgement", body = InsertResultBody),
        (status = 400, description = "Invalid request or user already exists", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<InsertResultBody>> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let outcome = state.users.register(draft).await?;
    Ok(web::Json(outcome.into()))
}

/// Change a user's role.
#[utoipa::path(
    put,
    path = "/users/{id}/role",
    params(("id" = String, Path, description = "User ObjectId")),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateResultBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "setUserRole"
)]
#[put("/users/{id}/role")]
pub async fn set_user_role(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RoleRequest>,
) -> ApiResult<web::Json<UpdateResultBody>> {
    let id = parse_document_id(&path.into_inner(), ID)?;
    let role = parse_role(require(payload.into_inner().role, ROLE)?, ROLE)?;
    let outcome = state.users.set_role(&id, role).await?;
    Ok(web::Json(outcome.into()))
}

/// Change a user's account status.
#[utoipa::path(
    put,
    path = "/users/{id}/status",
    params(("id" = String, Path, description = "User ObjectId")),
    request_body = AccountStatusRequest,
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateResultBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "setUserStatus"
)]
#[put("/users/{id}/status")]
pub async fn set_user_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<AccountStatusRequest>,
) -> ApiResult<web::Json<UpdateResultBody>> {
    let id = parse_document_id(&path.into_inner(), ID)?;
    let status = parse_account_status(require(payload.into_inner().status, STATUS)?, STATUS)?;
    let outcome = state.users.set_status(&id, status).await?;
    Ok(web::Json(outcome.into()))
}

#[cfg(test)]
mod tests;
