//! Stall HTTP handlers.
//!
//! ```text
//! GET  /api/v1/stalls
//! POST /api/v1/stalls
//! GET  /api/v1/stalls/{id}
//! PUT  /api/v1/stalls/{id}
//! POST /api/v1/stalls/{id}/hold
//! POST /api/v1/stalls/{id}/release
//! POST /api/v1/stalls/{id}/reserve
//! ```
//!
//! Payloads carry enum values as their canonical uppercase strings and are
//! parsed into domain types here; the handlers themselves only translate
//! between the wire shapes and the driving ports.

use std::str::FromStr;

use actix_web::{HttpResponse, get, post, put, web};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{Page, PageRequest, StallFilter};
use crate::domain::stall::{NewStall, Stall, StallCode, StallId, StallPatch, StallSize, StallStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    invalid_enum_error, invalid_id_error, missing_field_error, validate_price,
};

const SIZE_VALUES: &str = "SMALL, MEDIUM, LARGE";
const STATUS_VALUES: &str = "AVAILABLE, HELD, RESERVED";

/// Request payload for creating a stall.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStallRequest {
    #[schema(example = "A-001")]
    pub code: Option<String>,
    #[schema(example = "MEDIUM")]
    pub size: Option<String>,
    #[schema(example = "Hall B, aisle 4")]
    pub location: Option<String>,
    #[schema(value_type = f64, example = 450.0)]
    pub price: Option<BigDecimal>,
}

/// Request payload for partially updating a stall.
///
/// Absent fields retain their prior value. Code and status cannot be changed
/// through this endpoint.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStallRequest {
    #[schema(example = "Hall C, aisle 1")]
    pub location: Option<String>,
    #[schema(value_type = f64, example = 500.0)]
    pub price: Option<BigDecimal>,
    #[schema(example = "LARGE")]
    pub size: Option<String>,
}

/// Stall representation returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StallResponse {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(example = "A-001")]
    pub code: String,
    #[schema(example = "MEDIUM")]
    pub size: String,
    #[schema(example = "Hall B, aisle 4")]
    pub location: String,
    #[schema(value_type = String, example = "450.00")]
    pub price: BigDecimal,
    #[schema(example = "AVAILABLE")]
    pub status: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<Stall> for StallResponse {
    fn from(stall: Stall) -> Self {
        Self {
            id: stall.id.to_string(),
            code: stall.code.as_str().to_owned(),
            size: stall.size.as_str().to_owned(),
            location: stall.location,
            price: stall.price,
            status: stall.status.as_str().to_owned(),
            created_at: stall.created_at.to_rfc3339(),
            updated_at: stall.updated_at.to_rfc3339(),
        }
    }
}

/// Paged listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StallPageResponse {
    pub items: Vec<StallResponse>,
    pub page: u32,
    pub per_page: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<Page<Stall>> for StallPageResponse {
    fn from(page: Page<Stall>) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(StallResponse::from);
        Self {
            items: page.items,
            page: page.page,
            per_page: page.per_page,
            total_elements: page.total_elements,
            total_pages,
        }
    }
}

/// Query parameters accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListStallsQuery {
    /// Filter by lifecycle status (`AVAILABLE`, `HELD`, `RESERVED`).
    pub status: Option<String>,
    /// Filter by footprint (`SMALL`, `MEDIUM`, `LARGE`).
    pub size: Option<String>,
    /// Case-insensitive substring match on location.
    pub location: Option<String>,
    /// Zero-based page index. Defaults to 0.
    pub page: Option<u32>,
    /// Page size, clamped to 100. Defaults to 20.
    pub per_page: Option<u32>,
}

fn parse_stall_id(raw: &str) -> Result<StallId, ApiError> {
    StallId::from_str(raw).map_err(|_| invalid_id_error(raw))
}

fn parse_size(raw: &str) -> Result<StallSize, ApiError> {
    StallSize::from_str(raw).map_err(|_| invalid_enum_error("size", raw, SIZE_VALUES))
}

fn parse_status(raw: &str) -> Result<StallStatus, ApiError> {
    StallStatus::from_str(raw).map_err(|_| invalid_enum_error("status", raw, STATUS_VALUES))
}

fn parse_code(raw: String) -> Result<StallCode, ApiError> {
    StallCode::new(raw).map_err(|error| {
        ApiError::invalid_request(error.to_string()).with_details(serde_json::json!({
            "field": "code",
            "code": "invalid_code",
        }))
    })
}

fn parse_new_stall(payload: CreateStallRequest) -> Result<NewStall, ApiError> {
    let code = payload.code.ok_or_else(|| missing_field_error("code"))?;
    let size = payload.size.ok_or_else(|| missing_field_error("size"))?;
    let location = payload
        .location
        .ok_or_else(|| missing_field_error("location"))?;
    let price = payload.price.ok_or_else(|| missing_field_error("price"))?;
    Ok(NewStall {
        code: parse_code(code)?,
        size: parse_size(size.as_str())?,
        location,
        price: validate_price(price)?,
    })
}

fn parse_patch(payload: UpdateStallRequest) -> Result<StallPatch, ApiError> {
    Ok(StallPatch {
        location: payload.location,
        price: payload.price.map(validate_price).transpose()?,
        size: payload
            .size
            .as_deref()
            .map(parse_size)
            .transpose()?,
    })
}

fn parse_filter(query: &ListStallsQuery) -> Result<StallFilter, ApiError> {
    Ok(StallFilter {
        status: query.status.as_deref().map(parse_status).transpose()?,
        size: query.size.as_deref().map(parse_size).transpose()?,
        location: query.location.clone(),
    })
}

fn parse_page_request(query: &ListStallsQuery) -> PageRequest {
    PageRequest::new(
        query.page.unwrap_or(0),
        query.per_page.unwrap_or(PageRequest::DEFAULT_PER_PAGE),
    )
}

/// List stalls with optional filters and paging.
#[utoipa::path(
    get,
    path = "/api/v1/stalls",
    params(ListStallsQuery),
    responses(
        (status = 200, description = "Page of stalls", body = StallPageResponse),
        (status = 400, description = "Invalid filter or paging parameter", body = ApiError),
    ),
    tag = "stalls"
)]
#[get("/stalls")]
pub async fn list_stalls(
    state: web::Data<HttpState>,
    query: web::Query<ListStallsQuery>,
) -> ApiResult<HttpResponse> {
    let filter = parse_filter(&query)?;
    let page = parse_page_request(&query);
    let result = state.stalls_query.list(filter, page).await?;
    Ok(HttpResponse::Ok().json(StallPageResponse::from(result)))
}

/// Create a stall. New stalls always start AVAILABLE.
#[utoipa::path(
    post,
    path = "/api/v1/stalls",
    request_body = CreateStallRequest,
    responses(
        (status = 201, description = "Stall created", body = StallResponse),
        (status = 400, description = "Invalid payload", body = ApiError),
        (status = 409, description = "Code already in use", body = ApiError),
    ),
    tag = "stalls"
)]
#[post("/stalls")]
pub async fn create_stall(
    state: web::Data<HttpState>,
    payload: web::Json<CreateStallRequest>,
) -> ApiResult<HttpResponse> {
    let new_stall = parse_new_stall(payload.into_inner())?;
    let created = state.stalls.create(new_stall).await?;
    Ok(HttpResponse::Created().json(StallResponse::from(created)))
}

/// Fetch a single stall by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/stalls/{id}",
    params(("id" = uuid::Uuid, Path, description = "Stall identifier")),
    responses(
        (status = 200, description = "The stall", body = StallResponse),
        (status = 404, description = "No stall with this identifier", body = ApiError),
    ),
    tag = "stalls"
)]
#[get("/stalls/{id}")]
pub async fn get_stall(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_stall_id(&path)?;
    let stall = state.stalls_query.get(&id).await?;
    Ok(HttpResponse::Ok().json(StallResponse::from(stall)))
}

/// Partially update a stall's location, price, or size.
#[utoipa::path(
    put,
    path = "/api/v1/stalls/{id}",
    params(("id" = uuid::Uuid, Path, description = "Stall identifier")),
    request_body = UpdateStallRequest,
    responses(
        (status = 200, description = "Updated stall", body = StallResponse),
        (status = 400, description = "Invalid payload", body = ApiError),
        (status = 404, description = "No stall with this identifier", body = ApiError),
        (status = 409, description = "Concurrent modification", body = ApiError),
    ),
    tag = "stalls"
)]
#[put("/stalls/{id}")]
pub async fn update_stall(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStallRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_stall_id(&path)?;
    let patch = parse_patch(payload.into_inner())?;
    let updated = state.stalls.update(&id, patch).await?;
    Ok(HttpResponse::Ok().json(StallResponse::from(updated)))
}

/// Place a hold on an available stall.
#[utoipa::path(
    post,
    path = "/api/v1/stalls/{id}/hold",
    params(("id" = uuid::Uuid, Path, description = "Stall identifier")),
    responses(
        (status = 200, description = "Stall held (or already held)", body = StallResponse),
        (status = 404, description = "No stall with this identifier", body = ApiError),
        (status = 409, description = "Stall cannot be held from its current status", body = ApiError),
    ),
    tag = "stalls"
)]
#[post("/stalls/{id}/hold")]
pub async fn hold_stall(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_stall_id(&path)?;
    let stall = state.stalls.hold(&id).await?;
    Ok(HttpResponse::Ok().json(StallResponse::from(stall)))
}

/// Return a held or reserved stall to the pool.
#[utoipa::path(
    post,
    path = "/api/v1/stalls/{id}/release",
    params(("id" = uuid::Uuid, Path, description = "Stall identifier")),
    responses(
        (status = 200, description = "Stall released (or already available)", body = StallResponse),
        (status = 404, description = "No stall with this identifier", body = ApiError),
    ),
    tag = "stalls"
)]
#[post("/stalls/{id}/release")]
pub async fn release_stall(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_stall_id(&path)?;
    let stall = state.stalls.release(&id).await?;
    Ok(HttpResponse::Ok().json(StallResponse::from(stall)))
}

/// Confirm a held stall as reserved.
#[utoipa::path(
    post,
    path = "/api/v1/stalls/{id}/reserve",
    params(("id" = uuid::Uuid, Path, description = "Stall identifier")),
    responses(
        (status = 200, description = "Stall reserved (or already reserved)", body = StallResponse),
        (status = 404, description = "No stall with this identifier", body = ApiError),
        (status = 409, description = "Stall cannot be reserved from its current status", body = ApiError),
    ),
    tag = "stalls"
)]
#[post("/stalls/{id}/reserve")]
pub async fn reserve_stall(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_stall_id(&path)?;
    let stall = state.stalls.reserve(&id).await?;
    Ok(HttpResponse::Ok().json(StallResponse::from(stall)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    fn create_request() -> CreateStallRequest {
        CreateStallRequest {
            code: Some("A-001".to_owned()),
            size: Some("MEDIUM".to_owned()),
            location: Some("Hall B".to_owned()),
            price: Some("450.00".parse().expect("decimal")),
        }
    }

    #[rstest]
    fn parse_new_stall_accepts_a_complete_payload() {
        let new_stall = parse_new_stall(create_request()).expect("valid payload");
        assert_eq!(new_stall.code.as_str(), "A-001");
        assert_eq!(new_stall.size, StallSize::Medium);
        assert_eq!(new_stall.location, "Hall B");
    }

    #[rstest]
    #[case(CreateStallRequest { code: None, ..create_request() }, "code")]
    #[case(CreateStallRequest { size: None, ..create_request() }, "size")]
    #[case(CreateStallRequest { location: None, ..create_request() }, "location")]
    #[case(CreateStallRequest { price: None, ..create_request() }, "price")]
    fn parse_new_stall_rejects_missing_fields(
        #[case] payload: CreateStallRequest,
        #[case] field: &str,
    ) {
        let error = parse_new_stall(payload).expect_err("missing field");
        let details = error.details().and_then(Value::as_object).expect("details");
        assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
    }

    #[rstest]
    fn parse_new_stall_rejects_unknown_size() {
        let payload = CreateStallRequest {
            size: Some("gigantic".to_owned()),
            ..create_request()
        };
        let error = parse_new_stall(payload).expect_err("unknown size");
        assert!(error.message().contains(SIZE_VALUES));
    }

    #[rstest]
    fn parse_new_stall_rejects_negative_price() {
        let payload = CreateStallRequest {
            price: Some("-1".parse().expect("decimal")),
            ..create_request()
        };
        let error = parse_new_stall(payload).expect_err("negative price");
        let details = error.details().and_then(Value::as_object).expect("details");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("negative_price")
        );
    }

    #[rstest]
    fn parse_patch_keeps_absent_fields_absent() {
        let patch = parse_patch(UpdateStallRequest {
            location: None,
            price: None,
            size: Some("large".to_owned()),
        })
        .expect("valid patch");
        assert!(patch.location.is_none());
        assert!(patch.price.is_none());
        assert_eq!(patch.size, Some(StallSize::Large));
    }

    #[rstest]
    fn parse_filter_rejects_unknown_status() {
        let query = ListStallsQuery {
            status: Some("occupied".to_owned()),
            ..ListStallsQuery::default()
        };
        let error = parse_filter(&query).expect_err("unknown status");
        assert!(error.message().contains(STATUS_VALUES));
    }

    #[rstest]
    fn parse_filter_lowercase_values_are_accepted() {
        let query = ListStallsQuery {
            status: Some("held".to_owned()),
            size: Some("small".to_owned()),
            location: Some("hall".to_owned()),
            ..ListStallsQuery::default()
        };
        let filter = parse_filter(&query).expect("valid filter");
        assert_eq!(filter.status, Some(StallStatus::Held));
        assert_eq!(filter.size, Some(StallSize::Small));
        assert_eq!(filter.location.as_deref(), Some("hall"));
    }

    #[rstest]
    fn parse_page_request_applies_defaults() {
        let page = parse_page_request(&ListStallsQuery::default());
        assert_eq!(page.page(), 0);
        assert_eq!(page.per_page(), PageRequest::DEFAULT_PER_PAGE);
    }

    #[rstest]
    fn parse_stall_id_rejects_garbage() {
        let error = parse_stall_id("not-a-uuid").expect_err("invalid id");
        let details = error.details().and_then(Value::as_object).expect("details");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_id")
        );
    }
}
