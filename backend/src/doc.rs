//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated OpenAPI specification for the REST API.
//! It registers every stall endpoint, the health probes, and the request and
//! response schemas used by the HTTP adapter. Swagger UI serves the document
//! in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::error::{ApiError, ApiErrorCode};
use crate::inbound::http::stalls::{
    CreateStallRequest, StallPageResponse, StallResponse, UpdateStallRequest,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ExhibitFlow backend API",
        description = "HTTP interface for exhibition stall lifecycle management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::stalls::list_stalls,
        crate::inbound::http::stalls::create_stall,
        crate::inbound::http::stalls::get_stall,
        crate::inbound::http::stalls::update_stall,
        crate::inbound::http::stalls::hold_stall,
        crate::inbound::http::stalls::release_stall,
        crate::inbound::http::stalls::reserve_stall,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiError,
        ApiErrorCode,
        CreateStallRequest,
        UpdateStallRequest,
        StallResponse,
        StallPageResponse,
    )),
    tags(
        (name = "stalls", description = "Stall CRUD and lifecycle transitions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_registers_all_stall_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/stalls",
            "/api/v1/stalls/{id}",
            "/api/v1/stalls/{id}/hold",
            "/api/v1/stalls/{id}/release",
            "/api/v1/stalls/{id}/reserve",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "OpenAPI document should register {path}"
            );
        }
    }

    #[test]
    fn openapi_error_schema_has_envelope_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("ApiError").expect("ApiError schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_stall_schema_has_lifecycle_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let stall_schema = schemas.get("StallResponse").expect("StallResponse schema");

        assert_object_schema_has_field(stall_schema, "status");
        assert_object_schema_has_field(stall_schema, "code");
        assert_object_schema_has_field(stall_schema, "updatedAt");
    }
}
