//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler, the request and response
//! bodies they use, and the session cookie security scheme. The document is
//! served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::cats_dto::{
    CatMessageResponse, CatResponse, CreateCatRequest, LocationDto, OwnerDto, UpdateCatRequest,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::users_dto::{
    CreateUserRequest, LoginRequest, UpdateUserRequest, UserMessageResponse, UserResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Whiskers backend API",
        description = "Cat records with owner-scoped editing, geographic lookup and user accounts.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::check_token,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::users::delete_current_user,
        crate::inbound::http::cats::list_cats,
        crate::inbound::http::cats::list_own_cats,
        crate::inbound::http::cats::list_cats_in_area,
        crate::inbound::http::cats::get_cat,
        crate::inbound::http::cats::create_cat,
        crate::inbound::http::cats::update_own_cat,
        crate::inbound::http::cats::update_cat_as_admin,
        crate::inbound::http::cats::delete_own_cat,
        crate::inbound::http::cats::delete_cat_as_admin,
    ),
    components(schemas(
        CatResponse,
        CatMessageResponse,
        LocationDto,
        OwnerDto,
        CreateCatRequest,
        UpdateCatRequest,
        UserResponse,
        UserMessageResponse,
        CreateUserRequest,
        UpdateUserRequest,
        LoginRequest,
        ErrorBody,
    )),
    tags(
        (name = "cats", description = "Cat records and geographic lookup"),
        (name = "users", description = "Accounts and sessions")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI registration.

    use super::*;
    use rstest::rstest;
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

    #[rstest]
    #[case("/api/v1/auth/login")]
    #[case("/api/v1/users/token")]
    #[case("/api/v1/users")]
    #[case("/api/v1/users/{id}")]
    #[case("/api/v1/cats")]
    #[case("/api/v1/cats/user")]
    #[case("/api/v1/cats/area")]
    #[case("/api/v1/cats/{id}")]
    #[case("/api/v1/cats/admin/{id}")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    #[case("CatResponse", "_id")]
    #[case("CatResponse", "location")]
    #[case("UserResponse", "_id")]
    #[case("ErrorBody", "message")]
    fn schemas_expose_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert_object_schema_has_field(found, field);
    }

    #[rstest]
    fn user_response_has_no_password() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get("UserResponse").expect("UserResponse") {
            RefOr::T(Schema::Object(obj)) => {
                assert!(!obj.properties.contains_key("password"));
            }
            _ => panic!("expected Object schema"),
        }
    }
}
