//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers, the access rules for owned records, and the services
//! implementing the driving ports. Nothing here depends on actix or Diesel.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a stable category.
//! - Cat / CatView / CatChanges: cat records and their display form.
//! - User / UserView / UserChanges: accounts and the restricted projection.
//! - GeoPoint / BoundingBox: lng/lat points and containment boxes.
//! - Principal / authorize: request identity and the access guard.
//! - CatService / UserService: driving port implementations.

pub mod auth;
pub mod authorization;
pub mod cat;
pub mod cat_service;
pub mod error;
pub mod geo;
pub mod ports;
pub mod principal;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::authorization::{
    Access, AccessDenied, CatAction, Scope, authorize, require_principal,
};
pub use self::cat::{
    CAT_NAME_MAX, Cat, CatChanges, CatDraft, CatId, CatName, CatValidationError, CatView,
    OwnerRef, Weight,
};
pub use self::cat_service::CatService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::geo::{BoundingBox, GeoError, GeoPoint, POINT_TYPE};
pub use self::principal::{AuthenticatedUser, Principal};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, Email, PasswordHash, PlainPassword, Role, USER_NAME_MAX, User, UserChanges,
    UserId, UserName, UserValidationError, UserView,
};
pub use self::user_service::UserService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Access restricted"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
