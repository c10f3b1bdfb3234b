//! Users API handlers.
//!
//! ```text
//! POST   /api/v1/auth/login {"email":"ada@example.com","password":"secret"}
//! GET    /api/v1/users/token
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users {"user_name":"ada","email":"ada@example.com","password":"secret"}
//! PUT    /api/v1/users {"email":"new@example.com"}
//! DELETE /api/v1/users
//! ```

use actix_web::{delete, get, post, put, web};
use serde_json::json;

use crate::domain::ports::{RegisterUserRequest, UpdateCurrentUserRequest};
use crate::domain::{AccessDenied, Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id};

use super::users_dto::{
    CreateUserRequest, LoginRequest, ProfileChanges, Registration, UpdateUserRequest,
    UserMessageResponse, UserResponse,
};

const USER_ID: FieldName = FieldName::new("id");

/// Authenticate by email and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserMessageResponse, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserMessageResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let authenticated = state.login.authenticate(&credentials).await?;
    session.persist_user(&authenticated)?;
    Ok(web::Json(UserMessageResponse::new(
        "Login successful",
        authenticated.profile,
    )))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail => Error::invalid_request("email must be a valid address")
            .with_details(json!({ "field": "email", "code": "invalid_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Echo the identity held by the session.
///
/// Reads nothing from the user store.
#[utoipa::path(
    get,
    path = "/api/v1/users/token",
    responses(
        (status = 200, description = "Session identity", body = UserResponse),
        (status = 403, description = "token not valid", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "checkToken"
)]
#[get("/users/token")]
pub async fn check_token(session: SessionContext) -> ApiResult<web::Json<UserResponse>> {
    let profile = session
        .profile()
        .ok_or_else(|| Error::from(AccessDenied::MissingPrincipal))?;
    Ok(web::Json(UserResponse::from(profile)))
}

/// Fetch one user's restricted projection.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path.into_inner(), USER_ID)?;
    let view = state.users.get(&id).await?;
    Ok(web::Json(UserResponse::from(view)))
}

/// List known users.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let views = state.users.list().await?;
    Ok(web::Json(views.into_iter().map(UserResponse::from).collect()))
}

/// Register an account with the default role.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserMessageResponse),
        (status = 400, description = "Invalid request or email in use", body = ErrorBody),
        (status = 403, description = "Elevated role requested", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<UserMessageResponse>> {
    let Registration {
        user_name,
        email,
        password,
        role,
    } = Registration::try_from(payload.into_inner())?;
    let view = state
        .users_command
        .register(RegisterUserRequest {
            user_name,
            email,
            password,
            role,
        })
        .await?;
    Ok(web::Json(UserMessageResponse::new("User created", view)))
}

/// Update the caller's own account.
#[utoipa::path(
    put,
    path = "/api/v1/users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserMessageResponse),
        (status = 400, description = "Invalid request or email in use", body = ErrorBody),
        (status = 403, description = "token not valid", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateCurrentUser"
)]
#[put("/users")]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserMessageResponse>> {
    let ProfileChanges {
        user_name,
        email,
        password,
    } = ProfileChanges::try_from(payload.into_inner())?;
    let view = state
        .users_command
        .update_current(UpdateCurrentUserRequest {
            principal: session.principal(),
            user_name,
            email,
            password,
        })
        .await?;
    session.refresh_profile(&view)?;
    Ok(web::Json(UserMessageResponse::new("User updated", view)))
}

/// Delete the caller's own account and end the session.
#[utoipa::path(
    delete,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "User deleted", body = UserMessageResponse),
        (status = 403, description = "token not valid", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteCurrentUser"
)]
#[delete("/users")]
pub async fn delete_current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserMessageResponse>> {
    let view = state.users_command.delete_current(session.principal()).await?;
    session.purge();
    Ok(web::Json(UserMessageResponse::new("User deleted", view)))
}
