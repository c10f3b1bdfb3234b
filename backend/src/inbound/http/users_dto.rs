//! Request and response payloads for the users endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Email, Error, LoginCredentials, LoginValidationError, PlainPassword, Role, UserName,
    UserView,
};

use super::validation::{
    FieldName, invalid_field_error, parse_email, parse_password, parse_user_name,
};

const USER_NAME: FieldName = FieldName::new("user_name");
const EMAIL: FieldName = FieldName::new("email");
const PASSWORD: FieldName = FieldName::new("password");
const ROLE: FieldName = FieldName::new("role");

/// Restricted user projection: never carries a password or role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "ada")]
    pub user_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<UserView> for UserResponse {
    fn from(view: UserView) -> Self {
        Self {
            id: *view.id.as_uuid(),
            user_name: view.user_name.into(),
            email: view.email.into(),
        }
    }
}

/// `{message, data}` envelope for user mutations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserMessageResponse {
    #[schema(example = "User created")]
    pub message: String,
    pub data: UserResponse,
}

impl UserMessageResponse {
    pub(crate) fn new(message: &str, view: UserView) -> Self {
        Self {
            message: message.to_owned(),
            data: UserResponse::from(view),
        }
    }
}

/// Body for `POST /api/v1/users`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
    /// Only `user` is accepted; anything else is refused.
    #[serde(default)]
    pub role: Option<String>,
}

/// Validated registration fields.
pub(crate) struct Registration {
    pub user_name: UserName,
    pub email: Email,
    pub password: PlainPassword,
    pub role: Option<Role>,
}

impl TryFrom<CreateUserRequest> for Registration {
    type Error = Error;

    fn try_from(body: CreateUserRequest) -> Result<Self, Self::Error> {
        let role = body
            .role
            .as_deref()
            .map(|raw| raw.parse::<Role>().map_err(|err| invalid_field_error(ROLE, err)))
            .transpose()?;
        Ok(Self {
            user_name: parse_user_name(&body.user_name, USER_NAME)?,
            email: parse_email(&body.email, EMAIL)?,
            password: parse_password(body.password, PASSWORD)?,
            role,
        })
    }
}

/// Body for `PUT /api/v1/users`. Absent fields keep their stored value.
///
/// Unknown fields such as `role` are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Validated self-service changes.
pub(crate) struct ProfileChanges {
    pub user_name: Option<UserName>,
    pub email: Option<Email>,
    pub password: Option<PlainPassword>,
}

impl TryFrom<UpdateUserRequest> for ProfileChanges {
    type Error = Error;

    fn try_from(body: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            user_name: body
                .user_name
                .as_deref()
                .map(|raw| parse_user_name(raw, USER_NAME))
                .transpose()?,
            email: body
                .email
                .as_deref()
                .map(|raw| parse_email(raw, EMAIL))
                .transpose()?,
            password: body
                .password
                .map(|raw| parse_password(raw, PASSWORD))
                .transpose()?,
        })
    }
}

/// Login request body for `POST /api/v1/auth/login`.
///
/// Example JSON:
/// `{"email":"ada@example.com","password":"secret"}`
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}
