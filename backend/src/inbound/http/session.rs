//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations: persisting the authenticated user at login,
//! resolving the request [`Principal`], and purging the session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{
    AuthenticatedUser, Email, Error, Principal, Role, UserId, UserName, UserView,
};

pub(crate) const SESSION_USER_KEY: &str = "user";

/// Identity stored in the session cookie at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SessionUser {
    id: UserId,
    role: Role,
    user_name: UserName,
    email: Email,
}

impl SessionUser {
    fn principal(&self) -> Principal {
        Principal::new(self.id, self.role)
    }

    fn profile(&self) -> UserView {
        UserView {
            id: self.id,
            user_name: self.user_name.clone(),
            email: self.email.clone(),
        }
    }
}

impl From<&AuthenticatedUser> for SessionUser {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.principal.id,
            role: user.principal.role,
            user_name: user.profile.user_name.clone(),
            email: user.profile.email.clone(),
        }
    }
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user in the session cookie.
    ///
    /// The session is renewed first so a pre-login cookie cannot be reused.
    pub fn persist_user(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_USER_KEY, SessionUser::from(user))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn session_user(&self) -> Option<SessionUser> {
        match self.0.get::<SessionUser>(SESSION_USER_KEY) {
            Ok(user) => user,
            Err(error) => {
                warn!("unreadable user in session cookie: {error}");
                None
            }
        }
    }

    /// The request principal, if the session carries one.
    ///
    /// A tampered or stale session entry resolves to no principal.
    pub fn principal(&self) -> Option<Principal> {
        self.session_user().as_ref().map(SessionUser::principal)
    }

    /// The restricted projection stored at login, if any.
    pub fn profile(&self) -> Option<UserView> {
        self.session_user().as_ref().map(SessionUser::profile)
    }

    /// Refresh the stored projection after the user changed their account.
    pub fn refresh_profile(&self, profile: &UserView) -> Result<(), Error> {
        let Some(mut user) = self.session_user() else {
            return Ok(());
        };
        user.user_name = profile.user_name.clone();
        user.email = profile.email.clone();
        self.0
            .insert(SESSION_USER_KEY, user)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop every entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Principal, require_principal};
    use actix_session::Session;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn fixture_user() -> AuthenticatedUser {
        let id = UserId::new(FIXTURE_ID).expect("fixture id");
        AuthenticatedUser {
            principal: Principal::new(id, Role::Admin),
            profile: UserView {
                id,
                user_name: UserName::new("ada").expect("name"),
                email: Email::new("ada@example.com").expect("email"),
            },
        }
    }

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/set",
                web::get().to(|session: SessionContext| async move {
                    session.persist_user(&fixture_user())?;
                    Ok::<_, Error>(HttpResponse::Ok())
                }),
            )
            .route(
                "/require",
                web::get().to(|session: SessionContext| async move {
                    let principal = session.principal();
                    let principal = require_principal(principal.as_ref())?;
                    Ok::<_, Error>(
                        HttpResponse::Ok().body(format!("{}:{}", principal.id, principal.role)),
                    )
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_principal() {
        let app = test::init_service(session_test_app()).await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, format!("{FIXTURE_ID}:admin"));
    }

    #[actix_web::test]
    async fn missing_principal_is_forbidden() {
        let app = test::init_service(session_test_app()).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/require").to_request()).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn tampered_session_user_is_forbidden() {
        let app = test::init_service(
            session_test_app().route(
                "/set-invalid",
                web::get().to(|session: Session| async move {
                    session
                        .insert(SESSION_USER_KEY, serde_json::json!({"id": "not-a-uuid"}))
                        .expect("set invalid user");
                    HttpResponse::Ok()
                }),
            ),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/require")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }
}
