//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use chrono::NaiveDate;
use serde_json::json;

use crate::domain::ports::{CatRepository, PasswordHasher, UserRepository};
use crate::domain::{
    Cat, CatId, CatName, CatService, Email, GeoPoint, PlainPassword, Role, User, UserId,
    UserName, UserService, Weight,
};
use crate::inbound::http::configure;
use crate::inbound::http::coordinates::DefaultLocation;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryCatRepository, InMemoryUserRepository};
use crate::outbound::password::BcryptPasswordHasher;

/// Password given to every seeded user.
pub const TEST_PASSWORD: &str = "correct horse";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

pub fn test_default_location() -> DefaultLocation {
    DefaultLocation(GeoPoint::new(24.9384, 60.1699).expect("default location"))
}

/// Real services over in-memory stores, with handles for seeding.
pub struct TestBackend {
    pub state: HttpState,
    pub cats: Arc<InMemoryCatRepository>,
    pub users: Arc<InMemoryUserRepository>,
    hasher: Arc<BcryptPasswordHasher>,
}

impl TestBackend {
    pub fn new() -> Self {
        let cats = Arc::new(InMemoryCatRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::new(4).expect("minimum bcrypt cost"));
        let cat_service = Arc::new(CatService::new(cats.clone(), users.clone()));
        let user_service = Arc::new(UserService::new(users.clone(), hasher.clone()));
        let state = HttpState::new(HttpStatePorts {
            cats: cat_service.clone(),
            cats_command: cat_service,
            users: user_service.clone(),
            users_command: user_service.clone(),
            login: user_service,
        });
        Self {
            state,
            cats,
            users,
            hasher,
        }
    }

    /// Store a user with [`TEST_PASSWORD`] and return its id.
    pub async fn seed_user(&self, user_name: &str, email: &str, role: Role) -> UserId {
        let password = PlainPassword::new(TEST_PASSWORD).expect("password");
        let hash = self.hasher.hash(&password).await.expect("hash");
        let user = User::new(
            UserId::random(),
            UserName::new(user_name).expect("user name"),
            Email::new(email).expect("email"),
            hash,
            role,
        );
        self.users.create(&user).await.expect("seed user");
        *user.id()
    }

    /// Store a cat at `[lng, lat]`.
    pub async fn seed_cat(&self, name: &str, owner: UserId, lng: f64, lat: f64) -> Cat {
        let cat = Cat {
            id: CatId::random(),
            name: CatName::new(name).expect("cat name"),
            weight: Weight::new(4.0).expect("weight"),
            birthdate: NaiveDate::from_ymd_opt(2020, 5, 17).expect("date"),
            owner,
            location: GeoPoint::new(lng, lat).expect("point"),
        };
        self.cats.create(&cat).await.expect("seed cat");
        cat
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .app_data(web::Data::new(test_default_location()))
            .wrap(test_session_middleware())
            .service(web::scope("/api/v1").configure(configure))
    }
}

/// Log in through the API and return the session cookie.
pub async fn login_cookie<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": email, "password": TEST_PASSWORD }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "login failed: {}", response.status());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
