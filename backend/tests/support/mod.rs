//! Shared helpers for HTTP integration tests over the in-memory adapters.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use backend::Trace;
use backend::domain::ports::{PasswordHasher, UserRepository};
use backend::domain::{
    CatService, Email, GeoPoint, PlainPassword, Role, User, UserId, UserName, UserService,
};
use backend::inbound::http::configure;
use backend::inbound::http::coordinates::DefaultLocation;
use backend::inbound::http::session_config::{SessionSettings, session_middleware};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::{InMemoryCatRepository, InMemoryUserRepository};
use backend::outbound::password::{BcryptPasswordHasher, MIN_COST};
use serde_json::{Value, json};

#[allow(dead_code)]
#[path = "../../src/server/config.rs"]
mod server_config;
pub use server_config::ServerConfig;

#[path = "../../src/server/state_builders.rs"]
mod state_builders;

/// Password given to every account created by these helpers.
pub const PASSWORD: &str = "whiskers-and-mittens";
/// Location stamped on cats created without an `X-Coordinates` header.
pub const DEFAULT_LNG_LAT: [f64; 2] = [24.9384, 60.1699];

pub fn default_location() -> GeoPoint {
    GeoPoint::new(DEFAULT_LNG_LAT[0], DEFAULT_LNG_LAT[1]).expect("default location")
}

pub fn session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
    }
}

/// Server configuration with in-memory storage and the cheapest bcrypt cost.
pub fn server_config() -> ServerConfig {
    ServerConfig::new(
        session_settings(),
        SocketAddr::from(([127, 0, 0, 1], 0)),
        default_location(),
        MIN_COST,
    )
}

/// State built the way the server binary builds it.
pub fn server_state() -> HttpState {
    state_builders::build_http_state(&server_config()).expect("state")
}

/// In-memory backend exposing the user store for seeding admins.
pub struct World {
    pub state: HttpState,
    pub users: Arc<InMemoryUserRepository>,
    hasher: Arc<BcryptPasswordHasher>,
    session: SessionSettings,
}

impl World {
    pub fn new() -> Self {
        let cats = Arc::new(InMemoryCatRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(BcryptPasswordHasher::new(MIN_COST).expect("cost"));
        let cat_service = Arc::new(CatService::new(cats, users.clone()));
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
            users,
            hasher,
            session: session_settings(),
        }
    }

    /// Store an account directly, bypassing the registration role check.
    pub async fn seed_user(&self, user_name: &str, email: &str, role: Role) -> UserId {
        let hash = self
            .hasher
            .hash(&PlainPassword::new(PASSWORD).expect("password"))
            .await
            .expect("hash");
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
        app_for(self.state.clone(), &self.session)
    }
}

/// Application wired like the server: trace middleware outside, session
/// middleware on the API scope.
pub fn app_for(
    state: HttpState,
    session: &SessionSettings,
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
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(DefaultLocation(default_location())))
        .wrap(Trace)
        .service(
            web::scope("/api/v1")
                .wrap(session_middleware(session))
                .configure(configure),
        )
}

pub async fn body_json(response: ServiceResponse) -> Value {
    let bytes = actix_test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Register an account through the API and return its id.
pub async fn register<S>(app: &S, user_name: &str, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({ "user_name": user_name, "email": email, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "register failed: {}", response.status());
    body_json(response).await["data"]["_id"]
        .as_str()
        .expect("user id")
        .to_owned()
}

/// Log in through the API and return the session cookie.
pub async fn login<S>(app: &S, email: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "email": email, "password": PASSWORD }))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "login failed: {}", response.status());
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
