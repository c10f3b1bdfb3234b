//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod cats;
pub mod cats_dto;
pub mod coordinates;
pub mod error;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod users_dto;
pub mod validation;

pub use error::ApiResult;

/// Register the `/api/v1` handlers and extractor configuration.
///
/// Literal routes are registered ahead of `{id}` routes sharing a prefix.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use backend::inbound::http::configure;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(users::login)
        .service(users::check_token)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::create_user)
        .service(users::update_current_user)
        .service(users::delete_current_user)
        .service(cats::list_own_cats)
        .service(cats::list_cats_in_area)
        .service(cats::list_cats)
        .service(cats::get_cat)
        .service(cats::create_cat)
        .service(cats::update_cat_as_admin)
        .service(cats::update_own_cat)
        .service(cats::delete_cat_as_admin)
        .service(cats::delete_own_cat);
}
