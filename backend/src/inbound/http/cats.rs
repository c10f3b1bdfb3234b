//! Cats API handlers.
//!
//! ```text
//! GET    /api/v1/cats
//! GET    /api/v1/cats/user
//! GET    /api/v1/cats/area?topRight=10,10&bottomLeft=0,0
//! GET    /api/v1/cats/{id}
//! POST   /api/v1/cats {"cat_name":"Miso","weight":4.2,"birthdate":"2020-05-17"}
//! PUT    /api/v1/cats/{id} {"owner":"<caller id>","weight":4.4}
//! PUT    /api/v1/cats/admin/{id}
//! DELETE /api/v1/cats/{id}
//! DELETE /api/v1/cats/admin/{id}
//! ```
//!
//! Mutations take the principal from the session and the request coordinates
//! from the `X-Coordinates` header; the service decides access.

use actix_web::{delete, get, post, put, web};

use crate::domain::ports::{CreateCatRequest, DeleteCatRequest, UpdateCatRequest};
use crate::domain::{Access, BoundingBox, CatChanges, CatDraft, CatId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::coordinates::RequestCoordinates;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_cat_id, parse_coordinates};

use super::cats_dto::{
    AreaQuery, CatMessageResponse, CatResponse, CreateCatRequest as CreateCatBody,
    UpdateCatRequest as UpdateCatBody,
};

const CAT_ID: FieldName = FieldName::new("id");
const TOP_RIGHT: FieldName = FieldName::new("topRight");
const BOTTOM_LEFT: FieldName = FieldName::new("bottomLeft");

fn cat_id(path: web::Path<String>) -> ApiResult<CatId> {
    parse_cat_id(&path.into_inner(), CAT_ID)
}

/// Fetch one cat with its owner populated.
#[utoipa::path(
    get,
    path = "/api/v1/cats/{id}",
    params(("id" = String, Path, description = "Cat id")),
    responses(
        (status = 200, description = "Cat", body = CatResponse),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "Cat not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cats"],
    operation_id = "getCat",
    security([])
)]
#[get("/cats/{id}")]
pub async fn get_cat(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CatResponse>> {
    let id = cat_id(path)?;
    let view = state.cats.get(&id).await?;
    Ok(web::Json(CatResponse::from(view)))
}

/// List every cat with owners populated.
#[utoipa::path(
    get,
    path = "/api/v1/cats",
    responses(
        (status = 200, description = "Cats", body = [CatResponse]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cats"],
    operation_id = "listCats",
    security([])
)]
#[get("/cats")]
pub async fn list_cats(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<CatResponse>>> {
    let views = state.cats.list().await?;
    Ok(web::Json(views.into_iter().map(CatResponse::from).collect()))
}

/// List the caller's own cats.
#[utoipa::path(
    get,
    path = "/api/v1/cats/user",
    responses(
        (status = 200, description = "Cats owned by the caller", body = [CatResponse]),
        (status = 403, description = "No valid session", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cats"],
    operation_id = "listOwnCats"
)]
#[get("/cats/user")]
pub async fn list_own_cats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CatResponse>>> {
    let views = state.cats.list_by_owner(session.principal()).await?;
    Ok(web::Json(views.into_iter().map(CatResponse::from).collect()))
}

/// List cats inside a bounding box, boundary included.
#[utoipa::path(
    get,
    path = "/api/v1/cats/area",
    params(AreaQuery),
    responses(
        (status = 200, description = "Cats inside the box", body = [CatResponse]),
        (status = 400, description = "Missing or malformed corner", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cats"],
    operation_id = "listCatsInArea",
    security([])
)]
#[get("/cats/area")]
pub async fn list_cats_in_area(
    state: web::Data<HttpState>,
    query: web::Query<AreaQuery>,
) -> ApiResult<web::Json<Vec<CatResponse>>> {
    let AreaQuery {
        top_right,
        bottom_left,
    } = query.into_inner();
    let top_right = parse_coordinates(top_right.as_deref(), TOP_RIGHT)?;
    let bottom_left = parse_coordinates(bottom_left.as_deref(), BOTTOM_LEFT)?;
    let cats = state
        .cats
        .list_within(BoundingBox::new(bottom_left, top_right))
        .await?;
    Ok(web::Json(cats.into_iter().map(CatResponse::from).collect()))
}

/// Create a cat owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/cats",
    request_body = CreateCatBody,
    params(("X-Coordinates" = Option<String>, Header, description = "Caller position as lng,lat")),
    responses(
        (status = 200, description = "Cat created", body = CatMessageResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 403, description = "No valid session", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cats"],
    operation_id = "createCat"
)]
#[post("/cats")]
pub async fn create_cat(
    state: web::Data<HttpState>,
    session: SessionContext,
    coordinates: RequestCoordinates,
    payload: web::Json<CreateCatBody>,
) -> ApiResult<web::Json<CatMessageResponse>> {
    let draft = CatDraft::try_from(payload.into_inner())?;
    let cat = state
        .cats_command
        .create(CreateCatRequest {
            principal: session.principal(),
            draft,
            request_location: coordinates.into_inner(),
        })
        .await?;
    Ok(web::Json(CatMessageResponse::new("Cat created", cat)))
}

async fn update_with_access(
    state: web::Data<HttpState>,
    session: SessionContext,
    coordinates: RequestCoordinates,
    path: web::Path<String>,
    payload: web::Json<UpdateCatBody>,
    access: Access,
) -> ApiResult<web::Json<CatMessageResponse>> {
    let id = cat_id(path)?;
    let changes = CatChanges::try_from(payload.into_inner())?;
    let cat = state
        .cats_command
        .update(UpdateCatRequest {
            principal: session.principal(),
            access,
            id,
            changes,
            request_location: coordinates.into_inner(),
        })
        .await?;
    Ok(web::Json(CatMessageResponse::new("Cat updated", cat)))
}

/// Update a cat on the owner route.
///
/// The body's `owner` must echo the caller's id; the stored owner is not
/// consulted.
#[utoipa::path(
    put,
    path = "/api/v1/cats/{id}",
    request_body = UpdateCatBody,
    params(
        ("id" = String, Path, description = "Cat id"),
        ("X-Coordinates" = Option<String>, Header, description = "Caller position as lng,lat")
    ),
    responses(
        (status = 200, description = "Cat updated", body = CatMessageResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 403, description = "Access restricted", body = ErrorBody),
        (status = 404, description = "Cat not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cats"],
    operation_id = "updateOwnCat"
)]
#[put("/cats/{id}")]
pub async fn update_own_cat(
    state: web::Data<HttpState>,
    session: SessionContext,
    coordinates: RequestCoordinates,
    path: web::Path<String>,
    payload: web::Json<UpdateCatBody>,
) -> ApiResult<web::Json<CatMessageResponse>> {
    update_with_access(state, session, coordinates, path, payload, Access::Owner).await
}

/// Update any cat; admin only.
#[utoipa::path(
    put,
    path = "/api/v1/cats/admin/{id}",
    request_body = UpdateCatBody,
    params(
        ("id" = String, Path, description = "Cat id"),
        ("X-Coordinates" = Option<String>, Header, description = "Caller position as lng,lat")
    ),
    responses(
        (status = 200, description = "Cat updated", body = CatMessageResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 403, description = "Access restricted", body = ErrorBody),
        (status = 404, description = "Cat not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cats"],
    operation_id = "updateCatAsAdmin"
)]
#[put("/cats/admin/{id}")]
pub async fn update_cat_as_admin(
    state: web::Data<HttpState>,
    session: SessionContext,
    coordinates: RequestCoordinates,
    path: web::Path<String>,
    payload: web::Json<UpdateCatBody>,
) -> ApiResult<web::Json<CatMessageResponse>> {
    update_with_access(state, session, coordinates, path, payload, Access::Admin).await
}

async fn delete_with_access(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    access: Access,
) -> ApiResult<web::Json<CatMessageResponse>> {
    let id = cat_id(path)?;
    let cat = state
        .cats_command
        .delete(DeleteCatRequest {
            principal: session.principal(),
            access,
            id,
        })
        .await?;
    Ok(web::Json(CatMessageResponse::new("Cat deleted", cat)))
}

/// Delete one of the caller's cats.
///
/// A cat owned by someone else is reported as not found.
#[utoipa::path(
    delete,
    path = "/api/v1/cats/{id}",
    params(("id" = String, Path, description = "Cat id")),
    responses(
        (status = 200, description = "Cat deleted", body = CatMessageResponse),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 403, description = "No valid session", body = ErrorBody),
        (status = 404, description = "Cat not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cats"],
    operation_id = "deleteOwnCat"
)]
#[delete("/cats/{id}")]
pub async fn delete_own_cat(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CatMessageResponse>> {
    delete_with_access(state, session, path, Access::Owner).await
}

/// Delete any cat; admin only.
#[utoipa::path(
    delete,
    path = "/api/v1/cats/admin/{id}",
    params(("id" = String, Path, description = "Cat id")),
    responses(
        (status = 200, description = "Cat deleted", body = CatMessageResponse),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 403, description = "Access restricted", body = ErrorBody),
        (status = 404, description = "Cat not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cats"],
    operation_id = "deleteCatAsAdmin"
)]
#[delete("/cats/admin/{id}")]
pub async fn delete_cat_as_admin(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CatMessageResponse>> {
    delete_with_access(state, session, path, Access::Admin).await
}

#[cfg(test)]
#[path = "cats_tests.rs"]
mod tests;
