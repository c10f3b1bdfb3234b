//! Request and response payloads for the cats endpoints.
//!
//! Field names follow the document layout clients already consume: `_id`,
//! `cat_name`, `birthdate` and a GeoJSON `location`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Cat, CatChanges, CatDraft, CatName, CatView, Error, GeoPoint, OwnerRef, POINT_TYPE, Weight,
};

use super::users_dto::UserResponse;
use super::validation::{FieldName, invalid_field_error, parse_user_id};

const CAT_NAME: FieldName = FieldName::new("cat_name");
const WEIGHT: FieldName = FieldName::new("weight");
const LOCATION: FieldName = FieldName::new("location");
const OWNER: FieldName = FieldName::new("owner");

/// GeoJSON point with `[lng, lat]` coordinates.
///
/// The `type` tag is accepted as sent but never trusted: locations are
/// rebuilt from their coordinates and always serialise as a `Point`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    #[serde(rename = "type", default = "point_type")]
    #[schema(example = "Point")]
    pub kind: String,
    #[schema(example = json!([24.9384, 60.1699]))]
    pub coordinates: Vec<f64>,
}

fn point_type() -> String {
    POINT_TYPE.to_owned()
}

impl From<GeoPoint> for LocationDto {
    fn from(point: GeoPoint) -> Self {
        Self {
            kind: POINT_TYPE.to_owned(),
            coordinates: point.coordinates().to_vec(),
        }
    }
}

impl TryFrom<LocationDto> for GeoPoint {
    type Error = Error;

    fn try_from(dto: LocationDto) -> Result<Self, Self::Error> {
        let &[lng, lat] = dto.coordinates.as_slice() else {
            return Err(invalid_field_error(
                LOCATION,
                "coordinates must hold exactly [lng, lat]",
            ));
        };
        GeoPoint::new(lng, lat).map_err(|err| invalid_field_error(LOCATION, err))
    }
}

/// Owner as shown on a cat: the restricted user projection when resolved,
/// otherwise the raw id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum OwnerDto {
    Resolved(UserResponse),
    Id(Uuid),
}

impl From<OwnerRef> for OwnerDto {
    fn from(owner: OwnerRef) -> Self {
        match owner {
            OwnerRef::Resolved(view) => Self::Resolved(UserResponse::from(view)),
            OwnerRef::Id(id) => Self::Id(*id.as_uuid()),
        }
    }
}

/// Cat record as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "Miso")]
    pub cat_name: String,
    #[schema(example = 4.2)]
    pub weight: f64,
    #[schema(value_type = String, format = Date, example = "2020-05-17")]
    pub birthdate: NaiveDate,
    pub owner: OwnerDto,
    pub location: LocationDto,
}

impl From<CatView> for CatResponse {
    fn from(view: CatView) -> Self {
        let CatView { cat, owner } = view;
        Self {
            id: *cat.id.as_uuid(),
            cat_name: cat.name.as_ref().to_owned(),
            weight: cat.weight.kilograms(),
            birthdate: cat.birthdate,
            owner: OwnerDto::from(owner),
            location: LocationDto::from(cat.location),
        }
    }
}

impl From<Cat> for CatResponse {
    fn from(cat: Cat) -> Self {
        Self::from(CatView::unresolved(cat))
    }
}

/// `{message, data}` envelope for cat mutations.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatMessageResponse {
    #[schema(example = "Cat created")]
    pub message: String,
    pub data: CatResponse,
}

impl CatMessageResponse {
    pub(crate) fn new(message: &str, cat: Cat) -> Self {
        Self {
            message: message.to_owned(),
            data: CatResponse::from(cat),
        }
    }
}

/// Body for `POST /api/v1/cats`.
///
/// Any `owner` sent by the client is ignored; the caller becomes the owner.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateCatRequest {
    pub cat_name: String,
    pub weight: f64,
    #[schema(value_type = String, format = Date, example = "2020-05-17")]
    pub birthdate: NaiveDate,
    /// Falls back to the request coordinates when absent.
    #[serde(default)]
    pub location: Option<LocationDto>,
}

impl TryFrom<CreateCatRequest> for CatDraft {
    type Error = Error;

    fn try_from(body: CreateCatRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: CatName::new(&body.cat_name).map_err(|err| invalid_field_error(CAT_NAME, err))?,
            weight: Weight::new(body.weight).map_err(|err| invalid_field_error(WEIGHT, err))?,
            birthdate: body.birthdate,
            location: body.location.map(GeoPoint::try_from).transpose()?,
        })
    }
}

/// Body for `PUT /api/v1/cats/{id}` and `PUT /api/v1/cats/admin/{id}`.
///
/// Absent fields keep their stored value. On the owner route `owner` must
/// echo the caller's id. Any `location` is replaced by the request
/// coordinates.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateCatRequest {
    #[serde(default)]
    pub cat_name: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = Date)]
    pub birthdate: Option<NaiveDate>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl TryFrom<UpdateCatRequest> for CatChanges {
    type Error = Error;

    fn try_from(body: UpdateCatRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: body
                .cat_name
                .map(|raw| CatName::new(raw).map_err(|err| invalid_field_error(CAT_NAME, err)))
                .transpose()?,
            weight: body
                .weight
                .map(|raw| Weight::new(raw).map_err(|err| invalid_field_error(WEIGHT, err)))
                .transpose()?,
            birthdate: body.birthdate,
            owner: body
                .owner
                .as_deref()
                .map(|raw| parse_user_id(raw, OWNER))
                .transpose()?,
            location: None,
        })
    }
}

/// Query for `GET /api/v1/cats/area`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AreaQuery {
    /// North-east corner as `lng,lat`.
    #[param(example = "10,10")]
    pub top_right: Option<String>,
    /// South-west corner as `lng,lat`.
    #[param(example = "0,0")]
    pub bottom_left: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatId, Email, ErrorCode, UserId, UserName, UserView};
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn cat() -> Cat {
        Cat {
            id: CatId::random(),
            name: CatName::new("Miso").expect("name"),
            weight: Weight::new(4.5).expect("weight"),
            birthdate: NaiveDate::from_ymd_opt(2020, 5, 17).expect("date"),
            owner: UserId::random(),
            location: GeoPoint::new(24.5, 60.25).expect("point"),
        }
    }

    #[rstest]
    fn unresolved_owner_serialises_as_raw_id(cat: Cat) {
        let value = serde_json::to_value(CatResponse::from(cat.clone())).expect("serialise");
        assert_eq!(
            value,
            json!({
                "_id": cat.id.to_string(),
                "cat_name": "Miso",
                "weight": 4.5,
                "birthdate": "2020-05-17",
                "owner": cat.owner.to_string(),
                "location": {"type": "Point", "coordinates": [24.5, 60.25]},
            })
        );
    }

    #[rstest]
    fn resolved_owner_serialises_restricted_projection(cat: Cat) {
        let owner = UserView {
            id: cat.owner,
            user_name: UserName::new("ada").expect("name"),
            email: Email::new("ada@example.com").expect("email"),
        };
        let view = CatView {
            cat: cat.clone(),
            owner: OwnerRef::Resolved(owner),
        };

        let value = serde_json::to_value(CatResponse::from(view)).expect("serialise");
        assert_eq!(
            value["owner"],
            json!({"_id": cat.owner.to_string(), "user_name": "ada", "email": "ada@example.com"})
        );
    }

    #[rstest]
    #[case(json!({"type": "Point", "coordinates": [1.0]}))]
    #[case(json!({"type": "Point", "coordinates": [1.0, 2.0, 3.0]}))]
    #[case(json!({"type": "Point", "coordinates": [181.0, 2.0]}))]
    fn invalid_locations_are_rejected(#[case] raw: serde_json::Value) {
        let dto: LocationDto = serde_json::from_value(raw).expect("shape");
        let err = GeoPoint::try_from(dto).expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(json!({"type": "Polygon", "coordinates": [3.0, 4.0]}))]
    #[case(json!({"type": "point", "coordinates": [3.0, 4.0]}))]
    #[case(json!({"coordinates": [3.0, 4.0]}))]
    fn location_type_tag_is_normalised_to_point(#[case] raw: serde_json::Value) {
        let dto: LocationDto = serde_json::from_value(raw).expect("shape");
        let point = GeoPoint::try_from(dto).expect("coordinates are valid");
        assert_eq!(
            serde_json::to_value(LocationDto::from(point)).expect("serialise"),
            json!({"type": "Point", "coordinates": [3.0, 4.0]})
        );
    }

    #[rstest]
    fn update_body_ignores_location_and_parses_owner() {
        let owner = UserId::random();
        let body: UpdateCatRequest = serde_json::from_value(json!({
            "owner": owner.to_string(),
            "location": {"type": "Point", "coordinates": [1.0, 2.0]},
        }))
        .expect("body");

        let changes = CatChanges::try_from(body).expect("changes");
        assert_eq!(changes.owner, Some(owner));
        assert_eq!(changes.location, None);
        assert_eq!(changes.name, None);
    }

    #[rstest]
    fn update_body_rejects_malformed_owner() {
        let body = UpdateCatRequest {
            owner: Some("not-a-uuid".into()),
            ..UpdateCatRequest::default()
        };
        let err = CatChanges::try_from(body).expect_err("owner");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn create_body_rejects_negative_weight() {
        let body = CreateCatRequest {
            cat_name: "Miso".into(),
            weight: -1.0,
            birthdate: NaiveDate::from_ymd_opt(2020, 5, 17).expect("date"),
            location: None,
        };
        let err = CatDraft::try_from(body).expect_err("weight");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
