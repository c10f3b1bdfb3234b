//! Request coordinates extractor.
//!
//! Handlers that stamp a location on a cat take [`RequestCoordinates`]. The
//! point comes from the `X-Coordinates: lng,lat` header and falls back to the
//! [`DefaultLocation`] registered as app data.

use std::future::{Ready, ready};

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};

use super::validation::{FieldName, parse_coordinates};
use crate::domain::{Error, GeoPoint};

/// Header carrying the caller's position.
pub const COORDINATES_HEADER: &str = "x-coordinates";

const COORDINATES_FIELD: FieldName = FieldName::new("X-Coordinates");

/// Location used when a request carries no coordinates header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultLocation(pub GeoPoint);

/// Position associated with the current request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestCoordinates(pub GeoPoint);

impl RequestCoordinates {
    /// Consume the extractor and return the point.
    pub fn into_inner(self) -> GeoPoint {
        self.0
    }
}

fn extract(req: &HttpRequest) -> Result<RequestCoordinates, Error> {
    if let Some(value) = req.headers().get(COORDINATES_HEADER) {
        let raw = value
            .to_str()
            .map_err(|_| Error::invalid_request("X-Coordinates must be ASCII"))?;
        return parse_coordinates(Some(raw), COORDINATES_FIELD).map(RequestCoordinates);
    }
    req.app_data::<web::Data<DefaultLocation>>()
        .map(|fallback| RequestCoordinates(fallback.0))
        .ok_or_else(|| Error::internal("default location is not configured"))
}

impl FromRequest for RequestCoordinates {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::{fixture, rstest};

    #[fixture]
    fn fallback() -> GeoPoint {
        GeoPoint::new(24.9384, 60.1699).expect("default point")
    }

    #[rstest]
    fn header_wins_over_default(fallback: GeoPoint) {
        let req = TestRequest::default()
            .insert_header(("X-Coordinates", "10.5,20.25"))
            .app_data(web::Data::new(DefaultLocation(fallback)))
            .to_http_request();

        let coords = extract(&req).expect("coordinates");
        assert_eq!(coords.into_inner().coordinates(), [10.5, 20.25]);
    }

    #[rstest]
    fn missing_header_uses_default(fallback: GeoPoint) {
        let req = TestRequest::default()
            .app_data(web::Data::new(DefaultLocation(fallback)))
            .to_http_request();

        assert_eq!(extract(&req).expect("coordinates").0, fallback);
    }

    #[rstest]
    #[case("garbage")]
    #[case("10")]
    #[case("0,95")]
    fn malformed_header_is_bad_request(fallback: GeoPoint, #[case] raw: &str) {
        let req = TestRequest::default()
            .insert_header(("X-Coordinates", raw))
            .app_data(web::Data::new(DefaultLocation(fallback)))
            .to_http_request();

        let err = extract(&req).expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn missing_default_is_internal() {
        let req = TestRequest::default().to_http_request();
        let err = extract(&req).expect_err("no default");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
