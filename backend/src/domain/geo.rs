//! Geographic points and axis-aligned bounding boxes in lng/lat space.
//!
//! Coordinates are always ordered `[lng, lat]`, matching GeoJSON. A
//! [`BoundingBox`] keeps its corners as `[bottom_left, top_right]` and its
//! containment test is inclusive of the boundary.

use std::fmt;

/// GeoJSON geometry tag used for every stored location.
pub const POINT_TYPE: &str = "Point";

/// Errors raised while building or parsing geographic values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    #[error("coordinates must be two comma-separated numbers in lng,lat order")]
    Malformed,
    #[error("coordinates must be finite numbers")]
    NotFinite,
    #[error("longitude must be between -180 and 180, got {lng}")]
    LongitudeOutOfRange { lng: f64 },
    #[error("latitude must be between -90 and 90, got {lat}")]
    LatitudeOutOfRange { lat: f64 },
}

/// A validated point in lng/lat space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lng: f64,
    lat: f64,
}

impl GeoPoint {
    /// Validate and build a point.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::GeoPoint;
    ///
    /// let point = GeoPoint::new(24.94, 60.17).expect("valid point");
    /// assert_eq!(point.coordinates(), [24.94, 60.17]);
    /// assert!(GeoPoint::new(200.0, 0.0).is_err());
    /// ```
    pub fn new(lng: f64, lat: f64) -> Result<Self, GeoError> {
        if !lng.is_finite() || !lat.is_finite() {
            return Err(GeoError::NotFinite);
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(GeoError::LongitudeOutOfRange { lng });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::LatitudeOutOfRange { lat });
        }
        Ok(Self { lng, lat })
    }

    /// Parse a `"lng,lat"` pair such as `"24.94,60.17"`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::GeoPoint;
    ///
    /// let point = GeoPoint::parse_pair(" 10, 20 ").expect("valid pair");
    /// assert_eq!(point.lng(), 10.0);
    /// assert!(GeoPoint::parse_pair("10").is_err());
    /// assert!(GeoPoint::parse_pair("ten,20").is_err());
    /// ```
    pub fn parse_pair(raw: &str) -> Result<Self, GeoError> {
        let mut parts = raw.split(',');
        let (Some(lng), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(GeoError::Malformed);
        };
        let lng: f64 = lng.trim().parse().map_err(|_| GeoError::Malformed)?;
        let lat: f64 = lat.trim().parse().map_err(|_| GeoError::Malformed)?;
        Self::new(lng, lat)
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// GeoJSON coordinate array `[lng, lat]`.
    pub fn coordinates(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lng, self.lat)
    }
}

/// Axis-aligned rectangle defined by its bottom-left and top-right corners.
///
/// Corners are not reordered: a box whose bottom-left lies above or right of
/// its top-right contains nothing, the same as the store's box operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    bottom_left: GeoPoint,
    top_right: GeoPoint,
}

impl BoundingBox {
    /// Build a box from its two corners.
    pub fn new(bottom_left: GeoPoint, top_right: GeoPoint) -> Self {
        Self {
            bottom_left,
            top_right,
        }
    }

    /// Lower-left corner.
    pub fn bottom_left(&self) -> GeoPoint {
        self.bottom_left
    }

    /// Upper-right corner.
    pub fn top_right(&self) -> GeoPoint {
        self.top_right
    }

    /// Corners in predicate order: `[bottom_left, top_right]`.
    pub fn corners(&self) -> [GeoPoint; 2] {
        [self.bottom_left, self.top_right]
    }

    /// Whether `point` lies inside the box, boundary included.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{BoundingBox, GeoPoint};
    ///
    /// let area = BoundingBox::new(
    ///     GeoPoint::new(0.0, 0.0).unwrap(),
    ///     GeoPoint::new(10.0, 10.0).unwrap(),
    /// );
    /// assert!(area.contains(&GeoPoint::new(0.0, 0.0).unwrap()));
    /// assert!(!area.contains(&GeoPoint::new(15.0, 15.0).unwrap()));
    /// ```
    pub fn contains(&self, point: &GeoPoint) -> bool {
        let [bottom_left, top_right] = self.corners();
        point.lng >= bottom_left.lng
            && point.lng <= top_right.lng
            && point.lat >= bottom_left.lat
            && point.lat <= top_right.lat
    }
}
