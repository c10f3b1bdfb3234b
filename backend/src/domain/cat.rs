//! Cat records.
//!
//! A [`Cat`] references its owner by [`UserId`]; the reference is a lookup
//! relation only and does not tie the user's lifecycle to the cat.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{GeoPoint, UserId, UserView};

/// Maximum accepted length for a cat name.
pub const CAT_NAME_MAX: usize = 100;

/// Validation errors returned by the cat value constructors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatValidationError {
    #[error("cat id must be a valid UUID")]
    InvalidId,
    #[error("cat name must not be empty")]
    EmptyName,
    #[error("cat name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("weight must be a finite, non-negative number")]
    InvalidWeight,
}

/// Stable cat identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CatId(Uuid);

impl CatId {
    /// Validate and construct a [`CatId`].
    pub fn new(id: impl AsRef<str>) -> Result<Self, CatValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| CatValidationError::InvalidId)
    }

    /// Generate a new random [`CatId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CatId> for String {
    fn from(value: CatId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for CatId {
    type Error = CatValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display name of a cat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatName(String);

impl CatName {
    /// Validate and construct a [`CatName`]; surrounding whitespace is trimmed.
    pub fn new(name: impl AsRef<str>) -> Result<Self, CatValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CatValidationError::EmptyName);
        }
        if trimmed.chars().count() > CAT_NAME_MAX {
            return Err(CatValidationError::NameTooLong { max: CAT_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for CatName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Body weight in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weight(f64);

impl Weight {
    /// Validate and construct a [`Weight`].
    pub fn new(kilograms: f64) -> Result<Self, CatValidationError> {
        if !kilograms.is_finite() || kilograms < 0.0 {
            return Err(CatValidationError::InvalidWeight);
        }
        Ok(Self(kilograms))
    }

    /// Weight in kilograms.
    pub fn kilograms(self) -> f64 {
        self.0
    }
}

/// Stored cat record.
#[derive(Debug, Clone, PartialEq)]
pub struct Cat {
    pub id: CatId,
    pub name: CatName,
    pub weight: Weight,
    pub birthdate: NaiveDate,
    pub owner: UserId,
    pub location: GeoPoint,
}

impl Cat {
    /// Apply a changeset, keeping fields the changeset leaves untouched.
    pub fn apply(&mut self, changes: &CatChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(weight) = changes.weight {
            self.weight = weight;
        }
        if let Some(birthdate) = changes.birthdate {
            self.birthdate = birthdate;
        }
        if let Some(owner) = changes.owner {
            self.owner = owner;
        }
        if let Some(location) = changes.location {
            self.location = location;
        }
    }
}

/// Caller-supplied fields for a new cat.
///
/// There is no owner field: the creating principal always becomes the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct CatDraft {
    pub name: CatName,
    pub weight: Weight,
    pub birthdate: NaiveDate,
    pub location: Option<GeoPoint>,
}

/// Partial update for a cat.
///
/// `owner` doubles as the ownership assertion checked on the owner update
/// path; on the admin path it reassigns the cat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatChanges {
    pub name: Option<CatName>,
    pub weight: Option<Weight>,
    pub birthdate: Option<NaiveDate>,
    pub owner: Option<UserId>,
    pub location: Option<GeoPoint>,
}

/// Owner reference as shown in a cat view.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnerRef {
    /// Owner resolved to the restricted user projection.
    Resolved(UserView),
    /// Raw owner id, either unresolved on purpose or no longer present.
    Id(UserId),
}

/// A cat paired with its owner reference for display.
#[derive(Debug, Clone, PartialEq)]
pub struct CatView {
    pub cat: Cat,
    pub owner: OwnerRef,
}

impl CatView {
    /// View that shows the owner as a bare id.
    pub fn unresolved(cat: Cat) -> Self {
        let owner = OwnerRef::Id(cat.owner);
        Self { cat, owner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_cat() -> Cat {
        Cat {
            id: CatId::random(),
            name: CatName::new("Miso").expect("name"),
            weight: Weight::new(4.2).expect("weight"),
            birthdate: NaiveDate::from_ymd_opt(2020, 5, 17).expect("date"),
            owner: UserId::random(),
            location: GeoPoint::new(24.9, 60.1).expect("point"),
        }
    }

    #[rstest]
    #[case(-0.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn weight_rejects_invalid_values(#[case] raw: f64) {
        assert_eq!(Weight::new(raw).expect_err("invalid"), CatValidationError::InvalidWeight);
    }

    #[rstest]
    #[case("  ", CatValidationError::EmptyName)]
    #[case(&"m".repeat(CAT_NAME_MAX + 1), CatValidationError::NameTooLong { max: CAT_NAME_MAX })]
    fn name_rejects_invalid_values(#[case] raw: &str, #[case] expected: CatValidationError) {
        assert_eq!(CatName::new(raw).expect_err("invalid"), expected);
    }

    #[rstest]
    fn id_rejects_non_uuid() {
        assert_eq!(CatId::new("42").expect_err("invalid"), CatValidationError::InvalidId);
    }

    #[rstest]
    fn apply_overwrites_only_present_fields() {
        let mut cat = sample_cat();
        let before = cat.clone();
        let new_owner = UserId::random();
        cat.apply(&CatChanges {
            owner: Some(new_owner),
            location: Some(GeoPoint::new(1.0, 2.0).expect("point")),
            ..CatChanges::default()
        });
        assert_eq!(cat.owner, new_owner);
        assert_eq!(cat.location.coordinates(), [1.0, 2.0]);
        assert_eq!(cat.name, before.name);
        assert_eq!(cat.weight, before.weight);
        assert_eq!(cat.birthdate, before.birthdate);
    }

    #[rstest]
    fn unresolved_view_shows_owner_id() {
        let cat = sample_cat();
        let owner = cat.owner;
        assert_eq!(CatView::unresolved(cat).owner, OwnerRef::Id(owner));
    }
}
