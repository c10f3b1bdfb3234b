//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions back into domain types
//! re-validate every column.

use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Cat, CatChanges, CatId, CatName, Email, GeoPoint, PasswordHash, Role, User, UserChanges,
    UserId, UserName, Weight,
};

use super::schema::{cats, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub user_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let user_name = UserName::new(&row.user_name).map_err(|err| err.to_string())?;
        let email = Email::new(&row.email).map_err(|err| err.to_string())?;
        let role = row.role.parse::<Role>().map_err(|err| err.to_string())?;
        Ok(User::new(
            UserId::from_uuid(row.id),
            user_name,
            email,
            PasswordHash::from_encoded(row.password_hash),
            role,
        ))
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub user_name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            user_name: user.user_name().as_ref(),
            email: user.email().as_ref(),
            password_hash: user.password_hash().as_encoded(),
            role: user.role().as_str(),
        }
    }
}

/// Partial changeset for user records; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub user_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: Option<&'a str>,
}

impl UserUpdate<'_> {
    /// Whether the changeset would update no column at all.
    pub fn is_empty(&self) -> bool {
        self.user_name.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

impl<'a> From<&'a UserChanges> for UserUpdate<'a> {
    fn from(changes: &'a UserChanges) -> Self {
        Self {
            user_name: changes.user_name.as_ref().map(AsRef::as_ref),
            email: changes.email.as_ref().map(AsRef::as_ref),
            password_hash: changes.password_hash.as_ref().map(PasswordHash::as_encoded),
        }
    }
}

/// Row struct for reading from the cats table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cats)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CatRow {
    pub id: Uuid,
    pub cat_name: String,
    pub weight: f64,
    pub birthdate: NaiveDate,
    pub owner_id: Uuid,
    pub lng: f64,
    pub lat: f64,
}

impl TryFrom<CatRow> for Cat {
    type Error = String;

    fn try_from(row: CatRow) -> Result<Self, Self::Error> {
        Ok(Cat {
            id: CatId::from_uuid(row.id),
            name: CatName::new(&row.cat_name).map_err(|err| err.to_string())?,
            weight: Weight::new(row.weight).map_err(|err| err.to_string())?,
            birthdate: row.birthdate,
            owner: UserId::from_uuid(row.owner_id),
            location: GeoPoint::new(row.lng, row.lat).map_err(|err| err.to_string())?,
        })
    }
}

/// Insertable struct for creating new cat records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cats)]
pub(crate) struct NewCatRow<'a> {
    pub id: Uuid,
    pub cat_name: &'a str,
    pub weight: f64,
    pub birthdate: NaiveDate,
    pub owner_id: Uuid,
    pub lng: f64,
    pub lat: f64,
}

impl<'a> From<&'a Cat> for NewCatRow<'a> {
    fn from(cat: &'a Cat) -> Self {
        Self {
            id: *cat.id.as_uuid(),
            cat_name: cat.name.as_ref(),
            weight: cat.weight.kilograms(),
            birthdate: cat.birthdate,
            owner_id: *cat.owner.as_uuid(),
            lng: cat.location.lng(),
            lat: cat.location.lat(),
        }
    }
}

/// Partial changeset for cat records; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = cats)]
pub(crate) struct CatUpdate<'a> {
    pub cat_name: Option<&'a str>,
    pub weight: Option<f64>,
    pub birthdate: Option<NaiveDate>,
    pub owner_id: Option<Uuid>,
    pub lng: Option<f64>,
    pub lat: Option<f64>,
}

impl CatUpdate<'_> {
    /// Whether the changeset would update no column at all.
    pub fn is_empty(&self) -> bool {
        self.cat_name.is_none()
            && self.weight.is_none()
            && self.birthdate.is_none()
            && self.owner_id.is_none()
            && self.lng.is_none()
    }
}

impl<'a> From<&'a CatChanges> for CatUpdate<'a> {
    fn from(changes: &'a CatChanges) -> Self {
        Self {
            cat_name: changes.name.as_ref().map(AsRef::as_ref),
            weight: changes.weight.map(Weight::kilograms),
            birthdate: changes.birthdate,
            owner_id: changes.owner.map(|owner| *owner.as_uuid()),
            lng: changes.location.map(|point| point.lng()),
            lat: changes.location.map(|point| point.lat()),
        }
    }
}
