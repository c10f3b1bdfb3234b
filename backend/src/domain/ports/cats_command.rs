//! Driving port for cat mutations.
//!
//! Each request carries the optional principal resolved by the inbound
//! adapter and the request coordinates; the service decides access and where
//! the cat ends up.

use async_trait::async_trait;

use crate::domain::{Access, Cat, CatChanges, CatDraft, CatId, Error, GeoPoint, Principal};

/// Request to create a cat owned by the principal.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateCatRequest {
    pub principal: Option<Principal>,
    pub draft: CatDraft,
    /// Used when the draft carries no location.
    pub request_location: GeoPoint,
}

/// Request to update a cat through the owner or admin entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCatRequest {
    pub principal: Option<Principal>,
    pub access: Access,
    pub id: CatId,
    pub changes: CatChanges,
    /// Overwrites the stored location.
    pub request_location: GeoPoint,
}

/// Request to delete a cat through the owner or admin entry point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteCatRequest {
    pub principal: Option<Principal>,
    pub access: Access,
    pub id: CatId,
}

/// Domain use-case port for changing cats.
///
/// Mutations return the stored record with the owner as a bare id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatsCommand: Send + Sync {
    /// Create a cat owned by the requesting principal.
    async fn create(&self, request: CreateCatRequest) -> Result<Cat, Error>;

    /// Update a cat after an access check.
    async fn update(&self, request: UpdateCatRequest) -> Result<Cat, Error>;

    /// Delete a cat after an access check, returning the removed record.
    async fn delete(&self, request: DeleteCatRequest) -> Result<Cat, Error>;
}
