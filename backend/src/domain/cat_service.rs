//! Cat domain service.
//!
//! Implements the cat driving ports on top of the cat and user repositories.
//! Every mutation passes through [`authorize`] or [`require_principal`]
//! before the repository is touched, and performs at most one mutating
//! repository call.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{
    CatFilter, CatPersistenceError, CatRepository, CatsCommand, CatsQuery, CreateCatRequest,
    DeleteCatRequest, UpdateCatRequest, UserRepository,
};
use crate::domain::user_service::map_user_persistence_error;
use crate::domain::{
    BoundingBox, Cat, CatAction, CatId, CatView, Error, OwnerRef, Principal, Scope, UserId,
    UserView, authorize, require_principal,
};

const CAT_NOT_FOUND: &str = "Cat not found";

/// Cat service implementing [`CatsQuery`] and [`CatsCommand`].
#[derive(Clone)]
pub struct CatService<C, U> {
    cats: Arc<C>,
    users: Arc<U>,
}

impl<C, U> CatService<C, U> {
    /// Create a new service with the given repositories.
    pub fn new(cats: Arc<C>, users: Arc<U>) -> Self {
        Self { cats, users }
    }
}

pub(crate) fn map_cat_persistence_error(err: CatPersistenceError) -> Error {
    match err {
        CatPersistenceError::Connection { message } => {
            error!(%message, "cat repository unavailable");
            Error::service_unavailable("Cat store unavailable")
                .with_details(json!({ "reason": message }))
        }
        CatPersistenceError::Query { message } => {
            error!(%message, "cat repository query failed");
            Error::internal(format!("cat repository error: {message}"))
        }
    }
}

impl<C, U> CatService<C, U>
where
    C: CatRepository,
    U: UserRepository,
{
    /// Replace owner ids with the restricted projection of each owner.
    ///
    /// Owners that no longer exist keep their bare id.
    async fn resolve_owners(&self, cats: Vec<Cat>) -> Result<Vec<CatView>, Error> {
        if cats.is_empty() {
            return Ok(Vec::new());
        }
        let owner_ids: Vec<UserId> = cats
            .iter()
            .map(|cat| cat.owner)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let owners: HashMap<UserId, UserView> = self
            .users
            .find_by_ids(&owner_ids)
            .await
            .map_err(map_user_persistence_error)?
            .into_iter()
            .map(|user| (*user.id(), user.view()))
            .collect();

        Ok(cats
            .into_iter()
            .map(|cat| {
                let owner = owners
                    .get(&cat.owner)
                    .map_or(OwnerRef::Id(cat.owner), |view| OwnerRef::Resolved(view.clone()));
                CatView { cat, owner }
            })
            .collect())
    }

    async fn find(&self, filter: &CatFilter) -> Result<Vec<Cat>, Error> {
        self.cats.find(filter).await.map_err(map_cat_persistence_error)
    }
}

#[async_trait]
impl<C, U> CatsQuery for CatService<C, U>
where
    C: CatRepository,
    U: UserRepository,
{
    async fn get(&self, id: &CatId) -> Result<CatView, Error> {
        let cat = self
            .cats
            .find_by_id(id)
            .await
            .map_err(map_cat_persistence_error)?
            .ok_or_else(|| Error::not_found(CAT_NOT_FOUND))?;
        self.resolve_owners(vec![cat])
            .await?
            .pop()
            .ok_or_else(|| Error::internal("resolved cat view went missing"))
    }

    async fn list(&self) -> Result<Vec<CatView>, Error> {
        let cats = self.find(&CatFilter::All).await?;
        self.resolve_owners(cats).await
    }

    async fn list_by_owner(&self, principal: Option<Principal>) -> Result<Vec<CatView>, Error> {
        let principal = require_principal(principal.as_ref())?;
        let cats = self.find(&CatFilter::OwnedBy(principal.id)).await?;
        self.resolve_owners(cats).await
    }

    async fn list_within(&self, area: BoundingBox) -> Result<Vec<Cat>, Error> {
        self.find(&CatFilter::WithinBox(area)).await
    }
}

#[async_trait]
impl<C, U> CatsCommand for CatService<C, U>
where
    C: CatRepository,
    U: UserRepository,
{
    async fn create(&self, request: CreateCatRequest) -> Result<Cat, Error> {
        let CreateCatRequest {
            principal,
            draft,
            request_location,
        } = request;
        let principal = require_principal(principal.as_ref())?;
        let cat = Cat {
            id: CatId::random(),
            name: draft.name,
            weight: draft.weight,
            birthdate: draft.birthdate,
            owner: principal.id,
            location: draft.location.unwrap_or(request_location),
        };
        self.cats
            .create(&cat)
            .await
            .map_err(map_cat_persistence_error)?;
        info!(cat_id = %cat.id, owner = %cat.owner, "cat created");
        Ok(cat)
    }

    async fn update(&self, request: UpdateCatRequest) -> Result<Cat, Error> {
        let UpdateCatRequest {
            principal,
            access,
            id,
            mut changes,
            request_location,
        } = request;
        // Updates are never owner-scoped: the owner path checks the echoed
        // owner instead of the stored one.
        authorize(
            principal.as_ref(),
            CatAction::Update {
                access,
                asserted_owner: changes.owner.as_ref(),
            },
        )?;
        changes.location = Some(request_location);
        let cat = self
            .cats
            .find_by_id_and_update(&id, &changes)
            .await
            .map_err(map_cat_persistence_error)?
            .ok_or_else(|| Error::not_found(CAT_NOT_FOUND))?;
        info!(cat_id = %cat.id, ?access, "cat updated");
        Ok(cat)
    }

    async fn delete(&self, request: DeleteCatRequest) -> Result<Cat, Error> {
        let DeleteCatRequest {
            principal,
            access,
            id,
        } = request;
        let scope = authorize(principal.as_ref(), CatAction::Delete { access })?;
        let removed = match scope {
            Scope::Any => self.cats.find_by_id_and_delete(&id).await,
            Scope::OwnedBy(owner) => self.cats.find_one_and_delete(&id, &owner).await,
        };
        let cat = removed
            .map_err(map_cat_persistence_error)?
            .ok_or_else(|| Error::not_found(CAT_NOT_FOUND))?;
        info!(cat_id = %cat.id, ?access, "cat deleted");
        Ok(cat)
    }
}

#[cfg(test)]
#[path = "cat_service_tests.rs"]
mod tests;
