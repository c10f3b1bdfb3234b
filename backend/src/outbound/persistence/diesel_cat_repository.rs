//! PostgreSQL-backed `CatRepository` implementation using Diesel ORM.
//!
//! Every port method is a single SQL statement. Owner-scoped deletes use
//! `DELETE ... WHERE id = $1 AND owner_id = $2 RETURNING *`, so the ownership
//! check and the delete cannot interleave with another request.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatFilter, CatPersistenceError, CatRepository};
use crate::domain::{Cat, CatChanges, CatId, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CatRow, CatUpdate, NewCatRow};
use super::pool::{DbPool, PoolError};
use super::schema::cats;

/// Diesel-backed implementation of the `CatRepository` port.
#[derive(Clone)]
pub struct DieselCatRepository {
    pool: DbPool,
}

impl DieselCatRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CatPersistenceError {
    map_pool_error(error, CatPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CatPersistenceError {
    map_diesel_error(
        error,
        CatPersistenceError::query,
        CatPersistenceError::connection,
    )
}

fn row_to_cat(row: CatRow) -> Result<Cat, CatPersistenceError> {
    let id = row.id;
    Cat::try_from(row)
        .map_err(|reason| CatPersistenceError::query(format!("invalid cat row {id}: {reason}")))
}

fn rows_to_cats(rows: Vec<CatRow>) -> Result<Vec<Cat>, CatPersistenceError> {
    rows.into_iter().map(row_to_cat).collect()
}

#[async_trait]
impl CatRepository for DieselCatRepository {
    async fn find_by_id(&self, id: &CatId) -> Result<Option<Cat>, CatPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CatRow> = cats::table
            .find(*id.as_uuid())
            .select(CatRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_cat).transpose()
    }

    async fn find(&self, filter: &CatFilter) -> Result<Vec<Cat>, CatPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let mut query = cats::table.select(CatRow::as_select()).into_boxed();
        match filter {
            CatFilter::All => {}
            CatFilter::OwnedBy(owner) => {
                query = query.filter(cats::owner_id.eq(*owner.as_uuid()));
            }
            CatFilter::WithinBox(area) => {
                let [bottom_left, top_right] = area.corners();
                query = query
                    .filter(cats::lng.between(bottom_left.lng(), top_right.lng()))
                    .filter(cats::lat.between(bottom_left.lat(), top_right.lat()));
            }
        }

        let rows: Vec<CatRow> = query
            .order((cats::cat_name.asc(), cats::id.asc()))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_cats(rows)
    }

    async fn create(&self, cat: &Cat) -> Result<(), CatPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(cats::table)
            .values(&NewCatRow::from(cat))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn find_by_id_and_update(
        &self,
        id: &CatId,
        changes: &CatChanges,
    ) -> Result<Option<Cat>, CatPersistenceError> {
        let update = CatUpdate::from(changes);
        if update.is_empty() {
            return self.find_by_id(id).await;
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CatRow> = diesel::update(cats::table.find(*id.as_uuid()))
            .set(&update)
            .returning(CatRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_cat).transpose()
    }

    async fn find_one_and_delete(
        &self,
        id: &CatId,
        owner: &UserId,
    ) -> Result<Option<Cat>, CatPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CatRow> = diesel::delete(
            cats::table
                .filter(cats::id.eq(*id.as_uuid()))
                .filter(cats::owner_id.eq(*owner.as_uuid())),
        )
        .returning(CatRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(diesel_error)?;

        row.map(row_to_cat).transpose()
    }

    async fn find_by_id_and_delete(&self, id: &CatId) -> Result<Option<Cat>, CatPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CatRow> = diesel::delete(cats::table.find(*id.as_uuid()))
            .returning(CatRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_cat).transpose()
    }
}
