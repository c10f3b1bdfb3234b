//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` carries a unique index.
    users (id) {
        id -> Uuid,
        user_name -> Varchar,
        email -> Varchar,
        /// Encoded one-way hash; never selected into a view.
        password_hash -> Text,
        /// `user` or `admin`.
        role -> Varchar,
    }
}

diesel::table! {
    /// Cat records with a point location split into `lng`/`lat` columns.
    cats (id) {
        id -> Uuid,
        cat_name -> Varchar,
        weight -> Float8,
        birthdate -> Date,
        owner_id -> Uuid,
        lng -> Float8,
        lat -> Float8,
    }
}
