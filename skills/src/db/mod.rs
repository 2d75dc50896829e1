// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Database abstraction to manipulate the skills records.
//!
//! Every entity has its own submodule with free functions that take an `Executor`.  Statements are
//! written once with `$n` placeholders, which both backends accept, and list queries are built
//! from the conditions in the entity's filter.

use skills_core::db::{postgres, sqlite, DbError, DbResult, Executor};

/// Implements `FromDbRow` for a type by running the same decoding `$body` on every backend.
///
/// The body sees the raw row as `$row`, with `sqlx::Row` in scope, and can convert column errors
/// with `map_sqlx_error`.
macro_rules! impl_from_db_row [
    ( $t:ty, |$row:ident| $body:block ) => {
        impl skills_core::db::FromDbRow for $t {
            fn from_pg_row($row: sqlx::postgres::PgRow) -> DbResult<Self> {
                use skills_core::db::postgres::map_sqlx_error;
                use sqlx::Row;
                $body
            }

            fn from_sqlite_row($row: sqlx::sqlite::SqliteRow) -> DbResult<Self> {
                use skills_core::db::sqlite::map_sqlx_error;
                use sqlx::Row;
                $body
            }
        }
    }
];

mod articles;
pub(crate) use articles::*;
mod assessments;
pub(crate) use assessments::*;
mod categories;
pub(crate) use categories::*;
mod departments;
pub(crate) use departments::*;
mod employees;
pub(crate) use employees::*;
mod results;
pub(crate) use results::*;
mod skills;
pub(crate) use skills::*;

/// Initializes the database schema.
///
/// The schema is idempotent so this can be called every time the service starts.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,
    }
}

/// The identifier of a freshly inserted row, as returned by `INSERT ... RETURNING id`.
struct InsertedId(i64);

impl_from_db_row!(InsertedId, |row| {
    Ok(InsertedId(row.try_get("id").map_err(map_sqlx_error)?))
});

/// Checks that a statement that targets a single row by id affected exactly one row.
fn expect_one_row(rows_affected: u64) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        n => Err(DbError::BackendError(format!("Statement affected {} rows instead of 1", n))),
    }
}
