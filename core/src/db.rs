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

//! Generic abstraction to access different database systems.
//!
//! The facilities in this module provide an abstraction over different database systems such as
//! PostgreSQL and SQLite.  The PostgreSQL backend is for production use and the SQLite backend is
//! primarily intended to support unit tests and local development.

use crate::model::ModelError;
use async_trait::async_trait;
#[cfg(any(feature = "postgres", feature = "sqlite"))]
use query::{Dialect, Select, Value};
#[cfg(any(feature = "postgres", feature = "sqlite"))]
use sqlx::Row;

#[cfg(feature = "postgres")]
pub mod postgres;
pub mod query;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// Indicates that a request to create an entry failed because it already exists.
    #[error("Already exists")]
    AlreadyExists,

    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// Indicates that a write would leave a reference to a row that does not exist.
    #[error("Reference to a missing or still referenced entity")]
    ForeignKeyViolation,

    /// Indicates that a requested entry does not exist.
    #[error("Entity not found")]
    NotFound,

    /// Indicates that the database is not available (maybe because of too many active concurrent
    /// connections).
    #[error("Unavailable")]
    Unavailable,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// A database executor that can talk to multiple database implementations.
///
/// This type provides a generic mechanism to access a typed instance of a database, which is needed
/// by sqlx to offer type safety guarantees during query compilation.  Users of this type are forced
/// to destructure it and issue different calls for each database.
///
/// Note that this can wrap an executor that talks directly to a pool or to an open transaction.
#[derive(Debug)]
pub enum Executor {
    /// A PostgreSQL executor that can be used in `sqlx` operations.
    #[cfg(feature = "postgres")]
    Postgres(postgres::PostgresExecutor),

    /// A SQLite executor that can be used in `sqlx` operations.
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteExecutor),
}

/// A wrapper for a database executor backed by an open transaction.
#[derive(Debug)]
pub struct TxExecutor(Executor);

impl TxExecutor {
    /// Returns the executor wrapped by this transaction.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    pub fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Commits the transaction.
    pub async fn commit(self) -> DbResult<()> {
        match self.0 {
            #[cfg(feature = "postgres")]
            Executor::Postgres(e) => e.commit().await,

            #[cfg(feature = "sqlite")]
            Executor::Sqlite(e) => e.commit().await,
        }
    }
}

/// Abstraction over the database connection.
#[async_trait]
pub trait Db {
    /// Obtains an executor for direct access to the pool.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    async fn ex(&self) -> DbResult<Executor>;

    /// Begins a transaction.
    ///
    /// It is the responsibility of the caller to call `commit` on the returned executor.  Otherwise
    /// the transaction is rolled back on drop.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes the connection pool and waits for all connections to be returned.
    async fn close(&self);
}

/// Conversion of the raw rows returned by each database backend into typed values.
pub trait FromDbRow: Sized {
    /// Converts a row returned by PostgreSQL.
    #[cfg(feature = "postgres")]
    fn from_pg_row(row: sqlx::postgres::PgRow) -> DbResult<Self>;

    /// Converts a row returned by SQLite.
    #[cfg(feature = "sqlite")]
    fn from_sqlite_row(row: sqlx::sqlite::SqliteRow) -> DbResult<Self>;
}

#[cfg(any(feature = "postgres", feature = "sqlite"))]
impl Executor {
    /// Returns the SQL dialect spoken by the database behind this executor.
    pub fn dialect(&self) -> Dialect {
        match self {
            #[cfg(feature = "postgres")]
            Executor::Postgres(_) => Dialect::Postgres,

            #[cfg(feature = "sqlite")]
            Executor::Sqlite(_) => Dialect::Sqlite,
        }
    }
}

/// Binds all `values` in order to a PostgreSQL `query`.
#[cfg(feature = "postgres")]
fn bind_pg(
    mut query: sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments>,
    values: Vec<Value>,
) -> sqlx::query::Query<'_, sqlx::Postgres, sqlx::postgres::PgArguments> {
    for value in values {
        query = match value {
            Value::Bool(b) => query.bind(b),
            Value::Int(i) => query.bind(i),
            Value::Text(s) => query.bind(s),
        };
    }
    query
}

/// Binds all `values` in order to an SQLite `query`.
#[cfg(feature = "sqlite")]
fn bind_sqlite<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    values: Vec<Value>,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    for value in values {
        query = match value {
            Value::Bool(b) => query.bind(b),
            Value::Int(i) => query.bind(i),
            Value::Text(s) => query.bind(s),
        };
    }
    query
}

/// Runs the `sql` statement with the bound `values` on `ex` and returns all rows it produces.
///
/// Parameters in `sql` must be written as `$1`, `$2`, etc. which all supported backends accept.
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub async fn query_all<T: FromDbRow>(
    ex: &mut Executor,
    sql: &str,
    values: Vec<Value>,
) -> DbResult<Vec<T>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query = bind_pg(sqlx::query::<sqlx::Postgres>(sql), values);
            let rows = query.fetch_all(&mut **ex).await.map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(T::from_pg_row).collect()
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query = bind_sqlite(sqlx::query::<sqlx::Sqlite>(sql), values);
            let rows = query.fetch_all(&mut **ex).await.map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(T::from_sqlite_row).collect()
        }
    }
}

/// Runs the `sql` statement with the bound `values` on `ex` and returns its only row, or
/// `NotFound` if there is none.
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub async fn query_one<T: FromDbRow>(
    ex: &mut Executor,
    sql: &str,
    values: Vec<Value>,
) -> DbResult<T> {
    let mut rows = query_all::<T>(ex, sql, values).await?;
    match rows.len() {
        0 => Err(DbError::NotFound),
        1 => Ok(rows.remove(0)),
        n => Err(DbError::DataIntegrityError(format!("Expected one row but got {}", n))),
    }
}

/// Runs the `sql` statement with the bound `values` on `ex` and returns the number of rows it
/// affected.
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub async fn execute(ex: &mut Executor, sql: &str, values: Vec<Value>) -> DbResult<u64> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query = bind_pg(sqlx::query::<sqlx::Postgres>(sql), values);
            let done = query.execute(&mut **ex).await.map_err(postgres::map_sqlx_error)?;
            Ok(done.rows_affected())
        }

        #[cfg(feature = "sqlite")]
        Executor::Sqlite(ex) => {
            let query = bind_sqlite(sqlx::query::<sqlx::Sqlite>(sql), values);
            let done = query.execute(&mut **ex).await.map_err(sqlite::map_sqlx_error)?;
            Ok(done.rows_affected())
        }
    }
}

/// Runs `select` on `ex` and returns all matching rows.
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub async fn fetch_all<T: FromDbRow>(ex: &mut Executor, select: &Select) -> DbResult<Vec<T>> {
    let (sql, values) = select.render(ex.dialect());
    query_all(ex, &sql, values).await
}

/// Runs `select` on `ex` and returns its only row, or `NotFound` if there is none.
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub async fn fetch_one<T: FromDbRow>(ex: &mut Executor, select: &Select) -> DbResult<T> {
    let (sql, values) = select.render(ex.dialect());
    query_one(ex, &sql, values).await
}

/// A row holding a single `count` column, as returned by `SELECT COUNT(*) AS count`.
#[cfg(any(feature = "postgres", feature = "sqlite"))]
struct Count(i64);

#[cfg(any(feature = "postgres", feature = "sqlite"))]
impl FromDbRow for Count {
    #[cfg(feature = "postgres")]
    fn from_pg_row(row: sqlx::postgres::PgRow) -> DbResult<Self> {
        Ok(Count(row.try_get("count").map_err(postgres::map_sqlx_error)?))
    }

    #[cfg(feature = "sqlite")]
    fn from_sqlite_row(row: sqlx::sqlite::SqliteRow) -> DbResult<Self> {
        Ok(Count(row.try_get("count").map_err(sqlite::map_sqlx_error)?))
    }
}

/// Runs `sql`, which must be of the form `SELECT COUNT(*) AS count ...`, with the bound `values`
/// and returns the count.
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub async fn query_count(ex: &mut Executor, sql: &str, values: Vec<Value>) -> DbResult<u64> {
    let count = query_one::<Count>(ex, sql, values).await?;
    u64::try_from(count.0)
        .map_err(|e| DbError::DataIntegrityError(format!("Invalid row count {}: {}", count.0, e)))
}

/// Runs `select`, which must be of the form `SELECT COUNT(*) AS count ...`, and returns the count.
#[cfg(any(feature = "postgres", feature = "sqlite"))]
pub async fn fetch_count(ex: &mut Executor, select: &Select) -> DbResult<u64> {
    let (sql, values) = select.render(ex.dialect());
    query_count(ex, &sql, values).await
}

/// Macros to help instantiate tests for multiple database systems.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    pub use paste::paste;

    /// Instantiates the `module::name` test for the database configured by `setup`.
    ///
    /// The `extra` metadata parameter can be used to tag the generated tests.
    #[macro_export]
    macro_rules! generate_one_test [
        ( $name:ident, $setup:expr, $module:path $(, #[$extra:meta] )? ) => {
            #[tokio::test]
            $(#[$extra])?
            async fn $name() {
                $crate::db::testutils::paste! {
                    $module :: [< $name >]($setup).await;
                }
            }
        }
    ];

    pub use generate_one_test;

    /// Instantiates a collection of tests for a specific database system.
    ///
    /// The database implementation to run the tests against is determined by the `setup`
    /// expression, which needs to return a database object.  The returned database should also
    /// have been initialized with the desired schema.
    ///
    /// The `extra` metadata parameter can be used to tag the generated tests.
    #[macro_export]
    macro_rules! generate_tests [
        ( #[$extra:meta], $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module, #[$extra]);
            )+
        };

        ( $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module);
            )+
        };
    ];

    pub use generate_tests;
}
