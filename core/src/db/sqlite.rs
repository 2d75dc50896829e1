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

//! Common utilities to interact with an SQLite database.

use crate::db::{Db, DbError, DbResult, Executor, TxExecutor};
use async_trait::async_trait;
use log::warn;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqliteConnection, SqlitePool, SqlitePoolOptions};
use sqlx::Transaction;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// Takes a raw SQLx error `e` and converts it to our generic error type.
pub fn map_sqlx_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::ColumnDecode { source, .. } => DbError::DataIntegrityError(source.to_string()),
        sqlx::Error::RowNotFound => DbError::NotFound,
        sqlx::Error::PoolTimedOut => DbError::Unavailable,
        e if e.to_string().contains("FOREIGN KEY constraint failed") => {
            DbError::ForeignKeyViolation
        }
        e if e.to_string().contains("UNIQUE constraint failed") => DbError::AlreadyExists,
        e => DbError::BackendError(e.to_string()),
    }
}

/// Opens the database described by `conn_str`, creating it if it does not exist yet.
///
/// `conn_str` can be a path to a file or `:memory:` for a private in-memory database that is
/// shared by all connections in the pool.
pub async fn connect(conn_str: &str) -> DbResult<SqliteDb> {
    let options = SqliteConnectOptions::from_str(conn_str)
        .map_err(map_sqlx_error)?
        .create_if_missing(true)
        .foreign_keys(true);
    // In-memory databases vanish when their last connection closes, so never let the pool reap
    // idle connections.
    let pool = SqlitePoolOptions::new()
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(map_sqlx_error)?;
    Ok(SqliteDb { pool })
}

/// A generic database executor implementation for SQLite.
#[derive(Debug)]
pub enum SqliteExecutor {
    /// An executor backed by a pool.  Operations issued via this executor aren't guaranteed to
    /// happen on the same connection.
    PoolExec(PoolConnection<Sqlite>),

    /// An executor backed by a transaction.
    TxExec(Transaction<'static, Sqlite>),
}

impl SqliteExecutor {
    /// Commits the transaction if this executor is backed by one.
    ///
    /// Calling this on a non-transaction-based executor results in a panic.
    pub(super) async fn commit(self) -> DbResult<()> {
        match self {
            SqliteExecutor::PoolExec(_) => unreachable!("Do not call commit on direct executors"),
            SqliteExecutor::TxExec(tx) => tx.commit().await.map_err(map_sqlx_error),
        }
    }
}

impl Deref for SqliteExecutor {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        match self {
            SqliteExecutor::PoolExec(conn) => &**conn,
            SqliteExecutor::TxExec(tx) => &**tx,
        }
    }
}

impl DerefMut for SqliteExecutor {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            SqliteExecutor::PoolExec(conn) => &mut **conn,
            SqliteExecutor::TxExec(tx) => &mut **tx,
        }
    }
}

/// A database instance backed by an SQLite database.
pub struct SqliteDb {
    /// Shared SQLite connection pool.  This is a cloneable type that all concurrent
    /// transactions can use concurrently.
    pool: SqlitePool,
}

impl SqliteDb {
    /// Returns an executor of the specific type used by this database.
    pub async fn typed_ex(&self) -> DbResult<SqliteExecutor> {
        let conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        Ok(SqliteExecutor::PoolExec(conn))
    }
}

impl Drop for SqliteDb {
    fn drop(&mut self) {
        if !self.pool.is_closed() {
            warn!("Dropping connection without having called close() first");
        }
    }
}

#[async_trait]
impl Db for SqliteDb {
    async fn ex(&self) -> DbResult<Executor> {
        let ex = self.typed_ex().await?;
        Ok(Executor::Sqlite(ex))
    }

    async fn begin(&self) -> DbResult<TxExecutor> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(TxExecutor(Executor::Sqlite(SqliteExecutor::TxExec(tx))))
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Helper function to initialize the database with a schema.
pub async fn run_schema(e: &mut SqliteExecutor, schema: &str) -> DbResult<()> {
    sqlx::raw_sql(schema).execute(&mut **e).await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Test utilities for the SQLite connection.
#[cfg(any(feature = "testutils", test))]
pub mod testutils {
    use super::*;

    /// Initializes the test database.
    pub async fn setup() -> SqliteDb {
        let _can_fail = env_logger::builder().is_test(true).try_init();
        connect(":memory:").await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use crate::db::tests::generate_db_rw_tests;
    use std::sync::Arc;

    generate_db_rw_tests!({
        let db: Arc<dyn Db + Send + Sync> = Arc::from(setup().await);
        db
    });

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = setup().await;
        let mut ex = db.typed_ex().await.unwrap();
        run_schema(
            &mut ex,
            "CREATE TABLE parents (id INTEGER PRIMARY KEY);
            CREATE TABLE children (parent_id INTEGER NOT NULL REFERENCES parents (id));",
        )
        .await
        .unwrap();

        let err = sqlx::query("INSERT INTO children (parent_id) VALUES (5)")
            .execute(&mut *ex)
            .await
            .map_err(map_sqlx_error)
            .unwrap_err();
        assert_eq!(DbError::ForeignKeyViolation, err);

        drop(ex);
        db.close().await;
    }

    #[tokio::test]
    async fn test_in_memory_shared_across_connections() {
        let db = setup().await;
        run_schema(&mut db.typed_ex().await.unwrap(), "CREATE TABLE t (i INTEGER);").await.unwrap();

        let mut tx = db.begin().await.unwrap();
        match tx.ex() {
            Executor::Sqlite(ex) => {
                sqlx::query("INSERT INTO t (i) VALUES (1)").execute(&mut **ex).await.unwrap();
            }
            #[allow(unreachable_patterns)]
            _ => unreachable!(),
        }
        tx.commit().await.unwrap();

        let mut ex = db.typed_ex().await.unwrap();
        let rows = sqlx::query("SELECT i FROM t").fetch_all(&mut *ex).await.unwrap();
        assert_eq!(1, rows.len());

        drop(ex);
        db.close().await;
    }
}
