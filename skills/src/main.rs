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

//! Entry point to the skills service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use log::info;
use skills::db::init_schema;
use skills::serve;
use skills_core::db::postgres::{PostgresDb, PostgresOptions};
use skills_core::db::{sqlite, Db};
use skills_core::env::{get_optional_var, get_required_var};
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

/// Prefix of the environment variables that configure the service.
const ENV_PREFIX: &str = "SKILLS";

/// Prefix of the environment variables that configure the PostgreSQL connection.
const PGSQL_ENV_PREFIX: &str = "SKILLS_PGSQL";

/// Port to listen on when none is configured.
const DEFAULT_PORT: u16 = 3000;

/// Database to persist the data in.
#[derive(Debug)]
enum Backend {
    /// A PostgreSQL server.
    Postgres(PostgresOptions),

    /// A SQLite database at the given path, which can be `:memory:`.
    Sqlite(String),
}

/// Configuration of the service.
#[derive(Debug)]
struct Config {
    /// Address to listen on.
    bind_addr: SocketAddr,

    /// Database to use.
    backend: Backend,
}

impl Config {
    /// Gathers the configuration from environment variables.
    fn from_env() -> Result<Self, String> {
        let address = get_optional_var::<IpAddr>(ENV_PREFIX, "ADDRESS")?
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let port = get_optional_var::<u16>(ENV_PREFIX, "PORT")?.unwrap_or(DEFAULT_PORT);

        let backend = match get_optional_var::<String>(ENV_PREFIX, "DB_BACKEND")?.as_deref() {
            None | Some("postgres") => {
                Backend::Postgres(PostgresOptions::from_env(PGSQL_ENV_PREFIX)?)
            }
            Some("sqlite") => {
                Backend::Sqlite(get_required_var::<String>(ENV_PREFIX, "SQLITE_PATH")?)
            }
            Some(other) => {
                return Err(format!(
                    "Invalid database backend '{}' in {}_DB_BACKEND; must be postgres or sqlite",
                    other, ENV_PREFIX
                ))
            }
        };

        Ok(Self { bind_addr: SocketAddr::new(address, port), backend })
    }
}

/// Opens the database described by `backend`.
async fn connect(backend: Backend) -> Result<Arc<dyn Db + Send + Sync>, Box<dyn Error>> {
    let db: Arc<dyn Db + Send + Sync> = match backend {
        Backend::Postgres(opts) => {
            info!("Using PostgreSQL database {} at {}:{}", opts.database, opts.host, opts.port);
            Arc::new(PostgresDb::connect(opts)?)
        }
        Backend::Sqlite(path) => {
            info!("Using SQLite database {}", path);
            Arc::new(sqlite::connect(&path).await?)
        }
    };
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = Config::from_env()?;
    let db = connect(config.backend).await?;
    init_schema(&mut db.ex().await?).await?;

    serve(config.bind_addr, db).await
}
