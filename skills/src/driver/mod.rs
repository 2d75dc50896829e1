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

//! Business logic for the service.

use skills_core::db::{Db, DbError};
use skills_core::driver::{DriverError, DriverResult};
use std::fmt;
use std::sync::Arc;

mod articles;
mod assessments;
mod categories;
mod departments;
mod employees;
mod results;
mod skills;
#[cfg(test)]
mod testutils;
mod views;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>) -> Self {
        Self { db }
    }
}

/// Returns a function that turns the `NotFound` error raised when looking up the entity `id`
/// referenced by `field` into a validation error for that field.
fn invalid_reference<I: fmt::Display>(
    field: &'static str,
    id: I,
) -> impl FnOnce(DbError) -> DriverError {
    move |e| match e {
        DbError::NotFound => DriverError::InvalidInput(format!(
            "{}: Invalid pk \"{}\" - object does not exist.",
            field, id
        )),
        e => e.into(),
    }
}

/// Fails the deletion of the `entity` identified by `id` if `count` rows of `referrers` still
/// point to it.
fn ensure_unreferenced<I: fmt::Display>(
    entity: &str,
    id: I,
    referrers: &str,
    count: u64,
) -> DriverResult<()> {
    if count > 0 {
        return Err(DriverError::InvalidInput(format!(
            "Cannot delete {} {} because it is referenced by {} ({})",
            entity, id, referrers, count
        )));
    }
    Ok(())
}
