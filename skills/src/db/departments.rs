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

//! Persistence of departments.

use super::{expect_one_row, InsertedId};
use crate::model::*;
use skills_core::db::query::{Condition, Select};
use skills_core::db::{execute, fetch_all, fetch_one, query_one, DbResult, Executor};

/// Base query to fetch departments.
const SELECT_DEPARTMENTS: &str = "SELECT id, title FROM departments";

impl_from_db_row!(DepartmentRow, |row| {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;

    Ok(DepartmentRow::new(DepartmentId::new(id), DepartmentData::new(Title::new(title)?)))
});

/// Creates a new department with the contents in `data` and returns its identifier.
pub(crate) async fn create_department(
    ex: &mut Executor,
    data: &DepartmentData,
) -> DbResult<DepartmentId> {
    let id: InsertedId = query_one(
        ex,
        "INSERT INTO departments (title) VALUES ($1) RETURNING id",
        vec![data.title().as_str().into()],
    )
    .await?;
    Ok(DepartmentId::new(id.0))
}

/// Gets the department identified by `id`.
pub(crate) async fn get_department(ex: &mut Executor, id: DepartmentId) -> DbResult<DepartmentRow> {
    let select = Select::new(SELECT_DEPARTMENTS).and(Condition::equal("id", id.as_i64()));
    fetch_one(ex, &select).await
}

/// Gets all departments that match `filter`, sorted by identifier.
pub(crate) async fn list_departments(
    ex: &mut Executor,
    filter: &DepartmentFilter,
) -> DbResult<Vec<DepartmentRow>> {
    let mut select = Select::new(SELECT_DEPARTMENTS);
    if let Some(search) = filter.search.as_deref() {
        let terms = search_terms(search).map(|term| Condition::contains("title", term));
        select = select.and_all(terms);
    }
    fetch_all(ex, &select.order_by("id")).await
}

/// Replaces the contents of the department identified by `id` with `data`.
pub(crate) async fn update_department(
    ex: &mut Executor,
    id: DepartmentId,
    data: &DepartmentData,
) -> DbResult<()> {
    let rows_affected = execute(
        ex,
        "UPDATE departments SET title = $1 WHERE id = $2",
        vec![data.title().as_str().into(), id.as_i64().into()],
    )
    .await?;
    expect_one_row(rows_affected)
}

/// Deletes the department identified by `id`.
pub(crate) async fn delete_department(ex: &mut Executor, id: DepartmentId) -> DbResult<()> {
    let rows_affected =
        execute(ex, "DELETE FROM departments WHERE id = $1", vec![id.as_i64().into()]).await?;
    expect_one_row(rows_affected)
}
