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

//! Persistence of skill categories.

use super::{expect_one_row, InsertedId};
use crate::model::*;
use skills_core::db::query::{Condition, Select};
use skills_core::db::{execute, fetch_all, fetch_one, query_one, DbResult, Executor};

/// Base query to fetch categories.
const SELECT_CATEGORIES: &str = "SELECT id, title FROM categories";

impl_from_db_row!(CategoryRow, |row| {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;

    Ok(CategoryRow::new(CategoryId::new(id), CategoryData::new(Title::new(title)?)))
});

/// Creates a new category with the contents in `data` and returns its identifier.
pub(crate) async fn create_category(
    ex: &mut Executor,
    data: &CategoryData,
) -> DbResult<CategoryId> {
    let id: InsertedId = query_one(
        ex,
        "INSERT INTO categories (title) VALUES ($1) RETURNING id",
        vec![data.title().as_str().into()],
    )
    .await?;
    Ok(CategoryId::new(id.0))
}

/// Gets the category identified by `id`.
pub(crate) async fn get_category(ex: &mut Executor, id: CategoryId) -> DbResult<CategoryRow> {
    let select = Select::new(SELECT_CATEGORIES).and(Condition::equal("id", id.as_i64()));
    fetch_one(ex, &select).await
}

/// Gets all categories, sorted by identifier.
pub(crate) async fn list_categories(ex: &mut Executor) -> DbResult<Vec<CategoryRow>> {
    fetch_all(ex, &Select::new(SELECT_CATEGORIES).order_by("id")).await
}

/// Replaces the contents of the category identified by `id` with `data`.
pub(crate) async fn update_category(
    ex: &mut Executor,
    id: CategoryId,
    data: &CategoryData,
) -> DbResult<()> {
    let rows_affected = execute(
        ex,
        "UPDATE categories SET title = $1 WHERE id = $2",
        vec![data.title().as_str().into(), id.as_i64().into()],
    )
    .await?;
    expect_one_row(rows_affected)
}

/// Deletes the category identified by `id`.
pub(crate) async fn delete_category(ex: &mut Executor, id: CategoryId) -> DbResult<()> {
    let rows_affected =
        execute(ex, "DELETE FROM categories WHERE id = $1", vec![id.as_i64().into()]).await?;
    expect_one_row(rows_affected)
}
