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

//! Persistence of assessment campaigns.

use super::{expect_one_row, InsertedId};
use crate::model::*;
use skills_core::db::query::{Condition, Select};
use skills_core::db::{execute, fetch_all, fetch_one, query_one, DbResult, Executor};

/// Base query to fetch assessments.
const SELECT_ASSESSMENTS: &str = "SELECT id, title, description FROM assessments";

impl_from_db_row!(AssessmentRow, |row| {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;
    let description: String = row.try_get("description").map_err(map_sqlx_error)?;

    let data = AssessmentData::new(Title::new(title)?, description);
    Ok(AssessmentRow::new(AssessmentId::new(id), data))
});

/// Creates a new assessment with the contents in `data` and returns its identifier.
pub(crate) async fn create_assessment(
    ex: &mut Executor,
    data: &AssessmentData,
) -> DbResult<AssessmentId> {
    let id: InsertedId = query_one(
        ex,
        "INSERT INTO assessments (title, description) VALUES ($1, $2) RETURNING id",
        vec![data.title().as_str().into(), data.description().as_str().into()],
    )
    .await?;
    Ok(AssessmentId::new(id.0))
}

/// Gets the assessment identified by `id`.
pub(crate) async fn get_assessment(ex: &mut Executor, id: AssessmentId) -> DbResult<AssessmentRow> {
    let select = Select::new(SELECT_ASSESSMENTS).and(Condition::equal("id", id.as_i64()));
    fetch_one(ex, &select).await
}

/// Gets all assessments, sorted by identifier.
pub(crate) async fn list_assessments(ex: &mut Executor) -> DbResult<Vec<AssessmentRow>> {
    fetch_all(ex, &Select::new(SELECT_ASSESSMENTS).order_by("id")).await
}

/// Replaces the contents of the assessment identified by `id` with `data`.
pub(crate) async fn update_assessment(
    ex: &mut Executor,
    id: AssessmentId,
    data: &AssessmentData,
) -> DbResult<()> {
    let rows_affected = execute(
        ex,
        "UPDATE assessments SET title = $1, description = $2 WHERE id = $3",
        vec![data.title().as_str().into(), data.description().as_str().into(), id.as_i64().into()],
    )
    .await?;
    expect_one_row(rows_affected)
}

/// Deletes the assessment identified by `id`.
pub(crate) async fn delete_assessment(ex: &mut Executor, id: AssessmentId) -> DbResult<()> {
    let rows_affected =
        execute(ex, "DELETE FROM assessments WHERE id = $1", vec![id.as_i64().into()]).await?;
    expect_one_row(rows_affected)
}
