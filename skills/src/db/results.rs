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

//! Persistence of assessment results.

use super::{expect_one_row, InsertedId};
use crate::model::*;
use skills_core::db::query::{Condition, Select, Value};
use skills_core::db::{
    execute, fetch_all, fetch_count, fetch_one, query_count, query_one, DbResult, Executor,
};

/// Base query to fetch results.
const SELECT_RESULTS: &str = "
    SELECT id, assessment_id, evaluator_id, evaluatee_id, skill_id, score
    FROM results";

impl_from_db_row!(ResultRow, |row| {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let assessment_id: i64 = row.try_get("assessment_id").map_err(map_sqlx_error)?;
    let evaluator_id: i64 = row.try_get("evaluator_id").map_err(map_sqlx_error)?;
    let evaluatee_id: i64 = row.try_get("evaluatee_id").map_err(map_sqlx_error)?;
    let skill_id: i64 = row.try_get("skill_id").map_err(map_sqlx_error)?;
    let score: i64 = row.try_get("score").map_err(map_sqlx_error)?;

    let data = ResultData::new(
        AssessmentId::new(assessment_id),
        EmployeeId::new(evaluator_id),
        EmployeeId::new(evaluatee_id),
        SkillId::new(skill_id),
        Score::new(score)?,
    );
    Ok(ResultRow::new(ResultId::new(id), data))
});

/// Returns the values to bind for the columns of `data`, in declaration order.
fn bind_data(data: &ResultData) -> Vec<Value> {
    vec![
        data.assessment().as_i64().into(),
        data.evaluator().as_i64().into(),
        data.evaluatee().as_i64().into(),
        data.skill().as_i64().into(),
        data.score().as_i64().into(),
    ]
}

/// Creates a new result with the contents in `data` and returns its identifier.
pub(crate) async fn create_result(ex: &mut Executor, data: &ResultData) -> DbResult<ResultId> {
    let id: InsertedId = query_one(
        ex,
        "INSERT INTO results (assessment_id, evaluator_id, evaluatee_id, skill_id, score)
        VALUES ($1, $2, $3, $4, $5) RETURNING id",
        bind_data(data),
    )
    .await?;
    Ok(ResultId::new(id.0))
}

/// Gets the result identified by `id`.
pub(crate) async fn get_result(ex: &mut Executor, id: ResultId) -> DbResult<ResultRow> {
    let select = Select::new(SELECT_RESULTS).and(Condition::equal("id", id.as_i64()));
    fetch_one(ex, &select).await
}

/// Gets all results that match `filter`, sorted by identifier.
pub(crate) async fn list_results(
    ex: &mut Executor,
    filter: &ResultFilter,
) -> DbResult<Vec<ResultRow>> {
    let mut select = Select::new(SELECT_RESULTS);
    if let Some(evaluatee_id) = filter.evaluatee_id {
        select = select.and(Condition::equal("evaluatee_id", evaluatee_id));
    }
    fetch_all(ex, &select.order_by("id")).await
}

/// Replaces the contents of the result identified by `id` with `data`.
pub(crate) async fn update_result(
    ex: &mut Executor,
    id: ResultId,
    data: &ResultData,
) -> DbResult<()> {
    let mut values = bind_data(data);
    values.push(id.as_i64().into());
    let rows_affected = execute(
        ex,
        "UPDATE results
        SET assessment_id = $1, evaluator_id = $2, evaluatee_id = $3, skill_id = $4, score = $5
        WHERE id = $6",
        values,
    )
    .await?;
    expect_one_row(rows_affected)
}

/// Deletes the result identified by `id`.
pub(crate) async fn delete_result(ex: &mut Executor, id: ResultId) -> DbResult<()> {
    let rows_affected =
        execute(ex, "DELETE FROM results WHERE id = $1", vec![id.as_i64().into()]).await?;
    expect_one_row(rows_affected)
}

/// Counts the results in which the employee identified by `id` is the evaluator or the evaluatee.
pub(crate) async fn count_results_by_employee(ex: &mut Executor, id: EmployeeId) -> DbResult<u64> {
    query_count(
        ex,
        "SELECT COUNT(*) AS count FROM results WHERE evaluator_id = $1 OR evaluatee_id = $1",
        vec![id.as_i64().into()],
    )
    .await
}

/// Counts the results that score the skill identified by `id`.
pub(crate) async fn count_results_by_skill(ex: &mut Executor, id: SkillId) -> DbResult<u64> {
    let select = Select::new("SELECT COUNT(*) AS count FROM results")
        .and(Condition::equal("skill_id", id.as_i64()));
    fetch_count(ex, &select).await
}

/// Counts the results that belong to the assessment identified by `id`.
pub(crate) async fn count_results_by_assessment(
    ex: &mut Executor,
    id: AssessmentId,
) -> DbResult<u64> {
    let select = Select::new("SELECT COUNT(*) AS count FROM results")
        .and(Condition::equal("assessment_id", id.as_i64()));
    fetch_count(ex, &select).await
}
