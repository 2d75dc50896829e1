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

//! Persistence of skills.

use super::{expect_one_row, InsertedId};
use crate::model::*;
use skills_core::db::query::{Condition, Select};
use skills_core::db::{execute, fetch_all, fetch_count, fetch_one, query_one, DbResult, Executor};

/// Base query to fetch skills.
const SELECT_SKILLS: &str = "SELECT id, name, description, category_id FROM skills";

impl_from_db_row!(SkillRow, |row| {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let description: String = row.try_get("description").map_err(map_sqlx_error)?;
    let category_id: i64 = row.try_get("category_id").map_err(map_sqlx_error)?;

    let data = SkillData::new(Name::new(name)?, description, CategoryId::new(category_id));
    Ok(SkillRow::new(SkillId::new(id), data))
});

/// Creates a new skill with the contents in `data` and returns its identifier.
pub(crate) async fn create_skill(ex: &mut Executor, data: &SkillData) -> DbResult<SkillId> {
    let id: InsertedId = query_one(
        ex,
        "INSERT INTO skills (name, description, category_id) VALUES ($1, $2, $3) RETURNING id",
        vec![
            data.name().as_str().into(),
            data.description().as_str().into(),
            data.category().as_i64().into(),
        ],
    )
    .await?;
    Ok(SkillId::new(id.0))
}

/// Gets the skill identified by `id`.
pub(crate) async fn get_skill(ex: &mut Executor, id: SkillId) -> DbResult<SkillRow> {
    let select = Select::new(SELECT_SKILLS).and(Condition::equal("id", id.as_i64()));
    fetch_one(ex, &select).await
}

/// Gets all skills, sorted by identifier.
pub(crate) async fn list_skills(ex: &mut Executor) -> DbResult<Vec<SkillRow>> {
    fetch_all(ex, &Select::new(SELECT_SKILLS).order_by("id")).await
}

/// Replaces the contents of the skill identified by `id` with `data`.
pub(crate) async fn update_skill(ex: &mut Executor, id: SkillId, data: &SkillData) -> DbResult<()> {
    let rows_affected = execute(
        ex,
        "UPDATE skills SET name = $1, description = $2, category_id = $3 WHERE id = $4",
        vec![
            data.name().as_str().into(),
            data.description().as_str().into(),
            data.category().as_i64().into(),
            id.as_i64().into(),
        ],
    )
    .await?;
    expect_one_row(rows_affected)
}

/// Deletes the skill identified by `id`.
pub(crate) async fn delete_skill(ex: &mut Executor, id: SkillId) -> DbResult<()> {
    let rows_affected =
        execute(ex, "DELETE FROM skills WHERE id = $1", vec![id.as_i64().into()]).await?;
    expect_one_row(rows_affected)
}

/// Counts the skills that belong to the category identified by `id`.
pub(crate) async fn count_skills_in_category(ex: &mut Executor, id: CategoryId) -> DbResult<u64> {
    let select = Select::new("SELECT COUNT(*) AS count FROM skills")
        .and(Condition::equal("category_id", id.as_i64()));
    fetch_count(ex, &select).await
}
