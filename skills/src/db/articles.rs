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

//! Persistence of articles.

use super::{expect_one_row, InsertedId};
use crate::model::*;
use skills_core::db::query::{Condition, Select};
use skills_core::db::{execute, fetch_all, fetch_count, fetch_one, query_one, DbResult, Executor};

/// Base query to fetch articles.
const SELECT_ARTICLES: &str = "SELECT id, title, content, author_id FROM articles";

impl_from_db_row!(ArticleRow, |row| {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let title: String = row.try_get("title").map_err(map_sqlx_error)?;
    let content: String = row.try_get("content").map_err(map_sqlx_error)?;
    let author_id: i64 = row.try_get("author_id").map_err(map_sqlx_error)?;

    let data = ArticleData::new(Title::new(title)?, content, EmployeeId::new(author_id));
    Ok(ArticleRow::new(ArticleId::new(id), data))
});

/// Creates a new article with the contents in `data` and returns its identifier.
pub(crate) async fn create_article(ex: &mut Executor, data: &ArticleData) -> DbResult<ArticleId> {
    let id: InsertedId = query_one(
        ex,
        "INSERT INTO articles (title, content, author_id) VALUES ($1, $2, $3) RETURNING id",
        vec![
            data.title().as_str().into(),
            data.content().as_str().into(),
            data.author().as_i64().into(),
        ],
    )
    .await?;
    Ok(ArticleId::new(id.0))
}

/// Gets the article identified by `id`.
pub(crate) async fn get_article(ex: &mut Executor, id: ArticleId) -> DbResult<ArticleRow> {
    let select = Select::new(SELECT_ARTICLES).and(Condition::equal("id", id.as_i64()));
    fetch_one(ex, &select).await
}

/// Gets all articles that match `filter`, sorted by identifier.
pub(crate) async fn list_articles(
    ex: &mut Executor,
    filter: &ArticleFilter,
) -> DbResult<Vec<ArticleRow>> {
    let mut select = Select::new(SELECT_ARTICLES);
    if let Some(search) = filter.search.as_deref() {
        let terms = search_terms(search).map(|term| Condition::contains("title", term));
        select = select.and_all(terms);
    }
    fetch_all(ex, &select.order_by("id")).await
}

/// Replaces the contents of the article identified by `id` with `data`.
pub(crate) async fn update_article(
    ex: &mut Executor,
    id: ArticleId,
    data: &ArticleData,
) -> DbResult<()> {
    let rows_affected = execute(
        ex,
        "UPDATE articles SET title = $1, content = $2, author_id = $3 WHERE id = $4",
        vec![
            data.title().as_str().into(),
            data.content().as_str().into(),
            data.author().as_i64().into(),
            id.as_i64().into(),
        ],
    )
    .await?;
    expect_one_row(rows_affected)
}

/// Deletes the article identified by `id`.
pub(crate) async fn delete_article(ex: &mut Executor, id: ArticleId) -> DbResult<()> {
    let rows_affected =
        execute(ex, "DELETE FROM articles WHERE id = $1", vec![id.as_i64().into()]).await?;
    expect_one_row(rows_affected)
}

/// Counts the articles written by the employee identified by `id`.
pub(crate) async fn count_articles_by_author(ex: &mut Executor, id: EmployeeId) -> DbResult<u64> {
    let select = Select::new("SELECT COUNT(*) AS count FROM articles")
        .and(Condition::equal("author_id", id.as_i64()));
    fetch_count(ex, &select).await
}
