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

//! API to list articles.

use crate::driver::Driver;
use crate::model::ArticleFilter;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use skills_core::rest::{EmptyBody, QueryParams, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(filter): QueryParams<ArticleFilter>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let articles = driver.list_articles(filter).await?;
    Ok(Json(articles))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use skills_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/articles/".to_owned())
    }

    #[tokio::test]
    async fn test_nested_author() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, Sex::Female, false, dept).await;
        let bob = context.create_employee("Bob", 40, Sex::Male, false, dept).await;
        let first = context.create_article("First", alice).await;
        let second = context.create_article("Second", bob).await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<ArticleView>>()
            .await;
        assert_eq!(
            vec![(first, alice), (second, bob)],
            response.iter().map(|a| (a.id, a.author.id)).collect::<Vec<_>>()
        );
        assert!(response.iter().all(|a| a.author.department.title.as_str() == "Engineering"));
    }

    #[tokio::test]
    async fn test_search_by_title() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, Sex::Female, false, dept).await;
        context.create_article("Quarterly report", alice).await;
        let rust = context.create_article("Why Rust", alice).await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("search", "rust")])
            .send_empty()
            .await
            .expect_json::<Vec<ArticleView>>()
            .await;
        assert_eq!(vec![rust], response.iter().map(|a| a.id).collect::<Vec<_>>());

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("search", "alice")])
            .send_empty()
            .await
            .expect_json::<Vec<ArticleView>>()
            .await;
        assert!(response.is_empty());
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
