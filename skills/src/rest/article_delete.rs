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

//! API to delete an article.

use crate::driver::Driver;
use crate::model::ArticleId;
use crate::rest::parse_id;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use skills_core::rest::{EmptyBody, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let id = ArticleId::new(parse_id(&id)?);
    driver.delete_article(id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use skills_core::rest::testutils::*;

    fn route(id: impl ToString) -> (http::Method, String) {
        (http::Method::DELETE, format!("/api/articles/{}/", id.to_string()))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, Sex::Female, false, dept).await;
        let first = context.create_article("First", alice).await;
        let second = context.create_article("Second", alice).await;

        OneShotBuilder::new(context.app(), route(first)).send_empty().await.expect_empty().await;

        assert!(!context.has_article(first).await);
        assert!(context.has_article(second).await);
        assert!(context.has_employee(alice).await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(6))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("not found")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
