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

//! API to delete an assessment result.

use crate::driver::Driver;
use crate::model::ResultId;
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
    let id = ResultId::new(parse_id(&id)?);
    driver.delete_result(id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use skills_core::rest::testutils::*;

    fn route(id: impl ToString) -> (http::Method, String) {
        (http::Method::DELETE, format!("/api/results/{}/", id.to_string()))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let f = ResultFixtures::setup(&context).await;
        let id = context.create_result(f.assessment, f.alice, f.bob, f.skill, 42).await;

        OneShotBuilder::new(context.app(), route(id)).send_empty().await.expect_empty().await;

        assert!(!context.has_result(id).await);
        assert!(context.has_employee(f.alice).await);
        assert!(context.has_employee(f.bob).await);
        assert!(context.has_skill(f.skill).await);
        assert!(context.has_assessment(f.assessment).await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(1))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("not found")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route(1));
}
