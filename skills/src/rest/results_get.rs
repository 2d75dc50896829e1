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

//! API to list assessment results.

use crate::driver::Driver;
use crate::model::ResultFilter;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use skills_core::rest::{EmptyBody, QueryParams, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(filter): QueryParams<ResultFilter>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let results = driver.list_results(filter).await?;
    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use skills_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/results/".to_owned())
    }

    #[tokio::test]
    async fn test_nested_everything() {
        let context = TestContext::setup().await;
        let f = ResultFixtures::setup(&context).await;
        let id = context.create_result(f.assessment, f.alice, f.bob, f.skill, 75).await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<ResultView>>()
            .await;
        assert_eq!(1, response.len());
        let result = &response[0];
        assert_eq!(id, result.id);
        assert_eq!("2024 H1", result.assessment.title.as_str());
        assert_eq!("Alice", result.evaluator.name.as_str());
        assert_eq!(f.department, result.evaluator.department.id);
        assert_eq!("Bob", result.evaluatee.name.as_str());
        assert_eq!("Engineering", result.evaluatee.department.title.as_str());
        assert_eq!("Rust", result.skill.name.as_str());
        assert_eq!(f.category, result.skill.category.id);
        assert_eq!(75, result.score.as_i64());
    }

    #[tokio::test]
    async fn test_by_evaluatee() {
        let context = TestContext::setup().await;
        let f = ResultFixtures::setup(&context).await;
        let r1 = context.create_result(f.assessment, f.alice, f.bob, f.skill, 10).await;
        let r2 = context.create_result(f.assessment, f.bob, f.alice, f.skill, 20).await;
        let r3 = context.create_result(f.assessment, f.alice, f.bob, f.skill, 30).await;

        for (query, exp_ids) in [
            (vec![], vec![r1, r2, r3]),
            (vec![("evaluatee_id", f.bob.to_string())], vec![r1, r3]),
            (vec![("evaluatee_id", f.alice.to_string())], vec![r2]),
            (vec![("evaluatee_id", "1000".to_owned())], vec![]),
            (vec![("evaluatee_id", "".to_owned())], vec![r1, r2, r3]),
        ] {
            let response = OneShotBuilder::new(context.app(), route())
                .with_query(query)
                .send_empty()
                .await
                .expect_json::<Vec<ResultView>>()
                .await;
            assert_eq!(exp_ids, response.iter().map(|r| r.id).collect::<Vec<_>>());
        }
    }

    #[tokio::test]
    async fn test_invalid_evaluatee() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_query([("evaluatee_id", "alice")])
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("invalid digit")
            .await;
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
