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

//! API to record an assessment result.

use crate::driver::Driver;
use crate::model::ResultData;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{http, Json};
use skills_core::rest::{JsonBody, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    JsonBody(data): JsonBody<ResultData>,
) -> RestResult<impl IntoResponse> {
    let result = driver.create_result(data).await?;
    Ok((http::StatusCode::CREATED, Json(result)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::rest::testutils::*;
    use serde_json::json;
    use skills_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/api/results/".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let f = ResultFixtures::setup(&context).await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(json!({
                "assessment": f.assessment,
                "evaluator": f.alice,
                "evaluatee": f.bob,
                "skill": f.skill,
                "score": 90
            }))
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<ResultView>()
            .await;
        assert_eq!(f.alice, response.evaluator.id);
        assert_eq!(f.bob, response.evaluatee.id);
        assert_eq!(90, response.score.as_i64());

        let exp_data =
            ResultData::new(f.assessment, f.alice, f.bob, f.skill, Score::new(90).unwrap());
        assert_eq!(exp_data, context.get_result(response.id).await);
    }

    #[tokio::test]
    async fn test_duplicates_allowed() {
        let context = TestContext::setup().await;
        let f = ResultFixtures::setup(&context).await;
        let request = json!({
            "assessment": f.assessment,
            "evaluator": f.alice,
            "evaluatee": f.bob,
            "skill": f.skill,
            "score": 90
        });

        let first = OneShotBuilder::new(context.app(), route())
            .send_json(&request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<ResultView>()
            .await;
        let second = OneShotBuilder::new(context.app(), route())
            .send_json(&request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<ResultView>()
            .await;
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_invalid_references() {
        let context = TestContext::setup().await;
        let f = ResultFixtures::setup(&context).await;

        for field in ["assessment", "evaluator", "evaluatee", "skill"] {
            let mut request = json!({
                "assessment": f.assessment,
                "evaluator": f.alice,
                "evaluatee": f.bob,
                "skill": f.skill,
                "score": 90
            });
            request[field] = json!(999);

            OneShotBuilder::new(context.app(), route())
                .send_json(request)
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error(&format!(r#"^{}: Invalid pk "999" - object does not exist"#, field))
                .await;
        }
    }

    #[tokio::test]
    async fn test_invalid_score() {
        let context = TestContext::setup().await;
        let f = ResultFixtures::setup(&context).await;

        OneShotBuilder::new(context.app(), route())
            .send_json(json!({
                "assessment": f.assessment,
                "evaluator": f.alice,
                "evaluatee": f.bob,
                "skill": f.skill,
                "score": 101
            }))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("score: Score must be between 0 and 100 but got 101")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
