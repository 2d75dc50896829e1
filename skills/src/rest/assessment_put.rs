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

//! API to replace an assessment.

use crate::driver::Driver;
use crate::model::{AssessmentData, AssessmentId};
use crate::rest::parse_id;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use skills_core::rest::{JsonBody, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    JsonBody(data): JsonBody<AssessmentData>,
) -> RestResult<impl IntoResponse> {
    let id = AssessmentId::new(parse_id(&id)?);
    let assessment = driver.update_assessment(id, data).await?;
    Ok(Json(assessment))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use serde_json::json;
    use skills_core::rest::testutils::*;

    fn route(id: impl ToString) -> (http::Method, String) {
        (http::Method::PUT, format!("/api/assessments/{}/", id.to_string()))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let id = context.create_assessment("2024 H1").await;

        let response = OneShotBuilder::new(context.app(), route(id))
            .send_json(json!({"title": "2024 Q1"}))
            .await
            .expect_json::<AssessmentView>()
            .await;
        assert_eq!("2024 Q1", response.title.as_str());

        let exp_data = AssessmentData::new(Title::new("2024 Q1").unwrap(), "".to_owned());
        assert_eq!(exp_data, context.get_assessment(id).await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(1))
            .send_json(json!({"title": "2024 Q1"}))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("not found")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route(1));
}
