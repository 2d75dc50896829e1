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

//! API to list assessments.

use crate::driver::Driver;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use skills_core::rest::{EmptyBody, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let assessments = driver.list_assessments().await?;
    Ok(Json(assessments))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use skills_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/assessments/".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let first = context.create_assessment("2024 H1").await;
        let second = context.create_assessment("2024 H2").await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<AssessmentView>>()
            .await;
        assert_eq!(vec![first, second], response.iter().map(|a| a.id).collect::<Vec<_>>());
        assert_eq!("2024 H2", response[1].title.as_str());
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
