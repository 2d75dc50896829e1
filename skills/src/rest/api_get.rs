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

//! API to describe the available resources.

use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use skills_core::rest::{EmptyBody, RestResult};

/// Message returned by this API.
#[derive(Serialize)]
struct ApiRootResponse {
    /// Path to the articles resource.
    articles: &'static str,

    /// Path to the assessments resource.
    assessments: &'static str,

    /// Path to the skill categories resource.
    categories: &'static str,

    /// Path to the departments resource.
    departments: &'static str,

    /// Path to the employees resource.
    employees: &'static str,

    /// Path to the assessment results resource.
    results: &'static str,

    /// Path to the skills resource.
    skills: &'static str,
}

/// API handler.
pub(crate) async fn handler(_: EmptyBody) -> RestResult<impl IntoResponse> {
    Ok(Json(ApiRootResponse {
        articles: "/api/articles/",
        assessments: "/api/assessments/",
        categories: "/api/categories/",
        departments: "/api/departments/",
        employees: "/api/employees/",
        results: "/api/results/",
        skills: "/api/skills/",
    }))
}

#[cfg(test)]
mod tests {
    use crate::rest::testutils::*;
    use axum::http;
    use skills_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<serde_json::Map<String, serde_json::Value>>()
            .await;
        assert_eq!(7, response.len());
        for (name, path) in response {
            let path = path.as_str().unwrap().to_owned();
            assert_eq!(format!("/api/{}/", name), path);

            OneShotBuilder::new(context.app(), (http::Method::GET, path))
                .send_empty()
                .await
                .expect_json::<Vec<serde_json::Value>>()
                .await;
        }
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
