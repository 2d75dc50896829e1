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

//! API to update some fields of a skill category.

use crate::driver::Driver;
use crate::model::{CategoryId, CategoryPatch};
use crate::rest::parse_id;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use skills_core::rest::{JsonBody, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    JsonBody(patch): JsonBody<CategoryPatch>,
) -> RestResult<impl IntoResponse> {
    let id = CategoryId::new(parse_id(&id)?);
    let category = driver.patch_category(id, patch).await?;
    Ok(Json(category))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use serde_json::json;
    use skills_core::rest::testutils::*;

    fn route(id: impl ToString) -> (http::Method, String) {
        (http::Method::PATCH, format!("/api/categories/{}/", id.to_string()))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let id = context.create_category("Languages").await;

        let response = OneShotBuilder::new(context.app(), route(id))
            .send_json(json!({"title": "Tools"}))
            .await
            .expect_json::<CategoryView>()
            .await;
        assert_eq!("Tools", response.title.as_str());
        assert_eq!("Tools", context.get_category(id).await.title().as_str());
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(1))
            .send_json(json!({}))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("not found")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route(1));
}
