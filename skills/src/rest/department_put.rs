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

//! API to replace a department.

use crate::driver::Driver;
use crate::model::{DepartmentData, DepartmentId};
use crate::rest::parse_id;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use skills_core::rest::{JsonBody, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    JsonBody(data): JsonBody<DepartmentData>,
) -> RestResult<impl IntoResponse> {
    let id = DepartmentId::new(parse_id(&id)?);
    let department = driver.update_department(id, data).await?;
    Ok(Json(department))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use serde_json::json;
    use skills_core::rest::testutils::*;

    fn route(id: impl ToString) -> (http::Method, String) {
        (http::Method::PUT, format!("/api/departments/{}/", id.to_string()))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let id = context.create_department("Ops").await;

        let response = OneShotBuilder::new(context.app(), route(id))
            .send_json(json!({"title": "Operations"}))
            .await
            .expect_json::<DepartmentView>()
            .await;
        assert_eq!(id, response.id);
        assert_eq!("Operations", response.title.as_str());

        assert_eq!(
            DepartmentData::new(Title::new("Operations").unwrap()),
            context.get_department(id).await
        );
    }

    #[tokio::test]
    async fn test_requires_all_fields() {
        let context = TestContext::setup().await;
        let id = context.create_department("Ops").await;

        OneShotBuilder::new(context.app(), route(id))
            .send_json(json!({}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("missing field `title`")
            .await;
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(1))
            .send_json(json!({"title": "Operations"}))
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("not found")
            .await;
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route(1));
}
