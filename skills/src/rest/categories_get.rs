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

//! API to list skill categories.

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
    let categories = driver.list_categories().await?;
    Ok(Json(categories))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use skills_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/categories/".to_owned())
    }

    #[tokio::test]
    async fn test_all_regardless_of_query() {
        let context = TestContext::setup().await;
        let languages = context.create_category("Languages").await;
        let tools = context.create_category("Tools").await;

        let response = OneShotBuilder::new(context.app(), route())
            .with_query([("search", "Tools")])
            .send_empty()
            .await
            .expect_json::<Vec<CategoryView>>()
            .await;
        assert_eq!(
            vec![(languages, "Languages"), (tools, "Tools")],
            response.iter().map(|c| (c.id, c.title.as_str())).collect::<Vec<_>>()
        );
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
