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

//! API to list employees.

use crate::driver::Driver;
use crate::model::EmployeeFilter;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use skills_core::rest::{EmptyBody, QueryParams, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(filter): QueryParams<EmployeeFilter>,
    _: EmptyBody,
) -> RestResult<impl IntoResponse> {
    let employees = driver.list_employees(filter).await?;
    Ok(Json(employees))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::testutils::*;
    use axum::http;
    use skills_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/api/employees/".to_owned())
    }

    /// Lists the employees that match `query` and returns their identifiers.
    async fn query(context: &TestContext, query: &[(&str, &str)]) -> Vec<EmployeeId> {
        OneShotBuilder::new(context.app(), route())
            .with_query(query)
            .send_empty()
            .await
            .expect_json::<Vec<EmployeeView>>()
            .await
            .into_iter()
            .map(|e| e.id)
            .collect()
    }

    #[tokio::test]
    async fn test_nested_department() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, Sex::Female, false, dept).await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_empty()
            .await
            .expect_json::<Vec<EmployeeView>>()
            .await;
        assert_eq!(1, response.len());
        assert_eq!(alice, response[0].id);
        assert_eq!("Alice", response[0].name.as_str());
        assert_eq!(30, response[0].age.as_i64());
        assert_eq!(Sex::Female, response[0].sex);
        assert!(!response[0].is_fired);
        assert_eq!(dept, response[0].department.id);
        assert_eq!("Engineering", response[0].department.title.as_str());
    }

    #[tokio::test]
    async fn test_search() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, Sex::Female, false, dept).await;
        context.create_employee("Bob", 40, Sex::Male, false, dept).await;

        assert_eq!(vec![alice], query(&context, &[("search", "ali")]).await);
        assert!(query(&context, &[("search", "zzz")]).await.is_empty());
    }

    #[tokio::test]
    async fn test_age_bounds_are_inclusive() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let mut employees = vec![];
        for (i, age) in [0, 25, 26, 150].into_iter().enumerate() {
            let name = format!("Employee {}", i);
            let id = context.create_employee(&name, age, Sex::Male, false, dept).await;
            employees.push((id, age));
        }

        for (id, age) in employees {
            let min_age = age.to_string();
            assert!(query(&context, &[("min_age", &min_age)]).await.contains(&id));

            let max_age = (age - 1).to_string();
            assert!(!query(&context, &[("max_age", &max_age)]).await.contains(&id));
        }

        assert_eq!(2, query(&context, &[("min_age", "25"), ("max_age", "26")]).await.len());
    }

    #[tokio::test]
    async fn test_exact_filters() {
        let context = TestContext::setup().await;
        let eng = context.create_department("Engineering").await;
        let other_eng = context.create_department("Engineering").await;
        let sales = context.create_department("Sales").await;
        let alice = context.create_employee("Alice", 30, Sex::Female, false, eng).await;
        let bob = context.create_employee("Bob", 40, Sex::Male, true, sales).await;
        let carol = context.create_employee("Carol", 50, Sex::Female, true, other_eng).await;

        assert_eq!(vec![bob, carol], query(&context, &[("is_fired", "true")]).await);
        assert_eq!(vec![alice], query(&context, &[("is_fired", "False")]).await);
        assert_eq!(vec![bob], query(&context, &[("sex", "M")]).await);
        assert_eq!(
            vec![alice, carol],
            query(&context, &[("department__title", "Engineering")]).await
        );
        assert!(query(&context, &[("department__title", "engineering")]).await.is_empty());
        assert_eq!(
            vec![carol],
            query(&context, &[("department__title", "Engineering"), ("is_fired", "1")]).await
        );
    }

    #[tokio::test]
    async fn test_invalid_filters() {
        let context = TestContext::setup().await;

        for (name, value, error) in [
            ("min_age", "abc", "invalid digit"),
            ("is_fired", "maybe", "Invalid boolean value 'maybe'"),
            ("sex", "X", "Sex must be one of M or F"),
        ] {
            OneShotBuilder::new(context.app(), route())
                .with_query([(name, value)])
                .send_empty()
                .await
                .expect_status(http::StatusCode::BAD_REQUEST)
                .expect_error(error)
                .await;
        }
    }

    test_payload_must_be_empty!(TestContext::setup().await.into_app(), route());
}
