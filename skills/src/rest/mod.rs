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

//! REST interface for the skills service.

use crate::driver::Driver;
use axum::Router;
use skills_core::rest::{RestError, RestResult};

mod api_get;
mod article_delete;
mod article_get;
mod article_patch;
mod article_put;
mod articles_get;
mod articles_post;
mod assessment_delete;
mod assessment_get;
mod assessment_patch;
mod assessment_put;
mod assessments_get;
mod assessments_post;
mod categories_get;
mod categories_post;
mod category_delete;
mod category_get;
mod category_patch;
mod category_put;
mod department_delete;
mod department_get;
mod department_patch;
mod department_put;
mod departments_get;
mod departments_post;
mod employee_delete;
mod employee_get;
mod employee_patch;
mod employee_put;
mod employees_get;
mod employees_post;
mod result_delete;
mod result_get;
mod result_patch;
mod result_put;
mod results_get;
mod results_post;
mod skill_delete;
mod skill_get;
mod skill_patch;
mod skill_put;
mod skills_get;
mod skills_post;
#[cfg(test)]
mod testutils;

/// Parses the identifier of an entity given in a path.
///
/// Identifiers that are not integers cannot name any entity, so they are reported as missing.
fn parse_id(id: &str) -> RestResult<i64> {
    id.parse::<i64>().map_err(|_| RestError::NotFound(format!("Invalid identifier '{}'", id)))
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/", get(api_get::handler))
        .route("/api/articles/", get(articles_get::handler).post(articles_post::handler))
        .route(
            "/api/articles/:id/",
            get(article_get::handler)
                .put(article_put::handler)
                .patch(article_patch::handler)
                .delete(article_delete::handler),
        )
        .route("/api/assessments/", get(assessments_get::handler).post(assessments_post::handler))
        .route(
            "/api/assessments/:id/",
            get(assessment_get::handler)
                .put(assessment_put::handler)
                .patch(assessment_patch::handler)
                .delete(assessment_delete::handler),
        )
        .route("/api/categories/", get(categories_get::handler).post(categories_post::handler))
        .route(
            "/api/categories/:id/",
            get(category_get::handler)
                .put(category_put::handler)
                .patch(category_patch::handler)
                .delete(category_delete::handler),
        )
        .route("/api/departments/", get(departments_get::handler).post(departments_post::handler))
        .route(
            "/api/departments/:id/",
            get(department_get::handler)
                .put(department_put::handler)
                .patch(department_patch::handler)
                .delete(department_delete::handler),
        )
        .route("/api/employees/", get(employees_get::handler).post(employees_post::handler))
        .route(
            "/api/employees/:id/",
            get(employee_get::handler)
                .put(employee_put::handler)
                .patch(employee_patch::handler)
                .delete(employee_delete::handler),
        )
        .route("/api/results/", get(results_get::handler).post(results_post::handler))
        .route(
            "/api/results/:id/",
            get(result_get::handler)
                .put(result_put::handler)
                .patch(result_patch::handler)
                .delete(result_delete::handler),
        )
        .route("/api/skills/", get(skills_get::handler).post(skills_post::handler))
        .route(
            "/api/skills/:id/",
            get(skill_get::handler)
                .put(skill_put::handler)
                .patch(skill_patch::handler)
                .delete(skill_delete::handler),
        )
        .with_state(driver)
}
