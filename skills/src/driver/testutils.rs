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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use skills_core::db::{sqlite, Db, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver against an empty in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::new(sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates a department with the given `title`.
    pub(crate) async fn create_department(&self, title: &str) -> DepartmentId {
        let data = DepartmentData::new(Title::new(title).unwrap());
        db::create_department(&mut self.ex().await, &data).await.unwrap()
    }

    /// Creates an active male employee in `dept`.
    pub(crate) async fn create_employee(
        &self,
        name: &str,
        age: i64,
        dept: DepartmentId,
    ) -> EmployeeId {
        let name = Name::new(name).unwrap();
        let data = EmployeeData::new(name, Age::new(age).unwrap(), Sex::Male, false, dept);
        db::create_employee(&mut self.ex().await, &data).await.unwrap()
    }

    /// Creates an article with the given `title` written by `author`.
    pub(crate) async fn create_article(&self, title: &str, author: EmployeeId) -> ArticleId {
        let data = ArticleData::new(Title::new(title).unwrap(), "Some text".to_owned(), author);
        db::create_article(&mut self.ex().await, &data).await.unwrap()
    }

    /// Creates the category, skill and assessment that results need and returns the latter two.
    pub(crate) async fn create_result_fixtures(&self) -> (AssessmentId, SkillId) {
        let category = CategoryData::new(Title::new("Languages").unwrap());
        let category = db::create_category(&mut self.ex().await, &category).await.unwrap();
        let skill = SkillData::new(Name::new("Rust").unwrap(), "".to_owned(), category);
        let skill = db::create_skill(&mut self.ex().await, &skill).await.unwrap();
        let assessment = AssessmentData::new(Title::new("2024 H1").unwrap(), "".to_owned());
        let assessment = db::create_assessment(&mut self.ex().await, &assessment).await.unwrap();
        (assessment, skill)
    }

    /// Records a `score` given by `evaluator` to `evaluatee`.
    pub(crate) async fn create_result(
        &self,
        assessment: AssessmentId,
        evaluator: EmployeeId,
        evaluatee: EmployeeId,
        skill: SkillId,
        score: i64,
    ) -> ResultId {
        let data =
            ResultData::new(assessment, evaluator, evaluatee, skill, Score::new(score).unwrap());
        db::create_result(&mut self.ex().await, &data).await.unwrap()
    }
}
