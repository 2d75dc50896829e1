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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use skills_core::db::{sqlite, Db, DbError, DbResult};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The app under test.
    app: Router,
}

/// Maps a lookup result to whether the entity exists or not.
fn exists<T>(result: DbResult<T>) -> bool {
    match result {
        Ok(_) => true,
        Err(DbError::NotFound) => false,
        Err(e) => panic!("Unexpected database error {:?}", e),
    }
}

impl TestContext {
    /// Initializes the app against an empty in-memory database.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::new(sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        let app = app(driver);
        Self { db, app }
    }

    /// Gets a copy of the app.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Creates a department with the given `title`.
    pub(crate) async fn create_department(&self, title: &str) -> DepartmentId {
        let data = DepartmentData::new(Title::new(title).unwrap());
        db::create_department(&mut self.db.ex().await.unwrap(), &data).await.unwrap()
    }

    /// Gets the department `id`.
    pub(crate) async fn get_department(&self, id: DepartmentId) -> DepartmentData {
        let row = db::get_department(&mut self.db.ex().await.unwrap(), id).await.unwrap();
        row.data().clone()
    }

    /// Checks whether the department `id` exists.
    pub(crate) async fn has_department(&self, id: DepartmentId) -> bool {
        exists(db::get_department(&mut self.db.ex().await.unwrap(), id).await)
    }

    /// Creates an employee with the given properties.
    pub(crate) async fn create_employee(
        &self,
        name: &str,
        age: i64,
        sex: Sex,
        is_fired: bool,
        dept: DepartmentId,
    ) -> EmployeeId {
        let name = Name::new(name).unwrap();
        let data = EmployeeData::new(name, Age::new(age).unwrap(), sex, is_fired, dept);
        db::create_employee(&mut self.db.ex().await.unwrap(), &data).await.unwrap()
    }

    /// Gets the employee `id`.
    pub(crate) async fn get_employee(&self, id: EmployeeId) -> EmployeeData {
        let row = db::get_employee(&mut self.db.ex().await.unwrap(), id).await.unwrap();
        row.data().clone()
    }

    /// Checks whether the employee `id` exists.
    pub(crate) async fn has_employee(&self, id: EmployeeId) -> bool {
        exists(db::get_employee(&mut self.db.ex().await.unwrap(), id).await)
    }

    /// Creates an article with the given `title` written by `author`.
    pub(crate) async fn create_article(&self, title: &str, author: EmployeeId) -> ArticleId {
        let data = ArticleData::new(Title::new(title).unwrap(), "".to_owned(), author);
        db::create_article(&mut self.db.ex().await.unwrap(), &data).await.unwrap()
    }

    /// Gets the article `id`.
    pub(crate) async fn get_article(&self, id: ArticleId) -> ArticleData {
        let row = db::get_article(&mut self.db.ex().await.unwrap(), id).await.unwrap();
        row.data().clone()
    }

    /// Checks whether the article `id` exists.
    pub(crate) async fn has_article(&self, id: ArticleId) -> bool {
        exists(db::get_article(&mut self.db.ex().await.unwrap(), id).await)
    }

    /// Creates a category with the given `title`.
    pub(crate) async fn create_category(&self, title: &str) -> CategoryId {
        let data = CategoryData::new(Title::new(title).unwrap());
        db::create_category(&mut self.db.ex().await.unwrap(), &data).await.unwrap()
    }

    /// Gets the category `id`.
    pub(crate) async fn get_category(&self, id: CategoryId) -> CategoryData {
        let row = db::get_category(&mut self.db.ex().await.unwrap(), id).await.unwrap();
        row.data().clone()
    }

    /// Checks whether the category `id` exists.
    pub(crate) async fn has_category(&self, id: CategoryId) -> bool {
        exists(db::get_category(&mut self.db.ex().await.unwrap(), id).await)
    }

    /// Creates a skill named `name` in `category`.
    pub(crate) async fn create_skill(&self, name: &str, category: CategoryId) -> SkillId {
        let data = SkillData::new(Name::new(name).unwrap(), "".to_owned(), category);
        db::create_skill(&mut self.db.ex().await.unwrap(), &data).await.unwrap()
    }

    /// Gets the skill `id`.
    pub(crate) async fn get_skill(&self, id: SkillId) -> SkillData {
        let row = db::get_skill(&mut self.db.ex().await.unwrap(), id).await.unwrap();
        row.data().clone()
    }

    /// Checks whether the skill `id` exists.
    pub(crate) async fn has_skill(&self, id: SkillId) -> bool {
        exists(db::get_skill(&mut self.db.ex().await.unwrap(), id).await)
    }

    /// Creates an assessment with the given `title`.
    pub(crate) async fn create_assessment(&self, title: &str) -> AssessmentId {
        let data = AssessmentData::new(Title::new(title).unwrap(), "".to_owned());
        db::create_assessment(&mut self.db.ex().await.unwrap(), &data).await.unwrap()
    }

    /// Gets the assessment `id`.
    pub(crate) async fn get_assessment(&self, id: AssessmentId) -> AssessmentData {
        let row = db::get_assessment(&mut self.db.ex().await.unwrap(), id).await.unwrap();
        row.data().clone()
    }

    /// Checks whether the assessment `id` exists.
    pub(crate) async fn has_assessment(&self, id: AssessmentId) -> bool {
        exists(db::get_assessment(&mut self.db.ex().await.unwrap(), id).await)
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
        let score = Score::new(score).unwrap();
        let data = ResultData::new(assessment, evaluator, evaluatee, skill, score);
        db::create_result(&mut self.db.ex().await.unwrap(), &data).await.unwrap()
    }

    /// Gets the result `id`.
    pub(crate) async fn get_result(&self, id: ResultId) -> ResultData {
        let row = db::get_result(&mut self.db.ex().await.unwrap(), id).await.unwrap();
        row.data().clone()
    }

    /// Checks whether the result `id` exists.
    pub(crate) async fn has_result(&self, id: ResultId) -> bool {
        exists(db::get_result(&mut self.db.ex().await.unwrap(), id).await)
    }
}

/// Entities that results refer to, created in one go for tests that need a result.
pub(crate) struct ResultFixtures {
    /// Department of both employees.
    pub(crate) department: DepartmentId,

    /// An employee named Alice.
    pub(crate) alice: EmployeeId,

    /// An employee named Bob.
    pub(crate) bob: EmployeeId,

    /// Category of the skill.
    pub(crate) category: CategoryId,

    /// A skill to score.
    pub(crate) skill: SkillId,

    /// An assessment to record results under.
    pub(crate) assessment: AssessmentId,
}

impl ResultFixtures {
    /// Creates all the entities in the database backing `context`.
    pub(crate) async fn setup(context: &TestContext) -> Self {
        let department = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, Sex::Female, false, department).await;
        let bob = context.create_employee("Bob", 40, Sex::Male, false, department).await;
        let category = context.create_category("Languages").await;
        let skill = context.create_skill("Rust", category).await;
        let assessment = context.create_assessment("2024 H1").await;
        Self { department, alice, bob, category, skill, assessment }
    }
}
