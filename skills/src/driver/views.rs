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

//! Assembly of the read representations of entities.

use crate::db;
use crate::model::*;
use skills_core::db::{DbError, DbResult, Executor};
use std::collections::HashMap;
use std::fmt;

/// Returns a function that reports a missing `what` identified by `id` as a data integrity
/// problem.  References are validated on write, so a dangling one means the database is corrupt.
fn dangling<I: fmt::Display>(what: &'static str, id: I) -> impl FnOnce(DbError) -> DbError {
    move |e| match e {
        DbError::NotFound => {
            DbError::DataIntegrityError(format!("Dangling reference to {} {}", what, id))
        }
        e => e,
    }
}

/// Builds views by loading the entities they embed, memoizing the ones already loaded.
///
/// A resolver is tied to the executor of a single operation so that all views it produces are
/// consistent with each other.
pub(super) struct Resolver<'a> {
    /// Executor to load referenced entities with.
    ex: &'a mut Executor,

    /// Departments loaded so far.
    departments: HashMap<DepartmentId, DepartmentView>,

    /// Employees loaded so far.
    employees: HashMap<EmployeeId, EmployeeView>,

    /// Categories loaded so far.
    categories: HashMap<CategoryId, CategoryView>,

    /// Skills loaded so far.
    skills: HashMap<SkillId, SkillView>,

    /// Assessments loaded so far.
    assessments: HashMap<AssessmentId, AssessmentView>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver that loads entities via `ex`.
    pub(super) fn new(ex: &'a mut Executor) -> Self {
        Self {
            ex,
            departments: HashMap::default(),
            employees: HashMap::default(),
            categories: HashMap::default(),
            skills: HashMap::default(),
            assessments: HashMap::default(),
        }
    }

    /// Gets the view of the department `id`.
    pub(super) async fn department(&mut self, id: DepartmentId) -> DbResult<DepartmentView> {
        if let Some(view) = self.departments.get(&id) {
            return Ok(view.clone());
        }
        let row = db::get_department(self.ex, id).await.map_err(dangling("department", id))?;
        let view = DepartmentView::from(row);
        self.departments.insert(id, view.clone());
        Ok(view)
    }

    /// Builds the view of the employee in `row`.
    pub(super) async fn employee_view(&mut self, row: EmployeeRow) -> DbResult<EmployeeView> {
        let department = self.department(*row.data().department()).await?;
        let view = EmployeeView::new(row, department);
        self.employees.insert(view.id, view.clone());
        Ok(view)
    }

    /// Builds the views of the employees in `rows`.
    pub(super) async fn employee_views(
        &mut self,
        rows: Vec<EmployeeRow>,
    ) -> DbResult<Vec<EmployeeView>> {
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            views.push(self.employee_view(row).await?);
        }
        Ok(views)
    }

    /// Gets the view of the employee `id`.
    pub(super) async fn employee(&mut self, id: EmployeeId) -> DbResult<EmployeeView> {
        if let Some(view) = self.employees.get(&id) {
            return Ok(view.clone());
        }
        let row = db::get_employee(self.ex, id).await.map_err(dangling("employee", id))?;
        self.employee_view(row).await
    }

    /// Builds the view of the article in `row`.
    pub(super) async fn article_view(&mut self, row: ArticleRow) -> DbResult<ArticleView> {
        let author = self.employee(*row.data().author()).await?;
        Ok(ArticleView::new(row, author))
    }

    /// Builds the views of the articles in `rows`.
    pub(super) async fn article_views(
        &mut self,
        rows: Vec<ArticleRow>,
    ) -> DbResult<Vec<ArticleView>> {
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            views.push(self.article_view(row).await?);
        }
        Ok(views)
    }

    /// Gets the view of the category `id`.
    pub(super) async fn category(&mut self, id: CategoryId) -> DbResult<CategoryView> {
        if let Some(view) = self.categories.get(&id) {
            return Ok(view.clone());
        }
        let row = db::get_category(self.ex, id).await.map_err(dangling("category", id))?;
        let view = CategoryView::from(row);
        self.categories.insert(id, view.clone());
        Ok(view)
    }

    /// Builds the view of the skill in `row`.
    pub(super) async fn skill_view(&mut self, row: SkillRow) -> DbResult<SkillView> {
        let category = self.category(*row.data().category()).await?;
        let view = SkillView::new(row, category);
        self.skills.insert(view.id, view.clone());
        Ok(view)
    }

    /// Builds the views of the skills in `rows`.
    pub(super) async fn skill_views(&mut self, rows: Vec<SkillRow>) -> DbResult<Vec<SkillView>> {
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            views.push(self.skill_view(row).await?);
        }
        Ok(views)
    }

    /// Gets the view of the skill `id`.
    pub(super) async fn skill(&mut self, id: SkillId) -> DbResult<SkillView> {
        if let Some(view) = self.skills.get(&id) {
            return Ok(view.clone());
        }
        let row = db::get_skill(self.ex, id).await.map_err(dangling("skill", id))?;
        self.skill_view(row).await
    }

    /// Gets the view of the assessment `id`.
    pub(super) async fn assessment(&mut self, id: AssessmentId) -> DbResult<AssessmentView> {
        if let Some(view) = self.assessments.get(&id) {
            return Ok(view.clone());
        }
        let row = db::get_assessment(self.ex, id).await.map_err(dangling("assessment", id))?;
        let view = AssessmentView::from(row);
        self.assessments.insert(id, view.clone());
        Ok(view)
    }

    /// Builds the view of the result in `row`.
    pub(super) async fn result_view(&mut self, row: ResultRow) -> DbResult<ResultView> {
        let data = row.data();
        let assessment = self.assessment(*data.assessment()).await?;
        let evaluator = self.employee(*data.evaluator()).await?;
        let evaluatee = self.employee(*data.evaluatee()).await?;
        let skill = self.skill(*data.skill()).await?;
        let score = *data.score();
        Ok(ResultView { id: *row.id(), assessment, evaluator, evaluatee, skill, score })
    }

    /// Builds the views of the results in `rows`.
    pub(super) async fn result_views(&mut self, rows: Vec<ResultRow>) -> DbResult<Vec<ResultView>> {
        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            views.push(self.result_view(row).await?);
        }
        Ok(views)
    }
}
