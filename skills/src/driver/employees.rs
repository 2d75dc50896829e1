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

//! Operations on employees.

use crate::db;
use crate::driver::views::Resolver;
use crate::driver::{ensure_unreferenced, invalid_reference, Driver};
use crate::model::*;
use skills_core::db::{DbResult, Executor};
use skills_core::driver::DriverResult;

/// Checks that the entities referenced by `data` exist.
async fn validate_references(ex: &mut Executor, data: &EmployeeData) -> DriverResult<()> {
    let department = *data.department();
    db::get_department(ex, department).await.map_err(invalid_reference("department", department))?;
    Ok(())
}

/// Builds the view of the employee `id` after writing `data` to it.
async fn written_view(
    ex: &mut Executor,
    id: EmployeeId,
    data: EmployeeData,
) -> DbResult<EmployeeView> {
    Resolver::new(ex).employee_view(EmployeeRow::new(id, data)).await
}

impl Driver {
    /// Gets all employees that match `filter`.
    pub(crate) async fn list_employees(
        self,
        filter: EmployeeFilter,
    ) -> DriverResult<Vec<EmployeeView>> {
        let mut tx = self.db.begin().await?;
        let rows = db::list_employees(tx.ex(), &filter).await?;
        let views = Resolver::new(tx.ex()).employee_views(rows).await?;
        tx.commit().await?;
        Ok(views)
    }

    /// Gets the employee `id`.
    pub(crate) async fn get_employee(self, id: EmployeeId) -> DriverResult<EmployeeView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_employee(tx.ex(), id).await?;
        let view = Resolver::new(tx.ex()).employee_view(row).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Creates a new employee with `data`.
    pub(crate) async fn create_employee(self, data: EmployeeData) -> DriverResult<EmployeeView> {
        let mut tx = self.db.begin().await?;
        validate_references(tx.ex(), &data).await?;
        let id = db::create_employee(tx.ex(), &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Replaces all fields of the employee `id` with `data`.
    pub(crate) async fn update_employee(
        self,
        id: EmployeeId,
        data: EmployeeData,
    ) -> DriverResult<EmployeeView> {
        let mut tx = self.db.begin().await?;
        db::get_employee(tx.ex(), id).await?;
        validate_references(tx.ex(), &data).await?;
        db::update_employee(tx.ex(), id, &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Updates the fields of the employee `id` present in `patch`.
    pub(crate) async fn patch_employee(
        self,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> DriverResult<EmployeeView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_employee(tx.ex(), id).await?;
        let data = patch.apply(row.data().clone());
        validate_references(tx.ex(), &data).await?;
        db::update_employee(tx.ex(), id, &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Deletes the employee `id`, which must not be the author of articles nor take part in any
    /// result.
    pub(crate) async fn delete_employee(self, id: EmployeeId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::get_employee(tx.ex(), id).await?;
        let articles = db::count_articles_by_author(tx.ex(), id).await?;
        ensure_unreferenced("employee", id, "articles", articles)?;
        let results = db::count_results_by_employee(tx.ex(), id).await?;
        ensure_unreferenced("employee", id, "results", results)?;
        db::delete_employee(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use skills_core::db::DbError;
    use skills_core::driver::DriverError;

    /// Builds the contents of an employee named `name` of age `age` in `dept`.
    fn employee_data(name: &str, age: i64, dept: DepartmentId) -> EmployeeData {
        let name = Name::new(name).unwrap();
        EmployeeData::new(name, Age::new(age).unwrap(), Sex::Female, false, dept)
    }

    #[tokio::test]
    async fn test_list_employees_embeds_departments() {
        let context = TestContext::setup().await;
        let eng = context.create_department("Engineering").await;
        let sales = context.create_department("Sales").await;
        let alice = context.create_employee("Alice", 30, eng).await;
        let bob = context.create_employee("Bob", 40, sales).await;
        let carol = context.create_employee("Carol", 50, eng).await;

        let views = context.driver().list_employees(EmployeeFilter::default()).await.unwrap();
        assert_eq!(
            vec![(alice, eng), (bob, sales), (carol, eng)],
            views.iter().map(|e| (e.id, e.department.id)).collect::<Vec<_>>()
        );
        assert_eq!("Sales", views[1].department.title.as_str());
    }

    #[tokio::test]
    async fn test_list_employees_age_bounds_are_inclusive() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let ages = [18, 30, 65];
        for (i, age) in ages.iter().enumerate() {
            context.create_employee(&format!("Employee {}", i), *age, dept).await;
        }

        for age in ages {
            let filter = EmployeeFilter { min_age: Some(age), ..Default::default() };
            let views = context.driver().list_employees(filter).await.unwrap();
            assert!(views.iter().any(|e| e.age.as_i64() == age));

            let filter = EmployeeFilter { max_age: Some(age - 1), ..Default::default() };
            let views = context.driver().list_employees(filter).await.unwrap();
            assert!(views.iter().all(|e| e.age.as_i64() != age));
        }
    }

    #[tokio::test]
    async fn test_list_employees_by_department_title() {
        let context = TestContext::setup().await;
        let eng1 = context.create_department("Engineering").await;
        let eng2 = context.create_department("Engineering").await;
        let sales = context.create_department("Sales").await;
        let alice = context.create_employee("Alice", 30, eng1).await;
        context.create_employee("Bob", 40, sales).await;
        let carol = context.create_employee("Carol", 50, eng2).await;

        let filter = EmployeeFilter {
            department_title: Some("Engineering".to_owned()),
            ..Default::default()
        };
        let views = context.driver().list_employees(filter).await.unwrap();
        assert_eq!(vec![alice, carol], views.into_iter().map(|e| e.id).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_create_employee() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;

        let data = employee_data("Alice", 30, dept);
        let view = context.driver().create_employee(data).await.unwrap();
        assert_eq!("Alice", view.name.as_str());
        assert_eq!(Sex::Female, view.sex);
        assert!(!view.is_fired);
        assert_eq!("Engineering", view.department.title.as_str());

        let row = db::get_employee(&mut context.ex().await, view.id).await.unwrap();
        assert_eq!(&employee_data("Alice", 30, dept), row.data());
    }

    #[tokio::test]
    async fn test_create_employee_unknown_department() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::InvalidInput(
                "department: Invalid pk \"8\" - object does not exist.".to_owned()
            ),
            context
                .driver()
                .create_employee(employee_data("Alice", 30, DepartmentId::new(8)))
                .await
                .unwrap_err()
        );
        let views = context.driver().list_employees(EmployeeFilter::default()).await.unwrap();
        assert!(views.is_empty());
    }

    #[tokio::test]
    async fn test_update_employee_moves_department() {
        let context = TestContext::setup().await;
        let eng = context.create_department("Engineering").await;
        let sales = context.create_department("Sales").await;
        let id = context.create_employee("Alice", 30, eng).await;

        let view =
            context.driver().update_employee(id, employee_data("Alice", 31, sales)).await.unwrap();
        assert_eq!(31, view.age.as_i64());
        assert_eq!(sales, view.department.id);
    }

    #[tokio::test]
    async fn test_update_employee_not_found_before_validation() {
        let context = TestContext::setup().await;

        let data = employee_data("Alice", 30, DepartmentId::new(8));
        assert_eq!(
            DriverError::NotFound("Entity not found".to_owned()),
            context.driver().update_employee(EmployeeId::new(3), data).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_patch_employee() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let id = context.create_employee("Alice", 30, dept).await;

        let patch: EmployeePatch =
            serde_json::from_value(serde_json::json!({"is_fired": true})).unwrap();
        let view = context.driver().patch_employee(id, patch).await.unwrap();
        assert!(view.is_fired);
        assert_eq!("Alice", view.name.as_str());
        assert_eq!(30, view.age.as_i64());

        let patch: EmployeePatch =
            serde_json::from_value(serde_json::json!({"department": 99})).unwrap();
        match context.driver().patch_employee(id, patch).await {
            Err(DriverError::InvalidInput(e)) => assert!(e.starts_with("department: Invalid pk")),
            e => panic!("Unexpected result {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_delete_employee() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let id = context.create_employee("Alice", 30, dept).await;

        context.driver().delete_employee(id).await.unwrap();

        assert_eq!(
            DbError::NotFound,
            db::get_employee(&mut context.ex().await, id).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_delete_employee_referenced_by_article() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let id = context.create_employee("Alice", 30, dept).await;
        let article = context.create_article("Hello", id).await;

        assert_eq!(
            DriverError::InvalidInput(format!(
                "Cannot delete employee {} because it is referenced by articles (1)",
                id
            )),
            context.driver().delete_employee(id).await.unwrap_err()
        );
        db::get_employee(&mut context.ex().await, id).await.unwrap();
        db::get_article(&mut context.ex().await, article).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_employee_referenced_by_result() {
        let context = TestContext::setup().await;
        let dept = context.create_department("Engineering").await;
        let alice = context.create_employee("Alice", 30, dept).await;
        let bob = context.create_employee("Bob", 40, dept).await;
        let (assessment, skill) = context.create_result_fixtures().await;
        context.create_result(assessment, alice, bob, skill, 70).await;

        for id in [alice, bob] {
            match context.driver().delete_employee(id).await {
                Err(DriverError::InvalidInput(e)) => assert!(e.contains("referenced by results")),
                e => panic!("Unexpected result {:?}", e),
            }
        }
    }
}
