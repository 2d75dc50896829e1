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

//! Persistence of employees.

use super::{expect_one_row, InsertedId};
use crate::model::*;
use skills_core::db::query::{Condition, Select};
use skills_core::db::{
    execute, fetch_all, fetch_count, fetch_one, query_one, DbError, DbResult, Executor,
};

/// Base query to fetch employees.  Joins the departments so that filters can refer to them.
const SELECT_EMPLOYEES: &str = "
    SELECT e.id, e.name, e.age, e.sex, e.is_fired, e.department_id
    FROM employees e JOIN departments d ON d.id = e.department_id";

impl_from_db_row!(EmployeeRow, |row| {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let age: i64 = row.try_get("age").map_err(map_sqlx_error)?;
    let sex: String = row.try_get("sex").map_err(map_sqlx_error)?;
    let is_fired: bool = row.try_get("is_fired").map_err(map_sqlx_error)?;
    let department_id: i64 = row.try_get("department_id").map_err(map_sqlx_error)?;

    let sex = sex.parse::<Sex>().map_err(|e| DbError::DataIntegrityError(e.to_string()))?;
    let data = EmployeeData::new(
        Name::new(name)?,
        Age::new(age)?,
        sex,
        is_fired,
        DepartmentId::new(department_id),
    );
    Ok(EmployeeRow::new(EmployeeId::new(id), data))
});

/// Creates a new employee with the contents in `data` and returns its identifier.
pub(crate) async fn create_employee(
    ex: &mut Executor,
    data: &EmployeeData,
) -> DbResult<EmployeeId> {
    let id: InsertedId = query_one(
        ex,
        "INSERT INTO employees (name, age, sex, is_fired, department_id)
        VALUES ($1, $2, $3, $4, $5) RETURNING id",
        vec![
            data.name().as_str().into(),
            data.age().as_i64().into(),
            data.sex().as_str().into(),
            (*data.is_fired()).into(),
            data.department().as_i64().into(),
        ],
    )
    .await?;
    Ok(EmployeeId::new(id.0))
}

/// Gets the employee identified by `id`.
pub(crate) async fn get_employee(ex: &mut Executor, id: EmployeeId) -> DbResult<EmployeeRow> {
    let select = Select::new(SELECT_EMPLOYEES).and(Condition::equal("e.id", id.as_i64()));
    fetch_one(ex, &select).await
}

/// Gets all employees that match `filter`, sorted by identifier.
pub(crate) async fn list_employees(
    ex: &mut Executor,
    filter: &EmployeeFilter,
) -> DbResult<Vec<EmployeeRow>> {
    let mut select = Select::new(SELECT_EMPLOYEES);
    if let Some(search) = filter.search.as_deref() {
        let terms = search_terms(search).map(|term| Condition::contains("e.name", term));
        select = select.and_all(terms);
    }
    if let Some(is_fired) = filter.is_fired {
        select = select.and(Condition::equal("e.is_fired", is_fired));
    }
    if let Some(sex) = filter.sex {
        select = select.and(Condition::equal("e.sex", sex.as_str()));
    }
    if let Some(title) = filter.department_title.as_deref() {
        select = select.and(Condition::equal("d.title", title));
    }
    if let Some(min_age) = filter.min_age {
        select = select.and(Condition::at_least("e.age", min_age));
    }
    if let Some(max_age) = filter.max_age {
        select = select.and(Condition::at_most("e.age", max_age));
    }
    fetch_all(ex, &select.order_by("e.id")).await
}

/// Replaces the contents of the employee identified by `id` with `data`.
pub(crate) async fn update_employee(
    ex: &mut Executor,
    id: EmployeeId,
    data: &EmployeeData,
) -> DbResult<()> {
    let rows_affected = execute(
        ex,
        "UPDATE employees SET name = $1, age = $2, sex = $3, is_fired = $4, department_id = $5
        WHERE id = $6",
        vec![
            data.name().as_str().into(),
            data.age().as_i64().into(),
            data.sex().as_str().into(),
            (*data.is_fired()).into(),
            data.department().as_i64().into(),
            id.as_i64().into(),
        ],
    )
    .await?;
    expect_one_row(rows_affected)
}

/// Deletes the employee identified by `id`.
pub(crate) async fn delete_employee(ex: &mut Executor, id: EmployeeId) -> DbResult<()> {
    let rows_affected =
        execute(ex, "DELETE FROM employees WHERE id = $1", vec![id.as_i64().into()]).await?;
    expect_one_row(rows_affected)
}

/// Counts the employees that belong to the department identified by `id`.
pub(crate) async fn count_employees_in_department(
    ex: &mut Executor,
    id: DepartmentId,
) -> DbResult<u64> {
    let select = Select::new("SELECT COUNT(*) AS count FROM employees")
        .and(Condition::equal("department_id", id.as_i64()));
    fetch_count(ex, &select).await
}
