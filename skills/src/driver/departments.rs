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

//! Operations on departments.

use crate::db;
use crate::driver::{ensure_unreferenced, Driver};
use crate::model::*;
use skills_core::driver::DriverResult;

impl Driver {
    /// Gets all departments that match `filter`.
    pub(crate) async fn list_departments(
        self,
        filter: DepartmentFilter,
    ) -> DriverResult<Vec<DepartmentView>> {
        let mut tx = self.db.begin().await?;
        let rows = db::list_departments(tx.ex(), &filter).await?;
        tx.commit().await?;
        Ok(rows.into_iter().map(DepartmentView::from).collect())
    }

    /// Gets the department `id`.
    pub(crate) async fn get_department(self, id: DepartmentId) -> DriverResult<DepartmentView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_department(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(DepartmentView::from(row))
    }

    /// Creates a new department with `data`.
    pub(crate) async fn create_department(
        self,
        data: DepartmentData,
    ) -> DriverResult<DepartmentView> {
        let mut tx = self.db.begin().await?;
        let id = db::create_department(tx.ex(), &data).await?;
        tx.commit().await?;
        Ok(DepartmentView::from(DepartmentRow::new(id, data)))
    }

    /// Replaces all fields of the department `id` with `data`.
    pub(crate) async fn update_department(
        self,
        id: DepartmentId,
        data: DepartmentData,
    ) -> DriverResult<DepartmentView> {
        let mut tx = self.db.begin().await?;
        db::update_department(tx.ex(), id, &data).await?;
        tx.commit().await?;
        Ok(DepartmentView::from(DepartmentRow::new(id, data)))
    }

    /// Updates the fields of the department `id` present in `patch`.
    pub(crate) async fn patch_department(
        self,
        id: DepartmentId,
        patch: DepartmentPatch,
    ) -> DriverResult<DepartmentView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_department(tx.ex(), id).await?;
        let data = patch.apply(row.data().clone());
        db::update_department(tx.ex(), id, &data).await?;
        tx.commit().await?;
        Ok(DepartmentView::from(DepartmentRow::new(id, data)))
    }

    /// Deletes the department `id`, which must not have any employees.
    pub(crate) async fn delete_department(self, id: DepartmentId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::get_department(tx.ex(), id).await?;
        let employees = db::count_employees_in_department(tx.ex(), id).await?;
        ensure_unreferenced("department", id, "employees", employees)?;
        db::delete_department(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(())
    }
}
