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

//! Operations on skill categories.

use crate::db;
use crate::driver::{ensure_unreferenced, Driver};
use crate::model::*;
use skills_core::driver::DriverResult;

impl Driver {
    /// Gets all categories.
    pub(crate) async fn list_categories(self) -> DriverResult<Vec<CategoryView>> {
        let mut tx = self.db.begin().await?;
        let rows = db::list_categories(tx.ex()).await?;
        tx.commit().await?;
        Ok(rows.into_iter().map(CategoryView::from).collect())
    }

    /// Gets the category `id`.
    pub(crate) async fn get_category(self, id: CategoryId) -> DriverResult<CategoryView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_category(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(CategoryView::from(row))
    }

    /// Creates a new category with `data`.
    pub(crate) async fn create_category(self, data: CategoryData) -> DriverResult<CategoryView> {
        let mut tx = self.db.begin().await?;
        let id = db::create_category(tx.ex(), &data).await?;
        tx.commit().await?;
        Ok(CategoryView::from(CategoryRow::new(id, data)))
    }

    /// Replaces all fields of the category `id` with `data`.
    pub(crate) async fn update_category(
        self,
        id: CategoryId,
        data: CategoryData,
    ) -> DriverResult<CategoryView> {
        let mut tx = self.db.begin().await?;
        db::update_category(tx.ex(), id, &data).await?;
        tx.commit().await?;
        Ok(CategoryView::from(CategoryRow::new(id, data)))
    }

    /// Updates the fields of the category `id` present in `patch`.
    pub(crate) async fn patch_category(
        self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> DriverResult<CategoryView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_category(tx.ex(), id).await?;
        let data = patch.apply(row.data().clone());
        db::update_category(tx.ex(), id, &data).await?;
        tx.commit().await?;
        Ok(CategoryView::from(CategoryRow::new(id, data)))
    }

    /// Deletes the category `id`, which must not contain skills.
    pub(crate) async fn delete_category(self, id: CategoryId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::get_category(tx.ex(), id).await?;
        let skills = db::count_skills_in_category(tx.ex(), id).await?;
        ensure_unreferenced("category", id, "skills", skills)?;
        db::delete_category(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(())
    }
}
