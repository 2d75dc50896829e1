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

//! Operations on skills.

use crate::db;
use crate::driver::views::Resolver;
use crate::driver::{ensure_unreferenced, invalid_reference, Driver};
use crate::model::*;
use skills_core::db::{DbResult, Executor};
use skills_core::driver::DriverResult;

/// Checks that the entities referenced by `data` exist.
async fn validate_references(ex: &mut Executor, data: &SkillData) -> DriverResult<()> {
    let category = *data.category();
    db::get_category(ex, category).await.map_err(invalid_reference("category", category))?;
    Ok(())
}

/// Builds the view of the skill `id` after writing `data` to it.
async fn written_view(ex: &mut Executor, id: SkillId, data: SkillData) -> DbResult<SkillView> {
    Resolver::new(ex).skill_view(SkillRow::new(id, data)).await
}

impl Driver {
    /// Gets all skills.
    pub(crate) async fn list_skills(self) -> DriverResult<Vec<SkillView>> {
        let mut tx = self.db.begin().await?;
        let rows = db::list_skills(tx.ex()).await?;
        let views = Resolver::new(tx.ex()).skill_views(rows).await?;
        tx.commit().await?;
        Ok(views)
    }

    /// Gets the skill `id`.
    pub(crate) async fn get_skill(self, id: SkillId) -> DriverResult<SkillView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_skill(tx.ex(), id).await?;
        let view = Resolver::new(tx.ex()).skill_view(row).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Creates a new skill with `data`.
    pub(crate) async fn create_skill(self, data: SkillData) -> DriverResult<SkillView> {
        let mut tx = self.db.begin().await?;
        validate_references(tx.ex(), &data).await?;
        let id = db::create_skill(tx.ex(), &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Replaces all fields of the skill `id` with `data`.
    pub(crate) async fn update_skill(
        self,
        id: SkillId,
        data: SkillData,
    ) -> DriverResult<SkillView> {
        let mut tx = self.db.begin().await?;
        db::get_skill(tx.ex(), id).await?;
        validate_references(tx.ex(), &data).await?;
        db::update_skill(tx.ex(), id, &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Updates the fields of the skill `id` present in `patch`.
    pub(crate) async fn patch_skill(
        self,
        id: SkillId,
        patch: SkillPatch,
    ) -> DriverResult<SkillView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_skill(tx.ex(), id).await?;
        let data = patch.apply(row.data().clone());
        validate_references(tx.ex(), &data).await?;
        db::update_skill(tx.ex(), id, &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Deletes the skill `id`, which must not have been scored in any result.
    pub(crate) async fn delete_skill(self, id: SkillId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::get_skill(tx.ex(), id).await?;
        let results = db::count_results_by_skill(tx.ex(), id).await?;
        ensure_unreferenced("skill", id, "results", results)?;
        db::delete_skill(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(())
    }
}
