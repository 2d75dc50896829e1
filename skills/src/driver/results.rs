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

//! Operations on assessment results.

use crate::db;
use crate::driver::views::Resolver;
use crate::driver::{invalid_reference, Driver};
use crate::model::*;
use skills_core::db::{DbResult, Executor};
use skills_core::driver::DriverResult;

/// Checks that the entities referenced by `data` exist.
async fn validate_references(ex: &mut Executor, data: &ResultData) -> DriverResult<()> {
    let assessment = *data.assessment();
    db::get_assessment(ex, assessment)
        .await
        .map_err(invalid_reference("assessment", assessment))?;
    let evaluator = *data.evaluator();
    db::get_employee(ex, evaluator).await.map_err(invalid_reference("evaluator", evaluator))?;
    let evaluatee = *data.evaluatee();
    db::get_employee(ex, evaluatee).await.map_err(invalid_reference("evaluatee", evaluatee))?;
    let skill = *data.skill();
    db::get_skill(ex, skill).await.map_err(invalid_reference("skill", skill))?;
    Ok(())
}

/// Builds the view of the result `id` after writing `data` to it.
async fn written_view(ex: &mut Executor, id: ResultId, data: ResultData) -> DbResult<ResultView> {
    Resolver::new(ex).result_view(ResultRow::new(id, data)).await
}

impl Driver {
    /// Gets all results that match `filter`.
    pub(crate) async fn list_results(self, filter: ResultFilter) -> DriverResult<Vec<ResultView>> {
        let mut tx = self.db.begin().await?;
        let rows = db::list_results(tx.ex(), &filter).await?;
        let views = Resolver::new(tx.ex()).result_views(rows).await?;
        tx.commit().await?;
        Ok(views)
    }

    /// Gets the result `id`.
    pub(crate) async fn get_result(self, id: ResultId) -> DriverResult<ResultView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_result(tx.ex(), id).await?;
        let view = Resolver::new(tx.ex()).result_view(row).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Records a new result with `data`.
    pub(crate) async fn create_result(self, data: ResultData) -> DriverResult<ResultView> {
        let mut tx = self.db.begin().await?;
        validate_references(tx.ex(), &data).await?;
        let id = db::create_result(tx.ex(), &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Replaces all fields of the result `id` with `data`.
    pub(crate) async fn update_result(
        self,
        id: ResultId,
        data: ResultData,
    ) -> DriverResult<ResultView> {
        let mut tx = self.db.begin().await?;
        db::get_result(tx.ex(), id).await?;
        validate_references(tx.ex(), &data).await?;
        db::update_result(tx.ex(), id, &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Updates the fields of the result `id` present in `patch`.
    pub(crate) async fn patch_result(
        self,
        id: ResultId,
        patch: ResultPatch,
    ) -> DriverResult<ResultView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_result(tx.ex(), id).await?;
        let data = patch.apply(row.data().clone());
        validate_references(tx.ex(), &data).await?;
        db::update_result(tx.ex(), id, &data).await?;
        let view = written_view(tx.ex(), id, data).await?;
        tx.commit().await?;
        Ok(view)
    }

    /// Deletes the result `id`.
    pub(crate) async fn delete_result(self, id: ResultId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_result(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(())
    }
}
