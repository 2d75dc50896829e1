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

//! Operations on assessments.

use crate::db;
use crate::driver::{ensure_unreferenced, Driver};
use crate::model::*;
use skills_core::driver::DriverResult;

impl Driver {
    /// Gets all assessments.
    pub(crate) async fn list_assessments(self) -> DriverResult<Vec<AssessmentView>> {
        let mut tx = self.db.begin().await?;
        let rows = db::list_assessments(tx.ex()).await?;
        tx.commit().await?;
        Ok(rows.into_iter().map(AssessmentView::from).collect())
    }

    /// Gets the assessment `id`.
    pub(crate) async fn get_assessment(self, id: AssessmentId) -> DriverResult<AssessmentView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_assessment(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(AssessmentView::from(row))
    }

    /// Creates a new assessment with `data`.
    pub(crate) async fn create_assessment(
        self,
        data: AssessmentData,
    ) -> DriverResult<AssessmentView> {
        let mut tx = self.db.begin().await?;
        let id = db::create_assessment(tx.ex(), &data).await?;
        tx.commit().await?;
        Ok(AssessmentView::from(AssessmentRow::new(id, data)))
    }

    /// Replaces all fields of the assessment `id` with `data`.
    pub(crate) async fn update_assessment(
        self,
        id: AssessmentId,
        data: AssessmentData,
    ) -> DriverResult<AssessmentView> {
        let mut tx = self.db.begin().await?;
        db::update_assessment(tx.ex(), id, &data).await?;
        tx.commit().await?;
        Ok(AssessmentView::from(AssessmentRow::new(id, data)))
    }

    /// Updates the fields of the assessment `id` present in `patch`.
    pub(crate) async fn patch_assessment(
        self,
        id: AssessmentId,
        patch: AssessmentPatch,
    ) -> DriverResult<AssessmentView> {
        let mut tx = self.db.begin().await?;
        let row = db::get_assessment(tx.ex(), id).await?;
        let data = patch.apply(row.data().clone());
        db::update_assessment(tx.ex(), id, &data).await?;
        tx.commit().await?;
        Ok(AssessmentView::from(AssessmentRow::new(id, data)))
    }

    /// Deletes the assessment `id`, which must not have results.
    pub(crate) async fn delete_assessment(self, id: AssessmentId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::get_assessment(tx.ex(), id).await?;
        let results = db::count_results_by_assessment(tx.ex(), id).await?;
        ensure_unreferenced("assessment", id, "results", results)?;
        db::delete_assessment(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(())
    }
}
