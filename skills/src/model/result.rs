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

//! Assessment results: the score one employee gave another on a skill.

use super::{
    deserialize_param, deserialize_present, AssessmentId, AssessmentView, EmployeeId,
    EmployeeView, ResultId, Score, SkillId, SkillView,
};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Fields of a result as given on create and full update.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct ResultData {
    /// Assessment campaign the result belongs to.
    assessment: AssessmentId,

    /// Employee who gave the score.
    evaluator: EmployeeId,

    /// Employee who received the score.
    evaluatee: EmployeeId,

    /// Skill that was scored.
    skill: SkillId,

    /// The score itself.
    score: Score,
}

/// Fields of a result that a partial update may change.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResultPatch {
    /// New assessment, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    assessment: Option<AssessmentId>,

    /// New evaluator, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    evaluator: Option<EmployeeId>,

    /// New evaluatee, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    evaluatee: Option<EmployeeId>,

    /// New skill, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    skill: Option<SkillId>,

    /// New score, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    score: Option<Score>,
}

impl ResultPatch {
    /// Overlays the fields present in this patch on top of `data`.
    pub(crate) fn apply(self, data: ResultData) -> ResultData {
        ResultData {
            assessment: self.assessment.unwrap_or(data.assessment),
            evaluator: self.evaluator.unwrap_or(data.evaluator),
            evaluatee: self.evaluatee.unwrap_or(data.evaluatee),
            skill: self.skill.unwrap_or(data.skill),
            score: self.score.unwrap_or(data.score),
        }
    }
}

/// A result as stored in the database.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct ResultRow {
    /// Identifier of the result.
    id: ResultId,

    /// Contents of the result.
    data: ResultData,
}

/// Read representation of a result, embedding everything it refers to.
#[derive(Clone, Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct ResultView {
    /// Identifier of the result.
    pub(crate) id: ResultId,

    /// Assessment campaign the result belongs to.
    pub(crate) assessment: AssessmentView,

    /// Employee who gave the score.
    pub(crate) evaluator: EmployeeView,

    /// Employee who received the score.
    pub(crate) evaluatee: EmployeeView,

    /// Skill that was scored.
    pub(crate) skill: SkillView,

    /// The score itself.
    pub(crate) score: Score,
}

/// Query parameters accepted when listing results.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ResultFilter {
    /// Only return results received by this employee.
    #[serde(default, deserialize_with = "deserialize_param")]
    pub(crate) evaluatee_id: Option<i64>,
}
