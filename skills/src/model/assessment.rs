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

//! Assessment campaigns.

use super::{deserialize_present, AssessmentId, Title};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Fields of an assessment as given on create and full update.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct AssessmentData {
    /// Name of the assessment, such as the period it covers.
    title: Title,

    /// Free-form details about the assessment.
    #[serde(default)]
    description: String,
}

/// Fields of an assessment that a partial update may change.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AssessmentPatch {
    /// New name, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    title: Option<Title>,

    /// New details, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    description: Option<String>,
}

impl AssessmentPatch {
    /// Overlays the fields present in this patch on top of `data`.
    pub(crate) fn apply(self, data: AssessmentData) -> AssessmentData {
        AssessmentData {
            title: self.title.unwrap_or(data.title),
            description: self.description.unwrap_or(data.description),
        }
    }
}

/// An assessment as stored in the database.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct AssessmentRow {
    /// Identifier of the assessment.
    id: AssessmentId,

    /// Contents of the assessment.
    data: AssessmentData,
}

/// Read representation of an assessment.
#[derive(Clone, Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct AssessmentView {
    /// Identifier of the assessment.
    pub(crate) id: AssessmentId,

    /// Name of the assessment.
    pub(crate) title: Title,

    /// Free-form details about the assessment.
    pub(crate) description: String,
}

impl From<AssessmentRow> for AssessmentView {
    fn from(row: AssessmentRow) -> Self {
        Self { id: row.id, title: row.data.title, description: row.data.description }
    }
}
