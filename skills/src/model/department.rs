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

//! Departments.

use super::{deserialize_param, deserialize_present, DepartmentId, Title};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Fields of a department as given on create and full update.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct DepartmentData {
    /// Name of the department.
    title: Title,
}

/// Fields of a department that a partial update may change.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DepartmentPatch {
    /// New name of the department, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    title: Option<Title>,
}

impl DepartmentPatch {
    /// Overlays the fields present in this patch on top of `data`.
    pub(crate) fn apply(self, data: DepartmentData) -> DepartmentData {
        DepartmentData { title: self.title.unwrap_or(data.title) }
    }
}

/// A department as stored in the database.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct DepartmentRow {
    /// Identifier of the department.
    id: DepartmentId,

    /// Contents of the department.
    data: DepartmentData,
}

/// Read representation of a department.
#[derive(Clone, Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct DepartmentView {
    /// Identifier of the department.
    pub(crate) id: DepartmentId,

    /// Name of the department.
    pub(crate) title: Title,
}

impl From<DepartmentRow> for DepartmentView {
    fn from(row: DepartmentRow) -> Self {
        Self { id: row.id, title: row.data.title }
    }
}

/// Query parameters accepted when listing departments.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct DepartmentFilter {
    /// Terms that must all appear in the title, ignoring case.
    #[serde(default, deserialize_with = "deserialize_param")]
    pub(crate) search: Option<String>,
}
