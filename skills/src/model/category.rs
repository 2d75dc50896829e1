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

//! Skill categories.

use super::{deserialize_present, CategoryId, Title};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Fields of a category as given on create and full update.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct CategoryData {
    /// Name of the category.
    title: Title,
}

/// Fields of a category that a partial update may change.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CategoryPatch {
    /// New name of the category, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    title: Option<Title>,
}

impl CategoryPatch {
    /// Overlays the fields present in this patch on top of `data`.
    pub(crate) fn apply(self, data: CategoryData) -> CategoryData {
        CategoryData { title: self.title.unwrap_or(data.title) }
    }
}

/// A category as stored in the database.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct CategoryRow {
    /// Identifier of the category.
    id: CategoryId,

    /// Contents of the category.
    data: CategoryData,
}

/// Read representation of a category.
#[derive(Clone, Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct CategoryView {
    /// Identifier of the category.
    pub(crate) id: CategoryId,

    /// Name of the category.
    pub(crate) title: Title,
}

impl From<CategoryRow> for CategoryView {
    fn from(row: CategoryRow) -> Self {
        Self { id: row.id, title: row.data.title }
    }
}
