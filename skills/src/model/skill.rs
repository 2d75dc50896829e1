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

//! Skills that employees are assessed on.

use super::{deserialize_present, CategoryId, CategoryView, Name, SkillId};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Fields of a skill as given on create and full update.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct SkillData {
    /// Name of the skill.
    name: Name,

    /// Free-form explanation of what the skill covers.
    #[serde(default)]
    description: String,

    /// Category the skill belongs to.
    category: CategoryId,
}

/// Fields of a skill that a partial update may change.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SkillPatch {
    /// New name, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    name: Option<Name>,

    /// New description, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    description: Option<String>,

    /// New category, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    category: Option<CategoryId>,
}

impl SkillPatch {
    /// Overlays the fields present in this patch on top of `data`.
    pub(crate) fn apply(self, data: SkillData) -> SkillData {
        SkillData {
            name: self.name.unwrap_or(data.name),
            description: self.description.unwrap_or(data.description),
            category: self.category.unwrap_or(data.category),
        }
    }
}

/// A skill as stored in the database.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct SkillRow {
    /// Identifier of the skill.
    id: SkillId,

    /// Contents of the skill.
    data: SkillData,
}

/// Read representation of a skill, embedding its category.
#[derive(Clone, Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct SkillView {
    /// Identifier of the skill.
    pub(crate) id: SkillId,

    /// Name of the skill.
    pub(crate) name: Name,

    /// Free-form explanation of what the skill covers.
    pub(crate) description: String,

    /// Category the skill belongs to.
    pub(crate) category: CategoryView,
}

impl SkillView {
    /// Builds the view of `row` given the already-resolved view of its `category`.
    pub(crate) fn new(row: SkillRow, category: CategoryView) -> Self {
        Self { id: row.id, name: row.data.name, description: row.data.description, category }
    }
}
