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

//! Articles written by employees.

use super::{
    deserialize_param, deserialize_present, ArticleId, EmployeeId, EmployeeView, Title,
};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Fields of an article as given on create and full update.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct ArticleData {
    /// Headline of the article.
    title: Title,

    /// Body of the article.
    #[serde(default)]
    content: String,

    /// Employee who wrote the article.
    author: EmployeeId,
}

/// Fields of an article that a partial update may change.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ArticlePatch {
    /// New headline, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    title: Option<Title>,

    /// New body, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    content: Option<String>,

    /// New author, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    author: Option<EmployeeId>,
}

impl ArticlePatch {
    /// Overlays the fields present in this patch on top of `data`.
    pub(crate) fn apply(self, data: ArticleData) -> ArticleData {
        ArticleData {
            title: self.title.unwrap_or(data.title),
            content: self.content.unwrap_or(data.content),
            author: self.author.unwrap_or(data.author),
        }
    }
}

/// An article as stored in the database.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct ArticleRow {
    /// Identifier of the article.
    id: ArticleId,

    /// Contents of the article.
    data: ArticleData,
}

/// Read representation of an article, embedding its author.
#[derive(Clone, Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct ArticleView {
    /// Identifier of the article.
    pub(crate) id: ArticleId,

    /// Headline of the article.
    pub(crate) title: Title,

    /// Body of the article.
    pub(crate) content: String,

    /// Employee who wrote the article.
    pub(crate) author: EmployeeView,
}

impl ArticleView {
    /// Builds the view of `row` given the already-resolved view of its `author`.
    pub(crate) fn new(row: ArticleRow, author: EmployeeView) -> Self {
        Self { id: row.id, title: row.data.title, content: row.data.content, author }
    }
}

/// Query parameters accepted when listing articles.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ArticleFilter {
    /// Terms that must all appear in the title, ignoring case.
    #[serde(default, deserialize_with = "deserialize_param")]
    pub(crate) search: Option<String>,
}
