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

//! Generic types for the model layer.

/// Model errors.  These are raised when an untrusted value does not satisfy the invariants of the
/// type it is being converted into.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Checks that `s`, which is the value of a text field described by `what`, is not empty and has
/// at most `max_length` characters.
pub fn validate_text(what: &str, s: &str, max_length: usize) -> ModelResult<()> {
    if s.trim().is_empty() {
        return Err(ModelError(format!("{} cannot be empty", what)));
    }
    if s.chars().count() > max_length {
        return Err(ModelError(format!("{} is too long (max {} characters)", what, max_length)));
    }
    Ok(())
}
