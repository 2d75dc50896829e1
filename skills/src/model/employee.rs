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

//! Employees.

use super::{
    deserialize_flag, deserialize_param, deserialize_present, Age, DepartmentId, DepartmentView,
    EmployeeId, Name, Sex,
};
use derive_getters::Getters;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Fields of an employee as given on create and full update.
#[derive(Clone, Constructor, Debug, Deserialize, Getters, PartialEq, Serialize)]
pub(crate) struct EmployeeData {
    /// Full name of the employee.
    name: Name,

    /// Age of the employee.
    age: Age,

    /// Sex of the employee.
    sex: Sex,

    /// Whether the employee no longer works for the company.
    #[serde(default)]
    is_fired: bool,

    /// Department the employee belongs to.
    department: DepartmentId,
}

/// Fields of an employee that a partial update may change.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EmployeePatch {
    /// New name, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    name: Option<Name>,

    /// New age, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    age: Option<Age>,

    /// New sex, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    sex: Option<Sex>,

    /// New dismissal status, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    is_fired: Option<bool>,

    /// New department, if any.
    #[serde(default, deserialize_with = "deserialize_present")]
    department: Option<DepartmentId>,
}

impl EmployeePatch {
    /// Overlays the fields present in this patch on top of `data`.
    pub(crate) fn apply(self, data: EmployeeData) -> EmployeeData {
        EmployeeData {
            name: self.name.unwrap_or(data.name),
            age: self.age.unwrap_or(data.age),
            sex: self.sex.unwrap_or(data.sex),
            is_fired: self.is_fired.unwrap_or(data.is_fired),
            department: self.department.unwrap_or(data.department),
        }
    }
}

/// An employee as stored in the database.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct EmployeeRow {
    /// Identifier of the employee.
    id: EmployeeId,

    /// Contents of the employee.
    data: EmployeeData,
}

/// Read representation of an employee, embedding its department.
#[derive(Clone, Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize, PartialEq))]
pub(crate) struct EmployeeView {
    /// Identifier of the employee.
    pub(crate) id: EmployeeId,

    /// Full name of the employee.
    pub(crate) name: Name,

    /// Age of the employee.
    pub(crate) age: Age,

    /// Sex of the employee.
    pub(crate) sex: Sex,

    /// Whether the employee no longer works for the company.
    pub(crate) is_fired: bool,

    /// Department the employee belongs to.
    pub(crate) department: DepartmentView,
}

impl EmployeeView {
    /// Builds the view of `row` given the already-resolved view of its `department`.
    pub(crate) fn new(row: EmployeeRow, department: DepartmentView) -> Self {
        let data = row.data;
        Self {
            id: row.id,
            name: data.name,
            age: data.age,
            sex: data.sex,
            is_fired: data.is_fired,
            department,
        }
    }
}

/// Query parameters accepted when listing employees.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EmployeeFilter {
    /// Terms that must all appear in the name, ignoring case.
    #[serde(default, deserialize_with = "deserialize_param")]
    pub(crate) search: Option<String>,

    /// Exact dismissal status.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub(crate) is_fired: Option<bool>,

    /// Exact sex.
    #[serde(default, deserialize_with = "deserialize_param")]
    pub(crate) sex: Option<Sex>,

    /// Exact title of the employee's department.
    #[serde(default, rename = "department__title", deserialize_with = "deserialize_param")]
    pub(crate) department_title: Option<String>,

    /// Minimum age, inclusive.
    #[serde(default, deserialize_with = "deserialize_param")]
    pub(crate) min_age: Option<i64>,

    /// Maximum age, inclusive.
    #[serde(default, deserialize_with = "deserialize_param")]
    pub(crate) max_age: Option<i64>,
}
