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

//! Rendering of filtered `SELECT` statements for the supported SQL dialects.
//!
//! Services describe the filters they accept as an explicit list of `Condition`s, each of which
//! ties a column to a comparator and a value.  A `Select` combines a base query with a conjunction
//! of those conditions and renders the final statement for a specific backend, leaving the values
//! as bound parameters.

/// SQL dialects that queries can be rendered for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dialect {
    /// PostgreSQL, which uses numbered placeholders and has a native case-insensitive `ILIKE`.
    Postgres,

    /// SQLite, which uses positional placeholders and whose `LIKE` ignores ASCII case.
    Sqlite,
}

impl Dialect {
    /// Returns the placeholder for the `n`th (1-based) bound parameter.
    fn placeholder(self, n: usize) -> String {
        match self {
            Dialect::Postgres => format!("${}", n),
            Dialect::Sqlite => "?".to_owned(),
        }
    }

    /// Returns the operator that matches a pattern ignoring case.
    fn like_operator(self) -> &'static str {
        match self {
            Dialect::Postgres => "ILIKE",
            Dialect::Sqlite => "LIKE",
        }
    }
}

/// A value bound to a query parameter.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A boolean value.
    Bool(bool),

    /// An integer value.
    Int(i64),

    /// A text value.
    Text(String),
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

/// Ways in which a column can be compared against a value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Comparator {
    /// The column equals the value.
    Equal,

    /// The column is greater than or equal to the value.
    AtLeast,

    /// The column is less than or equal to the value.
    AtMost,

    /// The column contains the value as a substring, ignoring case.
    Contains,
}

/// A single predicate over a column.
#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    /// Column or expression to compare.  Always a hardcoded string, never user input.
    column: &'static str,

    /// How to compare the column against the value.
    comparator: Comparator,

    /// Value to compare against.
    value: Value,
}

impl Condition {
    /// Creates a condition that matches rows where `column` equals `value`.
    pub fn equal<V: Into<Value>>(column: &'static str, value: V) -> Self {
        Self { column, comparator: Comparator::Equal, value: value.into() }
    }

    /// Creates a condition that matches rows where `column` is at least `value`.
    pub fn at_least<V: Into<Value>>(column: &'static str, value: V) -> Self {
        Self { column, comparator: Comparator::AtLeast, value: value.into() }
    }

    /// Creates a condition that matches rows where `column` is at most `value`.
    pub fn at_most<V: Into<Value>>(column: &'static str, value: V) -> Self {
        Self { column, comparator: Comparator::AtMost, value: value.into() }
    }

    /// Creates a condition that matches rows where `column` contains `text`, ignoring case.
    pub fn contains<S: Into<String>>(column: &'static str, text: S) -> Self {
        Self { column, comparator: Comparator::Contains, value: Value::Text(text.into()) }
    }

    /// Appends the SQL for this condition to `sql` using `n` as the parameter number and returns
    /// the value to bind to that parameter.
    fn render(&self, dialect: Dialect, n: usize, sql: &mut String) -> Value {
        let placeholder = dialect.placeholder(n);
        match self.comparator {
            Comparator::Equal => {
                sql.push_str(&format!("{} = {}", self.column, placeholder));
                self.value.clone()
            }
            Comparator::AtLeast => {
                sql.push_str(&format!("{} >= {}", self.column, placeholder));
                self.value.clone()
            }
            Comparator::AtMost => {
                sql.push_str(&format!("{} <= {}", self.column, placeholder));
                self.value.clone()
            }
            Comparator::Contains => {
                sql.push_str(&format!(
                    "{} {} {} ESCAPE '\\'",
                    self.column,
                    dialect.like_operator(),
                    placeholder
                ));
                let text = match &self.value {
                    Value::Text(s) => s.clone(),
                    Value::Bool(b) => b.to_string(),
                    Value::Int(i) => i.to_string(),
                };
                Value::Text(format!("%{}%", escape_like(&text)))
            }
        }
    }
}

/// Escapes the wildcards of a `LIKE` pattern so that `s` matches literally.
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch == '\\' || ch == '%' || ch == '_' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// A `SELECT` statement made of a base query and a conjunction of conditions.
#[derive(Debug)]
pub struct Select {
    /// The `SELECT ... FROM ...` part of the query, including any joins.
    base: &'static str,

    /// Conditions that rows must all satisfy.
    conditions: Vec<Condition>,

    /// Expression to sort the results by, if any.
    order_by: Option<&'static str>,
}

impl Select {
    /// Creates a new statement from the `base` query, which must not have a `WHERE` clause.
    pub fn new(base: &'static str) -> Self {
        Self { base, conditions: vec![], order_by: None }
    }

    /// Adds a `condition` that rows must satisfy.
    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds all `conditions` in order.
    pub fn and_all<I: IntoIterator<Item = Condition>>(mut self, conditions: I) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Sorts the results by `expr`.
    pub fn order_by(mut self, expr: &'static str) -> Self {
        self.order_by = Some(expr);
        self
    }

    /// Renders the statement for `dialect`, returning the SQL and the values to bind in order.
    pub fn render(&self, dialect: Dialect) -> (String, Vec<Value>) {
        let mut sql = self.base.to_owned();
        let mut values = Vec::with_capacity(self.conditions.len());
        for (i, condition) in self.conditions.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            values.push(condition.render(dialect, i + 1, &mut sql));
        }
        if let Some(order_by) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        (sql, values)
    }
}
