//! Filter construction for list queries.
//!
//! A filter is a list of clauses ANDed together in the WHERE clause. Free-text
//! search becomes a single case-insensitive contains clause ORed across the
//! designated text columns; enumerated fields become exact-match clauses.
//! Search input is passed through `regex::escape` before it reaches the
//! database, so `.` `*` `+` `?` `^` `$` `{` `}` `(` `)` `|` `[` `]` `\` in
//! user text match literally.

use regex::escape;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Case-insensitive substring match ORed across several text columns.
    AnyContains {
        fields: &'static [&'static str],
        pattern: String,
    },
    /// Exact match on a single column expression.
    Equals { field: &'static str, value: String },
}

/// Predicate over a record collection. An empty filter matches everything
/// and renders to no WHERE clause at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<FilterClause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contains clause for `term` across `fields`. Whitespace-only
    /// terms are ignored.
    pub fn contains_any(mut self, fields: &'static [&'static str], term: Option<&str>) -> Self {
        if let Some(term) = term {
            let term = term.trim();
            if !term.is_empty() {
                self.clauses.push(FilterClause::AnyContains {
                    fields,
                    pattern: escape(term),
                });
            }
        }
        self
    }

    /// Add an exact-match clause when `value` is present and non-empty.
    /// `field` is a column expression, e.g. `status` or `sheet_id::text`.
    pub fn equals(mut self, field: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            let value = value.trim();
            if !value.is_empty() {
                self.clauses.push(FilterClause::Equals {
                    field,
                    value: value.to_string(),
                });
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Render a WHERE clause with Postgres placeholders numbered from
    /// `start`, returning the clause and the bind values in order. The same
    /// output feeds both the count and the page query.
    pub fn to_sql(&self, start: u32) -> (String, Vec<String>) {
        let mut conditions = Vec::new();
        let mut binds = Vec::new();
        let mut index = start;
        for clause in &self.clauses {
            match clause {
                FilterClause::AnyContains { fields, pattern } => {
                    let ors: Vec<String> =
                        fields.iter().map(|f| format!("{f} ~* ${index}")).collect();
                    conditions.push(format!("({})", ors.join(" OR ")));
                    binds.push(pattern.clone());
                }
                FilterClause::Equals { field, value } => {
                    conditions.push(format!("{field} = ${index}"));
                    binds.push(value.clone());
                }
            }
            index += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        (where_clause, binds)
    }
}
