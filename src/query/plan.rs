//! Assembly of parameterized list-query plans from untrusted input.
//!
//! Every caller-supplied value travels as a bound parameter. The only
//! string-substituted pieces of the generated text are the sort column and
//! direction, and those are resolved through the sort safelist before they
//! get anywhere near the query.

use crate::query::filters::{Filters, SortDirection};
use crate::validation::{ValidationErrors, Validator};

/// A free-text predicate over one column.
///
/// An empty value is a pass-through wildcard: the generated predicate is
/// `(to_tsvector(col) @@ plainto_tsquery($n) OR $n = '')`, so a field the
/// client left blank matches every row instead of none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFilter {
    /// Column to match against. Developer-supplied, never request input.
    pub column: String,

    /// Raw query text from the request; bound, never substituted.
    pub value: String,
}

/// A bind value for the generated statement, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Int(i64),
}

/// A validated, ready-to-render list query plan.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    /// Sort column, already resolved through the safelist.
    pub sort_column: String,

    /// Sort direction, from the signed form of the matched safelist entry.
    pub sort_direction: SortDirection,

    /// Row cap, equal to the requested page size.
    pub limit: i64,

    /// Rows skipped: `(page - 1) * page_size`.
    pub offset: i64,

    /// Free-text predicates, one per filterable column.
    pub text_filters: Vec<TextFilter>,
}

/// Build a query plan from per-resource filter fields and the common
/// pagination/sort filters.
///
/// `fields` pairs each filterable column with the raw value taken from the
/// request (empty string when absent). Pure function; all constraint
/// violations are accumulated into a single error set.
pub fn plan(fields: &[(&str, &str)], filters: &Filters) -> Result<QueryPlan, ValidationErrors> {
    let mut v = Validator::new();
    filters.validate(&mut v);

    match (v.is_empty(), filters.safelist.resolve(&filters.sort)) {
        (true, Some((column, direction))) => Ok(QueryPlan {
            sort_column: column.to_string(),
            sort_direction: direction,
            limit: filters.limit(),
            offset: filters.offset(),
            text_filters: fields
                .iter()
                .map(|(column, value)| TextFilter {
                    column: (*column).to_string(),
                    value: (*value).to_string(),
                })
                .collect(),
        }),
        _ => Err(v.into_errors()),
    }
}

impl QueryPlan {
    /// Render the plan as a parameterized `SELECT` in the store's dialect,
    /// together with its bind values in placeholder order.
    ///
    /// The statement carries `COUNT(*) OVER()` as its first column so one
    /// round trip yields both the page of rows and the total-record count
    /// the metadata is derived from. `table` and `columns` are
    /// developer-supplied identifiers. A trailing `id ASC` keeps the order
    /// total when the sort column has duplicates.
    pub fn select_sql(&self, table: &str, columns: &[&str]) -> (String, Vec<BindValue>) {
        let mut sql = format!(
            "SELECT COUNT(*) OVER(), {} FROM {}",
            columns.join(", "),
            table
        );
        let mut args = Vec::with_capacity(self.text_filters.len() + 2);

        for filter in &self.text_filters {
            sql.push_str(if args.is_empty() { " WHERE " } else { " AND " });
            let n = args.len() + 1;
            sql.push_str(&format!(
                "(to_tsvector('simple', {col}) @@ plainto_tsquery('simple', ${n}) OR ${n} = '')",
                col = filter.column,
            ));
            args.push(BindValue::Text(filter.value.clone()));
        }

        sql.push_str(&format!(
            " ORDER BY {} {}, id ASC LIMIT ${} OFFSET ${}",
            self.sort_column,
            self.sort_direction.as_sql(),
            args.len() + 1,
            args.len() + 2,
        ));
        args.push(BindValue::Int(self.limit));
        args.push(BindValue::Int(self.offset));

        (sql, args)
    }
}
