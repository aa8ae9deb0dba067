//! Declarative per-entity query specification.

use super::{BindValue, BuiltQuery, FilterParams, SortSpec};

/// How a filter value turns into a predicate.
#[derive(Debug, Clone, Copy)]
pub enum FilterKind {
    /// `column = ?`
    Equals(&'static str),
    /// Comma-separated list, `column IN (?, ?, ...)`.
    InList(&'static str),
    /// Case-insensitive substring match OR-ed across columns.
    /// `%` and `_` in the term are not escaped and act as LIKE wildcards.
    Search(&'static [&'static str]),
}

/// A filter key and the predicate it produces.
#[derive(Debug, Clone, Copy)]
pub struct FilterColumn {
    pub key: &'static str,
    pub kind: FilterKind,
}

impl FilterColumn {
    #[must_use]
    pub const fn new(key: &'static str, kind: FilterKind) -> Self {
        Self { key, kind }
    }

    /// Appends this column's predicate and parameters, if it has any.
    fn push(&self, value: &BindValue, predicates: &mut Vec<String>, params: &mut Vec<BindValue>) {
        match self.kind {
            FilterKind::Equals(column) => {
                predicates.push(format!("{} = ?", column));
                params.push(value.clone());
            }
            FilterKind::InList(column) => {
                let text = value.to_text();
                let items: Vec<&str> = text
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect();
                if items.is_empty() {
                    return;
                }
                let placeholders = vec!["?"; items.len()].join(", ");
                predicates.push(format!("{} IN ({})", column, placeholders));
                params.extend(items.into_iter().map(BindValue::from));
            }
            FilterKind::Search(columns) => {
                let term = format!("%{}%", value.to_text().trim().to_lowercase());
                let ors: Vec<String> = columns
                    .iter()
                    .map(|c| format!("LOWER({}) LIKE ?", c))
                    .collect();
                predicates.push(format!("({})", ors.join(" OR ")));
                params.extend(columns.iter().map(|_| BindValue::Text(term.clone())));
            }
        }
    }
}

/// Base statement, ordered filters and sort allow-list of one entity.
#[derive(Debug, Clone, Copy)]
pub struct QuerySpec {
    pub base: &'static str,
    pub filters: &'static [FilterColumn],
    pub sort: SortSpec,
}

impl QuerySpec {
    /// Builds the full statement.
    ///
    /// Predicates follow the order of [`QuerySpec::filters`], not the order
    /// of `params`. Absent or blank values contribute nothing.
    #[must_use]
    pub fn build(&self, params: &FilterParams, sorted: Option<&str>) -> BuiltQuery {
        let mut predicates = Vec::new();
        let mut bound = Vec::new();

        for column in self.filters {
            match params.get(column.key) {
                Some(value) if !value.is_blank() => {
                    column.push(value, &mut predicates, &mut bound);
                }
                _ => {}
            }
        }

        let mut sql = self.base.trim().to_string();
        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }
        sql.push(' ');
        sql.push_str(&self.sort.resolve(sorted));

        BuiltQuery { sql, params: bound }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SortDirection;

    const SPEC: QuerySpec = QuerySpec {
        base: "SELECT * FROM t",
        filters: &[
            FilterColumn::new("id", FilterKind::Equals("t.id")),
            FilterColumn::new("q", FilterKind::Search(&["t.a", "t.b"])),
            FilterColumn::new("state", FilterKind::InList("t.state")),
        ],
        sort: SortSpec {
            prefix: "t.",
            allowed: &["a"],
            default_column: "a",
            default_direction: SortDirection::Asc,
        },
    };

    #[test]
    fn test_no_filters_no_where() {
        let built = SPEC.build(&FilterParams::new(), None);
        assert_eq!(built.sql, "SELECT * FROM t ORDER BY t.a ASC");
        assert!(built.params.is_empty());
    }

    #[test]
    fn test_spec_order_wins_over_param_order() {
        let mut params = FilterParams::new();
        params.insert("state", "open".into());
        params.insert("id", 7i64.into());

        let built = SPEC.build(&params, None);
        assert_eq!(
            built.sql,
            "SELECT * FROM t WHERE t.id = ? AND t.state IN (?) ORDER BY t.a ASC"
        );
        assert_eq!(
            built.params,
            vec![BindValue::Int(7), BindValue::Text("open".to_string())]
        );
    }

    #[test]
    fn test_list_drops_empty_items() {
        let mut params = FilterParams::new();
        params.insert("state", " a, ,b ,".into());

        let built = SPEC.build(&params, None);
        assert!(built.sql.contains("t.state IN (?, ?)"));
        assert_eq!(built.params, vec![BindValue::from("a"), BindValue::from("b")]);
    }

    #[test]
    fn test_list_of_only_separators_is_absent() {
        let mut params = FilterParams::new();
        params.insert("state", " , ,".into());

        let built = SPEC.build(&params, None);
        assert!(!built.sql.contains("WHERE"));
        assert!(built.params.is_empty());
    }

    #[test]
    fn test_search_binds_lowercased_term_per_column() {
        let mut params = FilterParams::new();
        params.insert("q", "  Taxi ".into());

        let built = SPEC.build(&params, None);
        assert!(built
            .sql
            .contains("WHERE (LOWER(t.a) LIKE ? OR LOWER(t.b) LIKE ?)"));
        assert_eq!(
            built.params,
            vec![BindValue::from("%taxi%"), BindValue::from("%taxi%")]
        );
    }

    #[test]
    fn test_search_term_wildcards_are_not_escaped() {
        let mut params = FilterParams::new();
        params.insert("q", "50%_off".into());

        let built = SPEC.build(&params, None);
        assert_eq!(built.params[0], BindValue::from("%50%_off%"));
    }

    #[test]
    fn test_blank_values_are_absent() {
        let mut params = FilterParams::new();
        params.insert("q", "   ".into());
        params.insert("id", "".into());

        let built = SPEC.build(&params, None);
        assert_eq!(built.sql, "SELECT * FROM t ORDER BY t.a ASC");
    }

    #[test]
    fn test_placeholder_count_matches_params() {
        let mut params = FilterParams::new();
        params.insert("id", 1i64.into());
        params.insert("q", "x".into());
        params.insert("state", "a,b,c".into());

        let built = SPEC.build(&params, Some("a:desc"));
        assert_eq!(built.sql.matches('?').count(), built.params.len());
        assert!(built.sql.ends_with("ORDER BY t.a DESC"));
    }
}
