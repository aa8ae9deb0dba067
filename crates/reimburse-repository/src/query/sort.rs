//! ORDER BY resolution against an allow-list.

use std::fmt;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parses `asc` / `desc` in any case.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Sortable columns of one entity and its fallback order.
#[derive(Debug, Clone, Copy)]
pub struct SortSpec {
    /// Table alias prepended to the column, e.g. `r.`.
    pub prefix: &'static str,
    /// Columns a caller may sort by.
    pub allowed: &'static [&'static str],
    pub default_column: &'static str,
    pub default_direction: SortDirection,
}

impl SortSpec {
    /// Resolves a `column:direction` specifier to an ORDER BY clause.
    ///
    /// Anything not exactly one allowed column and one known direction
    /// resolves to the default order.
    #[must_use]
    pub fn resolve(&self, sorted: Option<&str>) -> String {
        let (column, direction) = sorted
            .and_then(|s| self.parse(s))
            .unwrap_or((self.default_column, self.default_direction));
        format!("ORDER BY {}{} {}", self.prefix, column, direction)
    }

    fn parse(&self, sorted: &str) -> Option<(&'static str, SortDirection)> {
        let mut parts = sorted.split(':');
        let column = parts.next()?;
        let direction = SortDirection::parse(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        let column = self.allowed.iter().copied().find(|c| *c == column)?;
        Some((column, direction))
    }
}
