//! Query-string construction for the gateway's REST dialect.
//!
//! Collections are addressed as `/rest/v1/{collection}` and shaped with
//! query parameters: `select=*`, equality filters as `column=eq.value`,
//! ordering as `order=column.asc|desc`.

/// Equality filter on a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    column: String,
    value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self {
            column: column.into(),
            value: value.to_string(),
        }
    }

    fn clause(&self) -> String {
        format!("{}=eq.{}", self.column, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Ordering on a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    column: &'static str,
    direction: Direction,
}

impl Order {
    pub fn asc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Ascending,
        }
    }

    pub fn desc(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Descending,
        }
    }

    fn clause(&self) -> String {
        let dir = match self.direction {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };
        format!("order={}.{}", self.column, dir)
    }
}

/// Builds the full query string for a collection request.
pub fn build_query(filters: &[Filter], order: Option<Order>) -> String {
    let mut parts = vec!["select=*".to_string()];
    parts.extend(filters.iter().map(Filter::clause));
    if let Some(order) = order {
        parts.push(order.clause());
    }
    parts.join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_select_when_no_filters_or_order() {
        assert_eq!(build_query(&[], None), "select=*");
    }

    #[test]
    fn equality_filter_clause() {
        let q = build_query(&[Filter::eq("id", 42)], None);
        assert_eq!(q, "select=*&id=eq.42");
    }

    #[test]
    fn foreign_key_filter_with_ascending_order() {
        let q = build_query(&[Filter::eq("post_id", 7)], Some(Order::asc("created_at")));
        assert_eq!(q, "select=*&post_id=eq.7&order=created_at.asc");
    }

    #[test]
    fn descending_order_clause() {
        let q = build_query(&[], Some(Order::desc("upvotes")));
        assert_eq!(q, "select=*&order=upvotes.desc");
    }

    #[test]
    fn multiple_filters_preserve_argument_order() {
        let q = build_query(&[Filter::eq("post_id", 7), Filter::eq("id", 3)], None);
        assert_eq!(q, "select=*&post_id=eq.7&id=eq.3");
    }
}
