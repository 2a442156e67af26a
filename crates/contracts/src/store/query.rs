use super::Collection;
use crate::shared::list_query::SortDirection;

/// Half-open range on one column: `gte <= value < lt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeFilter {
    pub column: String,
    pub gte: Option<String>,
    pub lt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

/// Case-insensitive substring match OR-ed across columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSearch {
    pub columns: Vec<String>,
    pub term: String,
}

/// A filtered read against one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowQuery {
    pub collection: Collection,
    pub select: Vec<String>,
    pub eq: Option<(String, String)>,
    pub range: Option<RangeFilter>,
    pub order: Option<OrderBy>,
    pub search: Option<TextSearch>,
    pub limit: Option<usize>,
}

impl RowQuery {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            select: Vec::new(),
            eq: None,
            range: None,
            order: None,
            search: None,
            limit: None,
        }
    }

    pub fn select(mut self, columns: &[&str]) -> Self {
        self.select = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.eq = Some((column.to_string(), value.into()));
        self
    }

    pub fn gte(mut self, column: &str, value: impl Into<String>) -> Self {
        let range = self.range_on(column);
        range.gte = Some(value.into());
        self
    }

    pub fn lt(mut self, column: &str, value: impl Into<String>) -> Self {
        let range = self.range_on(column);
        range.lt = Some(value.into());
        self
    }

    fn range_on(&mut self, column: &str) -> &mut RangeFilter {
        let same_column = self
            .range
            .as_ref()
            .is_some_and(|range| range.column == column);
        if !same_column {
            self.range = Some(RangeFilter {
                column: column.to_string(),
                gte: None,
                lt: None,
            });
        }
        self.range.get_or_insert_with(|| RangeFilter {
            column: column.to_string(),
            gte: None,
            lt: None,
        })
    }

    pub fn order(mut self, column: &str, direction: SortDirection) -> Self {
        self.order = Some(OrderBy {
            column: column.to_string(),
            direction,
        });
        self
    }

    /// Blank terms (after sanitizing) leave the query unfiltered.
    pub fn search(mut self, columns: &[&str], term: &str) -> Self {
        let term = sanitize_term(term);
        self.search = (!term.is_empty()).then(|| TextSearch {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            term,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// PostgREST query-string parameters, unencoded.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        let select = if self.select.is_empty() {
            "*".to_string()
        } else {
            self.select.join(",")
        };
        pairs.push(("select".to_string(), select));

        if let Some((column, value)) = &self.eq {
            pairs.push((column.clone(), format!("eq.{value}")));
        }

        if let Some(range) = &self.range {
            if let Some(gte) = &range.gte {
                pairs.push((range.column.clone(), format!("gte.{gte}")));
            }
            if let Some(lt) = &range.lt {
                pairs.push((range.column.clone(), format!("lt.{lt}")));
            }
        }

        if let Some(search) = &self.search {
            let clauses: Vec<String> = search
                .columns
                .iter()
                .map(|column| format!("{column}.ilike.*{}*", search.term))
                .collect();
            pairs.push(("or".to_string(), format!("({})", clauses.join(","))));
        }

        if let Some(order) = &self.order {
            let dir = if order.direction.is_ascending() { "asc" } else { "desc" };
            pairs.push(("order".to_string(), format!("{}.{dir}", order.column)));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }

        pairs
    }
}

/// Drops the characters that would break an `or=(...)` clause or act as
/// wildcards.
pub fn sanitize_term(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*' | '%'))
        .collect::<String>()
        .trim()
        .to_string()
}
