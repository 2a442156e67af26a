use super::query::RowQuery;
use super::{Collection, RowStore, StoreError};
use crate::shared::list_query::{collate, compare_f64, contains_ci};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory [`RowStore`] evaluating the same query model as the hosted
/// store. Rows are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<Collection, Vec<Value>>>,
    failure: Mutex<Option<String>>,
    reads: Mutex<Vec<RowQuery>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(collection: Collection, rows: Vec<Value>) -> Self {
        let store = Self::new();
        store.seed(collection, rows);
        store
    }

    pub fn seed(&self, collection: Collection, rows: Vec<Value>) {
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.entry(collection).or_default().extend(rows);
    }

    /// Every following call fails with `message` until cleared with `None`.
    pub fn inject_failure(&self, message: Option<&str>) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = message.map(str::to_string);
    }

    pub fn rows(&self, collection: Collection) -> Vec<Value> {
        let tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.get(&collection).cloned().unwrap_or_default()
    }

    /// Queries received so far, oldest first.
    pub fn reads(&self) -> Vec<RowQuery> {
        self.reads.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        match &*self.failure.lock().unwrap_or_else(|e| e.into_inner()) {
            Some(message) => Err(StoreError::Injected(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl RowStore for MemoryStore {
    async fn read_rows(&self, query: &RowQuery) -> Result<Vec<Value>, StoreError> {
        self.reads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(query.clone());
        self.check_failure()?;

        let mut rows: Vec<Value> = self
            .rows(query.collection)
            .into_iter()
            .filter(|row| matches_query(row, query))
            .collect();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                order
                    .direction
                    .apply(compare_values(a.get(&order.column), b.get(&order.column)))
            });
        }
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows.iter().map(|row| project(row, &query.select)).collect())
    }

    async fn upsert_row(
        &self,
        collection: Collection,
        key_column: &str,
        record: Value,
    ) -> Result<(), StoreError> {
        self.check_failure()?;

        let Value::Object(fields) = record else {
            return Err(StoreError::InvalidQuery("record must be an object".into()));
        };
        let key = fields
            .get(key_column)
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::InvalidQuery(format!("missing key column {key_column}")))?
            .to_string();

        let now = Value::String(Utc::now().to_rfc3339());
        let mut tables = self.tables.lock().unwrap_or_else(|e| e.into_inner());
        let table = tables.entry(collection).or_default();

        let existing = table
            .iter()
            .position(|row| row.get(key_column).and_then(Value::as_str) == Some(key.as_str()));

        match existing.map(|index| &mut table[index]) {
            Some(Value::Object(row)) => {
                row.extend(fields);
                row.insert("updated_at".into(), now);
            }
            _ => {
                let mut row = Map::new();
                row.insert("created_at".into(), now.clone());
                row.insert("updated_at".into(), now);
                row.extend(fields);
                table.push(Value::Object(row));
            }
        }
        Ok(())
    }
}

fn text_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn matches_query(row: &Value, query: &RowQuery) -> bool {
    if let Some((column, expected)) = &query.eq {
        if text_of(row.get(column)).as_deref() != Some(expected.as_str()) {
            return false;
        }
    }

    if let Some(range) = &query.range {
        let Some(value) = text_of(row.get(&range.column)) else {
            return false;
        };
        if range.gte.as_ref().is_some_and(|gte| value.as_str() < gte.as_str()) {
            return false;
        }
        if range.lt.as_ref().is_some_and(|lt| value.as_str() >= lt.as_str()) {
            return false;
        }
    }

    if let Some(search) = &query.search {
        let hit = search.columns.iter().any(|column| {
            text_of(row.get(column)).is_some_and(|text| contains_ci(&text, &search.term))
        });
        if !hit {
            return false;
        }
    }

    true
}

/// Nulls first, numbers numerically, everything else as text.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
        (Some(x), Some(y)) => compare_f64(x, y),
        _ => match (text_of(a), text_of(b)) {
            (Some(x), Some(y)) => collate(&x, &y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

fn project(row: &Value, select: &[String]) -> Value {
    if select.is_empty() || select.iter().any(|c| c == "*") {
        return row.clone();
    }
    let projected: Map<String, Value> = select
        .iter()
        .filter_map(|column| row.get(column).map(|v| (column.clone(), v.clone())))
        .collect();
    Value::Object(projected)
}
