use std::{
    cmp::Ordering,
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use chrono::{SecondsFormat, Utc};
use log::debug;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

use super::{Gateway, Query, RecordId, SortType, Table};

#[derive(Debug, Default)]
struct Tables {
    records: BTreeMap<Table, Vec<Map<String, Value>>>,
    next_id: RecordId,
    rejection: Option<String>,
}

/// In-process gateway, used offline and in tests.
///
/// Assigns `Id` and `CreatedOn` on create, stamps `Owner` when an owner is
/// set, and honours `ExactMatch` filters, ordering and paging.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    inner: Arc<Mutex<Tables>>,
    owner: Option<String>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records created through this gateway belong to `owner`
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Store a record as-is, keeping its `Id` if it has one
    pub fn insert(&self, table: Table, record: Value) -> RecordId {
        let mut tables = self.lock();
        let mut record = match record {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let id = match record.get("Id").and_then(Value::as_i64) {
            Some(id) => {
                tables.next_id = tables.next_id.max(id);
                id
            }
            None => {
                tables.next_id += 1;
                tables.next_id
            }
        };
        record.insert("Id".to_string(), Value::from(id));
        record
            .entry("CreatedOn")
            .or_insert_with(|| Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)));
        tables.records.entry(table).or_default().push(record);
        id
    }

    /// Every following write fails with `message` until cleared with `None`
    pub fn reject_writes(&self, message: Option<&str>) {
        self.lock().rejection = message.map(str::to_string);
    }

    pub fn len(&self, table: Table) -> usize {
        self.lock().records.get(&table).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, table: Table) -> bool {
        self.len(table) == 0
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // a poisoned lock only means a test panicked mid-write
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_writable(&self) -> Result<()> {
        match &self.lock().rejection {
            Some(message) => Err(Error::remote(message.clone())),
            None => Ok(()),
        }
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

impl Gateway for MemoryGateway {
    async fn fetch_records(&self, table: Table, query: &Query) -> Result<Vec<Value>> {
        debug!("fetch {} {:?}", table, query);
        let tables = self.lock();
        let mut records: Vec<&Map<String, Value>> = tables
            .records
            .get(&table)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| {
                        query
                            .filters
                            .iter()
                            .all(|filter| filter.values.iter().any(|v| record.get(&filter.field_name) == Some(v)))
                    })
                    .collect()
            })
            .unwrap_or_default();

        for order in query.order_by.iter().rev() {
            records.sort_by(|a, b| {
                let ordering = compare(a.get(&order.field_name), b.get(&order.field_name))
                    .then_with(|| compare(a.get("Id"), b.get("Id")));
                match order.sorttype {
                    SortType::Asc => ordering,
                    SortType::Desc => ordering.reverse(),
                }
            });
        }

        let records = records.into_iter().cloned().map(Value::Object);
        let records = match query.paging_info {
            Some(paging) => records.skip(paging.offset).take(paging.limit).collect(),
            None => records.collect(),
        };
        Ok(records)
    }

    async fn get_record_by_id(&self, table: Table, id: RecordId) -> Result<Option<Value>> {
        let tables = self.lock();
        let record = tables.records.get(&table).and_then(|records| {
            records
                .iter()
                .find(|record| record.get("Id").and_then(Value::as_i64) == Some(id))
        });
        Ok(record.cloned().map(Value::Object))
    }

    async fn create_record(&self, table: Table, mut record: Value) -> Result<Value> {
        self.check_writable()?;
        if let (Some(owner), Value::Object(map)) = (&self.owner, &mut record) {
            map.insert("Owner".to_string(), Value::from(owner.clone()));
        }
        if let Value::Object(map) = &mut record {
            map.remove("Id");
        }
        let id = self.insert(table, record);
        self.get_record_by_id(table, id)
            .await?
            .ok_or_else(|| Error::remote("record vanished after create"))
    }

    async fn update_record(&self, table: Table, record: Value) -> Result<Value> {
        self.check_writable()?;
        let Value::Object(changes) = record else {
            return Err(Error::remote("record must be an object"));
        };
        let Some(id) = changes.get("Id").and_then(Value::as_i64) else {
            return Err(Error::remote("record has no Id"));
        };

        let mut tables = self.lock();
        let existing = tables.records.get_mut(&table).and_then(|records| {
            records
                .iter_mut()
                .find(|record| record.get("Id").and_then(Value::as_i64) == Some(id))
        });
        let Some(existing) = existing else {
            return Err(Error::remote(format!("{table} record {id} does not exist")));
        };
        for (field, value) in changes {
            if !value.is_null() {
                existing.insert(field, value);
            }
        }
        Ok(Value::Object(existing.clone()))
    }

    async fn delete_records(&self, table: Table, ids: Vec<RecordId>) -> Result<()> {
        self.check_writable()?;
        let mut tables = self.lock();
        if let Some(records) = tables.records.get_mut(&table) {
            records.retain(|record| {
                record
                    .get("Id")
                    .and_then(Value::as_i64)
                    .map_or(true, |id| !ids.contains(&id))
            });
        }
        Ok(())
    }
}
