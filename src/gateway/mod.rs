pub mod http;
pub mod memory;

pub use http::HttpGateway;
pub use memory::MemoryGateway;

use std::{fmt, future::Future};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Identifier assigned by the backend to every record
pub type RecordId = i64;

/// Named collections on the backend
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Table {
    #[serde(rename = "chirp1")]
    Chirp,
    #[serde(rename = "saved_item1")]
    SavedItem,
    #[serde(rename = "user_profile")]
    UserProfile,
    #[serde(rename = "followed_user")]
    FollowedUser,
}

impl Table {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Chirp => "chirp1",
            Self::SavedItem => "saved_item1",
            Self::UserProfile => "user_profile",
            Self::FollowedUser => "followed_user",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    ExactMatch,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub field_name: String,
    pub operator: Operator,
    pub values: Vec<Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub limit: usize,
    pub offset: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub field_name: String,
    pub sorttype: SortType,
}

/// Body of a fetch-with-filter request
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(rename = "where", default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<Paging>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn exact(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            field_name: field.to_string(),
            operator: Operator::ExactMatch,
            values: vec![value.into()],
        });
        self
    }
    pub fn page(mut self, limit: usize, offset: usize) -> Self {
        self.paging_info = Some(Paging { limit, offset });
        self
    }
    pub fn newest_first(mut self, field: &str) -> Self {
        self.order_by.push(OrderBy {
            field_name: field.to_string(),
            sorttype: SortType::Desc,
        });
        self
    }
}

/// Response envelope of fetch and get-by-id
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DataResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
}

/// Response envelope of create, update and delete
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct MutationResponse {
    #[serde(default)]
    pub results: Vec<MutationResult>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MutationResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl MutationResponse {
    /// The first result's record, or the failure it carries
    pub fn into_record(self) -> Result<Value> {
        let Some(result) = self.results.into_iter().next() else {
            return Err(Error::remote("no result returned by the backend"));
        };
        if !result.success {
            return Err(Error::remote(
                result
                    .message
                    .unwrap_or_else(|| "write was not accepted".to_string()),
            ));
        }
        result
            .data
            .ok_or_else(|| Error::remote("no record returned by the backend"))
    }

    pub fn into_ack(self) -> Result<()> {
        match self.results.into_iter().find(|result| !result.success) {
            Some(failed) => Err(Error::remote(
                failed
                    .message
                    .unwrap_or_else(|| "delete was not accepted".to_string()),
            )),
            None => Ok(()),
        }
    }
}

/// Record-oriented access to the backend
pub trait Gateway {
    fn fetch_records(
        &self,
        table: Table,
        query: &Query,
    ) -> impl Future<Output = Result<Vec<Value>>> + Send;

    fn get_record_by_id(
        &self,
        table: Table,
        id: RecordId,
    ) -> impl Future<Output = Result<Option<Value>>> + Send;

    fn create_record(
        &self,
        table: Table,
        record: Value,
    ) -> impl Future<Output = Result<Value>> + Send;

    fn update_record(
        &self,
        table: Table,
        record: Value,
    ) -> impl Future<Output = Result<Value>> + Send;

    fn delete_records(
        &self,
        table: Table,
        ids: Vec<RecordId>,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Validate a raw record against its schema
pub fn decode<T: DeserializeOwned>(table: Table, record: Value) -> Result<T> {
    serde_json::from_value(record).map_err(|source| Error::Malformed { table, source })
}

pub fn decode_all<T: DeserializeOwned>(table: Table, records: Vec<Value>) -> Result<Vec<T>> {
    records
        .into_iter()
        .map(|record| decode(table, record))
        .collect()
}
