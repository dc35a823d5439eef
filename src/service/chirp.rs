use chrono::Utc;
use log::{debug, info};

use crate::{
    error::Result,
    gateway::{decode, decode_all, Gateway, Query, RecordId, Table},
    model::{Chirp, ChirpDraft, PageParams, User},
};

pub async fn fetch_chirps(gateway: &impl Gateway, params: &PageParams) -> Result<Vec<Chirp>> {
    let mut query = Query::new()
        .page(params.limit, params.offset)
        .newest_first("CreatedOn");
    if let Some(category) = &params.category {
        query = query.exact("category", category.as_str());
    }
    if let Some(username) = &params.username {
        query = query.exact("username", username.as_str());
    }

    let records = gateway.fetch_records(Table::Chirp, &query).await?;
    debug!("{} chirps at offset {}", records.len(), params.offset);
    decode_all(Table::Chirp, records)
}

pub async fn get_chirp(gateway: &impl Gateway, id: RecordId) -> Result<Option<Chirp>> {
    gateway
        .get_record_by_id(Table::Chirp, id)
        .await?
        .map(|record| decode(Table::Chirp, record))
        .transpose()
}

/// Validate and post a draft, returning the backend's copy
pub async fn create_chirp(
    gateway: &impl Gateway,
    draft: ChirpDraft,
    author: Option<&User>,
) -> Result<Chirp> {
    let record = draft.into_record(author, Utc::now())?;
    debug!("Posting chirp {:?}", record.name);

    let created = gateway
        .create_record(Table::Chirp, serde_json::to_value(&record)?)
        .await?;
    let chirp: Chirp = decode(Table::Chirp, created)?;
    info!("Chirp {} created", chirp.id);
    Ok(chirp)
}
