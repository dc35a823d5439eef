use futures::future::join_all;
use log::error;

use crate::{
    error::{Error, Result},
    gateway::{decode, decode_all, Gateway, Query, RecordId, Table},
    model::{NewSavedItem, SavedEntry, SavedItem},
};

use super::chirp::get_chirp;

/// Bookmarks of `owner` (all visible ones when `None`), joined with their chirps.
///
/// Entries whose chirp cannot be fetched are logged and skipped.
pub async fn fetch_saved_items(
    gateway: &impl Gateway,
    owner: Option<&str>,
) -> Result<Vec<SavedEntry>> {
    let mut query = Query::new().newest_first("CreatedOn");
    if let Some(owner) = owner {
        query = query.exact("Owner", owner);
    }
    let records = gateway.fetch_records(Table::SavedItem, &query).await?;
    let items: Vec<SavedItem> = decode_all(Table::SavedItem, records)?;

    let chirps = join_all(items.iter().map(|item| get_chirp(gateway, item.chirp_id))).await;

    let mut entries = Vec::with_capacity(items.len());
    for (item, chirp) in items.into_iter().zip(chirps) {
        match chirp {
            Ok(Some(chirp)) => entries.push(SavedEntry { item, chirp }),
            Ok(None) => error!("Saved chirp {} no longer exists", item.chirp_id),
            Err(e) => error!("Failed to fetch saved chirp {}: {}", item.chirp_id, e),
        }
    }
    Ok(entries)
}

/// Bookmark an existing chirp
pub async fn save_item(gateway: &impl Gateway, chirp_id: RecordId) -> Result<SavedEntry> {
    let Some(chirp) = get_chirp(gateway, chirp_id).await? else {
        return Err(Error::validation(format!("Chirp {} does not exist", chirp_id)));
    };

    let record = serde_json::to_value(NewSavedItem::new(chirp_id))?;
    let created = gateway.create_record(Table::SavedItem, record).await?;
    let item: SavedItem = decode(Table::SavedItem, created)?;
    Ok(SavedEntry { item, chirp })
}

pub async fn remove_saved_item(gateway: &impl Gateway, id: RecordId) -> Result<()> {
    gateway.delete_records(Table::SavedItem, vec![id]).await
}
