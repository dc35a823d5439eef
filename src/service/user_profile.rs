use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    error::{Error, Result},
    gateway::{decode, Gateway, Query, RecordId, Table},
    model::{with_language_tag, ProfileDraft, UserProfile},
};

pub async fn get_profile_by_username(
    gateway: &impl Gateway,
    username: &str,
) -> Result<Option<UserProfile>> {
    let query = Query::new().exact("username", username);
    let records = gateway.fetch_records(Table::UserProfile, &query).await?;
    records
        .into_iter()
        .next()
        .map(|record| decode(Table::UserProfile, record))
        .transpose()
}

pub async fn create_profile(gateway: &impl Gateway, draft: ProfileDraft) -> Result<UserProfile> {
    let draft = draft.for_create(Utc::now().date_naive());
    let created = gateway
        .create_record(Table::UserProfile, serde_json::to_value(draft)?)
        .await?;
    decode(Table::UserProfile, created)
}

pub async fn update_profile(
    gateway: &impl Gateway,
    id: RecordId,
    draft: ProfileDraft,
) -> Result<UserProfile> {
    let mut record = serde_json::to_value(draft)?;
    let Value::Object(fields) = &mut record else {
        return Err(Error::validation("profile update must be an object"));
    };
    fields.insert("Id".to_string(), json!(id));
    if !fields.contains_key("Name") {
        if let Some(display_name) = fields.get("display_name").cloned() {
            fields.insert("Name".to_string(), display_name);
        }
    }

    let updated = gateway.update_record(Table::UserProfile, record).await?;
    decode(Table::UserProfile, updated)
}

/// Store `language` as the profile's `lang:` tag.
///
/// Returns `None` when `username` has no profile.
pub async fn update_language_preference(
    gateway: &impl Gateway,
    username: &str,
    language: &str,
) -> Result<Option<UserProfile>> {
    let Some(profile) = get_profile_by_username(gateway, username).await? else {
        return Ok(None);
    };

    let record = json!({
        "Id": profile.id,
        "Name": profile.name,
        "Tags": with_language_tag(profile.tags.as_deref(), language),
    });
    let updated = gateway.update_record(Table::UserProfile, record).await?;
    decode(Table::UserProfile, updated).map(Some)
}
