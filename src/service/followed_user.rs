use crate::{
    error::Result,
    gateway::{decode, decode_all, Gateway, Query, RecordId, Table},
    model::{FollowTarget, FollowedUser, NewFollowedUser},
};

pub async fn fetch_followed_users(
    gateway: &impl Gateway,
    owner: Option<&str>,
) -> Result<Vec<FollowedUser>> {
    let mut query = Query::new();
    if let Some(owner) = owner {
        query = query.exact("Owner", owner);
    }
    let records = gateway.fetch_records(Table::FollowedUser, &query).await?;
    decode_all(Table::FollowedUser, records)
}

/// The follow record for `username`, if one exists
pub async fn find_followed_user(
    gateway: &impl Gateway,
    owner: Option<&str>,
    username: &str,
) -> Result<Option<FollowedUser>> {
    let mut query = Query::new().exact("username", username);
    if let Some(owner) = owner {
        query = query.exact("Owner", owner);
    }
    let records = gateway.fetch_records(Table::FollowedUser, &query).await?;
    records
        .into_iter()
        .next()
        .map(|record| decode(Table::FollowedUser, record))
        .transpose()
}

pub async fn follow_user(gateway: &impl Gateway, target: FollowTarget) -> Result<FollowedUser> {
    let record = serde_json::to_value(NewFollowedUser::from(target))?;
    let created = gateway.create_record(Table::FollowedUser, record).await?;
    decode(Table::FollowedUser, created)
}

pub async fn unfollow_user(gateway: &impl Gateway, id: RecordId) -> Result<()> {
    gateway.delete_records(Table::FollowedUser, vec![id]).await
}
