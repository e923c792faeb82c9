use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infra::db::postgres::schema::subscriptions;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = subscriptions)]
#[diesel(primary_key(user_email))]
pub struct SubscriptionEntity {
    pub user_email: String,
    pub status: String,
    pub plan: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload keyed by email; replays of the same payment
/// notification land on the same row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = subscriptions)]
pub struct UpsertSubscriptionEntity {
    pub user_email: String,
    pub status: String,
    pub plan: String,
    pub updated_at: DateTime<Utc>,
}
