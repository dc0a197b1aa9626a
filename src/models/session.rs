use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Server-side session record, keyed by a random id carried in the cookie
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Session {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: Option<ObjectId>,
    /// TTL-indexed so MongoDB reaps stale records on its own
    pub expires_at: BsonDateTime,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= BsonDateTime::now()
    }
}

/// Authenticated user attached to the request by the session guard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionUser {
    pub user_id: ObjectId,
}
