use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use waitline_core::queue::{
    estimate_wait_minutes, queue_number, QueueEntry, QueueError, QueueStats, QueueStatus,
    ENTRY_TTL_DAYS,
};
use waitline_core::storage::EntryChanges;

/// Request payload for adding a party to the waitlist.
///
/// `status`, `checkInTime`, and every other server-owned field are ignored
/// if present in the body; only `id` may be supplied by the caller.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntry {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub party_size: Option<u32>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub special_request: String,
}

impl CreateEntry {
    /// Validates required fields and builds the stored entry.
    ///
    /// The server always wins on `status`, `checkInTime`, `createdAt`,
    /// `updatedAt`, and `ttl`.
    pub fn into_entry(self, now: DateTime<Utc>, rng: &mut impl Rng) -> Result<QueueEntry, QueueError> {
        let mut missing = Vec::new();
        if self.name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            missing.push("name");
        }
        if self.party_size.is_none() {
            missing.push("partySize");
        }
        if !missing.is_empty() {
            return Err(QueueError::MissingFields(missing));
        }

        let party_size = self.party_size.expect("validated above");
        if party_size == 0 {
            return Err(QueueError::InvalidPartySize);
        }

        Ok(QueueEntry {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name.expect("validated above"),
            party_size,
            phone: self.phone,
            special_request: self.special_request,
            status: QueueStatus::Waiting,
            check_in_time: now,
            estimated_wait_time: estimate_wait_minutes(party_size, rng),
            queue_number: queue_number(now, rng),
            seated_time: None,
            created_at: now,
            updated_at: now,
            ttl: (now + Duration::days(ENTRY_TTL_DAYS)).timestamp(),
        })
    }
}

/// Request payload for updating an entry. All fields are optional; a body
/// with none of them present is rejected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub party_size: Option<u32>,
    #[serde(default)]
    pub special_request: Option<String>,
    #[serde(default)]
    pub status: Option<QueueStatus>,
}

impl UpdateEntry {
    /// Converts the payload into a change set for the repository.
    ///
    /// `seated_time` is stamped when the status moves to seated from some
    /// other status; re-asserting an already-seated entry keeps the original
    /// stamp.
    pub fn into_changes(
        self,
        current_status: QueueStatus,
        now: DateTime<Utc>,
    ) -> Result<EntryChanges, QueueError> {
        if let Some(party_size) = self.party_size {
            if party_size == 0 {
                return Err(QueueError::InvalidPartySize);
            }
        }

        let mut changes = EntryChanges::new(now);
        changes.name = self.name;
        changes.phone = self.phone;
        changes.party_size = self.party_size;
        changes.special_request = self.special_request;
        changes.status = self.status;

        if changes.is_empty() {
            return Err(QueueError::EmptyUpdate);
        }

        if let Some(next) = self.status {
            waitline_core::queue::validate_transition(current_status, next)?;
            if next == QueueStatus::Seated && current_status != QueueStatus::Seated {
                changes.seated_time = Some(now);
            }
        }

        Ok(changes)
    }
}

/// Query parameters accepted by the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Filter to a single status; omitted means the whole table.
    pub status: Option<QueueStatus>,
    /// Maximum number of entries to return.
    pub limit: Option<usize>,
}

/// Response body of the list endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub items: Vec<QueueEntry>,
    pub count: usize,
    pub stats: QueueStats,
}

/// Response body of the delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_body(name: Option<&str>, party_size: Option<u32>) -> CreateEntry {
        CreateEntry {
            id: None,
            name: name.map(String::from),
            party_size,
            phone: String::new(),
            special_request: String::new(),
        }
    }

    #[test]
    fn test_create_requires_name_and_party_size() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = create_body(None, None)
            .into_entry(Utc::now(), &mut rng)
            .unwrap_err();
        assert_eq!(err, QueueError::MissingFields(vec!["name", "partySize"]));

        let err = create_body(Some("   "), Some(2))
            .into_entry(Utc::now(), &mut rng)
            .unwrap_err();
        assert_eq!(err, QueueError::MissingFields(vec!["name"]));
    }

    #[test]
    fn test_create_rejects_zero_party() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = create_body(Some("Alice"), Some(0))
            .into_entry(Utc::now(), &mut rng)
            .unwrap_err();
        assert_eq!(err, QueueError::InvalidPartySize);
    }

    #[test]
    fn test_create_server_owns_status_and_ttl() {
        let mut rng = StdRng::seed_from_u64(0);
        let now = Utc::now();
        let entry = create_body(Some("Alice"), Some(3))
            .into_entry(now, &mut rng)
            .unwrap();

        assert_eq!(entry.status, QueueStatus::Waiting);
        assert_eq!(entry.check_in_time, now);
        assert_eq!(entry.ttl, (now + Duration::days(30)).timestamp());
        assert!((18..=28).contains(&entry.estimated_wait_time));
    }

    #[test]
    fn test_create_honors_caller_supplied_id() {
        let mut rng = StdRng::seed_from_u64(0);
        let id = Uuid::new_v4();
        let body = CreateEntry {
            id: Some(id),
            ..create_body(Some("Bob"), Some(2))
        };
        let entry = body.into_entry(Utc::now(), &mut rng).unwrap();
        assert_eq!(entry.id, id);
    }

    #[test]
    fn test_update_rejects_empty_body() {
        let body = UpdateEntry {
            name: None,
            phone: None,
            party_size: None,
            special_request: None,
            status: None,
        };
        let err = body
            .into_changes(QueueStatus::Waiting, Utc::now())
            .unwrap_err();
        assert_eq!(err, QueueError::EmptyUpdate);
    }

    #[test]
    fn test_update_to_seated_stamps_seated_time() {
        let now = Utc::now();
        let body = UpdateEntry {
            name: None,
            phone: None,
            party_size: None,
            special_request: None,
            status: Some(QueueStatus::Seated),
        };
        let changes = body.into_changes(QueueStatus::Waiting, now).unwrap();
        assert_eq!(changes.seated_time, Some(now));
        assert_eq!(changes.updated_at, now);
    }

    #[test]
    fn test_reasserting_seated_keeps_original_stamp() {
        // A seated -> seated self-transition must not move seatedTime; the
        // change set leaves it unassigned so the stored stamp survives.
        let body = UpdateEntry {
            name: None,
            phone: None,
            party_size: None,
            special_request: None,
            status: Some(QueueStatus::Seated),
        };
        let changes = body.into_changes(QueueStatus::Seated, Utc::now()).unwrap();
        assert_eq!(changes.seated_time, None);
        assert_eq!(changes.status, Some(QueueStatus::Seated));
    }

    #[test]
    fn test_update_rejects_invalid_transition() {
        let body = UpdateEntry {
            name: None,
            phone: None,
            party_size: None,
            special_request: None,
            status: Some(QueueStatus::Seated),
        };
        let err = body
            .into_changes(QueueStatus::Cancelled, Utc::now())
            .unwrap_err();
        assert!(matches!(err, QueueError::InvalidTransition { .. }));
    }
}
