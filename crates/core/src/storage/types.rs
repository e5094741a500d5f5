use chrono::{DateTime, Utc};

use crate::queue::{QueueEntry, QueueStatus};

/// The allow-listed set of fields a partial update may touch.
///
/// `updated_at` is always assigned; every other field is written only when
/// present. Backends must persist exactly the assigned fields and leave the
/// rest of the item untouched (last-writer-wins on concurrent updates).
#[derive(Debug, Clone, PartialEq)]
pub struct EntryChanges {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub party_size: Option<u32>,
    pub special_request: Option<String>,
    pub status: Option<QueueStatus>,
    /// Stamped by the caller when the status transitions to seated.
    pub seated_time: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl EntryChanges {
    /// Creates a change set that only refreshes `updated_at`.
    pub fn new(updated_at: DateTime<Utc>) -> Self {
        Self {
            name: None,
            phone: None,
            party_size: None,
            special_request: None,
            status: None,
            seated_time: None,
            updated_at,
        }
    }

    /// Returns true if no caller-visible field is assigned.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.party_size.is_none()
            && self.special_request.is_none()
            && self.status.is_none()
    }

    /// Applies the assigned fields to an entry in place.
    pub fn apply_to(&self, entry: &mut QueueEntry) {
        if let Some(name) = &self.name {
            entry.name = name.clone();
        }
        if let Some(phone) = &self.phone {
            entry.phone = phone.clone();
        }
        if let Some(party_size) = self.party_size {
            entry.party_size = party_size;
        }
        if let Some(special_request) = &self.special_request {
            entry.special_request = special_request.clone();
        }
        if let Some(status) = self.status {
            entry.status = status;
        }
        if let Some(seated_time) = self.seated_time {
            entry.seated_time = Some(seated_time);
        }
        entry.updated_at = self.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn sample_entry() -> QueueEntry {
        let now = Utc::now();
        QueueEntry {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            party_size: 3,
            phone: String::new(),
            special_request: String::new(),
            status: QueueStatus::Waiting,
            check_in_time: now,
            estimated_wait_time: 20,
            queue_number: "120000-01".to_string(),
            seated_time: None,
            created_at: now,
            updated_at: now,
            ttl: now.timestamp(),
        }
    }

    #[test]
    fn test_empty_changes() {
        let changes = EntryChanges::new(Utc::now());
        assert!(changes.is_empty());

        let mut with_status = EntryChanges::new(Utc::now());
        with_status.status = Some(QueueStatus::Seated);
        assert!(!with_status.is_empty());
    }

    #[test]
    fn test_apply_touches_only_assigned_fields() {
        let mut entry = sample_entry();
        let check_in = entry.check_in_time;
        let later = Utc::now();

        let mut changes = EntryChanges::new(later);
        changes.status = Some(QueueStatus::Seated);
        changes.seated_time = Some(later);
        changes.apply_to(&mut entry);

        assert_eq!(entry.status, QueueStatus::Seated);
        assert_eq!(entry.seated_time, Some(later));
        assert_eq!(entry.updated_at, later);
        // untouched fields survive
        assert_eq!(entry.name, "Alice");
        assert_eq!(entry.party_size, 3);
        assert_eq!(entry.check_in_time, check_in);
    }
}
