//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! queue entries, plus the dynamic SET expression builder for partial
//! updates. Testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use waitline_core::queue::QueueEntry;
use waitline_core::storage::{EntryChanges, RepositoryError};

/// Convert a QueueEntry to a DynamoDB item.
///
/// Timestamps are stored as RFC 3339 strings so the `checkInTime` range key
/// sorts lexicographically in check-in order; `ttl` stays numeric for the
/// table's TTL sweeper.
pub fn entry_to_item(entry: &QueueEntry) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert("id".to_string(), AttributeValue::S(entry.id.to_string()));
    item.insert("name".to_string(), AttributeValue::S(entry.name.clone()));
    item.insert(
        "partySize".to_string(),
        AttributeValue::N(entry.party_size.to_string()),
    );
    item.insert("phone".to_string(), AttributeValue::S(entry.phone.clone()));
    item.insert(
        "specialRequest".to_string(),
        AttributeValue::S(entry.special_request.clone()),
    );
    item.insert(
        "status".to_string(),
        AttributeValue::S(entry.status.as_str().to_string()),
    );
    item.insert(
        "checkInTime".to_string(),
        AttributeValue::S(entry.check_in_time.to_rfc3339()),
    );
    item.insert(
        "estimatedWaitTime".to_string(),
        AttributeValue::N(entry.estimated_wait_time.to_string()),
    );
    item.insert(
        "queueNumber".to_string(),
        AttributeValue::S(entry.queue_number.clone()),
    );
    if let Some(seated) = entry.seated_time {
        item.insert(
            "seatedTime".to_string(),
            AttributeValue::S(seated.to_rfc3339()),
        );
    }
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(entry.created_at.to_rfc3339()),
    );
    item.insert(
        "updatedAt".to_string(),
        AttributeValue::S(entry.updated_at.to_rfc3339()),
    );
    item.insert("ttl".to_string(), AttributeValue::N(entry.ttl.to_string()));

    item
}

/// Convert a DynamoDB item to a QueueEntry.
pub fn item_to_entry(
    item: &HashMap<String, AttributeValue>,
) -> Result<QueueEntry, RepositoryError> {
    Ok(QueueEntry {
        id: get_uuid(item, "id")?,
        name: get_string(item, "name")?,
        party_size: get_u32(item, "partySize")?,
        phone: get_optional_string(item, "phone").unwrap_or_default(),
        special_request: get_optional_string(item, "specialRequest").unwrap_or_default(),
        status: parse_status(&get_string(item, "status")?)?,
        check_in_time: get_datetime(item, "checkInTime")?,
        estimated_wait_time: get_u32(item, "estimatedWaitTime")?,
        queue_number: get_string(item, "queueNumber")?,
        seated_time: get_optional_datetime(item, "seatedTime")?,
        created_at: get_datetime(item, "createdAt")?,
        updated_at: get_datetime(item, "updatedAt")?,
        ttl: get_i64(item, "ttl")?,
    })
}

/// Build the SET expression for a partial update.
///
/// Returns the expression string plus the attribute name and value maps.
/// Every attribute goes through a `#n` placeholder because `status`,
/// `name` and `ttl` are DynamoDB reserved words.
pub fn update_expression(
    changes: &EntryChanges,
) -> (
    String,
    HashMap<String, String>,
    HashMap<String, AttributeValue>,
) {
    let mut assignments = Vec::new();
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    let mut set = |attr: &str, value: AttributeValue| {
        let name_key = format!("#{attr}");
        let value_key = format!(":{attr}");
        assignments.push(format!("{name_key} = {value_key}"));
        names.insert(name_key, attr.to_string());
        values.insert(value_key, value);
    };

    if let Some(name) = &changes.name {
        set("name", AttributeValue::S(name.clone()));
    }
    if let Some(phone) = &changes.phone {
        set("phone", AttributeValue::S(phone.clone()));
    }
    if let Some(party_size) = changes.party_size {
        set("partySize", AttributeValue::N(party_size.to_string()));
    }
    if let Some(special_request) = &changes.special_request {
        set("specialRequest", AttributeValue::S(special_request.clone()));
    }
    if let Some(status) = changes.status {
        set("status", AttributeValue::S(status.as_str().to_string()));
    }
    if let Some(seated_time) = changes.seated_time {
        set("seatedTime", AttributeValue::S(seated_time.to_rfc3339()));
    }
    set(
        "updatedAt",
        AttributeValue::S(changes.updated_at.to_rfc3339()),
    );

    (format!("SET {}", assignments.join(", ")), names, values)
}

/// Parse a status string stored in the table.
pub fn parse_status(
    s: &str,
) -> Result<waitline_core::queue::QueueStatus, RepositoryError> {
    waitline_core::queue::QueueStatus::parse(s)
        .ok_or_else(|| RepositoryError::InvalidData(format!("Unknown status: {s}")))
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {key}")))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required UUID attribute.
fn get_uuid(item: &HashMap<String, AttributeValue>, key: &str) -> Result<Uuid, RepositoryError> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {key}: {e}")))
}

/// Get a required numeric attribute as u32.
fn get_u32(item: &HashMap<String, AttributeValue>, key: &str) -> Result<u32, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {key}")))?
        .parse()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {key}: {e}")))
}

/// Get a required numeric attribute as i64.
fn get_i64(item: &HashMap<String, AttributeValue>, key: &str) -> Result<i64, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {key}")))?
        .parse()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid number {key}: {e}")))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {key}: {e}")))
}

/// Get an optional datetime attribute.
fn get_optional_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<DateTime<Utc>>, RepositoryError> {
    match get_optional_string(item, key) {
        Some(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {key}: {e}"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waitline_core::queue::QueueStatus;

    fn sample_entry() -> QueueEntry {
        let check_in = DateTime::parse_from_rfc3339("2024-06-01T18:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        QueueEntry {
            id: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
            name: "Alice".to_string(),
            party_size: 4,
            phone: "555-0100".to_string(),
            special_request: "window table".to_string(),
            status: QueueStatus::Waiting,
            check_in_time: check_in,
            estimated_wait_time: 23,
            queue_number: "183000-04".to_string(),
            seated_time: None,
            created_at: check_in,
            updated_at: check_in,
            ttl: check_in.timestamp() + 30 * 24 * 3600,
        }
    }

    #[test]
    fn test_entry_round_trip() {
        let entry = sample_entry();
        let item = entry_to_item(&entry);
        let parsed = item_to_entry(&item).unwrap();

        assert_eq!(entry, parsed);
    }

    #[test]
    fn test_entry_round_trip_with_seated_time() {
        let mut entry = sample_entry();
        entry.status = QueueStatus::Seated;
        entry.seated_time = Some(entry.check_in_time + chrono::Duration::minutes(20));

        let item = entry_to_item(&entry);
        let parsed = item_to_entry(&item).unwrap();

        assert_eq!(entry, parsed);
    }

    #[test]
    fn test_seated_time_absent_when_none() {
        let item = entry_to_item(&sample_entry());
        assert!(!item.contains_key("seatedTime"));
    }

    #[test]
    fn test_check_in_sorts_lexicographically() {
        let earlier = sample_entry();
        let mut later = sample_entry();
        later.check_in_time = earlier.check_in_time + chrono::Duration::seconds(1);

        let a = entry_to_item(&earlier);
        let b = entry_to_item(&later);
        assert!(
            a.get("checkInTime").unwrap().as_s().unwrap()
                < b.get("checkInTime").unwrap().as_s().unwrap()
        );
    }

    #[test]
    fn test_update_expression_covers_assigned_fields() {
        let now = Utc::now();
        let mut changes = EntryChanges::new(now);
        changes.status = Some(QueueStatus::Seated);
        changes.seated_time = Some(now);

        let (expr, names, values) = update_expression(&changes);

        assert!(expr.starts_with("SET "));
        assert!(expr.contains("#status = :status"));
        assert!(expr.contains("#seatedTime = :seatedTime"));
        assert!(expr.contains("#updatedAt = :updatedAt"));
        assert!(!expr.contains("#name"));

        assert_eq!(names.get("#status").unwrap(), "status");
        assert_eq!(
            values.get(":status").unwrap().as_s().unwrap(),
            "seated"
        );
    }

    #[test]
    fn test_update_expression_always_stamps_updated_at() {
        let changes = EntryChanges::new(Utc::now());
        let (expr, names, values) = update_expression(&changes);

        assert_eq!(expr, "SET #updatedAt = :updatedAt");
        assert_eq!(names.len(), 1);
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut item = entry_to_item(&sample_entry());
        item.insert("status".to_string(), AttributeValue::S("vip".to_string()));
        assert!(item_to_entry(&item).is_err());
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut item = entry_to_item(&sample_entry());
        item.remove("partySize");
        assert!(item_to_entry(&item).is_err());
    }
}
