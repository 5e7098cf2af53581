//! Realtime snapshot ingestion.
//!
//! The realtime database returns a bin node either as a JSON array or as an
//! object keyed by record id, with camelCase field names. Timestamps are ISO
//! strings or epoch milliseconds (server timestamps).
//! This module turns one such snapshot into typed [`SmartBin`] values.
//! Records that do not decode cleanly are set aside in
//! [`BinSnapshot::rejected`] instead of failing the whole snapshot.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BinLocation, BinWasteType, OperationalStatus, SmartBin};
use crate::error::IngestError;

/// Record shape as stored in the realtime database.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBinRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    bin_id: Option<String>,
    #[serde(default)]
    ward_number: Option<String>,
    #[serde(default)]
    location: Option<BinLocation>,
    fill_level: i64,
    #[serde(default)]
    waste_type: Option<BinWasteType>,
    status: OperationalStatus,
    #[serde(default)]
    last_updated: Option<Value>,
}

/// A record that was dropped during ingestion.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRecord {
    pub id: String,
    pub reason: String,
    #[serde(skip)]
    pub error: IngestError,
}

/// Result of ingesting one snapshot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BinSnapshot {
    pub bins: Vec<SmartBin>,
    pub rejected: Vec<RejectedRecord>,
}

impl BinSnapshot {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Convert a realtime snapshot into bins.
///
/// * `null` yields an empty snapshot (node not written yet).
/// * Arrays use each record's `id`, falling back to the array index; null
///   slots are skipped.
/// * Objects use the map key as the id, overriding any `id` field. Entries
///   are visited like a JavaScript object's own keys: array-index keys
///   (`"0"`, `"7"`, `"10"`) first in numeric order, then the other keys in
///   document order.
///
/// # Errors
///
/// Returns [`IngestError::UnexpectedShape`] when the node is a scalar.
/// Per-record problems never fail the call.
pub fn ingest_snapshot(value: &Value) -> Result<BinSnapshot, IngestError> {
    let entries: Vec<(String, bool, &Value)> = match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_null())
            .map(|(idx, item)| (idx.to_string(), false, item))
            .collect(),
        Value::Object(map) => {
            let mut entries: Vec<(String, bool, &Value)> = map
                .iter()
                .map(|(key, item)| (key.clone(), true, item))
                .collect();
            entries.sort_by_key(|(key, _, _)| match array_index(key) {
                Some(index) => (0, index),
                None => (1, 0),
            });
            entries
        }
        other => {
            return Err(IngestError::UnexpectedShape {
                found: json_kind(other).to_string(),
            })
        }
    };

    let mut snapshot = BinSnapshot::default();
    for (fallback_id, key_is_id, item) in entries {
        match decode_record(&fallback_id, key_is_id, item) {
            Ok(bin) => snapshot.bins.push(bin),
            Err(error) => {
                let id = error.record_id().unwrap_or(fallback_id.as_str()).to_string();
                tracing::warn!(record = %id, %error, "rejected bin record");
                snapshot.rejected.push(RejectedRecord {
                    id,
                    reason: error.to_string(),
                    error,
                });
            }
        }
    }

    tracing::debug!(
        accepted = snapshot.bins.len(),
        rejected = snapshot.rejected.len(),
        "ingested bin snapshot"
    );
    Ok(snapshot)
}

fn decode_record(fallback_id: &str, key_is_id: bool, item: &Value) -> Result<SmartBin, IngestError> {
    let raw: RawBinRecord =
        serde_json::from_value(item.clone()).map_err(|e| IngestError::InvalidRecord {
            id: if key_is_id {
                fallback_id.to_string()
            } else {
                declared_id(item).unwrap_or(fallback_id).to_string()
            },
            message: e.to_string(),
        })?;

    let id = if key_is_id {
        fallback_id.to_string()
    } else {
        raw.id.clone().unwrap_or_else(|| fallback_id.to_string())
    };

    let fill_level = u8::try_from(raw.fill_level)
        .ok()
        .filter(|level| *level <= 100)
        .ok_or_else(|| IngestError::FillLevelOutOfRange {
            id: id.clone(),
            fill_level: raw.fill_level,
        })?;

    let last_updated = match &raw.last_updated {
        None | Some(Value::Null) => None,
        Some(value) => Some(parse_timestamp(value).ok_or_else(|| IngestError::InvalidTimestamp {
            id: id.clone(),
            value: match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            },
        })?),
    };

    Ok(SmartBin {
        bin_id: raw.bin_id.unwrap_or_else(|| id.clone()),
        id,
        fill_level,
        status: raw.status,
        waste_type: raw.waste_type.unwrap_or(BinWasteType::Mixed),
        ward_number: raw.ward_number,
        location: raw.location,
        last_updated,
    })
}

/// Parse epoch milliseconds, RFC 3339, or a naive ISO timestamp taken as UTC.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
            return Utc.timestamp_millis_opt(millis).single();
        }
        Value::String(text) => text.as_str(),
        _ => return None,
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Numeric value of a key JavaScript treats as an array index.
fn array_index(key: &str) -> Option<u32> {
    let canonical = key == "0" || (!key.starts_with('0') && key.bytes().all(|b| b.is_ascii_digit()));
    if !canonical {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index < u32::MAX)
}

fn declared_id(item: &Value) -> Option<&str> {
    item.get("id").and_then(Value::as_str)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    #[test]
    fn null_snapshot_is_empty() {
        let snapshot = ingest_snapshot(&Value::Null).unwrap();
        assert!(snapshot.bins.is_empty());
        assert!(snapshot.is_clean());
    }

    #[test]
    fn scalar_snapshot_is_rejected() {
        let err = ingest_snapshot(&json!("bins")).unwrap_err();
        assert_eq!(
            err,
            IngestError::UnexpectedShape {
                found: "string".into()
            }
        );
    }

    #[test]
    fn object_keys_become_ids() {
        let snapshot = ingest_snapshot(&json!({
            "h1": { "id": "ignored", "fillLevel": 85, "status": "active" },
        }))
        .unwrap();
        assert_eq!(snapshot.bins.len(), 1);
        assert_eq!(snapshot.bins[0].id, "h1");
        assert_eq!(snapshot.bins[0].bin_id, "h1");
    }

    #[test]
    fn array_records_fall_back_to_index() {
        let snapshot = ingest_snapshot(&json!([
            null,
            { "fillLevel": 20, "status": "inactive" },
            { "id": "b9", "binId": "BIN009", "fillLevel": 91, "status": "active", "wasteType": "organic" },
        ]))
        .unwrap();
        assert_eq!(snapshot.bins.len(), 2);
        assert_eq!(snapshot.bins[0].id, "1");
        assert_eq!(snapshot.bins[1].id, "b9");
        assert_eq!(snapshot.bins[1].bin_id, "BIN009");
        assert_eq!(snapshot.bins[1].waste_type, BinWasteType::Organic);
    }

    #[test]
    fn unknown_status_is_rejected_with_declared_id() {
        let snapshot = ingest_snapshot(&json!([
            { "id": "x", "fillLevel": 50, "status": "overflowing" },
        ]))
        .unwrap();
        assert!(snapshot.bins.is_empty());
        assert_eq!(snapshot.rejected[0].id, "x");
        assert!(matches!(
            snapshot.rejected[0].error,
            IngestError::InvalidRecord { .. }
        ));
    }

    #[test]
    fn out_of_range_fill_level_is_rejected() {
        let snapshot = ingest_snapshot(&json!({
            "a": { "fillLevel": 101, "status": "active" },
            "b": { "fillLevel": -3, "status": "active" },
            "c": { "fillLevel": 100, "status": "active" },
        }))
        .unwrap();
        assert_eq!(snapshot.bins.len(), 1);
        assert_eq!(snapshot.bins[0].id, "c");
        assert_eq!(
            snapshot.rejected[0].error,
            IngestError::FillLevelOutOfRange {
                id: "a".into(),
                fill_level: 101
            }
        );
    }

    #[test]
    fn numeric_timestamps_are_epoch_millis() {
        let snapshot = ingest_snapshot(&json!({
            "b1": { "fillLevel": 97, "status": "active", "lastUpdated": 1768200000000i64 },
        }))
        .unwrap();
        assert!(snapshot.is_clean());
        let at = snapshot.bins[0].last_updated.unwrap();
        assert_eq!(at.timestamp_millis(), 1_768_200_000_000);
    }

    #[test]
    fn keyed_snapshot_visits_index_keys_numerically() {
        let snapshot = ingest_snapshot(&json!({
            "north": { "fillLevel": 93, "status": "active" },
            "2": { "fillLevel": 95, "status": "active" },
            "10": { "fillLevel": 91, "status": "active" },
            "1": { "fillLevel": 99, "status": "active" },
            "07": { "fillLevel": 90, "status": "active" },
        }))
        .unwrap();
        let ids: Vec<&str> = snapshot.bins.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "10", "north", "07"]);
    }

    #[test]
    fn array_index_matches_javascript_rules() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index("007"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("1.5"), None);
        assert_eq!(array_index(""), None);
        assert_eq!(array_index("4294967295"), None);
        assert_eq!(array_index("h1"), None);
    }

    #[test]
    fn timestamps_accept_rfc3339_and_naive_iso() {
        let snapshot = ingest_snapshot(&json!({
            "a": { "fillLevel": 10, "status": "active", "lastUpdated": "2026-01-12T08:30:00Z" },
            "b": { "fillLevel": 10, "status": "active", "lastUpdated": "2026-01-12T08:30:00.123456" },
            "c": { "fillLevel": 10, "status": "active", "lastUpdated": "yesterday" },
        }))
        .unwrap();
        assert_eq!(snapshot.bins.len(), 2);
        let naive = snapshot.bins[1].last_updated.unwrap();
        assert_eq!(naive.hour(), 8);
        assert_eq!(naive.minute(), 30);
        assert!(matches!(
            snapshot.rejected[0].error,
            IngestError::InvalidTimestamp { .. }
        ));
    }
}
