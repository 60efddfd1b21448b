//! Record file encoding.
//!
//! Files hold a tagged JSON envelope:
//! `{"format": 1, "kind": "student", "record": { ... }}`.
//! The record body never contains its own path and refers to other records
//! by path string only.

use crate::model::record::{Record, RecordKind};
use crate::store::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Envelope version written by this build. Other versions are rejected.
pub const FORMAT_VERSION: u32 = 1;

/// Extension of record files inside collection directories.
pub const RECORD_EXTENSION: &str = "rec";

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    format: u32,
    kind: RecordKind,
    record: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    format: u32,
    kind: RecordKind,
    record: Value,
}

/// Serializes a full snapshot of `record`.
pub fn encode<T: Record>(record: &T) -> StoreResult<Vec<u8>> {
    let envelope = EnvelopeRef {
        format: FORMAT_VERSION,
        kind: T::KIND,
        record,
    };
    serde_json::to_vec_pretty(&envelope)
        .map_err(|err| StoreError::corrupt(record.path(), format!("encode failed: {err}")))
}

/// Reads only the envelope header and body, without decoding the body.
pub fn decode_envelope(path: &Path, bytes: &[u8]) -> StoreResult<(RecordKind, Value)> {
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|err| StoreError::corrupt(path, format!("invalid envelope: {err}")))?;
    if envelope.format != FORMAT_VERSION {
        return Err(StoreError::corrupt(
            path,
            format!(
                "unsupported format version {} (expected {FORMAT_VERSION})",
                envelope.format
            ),
        ));
    }
    Ok((envelope.kind, envelope.record))
}

/// Decodes a record of kind `T`, binding it to `path` and validating it.
///
/// # Errors
/// - `UnsupportedType` when the file holds another record kind.
/// - `CorruptData` for malformed bytes, unknown versions, or invalid payloads.
pub fn decode<T: Record>(path: &Path, bytes: &[u8]) -> StoreResult<T> {
    let (kind, body) = decode_envelope(path, bytes)?;
    if kind != T::KIND {
        return Err(StoreError::UnsupportedType {
            expected: T::KIND.as_str(),
            found: kind,
        });
    }
    decode_body(path, body)
}

pub(crate) fn decode_body<T: Record>(path: &Path, body: Value) -> StoreResult<T> {
    let mut record: T = serde_json::from_value(body)
        .map_err(|err| StoreError::corrupt(path, format!("invalid {} record: {err}", T::KIND)))?;
    record.bind_path(path.to_path_buf());
    record
        .validate()
        .map_err(|err| StoreError::corrupt(path, err.to_string()))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, FORMAT_VERSION};
    use crate::model::grade::GradeLevel;
    use crate::model::record::{Record, RecordKind};
    use crate::model::section::Section;
    use crate::model::app_state::Settings;
    use crate::store::StoreError;
    use std::path::Path;

    #[test]
    fn encoded_envelope_carries_kind_and_version_but_not_path() {
        let section = Section::new("sections/GradeI_Rizal.rec", "Rizal", GradeLevel::GradeI);
        let bytes = encode(&section).expect("section encodes");
        let json: serde_json::Value = serde_json::from_slice(&bytes).expect("valid json");

        assert_eq!(json["format"], FORMAT_VERSION);
        assert_eq!(json["kind"], "section");
        assert_eq!(json["record"]["grade"], "Grade I");
        assert!(json["record"].get("path").is_none());
    }

    #[test]
    fn decode_binds_path_from_location() {
        let section = Section::new("a.rec", "Rizal", GradeLevel::GradeI);
        let bytes = encode(&section).expect("section encodes");

        let decoded: Section = decode(Path::new("b.rec"), &bytes).expect("section decodes");
        assert_eq!(decoded.path(), Path::new("b.rec"));
        assert_eq!(decoded.name, "Rizal");
    }

    #[test]
    fn decode_rejects_other_kinds() {
        let settings = Settings::new("settings.rec");
        let bytes = encode(&settings).expect("settings encode");

        let err = decode::<Section>(Path::new("settings.rec"), &bytes).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedType {
                expected: "section",
                found: RecordKind::Settings
            }
        ));
    }

    #[test]
    fn decode_rejects_unknown_versions_and_garbage() {
        let future = br#"{"format": 99, "kind": "settings", "record": {}}"#;
        let err = decode::<Settings>(Path::new("s.rec"), future).unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { .. }));

        let err = decode::<Settings>(Path::new("s.rec"), b"\x80\x04pickle").unwrap_err();
        assert!(matches!(err, StoreError::CorruptData { .. }));
    }

    #[test]
    fn decode_rejects_invalid_persisted_state() {
        let bytes = br#"{"format": 1, "kind": "section", "record": {
            "name": "Rizal", "grade": "Grade I", "adviser": "t/a.rec",
            "teachers": ["t/a.rec"], "students": []
        }}"#;
        let err = decode::<Section>(Path::new("s.rec"), bytes).unwrap_err();
        match err {
            StoreError::CorruptData { message, .. } => assert!(message.contains("adviser")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
