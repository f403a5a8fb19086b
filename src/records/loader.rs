use serde_json::{Map, Value};
use std::path::PathBuf;
use thiserror::Error;

use super::model::Record;
use crate::resources::{ResourceBundle, ResourceLocation};

/// Top-level key holding the record list in the bundled file.
pub const DEFAULT_RECORDS_KEY: &str = "cats";

/// Maximum resource size accepted by [`read_location`] (1 MB).
pub const MAX_RESOURCE_SIZE: u64 = 1_048_576;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const FIELD_NAME: &str = "name";
const FIELD_ID: &str = "cat_id";
const FIELD_LINK: &str = "instagram";
const FIELD_DESCRIPTION: &str = "description";

// ============================================================================
// Error Types
// ============================================================================

/// Failures that leave the loader with no record list at all.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Failed to read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resource too large: {} is {size} bytes (max {max} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Missing required key '{0}'")]
    MissingKey(String),

    #[error("Key '{0}' does not hold a list of records")]
    NotAList(String),
}

/// Why a single source entry was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("entry is not an object")]
    NotAnObject,

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' should be a string, found {found}")]
    WrongType {
        field: &'static str,
        found: &'static str,
    },

    #[error("name is empty")]
    EmptyName,

    #[error("cat_id '{0}' is not an integer")]
    InvalidId(String),
}

/// A source entry dropped during decoding, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position of the entry in the source array.
    pub index: usize,
    pub reason: EntryError,
}

/// Result of a successful decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Valid records, in source order.
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedEntry>,
}

/// Outcome of the whole locate → read → decode pipeline.
#[derive(Debug)]
pub enum LoadOutcome {
    /// At least one record decoded.
    Loaded {
        records: Vec<Record>,
        skipped: Vec<SkippedEntry>,
    },
    /// Decoding succeeded but produced no records.
    Empty { skipped: Vec<SkippedEntry> },
    /// Nothing could be decoded.
    Failed(LoadError),
}

impl LoadOutcome {
    pub fn records(&self) -> &[Record] {
        match self {
            Self::Loaded { records, .. } => records,
            Self::Empty { .. } | Self::Failed(_) => &[],
        }
    }

    pub fn skipped(&self) -> &[SkippedEntry] {
        match self {
            Self::Loaded { skipped, .. } | Self::Empty { skipped } => skipped,
            Self::Failed(_) => &[],
        }
    }
}

impl From<Decoded> for LoadOutcome {
    fn from(decoded: Decoded) -> Self {
        if decoded.records.is_empty() {
            Self::Empty {
                skipped: decoded.skipped,
            }
        } else {
            Self::Loaded {
                records: decoded.records,
                skipped: decoded.skipped,
            }
        }
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Read a located resource fully into memory.
///
/// # Errors
///
/// - [`LoadError::TooLarge`] if the file exceeds [`MAX_RESOURCE_SIZE`]
/// - [`LoadError::Unreadable`] if the file cannot be read
pub fn read_location(location: &ResourceLocation) -> Result<Vec<u8>, LoadError> {
    let path = location.path();
    let unreadable = |source: std::io::Error| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    // SEC: check size before reading to bound memory use
    let meta = std::fs::metadata(path).map_err(unreadable)?;
    if meta.len() > MAX_RESOURCE_SIZE {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            max: MAX_RESOURCE_SIZE,
        });
    }

    std::fs::read(path).map_err(unreadable)
}

/// Decode a JSON document into records.
///
/// A leading UTF-8 byte-order mark is skipped.
///
/// The document must be an object whose `records_key` holds an array. Each
/// array entry is decoded on its own; entries that fail validation are
/// skipped and reported in [`Decoded::skipped`], the rest keep source order.
///
/// # Errors
///
/// - [`LoadError::MalformedJson`] if the bytes are not JSON
/// - [`LoadError::MissingKey`] if the top level is not an object holding `records_key`
/// - [`LoadError::NotAList`] if `records_key` does not hold an array
pub fn decode_records(bytes: &[u8], records_key: &str) -> Result<Decoded, LoadError> {
    // A leading UTF-8 byte-order mark is allowed and ignored
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let document: Value = serde_json::from_slice(bytes)?;

    let entries = document
        .as_object()
        .and_then(|top| top.get(records_key))
        .ok_or_else(|| LoadError::MissingKey(records_key.to_string()))?
        .as_array()
        .ok_or_else(|| LoadError::NotAList(records_key.to_string()))?;

    let mut decoded = Decoded {
        records: Vec::with_capacity(entries.len()),
        skipped: Vec::new(),
    };

    for (index, entry) in entries.iter().enumerate() {
        match decode_entry(entry) {
            Ok(record) => decoded.records.push(record),
            Err(reason) => {
                tracing::warn!(index, reason = %reason, "Skipping invalid record entry");
                decoded.skipped.push(SkippedEntry { index, reason });
            }
        }
    }

    Ok(decoded)
}

/// Locate, read and decode `file_name` from `bundle`.
///
/// Never fails: every error is logged and returned as [`LoadOutcome::Failed`].
pub fn load_records(bundle: &ResourceBundle, file_name: &str, records_key: &str) -> LoadOutcome {
    let result = bundle
        .locate(file_name)
        .ok_or_else(|| LoadError::NotFound(file_name.to_string()))
        .and_then(|location| {
            let bytes = read_location(&location)?;
            decode_records(&bytes, records_key)
        });

    match result {
        Ok(decoded) => {
            tracing::info!(
                file = file_name,
                records = decoded.records.len(),
                skipped = decoded.skipped.len(),
                "Loaded records"
            );
            decoded.into()
        }
        Err(e) => {
            tracing::error!(file = file_name, error = %e, "Failed to load records");
            LoadOutcome::Failed(e)
        }
    }
}

// ============================================================================
// Entry decoding
// ============================================================================

fn decode_entry(entry: &Value) -> Result<Record, EntryError> {
    let fields = entry.as_object().ok_or(EntryError::NotAnObject)?;

    let name = required_str(fields, FIELD_NAME)?;
    let id_text = required_str(fields, FIELD_ID)?;
    let link = required_str(fields, FIELD_LINK)?;
    let description = optional_str(fields, FIELD_DESCRIPTION)?;

    if name.is_empty() {
        return Err(EntryError::EmptyName);
    }
    let id = id_text
        .parse::<i64>()
        .map_err(|_| EntryError::InvalidId(id_text.to_string()))?;

    Ok(Record::new(name, id, link, description.map(str::to_string)))
}

fn required_str<'a>(fields: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, EntryError> {
    match fields.get(field) {
        None => Err(EntryError::MissingField(field)),
        Some(value) => value.as_str().ok_or(EntryError::WrongType {
            field,
            found: type_name(value),
        }),
    }
}

/// A `null` or absent field is `None`; any other non-string is an error.
fn optional_str<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, EntryError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(EntryError::WrongType {
            field,
            found: type_name(other),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
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
    use pretty_assertions::assert_eq;

    fn decode(json: &str) -> Result<Decoded, LoadError> {
        decode_records(json.as_bytes(), DEFAULT_RECORDS_KEY)
    }

    #[test]
    fn test_single_record() {
        let decoded =
            decode(r#"{"cats":[{"name":"Felix","cat_id":"1","instagram":"https://instagram.com/felix"}]}"#)
                .unwrap();

        assert_eq!(
            decoded.records,
            vec![Record::new("Felix", 1, "https://instagram.com/felix", None)]
        );
        assert!(decoded.skipped.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let decoded = decode(
            r#"{"cats":[
                {"name":"Zed","cat_id":"3","instagram":"https://instagram.com/zed"},
                {"name":"Alice","cat_id":"1","instagram":"https://instagram.com/alice"},
                {"name":"Mo","cat_id":"2","instagram":"https://instagram.com/mo"}
            ]}"#,
        )
        .unwrap();

        let names: Vec<&str> = decoded.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Alice", "Mo"]);
    }

    #[test]
    fn test_description_field() {
        let decoded = decode(
            r#"{"cats":[{"name":"Felix","cat_id":"1","instagram":"x","description":"Loves boxes"}]}"#,
        )
        .unwrap();
        assert_eq!(decoded.records[0].description, "Loves boxes");
    }

    #[test]
    fn test_null_description_uses_default() {
        let decoded =
            decode(r#"{"cats":[{"name":"Felix","cat_id":"1","instagram":"x","description":null}]}"#)
                .unwrap();
        assert_eq!(decoded.records[0].description, "Hi I'm Felix");
    }

    #[test]
    fn test_non_numeric_id_skips_only_that_entry() {
        let decoded = decode(
            r#"{"cats":[
                {"name":"Felix","cat_id":"1","instagram":"https://instagram.com/felix"},
                {"name":"Tom","cat_id":"two","instagram":"https://instagram.com/tom"},
                {"name":"Kitty","cat_id":"3","instagram":"https://instagram.com/kitty"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(decoded.records.len(), 2);
        assert_eq!(decoded.records[0].name, "Felix");
        assert_eq!(decoded.records[1].name, "Kitty");
        assert_eq!(
            decoded.skipped,
            vec![SkippedEntry {
                index: 1,
                reason: EntryError::InvalidId("two".to_string()),
            }]
        );
    }

    #[test]
    fn test_id_must_be_a_string() {
        let decoded = decode(r#"{"cats":[{"name":"Felix","cat_id":1,"instagram":"x"}]}"#).unwrap();
        assert!(decoded.records.is_empty());
        assert_eq!(
            decoded.skipped[0].reason,
            EntryError::WrongType {
                field: "cat_id",
                found: "number"
            }
        );
    }

    #[test]
    fn test_id_with_whitespace_is_invalid() {
        let decoded = decode(r#"{"cats":[{"name":"Felix","cat_id":" 1","instagram":"x"}]}"#).unwrap();
        assert_eq!(
            decoded.skipped[0].reason,
            EntryError::InvalidId(" 1".to_string())
        );
    }

    #[test]
    fn test_negative_id_accepted() {
        let decoded = decode(r#"{"cats":[{"name":"Felix","cat_id":"-4","instagram":"x"}]}"#).unwrap();
        assert_eq!(decoded.records[0].id, -4);
    }

    #[test]
    fn test_missing_fields_skipped() {
        let decoded = decode(
            r#"{"cats":[
                {"cat_id":"1","instagram":"x"},
                {"name":"Tom","instagram":"x"},
                {"name":"Kitty","cat_id":"3"}
            ]}"#,
        )
        .unwrap();

        let reasons: Vec<EntryError> = decoded.skipped.into_iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![
                EntryError::MissingField("name"),
                EntryError::MissingField("cat_id"),
                EntryError::MissingField("instagram"),
            ]
        );
        assert!(decoded.records.is_empty());
    }

    #[test]
    fn test_empty_name_skipped() {
        let decoded = decode(r#"{"cats":[{"name":"","cat_id":"1","instagram":"x"}]}"#).unwrap();
        assert_eq!(decoded.skipped[0].reason, EntryError::EmptyName);
    }

    #[test]
    fn test_non_object_entry_skipped() {
        let decoded = decode(
            r#"{"cats":["Felix", {"name":"Tom","cat_id":"2","instagram":"x"}, 42]}"#,
        )
        .unwrap();

        assert_eq!(decoded.records.len(), 1);
        assert_eq!(decoded.records[0].name, "Tom");
        let indices: Vec<usize> = decoded.skipped.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_wrong_description_type_skipped() {
        let decoded =
            decode(r#"{"cats":[{"name":"Felix","cat_id":"1","instagram":"x","description":5}]}"#)
                .unwrap();
        assert_eq!(
            decoded.skipped[0].reason,
            EntryError::WrongType {
                field: "description",
                found: "number"
            }
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let decoded =
            decode(r#"{"cats":[{"name":"Felix","cat_id":"1","instagram":"x","age":"3"}]}"#).unwrap();
        assert_eq!(decoded.records.len(), 1);
    }

    #[test]
    fn test_empty_array_is_valid() {
        let decoded = decode(r#"{"cats":[]}"#).unwrap();
        assert_eq!(decoded, Decoded::default());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(decode("{\"cats\": ["), Err(LoadError::MalformedJson(_))));
        assert!(matches!(decode(""), Err(LoadError::MalformedJson(_))));
    }

    #[test]
    fn test_missing_key() {
        let err = decode(r#"{"dogs":[]}"#).unwrap_err();
        assert!(matches!(err, LoadError::MissingKey(ref k) if k == "cats"));
        assert!(err.to_string().contains("cats"));
    }

    #[test]
    fn test_top_level_array_is_missing_key() {
        assert!(matches!(decode("[]"), Err(LoadError::MissingKey(_))));
    }

    #[test]
    fn test_key_not_a_list() {
        assert!(matches!(decode(r#"{"cats":{"name":"Felix"}}"#), Err(LoadError::NotAList(_))));
    }

    #[test]
    fn test_custom_records_key() {
        let decoded = decode_records(
            br#"{"kittens":[{"name":"Felix","cat_id":"1","instagram":"x"}]}"#,
            "kittens",
        )
        .unwrap();
        assert_eq!(decoded.records.len(), 1);
    }

    #[test]
    fn test_outcome_from_decoded() {
        let empty: LoadOutcome = Decoded::default().into();
        assert!(matches!(empty, LoadOutcome::Empty { .. }));
        assert!(empty.records().is_empty());

        let loaded: LoadOutcome = Decoded {
            records: vec![Record::new("Felix", 1, "x", None)],
            skipped: vec![],
        }
        .into();
        assert!(matches!(loaded, LoadOutcome::Loaded { .. }));
        assert_eq!(loaded.records().len(), 1);
    }

    #[test]
    fn test_all_entries_invalid_is_empty_with_skipped() {
        let outcome: LoadOutcome = decode(r#"{"cats":[{"name":"Felix","cat_id":"x","instagram":"y"}]}"#)
            .unwrap()
            .into();
        assert!(matches!(outcome, LoadOutcome::Empty { .. }));
        assert_eq!(outcome.skipped().len(), 1);
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice(
            br#"{"cats":[{"name":"Felix","cat_id":"1","instagram":"https://instagram.com/felix"}]}"#,
        );

        let decoded = decode_records(&bytes, DEFAULT_RECORDS_KEY).unwrap();
        assert_eq!(
            decoded.records,
            vec![Record::new("Felix", 1, "https://instagram.com/felix", None)]
        );
    }

    #[test]
    fn test_bom_alone_is_malformed() {
        assert!(matches!(
            decode_records(b"\xEF\xBB\xBF", DEFAULT_RECORDS_KEY),
            Err(LoadError::MalformedJson(_))
        ));
    }

    fn bundle_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("instacats_loader_{}", name));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_bom_prefixed_file() {
        let dir = bundle_dir("bom");
        std::fs::write(
            dir.join("InstaCats.json"),
            "\u{feff}{\"cats\":[{\"name\":\"Felix\",\"cat_id\":\"1\",\"instagram\":\"https://instagram.com/felix\"}]}",
        )
        .unwrap();

        let outcome = load_records(&ResourceBundle::new(&dir), "InstaCats.json", DEFAULT_RECORDS_KEY);
        assert!(matches!(outcome, LoadOutcome::Loaded { .. }));
        assert_eq!(outcome.records()[0].name, "Felix");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_oversized_file_is_too_large() {
        let dir = bundle_dir("too_large");
        let size = MAX_RESOURCE_SIZE as usize + 1;
        std::fs::write(dir.join("InstaCats.json"), vec![b' '; size]).unwrap();

        let outcome = load_records(&ResourceBundle::new(&dir), "InstaCats.json", DEFAULT_RECORDS_KEY);
        match outcome {
            LoadOutcome::Failed(LoadError::TooLarge { size: got, max, .. }) => {
                assert_eq!(got, size as u64);
                assert_eq!(max, MAX_RESOURCE_SIZE);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_file_at_size_limit_is_read() {
        let dir = bundle_dir("at_limit");
        let path = dir.join("InstaCats.json");
        std::fs::write(&path, vec![b' '; MAX_RESOURCE_SIZE as usize]).unwrap();

        let location = ResourceBundle::new(&dir).locate("InstaCats.json").unwrap();
        assert_eq!(read_location(&location).unwrap().len(), MAX_RESOURCE_SIZE as usize);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_vanished_file_is_unreadable() {
        let dir = bundle_dir("vanished");
        let path = dir.join("InstaCats.json");
        std::fs::write(&path, r#"{"cats":[]}"#).unwrap();

        let location = ResourceBundle::new(&dir).locate("InstaCats.json").unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = read_location(&location).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Unreadable { ref path, ref source }
                if path == location.path() && source.kind() == std::io::ErrorKind::NotFound
        ));
        assert!(err.to_string().contains("InstaCats.json"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
