//! Records: the loosely-typed input shape
//!
//! A record is a flat, order-irrelevant mapping from field name to string
//! value. Records are what every mapping strategy consumes; they carry no
//! type information of their own.

use crate::error::Result;
use rustc_hash::FxHashMap;

/// A flat string-keyed, string-valued mapping representing one entity
pub type Record = FxHashMap<String, String>;

/// Build a record from name/value pairs
pub fn record_from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Record {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Parse a record set from a JSON array of flat string objects
pub fn records_from_json(json: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    Ok(records)
}

/// Serialize a record set to pretty-printed JSON
pub fn records_to_json(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_pairs() {
        let record = record_from_pairs([("FirstName", "Ada"), ("LastName", "Lovelace")]);
        assert_eq!(record.get("FirstName").map(String::as_str), Some("Ada"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_json_roundtrip() {
        let records = vec![
            record_from_pairs([("FirstName", "Ada")]),
            record_from_pairs([("FirstName", "Grace")]),
        ];
        let json = records_to_json(&records).unwrap();
        let back = records_from_json(&json).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_malformed_json_is_a_record_format_error() {
        let err = records_from_json("{not json").unwrap_err();
        assert!(err.to_string().starts_with("RecordFormatError"));
    }
}
