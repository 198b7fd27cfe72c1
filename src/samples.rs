//! Sample types and test data for the benchmark boundary
//!
//! [`Programmer`] is the six-field record type every mapping strategy is
//! measured against; [`Person`] is the two-property base type for the proxy
//! demonstration. Both are declared through
//! [`reflect_record!`](crate::reflect_record), so their accessor tables are
//! generated at build time.

use crate::error::{Error, Result};
use crate::record::Record;
use crate::reflect_record;
use rand::Rng;

reflect_record! {
    /// The record type used by the deserialization benchmark
    pub struct Programmer {
        "FirstName" => first_name: Str,
        "MiddleName" => middle_name: Str,
        "LastName" => last_name: Str,
        "FavoriteLanguage" => favorite_language: Str,
        "Gender" => gender: Str,
        "Archetype" => archetype: Str,
    }
}

reflect_record! {
    /// The base type used by the proxy demonstration; every property is
    /// overridable so a proxy shape can intercept it
    pub struct Person {
        overridable "FirstName" => first_name: OptStr,
        overridable "LastName" => last_name: OptStr,
    }
}

impl Person {
    /// Selector for the `FirstName` property
    pub fn first_name_selector() -> crate::descriptor::Getter<Self> {
        use crate::descriptor::Reflect;
        Self::fields()[0].get
    }

    /// Selector for the `LastName` property
    pub fn last_name_selector() -> crate::descriptor::Getter<Self> {
        use crate::descriptor::Reflect;
        Self::fields()[1].get
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FirstName: {} LastName: {}",
            self.first_name.as_deref().unwrap_or("<null>"),
            self.last_name.as_deref().unwrap_or("<null>")
        )
    }
}

/// Hand-written field-by-field reference mapper for [`Programmer`].
///
/// This is the static comparison baseline: no descriptor, no compilation
/// step, just direct assignments. Every other strategy must agree with it
/// field for field.
pub fn static_programmer_mapper(record: &Record) -> Result<Programmer> {
    fn take(record: &Record, field: &'static str) -> Result<String> {
        record
            .get(field)
            .cloned()
            .ok_or(Error::missing_field("Programmer", field))
    }

    Ok(Programmer {
        first_name: take(record, "FirstName")?,
        middle_name: take(record, "MiddleName")?,
        last_name: take(record, "LastName")?,
        favorite_language: take(record, "FavoriteLanguage")?,
        gender: take(record, "Gender")?,
        archetype: take(record, "Archetype")?,
    })
}

/// Names of the fields every generated programmer record carries
pub const PROGRAMMER_FIELDS: [&str; 6] = [
    "FirstName",
    "MiddleName",
    "LastName",
    "FavoriteLanguage",
    "Gender",
    "Archetype",
];

/// A random 32-character hex identifier, the record values used by the
/// benchmark
pub fn random_identifier() -> String {
    let mut rng = rand::thread_rng();
    (0..32)
        .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
        .collect()
}

/// Generate a set of programmer records filled with random identifiers
pub fn generate_programmer_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|_| {
            PROGRAMMER_FIELDS
                .iter()
                .map(|&field| (field.to_string(), random_identifier()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Reflect;
    use crate::record::record_from_pairs;

    pub(crate) fn sample_programmer_record() -> Record {
        record_from_pairs([
            ("FirstName", "A"),
            ("MiddleName", "B"),
            ("LastName", "C"),
            ("FavoriteLanguage", "D"),
            ("Gender", "E"),
            ("Archetype", "F"),
        ])
    }

    #[test]
    fn test_static_mapper_copies_every_field() {
        let programmer = static_programmer_mapper(&sample_programmer_record()).unwrap();
        assert_eq!(programmer.first_name, "A");
        assert_eq!(programmer.middle_name, "B");
        assert_eq!(programmer.last_name, "C");
        assert_eq!(programmer.favorite_language, "D");
        assert_eq!(programmer.gender, "E");
        assert_eq!(programmer.archetype, "F");
    }

    #[test]
    fn test_static_mapper_missing_field() {
        let mut record = sample_programmer_record();
        record.remove("Gender");
        let err = static_programmer_mapper(&record).unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "Gender", .. }));
    }

    #[test]
    fn test_generated_records_are_well_formed() {
        let records = generate_programmer_records(5);
        assert_eq!(records.len(), 5);
        for record in &records {
            for field in PROGRAMMER_FIELDS {
                let value = record.get(field).unwrap();
                assert_eq!(value.len(), 32);
            }
        }
    }

    #[test]
    fn test_person_properties_are_overridable() {
        for spec in Person::fields() {
            assert!(spec.overridable);
        }
        assert_eq!(Person::default().to_string(), "FirstName: <null> LastName: <null>");
    }
}
