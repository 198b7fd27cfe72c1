//! Integration tests for the mapping strategies
//!
//! Covers the agreement between the static reference mapper, the reflective
//! baseline, and the compiled fast tier, plus the per-record error
//! contracts.

mod common;

use common::programmer_record;
use recast::samples::{generate_programmer_records, static_programmer_mapper, Programmer};
use recast::{Error, ReflectiveMapper, Specializer};

mod compiled_mapping {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_six_field_record_end_to_end() {
        let engine = Specializer::new();
        let mapper = engine.mapper_for::<Programmer>().unwrap();

        let programmer = mapper.invoke(&programmer_record()).unwrap();
        assert_eq!(programmer.first_name, "A");
        assert_eq!(programmer.middle_name, "B");
        assert_eq!(programmer.last_name, "C");
        assert_eq!(programmer.favorite_language, "D");
        assert_eq!(programmer.gender, "E");
        assert_eq!(programmer.archetype, "F");
    }

    #[test]
    fn test_compiled_agrees_with_static_reference() {
        let engine = Specializer::new();
        let mapper = engine.mapper_for::<Programmer>().unwrap();

        for record in generate_programmer_records(50) {
            let compiled = mapper.invoke(&record).unwrap();
            let reference = static_programmer_mapper(&record).unwrap();
            assert_eq!(compiled, reference);
        }
    }

    #[test]
    fn test_missing_field_fails_without_a_visible_instance() {
        let engine = Specializer::new();
        let mapper = engine.mapper_for::<Programmer>().unwrap();

        let mut record = programmer_record();
        record.remove("FavoriteLanguage");

        let err = mapper.invoke(&record).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                type_name: "Programmer",
                field: "FavoriteLanguage"
            }
        ));
    }

    #[test]
    fn test_mapper_survives_bad_records() {
        let engine = Specializer::new();
        let mapper = engine.mapper_for::<Programmer>().unwrap();

        let mut bad = programmer_record();
        bad.remove("Gender");
        assert!(mapper.invoke(&bad).is_err());

        let programmer = mapper.invoke(&programmer_record()).unwrap();
        assert_eq!(programmer.gender, "E");
    }
}

mod reflective_mapping {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reflective_agrees_with_static_reference() {
        let mapper = ReflectiveMapper::<Programmer>::new().unwrap();

        for record in generate_programmer_records(50) {
            let reflective = mapper.invoke(&record).unwrap();
            let reference = static_programmer_mapper(&record).unwrap();
            assert_eq!(reflective, reference);
        }
    }

    #[test]
    fn test_reflective_missing_field() {
        let mapper = ReflectiveMapper::<Programmer>::new().unwrap();
        let mut record = programmer_record();
        record.remove("FirstName");
        assert!(matches!(
            mapper.invoke(&record).unwrap_err(),
            Error::MissingField {
                field: "FirstName",
                ..
            }
        ));
    }
}

mod coercion {
    use super::*;
    use pretty_assertions::assert_eq;

    recast::reflect_record! {
        pub struct Measurement {
            "Sensor" => sensor: Str,
            "Reading" => reading: Int,
        }
    }

    #[test]
    fn test_integer_fields_coerce_from_strings() {
        let engine = Specializer::new();
        let mapper = engine.mapper_for::<Measurement>().unwrap();
        let record = recast::record_from_pairs([("Sensor", "thermo-1"), ("Reading", "-17")]);
        let measurement = mapper.invoke(&record).unwrap();
        assert_eq!(measurement.sensor, "thermo-1");
        assert_eq!(measurement.reading, -17);
    }

    #[test]
    fn test_uncoercible_value_is_a_type_mismatch() {
        let engine = Specializer::new();
        let mapper = engine.mapper_for::<Measurement>().unwrap();
        let record = recast::record_from_pairs([("Sensor", "thermo-1"), ("Reading", "cold")]);
        assert!(matches!(
            mapper.invoke(&record).unwrap_err(),
            Error::TypeMismatch { .. }
        ));
    }
}
