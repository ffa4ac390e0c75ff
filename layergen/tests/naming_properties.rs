//! Property tests for name derivation and splicing

use layergen::scaffold::naming::{id_field, to_kebab_case, upper_first};
use layergen::scaffold::splice::AggregatorSplice;
use proptest::prelude::*;
use std::path::Path;

proptest! {
    #[test]
    fn pascal_changes_only_first_char(word in "[a-zA-Z0-9]{1,24}") {
        let pascal = upper_first(&word);
        prop_assert_eq!(pascal.len(), word.len());
        prop_assert_eq!(&pascal[1..], &word[1..]);
        prop_assert!(pascal[..1].eq_ignore_ascii_case(&word[..1]));
    }

    #[test]
    fn kebab_has_one_hyphen_per_internal_uppercase(word in "[a-z][a-zA-Z0-9]{0,23}") {
        let kebab = to_kebab_case(&word);
        let internal_upper = word.chars().skip(1).filter(char::is_ascii_uppercase).count();

        prop_assert_eq!(kebab.matches('-').count(), internal_upper);
        prop_assert_eq!(kebab.trim(), kebab.as_str());
        prop_assert_eq!(kebab.to_lowercase(), kebab.clone());
    }

    #[test]
    fn lowercase_words_are_their_own_kebab(word in "[a-z][a-z0-9]{0,23}") {
        prop_assert_eq!(to_kebab_case(&word), word);
    }

    #[test]
    fn id_field_prefixes_pascal(word in "[a-zA-Z][a-zA-Z0-9]{0,23}") {
        prop_assert_eq!(id_field(&word), format!("id{}", upper_first(&word)));
    }

    #[test]
    fn splice_only_inserts(
        head in "[a-z ;\n]{0,40}",
        middle in "[a-z ;\n]{0,40}",
        tail in "[a-z ;\n]{0,40}",
    ) {
        let text = format!("{head}IMPORT_HERE{middle}REGISTER_HERE{tail}");
        let splice = AggregatorSplice {
            import_anchor: "IMPORT_HERE".to_string(),
            registration_anchor: "REGISTER_HERE".to_string(),
            import: "<import>".to_string(),
            registration: "<register>".to_string(),
        };

        let out = splice.apply(&text, Path::new("_index.ts")).unwrap();
        prop_assert_eq!(
            out,
            format!("{head}<import>IMPORT_HERE{middle}<register>REGISTER_HERE{tail}")
        );
    }
}
