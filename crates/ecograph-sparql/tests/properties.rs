//! Structural properties of assembled statements.

use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;

use ecograph_core::{EntityKind, OntologyConfig, Registry};
use ecograph_sparql::encode::{decode_literal, encode_literal};
use ecograph_sparql::{Assembler, FixedClock, Minter};

fn assembler(token: u64) -> Assembler<FixedClock> {
    Assembler::with_minter(
        Registry::builtin(),
        OntologyConfig::default(),
        Minter::new(FixedClock(token)),
    )
}

/// Punctuation characters that appear outside string literals.
fn structural_punctuation(block: &str) -> Vec<char> {
    let mut out = Vec::new();
    let mut in_literal = false;
    let mut chars = block.chars();
    while let Some(ch) = chars.next() {
        match (in_literal, ch) {
            (true, '\\') => {
                chars.next();
            }
            (_, '"') => in_literal = !in_literal,
            (false, ';' | '.') => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Literal contents in order of appearance, decoded.
fn literals(block: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = block.chars();
    while let Some(ch) = chars.next() {
        if ch != '"' {
            continue;
        }
        let mut lit = String::from("\"");
        while let Some(c) = chars.next() {
            lit.push(c);
            match c {
                '\\' => {
                    if let Some(next) = chars.next() {
                        lit.push(next);
                    }
                }
                '"' => break,
                _ => {}
            }
        }
        out.push(decode_literal(&lit).expect("well-formed literal"));
    }
    out
}

fn kind_strategy() -> impl Strategy<Value = EntityKind> {
    prop::sample::select(EntityKind::ALL.to_vec())
}

/// A subset of the kind's declared fields, each with a possibly-empty value.
fn record_strategy() -> impl Strategy<Value = (EntityKind, BTreeMap<String, String>)> {
    kind_strategy().prop_flat_map(|kind| {
        let names: Vec<&'static str> = kind.descriptor().fields.iter().map(|f| f.name).collect();
        let n = names.len();
        (
            Just(kind),
            prop::sample::subsequence(names, 0..=n),
            prop::collection::vec("[a-zA-Z0-9 \"\\\\;.\\n\\t'é]{0,12}", n),
        )
            .prop_map(|(kind, chosen, values)| {
                let map = chosen
                    .into_iter()
                    .zip(values)
                    .map(|(k, v)| (k.to_string(), v))
                    .collect();
                (kind, map)
            })
    })
}

proptest! {
    #[test]
    fn prop_exactly_one_type_triple((kind, values) in record_strategy()) {
        let stmt = assembler(1).assemble(kind.key(), &values).unwrap();
        let descriptor = kind.descriptor();
        let type_triple = format!("rdf:type {} ", descriptor.class_uri);
        prop_assert_eq!(stmt.triples.matches(&type_triple).count(), 1);
        prop_assert_eq!(stmt.text.matches("INSERT DATA").count(), 1);
    }

    #[test]
    fn prop_punctuation_tracks_populated_fields((kind, values) in record_strategy()) {
        let stmt = assembler(1).assemble(kind.key(), &values).unwrap();
        let populated = values.values().filter(|v| !v.is_empty()).count();

        let punct = structural_punctuation(&stmt.triples);
        prop_assert_eq!(punct.len(), populated + 1);
        prop_assert_eq!(punct.iter().filter(|c| **c == ';').count(), populated);
        prop_assert_eq!(punct.last(), Some(&'.'));
    }

    #[test]
    fn prop_values_survive_serialization((kind, values) in record_strategy()) {
        let stmt = assembler(1).assemble(kind.key(), &values).unwrap();
        let descriptor = kind.descriptor();
        let expected: Vec<String> = descriptor
            .fields
            .iter()
            .filter_map(|f| values.get(f.name).filter(|v| !v.is_empty()).cloned())
            .collect();
        prop_assert_eq!(literals(&stmt.triples), expected);
    }

    #[test]
    fn prop_assembly_is_deterministic((kind, values) in record_strategy(), token in any::<u32>()) {
        let a = assembler(u64::from(token)).assemble(kind.key(), &values).unwrap();
        let b = assembler(u64::from(token)).assemble(kind.key(), &values).unwrap();
        prop_assert_eq!(a.text, b.text);
    }

    #[test]
    fn prop_literal_roundtrip(raw in any::<String>()) {
        match encode_literal(&raw) {
            Ok(encoded) => {
                prop_assert_eq!(decode_literal(&encoded), Some(raw));
            }
            Err(e) => {
                prop_assert!(e.character.is_ascii_control());
                prop_assert!(!matches!(e.character, '\n' | '\r' | '\t' | '\x08' | '\x0C'));
            }
        }
    }
}

#[test]
fn fallback_predicate_for_every_unmapped_field() {
    for descriptor in Registry::builtin().iter() {
        for field in descriptor.fields.iter().filter(|f| f.predicate_uri.is_none()) {
            let values = BTreeMap::from([(field.name.to_string(), "valeur".to_string())]);
            let stmt = assembler(1).assemble(descriptor.key, &values).unwrap();
            assert!(stmt
                .triples
                .ends_with(&format!("{} \"valeur\" .", descriptor.fallback_predicate)));
        }
    }
}

#[test]
fn ten_thousand_identifiers_are_distinct() {
    let minter = Minter::system();
    let ids: HashSet<_> = (0..10_000).map(|_| minter.mint("certifications")).collect();
    assert_eq!(ids.len(), 10_000);
}

#[test]
fn empty_activity_example() {
    let stmt = assembler(77).assemble("activites", &BTreeMap::new()).unwrap();
    assert_eq!(stmt.triples, "eco:activites_77 rdf:type eco:ActiviteTouristique .");
}
