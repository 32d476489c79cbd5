//! End-to-end pipeline tests from declaration JSON to rendered glue

use ferrule_codegen::{BuildFailure, HostProfile, Pipeline, SemanticIssue};
use ferrule_model::{DeclSet, GraphError};

fn decls(json: &str) -> DeclSet {
    DeclSet::from_json(json).unwrap()
}

fn zoo() -> DeclSet {
    decls(
        r#"
        {
            "classes": [
                {
                    "name": "pets.Dog",
                    "parent": "pets.Animal",
                    "methods": [ { "name": "fetch" } ]
                },
                {
                    "name": "pets.Animal",
                    "doc": "Base of the zoo.",
                    "fields": [ { "name": "name", "ty": "str" } ],
                    "methods": [ { "name": "speak", "is_virtual": true } ]
                }
            ]
        }
        "#,
    )
}

#[test]
fn test_run_emits_parents_first() {
    let pipeline = Pipeline::new(HostProfile::script());
    let units = pipeline.run(zoo()).unwrap();

    let names: Vec<&str> = units.iter().map(|u| u.class_name.as_str()).collect();
    assert_eq!(names, vec!["pets.Animal", "pets.Dog"]);
    assert_eq!(units[1].file_stem, "pets/Dog");
    assert!(units[1]
        .text
        .contains("bind_class \"pets.Dog\", parent: \"pets.Animal\""));
    assert!(units[0].text.contains("# Base of the zoo."));
}

#[test]
fn test_rerun_is_byte_identical() {
    let pipeline = Pipeline::new(HostProfile::script());
    let first = pipeline.run(zoo()).unwrap();
    let second = pipeline.run(zoo()).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.text, b.text);
    }
}

#[test]
fn test_empty_declset_yields_no_units() {
    let pipeline = Pipeline::new(HostProfile::script());
    let units = pipeline.run(DeclSet::default()).unwrap();
    assert!(units.is_empty());
}

#[test]
fn test_unknown_parent_is_structural() {
    let set = decls(r#"{ "classes": [ { "name": "Child", "parent": "Ghost" } ] }"#);
    let failure = Pipeline::new(HostProfile::script()).run(set).unwrap_err();

    match failure {
        BuildFailure::Structural { errors } => {
            assert_eq!(
                errors,
                vec![GraphError::UnknownParent {
                    class: "Child".to_string(),
                    parent: "Ghost".to_string(),
                }]
            );
        }
        other => panic!("expected structural failure, got {other:?}"),
    }
}

#[test]
fn test_cycle_is_structural() {
    let set = decls(
        r#"
        {
            "classes": [
                { "name": "A", "parent": "B" },
                { "name": "B", "parent": "A" }
            ]
        }
        "#,
    );
    let failure = Pipeline::new(HostProfile::script()).run(set).unwrap_err();

    match failure {
        BuildFailure::Structural { errors } => {
            assert_eq!(
                errors,
                vec![GraphError::InheritanceCycle {
                    class: "A".to_string()
                }]
            );
        }
        other => panic!("expected structural failure, got {other:?}"),
    }
}

#[test]
fn test_structural_batch_spans_assembly_and_linking() {
    // One duplicate class and one unknown parent arrive in a single batch
    let set = decls(
        r#"
        {
            "classes": [
                { "name": "Animal" },
                { "name": "Animal" },
                { "name": "Stray", "parent": "Ghost" }
            ]
        }
        "#,
    );
    let failure = Pipeline::new(HostProfile::script()).run(set).unwrap_err();

    match failure {
        BuildFailure::Structural { errors } => {
            assert_eq!(errors.len(), 2);
            assert!(errors
                .iter()
                .any(|e| matches!(e, GraphError::DuplicateClass { .. })));
            assert!(errors
                .iter()
                .any(|e| matches!(e, GraphError::UnknownParent { .. })));
        }
        other => panic!("expected structural failure, got {other:?}"),
    }
}

#[test]
fn test_semantic_batch_spans_classes() {
    let set = decls(
        r#"
        {
            "classes": [
                { "name": "Animal", "methods": [ { "name": "speak" } ] },
                { "name": "Dog", "parent": "Animal", "methods": [ { "name": "speak" } ] },
                { "name": "Machine", "methods": [ { "name": "run", "is_virtual": true, "is_final": true } ] },
                { "name": "Lathe", "parent": "Machine", "methods": [ { "name": "run" } ] }
            ]
        }
        "#,
    );
    let failure = Pipeline::new(HostProfile::script()).run(set).unwrap_err();

    match failure {
        BuildFailure::Semantic { errors } => {
            assert_eq!(errors.len(), 2);
            assert!(errors
                .iter()
                .all(|e| matches!(e, SemanticIssue::Resolve(_))));
        }
        other => panic!("expected semantic failure, got {other:?}"),
    }
}

#[test]
fn test_raw_members_join_semantic_batch() {
    // Resolution is clean here, so derivation runs and reports every
    // unmarshalable member across the set
    let set = decls(
        r#"
        {
            "classes": [
                { "name": "Codec", "fields": [ { "name": "state", "ty": "raw" } ] },
                { "name": "Buffer", "fields": [ { "name": "bytes", "ty": "raw" } ] }
            ]
        }
        "#,
    );
    let failure = Pipeline::new(HostProfile::script()).run(set).unwrap_err();

    match failure {
        BuildFailure::Semantic { errors } => {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().all(|e| matches!(e, SemanticIssue::Derive(_))));
        }
        other => panic!("expected semantic failure, got {other:?}"),
    }
}

#[test]
fn test_semantic_failure_blocks_all_emission() {
    // Animal itself is fine, but the run still produces nothing
    let set = decls(
        r#"
        {
            "classes": [
                { "name": "Animal", "methods": [ { "name": "speak" } ] },
                { "name": "Dog", "parent": "Animal", "methods": [ { "name": "speak" } ] }
            ]
        }
        "#,
    );
    let failure = Pipeline::new(HostProfile::script()).run(set).unwrap_err();
    assert!(matches!(failure, BuildFailure::Semantic { .. }));
}

#[test]
fn test_merged_declsets_build_together() {
    let mut set = decls(r#"{ "classes": [ { "name": "pets.Animal" } ] }"#);
    set.merge(decls(
        r#"{ "classes": [ { "name": "pets.Dog", "parent": "pets.Animal" } ] }"#,
    ));

    let units = Pipeline::new(HostProfile::script()).run(set).unwrap();
    assert_eq!(units.len(), 2);
}
