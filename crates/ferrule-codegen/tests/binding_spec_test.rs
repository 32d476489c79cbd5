//! Tests for binding spec derivation and host capability gating

use ferrule_codegen::{derive, BindingSpec, Directive, DeriveError, HostProfile};
use ferrule_model::{
    ClassDecl, ClassGraph, ClassGraphBuilder, FieldDecl, MethodDecl, ParamDecl, TypeTag,
    Visibility,
};
use ferrule_resolver::{MethodResolver, ResolvedMethods};

fn class(name: &str, parent: Option<&str>) -> ClassDecl {
    ClassDecl {
        name: name.to_string(),
        parent: parent.map(str::to_string),
        is_abstract: false,
        is_final: false,
        doc: None,
        fields: Vec::new(),
        methods: Vec::new(),
    }
}

fn field(name: &str, ty: TypeTag) -> FieldDecl {
    FieldDecl {
        name: name.to_string(),
        ty,
        visibility: Visibility::Public,
        bound: false,
        alias: None,
        doc: None,
    }
}

fn method(name: &str) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        params: Vec::new(),
        returns: TypeTag::Void,
        is_virtual: false,
        is_final: false,
        is_abstract: false,
        alias: None,
        doc: None,
    }
}

fn analyze(classes: Vec<ClassDecl>) -> (ClassGraph, ResolvedMethods) {
    let mut builder = ClassGraphBuilder::new();
    for decl in classes {
        builder.add_class(decl).unwrap();
    }
    let graph = builder.resolve().unwrap();
    let methods = MethodResolver::new(&graph).resolve_all().unwrap();
    (graph, methods)
}

fn spec_for(
    graph: &ClassGraph,
    methods: &ResolvedMethods,
    name: &str,
    profile: &HostProfile,
) -> BindingSpec {
    let id = graph.id_of(name).unwrap();
    derive(graph.view(id), methods.methods(id), profile).unwrap()
}

fn accessor_fields(spec: &BindingSpec) -> Vec<&str> {
    spec.directives
        .iter()
        .filter_map(|d| match d {
            Directive::Accessor { field, .. } => Some(field.as_str()),
            _ => None,
        })
        .collect()
}

fn method_aliases(spec: &BindingSpec) -> Vec<&str> {
    spec.directives
        .iter()
        .filter_map(|d| match d {
            Directive::Method { alias, .. } => Some(alias.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_directive_order() {
    let mut dog = class("Dog", None);
    dog.fields.push(field("name", TypeTag::Str));
    dog.methods.push(method("speak"));

    let (graph, methods) = analyze(vec![dog]);
    let spec = spec_for(&graph, &methods, "Dog", &HostProfile::script());

    assert_eq!(spec.directives.len(), 4);
    assert!(matches!(spec.directives[0], Directive::Constructor { .. }));
    assert!(matches!(spec.directives[1], Directive::Destructor { .. }));
    assert!(matches!(spec.directives[2], Directive::Accessor { .. }));
    assert!(matches!(spec.directives[3], Directive::Method { .. }));
}

#[test]
fn test_private_fields_skipped_unless_bound() {
    let mut vault = class("Vault", None);
    vault.fields.push(field("label", TypeTag::Str));

    let mut combination = field("combination", TypeTag::Int);
    combination.visibility = Visibility::Private;
    vault.fields.push(combination);

    let mut audit_log = field("audit_log", TypeTag::Str);
    audit_log.visibility = Visibility::Private;
    audit_log.bound = true;
    vault.fields.push(audit_log);

    let mut hinge = field("hinge", TypeTag::Int);
    hinge.visibility = Visibility::Protected;
    vault.fields.push(hinge);

    let (graph, methods) = analyze(vec![vault]);
    let spec = spec_for(&graph, &methods, "Vault", &HostProfile::script());

    assert_eq!(accessor_fields(&spec), vec!["label", "audit_log", "hinge"]);

    let ctor_params: Vec<&str> = spec
        .directives
        .iter()
        .find_map(|d| match d {
            Directive::Constructor { params, .. } => {
                Some(params.iter().map(|p| p.name.as_str()).collect())
            }
            _ => None,
        })
        .unwrap();
    assert_eq!(ctor_params, vec!["label", "audit_log", "hinge"]);
}

#[test]
fn test_abstract_class_has_no_lifecycle_wrappers() {
    let mut shape = class("Shape", None);
    shape.is_abstract = true;
    shape.fields.push(field("sides", TypeTag::Int));
    shape.methods.push(method("describe"));

    let (graph, methods) = analyze(vec![shape]);
    let spec = spec_for(&graph, &methods, "Shape", &HostProfile::script());

    assert!(!spec
        .directives
        .iter()
        .any(|d| matches!(d, Directive::Constructor { .. } | Directive::Destructor { .. })));
    assert_eq!(accessor_fields(&spec), vec!["sides"]);
    assert_eq!(method_aliases(&spec), vec!["describe"]);
}

#[test]
fn test_abstract_methods_not_bound() {
    let mut shape = class("Shape", None);
    shape.is_abstract = true;
    let mut area = method("area");
    area.is_abstract = true;
    area.returns = TypeTag::Float;
    shape.methods.push(area);
    shape.methods.push(method("describe"));

    let (graph, methods) = analyze(vec![shape]);
    let spec = spec_for(&graph, &methods, "Shape", &HostProfile::script());

    assert_eq!(method_aliases(&spec), vec!["describe"]);
}

#[test]
fn test_alias_beats_derived_snake_case() {
    let mut person = class("Person", None);
    person.fields.push(field("fullName", TypeTag::Str));
    let mut nickname = field("preferredName", TypeTag::Str);
    nickname.alias = Some("nick".to_string());
    person.fields.push(nickname);

    person.methods.push(method("getAge"));
    let mut lookup = method("lookupRecord");
    lookup.alias = Some("fetch".to_string());
    person.methods.push(lookup);

    let (graph, methods) = analyze(vec![person]);
    let spec = spec_for(&graph, &methods, "Person", &HostProfile::script());

    let readers: Vec<&str> = spec
        .directives
        .iter()
        .filter_map(|d| match d {
            Directive::Accessor { reader, .. } => Some(reader.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(readers, vec!["get_full_name", "get_nick"]);
    assert_eq!(method_aliases(&spec), vec!["get_age", "fetch"]);
}

#[test]
fn test_ctor_params_cover_inherited_fields() {
    let mut root = class("Root", None);
    root.fields.push(field("x", TypeTag::Int));

    let mut child = class("Child", Some("Root"));
    child.methods.push(method("getX"));

    let (graph, methods) = analyze(vec![root, child]);
    let spec = spec_for(&graph, &methods, "Child", &HostProfile::script());

    assert_eq!(accessor_fields(&spec), vec!["x"]);
    let has_ctor_x = spec.directives.iter().any(|d| match d {
        Directive::Constructor { params, .. } => params.iter().any(|p| p.name == "x"),
        _ => false,
    });
    assert!(has_ctor_x, "inherited field missing from constructor args");
}

#[test]
fn test_method_provenance_reaches_directives() {
    let mut animal = class("Animal", None);
    animal.methods.push(method("sleep"));

    let mut dog = class("Dog", Some("Animal"));
    dog.methods.push(method("bark"));

    let (graph, methods) = analyze(vec![animal, dog]);
    let spec = spec_for(&graph, &methods, "Dog", &HostProfile::script());

    let via: Vec<(&str, &str)> = spec
        .directives
        .iter()
        .filter_map(|d| match d {
            Directive::Method {
                method,
                implemented_in,
                ..
            } => Some((method.as_str(), implemented_in.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(via, vec![("sleep", "Animal"), ("bark", "Dog")]);
}

#[test]
fn test_raw_members_escalate_when_unmarshalable() {
    let mut codec = class("Codec", None);
    codec.fields.push(field("state", TypeTag::Raw));
    let mut feed = method("feed");
    feed.params.push(ParamDecl {
        name: "buffer".to_string(),
        ty: TypeTag::List(Box::new(TypeTag::Raw)),
        default: None,
    });
    codec.methods.push(feed);

    let (graph, methods) = analyze(vec![codec]);
    let id = graph.id_of("Codec").unwrap();
    let errors = derive(graph.view(id), methods.methods(id), &HostProfile::script()).unwrap_err();
    assert_eq!(
        errors,
        vec![
            DeriveError::Unmarshalable {
                class: "Codec".to_string(),
                member: "state".to_string(),
            },
            DeriveError::Unmarshalable {
                class: "Codec".to_string(),
                member: "feed".to_string(),
            },
        ]
    );
}

#[test]
fn test_unbound_raw_field_is_ignored() {
    let mut codec = class("Codec", None);
    let mut state = field("state", TypeTag::Raw);
    state.visibility = Visibility::Private;
    codec.fields.push(state);

    let (graph, methods) = analyze(vec![codec]);
    let spec = spec_for(&graph, &methods, "Codec", &HostProfile::script());
    assert!(accessor_fields(&spec).is_empty());
}

#[test]
fn test_raw_tolerated_when_host_marshals() {
    let mut codec = class("Codec", None);
    codec.fields.push(field("state", TypeTag::Raw));

    let mut profile = HostProfile::script();
    profile.caps.marshals_raw = true;

    let (graph, methods) = analyze(vec![codec]);
    let spec = spec_for(&graph, &methods, "Codec", &profile);
    assert_eq!(accessor_fields(&spec), vec!["state"]);
}

#[test]
fn test_caps_gate_defaults_and_destructors() {
    let mut greeter = class("Greeter", None);
    let mut greet = method("greet");
    greet.params.push(ParamDecl {
        name: "times".to_string(),
        ty: TypeTag::Int,
        default: Some("1".to_string()),
    });
    greeter.methods.push(greet);

    let mut profile = HostProfile::script();
    profile.caps.supports_default_args = false;
    profile.caps.supports_destructors = false;

    let (graph, methods) = analyze(vec![greeter]);
    let spec = spec_for(&graph, &methods, "Greeter", &profile);

    assert!(!spec
        .directives
        .iter()
        .any(|d| matches!(d, Directive::Destructor { .. })));
    let expanded = spec.directives.iter().any(|d| match d {
        Directive::Method {
            expand_defaults, ..
        } => *expand_defaults,
        _ => false,
    });
    assert!(!expanded, "defaults must be dropped for this host");
}

#[test]
fn test_docs_stripped_when_unsupported() {
    let mut dog = class("Dog", None);
    dog.doc = Some("A loyal companion.".to_string());
    let mut name = field("name", TypeTag::Str);
    name.doc = Some("Given name.".to_string());
    dog.fields.push(name);
    let mut speak = method("speak");
    speak.doc = Some("Say something.".to_string());
    dog.methods.push(speak);

    let mut profile = HostProfile::script();
    profile.caps.supports_doc_blocks = false;

    let (graph, methods) = analyze(vec![dog]);
    let spec = spec_for(&graph, &methods, "Dog", &profile);

    assert!(spec.class_doc.is_none());
    for directive in &spec.directives {
        match directive {
            Directive::Accessor { doc, .. } | Directive::Method { doc, .. } => {
                assert!(doc.is_none());
            }
            _ => {}
        }
    }
}

#[test]
fn test_derivation_is_deterministic() {
    let mut animal = class("pets.Animal", None);
    animal.doc = Some("Base of the zoo.".to_string());
    animal.fields.push(field("name", TypeTag::Str));
    animal.methods.push(method("speak"));

    let mut dog = class("pets.Dog", Some("pets.Animal"));
    dog.methods.push(method("fetch"));

    let (graph, methods) = analyze(vec![animal, dog]);
    let first = spec_for(&graph, &methods, "pets.Dog", &HostProfile::script());
    let second = spec_for(&graph, &methods, "pets.Dog", &HostProfile::script());

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
