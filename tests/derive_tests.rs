//! End-to-end tests for `#[derive(Describe)]`

use field_catalog::{
    fields_of, get_meta, Catalog, CatalogError, CatalogOptions, Describe, Field, ShapeKind,
};
use serde::Serialize;
use serde_json::{json, Value};

fn names(fields: &[Field]) -> Vec<&str> {
    fields.iter().map(|f| f.name.as_str()).collect()
}

#[derive(Describe)]
#[allow(dead_code)]
struct Flat {
    alpha: u32,
    #[catalog(rename = "b")]
    beta: String,
    gamma: f64,
}

#[test]
fn flat_struct_keeps_declaration_order() {
    let fields = fields_of::<Flat>().unwrap();
    assert_eq!(names(&fields), vec!["alpha", "b", "gamma"]);
    assert_eq!(fields[0].type_, "u32");
    assert_eq!(fields[2].type_, "f64");
}

#[derive(Describe, Serialize)]
#[allow(dead_code)]
struct Documented {
    /// Port to listen on.
    ///
    /// Must be free.
    #[serde(rename = "listenPort")]
    port: u16,
    #[serde(rename = "ignored")]
    #[catalog(rename = "host", description = "explicit wins")]
    /// not used
    hostname: String,
    #[serde(skip)]
    cache: Vec<u8>,
    #[catalog(skip)]
    secret: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

#[test]
fn metadata_comes_from_catalog_serde_and_docs() {
    let out: Value = serde_json::from_str(&get_meta::<Documented>().unwrap()).unwrap();
    assert_eq!(out, json!([
        { "name": "listenPort", "type": "u16", "description": "Port to listen on. Must be free." },
        { "name": "host", "type": "String", "description": "explicit wins" },
        { "name": "[]tags", "type": "[]String" },
    ]));
}

fn serialized_keys<T: Serialize>(value: &T) -> Vec<String> {
    match serde_json::to_value(value).unwrap() {
        Value::Object(map) => map.keys().cloned().collect(),
        other => panic!("expected an object, got {other}"),
    }
}

#[derive(Describe, Serialize, Default)]
struct Raw {
    r#type: String,
    r#match: u8,
}

#[test]
fn raw_identifiers_lose_their_prefix() {
    let fields = fields_of::<Raw>().unwrap();
    assert_eq!(names(&fields), vec!["type", "match"]);
    let mut keys = serialized_keys(&Raw::default());
    keys.sort();
    assert_eq!(keys, vec!["match", "type"]);
}

#[derive(Describe, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct CamelConfig {
    listen_port: u16,
    #[serde(rename = "x")]
    other_field: u8,
    max_idle_secs: u32,
}

#[test]
fn serde_rename_all_applies_to_unrenamed_fields() {
    let fields = fields_of::<CamelConfig>().unwrap();
    assert_eq!(names(&fields), vec!["listenPort", "x", "maxIdleSecs"]);
    let mut keys = serialized_keys(&CamelConfig::default());
    keys.sort();
    let mut expected: Vec<String> = names(&fields).into_iter().map(String::from).collect();
    expected.sort();
    assert_eq!(keys, expected);
}

#[derive(Describe, Serialize)]
#[serde(rename_all = "snake_case")]
#[catalog(rename_all = "kebab-case")]
#[allow(dead_code)]
struct KebabCatalog {
    read_timeout: u32,
    #[catalog(rename = "Explicit")]
    write_timeout: u32,
}

#[derive(Describe, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(dead_code)]
struct Env {
    home_dir: String,
    inner: Raw,
}

#[test]
fn catalog_rename_all_wins_and_nested_names_keep_their_own_rules() {
    let fields = fields_of::<KebabCatalog>().unwrap();
    assert_eq!(names(&fields), vec!["read-timeout", "Explicit"]);
    let fields = fields_of::<Env>().unwrap();
    assert_eq!(names(&fields), vec!["HOME_DIR", "INNER.type", "INNER.match"]);
}

#[derive(Describe, Serialize, Default)]
struct SplitNames {
    #[serde(rename(serialize = "out", deserialize = "in"))]
    both: u8,
    #[serde(rename(deserialize = "only_in"))]
    read_side: u8,
    #[serde(skip_serializing)]
    write_only: u8,
    #[serde(default, with = "plain")]
    passthrough: u8,
}

mod plain {
    pub fn serialize<S: serde::Serializer>(v: &u8, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(*v)
    }
}

#[test]
fn serialize_side_of_serde_rename_names_the_field() {
    let fields = fields_of::<SplitNames>().unwrap();
    assert_eq!(names(&fields), vec!["out", "read_side", "passthrough"]);
    let mut keys = serialized_keys(&SplitNames::default());
    keys.sort();
    assert_eq!(keys, vec!["out", "passthrough", "read_side"]);
}

#[derive(Describe)]
#[allow(dead_code)]
struct Point(i32, #[catalog(default = "0")] i32);

#[derive(Describe)]
#[allow(dead_code)]
struct Marker;

#[derive(Describe)]
#[allow(dead_code)]
struct Holder {
    at: Point,
    marker: Marker,
}

#[test]
fn tuple_fields_are_indexed_and_unit_is_a_leaf() {
    let fields = fields_of::<Holder>().unwrap();
    assert_eq!(names(&fields), vec!["at.0", "at.1", "marker"]);
    assert_eq!(fields[1].default, "0");
    assert_eq!(fields[2].type_, "Marker");

    let skipped = Catalog::with_options(CatalogOptions {
        empty_composites: field_catalog::EmptyComposites::Skip,
        ..CatalogOptions::default()
    })
    .fields::<Holder>()
    .unwrap();
    assert_eq!(names(&skipped), vec!["at.0", "at.1"]);
}

#[derive(Describe)]
#[allow(dead_code)]
struct Page<T> {
    #[catalog(description = "Items on this page")]
    items: Vec<T>,
    total: u64,
}

#[test]
fn generic_structs_name_their_parameters() {
    assert_eq!(<Page<Flat>>::shape().type_name, "Page<Flat>");
    let fields = fields_of::<Page<Flat>>().unwrap();
    assert_eq!(names(&fields), vec!["[]items.alpha", "[]items.b", "[]items.gamma", "total"]);
    // parent text only prefixes child text; it is not pushed onto bare children
    assert_eq!(fields[0].description, "");
}

#[derive(Describe)]
#[catalog(opaque, type_name = "money")]
#[allow(dead_code)]
struct Money {
    units: i64,
    nanos: i32,
}

#[derive(Describe)]
#[catalog(type_name = "pkg.Invoice")]
#[allow(dead_code)]
struct Invoice {
    amount: Money,
    issued: chrono::DateTime<chrono::Utc>,
    id: uuid::Uuid,
}

#[test]
fn opaque_containers_are_leaves() {
    assert!(matches!(Money::shape().kind, ShapeKind::Opaque));
    assert_eq!(Invoice::shape().type_name, "pkg.Invoice");
    let fields = fields_of::<Invoice>().unwrap();
    assert_eq!(names(&fields), vec!["amount", "issued", "id"]);
    assert_eq!(fields[0].type_, "money");
    assert_eq!(fields[1].type_, "timestamp");
    assert_eq!(fields[2].type_, "uuid");
}

#[derive(Describe)]
#[allow(dead_code)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

#[test]
fn self_referential_type_is_rejected() {
    let err = fields_of::<TreeNode>().unwrap_err();
    assert!(matches!(err, CatalogError::DepthExceeded { limit: 64, .. }));
}

#[test]
fn root_scalar_and_root_sequence() {
    let root = Field { type_: "bool".into(), ..Field::default() };
    assert_eq!(fields_of::<bool>().unwrap(), vec![root]);
    let fields = fields_of::<Vec<Flat>>().unwrap();
    assert_eq!(names(&fields), vec!["[]Flat.alpha", "[]Flat.b", "[]Flat.gamma"]);
}
