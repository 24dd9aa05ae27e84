use pretty_assertions::assert_eq;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use structdiff::{compute_diff, diff_all, to_node, ChangeKind, DiffError, ShapeError};

#[derive(Serialize, Default, Clone)]
struct Config {
    debug: bool,
    version: String,
    timeout: i32,
}

#[derive(Serialize, Default, Clone)]
struct NotConfig {
    debug: bool,
    version: String,
    timeout: i32,
}

#[derive(Serialize, Default, Clone)]
#[allow(non_snake_case)]
struct Flat {
    A: bool,
    B: String,
    C: i32,
}

#[derive(Serialize, Default, Clone)]
#[allow(non_snake_case)]
struct Nested {
    Mapping: BTreeMap<String, Vec<String>>,
    Name: String,
}

#[derive(Serialize, Clone)]
struct WithOption {
    limit: Option<u32>,
}

#[derive(Serialize, Clone)]
struct Endpoint {
    host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    proxy: Option<String>,
}

#[derive(Serialize, Clone)]
struct Gateway {
    inner: Endpoint,
}

fn endpoint(proxy: Option<&str>) -> Endpoint {
    Endpoint {
        host: "a".to_string(),
        proxy: proxy.map(str::to_string),
    }
}

#[derive(Serialize, Clone)]
struct Outer {
    inner: Inner,
    tags: Vec<&'static str>,
}

#[derive(Serialize, Clone)]
struct Inner {
    level: u8,
    label: String,
}

#[derive(Serialize, Clone)]
enum Level {
    Info,
    Debug,
}

#[derive(Serialize, Clone)]
struct Logging {
    level: Level,
}

#[test]
fn test_reflexive_on_records_maps_and_sequences() {
    let config = Config {
        debug: true,
        version: "1.0".to_string(),
        timeout: 5,
    };
    assert!(diff_all(&config, &config).unwrap().is_empty());
    assert!(diff_all(&Config::default(), &Config::default()).unwrap().is_empty());

    let mut map = HashMap::new();
    map.insert("a".to_string(), vec![1, 2]);
    assert!(diff_all(&map, &map).unwrap().is_empty());
    assert!(diff_all(&HashMap::<String, i32>::new(), &HashMap::<String, i32>::new())
        .unwrap()
        .is_empty());

    assert!(diff_all(&vec![1, 2, 3], &vec![1, 2, 3]).unwrap().is_empty());
    assert!(diff_all(&Vec::<i32>::new(), &Vec::<i32>::new()).unwrap().is_empty());

    let nested = Nested {
        Mapping: BTreeMap::from([("yo".to_string(), vec!["hi".to_string()])]),
        Name: "n".to_string(),
    };
    assert!(diff_all(&nested, &nested).unwrap().is_empty());
}

#[test]
fn test_flat_record_changes_in_declared_order() {
    let before = Flat {
        A: true,
        B: "x".to_string(),
        C: 1,
    };
    let after = Flat {
        A: false,
        B: "y".to_string(),
        C: 2,
    };

    assert_eq!(
        diff_all(&before, &after).unwrap(),
        vec![
            ".A changed from true to false",
            ".B changed from \"x\" to \"y\"",
            ".C changed from 1 to 2",
        ]
    );
}

#[test]
fn test_only_changed_fields_reported() {
    let before = Config {
        debug: true,
        version: "0.0.0".to_string(),
        timeout: 30,
    };
    let after = Config {
        timeout: 15,
        ..before.clone()
    };

    assert_eq!(
        diff_all(&before, &after).unwrap(),
        vec![".timeout changed from 30 to 15"]
    );
}

#[test]
fn test_sequence_length_asymmetry() {
    assert_eq!(diff_all(&vec![1, 2, 3], &vec![1, 2]).unwrap(), vec!["[2] deleted 3"]);
    assert_eq!(diff_all(&vec![1, 2], &vec![1, 2, 3]).unwrap(), vec!["[2] added 3"]);
}

#[test]
fn test_map_key_asymmetry() {
    let mut before = HashMap::new();
    before.insert("yo", "hello");
    let mut after = HashMap::new();
    after.insert("hi", "there");

    let mut lines = diff_all(&before, &after).unwrap();
    lines.sort();
    assert_eq!(
        lines,
        vec!["[\"hi\"] added \"there\"", "[\"yo\"] deleted \"hello\""]
    );
}

#[test]
fn test_nested_path_construction() {
    let before = Nested::default();
    let after = Nested {
        Mapping: BTreeMap::from([("yo".to_string(), vec!["hi".to_string()])]),
        Name: String::new(),
    };

    assert_eq!(
        diff_all(&before, &after).unwrap(),
        vec![".Mapping[\"yo\"][0] added \"hi\""]
    );
}

#[test]
fn test_nested_records_and_sequences() {
    let before = Outer {
        inner: Inner {
            level: 1,
            label: "a".to_string(),
        },
        tags: vec!["x", "y"],
    };
    let after = Outer {
        inner: Inner {
            level: 2,
            label: "a".to_string(),
        },
        tags: vec!["x"],
    };

    assert_eq!(
        diff_all(&before, &after).unwrap(),
        vec![".inner.level changed from 1 to 2", ".tags[1] deleted \"y\""]
    );
}

#[test]
fn test_option_none_is_absent() {
    let none = WithOption { limit: None };
    let some = WithOption { limit: Some(10) };

    assert_eq!(diff_all(&none, &some).unwrap(), vec![".limit added 10"]);
    assert_eq!(diff_all(&some, &none).unwrap(), vec![".limit deleted 10"]);
    assert!(diff_all(&none, &none.clone()).unwrap().is_empty());
}

#[test]
fn test_skipped_field_is_absent_on_that_side() {
    assert_eq!(
        diff_all(&endpoint(Some("p")), &endpoint(None)).unwrap(),
        vec![".proxy deleted \"p\""]
    );
    assert_eq!(
        diff_all(&endpoint(None), &endpoint(Some("p"))).unwrap(),
        vec![".proxy added \"p\""]
    );

    let before = Gateway { inner: endpoint(None) };
    let after = Gateway { inner: endpoint(Some("p")) };
    assert_eq!(
        diff_all(&before, &after).unwrap(),
        vec![".inner.proxy added \"p\""]
    );
}

#[test]
fn test_removed_map_key_with_none_value() {
    let before: BTreeMap<&str, Option<i32>> = BTreeMap::from([("a", None), ("b", Some(1))]);
    let after: BTreeMap<&str, Option<i32>> = BTreeMap::from([("b", Some(1))]);

    assert_eq!(
        diff_all(&before, &after).unwrap(),
        vec!["[\"a\"] deleted null"]
    );
    assert_eq!(
        diff_all(&after, &before).unwrap(),
        vec!["[\"a\"] added null"]
    );
}

#[test]
fn test_json_null_key_added() {
    let before = serde_json::json!({"name": "a"});
    let after = serde_json::json!({"name": "a", "owner": null});

    assert_eq!(
        diff_all(&before, &after).unwrap(),
        vec!["[\"owner\"] added null"]
    );
}

#[test]
fn test_unit_variant_changes_render_variant_name() {
    let before = Logging { level: Level::Info };
    let after = Logging { level: Level::Debug };

    assert_eq!(
        diff_all(&before, &after).unwrap(),
        vec![".level changed from Info to Debug"]
    );
}

#[test]
fn test_non_string_map_keys_are_unquoted() {
    let before = BTreeMap::from([(1u32, true)]);
    let after = BTreeMap::from([(1u32, false)]);

    assert_eq!(
        diff_all(&before, &after).unwrap(),
        vec!["[1] changed from true to false"]
    );
}

#[test]
fn test_record_vs_sequence_rejected() {
    let err = diff_all(&Config::default(), &vec![1, 2, 3]).unwrap_err();
    assert!(matches!(err, DiffError::Shape(ShapeError::Mismatch { .. })));
}

#[test]
fn test_different_record_types_rejected() {
    let err = diff_all(&Config::default(), &NotConfig::default()).unwrap_err();
    assert_eq!(
        err,
        DiffError::Shape(ShapeError::type_mismatch("Config", "NotConfig"))
    );
}

#[test]
fn test_top_level_atomics_rejected() {
    assert!(diff_all(&1, &1).is_err());
    assert!(diff_all(&"a", &"b").is_err());
    assert!(diff_all(&None::<Config>, &None::<Config>).is_err());
}

#[test]
fn test_references_and_boxes_are_transparent() {
    let config = Config::default();
    let boxed = Box::new(Config {
        debug: true,
        ..Config::default()
    });
    assert_eq!(
        diff_all(&&config, &boxed).unwrap(),
        vec![".debug changed from false to true"]
    );
}

#[test]
fn test_structured_changes() {
    let before = to_node(&vec![1, 2, 3]).unwrap();
    let after = to_node(&vec![1, 5]).unwrap();

    let diff = compute_diff(&before, &after).unwrap();
    assert_eq!(diff.stats.changed, 1);
    assert_eq!(diff.stats.deleted, 1);
    assert_eq!(diff.changes[0].kind, ChangeKind::Changed);
    assert_eq!(diff.changes[1].kind, ChangeKind::Deleted);
}

#[test]
fn test_json_values_diff_like_maps() {
    let before = serde_json::json!({"name": "a", "ports": [80, 443]});
    let after = serde_json::json!({"name": "b", "ports": [80]});

    let mut lines = diff_all(&before, &after).unwrap();
    lines.sort();
    assert_eq!(
        lines,
        vec![
            "[\"name\"] changed from \"a\" to \"b\"",
            "[\"ports\"][1] deleted 443",
        ]
    );
}
