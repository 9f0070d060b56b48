//! Driver-native values → JSON-safe values.
//!
//! Total function: every `Value` maps to some JSON value, nothing fails.
//!
//! | Source | JSON |
//! |--------|------|
//! | Int | number (i64, exact) |
//! | Float | number, or null when NaN/±inf |
//! | Date / Time / DateTime / LocalDateTime | ISO-8601 string |
//! | Duration | ISO-8601 duration string |
//! | Bytes | array of numbers |
//! | List | array, element-wise |
//! | Map | object, key-wise |
//! | Point | `{srid, x, y[, z]}` |
//! | Node / Relationship / Path | plain objects of their fields |

use chrono::SecondsFormat;
use serde_json::{Map, Number, Value as Json};

use crate::document::Properties;
use crate::model::{Node, PropertyMap, Relationship, Value};

/// Normalize a single value.
pub fn normalize(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::Number(Number::from(*i)),
        Value::Float(f) => Number::from_f64(*f).map(Json::Number).unwrap_or(Json::Null),
        Value::String(s) => Json::String(s.clone()),
        Value::Bytes(bytes) => Json::Array(bytes.iter().map(|b| Json::from(*b)).collect()),
        Value::List(items) => Json::Array(items.iter().map(normalize).collect()),
        Value::Map(map) => Json::Object(normalize_properties(map)),

        Value::Node(node) => node_object(node),
        Value::Relationship(rel) => relationship_object(rel),
        Value::Path(path) => {
            let mut obj = Map::new();
            obj.insert("nodes".into(), Json::Array(path.nodes.iter().map(node_object).collect()));
            obj.insert(
                "relationships".into(),
                Json::Array(path.relationships.iter().map(relationship_object).collect()),
            );
            Json::Object(obj)
        }

        Value::Date(d) => Json::String(d.format("%Y-%m-%d").to_string()),
        Value::Time(t) => Json::String(t.format("%H:%M:%S%.f").to_string()),
        Value::DateTime(dt) => Json::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::LocalDateTime(dt) => Json::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        Value::Duration(d) => Json::String(d.to_iso8601()),

        Value::Point2D { srid, x, y } => {
            let mut obj = Map::new();
            obj.insert("srid".into(), Json::from(*srid));
            obj.insert("x".into(), float(*x));
            obj.insert("y".into(), float(*y));
            Json::Object(obj)
        }
        Value::Point3D { srid, x, y, z } => {
            let mut obj = Map::new();
            obj.insert("srid".into(), Json::from(*srid));
            obj.insert("x".into(), float(*x));
            obj.insert("y".into(), float(*y));
            obj.insert("z".into(), float(*z));
            Json::Object(obj)
        }
    }
}

/// Normalize every value of a property map, keeping key order.
pub fn normalize_properties(props: &PropertyMap) -> Properties {
    props.iter().map(|(k, v)| (k.clone(), normalize(v))).collect()
}

fn float(f: f64) -> Json {
    Number::from_f64(f).map(Json::Number).unwrap_or(Json::Null)
}

fn node_object(node: &Node) -> Json {
    let mut obj = Map::new();
    obj.insert("id".into(), Json::from(node.id.0));
    obj.insert("labels".into(), Json::from(node.labels.clone()));
    obj.insert("properties".into(), Json::Object(normalize_properties(&node.properties)));
    Json::Object(obj)
}

fn relationship_object(rel: &Relationship) -> Json {
    let mut obj = Map::new();
    obj.insert("id".into(), Json::from(rel.id.0));
    obj.insert("start".into(), Json::from(rel.src.0));
    obj.insert("end".into(), Json::from(rel.dst.0));
    obj.insert("type".into(), Json::from(rel.rel_type.clone()));
    obj.insert("properties".into(), Json::Object(normalize_properties(&rel.properties)));
    Json::Object(obj)
}
