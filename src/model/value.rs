//! Database-native value type, as a Neo4j driver hands it over.
//!
//! These values are NOT JSON-safe: temporal types, spatial points and byte
//! arrays have no direct JSON representation. `export::normalize` turns them
//! into plain JSON before anything is persisted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Node, Path, PropertyMap, Relationship};

/// Neo4j-compatible value type.
///
/// Covers all types in the Neo4j type system:
/// - Scalars: Bool, Int, Float, String, Bytes
/// - Containers: List, Map
/// - Graph: Node, Relationship, Path
/// - Temporal: Date, Time, DateTime, LocalDateTime, Duration
/// - Spatial: Point2D, Point3D
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Null,
    Bool(bool),
    /// The driver's 64-bit integer wrapper.
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(PropertyMap),

    // Graph types
    Node(Box<Node>),
    Relationship(Box<Relationship>),
    Path(Box<Path>),

    // Temporal types
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(DateTime<Utc>),
    LocalDateTime(NaiveDateTime),
    Duration(IsoDuration),

    // Spatial types
    Point2D { srid: i32, x: f64, y: f64 },
    Point3D { srid: i32, x: f64, y: f64, z: f64 },
}

/// ISO 8601 duration (months, days, seconds, nanoseconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsoDuration {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
    pub nanoseconds: i32,
}

impl IsoDuration {
    /// Render as an ISO-8601 duration, e.g. `P1Y2M3DT4H5M6.5S`.
    ///
    /// Zero components are omitted; the all-zero duration is `PT0S`.
    pub fn to_iso8601(&self) -> String {
        let years = self.months / 12;
        let months = self.months % 12;
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;

        let mut out = String::from("P");
        if years != 0 { out.push_str(&format!("{years}Y")); }
        if months != 0 { out.push_str(&format!("{months}M")); }
        if self.days != 0 { out.push_str(&format!("{}D", self.days)); }

        let mut time = String::new();
        if hours != 0 { time.push_str(&format!("{hours}H")); }
        if minutes != 0 { time.push_str(&format!("{minutes}M")); }
        if seconds != 0 || self.nanoseconds != 0 {
            if self.nanoseconds == 0 {
                time.push_str(&format!("{seconds}S"));
            } else {
                let frac = format!("{:09}", self.nanoseconds.unsigned_abs());
                time.push_str(&format!("{seconds}.{}S", frac.trim_end_matches('0')));
            }
        }

        if !time.is_empty() {
            out.push('T');
            out.push_str(&time);
        } else if out.len() == 1 {
            out.push_str("T0S");
        }
        out
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<NaiveDate> for Value { fn from(v: NaiveDate) -> Self { Value::Date(v) } }
impl From<DateTime<Utc>> for Value { fn from(v: DateTime<Utc>) -> Self { Value::DateTime(v) } }
impl From<NaiveDateTime> for Value { fn from(v: NaiveDateTime) -> Self { Value::LocalDateTime(v) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}
