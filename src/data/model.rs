use std::collections::BTreeMap;
use std::fmt;

use ndarray::{ArrayD, IxDyn};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Value – one entry of a record, as decoded from the input file
// ---------------------------------------------------------------------------

/// Version tag `ndarray` writes in the `v` field of its serde encoding.
const ARRAY_FORMAT_VERSION: i64 = 1;

/// A dynamically-typed value mirroring what a pickled Python dict can hold.
///
/// Nothing is converted at decode time: a string stays a string so that the
/// normalizer, not the decoder, decides whether it is numeric.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Nested sequence; rectangular nesting is treated as an array.
    List(Vec<Value>),
    /// Explicit n-dimensional array, decoded from `{"v": 1, "dim": [..], "data": [..]}`.
    Array(ArrayD<Value>),
    /// Any other mapping.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Array(_) => "array",
            Value::Map(_) => "mapping",
        }
    }

    fn as_index(&self) -> Option<usize> {
        match self {
            Value::Int(n) => usize::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Recognise the `ndarray` serde encoding, falling back to a plain mapping.
    pub(crate) fn from_map(map: BTreeMap<String, Value>) -> Value {
        match ndarray_from_map(&map) {
            Some(array) => Value::Array(array),
            None => Value::Map(map),
        }
    }
}

fn ndarray_from_map(map: &BTreeMap<String, Value>) -> Option<ArrayD<Value>> {
    if map.len() != 3 || map.get("v") != Some(&Value::Int(ARRAY_FORMAT_VERSION)) {
        return None;
    }
    let (Some(Value::List(dim)), Some(Value::List(data))) = (map.get("dim"), map.get("data"))
    else {
        return None;
    };
    let shape = dim.iter().map(Value::as_index).collect::<Option<Vec<usize>>>()?;
    ArrayD::from_shape_vec(IxDyn(&shape), data.clone()).ok()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => write!(f, "list of {} items", items.len()),
            Value::Array(array) => write!(f, "array of shape {:?}", array.shape()),
            Value::Map(map) => write!(f, "mapping of {} keys", map.len()),
        }
    }
}

// -- Format-agnostic decoding: works for serde_pickle, serde_json and friends --

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, string, sequence or mapping")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Str(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Value, E> {
        Ok(Value::Str(String::from_utf8_lossy(v).into_owned()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::from_map(map))
    }
}

// ---------------------------------------------------------------------------
// Records and datasets
// ---------------------------------------------------------------------------

/// One key → value mapping of the input dataset.
pub type Record = BTreeMap<String, Value>;

/// The full input, in file order.
pub type Dataset = Vec<Record>;

// ---------------------------------------------------------------------------
// Normalized – the portable output value
// ---------------------------------------------------------------------------

/// A value with no array-library dependency: one float or a flat list of floats.
#[derive(Debug, Clone, PartialEq, Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Normalized {
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl Normalized {
    /// Number of floats carried.
    pub fn len(&self) -> usize {
        match self {
            Normalized::Scalar(_) => 1,
            Normalized::Sequence(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One record of the output dataset.
pub type NormalizedRecord = BTreeMap<String, Normalized>;
