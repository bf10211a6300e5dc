//! Value model: the parsed JSON tree plus a path-carrying cursor over it.
//!
//! The tree itself is `serde_json::Value` (built with `preserve_order`); `Node` is what the
//! translator and the converters walk, so every shape check can report where it failed.

use std::fmt;

use serde_json::{Map, Value};

use crate::error::{MalformedInputError, SchemaError, SchemaErrorKind};
use crate::ident::Identifier;
use crate::ir::Num;
use crate::registry::Category;

// ————————————————————————————————————————————————————————————————————————————
// PARSE
// ————————————————————————————————————————————————————————————————————————————

/// Parse one JSON document. Shape only; no loot-table semantics are checked here.
pub fn parse(text: &str) -> Result<Value, MalformedInputError> {
    serde_json::from_str::<Value>(text).map_err(MalformedInputError::from)
}

/// Human name of a value's shape, used in wrong-shape errors.
pub fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

// ————————————————————————————————————————————————————————————————————————————
// PATHS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a node inside the document, e.g. `pools[0].conditions[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath(Vec<Segment>);

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut out = self.clone();
        out.0.push(Segment::Key(key.into()));
        out
    }

    pub fn index(&self, index: usize) -> Self {
        let mut out = self.clone();
        out.0.push(Segment::Index(index));
        out
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// RFC 6901 rendering (`/pools/0/conditions/0`).
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.0 {
            out.push('/');
            match segment {
                Segment::Key(key) => out.push_str(&key.replace('~', "~0").replace('/', "~1")),
                Segment::Index(index) => out.push_str(&index.to_string()),
            }
        }
        out
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CURSOR
// ————————————————————————————————————————————————————————————————————————————

/// A borrowed value together with the path it was reached by.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    value: &'a Value,
    path: JsonPath,
}

impl<'a> Node<'a> {
    pub fn root(value: &'a Value) -> Self {
        Self { value, path: JsonPath::root() }
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    pub fn error(&self, reason: SchemaErrorKind) -> SchemaError {
        SchemaError::new(self.path.clone(), reason)
    }

    fn wrong_shape(&self, expected: &'static str) -> SchemaError {
        self.error(SchemaErrorKind::WrongShape { expected, found: shape_of(self.value) })
    }

    // -------- shapes --------

    pub fn as_mapping(&self) -> Result<&'a Map<String, Value>, SchemaError> {
        self.value.as_object().ok_or_else(|| self.wrong_shape("mapping"))
    }

    pub fn as_str(&self) -> Result<&'a str, SchemaError> {
        self.value.as_str().ok_or_else(|| self.wrong_shape("string"))
    }

    pub fn as_bool(&self) -> Result<bool, SchemaError> {
        self.value.as_bool().ok_or_else(|| self.wrong_shape("boolean"))
    }

    /// Any number, keeping whether the source spelled an integer or a float.
    pub fn as_num(&self) -> Result<Num, SchemaError> {
        match self.value {
            Value::Number(n) if n.is_f64() => Ok(Num::float(n.as_f64().unwrap_or_default())),
            Value::Number(_) => self.as_i64().map(Num::Int),
            _ => Err(self.wrong_shape("number")),
        }
    }

    /// Any number, for fields that are floating by meaning (chances, probabilities).
    pub fn as_f64(&self) -> Result<f64, SchemaError> {
        self.value.as_f64().ok_or_else(|| self.wrong_shape("number"))
    }

    pub fn as_i64(&self) -> Result<i64, SchemaError> {
        self.integer("a 64-bit integer")
    }

    pub fn as_i32(&self) -> Result<i32, SchemaError> {
        self.integer("a 32-bit integer")
    }

    /// An integer that fits `T`; a float is a wrong shape, anything too large is out of range.
    fn integer<T: TryFrom<i64>>(&self, expected: &'static str) -> Result<T, SchemaError> {
        let n = match self.value {
            Value::Number(n) if !n.is_f64() => n,
            _ => return Err(self.wrong_shape("integer")),
        };
        n.as_i64().and_then(|i| T::try_from(i).ok()).ok_or_else(|| {
            self.error(SchemaErrorKind::OutOfRange { value: n.to_string(), expected })
        })
    }

    pub fn as_ident(&self) -> Result<Identifier, SchemaError> {
        let raw = self.as_str()?;
        raw.parse::<Identifier>()
            .map_err(|_| self.error(SchemaErrorKind::InvalidIdentifier(raw.to_string())))
    }

    /// Elements of a sequence, each with its indexed path.
    pub fn elements(&self) -> Result<Vec<Node<'a>>, SchemaError> {
        let xs = self.value.as_array().ok_or_else(|| self.wrong_shape("sequence"))?;
        Ok(xs
            .iter()
            .enumerate()
            .map(|(i, value)| Node { value, path: self.path.index(i) })
            .collect())
    }

    // -------- fields --------

    pub fn field(&self, name: &str) -> Result<Option<Node<'a>>, SchemaError> {
        let map = self.as_mapping()?;
        Ok(map.get(name).map(|value| Node { value, path: self.path.key(name) }))
    }

    pub fn required(&self, name: &str) -> Result<Node<'a>, SchemaError> {
        self.field(name)?
            .ok_or_else(|| self.error(SchemaErrorKind::MissingField(name.to_string())))
    }

    pub fn str_field(&self, name: &str) -> Result<&'a str, SchemaError> {
        self.required(name)?.as_str()
    }

    pub fn ident_field(&self, name: &str) -> Result<Identifier, SchemaError> {
        self.required(name)?.as_ident()
    }

    pub fn bool_field(&self, name: &str) -> Result<bool, SchemaError> {
        self.required(name)?.as_bool()
    }

    pub fn f64_field(&self, name: &str) -> Result<f64, SchemaError> {
        self.required(name)?.as_f64()
    }

    pub fn i32_field(&self, name: &str) -> Result<i32, SchemaError> {
        self.required(name)?.as_i32()
    }

    pub fn opt_str(&self, name: &str) -> Result<Option<&'a str>, SchemaError> {
        self.field(name)?.map(|node| node.as_str()).transpose()
    }

    pub fn opt_bool(&self, name: &str) -> Result<Option<bool>, SchemaError> {
        self.field(name)?.map(|node| node.as_bool()).transpose()
    }

    pub fn opt_f64(&self, name: &str) -> Result<Option<f64>, SchemaError> {
        self.field(name)?.map(|node| node.as_f64()).transpose()
    }

    pub fn opt_i64(&self, name: &str) -> Result<Option<i64>, SchemaError> {
        self.field(name)?.map(|node| node.as_i64()).transpose()
    }

    pub fn opt_i32(&self, name: &str) -> Result<Option<i32>, SchemaError> {
        self.field(name)?.map(|node| node.as_i32()).transpose()
    }

    /// An optional sequence field; absent means empty.
    pub fn list(&self, name: &str) -> Result<Vec<Node<'a>>, SchemaError> {
        match self.field(name)? {
            Some(node) => node.elements(),
            None => Ok(Vec::new()),
        }
    }

    /// A required sequence field that must hold at least one element.
    pub fn non_empty_list(&self, name: &str) -> Result<Vec<Node<'a>>, SchemaError> {
        let node = self.required(name)?;
        let xs = node.elements()?;
        if xs.is_empty() {
            return Err(node.error(SchemaErrorKind::EmptyList(name.to_string())));
        }
        Ok(xs)
    }

    /// The normalized discriminator of a polymorphic node (`type`, `condition`, `function`).
    pub fn discriminator(&self, category: Category) -> Result<Identifier, SchemaError> {
        let field = category.discriminator();
        match self.field(field)? {
            Some(node) => node.as_ident(),
            None => Err(self.error(SchemaErrorKind::MissingDiscriminator { category, field })),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
