//! Parsing of the YAML output schema descriptor.

use super::OutputSchemaError;
use regex::Regex;
use serde_json::Value;
use serde_yaml::Mapping;
use std::fmt;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex"));

const FIELD_SPEC_KEYS: &[&str] = &["type", "required", "default", "description"];

/// The type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Any,
    List(Box<Kind>),
    /// Another construct in the same descriptor.
    Ref(String),
}

impl Kind {
    fn builtin(name: &str) -> Option<Self> {
        let kind = match name {
            "string" | "str" => Kind::String,
            "integer" | "int" => Kind::Integer,
            "number" | "float" => Kind::Number,
            "boolean" | "bool" => Kind::Boolean,
            "object" | "dict" => Kind::Object,
            "any" => Kind::Any,
            _ => return None,
        };
        Some(kind)
    }

    /// Parse a type expression such as `list[string]` or `Source`.
    /// References are checked later, once every construct name is known.
    fn parse(expr: &str) -> Option<Self> {
        let expr = expr.trim();
        if let Some(inner) = expr
            .strip_prefix("list[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return Kind::parse(inner).map(|k| Kind::List(Box::new(k)));
        }
        if let Some(kind) = Kind::builtin(expr) {
            return Some(kind);
        }
        IDENTIFIER
            .is_match(expr)
            .then(|| Kind::Ref(expr.to_string()))
    }

    fn references(&self) -> Option<&str> {
        match self {
            Kind::Ref(name) => Some(name),
            Kind::List(inner) => inner.references(),
            _ => None,
        }
    }

    /// Whether `value` is acceptable for this kind without coercion.
    /// References accept any mapping; their fields are checked on construct.
    pub(crate) fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Kind::Any, _) => true,
            (Kind::String, Value::String(_)) => true,
            (Kind::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Kind::Number, Value::Number(_)) => true,
            (Kind::Boolean, Value::Bool(_)) => true,
            (Kind::Object | Kind::Ref(_), Value::Object(_)) => true,
            (Kind::List(inner), Value::Array(items)) => items.iter().all(|i| inner.accepts(i)),
            _ => false,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::String => write!(f, "string"),
            Kind::Integer => write!(f, "integer"),
            Kind::Number => write!(f, "number"),
            Kind::Boolean => write!(f, "boolean"),
            Kind::Object => write!(f, "object"),
            Kind::Any => write!(f, "any"),
            Kind::List(inner) => write!(f, "list[{}]", inner),
            Kind::Ref(name) => write!(f, "{}", name),
        }
    }
}

/// One field of a construct.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: Kind,
    pub required: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
}

/// A named record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Construct {
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

/// All constructs of a descriptor, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub constructs: Vec<Construct>,
}

impl Descriptor {
    pub fn get(&self, name: &str) -> Option<&Construct> {
        self.constructs.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.constructs.iter().map(|c| c.name.clone()).collect()
    }
}

fn interpret(message: impl Into<String>) -> OutputSchemaError {
    OutputSchemaError::Interpret(message.into())
}

fn identifier(key: &serde_yaml::Value, what: &str) -> Result<String, OutputSchemaError> {
    match key.as_str() {
        Some(name) if IDENTIFIER.is_match(name) => Ok(name.to_string()),
        Some(name) => Err(interpret(format!("invalid {} name '{}'", what, name))),
        None => Err(interpret(format!("{} names must be strings", what))),
    }
}

/// Parse descriptor source into constructs, checking every reference.
pub fn parse(source: &str) -> Result<Descriptor, OutputSchemaError> {
    let root: serde_yaml::Value =
        serde_yaml::from_str(source).map_err(|e| interpret(e.to_string()))?;
    let root = root.as_mapping().ok_or_else(|| {
        interpret("expected a mapping of construct names to field definitions")
    })?;

    let mut constructs = Vec::with_capacity(root.len());
    for (key, body) in root {
        let name = identifier(key, "construct")?;
        if Kind::builtin(&name).is_some() {
            return Err(interpret(format!(
                "construct name '{}' shadows a built-in type",
                name
            )));
        }
        let fields = match body {
            serde_yaml::Value::Null => Vec::new(),
            serde_yaml::Value::Mapping(fields) => parse_fields(&name, fields)?,
            _ => {
                return Err(interpret(format!(
                    "fields of '{}' must be a mapping",
                    name
                )));
            }
        };
        constructs.push(Construct { name, fields });
    }

    let descriptor = Descriptor { constructs };
    for construct in &descriptor.constructs {
        for field in &construct.fields {
            if let Some(target) = field.kind.references()
                && descriptor.get(target).is_none()
            {
                return Err(interpret(format!(
                    "unknown type '{}' for field '{}' of '{}'",
                    target, field.name, construct.name
                )));
            }
        }
    }
    Ok(descriptor)
}

fn parse_fields(construct: &str, fields: &Mapping) -> Result<Vec<FieldSpec>, OutputSchemaError> {
    fields
        .iter()
        .map(|(key, spec)| {
            let name = identifier(key, "field")?;
            parse_field(construct, name, spec)
        })
        .collect()
}

fn parse_kind(construct: &str, field: &str, expr: &str) -> Result<(Kind, bool), OutputSchemaError> {
    let (expr, optional) = match expr.trim().strip_suffix('?') {
        Some(stripped) => (stripped, true),
        None => (expr, false),
    };
    let kind = Kind::parse(expr).ok_or_else(|| {
        interpret(format!(
            "unknown type '{}' for field '{}' of '{}'",
            expr.trim(),
            field,
            construct
        ))
    })?;
    Ok((kind, optional))
}

fn parse_field(
    construct: &str,
    name: String,
    spec: &serde_yaml::Value,
) -> Result<FieldSpec, OutputSchemaError> {
    match spec {
        serde_yaml::Value::String(expr) => {
            let (kind, optional) = parse_kind(construct, &name, expr)?;
            Ok(FieldSpec {
                name,
                kind,
                required: !optional,
                default: None,
                description: None,
            })
        }
        serde_yaml::Value::Mapping(map) => {
            for key in map.keys() {
                let key = key.as_str().unwrap_or_default();
                if !FIELD_SPEC_KEYS.contains(&key) {
                    return Err(interpret(format!(
                        "unknown key '{}' in field '{}' of '{}'",
                        key, name, construct
                    )));
                }
            }

            let expr = map.get("type").and_then(|t| t.as_str()).ok_or_else(|| {
                interpret(format!(
                    "field '{}' of '{}' needs a string 'type'",
                    name, construct
                ))
            })?;
            let (kind, optional) = parse_kind(construct, &name, expr)?;

            let default = match map.get("default") {
                None => None,
                Some(value) => {
                    let value = serde_json::to_value(value).map_err(|e| {
                        interpret(format!(
                            "default for field '{}' of '{}': {}",
                            name, construct, e
                        ))
                    })?;
                    if !(value.is_null() || kind.accepts(&value)) {
                        return Err(interpret(format!(
                            "default for field '{}' of '{}' does not match type '{}'",
                            name, construct, kind
                        )));
                    }
                    Some(value)
                }
            };

            let required = match map.get("required") {
                None => !optional && default.is_none(),
                Some(serde_yaml::Value::Bool(required)) => *required,
                Some(_) => {
                    return Err(interpret(format!(
                        "'required' of field '{}' of '{}' must be a boolean",
                        name, construct
                    )));
                }
            };

            let description = match map.get("description") {
                None | Some(serde_yaml::Value::Null) => None,
                Some(serde_yaml::Value::String(s)) => Some(s.clone()),
                Some(_) => {
                    return Err(interpret(format!(
                        "'description' of field '{}' of '{}' must be a string",
                        name, construct
                    )));
                }
            };

            Ok(FieldSpec {
                name,
                kind,
                required,
                default,
                description,
            })
        }
        _ => Err(interpret(format!(
            "field '{}' of '{}' must be a type name or a mapping",
            name, construct
        ))),
    }
}
