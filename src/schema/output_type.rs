//! Runtime output type compiled from a descriptor.

use super::OutputSchemaError;
use super::descriptor::{Construct, Descriptor, FieldSpec, Kind};
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Name every output schema must define.
pub const OUTPUT_CONSTRUCT: &str = "Output";

/// The structured result type an agent's response must conform to.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputType {
    /// Index of the `Output` construct in `descriptor`.
    root: usize,
    descriptor: Arc<Descriptor>,
}

impl OutputType {
    pub(crate) fn new(descriptor: Descriptor) -> Result<Self, OutputSchemaError> {
        let root = descriptor
            .constructs
            .iter()
            .position(|c| c.name == OUTPUT_CONSTRUCT)
            .ok_or_else(|| OutputSchemaError::MissingOutput {
                found: descriptor.names(),
            })?;
        Ok(Self {
            root,
            descriptor: Arc::new(descriptor),
        })
    }

    pub fn name(&self) -> &str {
        &self.root().name
    }

    fn root(&self) -> &Construct {
        &self.descriptor.constructs[self.root]
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.root().fields
    }

    /// Other constructs defined alongside `Output`.
    pub fn constructs(&self) -> &[Construct] {
        &self.descriptor.constructs
    }

    /// Check `value` against the type and return the normalized instance:
    /// defaults filled in, missing optional fields set to null, unknown keys
    /// dropped.
    pub fn construct(&self, value: &Value) -> Result<Value, OutputSchemaError> {
        self.construct_record(self.root(), value, self.name())
    }

    fn construct_record(
        &self,
        construct: &Construct,
        value: &Value,
        path: &str,
    ) -> Result<Value, OutputSchemaError> {
        let Value::Object(input) = value else {
            return Err(invalid(path, format!("expected an object for '{}'", construct.name)));
        };

        let mut output = Map::new();
        for field in &construct.fields {
            let field_path = format!("{}.{}", path, field.name);
            let value = match input.get(&field.name) {
                Some(Value::Null) | None if field.default.is_some() => {
                    field.default.clone().unwrap_or(Value::Null)
                }
                Some(Value::Null) | None if field.required => {
                    return Err(invalid(&field_path, "field required"));
                }
                None | Some(Value::Null) => Value::Null,
                Some(value) => self.construct_value(&field.kind, value, &field_path)?,
            };
            output.insert(field.name.clone(), value);
        }
        Ok(Value::Object(output))
    }

    fn construct_value(&self, kind: &Kind, value: &Value, path: &str) -> Result<Value, OutputSchemaError> {
        match (kind, value) {
            (Kind::Ref(name), _) => {
                let construct = self
                    .descriptor
                    .get(name)
                    .ok_or_else(|| invalid(path, format!("unknown type '{}'", name)))?;
                self.construct_record(construct, value, path)
            }
            (Kind::List(inner), Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| self.construct_value(inner, item, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            // 3.0 is an acceptable integer
            (Kind::Integer, Value::Number(n))
                if n.as_f64().is_some_and(|f| f.fract() == 0.0 && f.abs() < 9.0e15) =>
            {
                Ok(n.as_i64()
                    .map(Value::from)
                    .unwrap_or_else(|| Value::from(n.as_f64().unwrap_or_default() as i64)))
            }
            _ if kind.accepts(value) => Ok(value.clone()),
            _ => Err(invalid(
                path,
                format!("expected {}, got {}", kind, json_type(value)),
            )),
        }
    }

    /// JSON Schema for the type. Referenced constructs go under `$defs`.
    pub fn json_schema(&self) -> Value {
        let mut referenced = BTreeSet::new();
        let mut pending = vec![self.name().to_string()];
        while let Some(name) = pending.pop() {
            let Some(construct) = self.descriptor.get(&name) else {
                continue;
            };
            for field in &construct.fields {
                let mut kind = &field.kind;
                while let Kind::List(inner) = kind {
                    kind = inner.as_ref();
                }
                if let Kind::Ref(target) = kind
                    && target != self.name()
                    && referenced.insert(target.clone())
                {
                    pending.push(target.clone());
                }
            }
        }

        let mut schema = self.record_schema(self.root());
        if !referenced.is_empty()
            && let Value::Object(map) = &mut schema
        {
            let defs: Map<String, Value> = referenced
                .iter()
                .filter_map(|name| self.descriptor.get(name))
                .map(|c| (c.name.clone(), self.record_schema(c)))
                .collect();
            map.insert("$defs".to_string(), Value::Object(defs));
        }
        schema
    }

    fn record_schema(&self, construct: &Construct) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in &construct.fields {
            let mut property = self.kind_schema(&field.kind);
            if let Value::Object(map) = &mut property {
                if let Some(description) = &field.description {
                    map.insert("description".into(), description.clone().into());
                }
                if let Some(default) = &field.default {
                    map.insert("default".into(), default.clone());
                }
            }
            properties.insert(field.name.clone(), property);
            if field.required {
                required.push(Value::String(field.name.clone()));
            }
        }

        json!({
            "title": construct.name,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    fn kind_schema(&self, kind: &Kind) -> Value {
        match kind {
            Kind::String => json!({"type": "string"}),
            Kind::Integer => json!({"type": "integer"}),
            Kind::Number => json!({"type": "number"}),
            Kind::Boolean => json!({"type": "boolean"}),
            Kind::Object => json!({"type": "object"}),
            Kind::Any => json!({}),
            Kind::List(inner) => json!({"type": "array", "items": self.kind_schema(inner)}),
            Kind::Ref(name) if name == self.name() => json!({"$ref": "#"}),
            Kind::Ref(name) => json!({"$ref": format!("#/$defs/{}", name)}),
        }
    }
}

fn invalid(path: &str, message: impl Into<String>) -> OutputSchemaError {
    OutputSchemaError::Invalid {
        path: path.to_string(),
        message: message.into(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
