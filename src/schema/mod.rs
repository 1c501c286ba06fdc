//! Output schema descriptors.
//!
//! The `<!-- Output Schema -->` section of an agent declares the structured
//! result the agent must produce. It is data, not code: a YAML mapping of
//! construct names to fields, one of which must be named `Output`.
//!
//! ```yaml
//! Output:
//!   result: string
//!   confidence: { type: number, default: 0.5, description: "0..1" }
//!   tags: list[string]
//!   source: Source?
//! Source:
//!   url: string
//! ```
//!
//! A field is either a type expression (a trailing `?` makes it optional) or
//! a mapping with `type`, `required`, `default` and `description`. Types are
//! `string`, `integer`, `number`, `boolean`, `object`, `any`, `list[T]` or the
//! name of another construct.

mod descriptor;
mod output_type;


pub use descriptor::{Construct, FieldSpec, Kind};
pub use output_type::{OUTPUT_CONSTRUCT, OutputType};

use thiserror::Error;

/// Why an output schema could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputSchemaError {
    /// The agent has no output schema section.
    #[error("No output schema defined for {agent}")]
    NoSchema { agent: String },

    /// The descriptor is malformed.
    #[error("Failed to interpret output schema: {0}")]
    Interpret(String),

    /// The descriptor parsed but defines no `Output` construct.
    #[error("Output schema must define a construct named 'Output'. Found: {found:?}")]
    MissingOutput { found: Vec<String> },

    /// A value did not conform to the output type.
    #[error("invalid output at '{path}': {message}")]
    Invalid { path: String, message: String },
}

/// Compile descriptor source into the `Output` type.
pub fn compile(source: &str) -> Result<OutputType, OutputSchemaError> {
    let descriptor = descriptor::parse(source)?;
    let output = OutputType::new(descriptor)?;
    tracing::trace!(
        fields = output.fields().len(),
        constructs = output.constructs().len(),
        "compiled output schema"
    );
    Ok(output)
}
