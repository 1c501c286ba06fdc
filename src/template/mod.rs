//! Jinja prompt templates.
//!
//! Agent prompts are Jinja templates rendered with `minijinja` against a JSON
//! context. Parsing is what the validator relies on: every syntax problem is
//! reported as a [`TemplateSyntaxError`] carrying the 1-based line inside the
//! template source it came from, when the engine knows it.
//!
//! # Error Handling
//!
//! Undefined variables render as empty strings and attribute lookups on them
//! chain (`{{ missing.deep.path }}` renders nothing). Unknown filters and
//! tests are only detected while rendering, as in Jinja's runtime.


use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// A template failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSyntaxError {
    /// What went wrong.
    pub message: String,
    /// 1-based line within the template source.
    pub line: Option<usize>,
}

impl From<&minijinja::Error> for TemplateSyntaxError {
    fn from(err: &minijinja::Error) -> Self {
        Self {
            message: describe(err),
            line: err.line(),
        }
    }
}

impl fmt::Display for TemplateSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TemplateSyntaxError {}

/// Error type for template parsing and rendering failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template (or an included template) is malformed.
    #[error("template syntax error{}: {}", line_suffix(&.0.line), .0.message)]
    Syntax(#[from] TemplateSyntaxError),

    /// `{% include %}` named a template that no search directory contains.
    #[error("included template not found: {0}")]
    IncludeNotFound(String),

    /// Evaluation failed (unknown filter, bad operand types, ...).
    #[error("render error{}: {message}", line_suffix(.line))]
    Render { line: Option<usize>, message: String },
}

impl From<minijinja::Error> for TemplateError {
    fn from(err: minijinja::Error) -> Self {
        match err.kind() {
            ErrorKind::SyntaxError => TemplateError::Syntax((&err).into()),
            ErrorKind::TemplateNotFound => TemplateError::IncludeNotFound(describe(&err)),
            _ => TemplateError::Render {
                line: err.line(),
                message: describe(&err),
            },
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|n| format!(" on line {}", n)).unwrap_or_default()
}

/// The error detail without minijinja's `(in <string>:N)` suffix.
fn describe(err: &minijinja::Error) -> String {
    match err.detail() {
        Some(detail) => detail.to_string(),
        None => err.kind().to_string(),
    }
}

/// Resolves `{% include "name" %}` against a list of search directories.
#[derive(Debug, Clone, Default)]
pub struct TemplateLoader {
    search_dirs: Vec<PathBuf>,
}

impl TemplateLoader {
    /// Create a loader that searches the given directories in order.
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Directories searched for included templates.
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Source of an included template, or `None` when no directory has it.
    ///
    /// Names that climb out of the search directories are never found.
    pub fn load_source(&self, name: &str) -> Result<Option<String>, minijinja::Error> {
        let relative = Path::new(name);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Ok(None);
        }

        for dir in &self.search_dirs {
            let candidate = dir.join(relative);
            if candidate.is_file() {
                return std::fs::read_to_string(&candidate).map(Some).map_err(|e| {
                    minijinja::Error::new(
                        ErrorKind::InvalidOperation,
                        format!("could not read '{}': {}", candidate.display(), e),
                    )
                });
            }
        }
        Ok(None)
    }
}

/// The environment every prompt is checked and rendered in.
fn environment<'source>(loader: Option<&TemplateLoader>) -> Environment<'source> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Chainable);
    if let Some(loader) = loader {
        let loader = loader.clone();
        env.set_loader(move |name: &str| loader.load_source(name));
    }
    env
}

/// A syntax-checked template source, ready to render.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    /// Parse a template source.
    ///
    /// A single trailing newline is dropped when rendering, as Jinja does by
    /// default.
    pub fn parse(source: &str) -> Result<Self, TemplateSyntaxError> {
        check_syntax(source)?;
        Ok(Self {
            source: source.to_string(),
        })
    }

    /// Render with the given variables. `{% include %}` finds nothing.
    pub fn render(&self, context: &Map<String, Value>) -> Result<String, TemplateError> {
        self.render_in(&environment(None), context)
    }

    /// Render with the given variables, resolving includes through `loader`.
    pub fn render_with_loader(
        &self,
        context: &Map<String, Value>,
        loader: &TemplateLoader,
    ) -> Result<String, TemplateError> {
        self.render_in(&environment(Some(loader)), context)
    }

    fn render_in<'s>(
        &'s self,
        env: &Environment<'s>,
        context: &Map<String, Value>,
    ) -> Result<String, TemplateError> {
        let template = env.template_from_str(&self.source)?;
        Ok(template.render(context)?)
    }
}

/// Check a template source for syntax errors without rendering it.
pub fn check_syntax(source: &str) -> Result<(), TemplateSyntaxError> {
    let env = environment(None);
    env.template_from_str(source)
        .map(|_| ())
        .map_err(|e| TemplateSyntaxError::from(&e))
}

/// Render a template source in one call.
pub fn render_str(source: &str, context: &Map<String, Value>) -> Result<String, TemplateError> {
    Template::parse(source)?.render(context)
}

/// Helper to build a context map from key-value pairs.
pub fn context<I, K, V>(pairs: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
