//! Typed templates for the generated project
//!
//! Every placeholder is a named field on one of these structs, so a
//! template can only interpolate values the emitter hands it. Identifiers
//! are validated before they get here (see [`super::naming`]).

use askama::Template;

use crate::request::ConnectionParams;

/// Template data for the generated `.env`
#[derive(Template)]
#[template(path = "env.txt", escape = "none")]
pub struct EnvTemplate<'a> {
    /// Connection written as `DB_*` lines
    pub connection: &'a ConnectionParams,
}

/// Template data for the generated Flask service (`app.py`)
#[derive(Template)]
#[template(path = "app.py.txt", escape = "none")]
pub struct ServiceTemplate<'a> {
    /// Lowercased table name, used for `__tablename__` and routes
    pub table: &'a str,
    /// Model class name
    pub class_name: &'a str,
    /// Every column, in table order (drives `serialize`)
    pub columns: &'a [String],
    /// Non-id columns (model fields, create/update assignments)
    pub fields: &'a [String],
}

/// Template for the fixed dependency manifest (`requirements.txt`)
#[derive(Template)]
#[template(path = "requirements.txt", escape = "none")]
pub struct RequirementsTemplate;

/// Template data for the generated `README.md`
#[derive(Template)]
#[template(path = "README.md.txt", escape = "none")]
pub struct ReadmeTemplate<'a> {
    pub project_name: &'a str,
    pub table: &'a str,
}

/// Render a template, always ending the output with a newline
pub fn render_file<T: Template>(template: &T) -> askama::Result<String> {
    let mut out = template.render()?;
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}
