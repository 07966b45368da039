//! Prompt templating for design tools

use crate::error::Result;
use handlebars::{no_escape, Handlebars};
use serde::Serialize;

/// Render a tool prompt template.
///
/// Output is plain text sent to the model, so HTML escaping is disabled.
/// Strict mode turns a reference to an unknown variable into an error.
pub fn render_prompt<T: Serialize>(template: &str, values: &T) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(no_escape);
    handlebars.set_strict_mode(true);

    Ok(handlebars.render_template(template, values)?)
}
