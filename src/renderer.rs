//! Template rendering for kiln.
//! Renders template text against the project configuration with MiniJinja.
use crate::error::{Error, Result};
use cruet::Inflector;
use minijinja::{AutoEscape, Environment};

/// Trait for template rendering engines.
pub trait TemplateRenderer: Send + Sync {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Template name used in error messages
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the case conversion filters registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Generated files must keep their final newline byte for byte.
        env.set_keep_trailing_newline(true);
        // Output is source code and config files, never escaped markup.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("snake_case", |value: String| value.to_snake_case());
        env.add_filter("kebab_case", |value: String| value.to_kebab_case());
        env.add_filter("camel_case", |value: String| value.to_camel_case());
        env.add_filter("pascal_case", |value: String| value.to_pascal_case());
        env.add_filter("title_case", |value: String| value.to_title_case());
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::GenerationError` if the template can't be parsed or rendered
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.env.clone();
        let to_error = |e: minijinja::Error| {
            Error::generation_caused_by(format!("Template '{name}' can't be rendered"), e)
        };

        env.add_template_owned(name.to_string(), template.to_string()).map_err(to_error)?;
        let tmpl = env.get_template(name).map_err(to_error)?;
        tmpl.render(context).map_err(to_error)
    }
}
