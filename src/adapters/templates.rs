use std::sync::OnceLock;

use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use crate::domain::render::php_escape;
use crate::domain::{AppError, RenderContext, TemplateId};
use crate::ports::TemplateRenderer;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

static ENV: OnceLock<Result<Environment<'static>, String>> = OnceLock::new();

/// Template renderer using Minijinja over the embedded settings templates.
#[derive(Debug, Clone, Default)]
pub struct MinijinjaTemplateRenderer;

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(&self, context: &RenderContext) -> Result<String, AppError> {
        let template = context.template();
        let env = environment().map_err(|reason| template_render_error(template, reason))?;
        env.get_template(template.file_name())
            .and_then(|tmpl| tmpl.render(context))
            .map_err(|err| template_render_error(template, err))
    }
}

fn environment() -> Result<&'static Environment<'static>, &'static str> {
    ENV.get_or_init(build_environment).as_ref().map_err(String::as_str)
}

fn build_environment() -> Result<Environment<'static>, String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_filter("php_str", |value: String| php_escape(&value));

    for template in TemplateId::ALL {
        let name = template.file_name();
        let source = TEMPLATES_DIR
            .get_file(name)
            .and_then(|file| file.contents_utf8())
            .ok_or_else(|| format!("template {} is not embedded", name))?;
        env.add_template(name, source).map_err(|err| err.to_string())?;
    }
    Ok(env)
}

fn template_render_error(template: TemplateId, err: impl std::fmt::Display) -> AppError {
    AppError::Render { template: template.file_name().to_string(), reason: err.to_string() }
}
