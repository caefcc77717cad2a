use crate::domain::{AppError, RenderContext};

/// Renders one of the embedded settings templates.
///
/// Implementations must be pure: the same context always yields the same text.
pub trait TemplateRenderer {
    fn render(&self, context: &RenderContext) -> Result<String, AppError>;
}
