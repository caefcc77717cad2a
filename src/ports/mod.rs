mod config_store;
mod orchestrator;
mod state_store;
mod system;
mod template_renderer;

pub use config_store::ConfigStore;
pub use orchestrator::Orchestrator;
pub use state_store::StateStore;
pub use system::System;
pub use template_renderer::TemplateRenderer;
