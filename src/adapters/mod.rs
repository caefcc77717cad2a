pub mod config_filesystem;
pub mod hook_tools;
pub mod state_file;
pub mod system_command;
pub mod templates;

pub use config_filesystem::FilesystemConfigStore;
pub use hook_tools::HookToolsAdapter;
pub use state_file::JsonStateFile;
pub use system_command::SystemCommandAdapter;
pub use templates::MinijinjaTemplateRenderer;
