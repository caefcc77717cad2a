pub mod admin;
pub mod config;
pub mod error;
pub mod event;
pub mod records;
pub mod render;
pub mod settings;
pub mod state;
pub mod status;
pub mod tokens;

pub use admin::{AdminAccount, admins_digest, parse_admins};
pub use config::{CharmConfig, SiteOptions};
pub use error::AppError;
pub use event::{HookEvent, Relation, RelationHook};
pub use records::{CacheServer, DatabaseConnectionInfo, RelationData};
pub use render::{CacheContext, RenderContext, RenderedFile, SiteContext, TemplateId};
pub use settings::Settings;
pub use state::{CharmState, DbStatus, StateChange};
pub use status::UnitStatus;
pub use tokens::Tokens;
