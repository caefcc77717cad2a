mod ports;

#[allow(unused_imports)]
pub use ports::{FakeOrchestrator, FakeSystem, MemoryConfigStore, MemoryStateStore};

use crate::app::AppContext;
use crate::domain::Settings;

pub type TestContext =
    AppContext<FakeOrchestrator, FakeSystem, MemoryConfigStore, MemoryStateStore>;

/// Context over fresh fakes with default settings.
#[allow(dead_code)]
pub fn test_context(orchestrator: FakeOrchestrator) -> TestContext {
    AppContext::new(
        orchestrator,
        FakeSystem::new(),
        MemoryConfigStore::new(),
        MemoryStateStore::new(),
        Settings::default(),
    )
}
