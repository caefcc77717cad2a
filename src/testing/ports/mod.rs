mod fake_orchestrator;
mod fake_system;
mod memory_state_store;

pub use self::fake_orchestrator::FakeOrchestrator;
pub use self::fake_system::FakeSystem;
pub use self::memory_config_store::MemoryConfigStore;
pub use self::memory_state_store::MemoryStateStore;
