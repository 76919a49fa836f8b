// Fair Split - Core Library
// Exposes all modules for use in the TUI, API server, and tests

pub mod allocation;
pub mod format;
pub mod sanitize;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use allocation::{allocate, AllocationResult};
pub use format::{format_input, format_share, group_thousands};
pub use sanitize::{digits, sanitize, MAX_DIGITS};
pub use state::{
    Controller, ExpenseEntry, Field, IncomeEntry, Role, ViewModel, DEFAULT_EXPENSE,
    DEFAULT_PARTY_A_SALARY, DEFAULT_PARTY_B_SALARY,
};
pub use store::{
    MemoryStore, PersistedState, SavedContributions, SavedInputs, SqliteStore, StateStore,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
