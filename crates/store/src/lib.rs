//! Delta State Stores
//!
//! Implementations of the [`StateStore`](delta_ports::StateStore) port.
//! The in-memory store is the default for a single process; other backends
//! plug in behind the same trait.

mod in_memory;

pub use in_memory::InMemoryStateStore;
