//! Session-scoped unlock state.

pub mod store;
