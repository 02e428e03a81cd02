//! Nugget Snake (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so the binary, the
//! integration tests and the benches share one import path.

pub use nugget_snake_core as core;
pub use nugget_snake_input as input;
pub use nugget_snake_term as term;
pub use nugget_snake_types as types;
