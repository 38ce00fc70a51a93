//! Builtin manager backends
//!
//! Each backend is a thin adapter from [`ManagerBackend`] onto one
//! external package-manager CLI, built on the shared helpers in
//! [`exec`] and [`parse`].
//!
//! [`ManagerBackend`]: crate::backend::ManagerBackend
//! [`exec`]: crate::exec
//! [`parse`]: crate::parse

pub mod brew;
pub mod cargo;
pub mod gem;
pub mod golang;
pub mod node;
pub mod uv;

pub use brew::BrewBackend;
pub use cargo::CargoBackend;
pub use gem::GemBackend;
pub use golang::GoBackend;
pub use node::{NodeBackend, NodeProvider};
pub use uv::UvBackend;
