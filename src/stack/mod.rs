//! Stack definition and resolver binding
//!
//! This module provides:
//! - `ResolverRegistry`: one validated binding per (operation type, field name)
//! - `StackBuilder`: assembles an API, tables, data sources and resolvers into a `StackDefinition`

pub mod builder;
pub mod registry;

pub use builder::{StackBuilder, StackDefinition};
pub use registry::{ResolverBinding, ResolverRegistry};
