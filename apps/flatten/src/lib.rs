//! flatten-imports: replace named imports from barrel modules with direct imports

pub mod cli;
pub mod discovery;
pub mod store;
