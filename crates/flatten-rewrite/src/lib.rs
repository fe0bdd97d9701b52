//! Barrel import flattening
//!
//! [`classifier`] decides which import specifiers point at barrel modules,
//! [`engine`] plans and applies the per-file rewrite, and [`runner`] drives a
//! whole run over a [`runner::SourceStore`].

pub mod classifier;
pub mod engine;
pub mod runner;

pub use classifier::{is_barrel_import, BarrelClassifier};
pub use engine::{plan_file, rewrite_source, FilePlan, SourceRewrite, SplitImport};
pub use runner::{Rewriter, SourceStore};
