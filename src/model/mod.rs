//! Document model types for laid-out content.
//!
//! This module defines the output of the layout engine: a document made of
//! fixed-size pages, each holding absolutely positioned text runs. The model
//! is independent of any output encoding; exporters turn it into PDF, JSON or
//! plain text.

mod document;
mod page;
mod run;

pub use document::{Document, Metadata};
pub use page::Page;
pub use run::{Font, LineKind, TextRun};
