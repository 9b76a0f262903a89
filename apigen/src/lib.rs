//! apigen core — the project materialization engine
//!
//! Given a validated project name, materializes a starter source tree under
//! a base directory using one of three acquisition strategies: downloading
//! and safely unpacking a remote zip template, mirroring a local template
//! directory, or synthesizing the built-in skeleton. The CLI in
//! `apigen-cli` is a thin wrapper over [`Generator::run`].

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod archive;
pub mod error;
pub mod fetch;
pub mod generate;
pub mod mirror;
pub mod path;
pub mod skeleton;
pub mod templates;

pub use error::GenerateError;
pub use generate::{GenerationReport, Generator, Phase, PhaseError, ProjectRequest, TemplateSource};
