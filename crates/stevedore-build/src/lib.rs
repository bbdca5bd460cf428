//! Labelled container image builds.
//!
//! `stevedore-build` turns a [`stevedore_meta::BuildMetadata`] record
//! into a single `docker build` invocation: one `--build-arg` per
//! metadata key, a fixed tag, and a fixed context path. It also renders
//! the `org.label-schema.*` label set the Dockerfile stamps on the
//! image, and loads the TOML configuration that supplies the fixed
//! strings.

pub mod config;
pub mod error;
pub mod invoker;
pub mod labels;
mod util;

pub use config::{BuildConfig, CONFIG_FILE_NAME, LabelDefaults, resolve_config};
pub use error::BuildError;
pub use invoker::ImageBuild;
pub use labels::{Label, LabelSchema, to_dockerfile_instruction};
pub use util::{expand_tilde, render_command};
