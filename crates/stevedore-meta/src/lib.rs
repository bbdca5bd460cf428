//! Build provenance for labelled container images.
//!
//! `stevedore-meta` computes the Build Metadata Record: the commit hash,
//! build timestamp, repository name, and invoking user that get passed to
//! the image build as build arguments. The record is computed fresh on
//! every call and never cached.

pub mod error;
pub mod metadata;
pub mod record;
pub mod vcs;

pub use error::MetadataError;
pub use metadata::{CollectOptions, collect};
pub use record::{BuildMetadata, MetadataKey};
pub use vcs::GitState;
