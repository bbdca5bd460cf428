//! The Build Metadata Record.

use std::fmt;

use serde::Serialize;

/// One of the six keys of a [`BuildMetadata`] record.
///
/// The key names double as the build argument names declared by the
/// Dockerfile (`ARG VERSION`, `ARG BUILD_DATE`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetadataKey {
    /// Full commit hash.
    Version,
    /// RFC 2822 build timestamp.
    BuildDate,
    /// Repository name, appended to the VCS URL prefix in labels.
    VcsUrl,
    /// Abbreviated commit hash.
    VcsRef,
    /// Human-readable project name.
    Name,
    /// Invoking user.
    Vendor,
}

impl MetadataKey {
    /// All keys in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Version,
        Self::BuildDate,
        Self::VcsUrl,
        Self::VcsRef,
        Self::Name,
        Self::Vendor,
    ];

    /// The upper-case key name used for build arguments and `print` output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Version => "VERSION",
            Self::BuildDate => "BUILD_DATE",
            Self::VcsUrl => "VCS_URL",
            Self::VcsRef => "VCS_REF",
            Self::Name => "NAME",
            Self::Vendor => "VENDOR",
        }
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build provenance for a single image build.
///
/// Fields are read-only once constructed; a new record is collected for
/// every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BuildMetadata {
    version: String,
    build_date: String,
    vcs_url: String,
    vcs_ref: String,
    name: String,
    vendor: String,
}

impl BuildMetadata {
    /// Assemble a record from already-computed values.
    ///
    /// `NAME` is taken from `vcs_url`: both identify the repository.
    #[must_use]
    pub fn new(
        version: impl Into<String>,
        build_date: impl Into<String>,
        vcs_url: impl Into<String>,
        vcs_ref: impl Into<String>,
        vendor: impl Into<String>,
    ) -> Self {
        let vcs_url = vcs_url.into();
        Self {
            version: version.into(),
            build_date: build_date.into(),
            name: vcs_url.clone(),
            vcs_url,
            vcs_ref: vcs_ref.into(),
            vendor: vendor.into(),
        }
    }

    /// Value stored under `key`.
    #[must_use]
    pub fn get(&self, key: MetadataKey) -> &str {
        match key {
            MetadataKey::Version => &self.version,
            MetadataKey::BuildDate => &self.build_date,
            MetadataKey::VcsUrl => &self.vcs_url,
            MetadataKey::VcsRef => &self.vcs_ref,
            MetadataKey::Name => &self.name,
            MetadataKey::Vendor => &self.vendor,
        }
    }

    /// All `(key, value)` pairs in canonical order.
    pub fn entries(&self) -> impl Iterator<Item = (MetadataKey, &str)> + '_ {
        MetadataKey::ALL.into_iter().map(|key| (key, self.get(key)))
    }

    /// Full commit hash.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// RFC 2822 build timestamp.
    #[must_use]
    pub fn build_date(&self) -> &str {
        &self.build_date
    }

    /// Repository name.
    #[must_use]
    pub fn vcs_url(&self) -> &str {
        &self.vcs_url
    }

    /// Abbreviated commit hash.
    #[must_use]
    pub fn vcs_ref(&self) -> &str {
        &self.vcs_ref
    }

    /// Project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoking user.
    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.vendor
    }
}

impl fmt::Display for BuildMetadata {
    /// One `KEY=value` line per entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.entries() {
            writeln!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
