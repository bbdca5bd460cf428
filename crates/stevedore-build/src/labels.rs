//! The `org.label-schema.*` label set.
//!
//! Seven labels come straight from the build metadata, the rest are
//! fixed strings taken from [`LabelDefaults`]. `demo/Dockerfile`
//! declares the same set in its `LABEL` instruction, with the fixed
//! strings written out literally; [`LabelSchema`] renders the set on the
//! Rust side for `stevedore labels` and for builds that pass labels
//! inline. Configured fixed strings only reach the image through the
//! latter, or by pasting `stevedore labels --dockerfile` output.

use std::fmt::Write as _;

use stevedore_meta::BuildMetadata;

use crate::config::LabelDefaults;

/// Namespace shared by every label.
pub const NAMESPACE: &str = "org.label-schema";

/// Value of `org.label-schema.docker.schema-version`.
pub const SCHEMA_VERSION: &str = "1.0";

/// A single rendered label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Fully qualified key, e.g. `org.label-schema.vcs-ref`.
    pub key: String,
    /// Label value.
    pub value: String,
}

/// Renders image labels from a metadata record.
#[derive(Debug, Clone, Copy)]
pub struct LabelSchema<'a> {
    defaults: &'a LabelDefaults,
}

impl<'a> LabelSchema<'a> {
    /// Schema using the given fixed strings.
    #[must_use]
    pub const fn new(defaults: &'a LabelDefaults) -> Self {
        Self { defaults }
    }

    /// The ordered label set for `record`.
    #[must_use]
    pub fn render(&self, record: &BuildMetadata) -> Vec<Label> {
        let d = self.defaults;
        [
            ("build-date", record.build_date().to_owned()),
            ("name", record.name().to_owned()),
            ("description", d.description.clone()),
            ("url", d.url.clone()),
            ("vcs-url", format!("{}{}", d.vcs_url_prefix, record.vcs_url())),
            ("vcs-ref", record.vcs_ref().to_owned()),
            ("vendor", record.vendor().to_owned()),
            ("version", record.version().to_owned()),
            ("docker.schema-version", SCHEMA_VERSION.to_owned()),
            ("docker.cmd", d.run_command.clone()),
        ]
        .into_iter()
        .map(|(suffix, value)| Label {
            key: format!("{NAMESPACE}.{suffix}"),
            value,
        })
        .collect()
    }
}

/// Render labels as a Dockerfile `LABEL` instruction, one label per line.
#[must_use]
pub fn to_dockerfile_instruction(labels: &[Label]) -> String {
    let mut out = String::from("LABEL");
    let last = labels.len().saturating_sub(1);
    for (i, label) in labels.iter().enumerate() {
        let sep = if i == last { "" } else { " \\" };
        write!(out, "\n      {}={}{sep}", label.key, quote(&label.value)).ok();
    }
    out
}

/// Double-quote a value for a Dockerfile, escaping `"`, `\`, and `$`.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
