use crate::error::{InstallerError, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// First release shipped as an archive wrapped inside the distribution zip.
pub const NESTED_LAYOUT_SINCE: &str = "1.7";

/// Version the CLI installs when none is given.
pub const DEFAULT_SELECTOR: VersionSelector = VersionSelector::V1_7;

/// Supported distribution lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VersionSelector {
    #[serde(rename = "1.6")]
    V1_6,
    #[serde(rename = "1.7")]
    V1_7,
}

impl VersionSelector {
    pub const ALL: [VersionSelector; 2] = [VersionSelector::V1_6, VersionSelector::V1_7];

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionSelector::V1_6 => "1.6",
            VersionSelector::V1_7 => "1.7",
        }
    }

    /// Concrete release installed for this line.
    pub fn release(&self) -> &'static str {
        match self {
            VersionSelector::V1_6 => "1.6.1.17",
            VersionSelector::V1_7 => "1.7.2.4",
        }
    }

    pub fn resolve(&self, base_url: &str) -> ResolvedVersion {
        let version = self.release().to_string();
        let archive_name = archive_file_name(&version);
        let url = format!("{}/{archive_name}", base_url.trim_end_matches('/'));

        ResolvedVersion {
            selector: *self,
            layout: PackageLayout::for_version(&version),
            version,
            url,
            archive_name,
        }
    }
}

impl Default for VersionSelector {
    fn default() -> Self {
        DEFAULT_SELECTOR
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionSelector {
    type Err = InstallerError;

    fn from_str(s: &str) -> Result<Self> {
        VersionSelector::ALL
            .into_iter()
            .find(|selector| selector.as_str() == s)
            .ok_or_else(|| InstallerError::InvalidVersion {
                version: s.to_string(),
            })
    }
}

/// How the payload is packed inside the downloaded archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageLayout {
    /// Files at the archive root next to an installer stub page.
    Flat,
    /// A single inner `prestashop.zip` holding the files.
    Nested,
}

impl PackageLayout {
    pub fn for_version(version: &str) -> Self {
        if version_compare(version, NESTED_LAYOUT_SINCE) == Ordering::Less {
            PackageLayout::Flat
        } else {
            PackageLayout::Nested
        }
    }
}

impl fmt::Display for PackageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageLayout::Flat => f.write_str("flat"),
            PackageLayout::Nested => f.write_str("nested"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVersion {
    pub selector: VersionSelector,
    pub version: String,
    pub url: String,
    pub archive_name: String,
    pub layout: PackageLayout,
}

pub fn archive_file_name(version: &str) -> String {
    format!("prestashop_{version}.zip")
}

/// Component-wise numeric comparison of dotted versions.
///
/// Missing trailing components count as zero, so `1.7 == 1.7.0` and
/// `1.7 < 1.7.2.4`. Non-numeric components fall back to string ordering.
pub fn version_compare(a: &str, b: &str) -> Ordering {
    let a_parts: Vec<&str> = a.trim_start_matches('v').split('.').collect();
    let b_parts: Vec<&str> = b.trim_start_matches('v').split('.').collect();

    for i in 0..a_parts.len().max(b_parts.len()) {
        let a_part = a_parts.get(i).copied().unwrap_or("0");
        let b_part = b_parts.get(i).copied().unwrap_or("0");

        let ordering = match (a_part.parse::<u32>(), b_part.parse::<u32>()) {
            (Ok(a_num), Ok(b_num)) => a_num.cmp(&b_num),
            _ => a_part.cmp(b_part),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    Ordering::Equal
}
