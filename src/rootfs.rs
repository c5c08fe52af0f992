//! Root filesystem locators.
//!
//! A rootfs reference arrives as an opaque string (`docker:///alpine`,
//! `raw:///var/lib/images/base`, or a bare host path). The orchestrator
//! parses it into a [`RootfsLocator`] before talking to the volume creator;
//! a parse failure aborts the create and triggers compensation of already
//! acquired resources. Rules downstream never see a malformed reference.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// A structured root filesystem reference: optional scheme plus path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootfsLocator {
    /// Scheme of the reference (e.g. `docker`, `raw`). `None` for bare paths.
    pub scheme: Option<String>,
    /// Path component of the reference.
    pub path: PathBuf,
}

impl FromStr for RootfsLocator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidRootfs {
                reference: s.to_string(),
                reason: "empty reference".to_string(),
            });
        }

        let Some((scheme, rest)) = s.split_once("://") else {
            // Bare host path, no scheme.
            return Ok(Self {
                scheme: None,
                path: PathBuf::from(s),
            });
        };

        if scheme.is_empty() {
            return Err(Error::InvalidRootfs {
                reference: s.to_string(),
                reason: "empty scheme".to_string(),
            });
        }

        if !scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
        {
            return Err(Error::InvalidRootfs {
                reference: s.to_string(),
                reason: "scheme contains invalid characters".to_string(),
            });
        }

        Ok(Self {
            scheme: Some(scheme.to_string()),
            path: PathBuf::from(rest),
        })
    }
}

/// Scope of a disk quota applied to a container volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaScope {
    /// Quota covers only data written by the container, not the base image.
    #[default]
    Exclusive,
    /// Quota covers the base image plus container writes.
    Total,
}

/// Volume creation parameters handed to the volume creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSpec {
    /// Parsed root filesystem reference.
    pub rootfs: RootfsLocator,
    /// Hard quota in bytes (0 = unlimited).
    pub quota_bytes: u64,
    /// Scope of the quota.
    pub quota_scope: QuotaScope,
}
