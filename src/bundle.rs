//! Low-level container bundle description.
//!
//! A [`Bundle`] is the fully materialized description handed to the
//! containerizer: namespace set, root filesystem path, an ordered mount list
//! with per-bundle-unique names, a name-keyed map of low-level mount options,
//! and an ordered list of pre-start hooks. This shape is a compatibility
//! boundary — the containerizer consumes it exactly as laid out here.
//!
//! Bundles are immutable by convention: the `with_*` builders consume the
//! value and return a derived one, so pipeline rules never mutate shared
//! state. Base templates are plain `Bundle` values built the same way.

use crate::spec::Hook;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Linux namespaces a container can be placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Network namespace.
    Network,
    /// Mount namespace.
    Mount,
    /// PID namespace.
    Pid,
    /// IPC namespace.
    Ipc,
    /// UTS namespace.
    Uts,
    /// User namespace.
    User,
}

/// An entry in the bundle's ordered mount list.
///
/// The `name` keys into [`Bundle::mount_options`] and is unique within the
/// bundle it was generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mount {
    /// Destination path inside the container.
    pub destination: PathBuf,
    /// Generated per-bundle-unique mount name.
    pub name: String,
}

/// Low-level options for a named mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountOptions {
    /// Filesystem type (e.g. `bind`).
    #[serde(rename = "type")]
    pub fs_type: String,
    /// Mount source on the host.
    pub source: PathBuf,
    /// Ordered option flags (e.g. `["bind", "ro"]`).
    pub options: Vec<String>,
}

/// A pre-start hook entry: executable, arguments, and environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrestartHook {
    /// Path to the hook executable.
    pub path: PathBuf,
    /// Arguments passed to the hook.
    pub args: Vec<String>,
    /// Environment as ordered `KEY=value` strings.
    pub env: Vec<String>,
}

impl From<Hook> for PrestartHook {
    fn from(hook: Hook) -> Self {
        Self {
            path: hook.path,
            args: hook.args,
            env: Vec::new(),
        }
    }
}

/// The fully materialized low-level container description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    /// Namespaces the container joins.
    pub namespaces: Vec<Namespace>,
    /// Path to the container's root filesystem.
    pub rootfs_path: PathBuf,
    /// Ordered mount list; each entry's name keys into `mount_options`.
    pub mounts: Vec<Mount>,
    /// Low-level options per mount name.
    pub mount_options: HashMap<String, MountOptions>,
    /// Ordered pre-start hooks.
    pub prestart_hooks: Vec<PrestartHook>,
}

impl Bundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the given namespace appended.
    pub fn with_namespace(mut self, ns: Namespace) -> Self {
        if !self.namespaces.contains(&ns) {
            self.namespaces.push(ns);
        }
        self
    }

    /// Returns a copy with the root filesystem path replaced.
    pub fn with_rootfs(mut self, path: impl Into<PathBuf>) -> Self {
        self.rootfs_path = path.into();
        self
    }

    /// Returns a copy with the mount appended and its options registered
    /// under the mount's name. Existing mounts are preserved.
    pub fn with_mount(mut self, mount: Mount, options: MountOptions) -> Self {
        self.mount_options.insert(mount.name.clone(), options);
        self.mounts.push(mount);
        self
    }

    /// Returns a copy with the pre-start hook appended. Existing hooks are
    /// preserved and keep their order.
    pub fn with_prestart_hook(mut self, hook: PrestartHook) -> Self {
        self.prestart_hooks.push(hook);
        self
    }

    /// True if `name` is already taken by a mount in this bundle.
    pub fn has_mount_name(&self, name: &str) -> bool {
        self.mount_options.contains_key(name)
    }
}
