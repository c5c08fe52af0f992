//! Request and value types for container provisioning.
//!
//! [`ContainerRequest`] is what a caller hands to the orchestrator;
//! [`DesiredContainerSpec`] is the fully resolved spec the orchestrator
//! assembles from acquired resources and feeds to the containerizer (and,
//! inside it, the bundle pipeline). Both are immutable values: they are
//! built once per create attempt and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Container properties: free-form string key/value pairs stored per handle.
pub type Properties = HashMap<String, String>;

// =============================================================================
// Inbound Request
// =============================================================================

/// A high-level "desired container" request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerRequest {
    /// Caller-chosen handle. When `None`, the orchestrator generates one.
    pub handle: Option<String>,

    /// Root filesystem reference, e.g. `docker:///alpine` or a bare path.
    pub rootfs: String,

    /// Opaque network spec forwarded to the networker.
    pub network: String,

    /// Whether the container runs privileged.
    pub privileged: bool,

    /// Bind mounts to translate into the bundle.
    pub bind_mounts: Vec<BindMount>,

    /// Properties attached to the container after creation.
    pub properties: Properties,

    /// Hard disk quota in bytes (0 = unlimited).
    pub disk_limit_bytes: u64,
}

// =============================================================================
// Desired Container Spec
// =============================================================================

/// The fully resolved container spec consumed by the containerizer.
///
/// Produced fresh per create request from acquired resources; the bundle
/// pipeline reads it but never writes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesiredContainerSpec {
    /// Unique container handle. Empty only before handle generation.
    pub handle: String,

    /// Path to the container's root filesystem, as resolved by the volume
    /// creator.
    pub rootfs_path: PathBuf,

    /// Network pre-start hook acquired from the networker.
    pub network_hook: Option<Hook>,

    /// Bind mounts carried over from the request.
    pub bind_mounts: Vec<BindMount>,

    /// Whether the container runs privileged.
    pub privileged: bool,
}

/// A pre-start hook: executable path plus arguments.
///
/// Used both for the network hook acquired during create and for any
/// rule-injected hooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    /// Path to the hook executable.
    pub path: PathBuf,
    /// Arguments passed to the hook.
    pub args: Vec<String>,
}

// =============================================================================
// Bind Mounts
// =============================================================================

/// Access mode for a bind mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindMountMode {
    /// Read-only.
    Ro,
    /// Read-write.
    Rw,
}

impl BindMountMode {
    /// Returns the mount option flag for this mode (`"ro"` or `"rw"`).
    pub fn as_option(&self) -> &'static str {
        match self {
            Self::Ro => "ro",
            Self::Rw => "rw",
        }
    }
}

/// A host directory bind-mounted into the container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindMount {
    /// Source path on the host.
    pub src_path: PathBuf,
    /// Destination path inside the container.
    pub dst_path: PathBuf,
    /// Access mode.
    pub mode: BindMountMode,
}

// =============================================================================
// Networking Rules
// =============================================================================

/// Transport protocol for a net-out rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// All protocols.
    #[default]
    All,
    /// TCP only.
    Tcp,
    /// UDP only.
    Udp,
}

/// An outbound traffic rule applied to a running container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetOutRule {
    /// Protocol the rule applies to.
    pub protocol: Protocol,
    /// Destination networks in CIDR notation. Empty means all.
    pub networks: Vec<String>,
    /// Destination port ranges as `(low, high)` pairs. Empty means all.
    pub ports: Vec<(u16, u16)>,
}

// =============================================================================
// Capacity
// =============================================================================

/// Aggregate host capacity reported by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity {
    /// Total host memory in bytes.
    pub memory_in_bytes: u64,
    /// Total host disk in bytes.
    pub disk_in_bytes: u64,
    /// Maximum number of containers the network subsystem can support.
    pub max_containers: u64,
}
