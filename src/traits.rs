//! Collaborator contracts consumed by the provisioning core.
//!
//! All durable state lives behind these seams, not in the orchestrator.
//! Error returns propagate to callers or trigger compensation as described
//! in [`crate::provisioner`]; no retry or timeout policy is imposed here —
//! blocking, retries, and cancellation are entirely the implementations'
//! concern.
//!
//! The container handle is the sole cross-subsystem correlation key: every
//! operation below is keyed by it, and no implementation may derive a
//! competing identifier of its own.

use crate::error::Result;
use crate::rootfs::VolumeSpec;
use crate::spec::{DesiredContainerSpec, Hook, NetOutRule, Properties};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncWrite};

/// A readable tar archive stream (stream-in payloads).
pub type TarStream = Box<dyn AsyncRead + Send + Unpin>;

/// A readable byte stream handed back from stream-out.
pub type OutStream = Box<dyn AsyncRead + Send + Unpin>;

// =============================================================================
// Process Types
// =============================================================================

/// Specification of a process to run inside a container.
#[derive(Debug, Clone, Default)]
pub struct ProcessSpec {
    /// Path to the executable inside the container.
    pub path: String,
    /// Arguments.
    pub args: Vec<String>,
    /// Environment as `KEY=value` strings.
    pub env: Vec<String>,
    /// Working directory inside the container, when set.
    pub dir: Option<String>,
}

/// Standard stream wiring for a container process.
#[derive(Default)]
pub struct ProcessIo {
    /// Stream copied to the process's stdin.
    pub stdin: Option<Box<dyn AsyncRead + Send + Unpin>>,
    /// Sink receiving the process's stdout.
    pub stdout: Option<Box<dyn AsyncWrite + Send + Unpin>>,
    /// Sink receiving the process's stderr.
    pub stderr: Option<Box<dyn AsyncWrite + Send + Unpin>>,
}

impl std::fmt::Debug for ProcessIo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessIo")
            .field("stdin", &self.stdin.is_some())
            .field("stdout", &self.stdout.is_some())
            .field("stderr", &self.stderr.is_some())
            .finish()
    }
}

/// A handle to a process started in a container.
#[async_trait]
pub trait Process: Send {
    /// Process identifier within the container.
    fn id(&self) -> u32;

    /// Waits for the process to exit and returns its exit code.
    async fn wait(&mut self) -> Result<i32>;
}

// =============================================================================
// Collaborators
// =============================================================================

/// Creates, runs, and destroys low-level containers.
///
/// Implementations are expected to run the bundle pipeline internally when
/// realizing a [`DesiredContainerSpec`].
#[async_trait]
pub trait Containerizer: Send + Sync {
    /// Creates a container from an assembled desired spec.
    async fn create(&self, spec: DesiredContainerSpec) -> Result<()>;

    /// Streams a tar archive into the container at `destination`.
    async fn stream_in(&self, handle: &str, destination: &str, archive: TarStream) -> Result<()>;

    /// Streams the file or directory at `source` out of the container.
    async fn stream_out(&self, handle: &str, source: &str) -> Result<OutStream>;

    /// Runs a process in the container.
    async fn run(&self, handle: &str, spec: ProcessSpec, io: ProcessIo)
        -> Result<Box<dyn Process>>;

    /// Destroys the container's runtime state.
    async fn destroy(&self, handle: &str) -> Result<()>;

    /// Lists the handles of all known containers.
    async fn handles(&self) -> Result<Vec<String>>;
}

/// Acquires and releases per-container network resources.
#[async_trait]
pub trait Networker: Send + Sync {
    /// Sets up networking for the handle and returns the pre-start hook
    /// that joins the container to it.
    async fn hook(&self, handle: &str, network_spec: &str) -> Result<Hook>;

    /// Maximum number of containers the network subsystem supports.
    fn capacity(&self) -> u64;

    /// Tears down the handle's network resources.
    async fn destroy(&self, handle: &str) -> Result<()>;

    /// Maps a host port to a container port; 0 requests auto-assignment.
    /// Returns the actual `(host_port, container_port)` pair.
    async fn net_in(&self, handle: &str, host_port: u16, container_port: u16)
        -> Result<(u16, u16)>;

    /// Applies an outbound traffic rule to the container.
    async fn net_out(&self, handle: &str, rule: NetOutRule) -> Result<()>;
}

/// Creates and destroys container root filesystem volumes.
#[async_trait]
pub trait VolumeCreator: Send + Sync {
    /// Creates a volume for the handle from the given spec.
    ///
    /// Returns the resolved rootfs path plus any extra bind mounts the
    /// driver requires.
    async fn create(
        &self,
        handle: &str,
        spec: VolumeSpec,
    ) -> Result<(PathBuf, Vec<crate::spec::BindMount>)>;

    /// Destroys the handle's volume.
    async fn destroy(&self, handle: &str) -> Result<()>;
}

/// Key-value property store, namespaced per container handle.
pub trait PropertyManager: Send + Sync {
    /// All properties for the handle.
    fn all(&self, handle: &str) -> Result<Properties>;

    /// Sets a property.
    fn set(&self, handle: &str, name: &str, value: &str) -> Result<()>;

    /// Removes a property.
    fn remove(&self, handle: &str, name: &str) -> Result<()>;

    /// Reads a property.
    fn get(&self, handle: &str, name: &str) -> Result<String>;

    /// True when every entry of `filter` matches the handle's properties.
    fn matches_all(&self, handle: &str, filter: &Properties) -> bool;

    /// Removes the handle's entire property namespace.
    fn destroy_namespace(&self, handle: &str) -> Result<()>;
}

/// Generates process-wide-unique container handles.
///
/// Implementations must serialize generation internally: concurrent calls
/// must never produce duplicates.
pub trait UidGenerator: Send + Sync {
    /// Returns a fresh unique handle.
    fn generate(&self) -> String;
}

impl<F> UidGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Reports total host resources.
pub trait SysInfoProvider: Send + Sync {
    /// Total host memory in bytes.
    fn total_memory(&self) -> Result<u64>;

    /// Total host disk in bytes.
    fn total_disk(&self) -> Result<u64>;
}

/// One-time start-up tasks the backend needs before serving requests
/// (e.g. cgroup hierarchy setup).
pub trait Starter: Send + Sync {
    /// Runs the start-up tasks.
    fn start(&self) -> Result<()>;
}
