//! Error types for the provisioning core.

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while provisioning or destroying containers.
///
/// Collaborator implementations (networker, volume creator, containerizer,
/// property manager) construct the variant matching their failure domain;
/// the orchestrator propagates the first error it sees and never retries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Acquisition Errors
    // =========================================================================
    /// Network setup or teardown failed.
    #[error("network operation failed for container '{handle}': {reason}")]
    Network { handle: String, reason: String },

    /// Volume creation or removal failed.
    #[error("volume operation failed for container '{handle}': {reason}")]
    Volume { handle: String, reason: String },

    /// Containerizer create/destroy/stream/run failed.
    #[error("containerizer operation failed for container '{handle}': {reason}")]
    Containerize { handle: String, reason: String },

    // =========================================================================
    // Rootfs Reference Errors
    // =========================================================================
    /// The caller-supplied root filesystem reference could not be parsed.
    #[error("invalid rootfs reference '{reference}': {reason}")]
    InvalidRootfs { reference: String, reason: String },

    // =========================================================================
    // Destruction Errors
    // =========================================================================
    /// A step of the fail-fast destroy sequence failed; later steps were
    /// not attempted.
    #[error("failed to destroy container '{handle}' during {step}: {reason}")]
    DestroyFailed {
        handle: String,
        step: String,
        reason: String,
    },

    // =========================================================================
    // Property Errors
    // =========================================================================
    /// A container property could not be read or written.
    #[error("property '{name}' operation failed for container '{handle}': {reason}")]
    Property {
        handle: String,
        name: String,
        reason: String,
    },

    // =========================================================================
    // Capacity Errors
    // =========================================================================
    /// System resource introspection failed.
    #[error("failed to read system {resource}: {reason}")]
    SysInfo { resource: String, reason: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A bundle pipeline was configured with no rules.
    #[error("bundle pipeline requires at least one rule")]
    EmptyPipeline,

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Generic I/O error (stream-in/stream-out plumbing).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
