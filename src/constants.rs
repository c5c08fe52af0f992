//! Shared constants for the provisioning core.
//!
//! These are the fixed names baked into the bundle format consumed by the
//! containerizer. Changing any of them is a wire-compatibility change for
//! every hook script and runtime that reads the generated bundles.

/// Environment variable carrying the per-container log file path into
/// pre-start hooks.
pub const LOG_FILE_ENV_VAR: &str = "GARDEN_LOG_FILE";

/// Environment variable forwarding the caller's `PATH` into pre-start hooks.
pub const PATH_ENV_VAR: &str = "PATH";

/// Placeholder substituted with the container handle in log file patterns,
/// e.g. `/var/log/containers/%s.log`.
pub const HANDLE_PLACEHOLDER: &str = "%s";

/// Prefix for generated bind-mount names. Names are unique within a single
/// bundle, not globally.
pub const MOUNT_NAME_PREFIX: &str = "bind-mount";

/// Mount type for translated bind mounts.
pub const BIND_MOUNT_TYPE: &str = "bind";
