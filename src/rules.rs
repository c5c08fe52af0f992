//! Concrete bundle pipeline rules.
//!
//! A correctly configured pipeline runs these in order:
//!
//! 1. [`BaseTemplateRule`] — seeds the fold with a preconfigured base bundle
//!    (privileged or unprivileged).
//! 2. [`RootfsRule`] — copies the resolved rootfs path into the bundle.
//! 3. [`NetworkHookRule`] — wires log-file and `PATH` environment into the
//!    pre-start hook list and appends the acquired network hook.
//! 4. [`BindMountsRule`] — translates bind-mount entries into named mounts
//!    with low-level options.
//!
//! Every rule except the seeding rule preserves all fields of its input
//! bundle that it does not own.

use crate::bundle::{Bundle, Mount, MountOptions, PrestartHook};
use crate::constants::{
    BIND_MOUNT_TYPE, HANDLE_PLACEHOLDER, LOG_FILE_ENV_VAR, MOUNT_NAME_PREFIX, PATH_ENV_VAR,
};
use crate::pipeline::BundleRule;
use crate::spec::DesiredContainerSpec;

// =============================================================================
// Base Template Rule
// =============================================================================

/// Seeding rule: selects one of two preconfigured base bundle templates.
///
/// Ignores the input bundle entirely and returns the privileged or
/// unprivileged template unmodified, based on `spec.privileged`. Must be the
/// first rule in a pipeline.
#[derive(Debug, Clone)]
pub struct BaseTemplateRule {
    /// Template used when the spec requests a privileged container.
    pub privileged_base: Bundle,
    /// Template used otherwise.
    pub unprivileged_base: Bundle,
}

impl BundleRule for BaseTemplateRule {
    fn apply(&self, _bundle: Option<Bundle>, spec: &DesiredContainerSpec) -> Bundle {
        if spec.privileged {
            self.privileged_base.clone()
        } else {
            self.unprivileged_base.clone()
        }
    }
}

// =============================================================================
// Rootfs Rule
// =============================================================================

/// Copies `spec.rootfs_path` into the bundle's root filesystem field,
/// leaving every other field untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootfsRule;

impl BundleRule for RootfsRule {
    fn apply(&self, bundle: Option<Bundle>, spec: &DesiredContainerSpec) -> Bundle {
        bundle
            .unwrap_or_default()
            .with_rootfs(spec.rootfs_path.clone())
    }
}

// =============================================================================
// Network Hook Rule
// =============================================================================

/// Appends network-related pre-start hooks to the bundle.
///
/// Two appends, both preserving hooks already present:
///
/// 1. A log-wiring entry whose environment carries
///    `GARDEN_LOG_FILE=<pattern with handle substituted>` and the caller's
///    inherited `PATH`.
/// 2. The spec's network hook (path and args), when present.
#[derive(Debug, Clone, Default)]
pub struct NetworkHookRule {
    /// Log file pattern with a `%s` placeholder for the container handle,
    /// e.g. `/var/log/containers/%s.log`.
    pub log_file_pattern: String,
}

impl BundleRule for NetworkHookRule {
    fn apply(&self, bundle: Option<Bundle>, spec: &DesiredContainerSpec) -> Bundle {
        let log_file = self
            .log_file_pattern
            .replace(HANDLE_PLACEHOLDER, &spec.handle);
        let inherited_path = std::env::var(PATH_ENV_VAR).unwrap_or_default();

        let mut bundle = bundle.unwrap_or_default().with_prestart_hook(PrestartHook {
            env: vec![
                format!("{}={}", LOG_FILE_ENV_VAR, log_file),
                format!("{}={}", PATH_ENV_VAR, inherited_path),
            ],
            ..PrestartHook::default()
        });

        if let Some(hook) = &spec.network_hook {
            bundle = bundle.with_prestart_hook(PrestartHook::from(hook.clone()));
        }

        bundle
    }
}

// =============================================================================
// Bind Mounts Rule
// =============================================================================

/// Translates `spec.bind_mounts` into bundle mounts.
///
/// For each entry, in input order: generates a mount name unique within the
/// bundle, appends `{destination, name}` to the ordered mount list, and
/// registers `{type: "bind", source, options: ["bind", "ro"|"rw"]}` under
/// that name.
#[derive(Debug, Clone, Copy, Default)]
pub struct BindMountsRule;

impl BundleRule for BindMountsRule {
    fn apply(&self, bundle: Option<Bundle>, spec: &DesiredContainerSpec) -> Bundle {
        let mut bundle = bundle.unwrap_or_default();

        for bind in &spec.bind_mounts {
            let name = next_mount_name(&bundle);
            bundle = bundle.with_mount(
                Mount {
                    destination: bind.dst_path.clone(),
                    name,
                },
                MountOptions {
                    fs_type: BIND_MOUNT_TYPE.to_string(),
                    source: bind.src_path.clone(),
                    options: vec![
                        BIND_MOUNT_TYPE.to_string(),
                        bind.mode.as_option().to_string(),
                    ],
                },
            );
        }

        bundle
    }
}

/// Picks the first `bind-mount-N` name not already taken in the bundle.
fn next_mount_name(bundle: &Bundle) -> String {
    let mut i = bundle.mounts.len();
    loop {
        let name = format!("{}-{}", MOUNT_NAME_PREFIX, i);
        if !bundle.has_mount_name(&name) {
            return name;
        }
        i += 1;
    }
}
