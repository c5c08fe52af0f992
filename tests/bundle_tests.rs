//! Tests for the bundle value type and its builders.

use greenhouse::bundle::{Bundle, Mount, MountOptions, Namespace, PrestartHook};
use std::path::PathBuf;

fn sample_mount(name: &str) -> (Mount, MountOptions) {
    (
        Mount {
            destination: PathBuf::from("/inside"),
            name: name.to_string(),
        },
        MountOptions {
            fs_type: "bind".to_string(),
            source: PathBuf::from("/outside"),
            options: vec!["bind".to_string(), "ro".to_string()],
        },
    )
}

// =============================================================================
// Builder Semantics
// =============================================================================

#[test]
fn test_builders_return_derived_values() {
    let base = Bundle::new();
    let derived = base.clone().with_rootfs("/rootfs");

    assert_eq!(base.rootfs_path, PathBuf::new());
    assert_eq!(derived.rootfs_path, PathBuf::from("/rootfs"));
}

#[test]
fn test_with_mount_registers_options_under_mount_name() {
    let (mount, options) = sample_mount("m0");
    let bundle = Bundle::new().with_mount(mount, options.clone());

    assert_eq!(bundle.mount_options["m0"], options);
}

#[test]
fn test_with_prestart_hook_appends_in_order() {
    let first = PrestartHook {
        path: PathBuf::from("/first"),
        ..PrestartHook::default()
    };
    let second = PrestartHook {
        path: PathBuf::from("/second"),
        ..PrestartHook::default()
    };

    let bundle = Bundle::new()
        .with_prestart_hook(first.clone())
        .with_prestart_hook(second.clone());

    assert_eq!(bundle.prestart_hooks, vec![first, second]);
}

#[test]
fn test_default_bundle_is_empty() {
    let bundle = Bundle::default();
    assert!(bundle.namespaces.is_empty());
    assert!(bundle.mounts.is_empty());
    assert!(bundle.mount_options.is_empty());
    assert!(bundle.prestart_hooks.is_empty());
    assert_eq!(bundle.rootfs_path, PathBuf::new());
}

// =============================================================================
// Serialized Shape
// =============================================================================

#[test]
fn test_mount_options_serialize_with_type_key() {
    let (_, options) = sample_mount("m0");
    let json = serde_json::to_value(&options).unwrap();

    assert_eq!(json["type"], "bind");
    assert_eq!(json["source"], "/outside");
    assert_eq!(json["options"], serde_json::json!(["bind", "ro"]));
}

#[test]
fn test_namespace_serializes_lowercase() {
    let json = serde_json::to_string(&Namespace::Network).unwrap();
    assert_eq!(json, "\"network\"");
}
