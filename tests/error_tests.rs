//! Tests for error display formatting.

use greenhouse::error::Error;

#[test]
fn test_network_error_display() {
    let err = Error::Network {
        handle: "fred".to_string(),
        reason: "no addresses left".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "network operation failed for container 'fred': no addresses left"
    );
}

#[test]
fn test_invalid_rootfs_display() {
    let err = Error::InvalidRootfs {
        reference: "://banana".to_string(),
        reason: "empty scheme".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "invalid rootfs reference '://banana': empty scheme"
    );
}

#[test]
fn test_destroy_failed_display_names_the_step() {
    let err = Error::DestroyFailed {
        handle: "fred".to_string(),
        step: "network".to_string(),
        reason: "device busy".to_string(),
    };
    assert!(err.to_string().contains("network"));
    assert!(err.to_string().contains("fred"));
}

#[test]
fn test_empty_pipeline_display() {
    assert_eq!(
        Error::EmptyPipeline.to_string(),
        "bundle pipeline requires at least one rule"
    );
}

#[test]
fn test_io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
    let err: Error = io.into();
    assert!(matches!(err, Error::Io(_)));
}
