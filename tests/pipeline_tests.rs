//! Tests for the bundle pipeline fold.
//!
//! Validates the ordered-fold contract: every rule invoked exactly once, in
//! configured order, each receiving the previous rule's exact output, with
//! the fold starting from the absent bundle.

use greenhouse::bundle::{Bundle, Mount, MountOptions};
use greenhouse::error::Error;
use greenhouse::pipeline::{BundlePipeline, BundleRule};
use greenhouse::spec::DesiredContainerSpec;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// A rule double that records the bundles it receives and returns a
/// configured bundle.
struct RecordingRule {
    received: Arc<Mutex<Vec<Option<Bundle>>>>,
    returns: Bundle,
}

impl RecordingRule {
    fn returning(returns: Bundle) -> (Self, Arc<Mutex<Vec<Option<Bundle>>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                received: Arc::clone(&received),
                returns,
            },
            received,
        )
    }
}

impl BundleRule for RecordingRule {
    fn apply(&self, bundle: Option<Bundle>, _spec: &DesiredContainerSpec) -> Bundle {
        self.received.lock().unwrap().push(bundle);
        self.returns.clone()
    }
}

fn bundle_with_mount(name: &str) -> Bundle {
    Bundle::new().with_mount(
        Mount {
            destination: PathBuf::from("/dest"),
            name: name.to_string(),
        },
        MountOptions {
            fs_type: "bind".to_string(),
            source: PathBuf::from("/src"),
            options: vec!["bind".to_string()],
        },
    )
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_empty_pipeline_is_rejected() {
    let result = BundlePipeline::new(Vec::new());
    assert!(matches!(result, Err(Error::EmptyPipeline)));
}

#[test]
fn test_pipeline_reports_rule_count() {
    let (rule, _) = RecordingRule::returning(Bundle::new());
    let pipeline = BundlePipeline::new(vec![Box::new(rule)]).unwrap();
    assert_eq!(pipeline.len(), 1);
    assert!(!pipeline.is_empty());
}

// =============================================================================
// Single Rule
// =============================================================================

#[test]
fn test_single_rule_receives_absent_bundle() {
    let (rule, received) = RecordingRule::returning(Bundle::new());
    let pipeline = BundlePipeline::new(vec![Box::new(rule)]).unwrap();

    pipeline.generate(&DesiredContainerSpec::default());

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1, "rule should be invoked exactly once");
    assert_eq!(received[0], None, "first rule must see the absent bundle");
}

#[test]
fn test_single_rule_output_is_returned_directly() {
    let expected = Bundle::new().with_rootfs("/some/rootfs");
    let (rule, _) = RecordingRule::returning(expected.clone());
    let pipeline = BundlePipeline::new(vec![Box::new(rule)]).unwrap();

    let result = pipeline.generate(&DesiredContainerSpec::default());
    assert_eq!(result, expected);
}

#[test]
fn test_rule_receives_the_spec() {
    struct SpecAssertingRule;
    impl BundleRule for SpecAssertingRule {
        fn apply(&self, _bundle: Option<Bundle>, spec: &DesiredContainerSpec) -> Bundle {
            assert_eq!(spec.rootfs_path, PathBuf::from("the-rootfs"));
            Bundle::new()
        }
    }

    let pipeline = BundlePipeline::new(vec![Box::new(SpecAssertingRule)]).unwrap();
    pipeline.generate(&DesiredContainerSpec {
        rootfs_path: PathBuf::from("the-rootfs"),
        ..DesiredContainerSpec::default()
    });
}

// =============================================================================
// Multiple Rules
// =============================================================================

#[test]
fn test_all_rules_are_invoked_once_in_order() {
    let (rule_a, received_a) = RecordingRule::returning(bundle_with_mount("from-a"));
    let (rule_b, received_b) = RecordingRule::returning(bundle_with_mount("from-b"));
    let pipeline = BundlePipeline::new(vec![Box::new(rule_a), Box::new(rule_b)]).unwrap();

    pipeline.generate(&DesiredContainerSpec::default());

    assert_eq!(received_a.lock().unwrap().len(), 1);
    assert_eq!(received_b.lock().unwrap().len(), 1);
}

#[test]
fn test_each_rule_receives_previous_rule_output() {
    let from_a = bundle_with_mount("from-a");
    let (rule_a, _) = RecordingRule::returning(from_a.clone());
    let (rule_b, received_b) = RecordingRule::returning(Bundle::new());
    let pipeline = BundlePipeline::new(vec![Box::new(rule_a), Box::new(rule_b)]).unwrap();

    pipeline.generate(&DesiredContainerSpec::default());

    let received_b = received_b.lock().unwrap();
    assert_eq!(received_b[0], Some(from_a));
}

#[test]
fn test_last_rule_output_is_the_result() {
    let from_b = bundle_with_mount("from-b");
    let (rule_a, _) = RecordingRule::returning(bundle_with_mount("from-a"));
    let (rule_b, _) = RecordingRule::returning(from_b.clone());
    let pipeline = BundlePipeline::new(vec![Box::new(rule_a), Box::new(rule_b)]).unwrap();

    let result = pipeline.generate(&DesiredContainerSpec::default());
    assert_eq!(result, from_b);
}
