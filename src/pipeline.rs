//! Bundle pipeline: an ordered fold of pure transformation rules.
//!
//! The pipeline holds a build-time-configured, ordered list of
//! [`BundleRule`]s and folds them over an *absent* initial bundle:
//!
//! ```text
//! None ──rule₀──▶ bundle₀ ──rule₁──▶ bundle₁ ── … ──ruleₙ──▶ result
//! ```
//!
//! The first rule must be a seeding rule that produces a complete base
//! bundle while ignoring the absent input (see
//! [`BaseTemplateRule`](crate::rules::BaseTemplateRule)); every later rule
//! treats its input bundle as authoritative, touching only the fields it
//! owns. Rule order is configuration, never inferred, and an empty pipeline
//! is rejected at construction time.
//!
//! Rules are pure and allocation-only: no I/O, no shared mutable state.
//! Pipelines for different specs may run fully in parallel; a single
//! invocation is sequential because each rule's output is the next rule's
//! input.

use crate::bundle::Bundle;
use crate::error::{Error, Result};
use crate::spec::DesiredContainerSpec;

/// A stateless, deterministic bundle transformation.
///
/// `bundle` is `None` only for the first rule in a pipeline; a correctly
/// configured pipeline starts with a seeding rule that ignores it. Rules are
/// total over well-formed input — malformed specs are rejected by the
/// orchestrator before a pipeline ever runs.
pub trait BundleRule: Send + Sync {
    /// Derives a new bundle from the current bundle and the desired spec.
    fn apply(&self, bundle: Option<Bundle>, spec: &DesiredContainerSpec) -> Bundle;
}

/// An ordered, composable set of rules that generates container bundles.
pub struct BundlePipeline {
    rules: Vec<Box<dyn BundleRule>>,
}

impl BundlePipeline {
    /// Creates a pipeline from an ordered rule list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPipeline`] when `rules` is empty: with no
    /// seeding rule there is nothing to fold from.
    pub fn new(rules: Vec<Box<dyn BundleRule>>) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::EmptyPipeline);
        }
        Ok(Self { rules })
    }

    /// Number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false: empty pipelines cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Folds every rule, in order, over the absent initial bundle and
    /// returns the last rule's output.
    ///
    /// Each rule is invoked exactly once, receiving the exact bundle the
    /// previous rule returned.
    pub fn generate(&self, spec: &DesiredContainerSpec) -> Bundle {
        let mut bundle = None;
        for rule in &self.rules {
            bundle = Some(rule.apply(bundle, spec));
        }
        // new() guarantees at least one rule.
        bundle.expect("pipeline holds at least one rule")
    }
}
