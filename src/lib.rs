//! # greenhouse
//!
//! **Provisioning core for a Linux container backend**
//!
//! This crate turns a high-level "desired container" request into a fully
//! specified low-level bundle and a coordinated sequence of resource
//! acquisitions, with compensation on partial failure. It contains no
//! runtime of its own: the container runtime, network subsystem, volume
//! driver, property store, uid generation, and system introspection are all
//! collaborators consumed through the traits in [`traits`].
//!
//! # Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          Provisioner                             │
//! │   create ─▶ networker.hook ─▶ parse rootfs ─▶ volumes.create     │
//! │                │                                   │             │
//! │                ▼ (failure at any later step)       ▼             │
//! │        CompensationStack ◀──────────── containerizer.create      │
//! │        (unwound in reverse)                        │             │
//! └────────────────────────────────────────────────────┼─────────────┘
//!                                                      ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        BundlePipeline                            │
//! │  None ─▶ BaseTemplateRule ─▶ RootfsRule ─▶ NetworkHookRule       │
//! │                              ─▶ BindMountsRule ─▶ final bundle   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The bundle pipeline is an ordered fold of pure rules; the containerizer
//! runs it internally when realizing a [`DesiredContainerSpec`]. The
//! orchestrator itself is stateless — durable state lives entirely in the
//! collaborators, keyed by the container handle.
//!
//! # Failure Model
//!
//! | Phase | Policy |
//! |-------|--------|
//! | Create | Compensating: undo acquired resources in reverse order |
//! | Destroy | Fail-fast: fixed order, first error aborts the sequence |
//! | Listing | Per-handle failures logged and skipped |
//!
//! Compensation failures are logged, never escalated; callers always
//! receive the error that triggered the rollback.
//!
//! # Example
//!
//! ```rust,ignore
//! use greenhouse::{ContainerRequest, Provisioner};
//!
//! #[tokio::main]
//! async fn main() -> greenhouse::Result<()> {
//!     let provisioner = Provisioner { /* collaborators */ };
//!     provisioner.start()?;
//!
//!     let container = provisioner
//!         .create(ContainerRequest {
//!             rootfs: "docker:///alpine".to_string(),
//!             ..ContainerRequest::default()
//!         })
//!         .await?;
//!
//!     println!("created {}", container.handle());
//!     Ok(())
//! }
//! ```

pub mod bundle;
pub mod constants;
pub mod container;
pub mod error;
pub mod pipeline;
pub mod provisioner;
pub mod rootfs;
pub mod rules;
pub mod spec;
pub mod traits;

// Re-exports
pub use bundle::{Bundle, Mount, MountOptions, Namespace, PrestartHook};
pub use container::Container;
pub use error::{Error, Result};
pub use pipeline::{BundlePipeline, BundleRule};
pub use provisioner::{Compensation, CompensationStack, Provisioner};
pub use rootfs::{QuotaScope, RootfsLocator, VolumeSpec};
pub use rules::{BaseTemplateRule, BindMountsRule, NetworkHookRule, RootfsRule};
pub use spec::{
    BindMount, BindMountMode, Capacity, ContainerRequest, DesiredContainerSpec, Hook, NetOutRule,
    Properties, Protocol,
};
pub use traits::{
    Containerizer, Networker, OutStream, Process, ProcessIo, ProcessSpec, PropertyManager,
    Starter, SysInfoProvider, TarStream, UidGenerator, VolumeCreator,
};
