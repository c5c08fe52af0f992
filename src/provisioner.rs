//! Provisioning orchestrator.
//!
//! [`Provisioner`] sequences the network, volume, and containerizer
//! collaborators to realize a container, and to tear one down. It is
//! stateless across calls: all durable state lives in the collaborators, so
//! concurrent lifecycle operations for *different* handles are independent
//! by construction. Operations on the *same* handle are not coordinated
//! here — callers must keep at most one in flight per handle.
//!
//! # Failure behavior
//!
//! Create is compensating: an undo step is pushed onto a
//! [`CompensationStack`] as each resource is acquired, and on any later
//! failure the stack unwinds in reverse order before the original error is
//! returned. Compensation failures are logged, never escalated.
//!
//! Destroy is the opposite: a fixed fail-fast sequence (containerizer,
//! network, volume, properties) that aborts on the first error, leaving
//! later resources untouched. Callers retry Destroy to finish a partial
//! teardown. The asymmetry with Create is deliberate.

use crate::container::Container;
use crate::error::Result;
use crate::rootfs::{QuotaScope, RootfsLocator, VolumeSpec};
use crate::spec::{Capacity, ContainerRequest, DesiredContainerSpec, Properties};
use crate::traits::{
    Containerizer, Networker, PropertyManager, Starter, SysInfoProvider, UidGenerator,
    VolumeCreator,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

// =============================================================================
// Compensation
// =============================================================================

/// A single undoable acquisition made during create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    /// Tear down the handle's network resources.
    Network { handle: String },
    /// Remove the handle's volume.
    ///
    /// Not pushed by [`Provisioner::create`] today: containerizer destroy is
    /// expected to cover volume cleanup. Kept so the unwind mechanism stays
    /// general.
    Volume { handle: String },
}

/// Ordered undo log for acquired resources.
///
/// Steps are pushed as each acquisition succeeds; [`unwind`] executes them
/// in reverse order. Failures during unwind are logged and skipped — only
/// the error that triggered compensation reaches the caller.
///
/// [`unwind`]: CompensationStack::unwind
#[derive(Debug, Default)]
pub struct CompensationStack {
    steps: Vec<Compensation>,
}

impl CompensationStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an undo step for a successfully acquired resource.
    pub fn push(&mut self, step: Compensation) {
        self.steps.push(step);
    }

    /// Executes all recorded steps in reverse acquisition order.
    pub async fn unwind(self, networker: &dyn Networker, volumes: &dyn VolumeCreator) {
        for step in self.steps.into_iter().rev() {
            match step {
                Compensation::Network { handle } => {
                    if let Err(err) = networker.destroy(&handle).await {
                        warn!(handle = %handle, "network compensation failed: {}", err);
                    }
                }
                Compensation::Volume { handle } => {
                    if let Err(err) = volumes.destroy(&handle).await {
                        warn!(handle = %handle, "volume compensation failed: {}", err);
                    }
                }
            }
        }
    }
}

// =============================================================================
// Provisioner
// =============================================================================

/// Orchestrates the collaborators to implement the container lifecycle.
pub struct Provisioner {
    /// Reports total memory and disk.
    pub sys_info: Arc<dyn SysInfoProvider>,
    /// Runs and manages low-level containers.
    pub containerizer: Arc<dyn Containerizer>,
    /// Generates unique handles for containers.
    pub uid_generator: Arc<dyn UidGenerator>,
    /// Runs one-time backend start-up tasks.
    pub starter: Arc<dyn Starter>,
    /// Creates per-container networks.
    pub networker: Arc<dyn Networker>,
    /// Creates per-container rootfs volumes.
    pub volume_creator: Arc<dyn VolumeCreator>,
    /// Stores per-container properties.
    pub property_manager: Arc<dyn PropertyManager>,
}

impl Provisioner {
    /// Runs the backend's one-time start-up tasks.
    pub fn start(&self) -> Result<()> {
        self.starter.start()
    }

    /// Health check.
    pub fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Creates a container from a high-level request.
    ///
    /// Sequencing: handle generation (when the request carries none),
    /// network acquisition, rootfs reference parsing, volume creation, then
    /// containerizer create. A failure after network acquisition unwinds
    /// the compensation stack before returning the original error. On
    /// success the request's properties are attached via the returned
    /// facade, surfacing the first property error encountered.
    pub async fn create(&self, request: ContainerRequest) -> Result<Container> {
        let handle = match request.handle.as_deref() {
            Some(h) if !h.is_empty() => h.to_string(),
            _ => self.uid_generator.generate(),
        };
        info!(handle = %handle, "creating container");

        let mut compensations = CompensationStack::new();

        let hook = self.networker.hook(&handle, &request.network).await?;
        compensations.push(Compensation::Network {
            handle: handle.clone(),
        });

        let locator = match request.rootfs.parse::<RootfsLocator>() {
            Ok(locator) => locator,
            Err(err) => {
                self.unwind(compensations).await;
                return Err(err);
            }
        };

        let volume_spec = VolumeSpec {
            rootfs: locator,
            quota_bytes: request.disk_limit_bytes,
            quota_scope: QuotaScope::Exclusive,
        };
        // Extra driver mounts are not consumed by this core.
        let (rootfs_path, _extra_mounts) =
            match self.volume_creator.create(&handle, volume_spec).await {
                Ok(created) => created,
                Err(err) => {
                    self.unwind(compensations).await;
                    return Err(err);
                }
            };
        // No volume undo step here: containerizer destroy owns volume
        // cleanup from this point on.

        let spec = DesiredContainerSpec {
            handle: handle.clone(),
            rootfs_path,
            network_hook: Some(hook),
            bind_mounts: request.bind_mounts,
            privileged: request.privileged,
        };
        if let Err(err) = self.containerizer.create(spec).await {
            self.unwind(compensations).await;
            return Err(err);
        }

        let container = self.lookup(&handle)?;
        for (name, value) in &request.properties {
            container.set_property(name, value)?;
        }

        info!(handle = %handle, "container created");
        Ok(container)
    }

    /// Destroys a container.
    ///
    /// Fixed fail-fast order: containerizer state, network state, volume
    /// state, property namespace. The first failure aborts the sequence and
    /// is returned; later resources are left for a retry.
    pub async fn destroy(&self, handle: &str) -> Result<()> {
        info!(handle = %handle, "destroying container");

        self.containerizer.destroy(handle).await?;
        self.networker.destroy(handle).await?;
        self.volume_creator.destroy(handle).await?;
        self.property_manager.destroy_namespace(handle)?;

        info!(handle = %handle, "container destroyed");
        Ok(())
    }

    /// Returns a handle-bound facade.
    ///
    /// No existence check is performed: looking up an unknown handle
    /// succeeds, and the error surfaces on first use of the facade.
    pub fn lookup(&self, handle: &str) -> Result<Container> {
        Ok(Container::new(
            handle.to_string(),
            Arc::clone(&self.containerizer),
            Arc::clone(&self.networker),
            Arc::clone(&self.property_manager),
        ))
    }

    /// Lists containers whose properties match every entry of `filter`.
    ///
    /// A per-handle lookup failure is logged and the handle skipped; it
    /// never fails the overall call.
    pub async fn containers(&self, filter: &Properties) -> Result<Vec<Container>> {
        debug!("listing containers");

        let handles = self.containerizer.handles().await?;

        let mut containers = Vec::new();
        for handle in handles {
            if !self.property_manager.matches_all(&handle, filter) {
                continue;
            }
            match self.lookup(&handle) {
                Ok(container) => containers.push(container),
                Err(err) => {
                    warn!(handle = %handle, "lookup failed during listing: {}", err);
                }
            }
        }

        Ok(containers)
    }

    /// Aggregates total memory and disk from the sysinfo provider with the
    /// networker's maximum container count. Any memory/disk failure aborts
    /// the whole call.
    pub fn capacity(&self) -> Result<Capacity> {
        let memory_in_bytes = self.sys_info.total_memory()?;
        let disk_in_bytes = self.sys_info.total_disk()?;
        let max_containers = self.networker.capacity();

        Ok(Capacity {
            memory_in_bytes,
            disk_in_bytes,
            max_containers,
        })
    }

    async fn unwind(&self, compensations: CompensationStack) {
        compensations
            .unwind(self.networker.as_ref(), self.volume_creator.as_ref())
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::spec::{Hook, NetOutRule};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCollaborator {
        calls: Mutex<Vec<String>>,
        fail_network_destroy: bool,
    }

    impl RecordingCollaborator {
        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }
    }

    #[async_trait]
    impl Networker for RecordingCollaborator {
        async fn hook(&self, _handle: &str, _network_spec: &str) -> Result<Hook> {
            Ok(Hook::default())
        }

        fn capacity(&self) -> u64 {
            0
        }

        async fn destroy(&self, handle: &str) -> Result<()> {
            self.record(&format!("network-destroy:{}", handle));
            if self.fail_network_destroy {
                return Err(Error::Network {
                    handle: handle.to_string(),
                    reason: "boom".to_string(),
                });
            }
            Ok(())
        }

        async fn net_in(&self, _: &str, host: u16, container: u16) -> Result<(u16, u16)> {
            Ok((host, container))
        }

        async fn net_out(&self, _: &str, _: NetOutRule) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl VolumeCreator for RecordingCollaborator {
        async fn create(
            &self,
            _handle: &str,
            _spec: VolumeSpec,
        ) -> Result<(std::path::PathBuf, Vec<crate::spec::BindMount>)> {
            Ok((std::path::PathBuf::new(), Vec::new()))
        }

        async fn destroy(&self, handle: &str) -> Result<()> {
            self.record(&format!("volume-destroy:{}", handle));
            Ok(())
        }
    }

    #[tokio::test]
    async fn unwind_runs_steps_in_reverse_acquisition_order() {
        let collaborator = RecordingCollaborator::default();

        let mut stack = CompensationStack::new();
        stack.push(Compensation::Network {
            handle: "h".to_string(),
        });
        stack.push(Compensation::Volume {
            handle: "h".to_string(),
        });

        stack.unwind(&collaborator, &collaborator).await;

        let calls = collaborator.calls.lock().unwrap();
        assert_eq!(*calls, vec!["volume-destroy:h", "network-destroy:h"]);
    }

    #[tokio::test]
    async fn unwind_continues_past_failed_steps() {
        let collaborator = RecordingCollaborator {
            fail_network_destroy: true,
            ..RecordingCollaborator::default()
        };

        let mut stack = CompensationStack::new();
        stack.push(Compensation::Volume {
            handle: "h".to_string(),
        });
        stack.push(Compensation::Network {
            handle: "h".to_string(),
        });

        // Network destroy fails first; the volume step must still run.
        stack.unwind(&collaborator, &collaborator).await;

        let calls = collaborator.calls.lock().unwrap();
        assert_eq!(*calls, vec!["network-destroy:h", "volume-destroy:h"]);
    }
}
