//! Handle-bound container facade.
//!
//! [`Container`] is the stateless object returned by
//! [`Provisioner::lookup`](crate::provisioner::Provisioner::lookup). It holds
//! no state of its own beyond the handle: every operation delegates to the
//! collaborator keyed by that handle. Constructing one performs no existence
//! check — operations on a handle that was never created simply fail on
//! first use with the collaborator's error.

use crate::error::Result;
use crate::spec::{NetOutRule, Properties};
use crate::traits::{
    Containerizer, Networker, OutStream, Process, ProcessIo, ProcessSpec, PropertyManager,
    TarStream,
};
use std::sync::Arc;

/// A stateless facade for per-container operations.
#[derive(Clone)]
pub struct Container {
    handle: String,
    containerizer: Arc<dyn Containerizer>,
    networker: Arc<dyn Networker>,
    property_manager: Arc<dyn PropertyManager>,
}

impl Container {
    pub(crate) fn new(
        handle: String,
        containerizer: Arc<dyn Containerizer>,
        networker: Arc<dyn Networker>,
        property_manager: Arc<dyn PropertyManager>,
    ) -> Self {
        Self {
            handle,
            containerizer,
            networker,
            property_manager,
        }
    }

    /// The container's handle.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    // =========================================================================
    // Filesystem Streaming
    // =========================================================================

    /// Streams a tar archive into the container at `destination`.
    pub async fn stream_in(&self, destination: &str, archive: TarStream) -> Result<()> {
        self.containerizer
            .stream_in(&self.handle, destination, archive)
            .await
    }

    /// Streams the file or directory at `source` out of the container.
    pub async fn stream_out(&self, source: &str) -> Result<OutStream> {
        self.containerizer.stream_out(&self.handle, source).await
    }

    // =========================================================================
    // Processes
    // =========================================================================

    /// Runs a process in the container.
    pub async fn run(&self, spec: ProcessSpec, io: ProcessIo) -> Result<Box<dyn Process>> {
        self.containerizer.run(&self.handle, spec, io).await
    }

    // =========================================================================
    // Networking
    // =========================================================================

    /// Maps a host port to a container port; 0 requests auto-assignment.
    pub async fn net_in(&self, host_port: u16, container_port: u16) -> Result<(u16, u16)> {
        self.networker
            .net_in(&self.handle, host_port, container_port)
            .await
    }

    /// Applies an outbound traffic rule.
    pub async fn net_out(&self, rule: NetOutRule) -> Result<()> {
        self.networker.net_out(&self.handle, rule).await
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// All properties attached to the container.
    pub fn properties(&self) -> Result<Properties> {
        self.property_manager.all(&self.handle)
    }

    /// Reads a single property.
    pub fn property(&self, name: &str) -> Result<String> {
        self.property_manager.get(&self.handle, name)
    }

    /// Sets a property.
    pub fn set_property(&self, name: &str, value: &str) -> Result<()> {
        self.property_manager.set(&self.handle, name, value)
    }

    /// Removes a property.
    pub fn remove_property(&self, name: &str) -> Result<()> {
        self.property_manager.remove(&self.handle, name)
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("handle", &self.handle)
            .finish()
    }
}
