//! Shared catalog state: the descriptor set and the current index snapshot.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::index::{EndpointIndex, IndexBuilder};
use crate::loader::DocumentLoader;
use crate::model::ServiceDescriptor;

/// Owns the fixed service list and the current [`EndpointIndex`].
///
/// The index starts empty and is replaced wholesale by [`Self::rebuild`]:
/// a new index is built off to the side and published by swapping the `Arc`,
/// so readers never observe a partially built index. Reads take a snapshot
/// and need no further locking.
pub struct ApiCatalog {
    descriptors: Vec<ServiceDescriptor>,
    builder: IndexBuilder,
    index: RwLock<Arc<EndpointIndex>>,
}

impl ApiCatalog {
    #[must_use]
    pub fn new(descriptors: Vec<ServiceDescriptor>, loader: DocumentLoader) -> Self {
        Self {
            descriptors,
            builder: IndexBuilder::new(loader),
            index: RwLock::new(Arc::new(EndpointIndex::default())),
        }
    }

    #[must_use]
    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    /// Snapshot of the current index.
    pub async fn index(&self) -> Arc<EndpointIndex> {
        Arc::clone(&*self.index.read().await)
    }

    /// Builds a complete new index and publishes it atomically.
    pub async fn rebuild(&self) -> Arc<EndpointIndex> {
        let next = Arc::new(self.builder.build(&self.descriptors).await);
        *self.index.write().await = Arc::clone(&next);
        next
    }
}
