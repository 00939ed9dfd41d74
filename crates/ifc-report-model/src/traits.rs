// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core traits for model access
//!
//! The report pipeline works against these traits so that table derivation
//! never depends on a concrete parser backend.

use crate::{AttributeValue, DecodedEntity, EntityId, IfcType, ModelMetadata};
use std::sync::Arc;

/// Entity lookup and reference resolution
///
/// Provides read-only access to the decoded entity graph. `entities_by_type`
/// returns instances in file declaration order, which the hierarchy
/// flattener relies on for deterministic child ordering.
pub trait EntityResolver: Send + Sync {
    /// Get an entity by ID, or `None` if the ID is unknown or malformed
    fn get(&self, id: EntityId) -> Option<Arc<DecodedEntity>>;

    /// Resolve an attribute value to an entity, if it is a reference
    fn resolve_ref(&self, attr: &AttributeValue) -> Option<Arc<DecodedEntity>>;

    /// All instances of the given kind, in file declaration order
    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<Arc<DecodedEntity>>;

    /// IDs of every entity in the model (unordered)
    fn all_ids(&self) -> Vec<EntityId>;
}

/// Read-only access to a parsed IFC model
///
/// The model is immutable for the duration of processing and thread-safe
/// (`Send + Sync`), so a future implementation may parallelize per-file
/// table derivation without changing this seam.
pub trait IfcModel: Send + Sync {
    /// Get entity resolver for lookups and reference resolution
    fn resolver(&self) -> &dyn EntityResolver;

    /// Get file metadata (schema identifier, header file name)
    fn metadata(&self) -> &ModelMetadata;
}
