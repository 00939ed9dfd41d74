// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Containment hierarchy flattening
//!
//! Walks the aggregation graph from the project root into an ordered,
//! depth-annotated row sequence. The parent-to-children index is built
//! once per invocation from the flat relation set and discarded afterwards.

use ifc_report_model::{attrs, DecodedEntity, EntityId, EntityResolver, IfcType};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// One node of the flattened containment tree
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HierarchyRow {
    /// Entity kind name
    pub kind: String,
    /// Display name (name, falling back to long name, then to GlobalId)
    pub name: String,
    /// 0-based distance from the root
    pub depth: usize,
    /// "/"-joined chain of `kind:name` from the root to this node
    pub path: String,
}

/// Flatten the containment tree rooted at the project node
///
/// Pre-order depth-first walk over the aggregation relations, children in
/// relation-declaration order. No root yields an empty sequence. A
/// revisited node means the aggregation graph is cyclic; the revisit is
/// logged and skipped.
pub fn flatten_hierarchy(resolver: &dyn EntityResolver) -> Vec<HierarchyRow> {
    // parent -> ordered children, concatenated across relations
    let mut children: FxHashMap<EntityId, Vec<EntityId>> = FxHashMap::default();
    for rel in resolver.entities_by_type(&IfcType::IfcRelAggregates) {
        let Some(parent) = rel.get_ref(attrs::rel_aggregates::RELATING_OBJECT) else {
            continue;
        };
        let Some(kids) = rel.get_refs(attrs::rel_aggregates::RELATED_OBJECTS) else {
            continue;
        };
        children.entry(parent).or_default().extend(kids);
    }

    let projects = resolver.entities_by_type(&IfcType::IfcProject);
    let Some(root) = projects.first() else {
        return Vec::new();
    };
    if projects.len() > 1 {
        log::warn!("model declares {} project roots, walking the first", projects.len());
    }

    // Explicit work stack; depth is bounded by memory, not the call stack
    let mut rows = Vec::new();
    let mut visited: FxHashSet<EntityId> = FxHashSet::default();
    let mut stack: Vec<(EntityId, usize, String)> = vec![(root.id, 0, String::new())];

    while let Some((id, depth, parent_path)) = stack.pop() {
        if !visited.insert(id) {
            log::warn!("aggregation cycle at {id}, skipping revisit");
            continue;
        }
        let Some(entity) = resolver.get(id) else {
            continue;
        };

        let kind = entity.ifc_type.name().to_string();
        let name = display_name(&entity);
        let path = if parent_path.is_empty() {
            format!("{kind}:{name}")
        } else {
            format!("{parent_path}/{kind}:{name}")
        };

        rows.push(HierarchyRow {
            kind,
            name,
            depth,
            path: path.clone(),
        });

        if let Some(kids) = children.get(&id) {
            // Reversed push keeps pre-order emission in list order
            for kid in kids.iter().rev() {
                stack.push((*kid, depth + 1, path.clone()));
            }
        }
    }

    rows
}

/// Display name: Name, else LongName where the kind declares one, else GlobalId
fn display_name(entity: &DecodedEntity) -> String {
    if let Some(name) = entity.get_string(attrs::NAME) {
        if !name.is_empty() {
            return name.to_string();
        }
    }
    if let Some(index) = attrs::long_name_index(&entity.ifc_type) {
        if let Some(long_name) = entity.get_string(index) {
            if !long_name.is_empty() {
                return long_name.to_string();
            }
        }
    }
    entity.get_string(attrs::GLOBAL_ID).unwrap_or_default().to_string()
}
