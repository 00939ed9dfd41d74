// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Product entity aggregation
//!
//! Counts placeable products grouped by kind and sub-classification. The
//! sub-classification prefers the kind's PredefinedType enumeration and
//! falls back to the free-text ObjectType.

use ifc_report_model::{attrs, DecodedEntity, EntityResolver};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// One aggregated (kind, subtype) bucket
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntityCount {
    /// Entity kind name
    pub kind: String,
    /// Sub-classification, unset when the occurrence declares none
    pub subtype: Option<String>,
    /// Number of occurrences in the bucket
    pub count: usize,
}

/// Count every product occurrence, bucketed by kind and subtype
///
/// Ordered by descending count, then kind, then subtype, so the dominant
/// buckets lead and equal counts stay deterministic.
pub fn count_entities(resolver: &dyn EntityResolver) -> Vec<EntityCount> {
    let mut buckets: FxHashMap<(String, Option<String>), usize> = FxHashMap::default();

    for id in resolver.all_ids() {
        let Some(entity) = resolver.get(id) else {
            continue;
        };
        if !entity.ifc_type.is_product() {
            continue;
        }
        let key = (entity.ifc_type.name().to_string(), subtype_of(&entity));
        *buckets.entry(key).or_insert(0) += 1;
    }

    let mut counts: Vec<EntityCount> = buckets
        .into_iter()
        .map(|((kind, subtype), count)| EntityCount { kind, subtype, count })
        .collect();
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.kind.cmp(&b.kind))
            .then_with(|| a.subtype.cmp(&b.subtype))
    });
    counts
}

/// Sub-classification: PredefinedType enum first, ObjectType text second
///
/// NOTDEFINED is kept verbatim; writers use it deliberately and collapsing
/// it into "no subtype" would merge distinct buckets.
fn subtype_of(entity: &DecodedEntity) -> Option<String> {
    if let Some(index) = attrs::predefined_type_index(&entity.ifc_type) {
        if let Some(value) = entity.get_enum(index) {
            return Some(value.to_string());
        }
    }
    match entity.get_string(attrs::OBJECT_TYPE) {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ => None,
    }
}
