// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Report assembly
//!
//! Turns one parsed model into the four-sheet report workbook: a summary
//! of file and georeferencing facts, the storey levels, the flattened
//! containment tree and the aggregated entity counts.

use crate::entities::count_entities;
use crate::hierarchy::flatten_hierarchy;
use crate::levels::extract_levels;
use crate::spatial::{resolve_geo_reference, resolve_global_origin};
use crate::units::extract_unit_scale;
use crate::workbook::{CellStyle, CellValue, Sheet, StyledCell, Workbook};
use ifc_report_model::IfcModel;
use std::path::Path;

/// Entity kind flagged for review on the entity sheet
const REVIEW_KIND: &str = "IFCBUILDINGELEMENTPROXY";

/// Assemble the report workbook for one model
///
/// `size_bytes` is the on-disk size of the source file; it only feeds the
/// summary sheet, so callers without a real file can pass 0.
pub fn build_report(model: &dyn IfcModel, source: &Path, size_bytes: u64) -> Workbook {
    let resolver = model.resolver();
    let scale = extract_unit_scale(resolver);
    let geo = resolve_geo_reference(resolver);
    let origin = resolve_global_origin(resolver, scale);

    let mut workbook = Workbook::new();

    // Résumé
    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let summary: Vec<(&str, CellValue)> = vec![
        ("fichier", CellValue::text(file_name)),
        ("taille", CellValue::text(human_readable_size(size_bytes))),
        ("schéma", CellValue::text(model.metadata().schema_version.as_str())),
        ("X_global_m", float_or_empty(origin.x_m)),
        ("Y_global_m", float_or_empty(origin.y_m)),
        ("Z_global_m", float_or_empty(origin.z_m)),
        ("latitude", float_or_empty(geo.latitude)),
        ("longitude", float_or_empty(geo.longitude)),
        ("elevation_m", float_or_empty(geo.elevation_m)),
    ];
    workbook.push_sheet(Sheet {
        name: "Résumé".to_string(),
        table_name: "ResumeTbl".to_string(),
        columns: vec!["Propriété".to_string(), "Valeur".to_string()],
        rows: summary
            .into_iter()
            .map(|(key, value)| {
                vec![
                    StyledCell::new(CellValue::text(key)),
                    StyledCell::new(value),
                ]
            })
            .collect(),
    });

    // Niveaux
    let levels = extract_levels(resolver, scale, &origin);
    workbook.push_sheet(Sheet {
        name: "Niveaux".to_string(),
        table_name: "NiveauxTbl".to_string(),
        columns: vec![
            "Nom".to_string(),
            "Altimétrie locale (m)".to_string(),
            "Altimétrie NGF (m)".to_string(),
        ],
        rows: levels
            .into_iter()
            .map(|level| {
                vec![
                    StyledCell::new(text_or_empty(level.name)),
                    StyledCell::new(float_or_empty(level.local_m)),
                    StyledCell::new(float_or_empty(level.absolute_m)),
                ]
            })
            .collect(),
    });

    // Arborescence
    let tree = flatten_hierarchy(resolver);
    workbook.push_sheet(Sheet {
        name: "Arborescence".to_string(),
        table_name: "ArborescenceTbl".to_string(),
        columns: vec![
            "Type".to_string(),
            "Nom".to_string(),
            "Profondeur".to_string(),
            "Chemin".to_string(),
        ],
        rows: tree
            .into_iter()
            .map(|node| {
                vec![
                    StyledCell::new(CellValue::text(node.kind)),
                    StyledCell::new(CellValue::text(node.name)),
                    StyledCell::new(CellValue::Int(node.depth as i64)),
                    StyledCell::new(CellValue::text(node.path)),
                ]
            })
            .collect(),
    });

    // Entités, with proxy rows flagged for review
    let counts = count_entities(resolver);
    workbook.push_sheet(Sheet {
        name: "Entités".to_string(),
        table_name: "EntitesTbl".to_string(),
        columns: vec![
            "Entité IFC".to_string(),
            "Type".to_string(),
            "Nombre".to_string(),
        ],
        rows: counts
            .into_iter()
            .map(|bucket| {
                let flagged = bucket.kind == REVIEW_KIND;
                let style = if flagged {
                    CellStyle::Warning
                } else {
                    CellStyle::Default
                };
                let subtype = bucket.subtype.unwrap_or_else(|| "—".to_string());
                let mut row = vec![
                    StyledCell::styled(CellValue::text(bucket.kind), style),
                    StyledCell::styled(CellValue::text(subtype), style),
                    StyledCell::styled(CellValue::Int(bucket.count as i64), style),
                ];
                if flagged {
                    row.push(StyledCell::styled(
                        CellValue::text("Attention"),
                        CellStyle::WarningNote,
                    ));
                }
                row
            })
            .collect(),
    });

    workbook
}

fn float_or_empty(value: Option<f64>) -> CellValue {
    value.map(CellValue::Float).unwrap_or(CellValue::Empty)
}

fn text_or_empty(value: Option<String>) -> CellValue {
    value.map(CellValue::Text).unwrap_or(CellValue::Empty)
}

/// Format a byte count with 1024-based units and one decimal
pub fn human_readable_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if value < 1024.0 {
            return format!("{value:3.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:3.1} PB")
}
