// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storey level extraction
//!
//! Lists the building storeys of a model with their local elevation in
//! metres and, when the project origin carries a height, the absolute
//! elevation obtained by offsetting against it.

use crate::spatial::GlobalOrigin;
use ifc_report_model::{attrs, EntityResolver, IfcType};
use serde::Serialize;

/// One building storey
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LevelRow {
    /// Storey name, unset when the occurrence declares none
    pub name: Option<String>,
    /// Elevation relative to the project origin, in metres
    pub local_m: Option<f64>,
    /// Elevation offset by the global origin height, in metres
    pub absolute_m: Option<f64>,
}

/// Extract the storeys of a model, ordered by ascending local elevation
///
/// The absolute elevation is only set when both the storey elevation and
/// the origin height are known. Storeys without an elevation sort as 0.
pub fn extract_levels(
    resolver: &dyn EntityResolver,
    unit_scale: f64,
    origin: &GlobalOrigin,
) -> Vec<LevelRow> {
    let mut rows: Vec<LevelRow> = resolver
        .entities_by_type(&IfcType::IfcBuildingStorey)
        .iter()
        .map(|storey| {
            let local_m = storey
                .get_float(attrs::storey::ELEVATION)
                .map(|v| v * unit_scale);
            LevelRow {
                name: storey.get_string(attrs::NAME).map(str::to_string),
                local_m,
                absolute_m: match (local_m, origin.z_m) {
                    (Some(local), Some(z)) => Some(local + z),
                    _ => None,
                },
            }
        })
        .collect();

    // Stable sort keeps declaration order among equal elevations
    rows.sort_by(|a, b| {
        a.local_m
            .unwrap_or(0.0)
            .total_cmp(&b.local_m.unwrap_or(0.0))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_report_model::IfcModel;
    use ifc_report_parser::ParsedModel;

    fn model_of(data_section: &str) -> ParsedModel {
        let content = format!(
            "ISO-10303-21;\nHEADER;\nFILE_SCHEMA(('IFC4'));\nENDSEC;\nDATA;\n{data_section}ENDSEC;\nEND-ISO-10303-21;\n"
        );
        ParsedModel::parse(&content).unwrap()
    }

    const STOREYS: &str = "\
#1=IFCBUILDINGSTOREY('a',$,'R+1',$,$,$,$,$,.ELEMENT.,3000.);
#2=IFCBUILDINGSTOREY('b',$,'RDC',$,$,$,$,$,.ELEMENT.,0.);
#3=IFCBUILDINGSTOREY('c',$,'SS1',$,$,$,$,$,.ELEMENT.,-2800.);
";

    #[test]
    fn test_sorted_by_local_elevation() {
        let model = model_of(STOREYS);
        let levels = extract_levels(model.resolver(), 0.001, &GlobalOrigin::default());

        let names: Vec<&str> = levels.iter().filter_map(|l| l.name.as_deref()).collect();
        assert_eq!(names, ["SS1", "RDC", "R+1"]);
        assert!((levels[0].local_m.unwrap() + 2.8).abs() < 1e-9);
        assert!((levels[2].local_m.unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_absolute_requires_origin_height() {
        let model = model_of(STOREYS);

        let without = extract_levels(model.resolver(), 0.001, &GlobalOrigin::default());
        assert!(without.iter().all(|l| l.absolute_m.is_none()));

        let origin = GlobalOrigin {
            z_m: Some(120.0),
            ..Default::default()
        };
        let with = extract_levels(model.resolver(), 0.001, &origin);
        assert!((with[1].absolute_m.unwrap() - 120.0).abs() < 1e-9);
        assert!((with[2].absolute_m.unwrap() - 123.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_elevation_sorts_as_zero() {
        let data = "\
#1=IFCBUILDINGSTOREY('a',$,'Haut',$,$,$,$,$,.ELEMENT.,5000.);
#2=IFCBUILDINGSTOREY('b',$,'Sans',$,$,$,$,$,.ELEMENT.,$);
#3=IFCBUILDINGSTOREY('c',$,'Bas',$,$,$,$,$,.ELEMENT.,-1000.);
";
        let model = model_of(data);
        let origin = GlobalOrigin {
            z_m: Some(10.0),
            ..Default::default()
        };
        let levels = extract_levels(model.resolver(), 0.001, &origin);

        let names: Vec<&str> = levels.iter().filter_map(|l| l.name.as_deref()).collect();
        assert_eq!(names, ["Bas", "Sans", "Haut"]);
        assert_eq!(levels[1].local_m, None);
        assert_eq!(levels[1].absolute_m, None);
    }

    #[test]
    fn test_unnamed_storey_keeps_name_unset() {
        let data = "#1=IFCBUILDINGSTOREY('a',$,$,$,$,$,$,$,.ELEMENT.,0.);\n";
        let model = model_of(data);
        let levels = extract_levels(model.resolver(), 1.0, &GlobalOrigin::default());
        assert_eq!(levels[0].name, None);
    }

    #[test]
    fn test_no_storeys() {
        let model = model_of("#1=IFCWALL('g',$,'W',$,$,$,$,$);\n");
        assert!(extract_levels(model.resolver(), 1.0, &GlobalOrigin::default()).is_empty());
    }
}
