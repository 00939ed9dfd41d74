// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unit scale extraction
//!
//! Determines the linear-unit scale factor of a model: 0.001 when lengths
//! are declared in millimetres, 1.0 otherwise. Unit-resolution failure is
//! non-fatal and silently degrades to "assume metres".

use ifc_report_model::{attrs, EntityResolver, IfcType};

/// Millimetres to metres
pub const MILLIMETRE: f64 = 0.001;
/// Metres to metres (identity, also the fallback)
pub const METRE: f64 = 1.0;

/// Extract the length-unit scale factor from a model
///
/// Looks up the unit assignment's SI length unit; a MILLI prefix yields
/// 0.001, anything else (including a missing or malformed assignment)
/// yields 1.0.
pub fn extract_unit_scale(resolver: &dyn EntityResolver) -> f64 {
    let assignments = resolver.entities_by_type(&IfcType::IfcUnitAssignment);
    let Some(assignment) = assignments.first() else {
        log::debug!("no unit assignment, assuming metres");
        return METRE;
    };

    let Some(units) = assignment.get_list(attrs::unit_assignment::UNITS) else {
        return METRE;
    };

    for unit_attr in units {
        let Some(unit) = resolver.resolve_ref(unit_attr) else {
            continue;
        };
        if unit.ifc_type != IfcType::IfcSIUnit {
            continue;
        }
        if unit.get_enum(attrs::si_unit::UNIT_TYPE) != Some("LENGTHUNIT") {
            continue;
        }
        if unit.get_enum(attrs::si_unit::NAME) != Some("METRE") {
            continue;
        }
        return match unit.get_enum(attrs::si_unit::PREFIX) {
            Some("MILLI") => MILLIMETRE,
            _ => METRE,
        };
    }

    METRE
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_report_parser::ParsedModel;
    use ifc_report_model::IfcModel;

    fn scale_of(data_section: &str) -> f64 {
        let content = format!(
            "ISO-10303-21;\nHEADER;\nFILE_SCHEMA(('IFC4'));\nENDSEC;\nDATA;\n{data_section}ENDSEC;\nEND-ISO-10303-21;\n"
        );
        let model = ParsedModel::parse(&content).unwrap();
        extract_unit_scale(model.resolver())
    }

    #[test]
    fn test_millimetre_model() {
        let scale = scale_of(
            "#1=IFCUNITASSIGNMENT((#2));\n#2=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);\n",
        );
        assert!((scale - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_metre_model() {
        let scale =
            scale_of("#1=IFCUNITASSIGNMENT((#2));\n#2=IFCSIUNIT(*,.LENGTHUNIT.,$,.METRE.);\n");
        assert!((scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_assignment_falls_back() {
        let scale = scale_of("#1=IFCWALL('g',$,'W',$,$,$,$,$);\n");
        assert!((scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_unit_falls_back() {
        // Units list references a non-unit entity
        let scale = scale_of("#1=IFCUNITASSIGNMENT((#2));\n#2=IFCWALL('g',$,'W',$,$,$,$,$);\n");
        assert!((scale - 1.0).abs() < 1e-12);
    }
}
