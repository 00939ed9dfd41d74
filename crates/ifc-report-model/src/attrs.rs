// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute positions for the entity kinds the pipeline reads
//!
//! STEP attributes are positional and the positions are schema-dependent.
//! The pipeline only reads a handful of optional fields, so each one is
//! named here once and accessed through `DecodedEntity::get_*`, which
//! returns `None` whenever a schema variant has a shorter attribute list.

use crate::types::IfcType;

/// GlobalId for all rooted entities
pub const GLOBAL_ID: usize = 0;
/// Name for all rooted entities
pub const NAME: usize = 2;
/// ObjectType free-text sub-classification for object occurrences
pub const OBJECT_TYPE: usize = 4;

/// IFCPROJECT positions
pub mod project {
    pub const LONG_NAME: usize = 5;
    pub const UNITS_IN_CONTEXT: usize = 8;
}

/// Positions shared by spatial structure elements (site, building, storey, space)
pub mod spatial {
    pub const OBJECT_PLACEMENT: usize = 5;
    pub const LONG_NAME: usize = 7;
}

/// IFCSITE positions
pub mod site {
    pub const REF_LATITUDE: usize = 9;
    pub const REF_LONGITUDE: usize = 10;
    pub const REF_ELEVATION: usize = 11;
}

/// IFCBUILDINGSTOREY positions
pub mod storey {
    pub const ELEVATION: usize = 9;
}

/// IFCRELAGGREGATES positions
pub mod rel_aggregates {
    pub const RELATING_OBJECT: usize = 4;
    pub const RELATED_OBJECTS: usize = 5;
}

/// IFCUNITASSIGNMENT positions
pub mod unit_assignment {
    pub const UNITS: usize = 0;
}

/// IFCSIUNIT positions
pub mod si_unit {
    pub const UNIT_TYPE: usize = 1;
    pub const PREFIX: usize = 2;
    pub const NAME: usize = 3;
}

/// IFCMAPCONVERSION positions
pub mod map_conversion {
    pub const EASTINGS: usize = 2;
    pub const NORTHINGS: usize = 3;
    pub const ORTHOGONAL_HEIGHT: usize = 4;
}

/// IFCLOCALPLACEMENT positions
pub mod local_placement {
    pub const RELATIVE_PLACEMENT: usize = 1;
}

/// IFCAXIS2PLACEMENT3D positions
pub mod axis2_placement {
    pub const LOCATION: usize = 0;
}

/// IFCCARTESIANPOINT positions
pub mod cartesian_point {
    pub const COORDINATES: usize = 0;
}

/// Position of the LongName attribute, for kinds that declare one
pub fn long_name_index(ifc_type: &IfcType) -> Option<usize> {
    match ifc_type {
        IfcType::IfcProject => Some(project::LONG_NAME),
        IfcType::IfcSite
        | IfcType::IfcBuilding
        | IfcType::IfcBuildingStorey
        | IfcType::IfcSpace => Some(spatial::LONG_NAME),
        _ => None,
    }
}

/// Position of the PredefinedType attribute, for product kinds that declare one
///
/// Positions are the IFC4 ones. IFC2X3 occurrences without the attribute
/// simply have shorter attribute lists, so the lookup degrades to `None`
/// through the bounds-checked accessors.
pub fn predefined_type_index(ifc_type: &IfcType) -> Option<usize> {
    match ifc_type {
        IfcType::IfcWall
        | IfcType::IfcWallStandardCase
        | IfcType::IfcCurtainWall
        | IfcType::IfcSlab
        | IfcType::IfcRoof
        | IfcType::IfcBeam
        | IfcType::IfcColumn
        | IfcType::IfcStair
        | IfcType::IfcRamp
        | IfcType::IfcRampFlight
        | IfcType::IfcRailing
        | IfcType::IfcCovering
        | IfcType::IfcPlate
        | IfcType::IfcMember
        | IfcType::IfcFooting
        | IfcType::IfcPile
        | IfcType::IfcBuildingElementProxy
        | IfcType::IfcOpeningElement
        | IfcType::IfcFurniture
        | IfcType::IfcSystemFurnitureElement => Some(8),
        IfcType::IfcSpace => Some(9),
        IfcType::IfcDoor | IfcType::IfcWindow => Some(10),
        IfcType::IfcStairFlight => Some(12),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_name_positions() {
        assert_eq!(long_name_index(&IfcType::IfcProject), Some(5));
        assert_eq!(long_name_index(&IfcType::IfcBuildingStorey), Some(7));
        assert_eq!(long_name_index(&IfcType::IfcWall), None);
    }

    #[test]
    fn test_predefined_type_positions() {
        assert_eq!(predefined_type_index(&IfcType::IfcWall), Some(8));
        assert_eq!(predefined_type_index(&IfcType::IfcDoor), Some(10));
        assert_eq!(predefined_type_index(&IfcType::IfcFlowTerminal), None);
        assert_eq!(predefined_type_index(&IfcType::IfcBuildingStorey), None);
    }
}
