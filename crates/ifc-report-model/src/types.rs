// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for decoded IFC data

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the raw STEP instance ID (e.g., #123 becomes EntityId(123))
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// IFC entity kind enumeration
///
/// Covers the kinds the report pipeline classifies: spatial structure,
/// placeable products, the aggregation relation, units, placement and map
/// conversion. Anything else is captured as [`IfcType::Unknown`] with its
/// original type name so entity counting never loses a kind.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IfcType {
    // Spatial structure
    IfcProject,
    IfcSite,
    IfcBuilding,
    IfcBuildingStorey,
    IfcSpace,

    // Building elements
    IfcWall,
    IfcWallStandardCase,
    IfcCurtainWall,
    IfcSlab,
    IfcRoof,
    IfcBeam,
    IfcColumn,
    IfcDoor,
    IfcWindow,
    IfcStair,
    IfcStairFlight,
    IfcRamp,
    IfcRampFlight,
    IfcRailing,
    IfcCovering,
    IfcPlate,
    IfcMember,
    IfcFooting,
    IfcPile,
    IfcBuildingElementProxy,

    // Distribution elements (MEP)
    IfcDistributionElement,
    IfcDistributionFlowElement,
    IfcFlowTerminal,
    IfcFlowSegment,
    IfcFlowFitting,
    IfcFlowController,
    IfcFlowMovingDevice,
    IfcFlowStorageDevice,
    IfcFlowTreatmentDevice,
    IfcEnergyConversionDevice,
    IfcDistributionControlElement,

    // Furnishing and equipment
    IfcFurnishingElement,
    IfcFurniture,
    IfcSystemFurnitureElement,

    // Openings and annotations
    IfcOpeningElement,
    IfcAnnotation,
    IfcGrid,

    // Relationships
    IfcRelAggregates,
    IfcRelContainedInSpatialStructure,

    // Units
    IfcUnitAssignment,
    IfcSIUnit,
    IfcConversionBasedUnit,
    IfcMeasureWithUnit,

    // Placement and georeferencing
    IfcLocalPlacement,
    IfcAxis2Placement3D,
    IfcCartesianPoint,
    IfcMapConversion,
    IfcProjectedCrs,

    /// Unknown kind - stores the original type name (uppercase)
    Unknown(String),
}

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl IfcType {
    /// Parse a STEP type name into an IfcType
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "IFCPROJECT" => IfcType::IfcProject,
            "IFCSITE" => IfcType::IfcSite,
            "IFCBUILDING" => IfcType::IfcBuilding,
            "IFCBUILDINGSTOREY" => IfcType::IfcBuildingStorey,
            "IFCSPACE" => IfcType::IfcSpace,

            "IFCWALL" => IfcType::IfcWall,
            "IFCWALLSTANDARDCASE" => IfcType::IfcWallStandardCase,
            "IFCCURTAINWALL" => IfcType::IfcCurtainWall,
            "IFCSLAB" => IfcType::IfcSlab,
            "IFCROOF" => IfcType::IfcRoof,
            "IFCBEAM" => IfcType::IfcBeam,
            "IFCCOLUMN" => IfcType::IfcColumn,
            "IFCDOOR" => IfcType::IfcDoor,
            "IFCWINDOW" => IfcType::IfcWindow,
            "IFCSTAIR" => IfcType::IfcStair,
            "IFCSTAIRFLIGHT" => IfcType::IfcStairFlight,
            "IFCRAMP" => IfcType::IfcRamp,
            "IFCRAMPFLIGHT" => IfcType::IfcRampFlight,
            "IFCRAILING" => IfcType::IfcRailing,
            "IFCCOVERING" => IfcType::IfcCovering,
            "IFCPLATE" => IfcType::IfcPlate,
            "IFCMEMBER" => IfcType::IfcMember,
            "IFCFOOTING" => IfcType::IfcFooting,
            "IFCPILE" => IfcType::IfcPile,
            "IFCBUILDINGELEMENTPROXY" => IfcType::IfcBuildingElementProxy,

            "IFCDISTRIBUTIONELEMENT" => IfcType::IfcDistributionElement,
            "IFCDISTRIBUTIONFLOWELEMENT" => IfcType::IfcDistributionFlowElement,
            "IFCFLOWTERMINAL" => IfcType::IfcFlowTerminal,
            "IFCFLOWSEGMENT" => IfcType::IfcFlowSegment,
            "IFCFLOWFITTING" => IfcType::IfcFlowFitting,
            "IFCFLOWCONTROLLER" => IfcType::IfcFlowController,
            "IFCFLOWMOVINGDEVICE" => IfcType::IfcFlowMovingDevice,
            "IFCFLOWSTORAGEDEVICE" => IfcType::IfcFlowStorageDevice,
            "IFCFLOWTREATMENTDEVICE" => IfcType::IfcFlowTreatmentDevice,
            "IFCENERGYCONVERSIONDEVICE" => IfcType::IfcEnergyConversionDevice,
            "IFCDISTRIBUTIONCONTROLELEMENT" => IfcType::IfcDistributionControlElement,

            "IFCFURNISHINGELEMENT" => IfcType::IfcFurnishingElement,
            "IFCFURNITURE" => IfcType::IfcFurniture,
            "IFCSYSTEMFURNITUREELEMENT" => IfcType::IfcSystemFurnitureElement,

            "IFCOPENINGELEMENT" => IfcType::IfcOpeningElement,
            "IFCANNOTATION" => IfcType::IfcAnnotation,
            "IFCGRID" => IfcType::IfcGrid,

            "IFCRELAGGREGATES" => IfcType::IfcRelAggregates,
            "IFCRELCONTAINEDINSPATIALSTRUCTURE" => IfcType::IfcRelContainedInSpatialStructure,

            "IFCUNITASSIGNMENT" => IfcType::IfcUnitAssignment,
            "IFCSIUNIT" => IfcType::IfcSIUnit,
            "IFCCONVERSIONBASEDUNIT" => IfcType::IfcConversionBasedUnit,
            "IFCMEASUREWITHUNIT" => IfcType::IfcMeasureWithUnit,

            "IFCLOCALPLACEMENT" => IfcType::IfcLocalPlacement,
            "IFCAXIS2PLACEMENT3D" => IfcType::IfcAxis2Placement3D,
            "IFCCARTESIANPOINT" => IfcType::IfcCartesianPoint,
            "IFCMAPCONVERSION" => IfcType::IfcMapConversion,
            "IFCPROJECTEDCRS" => IfcType::IfcProjectedCrs,

            other => IfcType::Unknown(other.to_string()),
        }
    }

    /// Get the type name as an uppercase string
    pub fn name(&self) -> &str {
        match self {
            IfcType::IfcProject => "IFCPROJECT",
            IfcType::IfcSite => "IFCSITE",
            IfcType::IfcBuilding => "IFCBUILDING",
            IfcType::IfcBuildingStorey => "IFCBUILDINGSTOREY",
            IfcType::IfcSpace => "IFCSPACE",

            IfcType::IfcWall => "IFCWALL",
            IfcType::IfcWallStandardCase => "IFCWALLSTANDARDCASE",
            IfcType::IfcCurtainWall => "IFCCURTAINWALL",
            IfcType::IfcSlab => "IFCSLAB",
            IfcType::IfcRoof => "IFCROOF",
            IfcType::IfcBeam => "IFCBEAM",
            IfcType::IfcColumn => "IFCCOLUMN",
            IfcType::IfcDoor => "IFCDOOR",
            IfcType::IfcWindow => "IFCWINDOW",
            IfcType::IfcStair => "IFCSTAIR",
            IfcType::IfcStairFlight => "IFCSTAIRFLIGHT",
            IfcType::IfcRamp => "IFCRAMP",
            IfcType::IfcRampFlight => "IFCRAMPFLIGHT",
            IfcType::IfcRailing => "IFCRAILING",
            IfcType::IfcCovering => "IFCCOVERING",
            IfcType::IfcPlate => "IFCPLATE",
            IfcType::IfcMember => "IFCMEMBER",
            IfcType::IfcFooting => "IFCFOOTING",
            IfcType::IfcPile => "IFCPILE",
            IfcType::IfcBuildingElementProxy => "IFCBUILDINGELEMENTPROXY",

            IfcType::IfcDistributionElement => "IFCDISTRIBUTIONELEMENT",
            IfcType::IfcDistributionFlowElement => "IFCDISTRIBUTIONFLOWELEMENT",
            IfcType::IfcFlowTerminal => "IFCFLOWTERMINAL",
            IfcType::IfcFlowSegment => "IFCFLOWSEGMENT",
            IfcType::IfcFlowFitting => "IFCFLOWFITTING",
            IfcType::IfcFlowController => "IFCFLOWCONTROLLER",
            IfcType::IfcFlowMovingDevice => "IFCFLOWMOVINGDEVICE",
            IfcType::IfcFlowStorageDevice => "IFCFLOWSTORAGEDEVICE",
            IfcType::IfcFlowTreatmentDevice => "IFCFLOWTREATMENTDEVICE",
            IfcType::IfcEnergyConversionDevice => "IFCENERGYCONVERSIONDEVICE",
            IfcType::IfcDistributionControlElement => "IFCDISTRIBUTIONCONTROLELEMENT",

            IfcType::IfcFurnishingElement => "IFCFURNISHINGELEMENT",
            IfcType::IfcFurniture => "IFCFURNITURE",
            IfcType::IfcSystemFurnitureElement => "IFCSYSTEMFURNITUREELEMENT",

            IfcType::IfcOpeningElement => "IFCOPENINGELEMENT",
            IfcType::IfcAnnotation => "IFCANNOTATION",
            IfcType::IfcGrid => "IFCGRID",

            IfcType::IfcRelAggregates => "IFCRELAGGREGATES",
            IfcType::IfcRelContainedInSpatialStructure => "IFCRELCONTAINEDINSPATIALSTRUCTURE",

            IfcType::IfcUnitAssignment => "IFCUNITASSIGNMENT",
            IfcType::IfcSIUnit => "IFCSIUNIT",
            IfcType::IfcConversionBasedUnit => "IFCCONVERSIONBASEDUNIT",
            IfcType::IfcMeasureWithUnit => "IFCMEASUREWITHUNIT",

            IfcType::IfcLocalPlacement => "IFCLOCALPLACEMENT",
            IfcType::IfcAxis2Placement3D => "IFCAXIS2PLACEMENT3D",
            IfcType::IfcCartesianPoint => "IFCCARTESIANPOINT",
            IfcType::IfcMapConversion => "IFCMAPCONVERSION",
            IfcType::IfcProjectedCrs => "IFCPROJECTEDCRS",

            IfcType::Unknown(s) => s,
        }
    }

    /// Check if this kind is a spatial structure element
    pub fn is_spatial(&self) -> bool {
        matches!(
            self,
            IfcType::IfcProject
                | IfcType::IfcSite
                | IfcType::IfcBuilding
                | IfcType::IfcBuildingStorey
                | IfcType::IfcSpace
        )
    }

    /// Check if this kind is a placeable product
    ///
    /// Products are what the entity aggregator counts: building elements,
    /// distribution and furnishing elements, openings, annotations, grids
    /// and the spatial elements below the project. The project itself is a
    /// context object, not a product. Kinds outside the enum are classified
    /// by name through [`is_product_name`], so concrete product leaves the
    /// enum does not spell out still count.
    pub fn is_product(&self) -> bool {
        if self.is_spatial() {
            return *self != IfcType::IfcProject;
        }
        if let IfcType::Unknown(name) = self {
            return is_product_name(name);
        }
        matches!(
            self,
            IfcType::IfcWall
                | IfcType::IfcWallStandardCase
                | IfcType::IfcCurtainWall
                | IfcType::IfcSlab
                | IfcType::IfcRoof
                | IfcType::IfcBeam
                | IfcType::IfcColumn
                | IfcType::IfcDoor
                | IfcType::IfcWindow
                | IfcType::IfcStair
                | IfcType::IfcStairFlight
                | IfcType::IfcRamp
                | IfcType::IfcRampFlight
                | IfcType::IfcRailing
                | IfcType::IfcCovering
                | IfcType::IfcPlate
                | IfcType::IfcMember
                | IfcType::IfcFooting
                | IfcType::IfcPile
                | IfcType::IfcBuildingElementProxy
                | IfcType::IfcDistributionElement
                | IfcType::IfcDistributionFlowElement
                | IfcType::IfcFlowTerminal
                | IfcType::IfcFlowSegment
                | IfcType::IfcFlowFitting
                | IfcType::IfcFlowController
                | IfcType::IfcFlowMovingDevice
                | IfcType::IfcFlowStorageDevice
                | IfcType::IfcFlowTreatmentDevice
                | IfcType::IfcEnergyConversionDevice
                | IfcType::IfcDistributionControlElement
                | IfcType::IfcFurnishingElement
                | IfcType::IfcFurniture
                | IfcType::IfcSystemFurnitureElement
                | IfcType::IfcOpeningElement
                | IfcType::IfcAnnotation
                | IfcType::IfcGrid
        )
    }
}

/// Product kinds outside the [`IfcType`] enum, by uppercase STEP name
///
/// The IFC2X3 and IFC4 concrete product leaves the reduced enum does not
/// spell out. Relations, type/style objects and resource entities are not
/// listed, so they stay excluded from entity counting.
fn is_product_name(name: &str) -> bool {
    matches!(
        name,
        // Ducts, pipes, cables
        "IFCDUCTSEGMENT"
            | "IFCDUCTFITTING"
            | "IFCDUCTSILENCER"
            | "IFCPIPESEGMENT"
            | "IFCPIPEFITTING"
            | "IFCCABLESEGMENT"
            | "IFCCABLEFITTING"
            | "IFCCABLECARRIERSEGMENT"
            | "IFCCABLECARRIERFITTING"
            // Terminals, fixtures and appliances
            | "IFCAIRTERMINAL"
            | "IFCAIRTERMINALBOX"
            | "IFCSANITARYTERMINAL"
            | "IFCSTACKTERMINAL"
            | "IFCWASTETERMINAL"
            | "IFCFIRESUPPRESSIONTERMINAL"
            | "IFCGASTERMINAL"
            | "IFCLIGHTFIXTURE"
            | "IFCLAMP"
            | "IFCOUTLET"
            | "IFCELECTRICAPPLIANCE"
            | "IFCAUDIOVISUALAPPLIANCE"
            | "IFCCOMMUNICATIONSAPPLIANCE"
            | "IFCMEDICALDEVICE"
            // Energy conversion plant
            | "IFCBOILER"
            | "IFCBURNER"
            | "IFCCHILLER"
            | "IFCCOIL"
            | "IFCCONDENSER"
            | "IFCCOOLEDBEAM"
            | "IFCCOOLINGTOWER"
            | "IFCENGINE"
            | "IFCEVAPORATIVECOOLER"
            | "IFCEVAPORATOR"
            | "IFCHEATEXCHANGER"
            | "IFCHUMIDIFIER"
            | "IFCSPACEHEATER"
            | "IFCELECTRICHEATER"
            | "IFCTUBEBUNDLE"
            | "IFCUNITARYEQUIPMENT"
            | "IFCAIRTOAIRHEATRECOVERY"
            | "IFCELECTRICGENERATOR"
            | "IFCELECTRICMOTOR"
            | "IFCMOTORCONNECTION"
            | "IFCSOLARDEVICE"
            | "IFCTRANSFORMER"
            // Flow movement, storage and control
            | "IFCFAN"
            | "IFCPUMP"
            | "IFCCOMPRESSOR"
            | "IFCTANK"
            | "IFCELECTRICFLOWSTORAGEDEVICE"
            | "IFCVALVE"
            | "IFCDAMPER"
            | "IFCFLOWMETER"
            | "IFCFILTER"
            | "IFCINTERCEPTOR"
            | "IFCJUNCTIONBOX"
            | "IFCPROTECTIVEDEVICE"
            | "IFCPROTECTIVEDEVICETRIPPINGUNIT"
            | "IFCSWITCHINGDEVICE"
            | "IFCELECTRICDISTRIBUTIONBOARD"
            | "IFCELECTRICTIMECONTROL"
            // Distribution controls
            | "IFCACTUATOR"
            | "IFCALARM"
            | "IFCCONTROLLER"
            | "IFCFLOWINSTRUMENT"
            | "IFCSENSOR"
            | "IFCUNITARYCONTROLELEMENT"
            // Other element leaves
            | "IFCTRANSPORTELEMENT"
            | "IFCELEMENTASSEMBLY"
            | "IFCBUILDINGELEMENTPART"
            | "IFCDISCRETEACCESSORY"
            | "IFCFASTENER"
            | "IFCMECHANICALFASTENER"
            | "IFCREINFORCINGBAR"
            | "IFCREINFORCINGMESH"
            | "IFCTENDON"
            | "IFCTENDONANCHOR"
            | "IFCVIRTUALELEMENT"
            | "IFCPROXY"
            | "IFCCHIMNEY"
            | "IFCSHADINGDEVICE"
            | "IFCCIVILELEMENT"
            | "IFCGEOGRAPHICELEMENT"
            | "IFCSURFACEFEATURE"
            | "IFCVOIDINGFEATURE"
            | "IFCPROJECTIONELEMENT"
            | "IFCEQUIPMENTELEMENT"
            | "IFCELECTRICALELEMENT"
            | "IFCDISTRIBUTIONCHAMBERELEMENT"
            | "IFCDISTRIBUTIONPORT"
            // Structural members and connections
            | "IFCSTRUCTURALCURVEMEMBER"
            | "IFCSTRUCTURALCURVEMEMBERVARYING"
            | "IFCSTRUCTURALSURFACEMEMBER"
            | "IFCSTRUCTURALSURFACEMEMBERVARYING"
            | "IFCSTRUCTURALPOINTCONNECTION"
            | "IFCSTRUCTURALCURVECONNECTION"
            | "IFCSTRUCTURALSURFACECONNECTION"
    )
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Decoded attribute value
///
/// Represents any value that can appear in a STEP entity's attribute list.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttributeValue {
    /// Null value ($)
    #[default]
    Null,
    /// Derived value (*)
    Derived,
    /// Entity reference (#123)
    EntityRef(EntityId),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Enumeration value (.VALUE.)
    Enum(String),
    /// List of values
    List(Vec<AttributeValue>),
    /// Typed value like IFCLABEL('text')
    TypedValue(String, Vec<AttributeValue>),
}

impl AttributeValue {
    /// Try to get as entity reference
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_string(),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::TypedValue(_, args) if !args.is_empty() => args[0].as_float(),
            _ => None,
        }
    }

    /// Try to get as enum string
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            AttributeValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

/// Decoded IFC entity
///
/// A fully decoded STEP instance with its ID, kind, and attribute values.
#[derive(Clone, Debug)]
pub struct DecodedEntity {
    /// Entity ID
    pub id: EntityId,
    /// Entity kind
    pub ifc_type: IfcType,
    /// Attribute values in declaration order
    pub attributes: Vec<AttributeValue>,
}

impl DecodedEntity {
    /// Get attribute at index
    pub fn get(&self, index: usize) -> Option<&AttributeValue> {
        self.attributes.get(index)
    }

    /// Get entity reference at index
    pub fn get_ref(&self, index: usize) -> Option<EntityId> {
        self.get(index).and_then(|v| v.as_entity_ref())
    }

    /// Get string at index
    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_string())
    }

    /// Get float at index
    pub fn get_float(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(|v| v.as_float())
    }

    /// Get enum string at index
    pub fn get_enum(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(|v| v.as_enum())
    }

    /// Get list at index
    pub fn get_list(&self, index: usize) -> Option<&[AttributeValue]> {
        self.get(index).and_then(|v| v.as_list())
    }

    /// Get list of entity references at index
    pub fn get_refs(&self, index: usize) -> Option<Vec<EntityId>> {
        self.get_list(index)
            .map(|list| list.iter().filter_map(|v| v.as_entity_ref()).collect())
    }
}

/// Model metadata extracted from the STEP header
#[derive(Clone, Debug, Default)]
pub struct ModelMetadata {
    /// IFC schema version (e.g., "IFC2X3", "IFC4")
    pub schema_version: String,
    /// File name from header
    pub file_name: Option<String>,
    /// Timestamp from header
    pub timestamp: Option<String>,
}
