// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial reference resolution
//!
//! Derives the site geolocation and the project-to-world origin for a
//! model. The two are computed independently, but both length-bearing
//! computations must use the same unit scale for a given model.

use crate::geodetic::dms_to_decimal;
use ifc_report_model::{attrs, AttributeValue, DecodedEntity, EntityResolver, IfcType};
use serde::Serialize;

/// Site geolocation in decimal degrees / metres
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct GeoReference {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation_m: Option<f64>,
}

/// Project-to-world offset in metres
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct GlobalOrigin {
    pub x_m: Option<f64>,
    pub y_m: Option<f64>,
    pub z_m: Option<f64>,
}

/// Resolve the site geolocation
///
/// Reads the first site's latitude/longitude compound angles and elevation.
/// Elevation is already in metres regardless of the model's length unit,
/// so it is not scaled. Absence of a site yields all fields unset.
pub fn resolve_geo_reference(resolver: &dyn EntityResolver) -> GeoReference {
    let sites = resolver.entities_by_type(&IfcType::IfcSite);
    let Some(site) = sites.first() else {
        return GeoReference::default();
    };

    GeoReference {
        latitude: dms_to_decimal(compound_angle(site, attrs::site::REF_LATITUDE).as_deref()),
        longitude: dms_to_decimal(compound_angle(site, attrs::site::REF_LONGITUDE).as_deref()),
        elevation_m: site.get_float(attrs::site::REF_ELEVATION),
    }
}

/// Resolve the global project origin
///
/// A map conversion object is authoritative when present: eastings,
/// northings and orthogonal height are scaled to metres. Only when no map
/// conversion exists does the first site's placement chain serve as a
/// best-effort substitute. The two sources are never blended field by
/// field.
pub fn resolve_global_origin(resolver: &dyn EntityResolver, unit_scale: f64) -> GlobalOrigin {
    let conversions = resolver.entities_by_type(&IfcType::IfcMapConversion);
    if let Some(conv) = conversions.first() {
        return GlobalOrigin {
            x_m: conv.get_float(attrs::map_conversion::EASTINGS).map(|v| v * unit_scale),
            y_m: conv.get_float(attrs::map_conversion::NORTHINGS).map(|v| v * unit_scale),
            z_m: conv
                .get_float(attrs::map_conversion::ORTHOGONAL_HEIGHT)
                .map(|v| v * unit_scale),
        };
    }

    log::debug!("no map conversion, falling back to site placement");
    site_placement_origin(resolver, unit_scale).unwrap_or_default()
}

/// Read the first site's local placement location, scaled to metres
fn site_placement_origin(resolver: &dyn EntityResolver, unit_scale: f64) -> Option<GlobalOrigin> {
    let sites = resolver.entities_by_type(&IfcType::IfcSite);
    let site = sites.first()?;

    let placement = resolver.get(site.get_ref(attrs::spatial::OBJECT_PLACEMENT)?)?;
    if placement.ifc_type != IfcType::IfcLocalPlacement {
        return None;
    }

    let relative = resolver.get(placement.get_ref(attrs::local_placement::RELATIVE_PLACEMENT)?)?;
    let location = resolver.get(relative.get_ref(attrs::axis2_placement::LOCATION)?)?;
    let coords = location.get_list(attrs::cartesian_point::COORDINATES)?;

    // 2D placements have no third coordinate; it stays unset
    let coord = |i: usize| coords.get(i).and_then(AttributeValue::as_float);
    Some(GlobalOrigin {
        x_m: coord(0).map(|v| v * unit_scale),
        y_m: coord(1).map(|v| v * unit_scale),
        z_m: coord(2).map(|v| v * unit_scale),
    })
}

/// Read a compound angle attribute as a list of numeric components
///
/// An empty list reads as absent, not as a zero angle.
fn compound_angle(entity: &DecodedEntity, index: usize) -> Option<Vec<f64>> {
    let list = entity.get_list(index)?;
    let parts: Vec<f64> = list.iter().filter_map(AttributeValue::as_float).collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts)
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

    const SITE_WITH_PLACEMENT: &str = "\
#1=IFCSITE('g',$,'Site',$,$,#2,$,$,.ELEMENT.,(48,52,0),(2,21,0),35.0,$,$);
#2=IFCLOCALPLACEMENT($,#3);
#3=IFCAXIS2PLACEMENT3D(#4,$,$);
#4=IFCCARTESIANPOINT((1000.,2000.,300.));
";

    #[test]
    fn test_geo_reference_from_site() {
        let model = model_of(SITE_WITH_PLACEMENT);
        let geo = resolve_geo_reference(model.resolver());
        assert!((geo.latitude.unwrap() - 48.8667).abs() < 1e-4);
        assert!((geo.longitude.unwrap() - 2.35).abs() < 1e-4);
        assert_eq!(geo.elevation_m, Some(35.0));
    }

    #[test]
    fn test_empty_compound_angle_stays_unset() {
        let data = "\
#1=IFCSITE('g',$,'Site',$,$,$,$,$,.ELEMENT.,(),$,12.0,$,$);
";
        let model = model_of(data);
        let geo = resolve_geo_reference(model.resolver());
        assert_eq!(geo.latitude, None);
        assert_eq!(geo.longitude, None);
        assert_eq!(geo.elevation_m, Some(12.0));
    }

    #[test]
    fn test_geo_reference_without_site() {
        let model = model_of("#1=IFCWALL('g',$,'W',$,$,$,$,$);\n");
        assert_eq!(resolve_geo_reference(model.resolver()), GeoReference::default());
    }

    #[test]
    fn test_origin_prefers_map_conversion() {
        let data = format!(
            "{SITE_WITH_PLACEMENT}#10=IFCMAPCONVERSION(#11,#12,648250.,6862150.,120.,$,$,$);
#11=IFCGEOMETRICREPRESENTATIONCONTEXT($,'Model',3,1.E-5,#3,$);
#12=IFCPROJECTEDCRS('EPSG:2154',$,$,$,$,$,$);
"
        );
        let model = model_of(&data);
        let origin = resolve_global_origin(model.resolver(), 1.0);
        // Placement values (1000/2000/300) must not leak through
        assert_eq!(origin.x_m, Some(648250.0));
        assert_eq!(origin.y_m, Some(6862150.0));
        assert_eq!(origin.z_m, Some(120.0));
    }

    #[test]
    fn test_origin_from_placement_fallback() {
        let model = model_of(SITE_WITH_PLACEMENT);
        let origin = resolve_global_origin(model.resolver(), 0.001);
        assert!((origin.x_m.unwrap() - 1.0).abs() < 1e-9);
        assert!((origin.y_m.unwrap() - 2.0).abs() < 1e-9);
        assert!((origin.z_m.unwrap() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_origin_from_2d_placement_leaves_z_unset() {
        let data = "\
#1=IFCSITE('g',$,'Site',$,$,#2,$,$,.ELEMENT.,$,$,$,$,$);
#2=IFCLOCALPLACEMENT($,#3);
#3=IFCAXIS2PLACEMENT3D(#4,$,$);
#4=IFCCARTESIANPOINT((10.,20.));
";
        let model = model_of(data);
        let origin = resolve_global_origin(model.resolver(), 1.0);
        assert_eq!(origin.x_m, Some(10.0));
        assert_eq!(origin.y_m, Some(20.0));
        assert_eq!(origin.z_m, None);
    }

    #[test]
    fn test_origin_without_any_source() {
        let model = model_of("#1=IFCWALL('g',$,'W',$,$,$,$,$);\n");
        assert_eq!(
            resolve_global_origin(model.resolver(), 1.0),
            GlobalOrigin::default()
        );
    }

    #[test]
    fn test_map_conversion_without_height() {
        let data = "#1=IFCMAPCONVERSION(#2,#3,100.,200.,$,$,$,$);
#2=IFCPROJECTEDCRS('EPSG:2154',$,$,$,$,$,$);
#3=IFCPROJECTEDCRS('EPSG:2154',$,$,$,$,$,$);
";
        let model = model_of(data);
        let origin = resolve_global_origin(model.resolver(), 1.0);
        assert_eq!(origin.x_m, Some(100.0));
        assert_eq!(origin.y_m, Some(200.0));
        assert_eq!(origin.z_m, None);
    }
}
