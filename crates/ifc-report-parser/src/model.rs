// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ParsedModel - main IFC model implementation

use crate::resolver::ResolverImpl;
use crate::scanner::{parse_header, EntityIndex, EntityScanner};

use ifc_report_model::{
    EntityId, EntityResolver, IfcModel, IfcType, ModelMetadata, ParseError, Result,
};
use rustc_hash::FxHashMap;
use std::path::Path;
use std::sync::Arc;

/// STEP physical file magic
const STEP_MAGIC: &str = "ISO-10303-21";

/// Parsed IFC model implementing the `IfcModel` trait
///
/// Owned by the caller for the duration of one file's processing and
/// released afterwards; nothing in it is cached process-wide.
#[derive(Debug)]
pub struct ParsedModel {
    /// Entity resolver for lookups
    resolver: Arc<ResolverImpl>,
    /// File metadata
    metadata: ModelMetadata,
}

impl ParsedModel {
    /// Parse STEP content and create a model
    ///
    /// Fails when the content is not a STEP physical file or has no data
    /// section; missing optional entities are not an error.
    pub fn parse(content: &str) -> Result<Self> {
        if !content.contains(STEP_MAGIC) {
            return Err(ParseError::format("missing ISO-10303-21 header"));
        }
        if !content.contains("DATA;") {
            return Err(ParseError::format("missing DATA section"));
        }

        // Entity index plus type index, both in one scan pass
        let mut index = EntityIndex::default();
        let mut type_index: FxHashMap<IfcType, Vec<EntityId>> = FxHashMap::default();
        let mut scanner = EntityScanner::new(content);
        while let Some((id, type_name, start, end)) = scanner.next_entity() {
            index.insert(id, (start, end));
            type_index
                .entry(IfcType::parse(type_name))
                .or_default()
                .push(EntityId(id));
        }

        let resolver = Arc::new(ResolverImpl::with_type_index(
            content.to_string(),
            index,
            type_index,
        ));

        let header = parse_header(content);
        let metadata = ModelMetadata {
            schema_version: header.schema_version,
            file_name: header.file_name,
            timestamp: header.timestamp,
        };

        Ok(Self { resolver, metadata })
    }

    /// Open and parse a model file
    ///
    /// IFC files are nominally ISO 8859-1; undecodable bytes are replaced
    /// rather than rejected since they can only occur inside string values.
    pub fn open(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&raw);
        Self::parse(&content)
    }
}

impl IfcModel for ParsedModel {
    fn resolver(&self) -> &dyn EntityResolver {
        self.resolver.as_ref()
    }

    fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_IFC: &str = r#"ISO-10303-21;
HEADER;
FILE_DESCRIPTION(('ViewDefinition [CoordinationView]'),'2;1');
FILE_NAME('test.ifc','2024-01-01T00:00:00',('Author'),('Org'),'Preprocessor','App','');
FILE_SCHEMA(('IFC2X3'));
ENDSEC;
DATA;
#1=IFCPROJECT('guid',$,'Test Project',$,$,$,$,$,#2);
#2=IFCUNITASSIGNMENT((#3));
#3=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);
#4=IFCSITE('guid2',$,'Site',$,$,$,$,$,$,$,$,$,$,$);
#5=IFCRELAGGREGATES('guid3',$,$,$,#1,(#4));
ENDSEC;
END-ISO-10303-21;
"#;

    #[test]
    fn test_parse_model() {
        let model = ParsedModel::parse(TEST_IFC).unwrap();

        assert_eq!(model.metadata().schema_version, "IFC2X3");
        assert_eq!(model.metadata().file_name, Some("test.ifc".to_string()));

        let sites = model.resolver().entities_by_type(&IfcType::IfcSite);
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn test_parse_rejects_non_step() {
        let err = ParsedModel::parse("not an ifc file").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_parse_rejects_missing_data_section() {
        let err = ParsedModel::parse("ISO-10303-21;\nHEADER;\nENDSEC;\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let err = ParsedModel::open(Path::new("/nonexistent/model.ifc")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
