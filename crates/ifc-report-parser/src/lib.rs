// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Report Parser - STEP/IFC parser for the report pipeline
//!
//! A compact parser for IFC (STEP physical format) files implementing the
//! traits defined in `ifc-report-model`.
//!
//! - **Fast tokenization** using `nom` combinators
//! - **SIMD-accelerated scanning** using `memchr`
//! - **Lazy entity decoding** - only parse entities when needed
//! - **Arc-based caching** - efficient memory sharing
//!
//! # Example
//!
//! ```ignore
//! use ifc_report_parser::open_model;
//!
//! let model = open_model(Path::new("building.ifc"))?;
//! let sites = model.resolver().entities_by_type(&IfcType::IfcSite);
//! ```

mod model;
mod resolver;
mod scanner;
mod tokenizer;

pub use model::ParsedModel;
pub use resolver::ResolverImpl;
pub use scanner::{parse_header, EntityScanner, HeaderInfo};
pub use tokenizer::{parse_entity, Token};

use ifc_report_model::Result;
use std::path::Path;

/// Open and parse a model file
pub fn open_model(path: &Path) -> Result<ParsedModel> {
    ParsedModel::open(path)
}
