// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ifc-report-core
//!
//! Report pipeline over parsed IFC models: unit and georeferencing
//! resolution, storey levels, containment hierarchy, entity aggregation,
//! and the assembly, merging and saving of styled xlsx workbooks.
//!
//! ## Example
//!
//! ```no_run
//! use ifc_report_core::produce_report;
//! use ifc_report_core::xlsx::save_workbook;
//! use std::path::Path;
//!
//! # fn main() -> ifc_report_core::Result<()> {
//! let report = produce_report(Path::new("model.ifc"))?;
//! save_workbook(&report, Path::new("model.xlsx"))?;
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod batch;
pub mod entities;
pub mod error;
pub mod geodetic;
pub mod hierarchy;
pub mod levels;
pub mod spatial;
pub mod units;
pub mod workbook;
pub mod xlsx;

pub use assembler::build_report;
pub use batch::{merge_into, produce_batch, produce_report, BatchSummary, OutputPolicy};
pub use entities::{count_entities, EntityCount};
pub use error::{ReportError, Result};
pub use geodetic::dms_to_decimal;
pub use hierarchy::{flatten_hierarchy, HierarchyRow};
pub use levels::{extract_levels, LevelRow};
pub use spatial::{resolve_geo_reference, resolve_global_origin, GeoReference, GlobalOrigin};
pub use units::extract_unit_scale;
pub use workbook::{CellStyle, CellValue, Sheet, StyledCell, Workbook};
