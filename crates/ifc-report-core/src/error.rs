// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for report generation

use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while producing reports
///
/// Data-quality gaps (missing geolocation, missing unit assignment, absent
/// root container) never surface here; they degrade to unset fields. These
/// variants are the unrecoverable cases: unreadable input, malformed model,
/// or a failed output write.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Input could not be read or output could not be written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not a valid IFC model
    #[error(transparent)]
    Parse(#[from] ifc_report_model::ParseError),

    /// Workbook persistence failed
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
