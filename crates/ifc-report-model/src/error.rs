// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for model loading

use crate::EntityId;
use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while loading an IFC model
///
/// Missing optional data is never an error here; the accessors return
/// `None` for those. These variants cover unreadable or malformed input,
/// which aborts processing of that single file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Not a STEP physical file, or the data section is missing
    #[error("Invalid IFC format: {0}")]
    InvalidFormat(String),

    /// Failed to decode an entity's attribute list
    #[error("Failed to parse entity {0}: {1}")]
    EntityParse(EntityId, String),

    /// IO error while reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Create a new format error
    pub fn format(msg: impl Into<String>) -> Self {
        ParseError::InvalidFormat(msg.into())
    }

    /// Create a new entity parse error
    pub fn entity_parse(id: EntityId, msg: impl Into<String>) -> Self {
        ParseError::EntityParse(id, msg.into())
    }
}
