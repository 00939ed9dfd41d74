// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Report Model - Trait definitions and shared types for IFC model access
//!
//! This crate provides the core abstractions the report pipeline works
//! against. It defines the read-only model traits so that table derivation
//! never depends on a concrete parser backend.
//!
//! The crate is organized around:
//!
//! - [`IfcModel`] / [`EntityResolver`] - read-only access to a parsed model
//! - [`IfcType`] / [`AttributeValue`] / [`DecodedEntity`] - decoded entity data
//! - [`attrs`] - per-kind attribute positions for schema-driven field access
//! - [`ParseError`] - error taxonomy for model loading

pub mod attrs;
pub mod error;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
