// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Degrees/minutes/seconds to decimal-degree conversion
//!
//! IFC encodes latitude and longitude as compound angles of 3 or 4
//! components: degrees, minutes, seconds and an optional millionth-of-a-
//! second part. The sign of the angle is carried by the degrees component
//! only; the remaining components are magnitudes.

/// Convert a compound DMS angle to decimal degrees
///
/// Missing trailing components default to 0. Returns `None` when the angle
/// itself is absent or has no components at all; an empty angle carries no
/// information and must not read as 0 degrees.
pub fn dms_to_decimal(dms: Option<&[f64]>) -> Option<f64> {
    let parts = dms?;
    if parts.is_empty() {
        return None;
    }
    let degrees = parts.first().copied().unwrap_or(0.0);
    let minutes = parts.get(1).copied().unwrap_or(0.0).abs();
    let seconds = parts.get(2).copied().unwrap_or(0.0).abs();
    let micro = parts.get(3).copied().unwrap_or(0.0).abs();

    let sign = if degrees < 0.0 { -1.0 } else { 1.0 };
    Some(sign * (degrees.abs() + minutes / 60.0 + (seconds + micro / 1e6) / 3600.0))
}
