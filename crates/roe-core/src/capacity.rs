//! Host population-capacity field
//!
//! The host owns a capacity model per water body. This crate never assumes
//! anything about how the magnitude maps to capacity beyond "larger
//! magnitude, more capacity"; it only applies and reverses its own deltas.
//!
//! Alongside the magnitude the field keeps the total delta this system has
//! applied to each body. Restoration after a reload diffs against that total
//! instead of assuming the host has reset the field.

use crate::{BodyId, Cell};

/// Adjustable capacity of the water bodies on one map
pub trait CapacityField {
    /// Water body containing `cell`, if any
    fn body_at(&self, cell: Cell) -> Option<BodyId>;

    /// Current magnitude parameter; `None` if the body does not exist
    fn magnitude(&self, body: BodyId) -> Option<i64>;

    fn set_magnitude(&mut self, body: BodyId, value: i64);

    /// Total delta this system currently has applied to `body`
    fn system_delta(&self, body: BodyId) -> i64;

    fn set_system_delta(&mut self, body: BodyId, value: i64);

    /// Bodies whose system delta is currently non-zero
    fn adjusted_bodies(&self) -> Vec<BodyId>;
}

/// Add `delta` to a body's magnitude and its system delta
///
/// Reads the current values and writes back the sum, never overwriting
/// changes the host made in between. Returns `false` when the body does not
/// exist, in which case nothing is written.
pub fn apply_delta<F: CapacityField + ?Sized>(field: &mut F, body: BodyId, delta: i64) -> bool {
    let Some(current) = field.magnitude(body) else {
        return false;
    };
    field.set_magnitude(body, current + delta);
    let applied = field.system_delta(body);
    field.set_system_delta(body, applied + delta);
    true
}
