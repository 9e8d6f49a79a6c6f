//! Entity movement
//!
//! Two independent strategies, both driven by a caller-supplied `dt`:
//! - `arrive`: seek a destination, speed capped at `MAX_ROBOT_SPEED` and at the
//!   remaining distance (decelerates onto the target)
//! - `drive`: integrate a heading + speed fraction, no arrival clamping
//!
//! Both return `false` and leave the entity where it was when the step would
//! produce a non-finite position (huge but finite `dt` overflows to inf/NaN).

use super::entity::Entity;
use super::geometry::{Position, distance};
use crate::consts::MAX_ROBOT_SPEED;
use crate::{heading_to_direction, scaled_to_length};

/// Move `entity` toward `destination`.
///
/// With `dt == 1` and the target within `MAX_ROBOT_SPEED`, the entity lands on
/// the destination. Other `dt` values may overshoot or undershoot in a single
/// tick; that is expected.
pub fn arrive(entity: &mut Entity, destination: Position, dt: f32) -> bool {
    let to_target = destination - entity.pos;
    let remaining = distance(entity.pos, destination);
    let speed = MAX_ROBOT_SPEED.min(remaining);
    commit(entity, entity.pos + scaled_to_length(to_target, speed) * dt)
}

/// Move `entity` along `orientation_deg` at `speed_fraction` of max speed.
pub fn drive(entity: &mut Entity, orientation_deg: f32, speed_fraction: f32, dt: f32) -> bool {
    let direction = heading_to_direction(orientation_deg);
    let traveled = MAX_ROBOT_SPEED * speed_fraction * dt;
    commit(entity, entity.pos + direction * traveled)
}

#[inline]
fn commit(entity: &mut Entity, next: Position) -> bool {
    if next.is_finite() {
        entity.pos = next;
        true
    } else {
        false
    }
}
