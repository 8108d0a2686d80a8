//! Collision tests between projectile paths and enemy footprints.

use keystrike_core::{Point, Rect};

/// Locates where a projectile of the given size first touches `target`.
///
/// The path of its center from `previous` to `current` is tested against
/// `target` grown by the projectile's half extents, so fast projectiles cannot
/// tunnel through thin enemies. A projectile that did not move degenerates to
/// a footprint overlap test. Returns the center of the projectile at the
/// moment of contact.
pub(crate) fn projectile_contact(
    previous: Point,
    current: Point,
    width: f32,
    height: f32,
    target: &Rect,
) -> Option<Point> {
    let enter = segment_entry(
        previous,
        current,
        &target.expanded(width / 2.0, height / 2.0),
    )?;

    Some(previous.offset(
        (current.x - previous.x) * enter,
        (current.y - previous.y) * enter,
    ))
}

/// Liang-Barsky clip of the segment `from -> to` against `rect`.
///
/// Returns the fraction of the segment travelled before it enters `rect`, `0`
/// when it starts inside. A zero-length segment reduces to a
/// point-in-rectangle test, and zero-sized rectangles are handled without
/// dividing by zero.
pub(crate) fn segment_entry(from: Point, to: Point, rect: &Rect) -> Option<f32> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let mut enter = 0.0_f32;
    let mut exit = 1.0_f32;

    let edges = [
        (-dx, from.x - rect.x),
        (dx, rect.right() - from.x),
        (-dy, from.y - rect.y),
        (dy, rect.bottom() - from.y),
    ];

    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let t = q / p;
        if p < 0.0 {
            if t > exit {
                return None;
            }
            enter = enter.max(t);
        } else {
            if t < enter {
                return None;
            }
            exit = exit.min(t);
        }
    }

    (enter <= exit).then_some(enter)
}
