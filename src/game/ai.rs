//! Zombie pursuit
//!
//! Greedy Chebyshev chase: one unit step along the dominant axis of
//! the offset to the noise, random axis when the two are tied.

use rand::Rng;

use crate::grid::Position;

/// One pursuit step for a zombie at `from` chasing a noise at `target`
///
/// Returns the (dx, dy) unit delta. A zombie already standing on the
/// noise steps (0, 0), which still counts as a move so collision
/// checks re-run for it.
pub fn approach_step(from: Position, target: Position, rng: &mut impl Rng) -> (i32, i32) {
    let dx = from.x - target.x;
    let dy = from.y - target.y;

    if dx == 0 && dy == 0 {
        return (0, 0);
    }
    if dx.abs() > dy.abs() {
        return (-dx.signum(), 0);
    }
    if dx.abs() < dy.abs() {
        return (0, -dy.signum());
    }

    // Tied and nonzero on both axes: 50/50 between them
    if rng.gen_bool(0.5) {
        (-dx.signum(), 0)
    } else {
        (0, -dy.signum())
    }
}
