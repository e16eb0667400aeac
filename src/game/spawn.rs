//! Entity placement
//!
//! Uniform random placement into free cells, bounded so a level table
//! that approaches grid capacity can never spin the sampler forever.

use rand::Rng;

use crate::error::GameError;
use crate::grid::{Bounds, Position};

/// Give up on blind sampling after this many rejected draws
const MAX_SAMPLE_ATTEMPTS: usize = 128;

/// Pick a uniformly random free cell
///
/// Fails fast with [`GameError::UnplaceableEntity`] when the occupants
/// already fill the grid. Samples blind first; on a crowded grid where
/// sampling keeps colliding, falls back to enumerating the free cells
/// and picking among them, so the call always terminates and the
/// result stays uniform.
pub fn random_free_position(
    occupied: &[Position],
    bounds: Bounds,
    rng: &mut impl Rng,
) -> Result<Position, GameError> {
    if occupied.len() >= bounds.capacity() {
        return Err(GameError::UnplaceableEntity {
            occupied: occupied.len(),
            width: bounds.width,
            height: bounds.height,
        });
    }

    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = Position::new(
            rng.gen_range(0..bounds.width),
            rng.gen_range(0..bounds.height),
        );
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }

    // Crowded grid: enumerate what is left instead of sampling blind
    let free: Vec<Position> = (0..bounds.height)
        .flat_map(|y| (0..bounds.width).map(move |x| Position::new(x, y)))
        .filter(|cell| !occupied.contains(cell))
        .collect();

    if free.is_empty() {
        return Err(GameError::UnplaceableEntity {
            occupied: occupied.len(),
            width: bounds.width,
            height: bounds.height,
        });
    }
    Ok(free[rng.gen_range(0..free.len())])
}
