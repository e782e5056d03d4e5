//! Chord problem generation engine
//!
//! Draws a root, quality, inversion and octave from a level constraint and voices
//! the result. All randomness comes from the caller's RNG so sessions can be
//! replayed from a seed.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use super::instance::ChordInstance;
use crate::catalog::ChordQuality;
use crate::error::TheoryError;
use crate::inversion::Inversion;
use crate::level::LevelConstraint;

/// Draws allowed per problem before a repeat of the previous problem is accepted.
pub const MAX_ATTEMPTS: usize = 20;

/// Generate one chord problem.
///
/// # Parameters
/// - `constraint`: Roots, qualities, inversion rules, octaves and pitch window
/// - `previous`: The problem just answered, if any; its `(root, quality, inversion)`
///   triple is avoided for up to [`MAX_ATTEMPTS`] draws
/// - `rng`: Source of randomness
///
/// # Errors
/// - `EmptyConstraintSet` when there are no roots, qualities or octaves to draw from
/// - `UnknownQuality` for a quality id missing from the catalog
/// - `PitchWindowTooNarrow` when a voicing cannot be moved into the pitch window
pub fn generate<R: Rng>(
    constraint: &LevelConstraint,
    previous: Option<&ChordInstance>,
    rng: &mut R,
) -> Result<ChordInstance, TheoryError> {
    constraint.validate()?;
    let qualities = constraint.qualities()?;
    let avoid = previous.map(ChordInstance::key);

    let mut attempt = 1;
    loop {
        let instance = draw(constraint, &qualities, rng)?;
        if avoid != Some(instance.key()) {
            debug!(chord = %instance.canonical_name, attempt, "generated chord problem");
            return Ok(instance);
        }
        if attempt >= MAX_ATTEMPTS {
            warn!(
                chord = %instance.canonical_name,
                error = %TheoryError::GenerationExhausted { attempts: attempt },
                "accepting repeated chord problem"
            );
            return Ok(instance);
        }
        attempt += 1;
    }
}

/// One unconstrained-by-history draw.
fn draw<R: Rng>(
    constraint: &LevelConstraint,
    qualities: &[&'static ChordQuality],
    rng: &mut R,
) -> Result<ChordInstance, TheoryError> {
    let root = *constraint
        .allowed_roots
        .choose(rng)
        .ok_or(TheoryError::EmptyConstraintSet {
            field: "allowed-roots",
        })?;
    let mut quality = *qualities.choose(rng).ok_or(TheoryError::EmptyConstraintSet {
        field: "allowed-qualities",
    })?;

    let mut inversion = choose_inversion(constraint, quality, rng);
    if !quality.supports(inversion) {
        let eligible: Vec<&'static ChordQuality> = qualities
            .iter()
            .copied()
            .filter(|q| q.supports(inversion))
            .collect();
        match eligible.choose(rng) {
            Some(q) => quality = *q,
            None => inversion = Inversion::Root,
        }
    }

    let octave = *constraint
        .octaves
        .for_inversion(inversion)
        .choose(rng)
        .ok_or(TheoryError::EmptyConstraintSet { field: "octaves" })?;
    let root_note = root.in_octave(octave)?;

    ChordInstance::build(quality, inversion, root_note, &constraint.pitch_window)
}

fn choose_inversion<R: Rng>(
    constraint: &LevelConstraint,
    quality: &ChordQuality,
    rng: &mut R,
) -> Inversion {
    if !constraint.allow_inversions {
        return Inversion::Root;
    }
    if let Some(required) = constraint.required_inversion {
        return if rng.gen_bool(constraint.required_inversion_weight) {
            required
        } else {
            Inversion::Root
        };
    }
    let max = quality.max_inversion().index();
    Inversion::from_index(rng.gen_range(0..=max)).unwrap_or_default()
}
