//! Free-text answers
//!
//! The canonical chord is expanded into every accepted spelling, all normalized the
//! same way as the submission, and the submission is checked for membership.

use std::collections::BTreeSet;

use crate::catalog::ChordQuality;
use crate::generator::ChordInstance;
use crate::inversion::Inversion;
use crate::pitch::PitchClass;

/// Lowercase and strip all whitespace.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accepted quality spellings, already normalized.
///
/// Uppercase `M` forms (`CM7`) are not offered: once case is folded they read as
/// minor.
pub fn quality_synonyms(quality: &ChordQuality) -> &'static [&'static str] {
    match quality.id {
        "major" => &["", "maj", "major"],
        "minor" => &["m", "min", "minor", "-"],
        "diminished" => &["dim", "diminished", "°", "o"],
        "augmented" => &["aug", "augmented", "+"],
        "sus2" => &["sus2", "suspended2", "suspendedsecond"],
        "sus4" => &["sus4", "sus", "suspended4", "suspendedfourth"],
        "major6" => &["6", "maj6", "major6", "majorsixth"],
        "minor6" => &["m6", "min6", "minor6", "-6", "minorsixth"],
        "dominant7" => &["7", "dom7", "dominant7", "dominantseventh"],
        "major7" => &["maj7", "major7", "δ7", "δ", "majorseventh"],
        "minor7" => &["m7", "min7", "minor7", "-7", "minorseventh"],
        "diminished7" => &["dim7", "diminished7", "°7", "o7", "diminishedseventh"],
        "half-diminished7" => &[
            "m7b5",
            "min7b5",
            "-7b5",
            "ø",
            "ø7",
            "halfdiminished",
            "halfdiminished7",
            "half-diminished7",
            "halfdiminishedseventh",
        ],
        "minor-major7" => &[
            "mmaj7",
            "minmaj7",
            "m(maj7)",
            "-maj7",
            "minormajor7",
            "minormajorseventh",
        ],
        "augmented7" => &["aug7", "+7", "7#5", "augmented7", "augmentedseventh"],
        "dominant9" => &["9", "dom9", "dominant9", "dominantninth"],
        "major9" => &["maj9", "major9", "δ9", "majorninth"],
        "minor9" => &["m9", "min9", "minor9", "-9", "minorninth"],
        "dominant11" => &["11", "dom11", "dominant11", "dominanteleventh"],
        "minor11" => &["m11", "min11", "minor11", "-11", "minoreleventh"],
        "dominant13" => &["13", "dom13", "dominant13", "dominantthirteenth"],
        "major13" => &["maj13", "major13", "δ13", "majorthirteenth"],
        "minor13" => &["m13", "min13", "minor13", "-13", "minorthirteenth"],
        _ => &[],
    }
}

fn spellings(pc: PitchClass) -> Vec<String> {
    pc.spellings().into_iter().map(normalize).collect()
}

/// Roots that name the same chord. Augmented triads in root position are the
/// same pitch set from any of their three tones.
fn root_spellings(instance: &ChordInstance) -> Vec<String> {
    let root = instance.root;
    let mut roots = spellings(root);
    if instance.quality.id == "augmented" && instance.inversion == Inversion::Root {
        roots.extend(spellings(root.transpose(4)));
        roots.extend(spellings(root.transpose(8)));
    }
    roots
}

/// Every normalized string accepted as a name for `instance`.
pub fn acceptable_answers(instance: &ChordInstance) -> BTreeSet<String> {
    let quality = instance.quality;
    let mut qualities: Vec<String> = quality_synonyms(quality)
        .iter()
        .map(|s| s.to_string())
        .collect();
    qualities.push(normalize(quality.symbol));

    let inversion = instance.inversion;
    let basses = spellings(instance.bass_pitch_class());
    let mut accepted = BTreeSet::new();

    for root in root_spellings(instance) {
        for q in &qualities {
            let base = format!("{}{}", root, q);
            if inversion == Inversion::Root {
                accepted.insert(format!("{}rootposition", base));
                accepted.insert(base);
                continue;
            }

            for bass in &basses {
                accepted.insert(format!("{}/{}", base, bass));
            }
            accepted.insert(format!("{}/{}", base, inversion.index()));
            accepted.insert(format!("{}{}inversion", base, inversion.ordinal()));
            accepted.insert(format!("{}{}inversion", base, inversion.short_ordinal()));
            accepted.insert(format!("{}inversion{}", base, inversion.index()));
        }
    }

    accepted
}

/// Check a typed chord name against the generated chord.
pub fn validate_text(instance: &ChordInstance, submitted: &str) -> bool {
    let answer = normalize(submitted);
    !answer.is_empty() && acceptable_answers(instance).contains(&answer)
}
