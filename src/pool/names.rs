use super::{canonical, Element, OCTAVE};

/// Pitch-class names, sharps only (C = 0)
const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Interval short names by semitone count within one octave
const INTERVAL_NAMES: [&str; 13] = [
    "P1", "m2", "M2", "m3", "M3", "P4", "TT", "P5", "m6", "M6", "m7", "M7", "P8",
];

/// Pitch-class name of an offset from C
pub fn pitch_name(element: Element) -> &'static str {
    PITCH_NAMES[canonical(element, OCTAVE) as usize]
}

/// Short name for an interval magnitude. Compound intervals beyond an
/// octave fall back to their simple name.
pub fn interval_name(magnitude: Element) -> &'static str {
    let magnitude = magnitude.saturating_abs();
    if magnitude <= OCTAVE {
        INTERVAL_NAMES[magnitude as usize]
    } else {
        match canonical(magnitude, OCTAVE) {
            0 => "P8",
            simple => INTERVAL_NAMES[simple as usize],
        }
    }
}

/// Parse a pitch name (case-insensitive, `#` or `b` accidentals) to 0..12
pub fn parse_pitch(name: &str) -> Option<Element> {
    let mut chars = name.trim().chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let natural = match letter {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let accidental = match chars.as_str() {
        "" => 0,
        "#" | "s" => 1,
        "b" => -1,
        _ => return None,
    };
    Some(canonical(natural + accidental, OCTAVE))
}
