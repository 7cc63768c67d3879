//! "Did you mean?" suggestions for misspelled class names.
//!
//! A case-insensitive exact match wins; otherwise the candidate with the
//! smallest Levenshtein distance within a length-based threshold.

/// Levenshtein distance, computed over one row of the DP table.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        // `diagonal` holds row[j] of the previous iteration.
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &b_char) in b.iter().enumerate() {
            let substitute = diagonal + usize::from(a_char != b_char);
            diagonal = row[j + 1];
            row[j + 1] = substitute.min(row[j] + 1).min(diagonal + 1);
        }
    }

    row[b.len()]
}

/// Maximum edit distance considered a plausible typo.
///
/// - 1-2 chars: 1 edit
/// - 3-5 chars: 2 edits
/// - 6-10 chars: 3 edits
/// - longer: half the length, max 5
fn default_threshold(name_len: usize) -> usize {
    match name_len {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=10 => 3,
        n => (n / 2).min(5),
    }
}

/// Find the class name `name` most plausibly meant.
///
/// Ties are broken alphabetically so the result does not depend on
/// registration order.
pub fn suggest_class<'a>(name: &str, candidates: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }

    let threshold = default_threshold(name.len());
    let mut best: Option<(&str, usize)> = None;

    for candidate in candidates {
        let distance = if candidate.eq_ignore_ascii_case(name) {
            0
        } else {
            if name.len().abs_diff(candidate.len()) > threshold {
                continue;
            }
            edit_distance(name, candidate)
        };

        if distance > threshold {
            continue;
        }

        match best {
            Some((best_name, best_dist))
                if distance > best_dist || (distance == best_dist && candidate >= best_name) => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(s, _)| s)
}

#[cfg(test)]
mod tests;
