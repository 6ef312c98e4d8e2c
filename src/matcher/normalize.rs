//! Label normalization

/// Fold a label for comparison.
///
/// Lower-cases, strips French accents, turns `/ - ( )` into spaces, then
/// collapses whitespace runs and trims.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .chars()
        .map(|c| match fold_accent(c) {
            '/' | '-' | '(' | ')' => ' ',
            other => other,
        })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_accent(c: char) -> char {
    match c {
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'à' | 'â' | 'ä' => 'a',
        'ô' | 'ö' => 'o',
        'î' | 'ï' => 'i',
        'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}
