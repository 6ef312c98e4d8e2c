//! Similarity score between normalized labels

/// Bonus for identical normalized strings
pub const EXACT_MATCH_BONUS: u32 = 1000;

/// Bonus when one whole string contains the other
pub const CONTAINMENT_BONUS: u32 = 50;

/// Per-character weight of an identical token
pub const TOKEN_EQUAL_WEIGHT: u32 = 10;

/// Per-character weight of a token contained in another
pub const TOKEN_PARTIAL_WEIGHT: u32 = 5;

/// Tokens this short or shorter carry no signal
const MIN_TOKEN_LEN: usize = 2;

/// Score a candidate label against a target; both must already be normalized.
///
/// The score is an uncapped sum of bonuses, never normalized by length.
pub fn similarity(candidate: &str, target: &str) -> u32 {
    let mut score = 0;

    if candidate == target {
        score += EXACT_MATCH_BONUS;
    }

    let candidate_tokens = significant_tokens(candidate);
    let target_tokens = significant_tokens(target);

    for a in &candidate_tokens {
        for b in &target_tokens {
            if a == b {
                score += char_len(a) * TOKEN_EQUAL_WEIGHT;
            } else if a.contains(b) || b.contains(a) {
                score += char_len(a).min(char_len(b)) * TOKEN_PARTIAL_WEIGHT;
            }
        }
    }

    if candidate.contains(target) || target.contains(candidate) {
        score += CONTAINMENT_BONUS;
    }

    score
}

fn significant_tokens(text: &str) -> Vec<&str> {
    text.split(' ')
        .filter(|token| token.chars().count() > MIN_TOKEN_LEN)
        .collect()
}

fn char_len(token: &str) -> u32 {
    token.chars().count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        // exact + "ordinateurs" (11 * 10) + "portables" (9 * 10) + containment
        assert_eq!(
            similarity("ordinateurs portables", "ordinateurs portables"),
            1000 + 110 + 90 + 50
        );
    }

    #[test]
    fn test_partial_token() {
        // "ecran" inside "ecrans": min(5, 6) * 5, plus whole-string containment
        assert_eq!(similarity("ecrans", "ecran"), 25 + 50);
    }

    #[test]
    fn test_short_tokens_ignored() {
        // "tv" is too short to count, and neither string contains the other
        assert_eq!(similarity("tv hd", "tv led"), 0);
    }

    #[test]
    fn test_unrelated() {
        assert_eq!(similarity("mobilier bureau", "telephonie"), 0);
    }
}
