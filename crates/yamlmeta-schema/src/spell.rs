//! Closest-match suggestions for misspelled keys.

/// The candidate closest to `word` by edit distance, if it is close enough.
///
/// A candidate qualifies when its distance is at most half the length of
/// `word` (and at least 1). Ties go to the candidate listed first.
pub fn nearest<'a>(word: &str, candidates: &'a [String]) -> Option<&'a str> {
    let limit = (word.chars().count() / 2).max(1);
    let mut best: Option<(&str, usize)> = None;

    for candidate in candidates {
        let dist = levenshtein_distance(word, candidate);
        if dist > limit {
            continue;
        }
        match best {
            Some((_, best_dist)) if best_dist <= dist => {}
            _ => best = Some((candidate, dist)),
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Simple Levenshtein distance calculation.
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_distance() {
        assert_eq!(levenshtein_distance("nme", "name"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
    }

    #[test]
    fn test_nearest_prefers_closest() {
        assert_eq!(nearest("nme", &keys(&["name", "namespace"])), Some("name"));
        assert_eq!(nearest("replica", &keys(&["image", "replicas"])), Some("replicas"));
    }

    #[test]
    fn test_nearest_none_when_far() {
        assert_eq!(nearest("zzz", &keys(&["name", "namespace"])), None);
        assert_eq!(nearest("x", &keys(&["abc"])), None);
    }

    #[test]
    fn test_tie_goes_to_first() {
        assert_eq!(nearest("ab", &keys(&["aa", "bb"])), Some("aa"));
    }
}
