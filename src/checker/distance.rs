/// Levenshtein distance between two words: the fewest single-character
/// insertions, deletions and substitutions turning `a` into `b`.
///
/// Fills the full `(|b| + 1) x (|a| + 1)` table; words handed to it are
/// short, so the quadratic space is fine.
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    let mut table = vec![vec![0usize; a_len + 1]; b_len + 1];

    for (i, cell) in table[0].iter_mut().enumerate() {
        *cell = i;
    }
    for (j, row) in table.iter_mut().enumerate() {
        row[0] = j;
    }

    for j in 1..=b_len {
        for i in 1..=a_len {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };

            table[j][i] = (table[j][i - 1] + 1) // insertion
                .min(table[j - 1][i] + 1) // deletion
                .min(table[j - 1][i - 1] + cost); // substitution
        }
    }

    table[b_len][a_len]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const WORDS: &[&str] = &[
        "", "a", "cat", "cats", "caterpillar", "night", "nigth", "knight", "write", "right",
        "hello", "hallo", "world", "café", "cafe",
    ];

    #[test]
    fn test_edit_distance() {
        assert_eq!(distance("hello", "hello"), 0);
        assert_eq!(distance("hello", "hallo"), 1);
        assert_eq!(distance("hello", "world"), 4);
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("nigth", "night"), 2);
        assert_eq!(distance("cats", "cat"), 1);
        assert_eq!(distance("caterpillar", "cat"), 8);
        assert_eq!(distance("café", "cafe"), 1);
    }

    #[test]
    fn test_empty_side_costs_full_length() {
        for word in WORDS {
            assert_eq!(distance("", word), word.chars().count());
            assert_eq!(distance(word, ""), word.chars().count());
        }
    }

    #[test]
    fn test_metric_laws() {
        for a in WORDS {
            assert_eq!(distance(a, a), 0);
            for b in WORDS {
                let ab = distance(a, b);
                assert_eq!(ab, distance(b, a), "symmetry for {:?} {:?}", a, b);
                if a != b {
                    assert!(ab > 0);
                }
                for c in WORDS {
                    assert!(
                        ab <= distance(a, c) + distance(c, b),
                        "triangle for {:?} {:?} {:?}",
                        a,
                        b,
                        c
                    );
                }
            }
        }
    }
}
