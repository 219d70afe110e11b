/// Folds `text` into `[offset, offset + max)`.
///
/// The rolling hash runs over UTF-16 code units in wrapping `i32` arithmetic,
/// so results match any other implementation of the same 32-bit hash bit for
/// bit. A `max` of zero is treated as one.
pub fn hash_score(text: &str, max: u32, offset: u32) -> u32 {
    let hash = text.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    hash.unsigned_abs() % max.max(1) + offset
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const DEFAULT_MAX: u32 = 100;

    #[rstest]
    #[case("", 40, 0)]
    #[case("a", 40, 17)]
    #[case("ab", 100, 5)]
    #[case("https://example.com", 40, 14)]
    #[case("https://example.comseo", 25, 9)]
    #[case("https://example.comconsistent_platforms", 10, 9)]
    #[case("https://www.openai.comseo", DEFAULT_MAX, 70)]
    #[case("héllo😀", DEFAULT_MAX, 65)]
    fn matches_reference_values(#[case] text: &str, #[case] max: u32, #[case] expected: u32) {
        assert_eq!(hash_score(text, max, 0), expected);
    }

    #[test]
    fn offset_shifts_the_range() {
        assert_eq!(hash_score("a", 40, 5), 22);
    }

    #[test]
    fn stays_in_range_and_repeats() {
        let long = "z".repeat(10_000);
        let inputs = ["", "x", "https://example.com", long.as_str()];
        for text in inputs {
            for max in [1, 7, 10, 25, 40, 100] {
                let first = hash_score(text, max, 3);
                assert!((3..3 + max).contains(&first));
                assert_eq!(first, hash_score(text, max, 3));
            }
        }
    }

    #[test]
    fn zero_max_does_not_panic() {
        assert_eq!(hash_score("anything", 0, 2), 2);
    }
}
