use crate::repl::help;

/// Largest edit distance still worth suggesting.
const SUGGESTION_THRESHOLD: usize = 3;

/// Classic dynamic-programming Levenshtein distance, two rolling rows.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// The known command closest to `input`, if any lies within the suggestion
/// threshold.
pub fn closest_command(input: &str) -> Option<&'static str> {
    help::command_names()
        .map(|command| (command, levenshtein(input, command)))
        .min_by_key(|&(_, distance)| distance)
        .filter(|&(_, distance)| distance <= SUGGESTION_THRESHOLD)
        .map(|(command, _)| command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("", "", 0)]
    #[case("abc", "abc", 0)]
    #[case("abc", "", 3)]
    #[case("kitten", "sitting", 3)]
    #[case("ls", "la", 1)]
    fn levenshtein_distances(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
        assert_eq!(levenshtein(a, b), expected);
        assert_eq!(levenshtein(b, a), expected);
    }

    #[rstest]
    #[case("creat", "create")]
    #[case("mkdri", "mkdir")]
    #[case("exot", "exit")]
    #[case("memory_mop", "memory_map")]
    fn suggests_near_misses(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(closest_command(input), Some(expected));
    }

    #[test]
    fn far_off_input_gets_no_suggestion() {
        assert_eq!(closest_command("xylophone_concerto"), None);
    }

    #[test]
    fn exact_command_is_its_own_closest_match() {
        assert_eq!(closest_command("truncate"), Some("truncate"));
    }
}
