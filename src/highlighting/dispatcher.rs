use crate::highlighting::pattern_matcher::{Advance, PatternMatcher};
use crate::patterns::Pattern;

/// Routes a character stream through a fixed, ordered set of matchers.
///
/// At most one matcher holds a partial match at any time. When several
/// patterns start with the same character the first declared one is
/// tracked; the others are only tried again after it completes or fails.
#[derive(Debug, Clone)]
pub struct MatchDispatcher {
    matchers: Vec<PatternMatcher>,
    active: Option<usize>,
}

impl MatchDispatcher {
    pub fn new<I: IntoIterator<Item = Pattern>>(patterns: I) -> Self {
        Self {
            matchers: patterns.into_iter().map(PatternMatcher::new).collect(),
            active: None,
        }
    }

    /// Feed one character, appending whatever becomes final to `out`.
    pub fn feed(&mut self, ch: char, out: &mut String) {
        if let Some(index) = self.active {
            match self.matchers[index].advance(ch, out) {
                Advance::Complete => {
                    self.active = None;
                    return;
                }
                Advance::Partial => return,
                // prefix was flushed, `ch` still needs a home
                Advance::NoMatch => self.active = None,
            }
        }

        for (index, matcher) in self.matchers.iter_mut().enumerate() {
            debug_assert!(matcher.is_idle());
            match matcher.advance(ch, out) {
                Advance::Partial => {
                    self.active = Some(index);
                    return;
                }
                Advance::Complete => return,
                Advance::NoMatch => {}
            }
        }
        out.push(ch);
    }

    pub fn feed_str(&mut self, s: &str, out: &mut String) {
        for ch in s.chars() {
            self.feed(ch, out);
        }
    }

    /// End of stream: emit a still held prefix literally.
    pub fn finish(&mut self, out: &mut String) {
        if let Some(index) = self.active.take() {
            self.matchers[index].flush(out);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Pattern currently holding a partial match, if any.
    pub fn active_pattern(&self) -> Option<&Pattern> {
        self.active.map(|index| self.matchers[index].pattern())
    }

    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.matchers.iter().map(PatternMatcher::pattern)
    }

    /// Completed matches per pattern, in declared order.
    pub fn match_counts(&self) -> Vec<(&Pattern, u64)> {
        self.matchers
            .iter()
            .map(|matcher| (matcher.pattern(), matcher.matches()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighting::style::Style;
    use crate::highlighting::visible_length::length_visible;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn dispatcher(patterns: &[(&str, &str)]) -> MatchDispatcher {
        MatchDispatcher::new(
            patterns
                .iter()
                .map(|(target, token)| Pattern::parse(target, token).unwrap()),
        )
    }

    fn run(d: &mut MatchDispatcher, input: &str) -> String {
        let mut out = String::new();
        d.feed_str(input, &mut out);
        out
    }

    fn decorate(s: &str, token: &str) -> String {
        token.parse::<Style>().unwrap().decorate(s)
    }

    #[test]
    fn test_no_patterns_is_identity() {
        let mut d = MatchDispatcher::new(Vec::<Pattern>::new());
        assert_eq!(run(&mut d, "anything at all\n"), "anything at all\n");
        assert!(d.is_idle());
    }

    #[test]
    fn test_exact_pattern() {
        let mut d = dispatcher(&[("GATC", "+red")]);
        let out = run(&mut d, "GATC");
        assert_eq!(out, decorate("GATC", "+red"));
        assert_eq!(length_visible(&out), 4);
    }

    #[test]
    fn test_surrounding_text_passes_through() {
        let mut d = dispatcher(&[("GATC", "green")]);
        assert_eq!(
            run(&mut d, "AAGATCTT"),
            format!("AA{}TT", decorate("GATC", "green"))
        );
    }

    #[test]
    fn test_back_to_back_matches() {
        let mut d = dispatcher(&[("aa", "blue")]);
        let mut out = String::new();
        for (i, ch) in "aaaa".chars().enumerate() {
            d.feed(ch, &mut out);
            // idle again after each completed pair
            assert_eq!(d.is_idle(), i % 2 == 1);
        }
        assert_eq!(out, decorate("aa", "blue").repeat(2));
        assert_eq!(d.match_counts()[0].1, 2);
    }

    #[test]
    fn test_shared_prefix_first_declared_wins() {
        let mut d = dispatcher(&[("cat", "red"), ("catalog", "green")]);
        assert_eq!(
            run(&mut d, "catalog"),
            format!("{}alog", decorate("cat", "red"))
        );
        assert_eq!(d.match_counts()[1].1, 0);
    }

    #[test]
    fn test_shared_prefix_later_pattern_can_match_elsewhere() {
        let mut d = dispatcher(&[("cab", "red"), ("ca", "green")]);
        // "cab" fails at 'x' and "ca" is never tried on the same start
        assert_eq!(run(&mut d, "cax"), "cax");
        assert_eq!(run(&mut d, "cab"), decorate("cab", "red"));
    }

    #[test]
    fn test_mismatch_mid_pattern() {
        let mut d = dispatcher(&[("abc", "red")]);
        assert_eq!(run(&mut d, "abx"), "abx");
        assert!(d.is_idle());
    }

    #[test]
    fn test_failing_char_rescanned() {
        let mut d = dispatcher(&[("abc", "red"), ("x", "cyan")]);
        assert_eq!(run(&mut d, "abx"), format!("ab{}", decorate("x", "cyan")));

        let mut d = dispatcher(&[("abc", "red")]);
        // the mismatching 'a' starts a fresh match
        assert_eq!(run(&mut d, "aabc"), format!("a{}", decorate("abc", "red")));
    }

    #[test]
    fn test_replay_does_not_revisit_held_prefix() {
        // "aab" contains "ab" but only from the second char, which was held
        // by the failing matcher and is replayed literally
        let mut d = dispatcher(&[("aac", "red"), ("ab", "green")]);
        assert_eq!(run(&mut d, "aab"), "aab");
    }

    #[test]
    fn test_active_pattern_and_finish() {
        let mut d = dispatcher(&[("ACGT", "red"), ("TT", "blue")]);
        let mut out = String::new();
        d.feed_str("xxAC", &mut out);
        assert_eq!(out, "xx");
        assert_eq!(d.active_pattern().map(Pattern::target), Some("ACGT"));
        d.finish(&mut out);
        assert_eq!(out, "xxAC");
        assert!(d.is_idle());
        assert!(d.active_pattern().is_none());
        // finishing twice is harmless
        d.finish(&mut out);
        assert_eq!(out, "xxAC");
    }

    #[test]
    fn test_single_char_pattern_never_active() {
        let mut d = dispatcher(&[("N", "yellow")]);
        let mut out = String::new();
        d.feed('N', &mut out);
        assert!(d.is_idle());
        assert_eq!(out, decorate("N", "yellow"));
    }

    #[test]
    fn test_input_without_patterns_unchanged() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut d = dispatcher(&[("GGGG", "red"), ("TATA", "+green")]);
        let mut checked = 0;
        for _ in 0..300 {
            let len = rng.gen_range(0..64);
            let input: String = (0..len)
                .map(|_| ['A', 'C', 'G', 'T', '\n'][rng.gen_range(0..5)])
                .collect();
            if input.contains("GGGG") || input.contains("TATA") {
                continue;
            }
            let mut out = run(&mut d, &input);
            d.finish(&mut out);
            assert_eq!(out, input);
            checked += 1;
        }
        assert!(checked > 100, "only {} inputs checked", checked);
    }

    #[test]
    fn test_only_active_matcher_holds_state() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut d = dispatcher(&[
            ("ACG", "red"),
            ("AC", "blue"),
            ("CA", "green"),
            ("GGT", "+cyan"),
            ("T", "white"),
        ]);
        let mut out = String::new();
        for _ in 0..5000 {
            let ch = ['A', 'C', 'G', 'T'][rng.gen_range(0..4)];
            d.feed(ch, &mut out);
            if let Some(index) = d.active {
                assert!(!d.matchers[index].is_idle());
            }
            for (index, matcher) in d.matchers.iter().enumerate() {
                if d.active != Some(index) {
                    assert!(matcher.is_idle(), "matcher {} holds state after {:?}", index, ch);
                }
            }
        }
    }

    #[test]
    fn test_chunk_invariance() {
        let mut rng = StdRng::seed_from_u64(7);
        let patterns = [("ACG", "red"), ("AC", "blue"), ("GG", "+cyan"), ("T", "white")];
        for _ in 0..300 {
            let len = rng.gen_range(0..40);
            let input: String = (0..len)
                .map(|_| ['A', 'C', 'G', 'T'][rng.gen_range(0..4)])
                .collect();

            let mut whole = dispatcher(&patterns);
            let mut expected = run(&mut whole, &input);
            whole.finish(&mut expected);

            let split = rng.gen_range(0..=input.len());
            let mut chunked = dispatcher(&patterns);
            let mut out = String::new();
            chunked.feed_str(&input[..split], &mut out);
            chunked.feed_str(&input[split..], &mut out);
            chunked.finish(&mut out);

            assert_eq!(out, expected, "input {:?} split at {}", input, split);
            assert_eq!(length_visible(&out), input.len());
        }
    }

    #[test]
    fn test_match_counts_in_declared_order() {
        let mut d = dispatcher(&[("AG", "red"), ("CT", "green")]);
        run(&mut d, "AGCTAGxCT CT");
        let counts: Vec<(&str, u64)> = d
            .match_counts()
            .into_iter()
            .map(|(pattern, count)| (pattern.target(), count))
            .collect();
        assert_eq!(counts, vec![("AG", 2), ("CT", 3)]);
        assert_eq!(d.patterns().count(), 2);
    }
}
