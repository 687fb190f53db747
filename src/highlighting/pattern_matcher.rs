use crate::patterns::Pattern;

/// Result of feeding one character to a [`PatternMatcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Last character of the target matched; the decorated target was emitted.
    Complete,
    /// Character matched but the target is not finished; nothing was emitted.
    Partial,
    /// Character did not match; any held prefix was emitted verbatim.
    /// The character itself is left to the caller.
    NoMatch,
}

/// Incremental matcher for a single pattern.
///
/// The characters consumed so far are always `target[..cursor]`, so the held
/// prefix never needs a buffer of its own.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
    target: Vec<char>,
    cursor: usize,
    matches: u64,
}

impl PatternMatcher {
    pub fn new(pattern: Pattern) -> Self {
        let target = pattern.target().chars().collect();
        Self {
            pattern,
            target,
            cursor: 0,
            matches: 0,
        }
    }

    pub fn advance(&mut self, ch: char, out: &mut String) -> Advance {
        if self.target[self.cursor] == ch {
            self.cursor += 1;
            if self.cursor == self.target.len() {
                self.pattern
                    .style()
                    .decorate_into(self.pattern.target(), out);
                self.cursor = 0;
                self.matches += 1;
                Advance::Complete
            } else {
                Advance::Partial
            }
        } else {
            self.flush(out);
            Advance::NoMatch
        }
    }

    /// Emit the held prefix verbatim and go back to the idle state.
    pub fn flush(&mut self, out: &mut String) {
        out.extend(&self.target[..self.cursor]);
        self.cursor = 0;
    }

    pub fn is_idle(&self) -> bool {
        self.cursor == 0
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Number of completed matches since construction.
    pub fn matches(&self) -> u64 {
        self.matches
    }
}
