use crate::error::ConfigError;
use crate::highlighting::Style;
use anyhow::{Context, Result};
use std::path::Path;

/// A target string and the style its occurrences are rendered with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    target: String,
    style: Style,
    comment: Option<String>,
}

impl Pattern {
    pub fn new(target: impl Into<String>, style: Style) -> Result<Self, ConfigError> {
        let target = target.into();
        if target.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        Ok(Self {
            target,
            style,
            comment: None,
        })
    }

    /// Build a pattern from a target and a style token such as `red` or `+blue`.
    pub fn parse(target: &str, token: &str) -> Result<Self, ConfigError> {
        Self::new(target, token.parse::<Style>()?)
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        let comment = comment.into();
        self.comment = if comment.is_empty() { None } else { Some(comment) };
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Parse a `TARGET:COLOR` command line argument.
///
/// The split happens at the last `:` so targets may contain colons themselves.
pub fn parse_pattern_arg(arg: &str) -> Result<Pattern, ConfigError> {
    let (target, token) = arg
        .rsplit_once(':')
        .ok_or_else(|| ConfigError::MalformedPattern(arg.to_string()))?;
    Pattern::parse(target, token)
}

/// Load patterns from a CSV file with the header `pattern,color[,comment]`.
///
/// Lines starting with `#` are skipped. Row order is kept, since it decides
/// which pattern wins when two share a first character.
pub fn load_patterns_csv(path: &Path) -> Result<Vec<Pattern>> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::Headers)
        .from_path(path)
        .with_context(|| format!("Failed to open patterns file '{}'", path.display()))?;
    read_patterns_csv(reader)
        .with_context(|| format!("Failed to read patterns file '{}'", path.display()))
}

fn read_patterns_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Pattern>> {
    let mut patterns = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = i + 2;
        let target = record
            .get(0)
            .with_context(|| format!("line {}: missing pattern column", line))?;
        let token = record
            .get(1)
            .with_context(|| format!("line {}: missing color column", line))?
            .trim();
        let mut pattern =
            Pattern::parse(target, token).with_context(|| format!("line {}", line))?;
        if let Some(comment) = record.get(2) {
            pattern = pattern.with_comment(comment.trim());
        }
        patterns.push(pattern);
    }
    Ok(patterns)
}

/// Common sequencing adaptors and homopolymer tails.
pub fn adapter_preset() -> Vec<Pattern> {
    use crate::highlighting::Color;
    vec![
        ("CTACACGACGCTCTTCCGATCT", Color::Blue, "Read 1 adaptor"),
        ("AGATCGGAAGAGCGTCGTGTAG", Color::Green, "Read 1 adaptor, reverse complement"),
        ("TTTTTTTTTTTT", Color::Blue, "polyT"),
        ("AAAAAAAAAAAA", Color::Green, "polyA"),
        ("TCTTCTTTC", Color::Red, "TSO"),
    ]
    .into_iter()
    .map(|(target, color, comment)| Pattern {
        target: target.to_string(),
        style: Style::new(color, false),
        comment: Some(comment.to_string()),
    })
    .collect()
}
