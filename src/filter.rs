use crate::highlighting::MatchDispatcher;
use crate::io::{open_input, InputSource};
use crate::patterns::{adapter_preset, load_patterns_csv, parse_pattern_arg, Pattern};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use crossterm::tty::IsTty;
use std::io::{BufRead, ErrorKind, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Highlight only when stdout is a terminal.
    Auto,
    /// Highlight regardless of where output goes.
    Always,
    /// Pass input through untouched.
    Never,
}

#[derive(Debug, Args, Clone)]
pub struct HighlightArgs {
    /// Input files, read in order. `-` or no file reads stdin; `.gz` files are decompressed.
    pub files: Vec<PathBuf>,

    /// Pattern to highlight as TARGET:COLOR, e.g. `AGATCGGAAGAGC:+red`.
    /// Colors: black, red, green, yellow, blue, purple, cyan, white; a leading `+` means bold.
    /// Repeatable; earlier patterns win when two start with the same character.
    #[clap(short, long = "pattern", value_name = "TARGET:COLOR")]
    pub patterns: Vec<String>,

    /// CSV file with the header `pattern,color[,comment]`. Loaded after --pattern.
    /// Rows starting with `#` are comments; use --pattern for targets that begin with `#`.
    #[clap(short = 'f', long)]
    pub patterns_file: Option<PathBuf>,

    /// Append the built-in sequencing adaptor and polyA/polyT patterns.
    #[clap(long)]
    pub adapters: bool,

    #[clap(long, value_enum, default_value_t = ColorMode::Always)]
    pub color: ColorMode,

    /// Flush output after every chunk read from the input.
    #[clap(long)]
    pub line_buffered: bool,

    /// Print the number of matches per pattern to stderr when done.
    #[clap(long)]
    pub summary: bool,
}

/// Validated settings for one highlighting run.
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    pub inputs: Vec<InputSource>,
    pub patterns: Vec<Pattern>,
    pub enabled: bool,
    pub line_buffered: bool,
    pub summary: bool,
}

impl HighlightConfig {
    /// Create a new configuration from CLI arguments.
    ///
    /// Every pattern is parsed and checked here, before any input is read.
    pub fn from_args(args: &HighlightArgs, stdout_is_tty: bool) -> Result<Self> {
        let mut patterns = args
            .patterns
            .iter()
            .map(|arg| parse_pattern_arg(arg))
            .collect::<Result<Vec<Pattern>, _>>()?;
        if let Some(path) = &args.patterns_file {
            patterns.extend(load_patterns_csv(path)?);
        }
        if args.adapters {
            patterns.extend(adapter_preset());
        }

        let inputs = if args.files.is_empty() {
            vec![InputSource::Stdin]
        } else {
            args.files
                .iter()
                .map(|path| InputSource::from_path(path))
                .collect()
        };

        let enabled = match args.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => stdout_is_tty,
        };

        Ok(HighlightConfig {
            inputs,
            patterns,
            enabled,
            line_buffered: args.line_buffered,
            summary: args.summary,
        })
    }
}

/// Streams text from readers to a writer through a [`MatchDispatcher`].
pub struct Highlighter<W: Write> {
    dispatcher: MatchDispatcher,
    writer: W,
    buffer: String,
    line_buffered: bool,
}

impl<W: Write> Highlighter<W> {
    pub fn new(dispatcher: MatchDispatcher, writer: W) -> Self {
        Self {
            dispatcher,
            writer,
            buffer: String::new(),
            line_buffered: false,
        }
    }

    pub fn line_buffered(mut self, line_buffered: bool) -> Self {
        self.line_buffered = line_buffered;
        self
    }

    /// Highlight one input stream to the end, then drain any held partial match.
    ///
    /// Input is consumed in the reader's own buffer-sized chunks, so memory
    /// stays bounded even without newlines. Bytes that are not valid UTF-8
    /// are written through unchanged. Returns the number of bytes read.
    pub fn process<R: BufRead>(&mut self, mut reader: R) -> Result<u64> {
        let mut carry: Vec<u8> = Vec::new();
        let mut read = 0;
        loop {
            let chunk = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            let eof = chunk.is_empty();
            let len = chunk.len();
            carry.extend_from_slice(chunk);
            reader.consume(len);
            read += len as u64;

            let held = self.highlight_bytes(&carry, eof)?;
            carry.drain(..carry.len() - held);
            if self.line_buffered {
                self.writer.flush()?;
            }
            if eof {
                break;
            }
        }
        self.drain_partial()?;
        self.writer.flush()?;
        Ok(read)
    }

    /// Feed `bytes` to the dispatcher and write the result.
    ///
    /// Returns how many trailing bytes were held back because they start a
    /// UTF-8 sequence that the next chunk may complete. Nothing is held at
    /// end of input.
    fn highlight_bytes(&mut self, bytes: &[u8], eof: bool) -> Result<usize> {
        self.buffer.clear();
        let mut chunks = bytes.utf8_chunks().peekable();
        let mut held = 0;
        while let Some(chunk) = chunks.next() {
            self.dispatcher.feed_str(chunk.valid(), &mut self.buffer);
            let invalid = chunk.invalid();
            if invalid.is_empty() {
                continue;
            }
            if !eof && chunks.peek().is_none() && is_incomplete_utf8(invalid) {
                held = invalid.len();
                break;
            }
            // an invalid byte can never extend a match
            self.drain_partial()?;
            self.writer.write_all(invalid)?;
        }
        self.writer.write_all(self.buffer.as_bytes())?;
        self.buffer.clear();
        Ok(held)
    }

    /// Write out pending output plus any held prefix, leaving the dispatcher idle.
    fn drain_partial(&mut self) -> Result<()> {
        if let Some(pattern) = self.dispatcher.active_pattern() {
            log::debug!("Flushing partial match of '{}'", pattern.target());
        }
        self.dispatcher.finish(&mut self.buffer);
        self.writer.write_all(self.buffer.as_bytes())?;
        self.buffer.clear();
        Ok(())
    }

    pub fn dispatcher(&self) -> &MatchDispatcher {
        &self.dispatcher
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn is_incomplete_utf8(bytes: &[u8]) -> bool {
    matches!(std::str::from_utf8(bytes), Err(e) if e.error_len().is_none())
}

/// Human readable match counts, one pattern per line.
pub fn format_summary(dispatcher: &MatchDispatcher) -> String {
    let mut ret = String::new();
    for (pattern, count) in dispatcher.match_counts() {
        let label = match pattern.comment() {
            Some(comment) => format!("{} ({})", pattern.target(), comment),
            None => pattern.target().to_string(),
        };
        ret.push_str(&format!(
            "{}\t{}\n",
            count,
            pattern.style().decorate(&label)
        ));
    }
    ret
}

pub fn run(args: &HighlightArgs) -> Result<()> {
    let config = HighlightConfig::from_args(args, std::io::stdout().is_tty())?;

    let patterns = if config.enabled {
        config.patterns.clone()
    } else {
        log::info!("Highlighting disabled, passing input through");
        if config.summary {
            log::warn!("--summary reports zero matches while highlighting is disabled");
        }
        Vec::new()
    };
    if config.enabled && patterns.is_empty() {
        log::warn!("No patterns configured, input will be passed through unchanged");
    }
    log::info!("Highlighting {} pattern(s)", patterns.len());

    let stdout = std::io::stdout();
    let mut highlighter = Highlighter::new(
        MatchDispatcher::new(patterns),
        std::io::BufWriter::new(stdout.lock()),
    )
    .line_buffered(config.line_buffered);
    for pattern in highlighter.dispatcher().patterns() {
        log::debug!("Pattern '{}' as {}", pattern.target(), pattern.style());
    }

    for input in &config.inputs {
        log::info!("Reading {}", input);
        let reader = open_input(input)?;
        let bytes = highlighter
            .process(reader)
            .with_context(|| format!("Error while highlighting {}", input))?;
        log::info!("Finished {} after {} bytes", input, bytes);
    }

    if config.summary {
        eprint!("{}", format_summary(highlighter.dispatcher()));
    }
    Ok(())
}
