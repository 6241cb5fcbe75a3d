use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::AsmOptions;
use crate::encoder::encode_tokens;
use crate::error::{AsmError, AssembleError};
use crate::isa::Isa;

pub const COMMENT_MARKER: char = '#';

/// Token separators: space, tab, comma and line terminators.
pub fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | ',' | '\r' | '\n')
}

/// Splits a line into tokens. Fails as soon as `max_tokens` tokens have been
/// collected.
pub fn tokenize(line: &str, max_tokens: usize) -> Result<Vec<&str>, AsmError> {
    let mut tokens = Vec::new();
    for token in line.split(is_separator).filter(|t| !t.is_empty()) {
        tokens.push(token);
        if tokens.len() >= max_tokens {
            return Err(AsmError::TooManyTokens { limit: max_tokens });
        }
    }
    Ok(tokens)
}

/// Turns one tokenized line into at most one word.
///
/// `Ok(None)` for a blank line or a comment (first token starts with `#` and
/// names no mnemonic). A first token that is neither fails the line.
pub fn dispatch(isa: &Isa, tokens: &[&str]) -> Result<Option<u32>, AsmError> {
    let Some(&first) = tokens.first() else {
        return Ok(None);
    };
    if let Some(entry) = isa.table().lookup(first) {
        return encode_tokens(isa, entry, tokens).map(Some);
    }
    if first.starts_with(COMMENT_MARKER) {
        return Ok(None);
    }
    Err(AsmError::UnknownInstruction {
        mnemonic: first.to_string(),
    })
}

/// Lowercase hex, zero-padded to `digits`.
pub fn format_word(word: u32, digits: usize, prefix: bool) -> String {
    if prefix {
        format!("0x{word:0digits$x}")
    } else {
        format!("{word:0digits$x}")
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[derive(Debug, Clone)]
pub struct Assembler {
    isa: Arc<Isa>,
    options: AsmOptions,
}

impl Assembler {
    pub fn new(isa: Arc<Isa>) -> Self {
        Self::with_options(isa, AsmOptions::default())
    }

    pub fn with_options(isa: Arc<Isa>, options: AsmOptions) -> Self {
        Self { isa, options }
    }

    pub fn isa(&self) -> &Isa {
        &self.isa
    }

    pub fn options(&self) -> &AsmOptions {
        &self.options
    }

    pub fn assemble_line(&self, line: &str) -> Result<Option<u32>, AsmError> {
        if line.len() > self.options.max_line_len {
            return Err(AsmError::LineTooLong {
                len: line.len(),
                limit: self.options.max_line_len,
            });
        }
        let tokens = tokenize(line, self.options.max_tokens)?;
        trace!(?tokens, "tokenized");
        dispatch(&self.isa, &tokens)
    }

    pub fn render(&self, word: u32) -> String {
        format_word(word, self.isa.config().hex_digits(), self.options.hex_prefix)
    }

    /// Streams `input` to `output`, one rendered word per line. Stops at the
    /// first failing line; words already written stay written. Returns the
    /// number of words emitted.
    ///
    /// Lines are read as raw bytes. Bytes that are not UTF-8 are replaced, so
    /// they can only surface as a bad token of that line.
    pub fn assemble<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<usize, AssembleError> {
        let mut emitted = 0;
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_no += 1;
            let line = String::from_utf8_lossy(strip_terminator(&buf));
            if let Some(word) = self.line_word(line_no, &line)? {
                writeln!(output, "{}", self.render(word))?;
                emitted += 1;
            }
        }
        output.flush()?;
        Ok(emitted)
    }

    /// Assembles an in-memory program into its words.
    pub fn assemble_str(&self, source: &str) -> Result<Vec<u32>, AssembleError> {
        let mut words = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            if let Some(word) = self.line_word(idx + 1, line)? {
                words.push(word);
            }
        }
        Ok(words)
    }

    fn line_word(&self, line_no: usize, line: &str) -> Result<Option<u32>, AssembleError> {
        let word = self
            .assemble_line(line)
            .map_err(|source| AssembleError::Line {
                line: line_no,
                text: line.trim().to_string(),
                source,
            })?;
        if let Some(word) = word {
            debug!(line = line_no, word = %format_word(word, self.isa.config().hex_digits(), true), "encoded");
        }
        Ok(word)
    }
}
