use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;

use ninebit_asm::decoder::{Decoded, Decoder};
use ninebit_asm::disasm::fmt_decoded;
use ninebit_asm::{format_word, Isa};

use crate::model::ListingWord;

#[derive(Debug, Clone, Serialize)]
pub struct LineOut {
    pub line: usize,
    pub word: String,
    pub text: String,
    pub decoded: Option<Decoded>,
}

pub fn disassemble(isa: &Isa, words: &[ListingWord]) -> Vec<LineOut> {
    let digits = isa.config().hex_digits();
    words
        .iter()
        .map(|w| {
            let word = format_word(w.word, digits, true);
            let decoded = isa.decode(w.word);
            let text = match &decoded {
                Some(d) => fmt_decoded(d),
                None => format!(".word {word}"),
            };
            LineOut { line: w.line, word, text, decoded }
        })
        .collect()
}

pub fn render_text(lines: &[LineOut], show_words: bool) -> String {
    let mut buf = String::new();
    for l in lines {
        if show_words {
            let _ = writeln!(buf, "{}:  {}", l.word, l.text);
        } else {
            let _ = writeln!(buf, "{}", l.text);
        }
    }
    buf
}

pub fn render_json(lines: &[LineOut]) -> Result<String> {
    Ok(serde_json::to_string_pretty(lines)?)
}
