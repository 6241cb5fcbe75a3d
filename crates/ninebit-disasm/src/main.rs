use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use ninebit_asm::Isa;
use ninebit_disasm::{disassemble, load_listing, render_json, render_text};

#[derive(Parser, Debug)]
#[command(author, version, about = "Disassemble a ninebit-asm hex listing", long_about = None)]
struct Cli {
    /// Hex listing, one word per line
    #[arg(value_name = "LISTING")]
    input: PathBuf,
    /// JSON ISA description (default: the reference 9-bit machine)
    #[arg(long, value_name = "FILE")]
    isa: Option<PathBuf>,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Prefix each text line with its word
    #[arg(long)]
    show_words: bool,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn load_isa(path: Option<&Path>) -> Result<Isa> {
    match path {
        None => Ok(Isa::reference()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("couldn't read ISA description {}", path.display()))?;
            Ok(Isa::from_json(&text).with_context(|| format!("in {}", path.display()))?)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let isa = load_isa(cli.isa.as_deref())?;
    let words = load_listing(&cli.input)?;
    let lines = disassemble(&isa, &words);

    let buf = match cli.format {
        OutputFormat::Text => render_text(&lines, cli.show_words),
        OutputFormat::Json => render_json(&lines)? + "\n",
    };
    if let Some(path) = cli.out {
        std::fs::write(&path, buf).with_context(|| format!("couldn't write {}", path.display()))?;
    } else {
        print!("{}", buf);
    }
    Ok(())
}
