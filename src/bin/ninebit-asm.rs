use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ninebit_asm::error::{exit, exit_status};
use ninebit_asm::{AsmOptions, Assembler, Isa};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble a program for the 9-bit machine into hex words, one per line"
)]
struct Opts {
    /// Assembly source, one instruction per line
    #[arg(value_name = "ASSEMBLY-FILE", required_unless_present = "dump_isa")]
    input: Option<PathBuf>,
    /// Where to write the words (default: stdout)
    #[arg(value_name = "OUTPUT-FILE")]
    output: Option<PathBuf>,
    /// JSON ISA description replacing the reference machine
    #[arg(long, value_name = "FILE")]
    isa: Option<PathBuf>,
    /// Emit words without the 0x prefix
    #[arg(long)]
    no_prefix: bool,
    /// Print the active ISA description as JSON and exit
    #[arg(long)]
    dump_isa: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(exit::USAGE);
        }
    };

    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_status(&err))
        }
    }
}

fn load_isa(path: Option<&Path>) -> Result<Isa> {
    let Some(path) = path else {
        return Ok(Isa::reference());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("couldn't read ISA description {}", path.display()))?;
    let isa = Isa::from_json(&text).with_context(|| format!("in {}", path.display()))?;
    info!(path = %path.display(), mnemonics = isa.table().len(), "loaded ISA description");
    Ok(isa)
}

fn run(opts: Opts) -> Result<()> {
    let isa = Arc::new(load_isa(opts.isa.as_deref())?);

    if opts.dump_isa {
        println!("{}", serde_json::to_string_pretty(&isa.to_file())?);
        return Ok(());
    }

    // clap enforces presence unless --dump-isa was given
    let Some(input) = opts.input else {
        return Ok(());
    };
    let source = File::open(&input)
        .with_context(|| format!("couldn't open assembly file {}", input.display()))?;
    let reader = BufReader::new(source);

    let options = AsmOptions {
        hex_prefix: !opts.no_prefix,
        ..AsmOptions::default()
    };
    let asm = Assembler::with_options(isa, options);

    let words = match &opts.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("couldn't open output file {}", path.display()))?;
            asm.assemble(reader, BufWriter::new(file))?
        }
        None => asm.assemble(reader, io::stdout().lock())?,
    };
    info!(input = %input.display(), words, "assembled");
    Ok(())
}
