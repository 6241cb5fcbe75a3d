use crate::instructions::Format;

/// Process exit statuses, one per failure class.
pub mod exit {
    pub const USAGE: u8 = 1;
    pub const FILE: u8 = 2;
    pub const LIMIT: u8 = 3;
    pub const SYNTAX: u8 = 4;
    pub const RANGE: u8 = 5;
    pub const ARITY: u8 = 6;
    pub const UNKNOWN_INSTRUCTION: u8 = 7;
    pub const CONFIG: u8 = 8;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("syntax error: {reason}: got `{token}`")]
    Syntax { token: String, reason: &'static str },
    #[error("invalid argument: integer out of range ({min} < x < {max}): got `{token}`")]
    Range { token: String, min: i64, max: i64 },
    #[error(
        "invalid arguments for {format}-instruction `{mnemonic}`: expected {expected} operands, got {got}"
    )]
    Arity {
        mnemonic: String,
        format: Format,
        expected: usize,
        got: usize,
    },
    #[error("invalid instruction: got `{mnemonic}`")]
    UnknownInstruction { mnemonic: String },
    #[error("too many tokens: a line must hold fewer than {limit}")]
    TooManyTokens { limit: usize },
    #[error("line too long: {len} bytes, limit is {limit}")]
    LineTooLong { len: usize, limit: usize },
    #[error("invalid ISA description: {reason}")]
    InvalidConfig { reason: String },
}

impl AsmError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AsmError::Syntax { .. } => exit::SYNTAX,
            AsmError::Range { .. } => exit::RANGE,
            AsmError::Arity { .. } => exit::ARITY,
            AsmError::UnknownInstruction { .. } => exit::UNKNOWN_INSTRUCTION,
            AsmError::TooManyTokens { .. } | AsmError::LineTooLong { .. } => exit::LIMIT,
            AsmError::InvalidConfig { .. } => exit::CONFIG,
        }
    }
}

/// Failure of a whole assembly run: the first bad line, or the stream itself.
#[derive(thiserror::Error, Debug)]
pub enum AssembleError {
    #[error("line {line} (`{text}`)")]
    Line {
        line: usize,
        text: String,
        #[source]
        source: AsmError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AssembleError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AssembleError::Line { source, .. } => source.exit_code(),
            AssembleError::Io(_) => exit::FILE,
        }
    }

    /// The encoding failure behind a line error.
    pub fn asm_error(&self) -> Option<&AsmError> {
        match self {
            AssembleError::Line { source, .. } => Some(source),
            AssembleError::Io(_) => None,
        }
    }
}

/// Exit status for an error reaching the top of a binary. Context layers are
/// looked through; anything that is not an assembly error is a file error.
pub fn exit_status(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<AssembleError>() {
        e.exit_code()
    } else if let Some(e) = err.downcast_ref::<AsmError>() {
        e.exit_code()
    } else {
        exit::FILE
    }
}
