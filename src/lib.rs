pub mod assembler;
pub mod config;
pub mod decoder;
pub mod disasm;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod isa;
pub mod layout;
pub mod operand;

pub use assembler::{dispatch, format_word, tokenize, Assembler};
pub use config::{AsmOptions, IsaConfig};
pub use decoder::{Decoded, Decoder, Operands};
pub use error::{AsmError, AssembleError};
pub use instructions::{Format, MnemonicEntry, MnemonicTable};
pub use isa::{Isa, IsaFile};
