use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::IsaConfig;
use crate::error::AsmError;
use crate::instructions::{Format, MnemonicTable};
use crate::layout::Layout;

/// A validated machine description: widths, register count, mnemonic table
/// and the field layouts derived from them. Immutable once built; share it
/// behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isa {
    config: IsaConfig,
    table: MnemonicTable,
    layouts: [Layout; 3],
}

/// On-disk form of an ISA description. Missing sections fall back to the
/// reference machine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IsaFile {
    pub config: IsaConfig,
    pub instructions: MnemonicTable,
}

impl Isa {
    pub fn new(config: IsaConfig, table: MnemonicTable) -> Result<Self, AsmError> {
        config.validate()?;
        let opcode_mask = ((1u64 << config.bits_opcode) - 1) as u32;
        for entry in table.iter().filter(|e| e.opcode > opcode_mask) {
            warn!(
                mnemonic = %entry.name,
                opcode = entry.opcode,
                bits_opcode = config.bits_opcode,
                "opcode wider than the opcode field; it will be truncated"
            );
        }
        Ok(Self::build(config, table))
    }

    /// The reference 9-bit machine.
    pub fn reference() -> Self {
        Self::build(IsaConfig::default(), MnemonicTable::reference())
    }

    pub fn from_json(text: &str) -> Result<Self, AsmError> {
        let file: IsaFile = serde_json::from_str(text).map_err(|e| AsmError::InvalidConfig {
            reason: e.to_string(),
        })?;
        Self::new(file.config, file.instructions)
    }

    fn build(config: IsaConfig, table: MnemonicTable) -> Self {
        let layouts = Format::ALL.map(|f| Layout::of(f, &config));
        Self { config, table, layouts }
    }

    pub fn config(&self) -> &IsaConfig {
        &self.config
    }

    pub fn table(&self) -> &MnemonicTable {
        &self.table
    }

    pub fn layout(&self, format: Format) -> &Layout {
        match format {
            Format::R => &self.layouts[0],
            Format::I => &self.layouts[1],
            Format::J => &self.layouts[2],
        }
    }

    pub fn to_file(&self) -> IsaFile {
        IsaFile {
            config: self.config,
            instructions: self.table.clone(),
        }
    }
}

impl Default for Isa {
    fn default() -> Self {
        Self::reference()
    }
}
