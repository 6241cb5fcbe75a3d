use serde::{Deserialize, Serialize};

use crate::error::AsmError;
use crate::instructions::Format;
use crate::layout::Layout;

// Reference machine
pub const NUM_REGISTERS: u32 = 4;
pub const BITS_INSTRUCTION: u32 = 9;
pub const BITS_OPCODE: u32 = 3;
// R- and I-format
pub const BITS_DES: u32 = 2;
// R-format
pub const BITS_SRC1: u32 = 2;
pub const BITS_SRC2: u32 = 2;
// I-format
pub const BITS_DATA: u32 = 4;
// J-format
pub const BITS_PROG_ADDR: u32 = 6;

/// Longest accepted source line in bytes, line terminator excluded.
pub const MAX_LINE: usize = 1024;
/// A line is rejected once it reaches this many tokens.
pub const MAX_TOKENS: usize = 128;

/// Register count and field widths of the target machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IsaConfig {
    pub num_registers: u32,
    pub bits_instruction: u32,
    pub bits_opcode: u32,
    pub bits_des: u32,
    pub bits_src1: u32,
    pub bits_src2: u32,
    pub bits_data: u32,
    pub bits_prog_addr: u32,
}

impl Default for IsaConfig {
    fn default() -> Self {
        Self {
            num_registers: NUM_REGISTERS,
            bits_instruction: BITS_INSTRUCTION,
            bits_opcode: BITS_OPCODE,
            bits_des: BITS_DES,
            bits_src1: BITS_SRC1,
            bits_src2: BITS_SRC2,
            bits_data: BITS_DATA,
            bits_prog_addr: BITS_PROG_ADDR,
        }
    }
}

impl IsaConfig {
    /// ⌈bits_instruction / 4⌉
    pub fn hex_digits(&self) -> usize {
        self.bits_instruction.div_ceil(4) as usize
    }

    /// Open bounds for a register index.
    pub fn register_bounds(&self) -> (i64, i64) {
        (-1, self.num_registers as i64)
    }

    /// Open bounds for the signed I-format immediate. Both ends are excluded,
    /// so the accepted values are `-2^(n-1) ..= 2^(n-1) - 1`. A width that
    /// `validate` would reject yields the empty range `(0, 0)`.
    pub fn data_bounds(&self) -> (i64, i64) {
        match self.bits_data.checked_sub(1).filter(|&n| n < 63) {
            Some(n) => {
                let half = 1i64 << n;
                (-half - 1, half)
            }
            None => (0, 0),
        }
    }

    /// Open bounds for the unsigned J-format program address.
    pub fn addr_bounds(&self) -> (i64, i64) {
        (-1, 1i64.checked_shl(self.bits_prog_addr).filter(|&m| m > 0).unwrap_or(0))
    }

    pub fn validate(&self) -> Result<(), AsmError> {
        let widths = [
            ("bits_instruction", self.bits_instruction),
            ("bits_opcode", self.bits_opcode),
            ("bits_des", self.bits_des),
            ("bits_src1", self.bits_src1),
            ("bits_src2", self.bits_src2),
            ("bits_data", self.bits_data),
            ("bits_prog_addr", self.bits_prog_addr),
        ];
        for (name, width) in widths {
            if width == 0 {
                return Err(invalid(format!("{name} must be at least 1")));
            }
            if width > 32 {
                return Err(invalid(format!("{name} is {width}, words are at most 32 bits")));
            }
        }

        for format in Format::ALL {
            let layout = Layout::of(format, self);
            if layout.width() != self.bits_instruction {
                return Err(invalid(format!(
                    "{format}-format fields span {} bits, expected {}",
                    layout.width(),
                    self.bits_instruction
                )));
            }
        }

        if self.num_registers == 0 {
            return Err(invalid("num_registers must be at least 1".to_string()));
        }
        let narrowest = self.bits_des.min(self.bits_src1).min(self.bits_src2);
        if u64::from(self.num_registers) > 1u64 << narrowest {
            return Err(invalid(format!(
                "{} registers do not fit a {narrowest}-bit register field",
                self.num_registers
            )));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> AsmError {
    AsmError::InvalidConfig { reason }
}

/// Source limits and output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsmOptions {
    /// Prefix every emitted word with `0x`.
    pub hex_prefix: bool,
    pub max_tokens: usize,
    pub max_line_len: usize,
}

impl Default for AsmOptions {
    fn default() -> Self {
        Self {
            hex_prefix: true,
            max_tokens: MAX_TOKENS,
            max_line_len: MAX_LINE,
        }
    }
}
