use serde::Serialize;

use crate::instructions::Format;
use crate::isa::Isa;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Operands {
    R { des: u32, src1: u32, src2: u32 },
    I { des: u32, data: i64 },
    J { addr: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub mnemonic: String,
    pub format: Format,
    pub opcode: u32,
    pub operands: Operands,
}

pub trait Decoder {
    fn decode(&self, word: u32) -> Option<Decoded>;
}

/// Interprets the low `bits` of `value` as a two's-complement integer.
pub fn sign_extend(value: u32, bits: u32) -> i64 {
    let shift = 64 - bits;
    (i64::from(value) << shift) >> shift
}

impl Decoder for Isa {
    fn decode(&self, word: u32) -> Option<Decoded> {
        let cfg = self.config();
        if cfg.bits_instruction < 32 && word >> cfg.bits_instruction != 0 {
            return None;
        }

        // Every layout starts with the same opcode field.
        let opcode = self.layout(Format::R).opcode().extract(word);
        let entry = self.table().by_opcode(opcode)?;
        let fields = self.layout(entry.format).unpack(word);
        let is_reg = |r: u32| r < cfg.num_registers;

        let operands = match entry.format {
            Format::R => {
                let (des, src1, src2) = (fields[1], fields[2], fields[3]);
                if !(is_reg(des) && is_reg(src1) && is_reg(src2)) {
                    return None;
                }
                Operands::R { des, src1, src2 }
            }
            Format::I => {
                let des = fields[1];
                if !is_reg(des) {
                    return None;
                }
                Operands::I {
                    des,
                    data: sign_extend(fields[2], cfg.bits_data),
                }
            }
            Format::J => Operands::J { addr: fields[1] },
        };

        Some(Decoded {
            mnemonic: entry.name.clone(),
            format: entry.format,
            opcode,
            operands,
        })
    }
}
