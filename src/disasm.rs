use crate::decoder::{Decoded, Operands};

pub fn fmt_decoded(d: &Decoded) -> String {
    match d.operands {
        Operands::R { des, src1, src2 } => format!("{} r{}, r{}, r{}", d.mnemonic, des, src1, src2),
        Operands::I { des, data } => format!("{} r{}, {}", d.mnemonic, des, data),
        Operands::J { addr } => format!("{} {}", d.mnemonic, addr),
    }
}
