use crate::error::AsmError;
use crate::instructions::{Format, MnemonicEntry};
use crate::isa::Isa;
use crate::operand::{check_range, read_integer, read_register};

/// Encodes one instruction line. `tokens[0]` is the mnemonic that resolved to
/// `entry`; operands follow. Tokens past the format's operand count are ignored.
pub fn encode_tokens(isa: &Isa, entry: &MnemonicEntry, tokens: &[&str]) -> Result<u32, AsmError> {
    let ops = operands(entry, tokens)?;
    let n = isa.config().num_registers;
    match entry.format {
        Format::R => {
            let des = read_register(ops[0], n)?;
            let src1 = read_register(ops[1], n)?;
            let src2 = read_register(ops[2], n)?;
            Ok(pack_r(isa, entry.opcode, des, src1, src2))
        }
        Format::I => {
            let des = read_register(ops[0], n)?;
            let (min, max) = isa.config().data_bounds();
            let data = read_integer(ops[1], min, max)?;
            Ok(pack_i(isa, entry.opcode, des, data))
        }
        Format::J => {
            let (min, max) = isa.config().addr_bounds();
            let addr = read_integer(ops[0], min, max)?;
            Ok(pack_j(isa, entry.opcode, addr))
        }
    }
}

fn operands<'t>(entry: &MnemonicEntry, tokens: &'t [&'t str]) -> Result<&'t [&'t str], AsmError> {
    let expected = entry.format.operand_count();
    let got = tokens.len().saturating_sub(1);
    if got < expected {
        return Err(AsmError::Arity {
            mnemonic: entry.name.clone(),
            format: entry.format,
            expected,
            got,
        });
    }
    Ok(&tokens[1..=expected])
}

pub fn encode_r(isa: &Isa, opcode: u32, des: i64, src1: i64, src2: i64) -> Result<u32, AsmError> {
    let des = register(isa, des)?;
    let src1 = register(isa, src1)?;
    let src2 = register(isa, src2)?;
    Ok(pack_r(isa, opcode, des, src1, src2))
}

pub fn encode_i(isa: &Isa, opcode: u32, des: i64, data: i64) -> Result<u32, AsmError> {
    let des = register(isa, des)?;
    let (min, max) = isa.config().data_bounds();
    let data = check_range(data, min, max, &data.to_string())?;
    Ok(pack_i(isa, opcode, des, data))
}

pub fn encode_j(isa: &Isa, opcode: u32, addr: i64) -> Result<u32, AsmError> {
    let (min, max) = isa.config().addr_bounds();
    let addr = check_range(addr, min, max, &addr.to_string())?;
    Ok(pack_j(isa, opcode, addr))
}

fn register(isa: &Isa, value: i64) -> Result<u32, AsmError> {
    let (min, max) = isa.config().register_bounds();
    check_range(value, min, max, &format!("r{value}")).map(|v| v as u32)
}

fn pack_r(isa: &Isa, opcode: u32, des: u32, src1: u32, src2: u32) -> u32 {
    isa.layout(Format::R).pack(&[opcode, des, src1, src2])
}

fn pack_i(isa: &Isa, opcode: u32, des: u32, data: i64) -> u32 {
    let bits = isa.config().bits_data;
    let mask = ((1u64 << bits) - 1) as u32;
    // Two's complement within `bits`.
    let data = if data < 0 {
        ((data as u32) & mask) | (1 << (bits - 1))
    } else {
        (data as u32) & mask
    };
    isa.layout(Format::I).pack(&[opcode, des, data])
}

fn pack_j(isa: &Isa, opcode: u32, addr: i64) -> u32 {
    isa.layout(Format::J).pack(&[opcode, addr as u32])
}
