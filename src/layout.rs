use serde::Serialize;

use crate::config::IsaConfig;
use crate::instructions::Format;

/// One named bit field of an instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub width: u32,
    pub offset: u32,
}

impl Field {
    pub fn mask(&self) -> u32 {
        ((1u64 << self.width) - 1) as u32
    }

    pub fn place(&self, value: u32) -> u32 {
        (value & self.mask()) << self.offset
    }

    pub fn extract(&self, word: u32) -> u32 {
        (word >> self.offset) & self.mask()
    }
}

/// Fields of one format, most-significant first. The opcode is always first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub format: Format,
    pub fields: Vec<Field>,
}

impl Layout {
    pub fn of(format: Format, cfg: &IsaConfig) -> Self {
        let widths: Vec<(&'static str, u32)> = match format {
            Format::R => vec![
                ("opcode", cfg.bits_opcode),
                ("des", cfg.bits_des),
                ("src1", cfg.bits_src1),
                ("src2", cfg.bits_src2),
            ],
            Format::I => vec![
                ("opcode", cfg.bits_opcode),
                ("des", cfg.bits_des),
                ("data", cfg.bits_data),
            ],
            Format::J => vec![("opcode", cfg.bits_opcode), ("addr", cfg.bits_prog_addr)],
        };

        let mut offset: u32 = widths.iter().map(|&(_, w)| w).sum();
        let fields = widths
            .into_iter()
            .map(|(name, width)| {
                offset -= width;
                Field { name, width, offset }
            })
            .collect();
        Self { format, fields }
    }

    /// Total bits covered by the fields.
    pub fn width(&self) -> u32 {
        self.fields.iter().map(|f| f.width).sum()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn opcode(&self) -> &Field {
        &self.fields[0]
    }

    /// Masks each value to its field and ORs the results; `values` follow field order.
    pub fn pack(&self, values: &[u32]) -> u32 {
        debug_assert_eq!(values.len(), self.fields.len());
        self.fields
            .iter()
            .zip(values)
            .fold(0, |word, (field, &value)| word | field.place(value))
    }

    pub fn unpack(&self, word: u32) -> Vec<u32> {
        self.fields.iter().map(|f| f.extract(word)).collect()
    }
}
