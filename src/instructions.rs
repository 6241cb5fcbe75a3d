use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AsmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// des, src1, src2
    R,
    /// des, signed immediate
    I,
    /// program address
    J,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::R, Format::I, Format::J];

    pub fn operand_count(self) -> usize {
        match self {
            Format::R => 3,
            Format::I => 2,
            Format::J => 1,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Format::R => "R",
            Format::I => "I",
            Format::J => "J",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MnemonicEntry {
    pub name: String,
    pub format: Format,
    pub opcode: u32,
}

pub const REFERENCE: &[(&str, Format, u32)] = &[
    ("add", Format::R, 0x0),
    ("sub", Format::R, 0x1),
    ("mul", Format::R, 0x2),
    ("and", Format::R, 0x3),
    ("or", Format::R, 0x4),
    ("xor", Format::R, 0x5),
    ("ldi", Format::I, 0x6),
    ("jmp", Format::J, 0x7),
];

/// Ordered, immutable mnemonic table. Names are unique and stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MnemonicEntry>", into = "Vec<MnemonicEntry>")]
pub struct MnemonicTable {
    entries: Vec<MnemonicEntry>,
}

impl MnemonicTable {
    pub fn new(entries: Vec<MnemonicEntry>) -> Result<Self, AsmError> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(entries.len());
        for mut entry in entries {
            entry.name = entry.name.to_lowercase();
            if entry.name.is_empty() || entry.name.contains(crate::assembler::is_separator) {
                return Err(AsmError::InvalidConfig {
                    reason: format!("mnemonic `{}` is not a single token", entry.name),
                });
            }
            if !seen.insert(entry.name.clone()) {
                return Err(AsmError::InvalidConfig {
                    reason: format!("duplicate mnemonic `{}`", entry.name),
                });
            }
            out.push(entry);
        }
        Ok(Self { entries: out })
    }

    pub fn reference() -> Self {
        let entries = REFERENCE
            .iter()
            .map(|&(name, format, opcode)| MnemonicEntry {
                name: name.to_string(),
                format,
                opcode,
            })
            .collect();
        Self { entries }
    }

    /// Case-insensitive exact match.
    pub fn lookup(&self, name: &str) -> Option<&MnemonicEntry> {
        let name = name.to_lowercase();
        self.entries.iter().find(|e| e.name == name)
    }

    /// First entry carrying `opcode`.
    pub fn by_opcode(&self, opcode: u32) -> Option<&MnemonicEntry> {
        self.entries.iter().find(|e| e.opcode == opcode)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MnemonicEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MnemonicTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl TryFrom<Vec<MnemonicEntry>> for MnemonicTable {
    type Error = AsmError;

    fn try_from(entries: Vec<MnemonicEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<MnemonicTable> for Vec<MnemonicEntry> {
    fn from(table: MnemonicTable) -> Self {
        table.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, format: Format, opcode: u32) -> MnemonicEntry {
        MnemonicEntry { name: name.into(), format, opcode }
    }

    #[test]
    fn reference_table_passes_validation() {
        let table = MnemonicTable::reference();
        let rebuilt = MnemonicTable::new(table.iter().cloned().collect()).unwrap();
        assert_eq!(rebuilt, table);
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn lookup_ignores_case() {
        let table = MnemonicTable::reference();
        assert_eq!(table.lookup("LDI").unwrap().opcode, 6);
        assert_eq!(table.lookup("Jmp").unwrap().format, Format::J);
        assert!(table.lookup("nop").is_none());
    }

    #[test]
    fn names_are_stored_lowercase() {
        let table = MnemonicTable::new(vec![entry("NOT", Format::R, 1)]).unwrap();
        assert_eq!(table.iter().next().unwrap().name, "not");
        assert!(table.lookup("not").is_some());
    }

    #[test]
    fn duplicates_are_rejected_case_insensitively() {
        let err = MnemonicTable::new(vec![entry("add", Format::R, 0), entry("ADD", Format::I, 1)])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate mnemonic `add`"));
    }

    #[test]
    fn names_with_separators_are_rejected() {
        assert!(MnemonicTable::new(vec![entry("ld i", Format::I, 0)]).is_err());
        assert!(MnemonicTable::new(vec![entry("", Format::J, 0)]).is_err());
    }

    #[test]
    fn by_opcode_returns_first_match() {
        let table = MnemonicTable::new(vec![
            entry("mov", Format::R, 2),
            entry("cpy", Format::R, 2),
        ])
        .unwrap();
        assert_eq!(table.by_opcode(2).unwrap().name, "mov");
        assert!(table.by_opcode(3).is_none());
    }

    #[test]
    fn deserializes_through_validation() {
        let json = r#"[{"name":"a","format":"R","opcode":0},{"name":"A","format":"J","opcode":1}]"#;
        assert!(serde_json::from_str::<MnemonicTable>(json).is_err());
    }
}
