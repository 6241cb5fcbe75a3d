use std::sync::Arc;

use ninebit_asm::error::exit;
use ninebit_asm::{AsmError, Assembler, Format, Isa, IsaConfig};

#[test]
fn description_round_trips_through_json() {
    let isa = Isa::reference();
    let json = serde_json::to_string_pretty(&isa.to_file()).unwrap();
    assert!(json.contains("\"bits_instruction\": 9"));
    assert_eq!(Isa::from_json(&json).unwrap(), isa);
}

#[test]
fn missing_sections_default_to_reference() {
    let isa = Isa::from_json(r#"{ "config": { "num_registers": 2 } }"#).unwrap();
    assert_eq!(isa.config().num_registers, 2);
    assert_eq!(isa.config().bits_data, 4);
    assert_eq!(isa.table().len(), 8);

    let isa = Isa::from_json("{}").unwrap();
    assert_eq!(isa, Isa::reference());
}

#[test]
fn inconsistent_widths_are_rejected() {
    let err = Isa::from_json(r#"{ "config": { "bits_data": 5 } }"#).unwrap_err();
    assert!(matches!(err, AsmError::InvalidConfig { .. }));
    assert_eq!(err.exit_code(), exit::CONFIG);
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(Isa::from_json(r#"{ "confg": {} }"#).is_err());
    assert!(Isa::from_json(r#"{ "config": { "bits_dat": 4 } }"#).is_err());
}

#[test]
fn duplicate_mnemonics_are_rejected() {
    let json = r#"{ "instructions": [
        { "name": "nop", "format": "J", "opcode": 0 },
        { "name": "NOP", "format": "J", "opcode": 1 }
    ] }"#;
    let err = Isa::from_json(json).unwrap_err();
    assert!(err.to_string().contains("duplicate mnemonic `nop`"));
}

#[test]
fn custom_table_replaces_reference() {
    let json = r#"{ "instructions": [ { "name": "HALT", "format": "J", "opcode": 7 } ] }"#;
    let isa = Isa::from_json(json).unwrap();
    let entry = isa.table().lookup("halt").unwrap();
    assert_eq!(entry.format, Format::J);
    assert!(isa.table().lookup("add").is_none());
}

#[test]
fn wider_machine_assembles() {
    let json = r#"{
        "config": {
            "num_registers": 8,
            "bits_instruction": 16,
            "bits_opcode": 4,
            "bits_des": 3,
            "bits_src1": 3,
            "bits_src2": 6,
            "bits_data": 9,
            "bits_prog_addr": 12
        },
        "instructions": [
            { "name": "add", "format": "R", "opcode": 1 },
            { "name": "ldi", "format": "I", "opcode": 5 },
            { "name": "jmp", "format": "J", "opcode": 15 }
        ]
    }"#;
    let isa = Isa::from_json(json).unwrap();
    assert_eq!(isa.config().hex_digits(), 4);

    let asm = Assembler::new(Arc::new(isa));
    let words = asm.assemble_str("ldi r7, -256\nadd r7, r0, r5\njmp 4095\n").unwrap();
    assert_eq!(words, vec![0x5f00, 0x1e05, 0xffff]);
    assert_eq!(asm.render(words[0]), "0x5f00");

    assert!(asm.assemble_str("ldi r0, 256").is_err());
    assert!(asm.assemble_str("add r8, r0, r0").is_err());
}

#[test]
fn reference_config_matches_named_constants() {
    let cfg = IsaConfig::default();
    assert_eq!(cfg.num_registers, ninebit_asm::config::NUM_REGISTERS);
    assert_eq!(cfg.bits_instruction, ninebit_asm::config::BITS_INSTRUCTION);
    assert_eq!(Isa::reference().config(), &cfg);
}
