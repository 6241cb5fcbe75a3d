use std::sync::Arc;

use ninebit_asm::{
    dispatch, tokenize, AsmError, Assembler, Format, Isa, IsaConfig, MnemonicEntry, MnemonicTable,
};

#[test]
fn blank_lines_produce_no_word() {
    let isa = Isa::reference();
    assert_eq!(dispatch(&isa, &[]), Ok(None));
    let asm = Assembler::new(Arc::new(isa));
    assert_eq!(asm.assemble_line(""), Ok(None));
    assert_eq!(asm.assemble_line(" \t , ,"), Ok(None));
}

#[test]
fn comments_produce_no_word() {
    let isa = Isa::reference();
    assert_eq!(dispatch(&isa, &["#"]), Ok(None));
    assert_eq!(dispatch(&isa, &["#hello"]), Ok(None));
    assert_eq!(dispatch(&isa, &["#", "add", "r0", "r1", "r2"]), Ok(None));
}

#[test]
fn unknown_mnemonic_is_fatal() {
    let isa = Isa::reference();
    assert_eq!(
        dispatch(&isa, &["foo", "r0", "r1", "r2"]),
        Err(AsmError::UnknownInstruction { mnemonic: "foo".into() })
    );
}

#[test]
fn unknown_mnemonic_keeps_caller_spelling() {
    let isa = Isa::reference();
    let err = dispatch(&isa, &["FoO"]).unwrap_err();
    assert_eq!(err.to_string(), "invalid instruction: got `FoO`");
}

#[test]
fn mnemonics_match_any_case() {
    let isa = Isa::reference();
    assert_eq!(dispatch(&isa, &["JMP", "5"]), Ok(Some(0x1c5)));
    assert_eq!(dispatch(&isa, &["Ldi", "R3", "2"]), Ok(Some(0x1b2)));
}

#[test]
fn table_entry_wins_over_comment_marker() {
    let table = MnemonicTable::new(vec![MnemonicEntry {
        name: "#x".into(),
        format: Format::J,
        opcode: 1,
    }])
    .unwrap();
    let isa = Isa::new(IsaConfig::default(), table).unwrap();
    assert_eq!(dispatch(&isa, &["#x", "5"]), Ok(Some(0x045)));
    assert_eq!(dispatch(&isa, &["#y", "5"]), Ok(None));
}

#[test]
fn tokenizer_splits_on_spaces_tabs_and_commas() {
    let tokens = tokenize("add r0,r1,\tr2\r\n", 128).unwrap();
    assert_eq!(tokens, vec!["add", "r0", "r1", "r2"]);
    assert!(tokenize(",,, \t", 128).unwrap().is_empty());
}

#[test]
fn token_cap_is_reached_at_the_limit() {
    let ok = vec!["x"; 127].join(" ");
    assert_eq!(tokenize(&ok, 128).unwrap().len(), 127);
    let too_many = vec!["x"; 128].join(" ");
    assert_eq!(tokenize(&too_many, 128), Err(AsmError::TooManyTokens { limit: 128 }));
}

#[test]
fn long_lines_are_rejected() {
    let asm = Assembler::new(Arc::new(Isa::reference()));
    let longest = format!("#{}", "a".repeat(1023));
    assert_eq!(asm.assemble_line(&longest), Ok(None));
    let too_long = format!("#{}", "a".repeat(1024));
    assert_eq!(
        asm.assemble_line(&too_long),
        Err(AsmError::LineTooLong { len: 1025, limit: 1024 })
    );
}
