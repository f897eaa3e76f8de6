use stm8tools::l0;
use stm8tools::symbol::SymbolKind;

mod common;
use common::assemble;

fn sample() -> stm8tools::asm::Assembler {
    assemble(
        "\
.extern OUT.w16
START:
    ld A, #1
    call OUT
    jra START
.export START
.section \"bss\" NOLOAD
    .fill 16, 0
.section \"data\"
    .d8 \"hi\"
    .d16 START
",
    )
}

#[test]
fn object_round_trip() {
    let asm = sample();
    let bytes = l0::write(&asm.symbols, &asm.relocations, &asm.sections).unwrap();

    assert_eq!(&bytes[..4], &l0::FILE_MAGIC.to_le_bytes());

    let object = l0::read(&bytes).unwrap();

    // Labels and externs survive; constants are private.
    let start = object.symbols.find("START").unwrap();
    assert_eq!(start.kind, SymbolKind::Label);
    assert!(start.export);
    assert_eq!(start.section.as_deref(), Some("text"));
    let out = object.symbols.find("OUT").unwrap();
    assert_eq!(out.kind, SymbolKind::Extern);
    assert_eq!(out.width.bytes(), 2);

    assert_eq!(object.relocations.len(), asm.relocations.len());
    for (read, written) in object.relocations.iter().zip(&asm.relocations) {
        assert_eq!(read.kind, written.kind);
        assert_eq!(read.symbol, written.symbol);
        assert_eq!(read.section, written.section);
        assert_eq!(read.offset, written.offset);
        assert_eq!(read.length, written.length);
        assert_eq!(read.adjust, written.adjust);
    }

    for section in asm.sections.iter() {
        let id = object.sections.find(&section.name).unwrap();
        let read = object.sections.get(id);
        assert_eq!(read.length, section.length);
        assert_eq!(read.noload, section.noload);
        assert_eq!(read.data(), section.data());
    }

    // Encoding the decoded data again reproduces the file byte for byte.
    let again = l0::write(&object.symbols, &object.relocations, &object.sections).unwrap();
    assert_eq!(again, bytes);
}

#[test]
fn corrupted_block_is_rejected() {
    let asm = sample();
    let mut bytes = l0::write(&asm.symbols, &asm.relocations, &asm.sections).unwrap();

    // Flip a byte inside the first block's payload.
    let offset = 32 + 40;
    bytes[offset] ^= 0xFF;
    let err = l0::read(&bytes).unwrap_err();
    assert!(err.to_string().contains("checksum"));
}

#[test]
fn truncated_file_is_rejected() {
    let asm = sample();
    let bytes = l0::write(&asm.symbols, &asm.relocations, &asm.sections).unwrap();
    assert!(l0::read(&bytes[..bytes.len() - 1]).is_err());
    assert!(l0::read(&bytes[..16]).is_err());
}

#[test]
fn bad_magic_and_version() {
    let asm = sample();
    let good = l0::write(&asm.symbols, &asm.relocations, &asm.sections).unwrap();

    let mut bad = good.clone();
    bad[0] ^= 1;
    assert!(l0::read(&bad).is_err());

    let mut bad = good;
    bad[4] = 0xFF;
    assert!(l0::read(&bad).is_err());
}

#[test]
fn empty_sections_are_omitted() {
    let asm = assemble(".section \"empty\"\n.section \"text\"\nnop\n");
    let bytes = l0::write(&asm.symbols, &asm.relocations, &asm.sections).unwrap();
    let object = l0::read(&bytes).unwrap();
    assert!(object.sections.find("empty").is_none());
    assert!(object.sections.find("text").is_some());
}
