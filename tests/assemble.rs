use stm8tools::asm::Assembler;
use stm8tools::relocation::RelocationKind;
use stm8tools::symbol::SymbolKind;

mod common;
use common::{assemble, section_data, source};

#[test]
fn nop_in_text() {
    let asm = assemble(".section \"text\"\nnop\n");
    assert_eq!(section_data(&asm, "text"), [0x9D]);
    assert!(asm.symbols.iter().all(|s| !s.export));
    assert!(asm.relocations.is_empty());
}

#[test]
fn label_and_chained_instructions() {
    let asm = assemble("L: nop | ret\n");
    assert_eq!(section_data(&asm, "text"), [0x9D, 0x81]);
    let label = asm.symbols.find("L").unwrap();
    assert_eq!(label.kind, SymbolKind::Label);
    assert_eq!(label.value, 0);
    assert_eq!(label.section.as_deref(), Some("text"));
}

#[test]
fn data_directive_endianness() {
    let asm = assemble(".d16 $1234\n");
    assert_eq!(section_data(&asm, "text"), [0x12, 0x34]);

    let asm = assemble(".dbendian \"little\"\n.d16 $1234\n");
    assert_eq!(section_data(&asm, "text"), [0x34, 0x12]);

    // Width-1 data ignores the selected order.
    let asm = assemble(".dbendian \"little\"\n.d8 $12, $34\n");
    assert_eq!(section_data(&asm, "text"), [0x12, 0x34]);
}

#[test]
fn d8_strings_and_chars() {
    let asm = assemble(".d8 \"ab\", 'c', 1\n");
    assert_eq!(section_data(&asm, "text"), [b'a', b'b', 0, b'c', 1]);
}

#[test]
fn d24_is_big_endian_by_default() {
    let asm = assemble(".d24 $123456\n");
    assert_eq!(section_data(&asm, "text"), [0x12, 0x34, 0x56]);
}

#[test]
fn wide_constant_forces_long_form() {
    let asm = assemble(".define SZ.w16 = $1000\nld A, SZ\n");
    assert_eq!(section_data(&asm, "text"), [0xC6, 0x00, 0x00]);

    assert_eq!(asm.relocations.len(), 1);
    let reloc = &asm.relocations[0];
    assert_eq!(reloc.kind, RelocationKind::Absolute);
    assert_eq!(reloc.symbol, "SZ");
    assert_eq!(reloc.section, "text");
    assert_eq!(reloc.offset, 1);
    assert_eq!(reloc.length, 2);
}

#[test]
fn narrow_symbol_rejected_by_check_long() {
    let mut asm = Assembler::new();
    asm.noprint = true;
    // `call` through a w8 symbol has no valid encoding.
    let result = asm.assemble(&source("narrow", ".define T = 5\ncall T\n"));
    assert!(result.is_err());
}

#[test]
fn relative_jump_emits_adjusted_relocation() {
    let asm = assemble("jra TARGET\nnop\nTARGET:\n");
    assert_eq!(section_data(&asm, "text"), [0x20, 0x00, 0x9D]);

    let reloc = &asm.relocations[0];
    assert_eq!(reloc.kind, RelocationKind::Relative);
    assert_eq!(reloc.offset, 1);
    assert_eq!(reloc.length, 1);
    assert_eq!(reloc.adjust, 1);
    assert_eq!(asm.symbols.find("TARGET").unwrap().value, 3);
}

#[test]
fn immediate_and_indexed_forms() {
    let asm = assemble("ld A, #$55\nld A, ($10,X)\nld A, (X)\nldw X, #$1234\n");
    assert_eq!(
        section_data(&asm, "text"),
        [0xA6, 0x55, 0xE6, 0x10, 0xF6, 0xAE, 0x12, 0x34]
    );
}

#[test]
fn prebyte_selects_y_variants() {
    let asm = assemble("ld A, (Y)\nld A, ($10,Y)\nincw Y\n");
    assert_eq!(
        section_data(&asm, "text"),
        [0x90, 0xF6, 0x90, 0xE6, 0x10, 0x90, 0x5C]
    );
}

#[test]
fn pointer_forms() {
    let asm = assemble("ld A, [$10]\nld A, [$1000]\njp [$20]\n");
    assert_eq!(
        section_data(&asm, "text"),
        [0x92, 0xC6, 0x10, 0x72, 0xC6, 0x10, 0x00, 0x92, 0xCC, 0x20]
    );
}

#[test]
fn bit_instructions_fold_bit_into_opcode() {
    let asm = assemble("bset $5000, #2\nbres $5000, #2\nbtjt $5000, #0, {3}\n");
    assert_eq!(
        section_data(&asm, "text"),
        [
            0x72, 0x14, 0x50, 0x00, // bset: 0x10 | 2*2
            0x72, 0x15, 0x50, 0x00, // bres: 0x10 | 2*2 + 1
            0x72, 0x00, 0x50, 0x00, 0x03, // btjt: 0x00 | 0, plus displacement
        ]
    );
}

#[test]
fn bit_number_out_of_range() {
    let mut asm = Assembler::new();
    asm.noprint = true;
    assert!(asm.assemble(&source("bit", "bset $5000, #8\n")).is_err());
}

#[test]
fn mov_forms() {
    let asm = assemble("mov $5000, #$AA\nmov $10, $20\nmov $5000, $6000\n");
    assert_eq!(
        section_data(&asm, "text"),
        [
            0x35, 0xAA, 0x50, 0x00, // longmem <- imm8
            0x45, 0x20, 0x10, // shortmem <- shortmem
            0x55, 0x60, 0x00, 0x50, 0x00, // longmem <- longmem
        ]
    );
}

#[test]
fn expressions_in_operands() {
    let asm = assemble(".define BASE = $20\nld A, #{BASE + 1}\n.d8 {1 << 4}\n");
    assert_eq!(section_data(&asm, "text"), [0xA6, 0x21, 0x10]);
}

#[test]
fn expression_width_suffix() {
    // Forcing a small value to the long form changes the encoding.
    let asm = assemble("ld A, {8}.w16\n");
    assert_eq!(section_data(&asm, "text"), [0xC6, 0x00, 0x08]);
}

#[test]
fn fill_directive() {
    let asm = assemble(".fill 3, $AB\n.fill {2}, {1}\n");
    assert_eq!(section_data(&asm, "text"), [0xAB, 0xAB, 0xAB, 1, 1]);
}

#[test]
fn conditional_assembly() {
    let asm = assemble(
        ".if {0}\nnop\n.if {1}\nnop\n.endif\nnop\n.endif\nret\n.ifdef UNDEFINED\nnop\n.endif\n",
    );
    assert_eq!(section_data(&asm, "text"), [0x81]);

    let asm = assemble(".define X = 1\n.ifeq {X} {1}\nnop\n.endif\n");
    assert_eq!(section_data(&asm, "text"), [0x9D]);
}

#[test]
fn include_shares_context() {
    let inner = source("inc-inner", ".define MAGIC = $42\n.d8 1\n");
    let outer = format!(".include \"{}\"\nld A, #MAGIC\n", inner.display());
    let asm = assemble(&outer);
    // The included data lands in the same section; the constant resolves
    // through a relocation at the use site.
    assert_eq!(section_data(&asm, "text"), [0x01, 0xA6, 0x00]);
    assert!(asm.symbols.find("MAGIC").is_some());
}

#[test]
fn question_mark_expands_to_current_label() {
    let asm = assemble("LOOP:\njra ?\n");
    let reloc = &asm.relocations[0];
    assert_eq!(reloc.symbol, "LOOP");
}

#[test]
fn noload_section_reserves_without_bytes() {
    let asm = assemble(".section \"bss\" NOLOAD\n.fill 8, 0\n");
    let id = asm.sections.find("bss").unwrap();
    let section = asm.sections.get(id);
    assert!(section.noload);
    assert_eq!(section.length, 8);
    assert!(section.data().is_empty());
}

#[test]
fn section_noload_mismatch_is_fatal() {
    let mut asm = Assembler::new();
    asm.noprint = true;
    let result = asm.assemble(&source(
        "mismatch",
        ".section \"bss\" NOLOAD\n.section \"bss\"\n",
    ));
    assert!(result.is_err());
}

#[test]
fn duplicate_label_is_fatal() {
    let mut asm = Assembler::new();
    asm.noprint = true;
    assert!(asm.assemble(&source("dup", "L:\nL:\n")).is_err());
}

#[test]
fn predefines_visible_to_source() {
    let mut asm = Assembler::new();
    asm.noprint = true;
    asm.define("EXTERNAL", 0x42).unwrap();
    asm.assemble(&source("predef", "ld A, #EXTERNAL\n")).unwrap();
    let id = asm.sections.find("text").unwrap();
    // A constant operand still resolves through a relocation.
    assert_eq!(asm.sections.get(id).data()[0], 0xA6);
    assert_eq!(asm.relocations.len(), 1);
}

#[test]
fn two_pass_determinism() {
    let text = ".define V = 3\nSTART:\nld A, #V\njra START\n.d16 START\n";
    let first = assemble(text);
    let second = assemble(text);
    assert_eq!(section_data(&first, "text"), section_data(&second, "text"));
    assert_eq!(first.relocations.len(), second.relocations.len());
}
