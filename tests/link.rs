use std::path::PathBuf;

use stm8tools::l0;
use stm8tools::link::Linker;
use stm8tools::srec;
use stm8tools::symbol::SymbolKind;

mod common;
use common::{assemble, source};

fn object(tag: &str, text: &str) -> (PathBuf, Vec<u8>) {
    let asm = assemble(text);
    let bytes = l0::write(&asm.symbols, &asm.relocations, &asm.sections).unwrap();
    let path = std::env::temp_dir().join(format!("{}.l0", tag));
    (path, bytes)
}

fn load(linker: &mut Linker, tag: &str, text: &str) {
    let (path, bytes) = object(tag, text);
    linker.load(&path, &bytes).unwrap();
}

fn script(contents: &str) -> PathBuf {
    source("script", contents)
}

#[test]
fn cross_file_call_resolves_to_exported_label() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "a", "F:\n    nop | ret\n.export F\n");
    load(&mut linker, "b", ".extern F.w16\n    call F\n");

    linker
        .link(&script(".place \"text\" $8000 $8000\n"))
        .unwrap();

    // A's two bytes, then B's call with the patched address of F.
    let id = linker.sections.find("text").unwrap();
    let text = linker.sections.get(id);
    assert_eq!(text.data(), &[0x9D, 0x81, 0xCD, 0x80, 0x00]);

    // Labels are renamed file:symbol and carry their final address.
    let label = linker.symbols.find("a.l0:F").unwrap();
    assert_eq!(label.kind, SymbolKind::Label);
    assert_eq!(label.value, 0x8000);

    // The image starts at the placed LMA.
    let map = linker.memory_map().unwrap().pack().unwrap();
    assert_eq!(map.rows().len(), 1);
    assert_eq!(map.rows()[0].address, 0x8000);

    let mut text_out = Vec::new();
    srec::write(&mut text_out, &map, None).unwrap();
    let back = srec::read(&text_out).unwrap().pack().unwrap();
    assert_eq!(back, map);
}

#[test]
fn relative_jump_patched_after_placement() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "jra", "jra TARGET\nnop\nTARGET:\nret\n");

    linker
        .link(&script(".place \"text\" $8000 $8000\n"))
        .unwrap();

    let id = linker.sections.find("text").unwrap();
    // target 3, site 0+1+1 => displacement 1.
    assert_eq!(linker.sections.get(id).data(), &[0x20, 0x01, 0x9D, 0x81]);
}

#[test]
fn relative_jump_out_of_range_is_fatal() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "far", "jra TARGET\n.fill 200, 0\nTARGET:\nret\n");

    let err = linker
        .link(&script(".place \"text\" 0 0\n"))
        .unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn sections_glue_in_command_line_order() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "one", "A:\nnop\n.export A\n");
    load(&mut linker, "two", "B:\nret\n.export B\n");
    load(&mut linker, "three", "C:\nhalt\n.export C\n");

    linker
        .link(&script(".place \"text\" $100 $100\n"))
        .unwrap();

    let id = linker.sections.find("text").unwrap();
    assert_eq!(linker.sections.get(id).data(), &[0x9D, 0x81, 0x8E]);
    assert_eq!(linker.symbols.find("one.l0:A").unwrap().value, 0x100);
    assert_eq!(linker.symbols.find("two.l0:B").unwrap().value, 0x101);
    assert_eq!(linker.symbols.find("three.l0:C").unwrap().value, 0x102);
}

#[test]
fn duplicate_export_is_fatal() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "d1", "F:\nnop\n.export F\n");
    load(&mut linker, "d2", "F:\nret\n.export F\n");
    load(&mut linker, "d3", ".extern F.w16\ncall F\n");

    assert!(linker.link(&script(".place \"text\" 0 0\n")).is_err());
}

#[test]
fn unresolved_extern_is_fatal() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "u", ".extern NOWHERE.w16\ncall NOWHERE\n");

    let err = linker
        .link(&script(".place \"text\" 0 0\n"))
        .unwrap_err();
    assert!(err.to_string().contains("undefined reference"));
}

#[test]
fn script_symbols_satisfy_externs() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "io", ".extern PORT.w16\nldw X, PORT\n");

    linker
        .link(&script("PORT = $5005\n.place \"text\" 0 0\n"))
        .unwrap();

    let id = linker.sections.find("text").unwrap();
    assert_eq!(linker.sections.get(id).data(), &[0xCE, 0x50, 0x05]);
}

#[test]
fn command_line_defines_reach_the_script() {
    let mut linker = Linker::new();
    linker.noprint = true;
    linker.define("ORIGIN", 0x4000).unwrap();
    load(&mut linker, "cl", "nop\n");

    linker
        .link(&script(".place \"text\" ORIGIN ORIGIN\n"))
        .unwrap();

    let id = linker.sections.find("text").unwrap();
    assert_eq!(linker.sections.get(id).lma, 0x4000);
    assert_eq!(linker.sections.get(id).vma, 0x4000);
}

#[test]
fn sizeof_and_fill_in_script() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "sz", ".d8 1, 2, 3\n");

    linker
        .link(&script(
            "LEN = sizeof(\"text\")\n.fill \"text\", {8 - LEN}, $FF\n.place \"text\" 0 0\n",
        ))
        .unwrap();

    let id = linker.sections.find("text").unwrap();
    assert_eq!(
        linker.sections.get(id).data(),
        &[1, 2, 3, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
    );
}

#[test]
fn vma_overlap_is_fatal() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "ov", ".d8 1, 2\n.section \"data\"\n.d8 3, 4\n");

    let err = linker
        .link(&script(
            ".place \"text\" $100 $100\n.place \"data\" $200 $101\n",
        ))
        .unwrap_err();
    assert!(err.to_string().contains("VMA"));
}

#[test]
fn noload_sections_reserve_address_space_only() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(
        &mut linker,
        "bss",
        "nop\n.section \"bss\" NOLOAD\n.fill 32, 0\n",
    );

    linker
        .link(&script(
            ".place \"text\" $8000 $8000\n.place \"bss\" NOLOAD 0\n",
        ))
        .unwrap();

    // Only text contributes image bytes.
    let map = linker.memory_map().unwrap().pack().unwrap();
    assert_eq!(map.rows().len(), 1);
    assert_eq!(map.rows()[0].address, 0x8000);
    assert_eq!(map.rows()[0].data, vec![0x9D]);
}

#[test]
fn double_place_is_fatal() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "dp", "nop\n");

    let err = linker
        .link(&script(".place \"text\" 0 0\n.place \"text\" 1 1\n"))
        .unwrap_err();
    assert!(err.to_string().contains("already placed"));
}

#[test]
fn data_relocations_reach_other_files() {
    let mut linker = Linker::new();
    linker.noprint = true;
    load(&mut linker, "tab1", "ENTRY:\nret\n.export ENTRY\n");
    load(
        &mut linker,
        "tab2",
        ".extern ENTRY.w16\n.section \"vectors\"\n.d16 ENTRY\n",
    );

    linker
        .link(&script(
            ".place \"text\" $8000 $8000\n.place \"vectors\" $9000 $9000\n",
        ))
        .unwrap();

    let id = linker.sections.find("vectors").unwrap();
    assert_eq!(linker.sections.get(id).data(), &[0x80, 0x00]);
}
