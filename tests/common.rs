#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write `contents` to a unique temp file and return its path.
pub fn source(tag: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "stm8tools-{}-{}-{}.s",
        tag,
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

/// Assemble `contents` and return the finished context.
pub fn assemble(contents: &str) -> stm8tools::asm::Assembler {
    let mut assembler = stm8tools::asm::Assembler::new();
    assembler.noprint = true;
    assembler.assemble(&source("asm", contents)).unwrap();
    assembler
}

/// The bytes of a named section.
pub fn section_data(assembler: &stm8tools::asm::Assembler, name: &str) -> Vec<u8> {
    let id = assembler.sections.find(name).unwrap();
    assembler.sections.get(id).data().to_vec()
}
