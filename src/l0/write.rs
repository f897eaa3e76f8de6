//! Object encoder.

use super::*;
use crate::symbol::SymbolKind;
use crate::{Error, Result};

/// Serialise an assembly result to object-file bytes.
///
/// Constants are private to the assembly unit and are not written; empty
/// sections are dropped.
pub fn write(
    symbols: &SymbolTable,
    relocations: &[Relocation],
    sections: &Sections,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    // File header.
    out.extend_from_slice(&FILE_MAGIC.to_le_bytes());
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.resize(FILE_HEADER_LEN, 0);

    for symbol in symbols.iter() {
        let extern_ = match symbol.kind {
            SymbolKind::Label => false,
            SymbolKind::Extern => true,
            SymbolKind::Const | SymbolKind::None => continue,
        };

        let section = match (&symbol.section, extern_) {
            (Some(section), _) => section.as_str(),
            (None, true) => "",
            (None, false) => {
                return Err(Error::new(format!(
                    "symbol has no section: \"{}\"",
                    symbol.name
                )))
            }
        };

        let mut flags = 0u16;
        if symbol.export {
            flags |= FLAG_EXPORT;
        }
        if extern_ {
            flags |= FLAG_EXTERN;
        }

        let block = begin_block(&mut out, SYMBOL_MAGIC);
        out.extend_from_slice(&flags.to_le_bytes());
        out.push(symbol.width.bytes() as u8);
        out.extend_from_slice(&symbol.value.to_le_bytes());
        push_name(&mut out, &symbol.name);
        push_name(&mut out, section);
        finish_block(&mut out, block);
    }

    for relocation in relocations {
        let block = begin_block(&mut out, RELOCATION_MAGIC);
        out.push(relocation.kind as u8);
        out.extend_from_slice(&relocation.offset.to_le_bytes());
        out.extend_from_slice(&relocation.length.to_le_bytes());
        out.extend_from_slice(&relocation.adjust.to_le_bytes());
        push_name(&mut out, &relocation.symbol);
        push_name(&mut out, &relocation.section);
        finish_block(&mut out, block);
    }

    for section in sections.iter() {
        if section.length == 0 {
            continue;
        }

        let mut flags = 0u16;
        if section.noload {
            flags |= FLAG_NOLOAD;
        }

        let block = begin_block(&mut out, SECTION_MAGIC);
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&section.length.to_le_bytes());
        push_name(&mut out, &section.name);
        if !section.noload {
            out.extend_from_slice(section.data());
        }
        finish_block(&mut out, block);
    }

    Ok(out)
}

fn push_name(out: &mut Vec<u8>, name: &str) {
    out.extend_from_slice(name.as_bytes());
    out.push(0);
}

/// Reserve a block header; returns the block's start offset.
fn begin_block(out: &mut Vec<u8>, magic: u16) -> usize {
    let start = out.len();
    out.resize(start + BLOCK_HEADER_LEN, 0);
    out[start..start + 2].copy_from_slice(&magic.to_le_bytes());
    start
}

/// Backpatch the block length and checksum.
fn finish_block(out: &mut Vec<u8>, start: usize) {
    let length = (out.len() - start) as u32;
    out[start + 2..start + 6].copy_from_slice(&length.to_le_bytes());
    let checksum = block_checksum(&out[start..]);
    out[start + CHECKSUM_OFFSET..start + CHECKSUM_OFFSET + 2]
        .copy_from_slice(&checksum.to_le_bytes());
}
