//! The linker.
//!
//! Stages run in a fixed order: load every object, glue same-named sections
//! in command-line order, resolve and rename symbols, execute the placement
//! script, then patch relocations against final addresses. The packed
//! address map of the result feeds the S-record writer.

use std::mem;
use std::path::Path;

use crate::common::Width;
use crate::l0;
use crate::relocation::{Relocation, RelocationKind};
use crate::section::Sections;
use crate::srec::MemData;
use crate::symbol::{SymbolKind, SymbolTable};
use crate::{util, warn, Error, Result};

mod script;

/// One loaded object file; the display name is the path's basename.
pub struct InputFile {
    pub name: String,
    pub symbols: SymbolTable,
    pub sections: Sections,
    pub relocations: Vec<Relocation>,
}

/// Link state.
pub struct Linker {
    pub files: Vec<InputFile>,
    /// Script-defined constants, distinct from object symbols.
    pub script_symbols: SymbolTable,
    /// Merged output.
    pub symbols: SymbolTable,
    pub sections: Sections,
    pub relocations: Vec<Relocation>,
    /// Parse `.print` but do not write its output.
    pub noprint: bool,
}

impl Default for Linker {
    fn default() -> Self {
        Self::new()
    }
}

enum Export {
    /// Exported by another file.
    File(String),
    /// Defined by the script symbol table.
    Script(i64),
    NotFound,
}

impl Linker {
    pub fn new() -> Linker {
        Linker {
            files: Vec::new(),
            script_symbols: SymbolTable::new(),
            symbols: SymbolTable::new(),
            sections: Sections::new(),
            relocations: Vec::new(),
            noprint: false,
        }
    }

    /// Define a script constant before the script pass (`-D NAME=VALUE`).
    pub fn define(&mut self, name: &str, value: i64) -> Result<()> {
        self.script_symbols.add(name)?.set_const(value);
        Ok(())
    }

    /// Deserialise one object file.
    pub fn load(&mut self, path: &Path, data: &[u8]) -> Result<()> {
        let object = l0::read(data)
            .map_err(|err| Error::new(format!("{}: {}", path.display(), err)))?;
        self.files.push(InputFile {
            name: util::basename(&path.display().to_string()).to_string(),
            symbols: object.symbols,
            sections: object.sections,
            relocations: object.relocations,
        });
        Ok(())
    }

    /// Merge, run the script, patch.
    pub fn link(&mut self, script: &Path) -> Result<()> {
        self.merge()?;
        self.run_script(script)?;
        self.patch()
    }

    /// Glue sections left to right and pull every file's symbols and
    /// relocations into the output, renaming labels to `file:symbol`.
    fn merge(&mut self) -> Result<()> {
        let files = mem::take(&mut self.files);

        for file in &files {
            for section in file.sections.iter() {
                let id = self.sections.select(&section.name);
                let merged = self.sections.get_mut(id);

                if !merged.noload {
                    merged.noload = section.noload;
                }
                if merged.noload != section.noload {
                    return Err(Error::new(format!(
                        "NOLOAD attribute mismatch for section \"{}\" in \"{}\"",
                        section.name, file.name
                    )));
                }

                // Where this file's bytes start inside the merged section.
                merged.offset = merged.length;
                if section.noload {
                    merged.push_len(section.length);
                } else {
                    merged.push(section.data());
                }
            }

            self.merge_symbols(file, &files)?;
        }

        self.files = files;
        Ok(())
    }

    fn merge_symbols(&mut self, file: &InputFile, files: &[InputFile]) -> Result<()> {
        for symbol in file.symbols.iter() {
            match symbol.kind {
                SymbolKind::Extern => {
                    match self.find_export(&symbol.name, &file.name, files)? {
                        Export::File(from) => {
                            let target = format!("{}:{}", from, symbol.name);
                            self.copy_relocations(file, &symbol.name, &target, symbol.width)?;
                        }
                        Export::Script(value) => {
                            if self.symbols.find(&symbol.name).is_none() {
                                let copy = self.symbols.add(&symbol.name)?;
                                copy.set_const(value);
                                copy.width = symbol.width;
                            }
                            self.copy_relocations(file, &symbol.name, &symbol.name, symbol.width)?;
                        }
                        Export::NotFound => {
                            // Hold as extern; the script pass may still
                            // provide a value.
                            if self.symbols.find(&symbol.name).is_none() {
                                let held = self.symbols.add(&symbol.name)?;
                                held.kind = SymbolKind::Extern;
                                held.width = symbol.width;
                            }
                            self.copy_relocations(file, &symbol.name, &symbol.name, symbol.width)?;
                        }
                    }
                }
                SymbolKind::Label => {
                    let section = symbol.section.as_deref().ok_or_else(|| {
                        Error::new(format!("symbol has no section: \"{}\"", symbol.name))
                    })?;
                    let id = self.sections.find(section).ok_or_else(|| {
                        Error::new(format!("section not found: \"{}\"", section))
                    })?;
                    let start = self.sections.get(id).offset;

                    let renamed = format!("{}:{}", file.name, symbol.name);
                    let merged = self.symbols.add(&renamed)?;
                    merged.kind = SymbolKind::Label;
                    merged.width = symbol.width;
                    merged.value = symbol.value + start as i64;
                    merged.export = symbol.export;
                    merged.set_section(section)?;

                    self.copy_relocations(file, &symbol.name, &renamed, symbol.width)?;
                }
                SymbolKind::Const | SymbolKind::None => {}
            }
        }

        // Relocations against names the file never declared (assembler
        // constants are not serialised). They resolve from the script
        // symbol table or not at all.
        for relocation in &file.relocations {
            if file.symbols.find(&relocation.symbol).is_some() {
                continue;
            }
            if self.symbols.find(&relocation.symbol).is_none() {
                let width = Width::from_byte(relocation.length as u8).ok_or_else(|| {
                    Error::new(format!(
                        "invalid relocation length {} against \"{}\"",
                        relocation.length, relocation.symbol
                    ))
                })?;
                let held = self.symbols.add(&relocation.symbol)?;
                held.kind = SymbolKind::Extern;
                held.width = width;
            }
            self.rebase_relocation(relocation, &relocation.symbol.clone())?;
        }

        Ok(())
    }

    /// Copy the file's relocations against `name`, retargeted to `target`
    /// and rebased to the merged section.
    fn copy_relocations(
        &mut self,
        file: &InputFile,
        name: &str,
        target: &str,
        width: Width,
    ) -> Result<()> {
        for relocation in &file.relocations {
            if relocation.symbol != name {
                continue;
            }
            if relocation.length != width.bytes() {
                return Err(Error::new(format!(
                    "relocation length does not match symbol width: \"{}\"",
                    name
                )));
            }
            self.rebase_relocation(relocation, target)?;
        }
        Ok(())
    }

    fn rebase_relocation(&mut self, relocation: &Relocation, target: &str) -> Result<()> {
        let id = self
            .sections
            .find(&relocation.section)
            .ok_or_else(|| Error::new("section not found for relocation"))?;
        let start = self.sections.get(id).offset;
        self.relocations.push(Relocation {
            kind: relocation.kind,
            section: relocation.section.clone(),
            symbol: target.to_string(),
            offset: relocation.offset + start,
            length: relocation.length,
            adjust: relocation.adjust,
        });
        Ok(())
    }

    /// An exported label with this name in any other file, or a script
    /// constant. Two providers are a duplicate-definition error.
    fn find_export(&self, name: &str, exclude: &str, files: &[InputFile]) -> Result<Export> {
        let mut found: Option<Export> = None;

        for file in files {
            if file.name == exclude {
                continue;
            }
            if let Some(symbol) = file.symbols.find(name) {
                if symbol.kind == SymbolKind::Label && symbol.export {
                    if found.is_some() {
                        return Err(Error::new(format!("symbol redefined: \"{}\"", name)));
                    }
                    found = Some(Export::File(file.name.clone()));
                }
            }
        }

        if let Some(symbol) = self.script_symbols.find(name) {
            if found.is_some() {
                return Err(Error::new(format!("symbol redefined: \"{}\"", name)));
            }
            found = Some(Export::Script(symbol.value));
        }

        Ok(found.unwrap_or(Export::NotFound))
    }

    /// Overlap checks, label address fixes and relocation patching.
    fn patch(&mut self) -> Result<()> {
        self.check_overlap()?;

        // Labels move from section offsets to virtual addresses.
        let mut fixes: Vec<(String, i64)> = Vec::new();
        for symbol in self.symbols.iter() {
            if symbol.kind != SymbolKind::Label {
                continue;
            }
            let section = symbol.section.as_deref().unwrap_or("");
            let id = self
                .sections
                .find(section)
                .ok_or_else(|| Error::new(format!("section not found: \"{}\"", section)))?;
            fixes.push((
                symbol.name.clone(),
                symbol.value + self.sections.get(id).vma as i64,
            ));
        }
        for (name, value) in fixes {
            if let Some(symbol) = self.symbols.find_mut(&name) {
                symbol.value = value;
            }
        }

        let relocations = mem::take(&mut self.relocations);
        for relocation in &relocations {
            self.apply_relocation(relocation)?;
        }
        self.relocations = relocations;

        Ok(())
    }

    fn check_overlap(&self) -> Result<()> {
        for section in self.sections.iter() {
            if section.vma as u64 + section.length as u64 > 0x1_0000 {
                warn(format!("section crosses 64 KiB: \"{}\"", section.name));
            }
        }

        let placed: Vec<_> = self.sections.iter().filter(|s| s.placed).collect();
        for (index, first) in placed.iter().enumerate() {
            for second in &placed[index + 1..] {
                if !first.noload
                    && !second.noload
                    && ranges_overlap(first.lma, first.length, second.lma, second.length)
                {
                    return Err(Error::new(format!(
                        "LMA of sections overlaps: \"{}\" \"{}\"",
                        first.name, second.name
                    )));
                }
                if ranges_overlap(first.vma, first.length, second.vma, second.length) {
                    return Err(Error::new(format!(
                        "VMA of sections overlaps: \"{}\" \"{}\"",
                        first.name, second.name
                    )));
                }
            }
        }
        Ok(())
    }

    fn apply_relocation(&mut self, relocation: &Relocation) -> Result<()> {
        let symbol = self
            .symbols
            .find(&relocation.symbol)
            .ok_or_else(|| Error::new(format!("symbol not found: \"{}\"", relocation.symbol)))?;

        // Externs still unresolved take their value from the script.
        if symbol.kind == SymbolKind::Extern {
            let value = match self.script_symbols.find(&relocation.symbol) {
                Some(script) => script.value,
                None => {
                    return Err(Error::new(format!(
                        "undefined reference to symbol: \"{}\"",
                        relocation.symbol
                    )))
                }
            };
            if let Some(symbol) = self.symbols.find_mut(&relocation.symbol) {
                symbol.set_const(value);
            }
        }

        let symbol = match self.symbols.find(&relocation.symbol) {
            Some(symbol) => symbol.clone(),
            None => return Err(Error::new("symbol vanished during patching")),
        };

        let patch_id = self
            .sections
            .find(&relocation.section)
            .ok_or_else(|| Error::new("section not found for relocation"))?;

        // Constants always patch as absolute values.
        if symbol.kind == SymbolKind::Const {
            let bytes = encode_patch(symbol.value, relocation.length)?;
            return self
                .sections
                .get_mut(patch_id)
                .patch(relocation.offset, &bytes);
        }

        let target = symbol.value;
        match relocation.kind {
            RelocationKind::Absolute => {
                let bytes = encode_patch(target, relocation.length)?;
                self.sections
                    .get_mut(patch_id)
                    .patch(relocation.offset, &bytes)
            }
            RelocationKind::Relative => {
                let site = self.sections.get(patch_id).vma as i64
                    + relocation.offset as i64
                    + relocation.adjust as i64;
                let jump = target - site;
                if relocation.length != 1 {
                    return Err(Error::new(format!(
                        "invalid relative relocation length: {}",
                        relocation.length
                    )));
                }
                if jump < -128 || jump > 127 {
                    return Err(Error::new(format!(
                        "relative jump out of range: \"{}\", target {:#06X}, site {:#06X}, jump {}",
                        relocation.symbol, target, site, jump
                    )));
                }
                self.sections
                    .get_mut(patch_id)
                    .patch(relocation.offset, &[jump as u8])
            }
        }
    }

    /// The loadable image as `(lma, bytes)` rows, unpacked.
    pub fn memory_map(&self) -> Result<MemData> {
        let mut map = MemData::new();
        for section in self.sections.iter() {
            if section.noload || section.length == 0 {
                continue;
            }
            map.add(section.lma, section.data().to_vec());
        }
        if map.is_empty() {
            return Err(Error::new("no output data"));
        }
        Ok(map)
    }

    /// Dump inputs and the merged result to stdout (`-M`, `-MD`).
    pub fn print_map(&self, dump_data: bool) {
        println!();
        println!("## Input ##");
        for file in &self.files {
            println!();
            println!("** {} **", file.name);
            print_symbols(&file.symbols);
            print_relocations(&file.relocations);
            print_sections(&file.sections, dump_data);
        }

        println!();
        println!("## Output ##");
        print_symbols(&self.symbols);
        print_relocations(&self.relocations);
        print_sections(&self.sections, dump_data);
    }
}

fn ranges_overlap(a_start: u32, a_len: u32, b_start: u32, b_len: u32) -> bool {
    let (a_start, a_len) = (a_start as u64, a_len as u64);
    let (b_start, b_len) = (b_start as u64, b_len as u64);
    (a_start < b_start && a_start + a_len > b_start)
        || (a_start >= b_start && b_start + b_len > a_start)
}

/// Encode a patched value: width 1 is the low byte, widths 2 and 3 are
/// big-endian.
fn encode_patch(value: i64, length: u32) -> Result<Vec<u8>> {
    match length {
        1 => Ok(vec![value as u8]),
        2 => Ok((value as u16).to_be_bytes().to_vec()),
        3 => Ok(((value as u32) << 8).to_be_bytes()[..3].to_vec()),
        _ => Err(Error::new(format!("invalid relocation length: {}", length))),
    }
}

fn print_symbols(symbols: &SymbolTable) {
    println!();
    println!("-- Symbols --");
    for symbol in symbols.iter() {
        let kind = match symbol.kind {
            SymbolKind::Const => "CONST",
            SymbolKind::Extern => "EXTERN",
            SymbolKind::Label => "LABEL",
            SymbolKind::None => continue,
        };
        print!(
            "{}, width {}, export {}, value 0x{:06X} ({}) \"{}\"",
            kind,
            symbol.width.bytes(),
            symbol.export as u32,
            symbol.value,
            symbol.value,
            symbol.name
        );
        if let Some(section) = &symbol.section {
            print!(", section \"{}\"", section);
        }
        println!();
    }
}

fn print_relocations(relocations: &[Relocation]) {
    println!();
    println!("-- Relocations --");
    for relocation in relocations {
        print!(
            "{}, offset: 0x{:06X}, length: 0x{:02X}, section: \"{}\", symbol: \"{}\"",
            if relocation.kind == RelocationKind::Absolute {
                "ABS"
            } else {
                "REL"
            },
            relocation.offset,
            relocation.length,
            relocation.section,
            relocation.symbol
        );
        if relocation.kind == RelocationKind::Absolute {
            println!(", adjust: --");
        } else {
            println!(", adjust: {}", relocation.adjust);
        }
    }
}

fn print_sections(sections: &Sections, dump_data: bool) {
    println!();
    println!("-- Sections --");
    for section in sections.iter() {
        println!();
        println!(
            "Section \"{}\"{}",
            section.name,
            if section.noload { " NOLOAD" } else { "" }
        );
        if !section.noload {
            println!("    LMA    0x{:06X}", section.lma);
        }
        println!("    VMA    0x{:06X}", section.vma);
        println!("    size   0x{:06X}", section.length);
        if !section.noload && dump_data {
            util::dump_bytes(section.data());
        }
    }
}
