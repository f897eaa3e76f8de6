//! Two-pass assembler.
//!
//! Pass 0 walks the source collecting label definitions and skips everything
//! else line by line; pass 1 re-tokenises the file from the start and
//! executes directives and instructions, emitting section bytes and
//! relocations. Every label therefore has a stable offset before the first
//! byte is emitted, and forward references inside a file reduce to ordinary
//! relocations.

use std::path::Path;

use crate::common::Endian;
use crate::relocation::{Relocation, RelocationKind};
use crate::section::{SectionId, Sections};
use crate::symbol::{SymbolKind, SymbolTable};
use crate::token::{Lexer, TokenKind, Whence};
use crate::{util, Result};

mod directive;
mod inst;
mod table;

/// Assembly state threaded through both passes.
pub struct Assembler {
    pass: u32,
    dbendian: Endian,
    pub symbols: SymbolTable,
    pub sections: Sections,
    pub relocations: Vec<Relocation>,
    current: SectionId,
    /// Parse `.print` but do not write its output.
    pub noprint: bool,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// A fresh context with the initial `text` section selected.
    pub fn new() -> Assembler {
        let mut sections = Sections::new();
        let current = sections.select("text");
        Assembler {
            pass: 0,
            dbendian: Endian::Big,
            symbols: SymbolTable::new(),
            sections,
            relocations: Vec::new(),
            current,
            noprint: false,
        }
    }

    /// Define a constant before pass 0 (the `-D NAME=VALUE` option).
    pub fn define(&mut self, name: &str, value: i64) -> Result<()> {
        self.symbols.add(name)?.set_const(value);
        Ok(())
    }

    /// Run both passes over `path`.
    pub fn assemble(&mut self, path: &Path) -> Result<()> {
        self.run_file(path)?;
        self.pass += 1;
        self.run_file(path)
    }

    /// Assemble one file in the current pass; `.include` recurses here.
    fn run_file(&mut self, path: &Path) -> Result<()> {
        let mut lexer = Lexer::open(path)?;

        loop {
            lexer.drop_current();
            if lexer.get(TokenKind::Eof, Whence::Next)?.is_some() {
                break;
            }
            if lexer.get(TokenKind::Comment, Whence::Next)?.is_some() {
                continue;
            }
            if self.label(&mut lexer)? {
                continue;
            }
            if self.pass > 0 {
                if self.directive(&mut lexer)? {
                    continue;
                }
                if self.instruction(&mut lexer)? {
                    continue;
                }
            } else if lexer.get(TokenKind::Line, Whence::Current)?.is_some() {
                continue;
            }
            return Err(lexer.error("unknown program construction"));
        }

        Ok(())
    }

    /// `IDENT [. WIDTH] :` — create the label in pass 0, resolve it to the
    /// current section offset in pass 1.
    fn label(&mut self, lexer: &mut Lexer) -> Result<bool> {
        let name = match lexer.get(TokenKind::Symbol, Whence::Current)? {
            Some(name) => name,
            None => return Ok(false),
        };

        if let Some(symbol) = self.symbols.find(&name) {
            if (symbol.kind == SymbolKind::Label && self.pass == 0)
                || symbol.kind != SymbolKind::Label
            {
                return Err(lexer.error(format!("symbol already exists: \"{}\"", name)));
            }
        }

        let mut attr = None;
        if lexer.get(TokenKind::Dot, Whence::Next)?.is_some() {
            match lexer.get(TokenKind::Symbol, Whence::Next)? {
                Some(a) => attr = Some(a),
                None => return Err(lexer.error("attribute name missing in label after \".\"")),
            }
            if lexer.get(TokenKind::Colon, Whence::Next)?.is_none() {
                return Err(lexer.error("missing \":\""));
            }
        } else if lexer.get(TokenKind::Colon, Whence::Next)?.is_none() {
            return Ok(false);
        }

        if self.pass == 0 {
            let symbol = self
                .symbols
                .add(&name)
                .map_err(|err| lexer.error(err.to_string()))?;
            symbol.kind = SymbolKind::Label;
            if let Some(attr) = &attr {
                symbol
                    .set_width_attr(attr)
                    .map_err(|err| lexer.error(err.to_string()))?;
            }
        } else {
            let offset = self.sections.get(self.current).length;
            let section = self.sections.get(self.current).name.clone();
            let symbol = match self.symbols.find_mut(&name) {
                Some(symbol) if symbol.kind == SymbolKind::Label => symbol,
                _ => return Err(lexer.error(format!("label not found: \"{}\"", name))),
            };
            symbol.value = offset as i64;
            symbol
                .set_section(&section)
                .map_err(|err| lexer.error(err.to_string()))?;
        }

        self.symbols.set_current_label(&name);

        Ok(true)
    }

    /// Append to the current section.
    fn emit(&mut self, bytes: &[u8]) {
        self.sections.get_mut(self.current).push(bytes);
    }

    /// Append `value` as `width` bytes in the `.d*` byte order. Width-1
    /// items are a single byte and ignore the order.
    fn emit_scalar(&mut self, value: i64, width: u32) {
        let le = self.dbendian == Endian::Little;
        match width {
            1 => self.emit(&[value as u8]),
            2 => {
                let half = value as u16;
                let bytes = if le { half.to_le_bytes() } else { half.to_be_bytes() };
                self.emit(&bytes);
            }
            3 => {
                let word = value as u32;
                let bytes = if le {
                    word.to_le_bytes()
                } else {
                    (word << 8).to_be_bytes()
                };
                self.emit(&bytes[..3]);
            }
            4 => {
                let word = value as u32;
                let bytes = if le { word.to_le_bytes() } else { word.to_be_bytes() };
                self.emit(&bytes);
            }
            8 => {
                let bytes = if le { value.to_le_bytes() } else { value.to_be_bytes() };
                self.emit(&bytes);
            }
            _ => unreachable!(),
        }
    }

    /// Record a fixup against `symbol` at the current end of section.
    fn add_relocation(&mut self, symbol: &str, length: u32, adjust: i32, kind: RelocationKind) {
        let section = self.sections.get(self.current);
        self.relocations.push(Relocation {
            kind,
            section: section.name.clone(),
            symbol: symbol.to_string(),
            offset: section.length,
            length,
            adjust,
        });
    }

    /// True when at least one section carries bytes or reserved space.
    pub fn has_output(&self) -> bool {
        self.sections.iter().any(|section| section.length > 0)
    }

    /// Dump symbols, relocations and sections to stdout (`-I`).
    pub fn print_result(&self) {
        println!("================================ ASSEMBLED INFO ================================");

        if !self.symbols.is_empty() {
            println!();
            println!("- Symbols -");
            for symbol in self.symbols.iter() {
                let kind = match symbol.kind {
                    SymbolKind::Const => "CONST",
                    SymbolKind::Extern => "EXTERN",
                    SymbolKind::Label => "LABEL",
                    SymbolKind::None => "-----",
                };
                print!(
                    "{} \"{}\", width {}, export {}, value {:06X} ({})",
                    kind,
                    symbol.name,
                    symbol.width.bytes(),
                    symbol.export as u32,
                    symbol.value,
                    symbol.value
                );
                if let Some(section) = &symbol.section {
                    print!(", section \"{}\"", section);
                }
                println!();
                for (name, value) in symbol.attrs() {
                    println!("\tattr \"{}\" = \"{}\"", name, value);
                }
            }
        }

        if !self.relocations.is_empty() {
            println!();
            println!("- Relocations -");
            for relocation in &self.relocations {
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

        if !self.sections.is_empty() {
            println!();
            println!("- Sections -");
            for section in self.sections.iter() {
                println!();
                print!("Section \"{}\" [{} bytes]", section.name, section.length);
                if section.noload {
                    println!(" NOLOAD");
                } else {
                    println!();
                    util::dump_bytes(section.data());
                }
            }
        }

        println!("================================================================================");
    }
}
