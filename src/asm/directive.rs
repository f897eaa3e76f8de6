//! Directive handlers. One directive per line; dispatch happens in pass 1
//! only.

use std::path::Path;

use super::Assembler;
use crate::common::{Endian, NumberFormat};
use crate::expr::constexpr;
use crate::relocation::RelocationKind;
use crate::symbol::SymbolKind;
use crate::token::{Lexer, TokenKind, Whence};
use crate::{util, warn, Result};

impl Assembler {
    /// `.name …` — returns false when the line does not start a directive.
    pub(super) fn directive(&mut self, lexer: &mut Lexer) -> Result<bool> {
        if lexer.get(TokenKind::Dot, Whence::Current)?.is_none() {
            return Ok(false);
        }
        let name = match lexer.get(TokenKind::Symbol, Whence::Next)? {
            Some(name) => name,
            None => return Err(lexer.error("directive name missing after \".\"")),
        };

        match name.as_str() {
            "define" => self.dir_define(lexer)?,
            "print" => self.dir_print(lexer)?,
            "extern" => self.dir_extern(lexer)?,
            "export" => self.dir_export(lexer)?,
            "section" => self.dir_section(lexer)?,
            "include" => self.dir_include(lexer)?,
            "dbendian" => self.dir_dbendian(lexer)?,
            "d8" => self.dir_data(lexer, 1)?,
            "d16" => self.dir_data(lexer, 2)?,
            "d24" => self.dir_data(lexer, 3)?,
            "d32" => self.dir_data(lexer, 4)?,
            "d64" => self.dir_data(lexer, 8)?,
            "fill" => self.dir_fill(lexer)?,
            "if" | "ifdef" | "ifndef" | "ifeq" | "ifneq" => {
                if self.dir_if(lexer, &name)? {
                    // The false branch consumed everything up to `.endif`.
                    return Ok(true);
                }
            }
            "endif" => {}
            _ => return Err(lexer.error(format!("unknown directive: \".{}\"", name))),
        }

        if lexer.get(TokenKind::Comment, Whence::Next)?.is_none() {
            return Err(lexer.error("unexpected input after directive"));
        }
        Ok(true)
    }

    /// `.define NAME[.WIDTH] [= EXPR | NUMBER | CONST_SYMBOL]`
    fn dir_define(&mut self, lexer: &mut Lexer) -> Result<()> {
        let name = match lexer.get(TokenKind::Symbol, Whence::Next)? {
            Some(name) => name,
            None => return Err(lexer.error("symbol name missing in \".define\"")),
        };
        if self.symbols.find(&name).is_some() {
            return Err(lexer.error(format!("symbol already exists: \"{}\"", name)));
        }

        let mut attr = None;
        if lexer.get(TokenKind::Dot, Whence::Next)?.is_some() {
            match lexer.get(TokenKind::Symbol, Whence::Next)? {
                Some(a) => attr = Some(a),
                None => {
                    return Err(lexer.error("attribute name missing in \".define\" after \".\""))
                }
            }
        }

        // The `=` is optional; a missing value yields zero.
        let _ = lexer.get(TokenKind::Equal, Whence::Next)?;

        let mut value = 0;
        if let Some(result) = constexpr(&self.symbols, lexer)? {
            value = result;
        } else if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
            value = util::parse_number(&text).map_err(|err| lexer.error(err.to_string()))?;
        } else if let Some(other) = lexer.get(TokenKind::Symbol, Whence::Next)? {
            value = match self.symbols.const_value(&other) {
                Ok(Some(value)) => value,
                Ok(None) => {
                    return Err(lexer.error(format!("symbol not found: \"{}\"", other)))
                }
                Err(err) => return Err(lexer.error(err.to_string())),
            };
        }

        let symbol = self
            .symbols
            .add(&name)
            .map_err(|err| lexer.error(err.to_string()))?;
        symbol.set_const(value);
        if let Some(attr) = &attr {
            symbol
                .set_width_attr(attr)
                .map_err(|err| lexer.error(err.to_string()))?;
        }
        Ok(())
    }

    /// `.print ARG…` — expressions print in the current base, strings print
    /// verbatim; `%`, `%$`, `%%`, `%~` switch the base.
    fn dir_print(&mut self, lexer: &mut Lexer) -> Result<()> {
        let mut seen_arg = false;
        let mut format = NumberFormat::Decimal;
        loop {
            if let Some(value) = constexpr(&self.symbols, lexer)? {
                seen_arg = true;
                self.print(&util::format_number(value, format));
            } else if let Some(text) = lexer.get(TokenKind::String, Whence::Next)? {
                seen_arg = true;
                match text.as_str() {
                    "%" => format = NumberFormat::Decimal,
                    "%$" => format = NumberFormat::Hex,
                    "%%" => format = NumberFormat::Binary,
                    "%~" => format = NumberFormat::Octal,
                    _ => self.print(&text),
                }
            } else {
                if !seen_arg {
                    return Err(lexer.error("string or expression should follow \".print\""));
                }
                self.print("\n");
                return Ok(());
            }
        }
    }

    fn print(&self, text: &str) {
        if !self.noprint {
            print!("{}", text);
        }
    }

    /// `.extern NAME[.WIDTH]`
    fn dir_extern(&mut self, lexer: &mut Lexer) -> Result<()> {
        let name = match lexer.get(TokenKind::Symbol, Whence::Next)? {
            Some(name) => name,
            None => return Err(lexer.error("symbol name missing in \".extern\"")),
        };
        if self.symbols.find(&name).is_some() {
            return Err(lexer.error(format!("symbol already exists: \"{}\"", name)));
        }

        let mut attr = None;
        if lexer.get(TokenKind::Dot, Whence::Next)?.is_some() {
            match lexer.get(TokenKind::Symbol, Whence::Next)? {
                Some(a) => attr = Some(a),
                None => {
                    return Err(lexer.error("attribute name missing in \".extern\" after \".\""))
                }
            }
        }

        let symbol = self
            .symbols
            .add(&name)
            .map_err(|err| lexer.error(err.to_string()))?;
        symbol.kind = SymbolKind::Extern;
        if let Some(attr) = &attr {
            symbol
                .set_width_attr(attr)
                .map_err(|err| lexer.error(err.to_string()))?;
        }
        Ok(())
    }

    /// `.export NAME` — only labels can be exported.
    fn dir_export(&mut self, lexer: &mut Lexer) -> Result<()> {
        let name = match lexer.get(TokenKind::Symbol, Whence::Next)? {
            Some(name) => name,
            None => return Err(lexer.error("symbol name missing in \".export\"")),
        };
        let symbol = match self.symbols.find_mut(&name) {
            Some(symbol) => symbol,
            None => return Err(lexer.error(format!("symbol not found: \"{}\"", name))),
        };
        if symbol.kind != SymbolKind::Label {
            return Err(lexer.error(format!("only labels can be exported: \"{}\"", name)));
        }
        if symbol.export {
            warn(format!("symbol already exported: \"{}\"", name));
        }
        symbol.export = true;
        Ok(())
    }

    /// `.section "NAME" [NOLOAD]` — select-or-create; re-selection must
    /// agree on the NOLOAD attribute.
    fn dir_section(&mut self, lexer: &mut Lexer) -> Result<()> {
        let name = match lexer.get(TokenKind::String, Whence::Next)? {
            Some(name) => name,
            None => return Err(lexer.error("section name should follow \".section\"")),
        };

        let existing = self.sections.find(&name);
        let was_noload = existing
            .map(|id| self.sections.get(id).noload)
            .unwrap_or(false);
        self.current = self.sections.select(&name);

        match lexer.get(TokenKind::Symbol, Whence::Next)? {
            None => {
                if existing.is_some() && was_noload {
                    return Err(lexer.error(format!(
                        "section redefined without NOLOAD attribute: \"{}\"",
                        name
                    )));
                }
            }
            Some(attr) if attr == "NOLOAD" => {
                if existing.is_some() && !was_noload {
                    return Err(lexer.error(format!(
                        "section redefined with NOLOAD attribute: \"{}\"",
                        name
                    )));
                }
                self.sections.get_mut(self.current).noload = true;
            }
            Some(attr) => {
                return Err(lexer.error(format!("unknown section attribute: \"{}\"", attr)))
            }
        }
        Ok(())
    }

    /// `.include "PATH"` — assemble the file in place, same pass.
    fn dir_include(&mut self, lexer: &mut Lexer) -> Result<()> {
        let path = match lexer.get(TokenKind::String, Whence::Next)? {
            Some(path) => path,
            None => return Err(lexer.error("no file name given after \".include\"")),
        };
        self.run_file(Path::new(&path))
    }

    /// `.dbendian "big" | "little"`
    fn dir_dbendian(&mut self, lexer: &mut Lexer) -> Result<()> {
        let value = match lexer.get(TokenKind::String, Whence::Next)? {
            Some(value) => value,
            None => return Err(lexer.error("no byte order given after \".dbendian\"")),
        };
        self.dbendian = match value.as_str() {
            "big" => Endian::Big,
            "little" => Endian::Little,
            _ => return Err(lexer.error("byte order should be \"big\" or \"little\"")),
        };
        Ok(())
    }

    /// `.d8`/`.d16`/`.d24`/`.d32`/`.d64` — comma-separated data items.
    fn dir_data(&mut self, lexer: &mut Lexer, width: u32) -> Result<()> {
        loop {
            if let Some(text) = lexer.get(TokenKind::String, Whence::Next)? {
                if width != 1 {
                    return Err(lexer.error("strings are supported only in \".d8\""));
                }
                self.emit(text.as_bytes());
                self.emit(&[0]);
            } else if let Some(text) = lexer.get(TokenKind::Char, Whence::Next)? {
                if width != 1 {
                    return Err(lexer.error("chars are supported only in \".d8\""));
                }
                self.emit(&text.as_bytes()[..1]);
            } else if let Some(value) = constexpr(&self.symbols, lexer)? {
                self.emit_scalar(value, width);
            } else if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
                let value =
                    util::parse_number(&text).map_err(|err| lexer.error(err.to_string()))?;
                self.emit_scalar(value, width);
            } else if let Some(name) = lexer.get(TokenKind::Symbol, Whence::Next)? {
                let name = self
                    .symbols
                    .question_expand(&name)
                    .map_err(|err| lexer.error(err.to_string()))?;
                let symbol = match self.symbols.find(&name) {
                    Some(symbol) => symbol,
                    None => return Err(lexer.error(format!("symbol not found: \"{}\"", name))),
                };
                match symbol.kind {
                    SymbolKind::Const => {
                        let value = symbol.value;
                        self.emit_scalar(value, width);
                    }
                    SymbolKind::Label | SymbolKind::Extern => {
                        // The linker patches these in big-endian byte order.
                        self.add_relocation(&name, width, 0, RelocationKind::Absolute);
                        self.emit_scalar(0, width);
                    }
                    SymbolKind::None => {
                        return Err(lexer.error(format!("unknown symbol kind: \"{}\"", name)))
                    }
                }
            } else {
                return Err(lexer.error("unknown \".dX\" item"));
            }

            if lexer.get(TokenKind::Comma, Whence::Next)?.is_none() {
                return Ok(());
            }
        }
    }

    /// `.fill COUNT, VALUE` — append COUNT bytes of VALUE.
    fn dir_fill(&mut self, lexer: &mut Lexer) -> Result<()> {
        let count = if let Some(value) = constexpr(&self.symbols, lexer)? {
            value
        } else if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
            util::parse_number(&text).map_err(|err| lexer.error(err.to_string()))?
        } else {
            return Err(lexer.error("count missing in \".fill\""));
        };

        let _ = lexer.get(TokenKind::Comma, Whence::Next)?;

        let value = if let Some(value) = constexpr(&self.symbols, lexer)? {
            value
        } else if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
            util::parse_number(&text).map_err(|err| lexer.error(err.to_string()))?
        } else {
            return Err(lexer.error("value missing in \".fill\""));
        };

        let mut count = count;
        while count > 0 {
            self.emit(&[value as u8]);
            count -= 1;
        }
        Ok(())
    }

    /// `.if`/`.ifdef`/`.ifndef`/`.ifeq`/`.ifneq` — when the predicate is
    /// false, consume whole lines tracking `.if*`/`.endif` nesting until the
    /// matching `.endif`. Returns true when the line (and the skipped body)
    /// was fully consumed.
    fn dir_if(&mut self, lexer: &mut Lexer, which: &str) -> Result<bool> {
        let taken = match which {
            "ifdef" | "ifndef" => {
                let name = match lexer.get(TokenKind::Symbol, Whence::Next)? {
                    Some(name) => name,
                    None => return Err(lexer.error("symbol name missing in \".if(n)def\"")),
                };
                let defined = self.symbols.find(&name).is_some();
                defined == (which == "ifdef")
            }
            "ifeq" | "ifneq" => {
                let first = match constexpr(&self.symbols, lexer)? {
                    Some(value) => value,
                    None => {
                        return Err(lexer.error("no valid first expression in \".if(n)eq\""))
                    }
                };
                let second = match constexpr(&self.symbols, lexer)? {
                    Some(value) => value,
                    None => {
                        return Err(lexer.error("no valid second expression in \".if(n)eq\""))
                    }
                };
                (first == second) == (which == "ifeq")
            }
            _ => match constexpr(&self.symbols, lexer)? {
                Some(value) => value != 0,
                None => return Err(lexer.error("no valid expression in \".if\"")),
            },
        };

        if taken {
            return Ok(false);
        }

        // Skip to the matching `.endif`. Unterminated conditionals end with
        // the file.
        if lexer.get(TokenKind::Line, Whence::Next)?.is_none() {
            return Ok(true);
        }
        let mut depth = 0u32;
        loop {
            lexer.drop_current();
            if lexer.get(TokenKind::Dot, Whence::Next)?.is_some() {
                if let Some(name) = lexer.get(TokenKind::Symbol, Whence::Next)? {
                    match name.as_str() {
                        "endif" if depth == 0 => {
                            let _ = lexer.get(TokenKind::Line, Whence::Next)?;
                            return Ok(true);
                        }
                        "endif" => depth -= 1,
                        "if" | "ifdef" | "ifndef" | "ifeq" | "ifneq" => depth += 1,
                        _ => {}
                    }
                }
            }
            if lexer.get(TokenKind::Line, Whence::Next)?.is_none() {
                return Ok(true);
            }
        }
    }
}
