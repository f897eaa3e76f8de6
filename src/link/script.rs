//! Linker-script interpreter.
//!
//! The script is a subset of the assembler syntax: comments, constant
//! definitions (`NAME = EXPR | NUMBER | sizeof("SECTION")`), `.print`,
//! `.export`, `.place` and `.fill`.

use std::path::Path;

use super::Linker;
use crate::common::NumberFormat;
use crate::expr::constexpr;
use crate::token::{Lexer, TokenKind, Whence};
use crate::{util, warn, Result};

impl Linker {
    pub(super) fn run_script(&mut self, path: &Path) -> Result<()> {
        let mut lexer = Lexer::open(path)?;

        loop {
            lexer.drop_current();
            if lexer.get(TokenKind::Eof, Whence::Next)?.is_some() {
                break;
            }
            if lexer.get(TokenKind::Comment, Whence::Next)?.is_some() {
                continue;
            }
            if self.script_const(&mut lexer)? {
                continue;
            }
            if self.script_directive(&mut lexer)? {
                continue;
            }
            return Err(lexer.error("unknown construction in script"));
        }

        Ok(())
    }

    /// `NAME = EXPR | NUMBER | sizeof("SECTION")` — reassignment is
    /// allowed, `-D` definitions included.
    fn script_const(&mut self, lexer: &mut Lexer) -> Result<bool> {
        let name = match lexer.get(TokenKind::Symbol, Whence::Current)? {
            Some(name) => name,
            None => return Ok(false),
        };

        if name == "NOLOAD" {
            return Err(lexer.error("NOLOAD is reserved and cannot be defined"));
        }

        if lexer.get(TokenKind::Equal, Whence::Next)?.is_none() {
            return Err(lexer.error("missing \"=\""));
        }

        let value = if let Some(word) = lexer.get(TokenKind::Symbol, Whence::Next)? {
            if word != "sizeof" {
                return Err(lexer.error("missing \"sizeof\""));
            }
            if lexer.get(TokenKind::RoundOpen, Whence::Next)?.is_none() {
                return Err(lexer.error("missing \"(\""));
            }
            let section = match lexer.get(TokenKind::String, Whence::Next)? {
                Some(section) => section,
                None => return Err(lexer.error("section name missing in \"sizeof\"")),
            };
            let id = match self.sections.find(&section) {
                Some(id) => id,
                None => {
                    return Err(lexer.error(format!("section not found: \"{}\"", section)))
                }
            };
            if lexer.get(TokenKind::RoundClose, Whence::Next)?.is_none() {
                return Err(lexer.error("missing \")\""));
            }
            self.sections.get(id).length as i64
        } else if let Some(value) = constexpr(&self.script_symbols, lexer)? {
            value
        } else if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
            util::parse_number(&text).map_err(|err| lexer.error(err.to_string()))?
        } else {
            return Err(lexer.error("value missing (expression, number or \"sizeof\")"));
        };

        match self.script_symbols.find_mut(&name) {
            Some(symbol) => symbol.set_const(value),
            None => self
                .script_symbols
                .add(&name)
                .map_err(|err| lexer.error(err.to_string()))?
                .set_const(value),
        }

        if lexer.get(TokenKind::Comment, Whence::Next)?.is_none() {
            return Err(lexer.error("unexpected input after definition"));
        }
        Ok(true)
    }

    fn script_directive(&mut self, lexer: &mut Lexer) -> Result<bool> {
        if lexer.get(TokenKind::Dot, Whence::Current)?.is_none() {
            return Ok(false);
        }
        let name = match lexer.get(TokenKind::Symbol, Whence::Next)? {
            Some(name) => name,
            None => return Err(lexer.error("directive name missing after \".\"")),
        };

        match name.as_str() {
            "print" => self.script_print(lexer)?,
            "export" => self.script_export(lexer)?,
            "place" => self.script_place(lexer)?,
            "fill" => self.script_fill(lexer)?,
            _ => return Err(lexer.error(format!("unknown directive: \".{}\"", name))),
        }

        if lexer.get(TokenKind::Comment, Whence::Next)?.is_none() {
            return Err(lexer.error("unexpected input after directive"));
        }
        Ok(true)
    }

    fn script_print(&mut self, lexer: &mut Lexer) -> Result<()> {
        let mut seen_arg = false;
        let mut format = NumberFormat::Decimal;
        loop {
            if let Some(value) = constexpr(&self.script_symbols, lexer)? {
                seen_arg = true;
                if !self.noprint {
                    print!("{}", util::format_number(value, format));
                }
            } else if let Some(text) = lexer.get(TokenKind::String, Whence::Next)? {
                seen_arg = true;
                match text.as_str() {
                    "%" => format = NumberFormat::Decimal,
                    "%$" => format = NumberFormat::Hex,
                    "%%" => format = NumberFormat::Binary,
                    "%~" => format = NumberFormat::Octal,
                    _ => {
                        if !self.noprint {
                            print!("{}", text);
                        }
                    }
                }
            } else {
                if !seen_arg {
                    return Err(lexer.error("string or expression should follow \".print\""));
                }
                if !self.noprint {
                    println!();
                }
                return Ok(());
            }
        }
    }

    fn script_export(&mut self, lexer: &mut Lexer) -> Result<()> {
        let name = match lexer.get(TokenKind::Symbol, Whence::Next)? {
            Some(name) => name,
            None => return Err(lexer.error("symbol name missing in \".export\"")),
        };
        let symbol = match self.script_symbols.find_mut(&name) {
            Some(symbol) => symbol,
            None => return Err(lexer.error(format!("symbol not found: \"{}\"", name))),
        };
        if symbol.export {
            warn(format!("symbol already exported: \"{}\"", name));
        }
        symbol.export = true;
        Ok(())
    }

    /// `.place "SECTION" (NOLOAD | LMA) VMA` — stamps the load and virtual
    /// addresses; a section is placed at most once.
    fn script_place(&mut self, lexer: &mut Lexer) -> Result<()> {
        let section = match lexer.get(TokenKind::String, Whence::Next)? {
            Some(section) => section,
            None => return Err(lexer.error("section name missing in \".place\"")),
        };
        let id = match self.sections.find(&section) {
            Some(id) => id,
            None => return Err(lexer.error(format!("section not found: \"{}\"", section))),
        };
        if self.sections.get(id).placed {
            return Err(lexer.error(format!("section already placed: \"{}\"", section)));
        }

        // LMA operand, or NOLOAD for reserved sections.
        if let Some(word) = lexer.get(TokenKind::Symbol, Whence::Next)? {
            if word == "NOLOAD" {
                self.sections.get_mut(id).noload = true;
            } else {
                let value = self.script_lookup(&word, lexer)?;
                self.sections.get_mut(id).lma = value as u32;
            }
        } else if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
            let value = util::parse_number(&text).map_err(|err| lexer.error(err.to_string()))?;
            self.sections.get_mut(id).lma = value as u32;
        } else if let Some(value) = constexpr(&self.script_symbols, lexer)? {
            self.sections.get_mut(id).lma = value as u32;
        } else {
            return Err(lexer.error("no valid LMA in \".place\""));
        }

        // VMA operand.
        if let Some(word) = lexer.get(TokenKind::Symbol, Whence::Next)? {
            if word == "NOLOAD" {
                return Err(lexer.error("NOLOAD not permitted for VMA"));
            }
            let value = self.script_lookup(&word, lexer)?;
            self.sections.get_mut(id).vma = value as u32;
        } else if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
            let value = util::parse_number(&text).map_err(|err| lexer.error(err.to_string()))?;
            self.sections.get_mut(id).vma = value as u32;
        } else if let Some(value) = constexpr(&self.script_symbols, lexer)? {
            self.sections.get_mut(id).vma = value as u32;
        } else {
            return Err(lexer.error("no valid VMA in \".place\""));
        }

        self.sections.get_mut(id).placed = true;
        Ok(())
    }

    fn script_lookup(&self, name: &str, lexer: &Lexer) -> Result<i64> {
        match self.script_symbols.find(name) {
            Some(symbol) => Ok(symbol.value),
            None => Err(lexer.error(format!("symbol not defined: \"{}\"", name))),
        }
    }

    /// `.fill "SECTION", COUNT, VALUE` — append COUNT bytes of VALUE to a
    /// merged output section.
    fn script_fill(&mut self, lexer: &mut Lexer) -> Result<()> {
        let section = match lexer.get(TokenKind::String, Whence::Next)? {
            Some(section) => section,
            None => return Err(lexer.error("section name missing in \".fill\"")),
        };
        let id = match self.sections.find(&section) {
            Some(id) => id,
            None => return Err(lexer.error(format!("section not found: \"{}\"", section))),
        };

        let _ = lexer.get(TokenKind::Comma, Whence::Next)?;

        let count = if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
            util::parse_number(&text).map_err(|err| lexer.error(err.to_string()))?
        } else if let Some(value) = constexpr(&self.script_symbols, lexer)? {
            value
        } else {
            return Err(lexer.error("count missing in \".fill\""));
        };

        let _ = lexer.get(TokenKind::Comma, Whence::Next)?;

        let value = if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
            util::parse_number(&text).map_err(|err| lexer.error(err.to_string()))?
        } else if let Some(value) = constexpr(&self.script_symbols, lexer)? {
            value
        } else {
            return Err(lexer.error("value missing in \".fill\""));
        };

        let merged = self.sections.get_mut(id);
        let mut count = count;
        while count > 0 {
            merged.push(&[value as u8]);
            count -= 1;
        }
        Ok(())
    }
}
