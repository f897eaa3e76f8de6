//! Instruction operand parsing and encoding.
//!
//! A mnemonic owns a table of rows keyed by up to three argument kinds (see
//! [`super::table`]). The encoder scans the table for the first row whose
//! kinds equal the parsed kinds and emits the optional prebyte, the opcode
//! and the payload bytes of the destination argument. Symbolic payloads emit
//! a zero placeholder plus a relocation; the linker supplies the value.

use super::table::{self, Encoder, Row, ARG_DST, CHECK_EXT, CHECK_LONG, ODD};
use super::Assembler;
use crate::common::Width;
use crate::expr::constexpr;
use crate::relocation::RelocationKind;
use crate::symbol::SymbolKind;
use crate::token::{Lexer, TokenKind, Whence};
use crate::{util, Result};

/// Operand addressing-mode tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    None,
    A,
    X,
    Y,
    Sp,
    Xl,
    Yl,
    Xh,
    Yh,
    Cc,
    /// 1-byte absolute address.
    Shortmem,
    /// 2-byte absolute address.
    Longmem,
    /// 3-byte absolute address.
    Extmem,
    /// `#imm8`
    Byte,
    /// `#imm16`
    Word,
    /// `(X)`
    OffX,
    /// `(Y)`
    OffY,
    ShortoffX,
    LongoffX,
    ExtoffX,
    ShortoffY,
    LongoffY,
    ExtoffY,
    ShortoffSp,
    /// `([imm8],X)`
    ShortptrX,
    /// `([imm16],X)`
    LongptrX,
    ShortptrY,
    LongptrY,
    /// `[imm8]`
    Shortptr,
    /// `[imm16]`
    Longptr,
}

/// One parsed operand.
#[derive(Debug, Clone)]
pub(super) struct Arg {
    pub kind: ArgKind,
    pub value: i64,
    pub symbol: Option<String>,
}

impl Default for Arg {
    fn default() -> Arg {
        Arg {
            kind: ArgKind::None,
            value: 0,
            symbol: None,
        }
    }
}

impl Arg {
    fn of(kind: ArgKind) -> Arg {
        Arg {
            kind,
            ..Arg::default()
        }
    }
}

fn mem_kind(width: Width) -> ArgKind {
    match width {
        Width::W8 => ArgKind::Shortmem,
        Width::W16 => ArgKind::Longmem,
        Width::W24 => ArgKind::Extmem,
    }
}

fn range_kind(value: i64) -> ArgKind {
    if value < 0x100 {
        ArgKind::Shortmem
    } else if value < 0x10000 {
        ArgKind::Longmem
    } else {
        ArgKind::Extmem
    }
}

impl Assembler {
    /// One or more instructions separated by `|`, ended by a comment or
    /// newline.
    pub(super) fn instruction(&mut self, lexer: &mut Lexer) -> Result<bool> {
        let mut first = true;
        loop {
            let whence = if first { Whence::Current } else { Whence::Next };
            let name = match lexer.get(TokenKind::Symbol, whence)? {
                Some(name) => name,
                None => {
                    if !first {
                        return Err(lexer.error("no instruction follows \"|\""));
                    }
                    return Ok(false);
                }
            };

            let (encoder, rows) = match table::lookup(&name) {
                Some(entry) => entry,
                None => return Err(lexer.error(format!("unknown instruction: \"{}\"", name))),
            };

            let mut args: [Arg; 4] = Default::default();
            if !table::NO_OPERANDS.contains(&name.as_str()) {
                self.parse_args(&mut args, lexer)?;
            }

            match encoder {
                Encoder::Uni => self.encode_uni(&name, rows, &args, lexer)?,
                Encoder::Jr => self.encode_jr(&name, rows, &args, lexer)?,
                Encoder::Bit => self.encode_bit(&name, rows, &args, lexer)?,
                Encoder::Mov => self.encode_mov(&name, &args, lexer)?,
            }

            lexer.drop_current();
            if lexer.get(TokenKind::Or, Whence::Next)?.is_none() {
                if lexer.get(TokenKind::Comment, Whence::Next)?.is_none() {
                    return Err(lexer.error("unexpected input after instruction"));
                }
                return Ok(true);
            }
            first = false;
        }
    }

    /// A register name, a symbol, a number, or a `{…}` expression with an
    /// optional width suffix.
    fn parse_plain_arg(&self, lexer: &mut Lexer) -> Result<Option<Arg>> {
        if let Some(name) = lexer.get(TokenKind::Symbol, Whence::Next)? {
            let register = match name.as_str() {
                "A" => Some(ArgKind::A),
                "X" => Some(ArgKind::X),
                "Y" => Some(ArgKind::Y),
                "XL" => Some(ArgKind::Xl),
                "YL" => Some(ArgKind::Yl),
                "XH" => Some(ArgKind::Xh),
                "YH" => Some(ArgKind::Yh),
                "SP" => Some(ArgKind::Sp),
                "CC" => Some(ArgKind::Cc),
                _ => None,
            };
            if let Some(kind) = register {
                return Ok(Some(Arg::of(kind)));
            }

            let name = self
                .symbols
                .question_expand(&name)
                .map_err(|err| lexer.error(err.to_string()))?;
            let symbol = match self.symbols.find(&name) {
                Some(symbol) => symbol,
                None => return Err(lexer.error(format!("symbol not found: \"{}\"", name))),
            };
            let value = match symbol.kind {
                SymbolKind::Const => symbol.value,
                SymbolKind::Extern | SymbolKind::Label => 0,
                SymbolKind::None => {
                    return Err(lexer.error(format!(
                        "symbol should be a constant, extern or label: \"{}\"",
                        name
                    )))
                }
            };
            // The declared width, not the value, picks the memory form.
            return Ok(Some(Arg {
                kind: mem_kind(symbol.width),
                value,
                symbol: Some(name),
            }));
        }

        if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
            let value = util::parse_number(&text).map_err(|err| lexer.error(err.to_string()))?;
            return Ok(Some(Arg {
                kind: range_kind(value),
                value,
                symbol: None,
            }));
        }

        if let Some(value) = constexpr(&self.symbols, lexer)? {
            let mut kind = range_kind(value);
            if lexer.get(TokenKind::Dot, Whence::Next)?.is_some() {
                let attr = match lexer.get(TokenKind::Symbol, Whence::Next)? {
                    Some(attr) => attr,
                    None => {
                        return Err(lexer.error("attribute name missing in expression after \".\""))
                    }
                };
                kind = match Width::from_attr(&attr) {
                    Some(width) => mem_kind(width),
                    None => {
                        return Err(lexer.error(format!("unknown width attribute: \"{}\"", attr)))
                    }
                };
            }
            return Ok(Some(Arg {
                kind,
                value,
                symbol: None,
            }));
        }

        Ok(None)
    }

    /// The full operand list: plain args, `#imm`, `(…)` register-indexed
    /// forms and `[…]` memory-indirect forms, comma separated, three at
    /// most.
    fn parse_args(&mut self, args: &mut [Arg; 4], lexer: &mut Lexer) -> Result<()> {
        let mut index = 0;
        loop {
            args[index] = self.parse_one_arg(lexer)?;

            if lexer.get(TokenKind::Comma, Whence::Next)?.is_none() {
                return Ok(());
            }
            index += 1;
            if index >= 3 {
                return Err(lexer.error("too many instruction arguments"));
            }
        }
    }

    fn parse_one_arg(&mut self, lexer: &mut Lexer) -> Result<Arg> {
        if let Some(arg) = self.parse_plain_arg(lexer)? {
            return Ok(arg);
        }

        // #BYTE / #WORD immediates.
        if lexer.get(TokenKind::Hash, Whence::Next)?.is_some() {
            let mut arg = match self.parse_plain_arg(lexer)? {
                Some(arg) => arg,
                None => return Err(lexer.error("argument missing after \"#\"")),
            };
            arg.kind = match arg.kind {
                ArgKind::Shortmem => ArgKind::Byte,
                ArgKind::Longmem => ArgKind::Word,
                _ => return Err(lexer.error("invalid immediate argument")),
            };
            return Ok(arg);
        }

        // (X), (off,X), ([ptr],X) and friends.
        if lexer.get(TokenKind::RoundOpen, Whence::Next)?.is_some() {
            return self.parse_indexed_arg(lexer);
        }

        // [shortptr] / [longptr].
        if lexer.get(TokenKind::BracketOpen, Whence::Next)?.is_some() {
            let mut arg = match self.parse_plain_arg(lexer)? {
                Some(arg) => arg,
                None => return Err(lexer.error("argument missing after \"[\"")),
            };
            arg.kind = match arg.kind {
                ArgKind::Shortmem => ArgKind::Shortptr,
                ArgKind::Longmem => ArgKind::Longptr,
                _ => return Err(lexer.error("invalid argument in \"[\" \"]\"")),
            };
            if lexer.get(TokenKind::BracketClose, Whence::Next)?.is_none() {
                return Err(lexer.error("missing \"]\""));
            }
            return Ok(arg);
        }

        Err(lexer.error("unknown instruction argument"))
    }

    fn parse_indexed_arg(&mut self, lexer: &mut Lexer) -> Result<Arg> {
        let bracket = lexer.get(TokenKind::BracketOpen, Whence::Next)?.is_some();

        let mut arg = match self.parse_plain_arg(lexer)? {
            Some(arg) => arg,
            None => {
                return Err(lexer.error(if bracket {
                    "argument missing after \"[\""
                } else {
                    "argument missing after \"(\""
                }))
            }
        };

        // (X) and (Y) carry no displacement.
        if arg.kind == ArgKind::X || arg.kind == ArgKind::Y {
            if bracket {
                return Err(lexer.error("extra \"[\" before \"X\" or \"Y\""));
            }
            arg.kind = if arg.kind == ArgKind::X {
                ArgKind::OffX
            } else {
                ArgKind::OffY
            };
            if lexer.get(TokenKind::RoundClose, Whence::Next)?.is_none() {
                return Err(lexer.error("missing \")\""));
            }
            return Ok(arg);
        }

        // Provisionally classify against X; the register after the comma may
        // retarget to Y or SP.
        let pretype = match arg.kind {
            ArgKind::Shortmem => {
                if bracket {
                    ArgKind::ShortptrX
                } else {
                    ArgKind::ShortoffX
                }
            }
            ArgKind::Longmem => {
                if bracket {
                    ArgKind::LongptrX
                } else {
                    ArgKind::LongoffX
                }
            }
            ArgKind::Extmem => {
                if bracket {
                    return Err(lexer.error("extended address cannot be a pointer"));
                }
                ArgKind::ExtoffX
            }
            _ => return Err(lexer.error("invalid indexed argument")),
        };

        if bracket && lexer.get(TokenKind::BracketClose, Whence::Next)?.is_none() {
            return Err(lexer.error("missing \"]\""));
        }
        if lexer.get(TokenKind::Comma, Whence::Next)?.is_none() {
            return Err(lexer.error("missing \",\""));
        }

        let register = match self.parse_plain_arg(lexer)? {
            Some(register) => register,
            None => return Err(lexer.error("index register missing after \",\"")),
        };
        arg.kind = match register.kind {
            ArgKind::X => pretype,
            ArgKind::Y => match pretype {
                ArgKind::ShortoffX => ArgKind::ShortoffY,
                ArgKind::LongoffX => ArgKind::LongoffY,
                ArgKind::ExtoffX => ArgKind::ExtoffY,
                ArgKind::ShortptrX => ArgKind::ShortptrY,
                ArgKind::LongptrX => ArgKind::LongptrY,
                _ => return Err(lexer.error("invalid index register after \",\"")),
            },
            ArgKind::Sp => match pretype {
                ArgKind::ShortoffX => ArgKind::ShortoffSp,
                _ => return Err(lexer.error("invalid index register after \",\"")),
            },
            _ => return Err(lexer.error("invalid index register after \",\"")),
        };

        if lexer.get(TokenKind::RoundClose, Whence::Next)?.is_none() {
            return Err(lexer.error("missing \")\""));
        }
        Ok(arg)
    }

    /// Table-driven encoder shared by most mnemonics.
    fn encode_uni(
        &mut self,
        name: &str,
        rows: &'static [Row],
        args: &[Arg; 4],
        lexer: &Lexer,
    ) -> Result<()> {
        for row in rows {
            if args[0].kind != row.args[0]
                || args[1].kind != row.args[1]
                || args[2].kind != row.args[2]
                || args[3].kind != ArgKind::None
            {
                continue;
            }

            let arg = if row.flags & ARG_DST != 0 {
                &args[0]
            } else {
                &args[1]
            };

            if row.prebyte != 0 {
                self.emit(&[row.prebyte]);
            }
            self.emit(&[row.opcode]);

            if row.len > 0 {
                if let Some(symbol) = &arg.symbol {
                    if row.flags & CHECK_LONG != 0 && arg.kind != ArgKind::Longmem {
                        return Err(lexer.error(format!("symbol not longmem: \"{}\"", symbol)));
                    }
                    if row.flags & CHECK_EXT != 0 && arg.kind != ArgKind::Extmem {
                        return Err(lexer.error(format!("symbol not extmem: \"{}\"", symbol)));
                    }
                    let symbol = symbol.clone();
                    self.add_relocation(&symbol, row.len as u32, 0, RelocationKind::Absolute);
                    self.emit(&[0u8; 3][..row.len as usize]);
                } else {
                    let value = arg.value;
                    match row.len {
                        1 => self.emit(&[value as u8]),
                        2 => self.emit(&(value as u16).to_be_bytes()),
                        3 => self.emit(&((value as u32) << 8).to_be_bytes()[..3]),
                        _ => unreachable!(),
                    }
                }
            }
            return Ok(());
        }

        Err(lexer.error(format!("invalid arguments to instruction \"{}\"", name)))
    }

    /// `jr*`/`callr`: a 1-byte signed PC-relative displacement.
    fn encode_jr(
        &mut self,
        name: &str,
        rows: &'static [Row],
        args: &[Arg; 4],
        lexer: &Lexer,
    ) -> Result<()> {
        let row = &rows[0];
        if args[0].kind != row.args[0]
            || args[1].kind != ArgKind::None
            || args[2].kind != ArgKind::None
        {
            return Err(lexer.error(format!("invalid arguments to instruction \"{}\"", name)));
        }

        if row.prebyte != 0 {
            self.emit(&[row.prebyte]);
        }
        self.emit(&[row.opcode]);

        if let Some(symbol) = args[0].symbol.clone() {
            // One byte from the patch site to the end of the instruction.
            self.add_relocation(&symbol, 1, 1, RelocationKind::Relative);
            self.emit(&[0]);
        } else {
            self.emit(&[args[0].value as u8]);
        }
        Ok(())
    }

    /// `btjt`/`btjf`/`bset`/`bres`/`bccm`/`bcpl`: opcode carries the bit
    /// number, operands are a 2-byte address and, for the test-and-jump
    /// forms, a relative displacement.
    fn encode_bit(
        &mut self,
        name: &str,
        rows: &'static [Row],
        args: &[Arg; 4],
        lexer: &Lexer,
    ) -> Result<()> {
        let row = &rows[0];
        if args[0].kind == ArgKind::None
            || args[1].kind != row.args[1]
            || args[2].kind != row.args[2]
        {
            return Err(lexer.error(format!("invalid arguments to instruction \"{}\"", name)));
        }

        if row.prebyte != 0 {
            self.emit(&[row.prebyte]);
        }

        // Opcode: base | 2*bit, plus one for the odd-parity mnemonics.
        if let Some(symbol) = &args[1].symbol {
            let constant = self
                .symbols
                .find(symbol)
                .map(|s| s.kind == SymbolKind::Const)
                .unwrap_or(false);
            if !constant {
                return Err(lexer.error(format!("symbol not constant: \"{}\"", symbol)));
            }
        }
        let bit = args[1].value;
        if bit < 0 || bit > 7 {
            return Err(lexer.error("bit number out of range (0-7)"));
        }
        let parity = if row.flags & ODD != 0 { 1 } else { 0 };
        self.emit(&[row.opcode | (2 * bit as u8 + parity)]);

        // 2-byte big-endian memory address.
        if let Some(symbol) = args[0].symbol.clone() {
            if args[0].kind != ArgKind::Longmem {
                return Err(lexer.error(format!("symbol not longmem: \"{}\"", symbol)));
            }
            self.add_relocation(&symbol, 2, 0, RelocationKind::Absolute);
            self.emit(&[0, 0]);
        } else {
            let value = args[0].value;
            if value < 0 || value > 0xFFFF {
                return Err(lexer.error("memory address out of range"));
            }
            self.emit(&(value as u16).to_be_bytes());
        }

        // Optional relative displacement for btjt/btjf.
        if args[2].kind != ArgKind::None {
            if let Some(symbol) = args[2].symbol.clone() {
                if args[2].kind != ArgKind::Shortmem {
                    return Err(lexer.error(format!("symbol not shortmem: \"{}\"", symbol)));
                }
                self.add_relocation(&symbol, 1, 1, RelocationKind::Relative);
                self.emit(&[0]);
            } else {
                self.emit(&[args[2].value as u8]);
            }
        }

        Ok(())
    }

    /// The three memory-to-memory `mov` forms.
    fn encode_mov(&mut self, name: &str, args: &[Arg; 4], lexer: &Lexer) -> Result<()> {
        if args[0].kind == ArgKind::None
            || args[1].kind == ArgKind::None
            || args[2].kind != ArgKind::None
        {
            return Err(lexer.error(format!("invalid arguments to instruction \"{}\"", name)));
        }

        let dst = &args[0];
        let src = &args[1];
        match dst.kind {
            ArgKind::Longmem => match src.kind {
                ArgKind::Byte => {
                    self.emit(&[0x35]);
                    self.mov_operand(src, 1);
                    self.mov_operand(dst, 2);
                    Ok(())
                }
                ArgKind::Shortmem | ArgKind::Longmem => {
                    if src.kind == ArgKind::Shortmem {
                        if let Some(symbol) = &src.symbol {
                            return Err(
                                lexer.error(format!("symbol not longmem: \"{}\"", symbol))
                            );
                        }
                    }
                    self.emit(&[0x55]);
                    self.mov_operand(src, 2);
                    self.mov_operand(dst, 2);
                    Ok(())
                }
                _ => Err(lexer.error(format!("invalid arguments to instruction \"{}\"", name))),
            },
            ArgKind::Shortmem => {
                if dst.symbol.is_none() && src.kind == ArgKind::Byte {
                    self.emit(&[0x35]);
                    self.mov_operand(src, 1);
                    self.emit(&(dst.value as u16).to_be_bytes());
                    Ok(())
                } else if src.kind == ArgKind::Shortmem {
                    self.emit(&[0x45]);
                    self.mov_operand(src, 1);
                    self.mov_operand(dst, 1);
                    Ok(())
                } else if dst.symbol.is_none() && src.kind == ArgKind::Longmem {
                    self.emit(&[0x55]);
                    self.mov_operand(src, 2);
                    self.emit(&(dst.value as u16).to_be_bytes());
                    Ok(())
                } else {
                    Err(lexer.error(format!("invalid arguments to instruction \"{}\"", name)))
                }
            }
            _ => Err(lexer.error(format!("invalid arguments to instruction \"{}\"", name))),
        }
    }

    /// One `mov` payload: relocate symbols, else emit the literal value
    /// (big-endian for the 2-byte fields).
    fn mov_operand(&mut self, arg: &Arg, length: u32) {
        if let Some(symbol) = arg.symbol.clone() {
            self.add_relocation(&symbol, length, 0, RelocationKind::Absolute);
            self.emit(&[0u8; 2][..length as usize]);
        } else if length == 1 {
            self.emit(&[arg.value as u8]);
        } else {
            self.emit(&(arg.value as u16).to_be_bytes());
        }
    }
}
