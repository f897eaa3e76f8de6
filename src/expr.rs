//! Constant-expression evaluator.
//!
//! Expressions are delimited by `{` and `}` and evaluate in two's-complement
//! 64-bit arithmetic. Precedence, from loosest binding to tightest:
//! `|`, `^`, `&`, `<< >>`, `+ -`, `* / %`, unary `~`. Parentheses override.
//! Symbols must name constants; labels and externs have no value until link
//! time and are rejected here.

use crate::symbol::SymbolTable;
use crate::token::{Lexer, TokenKind, Whence};
use crate::{util, Result};

/// Nesting limit of the evaluator.
const EXPR_DEPTH_MAX: usize = 1024;

/// Evaluate a `{ … }` expression at the current position.
///
/// Returns `None` without consuming anything when the input does not start
/// with `{`; a malformed expression after the brace is fatal.
pub fn constexpr(symbols: &SymbolTable, lexer: &mut Lexer) -> Result<Option<i64>> {
    if lexer.get(TokenKind::CurlyOpen, Whence::Next)?.is_none() {
        return Ok(None);
    }

    let value = expr(symbols, lexer, 0)?;

    if lexer.get(TokenKind::CurlyClose, Whence::Next)?.is_none() {
        return Err(lexer.error("missing \"}\" in expression"));
    }
    lexer.drop_current();

    Ok(Some(value))
}

fn expr(symbols: &SymbolTable, lexer: &mut Lexer, depth: usize) -> Result<i64> {
    if depth > EXPR_DEPTH_MAX {
        return Err(lexer.error("expression too deeply nested"));
    }

    let mut value = or_opd(symbols, lexer, depth)?;
    while lexer.get(TokenKind::Or, Whence::Next)?.is_some() {
        value |= or_opd(symbols, lexer, depth)?;
    }
    Ok(value)
}

fn or_opd(symbols: &SymbolTable, lexer: &mut Lexer, depth: usize) -> Result<i64> {
    let mut value = xor_opd(symbols, lexer, depth)?;
    while lexer.get(TokenKind::Xor, Whence::Next)?.is_some() {
        value ^= xor_opd(symbols, lexer, depth)?;
    }
    Ok(value)
}

fn xor_opd(symbols: &SymbolTable, lexer: &mut Lexer, depth: usize) -> Result<i64> {
    let mut value = and_opd(symbols, lexer, depth)?;
    while lexer.get(TokenKind::And, Whence::Next)?.is_some() {
        value &= and_opd(symbols, lexer, depth)?;
    }
    Ok(value)
}

fn and_opd(symbols: &SymbolTable, lexer: &mut Lexer, depth: usize) -> Result<i64> {
    let mut value = shift_opd(symbols, lexer, depth)?;
    loop {
        if lexer.get(TokenKind::ShiftLeft, Whence::Next)?.is_some() {
            let count = shift_opd(symbols, lexer, depth)?;
            value = value.wrapping_shl(count as u32);
        } else if lexer.get(TokenKind::ShiftRight, Whence::Next)?.is_some() {
            let count = shift_opd(symbols, lexer, depth)?;
            value = value.wrapping_shr(count as u32);
        } else {
            return Ok(value);
        }
    }
}

fn shift_opd(symbols: &SymbolTable, lexer: &mut Lexer, depth: usize) -> Result<i64> {
    let mut value = add_opd(symbols, lexer, depth)?;
    loop {
        if lexer.get(TokenKind::Plus, Whence::Next)?.is_some() {
            value = value.wrapping_add(add_opd(symbols, lexer, depth)?);
        } else if lexer.get(TokenKind::Minus, Whence::Next)?.is_some() {
            value = value.wrapping_sub(add_opd(symbols, lexer, depth)?);
        } else {
            return Ok(value);
        }
    }
}

fn add_opd(symbols: &SymbolTable, lexer: &mut Lexer, depth: usize) -> Result<i64> {
    let mut value = mul_opd(symbols, lexer, depth)?;
    loop {
        if lexer.get(TokenKind::Mul, Whence::Next)?.is_some() {
            value = value.wrapping_mul(mul_opd(symbols, lexer, depth)?);
        } else if lexer.get(TokenKind::Div, Whence::Next)?.is_some() {
            let divisor = mul_opd(symbols, lexer, depth)?;
            value = value
                .checked_div(divisor)
                .ok_or_else(|| lexer.error("division by zero in expression"))?;
        } else if lexer.get(TokenKind::Mod, Whence::Next)?.is_some() {
            let divisor = mul_opd(symbols, lexer, depth)?;
            value = value
                .checked_rem(divisor)
                .ok_or_else(|| lexer.error("division by zero in expression"))?;
        } else {
            return Ok(value);
        }
    }
}

fn mul_opd(symbols: &SymbolTable, lexer: &mut Lexer, depth: usize) -> Result<i64> {
    if lexer.get(TokenKind::Negate, Whence::Next)?.is_some() {
        Ok(!mul_opd(symbols, lexer, depth + 1)?)
    } else {
        not_opd(symbols, lexer, depth)
    }
}

fn not_opd(symbols: &SymbolTable, lexer: &mut Lexer, depth: usize) -> Result<i64> {
    if let Some(text) = lexer.get(TokenKind::Number, Whence::Next)? {
        return util::parse_number(&text).map_err(|err| lexer.error(err.to_string()));
    }

    if let Some(name) = lexer.get(TokenKind::Symbol, Whence::Next)? {
        let name = symbols
            .question_expand(&name)
            .map_err(|err| lexer.error(err.to_string()))?;
        return match symbols.const_value(&name) {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(lexer.error(format!("symbol not found: \"{}\"", name))),
            Err(err) => Err(lexer.error(err.to_string())),
        };
    }

    if lexer.get(TokenKind::RoundOpen, Whence::Next)?.is_some() {
        let value = expr(symbols, lexer, depth + 1)?;
        if lexer.get(TokenKind::RoundClose, Whence::Next)?.is_none() {
            return Err(lexer.error("missing \")\" in expression"));
        }
        return Ok(value);
    }

    Err(lexer.error("empty expression"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn eval_with(symbols: &SymbolTable, text: &str) -> i64 {
        let path = std::env::temp_dir().join(format!(
            "stm8tools-expr-{}-{:p}.s",
            std::process::id(),
            text.as_ptr()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file.write_all(b"\n").unwrap();
        let mut lexer = Lexer::open(&path).unwrap();
        constexpr(symbols, &mut lexer).unwrap().unwrap()
    }

    fn eval(text: &str) -> i64 {
        eval_with(&SymbolTable::new(), text)
    }

    #[test]
    fn precedence() {
        assert_eq!(eval("{1 + 2 * 3}"), 7);
        assert_eq!(eval("{10 - 4 - 3}"), 3);
        assert_eq!(eval("{1 << 4 + 1}"), 32);
        assert_eq!(eval("{3 & 1 << 1}"), 2);
        assert_eq!(eval("{1 | 2 ^ 2}"), 1);
        assert_eq!(eval("{~0 & $FF}"), 0xFF);
        assert_eq!(eval("{7 / 2}"), 3);
        assert_eq!(eval("{7 % 2}"), 1);
    }

    #[test]
    fn parentheses_override() {
        assert_eq!(eval("{(1 + 2) * 3}"), 9);
        assert_eq!(eval("{((((5))))}"), 5);
    }

    #[test]
    fn symbols_resolve() {
        let mut symbols = SymbolTable::new();
        symbols.add("BASE").unwrap().set_const(0x100);
        assert_eq!(eval_with(&symbols, "{BASE + 8}"), 0x108);
    }

    #[test]
    fn not_an_expression() {
        let symbols = SymbolTable::new();
        let path = std::env::temp_dir().join(format!("stm8tools-expr-{}.s", std::process::id()));
        std::fs::write(&path, b"42\n").unwrap();
        let mut lexer = Lexer::open(&path).unwrap();
        assert_eq!(constexpr(&symbols, &mut lexer).unwrap(), None);
        // The input was left untouched.
        assert_eq!(
            lexer.get(TokenKind::Number, Whence::Next).unwrap().as_deref(),
            Some("42")
        );
    }
}
