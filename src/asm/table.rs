//! Static instruction-encoding tables.
//!
//! One table per mnemonic; a row is `(arg kinds, prebyte, opcode, payload
//! length, flags)` and row order is significant: the encoder takes the first
//! kind-exact match. The data mirrors the STM8 programming manual's opcode
//! map, including the `0x92`-prebyted `callf` pointer form.

use super::inst::ArgKind as K;

const N: K = K::None;

/// Prebyte selecting the Y-indexed variants of an opcode.
pub(super) const PDY: u8 = 0x90;
/// Prebyte selecting the `[ptr],Y` variants.
pub(super) const PIY: u8 = 0x91;
/// Prebyte selecting the short `[ptr]` variants.
pub(super) const PIX: u8 = 0x92;
/// Prebyte selecting the wide/stack variants.
pub(super) const PWSP: u8 = 0x72;

/// Odd opcode parity (bit-clear/test-false mnemonics).
pub(super) const ODD: u8 = 1 << 0;
/// Row is only valid for symbols declared `w16`.
pub(super) const CHECK_LONG: u8 = 1 << 1;
/// Payload bytes come from argument 0 instead of argument 1.
pub(super) const ARG_DST: u8 = 1 << 2;
/// Row is only valid for symbols declared `w24`.
pub(super) const CHECK_EXT: u8 = 1 << 3;

/// One encoding row.
pub(super) struct Row {
    pub args: [K; 3],
    pub prebyte: u8,
    pub opcode: u8,
    pub len: u8,
    pub flags: u8,
}

/// Which encoding routine interprets a mnemonic's rows.
#[derive(Clone, Copy)]
pub(super) enum Encoder {
    /// Table scan over addressing modes.
    Uni,
    /// 1-byte PC-relative displacement.
    Jr,
    /// Bit number folded into the opcode.
    Bit,
    /// The memory-to-memory `mov` family.
    Mov,
}

const fn r(a0: K, a1: K, a2: K, prebyte: u8, opcode: u8, len: u8, flags: u8) -> Row {
    Row {
        args: [a0, a1, a2],
        prebyte,
        opcode,
        len,
        flags,
    }
}

/// Mnemonics that take no operand list.
pub(super) static NO_OPERANDS: &[&str] = &[
    "break", "ccf", "halt", "iret", "nop", "rcf", "ret", "retf", "rim", "rvf", "sim", "scf",
    "trap", "wfe", "wfi",
];

static ADC: &[Row] = &[
    r(K::A, K::Byte, N, 0x00, 0xA9, 1, 0),
    r(K::A, K::Shortmem, N, 0x00, 0xB9, 1, 0),
    r(K::A, K::Longmem, N, 0x00, 0xC9, 2, 0),
    r(K::A, K::OffX, N, 0x00, 0xF9, 0, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xE9, 1, 0),
    r(K::A, K::LongoffX, N, 0x00, 0xD9, 2, 0),
    r(K::A, K::OffY, N, PDY, 0xF9, 0, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xE9, 1, 0),
    r(K::A, K::LongoffY, N, PDY, 0xD9, 2, 0),
    r(K::A, K::ShortoffSp, N, 0x00, 0x19, 1, 0),
    r(K::A, K::Shortptr, N, PIX, 0xC9, 1, 0),
    r(K::A, K::Longptr, N, PWSP, 0xC9, 2, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xD9, 1, 0),
    r(K::A, K::LongptrX, N, PWSP, 0xD9, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xD9, 1, 0),
];

static ADD: &[Row] = &[
    r(K::A, K::Byte, N, 0x00, 0xAB, 1, 0),
    r(K::A, K::Shortmem, N, 0x00, 0xBB, 1, 0),
    r(K::A, K::Longmem, N, 0x00, 0xCB, 2, 0),
    r(K::A, K::OffX, N, 0x00, 0xFB, 0, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xEB, 1, 0),
    r(K::A, K::LongoffX, N, 0x00, 0xDB, 2, 0),
    r(K::A, K::OffY, N, PDY, 0xFB, 0, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xEB, 1, 0),
    r(K::A, K::LongoffY, N, PDY, 0xDB, 2, 0),
    r(K::A, K::ShortoffSp, N, 0x00, 0x1B, 1, 0),
    r(K::A, K::Shortptr, N, PIX, 0xCB, 1, 0),
    r(K::A, K::Longptr, N, PWSP, 0xCB, 2, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xDB, 1, 0),
    r(K::A, K::LongptrX, N, PWSP, 0xDB, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xDB, 1, 0),
];

static AND: &[Row] = &[
    r(K::A, K::Byte, N, 0x00, 0xA4, 1, 0),
    r(K::A, K::Shortmem, N, 0x00, 0xB4, 1, 0),
    r(K::A, K::Longmem, N, 0x00, 0xC4, 2, 0),
    r(K::A, K::OffX, N, 0x00, 0xF4, 0, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xE4, 1, 0),
    r(K::A, K::LongoffX, N, 0x00, 0xD4, 2, 0),
    r(K::A, K::OffY, N, PDY, 0xF4, 0, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xE4, 1, 0),
    r(K::A, K::LongoffY, N, PDY, 0xD4, 2, 0),
    r(K::A, K::ShortoffSp, N, 0x00, 0x14, 1, 0),
    r(K::A, K::Shortptr, N, PIX, 0xC4, 1, 0),
    r(K::A, K::Longptr, N, PWSP, 0xC4, 2, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xD4, 1, 0),
    r(K::A, K::LongptrX, N, PWSP, 0xD4, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xD4, 1, 0),
];

static BCP: &[Row] = &[
    r(K::A, K::Byte, N, 0x00, 0xA5, 1, 0),
    r(K::A, K::Shortmem, N, 0x00, 0xB5, 1, 0),
    r(K::A, K::Longmem, N, 0x00, 0xC5, 2, 0),
    r(K::A, K::OffX, N, 0x00, 0xF5, 0, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xE5, 1, 0),
    r(K::A, K::LongoffX, N, 0x00, 0xD5, 2, 0),
    r(K::A, K::OffY, N, PDY, 0xF5, 0, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xE5, 1, 0),
    r(K::A, K::LongoffY, N, PDY, 0xD5, 2, 0),
    r(K::A, K::ShortoffSp, N, 0x00, 0x15, 1, 0),
    r(K::A, K::Shortptr, N, PIX, 0xC5, 1, 0),
    r(K::A, K::Longptr, N, PWSP, 0xC5, 2, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xD5, 1, 0),
    r(K::A, K::LongptrX, N, PWSP, 0xD5, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xD5, 1, 0),
];

static INT: &[Row] = &[
    r(K::Extmem, N, N, 0x00, 0x82, 3, ARG_DST),
];

static LD: &[Row] = &[
    r(K::A, K::Byte, N, 0x00, 0xA6, 1, 0),
    r(K::A, K::Shortmem, N, 0x00, 0xB6, 1, 0),
    r(K::A, K::Longmem, N, 0x00, 0xC6, 2, 0),
    r(K::A, K::OffX, N, 0x00, 0xF6, 0, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xE6, 1, 0),
    r(K::A, K::LongoffX, N, 0x00, 0xD6, 2, 0),
    r(K::A, K::OffY, N, PDY, 0xF6, 0, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xE6, 1, 0),
    r(K::A, K::LongoffY, N, PDY, 0xD6, 2, 0),
    r(K::A, K::ShortoffSp, N, 0x00, 0x7B, 1, 0),
    r(K::A, K::Shortptr, N, PIX, 0xC6, 1, 0),
    r(K::A, K::Longptr, N, PWSP, 0xC6, 2, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xD6, 1, 0),
    r(K::A, K::LongptrX, N, PWSP, 0xD6, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xD6, 1, 0),
    r(K::Shortmem, K::A, N, 0x00, 0xB7, 1, ARG_DST),
    r(K::Longmem, K::A, N, 0x00, 0xC7, 2, ARG_DST),
    r(K::OffX, K::A, N, 0x00, 0xF7, 0, 0),
    r(K::ShortoffX, K::A, N, 0x00, 0xE7, 1, ARG_DST),
    r(K::LongoffX, K::A, N, 0x00, 0xD7, 2, ARG_DST),
    r(K::OffY, K::A, N, PDY, 0xF7, 0, 0),
    r(K::ShortoffY, K::A, N, PDY, 0xE7, 1, ARG_DST),
    r(K::LongoffY, K::A, N, PDY, 0xD7, 2, ARG_DST),
    r(K::ShortoffSp, K::A, N, 0x00, 0x6B, 1, ARG_DST),
    r(K::Shortptr, K::A, N, PIX, 0xC7, 1, ARG_DST),
    r(K::Longptr, K::A, N, PWSP, 0xC7, 2, ARG_DST),
    r(K::ShortptrX, K::A, N, PIX, 0xD7, 1, ARG_DST),
    r(K::LongptrX, K::A, N, PWSP, 0xD7, 2, ARG_DST),
    r(K::ShortptrY, K::A, N, PIY, 0xD7, 1, ARG_DST),
    r(K::Xl, K::A, N, 0x00, 0x97, 0, 0),
    r(K::A, K::Xl, N, 0x00, 0x9F, 0, 0),
    r(K::Yl, K::A, N, PDY, 0x97, 0, 0),
    r(K::A, K::Yl, N, PDY, 0x9F, 0, 0),
    r(K::Xh, K::A, N, 0x00, 0x95, 0, 0),
    r(K::A, K::Xh, N, 0x00, 0x9E, 0, 0),
    r(K::Yh, K::A, N, PDY, 0x95, 0, 0),
    r(K::A, K::Yh, N, PDY, 0x9E, 0, 0),
];

static NOP: &[Row] = &[
    r(N, N, N, 0x00, 0x9D, 0, 0),
];

static SIM: &[Row] = &[
    r(N, N, N, 0x00, 0x9B, 0, 0),
];

static RIM: &[Row] = &[
    r(N, N, N, 0x00, 0x9A, 0, 0),
];

static HALT: &[Row] = &[
    r(N, N, N, 0x00, 0x8E, 0, 0),
];

static RVF: &[Row] = &[
    r(N, N, N, 0x00, 0x9C, 0, 0),
];

static RCF: &[Row] = &[
    r(N, N, N, 0x00, 0x98, 0, 0),
];

static SCF: &[Row] = &[
    r(N, N, N, 0x00, 0x99, 0, 0),
];

static WFI: &[Row] = &[
    r(N, N, N, 0x00, 0x8F, 0, 0),
];

static WFE: &[Row] = &[
    r(N, N, N, PWSP, 0x8F, 0, 0),
];

static RET: &[Row] = &[
    r(N, N, N, 0x00, 0x81, 0, 0),
];

static RETF: &[Row] = &[
    r(N, N, N, 0x00, 0x87, 0, 0),
];

static MUL: &[Row] = &[
    r(K::X, K::A, N, 0x00, 0x42, 0, 0),
    r(K::Y, K::A, N, PDY, 0x42, 0, 0),
];

static DIV: &[Row] = &[
    r(K::X, K::A, N, 0x00, 0x62, 0, 0),
    r(K::Y, K::A, N, PDY, 0x62, 0, 0),
];

static EXGW: &[Row] = &[
    r(K::X, K::Y, N, 0x00, 0x51, 0, 0),
];

static DIVW: &[Row] = &[
    r(K::X, K::Y, N, 0x00, 0x65, 0, 0),
];

static DECW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x5A, 0, 0),
    r(K::Y, N, N, PDY, 0x5A, 0, 0),
];

static CPLW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x53, 0, 0),
    r(K::Y, N, N, PDY, 0x53, 0, 0),
];

static CLRW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x5F, 0, 0),
    r(K::Y, N, N, PDY, 0x5F, 0, 0),
];

static CCF: &[Row] = &[
    r(N, N, N, 0x00, 0x8C, 0, 0),
];

static CALLF: &[Row] = &[
    r(K::Extmem, N, N, 0x00, 0x8D, 3, ARG_DST),
    r(K::Longptr, N, N, PIX, 0x8D, 2, ARG_DST),
];

static BREAK: &[Row] = &[
    r(N, N, N, 0x00, 0x8B, 0, 0),
];

static SLLW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x58, 0, 0),
    r(K::Y, N, N, PDY, 0x58, 0, 0),
];

static SRAW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x57, 0, 0),
    r(K::Y, N, N, PDY, 0x57, 0, 0),
];

static SRLW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x54, 0, 0),
    r(K::Y, N, N, PDY, 0x54, 0, 0),
];

static SWAPW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x5E, 0, 0),
    r(K::Y, N, N, PDY, 0x5E, 0, 0),
];

static TNZW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x5D, 0, 0),
    r(K::Y, N, N, PDY, 0x5D, 0, 0),
];

static TRAP: &[Row] = &[
    r(N, N, N, 0x00, 0x83, 0, 0),
];

static RRCW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x56, 0, 0),
    r(K::Y, N, N, PDY, 0x56, 0, 0),
];

static RRWA: &[Row] = &[
    r(K::X, N, N, 0x00, 0x01, 0, 0),
    r(K::Y, N, N, PDY, 0x01, 0, 0),
];

static RLWA: &[Row] = &[
    r(K::X, N, N, 0x00, 0x02, 0, 0),
    r(K::Y, N, N, PDY, 0x02, 0, 0),
];

static RLCW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x59, 0, 0),
    r(K::Y, N, N, PDY, 0x59, 0, 0),
];

static IRET: &[Row] = &[
    r(N, N, N, 0x00, 0x80, 0, 0),
];

static CALL: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0xCD, 2, CHECK_LONG | ARG_DST),
    r(K::Longmem, N, N, 0x00, 0xCD, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0xFD, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0xED, 1, ARG_DST),
    r(K::LongoffX, N, N, 0x00, 0xDD, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0xFD, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0xED, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0xDD, 2, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0xCD, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0xCD, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0xDD, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0xDD, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0xDD, 1, ARG_DST),
];

static ADDW: &[Row] = &[
    r(K::X, K::Byte, N, 0x00, 0x1C, 2, CHECK_LONG),
    r(K::X, K::Word, N, 0x00, 0x1C, 2, 0),
    r(K::X, K::Shortmem, N, PWSP, 0xBB, 2, CHECK_LONG),
    r(K::X, K::Longmem, N, PWSP, 0xBB, 2, 0),
    r(K::X, K::ShortoffSp, N, PWSP, 0xFB, 1, 0),
    r(K::Y, K::Byte, N, PWSP, 0xA9, 2, CHECK_LONG),
    r(K::Y, K::Word, N, PWSP, 0xA9, 2, 0),
    r(K::Y, K::Shortmem, N, PWSP, 0xB9, 2, CHECK_LONG),
    r(K::Y, K::Longmem, N, PWSP, 0xB9, 2, 0),
    r(K::Y, K::ShortoffSp, N, PWSP, 0xF9, 1, 0),
    r(K::Sp, K::Byte, N, 0x00, 0x5B, 1, 0),
];

static CLR: &[Row] = &[
    r(K::A, N, N, 0x00, 0x4F, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x3F, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x5F, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x7F, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x6F, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x4F, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x7F, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x6F, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x4F, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x0F, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x3F, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x3F, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x6F, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x6F, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x6F, 1, ARG_DST),
];

static CP: &[Row] = &[
    r(K::A, K::Byte, N, 0x00, 0xA1, 1, 0),
    r(K::A, K::Shortmem, N, 0x00, 0xB1, 1, 0),
    r(K::A, K::Longmem, N, 0x00, 0xC1, 2, 0),
    r(K::A, K::OffX, N, 0x00, 0xF1, 0, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xE1, 1, 0),
    r(K::A, K::LongoffX, N, 0x00, 0xD1, 2, 0),
    r(K::A, K::OffY, N, PDY, 0xF1, 0, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xE1, 1, 0),
    r(K::A, K::LongoffY, N, PDY, 0xD1, 2, 0),
    r(K::A, K::ShortoffSp, N, 0x00, 0x11, 1, 0),
    r(K::A, K::Shortptr, N, PIX, 0xC1, 1, 0),
    r(K::A, K::Longptr, N, PWSP, 0xC1, 2, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xD1, 1, 0),
    r(K::A, K::LongptrX, N, PWSP, 0xD1, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xD1, 1, 0),
];

static CPW: &[Row] = &[
    r(K::X, K::Byte, N, 0x00, 0xA3, 2, CHECK_LONG),
    r(K::X, K::Word, N, 0x00, 0xA3, 2, 0),
    r(K::X, K::Shortmem, N, 0x00, 0xB3, 1, 0),
    r(K::X, K::Longmem, N, 0x00, 0xC3, 2, 0),
    r(K::X, K::OffY, N, PDY, 0xF3, 0, 0),
    r(K::X, K::ShortoffY, N, PDY, 0xE3, 1, 0),
    r(K::X, K::LongoffY, N, PDY, 0xD3, 2, 0),
    r(K::X, K::ShortoffSp, N, 0x00, 0x13, 1, 0),
    r(K::X, K::Shortptr, N, PIX, 0xC3, 1, 0),
    r(K::X, K::Longptr, N, PWSP, 0xC3, 2, 0),
    r(K::X, K::ShortptrY, N, PIY, 0xD3, 1, 0),
    r(K::Y, K::Byte, N, PDY, 0xA3, 2, CHECK_LONG),
    r(K::Y, K::Word, N, PDY, 0xA3, 2, 0),
    r(K::Y, K::Shortmem, N, PDY, 0xB3, 1, 0),
    r(K::Y, K::Longmem, N, PDY, 0xC3, 2, 0),
    r(K::Y, K::OffX, N, 0x00, 0xF3, 0, 0),
    r(K::Y, K::ShortoffX, N, 0x00, 0xE3, 1, 0),
    r(K::Y, K::LongoffX, N, 0x00, 0xD3, 2, 0),
    r(K::Y, K::Shortptr, N, PIY, 0xC3, 1, 0),
    r(K::Y, K::ShortptrX, N, PIX, 0xD3, 1, 0),
    r(K::Y, K::LongptrX, N, PWSP, 0xD3, 2, 0),
];

static CPL: &[Row] = &[
    r(K::A, N, N, 0x00, 0x43, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x33, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x53, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x73, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x63, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x43, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x73, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x63, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x43, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x03, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x33, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x33, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x63, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x63, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x63, 1, ARG_DST),
];

static DEC: &[Row] = &[
    r(K::A, N, N, 0x00, 0x4A, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x3A, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x5A, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x7A, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x6A, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x4A, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x7A, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x6A, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x4A, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x0A, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x3A, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x3A, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x6A, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x6A, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x6A, 1, ARG_DST),
];

static EXG: &[Row] = &[
    r(K::A, K::Xl, N, 0x00, 0x41, 0, 0),
    r(K::A, K::Yl, N, 0x00, 0x61, 0, 0),
    r(K::A, K::Shortmem, N, 0x00, 0x31, 2, CHECK_LONG),
    r(K::A, K::Longmem, N, 0x00, 0x31, 2, CHECK_LONG),
];

static INC: &[Row] = &[
    r(K::A, N, N, 0x00, 0x4C, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x3C, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x5C, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x7C, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x6C, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x4C, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x7C, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x6C, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x4C, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x0C, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x3C, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x3C, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x6C, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x6C, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x6C, 1, ARG_DST),
];

static INCW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x5C, 0, 0),
    r(K::Y, N, N, PDY, 0x5C, 0, 0),
];

static JP: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0xCC, 2, CHECK_LONG | ARG_DST),
    r(K::Longmem, N, N, 0x00, 0xCC, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0xFC, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0xEC, 1, ARG_DST),
    r(K::LongoffX, N, N, 0x00, 0xDC, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0xFC, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0xEC, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0xDC, 2, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0xCC, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0xCC, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0xDC, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0xDC, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0xDC, 1, ARG_DST),
];

static JPF: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0xAC, 3, ARG_DST | CHECK_EXT),
    r(K::Longmem, N, N, 0x00, 0xAC, 3, ARG_DST | CHECK_EXT),
    r(K::Extmem, N, N, 0x00, 0xAC, 3, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0xAC, 2, CHECK_LONG | ARG_DST),
    r(K::Longptr, N, N, PIX, 0xAC, 2, ARG_DST),
];

static LDF: &[Row] = &[
    r(K::A, K::Shortmem, N, 0x00, 0xBC, 3, CHECK_EXT),
    r(K::A, K::Longmem, N, 0x00, 0xBC, 3, CHECK_EXT),
    r(K::A, K::Extmem, N, 0x00, 0xBC, 3, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xAF, 3, CHECK_EXT),
    r(K::A, K::LongoffX, N, 0x00, 0xAF, 3, CHECK_EXT),
    r(K::A, K::ExtoffX, N, 0x00, 0xAF, 3, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xAF, 3, CHECK_EXT),
    r(K::A, K::LongoffY, N, PDY, 0xAF, 3, CHECK_EXT),
    r(K::A, K::ExtoffY, N, PDY, 0xAF, 3, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xAF, 2, CHECK_LONG),
    r(K::A, K::LongptrX, N, PIX, 0xAF, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xAF, 2, CHECK_LONG),
    r(K::A, K::LongptrY, N, PIY, 0xAF, 2, 0),
    r(K::A, K::Shortptr, N, PIX, 0xBC, 2, CHECK_LONG),
    r(K::A, K::Longptr, N, PIX, 0xBC, 2, 0),
    r(K::Shortmem, K::A, N, 0x00, 0xBD, 3, ARG_DST | CHECK_EXT),
    r(K::Longmem, K::A, N, 0x00, 0xBD, 3, ARG_DST | CHECK_EXT),
    r(K::Extmem, K::A, N, 0x00, 0xBD, 3, ARG_DST),
    r(K::ShortoffX, K::A, N, 0x00, 0xA7, 3, ARG_DST | CHECK_EXT),
    r(K::LongoffX, K::A, N, 0x00, 0xA7, 3, ARG_DST | CHECK_EXT),
    r(K::ExtoffX, K::A, N, 0x00, 0xA7, 3, ARG_DST),
    r(K::ShortoffY, K::A, N, PDY, 0xA7, 3, ARG_DST | CHECK_EXT),
    r(K::LongoffY, K::A, N, PDY, 0xA7, 3, ARG_DST | CHECK_EXT),
    r(K::ExtoffY, K::A, N, PDY, 0xA7, 3, ARG_DST),
    r(K::ShortptrX, K::A, N, PIX, 0xA7, 2, CHECK_LONG | ARG_DST),
    r(K::LongptrX, K::A, N, PIX, 0xA7, 2, ARG_DST),
    r(K::ShortptrY, K::A, N, PIY, 0xA7, 2, CHECK_LONG | ARG_DST),
    r(K::LongptrY, K::A, N, PIY, 0xA7, 2, ARG_DST),
    r(K::Shortptr, K::A, N, PIX, 0xBD, 2, CHECK_LONG | ARG_DST),
    r(K::Longptr, K::A, N, PIX, 0xBD, 2, ARG_DST),
];

static LDW: &[Row] = &[
    r(K::X, K::Byte, N, 0x00, 0xAE, 2, CHECK_LONG),
    r(K::X, K::Word, N, 0x00, 0xAE, 2, 0),
    r(K::X, K::Shortmem, N, 0x00, 0xBE, 1, 0),
    r(K::X, K::Longmem, N, 0x00, 0xCE, 2, 0),
    r(K::X, K::OffX, N, 0x00, 0xFE, 0, 0),
    r(K::X, K::ShortoffX, N, 0x00, 0xEE, 1, 0),
    r(K::X, K::LongoffX, N, 0x00, 0xDE, 2, 0),
    r(K::X, K::ShortoffSp, N, 0x00, 0x1E, 1, 0),
    r(K::X, K::Shortptr, N, PIX, 0xCE, 1, 0),
    r(K::X, K::Longptr, N, PWSP, 0xCE, 2, 0),
    r(K::X, K::ShortptrX, N, PIX, 0xDE, 1, 0),
    r(K::X, K::LongptrX, N, PWSP, 0xDE, 2, 0),
    r(K::Shortmem, K::X, N, 0x00, 0xBF, 1, ARG_DST),
    r(K::Longmem, K::X, N, 0x00, 0xCF, 2, ARG_DST),
    r(K::OffX, K::Y, N, 0x00, 0xFF, 0, 0),
    r(K::ShortoffX, K::Y, N, 0x00, 0xEF, 1, ARG_DST),
    r(K::LongoffX, K::Y, N, 0x00, 0xDF, 2, ARG_DST),
    r(K::ShortoffSp, K::X, N, 0x00, 0x1F, 1, ARG_DST),
    r(K::Shortptr, K::X, N, PIX, 0xCF, 1, ARG_DST),
    r(K::Longptr, K::X, N, PWSP, 0xCF, 2, ARG_DST),
    r(K::ShortptrX, K::Y, N, PIX, 0xDF, 1, ARG_DST),
    r(K::LongptrX, K::Y, N, PWSP, 0xDF, 2, ARG_DST),
    r(K::Y, K::Byte, N, PDY, 0xAE, 2, CHECK_LONG),
    r(K::Y, K::Word, N, PDY, 0xAE, 2, 0),
    r(K::Y, K::Shortmem, N, PDY, 0xBE, 1, 0),
    r(K::Y, K::Longmem, N, PDY, 0xCE, 2, 0),
    r(K::Y, K::OffY, N, PDY, 0xFE, 0, 0),
    r(K::Y, K::ShortoffY, N, PDY, 0xEE, 1, 0),
    r(K::Y, K::LongoffY, N, PDY, 0xDE, 2, 0),
    r(K::Y, K::ShortoffSp, N, 0x00, 0x16, 1, 0),
    r(K::Y, K::Shortptr, N, PIY, 0xCE, 1, 0),
    r(K::Y, K::ShortptrY, N, PIY, 0xDE, 1, 0),
    r(K::Shortmem, K::Y, N, PDY, 0xBF, 1, ARG_DST),
    r(K::Longmem, K::Y, N, PDY, 0xCF, 2, ARG_DST),
    r(K::OffY, K::X, N, PDY, 0xFF, 0, 0),
    r(K::ShortoffY, K::X, N, PDY, 0xEF, 1, ARG_DST),
    r(K::LongoffY, K::X, N, PDY, 0xDF, 2, ARG_DST),
    r(K::ShortoffSp, K::Y, N, 0x00, 0x17, 1, ARG_DST),
    r(K::Shortptr, K::Y, N, PIY, 0xCF, 1, ARG_DST),
    r(K::ShortptrY, K::X, N, PIY, 0xDF, 1, ARG_DST),
    r(K::Y, K::X, N, PDY, 0x93, 0, 0),
    r(K::X, K::Y, N, 0x00, 0x93, 0, 0),
    r(K::X, K::Sp, N, 0x00, 0x96, 0, 0),
    r(K::Sp, K::X, N, 0x00, 0x94, 0, 0),
    r(K::Y, K::Sp, N, PDY, 0x96, 0, 0),
    r(K::Sp, K::Y, N, PDY, 0x94, 0, 0),
];

static NEG: &[Row] = &[
    r(K::A, N, N, 0x00, 0x40, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x30, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x50, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x70, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x60, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x40, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x70, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x60, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x40, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x00, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x30, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x30, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x60, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x60, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x60, 1, ARG_DST),
];

static NEGW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x50, 0, 0),
    r(K::Y, N, N, PDY, 0x50, 0, 0),
];

static OR: &[Row] = &[
    r(K::A, K::Byte, N, 0x00, 0xAA, 1, 0),
    r(K::A, K::Shortmem, N, 0x00, 0xBA, 1, 0),
    r(K::A, K::Longmem, N, 0x00, 0xCA, 2, 0),
    r(K::A, K::OffX, N, 0x00, 0xFA, 0, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xEA, 1, 0),
    r(K::A, K::LongoffX, N, 0x00, 0xDA, 2, 0),
    r(K::A, K::OffY, N, PDY, 0xFA, 0, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xEA, 1, 0),
    r(K::A, K::LongoffY, N, PDY, 0xDA, 2, 0),
    r(K::A, K::ShortoffSp, N, 0x00, 0x1A, 1, 0),
    r(K::A, K::Shortptr, N, PIX, 0xCA, 1, 0),
    r(K::A, K::Longptr, N, PWSP, 0xCA, 2, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xDA, 1, 0),
    r(K::A, K::LongptrX, N, PWSP, 0xDA, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xDA, 1, 0),
];

static POP: &[Row] = &[
    r(K::A, N, N, 0x00, 0x84, 0, 0),
    r(K::Cc, N, N, 0x00, 0x86, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x32, 2, CHECK_LONG | ARG_DST),
    r(K::Longmem, N, N, 0x00, 0x32, 2, ARG_DST),
];

static POPW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x85, 0, 0),
    r(K::Y, N, N, PDY, 0x85, 0, 0),
];

static PUSH: &[Row] = &[
    r(K::A, N, N, 0x00, 0x88, 0, 0),
    r(K::Cc, N, N, 0x00, 0x8A, 0, 0),
    r(K::Byte, N, N, 0x00, 0x4B, 1, ARG_DST),
    r(K::Shortmem, N, N, 0x00, 0x3B, 2, CHECK_LONG | ARG_DST),
    r(K::Longmem, N, N, 0x00, 0x3B, 2, ARG_DST),
];

static PUSHW: &[Row] = &[
    r(K::X, N, N, 0x00, 0x89, 0, 0),
    r(K::Y, N, N, PDY, 0x89, 0, 0),
];

static RLC: &[Row] = &[
    r(K::A, N, N, 0x00, 0x49, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x39, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x59, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x79, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x69, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x49, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x79, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x69, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x49, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x09, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x39, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x39, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x69, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x69, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x69, 1, ARG_DST),
];

static RRC: &[Row] = &[
    r(K::A, N, N, 0x00, 0x46, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x36, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x56, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x76, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x66, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x46, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x76, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x66, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x46, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x06, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x36, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x36, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x66, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x66, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x66, 1, ARG_DST),
];

static SBC: &[Row] = &[
    r(K::A, K::Byte, N, 0x00, 0xA2, 1, 0),
    r(K::A, K::Shortmem, N, 0x00, 0xB2, 1, 0),
    r(K::A, K::Longmem, N, 0x00, 0xC2, 2, 0),
    r(K::A, K::OffX, N, 0x00, 0xF2, 0, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xE2, 1, 0),
    r(K::A, K::LongoffX, N, 0x00, 0xD2, 2, 0),
    r(K::A, K::OffY, N, PDY, 0xF2, 0, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xE2, 1, 0),
    r(K::A, K::LongoffY, N, PDY, 0xD2, 2, 0),
    r(K::A, K::ShortoffSp, N, 0x00, 0x12, 1, 0),
    r(K::A, K::Shortptr, N, PIX, 0xC2, 1, 0),
    r(K::A, K::Longptr, N, PWSP, 0xC2, 2, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xD2, 1, 0),
    r(K::A, K::LongptrX, N, PWSP, 0xD2, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xD2, 1, 0),
];

static SLL: &[Row] = &[
    r(K::A, N, N, 0x00, 0x48, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x38, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x58, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x78, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x68, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x48, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x78, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x68, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x48, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x08, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x38, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x38, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x68, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x68, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x68, 1, ARG_DST),
];

static SRA: &[Row] = &[
    r(K::A, N, N, 0x00, 0x47, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x37, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x57, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x77, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x67, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x47, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x77, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x67, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x47, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x07, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x37, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x37, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x67, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x67, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x67, 1, ARG_DST),
];

static SRL: &[Row] = &[
    r(K::A, N, N, 0x00, 0x44, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x34, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x54, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x74, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x64, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x44, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x74, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x64, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x44, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x04, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x34, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x34, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x64, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x64, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x64, 1, ARG_DST),
];

static SUB: &[Row] = &[
    r(K::A, K::Byte, N, 0x00, 0xA0, 1, 0),
    r(K::A, K::Shortmem, N, 0x00, 0xB0, 1, 0),
    r(K::A, K::Longmem, N, 0x00, 0xC0, 2, 0),
    r(K::A, K::OffX, N, 0x00, 0xF0, 0, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xE0, 1, 0),
    r(K::A, K::LongoffX, N, 0x00, 0xD0, 2, 0),
    r(K::A, K::OffY, N, PDY, 0xF0, 0, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xE0, 1, 0),
    r(K::A, K::LongoffY, N, PDY, 0xD0, 2, 0),
    r(K::A, K::ShortoffSp, N, 0x00, 0x10, 1, 0),
    r(K::A, K::Shortptr, N, PIX, 0xC0, 1, 0),
    r(K::A, K::Longptr, N, PWSP, 0xC0, 2, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xD0, 1, 0),
    r(K::A, K::LongptrX, N, PWSP, 0xD0, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xD0, 1, 0),
    r(K::Sp, K::Byte, N, 0x00, 0x52, 1, 0),
];

static SUBW: &[Row] = &[
    r(K::X, K::Byte, N, 0x00, 0x1D, 2, CHECK_LONG),
    r(K::X, K::Word, N, 0x00, 0x1D, 2, 0),
    r(K::X, K::Shortmem, N, PWSP, 0xB0, 2, CHECK_LONG),
    r(K::X, K::Longmem, N, PWSP, 0xB0, 2, 0),
    r(K::X, K::ShortoffSp, N, PWSP, 0xF0, 1, 0),
    r(K::Y, K::Byte, N, PWSP, 0xA2, 2, CHECK_LONG),
    r(K::Y, K::Word, N, PWSP, 0xA2, 2, 0),
    r(K::Y, K::Shortmem, N, PWSP, 0xB2, 2, CHECK_LONG),
    r(K::Y, K::Longmem, N, PWSP, 0xB2, 2, 0),
    r(K::Y, K::ShortoffSp, N, PWSP, 0xF2, 1, 0),
];

static SWAP: &[Row] = &[
    r(K::A, N, N, 0x00, 0x4E, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x3E, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x5E, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x7E, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x6E, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x4E, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x7E, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x6E, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x4E, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x0E, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x3E, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x3E, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x6E, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x6E, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x6E, 1, ARG_DST),
];

static TNZ: &[Row] = &[
    r(K::A, N, N, 0x00, 0x4D, 0, 0),
    r(K::Shortmem, N, N, 0x00, 0x3D, 1, ARG_DST),
    r(K::Longmem, N, N, PWSP, 0x5D, 2, ARG_DST),
    r(K::OffX, N, N, 0x00, 0x7D, 0, 0),
    r(K::ShortoffX, N, N, 0x00, 0x6D, 1, ARG_DST),
    r(K::LongoffX, N, N, PWSP, 0x4D, 2, ARG_DST),
    r(K::OffY, N, N, PDY, 0x7D, 0, 0),
    r(K::ShortoffY, N, N, PDY, 0x6D, 1, ARG_DST),
    r(K::LongoffY, N, N, PDY, 0x4D, 2, ARG_DST),
    r(K::ShortoffSp, N, N, 0x00, 0x0D, 1, ARG_DST),
    r(K::Shortptr, N, N, PIX, 0x3D, 1, ARG_DST),
    r(K::Longptr, N, N, PWSP, 0x3D, 2, ARG_DST),
    r(K::ShortptrX, N, N, PIX, 0x6D, 1, ARG_DST),
    r(K::LongptrX, N, N, PWSP, 0x6D, 2, ARG_DST),
    r(K::ShortptrY, N, N, PIY, 0x6D, 1, ARG_DST),
];

static XOR: &[Row] = &[
    r(K::A, K::Byte, N, 0x00, 0xA8, 1, 0),
    r(K::A, K::Shortmem, N, 0x00, 0xB8, 1, 0),
    r(K::A, K::Longmem, N, 0x00, 0xC8, 2, 0),
    r(K::A, K::OffX, N, 0x00, 0xF8, 0, 0),
    r(K::A, K::ShortoffX, N, 0x00, 0xE8, 1, 0),
    r(K::A, K::LongoffX, N, 0x00, 0xD8, 2, 0),
    r(K::A, K::OffY, N, PDY, 0xF8, 0, 0),
    r(K::A, K::ShortoffY, N, PDY, 0xE8, 1, 0),
    r(K::A, K::LongoffY, N, PDY, 0xD8, 2, 0),
    r(K::A, K::ShortoffSp, N, 0x00, 0x18, 1, 0),
    r(K::A, K::Shortptr, N, PIX, 0xC8, 1, 0),
    r(K::A, K::Longptr, N, PWSP, 0xC8, 2, 0),
    r(K::A, K::ShortptrX, N, PIX, 0xD8, 1, 0),
    r(K::A, K::LongptrX, N, PWSP, 0xD8, 2, 0),
    r(K::A, K::ShortptrY, N, PIY, 0xD8, 1, 0),
];

static CALLR: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0xAD, 1, 0),
];

static JRA: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x20, 1, 0),
];

static JREQ: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x27, 1, 0),
];

static JRF: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x21, 1, 0),
];

static JRH: &[Row] = &[
    r(K::Shortmem, N, N, PDY, 0x29, 1, 0),
];

static JRIH: &[Row] = &[
    r(K::Shortmem, N, N, PDY, 0x2F, 1, 0),
];

static JRIL: &[Row] = &[
    r(K::Shortmem, N, N, PDY, 0x2E, 1, 0),
];

static JRM: &[Row] = &[
    r(K::Shortmem, N, N, PDY, 0x2D, 1, 0),
];

static JRMI: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x2B, 1, 0),
];

static JRNC: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x24, 1, 0),
];

static JRNE: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x26, 1, 0),
];

static JRNH: &[Row] = &[
    r(K::Shortmem, N, N, PDY, 0x28, 1, 0),
];

static JRNM: &[Row] = &[
    r(K::Shortmem, N, N, PDY, 0x2C, 1, 0),
];

static JRNV: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x28, 1, 0),
];

static JRPL: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x2A, 1, 0),
];

static JRSGE: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x2E, 1, 0),
];

static JRSGT: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x2C, 1, 0),
];

static JRSLE: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x2D, 1, 0),
];

static JRSLT: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x2F, 1, 0),
];

static JRT: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x20, 1, 0),
];

static JRUGE: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x24, 1, 0),
];

static JRUGT: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x22, 1, 0),
];

static JRULE: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x23, 1, 0),
];

static JRC: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x25, 1, 0),
];

static JRULT: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x25, 1, 0),
];

static JRV: &[Row] = &[
    r(K::Shortmem, N, N, 0x00, 0x29, 1, 0),
];

static BTJT: &[Row] = &[
    r(K::Longmem, K::Byte, K::Shortmem, PWSP, 0x00, 0, 0),
];

static BTJF: &[Row] = &[
    r(K::Longmem, K::Byte, K::Shortmem, PWSP, 0x00, 0, ODD),
];

static BSET: &[Row] = &[
    r(K::Longmem, K::Byte, N, PWSP, 0x10, 0, 0),
];

static BRES: &[Row] = &[
    r(K::Longmem, K::Byte, N, PWSP, 0x10, 0, ODD),
];

static BCCM: &[Row] = &[
    r(K::Longmem, K::Byte, N, PDY, 0x10, 0, ODD),
];

static BCPL: &[Row] = &[
    r(K::Longmem, K::Byte, N, PDY, 0x10, 0, 0),
];

/// Mnemonic dispatch, sorted for binary search.
static MNEMONICS: &[(&str, Encoder, &[Row])] = &[
    ("adc", Encoder::Uni, ADC),
    ("add", Encoder::Uni, ADD),
    ("addw", Encoder::Uni, ADDW),
    ("and", Encoder::Uni, AND),
    ("bccm", Encoder::Bit, BCCM),
    ("bcp", Encoder::Uni, BCP),
    ("bcpl", Encoder::Bit, BCPL),
    ("break", Encoder::Uni, BREAK),
    ("bres", Encoder::Bit, BRES),
    ("bset", Encoder::Bit, BSET),
    ("btjf", Encoder::Bit, BTJF),
    ("btjt", Encoder::Bit, BTJT),
    ("call", Encoder::Uni, CALL),
    ("callf", Encoder::Uni, CALLF),
    ("callr", Encoder::Jr, CALLR),
    ("ccf", Encoder::Uni, CCF),
    ("clr", Encoder::Uni, CLR),
    ("clrw", Encoder::Uni, CLRW),
    ("cp", Encoder::Uni, CP),
    ("cpl", Encoder::Uni, CPL),
    ("cplw", Encoder::Uni, CPLW),
    ("cpw", Encoder::Uni, CPW),
    ("dec", Encoder::Uni, DEC),
    ("decw", Encoder::Uni, DECW),
    ("div", Encoder::Uni, DIV),
    ("divw", Encoder::Uni, DIVW),
    ("exg", Encoder::Uni, EXG),
    ("exgw", Encoder::Uni, EXGW),
    ("halt", Encoder::Uni, HALT),
    ("inc", Encoder::Uni, INC),
    ("incw", Encoder::Uni, INCW),
    ("int", Encoder::Uni, INT),
    ("iret", Encoder::Uni, IRET),
    ("jp", Encoder::Uni, JP),
    ("jpf", Encoder::Uni, JPF),
    ("jra", Encoder::Jr, JRA),
    ("jrc", Encoder::Jr, JRC),
    ("jreq", Encoder::Jr, JREQ),
    ("jrf", Encoder::Jr, JRF),
    ("jrh", Encoder::Jr, JRH),
    ("jrih", Encoder::Jr, JRIH),
    ("jril", Encoder::Jr, JRIL),
    ("jrm", Encoder::Jr, JRM),
    ("jrmi", Encoder::Jr, JRMI),
    ("jrnc", Encoder::Jr, JRNC),
    ("jrne", Encoder::Jr, JRNE),
    ("jrnh", Encoder::Jr, JRNH),
    ("jrnm", Encoder::Jr, JRNM),
    ("jrnv", Encoder::Jr, JRNV),
    ("jrpl", Encoder::Jr, JRPL),
    ("jrsge", Encoder::Jr, JRSGE),
    ("jrsgt", Encoder::Jr, JRSGT),
    ("jrsle", Encoder::Jr, JRSLE),
    ("jrslt", Encoder::Jr, JRSLT),
    ("jrt", Encoder::Jr, JRT),
    ("jruge", Encoder::Jr, JRUGE),
    ("jrugt", Encoder::Jr, JRUGT),
    ("jrule", Encoder::Jr, JRULE),
    ("jrult", Encoder::Jr, JRULT),
    ("jrv", Encoder::Jr, JRV),
    ("ld", Encoder::Uni, LD),
    ("ldf", Encoder::Uni, LDF),
    ("ldw", Encoder::Uni, LDW),
    ("mov", Encoder::Mov, &[]),
    ("mul", Encoder::Uni, MUL),
    ("neg", Encoder::Uni, NEG),
    ("negw", Encoder::Uni, NEGW),
    ("nop", Encoder::Uni, NOP),
    ("or", Encoder::Uni, OR),
    ("pop", Encoder::Uni, POP),
    ("popw", Encoder::Uni, POPW),
    ("push", Encoder::Uni, PUSH),
    ("pushw", Encoder::Uni, PUSHW),
    ("rcf", Encoder::Uni, RCF),
    ("ret", Encoder::Uni, RET),
    ("retf", Encoder::Uni, RETF),
    ("rim", Encoder::Uni, RIM),
    ("rlc", Encoder::Uni, RLC),
    ("rlcw", Encoder::Uni, RLCW),
    ("rlwa", Encoder::Uni, RLWA),
    ("rrc", Encoder::Uni, RRC),
    ("rrcw", Encoder::Uni, RRCW),
    ("rrwa", Encoder::Uni, RRWA),
    ("rvf", Encoder::Uni, RVF),
    ("sbc", Encoder::Uni, SBC),
    ("scf", Encoder::Uni, SCF),
    ("sim", Encoder::Uni, SIM),
    ("sla", Encoder::Uni, SLL),
    ("slaw", Encoder::Uni, SLLW),
    ("sll", Encoder::Uni, SLL),
    ("sllw", Encoder::Uni, SLLW),
    ("sra", Encoder::Uni, SRA),
    ("sraw", Encoder::Uni, SRAW),
    ("srl", Encoder::Uni, SRL),
    ("srlw", Encoder::Uni, SRLW),
    ("sub", Encoder::Uni, SUB),
    ("subw", Encoder::Uni, SUBW),
    ("swap", Encoder::Uni, SWAP),
    ("swapw", Encoder::Uni, SWAPW),
    ("tnz", Encoder::Uni, TNZ),
    ("tnzw", Encoder::Uni, TNZW),
    ("trap", Encoder::Uni, TRAP),
    ("wfe", Encoder::Uni, WFE),
    ("wfi", Encoder::Uni, WFI),
    ("xor", Encoder::Uni, XOR),
];

/// Look up a mnemonic's encoder and rows.
pub(super) fn lookup(name: &str) -> Option<(Encoder, &'static [Row])> {
    MNEMONICS
        .binary_search_by_key(&name, |&(mnemonic, _, _)| mnemonic)
        .ok()
        .map(|index| (MNEMONICS[index].1, MNEMONICS[index].2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_is_sorted() {
        for pair in MNEMONICS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} !< {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn aliases_share_tables() {
        assert!(lookup("sla").is_some());
        assert!(lookup("slaw").is_some());
        assert!(lookup("mov").is_some());
        assert!(lookup("frobnicate").is_none());
    }
}
