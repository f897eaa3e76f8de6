//! Object decoder.

use memchr::memchr;

use super::*;
use crate::common::Width;
use crate::relocation::RelocationKind;
use crate::symbol::SymbolKind;
use crate::{Error, Result};

struct Cursor<'data> {
    data: &'data [u8],
    offset: usize,
}

impl<'data> Cursor<'data> {
    fn bytes(&mut self, count: usize) -> Result<&'data [u8]> {
        let end = self.offset + count;
        if end > self.data.len() {
            return Err(Error::new("truncated object block"));
        }
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.bytes(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.bytes(2)?.try_into().unwrap()))
    }

    fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.bytes(4)?.try_into().unwrap()))
    }

    fn i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.bytes(4)?.try_into().unwrap()))
    }

    fn i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.bytes(8)?.try_into().unwrap()))
    }

    /// A NUL-terminated name.
    fn name(&mut self) -> Result<&'data str> {
        let rest = &self.data[self.offset.min(self.data.len())..];
        let nul = memchr(0, rest).ok_or_else(|| Error::new("unterminated name in object"))?;
        let name = core::str::from_utf8(&rest[..nul])
            .map_err(|_| Error::new("name in object is not valid UTF-8"))?;
        self.offset += nul + 1;
        Ok(name)
    }
}

/// Deserialise an object file.
pub fn read(data: &[u8]) -> Result<ObjectData> {
    if data.len() < FILE_HEADER_LEN {
        return Err(Error::new("object file too short"));
    }
    let magic = u32::from_le_bytes(data[0..4].try_into().unwrap());
    if magic != FILE_MAGIC {
        return Err(Error::new("bad object file magic"));
    }
    let version = u16::from_le_bytes(data[4..6].try_into().unwrap());
    if version != VERSION {
        return Err(Error::new(format!(
            "object format version mismatch: {:#06X}",
            version
        )));
    }

    let mut object = ObjectData::default();
    let mut offset = FILE_HEADER_LEN;
    while offset < data.len() {
        if offset + BLOCK_HEADER_LEN > data.len() {
            return Err(Error::new("truncated block header"));
        }
        let header = &data[offset..offset + BLOCK_HEADER_LEN];
        let magic = u16::from_le_bytes(header[0..2].try_into().unwrap());
        let length = u32::from_le_bytes(header[2..6].try_into().unwrap()) as usize;
        let stored = u16::from_le_bytes(
            header[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].try_into().unwrap(),
        );

        if length < BLOCK_HEADER_LEN || offset + length > data.len() {
            return Err(Error::new("truncated object block"));
        }
        let block = &data[offset..offset + length];
        if block_checksum(block) != stored {
            return Err(Error::new("block checksum mismatch"));
        }

        let mut cursor = Cursor {
            data: block,
            offset: BLOCK_HEADER_LEN,
        };
        match magic {
            SYMBOL_MAGIC => read_symbol(&mut cursor, &mut object)?,
            RELOCATION_MAGIC => read_relocation(&mut cursor, &mut object)?,
            SECTION_MAGIC => read_section(&mut cursor, &mut object)?,
            _ => return Err(Error::new(format!("bad block magic: {:#06X}", magic))),
        }

        offset += length;
    }

    Ok(object)
}

fn read_symbol(cursor: &mut Cursor<'_>, object: &mut ObjectData) -> Result<()> {
    let flags = cursor.u16()?;
    let width = cursor.u8()?;
    let value = cursor.i64()?;
    let name = cursor.name()?.to_string();
    let section = cursor.name()?.to_string();

    let symbol = object.symbols.add(&name)?;
    symbol.export = flags & FLAG_EXPORT != 0;
    symbol.width = Width::from_byte(width)
        .ok_or_else(|| Error::new(format!("invalid symbol width: {}", width)))?;
    symbol.value = value;
    symbol.kind = if flags & FLAG_EXTERN != 0 {
        SymbolKind::Extern
    } else {
        SymbolKind::Label
    };
    if !section.is_empty() {
        symbol.set_section(&section)?;
    }
    Ok(())
}

fn read_relocation(cursor: &mut Cursor<'_>, object: &mut ObjectData) -> Result<()> {
    let kind = match cursor.u8()? {
        0 => RelocationKind::Absolute,
        1 => RelocationKind::Relative,
        other => return Err(Error::new(format!("invalid relocation type: {}", other))),
    };
    let offset = cursor.u32()?;
    let length = cursor.u32()?;
    let adjust = cursor.i32()?;
    let symbol = cursor.name()?.to_string();
    let section = cursor.name()?.to_string();

    object.relocations.push(Relocation {
        kind,
        section,
        symbol,
        offset,
        length,
        adjust,
    });
    Ok(())
}

fn read_section(cursor: &mut Cursor<'_>, object: &mut ObjectData) -> Result<()> {
    let flags = cursor.u16()?;
    let length = cursor.u32()?;
    let name = cursor.name()?.to_string();

    let id = object.sections.select(&name);
    let section = object.sections.get_mut(id);
    section.noload = flags & FLAG_NOLOAD != 0;
    if section.noload {
        section.push_len(length);
    } else {
        let data = cursor.bytes(length as usize)?;
        section.push(data);
    }
    Ok(())
}
