//! Section buffers.
//!
//! A section is an append-only byte buffer with in-place patching. A
//! `NOLOAD` section reserves address space: appends advance its length but
//! no bytes are kept and patches are ignored.

use crate::{Error, Result};

/// Index of a section within a [`Sections`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(pub usize);

/// One named section.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    data: Vec<u8>,
    /// Byte length, which for `NOLOAD` sections exceeds the stored data.
    pub length: u32,
    pub noload: bool,
    /// Set once the linker script placed the section.
    pub placed: bool,
    pub lma: u32,
    pub vma: u32,
    /// Linker scratch: concatenation offset of the file being merged.
    pub offset: u32,
}

impl Section {
    fn new(name: &str) -> Section {
        Section {
            name: name.to_string(),
            data: Vec::new(),
            length: 0,
            noload: false,
            placed: false,
            lma: 0,
            vma: 0,
            offset: 0,
        }
    }

    /// Append bytes at the end of the section.
    pub fn push(&mut self, bytes: &[u8]) {
        if !self.noload {
            self.data.extend_from_slice(bytes);
        }
        self.length += bytes.len() as u32;
    }

    /// Advance the length without storing bytes (`NOLOAD` merges).
    pub fn push_len(&mut self, length: u32) {
        debug_assert!(self.noload || length == 0);
        self.length += length;
    }

    /// Overwrite an existing range. A no-op on `NOLOAD` sections; patching
    /// outside the current length is fatal.
    pub fn patch(&mut self, offset: u32, bytes: &[u8]) -> Result<()> {
        if self.noload {
            return Ok(());
        }
        let start = offset as usize;
        let end = start + bytes.len();
        if end > self.data.len() {
            return Err(Error::new(format!(
                "patch out of bounds in section \"{}\": offset {:#08X}, length {:#08X}, section length {:#08X}",
                self.name,
                offset,
                bytes.len(),
                self.length
            )));
        }
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// The stored image bytes (empty for `NOLOAD` sections).
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The sections of one assembly unit or link result, in creation order.
#[derive(Debug, Clone, Default)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    pub fn new() -> Sections {
        Sections::default()
    }

    pub fn find(&self, name: &str) -> Option<SectionId> {
        self.sections
            .iter()
            .position(|section| section.name == name)
            .map(SectionId)
    }

    /// Select a section by name, creating it when missing.
    pub fn select(&mut self, name: &str) -> SectionId {
        match self.find(name) {
            Some(id) => id,
            None => {
                self.sections.push(Section::new(name));
                SectionId(self.sections.len() - 1)
            }
        }
    }

    #[inline]
    pub fn get(&self, id: SectionId) -> &Section {
        &self.sections[id.0]
    }

    #[inline]
    pub fn get_mut(&mut self, id: SectionId) -> &mut Section {
        &mut self.sections[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.sections.iter_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_patch() {
        let mut sections = Sections::new();
        let id = sections.select("text");
        let section = sections.get_mut(id);
        section.push(&[1, 2, 3, 4]);
        section.patch(1, &[9, 9]).unwrap();
        assert_eq!(section.data(), &[1, 9, 9, 4]);
        assert!(section.patch(3, &[0, 0]).is_err());
    }

    #[test]
    fn noload_keeps_length_only() {
        let mut sections = Sections::new();
        let id = sections.select("bss");
        let section = sections.get_mut(id);
        section.noload = true;
        section.push(&[0; 16]);
        assert_eq!(section.length, 16);
        assert!(section.data().is_empty());
        // Patching reserved space is a no-op.
        section.patch(1000, &[1]).unwrap();
    }

    #[test]
    fn select_reuses_existing() {
        let mut sections = Sections::new();
        let a = sections.select("text");
        let b = sections.select("text");
        assert_eq!(a, b);
        assert!(sections.find("data").is_none());
    }
}
