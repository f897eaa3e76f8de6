//! Symbol table.
//!
//! Insertion order is preserved: listings and the object writer walk symbols
//! in the order the source introduced them.

use indexmap::IndexMap;

use crate::common::Width;
use crate::{Error, Result};

/// What a symbol names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Declared but not yet classified.
    None,
    /// A value private to the assembly unit.
    Const,
    /// A reference satisfied at link time.
    Extern,
    /// An offset into a section.
    Label,
}

/// A named constant, extern reference or label.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub value: i64,
    pub export: bool,
    pub width: Width,
    /// The owning section; labels only.
    pub section: Option<String>,
    attrs: Vec<(String, String)>,
}

impl Symbol {
    fn new(name: &str) -> Symbol {
        Symbol {
            name: name.to_string(),
            kind: SymbolKind::None,
            value: 0,
            export: false,
            width: Width::W8,
            section: None,
            attrs: Vec::new(),
        }
    }

    /// Turn the symbol into a constant of `value`.
    pub fn set_const(&mut self, value: i64) {
        self.kind = SymbolKind::Const;
        self.value = value;
    }

    /// Record the owning section. A symbol belongs to at most one section.
    pub fn set_section(&mut self, section: &str) -> Result<()> {
        if self.section.is_some() {
            return Err(Error::new(format!(
                "symbol already assigned to a section: \"{}\"",
                self.name
            )));
        }
        self.section = Some(section.to_string());
        Ok(())
    }

    /// Set the width from an attribute name (`w8`, `w16`, `w24`).
    pub fn set_width_attr(&mut self, attr: &str) -> Result<()> {
        let width = Width::from_attr(attr).ok_or_else(|| {
            Error::new(format!(
                "invalid width of symbol \"{}\": \"{}\"",
                self.name, attr
            ))
        })?;
        self.width = width;
        self.set_attr("width", attr)
    }

    /// Set a named attribute; the last write per name wins.
    pub fn set_attr(&mut self, name: &str, value: &str) -> Result<()> {
        if name == "width" && Width::from_attr(value).is_none() {
            return Err(Error::new(format!(
                "invalid value of width attribute: \"{}\"",
                value
            )));
        }
        self.attrs.retain(|(attr, _)| attr != name);
        self.attrs.push((name.to_string(), value.to_string()));
        Ok(())
    }

    /// Look up a named attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// The attribute list in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Symbols of one assembly unit (or one side of a link), keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
    current_label: Option<String>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// Add a symbol. Names are unique within a table.
    pub fn add(&mut self, name: &str) -> Result<&mut Symbol> {
        if self.symbols.contains_key(name) {
            return Err(Error::new(format!("symbol redefined: \"{}\"", name)));
        }
        Ok(self
            .symbols
            .entry(name.to_string())
            .or_insert_with(|| Symbol::new(name)))
    }

    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.symbols.get_mut(name)
    }

    /// The value of a constant symbol.
    ///
    /// `Ok(None)` when the name is unknown; naming a label or extern where a
    /// constant is required is an error.
    pub fn const_value(&self, name: &str) -> Result<Option<i64>> {
        match self.symbols.get(name) {
            None => Ok(None),
            Some(symbol) if symbol.kind == SymbolKind::Const => Ok(Some(symbol.value)),
            Some(_) => Err(Error::new(format!("symbol not constant: \"{}\"", name))),
        }
    }

    /// Symbols in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Bind `?` to the most recently defined label.
    pub fn set_current_label(&mut self, name: &str) {
        self.current_label = Some(name.to_string());
    }

    /// Expand a `?`-prefixed identifier to the current label's name.
    pub fn question_expand(&self, name: &str) -> Result<String> {
        if !name.starts_with('?') {
            return Ok(name.to_string());
        }
        match &self.current_label {
            Some(label) => Ok(label.clone()),
            None => Err(Error::new(format!(
                "no label defined yet for \"{}\"",
                name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names() {
        let mut table = SymbolTable::new();
        table.add("x").unwrap().set_const(1);
        assert!(table.add("x").is_err());
        assert_eq!(table.const_value("x").unwrap(), Some(1));
        assert_eq!(table.const_value("y").unwrap(), None);
    }

    #[test]
    fn const_kind_enforced() {
        let mut table = SymbolTable::new();
        table.add("l").unwrap().kind = SymbolKind::Label;
        assert!(table.const_value("l").is_err());
    }

    #[test]
    fn section_set_once() {
        let mut table = SymbolTable::new();
        let symbol = table.add("l").unwrap();
        symbol.set_section("text").unwrap();
        assert!(symbol.set_section("data").is_err());
    }

    #[test]
    fn width_attr() {
        let mut table = SymbolTable::new();
        let symbol = table.add("s").unwrap();
        symbol.set_width_attr("w16").unwrap();
        assert_eq!(symbol.width, Width::W16);
        assert_eq!(symbol.attr("width"), Some("w16"));
        assert!(symbol.set_width_attr("w12").is_err());
    }

    #[test]
    fn question_expansion() {
        let mut table = SymbolTable::new();
        assert!(table.question_expand("?").is_err());
        table.set_current_label("loop");
        assert_eq!(table.question_expand("?").unwrap(), "loop");
        assert_eq!(table.question_expand("?x").unwrap(), "loop");
        assert_eq!(table.question_expand("plain").unwrap(), "plain");
    }

    #[test]
    fn insertion_order_preserved() {
        let mut table = SymbolTable::new();
        for name in ["c", "a", "b"] {
            table.add(name).unwrap();
        }
        let names: Vec<_> = table.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
