//-----------------------------------------------------------------------------
// File: src/types.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
//! Port data types.

/// Built-in net and variable type keywords a port can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKeyword {
    Real,
    Wire,
    Logic,
    Reg,
    Tri,
    Wand,
    Triand,
    Wor,
    Trior,
    Trireg,
    Tri0,
    Tri1,
    Uwire,
    Supply0,
    Supply1,
    Integer,
    Int,
    Byte,
    Shortint,
    Longint,
    Bit,
    Shortreal,
}

/// Keyword spellings, one entry per `TypeKeyword` variant.
const KEYWORDS: [(TypeKeyword, &str); 22] = [
    (TypeKeyword::Real, "real"),
    (TypeKeyword::Wire, "wire"),
    (TypeKeyword::Logic, "logic"),
    (TypeKeyword::Reg, "reg"),
    (TypeKeyword::Tri, "tri"),
    (TypeKeyword::Wand, "wand"),
    (TypeKeyword::Triand, "triand"),
    (TypeKeyword::Wor, "wor"),
    (TypeKeyword::Trior, "trior"),
    (TypeKeyword::Trireg, "trireg"),
    (TypeKeyword::Tri0, "tri0"),
    (TypeKeyword::Tri1, "tri1"),
    (TypeKeyword::Uwire, "uwire"),
    (TypeKeyword::Supply0, "supply0"),
    (TypeKeyword::Supply1, "supply1"),
    (TypeKeyword::Integer, "integer"),
    (TypeKeyword::Int, "int"),
    (TypeKeyword::Byte, "byte"),
    (TypeKeyword::Shortint, "shortint"),
    (TypeKeyword::Longint, "longint"),
    (TypeKeyword::Bit, "bit"),
    (TypeKeyword::Shortreal, "shortreal"),
];

impl TypeKeyword {
    pub fn from_keyword(text: &str) -> Option<TypeKeyword> {
        KEYWORDS.iter()
                .find(|(_, spelling)| *spelling == text)
                .map(|(keyword, _)| *keyword)
    }

    pub fn as_str(self) -> &'static str {
        KEYWORDS.iter()
                .find(|(keyword, _)| *keyword == self)
                .map(|(_, spelling)| *spelling)
                .unwrap_or("Unknown")
    }
}

/// Data type of a port as reported by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    Keyword(TypeKeyword),
    /// Anything outside the keyword table (typedefs, structs, `time`, ...)
    Named(String),
    Unknown,
}

impl DeclaredType {
    /// Classifies the leading name of a type's source text.
    ///
    /// The name ends at the first character that can't be part of a
    /// (package scoped) identifier, so `reg[7:0]` is a `reg`.
    pub fn from_text(text: &str) -> DeclaredType {
        let text = text.trim_start();
        let end = text.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == ':'))
                      .unwrap_or(text.len());
        let word = &text[..end];

        if word.is_empty() {
            return DeclaredType::Unknown;
        }
        match TypeKeyword::from_keyword(word) {
            Some(keyword) => DeclaredType::Keyword(keyword),
            None => DeclaredType::Named(String::from(word)),
        }
    }

    /// Name written into the testbench declaration.
    pub fn type_name(&self) -> &str {
        match self {
            DeclaredType::Keyword(keyword) => keyword.as_str(),
            DeclaredType::Named(name) => name,
            DeclaredType::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_total() {
        for (keyword, spelling) in KEYWORDS.iter() {
            assert_eq!(keyword.as_str(), *spelling);
            assert_eq!(TypeKeyword::from_keyword(spelling), Some(*keyword));
        }
    }

    #[test]
    fn fallbacks() {
        assert_eq!(DeclaredType::from_text("reg [7:0]").type_name(), "reg");
        assert_eq!(DeclaredType::from_text("my_struct_t").type_name(), "my_struct_t");
        assert_eq!(DeclaredType::from_text("time").type_name(), "time");
        assert_eq!(DeclaredType::from_text("  ").type_name(), "Unknown");
        assert_eq!(DeclaredType::from_text("[3:0]").type_name(), "Unknown");
    }

    #[test]
    fn range_without_space() {
        assert_eq!(DeclaredType::from_text("reg[7:0]"), DeclaredType::Keyword(TypeKeyword::Reg));
        assert_eq!(DeclaredType::from_text("logic[3:0]"), DeclaredType::Keyword(TypeKeyword::Logic));
        assert_eq!(DeclaredType::from_text("pkg::word_t[1:0]").type_name(), "pkg::word_t");
    }
}
