//-----------------------------------------------------------------------------
// File: src/errors.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
use std::fmt;
use std::path::PathBuf;

/// Points at a node in the analyzed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: PathBuf,
    /// 1-based line number
    pub line: u32,
    /// Byte offset from the start of the file
    pub offset: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// Everything that can stop a testbench generation run.
#[derive(Debug, thiserror::Error)]
pub enum TbError {
    #[error("Input file is missing!")]
    MissingInput,

    #[error("invalid include pattern {pattern}: {reason}")]
    IncludePattern { pattern: String, reason: String },

    #[error("clock list `{0}` must be enclosed in braces, e.g. {{clk:5,sclk:20}}")]
    ClockListSyntax(String),

    #[error("clock `{name}` has an invalid period `{period}`, expected a positive integer")]
    ClockPeriod { name: String, period: String },

    /// The front-end rejected the input. Details have already been printed.
    #[error("failed to analyze {0}")]
    Analysis(PathBuf),

    #[error("Cannot find any top module. Check for recursive instantiation")]
    NoTopModule,

    #[error("top level design unit `{0}` is a primitive, only modules are supported")]
    PrimitiveTop(String),

    #[error("{location}: unknown port found ({kind})")]
    UnsupportedPort { kind: String, location: SourceLocation },

    #[error("{path}:{line}: test vector line has {found} characters, ports need {expected}")]
    ShortVectorLine {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}: ports are too wide to read test vectors for")]
    VectorWidth { path: PathBuf },

    #[error("Error in export file open {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write port report {path}: {reason}")]
    Report { path: PathBuf, reason: String },
}

impl TbError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            TbError::Analysis(_) | TbError::UnsupportedPort { .. } => 2,
            TbError::NoTopModule | TbError::PrimitiveTop(_) => 4,
            _ => 1,
        }
    }
}
