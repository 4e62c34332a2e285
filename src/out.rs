//-----------------------------------------------------------------------------
// File: src/out.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::string::String;

use serde::Serialize;

use crate::bus::bus_width;
use crate::errors::TbError;

/// Port direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Input,
    Output,
    Inout,
    Unknown,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::Inout => "inout",
            Direction::Unknown => "unknown dir",
        };
        f.write_str(text)
    }
}

/// Describes a port of the design under test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Port {
    pub name: String,
    pub direction: Direction,
    pub data_type: String,
    /// `[hi:lo]`, empty for scalars
    pub bus_range: String,
    pub is_clock: bool,
    /// Bits waiting to be driven, one character per bit.
    #[serde(skip)]
    pub pending_values: VecDeque<char>,
}

impl Port {
    /// True when the range gives a usable width.
    pub fn is_bus(&self) -> bool {
        bus_width(&self.bus_range).is_some()
    }

    /// Number of vector characters one time step takes for this port.
    pub fn width(&self) -> usize {
        bus_width(&self.bus_range).unwrap_or(1)
    }
}

/// Describes a clock generated by the testbench.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clock {
    pub name: String,
    /// Half period in ns
    pub period: u32,
}

/// Describes the module the testbench is built around.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    pub name: String,
    pub ports: Vec<Port>,
}

/// Contents of the port report.
#[derive(Debug, Serialize)]
struct PortReport<'a> {
    module: &'a str,
    ports: &'a [Port],
    clocks: &'a [Clock],
    time_steps: usize,
}

/// Dumps the normalized module as YAML.
pub fn write_report(path: &Path, module: &Module, clocks: &[Clock], time_steps: usize) -> Result<(), TbError> {
    let report = PortReport {
        module: &module.name,
        ports: &module.ports,
        clocks: clocks,
        time_steps: time_steps,
    };

    let file = File::create(path).map_err(|e| TbError::Report {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_yaml::to_writer(&file, &report).map_err(|e| TbError::Report {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
