//-----------------------------------------------------------------------------
// File: src/clocks.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
use std::fmt;

use crate::errors::TbError;
use crate::out::Clock;

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.period)
    }
}

/// Parses a `{name:period,name:period}` clock list.
///
/// Entries that don't split into exactly a name and a period are dropped.
/// A period that isn't a positive integer is an error.
pub fn parse_clocks(text: &str) -> Result<Vec<Clock>, TbError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let inner = text.strip_prefix('{')
                    .and_then(|t| t.strip_suffix('}'))
                    .ok_or_else(|| TbError::ClockListSyntax(String::from(text)))?;

    let mut clocks = Vec::new();
    for entry in inner.split(',') {
        let fields: Vec<&str> = entry.split(':').map(|f| f.trim()).collect();
        if fields.len() != 2 {
            continue;
        }

        let period = match fields[1].parse::<u32>() {
            Ok(period) if period > 0 => period,
            _ => {
                return Err(TbError::ClockPeriod {
                    name: String::from(fields[0]),
                    period: String::from(fields[1]),
                });
            },
        };

        clocks.push(Clock {
            name: String::from(fields[0]),
            period: period,
        });
    }

    Ok(clocks)
}

/// Writes a clock list back out in the form `parse_clocks` accepts.
pub fn format_clocks(clocks: &[Clock]) -> String {
    let entries: Vec<String> = clocks.iter().map(|c| c.to_string()).collect();
    format!("{{{}}}", entries.join(","))
}
