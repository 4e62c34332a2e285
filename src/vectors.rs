//-----------------------------------------------------------------------------
// File: src/vectors.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
//! Test vector files.
//!
//! One line per time step. Characters are handed out to the non-clock
//! ports in declaration order with no separator, a bus takes as many
//! characters as it has bits. Lines starting with `#` are comments.
use std::path::Path;

use crate::errors::TbError;
use crate::out::Port;

/// Queues the vectors found in `path` onto `ports`.
///
/// Returns the number of time steps read. A missing or unreadable file is
/// only a warning, the testbench is then generated without stimulus.
pub fn load(path: Option<&Path>, ports: &mut [Port]) -> Result<usize, TbError> {
    let path = match path {
        Some(path) => path,
        None => return Ok(0),
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error opening test vec file {}: {}", path.display(), e);
            return Ok(0);
        },
    };

    apply_vectors(&text, path, ports)
}

/// Distributes every vector line of `text` over the ports.
pub fn apply_vectors(text: &str, path: &Path, ports: &mut [Port]) -> Result<usize, TbError> {
    let expected = ports.iter()
                        .filter(|p| !p.is_clock)
                        .try_fold(0usize, |total, p| total.checked_add(p.width()))
                        .ok_or_else(|| TbError::VectorWidth { path: path.to_path_buf() })?;
    let mut steps = 0;

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let bits: Vec<char> = line.chars().collect();
        if bits.len() < expected {
            return Err(TbError::ShortVectorLine {
                path: path.to_path_buf(),
                line: index + 1,
                expected: expected,
                found: bits.len(),
            });
        }
        if bits.len() > expected {
            eprintln!("Warning: {}:{}: ignoring {} trailing characters",
                      path.display(), index + 1, bits.len() - expected);
        }

        let mut cursor = 0;
        for port in ports.iter_mut().filter(|p| !p.is_clock) {
            let width = port.width();
            port.pending_values.extend(&bits[cursor..cursor + width]);
            cursor += width;
        }
        steps += 1;
    }

    Ok(steps)
}
