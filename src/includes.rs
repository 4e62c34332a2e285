//-----------------------------------------------------------------------------
// File: src/includes.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
use std::path::{Path, PathBuf};

use glob::glob;

use crate::errors::TbError;

/// Produces the preprocessor include directories for `input`.
///
/// The directory holding `input` always comes first. Each pattern is
/// globbed, matching directories are added as is and matching files
/// contribute their parent directory.
///
/// Will fail on invalid glob patterns. Unreadable matches are skipped.
pub fn include_dirs(patterns: &[String], input: &Path) -> Result<Vec<PathBuf>, TbError> {
    let mut includes = Vec::new();
    add_parent(input, &mut includes);

    for inc in patterns {
        // Attempt to glob string
        let entries = glob(inc).map_err(|e| TbError::IncludePattern {
            pattern: inc.clone(),
            reason: e.to_string(),
        })?;

        for entry in entries {
            match entry {
                Ok(path) => {
                    if path.is_dir() {
                        add_directory(path, &mut includes);
                    } else if path.is_file() {
                        add_parent(&path, &mut includes);
                    }
                },
                Err(e) => eprintln!("{:?}", e),
            };
        }
    }

    Ok(includes)
}

fn add_directory(dir: PathBuf, includes: &mut Vec<PathBuf>) {
    if !includes.contains(&dir) {
        includes.push(dir);
    }
}

/// Add the parent of a file to the list of preprocessor includes
fn add_parent(file: &Path, includes: &mut Vec<PathBuf>) {
    let parent = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    add_directory(parent, includes);
}
