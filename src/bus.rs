//-----------------------------------------------------------------------------
// File: src/bus.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
//! Bus range helpers.
//!
//! A bus is anything carrying a single `[hi:lo]` packed range. Multi
//! dimensional buses are not handled, only the first range is looked at.
use std::convert::TryFrom;

/// Returns the first `[A:B]` range found in `token`, with whitespace inside
/// the brackets removed. Returns an empty string for scalars.
pub fn bus_dimension(token: &str) -> String {
    let mut rest = token;
    while let Some(open) = rest.find('[') {
        let after = &rest[open + 1..];
        let close = match after.find(']') {
            Some(close) => close,
            None => break,
        };

        let inner = &after[..close];
        let mut bounds = inner.splitn(2, ':');
        if let (Some(hi), Some(lo)) = (bounds.next(), bounds.next()) {
            let hi = hi.trim();
            let lo = lo.trim();
            if !hi.is_empty() && !lo.is_empty() {
                return format!("[{}:{}]", hi, lo);
            }
        }

        // Bit select or unpacked size, keep looking
        rest = &after[close + 1..];
    }

    String::new()
}

/// Width of a `[hi:lo]` range, `|hi-lo|+1`.
///
/// Returns `None` for empty ranges, for bounds that are not integer
/// literals (parameterized widths) and for widths that don't fit a `usize`.
pub fn bus_width(range: &str) -> Option<usize> {
    let inner = range.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut bounds = inner.splitn(2, ':');
    let hi: i64 = bounds.next()?.trim().parse().ok()?;
    let lo: i64 = bounds.next()?.trim().parse().ok()?;

    usize::try_from(hi.abs_diff(lo)).ok()?.checked_add(1)
}
