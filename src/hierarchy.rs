//-----------------------------------------------------------------------------
// File: src/hierarchy.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
use crate::errors::TbError;
use crate::modules::SvUnit;

/// Design units that no other unit instantiates, in source order.
pub fn top_units(units: &[SvUnit]) -> Vec<&SvUnit> {
    let mut top: Vec<&SvUnit> = units.iter().collect();
    for unit in units {
        for submod in unit.submodules.keys() {
            // Remove any "top" units that are instantiated somewhere
            top.retain(|x| x.name != *submod);
        }
    }

    top
}

/// Picks the unit the testbench is generated for.
///
/// Only the first top level unit is used, and it has to be a module.
pub fn select_top(units: &[SvUnit]) -> Result<&SvUnit, TbError> {
    let top = top_units(units);

    let first = match top.first() {
        Some(first) => *first,
        None => return Err(TbError::NoTopModule),
    };

    for ignored in top.iter().skip(1) {
        eprintln!("Warning: ignoring additional top level unit {}", ignored.name);
    }

    if first.primitive {
        return Err(TbError::PrimitiveTop(first.name.clone()));
    }

    Ok(first)
}
