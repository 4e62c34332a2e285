//-----------------------------------------------------------------------------
// File: src/normalize.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
use std::collections::VecDeque;

use crate::bus::{bus_dimension, bus_width};
use crate::errors::TbError;
use crate::out::{Clock, Direction, Module, Port};
use crate::ports::{PortDefinition, PortEntry};

/// Flattens a port list into one `Port` per identifier, keeping order.
///
/// Fails on the first port the testbench can't connect.
pub fn normalize(name: &str, entries: &[PortEntry], clocks: &[Clock]) -> Result<Module, TbError> {
    let mut ports = Vec::new();

    for entry in entries {
        match entry {
            PortEntry::Grouped(group) => {
                for id in &group.names {
                    ports.push(build_port(id, Some(&group.definition), clocks));
                }
            },
            PortEntry::Reference(reference) => {
                ports.push(build_port(&reference.name, reference.definition.as_ref(), clocks));
            },
            PortEntry::Unsupported { kind, location } => {
                return Err(TbError::UnsupportedPort {
                    kind: kind.clone(),
                    location: location.clone(),
                });
            },
        }
    }

    for clock in clocks {
        if !ports.iter().any(|p| p.name == clock.name) {
            eprintln!("Warning: clock {} is not a port of {}", clock.name, name);
        }
    }

    Ok(Module {
        name: String::from(name),
        ports: ports,
    })
}

fn build_port(name: &str, definition: Option<&PortDefinition>, clocks: &[Clock]) -> Port {
    let (direction, data_type, bus_range) = match definition {
        Some(def) => (def.direction, String::from(def.data_type.type_name()), bus_dimension(&def.dimension)),
        None => (Direction::Unknown, String::from("Unknown"), String::new()),
    };

    if !bus_range.is_empty() && bus_width(&bus_range).is_none() {
        eprintln!("Warning: can't size bus {} {}, treating it as a single bit", bus_range, name);
    }

    Port {
        name: String::from(name),
        direction: direction,
        data_type: data_type,
        bus_range: bus_range,
        is_clock: clocks.iter().any(|c| c.name == name),
        pending_values: VecDeque::new(),
    }
}
