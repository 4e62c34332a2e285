//-----------------------------------------------------------------------------
// File: src/render.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
//! Testbench text generation.
//!
//! Sections are always written in the same order: header, declarations,
//! monitor block, stimulus block, clock generators, DUT instance.
use std::collections::VecDeque;

use crate::out::{Clock, Direction, Module, Port};

/// Delay between two stimulus assignments, in timescale units.
const STEP_DELAY: &str = "#10";

/// Appended to the design name to name the testbench module. Reusing the
/// design name would make the testbench instantiate itself.
const TB_SUFFIX: &str = "_tb";

/// Instance name of the design under test.
const INSTANCE_NAME: &str = "U0";

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Also assign vector values to output ports
    pub drive_outputs: bool,
}

/// Builds the whole testbench. The module's value queues are left untouched.
pub fn render(module: &Module, clocks: &[Clock], options: &RenderOptions) -> String {
    let mut tb = String::new();

    tb.push_str("`timescale 1 ns /  100 ps\n");
    tb.push_str(&format!("module {}{};\n", module.name, TB_SUFFIX));

    declarations(&mut tb, &module.ports);
    monitor(&mut tb, module);
    stimulus(&mut tb, &module.ports, options);
    clock_generators(&mut tb, clocks);
    instance(&mut tb, module);

    tb.push_str("endmodule\n");
    tb
}

fn declarations(tb: &mut String, ports: &[Port]) {
    for port in ports {
        if port.bus_range.is_empty() {
            tb.push_str(&format!("{}  {}; \n", port.data_type, port.name));
        } else {
            tb.push_str(&format!("{}  {} {}; \n", port.data_type, port.bus_range, port.name));
        }
    }
    tb.push_str("\n\n");
}

/// `$display`/`$monitor` header and the VCD dump setup.
fn monitor(tb: &mut String, module: &Module) {
    tb.push_str("initial\n   begin\n");

    tb.push_str("  $display(\"\\t\\ttime,");
    for port in &module.ports {
        tb.push_str(&format!("  \\t{}", port.name));
    }
    tb.push_str("\");\n");

    // %d for $time on both ends, one %b per port in between
    tb.push_str("  $monitor(\"%d,");
    for (i, _) in module.ports.iter().enumerate() {
        if i > 0 {
            tb.push_str("  ");
        }
        tb.push_str("\\t%b,");
    }
    tb.push_str("\\t%d\",$time,");
    for port in &module.ports {
        tb.push_str(&format!("  {},", port.name));
    }
    tb.push_str("$time);\n");

    tb.push_str(&format!(" $dumpfile (\"{}.vcd\");\n", module.name));
    tb.push_str(" $dumpvars;\n");
    tb.push_str("end\n");
    tb.push_str("\n\n");
}

/// Zero initialization followed by the queued vectors, one step at a time.
///
/// Stops after the first step that empties any queue, so ports with longer
/// vector lists get cut short.
fn stimulus(tb: &mut String, ports: &[Port], options: &RenderOptions) {
    tb.push_str("initial\n   begin\n");

    for port in ports {
        if port.direction != Direction::Output {
            tb.push_str(&format!("   {} =0;\n", port.name));
        }
    }

    let mut queues: Vec<(&Port, VecDeque<char>)> = ports.iter()
        .filter(|p| !p.is_clock && (options.drive_outputs || p.direction != Direction::Output))
        .map(|p| (p, p.pending_values.clone()))
        .collect();

    while queues.iter().any(|(_, queue)| !queue.is_empty()) {
        let mut exhausted = false;

        for (port, queue) in queues.iter_mut() {
            if queue.is_empty() {
                continue;
            }

            let width = port.width();
            let bits: String = (0..width).filter_map(|_| queue.pop_front()).collect();
            if queue.is_empty() {
                exhausted = true;
            }

            if port.is_bus() {
                tb.push_str(&format!("{}   {} ={}'b{};\n", STEP_DELAY, port.name, width, bits));
            } else {
                tb.push_str(&format!("{}   {} ={};\n", STEP_DELAY, port.name, bits));
            }
        }

        if exhausted {
            break;
        }
    }

    tb.push_str(&format!("{}  $finish;\n", STEP_DELAY));
    tb.push_str("end\n");
    tb.push_str("\n\n");
}

/// One free running `always` block per clock, toggling every half period.
fn clock_generators(tb: &mut String, clocks: &[Clock]) {
    for clock in clocks {
        tb.push_str("always\n");
        tb.push_str(&format!("#{} {} = ~{};\n", clock.period, clock.name, clock.name));
    }
    tb.push_str("\n\n");
}

fn instance(tb: &mut String, module: &Module) {
    tb.push_str(&format!("{}  {} (\n", module.name, INSTANCE_NAME));

    let connections: Vec<String> = module.ports.iter()
        .map(|p| format!(" .{}  ({})", p.name, p.name))
        .collect();
    if !connections.is_empty() {
        tb.push_str(&connections.join(",\n"));
        tb.push_str("\n");
    }

    tb.push_str(");\n");
    tb.push_str("\n\n");
}
