//-----------------------------------------------------------------------------
// File: src/main.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
//! # rTBGen
//! Automatic testbench generator.
//!
//! Reads a Verilog/SystemVerilog file, picks its top module and writes a
//! testbench that instantiates it, drives its inputs from a test vector
//! file and toggles the requested clocks.
//!
//! ## Left to Do
//! TODO: add support for CLI-provided `define values

// not ideal, but eh
#![allow(non_snake_case)]

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use structopt::StructOpt;
use sv_parser::{parse_sv, unwrap_node, Locate, RefNode};

use errors::TbError;
use render::RenderOptions;

mod bus;
mod clocks;
mod errors;
mod hierarchy;
mod includes;
mod modules;
mod normalize;
mod out;
mod ports;
mod render;
mod types;
mod vectors;


/// Static version string for CLI
const VERSION: &'static str = env!("CARGO_PKG_VERSION");

/// Testbench file written when `-o` isn't given.
const DEFAULT_OUTPUT: &str = "exportTB.v";

/// CLI Options
#[derive(Debug, StructOpt)]
#[structopt(name = "rTBGen", about = "Rust-based automatic testbench generator.", version = VERSION)]
struct Opt {
    /// Input Verilog IP file
    #[structopt(short = "i", parse(from_os_str))]
    pub input: Option<PathBuf>,

    /// Generated testbench file
    #[structopt(short = "o", parse(from_os_str), default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Input ports used as clocks with their half periods in ns, e.g. {clk:5,sclk:20}
    #[structopt(long = "clks")]
    pub clocks: Option<String>,

    /// Test vector file
    #[structopt(long = "testvec", parse(from_os_str))]
    pub test_vectors: Option<PathBuf>,

    /// Include directories (or glob patterns) passed to the parser preprocessor
    #[structopt(short = "I", long = "include")]
    pub includes: Vec<String>,

    /// Drive output ports from the test vectors as well
    #[structopt(long = "drive-outputs")]
    pub drive_outputs: bool,

    /// Also write the port list found in the design as YAML
    #[structopt(long = "ports-yaml", parse(from_os_str))]
    pub ports_yaml: Option<PathBuf>,
}

fn main() {
    let args = legacy_args(std::env::args());
    if args.len() <= 1 {
        print_usage();
        std::process::exit(1);
    }

    let opt = Opt::from_iter(args);
    if let Err(e) = run(&opt) {
        match &e {
            TbError::MissingInput => println!("{}", e),
            TbError::UnsupportedPort { location, .. } => {
                eprintln!("{}", e);
                if let Err(e) = print_source_line("Error", &location.path, location.offset) {
                    eprintln!("{}", e);
                }
            },
            // Parse errors were printed where they happened
            TbError::Analysis(_) => (),
            _ => eprintln!("{}", e),
        }
        std::process::exit(e.exit_code());
    }
}

/// Generates the testbench described by `opt`.
fn run(opt: &Opt) -> Result<(), TbError> {
    let input = match &opt.input {
        Some(input) => input,
        None => return Err(TbError::MissingInput),
    };

    let clocks = clocks::parse_clocks(opt.clocks.as_deref().unwrap_or(""))?;
    if !clocks.is_empty() {
        println!("Clocks: {}", clocks::format_clocks(&clocks));
    }
    let includes = includes::include_dirs(&opt.includes, input)?;

    let units = analyze(input, &includes)?;
    let top = hierarchy::select_top(&units)?;

    println!("\n####################################################");
    println!("Top module: {}", top.name);
    println!("####################################################\n");

    let mut module = normalize::normalize(&top.name, &top.ports, &clocks)?;
    let steps = vectors::load(opt.test_vectors.as_deref(), &mut module.ports)?;
    if opt.test_vectors.is_some() {
        println!("Loaded {} test vectors", steps);
    }

    let options = RenderOptions {
        drive_outputs: opt.drive_outputs,
    };
    let tb = render::render(&module, &clocks, &options);

    let mut file = File::create(&opt.output).map_err(|e| TbError::Output {
        path: opt.output.clone(),
        source: e,
    })?;
    file.write_all(tb.as_bytes()).map_err(|e| TbError::Output {
        path: opt.output.clone(),
        source: e,
    })?;
    println!("Wrote testbench {}", opt.output.display());

    if let Some(report) = &opt.ports_yaml {
        out::write_report(report, &module, &clocks, steps)?;
        println!("Wrote port report {}", report.display());
    }

    return Ok(());
}

/// Parses `input` and returns every module and primitive it declares.
fn analyze(input: &Path, includes: &[PathBuf]) -> Result<Vec<modules::SvUnit>, TbError> {
    // parse_sv(
    //  path: T,
    //  pre_defines: &Defines<V>,
    //  include_paths: &[U],
    //  ignore_include: bool,
    //  allow_incomplete: bool,
    // )
    match parse_sv(input, &HashMap::new(), includes, false, false) {
        Ok((syntax_tree, _)) => {
            println!("Parsing file {}...", input.display());

            let units = modules::parse_tree(&syntax_tree, input);
            for unit in &units {
                if unit.primitive {
                    println!("- Found primitive {}", unit.name);
                } else {
                    println!("- Found module {}", unit.name);
                }
            }
            Ok(units)
        },
        Err(sv_parser::Error::Parse(Some((file, location)))) => {
            println!("- parse error");
            if let Err(e) = print_source_line("Parse error", &file, location) {
                eprintln!("{}", e);
            }
            Err(TbError::Analysis(input.to_path_buf()))
        },
        Err(e) => {
            eprintln!("{}", e);
            Err(TbError::Analysis(input.to_path_buf()))
        },
    }
}

/// Rewrites the single dash long flags (`-clks`, `-testvec`) into the form
/// structopt understands.
///
/// The shell splits `-clks {clk1: 5, clk2: 10}` into several words, so the
/// words following `-clks` are glued back together up to the closing brace.
fn legacy_args<I: IntoIterator<Item = String>>(args: I) -> Vec<String> {
    let mut out = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-clks" => {
                out.push(String::from("--clks"));
                let mut list = String::new();
                while let Some(word) = args.next() {
                    list.push_str(&word);
                    if !list.starts_with('{') || list.ends_with('}') {
                        break;
                    }
                }
                out.push(list);
            },
            "-testvec" => out.push(String::from("--testvec")),
            _ => out.push(arg),
        }
    }

    out
}

fn print_usage() {
    println!("Usage: Auto Testbench generator:");
    println!("         -i      <input Verilog IP file>");
    println!("         -o      <generated tb file> (default {})", DEFAULT_OUTPUT);
    println!("         -clks   {{list of clocks}} <input ports defined as clocks and half periods in ns>");
    println!("                 Example -clks {{clk1:nanosec1,clk2:nanosec2...}}");
    println!("         -testvec <Input testvectors file>");
    println!("         -I      <include directory or pattern>");
}

/// Pulls identifier value from any node.
fn get_identifier(node: RefNode) -> Option<Locate> {
    match unwrap_node!(node, SimpleIdentifier, EscapedIdentifier) {
        Some(RefNode::SimpleIdentifier(x)) => {
            Some(x.nodes.0)
        }
        Some(RefNode::EscapedIdentifier(x)) => {
            Some(x.nodes.0)
        }
        _ => None,
    }
}

/// Print the line holding byte `location` of `file`, with a caret under it.
fn print_source_line(what: &str, file: &Path, location: usize) -> Result<(), std::io::Error> {
    let contents = std::fs::read(file)?;
    let location = location.min(contents.len());

    let start = match contents[..location].iter().rposition(|b| *b == b'\n') {
        Some(pos) => pos + 1,
        None => 0,
    };
    let end = match contents[location..].iter().position(|b| *b == b'\n') {
        Some(pos) => location + pos,
        None => contents.len(),
    };
    let line = contents[..start].iter().filter(|b| **b == b'\n').count() + 1;
    let column = location - start;

    let text = String::from_utf8_lossy(&contents[start..end]);
    eprintln!("{} in {}:{}:{}", what, file.to_string_lossy(), line, column + 1);
    eprintln!("| {}", text);
    eprintln!("{}^", " ".repeat(column + 2));

    return Ok(());
}
