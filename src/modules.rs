//-----------------------------------------------------------------------------
// File: src/modules.rs
// Author: David Lenfesty
// Copyright (c) 2020. Eidetic Communications Inc.
// All rights reserved.
// Licensed under the BSD 3-Clause license.
// This license message must appear in all versions of this code including
// modified versions.
//----------------------------------------------------------------------------
use std::collections::HashMap;
use std::path::Path;
use std::vec::Vec;

use sv_parser::{unwrap_node, RefNode, SyntaxTree};

use crate::ports::{get_ansi_ports, get_nonansi_ports, identifier, PortEntry};

/// Describes a module or primitive declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct SvUnit {
    pub name: String,
    /// User defined primitive rather than a module
    pub primitive: bool,
    pub ports: Vec<PortEntry>,
    /// Instantiated design unit -> instance name
    pub submodules: HashMap<String, String>,
}

/// Parses full syntax tree for modules and primitives, in source order.
pub fn parse_tree(tree: &SyntaxTree, path: &Path) -> Vec<SvUnit> {
    let mut units = Vec::new();
    for node in tree {
        match node {
            RefNode::ModuleDeclaration(x) => {
                // Get Module name
                let name = match unwrap_node!(x, ModuleIdentifier) {
                    Some(id) => identifier(tree, id),
                    None => None,
                };
                let name = match name {
                    Some(name) => name,
                    None => continue,
                };

                // Get module ports
                let ports = match unwrap_node!(x, ListOfPortDeclarations, ListOfPorts) {
                    Some(RefNode::ListOfPortDeclarations(list)) => {
                        get_ansi_ports(tree, RefNode::ListOfPortDeclarations(list), path)
                    },
                    Some(RefNode::ListOfPorts(list)) => {
                        get_nonansi_ports(tree, x, RefNode::ListOfPorts(list), path)
                    },
                    _ => {
                        println!("    No Ports found!");
                        Vec::new()
                    }
                };

                let submodules = get_submodules(tree, RefNode::ModuleDeclaration(x));

                units.push(SvUnit {
                    name: name,
                    primitive: false,
                    ports: ports,
                    submodules: submodules,
                });
            },
            RefNode::UdpDeclaration(x) => {
                let name = match unwrap_node!(x, UdpIdentifier) {
                    Some(id) => identifier(tree, id),
                    None => None,
                };
                if let Some(name) = name {
                    units.push(SvUnit {
                        name: name,
                        primitive: true,
                        ports: Vec::new(),
                        submodules: HashMap::new(),
                    });
                }
            },
            _ => (),
        }
    }

    return units
}

/// Gets a list of design units instantiated under a given node.
fn get_submodules(tree: &SyntaxTree, module: RefNode) -> HashMap<String, String> {
    let mut submodules = HashMap::new();

    for node in module {
        let (ident, name) = match node {
            RefNode::ModuleInstantiation(x) => (
                unwrap_node!(x, ModuleIdentifier),
                unwrap_node!(x, InstanceIdentifier),
            ),
            RefNode::UdpInstantiation(x) => (
                unwrap_node!(x, UdpIdentifier),
                unwrap_node!(x, InstanceIdentifier),
            ),
            _ => continue,
        };

        let ident = match ident.and_then(|id| identifier(tree, id)) {
            Some(ident) => ident,
            None => continue,
        };
        // Primitive instances may be anonymous
        let name = name.and_then(|id| identifier(tree, id)).unwrap_or_default();

        submodules.insert(ident, name);
    }

    return submodules;
}
