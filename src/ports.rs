//-----------------------------------------------------------------------------
// File: src/ports.rs
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

use sv_parser::{
    unwrap_node, AnsiPortDeclaration, DataType, ModuleCommonItem, ModuleDeclaration, ModuleItem,
    ModuleOrGenerateItem, ModuleOrGenerateItemDeclaration, NonPortModuleItem,
    PackageOrGenerateItemDeclaration, PortDeclaration, RefNode, SyntaxTree,
};

use crate::errors::SourceLocation;
use crate::get_identifier;
use crate::out::Direction;
use crate::types::{DeclaredType, TypeKeyword};

/// Direction, type and packed range shared by one or more port identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct PortDefinition {
    pub direction: Direction,
    pub data_type: DeclaredType,
    /// Packed dimension source text, empty when there is none
    pub dimension: String,
}

/// `input reg [7:0] a, b, c` style declaration in an ANSI header.
#[derive(Debug, Clone, PartialEq)]
pub struct PortGroup {
    pub definition: PortDefinition,
    pub names: Vec<String>,
    pub location: SourceLocation,
}

/// Bare identifier in a non-ANSI port list, resolved against the body.
#[derive(Debug, Clone, PartialEq)]
pub struct PortReference {
    pub name: String,
    /// `None` when the body never declares the port
    pub definition: Option<PortDefinition>,
    pub location: SourceLocation,
}

/// One item of a module's port list.
#[derive(Debug, Clone, PartialEq)]
pub enum PortEntry {
    Grouped(PortGroup),
    Reference(PortReference),
    Unsupported { kind: String, location: SourceLocation },
}

/// Collects the port list of an ANSI style module header.
///
/// A port with its own net or variable header starts a new group, a bare
/// identifier joins the group before it.
pub fn get_ansi_ports(tree: &SyntaxTree, list: RefNode, path: &Path) -> Vec<PortEntry> {
    let mut entries = Vec::new();
    // Direction carries over to following ports until a new one is given
    let mut direction = Direction::Inout;

    for node in list {
        let port = match node {
            RefNode::AnsiPortDeclaration(port) => port,
            _ => continue,
        };
        let location = source_location(tree, RefNode::AnsiPortDeclaration(port), path);

        if let AnsiPortDeclaration::Paren(_) = port {
            entries.push(PortEntry::Unsupported {
                kind: String::from("explicit port expression"),
                location: location,
            });
            continue;
        }

        let name = match unwrap_node!(port, PortIdentifier) {
            Some(id) => identifier(tree, id),
            None => None,
        };
        let name = match name {
            Some(name) => name,
            None => {
                entries.push(PortEntry::Unsupported {
                    kind: String::from("port without identifier"),
                    location: location,
                });
                continue;
            },
        };

        match unwrap_node!(port, NetPortHeader, VariablePortHeader, InterfacePortHeader) {
            Some(RefNode::InterfacePortHeader(_)) => {
                entries.push(PortEntry::Unsupported {
                    kind: String::from("interface port"),
                    location: location,
                });
            },
            Some(header) => {
                if let Some(dir) = port_direction(tree, header.clone()) {
                    direction = dir;
                }

                entries.push(PortEntry::Grouped(PortGroup {
                    definition: PortDefinition {
                        direction: direction,
                        data_type: declared_type(tree, header.clone()).unwrap_or(IMPLICIT_TYPE),
                        dimension: packed_dimension(tree, header),
                    },
                    names: vec![name],
                    location: location,
                }));
            },
            None => {
                if let Some(PortEntry::Grouped(group)) = entries.last_mut() {
                    group.names.push(name);
                    continue;
                }

                entries.push(PortEntry::Grouped(PortGroup {
                    definition: PortDefinition {
                        direction: direction,
                        data_type: IMPLICIT_TYPE,
                        dimension: String::new(),
                    },
                    names: vec![name],
                    location: location,
                }));
            },
        }
    }

    return entries;
}

/// Collects the port list of a non-ANSI module, `module m(a, b, c);`.
///
/// Each listed identifier is looked up in the port declarations of the
/// module body.
pub fn get_nonansi_ports(tree: &SyntaxTree, module: &ModuleDeclaration, list: RefNode, path: &Path) -> Vec<PortEntry> {
    let definitions = body_definitions(tree, module);
    let mut entries = Vec::new();

    for node in list {
        let port = match node {
            RefNode::Port(port) => port,
            _ => continue,
        };
        let location = source_location(tree, RefNode::Port(port), path);

        // Named, concatenated and sliced ports can't be driven by a single net
        if unwrap_node!(port, PortNamed, PortExpressionBrace, ConstantExpression).is_some() {
            entries.push(PortEntry::Unsupported {
                kind: String::from("port expression"),
                location: location,
            });
            continue;
        }

        let name = match unwrap_node!(port, PortIdentifier) {
            Some(id) => identifier(tree, id),
            // Empty port, nothing to connect
            None => continue,
        };
        let name = match name {
            Some(name) => name,
            None => continue,
        };

        entries.push(PortEntry::Reference(PortReference {
            definition: definitions.get(&name).cloned(),
            name: name,
            location: location,
        }));
    }

    return entries;
}

/// Type of ports declared without one.
const IMPLICIT_TYPE: DeclaredType = DeclaredType::Keyword(TypeKeyword::Wire);

/// Resolves every port declared in a non-ANSI module body.
///
/// Only the module's own items are looked at, declarations local to
/// functions, tasks or generate blocks don't describe ports.
fn body_definitions(tree: &SyntaxTree, module: &ModuleDeclaration) -> HashMap<String, PortDefinition> {
    let mut declared: HashMap<String, (Option<DeclaredType>, String)> = HashMap::new();
    let mut ports: Vec<(String, Direction, Option<DeclaredType>, String)> = Vec::new();

    let items = match module {
        ModuleDeclaration::Nonansi(x) => &x.nodes.2,
        _ => return HashMap::new(),
    };

    for item in items {
        let (data_type, dimension, names) = match item {
            ModuleItem::PortDeclaration(x) => {
                let decl = &x.0;
                let direction = match decl {
                    PortDeclaration::Input(_) => Direction::Input,
                    PortDeclaration::Output(_) => Direction::Output,
                    PortDeclaration::Inout(_) => Direction::Inout,
                    _ => Direction::Unknown,
                };
                let data_type = declared_type(tree, RefNode::PortDeclaration(decl));
                let dimension = packed_dimension(tree, RefNode::PortDeclaration(decl));

                for name in declared_names(tree, RefNode::PortDeclaration(decl)) {
                    ports.push((name, direction, data_type.clone(), dimension.clone()));
                }
                continue;
            },
            ModuleItem::NonPortModuleItem(x) => match item_declaration(x) {
                // Verilog-95 splits `output c;` and `reg c;`
                Some(PackageOrGenerateItemDeclaration::NetDeclaration(decl)) => {
                    let node = RefNode::NetDeclaration(&**decl);
                    (declared_type(tree, node.clone()), packed_dimension(tree, node.clone()), declared_names(tree, node))
                },
                Some(PackageOrGenerateItemDeclaration::DataDeclaration(decl)) => {
                    let node = RefNode::DataDeclaration(&**decl);
                    (declared_type(tree, node.clone()), packed_dimension(tree, node.clone()), declared_names(tree, node))
                },
                _ => continue,
            },
        };

        for name in names {
            declared.entry(name).or_insert((data_type.clone(), dimension.clone()));
        }
    }

    let mut definitions = HashMap::new();
    for (name, direction, data_type, dimension) in ports {
        let (data_type, dimension) = match (data_type, declared.get(&name)) {
            (Some(data_type), _) => (data_type, dimension),
            (None, Some((body_type, body_dimension))) => {
                let dimension = if dimension.is_empty() { body_dimension.clone() } else { dimension };
                (body_type.clone().unwrap_or(IMPLICIT_TYPE), dimension)
            },
            (None, None) => (IMPLICIT_TYPE, dimension),
        };

        definitions.entry(name).or_insert(PortDefinition {
            direction: direction,
            data_type: data_type,
            dimension: dimension,
        });
    }

    return definitions;
}

/// Net or variable declaration made directly in a module body.
fn item_declaration(item: &NonPortModuleItem) -> Option<&PackageOrGenerateItemDeclaration> {
    let item = match item {
        NonPortModuleItem::ModuleOrGenerateItem(x) => x,
        _ => return None,
    };
    let common = match &**item {
        ModuleOrGenerateItem::ModuleItem(x) => &x.nodes.1,
        _ => return None,
    };
    let decl = match common {
        ModuleCommonItem::ModuleOrGenerateItemDeclaration(x) => x,
        _ => return None,
    };
    match &**decl {
        ModuleOrGenerateItemDeclaration::PackageOrGenerateItemDeclaration(x) => Some(&**x),
        _ => None,
    }
}

/// Names introduced by a port, net or variable declaration.
fn declared_names(tree: &SyntaxTree, decl: RefNode) -> Vec<String> {
    let mut names = Vec::new();
    for node in decl {
        match node {
            RefNode::PortIdentifier(_) | RefNode::VariableIdentifier(_) | RefNode::NetIdentifier(_) => {
                if let Some(name) = identifier(tree, node) {
                    names.push(name);
                }
            },
            _ => (),
        }
    }

    names
}

fn port_direction(tree: &SyntaxTree, node: RefNode) -> Option<Direction> {
    match unwrap_node!(node, PortDirection) {
        Some(RefNode::PortDirection(x)) => {
            let direction = match tree.get_str(x)?.trim() {
                "input" => Direction::Input,
                "output" => Direction::Output,
                "inout" => Direction::Inout,
                _ => Direction::Unknown,
            };
            Some(direction)
        },
        _ => None,
    }
}

/// Declared data type below `node`, `None` when the type is implicit.
fn declared_type(tree: &SyntaxTree, node: RefNode) -> Option<DeclaredType> {
    let text = match unwrap_node!(node, NetType, DataType, NetTypeIdentifier) {
        Some(RefNode::NetType(x)) => tree.get_str(x),
        // Keyword only, the packed range is read separately
        Some(RefNode::DataType(DataType::Vector(x))) => tree.get_str(&x.nodes.0),
        Some(RefNode::DataType(DataType::Atom(x))) => tree.get_str(&x.nodes.0),
        Some(RefNode::DataType(x)) => tree.get_str(x),
        Some(RefNode::NetTypeIdentifier(x)) => tree.get_str(x),
        _ => None,
    };

    text.map(DeclaredType::from_text)
}

fn packed_dimension(tree: &SyntaxTree, node: RefNode) -> String {
    match unwrap_node!(node, PackedDimension) {
        Some(RefNode::PackedDimension(x)) => match tree.get_str(x) {
            Some(text) => String::from(text.trim()),
            None => String::new(),
        },
        _ => String::new(),
    }
}

/// Text of the first identifier found below `node`.
pub(crate) fn identifier(tree: &SyntaxTree, node: RefNode) -> Option<String> {
    let id = get_identifier(node)?;
    tree.get_str(&id).map(|name| String::from(name.trim()))
}

/// Location of the first token below `node`, mapped back to its source file.
pub(crate) fn source_location(tree: &SyntaxTree, node: RefNode, path: &Path) -> SourceLocation {
    match unwrap_node!(node, Locate) {
        Some(RefNode::Locate(x)) => {
            let (path, offset) = match tree.get_origin(x) {
                Some((origin, offset)) => (origin.clone(), offset),
                None => (path.to_path_buf(), x.offset),
            };
            SourceLocation {
                path: path,
                line: x.line,
                offset: offset,
            }
        },
        _ => SourceLocation {
            path: path.to_path_buf(),
            line: 0,
            offset: 0,
        },
    }
}
