//! Go declaration extractor using tree-sitter.
//!
//! Only top-level `type` declarations whose type is a struct or an interface
//! are extracted. Every other type expression is kept as its source text,
//! except `func` types, which become signatures.

use tracing::debug;
use tree_sitter::{Node, Parser};

use super::helpers::{
    find_child_by_type, find_error_node, get_node_text, get_start_line, is_exported,
    normalize_whitespace,
};
use crate::error::{Result, VermouthError};
use crate::types::{Field, Interface, Method, Struct, TypeDescriptor};

/// Declarations found in a single Go source file, in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoFile {
    pub path: String,
    pub package: Option<String>,
    pub structs: Vec<Struct>,
    pub interfaces: Vec<Interface>,
}

/// Parse Go source code.
pub fn parse(source: &str, file_path: &str, include_unexported: bool) -> Result<GoFile> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_go::LANGUAGE.into())
        .map_err(|e| {
            VermouthError::extraction(file_path, format!("Failed to set Go language: {}", e))
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| VermouthError::extraction(file_path, "Failed to parse Go source"))?;
    let root = tree.root_node();

    if root.has_error() {
        let line = find_error_node(&root)
            .map(|n| get_start_line(&n))
            .unwrap_or_else(|| get_start_line(&root));
        return Err(VermouthError::extraction(
            file_path,
            format!("syntax error at line {}", line),
        ));
    }

    let mut file = GoFile {
        path: file_path.to_string(),
        package: extract_package_name(&root, source),
        ..Default::default()
    };

    let extractor = Extractor {
        source,
        include_unexported,
    };

    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() == "type_declaration" {
            extractor
                .type_declaration(&child, &mut file)
                .map_err(|e| e.at_location(file_path))?;
        }
    }

    debug!(
        "{}: {} structs, {} interfaces",
        file_path,
        file.structs.len(),
        file.interfaces.len()
    );
    Ok(file)
}

/// Extract package name from package clause.
fn extract_package_name(root: &Node, source: &str) -> Option<String> {
    let clause = find_child_by_type(root, "package_clause")?;
    let id = find_child_by_type(&clause, "package_identifier")?;
    Some(get_node_text(&id, source).to_string())
}

struct Extractor<'s> {
    source: &'s str,
    include_unexported: bool,
}

impl<'s> Extractor<'s> {
    fn text(&self, node: &Node) -> &'s str {
        get_node_text(node, self.source)
    }

    fn visible(&self, name: &str) -> bool {
        self.include_unexported || is_exported(name)
    }

    /// Handle `type X ...` and grouped `type ( ... )` declarations.
    fn type_declaration(&self, node: &Node, file: &mut GoFile) -> Result<()> {
        let mut cursor = node.walk();
        for spec in node.children(&mut cursor) {
            if spec.kind() != "type_spec" {
                continue;
            }
            let (Some(name_node), Some(type_node)) = (
                spec.child_by_field_name("name"),
                spec.child_by_field_name("type"),
            ) else {
                continue;
            };

            let name = self.text(&name_node).to_string();
            if !self.visible(&name) {
                continue;
            }

            match type_node.kind() {
                "struct_type" => {
                    let fields = self.struct_fields(&name, &type_node)?;
                    debug!("Found struct {} with {} fields", name, fields.len());
                    file.structs.push(Struct::new(name, fields));
                }
                "interface_type" => {
                    let methods = self.interface_methods(&name, &type_node)?;
                    debug!("Found interface {} with {} methods", name, methods.len());
                    file.interfaces.push(Interface::new(name, methods));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn struct_fields(&self, declaration: &str, node: &Node) -> Result<Vec<Field>> {
        let mut fields = Vec::new();
        let Some(list) = find_child_by_type(node, "field_declaration_list") else {
            return Ok(fields);
        };

        let mut cursor = list.walk();
        for decl in list.children(&mut cursor) {
            if decl.kind() != "field_declaration" {
                continue;
            }

            let Some(type_node) = decl.child_by_field_name("type") else {
                return Err(malformed(declaration, self.text(&decl), "field has no type"));
            };

            let mut name_cursor = decl.walk();
            let names: Vec<&str> = decl
                .children_by_field_name("name", &mut name_cursor)
                .map(|n| self.text(&n))
                .collect();

            if names.is_empty() {
                // Embedded field: named after the final identifier of its type
                let pointer = find_child_by_type(&decl, "*").is_some();
                let type_text = normalize_whitespace(self.text(&type_node));
                let name = embedded_name(&type_text).to_string();
                if !self.visible(&name) {
                    continue;
                }
                let ty = if pointer {
                    format!("*{}", type_text)
                } else {
                    type_text
                };
                fields.push(Field::named(name, ty));
                continue;
            }

            for name in names {
                // Blank fields are padding and can never be referenced
                if name == "_" || !self.visible(name) {
                    continue;
                }
                let ty = self
                    .convert_type(&type_node)
                    .map_err(|reason| malformed(declaration, name, &reason))?;
                fields.push(Field::new(name, ty));
            }
        }

        Ok(fields)
    }

    fn interface_methods(&self, declaration: &str, node: &Node) -> Result<Vec<Method>> {
        let mut methods = Vec::new();

        let mut cursor = node.walk();
        for elem in node.children(&mut cursor) {
            match elem.kind() {
                "method_elem" | "method_spec" => {}
                "type_elem" | "constraint_elem" => {
                    debug!(
                        "Skipping embedded element {} in {}",
                        normalize_whitespace(self.text(&elem)),
                        declaration
                    );
                    continue;
                }
                _ => continue,
            }

            let Some(name_node) = elem.child_by_field_name("name") else {
                continue;
            };
            let name = self.text(&name_node);
            if !self.visible(name) {
                continue;
            }

            let method = self
                .method(name, &elem)
                .map_err(|reason| malformed(declaration, name, &reason))?;
            methods.push(method);
        }

        Ok(methods)
    }

    fn method(&self, name: &str, node: &Node) -> std::result::Result<Method, String> {
        let (params, results) = self.signature(node)?;
        Ok(Method::new(name, params, results))
    }

    /// Parameters and results of a method element or a function type.
    fn signature(&self, node: &Node) -> std::result::Result<(Vec<Field>, Vec<Field>), String> {
        let params = match node.child_by_field_name("parameters") {
            Some(list) => self.parameters(&list)?,
            None => return Err("signature has no parameter list".to_string()),
        };

        let results = match node.child_by_field_name("result") {
            None => Vec::new(),
            Some(result) if result.kind() == "parameter_list" => self.parameters(&result)?,
            Some(result) => vec![Field::new("", self.convert_type(&result)?)],
        };

        Ok((params, results))
    }

    /// One slot per parameter declaration; grouped names share the slot.
    fn parameters(&self, list: &Node) -> std::result::Result<Vec<Field>, String> {
        let mut slots = Vec::new();

        let mut cursor = list.walk();
        for decl in list.children(&mut cursor) {
            let variadic = match decl.kind() {
                "parameter_declaration" => false,
                "variadic_parameter_declaration" => true,
                _ => continue,
            };

            let mut name_cursor = decl.walk();
            let name = decl
                .children_by_field_name("name", &mut name_cursor)
                .map(|n| self.text(&n))
                .collect::<Vec<_>>()
                .join(", ");

            let type_node = decl
                .child_by_field_name("type")
                .ok_or_else(|| format!("parameter {:?} has no type", name))?;

            let ty = if variadic {
                let text = normalize_whitespace(self.text(&type_node));
                if text.is_empty() {
                    return Err("variadic parameter has no type".to_string());
                }
                TypeDescriptor::named(format!("...{}", text))
            } else {
                self.convert_type(&type_node)?
            };

            slots.push(Field::new(name, ty));
        }

        Ok(slots)
    }

    fn convert_type(&self, node: &Node) -> std::result::Result<TypeDescriptor, String> {
        match node.kind() {
            "function_type" => {
                let (params, results) = self.signature(node)?;
                Ok(TypeDescriptor::signature(params, results))
            }
            "parenthesized_type" => match node.named_child(0) {
                Some(inner) => self.convert_type(&inner),
                None => Err("empty parenthesized type".to_string()),
            },
            _ => {
                let text = normalize_whitespace(self.text(node));
                if text.is_empty() {
                    Err(format!("unrecognized type node {}", node.kind()))
                } else {
                    Ok(TypeDescriptor::named(text))
                }
            }
        }
    }
}

/// `pkg.Base[T]` and `*Base` are embedded as `Base`.
fn embedded_name(type_text: &str) -> &str {
    let base = type_text.split('[').next().unwrap_or(type_text);
    let base = base.rsplit('.').next().unwrap_or(base);
    base.trim_start_matches('*').trim()
}

fn malformed(declaration: &str, member: &str, reason: &str) -> VermouthError {
    VermouthError::MalformedDeclaration {
        declaration: declaration.to_string(),
        member: member.to_string(),
        reason: reason.to_string(),
    }
}
