use tree_sitter::Node;

use super::{Attribute, AttributeValue, Block, Body, CommentGroup, RawComment, SourceParser, SyntaxTree};
use crate::error::{DocError, Result};

/// File extensions of Terraform module sources
pub const TERRAFORM_EXTENSIONS: &[&str] = &["tf"];

/// Tree-sitter backed HCL parser
pub struct HclParser {
    language: tree_sitter::Language,
}

impl HclParser {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_hcl::LANGUAGE.into(),
        }
    }

    pub fn parse_source(&self, file: &str, source: &str) -> Result<SyntaxTree> {
        let syntax_error = |line: usize, column: usize, message: String| DocError::Syntax {
            file: file.to_string(),
            line,
            column,
            message,
        };

        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| syntax_error(0, 0, e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| syntax_error(0, 0, "Failed to parse source".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            let node = first_error(root).unwrap_or(root);
            let message = if node.is_missing() {
                format!("missing {}", node.kind())
            } else if node.is_error() {
                let text = node_text(source, &node);
                format!("unexpected `{}`", text.lines().next().unwrap_or("").trim())
            } else {
                "invalid syntax".to_string()
            };
            return Err(syntax_error(
                node.start_position().row + 1,
                node.start_position().column + 1,
                message,
            ));
        }

        let mut raw_comments = Vec::new();
        collect_comments(root, source, &mut raw_comments);
        let comments = CommentGroup::group(raw_comments);

        let mut blocks = Vec::new();
        let mut previous_end = 0;
        let body = named_child_of_kind(root, "body").unwrap_or(root);
        let mut cursor = body.walk();
        for item in body.named_children(&mut cursor) {
            let block = match item.kind() {
                "block" => self.block(source, item),
                "attribute" => Block {
                    keys: vec![attribute_name(source, item)],
                    body: None,
                    lead_comment: None,
                    line: item.start_position().row + 1,
                },
                _ => continue,
            };

            let lead_comment = comments
                .iter()
                .find(|group| {
                    !group.is_trailing()
                        && group.end_line() + 1 == block.line
                        && group.offset() >= previous_end
                })
                .cloned();

            previous_end = item.end_byte();
            blocks.push(Block {
                lead_comment,
                ..block
            });
        }

        Ok(SyntaxTree { blocks, comments })
    }

    fn block(&self, source: &str, node: Node<'_>) -> Block {
        let mut keys = Vec::new();
        let mut attributes = Vec::new();
        let mut in_header = true;

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "identifier" | "string_lit" if in_header => {
                    keys.push(node_text(source, &child).to_string());
                }
                "block_start" => in_header = false,
                "body" => {
                    in_header = false;
                    attributes = self.body_attributes(source, child);
                }
                _ => {}
            }
        }

        Block {
            keys,
            body: Some(Body::new(attributes)),
            lead_comment: None,
            line: node.start_position().row + 1,
        }
    }

    fn body_attributes(&self, source: &str, body: Node<'_>) -> Vec<Attribute> {
        let mut attributes = Vec::new();

        let mut cursor = body.walk();
        for item in body.named_children(&mut cursor) {
            match item.kind() {
                "attribute" => {
                    let value = attribute_expression(item)
                        .map(|expr| attribute_value(source, expr))
                        .unwrap_or(AttributeValue::Other);
                    attributes.push(Attribute {
                        name: attribute_name(source, item),
                        value,
                    });
                }
                "block" => {
                    let keyword = named_child_of_kind(item, "identifier")
                        .map(|ident| node_text(source, &ident).to_string())
                        .unwrap_or_default();
                    attributes.push(Attribute {
                        name: keyword,
                        value: AttributeValue::Other,
                    });
                }
                _ => {}
            }
        }

        attributes
    }
}

impl Default for HclParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for HclParser {
    fn parse(&self, file: &str, source: &str) -> Result<SyntaxTree> {
        self.parse_source(file, source)
    }
}

fn node_text<'s>(source: &'s str, node: &Node<'_>) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn named_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

fn attribute_name(source: &str, attribute: Node<'_>) -> String {
    named_child_of_kind(attribute, "identifier")
        .map(|ident| node_text(source, &ident).to_string())
        .unwrap_or_default()
}

/// The value side of `name = value`.
fn attribute_expression(attribute: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = attribute.walk();
    let children: Vec<Node<'_>> = attribute
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect();
    children.into_iter().skip(1).last()
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error() || c.is_missing())
        .find_map(first_error)
}

fn collect_comments(node: Node<'_>, source: &str, out: &mut Vec<RawComment>) {
    if node.kind() == "comment" {
        let offset = node.start_byte();
        let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
        out.push(RawComment {
            text: node_text(source, &node).to_string(),
            line: node.start_position().row + 1,
            column: node.start_position().column + 1,
            end_line: node.end_position().row + 1,
            offset,
            trailing: !source[line_start..offset].trim().is_empty(),
        });
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_comments(child, source, out);
    }
}

/// Descends through single-child wrappers to the node carrying the value.
fn unwrap_expression(mut node: Node<'_>) -> Node<'_> {
    while matches!(node.kind(), "expression" | "collection_value" | "template_expr") {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node
            .named_children(&mut cursor)
            .filter(|c| c.kind() != "comment")
            .collect();
        if children.len() != 1 {
            break;
        }
        node = children[0];
    }
    node
}

fn literal_text(source: &str, node: Node<'_>) -> Option<String> {
    match node.kind() {
        "literal_value" | "quoted_template" | "string_lit" | "variable_expr" | "function_call" => {
            Some(node_text(source, &node).to_string())
        }
        "heredoc_template" => Some(heredoc_body(node_text(source, &node))),
        _ => None,
    }
}

/// Lines between the `<<EOT` opener and the closing marker. The `<<-` form
/// drops the indentation shared by its non-blank lines.
fn heredoc_body(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().skip(1).collect();
    lines.pop();

    if !text.starts_with("<<-") {
        return lines.join("\n");
    }

    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn attribute_value(source: &str, expression: Node<'_>) -> AttributeValue {
    let node = unwrap_expression(expression);

    if node.kind() == "tuple" {
        let mut cursor = node.walk();
        let items = node
            .named_children(&mut cursor)
            .filter(|c| !matches!(c.kind(), "comment" | "tuple_start" | "tuple_end"))
            .filter_map(|c| literal_text(source, unwrap_expression(c)))
            .collect();
        return AttributeValue::List(items);
    }

    literal_text(source, node)
        .map(AttributeValue::Literal)
        .unwrap_or(AttributeValue::Other)
}
