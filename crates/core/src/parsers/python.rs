use crate::models::{ImportKind, ImportStatement, ImportType};
use std::collections::BTreeSet;
use tree_sitter::{Node, Parser, Tree};

use super::ParserError;

/// Python 2 statements the grammar still accepts but Python 3 rejects
const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// Extracts import statements from Python source with tree-sitter
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    pub fn new() -> Result<Self, ParserError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ParserError::InitError(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Every import statement in the tree, nested ones included, in source
    /// order.
    ///
    /// Any syntax error anywhere in the file fails the whole parse; partial
    /// results from a tree with error nodes are never returned. Python 2
    /// `print x` and `exec code` count as syntax errors.
    pub fn parse(&mut self, source: &str) -> Result<Vec<ImportStatement>, ParserError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParserError::ParseError("parser produced no tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(syntax_error(&tree));
        }
        if let Some(node) = first_node(root, |n| PYTHON2_STATEMENTS.contains(&n.kind())) {
            let position = node.start_position();
            return Err(ParserError::Syntax {
                line: position.row + 1,
                column: position.column,
                message: format!("{} is Python 2 syntax", node.kind().replace('_', " ")),
            });
        }

        let mut collector = Collector {
            source,
            imports: Vec::new(),
        };
        collector.visit(tree.root_node());
        Ok(collector.imports)
    }

    /// Sorted, duplicate-free top-level module names. Bare relative imports
    /// (`from . import x`) have none.
    pub fn top_level_names(&mut self, source: &str) -> Result<Vec<String>, ParserError> {
        let names: BTreeSet<String> = self
            .parse(source)?
            .iter()
            .filter_map(|import| import.top_level_name().map(String::from))
            .collect();
        Ok(names.into_iter().collect())
    }
}

struct Collector<'s> {
    source: &'s str,
    imports: Vec<ImportStatement>,
}

impl<'s> Collector<'s> {
    fn visit(&mut self, node: Node) {
        match node.kind() {
            "import_statement" => self.plain_import(node),
            "import_from_statement" => self.from_import(node),
            "future_import_statement" => {
                let items = self.imported_names(node);
                self.record(node, node, ImportKind::Future, "__future__".to_string(), items, None);
            }
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit(child);
                }
            }
        }
    }

    /// `import a.b, c as d`: one record per name
    fn plain_import(&mut self, statement: Node) {
        let mut cursor = statement.walk();
        let names: Vec<Node> = statement.children_by_field_name("name", &mut cursor).collect();

        for name in names {
            let (module, alias) = match name.kind() {
                "dotted_name" => (self.text(name), None),
                "aliased_import" => self.aliased(name),
                _ => continue,
            };
            self.record(statement, name, ImportKind::Import, module, Vec::new(), alias);
        }
    }

    /// `from a.b import c`, `from .. import c`, `from .a import *`
    fn from_import(&mut self, statement: Node) {
        let Some(target) = statement.child_by_field_name("module_name") else {
            return;
        };
        let module = if target.kind() == "relative_import" {
            self.relative(target)
        } else {
            self.text(target)
        };
        let items = self.imported_names(statement);
        self.record(statement, statement, ImportKind::From, module, items, None);
    }

    fn imported_names(&self, statement: Node) -> Vec<String> {
        let mut cursor = statement.walk();
        let wildcard = statement
            .children(&mut cursor)
            .any(|child| child.kind() == "wildcard_import");
        if wildcard {
            return vec!["*".to_string()];
        }

        statement
            .children_by_field_name("name", &mut cursor)
            .filter_map(|child| match child.kind() {
                "dotted_name" => Some(self.text(child)),
                "aliased_import" => Some(self.aliased(child).0),
                _ => None,
            })
            .collect()
    }

    /// Leading dots plus the optional module after them
    fn relative(&self, node: Node) -> String {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|child| matches!(child.kind(), "import_prefix" | "dotted_name"))
            .map(|child| self.text(child))
            .collect()
    }

    fn aliased(&self, node: Node) -> (String, Option<String>) {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n))
            .unwrap_or_default();
        let alias = node.child_by_field_name("alias").map(|n| self.text(n));
        (name, alias)
    }

    /// `at` supplies the position: the name itself for `import`, the whole
    /// statement otherwise.
    fn record(
        &mut self,
        statement: Node,
        at: Node,
        kind: ImportKind,
        module: String,
        items: Vec<String>,
        alias: Option<String>,
    ) {
        let position = at.start_position();
        self.imports.push(ImportStatement {
            module,
            items,
            kind,
            line: position.row + 1,
            column: position.column,
            raw: self.text(statement),
            import_type: ImportType::Unknown,
            alias,
        });
    }

    fn text(&self, node: Node) -> String {
        self.source[node.byte_range()].to_string()
    }
}

/// Depth-first search in source order
fn first_node<'t, F>(node: Node<'t>, matches: F) -> Option<Node<'t>>
where
    F: Fn(&Node<'t>) -> bool + Copy,
{
    if matches(&node) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(|child| first_node(child, matches))
}

/// First error or missing node, as a positioned error
fn syntax_error(tree: &Tree) -> ParserError {
    let root = tree.root_node();
    let node = first_node(root, |n| n.is_error() || n.is_missing()).unwrap_or(root);
    let position = node.start_position();
    ParserError::Syntax {
        line: position.row + 1,
        column: position.column,
        message: if node.is_missing() {
            format!("missing {}", node.kind())
        } else {
            "invalid syntax".to_string()
        },
    }
}
