//! Layout document model.
//!
//! Generation does not build text directly: it builds a tree of [`CodeNode`]s
//! carrying layout intent (inline fragment, one physical line, indented
//! block, ...). The tree is pure data, constructed bottom-up and consumed
//! exactly once by the renderer. Placeholders for unsupported IR shapes are a
//! first-class variant so tests can discover and count them uniformly.

/// A piece of eventual output text with layout intent.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeNode {
    /// Emits nothing.
    Empty,
    /// An atomic piece of text with no embedded line breaks.
    Fragment(String),
    /// Fragments concatenated on one physical line.
    Line(Vec<CodeNode>),
    /// Items concatenated honoring each item's own line structure; used for
    /// comma/operator-joined sequences that may contain multi-line items.
    LineList(Vec<CodeNode>),
    /// Each item on its own line, no indentation change.
    Lines(Vec<CodeNode>),
    /// Items one per line, one level deeper, framed by `{` / `}`.
    Block(Vec<CodeNode>),
    /// Like [`CodeNode::Block`], but semantically a list of executable
    /// statements; value-mode conditional lowering rewrites the last
    /// statement of such a block.
    StatementBlock(Vec<CodeNode>),
    /// An if/else statement.
    Conditional {
        condition: Box<CodeNode>,
        then_branch: Box<CodeNode>,
        else_branch: Box<CodeNode>,
    },
    /// The value-producing form of if/else: each arm carries the C# type
    /// text of the value it produces.
    ConditionalValue {
        condition: Box<CodeNode>,
        then_branch: Box<(CodeNode, String)>,
        else_branch: Box<(CodeNode, String)>,
    },
    /// Parts concatenated as one string-concatenation expression.
    StringJoin(Vec<CodeNode>),
    /// Diagnostic placeholder standing in for an IR shape the generator has
    /// no rule for. Renders as a visible block comment.
    Unsupported {
        what: String,
        at: &'static str,
        notes: Vec<String>,
    },
}

pub fn fragment(text: impl Into<String>) -> CodeNode {
    CodeNode::Fragment(text.into())
}

pub fn line(nodes: Vec<CodeNode>) -> CodeNode {
    CodeNode::Line(nodes)
}

pub fn line_list(nodes: Vec<CodeNode>) -> CodeNode {
    CodeNode::LineList(nodes)
}

pub fn lines(nodes: Vec<CodeNode>) -> CodeNode {
    CodeNode::Lines(nodes)
}

pub fn block(nodes: Vec<CodeNode>) -> CodeNode {
    CodeNode::Block(nodes)
}

pub fn stmt_block(nodes: Vec<CodeNode>) -> CodeNode {
    CodeNode::StatementBlock(nodes)
}

pub fn unsupported(what: impl Into<String>, at: &'static str, notes: Vec<String>) -> CodeNode {
    CodeNode::Unsupported {
        what: what.into(),
        at,
        notes,
    }
}

/// Interleave `separator` between `items` (for comma-joined argument lists).
pub fn join(items: Vec<CodeNode>, separator: &str) -> Vec<CodeNode> {
    let mut out = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(fragment(separator));
        }
        out.push(item);
    }
    out
}

impl CodeNode {
    /// Append fragments to this node's line, merging into an existing
    /// [`CodeNode::Line`] instead of nesting.
    pub fn append_line(self, appends: Vec<CodeNode>) -> CodeNode {
        match self {
            CodeNode::Line(mut nodes) => {
                nodes.extend(appends);
                CodeNode::Line(nodes)
            }
            other => {
                let mut nodes = vec![other];
                nodes.extend(appends);
                CodeNode::Line(nodes)
            }
        }
    }

    /// Prepend fragments to this node's line, merging into an existing
    /// [`CodeNode::Line`] instead of nesting.
    pub fn push_line(self, mut prepends: Vec<CodeNode>) -> CodeNode {
        match self {
            CodeNode::Line(nodes) => {
                prepends.extend(nodes);
                CodeNode::Line(prepends)
            }
            other => {
                prepends.push(other);
                CodeNode::Line(prepends)
            }
        }
    }

    /// Count placeholder nodes in this tree. Tests use this to assert that
    /// well-formed IR generates placeholder-free output (or exactly the
    /// expected placeholders).
    pub fn count_unsupported(&self) -> usize {
        match self {
            CodeNode::Empty | CodeNode::Fragment(_) => 0,
            CodeNode::Unsupported { .. } => 1,
            CodeNode::Line(items)
            | CodeNode::LineList(items)
            | CodeNode::Lines(items)
            | CodeNode::Block(items)
            | CodeNode::StatementBlock(items)
            | CodeNode::StringJoin(items) => items.iter().map(CodeNode::count_unsupported).sum(),
            CodeNode::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.count_unsupported() + then_branch.count_unsupported() + else_branch.count_unsupported()
            }
            CodeNode::ConditionalValue {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.count_unsupported() + then_branch.0.count_unsupported() + else_branch.0.count_unsupported()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_interleaves_separator() {
        let joined = join(vec![fragment("a"), fragment("b"), fragment("c")], ", ");
        assert_eq!(
            joined,
            vec![fragment("a"), fragment(", "), fragment("b"), fragment(", "), fragment("c")]
        );
        assert!(join(Vec::new(), ", ").is_empty());
    }

    #[test]
    fn test_push_line_merges_into_existing_line() {
        let stmt = line(vec![fragment("x"), fragment(";")]);
        let pushed = stmt.push_line(vec![fragment("return ")]);
        assert_eq!(pushed, line(vec![fragment("return "), fragment("x"), fragment(";")]));
    }

    #[test]
    fn test_count_unsupported_walks_all_variants() {
        let doc = lines(vec![
            unsupported("declaration", "emit_file", vec![]),
            block(vec![CodeNode::Conditional {
                condition: Box::new(fragment("flag")),
                then_branch: Box::new(stmt_block(vec![unsupported("statement", "emit_stmt", vec![])])),
                else_branch: Box::new(CodeNode::Empty),
            }]),
        ]);
        assert_eq!(doc.count_unsupported(), 2);
    }
}
