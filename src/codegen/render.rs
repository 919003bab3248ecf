//! Render a finished layout document to indented C# text.
//!
//! The walk is deterministic and total: render order comes solely from the
//! document's shape, and every [`CodeNode`] variant has a rendering. An
//! unrenderable shape cannot exist by construction.

use kclr_core::clr;

use super::node::CodeNode;

const INDENT: &str = "    ";

/// Render a document to text. Output ends with a newline unless the document
/// emits nothing at all.
pub fn render(node: &CodeNode) -> String {
    let lines = render_lines(node);
    if lines.is_empty() {
        String::new()
    } else {
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Render a document to physical lines (unindented at the top level).
fn render_lines(node: &CodeNode) -> Vec<String> {
    match node {
        CodeNode::Empty => Vec::new(),
        CodeNode::Fragment(text) => vec![text.clone()],
        CodeNode::Line(items) | CodeNode::LineList(items) => {
            let mut acc = Vec::new();
            for item in items {
                merge_inline(&mut acc, render_lines(item));
            }
            acc
        }
        CodeNode::StringJoin(items) => {
            let mut acc = Vec::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    merge_inline(&mut acc, vec![" + ".to_string()]);
                }
                merge_inline(&mut acc, render_lines(item));
            }
            acc
        }
        CodeNode::Lines(items) => {
            // A single-item wrapper renders as the item itself.
            let mut acc = Vec::new();
            for item in items {
                acc.extend(render_lines(item));
            }
            acc
        }
        CodeNode::Block(items) | CodeNode::StatementBlock(items) => {
            let mut inner = Vec::new();
            for item in items {
                inner.extend(render_lines(item));
            }
            framed(inner)
        }
        CodeNode::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            let mut acc = vec!["if (".to_string()];
            merge_inline(&mut acc, render_lines(condition));
            merge_inline(&mut acc, vec![")".to_string()]);
            acc.extend(branch_lines(then_branch));
            match else_branch.as_ref() {
                CodeNode::Empty => {}
                chained @ CodeNode::Conditional { .. } => {
                    acc.push("else".to_string());
                    acc.extend(render_lines(chained));
                }
                other => {
                    acc.push("else".to_string());
                    acc.extend(branch_lines(other));
                }
            }
            acc
        }
        CodeNode::ConditionalValue {
            condition,
            then_branch,
            else_branch,
        } => {
            let mut acc = vec!["(".to_string()];
            merge_inline(&mut acc, render_lines(condition));
            merge_inline(&mut acc, vec![")".to_string()]);
            acc.extend(value_arm_lines("? ", &then_branch.0, &then_branch.1));
            acc.extend(value_arm_lines(": ", &else_branch.0, &else_branch.1));
            acc
        }
        CodeNode::Unsupported { what, at, notes } => {
            let mut acc = vec!["/*".to_string(), format!("Unsupported {}", what), format!("at {}", at)];
            acc.extend(notes.iter().cloned());
            acc.push("*/".to_string());
            acc
        }
    }
}

/// Frame lines with `{` / `}`, indenting the interior one level.
fn framed(inner: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(inner.len() + 2);
    out.push("{".to_string());
    for line in inner {
        if line.is_empty() {
            out.push(line);
        } else {
            out.push(format!("{}{}", INDENT, line));
        }
    }
    out.push("}".to_string());
    out
}

/// Render a conditional branch as a braced block, even if the generator
/// handed us a bare statement.
fn branch_lines(branch: &CodeNode) -> Vec<String> {
    match branch {
        CodeNode::Block(_) | CodeNode::StatementBlock(_) => render_lines(branch),
        other => framed(render_lines(other)),
    }
}

/// Render one arm of a value-producing conditional as an immediately-invoked
/// `Func<T>` lambda, so a statement-shaped arm can produce a value.
fn value_arm_lines(prefix: &str, arm: &CodeNode, type_text: &str) -> Vec<String> {
    let mut out = vec![format!("{}new {}<{}>(() =>", prefix, clr::FUNC_TYPE, type_text)];
    let mut body = branch_lines(arm);
    if let Some(last) = body.last_mut() {
        last.push_str(")()");
    }
    out.extend(body);
    out
}

/// Splice `child` lines into `acc` without a break: the child's first line
/// continues the current line, remaining lines follow as-is.
fn merge_inline(acc: &mut Vec<String>, child: Vec<String>) {
    let mut child = child.into_iter();
    let Some(first) = child.next() else { return };
    match acc.last_mut() {
        Some(last) => last.push_str(&first),
        None => acc.push(first),
    }
    acc.extend(child);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::node::{block, fragment, line, lines, stmt_block, unsupported};

    #[test]
    fn test_empty_emits_nothing() {
        assert_eq!(render(&CodeNode::Empty), "");
    }

    #[test]
    fn test_line_concatenates_without_breaks() {
        let doc = line(vec![fragment("public "), fragment("class "), fragment("Foo")]);
        assert_eq!(render(&doc), "public class Foo\n");
    }

    #[test]
    fn test_block_indents_and_frames() {
        let doc = lines(vec![
            fragment("class Foo"),
            block(vec![fragment("int x;"), fragment("int y;")]),
        ]);
        assert_eq!(render(&doc), "class Foo\n{\n    int x;\n    int y;\n}\n");
    }

    #[test]
    fn test_single_item_lines_wrapper_is_transparent() {
        let item = fragment("var x = 1;");
        assert_eq!(render(&lines(vec![item.clone()])), render(&item));
    }

    #[test]
    fn test_conditional_with_empty_else_omits_else() {
        let doc = CodeNode::Conditional {
            condition: Box::new(fragment("flag")),
            then_branch: Box::new(stmt_block(vec![fragment("Run();")])),
            else_branch: Box::new(CodeNode::Empty),
        };
        assert_eq!(render(&doc), "if (flag)\n{\n    Run();\n}\n");
    }

    #[test]
    fn test_conditional_chain_keeps_else_if_shape() {
        let doc = CodeNode::Conditional {
            condition: Box::new(fragment("a")),
            then_branch: Box::new(stmt_block(vec![fragment("First();")])),
            else_branch: Box::new(CodeNode::Conditional {
                condition: Box::new(fragment("b")),
                then_branch: Box::new(stmt_block(vec![fragment("Second();")])),
                else_branch: Box::new(stmt_block(vec![fragment("Third();")])),
            }),
        };
        let text = render(&doc);
        assert!(text.contains("if (a)\n"));
        assert!(text.contains("else\nif (b)\n"));
        assert!(text.contains("else\n{\n    Third();\n}\n"));
    }

    #[test]
    fn test_conditional_value_renders_func_invocations() {
        let doc = CodeNode::ConditionalValue {
            condition: Box::new(fragment("flag")),
            then_branch: Box::new((stmt_block(vec![fragment("return 1;")]), "int".to_string())),
            else_branch: Box::new((stmt_block(vec![fragment("return 2;")]), "int".to_string())),
        };
        let text = render(&doc);
        assert!(text.starts_with("(flag)\n"));
        assert!(text.contains("? new global::System.Func<int>(() =>\n{\n    return 1;\n})()\n"));
        assert!(text.contains(": new global::System.Func<int>(() =>\n{\n    return 2;\n})()\n"));
    }

    #[test]
    fn test_string_join_concatenates_with_plus() {
        let doc = CodeNode::StringJoin(vec![fragment("\"a\""), fragment("b")]);
        assert_eq!(render(&doc), "\"a\" + b\n");
    }

    #[test]
    fn test_unsupported_renders_block_comment() {
        let doc = unsupported("declaration: TypeParameter", "emit_member", vec!["in class Foo".to_string()]);
        assert_eq!(
            render(&doc),
            "/*\nUnsupported declaration: TypeParameter\nat emit_member\nin class Foo\n*/\n"
        );
    }
}
