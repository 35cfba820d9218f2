use std::fmt::{self, Write};

use crate::types::{Node, Side};

const INDENT: &str = "                                                                ";

enum Step {
    Subtree { node: Option<u32>, depth: usize },
    Slot { side: Side, depth: usize },
}

/// Debug printer for a subtree.
///
/// `label` renders one node; empty slots print as `∅`. Each level indents
/// by two spaces past `tab`.
pub fn print<N, F>(arena: &[N], node: Option<u32>, tab: &str, label: &F) -> String
where
    N: Node,
    F: Fn(u32, &N) -> String,
{
    let mut out = String::new();
    // Writing into a `String` does not fail.
    let _ = write_tree(arena, node, tab, label, &mut out);
    out
}

/// Streams the [`print`] layout into `out`.
///
/// Walks with an explicit stack and writes indentation from the depth, so a
/// degenerate chain costs neither call stack nor per-level prefix strings.
pub fn write_tree<N, F, W>(
    arena: &[N],
    node: Option<u32>,
    tab: &str,
    label: &F,
    out: &mut W,
) -> fmt::Result
where
    N: Node,
    F: Fn(u32, &N) -> String,
    W: Write,
{
    let mut stack = vec![Step::Subtree { node, depth: 0 }];
    while let Some(step) = stack.pop() {
        match step {
            Step::Subtree { node: None, .. } => out.write_str("∅")?,
            Step::Subtree {
                node: Some(i),
                depth,
            } => {
                let n = &arena[i as usize];
                out.write_str(&label(i, n))?;
                stack.push(Step::Subtree {
                    node: n.r(),
                    depth: depth + 1,
                });
                stack.push(Step::Slot {
                    side: Side::High,
                    depth,
                });
                stack.push(Step::Subtree {
                    node: n.l(),
                    depth: depth + 1,
                });
                stack.push(Step::Slot {
                    side: Side::Low,
                    depth,
                });
            }
            Step::Slot { side, depth } => {
                out.write_char('\n')?;
                out.write_str(tab)?;
                write_indent(out, depth * 2)?;
                out.write_str(match side {
                    Side::Low => "L=",
                    Side::High => "H=",
                })?;
            }
        }
    }
    Ok(())
}

fn write_indent<W: Write>(out: &mut W, mut width: usize) -> fmt::Result {
    while width > 0 {
        let chunk = width.min(INDENT.len());
        out.write_str(&INDENT[..chunk])?;
        width -= chunk;
    }
    Ok(())
}
