//! Indented text rendering of graphs
//!
//! One node per line, two spaces of indentation per level. Labels holding
//! whitespace, quotes, commas or parentheses are written double-quoted,
//! with continuation lines of multi-line labels indented to their level.

use std::collections::HashSet;

use crate::graph::{Graph, NodeKey};
use crate::limits::MAX_DEPTH;

const QUOTE_TRIGGERS: &[char] = &['\n', '\r', ' ', '\t', '\'', '"', ',', '(', ')'];

/// Render the children of `g`, leaving out the root itself
///
/// A node reached again through a cycle is written with its label only.
pub fn text(g: &Graph) -> String {
    let mut writer = Writer::new(false);
    writer.on_path.insert(g.key());
    for child in g.children() {
        writer.write_node(&child, 0, 0);
    }
    finish(writer.out)
}

/// Render `g` including its root; absent labels are written as `_`
pub fn show(g: &Graph) -> String {
    let mut writer = Writer::new(true);
    writer.write_node(g, 0, 0);
    finish(writer.out)
}

struct Writer {
    out: String,
    show: bool,
    on_path: HashSet<NodeKey>,
}

impl Writer {
    fn new(show: bool) -> Self {
        Self {
            out: String::new(),
            show,
            on_path: HashSet::new(),
        }
    }

    fn write_node(&mut self, g: &Graph, level: isize, depth: usize) {
        let level = self.write_label(g, level);

        if depth >= MAX_DEPTH || !self.on_path.insert(g.key()) {
            return;
        }
        for child in g.children() {
            self.write_node(&child, level + 1, depth + 1);
        }
        self.on_path.remove(&g.key());
    }

    /// Write the label of `g`, returning the level its children hang from
    fn write_label(&mut self, g: &Graph, mut level: isize) -> isize {
        let (show, out) = (self.show, &mut self.out);
        let label = g.label();
        let indent = "  ".repeat(level.max(0) as usize);

        if label.contains(QUOTE_TRIGGERS) {
            // No quotes at the top level
            if level > 0 {
                out.push_str(&indent[1..]);
                out.push('"');
            }
            let mut prev = '\0';
            for c in label.chars() {
                match c {
                    '\r' => {}
                    '\n' => {
                        out.push('\n');
                        out.push_str(&indent);
                    }
                    '"' if level > 0 => {
                        if prev != '\\' {
                            out.push('\\');
                        }
                        out.push('"');
                    }
                    c => out.push(c),
                }
                prev = c;
            }
            if level > 0 {
                out.push('"');
            }
            out.push('\n');
        } else if label.is_empty() && !show {
            // Transparent nodes lift their children one level
            level -= 1;
        } else {
            out.push_str(&indent);
            out.push_str(if label.is_empty() { "_" } else { &label });
            out.push('\n');
        }
        level
    }
}

fn finish(mut out: String) -> String {
    if out.ends_with('\n') {
        out.pop();
    }
    if let Some(rest) = out.strip_prefix('"') {
        let mut chars = rest.chars();
        if chars.next_back().is_some() {
            return chars.as_str().replace("\\\"", "\"");
        }
    }
    out
}
