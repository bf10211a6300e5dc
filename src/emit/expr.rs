//! Layout tree for builder-chain source text.
//!
//! The lowering in `java.rs` only decides *what* is called; everything about line breaks and
//! indentation lives here so it is the same for every construct.
//!
//! Rules:
//! - a call whose rendered arguments are all single-line stays inline: `f(a, b)`
//! - otherwise each argument goes on its own line one level deeper, `)` right after the last
//! - every `.link(...)` of a chain goes on its own line one level deeper than the chain head

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Pre-rendered single-line text (`Items.CARROT`, `0.5F`, `"kills"`).
    Atom(String),
    Call(Call),
    /// `head.link().link()`
    Chain(Box<Expr>, Vec<Call>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
}

impl Expr {
    pub fn atom(text: impl Into<String>) -> Self {
        Expr::Atom(text.into())
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call(Call { name: name.into(), args })
    }

    /// Append `.name(args)`, turning `self` into a chain if it is not one already.
    pub fn link(self, name: impl Into<String>, args: Vec<Expr>) -> Self {
        let call = Call { name: name.into(), args };
        match self {
            Expr::Chain(head, mut links) => {
                links.push(call);
                Expr::Chain(head, links)
            }
            head => Expr::Chain(Box::new(head), vec![call]),
        }
    }

    /// Render at nesting `depth`. The first line carries no indentation (the caller has
    /// already positioned it); continuation lines are indented absolutely.
    pub fn render(&self, indent: &str, depth: usize) -> String {
        let mut out = String::new();
        self.render_into(&mut out, indent, depth);
        out
    }

    fn render_into(&self, out: &mut String, indent: &str, depth: usize) {
        match self {
            Expr::Atom(text) => out.push_str(text),
            Expr::Call(call) => call.render_into(out, indent, depth),
            Expr::Chain(head, links) => {
                head.render_into(out, indent, depth);
                for link in links {
                    out.push('\n');
                    push_indent(out, indent, depth + 1);
                    out.push('.');
                    link.render_into(out, indent, depth + 1);
                }
            }
        }
    }
}

impl Call {
    fn render_into(&self, out: &mut String, indent: &str, depth: usize) {
        let args: Vec<String> = self.args.iter().map(|a| a.render(indent, depth + 1)).collect();
        out.push_str(&self.name);
        out.push('(');
        if args.iter().all(|a| !a.contains('\n')) {
            out.push_str(&args.join(", "));
        } else {
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('\n');
                push_indent(out, indent, depth + 1);
                out.push_str(arg);
            }
        }
        out.push(')');
    }
}

pub(crate) fn push_indent(out: &mut String, indent: &str, depth: usize) {
    for _ in 0..depth {
        out.push_str(indent);
    }
}

/// Java string literal.
pub fn string_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
