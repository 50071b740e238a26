// Regex fragment algebra: union, concatenation and Kleene star over
// literal regex atoms, rendered with only the parentheses precedence needs.

use std::fmt;
use std::rc::Rc;

/// A regular-expression fragment.
///
/// Children are reference counted so that substituting one equation into many
/// others shares sub-expressions instead of copying them. The structure is a
/// DAG; rendering expands it into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// The empty string (epsilon). Not the empty language.
    Empty,
    /// Raw regex source for one edge label, e.g. `7`, `A`, `.` or `[^0-9]`.
    Literal(Rc<str>),
    /// Union of the alternatives.
    Alternation(Rc<[Expr]>),
    /// Concatenation of the parts, left to right.
    Concatenation(Rc<[Expr]>),
    /// Zero or more repetitions.
    Star(Rc<Expr>),
}

/// Binding strength of a rendered fragment, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Alternation,
    Concatenation,
    /// Ends in a postfix operator (`*`, `?`); cannot take another one.
    Postfix,
    /// A single atom or a group.
    Primary,
}

impl Expr {
    /// A literal label. The text is regex source and is not escaped.
    pub fn literal(text: &str) -> Expr {
        Expr::Literal(Rc::from(text))
    }

    /// Union of `items`. `None` when there are no items (the empty language),
    /// the item itself when there is exactly one.
    pub fn union<I>(items: I) -> Option<Expr>
    where
        I: IntoIterator<Item = Expr>,
    {
        let mut items: Vec<Expr> = items.into_iter().collect();
        match items.len() {
            0 => None,
            1 => items.pop(),
            _ => Some(Expr::Alternation(Rc::from(items))),
        }
    }

    /// `self | other`.
    pub fn alt(self, other: Expr) -> Expr {
        Expr::Alternation(Rc::from([self, other]))
    }

    /// `self other`. The empty string is the identity on either side.
    pub fn concat(self, other: Expr) -> Expr {
        match (self, other) {
            (Expr::Empty, e) | (e, Expr::Empty) => e,
            (a, b) => Expr::Concatenation(Rc::from([a, b])),
        }
    }

    /// `self*`. Starring epsilon or an already starred fragment is a no-op.
    pub fn star(self) -> Expr {
        match self {
            Expr::Empty => Expr::Empty,
            e @ Expr::Star(_) => e,
            e => Expr::Star(Rc::new(e)),
        }
    }

    /// Whether this fragment renders to no text at all.
    pub fn renders_empty(&self) -> bool {
        match self {
            Expr::Empty => true,
            Expr::Literal(text) => text.is_empty(),
            Expr::Alternation(items) | Expr::Concatenation(items) => {
                items.iter().all(Expr::renders_empty)
            }
            Expr::Star(inner) => inner.renders_empty(),
        }
    }

    /// Render as regex source.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, Prec::Alternation);
        out
    }

    /// Render as `^...$`. A top-level alternation is grouped so both anchors
    /// apply to every alternative.
    pub fn render_anchored(&self) -> String {
        let mut out = String::from("^");
        self.render_into(&mut out, Prec::Concatenation);
        out.push('$');
        out
    }

    fn prec(&self) -> Prec {
        match self {
            Expr::Empty => Prec::Primary,
            Expr::Literal(text) => {
                if is_atomic(text) {
                    Prec::Primary
                } else {
                    Prec::Concatenation
                }
            }
            Expr::Alternation(items) => {
                let has_empty = items.iter().any(Expr::renders_empty);
                let mut rest = items.iter().filter(|e| !e.renders_empty());
                match (rest.next(), rest.next()) {
                    (None, _) => Prec::Primary,
                    _ if has_empty => Prec::Postfix,
                    (Some(only), None) => only.prec(),
                    _ => Prec::Alternation,
                }
            }
            Expr::Concatenation(items) => {
                let mut rest = items.iter().filter(|e| !e.renders_empty());
                match (rest.next(), rest.next()) {
                    (None, _) => Prec::Primary,
                    (Some(only), None) => only.prec(),
                    _ => Prec::Concatenation,
                }
            }
            Expr::Star(inner) => {
                if inner.renders_empty() {
                    Prec::Primary
                } else {
                    Prec::Postfix
                }
            }
        }
    }

    fn render_into(&self, out: &mut String, min: Prec) {
        if self.prec() < min {
            out.push('(');
            self.write(out);
            out.push(')');
        } else {
            self.write(out);
        }
    }

    fn write(&self, out: &mut String) {
        match self {
            Expr::Empty => {}
            Expr::Literal(text) => out.push_str(text),
            Expr::Alternation(items) => {
                let rest: Vec<&Expr> = items.iter().filter(|e| !e.renders_empty()).collect();
                if rest.is_empty() {
                    return;
                }
                if rest.len() == items.len() {
                    write_alternatives(out, &rest);
                    return;
                }
                // Optional: (a|b)?
                if let [only] = rest.as_slice() {
                    only.render_into(out, Prec::Primary);
                } else {
                    out.push('(');
                    write_alternatives(out, &rest);
                    out.push(')');
                }
                out.push('?');
            }
            Expr::Concatenation(items) => {
                let rest: Vec<&Expr> = items.iter().filter(|e| !e.renders_empty()).collect();
                if let [only] = rest.as_slice() {
                    only.write(out);
                    return;
                }
                for item in rest {
                    item.render_into(out, Prec::Concatenation);
                }
            }
            Expr::Star(inner) => {
                if inner.renders_empty() {
                    return;
                }
                inner.render_into(out, Prec::Primary);
                out.push('*');
            }
        }
    }
}

fn write_alternatives(out: &mut String, items: &[&Expr]) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('|');
        }
        item.render_into(out, Prec::Alternation);
    }
}

/// A single character, a two-character escape, or a bracketed class.
fn is_atomic(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(_), None, _) => true,
        (Some('\\'), Some(_), None) => true,
        (Some('['), Some(_), _) => {
            text.ends_with(']') && !text[1..text.len() - 1].contains(']')
        }
        _ => false,
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
