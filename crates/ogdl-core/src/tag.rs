//! Structural tags of parsed paths and expressions
//!
//! Parsed paths and expressions are ordinary graphs whose nodes carry
//! reserved labels. [`Tag::of`] classifies a node once; the engines match
//! on the result.

use crate::graph::Graph;

pub const TAG_INDEX: &str = "!i";
pub const TAG_SELECTOR: &str = "!s";
pub const TAG_GROUP: &str = "!g";
pub const TAG_PATH: &str = "!p";
pub const TAG_EXPRESSION: &str = "!e";
pub const TAG_LEN: &str = "_len";
pub const TAG_NOT: &str = "!";

/// Binary operators understood by the expression engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    Eq,
    Ge,
    Le,
    Ne,
    Gt,
    Lt,
    And,
    Or,
}

impl Operator {
    pub fn parse(s: &str) -> Option<Self> {
        let op = match s {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "=" => Self::Assign,
            "+=" => Self::AddAssign,
            "-=" => Self::SubAssign,
            "*=" => Self::MulAssign,
            "/=" => Self::DivAssign,
            "%=" => Self::RemAssign,
            "==" => Self::Eq,
            ">=" => Self::Ge,
            "<=" => Self::Le,
            "!=" => Self::Ne,
            ">" => Self::Gt,
            "<" => Self::Lt,
            "&&" => Self::And,
            "||" => Self::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::RemAssign => "%=",
            Self::Eq => "==",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// Arithmetic operator applied by a compound assignment
    pub fn compound_base(&self) -> Option<Operator> {
        match self {
            Self::AddAssign => Some(Self::Add),
            Self::SubAssign => Some(Self::Sub),
            Self::MulAssign => Some(Self::Mul),
            Self::DivAssign => Some(Self::Div),
            Self::RemAssign => Some(Self::Rem),
            _ => None,
        }
    }
}

/// Characters that may start an operator
pub fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|')
}

/// Kind of a parsed path or expression node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Index,
    Selector,
    Group,
    Path,
    Expression,
    Len,
    Not,
    Operator(Operator),
}

impl Tag {
    pub fn parse(s: &str) -> Option<Self> {
        let tag = match s {
            TAG_INDEX => Self::Index,
            TAG_SELECTOR => Self::Selector,
            TAG_GROUP => Self::Group,
            TAG_PATH => Self::Path,
            TAG_EXPRESSION => Self::Expression,
            TAG_LEN => Self::Len,
            TAG_NOT => Self::Not,
            other => return Operator::parse(other).map(Self::Operator),
        };
        Some(tag)
    }

    /// Classify a node by its content; plain text and non-text content
    /// yield `None`
    pub fn of(node: &Graph) -> Option<Self> {
        node.content()
            .as_ref()
            .and_then(|s| s.as_str())
            .and_then(Self::parse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => TAG_INDEX,
            Self::Selector => TAG_SELECTOR,
            Self::Group => TAG_GROUP,
            Self::Path => TAG_PATH,
            Self::Expression => TAG_EXPRESSION,
            Self::Len => TAG_LEN,
            Self::Not => TAG_NOT,
            Self::Operator(op) => op.as_str(),
        }
    }

    /// A fresh node carrying this tag
    pub fn node(&self) -> Graph {
        Graph::with(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_round_trip() {
        for s in [
            "+", "-", "*", "/", "%", "=", "+=", "-=", "*=", "/=", "%=", "==", ">=", "<=", "!=",
            ">", "<", "&&", "||",
        ] {
            assert_eq!(Operator::parse(s).map(|op| op.as_str()), Some(s));
        }
        assert_eq!(Operator::parse("**"), None);
    }

    #[test]
    fn test_tag_of() {
        assert_eq!(Tag::of(&Tag::Index.node()), Some(Tag::Index));
        assert_eq!(Tag::of(&Graph::with("_len")), Some(Tag::Len));
        assert_eq!(
            Tag::of(&Graph::with("!=")),
            Some(Tag::Operator(Operator::Ne))
        );
        assert_eq!(Tag::of(&Graph::with("!")), Some(Tag::Not));
        assert_eq!(Tag::of(&Graph::with("name")), None);
        assert_eq!(Tag::of(&Graph::with(3i64)), None);
        assert_eq!(Tag::of(&Graph::new()), None);
    }

    #[test]
    fn test_compound_base() {
        assert_eq!(Operator::RemAssign.compound_base(), Some(Operator::Rem));
        assert_eq!(Operator::Assign.compound_base(), None);
    }
}
