//! Expression evaluation against a graph used as variable scope
//!
//! Expressions arrive already parsed: operator precedence is encoded in
//! the tree shape, and this module only walks it. Variables are paths
//! resolved against the context graph, and assignments write into it.

use crate::convert::{
    as_bool, as_float, as_float_lenient, as_int, as_int_lenient, number, parse_number, Number,
};
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::options::EvalOptions;
use crate::scalar::{Scalar, Value};
use crate::tag::{is_operator_char, Operator, Tag};

/// Evaluates paths and expressions against a context graph
pub struct Evaluator<'a> {
    context: &'a Graph,
    options: EvalOptions,
}

impl<'a> Evaluator<'a> {
    pub fn new(context: &'a Graph) -> Self {
        Self {
            context,
            options: EvalOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn context(&self) -> &Graph {
        self.context
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Evaluate a path, an expression, or a constant
    ///
    /// Leaves are returned in normalized native form: numeric literals as
    /// numbers and `true`/`false` as booleans. Other non-leaf nodes are
    /// returned as they are.
    pub fn eval(&self, e: &Graph) -> Result<Value> {
        match Tag::of(e) {
            Some(Tag::Path) => self.get(e),
            Some(Tag::Expression) => self.eval_expression(e),
            _ if !e.is_empty() => Ok(Value::Graph(e.clone())),
            _ => Ok(normalize(e.content())),
        }
    }

    /// Evaluate and coerce to a boolean; anything not coercible is false
    pub fn eval_bool(&self, e: &Graph) -> Result<bool> {
        Ok(as_bool(&self.eval(e)?).unwrap_or(false))
    }

    /// Evaluate a parsed expression node
    pub fn eval_expression(&self, p: &Graph) -> Result<Value> {
        let text = match p.content() {
            None => return Ok(Value::Nil),
            Some(Scalar::Str(s)) => s,
            Some(Scalar::Bytes(b)) => String::from_utf8_lossy(&b).into_owned(),
            Some(native) => return Ok(native.into()),
        };

        if text.is_empty() {
            return Ok(Value::Str(text));
        }

        // Before operators: a literal may start with a minus sign
        if let Some(n) = parse_number(&text) {
            return Ok(n.into());
        }

        match Tag::parse(&text) {
            Some(Tag::Not) => {
                let operand = p
                    .get_at(0)
                    .ok_or_else(|| Error::MissingOperand(text.clone()))?;
                let value = self.eval_expression(&operand)?;
                return Ok(Value::Bool(!as_bool(&value).unwrap_or(false)));
            }
            Some(Tag::Expression) => {
                return match p.get_at(0) {
                    Some(inner) => self.eval_expression(&inner),
                    None => Ok(Value::Nil),
                };
            }
            Some(Tag::Path) => return self.get(p),
            Some(Tag::Group) => {
                let results = Tag::Group.node();
                for expr in p.children() {
                    results.add_value(self.eval_expression(&expr)?);
                }
                return Ok(Value::Graph(results));
            }
            _ => {}
        }

        let first = text.chars().next().unwrap_or_default();
        if is_operator_char(first) {
            return self.eval_binary(p, &text);
        }
        if first == '"' || first == '\'' {
            return Ok(Value::Str(text));
        }
        if first.is_alphabetic() || first == '_' {
            return Ok(match text.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::Str(text),
            });
        }

        Ok(Value::Graph(p.clone()))
    }

    fn eval_binary(&self, p: &Graph, symbol: &str) -> Result<Value> {
        let Some(op) = Operator::parse(symbol) else {
            tracing::trace!(symbol, "unknown operator");
            return Ok(Value::Nil);
        };
        let missing = || Error::MissingOperand(symbol.to_string());
        let left = p.get_at(0).ok_or_else(missing)?;
        let right = p.get_at(1).ok_or_else(missing)?;

        // The right side is evaluated first and always
        let rv = self.eval_expression(&right)?;

        match op {
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Rem => {
                Ok(calc(&self.eval_expression(&left)?, &rv, op))
            }
            Operator::Assign
            | Operator::AddAssign
            | Operator::SubAssign
            | Operator::MulAssign
            | Operator::DivAssign
            | Operator::RemAssign => self.assign(&left, rv, op.compound_base()),
            Operator::Eq
            | Operator::Ge
            | Operator::Le
            | Operator::Ne
            | Operator::Gt
            | Operator::Lt => {
                let lv = self.eval_expression(&left)?;
                tracing::trace!(left = %lv, right = %rv, op = symbol, "compare");
                Ok(Value::Bool(compare(&lv, &rv, op)))
            }
            Operator::And | Operator::Or => {
                Ok(Value::Bool(logic(&self.eval_expression(&left)?, &rv, op)))
            }
        }
    }

    /// Write through the unevaluated target path
    ///
    /// A compound assignment on an absent target does not compute: `+=`
    /// stores the value, `-=` its negation, `*=` zero, `/=` the text
    /// `infinity` and `%=` the text `undefined`.
    fn assign(&self, target: &Graph, value: Value, base: Option<Operator>) -> Result<Value> {
        let path = assign_target(target)?;

        let value = match base {
            None => value,
            Some(base) => {
                let current = self.get(&path)?;
                if is_absent(&current) {
                    tracing::debug!(op = base.as_str(), "compound assignment on absent target");
                    match base {
                        Operator::Add => value,
                        Operator::Sub => calc(&Value::Int(0), &value, Operator::Sub),
                        Operator::Mul => Value::Int(0),
                        Operator::Div => Value::from("infinity"),
                        Operator::Rem => Value::from("undefined"),
                        _ => Value::Nil,
                    }
                } else {
                    calc(&current, &value, base)
                }
            }
        };

        if base.is_some() && value.is_nil() {
            return Ok(Value::Nil);
        }
        Ok(self
            .set(&path, value)?
            .map(Value::Graph)
            .unwrap_or(Value::Nil))
    }
}

fn assign_target(target: &Graph) -> Result<Graph> {
    match Tag::of(target) {
        Some(Tag::Path) => Ok(target.clone()),
        Some(Tag::Expression) => match target.get_at(0) {
            Some(inner) => assign_target(&inner),
            None => Err(Error::NotAssignable(target.label())),
        },
        _ => Err(Error::NotAssignable(target.label())),
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Graph(g) => g.is_transparent() && g.is_empty(),
        _ => false,
    }
}

fn normalize(content: Option<Scalar>) -> Value {
    match content {
        Some(Scalar::Str(s)) => {
            if let Some(n) = parse_number(&s) {
                return n.into();
            }
            match s.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::Str(s),
            }
        }
        other => other.into(),
    }
}

/// Arithmetic with numeric promotion
///
/// Two integers use integer arithmetic; otherwise a float on either side
/// promotes the other to float. `%` always works on integers, truncating
/// float operands. When either side is not numeric, `+` concatenates text
/// and every other operator yields `Nil`, as do integer division or
/// remainder by zero.
pub fn calc(a: &Value, b: &Value, op: Operator) -> Value {
    let (x, y) = match (number(a), number(b)) {
        (Some(x), Some(y)) => (x, y),
        _ if op == Operator::Add => return Value::Str(a.label() + &b.label()),
        _ => return Value::Nil,
    };

    if op == Operator::Rem {
        let (Some(x), Some(y)) = (truncate(x), truncate(y)) else {
            return Value::Nil;
        };
        return x.checked_rem(y).map(Value::Int).unwrap_or(Value::Nil);
    }

    match (x, y) {
        (Number::Int(x), Number::Int(y)) => match op {
            Operator::Add => Value::Int(x.wrapping_add(y)),
            Operator::Sub => Value::Int(x.wrapping_sub(y)),
            Operator::Mul => Value::Int(x.wrapping_mul(y)),
            Operator::Div => x.checked_div(y).map(Value::Int).unwrap_or(Value::Nil),
            _ => Value::Nil,
        },
        (x, y) => {
            let (x, y) = (x.to_f64(), y.to_f64());
            match op {
                Operator::Add => Value::Float(x + y),
                Operator::Sub => Value::Float(x - y),
                Operator::Mul => Value::Float(x * y),
                Operator::Div => Value::Float(x / y),
                _ => Value::Nil,
            }
        }
    }
}

fn truncate(n: Number) -> Option<i64> {
    match n {
        Number::Int(i) => Some(i),
        Number::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        Number::Float(_) => None,
    }
}

/// Comparison typed by the left operand
///
/// An integer left side compares as integers and a float left side as
/// floats, coercing the right side into the same family. Otherwise both
/// sides compare as text, where only `==` and `!=` can hold.
pub fn compare(a: &Value, b: &Value, op: Operator) -> bool {
    if let Some(x) = as_int(a) {
        return as_int_lenient(b).is_some_and(|y| holds(x, y, op));
    }
    if let Some(x) = as_float(a) {
        return as_float_lenient(b).is_some_and(|y| holds(x, y, op));
    }
    match op {
        Operator::Eq => a.label() == b.label(),
        Operator::Ne => a.label() != b.label(),
        _ => false,
    }
}

fn holds<T: PartialOrd>(x: T, y: T, op: Operator) -> bool {
    match op {
        Operator::Eq => x == y,
        Operator::Ne => x != y,
        Operator::Gt => x > y,
        Operator::Lt => x < y,
        Operator::Ge => x >= y,
        Operator::Le => x <= y,
        _ => false,
    }
}

/// `&&` and `||` over coerced booleans; false if either side does not coerce
pub fn logic(a: &Value, b: &Value, op: Operator) -> bool {
    let (Some(x), Some(y)) = (as_bool(a), as_bool(b)) else {
        return false;
    };
    match op {
        Operator::And => x && y,
        Operator::Or => x || y,
        _ => false,
    }
}

impl Graph {
    /// Evaluate a parsed expression with this graph as scope
    pub fn eval(&self, expr: &Graph) -> Result<Value> {
        Evaluator::new(self).eval(expr)
    }

    pub fn eval_bool(&self, expr: &Graph) -> Result<bool> {
        Evaluator::new(self).eval_bool(expr)
    }
}
