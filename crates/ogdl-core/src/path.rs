//! Path resolution: reading and writing nested data by parsed paths
//!
//! A parsed path is a graph whose children are the path elements, in
//! order. Elements are plain field names or nodes tagged as index (`[e]`),
//! selector (`{}` / `{n}`), group (`(e)`) or `_len`. Index, selector and
//! group subexpressions are evaluated against the root context, not
//! against the node reached so far.

use crate::convert::as_int;
use crate::error::{Error, Result, LEGACY_INVALID_INDEX};
use crate::eval::Evaluator;
use crate::graph::Graph;
use crate::limits::validate_set_index;
use crate::scalar::Value;
use crate::tag::Tag;

impl Evaluator<'_> {
    /// Resolve `path` against the context
    ///
    /// A path ending in a field name yields the field's value when it is a
    /// single leaf, or a fresh transparent container sharing the field's
    /// children otherwise. A path ending in an index or selector yields the
    /// reached node itself. `_len` yields the child count of the node
    /// reached so far. Anything that cannot be resolved yields `Nil`.
    pub fn get(&self, path: &Graph) -> Result<Value> {
        let elements = path.children();
        if elements.is_empty() {
            return Ok(Value::Nil);
        }

        let mut node = self.context().clone();
        // Level above `node` and the name used to reach it, for selectors
        let mut upper: Option<Graph> = None;
        let mut upper_name = String::new();
        let mut by_name = false;

        for elem in &elements {
            by_name = false;

            let name = match Tag::of(elem) {
                Some(Tag::Index) => {
                    let index = match self.index_value(elem) {
                        Ok(index) => index,
                        Err(err) => return self.recover(err),
                    };
                    let Some(child) = node.get_at(index) else {
                        tracing::trace!(index, len = node.len(), "index out of range");
                        if self.options().legacy_errors {
                            return Ok(Value::Str(LEGACY_INVALID_INDEX.to_string()));
                        }
                        return Ok(Value::Nil);
                    };
                    upper_name = child.label();
                    upper = Some(std::mem::replace(&mut node, child));
                    continue;
                }
                Some(Tag::Selector) => {
                    match self.select(elem, upper.as_ref(), &upper_name)? {
                        Some(selected) => node = selected,
                        None => return Ok(Value::Nil),
                    }
                    continue;
                }
                Some(Tag::Len) => return Ok(Value::Int(node.len() as i64)),
                Some(Tag::Group) => match self.group_name(elem)? {
                    Some(name) => name,
                    None => return Ok(Value::Nil),
                },
                _ => elem.label(),
            };

            let Some(next) = node.node(&name) else {
                tracing::trace!(field = %name, "field not found");
                return Ok(Value::Nil);
            };
            upper = Some(std::mem::replace(&mut node, next));
            upper_name = name;
            by_name = true;
        }

        if !by_name {
            return Ok(Value::Graph(node));
        }

        let children = node.children();
        if let [only] = children.as_slice() {
            if only.is_empty() {
                return Ok(Value::from(only.content()));
            }
        }
        let container = Graph::new();
        container.add_nodes(&node);
        Ok(Value::Graph(container))
    }

    /// Write `value` at `path`, creating missing nodes
    ///
    /// Existing children of the target are replaced, not merged. Index
    /// elements grow the children list as needed and never shrink it. A
    /// failed write may leave earlier growth in place. Returns the node
    /// that received the value, or `None` when the path cannot be written
    /// (empty path, selector or `_len` element).
    pub fn set(&self, path: &Graph, value: Value) -> Result<Option<Graph>> {
        let elements = path.children();
        if elements.is_empty() {
            return Ok(None);
        }

        let mut node = self.context().clone();
        let mut building = false;
        let last = elements.len() - 1;

        for (i, elem) in elements.iter().enumerate() {
            let name = match Tag::of(elem) {
                Some(Tag::Index) => {
                    let index = self.index_value(elem)?;
                    validate_set_index(index)?;
                    node.grow(index + 1);
                    if i == last {
                        let slot = match value {
                            Value::Graph(g) => g,
                            other => Graph::from_content(other.to_scalar()),
                        };
                        node.replace_at(index, slot.clone());
                        return Ok(Some(slot));
                    }
                    match node.get_at(index) {
                        Some(child) => node = child,
                        None => return Ok(None),
                    }
                    continue;
                }
                Some(tag @ (Tag::Selector | Tag::Len)) => {
                    tracing::trace!(element = tag.as_str(), "element not writable");
                    return Ok(None);
                }
                Some(Tag::Group) => match self.group_name(elem)? {
                    Some(name) => name,
                    None => return Ok(None),
                },
                _ => elem.label(),
            };

            if !building {
                if let Some(next) = node.node(&name) {
                    node = next;
                    continue;
                }
                tracing::debug!(field = %name, "path missing, constructing");
                building = true;
            }
            node = node.add(name);
        }

        node.clear();
        let written = match value {
            Value::Nil => node,
            other => node.add_value(other),
        };
        Ok(Some(written))
    }

    /// Evaluate the subexpression of an index element to a position
    fn index_value(&self, elem: &Graph) -> Result<usize> {
        let expr = elem.get_at(0).ok_or(Error::EmptyIndex)?;
        let value = self.eval_expression(&expr)?;
        as_int(&value)
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(|| Error::InvalidIndex(value.label()))
    }

    /// Evaluate the subexpression of a group element to a field name
    fn group_name(&self, elem: &Graph) -> Result<Option<String>> {
        let Some(expr) = elem.get_at(0) else {
            return Ok(None);
        };
        let name = self.eval_expression(&expr)?.label();
        Ok(Some(name).filter(|n| !n.is_empty()))
    }

    /// Resolve a selector over the siblings named `name` under `upper`
    fn select(&self, elem: &Graph, upper: Option<&Graph>, name: &str) -> Result<Option<Graph>> {
        let Some(upper) = upper.filter(|u| !u.is_empty()) else {
            return Ok(None);
        };
        if name.is_empty() {
            return Ok(None);
        }

        let Some(expr) = elem.get_at(0) else {
            let all = Graph::new();
            all.add_equal_nodes(upper, name, false);
            return Ok(Some(all).filter(|g| !g.is_empty()));
        };

        let position =
            as_int(&self.eval_expression(&expr)?).and_then(|i| usize::try_from(i).ok());
        Ok(position.and_then(|n| {
            upper
                .children()
                .into_iter()
                .filter(|sibling| sibling.label() == name)
                .nth(n)
        }))
    }

    /// Apply the legacy string policy to a malformed element
    fn recover(&self, err: Error) -> Result<Value> {
        match err.legacy_message() {
            Some(message) if self.options().legacy_errors => Ok(Value::Str(message.to_string())),
            _ => Err(err),
        }
    }
}

impl Graph {
    /// Resolve a parsed path against this graph
    pub fn get_path(&self, path: &Graph) -> Result<Value> {
        Evaluator::new(self).get(path)
    }

    /// Write a value at a parsed path in this graph
    pub fn set_path(&self, path: &Graph, value: impl Into<Value>) -> Result<Option<Graph>> {
        Evaluator::new(self).set(path, value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::EvalOptions;
    use crate::scalar::Scalar;

    fn path(elements: Vec<Graph>) -> Graph {
        let p = Tag::Path.node();
        for e in elements {
            p.push(e);
        }
        p
    }

    fn field(name: &str) -> Graph {
        Graph::with(name)
    }

    fn tagged(tag: Tag, inner: Option<Graph>) -> Graph {
        let n = tag.node();
        if let Some(inner) = inner {
            n.push(inner);
        }
        n
    }

    fn index(i: i64) -> Graph {
        tagged(Tag::Index, Some(Graph::with(i.to_string())))
    }

    /// a
    ///   1
    /// b
    ///   x
    ///   y
    /// list
    ///   p
    ///   q
    ///   r
    fn create_test_graph() -> Graph {
        let g = Graph::new();
        g.add("a").add("1");
        let b = g.add("b");
        b.add("x");
        b.add("y");
        let list = g.add("list");
        for item in ["p", "q", "r"] {
            list.add(item);
        }
        g
    }

    #[test]
    fn test_get_field_unwraps_single_leaf() {
        let g = create_test_graph();
        assert_eq!(g.get_path(&path(vec![field("a")])).unwrap(), Value::from("1"));
    }

    #[test]
    fn test_get_field_wraps_children() {
        let g = create_test_graph();
        let result = g.get_path(&path(vec![field("b")])).unwrap();
        let container = result.as_graph().unwrap();
        assert!(container.is_transparent());
        assert_eq!(container.len(), 2);
        // Children are shared with the document
        assert!(container
            .get_at(0)
            .unwrap()
            .ptr_eq(&g.node("b").unwrap().get_at(0).unwrap()));
    }

    #[test]
    fn test_get_missing_field() {
        let g = create_test_graph();
        assert_eq!(g.get_path(&path(vec![field("zzz")])).unwrap(), Value::Nil);
        assert_eq!(
            g.get_path(&path(vec![field("a"), field("2")])).unwrap(),
            Value::Nil
        );
        assert_eq!(g.get_path(&path(vec![])).unwrap(), Value::Nil);
    }

    #[test]
    fn test_get_index() {
        let g = create_test_graph();
        let result = g.get_path(&path(vec![field("list"), index(2)])).unwrap();
        assert_eq!(result.as_graph().unwrap().label(), "r");

        let short = Graph::new();
        let a = short.add("a");
        a.add("0");
        a.add("1");
        assert_eq!(
            short.get_path(&path(vec![field("a"), index(2)])).unwrap(),
            Value::Nil
        );
    }

    #[test]
    fn test_get_index_from_expression_uses_context() {
        let g = create_test_graph();
        g.add("i").add("1");
        let lookup = tagged(Tag::Path, Some(field("i")));
        let result = g
            .get_path(&path(vec![field("list"), tagged(Tag::Index, Some(lookup))]))
            .unwrap();
        assert_eq!(result.as_graph().unwrap().label(), "q");
    }

    #[test]
    fn test_get_malformed_index() {
        let g = create_test_graph();
        let empty = path(vec![field("list"), tagged(Tag::Index, None)]);
        assert!(matches!(g.get_path(&empty), Err(Error::EmptyIndex)));

        let negative = path(vec![field("list"), index(-1)]);
        assert!(matches!(g.get_path(&negative), Err(Error::InvalidIndex(_))));
    }

    #[test]
    fn test_get_malformed_index_legacy() {
        let g = create_test_graph();
        let eval = Evaluator::new(&g).with_options(EvalOptions::new().with_legacy_errors(true));

        let empty = path(vec![field("list"), tagged(Tag::Index, None)]);
        assert_eq!(eval.get(&empty).unwrap(), Value::from("empty []"));

        let out_of_range = path(vec![field("list"), index(9)]);
        assert_eq!(
            eval.get(&out_of_range).unwrap(),
            Value::from("[] does not evaluate to a valid integer")
        );
    }

    #[test]
    fn test_get_selector_all() {
        let g = Graph::new();
        g.add("x").add("1");
        g.add("y");
        g.add("x").add("2");

        let result = g
            .get_path(&path(vec![field("x"), tagged(Tag::Selector, None)]))
            .unwrap();
        let all = result.as_graph().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all.get_at(0).unwrap().get_at(0).unwrap().label(), "1");
        assert_eq!(all.get_at(1).unwrap().get_at(0).unwrap().label(), "2");

        let none = g
            .get_path(&path(vec![field("y"), field("z"), tagged(Tag::Selector, None)]))
            .unwrap();
        assert_eq!(none, Value::Nil);
    }

    #[test]
    fn test_get_selector_nth() {
        let g = Graph::new();
        g.add("x").add("1");
        g.add("y");
        g.add("x").add("2");

        let second = g
            .get_path(&path(vec![
                field("x"),
                tagged(Tag::Selector, Some(Graph::with("1"))),
            ]))
            .unwrap();
        let node = second.as_graph().unwrap();
        assert_eq!(node.get_at(0).unwrap().label(), "2");

        let third = g
            .get_path(&path(vec![
                field("x"),
                tagged(Tag::Selector, Some(Graph::with("2"))),
            ]))
            .unwrap();
        assert_eq!(third, Value::Nil);
    }

    #[test]
    fn test_get_selector_needs_field() {
        let g = create_test_graph();
        let result = g
            .get_path(&path(vec![tagged(Tag::Selector, None)]))
            .unwrap();
        assert_eq!(result, Value::Nil);
    }

    #[test]
    fn test_get_len() {
        let g = create_test_graph();
        assert_eq!(
            g.get_path(&path(vec![field("list"), Tag::Len.node()])).unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            g.get_path(&path(vec![Tag::Len.node(), field("ignored")]))
                .unwrap(),
            Value::Int(3)
        );
    }

    #[test]
    fn test_get_group() {
        let g = create_test_graph();
        let name = tagged(Tag::Group, Some(Graph::with("'a")));
        // Quoted literals keep their quote, so no field matches
        assert_eq!(g.get_path(&path(vec![name])).unwrap(), Value::Nil);

        g.add("which").add("a");
        let lookup = tagged(Tag::Path, Some(field("which")));
        let group = tagged(Tag::Group, Some(lookup));
        assert_eq!(g.get_path(&path(vec![group])).unwrap(), Value::from("1"));
    }

    #[test]
    fn test_set_overwrites() {
        let g = create_test_graph();
        let p = path(vec![field("b")]);
        g.set_path(&p, 5i64).unwrap();
        assert_eq!(g.get_path(&p).unwrap(), Value::Int(5));
        assert_eq!(g.node("b").unwrap().len(), 1);
    }

    #[test]
    fn test_set_constructs_missing_path() {
        let g = create_test_graph();
        let p = path(vec![field("new"), field("deep"), field("leaf")]);
        let written = g.set_path(&p, "v").unwrap().unwrap();
        assert_eq!(written.content(), Some(Scalar::from("v")));
        assert_eq!(g.get_path(&p).unwrap(), Value::from("v"));
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn test_set_index_grows() {
        let g = Graph::new();
        let p = path(vec![field("arr"), index(3)]);
        g.set_path(&p, "z").unwrap();

        let arr = g.node("arr").unwrap();
        assert_eq!(arr.len(), 4);
        assert!(arr.get_at(1).unwrap().is_transparent());
        assert_eq!(arr.get_at(3).unwrap().content(), Some(Scalar::from("z")));

        g.set_path(&path(vec![field("arr"), index(0)]), "first").unwrap();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr.get_at(0).unwrap().label(), "first");
    }

    #[test]
    fn test_set_through_index() {
        let g = create_test_graph();
        let p = path(vec![field("list"), index(1), field("tag")]);
        g.set_path(&p, 1i64).unwrap();
        let q = g.node("list").unwrap().get_at(1).unwrap();
        assert_eq!(q.label(), "q");
        assert_eq!(q.node("tag").unwrap().get_at(0).unwrap().label(), "1");
    }

    #[test]
    fn test_set_index_limit() {
        let g = Graph::new();
        let p = path(vec![index(crate::limits::MAX_SET_INDEX as i64 + 1)]);
        assert!(matches!(g.set_path(&p, 1i64), Err(Error::Limit(_))));
    }

    #[test]
    fn test_set_constructs_through_index() {
        let g = Graph::new();
        let p = path(vec![field("new"), index(2), field("leaf")]);
        g.set_path(&p, "v").unwrap();

        let new = g.node("new").unwrap();
        assert_eq!(new.len(), 3);
        assert!(new.get_at(0).unwrap().is_transparent());
        assert!(new.get_at(1).unwrap().is_empty());
        assert_eq!(g.get_path(&p).unwrap(), Value::from("v"));
    }

    #[test]
    fn test_set_group_element() {
        let g = create_test_graph();
        g.add("which").add("a");
        let group = tagged(Tag::Group, Some(path(vec![field("which")])));
        g.set_path(&path(vec![group]), 9i64).unwrap();
        assert_eq!(g.get_path(&path(vec![field("a")])).unwrap(), Value::Int(9));
    }

    #[test]
    fn test_set_failure_keeps_earlier_growth() {
        let g = create_test_graph();
        let too_large = crate::limits::MAX_SET_INDEX as i64 + 1;
        let p = path(vec![field("list"), index(5), index(too_large)]);
        assert!(matches!(g.set_path(&p, 1i64), Err(Error::Limit(_))));

        let list = g.node("list").unwrap();
        assert_eq!(list.len(), 6);
        assert_eq!(list.get_at(0).unwrap().label(), "p");
        assert!(list.get_at(5).unwrap().is_empty());
    }

    #[test]
    fn test_set_unwritable() {
        let g = create_test_graph();
        assert!(g
            .set_path(&path(vec![field("a"), tagged(Tag::Selector, None)]), 1i64)
            .unwrap()
            .is_none());
        assert!(g.set_path(&path(vec![]), 1i64).unwrap().is_none());
    }

    #[test]
    fn test_set_graph_value_splices_transparent() {
        let g = Graph::new();
        let value = Graph::new();
        value.add("m");
        value.add("n");
        g.set_path(&path(vec![field("k")]), value).unwrap();
        assert_eq!(g.node("k").unwrap().len(), 2);
    }
}
