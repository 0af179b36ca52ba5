//! Dotted member access.
//!
//! `{{ a.b.c }}` compiles to a resolver call with base `a` and the path
//! `["b", "c"]`. The routine receives the resolver as a parameter, so
//! callers can substitute their own lookup rules.

use std::sync::Arc;

use tracing::trace;

use crate::errors::{no_such_member, RenderResult};
use crate::Value;

/// Applies a dotted path to a value.
pub trait Resolve: Send + Sync {
    fn resolve(&self, value: Value, path: &[Arc<str>]) -> RenderResult<Value>;
}

/// The standard resolver.
///
/// For each segment in order: attribute lookup first, then key or index
/// lookup. If the member found is a zero-argument function it is called and
/// its result becomes the current value.
#[derive(Clone, Copy, Debug, Default)]
pub struct DotResolver;

impl DotResolver {
    fn step(value: &Value, segment: &str) -> RenderResult<Value> {
        let member = value
            .attr(segment)
            .or_else(|| value.item(segment))
            .ok_or_else(|| no_such_member(segment, value.type_name()))?;
        if member.is_nullary() {
            trace!(segment, "invoking method");
            member.call(&[])
        } else {
            Ok(member)
        }
    }
}

impl Resolve for DotResolver {
    fn resolve(&self, value: Value, path: &[Arc<str>]) -> RenderResult<Value> {
        path.iter()
            .try_fold(value, |current, segment| Self::step(&current, segment))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::RenderErrorKind;
    use crate::Record;

    fn path(segments: &[&str]) -> Vec<Arc<str>> {
        segments.iter().map(|s| Arc::from(*s)).collect()
    }

    #[test]
    fn empty_path_is_identity() {
        let value = Value::from("x");
        assert_eq!(DotResolver.resolve(value.clone(), &[]), Ok(value));
    }

    #[test]
    fn key_lookup_when_no_attribute() {
        let value = Value::map([("b", "ok")]);
        assert_eq!(DotResolver.resolve(value, &path(&["b"])), Ok(Value::from("ok")));
    }

    #[test]
    fn multi_segment_path_forwards_every_segment() {
        let inner = Value::map([("c", 7)]);
        let outer = Value::map([("b", inner)]);
        assert_eq!(
            DotResolver.resolve(outer, &path(&["b", "c"])),
            Ok(Value::from(7))
        );
    }

    #[test]
    fn attribute_wins_over_key() {
        let value = Value::map([("upper", "key")]);
        // maps have no `upper` built-in, so the key is used
        assert_eq!(
            DotResolver.resolve(value, &path(&["upper"])),
            Ok(Value::from("key"))
        );
        // the built-in `keys` method shadows a key of the same name
        let value = Value::map([("keys", "shadowed")]);
        assert_eq!(
            DotResolver.resolve(value, &path(&["keys"])),
            Ok(Value::from(vec!["keys"]))
        );
    }

    #[test]
    fn nullary_methods_are_invoked() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let user = Value::from(Record::new("User").method("greeting", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::from("hello"))
        }));
        assert_eq!(
            DotResolver.resolve(user, &path(&["greeting", "upper"])),
            Ok(Value::from("HELLO"))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unary_functions_are_not_invoked() {
        let f = Value::filter("double", |v| Ok(v.clone()));
        let value = Value::map([("f", f.clone())]);
        assert_eq!(DotResolver.resolve(value, &path(&["f"])), Ok(f));
    }

    #[test]
    fn index_segment_on_list() {
        let value = Value::from(vec!["a", "b"]);
        assert_eq!(DotResolver.resolve(value, &path(&["1"])), Ok(Value::from("b")));
    }

    #[test]
    fn missing_member_fails() {
        let err = DotResolver
            .resolve(Value::from(3), &path(&["b"]))
            .unwrap_err();
        assert_eq!(
            err.kind,
            RenderErrorKind::NoSuchMember {
                member: "b".to_string(),
                type_name: "int".to_string()
            }
        );
    }

    #[test]
    fn method_errors_propagate() {
        let user = Value::from(
            Record::new("User").method("broken", || Err(crate::RenderError::new("nope"))),
        );
        assert_eq!(
            DotResolver.resolve(user, &path(&["broken"])),
            Err(crate::RenderError::new("nope"))
        );
    }
}
