//! Variable tracking during compilation.

use litemp_ir::{Name, Span};
use rustc_hash::FxHashSet;

use crate::{ParseResult, SyntaxErrorKind, TemplateSyntaxError};

/// Names collected while compiling one template.
///
/// `all_vars - loop_vars` is exactly the set of names bound from the
/// render-time context.
#[derive(Clone, Debug, Default)]
pub struct VarSets {
    all_vars: FxHashSet<Name>,
    loop_vars: FxHashSet<Name>,
}

impl VarSets {
    pub fn new() -> Self {
        Self::default()
    }

    fn validate(text: &str, span: Span) -> ParseResult<Name> {
        Name::new(text)
            .ok_or_else(|| TemplateSyntaxError::new(SyntaxErrorKind::InvalidName, text, span))
    }

    /// Register a variable or filter reference.
    pub fn reference(&mut self, text: &str, span: Span) -> ParseResult<Name> {
        let name = Self::validate(text, span)?;
        self.all_vars.insert(name.clone());
        Ok(name)
    }

    /// Register a name bound by a `for` tag.
    pub fn bind_loop(&mut self, text: &str, span: Span) -> ParseResult<Name> {
        let name = Self::validate(text, span)?;
        self.all_vars.insert(name.clone());
        self.loop_vars.insert(name.clone());
        Ok(name)
    }

    pub fn all_vars(&self) -> &FxHashSet<Name> {
        &self.all_vars
    }

    pub fn loop_vars(&self) -> &FxHashSet<Name> {
        &self.loop_vars
    }

    /// Names to resolve from the context, sorted for a stable binding order.
    pub fn free_vars(&self) -> Vec<Name> {
        let mut free: Vec<Name> = self
            .all_vars
            .difference(&self.loop_vars)
            .cloned()
            .collect();
        free.sort();
        free
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn free_vars_exclude_loop_vars() {
        let mut vars = VarSets::new();
        vars.reference("topics", Span::DUMMY).ok();
        vars.reference("upper", Span::DUMMY).ok();
        vars.bind_loop("topic", Span::DUMMY).ok();
        vars.reference("topic", Span::DUMMY).ok();

        let free: Vec<String> = vars.free_vars().iter().map(ToString::to_string).collect();
        assert_eq!(free, vec!["topics", "upper"]);
        assert_eq!(vars.all_vars().len(), 3);
        assert_eq!(vars.loop_vars().len(), 1);
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut vars = VarSets::new();
        let err = vars.reference("a-b", Span::new(4, 7));
        assert_eq!(
            err,
            Err(TemplateSyntaxError::new(
                SyntaxErrorKind::InvalidName,
                "a-b",
                Span::new(4, 7)
            ))
        );
        assert!(vars.all_vars().is_empty());
    }
}
