//! Compiled templates and the render entry point.

use std::borrow::Cow;

use litemp_eval::{Context, DotResolver, Resolve, Routine};
use litemp_ir::Name;
use tracing::debug;

use crate::Error;

/// A compiled template plus its default context.
///
/// The source text, defaults and routine are immutable after
/// construction; `Template` is `Send + Sync` and every render works on its
/// own scopes and output buffer.
#[derive(Clone, Debug)]
pub struct Template {
    source: String,
    defaults: Context,
    routine: Routine,
    free_vars: Vec<Name>,
    listing: String,
}

impl Template {
    /// Compile `text`. The default contexts are merged in order, so a
    /// later context overrides an earlier one on the same name.
    pub fn new<I>(text: &str, defaults: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Context>,
    {
        let compiled = litemp_parse::compile(text)?;
        let defaults = defaults
            .into_iter()
            .fold(Context::new(), |mut merged, context| {
                merged.extend_from(&context);
                merged
            });
        debug!(
            free_vars = compiled.free_vars().len(),
            defaults = defaults.len(),
            "template ready"
        );

        let free_vars = compiled.free_vars().to_vec();
        let listing = compiled.listing().to_string();
        Ok(Template {
            source: text.to_string(),
            defaults,
            routine: Routine::new(compiled.into_program()),
            free_vars,
            listing,
        })
    }

    /// The template text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn defaults(&self) -> &Context {
        &self.defaults
    }

    /// Names every render must find in the merged context, sorted.
    pub fn free_vars(&self) -> &[Name] {
        &self.free_vars
    }

    /// Indented listing of the compiled routine.
    pub fn listing(&self) -> &str {
        &self.listing
    }

    /// Render with the defaults overlaid by `context`.
    pub fn render(&self, context: Option<&Context>) -> Result<String, Error> {
        self.render_with(context, &DotResolver)
    }

    /// Render using a caller-supplied resolver for dotted access.
    pub fn render_with(
        &self,
        context: Option<&Context>,
        resolver: &dyn Resolve,
    ) -> Result<String, Error> {
        let merged = match context {
            Some(context) => Cow::Owned(self.defaults.merged(context)),
            None => Cow::Borrowed(&self.defaults),
        };
        Ok(self.routine.call(&merged, resolver)?)
    }
}

/// Shorthand for [`Template::new`].
pub fn compile<I>(text: &str, defaults: I) -> Result<Template, Error>
where
    I: IntoIterator<Item = Context>,
{
    Template::new(text, defaults)
}
