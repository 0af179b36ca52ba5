//! Tree-walking interpreter for compiled routines.
//!
//! A [`Routine`] wraps an immutable [`Program`]. Each call builds its own
//! [`Environment`] and output buffer, so one routine may run on many
//! threads at once.

use std::ops::ControlFlow;
use std::sync::Arc;

use litemp_ir::{ensure_sufficient_stack, Block, Branch, Expr, Name, Node, Program};
use tracing::{debug, trace};

use crate::environment::Environment;
use crate::errors::{undefined_variable, RenderResult};
use crate::resolve::Resolve;
use crate::{Context, Value};

/// A compiled rendering routine.
#[derive(Clone, Debug)]
pub struct Routine {
    program: Arc<Program>,
}

impl Routine {
    pub fn new(program: Program) -> Self {
        Routine {
            program: Arc::new(program),
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Names the routine binds from the context on entry.
    pub fn free_vars(&self) -> impl Iterator<Item = &Name> {
        self.program.bound_names()
    }

    /// Run the routine against `context`, using `resolver` for dotted access.
    #[tracing::instrument(level = "trace", skip_all, fields(vars = context.len()))]
    pub fn call(&self, context: &Context, resolver: &dyn Resolve) -> RenderResult<String> {
        let mut frame = Frame {
            context,
            resolver,
            env: Environment::new(),
            output: Vec::new(),
        };
        match frame.exec_block(&self.program.body)? {
            ControlFlow::Break(text) => Ok(text),
            // A routine always ends in `Return`; fall back to what was written.
            ControlFlow::Continue(()) => Ok(frame.output.concat()),
        }
    }
}

type Flow = ControlFlow<String>;

/// Mutable state of one render.
struct Frame<'a> {
    context: &'a Context,
    resolver: &'a dyn Resolve,
    env: Environment,
    output: Vec<String>,
}

impl Frame<'_> {
    fn exec_block(&mut self, block: &Block) -> RenderResult<Flow> {
        for node in block {
            if let ControlFlow::Break(text) = self.exec_node(node)? {
                return Ok(ControlFlow::Break(text));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn exec_node(&mut self, node: &Node) -> RenderResult<Flow> {
        match node {
            Node::Bind(name) => {
                let value = self
                    .context
                    .get(name.as_str())
                    .cloned()
                    .ok_or_else(|| undefined_variable(name.as_str()))?;
                self.env.define(name.clone(), value);
            }
            Node::InitOutput => self.output.clear(),
            Node::Append(expr) => self.append(expr)?,
            Node::Extend(exprs) => {
                for expr in exprs {
                    self.append(expr)?;
                }
            }
            Node::If {
                branches,
                otherwise,
            } => return ensure_sufficient_stack(|| self.exec_if(branches, otherwise.as_ref())),
            Node::For { var, iter, body } => {
                return ensure_sufficient_stack(|| self.exec_for(var, iter, body));
            }
            Node::Return => {
                let text = std::mem::take(&mut self.output).concat();
                return Ok(ControlFlow::Break(text));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn exec_if(&mut self, branches: &[Branch], otherwise: Option<&Block>) -> RenderResult<Flow> {
        for branch in branches {
            if self.eval(&branch.cond)?.is_truthy() {
                return self.exec_block(&branch.body);
            }
        }
        match otherwise {
            Some(block) => self.exec_block(block),
            None => Ok(ControlFlow::Continue(())),
        }
    }

    fn exec_for(&mut self, var: &Name, iter: &Expr, body: &Block) -> RenderResult<Flow> {
        let items = self.eval(iter)?.iterate()?;
        debug!(var = var.as_str(), items = items.len(), "loop");

        self.env.push_scope();
        let mut flow = Ok(ControlFlow::Continue(()));
        for item in items {
            self.env.define(var.clone(), item);
            flow = self.exec_block(body);
            if !matches!(flow, Ok(ControlFlow::Continue(()))) {
                break;
            }
        }
        self.env.pop_scope();
        flow
    }

    fn append(&mut self, expr: &Expr) -> RenderResult<()> {
        let text = match expr {
            Expr::Literal(text) => text.to_string(),
            Expr::ToText(inner) => self.eval(inner)?.to_string(),
            _ => self.eval(expr)?.to_string(),
        };
        self.output.push(text);
        Ok(())
    }

    fn eval(&self, expr: &Expr) -> RenderResult<Value> {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&self, expr: &Expr) -> RenderResult<Value> {
        match expr {
            Expr::Literal(text) => Ok(Value::string(&**text)),
            Expr::Var(name) => self.lookup(name),
            Expr::Member { base, path } => {
                let base = self.eval(base)?;
                trace!(path = path.len(), "resolving members");
                self.resolver.resolve(base, path)
            }
            Expr::Filter { filter, arg } => {
                let func = self.lookup(filter)?;
                let arg = self.eval(arg)?;
                func.call(&[arg])
            }
            Expr::ToText(inner) => Ok(Value::string(self.eval(inner)?.to_string())),
        }
    }

    fn lookup(&self, name: &Name) -> RenderResult<Value> {
        self.env
            .lookup(name)
            .cloned()
            .ok_or_else(|| undefined_variable(name.as_str()))
    }
}
