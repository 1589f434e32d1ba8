use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::runtime::Expr;

/// Shared handle to an environment frame
pub type EnvRef = Rc<Env>;

/// A lexical scope frame
///
/// Frames form a singly-linked parent chain, fixed at creation and never
/// re-parented. A frame is shared by reference: any number of closures and
/// evaluation frames may hold the same `EnvRef`, and a frame is reclaimed
/// once the last reference drops. Bindings use interior mutability so that a
/// `def!` at the top level is visible to closures captured earlier.
#[derive(Debug)]
pub struct Env {
    /// Bindings owned by this frame
    data: RefCell<HashMap<String, Expr>>,
    /// Enclosing frame, if any
    parent: Option<EnvRef>,
}

/// The variadic marker in a parameter list: `(fn* (a & rest) ...)`
pub const VARIADIC_MARKER: &str = "&";

impl Env {
    /// Creates an empty frame linked to `parent`
    pub fn new(parent: Option<EnvRef>) -> EnvRef {
        Rc::new(Env {
            data: RefCell::new(HashMap::new()),
            parent,
        })
    }

    /// Creates a frame under `parent` with `params` bound to `args` by position.
    ///
    /// A `&` entry in the parameter list collects all remaining arguments into
    /// a list bound to the symbol that follows it. Without the marker, the
    /// parameter and argument counts must match exactly.
    pub fn bind(parent: Option<EnvRef>, params: &[String], args: &[Expr]) -> Result<EnvRef> {
        let env = Env::new(parent);
        let required = params
            .iter()
            .position(|p| p == VARIADIC_MARKER)
            .unwrap_or(params.len());

        let mut i = 0;
        while i < params.len() {
            if params[i] == VARIADIC_MARKER {
                let rest_name = params.get(i + 1).ok_or_else(|| {
                    Error::malformed("fn*", "expected a parameter name after '&'")
                })?;
                let rest: Vec<Expr> = args.get(i..).unwrap_or(&[]).to_vec();
                env.set(rest_name, Expr::list(rest));
                return Ok(env);
            }
            let arg = args.get(i).ok_or(Error::Arity {
                expected: required,
                got: args.len(),
            })?;
            env.set(&params[i], arg.clone());
            i += 1;
        }

        if args.len() > params.len() {
            return Err(Error::Arity {
                expected: required,
                got: args.len(),
            });
        }

        Ok(env)
    }

    /// Inserts or overwrites a binding in this frame only
    pub fn set(&self, name: &str, value: Expr) {
        self.data.borrow_mut().insert(name.to_string(), value);
    }

    /// Looks a symbol up in this frame, then its parent chain
    pub fn get(&self, name: &str) -> Result<Expr> {
        self.find(name).ok_or_else(|| Error::UnboundSymbol {
            name: name.to_string(),
        })
    }

    /// Non-failing chain lookup
    pub fn find(&self, name: &str) -> Option<Expr> {
        if let Some(value) = self.data.borrow().get(name) {
            return Some(value.clone());
        }
        let mut frame = self.parent.clone();
        while let Some(env) = frame {
            if let Some(value) = env.data.borrow().get(name) {
                return Some(value.clone());
            }
            frame = env.parent.clone();
        }
        None
    }
}
