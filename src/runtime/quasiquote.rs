//! Quasiquote expansion
//!
//! A pure transformation from a quoted template to an expression that, when
//! evaluated, reconstructs the template with unquoted sub-expressions
//! replaced by their values. The evaluator re-enters its trampoline on the
//! expanded form, so expansion itself never touches an environment.

use crate::runtime::Expr;

/// Expands a quasiquote template.
///
/// - `(unquote x)` strips the wrapper; the caller evaluates `x`.
/// - Lists right-fold into a `cons`/`concat` construction chain, splicing
///   two-element `(splice-unquote x)` members via `concat`.
/// - Vectors get the same fold wrapped in `(vec ...)`.
/// - Symbols and maps wrap in `(quote ...)` so literal data is not re-evaluated.
/// - Remaining atoms pass through unchanged.
pub fn quasiquote(ast: &Expr) -> Expr {
    match ast {
        Expr::List(items) => {
            if let Some(inner) = unwrap_call(items, "unquote") {
                return inner.clone();
            }
            fold_seq(items)
        }
        Expr::Vector(items) => Expr::list(vec![Expr::symbol("vec"), fold_seq(items)]),
        Expr::Symbol(_) | Expr::Map(_) => Expr::list(vec![Expr::symbol("quote"), ast.clone()]),
        _ => ast.clone(),
    }
}

/// Right-folds sequence elements into a construction chain, starting from
/// the empty list
fn fold_seq(items: &[Expr]) -> Expr {
    let mut acc = Expr::list(vec![]);
    for elt in items.iter().rev() {
        acc = if let Expr::List(elt_items) = elt {
            if let Some(spliced) = unwrap_call(elt_items, "splice-unquote") {
                Expr::list(vec![Expr::symbol("concat"), spliced.clone(), acc])
            } else {
                Expr::list(vec![Expr::symbol("cons"), quasiquote(elt), acc])
            }
        } else {
            Expr::list(vec![Expr::symbol("cons"), quasiquote(elt), acc])
        };
    }
    acc
}

/// Matches a two-element list `(name x)` and returns `x`
fn unwrap_call<'a>(items: &'a [Expr], name: &str) -> Option<&'a Expr> {
    match items {
        [Expr::Symbol(head), arg] if head == name => Some(arg),
        _ => None,
    }
}
