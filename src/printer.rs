//! Serialization of values back to source text

use crate::runtime::Expr;

/// Formats a value as text.
///
/// With `readable` set, strings are quoted and escaped so the output reads
/// back as the same value; otherwise strings print raw (the `str`/`println`
/// mode).
pub fn pr_str(expr: &Expr, readable: bool) -> String {
    match expr {
        Expr::Nil => "nil".to_string(),
        Expr::Bool(b) => b.to_string(),
        Expr::Int(n) => n.to_string(),
        Expr::Float(f) => f.to_string(),
        Expr::Str(s) => {
            if readable {
                escape(s)
            } else {
                s.clone()
            }
        }
        Expr::Keyword(k) => format!(":{}", k),
        Expr::Symbol(s) => s.clone(),
        Expr::List(items) => format!("({})", join(items, readable)),
        Expr::Vector(items) => format!("[{}]", join(items, readable)),
        Expr::Map(pairs) => {
            let inner: Vec<String> = pairs
                .iter()
                .map(|(k, v)| format!("{} {}", pr_str(k, readable), pr_str(v, readable)))
                .collect();
            format!("{{{}}}", inner.join(" "))
        }
        Expr::Closure(c) => {
            if c.is_macro {
                "#<macro>".to_string()
            } else {
                "#<function>".to_string()
            }
        }
        Expr::Builtin(b) => format!("#<builtin {}>", b.name),
    }
}

fn join(items: &[Expr], readable: bool) -> String {
    items
        .iter()
        .map(|e| pr_str(e, readable))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
