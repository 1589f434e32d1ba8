use std::rc::Rc;

use crate::core;
use crate::error::{Error, Result};
use crate::lexer::Scanner;
use crate::parser::Reader;
use crate::printer::pr_str;
use crate::runtime::quasiquote::quasiquote;
use crate::runtime::{Builtin, Closure, Env, EnvRef, Expr};

/// The closed set of special forms.
///
/// Recognition happens once per trampoline iteration by a single match on
/// the head symbol; adding a form means adding a variant, and the compiler
/// enforces that every variant is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialForm {
    /// `(def! sym value)` - bind in the current frame
    Def,
    /// `(let* (sym val ...) body)` - sequential bindings in a child frame
    Let,
    /// `(quote form)` - return the form unevaluated
    Quote,
    /// `(quasiquote template)` - expand and re-evaluate
    Quasiquote,
    /// `(defmacro! sym fn-expr)` - clone a closure into a macro
    Defmacro,
    /// `(do e1 e2 ... en)` - evaluate for effect, tail on the last
    Do,
    /// `(if cond then else?)` - only nil/false are falsy
    If,
    /// `(fn* (params) body)` - construct a closure
    Fn,
}

impl SpecialForm {
    fn lookup(name: &str) -> Option<SpecialForm> {
        match name {
            "def!" => Some(SpecialForm::Def),
            "let*" => Some(SpecialForm::Let),
            "quote" => Some(SpecialForm::Quote),
            "quasiquote" => Some(SpecialForm::Quasiquote),
            "defmacro!" => Some(SpecialForm::Defmacro),
            "do" => Some(SpecialForm::Do),
            "if" => Some(SpecialForm::If),
            "fn*" => Some(SpecialForm::Fn),
            _ => None,
        }
    }
}

/// Evaluates an expression against an environment.
///
/// The loop is a trampoline: tail positions in `let*`, `do`, `if`,
/// `quasiquote`, macro expansion, and closure application rebind
/// `(ast, env)` and continue instead of recursing, so tail calls never grow
/// the native stack. Non-tail positions (vector/map elements, call
/// arguments, `do` prefixes) recurse normally.
pub fn eval(mut ast: Expr, mut env: EnvRef) -> Result<Expr> {
    loop {
        // Language-level tracing hook: (def! DEBUG-EVAL true) prints every
        // reduction step until unset.
        if let Some(flag) = env.find("DEBUG-EVAL") {
            if flag.is_truthy() {
                println!("EVAL: {}", pr_str(&ast, true));
            }
        }

        match ast {
            Expr::Symbol(name) => return env.get(&name),

            Expr::Vector(items) => {
                let evaluated = items
                    .iter()
                    .map(|e| eval(e.clone(), env.clone()))
                    .collect::<Result<Vec<_>>>()?;
                return Ok(Expr::vector(evaluated));
            }

            Expr::Map(pairs) => {
                // Values evaluate, keys pass through unevaluated
                let evaluated = pairs
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), eval(v.clone(), env.clone())?)))
                    .collect::<Result<Vec<_>>>()?;
                return Ok(Expr::Map(Rc::new(evaluated)));
            }

            Expr::List(items) if items.is_empty() => return Ok(Expr::List(items)),

            Expr::List(items) => {
                if let Expr::Symbol(head) = &items[0] {
                    if let Some(form) = SpecialForm::lookup(head) {
                        match form {
                            SpecialForm::Def => return eval_def(&items, &env),
                            SpecialForm::Quote => {
                                expect_form_len(&items, 2, 2, "quote")?;
                                return Ok(items[1].clone());
                            }
                            SpecialForm::Defmacro => return eval_defmacro(&items, &env),
                            SpecialForm::Fn => return make_closure(&items, &env),
                            SpecialForm::Let => {
                                (ast, env) = eval_let(&items, env)?;
                                continue;
                            }
                            SpecialForm::Quasiquote => {
                                expect_form_len(&items, 2, 2, "quasiquote")?;
                                ast = quasiquote(&items[1]);
                                continue;
                            }
                            SpecialForm::Do => {
                                expect_form_len(&items, 2, usize::MAX, "do")?;
                                for e in &items[1..items.len() - 1] {
                                    eval(e.clone(), env.clone())?;
                                }
                                ast = items[items.len() - 1].clone();
                                continue;
                            }
                            SpecialForm::If => {
                                expect_form_len(&items, 3, 4, "if")?;
                                let cond = eval(items[1].clone(), env.clone())?;
                                ast = if cond.is_truthy() {
                                    items[2].clone()
                                } else {
                                    items.get(3).cloned().unwrap_or(Expr::Nil)
                                };
                                continue;
                            }
                        }
                    }
                }

                // Ordinary application: evaluate the head to a callable
                let f = eval(items[0].clone(), env.clone())?;

                if let Expr::Closure(c) = &f {
                    if c.is_macro {
                        // Macro semantics: arguments unevaluated, the
                        // expansion re-enters the trampoline.
                        let expansion = apply(&f, &items[1..])?;
                        tracing::debug!(
                            macro_call = %pr_str(&Expr::List(items.clone()), true),
                            expansion = %pr_str(&expansion, true),
                            "macro expanded"
                        );
                        ast = expansion;
                        continue;
                    }
                }

                let args = items[1..]
                    .iter()
                    .map(|a| eval(a.clone(), env.clone()))
                    .collect::<Result<Vec<_>>>()?;

                match f {
                    Expr::Closure(c) => {
                        // The TCO case: step into the body, no recursion
                        env = Env::bind(Some(c.env.clone()), &c.params, &args)?;
                        ast = c.body.clone();
                    }
                    Expr::Builtin(b) => return (b.func)(&args),
                    other => {
                        return Err(Error::NotCallable {
                            type_name: other.type_name().to_string(),
                        })
                    }
                }
            }

            // Atoms self-evaluate
            other => return Ok(other),
        }
    }
}

/// Applies a callable to already-prepared arguments.
///
/// For closures this recurses into [`eval`] (the non-tail entry used by
/// macro expansion and by `apply`/`map`-style builtins); builtins are
/// invoked directly.
pub fn apply(f: &Expr, args: &[Expr]) -> Result<Expr> {
    match f {
        Expr::Closure(c) => {
            let env = Env::bind(Some(c.env.clone()), &c.params, args)?;
            eval(c.body.clone(), env)
        }
        Expr::Builtin(b) => (b.func)(args),
        other => Err(Error::NotCallable {
            type_name: other.type_name().to_string(),
        }),
    }
}

fn expect_form_len(items: &[Expr], min: usize, max: usize, form: &str) -> Result<()> {
    if items.len() < min {
        return Err(Error::malformed(
            form,
            format!("expected at least {} forms, got {}", min - 1, items.len() - 1),
        ));
    }
    if items.len() > max {
        return Err(Error::malformed(
            form,
            format!("expected at most {} forms, got {}", max - 1, items.len() - 1),
        ));
    }
    Ok(())
}

fn eval_def(items: &[Expr], env: &EnvRef) -> Result<Expr> {
    expect_form_len(items, 3, 3, "def!")?;
    let name = items[1]
        .as_symbol()
        .map_err(|_| Error::malformed("def!", "first argument must be a symbol"))?;
    let value = eval(items[2].clone(), env.clone())?;
    env.set(name, value.clone());
    Ok(value)
}

/// Builds the child frame for `let*` and returns the tail `(ast, env)` pair.
///
/// Bindings evaluate sequentially in the new frame, so later bindings see
/// earlier ones.
fn eval_let(items: &[Expr], env: EnvRef) -> Result<(Expr, EnvRef)> {
    expect_form_len(items, 3, 3, "let*")?;
    let bindings = items[1]
        .as_seq()
        .map_err(|_| Error::malformed("let*", "bindings must be a list or vector"))?;
    if bindings.len() % 2 != 0 {
        return Err(Error::malformed(
            "let*",
            "bindings need an even number of forms",
        ));
    }

    let child = Env::new(Some(env));
    for pair in bindings.chunks_exact(2) {
        let name = pair[0]
            .as_symbol()
            .map_err(|_| Error::malformed("let*", "binding targets must be symbols"))?;
        let value = eval(pair[1].clone(), child.clone())?;
        child.set(name, value);
    }

    Ok((items[2].clone(), child))
}

/// `defmacro!` clones the evaluated closure before setting its macro flag,
/// so the original function value is never mutated (one-way conversion).
fn eval_defmacro(items: &[Expr], env: &EnvRef) -> Result<Expr> {
    expect_form_len(items, 3, 3, "defmacro!")?;
    let name = items[1]
        .as_symbol()
        .map_err(|_| Error::malformed("defmacro!", "first argument must be a symbol"))?;
    let value = eval(items[2].clone(), env.clone())?;

    let Expr::Closure(closure) = value else {
        return Err(Error::malformed(
            "defmacro!",
            format!("value must be a function, got {}", value.type_name()),
        ));
    };
    let mut mac = (*closure).clone();
    mac.is_macro = true;
    let mac = Expr::Closure(Rc::new(mac));

    env.set(name, mac.clone());
    Ok(mac)
}

fn make_closure(items: &[Expr], env: &EnvRef) -> Result<Expr> {
    expect_form_len(items, 3, 3, "fn*")?;
    let params = items[1]
        .as_seq()
        .map_err(|_| Error::malformed("fn*", "parameter list must be a list or vector"))?
        .iter()
        .map(|p| {
            p.as_symbol()
                .map(str::to_string)
                .map_err(|_| Error::malformed("fn*", "parameters must be symbols"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Expr::Closure(Rc::new(Closure {
        params,
        body: items[2].clone(),
        env: env.clone(),
        is_macro: false,
    })))
}

/// Definitions installed at startup in the language itself rather than as
/// builtins.
const BOOTSTRAP: &[&str] = &[
    "(def! not (fn* (a) (if a false true)))",
    r#"(def! load-file (fn* (f) (eval (read-string (str "(do " (slurp f) "\nnil)")))))"#,
    r#"(defmacro! cond (fn* (& xs)
         (if (> (count xs) 0)
             (list 'if (first xs)
                   (if (> (count xs) 1)
                       (nth xs 1)
                       (throw "odd number of forms to cond"))
                   (cons 'cond (rest (rest xs)))))))"#,
];

/// Interpreter front-end owning the top-level environment
///
/// Construction installs the builtin namespace, the env-capturing `eval`
/// primitive, an empty `*ARGV*`, and the bootstrap definitions (`not`,
/// `load-file`, `cond`).
pub struct Interpreter {
    env: EnvRef,
}

impl Interpreter {
    /// Creates an interpreter with a fully populated top-level environment
    pub fn new() -> Result<Self> {
        let env = Env::new(None);
        core::install(&env);

        // `eval` re-enters the trampoline against the *top-level*
        // environment, not the caller's.
        let top = env.clone();
        env.set(
            "eval",
            Expr::Builtin(Builtin::new("eval", move |args| {
                let ast = args.first().ok_or(Error::Arity {
                    expected: 1,
                    got: 0,
                })?;
                eval(ast.clone(), top.clone())
            })),
        );
        env.set("*ARGV*", Expr::list(vec![]));

        let interp = Interpreter { env };
        for form in BOOTSTRAP {
            interp.rep(form)?;
        }
        Ok(interp)
    }

    /// The top-level environment
    pub fn env(&self) -> &EnvRef {
        &self.env
    }

    /// Evaluates an expression against the top-level environment
    pub fn eval(&self, ast: &Expr) -> Result<Expr> {
        eval(ast.clone(), self.env.clone())
    }

    /// Read-eval-print: reads all forms in `source`, evaluates them in
    /// order, and returns the readable form of the last result
    pub fn rep(&self, source: &str) -> Result<String> {
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens()?;
        let forms = Reader::new(tokens).parse_forms()?;

        let mut last = Expr::Nil;
        for form in forms {
            last = self.eval(&form)?;
        }
        Ok(pr_str(&last, true))
    }

    /// Binds `*ARGV*` to a list of strings for file-mode execution
    pub fn set_argv<I: IntoIterator<Item = String>>(&self, args: I) {
        let argv: Vec<Expr> = args.into_iter().map(Expr::Str).collect();
        self.env.set("*ARGV*", Expr::list(argv));
    }

    /// Loads and evaluates a file via the language-level `load-file`
    pub fn load_file(&self, path: &str) -> Result<Expr> {
        tracing::debug!(path, "loading file");
        let form = Expr::list(vec![
            Expr::symbol("load-file"),
            Expr::Str(path.to_string()),
        ]);
        self.eval(&form)
    }
}
