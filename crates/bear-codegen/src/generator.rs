//! C++ emission from the BearLang AST.

use bear_syntax::ast::*;

use crate::scope::ScopeStack;

fn pad(level: usize) -> String {
    " ".repeat(level * 4)
}

fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Emits a complete C++ translation unit for one program.
///
/// Generation is total: all validation happened in earlier stages, so this
/// cannot fail, and the output is a pure function of the AST. The generator
/// is consumed by [`CodeGenerator::generate`] so the mangling counter is
/// always fresh per invocation.
pub struct CodeGenerator {
    scopes: ScopeStack,
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self {
            scopes: ScopeStack::new(),
        }
    }

    /// Generate the translation unit: preamble, `main` frame, statements.
    pub fn generate(mut self, program: &Program) -> String {
        let mut out = String::new();
        out.push_str("#include <cmath>\n");
        out.push_str("#include <iostream>\n");
        out.push_str("#include <string>\n\n");
        out.push_str("int main() {\n");
        out.push_str(&pad(1));
        out.push_str("std::ios_base::sync_with_stdio(false);\n");
        self.emit_statements(&program.statements, 1, &mut out);
        out.push_str(&pad(1));
        out.push_str("return 0;\n");
        out.push_str("}\n");
        out
    }

    fn emit_statements(&mut self, statements: &[Stmt], level: usize, out: &mut String) {
        for stmt in statements {
            self.emit_stmt(stmt, level, out);
        }
    }

    fn emit_block(&mut self, body: &[Stmt], level: usize, out: &mut String) {
        self.scopes.push();
        self.emit_statements(body, level + 1, out);
        self.scopes.pop();
        out.push_str(&pad(level));
        out.push_str("}\n");
    }

    fn emit_stmt(&mut self, stmt: &Stmt, level: usize, out: &mut String) {
        match stmt {
            Stmt::VarDecl { ty, name, init } => {
                let mangled = self.scopes.declare(name);
                match init {
                    Some(expr) => out.push_str(&format!(
                        "{}{} {} = {};\n",
                        pad(level),
                        ty.cpp_name(),
                        mangled,
                        self.emit_expr(expr)
                    )),
                    None => out.push_str(&format!(
                        "{}{} {}{{}};\n",
                        pad(level),
                        ty.cpp_name(),
                        mangled
                    )),
                }
            }
            Stmt::Assign { name, expr } => {
                let resolved = self.scopes.resolve(name);
                out.push_str(&format!(
                    "{}{} = {};\n",
                    pad(level),
                    resolved,
                    self.emit_expr(expr)
                ));
            }
            Stmt::Input { name } => {
                let resolved = self.scopes.resolve(name);
                out.push_str(&format!("{}std::cin >> {};\n", pad(level), resolved));
            }
            Stmt::Output { expr } => {
                out.push_str(&format!(
                    "{}std::cout << {} << std::endl;\n",
                    pad(level),
                    self.emit_expr(expr)
                ));
            }
            Stmt::If {
                branches,
                else_body,
            } => {
                for (i, branch) in branches.iter().enumerate() {
                    let keyword = if i == 0 { "if" } else { "else if" };
                    out.push_str(&format!(
                        "{}{} ({}) {{\n",
                        pad(level),
                        keyword,
                        self.emit_expr(&branch.cond)
                    ));
                    self.emit_block(&branch.body, level, out);
                }
                if let Some(body) = else_body {
                    out.push_str(&format!("{}else {{\n", pad(level)));
                    self.emit_block(body, level, out);
                }
            }
            Stmt::While { cond, body } => {
                out.push_str(&format!(
                    "{}while ({}) {{\n",
                    pad(level),
                    self.emit_expr(cond)
                ));
                self.emit_block(body, level, out);
            }
            Stmt::ForRange {
                ty,
                var,
                from,
                to,
                body,
            } => {
                // The counter lives in its own scope covering the body;
                // the bounds are resolved before it is declared so they
                // still see the enclosing scope.
                self.scopes.push();
                let from_cpp = self.emit_expr(from);
                let to_cpp = self.emit_expr(to);
                let counter = self.scopes.declare(var);
                out.push_str(&format!(
                    "{}for ({} {} = {}; {} <= {}; ++{}) {{\n",
                    pad(level),
                    ty.cpp_name(),
                    counter,
                    from_cpp,
                    counter,
                    to_cpp,
                    counter
                ));
                self.emit_statements(body, level + 1, out);
                self.scopes.pop();
                out.push_str(&pad(level));
                out.push_str("}\n");
            }
        }
    }

    fn emit_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::LiteralInt(text) | Expr::LiteralDouble(text) => text.clone(),
            Expr::LiteralString(text) => format!("\"{}\"", escape_string(text)),
            Expr::LiteralBool(b) => if *b { "true" } else { "false" }.to_string(),
            Expr::Ident(name) => self.scopes.resolve(name),
            Expr::UnaryNeg(operand) => format!("-({})", self.emit_expr(operand)),
            Expr::LogicalNot(operand) => format!("!({})", self.emit_expr(operand)),
            Expr::BinaryPow(lhs, rhs) => {
                format!("std::pow({}, {})", self.emit_expr(lhs), self.emit_expr(rhs))
            }
            Expr::BinaryAdd(a, b) => self.binary("+", a, b),
            Expr::BinarySub(a, b) => self.binary("-", a, b),
            Expr::BinaryMul(a, b) => self.binary("*", a, b),
            Expr::BinaryDiv(a, b) => self.binary("/", a, b),
            Expr::BinaryMod(a, b) => self.binary("%", a, b),
            Expr::Eq(a, b) => self.binary("==", a, b),
            Expr::Lt(a, b) => self.binary("<", a, b),
            Expr::Le(a, b) => self.binary("<=", a, b),
            Expr::Gt(a, b) => self.binary(">", a, b),
            Expr::Ge(a, b) => self.binary(">=", a, b),
            Expr::LogicalAnd(a, b) => self.binary("&&", a, b),
            Expr::LogicalOr(a, b) => self.binary("||", a, b),
        }
    }

    // Binary results are always parenthesised so BearLang precedence holds
    // in any embedding context.
    fn binary(&self, op: &str, a: &Expr, b: &Expr) -> String {
        format!("({} {} {})", self.emit_expr(a), op, self.emit_expr(b))
    }
}
