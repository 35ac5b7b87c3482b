//! Recursive-descent parser over the BearLang token stream.

use bear_syntax::ast::*;
use bear_syntax::error::{Error, Result};
use bear_syntax::token::{Token, TokenKind};

/// Builds a [`Program`] from the token stream produced by the lexer.
///
/// The grammar is statement-oriented: blocks are `Newline Indent … Dedent`
/// sequences, simple statements end at a `Newline` (a following `Dedent` or
/// `Eof` is also accepted). The first error aborts parsing.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            eof: Token {
                kind: TokenKind::Eof,
                line: 0,
                col: 0,
            },
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: &TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == *kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if !self.is_at_end() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, msg: impl Into<String>) -> Result<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            self.err_here(msg)
        }
    }

    fn err_here<T>(&self, msg: impl Into<String>) -> Result<T> {
        let tok = self.peek();
        Err(Error::with_span(msg, tok.line, tok.col))
    }

    fn expect_ident(&mut self, msg: &str) -> Result<String> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                self.pos += 1;
                Ok(name)
            }
            _ => self.err_here(msg),
        }
    }

    fn skip_newlines(&mut self) {
        while self.eat(&TokenKind::Newline) {}
    }

    /// A simple statement ends at a newline; a block end or the end of the
    /// file also closes it.
    fn expect_newline(&mut self, context: &str) -> Result<()> {
        if self.eat(&TokenKind::Newline) {
            self.skip_newlines();
            return Ok(());
        }
        if self.check(&TokenKind::Dedent) || self.is_at_end() {
            return Ok(());
        }
        self.err_here(format!("Ожидается перевод строки после {}", context))
    }

    /// Parse the whole token stream into a program.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut program = Program::default();
        self.skip_newlines();
        while !self.is_at_end() {
            program.statements.push(self.parse_statement()?);
            self.skip_newlines();
        }
        Ok(program)
    }

    fn parse_statement(&mut self) -> Result<Stmt> {
        if self.check(&TokenKind::Indent) {
            return self.err_here("Неожиданный отступ");
        }
        if self.peek().kind.is_type_keyword() {
            return self.parse_var_decl();
        }
        match self.peek().kind.clone() {
            TokenKind::Input => self.parse_input(),
            TokenKind::Output => self.parse_output(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Ident(_) => self.parse_assignment(),
            other => self.err_here(format!("Неожиданное слово '{}'", other)),
        }
    }

    fn parse_var_decl(&mut self) -> Result<Stmt> {
        let ty = match self.advance().kind {
            TokenKind::TInt => ValueType::Integer,
            TokenKind::TDouble => ValueType::Double,
            TokenKind::TString => ValueType::String,
            TokenKind::TBool => ValueType::Boolean,
            _ => ValueType::Unknown,
        };
        let name = self.expect_ident("Ожидается имя переменной")?;
        if self.check(&TokenKind::From) {
            return self.err_here("Счётчик с 'от' и 'до' объявляется в заголовке цикла 'для'");
        }
        let init = if self.eat(&TokenKind::Assign) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect_newline("объявления переменной")?;
        Ok(Stmt::VarDecl { ty, name, init })
    }

    fn parse_assignment(&mut self) -> Result<Stmt> {
        let name = self.expect_ident("Ожидается имя переменной")?;
        self.consume(TokenKind::Assign, "Ожидается '=' в присваивании")?;
        let expr = self.parse_expr()?;
        self.expect_newline("присваивания")?;
        Ok(Stmt::Assign { name, expr })
    }

    fn parse_input(&mut self) -> Result<Stmt> {
        self.advance();
        let name = self.expect_ident("Ожидается переменная для ввода")?;
        self.expect_newline("оператора ввода")?;
        Ok(Stmt::Input { name })
    }

    fn parse_output(&mut self) -> Result<Stmt> {
        self.advance();
        let expr = self.parse_expr()?;
        self.expect_newline("оператора вывода")?;
        Ok(Stmt::Output { expr })
    }

    fn parse_if(&mut self) -> Result<Stmt> {
        self.advance();
        let cond = self.parse_paren_condition("если")?;
        let body = self.parse_block("условия 'если'")?;
        let mut branches = vec![IfBranch { cond, body }];
        let mut else_body = None;

        while self.eat(&TokenKind::Else) {
            if self.eat(&TokenKind::If) {
                let cond = self.parse_paren_condition("иначе если")?;
                let body = self.parse_block("условия 'иначе если'")?;
                branches.push(IfBranch { cond, body });
            } else {
                else_body = Some(self.parse_block("блока 'иначе'")?);
                break;
            }
        }

        Ok(Stmt::If {
            branches,
            else_body,
        })
    }

    fn parse_while(&mut self) -> Result<Stmt> {
        self.advance();
        let cond = self.parse_paren_condition("пока")?;
        let body = self.parse_block("цикла 'пока'")?;
        Ok(Stmt::While { cond, body })
    }

    fn parse_for(&mut self) -> Result<Stmt> {
        self.advance();
        self.consume(TokenKind::LParen, "Ожидается '(' после 'для'")?;
        let ty = self.parse_type_keyword("цикла 'для'")?;
        let var = self.expect_ident("Ожидается имя счётчика")?;
        self.consume(TokenKind::From, "Ожидается слово 'от' в цикле")?;
        let from = self.parse_expr()?;
        self.consume(TokenKind::To, "Ожидается слово 'до' в цикле")?;
        let to = self.parse_expr()?;
        self.consume(TokenKind::RParen, "Ожидается ')' после заголовка цикла")?;
        let body = self.parse_block("цикла 'для'")?;
        Ok(Stmt::ForRange {
            ty,
            var,
            from,
            to,
            body,
        })
    }

    fn parse_type_keyword(&mut self, context: &str) -> Result<ValueType> {
        if self.eat(&TokenKind::TInt) {
            return Ok(ValueType::Integer);
        }
        if self.eat(&TokenKind::TDouble) {
            return Ok(ValueType::Double);
        }
        if self.eat(&TokenKind::TString) {
            return Ok(ValueType::String);
        }
        if self.eat(&TokenKind::TBool) {
            return Ok(ValueType::Boolean);
        }
        self.err_here(format!("Ожидается тип для {}", context))
    }

    fn parse_block(&mut self, context: &str) -> Result<Vec<Stmt>> {
        self.consume(
            TokenKind::Newline,
            format!("Ожидается новая строка после {}", context),
        )?;
        self.consume(
            TokenKind::Indent,
            format!("Ожидается отступ после {}", context),
        )?;
        let mut body = Vec::new();
        self.skip_newlines();
        while !self.check(&TokenKind::Dedent) && !self.is_at_end() {
            body.push(self.parse_statement()?);
            self.skip_newlines();
        }
        self.consume(
            TokenKind::Dedent,
            format!("Ожидается завершение блока {}", context),
        )?;
        Ok(body)
    }

    fn parse_paren_condition(&mut self, context: &str) -> Result<Expr> {
        self.consume(
            TokenKind::LParen,
            format!("Ожидается '(' после {}", context),
        )?;
        let cond = self.parse_expr()?;
        self.consume(
            TokenKind::RParen,
            format!("Ожидается ')' после условия {}", context),
        )?;
        Ok(cond)
    }

    /// Parse a single expression (entry point for the precedence climb).
    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut expr = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            expr = Expr::LogicalOr(Box::new(expr), Box::new(right));
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut expr = self.parse_equality()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_equality()?;
            expr = Expr::LogicalAnd(Box::new(expr), Box::new(right));
        }
        Ok(expr)
    }

    fn parse_equality(&mut self) -> Result<Expr> {
        let mut expr = self.parse_comparison()?;
        while self.eat(&TokenKind::EqEq) {
            let right = self.parse_comparison()?;
            expr = Expr::Eq(Box::new(expr), Box::new(right));
        }
        Ok(expr)
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut expr = self.parse_term()?;
        loop {
            if self.eat(&TokenKind::Less) {
                let right = self.parse_term()?;
                expr = Expr::Lt(Box::new(expr), Box::new(right));
            } else if self.eat(&TokenKind::LessEq) {
                let right = self.parse_term()?;
                expr = Expr::Le(Box::new(expr), Box::new(right));
            } else if self.eat(&TokenKind::Greater) {
                let right = self.parse_term()?;
                expr = Expr::Gt(Box::new(expr), Box::new(right));
            } else if self.eat(&TokenKind::GreaterEq) {
                let right = self.parse_term()?;
                expr = Expr::Ge(Box::new(expr), Box::new(right));
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut expr = self.parse_factor()?;
        loop {
            if self.eat(&TokenKind::Plus) {
                let right = self.parse_factor()?;
                expr = Expr::BinaryAdd(Box::new(expr), Box::new(right));
            } else if self.eat(&TokenKind::Minus) {
                let right = self.parse_factor()?;
                expr = Expr::BinarySub(Box::new(expr), Box::new(right));
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        let mut expr = self.parse_power()?;
        loop {
            if self.eat(&TokenKind::Star) {
                let right = self.parse_power()?;
                expr = Expr::BinaryMul(Box::new(expr), Box::new(right));
            } else if self.eat(&TokenKind::Slash) {
                let right = self.parse_power()?;
                expr = Expr::BinaryDiv(Box::new(expr), Box::new(right));
            } else if self.eat(&TokenKind::Percent) {
                let right = self.parse_power()?;
                expr = Expr::BinaryMod(Box::new(expr), Box::new(right));
            } else {
                break;
            }
        }
        Ok(expr)
    }

    // Exponentiation is right-associative: the recursion on the right side
    // groups `a ^ b ^ c` as `a ^ (b ^ c)`.
    fn parse_power(&mut self) -> Result<Expr> {
        let expr = self.parse_unary()?;
        if self.eat(&TokenKind::Caret) {
            let right = self.parse_power()?;
            return Ok(Expr::BinaryPow(Box::new(expr), Box::new(right)));
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        if self.eat(&TokenKind::Minus) {
            let operand = self.parse_unary()?;
            return Ok(Expr::UnaryNeg(Box::new(operand)));
        }
        if self.eat(&TokenKind::Not) {
            let operand = self.parse_unary()?;
            return Ok(Expr::LogicalNot(Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek().kind.clone() {
            TokenKind::Int(text) => {
                self.pos += 1;
                Ok(Expr::LiteralInt(text))
            }
            TokenKind::Double(text) => {
                self.pos += 1;
                Ok(Expr::LiteralDouble(text))
            }
            TokenKind::Str(text) => {
                self.pos += 1;
                Ok(Expr::LiteralString(text))
            }
            TokenKind::True => {
                self.pos += 1;
                Ok(Expr::LiteralBool(true))
            }
            TokenKind::False => {
                self.pos += 1;
                Ok(Expr::LiteralBool(false))
            }
            TokenKind::Ident(name) => {
                self.pos += 1;
                Ok(Expr::Ident(name))
            }
            TokenKind::LParen => {
                self.pos += 1;
                let expr = self.parse_expr()?;
                self.consume(TokenKind::RParen, "Ожидается ')'")?;
                Ok(expr)
            }
            other => self.err_here(format!("Неожиданный токен '{}'", other)),
        }
    }
}
