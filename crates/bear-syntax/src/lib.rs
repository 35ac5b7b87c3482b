//! BearLang syntax definitions and abstract syntax tree.
//!
//! This crate provides the foundational types for the BearLang → C++
//! translator: token definitions, AST nodes and the shared error type.
//! Every other crate in the workspace depends on it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           Code generator            │  <- Produces C++ text
//! ├─────────────────────────────────────┤
//! │              Parser                 │  <- Produces AST
//! ├─────────────────────────────────────┤
//! │               Lexer                 │  <- Produces Tokens
//! ├─────────────────────────────────────┤
//! │           Source Code               │  <- Raw UTF-8 text
//! └─────────────────────────────────────┘
//! ```
//!
//! Data flows strictly forward; no stage mutates a prior stage's output.
//! BearLang blocks are delimited by significant indentation, so the token
//! stream contains synthesised [`token::TokenKind::Newline`],
//! [`token::TokenKind::Indent`] and [`token::TokenKind::Dedent`] tokens in
//! the Python convention, always balanced and terminated by
//! [`token::TokenKind::Eof`].
//!
//! # Examples
//!
//! ```rust
//! use bear_syntax::{Expr, Stmt, Token, TokenKind, ValueType};
//!
//! let token = Token {
//!     kind: TokenKind::Ident("счётчик".to_string()),
//!     line: 1,
//!     col: 1,
//! };
//! assert_eq!(token.kind.to_string(), "счётчик");
//!
//! let decl = Stmt::VarDecl {
//!     ty: ValueType::Integer,
//!     name: "x".to_string(),
//!     init: Some(Expr::LiteralInt("42".to_string())),
//! };
//! ```

/// Token definitions and lexical element kinds.
pub mod token;

/// Abstract syntax tree node definitions.
pub mod ast;

/// Error type, `Result` alias and propagation helpers.
pub mod error;

// Re-export all public items for convenience
pub use ast::*;
pub use error::*;
pub use token::*;
