//! BearLang → C++ code generation and the one-shot translation pipeline.

pub mod generator;
mod scope;

pub use generator::CodeGenerator;

use bear_lexer::Lexer;
use bear_parser::Parser;
use bear_syntax::error::Result;

/// Translate BearLang source text into a complete C++ translation unit.
///
/// Runs the full pipeline (lexer → parser → generator) and returns the
/// emitted C++ as a string. On failure the first error is returned and no
/// partial output is produced.
pub fn translate(source: &str) -> Result<String> {
    let mut lexer = Lexer::new(source);
    let tokens = lexer.tokenize()?;
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program()?;
    Ok(CodeGenerator::new().generate(&program))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bear_syntax::ast::*;

    fn program_of(statements: Vec<Stmt>) -> Program {
        Program { statements }
    }

    fn generate(statements: Vec<Stmt>) -> String {
        CodeGenerator::new().generate(&program_of(statements))
    }

    #[test]
    fn test_empty_program_frame() {
        let cpp = generate(vec![]);
        assert!(cpp.starts_with("#include <cmath>\n#include <iostream>\n#include <string>\n\n"));
        assert!(cpp.contains("int main() {\n"));
        assert!(cpp.contains("    std::ios_base::sync_with_stdio(false);\n"));
        assert!(cpp.ends_with("    return 0;\n}\n"));
    }

    #[test]
    fn test_var_decl_with_initializer() {
        let cpp = generate(vec![Stmt::VarDecl {
            ty: ValueType::Integer,
            name: "n".to_string(),
            init: Some(Expr::LiteralInt("3".to_string())),
        }]);
        assert!(cpp.contains("    int vr_0 = 3;\n"));
    }

    #[test]
    fn test_var_decl_without_initializer_value_initialises() {
        let cpp = generate(vec![Stmt::VarDecl {
            ty: ValueType::String,
            name: "s".to_string(),
            init: None,
        }]);
        assert!(cpp.contains("    std::string vr_0{};\n"));
    }

    #[test]
    fn test_type_mapping() {
        assert_eq!(ValueType::Integer.cpp_name(), "int");
        assert_eq!(ValueType::Double.cpp_name(), "double");
        assert_eq!(ValueType::String.cpp_name(), "std::string");
        assert_eq!(ValueType::Boolean.cpp_name(), "bool");
        assert_eq!(ValueType::Unknown.cpp_name(), "auto");
    }

    #[test]
    fn test_input_and_output() {
        let cpp = generate(vec![
            Stmt::VarDecl {
                ty: ValueType::Integer,
                name: "x".to_string(),
                init: None,
            },
            Stmt::Input {
                name: "x".to_string(),
            },
            Stmt::Output {
                expr: Expr::Ident("x".to_string()),
            },
        ]);
        assert!(cpp.contains("    std::cin >> vr_0;\n"));
        assert!(cpp.contains("    std::cout << vr_0 << std::endl;\n"));
    }

    #[test]
    fn test_free_references_pass_through() {
        let cpp = generate(vec![Stmt::Output {
            expr: Expr::Ident("загадка".to_string()),
        }]);
        assert!(cpp.contains("    std::cout << загадка << std::endl;\n"));
    }

    #[test]
    fn test_bool_literals() {
        let cpp = generate(vec![Stmt::Output {
            expr: Expr::LiteralBool(true),
        }]);
        assert!(cpp.contains("std::cout << true << std::endl;"));
    }

    #[test]
    fn test_string_literal_is_reescaped() {
        let cpp = generate(vec![Stmt::Output {
            expr: Expr::LiteralString("a\nb\t\"c\"\\d".to_string()),
        }]);
        assert!(cpp.contains("std::cout << \"a\\nb\\t\\\"c\\\"\\\\d\" << std::endl;"));
    }

    #[test]
    fn test_binary_expressions_are_parenthesised() {
        let cpp = generate(vec![Stmt::Output {
            expr: Expr::BinaryAdd(
                Box::new(Expr::LiteralInt("1".to_string())),
                Box::new(Expr::BinaryMul(
                    Box::new(Expr::LiteralInt("2".to_string())),
                    Box::new(Expr::LiteralInt("3".to_string())),
                )),
            ),
        }]);
        assert!(cpp.contains("(1 + (2 * 3))"));
    }

    #[test]
    fn test_unary_operands_are_parenthesised() {
        let cpp = generate(vec![Stmt::Output {
            expr: Expr::UnaryNeg(Box::new(Expr::Ident("x".to_string()))),
        }]);
        assert!(cpp.contains("-(x)"));
    }

    #[test]
    fn test_power_maps_to_std_pow() {
        let cpp = generate(vec![Stmt::Output {
            expr: Expr::BinaryPow(
                Box::new(Expr::LiteralInt("2".to_string())),
                Box::new(Expr::BinaryPow(
                    Box::new(Expr::LiteralInt("3".to_string())),
                    Box::new(Expr::LiteralInt("2".to_string())),
                )),
            ),
        }]);
        assert!(cpp.contains("std::pow(2, std::pow(3, 2))"));
    }

    #[test]
    fn test_if_chain_keeps_braces() {
        let branch = |n: &str| IfBranch {
            cond: Expr::Eq(
                Box::new(Expr::Ident("x".to_string())),
                Box::new(Expr::LiteralInt(n.to_string())),
            ),
            body: vec![Stmt::Output {
                expr: Expr::LiteralInt(n.to_string()),
            }],
        };
        let cpp = generate(vec![Stmt::If {
            branches: vec![branch("0"), branch("1")],
            else_body: Some(vec![Stmt::Output {
                expr: Expr::LiteralInt("2".to_string()),
            }]),
        }]);
        assert!(cpp.contains("    if ((x == 0)) {\n"));
        assert!(cpp.contains("    else if ((x == 1)) {\n"));
        assert!(cpp.contains("    else {\n"));
        assert_eq!(cpp.matches("    }\n").count(), 3);
    }

    #[test]
    fn test_if_without_else_emits_no_else() {
        let cpp = generate(vec![Stmt::If {
            branches: vec![IfBranch {
                cond: Expr::LiteralBool(true),
                body: vec![Stmt::Output {
                    expr: Expr::LiteralInt("1".to_string()),
                }],
            }],
            else_body: None,
        }]);
        assert!(!cpp.contains("else"));
    }

    #[test]
    fn test_for_range_declares_counter_in_inner_scope() {
        let cpp = generate(vec![
            Stmt::VarDecl {
                ty: ValueType::Integer,
                name: "n".to_string(),
                init: Some(Expr::LiteralInt("3".to_string())),
            },
            Stmt::ForRange {
                ty: ValueType::Integer,
                var: "i".to_string(),
                from: Expr::LiteralInt("1".to_string()),
                to: Expr::Ident("n".to_string()),
                body: vec![Stmt::Output {
                    expr: Expr::Ident("i".to_string()),
                }],
            },
            // After the loop the counter name no longer resolves.
            Stmt::Output {
                expr: Expr::Ident("i".to_string()),
            },
        ]);
        assert!(cpp.contains("    for (int vr_1 = 1; vr_1 <= vr_0; ++vr_1) {\n"));
        assert!(cpp.contains("        std::cout << vr_1 << std::endl;\n"));
        assert!(cpp.contains("    std::cout << i << std::endl;\n"));
    }

    #[test]
    fn test_while_condition_uses_enclosing_scope() {
        let cpp = generate(vec![
            Stmt::VarDecl {
                ty: ValueType::Integer,
                name: "x".to_string(),
                init: Some(Expr::LiteralInt("1".to_string())),
            },
            Stmt::While {
                cond: Expr::Lt(
                    Box::new(Expr::Ident("x".to_string())),
                    Box::new(Expr::LiteralInt("3".to_string())),
                ),
                body: vec![
                    Stmt::VarDecl {
                        ty: ValueType::Integer,
                        name: "x".to_string(),
                        init: Some(Expr::LiteralInt("10".to_string())),
                    },
                    Stmt::Assign {
                        name: "x".to_string(),
                        expr: Expr::BinaryAdd(
                            Box::new(Expr::Ident("x".to_string())),
                            Box::new(Expr::LiteralInt("1".to_string())),
                        ),
                    },
                ],
            },
        ]);
        // Condition sees the outer x; the shadowing declaration gets a
        // fresh name and later statements in the block resolve to it.
        assert!(cpp.contains("    while ((vr_0 < 3)) {\n"));
        assert!(cpp.contains("        int vr_1 = 10;\n"));
        assert!(cpp.contains("        vr_1 = (vr_1 + 1);\n"));
    }

    #[test]
    fn test_sibling_blocks_are_isolated() {
        let block = |lit: &str| {
            vec![Stmt::VarDecl {
                ty: ValueType::Integer,
                name: "t".to_string(),
                init: Some(Expr::LiteralInt(lit.to_string())),
            }]
        };
        let cpp = generate(vec![
            Stmt::If {
                branches: vec![IfBranch {
                    cond: Expr::LiteralBool(true),
                    body: block("1"),
                }],
                else_body: None,
            },
            Stmt::If {
                branches: vec![IfBranch {
                    cond: Expr::LiteralBool(true),
                    body: block("2"),
                }],
                else_body: None,
            },
            Stmt::Output {
                expr: Expr::Ident("t".to_string()),
            },
        ]);
        assert!(cpp.contains("int vr_0 = 1;"));
        assert!(cpp.contains("int vr_1 = 2;"));
        // The declarations never leaked into the outer scope.
        assert!(cpp.contains("std::cout << t << std::endl;"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let statements = vec![Stmt::VarDecl {
            ty: ValueType::Double,
            name: "пи".to_string(),
            init: Some(Expr::LiteralDouble("3.14".to_string())),
        }];
        let first = CodeGenerator::new().generate(&program_of(statements.clone()));
        let second = CodeGenerator::new().generate(&program_of(statements));
        assert_eq!(first, second);
    }
}
