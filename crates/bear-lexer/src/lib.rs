//! BearLang lexer: converts source text into tokens.
//!
//! Blocks in BearLang are delimited by significant indentation, so besides
//! the ordinary tokens the lexer synthesises `Newline`, `Indent` and
//! `Dedent` in the Python convention. Scanning is byte-oriented: any byte
//! ≥ 128 counts as identifier material, which admits Cyrillic identifiers
//! and keywords without decoding codepoints.

use bear_syntax::error::{error_at, Result};
use bear_syntax::token::{Token, TokenKind};

/// Streaming byte scanner that produces tokens with positions.
///
/// Indentation state: one space weighs 1, one tab weighs 4. The indent
/// stack starts at `[0]`, is strictly increasing, and every level pushed is
/// closed by a matching `Dedent` before `Eof`.
pub struct Lexer {
    src: Vec<u8>,
    pos: usize,
    line: usize,
    col: usize,
    at_line_start: bool,
    indent_stack: Vec<usize>,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

fn is_ident_part(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.as_bytes().to_vec(),
            pos: 0,
            line: 1,
            col: 1,
            at_line_start: true,
            indent_stack: vec![0],
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
        self.col += 1;
    }

    fn current_indent(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    ///
    /// Fails on the first illegal character, malformed string literal or
    /// inconsistent dedent; no partial stream is returned.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while self.pos < self.src.len() {
            if self.at_line_start {
                // Measure leading indentation ahead of the cursor.
                let mut look = self.pos;
                let mut indent = 0usize;
                while let Some(b) = self.src.get(look).copied() {
                    match b {
                        b' ' => {
                            indent += 1;
                            look += 1;
                        }
                        b'\t' => {
                            indent += 4;
                            look += 1;
                        }
                        b'\r' => look += 1,
                        _ => break,
                    }
                }

                if look >= self.src.len() {
                    // Only indentation before EOF: nothing more to scan.
                    self.pos = look;
                    break;
                }

                let next = self.src[look];
                if next == b'\n' {
                    // Blank line: no indent processing.
                    self.pos = look;
                    self.col = 1;
                } else if next == b'/' && self.src.get(look + 1).copied() == Some(b'/') {
                    // Comment-only line: no indent processing either.
                    self.pos = look;
                    self.col = indent + 1;
                    self.skip_comment();
                    continue;
                } else {
                    self.handle_indentation(indent, &mut tokens)?;
                    self.pos = look;
                    self.col = indent + 1;
                    self.at_line_start = false;
                }
            }

            let b = match self.peek() {
                Some(b) => b,
                None => break,
            };

            match b {
                b' ' | b'\t' => self.bump(),
                b'\r' => self.pos += 1,
                b'\n' => {
                    tokens.push(Token {
                        kind: TokenKind::Newline,
                        line: self.line,
                        col: self.col,
                    });
                    self.pos += 1;
                    self.line += 1;
                    self.col = 1;
                    self.at_line_start = true;
                }
                b'/' if self.peek_at(1) == Some(b'/') => self.skip_comment(),
                b'"' => tokens.push(self.read_string()?),
                b'0'..=b'9' => tokens.push(self.read_number()),
                b if is_ident_start(b) => tokens.push(self.read_ident_or_keyword()),
                _ => tokens.push(self.read_operator()?),
            }
        }

        // Close every block still open at EOF.
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            tokens.push(Token {
                kind: TokenKind::Dedent,
                line: self.line,
                col: 1,
            });
        }
        tokens.push(Token {
            kind: TokenKind::Eof,
            line: self.line,
            col: self.col,
        });
        Ok(tokens)
    }

    fn handle_indentation(&mut self, indent: usize, tokens: &mut Vec<Token>) -> Result<()> {
        if indent > self.current_indent() {
            self.indent_stack.push(indent);
            tokens.push(Token {
                kind: TokenKind::Indent,
                line: self.line,
                col: 1,
            });
        } else {
            while indent < self.current_indent() {
                self.indent_stack.pop();
                tokens.push(Token {
                    kind: TokenKind::Dedent,
                    line: self.line,
                    col: 1,
                });
            }
            if indent != self.current_indent() {
                return error_at(
                    self.line,
                    1,
                    format!("Несогласованный отступ на строке {}", self.line),
                );
            }
        }
        Ok(())
    }

    fn skip_comment(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.bump();
        }
    }

    fn read_ident_or_keyword(&mut self) -> Token {
        let start = self.pos;
        let start_col = self.col;
        while let Some(b) = self.peek() {
            if is_ident_part(b) {
                self.bump();
            } else {
                break;
            }
        }
        // Identifier runs only stop at ASCII bytes, so the slice is always
        // valid UTF-8 when the input was.
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        let kind = match text.as_str() {
            "целое" => TokenKind::TInt,
            "дробное" => TokenKind::TDouble,
            "строка" => TokenKind::TString,
            "логика" => TokenKind::TBool,
            "если" => TokenKind::If,
            "иначе" => TokenKind::Else,
            "пока" => TokenKind::While,
            "для" => TokenKind::For,
            "ввод" => TokenKind::Input,
            "вывод" => TokenKind::Output,
            "и" => TokenKind::And,
            "или" => TokenKind::Or,
            "не" => TokenKind::Not,
            "от" => TokenKind::From,
            "до" => TokenKind::To,
            "правда" => TokenKind::True,
            "ложь" => TokenKind::False,
            _ => TokenKind::Ident(text),
        };
        Token {
            kind,
            line: self.line,
            col: start_col,
        }
    }

    fn read_number(&mut self) -> Token {
        let start = self.pos;
        let start_col = self.col;
        let mut seen_dot = false;
        while let Some(b) = self.peek() {
            if b.is_ascii_digit() {
                self.bump();
                continue;
            }
            if b == b'.' && !seen_dot {
                // A dot not followed by a digit stays outside the number.
                match self.peek_at(1) {
                    Some(n) if n.is_ascii_digit() => {
                        seen_dot = true;
                        self.bump();
                        continue;
                    }
                    _ => break,
                }
            }
            break;
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]).into_owned();
        let kind = if seen_dot {
            TokenKind::Double(text)
        } else {
            TokenKind::Int(text)
        };
        Token {
            kind,
            line: self.line,
            col: start_col,
        }
    }

    fn read_string(&mut self) -> Result<Token> {
        let start_col = self.col;
        self.bump(); // opening quote
        let mut value = Vec::new();
        while let Some(b) = self.peek() {
            match b {
                b'\n' => {
                    return error_at(
                        self.line,
                        start_col,
                        "Строковый литерал не может переноситься на новую строку",
                    );
                }
                b'"' => {
                    self.bump();
                    return Ok(Token {
                        kind: TokenKind::Str(String::from_utf8_lossy(&value).into_owned()),
                        line: self.line,
                        col: start_col,
                    });
                }
                b'\\' => {
                    self.bump();
                    let esc = match self.peek() {
                        Some(b'\\') => b'\\',
                        Some(b'"') => b'"',
                        Some(b'n') => b'\n',
                        Some(b't') => b'\t',
                        Some(_) => {
                            return error_at(
                                self.line,
                                self.col,
                                "Неизвестная escape-последовательность",
                            );
                        }
                        None => {
                            return error_at(
                                self.line,
                                self.col,
                                "Незавершённая escape-последовательность",
                            );
                        }
                    };
                    value.push(esc);
                    self.bump();
                }
                _ => {
                    value.push(b);
                    self.bump();
                }
            }
        }
        error_at(self.line, start_col, "Незакрытая строка")
    }

    fn read_operator(&mut self) -> Result<Token> {
        let line = self.line;
        let col = self.col;
        let single = |kind: TokenKind| Token { kind, line, col };
        let b = self.src[self.pos];
        let token = match b {
            b'+' => {
                self.bump();
                single(TokenKind::Plus)
            }
            b'-' => {
                self.bump();
                single(TokenKind::Minus)
            }
            b'*' => {
                self.bump();
                single(TokenKind::Star)
            }
            b'/' => {
                self.bump();
                single(TokenKind::Slash)
            }
            b'%' => {
                self.bump();
                single(TokenKind::Percent)
            }
            b'^' => {
                self.bump();
                single(TokenKind::Caret)
            }
            b'(' => {
                self.bump();
                single(TokenKind::LParen)
            }
            b')' => {
                self.bump();
                single(TokenKind::RParen)
            }
            b',' => {
                self.bump();
                single(TokenKind::Comma)
            }
            b'=' => {
                if self.peek_at(1) == Some(b'=') {
                    self.bump();
                    self.bump();
                    single(TokenKind::EqEq)
                } else {
                    self.bump();
                    single(TokenKind::Assign)
                }
            }
            b'<' => {
                if self.peek_at(1) == Some(b'=') {
                    self.bump();
                    self.bump();
                    single(TokenKind::LessEq)
                } else {
                    self.bump();
                    single(TokenKind::Less)
                }
            }
            b'>' => {
                if self.peek_at(1) == Some(b'=') {
                    self.bump();
                    self.bump();
                    single(TokenKind::GreaterEq)
                } else {
                    self.bump();
                    single(TokenKind::Greater)
                }
            }
            other => {
                return error_at(
                    line,
                    col,
                    format!("Неизвестный символ '{}' на строке {}:{}", other as char, line, col),
                );
            }
        };
        Ok(token)
    }
}
