//! A small expression language shared by the integration tests.
#![allow(dead_code)]

use std::fmt;

use tinypeg::{Grammar, GrammarBuilder, Language, Node, Span, Token, TokenSource, choice, seq};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Program,
    Num,
    Name,
    Op,
    Sum,
    Paren,
    Call,
    Args,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    ExpectTerm,
    ExpectClose,
    ExpectSemi,
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Code::ExpectTerm => "expected a number, name or '('",
            Code::ExpectClose => "expected ')'",
            Code::ExpectSemi => "expected ';'",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character")]
    Unexpected,
}

impl Language for Calc {
    type Kind = Kind;
    type Code = Code;
    type LexError = LexError;
}

/// Splits input into numbers, names and single-character punctuation.
pub struct Lexer<'s> {
    src: &'s str,
    offset: usize,
    line: u32,
    column: u32,
}

pub fn lex(src: &str) -> Lexer<'_> {
    Lexer {
        src,
        offset: 0,
        line: 1,
        column: 1,
    }
}

impl<'s> Lexer<'s> {
    fn bump(&mut self, c: char) {
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl<'s> TokenSource<'s, Calc> for Lexer<'s> {
    fn next_token(&mut self) -> Token<'s, Calc> {
        while let Some(c) = self.src[self.offset..].chars().next() {
            if !c.is_whitespace() {
                break;
            }
            self.bump(c);
        }

        let (start, line, column) = (self.offset, self.line, self.column);
        let Some(first) = self.src[start..].chars().next() else {
            return Token::eof(start, line, column);
        };
        self.bump(first);
        let word = |c: char| c.is_ascii_alphanumeric() || c == '_';
        if word(first) {
            while let Some(c) = self.src[self.offset..].chars().next().filter(|c| word(*c)) {
                self.bump(c);
            }
        }

        let text = &self.src[start..self.offset];
        let span = Span::new(start, self.offset);
        if word(first) || "+-*/(),;".contains(first) {
            Token::new(text, span, line, column)
        } else {
            Token::error(text, span, line, column, LexError::Unexpected)
        }
    }
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_name(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
}

/// ```text
/// program -> stmt* until EOF
/// stmt    -> expr ';'
/// expr    -> term (('+' | '-') term)*
/// term    -> paren | call | num | name
/// paren   -> '(' expr ')'!
/// call    -> name '(' expr (',' expr)* ')'
/// ```
pub fn grammar() -> Grammar<Calc> {
    GrammarBuilder::new()
        .rule(
            "program",
            Node::kleene_until(Node::eof(), Node::rule("stmt")).kind(Kind::Program),
        )
        .rule(
            "stmt",
            seq![
                Node::rule("expr"),
                Node::eliminate(Node::force_error(Code::ExpectSemi, Node::token(";"))),
            ],
        )
        .rule(
            "expr",
            Node::chain(
                choice![Node::token("+"), Node::token("-")].kind(Kind::Op),
                Node::rule("term"),
            )
            .kind(Kind::Sum),
        )
        .rule(
            "term",
            Node::force_error(
                Code::ExpectTerm,
                choice![
                    Node::rule("paren"),
                    Node::rule("call"),
                    Node::rule("num"),
                    Node::rule("name"),
                ],
            ),
        )
        .rule(
            "paren",
            seq![
                Node::eliminate(Node::token("(")),
                Node::rule("expr"),
                Node::eliminate(Node::fatal(Code::ExpectClose, Node::token(")"))),
            ]
            .kind(Kind::Paren),
        )
        .rule(
            "call",
            seq![
                Node::rule("name"),
                Node::eliminate(Node::token("(")),
                Node::separated(Node::token(","), Node::rule("expr")).kind(Kind::Args),
                Node::eliminate(Node::force_error(Code::ExpectClose, Node::token(")"))),
            ]
            .kind(Kind::Call),
        )
        .rule("num", Node::predicate("number", is_number).kind(Kind::Num))
        .rule("name", Node::predicate("name", is_name).kind(Kind::Name))
        .start("program")
        .build()
        .unwrap()
}
