//! The Tiny grammar.
//!
//! ```text
//! root          -> (vars | func)* EOF
//! func          -> type ['main'] identifier '(' formal_params ')' block
//! vars          -> type identifier (',' identifier)* ';'
//! type          -> 'int' | 'real'
//! formal_params -> [formal_param (',' formal_param)*]
//! formal_param  -> type identifier
//! block         -> 'BEGIN' statement* 'END'
//! statement     -> block | vars | expression ';' | return | if
//! if            -> 'if' '(' expression ')' statement ['else' statement]
//! return        -> 'return' expression ';'
//! actual_params -> [expression (',' expression)*]
//! unit0         -> '(' expression ')' | call | number | identifier | string | character
//! call          -> identifier '(' actual_params ')'
//! unit2         -> unit0 (('*' | '/') unit0)*
//! unit3         -> unit2 (('+' | '-') unit2)*
//! unit4         -> unit3 (('==' | '!=') unit3)*
//! unit5         -> unit4 (':=' unit4)*
//! expression    -> unit5
//! ```
//!
//! `vars` is tried before `func`: both consume the same prefix of `int x`,
//! and on a tie the first alternative's error is reported.

use tinypeg::{Error, Grammar, GrammarBuilder, Node, choice, seq};

use crate::predicates::{is_character, is_identifier, is_number, is_string};
use crate::{Code, Kind, Tiny};

/// Punctuation that must be present and is dropped from the tree.
fn expect(code: Code, literal: &'static str) -> Node<Tiny> {
    Node::eliminate(Node::force_error(code, Node::token(literal)))
}

fn keyword(word: &'static str) -> Node<Tiny> {
    Node::token_ignore_case(word).kind(Kind::Keyword)
}

/// Left-associative operator level over `operand`.
fn binary(operators: &[&'static str], operand: &'static str) -> Node<Tiny> {
    let operator = Node::choice(operators.iter().map(|op| Node::token(*op))).kind(Kind::Operator);
    Node::chain(operator, Node::rule(operand)).kind(Kind::Binary)
}

pub(crate) fn build() -> Result<Grammar<Tiny>, Error> {
    GrammarBuilder::new()
        .rule(
            "root",
            Node::kleene_until(Node::eof(), choice![Node::rule("vars"), Node::rule("func")])
                .kind(Kind::Root),
        )
        .rule(
            "func",
            seq![
                Node::rule("type"),
                Node::with_kind(Kind::Main, Node::optional(Node::token_ignore_case("main"))),
                Node::rule("identifier"),
                expect(Code::ExpectLeftParen, "("),
                Node::rule("formal_params"),
                expect(Code::ExpectRightParen, ")"),
                Node::rule("block"),
            ]
            .kind(Kind::Func),
        )
        .rule(
            "vars",
            seq![
                Node::rule("type"),
                Node::separated1(Node::token(","), Node::rule("identifier")).kind(Kind::Names),
                expect(Code::ExpectSemicolon, ";"),
            ]
            .kind(Kind::Decl),
        )
        .rule(
            "type",
            Node::force_error(
                Code::ExpectType,
                choice![Node::token_ignore_case("int"), Node::token_ignore_case("real")]
                    .kind(Kind::Type),
            ),
        )
        .rule(
            "identifier",
            Node::force_error(
                Code::ExpectIdentifier,
                Node::predicate("identifier", is_identifier).kind(Kind::Identifier),
            ),
        )
        .rule(
            "formal_params",
            Node::separated(Node::token(","), Node::rule("formal_param")).kind(Kind::FormalParams),
        )
        .rule(
            "formal_param",
            seq![Node::rule("type"), Node::rule("identifier")].kind(Kind::FormalParam),
        )
        .rule(
            "block",
            seq![
                expect(Code::ExpectBegin, "BEGIN"),
                Node::kleene_until(Node::token("END"), Node::rule("statement")),
                expect(Code::ExpectEnd, "END"),
            ]
            .kind(Kind::Block),
        )
        .rule(
            "statement",
            Node::force_error(
                Code::ExpectStatement,
                choice![
                    Node::rule("block"),
                    Node::rule("vars"),
                    seq![Node::rule("expression"), expect(Code::ExpectSemicolon, ";")],
                    Node::rule("return"),
                    Node::rule("if"),
                ],
            ),
        )
        .rule(
            "if",
            seq![
                keyword("if"),
                expect(Code::ExpectLeftParen, "("),
                Node::rule("expression"),
                expect(Code::ExpectRightParen, ")"),
                Node::rule("statement"),
                Node::optional(seq![
                    Node::eliminate(Node::token_ignore_case("else")),
                    Node::rule("statement"),
                ])
                .kind(Kind::Else),
            ]
            .kind(Kind::If),
        )
        .rule(
            "return",
            seq![
                keyword("return"),
                Node::rule("expression"),
                expect(Code::ExpectSemicolon, ";"),
            ]
            .kind(Kind::Return),
        )
        .rule(
            "actual_params",
            Node::separated(
                Node::force_error(Code::ExpectComma, Node::token(",")),
                Node::rule("expression"),
            )
            .kind(Kind::ActualParams),
        )
        .rule(
            "unit0",
            Node::force_error(
                Code::ExpectExpression,
                choice![
                    seq![
                        Node::eliminate(Node::token("(")),
                        Node::rule("expression"),
                        expect(Code::ExpectRightParen, ")"),
                    ],
                    Node::rule("call"),
                    Node::rule("number"),
                    Node::rule("identifier"),
                    Node::rule("string"),
                    Node::rule("character"),
                ],
            ),
        )
        .rule(
            "call",
            seq![
                Node::rule("identifier"),
                expect(Code::MayFuncCall, "("),
                Node::rule("actual_params"),
                expect(Code::ExpectRightParen, ")"),
            ]
            .kind(Kind::Call),
        )
        .rule("number", Node::predicate("number", is_number).kind(Kind::Number))
        .rule("string", Node::predicate("string", is_string).kind(Kind::String))
        .rule("character", Node::predicate("character", is_character).kind(Kind::Char))
        .rule("unit2", binary(&["*", "/"], "unit0"))
        .rule("unit3", binary(&["+", "-"], "unit2"))
        .rule("unit4", binary(&["==", "!="], "unit3"))
        .rule(
            "unit5",
            Node::chain(Node::token(":=").kind(Kind::Operator), Node::rule("unit4")).kind(Kind::Assign),
        )
        .rule("expression", Node::rule("unit5"))
        .start("root")
        .build()
}
