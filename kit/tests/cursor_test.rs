mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{Calc, lex};
use tinypeg::{Cursor, TokenSource};

#[test]
fn test_reset_reproduces_tokens_without_new_pulls() {
    let pulls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&pulls);
    let mut lexer = lex("a + b ; c");
    let mut cursor = Cursor::<Calc>::new(move || {
        counter.set(counter.get() + 1);
        lexer.next_token()
    });

    let mut seen = Vec::new();
    let mut marks = Vec::new();
    for _ in 0..5 {
        marks.push(cursor.checkpoint());
        seen.push(cursor.advance());
    }
    let pulled = pulls.get();

    for (mark, token) in marks.iter().zip(&seen).rev() {
        cursor.reset(*mark);
        assert_eq!(cursor.peek(), *token);
        assert_eq!(cursor.advance(), *token);
    }
    assert_eq!(pulls.get(), pulled);
    assert_eq!(cursor.buffered(), 5);
}

#[test]
fn test_end_of_input_repeats() {
    let mut cursor = Cursor::<Calc>::new(lex("x"));
    let start = cursor.checkpoint();
    assert_eq!(cursor.advance().text, "x");
    let eof = cursor.advance();
    assert!(eof.is_eof());
    assert_eq!(eof.span.start, 1);
    assert_eq!(cursor.advance(), eof);
    assert_eq!(cursor.distance(start, cursor.checkpoint()), 3);
}
