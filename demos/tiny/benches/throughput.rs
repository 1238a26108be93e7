use divan::{Bencher, black_box};
use tiny_lang::{TinyLexer, parse};

fn main() {
    divan::main();
}

const SAMPLE_ITEMS: &[&str] = &[
    "int total, count;\n",
    "real main scale(real x) BEGIN return x * 2.5; END\n",
    "int f(int a, int b) BEGIN if (a == b) return 0; else return a - b; END\n",
    "int g() BEGIN int t; t := f(1, 0x1F) + 017; /* comment */ return t; END\n",
];

/// A program made of `count` top-level items.
fn generate_program(count: usize) -> String {
    let mut result = String::with_capacity(count * 60);
    for i in 0..count {
        result.push_str(SAMPLE_ITEMS[i % SAMPLE_ITEMS.len()]);
    }
    result
}

#[divan::bench(args = [10, 100, 1000, 10_000])]
fn lex(bencher: Bencher, n: usize) {
    let input = generate_program(n);

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| black_box(TinyLexer::new(&input).count()));
}

#[divan::bench(args = [10, 100, 1000, 10_000])]
fn parse_program(bencher: Bencher, n: usize) {
    let input = generate_program(n);
    tiny_lang::grammar().unwrap();

    bencher
        .counter(divan::counter::BytesCount::new(input.len()))
        .bench(|| black_box(parse(&input).unwrap().ast().len()));
}
