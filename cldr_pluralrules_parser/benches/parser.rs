use cldr_pluralrules_parser::parse;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_parse(c: &mut Criterion) {
    let rules = [
        "i = 1 and v = 0",
        "v = 0 and i % 10 = 1 and i % 100 != 11",
        "v = 0 and i % 10 = 2..4 and i % 100 != 12..14",
        "n = 0 @integer 0 @decimal 0.0~0.04",
    ];
    c.bench_function("parse_condition", |b| {
        b.iter(|| {
            for rule in rules {
                black_box(parse(black_box(rule)).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
