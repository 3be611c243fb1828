use criterion::{black_box, criterion_group, criterion_main, Criterion};
use indexmap::IndexMap;
use intl_pluralrules::category::PluralRuleType;
use intl_pluralrules::operands::PluralOperands;
use intl_pluralrules::ruleset::PluralRuleSet;

fn bench_select(c: &mut Criterion) {
    let mut raw = IndexMap::new();
    raw.insert(
        "one".to_string(),
        "v = 0 and i % 10 = 1 and i % 100 != 11".to_string(),
    );
    raw.insert(
        "few".to_string(),
        "v = 0 and i % 10 = 2..4 and i % 100 != 12..14".to_string(),
    );
    raw.insert(
        "many".to_string(),
        "v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14"
            .to_string(),
    );
    let set = PluralRuleSet::compile(PluralRuleType::Cardinal, &raw).unwrap();

    c.bench_function("select_russian_cardinal", |b| {
        b.iter(|| {
            for n in 0..200i64 {
                black_box(set.select(&PluralOperands::from_integer(black_box(n))));
            }
        })
    });
}

criterion_group!(benches, bench_select);
criterion_main!(benches);
