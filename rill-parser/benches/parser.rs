use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rill_parser::parser::Parser;

fn parse(source: &str) {
    let source = source.into();
    let _ast = Parser::new(&source).parse();
    assert!(source.has_no_errors());
}

fn parse_script(source: &str) {
    let source = source.into();
    let _trees = Parser::new(&source).parse_script();
    assert!(source.has_no_errors());
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    // Stays below the nesting limit: each `+` nests the left operand one level deeper.
    let mut source = "1".to_string();
    for _i in 0..100 {
        source.push_str(" + 1");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| parse(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = String::new();
    for _i in 0..200 {
        source.push_str("1 == 2 < 3 + 5 * 5 << 1 && true\n");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| {
        b.iter(|| parse_script(&source))
    });
}

fn nested_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested-blocks");

    let mut source = String::new();
    for i in 0..30 {
        let name = format!("x{}", "v".repeat(i % 5 + 1));
        source.push_str(&format!("{{ {} := {} if {} > 0 {{ ", name, i, name));
    }
    for _i in 0..30 {
        source.push_str("} }");
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("nested-blocks", |b| b.iter(|| parse(&source)));
}

criterion_group!(benches, long_expr, stress_precedence, nested_blocks);
criterion_main!(benches);
