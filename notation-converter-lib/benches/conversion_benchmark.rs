use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use notation_converter::notation::convert;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let expressions = [
        "x^2".to_string(),
        "a-b-c-d-e-f".to_string(),
        "(a+3)+var^(b+282*c)".to_string(),
        "((x^2+z)^(y*z)+(a+b+c^x)-(8*x^2))/(q*(r-s)^t^u)".to_string(),
    ];
    for expression in expressions {
        group.throughput(Throughput::Elements(expression.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(&expression),
            &expression,
            |bencher, expression| {
                bencher.iter(|| convert(expression));
            },
        );
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
