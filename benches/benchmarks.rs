use criterion::{black_box, criterion_group, criterion_main, Criterion};
use purchasing_power::prelude::*;
use purchasing_power::report::Report;

fn mk(s: &str) -> MonthKey {
    s.parse().unwrap()
}

fn benchmark_series(c: &mut Criterion) {
    let rates = reference_rates();
    let inflation = reference_inflation();
    let start = mk("2022-01");
    let end = mk("2025-12");

    c.bench_function("series_48_months", |b| {
        b.iter(|| {
            let series = compute_series(
                black_box(1000.0),
                CurrencyBasis::Usd,
                start,
                end,
                &rates,
                &inflation,
            )
            .unwrap();
            aggregate(&series).unwrap()
        });
    });
}

fn benchmark_long_range(c: &mut Criterion) {
    let rates = reference_rates();
    let inflation = reference_inflation();
    let start = mk("1990-01");
    let end = mk("2089-12");

    c.bench_function("series_1200_months", |b| {
        b.iter(|| {
            compute_series(
                black_box(7_000_000.0),
                CurrencyBasis::Pyg,
                start,
                end,
                &rates,
                &inflation,
            )
            .unwrap()
        });
    });
}

fn benchmark_report_csv(c: &mut Criterion) {
    let request = SeriesRequest::new(1000.0, CurrencyBasis::Usd, mk("2022-01"), mk("2025-12"));
    let snapshots = request
        .compute(&reference_rates(), &reference_inflation())
        .unwrap();
    let kpis = aggregate(&snapshots).unwrap();
    let report = Report::new(request, Provenance::Static, kpis, snapshots);

    c.bench_function("report_csv_48_months", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(8 * 1024);
            report.write_csv(&mut buf).unwrap();
            black_box(buf)
        });
    });
}

criterion_group!(
    benches,
    benchmark_series,
    benchmark_long_range,
    benchmark_report_csv
);
criterion_main!(benches);
