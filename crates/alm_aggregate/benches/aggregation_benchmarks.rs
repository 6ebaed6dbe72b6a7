//! Criterion benchmarks for EVE discounting and bucketing across portfolio
//! sizes representative of a bank book.

use alm_aggregate::{eve_bucketed, eve_exact};
use alm_core::{
    Cashflow, CurvePoint, Date, DayCountConvention, ForwardCurveSet, RateType, Side, SourceContractType,
    DEFAULT_EVE_BUCKETS, DEFAULT_OPEN_ENDED_YEARS,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn curves(analysis_date: Date) -> ForwardCurveSet {
    let points = vec![
        (
            "Discount".to_string(),
            CurvePoint {
                year_frac: 1.0,
                zero_rate: 0.02,
                tenor_label: "1Y".into(),
                tenor_date: analysis_date.add_days(365),
            },
        ),
        (
            "Discount".to_string(),
            CurvePoint {
                year_frac: 20.0,
                zero_rate: 0.03,
                tenor_label: "20Y".into(),
                tenor_date: analysis_date.add_days(20 * 365),
            },
        ),
    ];
    ForwardCurveSet::from_points(analysis_date, DayCountConvention::Actual365, points).unwrap()
}

fn synthetic_book(n: usize, analysis_date: Date) -> Vec<Cashflow> {
    (0..n)
        .map(|i| {
            let side = if i % 2 == 0 { Side::Asset } else { Side::Liability };
            let years_out = 1 + (i % 20) as i64;
            Cashflow {
                contract_id: format!("C{i}"),
                source_contract_type: SourceContractType::FixedBullet,
                rate_type: RateType::Fixed,
                side,
                flow_date: analysis_date.add_days(years_out * 365),
                interest_amount: 5_000.0,
                principal_amount: 100_000.0,
                index_name: None,
            }
        })
        .collect()
}

fn bench_eve_exact_by_book_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("eve_exact");
    let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
    let curve_set = curves(analysis_date);

    for size in [100, 1_000, 10_000] {
        let flows = synthetic_book(size, analysis_date);
        group.bench_with_input(BenchmarkId::from_parameter(size), &flows, |b, flows| {
            b.iter(|| eve_exact(black_box(flows), &curve_set, analysis_date, "Discount").unwrap());
        });
    }
    group.finish();
}

fn bench_eve_bucketed_10k_flows(c: &mut Criterion) {
    let analysis_date = Date::from_ymd(2026, 1, 1).unwrap();
    let curve_set = curves(analysis_date);
    let flows = synthetic_book(10_000, analysis_date);

    c.bench_function("eve_bucketed_10k_flows", |b| {
        b.iter(|| {
            eve_bucketed(
                black_box(&flows),
                &curve_set,
                analysis_date,
                "Discount",
                DEFAULT_EVE_BUCKETS,
                DEFAULT_OPEN_ENDED_YEARS,
                "base",
            )
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_eve_exact_by_book_size, bench_eve_bucketed_10k_flows);
criterion_main!(benches);
