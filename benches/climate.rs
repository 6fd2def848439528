use chrono::NaiveDate;
use climate_trends::{
    aggregate, fit, forecast, ClimateDataset, GroupBy, RawObservation, ReductionSpec, TrendMetric,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn thirty_years() -> ClimateDataset {
    let start = NaiveDate::from_ymd_opt(1995, 1, 1).unwrap();
    let observations = start
        .iter_days()
        .take(30 * 365)
        .enumerate()
        .map(|(i, day)| {
            let t = i as f64;
            let seasonal = (t / 365.25 * std::f64::consts::TAU).sin() * 8.0;
            let max = 10.0 + seasonal + t * 0.0001;
            let rain = ((t * 0.37).sin() * 12.0).max(0.0);
            RawObservation::new(day, Some(max), Some(max - 6.0), Some(rain))
        })
        .collect();
    ClimateDataset::from_observations(observations).unwrap()
}

fn bench_climate(c: &mut Criterion) {
    let dataset = thirty_years();
    let annual_spec = ReductionSpec::annual_summary();
    let monthly_spec = ReductionSpec::monthly_temperature();

    c.bench_function("aggregate_by_year", |b| {
        b.iter(|| aggregate(black_box(dataset.records()), GroupBy::Year, &annual_spec))
    });
    c.bench_function("aggregate_by_month", |b| {
        b.iter(|| aggregate(black_box(dataset.records()), GroupBy::YearMonth, &monthly_spec))
    });

    let annual = aggregate(dataset.records(), GroupBy::Year, &ReductionSpec::annual_trend()).unwrap();
    c.bench_function("fit_and_forecast", |b| {
        b.iter(|| {
            let model = fit(black_box(&annual), TrendMetric::Temperature).unwrap();
            forecast(&model, 20, 95)
        })
    });
}

criterion_group!(benches, bench_climate);
criterion_main!(benches);
