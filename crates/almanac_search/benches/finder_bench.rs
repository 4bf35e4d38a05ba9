use std::f64::consts::PI;

use almanac_search::{
    CriticalConfig, DiscreteConfig, RootConfig, StateFunction, find_critical_points,
    find_discrete, find_roots, time_function,
};
use almanac_time::TimePoint;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

const START: TimePoint = TimePoint::from_jd(2_451_545.0);
const END: TimePoint = TimePoint::from_jd(2_451_545.0 + 365.25);

fn lunar_like(t: TimePoint) -> f64 {
    let d = t.days_since_j2000();
    (2.0 * PI * d / 27.55).sin() + 0.1 * (2.0 * PI * d / 31.8).cos()
}

fn root_bench(c: &mut Criterion) {
    let f = time_function(27.55, lunar_like);
    let config = RootConfig::default();

    let mut group = c.benchmark_group("find_roots");
    group.sample_size(50);
    group.bench_function("one_year", |b| {
        b.iter(|| find_roots(black_box(START), black_box(END), &f, &config).expect("valid"))
    });
    group.finish();
}

fn critical_bench(c: &mut Criterion) {
    let f = time_function(27.55, lunar_like);
    let config = CriticalConfig::with_flatness(1e-2);

    let mut group = c.benchmark_group("find_critical_points");
    group.sample_size(50);
    group.bench_function("one_year", |b| {
        b.iter(|| {
            find_critical_points(black_box(START), black_box(END), &f, &config).expect("valid")
        })
    });
    group.finish();
}

fn discrete_bench(c: &mut Criterion) {
    let f = StateFunction::new(27.55, |t: TimePoint| Ok(i64::from(lunar_like(t) > 0.0)));
    let config = DiscreteConfig::default();

    let mut group = c.benchmark_group("find_discrete");
    group.sample_size(50);
    group.bench_function("one_year", |b| {
        b.iter(|| find_discrete(black_box(START), black_box(END), &f, &config).expect("valid"))
    });
    group.finish();
}

criterion_group!(benches, root_bench, critical_bench, discrete_bench);
criterion_main!(benches);
