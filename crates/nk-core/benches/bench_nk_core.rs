use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chrono::TimeZone;
use nk_core::{build_query, jst, QueryInput};

fn bench_build_query(c: &mut Criterion) {
    let now = jst().with_ymd_and_hms(2018, 6, 1, 10, 0, 0).unwrap();
    let relative = QueryInput {
        departure_station: "渋谷".into(),
        arrival_station: "東京".into(),
        duration: Some("PT2H30M".into()),
        mode: Some("出発".into()),
        ..Default::default()
    };
    let explicit = QueryInput {
        departure_station: "新宿".into(),
        arrival_station: "横浜".into(),
        date: Some("2018-06-01".into()),
        time: Some("23:59".into()),
        mode: Some("到着".into()),
        ..Default::default()
    };

    c.bench_function("build_query_1000_mixed", |b| {
        b.iter(|| {
            for _ in 0..500 {
                black_box(build_query(&relative, 2, now).unwrap());
                black_box(build_query(&explicit, 2, now).unwrap());
            }
        })
    });
}

criterion_group!(benches, bench_build_query);
criterion_main!(benches);
