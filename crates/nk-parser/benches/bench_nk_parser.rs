use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nk_core::Direction;
use nk_parser::{find_adjacent_href, parse};

fn result_page(legs: usize) -> String {
    let mut detail = String::from(r#"<div class="routeDetail">"#);
    for i in 0..legs {
        detail.push_str(&format!(
            "<div class=\"station\"><ul class=\"time\"><li>{:02}:{:02}</li></ul><dl><dt>駅{}</dt></dl></div>\
             <div class=\"access\"><ul class=\"info\"><li class=\"transport\"><span>[train]</span>路線{}</li></ul></div>\n",
            6 + i / 60,
            i % 60,
            i,
            i
        ));
    }
    detail.push_str("</div>");
    format!(
        "<html><body><ul class=\"summary\"><li class=\"transfer\">乗換：<span>{}回</span></li>\
         <li class=\"fare\">480円</li><li class=\"distance\">31.4km</li></ul>{}\
         <p class=\"next\"><a href=\"/search/result?n=1\">1本後</a></p></body></html>",
        legs.saturating_sub(1),
        detail
    )
}

fn bench_parse(c: &mut Criterion) {
    let small = result_page(3);
    let large = result_page(40);

    c.bench_function("parse_small_page_100", |b| {
        b.iter(|| {
            for _ in 0..100 {
                black_box(parse(&small).unwrap());
            }
        })
    });

    c.bench_function("parse_large_page_10", |b| {
        b.iter(|| {
            for _ in 0..10 {
                black_box(parse(&large).unwrap());
            }
        })
    });

    c.bench_function("adjacent_href_100", |b| {
        b.iter(|| {
            for _ in 0..100 {
                black_box(find_adjacent_href(&large, Direction::Next));
            }
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
