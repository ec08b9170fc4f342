use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wp_playlist_dl::filename::{build_file_name, limit_file_name, DEFAULT_NAME_LIMIT};
use wp_playlist_dl::html_text;
use wp_playlist_dl::playlist::parse_playlist;

/// Benchmark caption cleanup and name assembly
fn bench_file_names(c: &mut Criterion) {
    let long_caption = "Очень длинное название трека ".repeat(20);

    c.bench_function("limit_long_cyrillic_name", |b| {
        b.iter(|| black_box(limit_file_name(black_box(&long_caption), DEFAULT_NAME_LIMIT)))
    });

    c.bench_function("html_text_caption", |b| {
        b.iter(|| {
            black_box(html_text(black_box(
                "<em>Live</em> at the <strong>Hall</strong> &amp; friends",
            )))
        })
    });

    c.bench_function("build_file_name", |b| {
        b.iter(|| {
            black_box(build_file_name(
                black_box(42),
                3,
                &long_caption,
                ".mp3",
                DEFAULT_NAME_LIMIT,
            ))
        })
    });
}

/// Benchmark playlist extraction from a page
fn bench_parse_playlist(c: &mut Criterion) {
    let tracks: Vec<String> = (1..=100)
        .map(|i| {
            format!(r#"{{"src":"https://example.com/{i}.mp3","title":"Track {i}","caption":""}}"#)
        })
        .collect();
    let page = format!(
        r#"<html><body>{}<script type="application/json" class="wp-playlist-script">{{"tracks":[{}]}}</script></body></html>"#,
        "<p>filler paragraph</p>".repeat(500),
        tracks.join(",")
    );

    c.bench_function("parse_playlist_100_tracks", |b| {
        b.iter(|| black_box(parse_playlist(black_box(&page))))
    });
}

criterion_group!(benches, bench_file_names, bench_parse_playlist);
criterion_main!(benches);
