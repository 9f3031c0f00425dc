//! Criterion benchmarks for videotex document building.
//!
//! A service renders one page per request, so building a full screen of
//! text has to stay well below the network round trip.
//!
//! Run with:
//! ```bash
//! cargo bench --package videotex --bench builder_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use videotex::{build_videotex, CharsetTable, Color, VideotexBuilder};

// ── Text fixtures ─────────────────────────────────────────────────────────────

const ASCII_LINE: &str = "The quick brown fox jumps over the lazy";
const FRENCH_LINE: &str = "Où est passée la clé de l'hôtel ? Déjà !";
const FOREIGN_LINE: &str = "Zürich – Łódź – “Señor” – Ørsted – Ærø";

// ── Benchmarks: character set translation ────────────────────────────────────

fn bench_encode_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("charset");

    for (name, text) in [
        ("ascii", ASCII_LINE),
        ("french", FRENCH_LINE),
        ("fallback", FOREIGN_LINE),
    ] {
        group.bench_with_input(BenchmarkId::new("encode_str", name), text, |b, text| {
            b.iter(|| {
                let mut out = Vec::with_capacity(64);
                CharsetTable::encode_str(black_box(text), &mut out);
                out
            })
        });
    }

    group.finish();
}

// ── Benchmarks: full page ─────────────────────────────────────────────────────

fn bench_full_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder");

    // 24 lines of French text with a coloured title, a typical menu page.
    group.bench_function("full_page_24_lines", |b| {
        b.iter(|| {
            build_videotex(|p| {
                p.clear_all();
                p.move_cursor_to(1, 1)?;
                p.with_text_color(Color::Cyan, |p| {
                    p.append("Sommaire");
                    Ok(())
                })?;
                for line in 2..=24u8 {
                    p.move_cursor_to(1, line)?;
                    p.append(black_box(FRENCH_LINE));
                }
                Ok(())
            })
        })
    });

    group.bench_function("repeat_char_rule", |b| {
        b.iter(|| {
            let mut p = VideotexBuilder::new();
            for _ in 0..24 {
                let _ = p.repeat_char(black_box('-'), 39);
            }
            p.build()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_encode_str, bench_full_page);
criterion_main!(benches);
