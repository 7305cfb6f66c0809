//! Criterion benchmarks for the Newfor packet encoder.
//!
//! Measures row encoding, single-packet encoding, and the full subtitle burst
//! for every wire variant.  A subtitle update has to leave the workstation
//! well inside one video frame, so these should stay in the microsecond range.
//!
//! Run with:
//! ```bash
//! cargo bench --package newfor-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use newfor_core::{
    compute_layout, encode_packet, BuildRow, Color, Packet, PageNumber, ProtocolVariant,
    RowBuffer, SubtitleStyle, VerticalPosition,
};

// ── Fixtures ──────────────────────────────────────────────────────────────────

const LINES: [&str; 3] = [
    "THIS IS A TEST SUBTITLE",
    "ON THREE LINES OF TEXT",
    "FOR THE NEWFOR INJECTOR",
];

fn boxed_double_height() -> SubtitleStyle {
    SubtitleStyle {
        color: Color::Yellow,
        boxed: true,
        double_height: true,
        position: VerticalPosition::Lower,
    }
}

fn build_packet(style: &SubtitleStyle) -> Packet {
    let layout = compute_layout(LINES.len(), style.position, style.double_height)
        .expect("fixture layout must be valid");
    let rows = LINES
        .iter()
        .zip(layout.rows())
        .map(|(line, row)| BuildRow {
            row,
            content: RowBuffer::encode(line, style).buffer,
        })
        .collect();
    Packet::Build { clear: true, rows }
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks building one 40-byte row.
fn bench_row_encode(c: &mut Criterion) {
    let style = boxed_double_height();
    c.bench_function("row_encode", |b| {
        b.iter(|| RowBuffer::encode(black_box(LINES[0]), black_box(&style)))
    });
}

/// Benchmarks `encode_packet` for each packet kind.
fn bench_packet_encode(c: &mut Criterion) {
    let page: PageNumber = "888".parse().expect("fixture page must be valid");
    let packets: &[(&str, Packet)] = &[
        ("Connect", Packet::Connect(page)),
        ("Build(3)", build_packet(&boxed_double_height())),
        ("Reveal", Packet::Reveal),
        ("Clear", Packet::Clear),
        ("Disconnect", Packet::Disconnect),
    ];

    let mut group = c.benchmark_group("encode_packet");
    for (name, packet) in packets {
        group.bench_with_input(BenchmarkId::new("packet", name), packet, |b, packet| {
            b.iter(|| encode_packet(black_box(packet)).expect("encode must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks the whole subtitle burst for every wire variant.
fn bench_subtitle_burst(c: &mut Criterion) {
    let page = PageNumber::default();
    let style = boxed_double_height();

    let mut group = c.benchmark_group("subtitle_burst");
    for variant in ProtocolVariant::ALL {
        let wire = variant.wire();
        group.bench_function(wire.name(), |b| {
            b.iter(|| {
                wire.subtitle(black_box(&page), black_box(&LINES), black_box(&style))
                    .expect("burst must succeed")
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_row_encode,
    bench_packet_encode,
    bench_subtitle_burst
);
criterion_main!(benches);
