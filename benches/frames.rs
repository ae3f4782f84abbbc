use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roomchat::chat::{ChatLine, ChatMessage};
use roomchat::page::UserIdentity;

fn benchmark_parse_line(c: &mut Criterion) {
    let frame = r#"{"username":"bob","message":"hello there, how is everyone doing today?","extra":{"nested":[1,2,3]}}"#;

    c.bench_function("parse_line", |b| {
        b.iter(|| ChatLine::parse(black_box(frame)).unwrap())
    });
}

fn benchmark_parse_dropped(c: &mut Criterion) {
    let frame = r#"{"user":"bob","message":"no username here"}"#;

    c.bench_function("parse_dropped", |b| {
        b.iter(|| ChatLine::parse(black_box(frame)).unwrap())
    });
}

fn benchmark_encode_message(c: &mut Criterion) {
    let identity = UserIdentity::new("42", "alice");

    c.bench_function("encode_message", |b| {
        b.iter(|| {
            ChatMessage::new(&identity, black_box("a message with \"quotes\" and\nnewlines"))
                .to_frame()
                .unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_line,
    benchmark_parse_dropped,
    benchmark_encode_message
);
criterion_main!(benches);
