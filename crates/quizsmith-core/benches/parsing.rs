use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizsmith_core::parser::parse_test_content;
use quizsmith_core::pathway::parse_pathway;

fn bench_parse_test_content(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_test_content");

    let small = generate_completion(3);
    let standard = generate_completion(10);
    let large = generate_completion(100);

    group.bench_function("3_questions", |b| {
        b.iter(|| parse_test_content(black_box(&small)))
    });

    group.bench_function("10_questions", |b| {
        b.iter(|| parse_test_content(black_box(&standard)))
    });

    group.bench_function("100_questions", |b| {
        b.iter(|| parse_test_content(black_box(&large)))
    });

    let garbled = "The model refused to cooperate and produced prose instead.\n".repeat(50);
    group.bench_function("garbled", |b| {
        b.iter(|| parse_test_content(black_box(&garbled)).err())
    });

    group.finish();
}

fn bench_parse_pathway(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_pathway");

    let mut plan = String::from("Your Plan\n");
    for week in 1..=10 {
        plan.push_str(&format!("\nWeek {week}:\n"));
        for item in 1..=5 {
            plan.push_str(&format!("- Task {item} for week {week}\n"));
        }
    }

    group.bench_function("10_weeks", |b| b.iter(|| parse_pathway(black_box(&plan))));

    group.finish();
}

fn generate_completion(n: usize) -> String {
    let mut s = String::from("Benchmark Test\n\nA generated fixture for benchmarks.\n");
    for i in 1..=n {
        s.push_str(&format!(
            "\n{i}. What is the value of expression number {i}?\nA. first\nB. second\nC. third\nD. fourth\n"
        ));
    }
    s.push_str("\nAnswer Key:\n");
    for i in 1..=n {
        s.push_str(&format!("{i}. B\n"));
    }
    s
}

criterion_group!(benches, bench_parse_test_content, bench_parse_pathway);
criterion_main!(benches);
