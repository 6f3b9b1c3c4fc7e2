//! Cleaning and extraction benchmarks.
//!
//! Measures the clean pipeline, entity extraction and delimited parsing
//! across input sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use prepkit::config::RegexConstants;
use prepkit::io::{parse_delimited, Delimiter};
use prepkit::text::{
    clean, extract_email, extract_phone, CaseOptions, CleanOptions, EntityExtractor, ReplaceRule,
    StripOptions,
};

const NAMES: &[&str] = &[
    "John A. Doe",
    "Doe, John",
    "Dr. Jane Roe, MD, PhD",
    "Ludwig van Beethoven",
    "Acme Holdings Inc",
    "  mary   ann  smith ",
];

const CONTACT_LINES: &[&str] = &[
    "Jane Roe <jane.roe@example.com>, tel (555) 867-5309",
    "Seoul office: +82 2-123-4567 ext. 12",
    "mobile 010 9876 5432, no email",
    "HK desk +852 2345 6789 / hk@example.com.hk",
];

/// Generate synthetic contact CSV data with the specified number of rows.
fn generate_contacts_csv(rows: usize) -> String {
    let mut data = String::from("id,name,phone,email,sku\n");
    for row in 0..rows {
        data.push_str(&format!(
            "{},\"Doe{}, John\",555-{:03}-{:04},john{}@example.com,SKU-{:05}\n",
            row,
            row,
            row % 1000,
            row % 10_000,
            row,
            row
        ));
    }
    data
}

fn extractor() -> EntityExtractor {
    let constants = RegexConstants {
        company_keyword_list: vec!["Inc".into(), "LLC".into(), "Holdings".into()],
        job_title_suffix_list: vec!["MD".into(), "PhD".into(), "RN".into()],
    };
    EntityExtractor::new(&constants).unwrap()
}

/// Benchmark the clean pipeline with increasing numbers of stages.
fn bench_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean");
    let input = "  ##acme   widget ,model 42 ;blue  ";

    let configs = [
        ("default", CleanOptions::default()),
        ("upper", CleanOptions::default().with_case(CaseOptions::Upper)),
        (
            "full",
            CleanOptions::default()
                .with_replace(ReplaceRule::literal("widget", "gadget"))
                .with_strip(StripOptions::new("#"))
                .with_case(CaseOptions::Title),
        ),
    ];

    for (name, options) in configs.iter() {
        group.bench_with_input(BenchmarkId::new("stages", name), options, |b, options| {
            b.iter(|| black_box(clean(black_box(input), options)))
        });
    }

    group.finish();
}

/// Benchmark name, phone and email extraction.
fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    let ex = extractor();

    group.bench_function("extract_name", |b| {
        b.iter(|| {
            for name in NAMES {
                black_box(ex.extract_name(black_box(name)));
            }
        })
    });

    group.bench_function("extract_phone", |b| {
        b.iter(|| {
            for line in CONTACT_LINES {
                black_box(extract_phone(black_box(line)));
            }
        })
    });

    group.bench_function("extract_email", |b| {
        b.iter(|| {
            for line in CONTACT_LINES {
                black_box(extract_email(black_box(line)));
            }
        })
    });

    group.finish();
}

/// Benchmark parsing delimited contact data of various sizes.
fn bench_parse_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rows");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_contacts_csv(*rows);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(parse_delimited(data.as_bytes(), Delimiter::Comma).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_clean, bench_extraction, bench_parse_rows);
criterion_main!(benches);
