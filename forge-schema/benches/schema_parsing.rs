//! Benchmarks for schema lexing, parsing and validation.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use forge_schema::cache::SchemaCache;
use forge_schema::lexer::Lexer;
use forge_schema::parser::{parse, parse_syntax};
use forge_schema::validator::validate;
use std::hint::black_box;

/// A minimal schema with a single model.
const MINIMAL_SCHEMA: &str = r#"
model User {
    id    Int    @id @default(autoincrement())
    name  String
}
"#;

/// A medium schema with enums and relations.
const MEDIUM_SCHEMA: &str = r#"
datasource db {
    provider = "postgresql"
    url      = env("DATABASE_URL")
}

generator client {
    provider = "forge-client-go"
}

enum Role {
    USER
    ADMIN
    MODERATOR
}

model User {
    id        Int       @id @default(autoincrement())
    email     String    @unique
    name      String?
    role      Role      @default(USER)
    posts     Post[]
    comments  Comment[]
    createdAt DateTime  @default(now())
    updatedAt DateTime  @updatedAt
}

model Post {
    id        Int       @id @default(autoincrement())
    title     String    @db.VarChar(255)
    content   String?
    published Boolean   @default(false)
    author    User      @relation(fields: [authorId], references: [id])
    authorId  Int
    comments  Comment[]
    createdAt DateTime  @default(now())

    @@index([authorId, published])
}

model Comment {
    id       Int    @id @default(autoincrement())
    content  String
    author   User   @relation(fields: [authorId], references: [id], onDelete: Cascade)
    authorId Int
    post     Post   @relation(fields: [postId], references: [id])
    postId   Int
}
"#;

/// A large schema with many models.
fn generate_large_schema(model_count: usize) -> String {
    let mut schema = String::from("enum Status {\n    ACTIVE\n    INACTIVE\n    PENDING\n}\n");

    for i in 0..model_count {
        schema.push_str(&format!(
            r#"
// Model number {i}
model Model{i} {{
    id          Int      @id @default(autoincrement())
    name        String
    description String?
    status      Status   @default(ACTIVE)
    value       Float?   @default(1.5)
    count       Int      @default(-1)
    active      Boolean  @default(true)
    tags        String[]
    createdAt   DateTime @default(now())

    @@index([name])
    @@index([status, createdAt])
}}
"#
        ));
    }

    schema
}

/// Benchmark tokenizing alone.
fn bench_lex(c: &mut Criterion) {
    let large = generate_large_schema(100);

    let mut group = c.benchmark_group("lex");
    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("lex_large_schema", |b| {
        b.iter(|| black_box(Lexer::new(&large).tokenize()))
    });
    group.finish();
}

/// Benchmark minimal schema parsing.
fn bench_parse_minimal(c: &mut Criterion) {
    c.bench_function("parse_minimal_schema", |b| {
        b.iter(|| black_box(parse(MINIMAL_SCHEMA)))
    });
}

/// Benchmark medium schema parsing.
fn bench_parse_medium(c: &mut Criterion) {
    c.bench_function("parse_medium_schema", |b| {
        b.iter(|| black_box(parse(MEDIUM_SCHEMA)))
    });
}

/// Benchmark parsing at increasing sizes.
fn bench_parse_large(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_large_schema");

    for size in [10, 50, 100] {
        let schema = generate_large_schema(size);
        group.throughput(Throughput::Bytes(schema.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &schema, |b, schema| {
            b.iter(|| black_box(parse(schema)))
        });
    }

    group.finish();
}

/// Benchmark validation of an already parsed schema.
fn bench_validate(c: &mut Criterion) {
    let (schema, _) = parse_syntax(&generate_large_schema(100));

    c.bench_function("validate_large_schema", |b| {
        b.iter(|| black_box(validate(&schema)))
    });
}

/// Benchmark recovery over many broken blocks.
fn bench_parse_with_errors(c: &mut Criterion) {
    let broken = "model { id Int }\nmodel Ok { id Int @id }\n".repeat(50);

    c.bench_function("parse_schema_with_errors", |b| {
        b.iter(|| black_box(parse(&broken)))
    });
}

/// Benchmark cached lookups.
fn bench_cache(c: &mut Criterion) {
    let cache = SchemaCache::new();
    cache.get_or_parse(MEDIUM_SCHEMA);

    c.bench_function("cache_hit_medium_schema", |b| {
        b.iter(|| black_box(cache.get_or_parse(MEDIUM_SCHEMA)))
    });
}

criterion_group!(
    benches,
    bench_lex,
    bench_parse_minimal,
    bench_parse_medium,
    bench_parse_large,
    bench_validate,
    bench_parse_with_errors,
    bench_cache,
);
criterion_main!(benches);
