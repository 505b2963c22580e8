//! Lint and fix throughput over generated DTO files.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nestlint::parser::parse_source_file;
use nestlint::{DEFAULT_MAX_PASSES, Linter, RuleSet};

const HEADER: &str = "import { Field, InputType, Int } from '@nestjs/graphql';
import { ApiProperty, ApiPropertyOptional } from '@nestjs/swagger';
import { IsInt, IsString } from 'class-validator';

@InputType()
export class GeneratedDto {
";

/// `count` properties, every third one mismatched.
fn generate_dto(count: usize) -> String {
    let mut source = String::from(HEADER);
    for i in 0..count {
        let member = match i % 3 {
            0 => format!(
                "  @Field()\n  @ApiProperty({{ example: 'v{i}' }})\n  @IsString()\n  name{i}: string;\n\n"
            ),
            1 => format!(
                "  @Field(() => Int, {{ nullable: true }})\n  @ApiPropertyOptional()\n  count{i}?: number | null;\n\n"
            ),
            _ => format!(
                "  @Field(() => Int)\n  @ApiProperty()\n  @IsInt()\n  total{i}?: number;\n\n"
            ),
        };
        source.push_str(&member);
    }
    source.push_str("}\n");
    source
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for count in [10, 100, 1000] {
        let source = generate_dto(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &source, |b, source| {
            b.iter(|| black_box(parse_source_file("bench.ts", source)))
        });
    }
    group.finish();
}

fn bench_lint(c: &mut Criterion) {
    let linter = Linter::new(RuleSet::recommended());
    let mut group = c.benchmark_group("lint");
    for count in [10, 100, 1000] {
        let source = generate_dto(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &source, |b, source| {
            b.iter(|| black_box(linter.lint_source("bench.ts", source)))
        });
    }
    group.finish();
}

fn bench_fix(c: &mut Criterion) {
    let linter = Linter::new(RuleSet::recommended());
    let mut group = c.benchmark_group("fix");
    group.sample_size(20);
    for count in [10, 100] {
        let source = generate_dto(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &source, |b, source| {
            b.iter(|| black_box(linter.fix_source("bench.ts", source, DEFAULT_MAX_PASSES)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_lint, bench_fix);
criterion_main!(benches);
