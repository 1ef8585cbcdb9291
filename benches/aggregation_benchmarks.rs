//! Performance benchmarks for the aggregation hot path.
//!
//! The aggregation functions run once per report request over the full
//! filtered entry set, so their cost scales directly with workforce size.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{TimeZone, Utc};

use payroll_engine::aggregate::{
    daily_breakdown, department_breakdown, hourly_breakdown, project_breakdown, tax_report,
    top_users, total_hours,
};
use payroll_engine::models::{
    PayAdjustment, PaySlip, PaySlipStatus, SessionStatus, TimeLogEntry,
};

const DEPARTMENTS: [&str; 4] = ["kitchen", "delivery", "front_desk", "warehouse"];
const PROJECTS: [&str; 3] = ["alpha", "beta", "gamma"];

/// Generates a synthetic month of closed sessions for `user_count` users.
fn generate_entries(user_count: usize) -> Vec<TimeLogEntry> {
    let mut entries = Vec::with_capacity(user_count * 20);
    for user in 0..user_count {
        for day in 1..=20u32 {
            let start_hour = 7 + (user % 3) as u32;
            let start = Utc
                .with_ymd_and_hms(2026, 1, day, start_hour, 15, 0)
                .unwrap()
                .timestamp_millis();
            // Between 4 and 9 hours
            let duration = (4 + (user + day as usize) % 6) as i64 * 3_600_000;
            entries.push(TimeLogEntry {
                id: format!("log_{user}_{day}"),
                user_id: format!("u{user}"),
                user_name: Some(format!("User {user}")),
                start_time: start,
                end_time: Some(start + duration),
                duration_ms: Some(duration),
                project: Some(PROJECTS[user % PROJECTS.len()].to_string()),
                department: Some(DEPARTMENTS[user % DEPARTMENTS.len()].to_string()),
                status: SessionStatus::Completed,
            });
        }
    }
    entries
}

/// Generates synthetic pay slips with mixed deduction types.
fn generate_slips(count: usize) -> Vec<PaySlip> {
    (0..count)
        .map(|i| PaySlip {
            id: format!("slip_{i}"),
            staff_id: format!("u{}", i % 50),
            period_id: "2026-01".to_string(),
            gross_pay: 400_000 + (i as i64 % 7) * 10_000,
            net_pay: 320_000,
            deductions: vec![
                PayAdjustment {
                    kind: "Federal Income Tax".to_string(),
                    amount: 40_000,
                },
                PayAdjustment {
                    kind: "State Tax".to_string(),
                    amount: 20_000,
                },
                PayAdjustment {
                    kind: "Health Insurance".to_string(),
                    amount: 15_000,
                },
            ],
            bonuses: vec![],
            status: PaySlipStatus::Issued,
            created_at: 1_000 + i as i64,
        })
        .collect()
}

/// Benchmark: the full breakdown suite at increasing workforce sizes.
fn bench_breakdowns(c: &mut Criterion) {
    let mut group = c.benchmark_group("breakdowns");
    for user_count in [10, 100, 500] {
        let entries = generate_entries(user_count);
        group.throughput(Throughput::Elements(entries.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("hourly", user_count),
            &entries,
            |b, entries| b.iter(|| black_box(hourly_breakdown(entries))),
        );
        group.bench_with_input(
            BenchmarkId::new("daily", user_count),
            &entries,
            |b, entries| b.iter(|| black_box(daily_breakdown(entries, 8.0))),
        );
        group.bench_with_input(
            BenchmarkId::new("top_users", user_count),
            &entries,
            |b, entries| b.iter(|| black_box(top_users(entries, 10))),
        );
        group.bench_with_input(
            BenchmarkId::new("project", user_count),
            &entries,
            |b, entries| b.iter(|| black_box(project_breakdown(entries))),
        );
        group.bench_with_input(
            BenchmarkId::new("department", user_count),
            &entries,
            |b, entries| b.iter(|| black_box(department_breakdown(entries))),
        );
    }
    group.finish();
}

/// Benchmark: scalar totals, the cheapest pass over the entry set.
fn bench_total_hours(c: &mut Criterion) {
    let entries = generate_entries(500);
    c.bench_function("total_hours_10k_entries", |b| {
        b.iter(|| black_box(total_hours(&entries)))
    });
}

/// Benchmark: deduction classification over pay slips.
fn bench_tax_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("tax_report");
    for slip_count in [100, 1_000] {
        let slips = generate_slips(slip_count);
        group.throughput(Throughput::Elements(slip_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(slip_count),
            &slips,
            |b, slips| b.iter(|| black_box(tax_report(slips))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_breakdowns, bench_total_hours, bench_tax_report);
criterion_main!(benches);
