use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use pennywise::core::services::{RecurrenceService, TrendAggregator};
use pennywise::export::to_csv_string;
use pennywise::ledger::{
    process, Interval, Ledger, RecurringRule, Transaction, TransactionKind, TrendPeriod,
};
use rust_decimal::Decimal;

fn build_history(txn_count: usize) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let categories = ["Groceries", "Transport", "Dining"];
    (0..txn_count)
        .map(|idx| {
            let kind = if idx % 10 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            };
            Transaction::new(
                kind,
                categories[idx % categories.len()],
                Decimal::new(500 + (idx % 100) as i64, 2),
                start + Duration::days((idx % 365) as i64),
            )
            .unwrap()
        })
        .collect()
}

fn bench_catch_up(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    c.bench_function("daily_rule_catch_up_10y", |b| {
        b.iter_batched(
            || {
                RecurringRule::new(
                    TransactionKind::Expense,
                    "Coffee",
                    Decimal::new(350, 2),
                    Interval::Daily,
                    start,
                )
                .unwrap()
            },
            |mut rule| black_box(process(&mut rule, today)),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("ledger_catch_up_mixed_rules", |b| {
        b.iter_batched(
            || {
                let mut ledger = Ledger::new("Benchmark");
                for interval in Interval::ALL {
                    let rule = RecurringRule::new(
                        TransactionKind::Expense,
                        interval.label(),
                        Decimal::new(1000, 2),
                        interval,
                        start,
                    )
                    .unwrap();
                    ledger.add_rule(rule);
                }
                ledger
            },
            |mut ledger| black_box(RecurrenceService::catch_up_until(&mut ledger, today)),
            BatchSize::SmallInput,
        )
    });
}

fn bench_trends(c: &mut Criterion) {
    let history = build_history(black_box(10_000));

    c.bench_function("weekly_trend_10k", |b| {
        b.iter(|| {
            black_box(TrendAggregator::group(
                &history,
                "Groceries",
                TrendPeriod::Weekly,
            ))
        })
    });

    c.bench_function("csv_export_10k", |b| {
        b.iter(|| black_box(to_csv_string(&history).unwrap()))
    });
}

criterion_group!(benches, bench_catch_up, bench_trends);
criterion_main!(benches);
