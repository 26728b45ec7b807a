#![doc(test(attr(deny(warnings))))]

//! PennyWise keeps a ledger of income and expenses, materializes recurring
//! rules into dated transactions, groups spending into trend buckets, and
//! tracks category budgets with an over-limit alert.

pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("PennyWise tracing initialized.");
    });
}
