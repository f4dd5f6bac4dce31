//! Benchmarks for pixel hit-testing and layout
//!
//! Run with: cargo bench locate

mod support;
use support::make_ledger;

use regsheet::VirtualLocation;

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

// ============================================================================
// Layout
// ============================================================================

#[divan::bench(args = [100, 1_000, 10_000])]
fn compute_origins(bencher: divan::Bencher, transactions: usize) {
    let mut sheet = make_ledger(transactions);
    bencher.bench_local(|| {
        sheet.compute_origins();
        divan::black_box(sheet.total_height());
    });
}

// ============================================================================
// Hit-testing
// ============================================================================

#[divan::bench(args = [100, 1_000, 10_000])]
fn locate_near_top(bencher: divan::Bencher, transactions: usize) {
    let sheet = make_ledger(transactions);
    bencher.bench_local(|| divan::black_box(sheet.locate(divan::black_box(500), 45)));
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn locate_near_bottom(bencher: divan::Bencher, transactions: usize) {
    let sheet = make_ledger(transactions);
    let y = sheet.total_height() - 5;
    bencher.bench_local(|| divan::black_box(sheet.locate(divan::black_box(500), y)));
}

#[divan::bench(args = [1_000, 10_000])]
fn locate_then_cell_rect(bencher: divan::Bencher, transactions: usize) {
    let sheet = make_ledger(transactions);
    let y = sheet.total_height() / 2;
    bencher.bench_local(|| {
        let loc = sheet
            .locate(divan::black_box(85), y)
            .unwrap_or(VirtualLocation::new(0, 0, 0, 0));
        divan::black_box(sheet.cell_rect(loc))
    });
}
