use vlist::Config;
use vlist_adapter::{ControllerOptions, ListController, ScrollMetrics, Slot};

fn main() {
    // Example: a host renders the current range, hands each element a reporter and feeds
    // measurements back before reading the range again.
    let ids: Vec<u64> = (0..1_000).collect();
    let options = ControllerOptions::default();
    let mut c = ListController::new(Config::new(20, 48.0), ids, options, |r| {
        println!("render {}..={} (pad {} / {})", r.start, r.end, r.pad_front, r.pad_behind);
    });

    let mut header = c.slot_reporter(Slot::Header);
    header.report(120.0);

    let range = c.range();
    let mut reporters: Vec<_> = range.indices().map(|i| c.item_reporter(i as u64)).collect();
    for (i, r) in reporters.iter_mut().enumerate() {
        // Pretend layout produced alternating heights.
        r.report(if i % 2 == 0 { 40.0 } else { 72.0 });
    }

    let applied = c.pump_resizes(|e| println!("resized: {:?} -> {}", e.target, e.size));
    println!("applied={applied} measured={}", c.measured_count());

    let total = c.engine().total_size();
    if let Some(outcome) = c.on_scroll(ScrollMetrics::new(2_000.0, 600.0, total)) {
        println!("scrolled: {:?} edge={:?}", outcome.range, outcome.edge);
    }

    c.destroy();
}
