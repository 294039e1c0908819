use vlist::Config;
use vlist_adapter::{ControllerOptions, ListController, ScrollMetrics};

fn main() {
    // Example: scroll-to-bottom on a list whose tail is taller than estimated.
    //
    // An adapter would:
    // - apply the offset returned by scroll_to_bottom
    // - call tick(now_ms, metrics) from a short timer
    // - apply any returned offset again, until tick yields None
    let ids: Vec<u64> = (0..200).collect();
    let options = ControllerOptions::default();
    let mut c = ListController::new(Config::new(10, 20.0), ids, options, |_| {});
    let client_size = 300.0;

    let mut now_ms = 0u64;
    let mut offset = c.scroll_to_bottom(now_ms);
    println!("jump to {offset}");

    loop {
        // The host renders the tail and reports its real sizes.
        let range = c.range();
        let mut reporters: Vec<_> = range.indices().map(|i| c.item_reporter(i as u64)).collect();
        for r in &mut reporters {
            r.report(60.0);
        }
        c.pump_resizes(|_| {});

        let scroll_size = c.engine().total_size();
        let offset_now = offset.min(scroll_size - client_size).max(0.0);
        c.on_scroll(ScrollMetrics::new(offset_now, client_size, scroll_size));

        now_ms += 4;
        match c.tick(now_ms, ScrollMetrics::new(offset_now, client_size, scroll_size)) {
            Some(next) => {
                println!("t={now_ms} fell short, jump to {next}");
                offset = next;
            }
            None if c.bottom_retry().is_some() => {}
            None => break,
        }
    }

    println!("settled: offset={offset} range={:?}", c.range());
}
