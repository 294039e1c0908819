// Example: measured sizes feed the running average used for everything unmeasured.
use vlist::{Config, RangeEngine};

fn main() {
    let ids: Vec<&'static str> = vec!["intro", "a", "b", "c", "d", "e", "f", "g", "h", "outro"];
    let mut e = RangeEngine::new(Config::new(3, 20.0).with_buffer(1), ids, |_| {});

    println!("before: total={} offset(1)={}", e.total_size(), e.get_offset(1));

    // Measurements are cheap and do not move the range by themselves.
    e.save_size("intro", 80.0);
    e.save_size("a", 40.0);
    println!(
        "measured: count={} average={} offset(1)={} range={:?}",
        e.size_store().count(),
        e.size_store().average_size(),
        e.get_offset(1),
        e.get_range()
    );

    // Paddings catch up on the next update.
    e.handle_slot_size_change();
    println!("after refresh: range={:?}", e.get_range());

    // Re-measuring replaces the old value in the average.
    e.save_size("intro", 20.0);
    println!("remeasured: average={}", e.size_store().average_size());
}
