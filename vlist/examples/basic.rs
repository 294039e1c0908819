// Example: minimal usage, scrolling and offset lookup.
use vlist::{Config, RangeEngine};

fn main() {
    let ids: Vec<u64> = (0..1_000_000).collect();
    let mut e = RangeEngine::new(Config::new(30, 40.0), ids, |r| {
        println!(
            "range changed: {}..={} pad_front={} pad_behind={}",
            r.start, r.end, r.pad_front, r.pad_behind
        );
    });

    println!("total_size={}", e.total_size());

    e.handle_scroll(123_456.0);
    println!("direction={:?} range={:?}", e.direction(), e.get_range());

    // Same offset again: static, no callback.
    e.handle_scroll(123_456.0);

    let target = e.get_offset(999_990);
    e.handle_scroll(target);
    println!("after jump: offset={} index={:?}", e.offset(), e.index_at_offset(target));
}
