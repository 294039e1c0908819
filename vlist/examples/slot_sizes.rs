// Example: header/footer slots and runtime configuration changes.
use vlist::{Config, Diagnostic, Param, RangeEngine};

fn main() {
    let config = Config::new(5, 30.0)
        .with_slot_sizes(64.0, 48.0)
        .with_on_diagnostic(Some(|d: Diagnostic| println!("diagnostic: {d:?}")));
    let mut e = RangeEngine::new(config, (0..500u32).collect(), |_| {});
    println!("initial: {:?} total={}", e.get_range(), e.total_size());

    // The header grew: only pad_front moves.
    e.update_param(Param::SlotHeaderSize(96.0));
    println!("header=96: {:?}", e.get_range());

    e.update_param(Param::Keeps(12));
    println!("keeps=12: {:?}", e.get_range());

    // Out-of-domain values are clamped and reported.
    e.update_param(Param::EstimateSize(-1.0));
    e.update_param(Param::Keeps(0));
    println!("clamped: keeps={} estimate={}", e.config().keeps, e.config().estimate_size);
}
