// Example: the id list shrinking and growing under a scrolled window.
use vlist::{Config, Param, RangeEngine};

fn main() {
    let config = Config::new(10, 20.0).with_buffer(0);
    let mut e = RangeEngine::new(config, (0..100u64).collect(), |_| {});
    e.handle_scroll(1_900.0);
    println!("scrolled to the tail: {:?}", e.get_range());

    e.update_param(Param::UniqueIds((0..50).collect()));
    e.handle_data_sources_change();
    println!("after shrink to 50: {:?}", e.get_range());

    e.update_param(Param::UniqueIds((0..200).collect()));
    e.handle_data_sources_change();
    println!("after growth to 200: {:?}", e.get_range());

    e.update_param(Param::UniqueIds(Vec::new()));
    e.handle_data_sources_change();
    println!("emptied: {:?}", e.get_range());

    e.destroy();
}
