use crate::core::Item;
use std::cmp::Ordering;

/// Orders tires for display: marked-down tires first, then by rim size.
///
/// Tires without a readable rim size go last within their group. The sort
/// is stable so equal keys keep the order the content service returned.
pub fn sort_tires(tires: &mut [Item]) {
    tires.sort_by(compare_tires);
}

fn compare_tires(a: &Item, b: &Item) -> Ordering {
    b.is_on_sale()
        .cmp(&a.is_on_sale())
        .then_with(|| rim_key(a).cmp(&rim_key(b)))
}

fn rim_key(item: &Item) -> i64 {
    item.rim_size().unwrap_or(i64::MAX)
}
