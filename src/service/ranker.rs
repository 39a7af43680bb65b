use crate::models::{AggregateEntry, RankedRow, SkuAggregate};

/// 按数量降序排名, 数量相同按 SKU 升序
pub fn rank(aggregate: &SkuAggregate) -> Vec<RankedRow> {
    let mut entries: Vec<AggregateEntry> = aggregate.entries().cloned().collect();
    entries.sort_by(|a, b| {
        b.total_quantity
            .cmp(&a.total_quantity)
            .then_with(|| a.sku.cmp(&b.sku))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| RankedRow {
            rank: idx + 1,
            entry,
        })
        .collect()
}
