pub mod order;
pub mod report;
pub mod window;

pub use order::{LineItem, Order, ResourceRef};
pub use report::{
    AggregateEntry, RankedRow, ReportStats, SellThroughReport, SkuAggregate, SkuConflict,
};
pub use window::{DateWindow, RangePreset, WindowSpec};
