pub mod aggregator;
pub mod fanout;
pub mod fetcher;
pub mod progress;
pub mod ranker;
pub mod report;
pub mod resolver;

pub use aggregator::Aggregator;
pub use fanout::FanOut;
pub use fetcher::OrderFetcher;
pub use progress::{LogProgress, ProgressObserver, SilentProgress};
pub use ranker::rank;
pub use report::{ReportRequest, SellThroughService};
pub use resolver::LineItemResolver;
