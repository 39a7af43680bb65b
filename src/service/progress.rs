/// 聚合进度观察者, 只做旁路通知, 不影响数据
pub trait ProgressObserver: Send + Sync {
    fn on_start(&self, _total: usize) {}

    /// 每处理完一个订单调用一次
    fn on_order(&self, processed: usize, total: usize);

    fn on_finish(&self, _processed: usize) {}
}

/// 日志进度 (第一个订单与每 100 个订单输出一次)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_start(&self, total: usize) {
        tracing::info!("Generating report from {} orders", total);
    }

    fn on_order(&self, processed: usize, total: usize) {
        if processed % 100 == 0 || processed == 1 {
            tracing::info!("Order progress: {}/{}", processed, total);
        }
    }

    fn on_finish(&self, processed: usize) {
        tracing::info!("Aggregated {} orders", processed);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressObserver for SilentProgress {
    fn on_order(&self, _processed: usize, _total: usize) {}
}
