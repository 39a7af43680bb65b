use crate::error::UpstreamError;
use crate::models::{LineItem, Order};
use crate::service::LineItemResolver;
use futures::{stream, StreamExt, TryStreamExt};

/// 并发拉取所有订单明细
///
/// 输出第 i 项对应输入第 i 个订单, 与完成顺序无关.
/// 任一订单失败则整体失败, 尚未完成的兄弟请求随 future 一起被丢弃.
pub struct FanOut {
    resolver: LineItemResolver,
    concurrency: Option<usize>,
}

impl FanOut {
    /// concurrency 为 None (或 0) 时不限并发
    pub fn new(resolver: LineItemResolver, concurrency: Option<usize>) -> Self {
        Self {
            resolver,
            concurrency: concurrency.filter(|&n| n > 0),
        }
    }

    pub async fn resolve_all(
        &self,
        orders: Vec<Order>,
    ) -> Result<Vec<(Order, Vec<LineItem>)>, UpstreamError> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        tracing::info!(
            "Resolving line items for {} orders (concurrency: {})",
            orders.len(),
            self.concurrency
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unbounded".to_string())
        );

        // 不限并发时窗口即订单数
        let limit = self.concurrency.unwrap_or(orders.len());
        let items = self
            .resolve_tagged(&orders, limit)
            .await
            .inspect_err(|e| tracing::error!("Line item resolution failed: {}", e))?;
        Ok(orders.into_iter().zip(items).collect())
    }

    /// 按完成顺序收集, 用下标放回原位置; 第一个失败立即返回
    async fn resolve_tagged(
        &self,
        orders: &[Order],
        limit: usize,
    ) -> Result<Vec<Vec<LineItem>>, UpstreamError> {
        let tagged: Vec<(usize, Vec<LineItem>)> = stream::iter(orders.iter().cloned().enumerate())
            .map(|(idx, order)| {
                let resolver = self.resolver.clone();
                async move {
                    resolver
                        .fetch_line_items(&order)
                        .await
                        .map(|items| (idx, items))
                }
            })
            .buffer_unordered(limit.max(1))
            .try_collect()
            .await?;

        let mut slots: Vec<Vec<LineItem>> = vec![Vec::new(); orders.len()];
        for (idx, items) in tagged {
            slots[idx] = items;
        }
        Ok(slots)
    }
}
