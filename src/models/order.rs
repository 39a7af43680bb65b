use serde::{Deserialize, Serialize};

/// 上游订单 (只依赖 id 与商品明细引用)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub status_id: Option<u32>,
    pub products: ResourceRef,
}

/// 子资源引用, url 可直接 GET
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub url: String,
    #[serde(default)]
    pub resource: Option<String>,
}

/// 订单商品明细
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub brand: String,
    #[serde(rename = "name")]
    pub title: String,
    pub quantity: u64,
}
