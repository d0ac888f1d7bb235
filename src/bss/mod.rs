//! Business support system (billing) service
//!
//! Yearly/monthly order operations under the `order-mgr` endpoints, reached
//! through [`CloudClient::bss`](crate::CloudClient::bss).

mod period_order;
mod proxy;

pub use period_order::{
    CancelOrder, PayPeriodOrder, QueryOrderDetail, QueryOrderList, QueryOrderResource,
    QueryRefundOrder, UnsubscribePeriodOrder,
};
pub use proxy::Bss;
