//! Yearly/monthly order management
//!
//! Every billing response may carry `error_code` / `error_msg` alongside its
//! payload; they are kept on the resource as returned.

use crate::cloud::client::ServiceType;
use crate::cloud::http::HttpMethod;
use crate::resource::schema::{Allow, Field, Resource};
use crate::resource::serde_util::opt_int;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const CREATE_ONLY: Allow = Allow {
    create: true,
    ..Allow::NONE
};

const GET_ONLY: Allow = Allow {
    get: true,
    ..Allow::NONE
};

/// Pay a pending yearly/monthly order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayPeriodOrder {
    pub domain_id: Option<String>,
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
    /// 3: balance, 4: credit
    #[serde(rename = "payAccountType", deserialize_with = "opt_int::deserialize")]
    pub pay_account_type: Option<i64>,
    /// Partner account paying on the customer's behalf
    #[serde(rename = "bpId")]
    pub bp_id: Option<String>,
    #[serde(rename = "couponIds")]
    pub coupon_ids: Option<Vec<String>>,
    pub error_code: Option<String>,
    pub error_msg: Option<String>,
    #[serde(rename = "tradeNo")]
    pub trade_no: Option<String>,
    /// Resources whose quota or capacity is insufficient
    #[serde(rename = "quotaInfos")]
    pub quota_infos: Option<Vec<Value>>,
    /// Enterprise projects whose funds are insufficient
    #[serde(rename = "enterpriseProjectAuthResult")]
    pub enterprise_project_auth_result: Option<Vec<Value>>,
}

impl Resource for PayPeriodOrder {
    const NAME: &'static str = "period order payment";
    const SERVICE: ServiceType = ServiceType::Bss;
    const BASE_PATH: &'static str = "{domain_id}/customer/order-mgr/order/pay";
    const ALLOW: Allow = CREATE_ONLY;
    const FIELDS: &'static [Field] = &[Field::uri("domain_id")];
}

/// Unsubscribe the resources of an order.
///
/// Sent as a DELETE whose arguments travel in the query string; unset
/// reasons are sent as empty values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnsubscribePeriodOrder {
    pub domain_id: Option<String>,
    pub order_id: Option<String>,
    /// 1: unsubscribe the resource and its renewal, 2: renewal only,
    /// 3: the renewal period only, 4: the current period, 5: unsubscribe
    /// the order's resources
    pub unsub_type: Option<String>,
    pub unsubscribe_reason_type: Option<String>,
    pub unsubscribe_reason: Option<String>,
    pub error_code: Option<String>,
    pub error_msg: Option<String>,
    pub unsub_order_ids: Option<Vec<String>>,
}

impl Resource for UnsubscribePeriodOrder {
    const NAME: &'static str = "period order";
    const SERVICE: ServiceType = ServiceType::Bss;
    const BASE_PATH: &'static str = "{domain_id}/customer/order-mgr/orders/{order_id}";
    const ALLOW: Allow = Allow {
        delete: true,
        ..Allow::NONE
    };
    const FIELDS: &'static [Field] = &[
        Field::uri("domain_id"),
        Field::uri("order_id"),
        Field::query("unsub_type"),
        Field::query("unsubscribe_reason_type"),
        Field::query("unsubscribe_reason"),
    ];
    const REQUIRES_ID: bool = false;
}

/// Cancel an unpaid order; a PUT whose action is selected by `action_id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CancelOrder {
    pub domain_id: Option<String>,
    /// `cancel` is the only action the service accepts
    pub action_id: Option<String>,
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
    pub error_code: Option<String>,
    pub error_msg: Option<String>,
}

impl Resource for CancelOrder {
    const NAME: &'static str = "order cancellation";
    const SERVICE: ServiceType = ServiceType::Bss;
    const BASE_PATH: &'static str = "{domain_id}/customer/order-mgr/orders/actions?action_id={action_id}";
    const ALLOW: Allow = CREATE_ONLY;
    const FIELDS: &'static [Field] = &[Field::uri("domain_id"), Field::uri("action_id")];
    const CREATE_METHOD: HttpMethod = HttpMethod::Put;
}

/// One order with its line items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOrderDetail {
    pub domain_id: Option<String>,
    pub order_id: Option<String>,
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub offset: Option<i64>,
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub limit: Option<i64>,
    pub error_code: Option<String>,
    pub error_msg: Option<String>,
    /// Number of line items
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub count: Option<i64>,
    #[serde(rename = "orderInfo")]
    pub order_info: Option<Value>,
    #[serde(rename = "orderlineItems")]
    pub orderline_items: Option<Vec<Value>>,
}

impl Resource for QueryOrderDetail {
    const NAME: &'static str = "order";
    const SERVICE: ServiceType = ServiceType::Bss;
    const BASE_PATH: &'static str = "{domain_id}/common/order-mgr/orders/{order_id}";
    const ALLOW: Allow = GET_ONLY;
    const FIELDS: &'static [Field] = &[
        Field::uri("domain_id"),
        Field::uri("order_id"),
        Field::query("offset"),
        Field::query("limit"),
    ];
    const REQUIRES_ID: bool = false;
}

/// Orders matching a set of filters, one page at a time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOrderList {
    pub domain_id: Option<String>,
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    /// UTC, `yyyy-MM-dd'T'HH:mm:ss'Z'`
    pub create_time_begin: Option<String>,
    pub create_time_end: Option<String>,
    pub service_type: Option<String>,
    pub status: Option<String>,
    pub order_type: Option<String>,
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub page_size: Option<i64>,
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub page_index: Option<i64>,
    pub sort: Option<String>,
    pub payment_time_begin: Option<String>,
    pub payment_time_end: Option<String>,
    pub error_code: Option<String>,
    pub error_msg: Option<String>,
    /// `{"totalRecord": .., "orderInfos": [..]}`
    pub data: Option<Value>,
}

impl Resource for QueryOrderList {
    const NAME: &'static str = "order list";
    const SERVICE: ServiceType = ServiceType::Bss;
    const BASE_PATH: &'static str = "{domain_id}/common/order-mgr/orders/detail";
    const ALLOW: Allow = GET_ONLY;
    const FIELDS: &'static [Field] = &[
        Field::uri("domain_id"),
        Field::query("order_id"),
        Field::query("customer_id"),
        Field::query("create_time_begin"),
        Field::query("create_time_end"),
        Field::query("status"),
        Field::query("order_type"),
        Field::query("service_type"),
        Field::query("page_size"),
        Field::query("page_index"),
        Field::query("sort"),
        Field::query("payment_time_begin"),
        Field::query("payment_time_end"),
    ];
    const REQUIRES_ID: bool = false;
}

/// Resources refunded by an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryRefundOrder {
    pub domain_id: Option<String>,
    pub order_id: Option<String>,
    pub error_code: Option<String>,
    pub error_msg: Option<String>,
    pub resource_info_list: Option<Vec<Value>>,
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub total_count: Option<i64>,
}

impl Resource for QueryRefundOrder {
    const NAME: &'static str = "refund order";
    const SERVICE: ServiceType = ServiceType::Bss;
    const BASE_PATH: &'static str = "{domain_id}/common/order-mgr/orders/refund-order";
    const ALLOW: Allow = GET_ONLY;
    const FIELDS: &'static [Field] = &[Field::uri("domain_id"), Field::query("order_id")];
    const REQUIRES_ID: bool = false;
}

/// Resources provisioned by an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOrderResource {
    pub domain_id: Option<String>,
    pub order_id: Option<String>,
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub offset: Option<i64>,
    #[serde(deserialize_with = "opt_int::deserialize")]
    pub limit: Option<i64>,
    pub error_code: Option<String>,
    pub error_msg: Option<String>,
    #[serde(rename = "totalSize", deserialize_with = "opt_int::deserialize")]
    pub total_size: Option<i64>,
    pub resources: Option<Vec<Value>>,
}

impl Resource for QueryOrderResource {
    const NAME: &'static str = "order resources";
    const SERVICE: ServiceType = ServiceType::Bss;
    const BASE_PATH: &'static str = "{domain_id}/common/order-mgr/orders-resource/{order_id}";
    const ALLOW: Allow = GET_ONLY;
    const FIELDS: &'static [Field] = &[
        Field::uri("domain_id"),
        Field::uri("order_id"),
        Field::query("offset"),
        Field::query("limit"),
    ];
    const REQUIRES_ID: bool = false;
}
