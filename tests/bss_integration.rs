//! Integration tests for the billing façade using wiremock
//!
//! The mock server stands in for the `v1.0` billing endpoint; every request
//! is scoped to the configured customer domain.

use hwcloud::bss::{
    CancelOrder, PayPeriodOrder, QueryOrderDetail, QueryOrderList, QueryOrderResource,
    UnsubscribePeriodOrder,
};
use hwcloud::config::EndpointOverrides;
use hwcloud::{CloudClient, Config, Error};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOMAIN: &str = "d1";

fn client(server: &MockServer) -> CloudClient {
    CloudClient::new(&Config {
        token: Some("test-token".to_string()),
        domain_id: Some(DOMAIN.to_string()),
        endpoints: EndpointOverrides {
            compute: None,
            bss: Some(format!("{}/v1.0", server.uri())),
        },
        ..Default::default()
    })
    .unwrap()
}

mod order_tests {
    use super::*;

    /// Test unsubscribe sends a DELETE with every reason in the query string
    #[tokio::test]
    async fn test_unsubscribe_query_string() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/v1.0/d1/customer/order-mgr/orders/CS1802081410IMDRN"))
            .and(header("X-Auth-Token", "test-token"))
            .and(query_param("unsub_type", "5"))
            .and(query_param("unsubscribe_reason_type", ""))
            .and(query_param("unsubscribe_reason", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error_code": "CBC.0000",
                "error_msg": "success",
                "unsub_order_ids": ["CS1802081410IMDRN-U"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let result = client
            .bss()
            .unsubscribe_period_order(UnsubscribePeriodOrder {
                order_id: Some("CS1802081410IMDRN".to_string()),
                unsub_type: Some("5".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(
            result.unsub_order_ids,
            Some(vec!["CS1802081410IMDRN-U".to_string()])
        );
        assert_eq!(result.error_code.as_deref(), Some("CBC.0000"));
        assert_eq!(result.domain_id.as_deref(), Some(DOMAIN));
    }

    /// Test cancel is a PUT with the default action in the query string
    #[tokio::test]
    async fn test_cancel_defaults_action() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v1.0/d1/customer/order-mgr/orders/actions"))
            .and(query_param("action_id", "cancel"))
            .and(body_json(json!({"orderId": "CS1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error_code": "CBC.0000",
                "error_msg": "success"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let result = client
            .bss()
            .cancel_order(CancelOrder {
                order_id: Some("CS1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.error_msg.as_deref(), Some("success"));
        assert_eq!(result.action_id.as_deref(), Some("cancel"));
    }

    /// Test payment posts the camelCase body
    #[tokio::test]
    async fn test_pay_order() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1.0/d1/customer/order-mgr/order/pay"))
            .and(body_json(json!({"orderId": "CS1", "payAccountType": 3})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error_code": "CBC.0000",
                "error_msg": "success",
                "tradeNo": "T100"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        let result = client
            .bss()
            .pay_period_order(PayPeriodOrder {
                order_id: Some("CS1".to_string()),
                pay_account_type: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.trade_no.as_deref(), Some("T100"));
    }

    /// Test order detail keeps request fields and fills response fields
    #[tokio::test]
    async fn test_query_order_detail() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.0/d1/common/order-mgr/orders/CS1"))
            .and(query_param("offset", ""))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error_code": "CBC.0000",
                "error_msg": "success",
                "count": 1,
                "orderInfo": {"orderId": "CS1", "status": 5},
                "orderlineItems": [{"orderLineItemId": "CS1-1"}]
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let result = client
            .bss()
            .query_order_detail(QueryOrderDetail {
                order_id: Some("CS1".to_string()),
                limit: Some(10),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.order_id.as_deref(), Some("CS1"));
        assert_eq!(result.limit, Some(10));
        assert_eq!(result.count, Some(1));
        assert_eq!(result.orderline_items.map(|items| items.len()), Some(1));
    }

    /// Test the order list sends its filters and exposes the data envelope
    #[tokio::test]
    async fn test_query_order_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.0/d1/common/order-mgr/orders/detail"))
            .and(query_param("status", "2"))
            .and(query_param("page_size", "20"))
            .and(query_param("order_type", ""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error_code": "CBC.0000",
                "error_msg": "success",
                "data": {"totalRecord": 1, "orderInfos": [{"orderId": "CS1"}]}
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let result = client
            .bss()
            .query_order_list(QueryOrderList {
                status: Some("2".to_string()),
                page_size: Some(20),
                ..Default::default()
            })
            .await
            .unwrap();

        let data = result.data.unwrap();
        assert_eq!(data["totalRecord"], 1);
        assert_eq!(data["orderInfos"][0]["orderId"], "CS1");
    }

    /// Test order resources accept counts sent as strings
    #[tokio::test]
    async fn test_query_order_resources() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1.0/d1/common/order-mgr/orders-resource/CS1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "totalSize": "2",
                "resources": [{"resource_id": "r1"}, {"resource_id": "r2"}]
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let result = client
            .bss()
            .query_order_resources(QueryOrderResource {
                order_id: Some("CS1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.total_size, Some(2));
    }
}

mod error_tests {
    use super::*;

    /// Test the vendor error code and message reach the caller
    #[tokio::test]
    async fn test_vendor_error_is_passed_through() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v1.0/d1/customer/order-mgr/orders/actions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error_code": "CBC.30000010",
                "error_msg": "The order does not exist."
            })))
            .mount(&server)
            .await;

        let client = client(&server);
        let err = client
            .bss()
            .cancel_order(CancelOrder {
                order_id: Some("missing".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        match err {
            Error::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 400);
                assert_eq!(code.as_deref(), Some("CBC.30000010"));
                assert_eq!(message, "The order does not exist.");
            },
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Test a call without a domain fails before any request
    #[tokio::test]
    async fn test_missing_domain() {
        let server = MockServer::start().await;

        let client = CloudClient::new(&Config {
            token: Some("test-token".to_string()),
            endpoints: EndpointOverrides {
                compute: None,
                bss: Some(server.uri()),
            },
            ..Default::default()
        })
        .unwrap();

        let err = client
            .bss()
            .query_order_list(QueryOrderList::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingParameter(ref p) if p == "domain_id"));
    }
}
