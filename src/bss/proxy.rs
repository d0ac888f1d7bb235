use super::period_order::*;
use crate::cloud::client::CloudClient;
use crate::error::{Error, Result};
use crate::resource::ops;
use crate::resource::schema::{fields_of, with_field, Resource};
use serde_json::Value;

/// Billing service operations, scoped to one customer domain
pub struct Bss<'a> {
    pub(crate) client: &'a CloudClient,
}

impl<'a> Bss<'a> {
    /// Fill in the configured domain id unless `res` already carries one
    fn scoped<R: Resource>(&self, res: R) -> Result<R> {
        let has_domain = fields_of(&res)?
            .get("domain_id")
            .is_some_and(|v| !v.is_null());
        if has_domain {
            return Ok(res);
        }
        let domain_id = self.client.domain_id()?;
        with_field(&res, "domain_id", Value::String(domain_id.to_string()))
    }

    /// Pay a yearly/monthly order
    pub async fn pay_period_order(&self, attrs: PayPeriodOrder) -> Result<PayPeriodOrder> {
        let res = self.scoped(attrs)?;
        tracing::info!("Paying order {:?}", res.order_id);
        ops::create(self.client, res).await
    }

    /// Unsubscribe the resources of an order; the result lists the
    /// unsubscription orders created
    pub async fn unsubscribe_period_order(&self, attrs: UnsubscribePeriodOrder) -> Result<UnsubscribePeriodOrder> {
        let res = self.scoped(attrs)?;
        let order_id = res.order_id.clone().unwrap_or_default();
        tracing::info!("Unsubscribing order {}", order_id);
        ops::delete(self.client, res, &[], false)
            .await?
            .ok_or_else(|| Error::not_found(UnsubscribePeriodOrder::NAME, order_id))
    }

    /// Cancel an unpaid order; `action_id` defaults to `cancel`
    pub async fn cancel_order(&self, attrs: CancelOrder) -> Result<CancelOrder> {
        let mut res = self.scoped(attrs)?;
        if res.action_id.is_none() {
            res.action_id = Some("cancel".to_string());
        }
        tracing::info!("Cancelling order {:?}", res.order_id);
        ops::create(self.client, res).await
    }

    pub async fn query_order_detail(&self, attrs: QueryOrderDetail) -> Result<QueryOrderDetail> {
        ops::get(self.client, self.scoped(attrs)?).await
    }

    pub async fn query_order_list(&self, attrs: QueryOrderList) -> Result<QueryOrderList> {
        ops::get(self.client, self.scoped(attrs)?).await
    }

    pub async fn query_refund_order(&self, attrs: QueryRefundOrder) -> Result<QueryRefundOrder> {
        ops::get(self.client, self.scoped(attrs)?).await
    }

    pub async fn query_order_resources(&self, attrs: QueryOrderResource) -> Result<QueryOrderResource> {
        ops::get(self.client, self.scoped(attrs)?).await
    }
}
