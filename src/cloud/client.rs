//! Cloud Client
//!
//! Explicit context passed to every façade operation: it owns the HTTP
//! transport, the token, endpoint resolution and per-service microversions.

use super::auth::{Credentials, AUTH_HEADER};
use super::http::{HttpClient, HttpMethod};
use crate::bss::Bss;
use crate::compute::Compute;
use crate::config::{Config, EndpointOverrides};
use crate::error::{Error, Result};
use serde_json::Value;

/// Remote service a resource lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Compute,
    Bss,
}

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Compute => "compute",
            ServiceType::Bss => "bss",
        }
    }
}

/// Main cloud client
#[derive(Clone)]
pub struct CloudClient {
    pub credentials: Credentials,
    pub http: HttpClient,
    region: String,
    project_id: Option<String>,
    domain_id: Option<String>,
    endpoints: EndpointOverrides,
    compute_microversion: Option<String>,
}

impl CloudClient {
    /// Create a new client from a resolved configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::new()?;

        Ok(Self {
            credentials: Credentials::new(config.token.clone()),
            http,
            region: config.effective_region(),
            project_id: config.project_id.clone(),
            domain_id: config.domain_id.clone(),
            endpoints: config.endpoints.clone(),
            compute_microversion: config.compute_microversion.clone(),
        })
    }

    /// Compute (ECS) operations
    pub fn compute(&self) -> Compute<'_> {
        Compute { client: self }
    }

    /// Billing (BSS) operations
    pub fn bss(&self) -> Bss<'_> {
        Bss { client: self }
    }

    pub fn project_id(&self) -> Result<&str> {
        self.project_id
            .as_deref()
            .ok_or_else(|| Error::MissingParameter("project_id".to_string()))
    }

    pub fn domain_id(&self) -> Result<&str> {
        self.domain_id
            .as_deref()
            .ok_or_else(|| Error::MissingParameter("domain_id".to_string()))
    }

    /// Switch to a different region
    pub fn switch_region(&mut self, region: &str) {
        self.region = region.to_string();
    }

    /// Microversion negotiated for a service, if any
    pub fn microversion(&self, service: ServiceType) -> Option<&str> {
        match service {
            ServiceType::Compute => self.compute_microversion.as_deref(),
            ServiceType::Bss => None,
        }
    }

    /// Resolve the base URL of a service. A configured override is used
    /// verbatim; otherwise the public endpoint for the region is derived.
    pub fn endpoint(&self, service: ServiceType) -> Result<String> {
        let overridden = match service {
            ServiceType::Compute => self.endpoints.compute.as_ref(),
            ServiceType::Bss => self.endpoints.bss.as_ref(),
        };
        if let Some(url) = overridden {
            return Ok(url.trim_end_matches('/').to_string());
        }

        match service {
            ServiceType::Compute => Ok(format!(
                "https://ecs.{}.myhuaweicloud.com/v2.1/{}",
                self.region,
                self.project_id()?
            )),
            ServiceType::Bss => Ok("https://bss.myhuaweicloud.com/v1.0".to_string()),
        }
    }

    /// Build an absolute URL for a path relative to a service endpoint
    pub fn service_url(&self, service: ServiceType, path: &str) -> Result<String> {
        Ok(format!(
            "{}/{}",
            self.endpoint(service)?,
            path.trim_start_matches('/')
        ))
    }

    /// Issue one request against a service and return its JSON body
    pub async fn request(
        &self,
        service: ServiceType,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self.service_url(service, path)?;
        let token = self.credentials.get_token().await?;

        let mut headers = vec![(AUTH_HEADER.to_string(), token)];
        if let Some(version) = self.microversion(service) {
            headers.push(("X-OpenStack-Nova-API-Version".to_string(), version.to_string()));
            headers.push((
                "OpenStack-API-Version".to_string(),
                format!("{} {}", service.as_str(), version),
            ));
        }

        self.http.send(method, &url, &headers, body).await
    }

    pub async fn get(&self, service: ServiceType, path: &str) -> Result<Value> {
        self.request(service, HttpMethod::Get, path, None).await
    }

    pub async fn delete(&self, service: ServiceType, path: &str) -> Result<Value> {
        self.request(service, HttpMethod::Delete, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: Config) -> CloudClient {
        CloudClient::new(&config).unwrap()
    }

    #[test]
    fn compute_endpoint_is_derived_from_region_and_project() {
        let c = client(Config {
            region: Some("ap-southeast-1".to_string()),
            project_id: Some("p1".to_string()),
            ..Default::default()
        });
        assert_eq!(
            c.endpoint(ServiceType::Compute).unwrap(),
            "https://ecs.ap-southeast-1.myhuaweicloud.com/v2.1/p1"
        );
    }

    #[test]
    fn compute_endpoint_needs_project() {
        let c = client(Config::default());
        assert!(matches!(
            c.endpoint(ServiceType::Compute),
            Err(Error::MissingParameter(p)) if p == "project_id"
        ));
    }

    #[test]
    fn override_replaces_discovery() {
        let c = client(Config {
            endpoints: EndpointOverrides {
                compute: None,
                bss: Some("http://127.0.0.1:8080/v1.0/".to_string()),
            },
            ..Default::default()
        });
        assert_eq!(
            c.service_url(ServiceType::Bss, "dom/customer/order-mgr/order/pay")
                .unwrap(),
            "http://127.0.0.1:8080/v1.0/dom/customer/order-mgr/order/pay"
        );
    }

    #[test]
    fn microversion_applies_to_compute_only() {
        let c = client(Config {
            compute_microversion: Some("2.26".to_string()),
            ..Default::default()
        });
        assert_eq!(c.microversion(ServiceType::Compute), Some("2.26"));
        assert_eq!(c.microversion(ServiceType::Bss), None);
    }

    #[test]
    fn switch_region_changes_derived_endpoint() {
        let mut c = client(Config {
            project_id: Some("p".to_string()),
            ..Default::default()
        });
        c.switch_region("la-south-2");
        assert!(c
            .endpoint(ServiceType::Compute)
            .unwrap()
            .contains("ecs.la-south-2."));
    }
}
