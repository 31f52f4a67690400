//! Driver that propagates zone events to an HTTP agent next to each name server.
//!
//! | Event  | Request                          | Success          |
//! |--------|----------------------------------|------------------|
//! | create | `PUT {endpoint}/zones/{name}`    | 2xx              |
//! | update | `PUT {endpoint}/zones/{name}`    | 2xx              |
//! | delete | `DELETE {endpoint}/zones/{name}` | 2xx or 404       |
//! | ping   | `GET {endpoint}/health`          | 2xx              |

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use dns_controlplane_core::config::OptionSpec;
use dns_controlplane_core::types::{Domain, HealthStatus, RequestContext};

use crate::error::{BackendError, Result};
use crate::http_client::{create_http_client, execute_request, truncate_for_log};
use crate::traits::{Backend, BackendBase};
use crate::types::PoolServer;

/// Driver name in configuration.
pub const WEBHOOK: &str = "webhook";

/// Default request timeout (seconds)
const DEFAULT_TIMEOUT_SECS: i64 = 10;

#[derive(Debug, Serialize)]
struct ZonePayload<'a> {
    id: &'a str,
    name: &'a str,
    serial: i64,
    ttl: i32,
    tenant_id: &'a str,
    masters: Vec<String>,
    tsig_key: Option<&'a str>,
}

pub struct WebhookBackend {
    base: BackendBase,
    client: Client,
    endpoint: String,
    token: Option<String>,
    masters: Vec<String>,
}

impl WebhookBackend {
    /// # Errors
    /// `MissingOption` without an `endpoint`, `InvalidOption` for a
    /// malformed `token`, `timeout` or `masters`.
    pub fn new(server: PoolServer) -> Result<Self> {
        let base = BackendBase::new(server);
        let server = base.server();

        let endpoint = server
            .option("endpoint")
            .filter(|value| !value.is_null())
            .ok_or_else(|| BackendError::MissingOption {
                backend: WEBHOOK.to_string(),
                key: "endpoint".to_string(),
            })?
            .as_str()
            .ok_or_else(|| invalid("endpoint", "expected a URL"))?
            .trim_end_matches('/')
            .to_string();

        let token = match server.option("token").filter(|value| !value.is_null()) {
            None => None,
            Some(value) => Some(
                value
                    .as_str()
                    .ok_or_else(|| invalid("token", "expected a string"))?
                    .to_string(),
            ),
        };

        let timeout = match server.option("timeout").filter(|value| !value.is_null()) {
            None => DEFAULT_TIMEOUT_SECS,
            Some(value) => value
                .as_i64()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| invalid("timeout", "expected a positive number of seconds"))?,
        };

        let masters = match server.option("masters").filter(|value| !value.is_null()) {
            None => Vec::new(),
            Some(value) => value
                .as_string_list()
                .ok_or_else(|| invalid("masters", "expected a list of <ip-address>:<port>"))?,
        };

        let client = create_http_client(
            WEBHOOK,
            Duration::from_secs(timeout.unsigned_abs()),
        )?;

        Ok(Self {
            base,
            client,
            endpoint,
            token,
            masters,
        })
    }

    pub(crate) fn option_specs() -> Vec<OptionSpec> {
        vec![
            OptionSpec::unset("endpoint", "Base URL of the zone agent"),
            OptionSpec::unset("token", "Bearer token sent to the zone agent"),
            OptionSpec::new("timeout", DEFAULT_TIMEOUT_SECS, "Request timeout in seconds"),
        ]
    }

    fn zone_url(&self, name: &str) -> String {
        format!("{}/zones/{}", self.endpoint, urlencoding::encode(name))
    }

    fn request(&self, builder: RequestBuilder, ctx: &RequestContext) -> RequestBuilder {
        let builder = builder.header("X-Request-Id", ctx.request_id.as_str());
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn payload<'a>(&'a self, domain: &'a Domain) -> ZonePayload<'a> {
        ZonePayload {
            id: &domain.id,
            name: &domain.name,
            serial: domain.serial,
            ttl: domain.ttl,
            tenant_id: &domain.tenant_id,
            masters: self.masters.clone(),
            tsig_key: self.base.server().tsig_key.as_deref(),
        }
    }

    async fn put_zone(&self, ctx: &RequestContext, domain: &Domain) -> Result<()> {
        let url = self.zone_url(&domain.name);
        let builder = self.request(self.client.put(&url), ctx).json(&self.payload(domain));

        let (status, body) = execute_request(builder, WEBHOOK, "PUT", &url).await?;
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(remote(status, &body))
        }
    }
}

fn invalid(key: &str, detail: &str) -> BackendError {
    BackendError::InvalidOption {
        backend: WEBHOOK.to_string(),
        key: key.to_string(),
        detail: detail.to_string(),
    }
}

fn remote(status: u16, body: &str) -> BackendError {
    BackendError::Remote {
        backend: WEBHOOK.to_string(),
        status,
        message: truncate_for_log(body),
    }
}

#[async_trait]
impl Backend for WebhookBackend {
    fn base(&self) -> &BackendBase {
        &self.base
    }

    async fn create_domain(&self, ctx: &RequestContext, domain: &Domain) -> Result<()> {
        self.put_zone(ctx, domain).await
    }

    async fn update_domain(&self, ctx: &RequestContext, domain: &Domain) -> Result<()> {
        self.put_zone(ctx, domain).await
    }

    async fn delete_domain(&self, ctx: &RequestContext, domain: &Domain) -> Result<()> {
        let url = self.zone_url(&domain.name);
        let builder = self.request(self.client.delete(&url), ctx);

        let (status, body) = execute_request(builder, WEBHOOK, "DELETE", &url).await?;
        match status {
            200..=299 => Ok(()),
            404 => {
                log::info!(
                    "[{}] Zone {} already absent on {}",
                    ctx.request_id,
                    domain.name,
                    self.base.server().id
                );
                Ok(())
            }
            _ => Err(remote(status, &body)),
        }
    }

    async fn ping(&self, ctx: &RequestContext) -> HealthStatus {
        let url = format!("{}/health", self.endpoint);
        let builder = self.request(self.client.get(&url), ctx);

        let started = Instant::now();
        match execute_request(builder, WEBHOOK, "GET", &url).await {
            Ok((status, _)) => HealthStatus::measured((200..300).contains(&status), started.elapsed()),
            Err(e) => {
                log::warn!("[{}] Ping of {} failed: {e}", ctx.request_id, self.base.server().id);
                HealthStatus {
                    status: Some(false),
                    rtt: None,
                }
            }
        }
    }
}
