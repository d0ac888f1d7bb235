//! Generic resource operations
//!
//! create/get/update/delete/list/find and status polling over any
//! [`Resource`]. The façades are thin wrappers around these.

use super::request::{append_query, encode_pairs, render_body, render_path, render_uri, translate_response};
use super::schema::{id_of, name_of, status_of, with_field, Resource};
use crate::cloud::client::CloudClient;
use crate::cloud::http::HttpMethod;
use crate::error::{Error, Result};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;

/// Options of a list call
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Use the richer `/detail` projection when the resource has one
    pub details: bool,
    /// Follow further pages instead of issuing a single request
    pub paginated: bool,
    /// Filters; names the resource does not accept are dropped
    pub query: Vec<(String, String)>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    pub fn paginated(mut self, paginated: bool) -> Self {
        self.paginated = paginated;
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

fn ensure_allowed<R: Resource>(allowed: bool, operation: &'static str) -> Result<()> {
    if allowed {
        Ok(())
    } else {
        Err(Error::MethodNotSupported {
            resource: R::NAME,
            operation,
        })
    }
}

/// Create `res` remotely and return it with server-assigned fields populated
pub async fn create<R: Resource>(client: &CloudClient, mut res: R) -> Result<R> {
    ensure_allowed::<R>(R::ALLOW.create, "create")?;
    let uri = render_uri(&res, false)?;
    let body = render_body(&res, true)?;
    let response = client
        .request(R::SERVICE, R::CREATE_METHOD, &uri, Some(&body))
        .await
        .map_err(|e| e.for_resource(R::NAME))?;
    translate_response(&mut res, response)?;
    Ok(res)
}

/// Read `res` by its id (or by its URI fields alone when the resource is a
/// singleton)
pub async fn get<R: Resource>(client: &CloudClient, mut res: R) -> Result<R> {
    ensure_allowed::<R>(R::ALLOW.get, "get")?;
    let uri = render_uri(&res, R::REQUIRES_ID)?;
    let response = client
        .get(R::SERVICE, &uri)
        .await
        .map_err(|e| e.for_resource(R::NAME))?;
    translate_response(&mut res, response)?;
    Ok(res)
}

/// Send the populated body fields of `res` as an update
pub async fn update<R: Resource>(client: &CloudClient, mut res: R) -> Result<R> {
    ensure_allowed::<R>(R::ALLOW.update, "update")?;
    let uri = render_uri(&res, R::REQUIRES_ID)?;
    let body = render_body(&res, false)?;
    let response = client
        .request(R::SERVICE, R::UPDATE_METHOD, &uri, Some(&body))
        .await
        .map_err(|e| e.for_resource(R::NAME))?;
    translate_response(&mut res, response)?;
    Ok(res)
}

/// Delete `res`, appending `params` to the query string.
///
/// Returns `Ok(None)` when the resource was already gone and
/// `ignore_missing` is set. The returned resource carries whatever the
/// service answered with.
pub async fn delete<R: Resource>(
    client: &CloudClient,
    mut res: R,
    params: &[(&str, String)],
    ignore_missing: bool,
) -> Result<Option<R>> {
    ensure_allowed::<R>(R::ALLOW.delete, "delete")?;
    if ignore_missing && R::REQUIRES_ID && !id_of(&res).is_some_and(|id| !id.is_empty()) {
        tracing::debug!("{} without an id, nothing to delete", R::NAME);
        return Ok(None);
    }
    let uri = render_uri(&res, R::REQUIRES_ID)?;
    let uri = append_query(uri, &encode_pairs(params.iter().map(|(k, v)| (*k, v.clone()))));

    match client.delete(R::SERVICE, &uri).await {
        Ok(response) => {
            translate_response(&mut res, response)?;
            Ok(Some(res))
        },
        Err(e) if e.is_not_found() && ignore_missing => {
            tracing::debug!("{} already deleted: {}", R::NAME, uri);
            Ok(None)
        },
        Err(e) => Err(e.for_resource(R::NAME)),
    }
}

/// Cursor of the next page to request
struct Page {
    query: Vec<(String, String)>,
}

/// List resources as a lazy stream.
///
/// `template` supplies the URI fields (e.g. the parent server id); every
/// listed item starts as a copy of it. Pages are requested one at a time as
/// the stream is polled: after a full page the next request carries
/// `limit` = items received and `marker` = last id, or follows the
/// `<key>_links` next link when the service sends one.
pub fn list<'a, R: Resource>(
    client: &'a CloudClient,
    template: R,
    options: ListOptions,
) -> BoxStream<'a, Result<R>> {
    if let Err(e) = ensure_allowed::<R>(R::ALLOW.list, "list") {
        return stream::once(async move { Err(e) }).boxed();
    }

    let base = match render_path(&template) {
        Ok(path) => match (options.details, R::DETAIL_SUFFIX) {
            (true, Some(suffix)) => format!("{}{}", path, suffix),
            _ => path,
        },
        Err(e) => return stream::once(async move { Err(e) }).boxed(),
    };

    let query = accepted_filters::<R>(options.query);
    let paginated = options.paginated;

    stream::try_unfold(Some(Page { query }), move |page| {
        let template = template.clone();
        let base = base.clone();
        async move {
            let Some(page) = page else {
                return Ok(None);
            };

            let query = encode_pairs(page.query.iter().map(|(k, v)| (k.as_str(), v.clone())));
            let uri = append_query(base, &query);
            let response = client
                .get(R::SERVICE, &uri)
                .await
                .map_err(|e| e.for_resource(R::NAME))?;

            let next_link = next_link_query(&response, R::RESOURCES_KEY);
            let items = extract_items::<R>(response);

            let mut resources = Vec::with_capacity(items.len());
            for item in items {
                let mut res = template.clone();
                translate_response(&mut res, item)?;
                resources.push(res);
            }

            let next = if paginated {
                next_page(&page, &resources, next_link)
            } else {
                None
            };

            Ok::<_, Error>(Some((stream::iter(resources.into_iter().map(Ok::<R, Error>)), next)))
        }
    })
    .try_flatten()
    .boxed()
}

/// Keep only filters the resource accepts; `limit` and `marker` are always
/// accepted.
fn accepted_filters<R: Resource>(query: Vec<(String, String)>) -> Vec<(String, String)> {
    query
        .into_iter()
        .filter(|(key, _)| {
            let accepted =
                key == "limit" || key == "marker" || R::QUERY_PARAMS.contains(&key.as_str());
            if !accepted {
                tracing::warn!("Ignoring unsupported {} filter: {}", R::NAME, key);
            }
            accepted
        })
        .collect()
}

fn next_page<R: Resource>(
    page: &Page,
    received: &[R],
    next_link: Option<Vec<(String, String)>>,
) -> Option<Page> {
    if received.is_empty() {
        return None;
    }

    if let Some(query) = next_link {
        return Some(Page { query });
    }

    let requested = page
        .query
        .iter()
        .find(|(k, _)| k == "limit")
        .and_then(|(_, v)| v.parse::<usize>().ok());
    if requested.is_some_and(|limit| received.len() < limit) {
        return None;
    }

    let marker = received.last().and_then(id_of)?;
    let mut query: Vec<(String, String)> = page
        .query
        .iter()
        .filter(|(k, _)| k != "limit" && k != "marker")
        .cloned()
        .collect();
    query.push(("limit".to_string(), received.len().to_string()));
    query.push(("marker".to_string(), marker));
    Some(Page { query })
}

/// Query pairs of the `rel=next` entry of `<key>_links`, if any
fn next_link_query(response: &Value, key: Option<&str>) -> Option<Vec<(String, String)>> {
    let links = response.get(format!("{}_links", key?))?.as_array()?;
    let href = links
        .iter()
        .find(|link| link.get("rel").and_then(Value::as_str) == Some("next"))?
        .get("href")?
        .as_str()?;
    let url = url::Url::parse(href).ok()?;
    Some(url.query_pairs().into_owned().collect())
}

/// Pull the item array out of a list response
fn extract_items<R: Resource>(response: Value) -> Vec<Value> {
    let items = match (R::RESOURCES_KEY, response) {
        (Some(key), Value::Object(mut map)) => map.remove(key).unwrap_or(Value::Null),
        (_, other) => other,
    };
    match items {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}

/// Find a resource by id or name.
///
/// Tries a direct get first, then lists (following pages when `paginated`)
/// and matches either the id or the name. Several matches fail with
/// `DuplicateResource`.
pub async fn find<R: Resource>(
    client: &CloudClient,
    template: &R,
    name_or_id: &str,
    ignore_missing: bool,
    paginated: bool,
) -> Result<Option<R>> {
    if R::ALLOW.get && R::REQUIRES_ID && !name_or_id.is_empty() {
        let candidate = with_field(template, R::ID_KEY, Value::String(name_or_id.to_string()))?;
        match get(client, candidate).await {
            Ok(found) => return Ok(Some(found)),
            Err(e) if e.is_not_found() => {},
            Err(e) => return Err(e),
        }
    }

    let mut found: Option<R> = None;
    if R::ALLOW.list {
        let options = ListOptions::new().paginated(paginated);
        let mut items = list(client, template.clone(), options);
        while let Some(item) = items.try_next().await? {
            let matches = id_of(&item).as_deref() == Some(name_or_id)
                || name_of(&item).as_deref() == Some(name_or_id);
            if !matches {
                continue;
            }
            if found.is_some() {
                return Err(Error::DuplicateResource {
                    resource: R::NAME.to_string(),
                    name_or_id: name_or_id.to_string(),
                });
            }
            found = Some(item);
        }
    }

    match found {
        Some(item) => Ok(Some(item)),
        None if ignore_missing => Ok(None),
        None => Err(Error::not_found(
            R::NAME,
            format!("No {} found for {}", R::NAME, name_or_id),
        )),
    }
}

/// Poll `res` until its status reaches `status`.
///
/// The comparison is case-insensitive. Reaching any of `failures` fails with
/// `ResourceFailure`; running past `wait` fails with `Timeout`.
pub async fn wait_for_status<R: Resource>(
    client: &CloudClient,
    res: R,
    status: &str,
    failures: &[&str],
    interval: Duration,
    wait: Duration,
) -> Result<R> {
    let matches = |current: &Option<String>, expected: &str| {
        current
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(expected))
    };

    if matches(&status_of(&res), status) {
        return Ok(res);
    }

    let id = id_of(&res).unwrap_or_default();
    let deadline = Instant::now() + wait;
    let mut current = res;

    loop {
        current = get(client, current).await?;
        let observed = status_of(&current);
        tracing::debug!(
            "{} {} status {:?}, waiting for {}",
            R::NAME,
            id,
            observed,
            status
        );

        if matches(&observed, status) {
            return Ok(current);
        }

        if let Some(failed) = failures.iter().find(|f| matches(&observed, **f)) {
            return Err(Error::ResourceFailure {
                resource: R::NAME,
                id,
                status: failed.to_string(),
            });
        }

        if Instant::now() >= deadline {
            return Err(Error::Timeout {
                resource: R::NAME,
                id,
                status: status.to_string(),
                waited_secs: wait.as_secs(),
            });
        }

        tokio::time::sleep(interval).await;
    }
}

/// Issue a request outside the standard shapes and return the raw body.
///
/// Used by actions (`POST /servers/{id}/action`) and sub-paths such as
/// metadata keys, where the response is not the resource itself.
pub async fn call<R: Resource>(
    client: &CloudClient,
    method: HttpMethod,
    uri: &str,
    body: Option<&Value>,
) -> Result<Value> {
    client
        .request(R::SERVICE, method, uri, body)
        .await
        .map_err(|e| e.for_resource(R::NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::client::ServiceType;
    use crate::resource::schema::Allow;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Thing {
        id: Option<String>,
        name: Option<String>,
    }

    impl Resource for Thing {
        const NAME: &'static str = "thing";
        const SERVICE: ServiceType = ServiceType::Compute;
        const BASE_PATH: &'static str = "/things";
        const ALLOW: Allow = Allow::READ_ONLY;
        const RESOURCES_KEY: Option<&'static str> = Some("things");
        const QUERY_PARAMS: &'static [&'static str] = &["status"];
    }

    fn things(ids: &[&str]) -> Vec<Thing> {
        ids.iter()
            .map(|id| Thing {
                id: Some(id.to_string()),
                name: None,
            })
            .collect()
    }

    #[test]
    fn unknown_filters_are_dropped() {
        let kept = accepted_filters::<Thing>(vec![
            ("status".to_string(), "ACTIVE".to_string()),
            ("flavor".to_string(), "x".to_string()),
            ("limit".to_string(), "5".to_string()),
        ]);
        assert_eq!(
            kept,
            vec![
                ("status".to_string(), "ACTIVE".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn full_page_continues_from_last_id() {
        let page = Page {
            query: vec![("status".to_string(), "ACTIVE".to_string())],
        };
        let next = next_page(&page, &things(&["a", "b"]), None).unwrap();
        assert_eq!(
            next.query,
            vec![
                ("status".to_string(), "ACTIVE".to_string()),
                ("limit".to_string(), "2".to_string()),
                ("marker".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn short_or_empty_page_stops() {
        let page = Page {
            query: vec![("limit".to_string(), "3".to_string())],
        };
        assert!(next_page(&page, &things(&["a"]), None).is_none());
        assert!(next_page::<Thing>(&page, &[], None).is_none());
    }

    #[test]
    fn next_link_wins_over_marker() {
        let response = serde_json::json!({
            "things": [],
            "things_links": [{"rel": "next", "href": "https://ecs.example.com/v2.1/p/things?limit=1&marker=zz"}]
        });
        let query = next_link_query(&response, Thing::RESOURCES_KEY).unwrap();
        assert_eq!(
            query,
            vec![
                ("limit".to_string(), "1".to_string()),
                ("marker".to_string(), "zz".to_string()),
            ]
        );
        let page = Page { query: vec![] };
        let next = next_page(&page, &things(&["a"]), Some(query)).unwrap();
        assert_eq!(next.query[1].1, "zz");
    }

    #[test]
    fn items_are_taken_from_envelope() {
        let items = extract_items::<Thing>(serde_json::json!({"things": [{"id": "1"}]}));
        assert_eq!(items.len(), 1);
        assert!(extract_items::<Thing>(serde_json::json!({"other": []})).is_empty());
    }

    #[test]
    fn disallowed_operation_is_rejected() {
        let err = ensure_allowed::<Thing>(Thing::ALLOW.create, "create").unwrap_err();
        assert!(matches!(
            err,
            Error::MethodNotSupported {
                resource: "thing",
                operation: "create"
            }
        ));
    }
}
