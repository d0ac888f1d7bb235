//! Key/value metadata shared by servers and images
//!
//! `GET|POST {base}/{id}/metadata` carries `{"metadata": {..}}`; the per-key
//! calls under `{base}/{id}/metadata/{key}` carry `{"meta": {key: value}}`.

use crate::cloud::client::CloudClient;
use crate::cloud::http::HttpMethod;
use crate::error::Result;
use crate::resource::ops::call;
use crate::resource::request::encode_segment;
use crate::resource::schema::Resource;
use serde_json::{json, Map, Value};

fn metadata_path<R: Resource>(id: &str, key: Option<&str>) -> String {
    let base = format!("{}/{}/metadata", R::BASE_PATH, encode_segment(id));
    match key {
        Some(key) => format!("{}/{}", base, encode_segment(key)),
        None => base,
    }
}

fn take_map(mut body: Value, key: &str) -> Map<String, Value> {
    match body.get_mut(key).map(Value::take) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// All metadata, or the single item `key`
pub(crate) async fn get<R: Resource>(
    client: &CloudClient,
    id: &str,
    key: Option<&str>,
) -> Result<Map<String, Value>> {
    let body = call::<R>(client, HttpMethod::Get, &metadata_path::<R>(id, key), None).await?;
    Ok(match key {
        Some(_) => take_map(body, "meta"),
        None => take_map(body, "metadata"),
    })
}

/// Merge `items` into the existing metadata; returns the merged map
pub(crate) async fn set<R: Resource>(
    client: &CloudClient,
    id: &str,
    items: Map<String, Value>,
) -> Result<Map<String, Value>> {
    let body = json!({ "metadata": items });
    let response = call::<R>(client, HttpMethod::Post, &metadata_path::<R>(id, None), Some(&body)).await?;
    Ok(take_map(response, "metadata"))
}

/// Create or replace one item
pub(crate) async fn update<R: Resource>(
    client: &CloudClient,
    id: &str,
    key: &str,
    value: Value,
) -> Result<Map<String, Value>> {
    let mut meta = Map::new();
    meta.insert(key.to_string(), value);
    let body = json!({ "meta": meta });
    let response = call::<R>(client, HttpMethod::Put, &metadata_path::<R>(id, Some(key)), Some(&body)).await?;
    Ok(take_map(response, "meta"))
}

/// Delete each key with its own request
pub(crate) async fn delete<R: Resource>(client: &CloudClient, id: &str, keys: &[&str]) -> Result<()> {
    for key in keys {
        call::<R>(client, HttpMethod::Delete, &metadata_path::<R>(id, Some(key)), None).await?;
    }
    Ok(())
}
