//! Request composition and response translation
//!
//! Renders the path, query string and JSON body of a resource, and overlays a
//! response body back onto it.

use super::schema::{fields_of, scalar_to_string, Resource, Role};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Encode one path segment
pub(crate) fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Substitute every URI field into the template.
///
/// Fails with `MissingParameter` naming the first unset URI field.
pub fn render_path<R: Resource>(res: &R) -> Result<String> {
    let fields = fields_of(res)?;
    substitute::<R>(&fields)
}

fn substitute<R: Resource>(fields: &Map<String, Value>) -> Result<String> {
    let mut path = R::BASE_PATH.to_string();
    for field in R::FIELDS.iter().filter(|f| f.role == Role::Uri) {
        let value = fields
            .get(field.wire)
            .and_then(scalar_to_string)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::MissingParameter(field.wire.to_string()))?;
        path = path.replace(&format!("{{{}}}", field.wire), &encode_segment(&value));
    }
    Ok(path)
}

/// Full request URI of a single-resource operation: the rendered template,
/// the id segment when `requires_id`, and the query fields.
pub fn render_uri<R: Resource>(res: &R, requires_id: bool) -> Result<String> {
    let fields = fields_of(res)?;
    let mut path = substitute::<R>(&fields)?;

    if requires_id {
        let id = fields
            .get(R::ID_KEY)
            .and_then(scalar_to_string)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::MissingParameter(R::ID_KEY.to_string()))?;
        path = match path.split_once('?') {
            Some((base, query)) => format!("{}/{}?{}", base, encode_segment(&id), query),
            None => format!("{}/{}", path, encode_segment(&id)),
        };
    }

    let query = render_query::<R>(&fields);
    Ok(append_query(path, &query))
}

/// Render the query fields of `R` in declaration order.
///
/// Unset fields are kept as empty values (`key=`) rather than omitted.
pub fn render_query<R: Resource>(fields: &Map<String, Value>) -> String {
    let pairs = R::FIELDS
        .iter()
        .filter(|f| f.role == Role::Query)
        .map(|f| {
            let value = fields
                .get(f.wire)
                .and_then(scalar_to_string)
                .unwrap_or_default();
            (f.wire, value)
        });
    encode_pairs(pairs)
}

/// URL-form-encode key/value pairs
pub fn encode_pairs<K, I>(pairs: I) -> String
where
    K: AsRef<str>,
    I: IntoIterator<Item = (K, String)>,
{
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key.as_ref(), &value);
    }
    serializer.finish()
}

/// Append an encoded query string, joining with `?` or `&` as needed
pub fn append_query(path: String, query: &str) -> String {
    if query.is_empty() {
        path
    } else if path.contains('?') {
        format!("{}&{}", path, query)
    } else {
        format!("{}?{}", path, query)
    }
}

/// Render the JSON body: populated body fields only, wrapped in the
/// resource key when the resource has one. The id is dropped unless
/// `include_id`.
pub fn render_body<R: Resource>(res: &R, include_id: bool) -> Result<Value> {
    let fields = fields_of(res)?;
    let body: Map<String, Value> = fields
        .into_iter()
        .filter(|(key, value)| {
            !value.is_null()
                && R::FIELDS.iter().all(|f| f.wire != key)
                && (include_id || key != R::ID_KEY)
        })
        .collect();

    Ok(match R::RESOURCE_KEY {
        Some(key) => {
            let mut wrapped = Map::new();
            wrapped.insert(key.to_string(), Value::Object(body));
            Value::Object(wrapped)
        },
        None => Value::Object(body),
    })
}

/// Overlay a response body onto `res` in place.
///
/// The body is unwrapped from the resource key when present. Only body
/// fields are taken from the response; URI and query fields keep the values
/// the request was built from. Non-object bodies leave `res` untouched.
pub fn translate_response<R: Resource>(res: &mut R, body: Value) -> Result<()> {
    let body = match (R::RESOURCE_KEY, body) {
        (Some(key), Value::Object(mut map)) if map.contains_key(key) => {
            map.remove(key).unwrap_or(Value::Null)
        },
        (_, body) => body,
    };

    let Value::Object(incoming) = body else {
        return Ok(());
    };

    let mut current = fields_of(res)?;
    for (key, value) in incoming {
        if R::FIELDS.iter().any(|f| f.wire == key) {
            continue;
        }
        if current.contains_key(&key) {
            current.insert(key, value);
        }
    }

    *res = serde_json::from_value(Value::Object(current))?;
    Ok(())
}
