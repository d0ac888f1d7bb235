//! Resource definitions
//!
//! A resource is a plain serde struct: the Rust field name is the local name,
//! the serde name is the wire name. Each type declares a static [`Field`]
//! table marking which wire fields are substituted into the path template and
//! which are sent as query parameters; every other serialized field is a body
//! field.
//!
//! All fields of a resource struct are `Option`s and the struct carries
//! `#[serde(default)]`, so any subset of fields can be populated and `None`
//! means "unset".

use crate::cloud::client::ServiceType;
use crate::cloud::http::HttpMethod;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Role of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Substituted into the `{placeholder}` of the same name
    Uri,
    /// Appended as a query parameter; unset renders as an empty value
    Query,
}

/// Static declaration of a non-body field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub wire: &'static str,
    pub role: Role,
}

impl Field {
    pub const fn uri(wire: &'static str) -> Self {
        Self {
            wire,
            role: Role::Uri,
        }
    }

    pub const fn query(wire: &'static str) -> Self {
        Self {
            wire,
            role: Role::Query,
        }
    }
}

/// Operations a resource permits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Allow {
    pub create: bool,
    pub get: bool,
    pub update: bool,
    pub delete: bool,
    pub list: bool,
}

impl Allow {
    pub const NONE: Allow = Allow {
        create: false,
        get: false,
        update: false,
        delete: false,
        list: false,
    };

    pub const ALL: Allow = Allow {
        create: true,
        get: true,
        update: true,
        delete: true,
        list: true,
    };

    pub const READ_ONLY: Allow = Allow {
        get: true,
        list: true,
        ..Allow::NONE
    };
}

/// A typed REST resource
pub trait Resource: Serialize + DeserializeOwned + Default + Clone + Send + Sync + 'static {
    /// Human name used in errors and logs
    const NAME: &'static str;
    const SERVICE: ServiceType;
    /// Path template relative to the service endpoint, with `{field}`
    /// placeholders for every URI field
    const BASE_PATH: &'static str;
    const ALLOW: Allow;

    /// Envelope key of a single resource body, e.g. `server`
    const RESOURCE_KEY: Option<&'static str> = None;
    /// Envelope key of a list body, e.g. `servers`
    const RESOURCES_KEY: Option<&'static str> = None;
    const ID_KEY: &'static str = "id";
    const NAME_KEY: &'static str = "name";
    const FIELDS: &'static [Field] = &[];
    /// Filters accepted by list calls besides `limit` and `marker`
    const QUERY_PARAMS: &'static [&'static str] = &[];
    /// Whether get/update/delete address `{BASE_PATH}/{id}`
    const REQUIRES_ID: bool = true;
    const CREATE_METHOD: HttpMethod = HttpMethod::Post;
    const UPDATE_METHOD: HttpMethod = HttpMethod::Put;
    /// Path suffix of the richer list projection, e.g. `/detail`
    const DETAIL_SUFFIX: Option<&'static str> = None;
}

/// Serialize a resource into its wire-named field map
pub fn fields_of<R: Resource>(res: &R) -> Result<Map<String, Value>> {
    match serde_json::to_value(res)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::Config(format!(
            "{} does not serialize to an object",
            R::NAME
        ))),
    }
}

/// Render a scalar field value the way it appears in a URL
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Role of a wire field in `R`, `None` for body fields
pub fn role_of<R: Resource>(wire: &str) -> Option<Role> {
    R::FIELDS.iter().find(|f| f.wire == wire).map(|f| f.role)
}

pub fn id_of<R: Resource>(res: &R) -> Option<String> {
    field_string(res, R::ID_KEY)
}

pub fn name_of<R: Resource>(res: &R) -> Option<String> {
    field_string(res, R::NAME_KEY)
}

pub fn status_of<R: Resource>(res: &R) -> Option<String> {
    field_string(res, "status")
}

fn field_string<R: Resource>(res: &R, key: &str) -> Option<String> {
    fields_of(res)
        .ok()?
        .get(key)
        .and_then(scalar_to_string)
}

/// Copy of `res` with one wire field replaced
pub fn with_field<R: Resource>(res: &R, key: &str, value: Value) -> Result<R> {
    let mut fields = fields_of(res)?;
    fields.insert(key.to_string(), value);
    Ok(serde_json::from_value(Value::Object(fields))?)
}

/// A resource carrying only its id
pub fn from_id<R: Resource>(id: &str) -> Result<R> {
    with_field(&R::default(), R::ID_KEY, Value::String(id.to_string()))
}

/// Either an identifier or an existing resource value.
///
/// Façade operations accept `impl Into<ResourceRef<R>>`, so callers can pass
/// `"id"`, a `String`, or a resource they already hold.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceRef<R> {
    Id(String),
    Resource(R),
}

impl<R: Resource> ResourceRef<R> {
    /// Resolve to the identifier, failing if a resource value has none
    pub fn id(&self) -> Result<String> {
        match self {
            ResourceRef::Id(id) => Ok(id.clone()),
            ResourceRef::Resource(res) => {
                id_of(res).ok_or_else(|| Error::MissingParameter(R::ID_KEY.to_string()))
            },
        }
    }

    /// Resolve to a resource value, building one from a bare id
    pub fn into_resource(self) -> Result<R> {
        match self {
            ResourceRef::Id(id) => from_id(&id),
            ResourceRef::Resource(res) => Ok(res),
        }
    }
}

impl<R> From<&str> for ResourceRef<R> {
    fn from(id: &str) -> Self {
        ResourceRef::Id(id.to_string())
    }
}

impl<R> From<String> for ResourceRef<R> {
    fn from(id: String) -> Self {
        ResourceRef::Id(id)
    }
}

impl<R> From<&String> for ResourceRef<R> {
    fn from(id: &String) -> Self {
        ResourceRef::Id(id.clone())
    }
}

impl<R: Resource> From<R> for ResourceRef<R> {
    fn from(res: R) -> Self {
        ResourceRef::Resource(res)
    }
}

impl<R: Resource> From<&R> for ResourceRef<R> {
    fn from(res: &R) -> Self {
        ResourceRef::Resource(res.clone())
    }
}

/// Placeholder names in a path template, in order of appearance
pub fn template_placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        names.push(&after[..end]);
        rest = &after[end + 1..];
    }
    names
}
