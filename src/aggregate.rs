use std::{
    collections::{hash_map, HashMap},
    time::Duration,
};

use k8s_openapi::api::rbac::v1::ClusterRole;
use kube_core::{DynamicObject, Resource};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{
    config::{Config, DuplicatePolicy},
    lister::{Factory, ResourceClient, ResourceId, TransportError, CLUSTER_ROLES},
    name::QualifiedName,
};

/// Lists all cluster roles, keyed by name.
pub async fn list_cluster_roles<F: Factory>(
    factory: &F,
    config: &Config,
) -> Result<HashMap<String, ClusterRole>, Error> {
    list_with(factory, &CLUSTER_ROLES, config).await
}

/// Lists every object of the type `K`, keyed by qualified name.
pub async fn list<K, F>(factory: &F, config: &Config) -> Result<HashMap<String, K>, Error>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
    K::Scope: 'static,
    F: Factory,
{
    list_with(factory, &ResourceId::of::<K>(), config).await
}

/// Lists the collection `resource` and converts each object into `K`.
///
/// Either every object converts or the call fails;
/// a partially filled map is never returned.
pub async fn list_with<K, F>(
    factory: &F,
    resource: &ResourceId,
    config: &Config,
) -> Result<HashMap<String, K>, Error>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
    F: Factory,
{
    let client = factory.resolve(resource);
    log::debug!("Listing {resource} in {:?}", config.scope);
    let objects = fetch(&client, config).await?;
    log::debug!("Listed {} objects of {resource}", objects.len());
    aggregate(objects, config.duplicates)
}

/// Performs the single list request, bounded by the timeout and cancellation in `config`.
pub async fn fetch<C: ResourceClient>(
    client: &C,
    config: &Config,
) -> Result<Vec<DynamicObject>, Error> {
    let request = async {
        match config.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, client.list(&config.scope)).await
            {
                Ok(result) => result.map_err(Error::Transport),
                Err(_) => Err(Error::TimedOut(timeout)),
            },
            None => client.list(&config.scope).await.map_err(Error::Transport),
        }
    };

    match &config.cancel {
        Some(token) => tokio::select! {
            biased;
            () = token.cancelled() => Err(Error::Cancelled),
            result = request => result,
        },
        None => request.await,
    }
}

/// Converts `objects` into a map keyed by qualified name.
pub fn aggregate<K>(
    objects: Vec<DynamicObject>,
    duplicates: DuplicatePolicy,
) -> Result<HashMap<String, K>, Error>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
{
    let mut out = HashMap::with_capacity(objects.len());

    for object in objects {
        let (key, typed) = convert_keyed::<K>(object).map_err(|err| {
            log::debug!("Conversion failed: {err}: {:?}", err.mismatch);
            err
        })?;

        match out.entry(key.to_string()) {
            hash_map::Entry::Vacant(entry) => {
                entry.insert(typed);
            }
            hash_map::Entry::Occupied(mut entry) => match duplicates {
                DuplicatePolicy::Overwrite => {
                    log::warn!("Duplicate object {}, keeping the later one", entry.key());
                    entry.insert(typed);
                }
                DuplicatePolicy::Reject => return Err(Error::Duplicate(entry.key().clone())),
            },
        }
    }

    Ok(out)
}

/// Decodes a [`DynamicObject`] into the typed resource `K`.
///
/// Fields unknown to `K` are ignored.
/// Fails if a field has the wrong shape, if the object declares another
/// `apiVersion` or `kind`, or if it has no name.
pub fn convert<K>(object: DynamicObject) -> Result<K, ConversionError>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
{
    convert_keyed(object).map(|(_, typed)| typed)
}

fn convert_keyed<K>(object: DynamicObject) -> Result<(QualifiedName, K), ConversionError>
where
    K: Resource<DynamicType = ()> + DeserializeOwned,
{
    let fail = |mismatch: Mismatch| ConversionError {
        kind: K::kind(&()).to_lowercase(),
        mismatch,
    };

    let DynamicObject {
        types,
        metadata,
        data,
    } = object;

    let mut document = match data {
        Value::Object(fields) => fields,
        Value::Null => Map::new(),
        _ => return Err(fail(Mismatch::NotAMap)),
    };
    let metadata = serde_json::to_value(metadata).map_err(|err| fail(Mismatch::Decode(err)))?;
    document.insert("metadata".to_string(), metadata);
    if let Some(types) = types {
        document.insert("apiVersion".to_string(), Value::String(types.api_version));
        document.insert("kind".to_string(), Value::String(types.kind));
    }

    let typed: K =
        serde_json::from_value(Value::Object(document)).map_err(|err| fail(Mismatch::Decode(err)))?;
    let key = QualifiedName::from_resource(&typed).ok_or_else(|| fail(Mismatch::MissingName))?;
    Ok((key, typed))
}

/// A listed object does not have the shape of the expected kind.
#[derive(Debug, thiserror::Error)]
#[error("expecting {kind} resource")]
pub struct ConversionError {
    /// The expected kind, in lowercase.
    pub kind: String,
    #[source]
    pub mismatch: Mismatch,
}

/// How an object failed to convert.
#[derive(Debug, thiserror::Error)]
pub enum Mismatch {
    #[error("object body is not a map")]
    NotAMap,
    #[error(transparent)]
    Decode(serde_json::Error),
    #[error("object has no name")]
    MissingName,
}

/// The error type returned by [`list`] and friends.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("duplicate object {0}")]
    Duplicate(String),
    #[error("list request timed out after {0:?}")]
    TimedOut(Duration),
    #[error("list request cancelled")]
    Cancelled,
}
