use kube_client::{api::ListParams, Api, Client};
use kube_core::{ApiResource, DynamicObject};

use super::{Factory, ResourceClient, ResourceId, Scope, TransportError};

/// [`Factory`] backed by an apiserver connection.
#[derive(Clone)]
pub struct KubeFactory {
    client: Client,
}

impl KubeFactory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl From<Client> for KubeFactory {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}

impl Factory for KubeFactory {
    type Client = KubeResourceClient;

    fn resolve(&self, resource: &ResourceId) -> Self::Client {
        KubeResourceClient {
            client: self.client.clone(),
            api_resource: resource.to_api_resource(),
            resource: resource.clone(),
        }
    }
}

/// Lists [`DynamicObject`]s of one kind through [`Api`].
#[derive(Clone)]
pub struct KubeResourceClient {
    client: Client,
    api_resource: ApiResource,
    resource: ResourceId,
}

impl KubeResourceClient {
    fn api(&self, scope: &Scope) -> Api<DynamicObject> {
        match self.resource.target_namespace(scope) {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &self.api_resource),
            None => Api::all_with(self.client.clone(), &self.api_resource),
        }
    }
}

impl ResourceClient for KubeResourceClient {
    async fn list(&self, scope: &Scope) -> Result<Vec<DynamicObject>, TransportError> {
        let api = self.api(scope);
        let list = api
            .list(&ListParams::default())
            .await
            .map_err(|source| TransportError::Kube {
                resource: self.resource.to_string(),
                source,
            })?;
        Ok(list.items)
    }
}
