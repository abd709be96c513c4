use crate::{
    config::TransportConfig,
    error::{ClientError, ConfigurationError, ServiceError},
    filter::{Filter, query_string},
    resource::{Resource, Verb, join_url},
    transport::{HttpTransport, Request, Transport},
};
use modelkit_core::{
    Document,
    entity::Entity,
    mapper::{self, DecodeError},
};
use serde_json::Value as JsonValue;

///
/// ResourceClient
///
/// CRUD over one transport. Each call encodes through the mapper, lets the
/// resource shape the request, sends it, checks the status, lets the
/// resource shape the response, and decodes.
///
/// Concurrent calls are independent; racing updates of the same identifier
/// are not serialized. Dropping a future abandons its result.
///

#[derive(Clone, Debug)]
pub struct ResourceClient<T> {
    transport: T,
}

impl ResourceClient<HttpTransport> {
    /// Client over the default `reqwest` transport.
    pub fn http(config: &TransportConfig) -> Result<Self, ClientError> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: Transport> ResourceClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// POST the entity to the collection endpoint; decode the created entity.
    pub async fn create<M: Resource>(&self, entity: &Entity<M>) -> Result<Entity<M>, ClientError> {
        let url = endpoint::<M>()?;
        let body = M::prepare_request(Verb::Create, entity.encode()?);

        let json = self.exchange::<M>(Verb::Create, url, Some(body)).await?;
        decode_one::<M>(Verb::Create, json)
    }

    /// GET one instance by identifier.
    pub async fn retrieve_one<M: Resource>(&self, id: &str) -> Result<Entity<M>, ClientError> {
        let path = M::identified_path(id).ok_or(ConfigurationError::MissingObjectPath {
            model: M::PATH,
        })?;
        let url = with_query(
            join_url(&endpoint::<M>()?, &path),
            &M::prepare_request(Verb::Retrieve, Document::new()),
        );

        let json = self.exchange::<M>(Verb::Retrieve, url, None).await?;
        decode_one::<M>(Verb::Retrieve, json)
    }

    /// GET the collection, optionally filtered. Order follows the response.
    pub async fn retrieve_many<M: Resource>(
        &self,
        filter: Option<&Filter>,
    ) -> Result<Vec<Entity<M>>, ClientError> {
        let params = filter.map(|f| f.params().clone()).unwrap_or_default();
        let url = with_query(endpoint::<M>()?, &M::prepare_request(Verb::Retrieve, params));

        let json = self
            .exchange::<M>(Verb::Retrieve, url, None)
            .await?
            .ok_or(ServiceError::MissingBody {
                verb: Verb::Retrieve,
            })?;

        Ok(mapper::decode_many::<M>(&json)?)
    }

    /// PUT the entity to its object path; decode the updated entity.
    pub async fn update<M: Resource>(&self, entity: &Entity<M>) -> Result<Entity<M>, ClientError> {
        let url = object_url(entity)?;
        let body = M::prepare_request(Verb::Update, entity.encode()?);

        let json = self.exchange::<M>(Verb::Update, url, Some(body)).await?;
        decode_one::<M>(Verb::Update, json)
    }

    /// DELETE the entity at its object path. Any response body is ignored.
    pub async fn destroy<M: Resource>(&self, entity: &Entity<M>) -> Result<(), ClientError> {
        let url = with_query(
            object_url(entity)?,
            &M::prepare_request(Verb::Destroy, Document::new()),
        );

        self.exchange::<M>(Verb::Destroy, url, None).await?;

        Ok(())
    }

    // send one request; Ok(None) means a successful empty body
    async fn exchange<M: Resource>(
        &self,
        verb: Verb,
        url: String,
        body: Option<Document>,
    ) -> Result<Option<JsonValue>, ClientError> {
        let request = Request {
            method: verb.method(),
            url,
            body: body.map(JsonValue::Object),
        };
        tracing::debug!(
            model = M::PATH,
            %verb,
            method = %request.method,
            url = %request.url,
            "sending request"
        );

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            tracing::debug!(model = M::PATH, %verb, status = response.status, "request rejected");
            return Err(ServiceError::Status {
                status: response.status,
                body: response.text(),
            }
            .into());
        }

        if response.is_empty() {
            return Ok(None);
        }

        let json: JsonValue =
            serde_json::from_slice(&response.body).map_err(|err| DecodeError::Json {
                model: M::PATH,
                message: err.to_string(),
            })?;

        Ok(Some(M::prepare_response(verb, json)))
    }
}

fn endpoint<M: Resource>() -> Result<String, ConfigurationError> {
    M::endpoint().ok_or(ConfigurationError::MissingEndpoint { model: M::PATH })
}

fn object_url<M: Resource>(entity: &Entity<M>) -> Result<String, ConfigurationError> {
    let path = entity
        .object_path()
        .ok_or(ConfigurationError::MissingObjectPath { model: M::PATH })?;

    Ok(join_url(&endpoint::<M>()?, &path))
}

fn with_query(mut url: String, params: &Document) -> String {
    let query = query_string(params);
    if !query.is_empty() {
        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&query);
    }

    url
}

fn decode_one<M: Resource>(verb: Verb, json: Option<JsonValue>) -> Result<Entity<M>, ClientError> {
    let json = json.ok_or(ServiceError::MissingBody { verb })?;

    Ok(mapper::decode::<M>(&json)?)
}

///
/// TESTS
///
