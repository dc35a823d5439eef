use std::sync::Arc;

use log::{debug, log_enabled, trace};
use reqwest::{Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::{Semaphore, SemaphorePermit};

use crate::{
    config::Config,
    error::{Error, Result},
};

use super::{DataResponse, Gateway, MutationResponse, Query, RecordId, Table};

const PROJECT_ID_HEADER: &str = "x-project-id";
const PUBLIC_KEY_HEADER: &str = "x-public-key";

/// Gateway speaking JSON over HTTP to the hosted backend
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    semaphore: Arc<Semaphore>,
    base_url: String,
    project_id: String,
    public_key: String,
    retries: u32,
}

impl HttpGateway {
    pub fn new(config: &Config) -> Self {
        let permits = config.limit().max(1);
        Self {
            client: Client::new(),
            semaphore: Arc::new(Semaphore::new(permits)),
            base_url: config.backend_url().trim_end_matches('/').to_string(),
            project_id: config.project_id().to_string(),
            public_key: config.public_key().to_string(),
            retries: config.retries(),
        }
    }

    async fn client(&self) -> Result<(ClientWithMiddleware, SemaphorePermit)> {
        let semaphore = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| Error::remote("gateway is closed"))?;
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(self.retries);
        let client = ClientBuilder::new(self.client.clone())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();
        Ok((client, semaphore))
    }

    fn wrap_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(PROJECT_ID_HEADER, &self.project_id)
            .header(PUBLIC_KEY_HEADER, &self.public_key)
    }

    fn records_url(&self, table: Table) -> String {
        format!("{}/tables/{}/records", self.base_url, table)
    }

    async fn send<T: DeserializeOwned>(&self, table: Table, request: RequestBuilder) -> Result<T> {
        let response = self.wrap_request(request).send().await?;
        let status = response.status();
        debug!("{} {} -> {}", table, response.url(), status);

        let body = response.text().await?;
        read_body(table, status, &body)
    }
}

/// Turn a response into `T`, or the failure the backend reported
fn read_body<T: DeserializeOwned>(table: Table, status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(Error::remote(format!("{status}: {body}")));
    }

    if log_enabled!(log::Level::Trace) {
        match serde_json::from_str::<Value>(body).and_then(|v| serde_json::to_string_pretty(&v)) {
            Ok(pretty) => trace!("{}", pretty),
            Err(_) => trace!("{}", body),
        }
    }

    serde_json::from_str(body).map_err(|source| Error::Malformed { table, source })
}

impl Gateway for HttpGateway {
    async fn fetch_records(&self, table: Table, query: &Query) -> Result<Vec<Value>> {
        let (client, _semaphore) = self.client().await?;
        let url = format!("{}/tables/{}/fetch", self.base_url, table);
        let response: DataResponse<Vec<Value>> =
            self.send(table, client.post(url).json(query)).await?;
        Ok(response.data.unwrap_or_default())
    }

    async fn get_record_by_id(&self, table: Table, id: RecordId) -> Result<Option<Value>> {
        let (client, _semaphore) = self.client().await?;
        let url = format!("{}/{}", self.records_url(table), id);
        let response: DataResponse<Value> = self.send(table, client.get(url)).await?;
        Ok(response.data.filter(|data| !data.is_null()))
    }

    async fn create_record(&self, table: Table, record: Value) -> Result<Value> {
        let (client, _semaphore) = self.client().await?;
        let body = json!({ "records": [record] });
        let response: MutationResponse = self
            .send(table, client.post(self.records_url(table)).json(&body))
            .await?;
        response.into_record()
    }

    async fn update_record(&self, table: Table, record: Value) -> Result<Value> {
        let (client, _semaphore) = self.client().await?;
        let body = json!({ "records": [record] });
        let response: MutationResponse = self
            .send(table, client.put(self.records_url(table)).json(&body))
            .await?;
        response.into_record()
    }

    async fn delete_records(&self, table: Table, ids: Vec<RecordId>) -> Result<()> {
        let (client, _semaphore) = self.client().await?;
        let body = json!({ "RecordIds": ids });
        let response: MutationResponse = self
            .send(table, client.delete(self.records_url(table)).json(&body))
            .await?;
        response.into_ack()
    }
}
