//! Vendor adapter over reqwest: wire a real HTTP library into the factory,
//! point a client at a public API, and fetch a handful of records.

use async_trait::async_trait;
use httpsmith::{ClientFactory, Method, RequestDescriptor, RequestOptions, Vendor};

/// Failure shape consumers of this vendor see.
#[derive(Debug)]
enum ApiFailure {
    /// The server answered with a non-success status.
    Status { status: u16, body: String },
    /// The API could not be reached at all.
    Unreachable(String),
}

struct ReqwestVendor {
    http: reqwest::Client,
}

impl ReqwestVendor {
    fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Vendor for ReqwestVendor {
    type Raw = reqwest::Response;
    type RawError = ApiFailure;
    type Value = serde_json::Value;
    type Error = ApiFailure;

    async fn execute(
        &self,
        request: &RequestDescriptor,
    ) -> Result<reqwest::Response, ApiFailure> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Options => reqwest::Method::OPTIONS,
        };

        let mut builder = self.http.request(method, &request.url);
        if let Some(headers) = &request.headers {
            for (name, value) in headers.iter() {
                builder = builder.header(name, value);
            }
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        builder
            .send()
            .await
            .map_err(|e| ApiFailure::Unreachable(e.to_string()))
    }

    async fn adapt_response(
        &self,
        response: reqwest::Response,
    ) -> Result<serde_json::Value, ApiFailure> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiFailure::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json()
            .await
            .map_err(|e| ApiFailure::Unreachable(e.to_string()))
    }

    async fn adapt_error(&self, error: ApiFailure) -> Result<serde_json::Value, ApiFailure> {
        Err(error)
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("httpsmith=debug")
        .init();

    let factory = ClientFactory::new(ReqwestVendor::new());

    let random_data = factory
        .client()
        .base_url("https://random-data-api.com/api/v2")
        .build();

    match random_data
        .get("/beers", RequestOptions::new().query_param("size", 5))
        .await
    {
        Ok(beers) => println!("{beers:#}"),
        Err(error) => eprintln!("request failed: {error:?}"),
    }
}
