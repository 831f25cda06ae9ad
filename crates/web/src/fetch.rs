use agrimind_widget::error::{ConnectSnafu, ReadBodySnafu};
use agrimind_widget::{ChatRequest, ChatTransport, WidgetResult};
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_net::http::Request;

/// Posts chat requests with the browser's `fetch`.
///
/// Non-success statuses are only logged; the body alone decides what renders.
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl ChatTransport for FetchTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send(&self, request: ChatRequest) -> LocalBoxFuture<'static, WidgetResult<String>> {
        let endpoint = self.endpoint.clone();

        async move {
            // `json` sets `Content-Type: application/json`.
            let prepared = Request::post(&endpoint).json(&request).map_err(|error| {
                ConnectSnafu {
                    stage: "fetch-build-request",
                    endpoint: endpoint.clone(),
                    message: error.to_string(),
                }
                .build()
            })?;

            let response = prepared.send().await.map_err(|error| {
                ConnectSnafu {
                    stage: "fetch-send",
                    endpoint: endpoint.clone(),
                    message: error.to_string(),
                }
                .build()
            })?;

            if !response.ok() {
                log::warn!(
                    "chat endpoint {endpoint} answered with status {}",
                    response.status()
                );
            }

            response.text().await.map_err(|error| {
                ReadBodySnafu {
                    stage: "fetch-read-body",
                    endpoint: endpoint.clone(),
                    message: error.to_string(),
                }
                .build()
            })
        }
        .boxed_local()
    }
}
