use agrimind_widget::error::{ConnectSnafu, ReadBodySnafu};
use agrimind_widget::{ChatRequest, ChatTransport, WidgetResult};
use futures::FutureExt;
use futures::future::LocalBoxFuture;

/// Posts chat requests over HTTP with reqwest.
///
/// No timeout is configured here; the client's own defaults apply.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl ChatTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send(&self, request: ChatRequest) -> LocalBoxFuture<'static, WidgetResult<String>> {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();

        async move {
            let response = client
                .post(&endpoint)
                .json(&request)
                .send()
                .await
                .map_err(|error| {
                    ConnectSnafu {
                        stage: "http-send",
                        endpoint: endpoint.clone(),
                        message: error.to_string(),
                    }
                    .build()
                })?;

            let status = response.status();
            if !status.is_success() {
                // The body still decides what renders.
                tracing::warn!(endpoint = %endpoint, status = status.as_u16(), "chat endpoint returned an error status");
            }

            response.text().await.map_err(|error| {
                ReadBodySnafu {
                    stage: "http-read-body",
                    endpoint: endpoint.clone(),
                    message: error.to_string(),
                }
                .build()
            })
        }
        .boxed_local()
    }
}
