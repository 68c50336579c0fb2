use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::types::*;

const BASE_URL: &str = "https://api.spoonacular.com";
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the Spoonacular product search endpoint. Holds one shared
/// reqwest client; every call is bounded by [`LOOKUP_TIMEOUT`].
pub struct NutritionClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl NutritionClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
            timeout: LOOKUP_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
            timeout,
        }
    }

    /// Look up a dish name and return the best candidate, if any.
    /// Returns `Ok(None)` when the API knows nothing about the query.
    pub async fn search(&self, query: &str) -> Result<Option<Product>, LookupError> {
        debug!("Spoonacular search: {query:?}");

        let resp = self
            .client
            .get(format!("{}/food/products/search", self.base_url))
            .query(&[
                ("query", query),
                ("number", "1"),
                ("apiKey", self.api_key.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!("HTTP {status}")));
        }

        let body: SearchResponse = resp.json().await.map_err(classify)?;
        Ok(body.products.into_iter().next())
    }
}

fn classify(err: reqwest::Error) -> LookupError {
    if err.is_timeout() {
        LookupError::Timeout
    } else if err.is_decode() {
        LookupError::MalformedResponse(err.to_string())
    } else {
        LookupError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{StatusCode, header};
    use axum::routing::get;
    use tokio::net::TcpListener;

    /// Serve a stub Spoonacular API on an ephemeral local port.
    async fn serve_app(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}")
    }

    async fn client_against(status: StatusCode, body: &'static str) -> NutritionClient {
        let app = Router::new().route(
            "/food/products/search",
            get(move || async move {
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }),
        );
        let base_url = serve_app(app).await;
        NutritionClient::with_base_url("test-key".to_string(), base_url, LOOKUP_TIMEOUT)
    }

    #[tokio::test]
    async fn returns_first_candidate() {
        let client = client_against(
            StatusCode::OK,
            r#"{"products":[{"id":1,"title":"Pizza Margherita","calories":266}]}"#,
        )
        .await;
        let product = client.search("пицца маргарита").await.unwrap().unwrap();
        assert_eq!(product.title.as_deref(), Some("Pizza Margherita"));
        assert_eq!(product.calories, Some(266.0));
    }

    #[tokio::test]
    async fn empty_list_is_no_candidates() {
        let client = client_against(StatusCode::OK, r#"{"products":[]}"#).await;
        assert!(client.search("asdkjasd").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upstream_error_status_is_transport() {
        let client =
            client_against(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"down"}"#).await;
        assert!(matches!(
            client.search("борщ").await,
            Err(LookupError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn slow_upstream_is_timeout() {
        let app = Router::new().route(
            "/food/products/search",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "application/json")],
                    r#"{"products":[]}"#,
                )
            }),
        );
        let base_url = serve_app(app).await;
        let client = NutritionClient::with_base_url(
            "test-key".to_string(),
            base_url,
            Duration::from_millis(50),
        );
        assert!(matches!(
            client.search("борщ").await,
            Err(LookupError::Timeout)
        ));
    }

    #[tokio::test]
    async fn garbage_body_is_malformed_response() {
        let client = client_against(StatusCode::OK, "not json at all").await;
        assert!(matches!(
            client.search("борщ").await,
            Err(LookupError::MalformedResponse(_))
        ));
    }

    #[test]
    fn missing_fields_decode_as_none() {
        let body: SearchResponse =
            serde_json::from_str(r#"{"products":[{"id":7}]}"#).unwrap();
        let first = body.products.into_iter().next().unwrap();
        assert!(first.title.is_none());
        assert!(first.calories.is_none());
    }

    #[test]
    fn empty_and_absent_product_list_mean_no_candidates() {
        let empty: SearchResponse = serde_json::from_str(r#"{"products":[]}"#).unwrap();
        assert!(empty.products.is_empty());

        let absent: SearchResponse =
            serde_json::from_str(r#"{"totalProducts":0}"#).unwrap();
        assert!(absent.products.is_empty());
    }
}
