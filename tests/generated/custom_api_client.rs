// Generated by client-generator from User API v1. Do not edit by hand.

pub mod my_generated_api_client {
    /// Errors returned by [`CustomApiClient`].
    #[derive(Debug, thiserror::Error)]
    pub enum ClientError {
        /// The base URL cannot be extended with a path.
        #[error("invalid base URL `{0}`")]
        BaseUrl(String),
        /// Sending the request or decoding the response failed.
        #[error("request failed")]
        Request(#[from] reqwest::Error),
        /// The server answered with a non-success status.
        #[error("unexpected status {status}: {body}")]
        Status {
            /// Status returned by the server.
            status: reqwest::StatusCode,
            /// Raw response body.
            body: String,
        },
    }

    /// JSON payload attached to every error response.
    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    pub struct ErrorBody {
        /// Human readable description of the failure.
        pub message: String,
    }

    /// Simple health response returned by the `/healthcheck` route.
    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    pub struct HealthResponse {
        /// Health status, always "ok" once the listener accepts requests.
        pub status: String,
    }

    /// Synthetic user record returned by `GET /api/user/{id}`.
    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    pub struct User {
        /// Caller-supplied identifier, echoed back unchanged.
        pub id: i64,
        /// Display name derived from the identifier.
        pub name: String,
    }

    /// Typed client for User API v1.
    #[derive(Debug, Clone)]
    pub struct CustomApiClient {
        base_url: String,
        http: reqwest::Client,
    }

    impl CustomApiClient {
        /// Create a client sending requests to `base_url` through `http`.
        pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
            Self {
                base_url: base_url.into(),
                http,
            }
        }

        /// Base URL every request is resolved against.
        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        /// Fetch the user with the given identifier
        ///
        /// `GET /api/user/{id}`
        pub async fn get_user(&self, id: i64) -> Result<User, ClientError> {
            let url = self.endpoint(&["api", "user", &id.to_string()])?;
            let request = self.http.request(reqwest::Method::GET, url);
            let response = request.send().await?;
            Self::decode(response).await
        }

        /// Report service health
        ///
        /// `GET /healthcheck`
        pub async fn healthcheck(&self) -> Result<HealthResponse, ClientError> {
            let url = self.endpoint(&["healthcheck"])?;
            let request = self.http.request(reqwest::Method::GET, url);
            let response = request.send().await?;
            Self::decode(response).await
        }

        fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, ClientError> {
            let invalid = || ClientError::BaseUrl(self.base_url.clone());
            let mut url = reqwest::Url::parse(&self.base_url).map_err(|_| invalid())?;
            url.path_segments_mut()
                .map_err(|_| invalid())?
                .pop_if_empty()
                .extend(segments);
            Ok(url)
        }

        async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Status { status, body })
        }

        async fn decode<T: serde::de::DeserializeOwned>(
            response: reqwest::Response,
        ) -> Result<T, ClientError> {
            let response = Self::check(response).await?;
            Ok(response.json::<T>().await?)
        }
    }
}
