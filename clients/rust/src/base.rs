use planner_api_structs::ErrorResponse;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

pub(crate) struct BaseClient {
    address: String,
    client: Client,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum APIErrorVariant {
    Network,
    MalformedResponse,
    BadClientData,
    NotFound,
    Unprocessable,
    UnexpectedStatusCode,
}

#[derive(Debug)]
pub struct APIError {
    pub variant: APIErrorVariant,
    pub status: Option<StatusCode>,
    /// Error body sent by the server, when there was one
    pub response: Option<ErrorResponse>,
}

impl APIError {
    fn new(variant: APIErrorVariant) -> Self {
        Self {
            variant,
            status: None,
            response: None,
        }
    }

    /// Unmatched text of a failed natural-language parse
    pub fn remainder(&self) -> Option<&str> {
        self.response.as_ref()?.remainder.as_deref()
    }
}

pub type APIResponse<T> = Result<T, APIError>;

impl BaseClient {
    pub fn new(address: String) -> Self {
        Self {
            address,
            client: Client::new(),
        }
    }

    fn get_client(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.address, path);
        self.client.request(method, url)
    }

    async fn check_status_code(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<Response> {
        let status = res.status();
        if status == expected_status_code {
            return Ok(res);
        }
        let variant = match status {
            StatusCode::BAD_REQUEST => APIErrorVariant::BadClientData,
            StatusCode::NOT_FOUND => APIErrorVariant::NotFound,
            StatusCode::UNPROCESSABLE_ENTITY => APIErrorVariant::Unprocessable,
            _ => APIErrorVariant::UnexpectedStatusCode,
        };
        Err(APIError {
            variant,
            status: Some(status),
            response: res.json::<ErrorResponse>().await.ok(),
        })
    }

    async fn handle_api_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        self.check_status_code(res, expected_status_code)
            .await?
            .json::<T>()
            .await
            .map_err(|_| APIError::new(APIErrorVariant::MalformedResponse))
    }

    async fn send(&self, builder: RequestBuilder) -> APIResponse<Response> {
        builder
            .send()
            .await
            .map_err(|_| APIError::new(APIErrorVariant::Network))
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.send(self.get_client(Method::GET, &path)).await?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn get_with_query<T: for<'de> Deserialize<'de>, Q: Serialize>(
        &self,
        path: String,
        query: &Q,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .send(self.get_client(Method::GET, &path).query(query))
            .await?;
        self.handle_api_response(res, expected_status_code).await
    }

    /// For endpoints that answer with a plain text document
    pub async fn get_text<Q: Serialize>(
        &self,
        path: String,
        query: &Q,
        expected_status_code: StatusCode,
    ) -> APIResponse<String> {
        let res = self
            .send(self.get_client(Method::GET, &path).query(query))
            .await?;
        self.check_status_code(res, expected_status_code)
            .await?
            .text()
            .await
            .map_err(|_| APIError::new(APIErrorVariant::MalformedResponse))
    }

    pub async fn delete<T: for<'de> Deserialize<'de>>(
        &self,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self.send(self.get_client(Method::DELETE, &path)).await?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn put<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .send(self.get_client(Method::PUT, &path).json(&body))
            .await?;
        self.handle_api_response(res, expected_status_code).await
    }

    pub async fn post<T: for<'de> Deserialize<'de>, S: Serialize>(
        &self,
        body: S,
        path: String,
        expected_status_code: StatusCode,
    ) -> APIResponse<T> {
        let res = self
            .send(self.get_client(Method::POST, &path).json(&body))
            .await?;
        self.handle_api_response(res, expected_status_code).await
    }
}
