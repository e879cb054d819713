//! HTTP client for the POS API.

use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use campus_coffee_core::{PosDto, PosId};

use crate::error::{HarnessError, Result};

/// Thin wrapper around `reqwest` for the `/api/pos` endpoints.
///
/// Every call is awaited to completion and checked against the single
/// status the endpoint returns on success.
#[derive(Debug, Clone)]
pub struct PosClient {
    http: Client,
    base_url: Url,
}

impl PosClient {
    /// Create a client for a service listening at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::InvalidUrl` if `base_url` cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| HarnessError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| HarnessError::InvalidUrl(format!("{path}: {e}")))
    }

    /// List all POS entries.
    ///
    /// # Errors
    ///
    /// Returns an error unless the service answers 200 with a POS list.
    pub async fn list(&self) -> Result<Vec<PosDto>> {
        let url = self.url("/api/pos")?;
        let response = self.http.get(url.clone()).send().await?;
        json(Method::GET, &url, response, StatusCode::OK).await
    }

    /// Get a POS by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error unless the service answers 200.
    pub async fn get(&self, id: PosId) -> Result<PosDto> {
        let url = self.url(&format!("/api/pos/{id}"))?;
        let response = self.http.get(url.clone()).send().await?;
        json(Method::GET, &url, response, StatusCode::OK).await
    }

    /// Find a POS by exact name.
    ///
    /// # Errors
    ///
    /// Returns an error unless the service answers 200.
    pub async fn find_by_name(&self, name: &str) -> Result<PosDto> {
        let mut url = self.url("/api/pos/filter")?;
        url.query_pairs_mut().append_pair("name", name);

        let response = self.http.get(url.clone()).send().await?;
        json(Method::GET, &url, response, StatusCode::OK).await
    }

    /// Create a POS. Server-assigned fields of `pos` are not sent.
    ///
    /// # Errors
    ///
    /// Returns an error unless the service answers 201.
    pub async fn create(&self, pos: &PosDto) -> Result<PosDto> {
        let url = self.url("/api/pos")?;
        let response = self
            .http
            .post(url.clone())
            .json(&pos.without_server_fields())
            .send()
            .await?;
        json(Method::POST, &url, response, StatusCode::CREATED).await
    }

    /// Create every POS in order and return the stored records.
    ///
    /// # Errors
    ///
    /// Stops at the first failed creation.
    pub async fn create_all(&self, list: &[PosDto]) -> Result<Vec<PosDto>> {
        let mut created = Vec::with_capacity(list.len());
        for pos in list {
            created.push(self.create(pos).await?);
        }
        Ok(created)
    }

    /// Attempt to create a POS and return the response status, whatever it is.
    ///
    /// # Errors
    ///
    /// Returns an error only if no response was received.
    pub async fn create_status(&self, pos: &PosDto) -> Result<StatusCode> {
        let url = self.url("/api/pos")?;
        let response = self
            .http
            .post(url)
            .json(&pos.without_server_fields())
            .send()
            .await?;
        Ok(response.status())
    }

    /// Replace a POS. The identifier is taken from `pos.id`.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::MissingId` if `pos` has no identifier, or an
    /// error unless the service answers 200.
    pub async fn update(&self, pos: &PosDto) -> Result<PosDto> {
        let id = pos
            .id
            .ok_or_else(|| HarnessError::MissingId(pos.name.clone()))?;
        let url = self.url(&format!("/api/pos/{id}"))?;

        let body = PosDto {
            id: Some(id),
            ..pos.without_server_fields()
        };
        let response = self.http.put(url.clone()).json(&body).send().await?;
        json(Method::PUT, &url, response, StatusCode::OK).await
    }

    /// Delete a POS.
    ///
    /// # Errors
    ///
    /// Returns an error unless the service answers 204.
    pub async fn delete(&self, id: PosId) -> Result<()> {
        let url = self.url(&format!("/api/pos/{id}"))?;
        let response = self.http.delete(url.clone()).send().await?;
        expect_status(Method::DELETE, &url, response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}

async fn expect_status(
    method: Method,
    url: &Url,
    response: Response,
    expected: StatusCode,
) -> Result<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(HarnessError::UnexpectedStatus {
        method,
        url: url.to_string(),
        status,
        expected,
        body,
    })
}

async fn json<T: DeserializeOwned>(
    method: Method,
    url: &Url,
    response: Response,
    expected: StatusCode,
) -> Result<T> {
    let response = expect_status(method, url, response, expected).await?;
    Ok(response.json().await?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = PosClient::new("http://127.0.0.1:4242").unwrap();
        assert_eq!(
            client.url("/api/pos/7").unwrap().as_str(),
            "http://127.0.0.1:4242/api/pos/7"
        );
    }

    #[test]
    fn test_name_is_query_encoded() {
        let client = PosClient::new("http://127.0.0.1:4242").unwrap();
        let mut url = client.url("/api/pos/filter").unwrap();
        url.query_pairs_mut().append_pair("name", "Bäcker Görtz & Co");
        assert_eq!(
            url.query(),
            Some("name=B%C3%A4cker+G%C3%B6rtz+%26+Co")
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            PosClient::new("not a url"),
            Err(HarnessError::InvalidUrl(_))
        ));
    }
}
