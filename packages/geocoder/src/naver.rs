//! Naver Cloud geocode client.
//!
//! See <https://api.ncloud-docs.com/docs/ai-naver-mapsgeocoding-geocode>

use bizscope_models::GeoPoint;

use crate::GeocodeError;

/// Default geocode endpoint for the Naver Cloud API gateway.
pub const DEFAULT_BASE_URL: &str = "https://maps.apigw.ntruss.com/map-geocode/v2/geocode";

/// Naver Cloud geocoder.
pub struct NaverGeocoder {
    client_id: String,
    client_secret: String,
    base_url: String,
    client: reqwest::Client,
}

impl NaverGeocoder {
    /// Creates a geocoder with explicit credentials.
    #[must_use]
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Creates a geocoder from `NAVER_CLIENT_ID` / `NAVER_CLIENT_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::NotReady`] when either variable is unset —
    /// the caller fails immediately instead of queuing requests.
    pub fn from_env() -> Result<Self, GeocodeError> {
        let client_id = std::env::var("NAVER_CLIENT_ID").map_err(|_| GeocodeError::NotReady)?;
        let client_secret =
            std::env::var("NAVER_CLIENT_SECRET").map_err(|_| GeocodeError::NotReady)?;
        Ok(Self::new(client_id, client_secret))
    }

    /// Overrides the endpoint URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolves a free-text address to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the request fails, the provider answers
    /// with a non-OK status, or no address matches.
    pub async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodeError> {
        let resp = self
            .client
            .get(&self.base_url)
            .header("x-ncp-apigw-api-key-id", &self.client_id)
            .header("x-ncp-apigw-api-key", &self.client_secret)
            .header("Accept", "application/json")
            .query(&[("query", address)])
            .send()
            .await?;

        let body: serde_json::Value = resp.json().await?;
        parse_response(&body, address)
    }
}

/// Parses a Naver geocode response body.
fn parse_response(body: &serde_json::Value, address: &str) -> Result<GeoPoint, GeocodeError> {
    let status = body["status"].as_str().unwrap_or_default();
    if status != "OK" {
        return Err(GeocodeError::Failed {
            address: address.to_string(),
        });
    }

    let Some(first) = body["addresses"].as_array().and_then(|a| a.first()) else {
        return Err(GeocodeError::NoResults {
            address: address.to_string(),
        });
    };

    // Naver returns x (longitude) and y (latitude) as decimal strings.
    let lat = first["y"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing y in geocode response".to_string(),
        })?;

    let lng = first["x"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| GeocodeError::Parse {
            message: "Missing x in geocode response".to_string(),
        })?;

    Ok(GeoPoint { lat, lng })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_address() {
        let body = serde_json::json!({
            "status": "OK",
            "addresses": [
                { "roadAddress": "서울특별시 마포구", "x": "126.9236", "y": "37.5563" },
                { "roadAddress": "다른 주소", "x": "127.0", "y": "37.0" }
            ]
        });
        let point = parse_response(&body, "서울 마포구").unwrap();
        assert!((point.lat - 37.5563).abs() < 1e-4);
        assert!((point.lng - 126.9236).abs() < 1e-4);
    }

    #[test]
    fn non_ok_status_names_the_address() {
        let body = serde_json::json!({ "status": "INVALID_REQUEST", "addresses": [] });
        let err = parse_response(&body, "서울 마포구").unwrap_err();
        assert!(matches!(err, GeocodeError::Failed { ref address } if address == "서울 마포구"));
    }

    #[test]
    fn zero_results_names_the_address() {
        let body = serde_json::json!({ "status": "OK", "addresses": [] });
        let err = parse_response(&body, "없는 동네").unwrap_err();
        assert!(matches!(err, GeocodeError::NoResults { ref address } if address == "없는 동네"));
    }

    #[test]
    fn missing_coordinate_is_a_parse_error() {
        let body = serde_json::json!({
            "status": "OK",
            "addresses": [{ "x": "126.9236" }]
        });
        let err = parse_response(&body, "서울 마포구").unwrap_err();
        assert!(matches!(err, GeocodeError::Parse { .. }));
    }
}
