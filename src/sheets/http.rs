//! Google Sheets v4 REST client (blocking).

use super::{A1Range, Row, SheetsApi};
use crate::errors::{AppError, AppResult};
use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";

/// Authenticated handle to one spreadsheet. Built once per process and
/// handed to the repository.
pub struct HttpSheets {
    client: Client,
    base: Url,
    spreadsheet_id: String,
    access_token: String,
}

#[derive(Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    #[serde(default)]
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Row>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl HttpSheets {
    pub fn new(
        api_base: &str,
        spreadsheet_id: &str,
        access_token: &str,
        timeout: Duration,
    ) -> AppResult<Self> {
        if spreadsheet_id.trim().is_empty() {
            return Err(AppError::Config("spreadsheet_id is not set".into()));
        }
        if access_token.trim().is_empty() {
            return Err(AppError::Config("access token is not set".into()));
        }

        let base = Url::parse(api_base)
            .map_err(|e| AppError::Config(format!("invalid api base '{}': {}", api_base, e)))?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base,
            spreadsheet_id: spreadsheet_id.to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// `<base>/v4/spreadsheets/<segments...>`, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config(format!("api base cannot be a base: {}", self.base)))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets"])
            .extend(segments);
        Ok(url)
    }

    fn values_url(&self, range: &A1Range, suffix: &str) -> AppResult<Url> {
        let target = format!("{}{}", range, suffix);
        self.url(&[&self.spreadsheet_id, "values", &target])
    }

    /// Send the request and return the body, turning non-2xx answers into
    /// `AppError::SheetsApi` with the API's own message.
    fn send(&self, req: RequestBuilder) -> AppResult<String> {
        let response = req.bearer_auth(&self.access_token).send()?;
        let status = response.status();
        let body = response.text()?;

        if status.is_success() {
            return Ok(body);
        }
        Err(api_error(status.as_u16(), body))
    }
}

/// Error for a non-2xx answer. Google wraps the message in
/// `{"error": {"message": ...}}`; any other body is kept as is.
fn api_error(status: u16, body: String) -> AppError {
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    AppError::SheetsApi { status, message }
}

impl SheetsApi for HttpSheets {
    fn sheet_titles(&self) -> AppResult<Vec<String>> {
        let url = self.url(&[&self.spreadsheet_id])?;
        let body = self.send(
            self.client
                .get(url)
                .query(&[("fields", "sheets.properties.title")]),
        )?;
        let meta: SpreadsheetMeta = serde_json::from_str(&body)?;
        Ok(meta
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    fn get_values(&self, range: &A1Range) -> AppResult<Vec<Row>> {
        let url = self.values_url(range, "")?;
        let body = self.send(self.client.get(url))?;
        let vr: ValueRange = serde_json::from_str(&body)?;
        Ok(vr.values)
    }

    fn clear_values(&self, range: &A1Range) -> AppResult<()> {
        let url = self.values_url(range, ":clear")?;
        self.send(self.client.post(url).json(&json!({})))?;
        Ok(())
    }

    fn update_values(&self, range: &A1Range, rows: &[Row]) -> AppResult<()> {
        let url = self.values_url(range, "")?;
        let payload = json!({
            "range": range.to_string(),
            "majorDimension": "ROWS",
            "values": rows,
        });
        self.send(
            self.client
                .put(url)
                .query(&[("valueInputOption", "RAW")])
                .json(&payload),
        )?;
        Ok(())
    }

    fn add_sheet(&self, title: &str) -> AppResult<()> {
        let target = format!("{}:batchUpdate", self.spreadsheet_id);
        let url = self.url(&[&target])?;
        let payload = json!({
            "requests": [
                { "addSheet": { "properties": { "title": title } } }
            ]
        });
        self.send(self.client.post(url).json(&payload))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpSheets {
        HttpSheets::new(
            "https://sheets.example.test/",
            "sheet-id",
            "token",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn builds_values_urls() {
        let c = client();
        let range = A1Range::cells("2025-04-07", "A2:H").unwrap();
        let url = c.values_url(&range, "").unwrap();
        assert!(
            url.as_str()
                .starts_with("https://sheets.example.test/v4/spreadsheets/sheet-id/values/")
        );
        assert!(url.as_str().contains("2025-04-07"));

        let url = c.values_url(&range, ":clear").unwrap();
        assert!(url.as_str().ends_with(":clear"));
    }

    #[test]
    fn unparseable_range_is_a_missing_range() {
        let body = r#"{"error":{"code":400,"message":"Unable to parse range: '2025-04-07'!A2:H","status":"INVALID_ARGUMENT"}}"#;
        let err = api_error(400, body.to_string());
        assert!(err.is_missing_range());
        assert!(matches!(
            &err,
            AppError::SheetsApi { status: 400, message } if message == "Unable to parse range: '2025-04-07'!A2:H"
        ));
    }

    #[test]
    fn not_found_is_a_missing_range() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        assert!(api_error(404, body.to_string()).is_missing_range());
    }

    #[test]
    fn other_errors_keep_the_raw_body() {
        let err = api_error(502, "<html>Bad Gateway</html>".to_string());
        assert!(!err.is_missing_range());
        assert!(matches!(
            &err,
            AppError::SheetsApi { status: 502, message } if message == "<html>Bad Gateway</html>"
        ));

        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        assert!(!api_error(403, body.to_string()).is_missing_range());
    }

    #[test]
    fn rejects_missing_credentials() {
        assert!(matches!(
            HttpSheets::new(DEFAULT_API_BASE, "", "t", Duration::from_secs(1)),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            HttpSheets::new(DEFAULT_API_BASE, "id", " ", Duration::from_secs(1)),
            Err(AppError::Config(_))
        ));
    }
}
