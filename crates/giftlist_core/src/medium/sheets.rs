//! Remote worksheet medium over the Sheets v4 values API.
//!
//! # Responsibility
//! - Read the whole worksheet value range and append single rows to it.
//! - Keep request plumbing (auth, timeouts, URL encoding) out of the store.
//!
//! # Invariants
//! - Appends use the `:append` endpoint with `RAW` input, one row per call.
//! - A worksheet with no values decodes as an empty table, not an error.
//! - Error bodies are trimmed to one line before they reach logs or users.

use crate::medium::{MediumError, MediumResult, RawRow, RowMedium, RowTable};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::slice;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";
pub const DEFAULT_WORKSHEET: &str = "Página1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const MAX_ERROR_BODY_CHARS: usize = 160;

/// Registry table stored in one spreadsheet worksheet.
#[derive(Debug, Clone)]
pub struct SheetsMedium {
    base_url: String,
    spreadsheet_id: String,
    worksheet: String,
    api_token: Option<String>,
    client: Client,
}

impl SheetsMedium {
    /// Creates a medium against the public Sheets endpoint with the default
    /// worksheet and timeout.
    pub fn new(spreadsheet_id: impl Into<String>) -> MediumResult<Self> {
        Self::with_timeout(spreadsheet_id, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        spreadsheet_id: impl Into<String>,
        timeout: Duration,
    ) -> MediumResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(MediumError::Request)?;
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: DEFAULT_WORKSHEET.to_string(),
            api_token: None,
            client,
        })
    }

    /// Points the medium at a different API host, e.g. a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_worksheet(mut self, worksheet: impl Into<String>) -> Self {
        self.worksheet = worksheet.into();
        self
    }

    /// Attaches a bearer token to every request when `Some`.
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.api_token = token;
        self
    }

    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url,
            urlencoding::encode(&self.spreadsheet_id),
            urlencoding::encode(&self.worksheet)
        )
    }

    fn append_url(&self) -> String {
        format!(
            "{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.values_url()
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl RowMedium for SheetsMedium {
    fn kind(&self) -> &'static str {
        "sheets"
    }

    fn read_all_rows(&self) -> MediumResult<RowTable> {
        let response = self
            .authorized(self.client.get(self.values_url()))
            .send()
            .map_err(MediumError::Request)?;
        let payload: ValueRange = decode_success(response)?;
        Ok(table_from_values(payload.values))
    }

    fn append_row(&mut self, row: &RawRow) -> MediumResult<()> {
        let body = AppendRequest {
            values: slice::from_ref(row),
        };
        let response = self
            .authorized(self.client.post(self.append_url()))
            .json(&body)
            .send()
            .map_err(MediumError::Request)?;
        ensure_success(response)
    }
}

/// Value-range payload returned by the worksheet read endpoint.
///
/// The API omits `values` entirely for a worksheet with no cells.
#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<RawRow>,
}

#[derive(Debug, Serialize)]
struct AppendRequest<'a> {
    values: &'a [RawRow],
}

fn table_from_values(values: Vec<RawRow>) -> RowTable {
    let mut values = values.into_iter();
    match values.next() {
        Some(header) => RowTable {
            header,
            rows: values.collect(),
        },
        None => RowTable::default(),
    }
}

fn decode_success<T: DeserializeOwned>(response: Response) -> MediumResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(remote_status_error(status.as_u16(), response));
    }
    response
        .json()
        .map_err(|err| MediumError::Decode(err.to_string()))
}

fn ensure_success(response: Response) -> MediumResult<()> {
    let status = response.status();
    if !status.is_success() {
        return Err(remote_status_error(status.as_u16(), response));
    }
    Ok(())
}

fn remote_status_error(status: u16, response: Response) -> MediumError {
    let body = response.text().unwrap_or_default();
    MediumError::RemoteStatus {
        status,
        body: body_snippet(&body),
    }
}

/// Collapses an error body to one bounded line.
fn body_snippet(body: &str) -> String {
    let flat: String = body
        .chars()
        .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
        .take(MAX_ERROR_BODY_CHARS)
        .collect();
    flat.trim().to_string()
}
