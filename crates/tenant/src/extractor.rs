// Tenant selection extraction
// Reads the current organization from the selection cookie, or a header for API clients

use crate::error::{Result, TenantError};
use axum::http::{header, HeaderMap};

/// Header consulted when no selection cookie is present
pub const ORGANIZATION_HEADER: &str = "x-organization-id";

#[derive(Debug, Clone)]
pub struct TenantExtractor {
    cookie_name: String,
    cookie_max_age_secs: i64,
}

impl Default for TenantExtractor {
    fn default() -> Self {
        Self::new("organizationId", 60 * 60 * 24 * 365)
    }
}

impl TenantExtractor {
    pub fn new(cookie_name: impl Into<String>, cookie_max_age_secs: i64) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            cookie_max_age_secs,
        }
    }

    /// Current organization selection for a request.
    ///
    /// The cookie takes precedence over the header. Empty values count as no
    /// selection.
    pub fn current_org_id(&self, headers: &HeaderMap) -> Result<Option<String>> {
        if let Some(value) = self.cookie_value(headers)? {
            return Ok(Some(value));
        }

        match headers.get(ORGANIZATION_HEADER) {
            Some(value) => {
                let value = value.to_str().map_err(|_| {
                    TenantError::InvalidSelection(format!(
                        "{} header is not valid UTF-8",
                        ORGANIZATION_HEADER
                    ))
                })?;
                let value = value.trim();
                Ok((!value.is_empty()).then(|| value.to_string()))
            }
            None => Ok(None),
        }
    }

    /// Whether the request carried a selection cookie at all, empty or not.
    pub fn has_selection_cookie(&self, headers: &HeaderMap) -> bool {
        self.raw_cookie(headers).is_some()
    }

    /// `Set-Cookie` value persisting a new selection
    pub fn selection_cookie(&self, organization_id: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            urlencoding::encode(organization_id),
            self.cookie_max_age_secs
        )
    }

    /// `Set-Cookie` value removing the selection
    pub fn clear_cookie(&self) -> String {
        format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        )
    }

    fn cookie_value(&self, headers: &HeaderMap) -> Result<Option<String>> {
        let Some(raw) = self.raw_cookie(headers) else {
            return Ok(None);
        };

        let decoded = urlencoding::decode(raw).map_err(|e| {
            tracing::warn!("Undecodable {} cookie: {}", self.cookie_name, e);
            TenantError::InvalidSelection(format!("{} cookie is not valid UTF-8", self.cookie_name))
        })?;

        // Only the raw cookie text is trimmed; the id itself is opaque
        Ok((!decoded.is_empty()).then(|| decoded.into_owned()))
    }

    fn raw_cookie<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .find_map(|part| {
                let (name, value) = part.trim().split_once('=')?;
                (name.trim() == self.cookie_name).then(|| value.trim().trim_matches('"'))
            })
    }
}
