//! HTTP status classification for the fetch retry policy.

/// Raw HTTP status code returned by the data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

/// How the fetch engine treats a given status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200: body is usable.
    Valid,
    /// 401: key rejected. Retrying cannot help.
    Unauthorized,
    /// 503: server temporarily unavailable.
    ServerNotReady,
    /// Anything else.
    Unknown,
}

impl HttpStatusCode {
    pub const OK: HttpStatusCode = HttpStatusCode(200);
    pub const UNAUTHORIZED: HttpStatusCode = HttpStatusCode(401);
    pub const SERVICE_UNAVAILABLE: HttpStatusCode = HttpStatusCode(503);

    pub fn class(&self) -> StatusClass {
        match self.0 {
            200 => StatusClass::Valid,
            401 => StatusClass::Unauthorized,
            503 => StatusClass::ServerNotReady,
            _ => StatusClass::Unknown,
        }
    }

    /// Whether another attempt may produce a different answer.
    pub fn is_retryable(&self) -> bool {
        !matches!(self.class(), StatusClass::Valid | StatusClass::Unauthorized)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
