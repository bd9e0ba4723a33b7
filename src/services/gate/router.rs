//! Pass-through / redirect decision for one viewer request.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, info, warn};

use crate::edge::{EdgeRequest, EdgeResponse, HandlerOutput};
use crate::services::gate::cookie::extract_cookie;
use crate::services::gate::token::{TokenValidator, Verdict};
use crate::services::settings::JwtSecret;

/// Query parameter that carries the original URL to the portal.
pub const RESOURCE_PARAM: &str = "cdn_resource";

// TLS is terminated by the edge before this runs.
const ORIGINAL_SCHEME: &str = "https";

// Everything except the RFC 3986 unreserved set is escaped.
const RESOURCE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Redirect to the authentication portal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
}

impl Redirect {
    /// `{portal_url}?cdn_resource={percent-encoded original url}`
    pub fn to_portal(portal_url: &str, original_url: &str) -> Self {
        let encoded = utf8_percent_encode(original_url, RESOURCE_ENCODE_SET);
        Self {
            location: format!("{portal_url}?{RESOURCE_PARAM}={encoded}"),
        }
    }

    pub fn to_response(&self) -> EdgeResponse {
        EdgeResponse::found(self.location.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Forward the request to origin as received.
    PassThrough(EdgeRequest),
    Redirect(Redirect),
}

impl Decision {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Decision::PassThrough(_))
    }
}

impl From<Decision> for HandlerOutput {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::PassThrough(request) => HandlerOutput::Request(request),
            Decision::Redirect(redirect) => HandlerOutput::Response(redirect.to_response()),
        }
    }
}

/// Rebuild the absolute URL the viewer asked for.
///
/// The authority is the first `Host` header value; `?` is only added when
/// there is a query string.
pub fn original_url(request: &EdgeRequest) -> String {
    let host = request.first_header("host").unwrap_or_else(|| {
        warn!(uri = %request.uri, "request has no host header");
        ""
    });

    match request.querystring() {
        "" => format!("{ORIGINAL_SCHEME}://{host}{}", request.uri),
        query => format!("{ORIGINAL_SCHEME}://{host}{}?{query}", request.uri),
    }
}

/// Decides per request; holds no per-request state.
#[derive(Debug, Clone)]
pub struct RequestRouter {
    validator: TokenValidator,
    cookie_name: String,
}

impl RequestRouter {
    pub fn new(validator: TokenValidator, cookie_name: impl Into<String>) -> Self {
        Self {
            validator,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn leeway_seconds(&self) -> u64 {
        self.validator.leeway_seconds()
    }

    /// Classify the request's session cookie.
    ///
    /// An absent cookie short-circuits without touching the crypto path.
    pub fn verdict(&self, request: &EdgeRequest, secret: &JwtSecret, now: i64) -> Verdict {
        let token = extract_cookie(request.headers(), &self.cookie_name);
        if token.is_empty() {
            return Verdict::Absent;
        }
        self.validator.verify(token, secret, now)
    }

    /// `Valid` passes the request through untouched. Every other verdict gets
    /// the same redirect; the verdict is only logged.
    pub fn decide(
        &self,
        request: EdgeRequest,
        secret: &JwtSecret,
        portal_url: &str,
        now: i64,
    ) -> Decision {
        let verdict = self.verdict(&request, secret, now);
        debug!(verdict = verdict.as_str(), uri = %request.uri, "token verdict");

        match verdict {
            Verdict::Valid => Decision::PassThrough(request),
            Verdict::Absent | Verdict::Invalid | Verdict::Expired => {
                let redirect = Redirect::to_portal(portal_url, &original_url(&request));
                info!(
                    verdict = verdict.as_str(),
                    method = %request.method,
                    uri = %request.uri,
                    "redirecting to authentication portal"
                );
                Decision::Redirect(redirect)
            }
        }
    }
}
