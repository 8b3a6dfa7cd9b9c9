// Classic API HTTP client
//
// Wraps `reqwest::Client` with JSSResource URL construction, content
// negotiation, basic auth, and dual-format (JSON / XML) body decoding.
// Resource services (computers, policies, ...) live in sibling modules and
// only add endpoint paths and typed shapes on top of this transport.

use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, HeaderValue, STRICT_TRANSPORT_SECURITY};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::endpoint::{Identifier, append_segments};
use crate::error::{DecodeError, Error};
use crate::transport::TransportConfig;

/// Path segment under which every classic resource lives.
const RESOURCE_ROOT: &str = "JSSResource";

/// JSON preferred (q=1.0), XML accepted (q=0.9). Some classic endpoints
/// only ever answer in XML.
pub const ACCEPT_VALUE: &str = "application/json, application/xml;q=0.9";
pub const CACHE_CONTROL_VALUE: &str =
    "no-store, no-cache, must-revalidate, max-age=0, post-check=0, pre-check=0";
pub const STRICT_TRANSPORT_SECURITY_VALUE: &str = "max-age=31536000; includeSubDomains";

/// Element the XML decoder nests every document under, so the document's
/// own root becomes a field just like the top-level key of a JSON body.
const XML_ENVELOPE: &str = "response";

/// Username/password pair for HTTP Basic authentication.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body format selected from the response `Content-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyFormat {
    Json,
    Xml,
}

impl BodyFormat {
    /// Classify a `Content-Type` header value, ignoring parameters.
    pub(crate) fn from_content_type(header: &str) -> Result<(Self, String), Error> {
        let media_type = header
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match media_type.as_str() {
            "text/xml" | "application/xml" => Ok((Self::Xml, media_type)),
            "text/json" | "application/json" | "text/plain" => Ok((Self::Json, media_type)),
            _ => Err(Error::UnsupportedContentType {
                content_type: media_type,
            }),
        }
    }
}

/// Authenticated HTTP client bound to one classic resource context.
///
/// Configuration is fixed at construction; all request methods take `&self`,
/// so a single instance can serve concurrent calls.
#[derive(Debug)]
pub struct ClassicClient {
    http: reqwest::Client,
    base_url: Url,
    context: String,
    endpoint: Url,
    credentials: Credentials,
}

impl ClassicClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Create a client that builds its own `reqwest::Client` from `transport`.
    pub fn new(
        base_url: &str,
        context: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        Self::validate(base_url, &credentials)?;
        let http = transport.build_client()?;
        Self::with_client(base_url, context, credentials, http)
    }

    /// Create a client around a caller-supplied `reqwest::Client`.
    ///
    /// Use this to share one connection pool between several services.
    pub fn with_client(
        base_url: &str,
        context: &str,
        credentials: Credentials,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Self::validate(base_url, &credentials)?;

        let base_url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| {
            Error::InvalidConfiguration {
                message: format!("invalid base url '{base_url}': {e}"),
            }
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfiguration {
                message: format!("base url must use http or https, got '{}'", base_url.scheme()),
            });
        }

        let endpoint = append_segments(&base_url, &[RESOURCE_ROOT, context])?;

        Ok(Self {
            http,
            base_url,
            context: context.to_owned(),
            endpoint,
            credentials,
        })
    }

    fn validate(base_url: &str, credentials: &Credentials) -> Result<(), Error> {
        if base_url.trim().is_empty()
            || credentials.username.is_empty()
            || credentials.password.expose_secret().is_empty()
        {
            return Err(Error::InvalidConfiguration {
                message: "you must provide a valid Jamf base url, username, and password".into(),
            });
        }
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The server base URL (without `/JSSResource`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The resource context this client is bound to (e.g. `computers`).
    pub fn context(&self) -> &str {
        &self.context
    }

    /// `{base}/JSSResource/{context}`
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{endpoint}/{segments...}`, each segment percent-encoded.
    pub fn sub_endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        append_segments(&self.endpoint, segments)
    }

    /// `{endpoint}/id/{id}`
    pub fn id_endpoint(&self, id: i64) -> Result<Url, Error> {
        self.identifier_endpoint(&Identifier::Id(id))
    }

    /// `{endpoint}/name/{name}`
    pub fn name_endpoint(&self, name: &str) -> Result<Url, Error> {
        self.identifier_endpoint(&Identifier::from(name))
    }

    pub fn identifier_endpoint(&self, identifier: &Identifier) -> Result<Url, Error> {
        let [kind, value] = identifier.segments();
        self.sub_endpoint(&[&kind, &value])
    }

    // ── Request pipeline ─────────────────────────────────────────────

    /// Start a request on this client's connection pool.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http.request(method, url)
    }

    /// Apply content negotiation, cache/transport-security headers and
    /// basic auth to a request.
    pub fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE))
            .header(CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE))
            .header(
                STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(STRICT_TRANSPORT_SECURITY_VALUE),
            )
            .basic_auth(
                &self.credentials.username,
                Some(self.credentials.password.expose_secret()),
            )
    }

    /// Authenticate, send, and decode the response body into `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let resp = self.prepare(request).send().await?;
        decode_response(resp).await
    }

    /// Send a GET request and decode the response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");
        self.execute(self.request(Method::GET, url)).await
    }

    /// Send a POST request with an XML body and decode the response.
    pub(crate) async fn post_xml<T: DeserializeOwned>(
        &self,
        url: Url,
        body: String,
    ) -> Result<T, Error> {
        debug!("POST {url}");
        let request = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/xml"))
            .body(body);
        self.execute(request).await
    }
}

/// Turn a raw response into `T`, or the matching error.
///
/// The body is always read to completion so the connection returns to the
/// pool whichever way this exits.
async fn decode_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    trace!(%status, content_type, "response received");

    if status != StatusCode::OK && status != StatusCode::CREATED {
        let body = resp.text().await?;
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }

    let body = resp.bytes().await?;
    let (format, media_type) = BodyFormat::from_content_type(&content_type)?;

    decode_body(format, &body).map_err(|source| Error::Decode {
        content_type: media_type,
        source,
    })
}

pub(crate) fn decode_body<T: DeserializeOwned>(
    format: BodyFormat,
    body: &[u8],
) -> Result<T, DecodeError> {
    match format {
        BodyFormat::Json => Ok(serde_json::from_slice(body)?),
        BodyFormat::Xml => {
            let text = std::str::from_utf8(body)?;
            let wrapped = format!("<{XML_ENVELOPE}>{}</{XML_ENVELOPE}>", strip_prolog(text));
            Ok(quick_xml::de::from_str(&wrapped)?)
        }
    }
}

/// Serialize a request payload as an XML document rooted at `root`.
pub(crate) fn encode_xml<T: Serialize>(root: &str, payload: &T) -> Result<String, Error> {
    quick_xml::se::to_string_with_root(root, payload).map_err(|e| Error::Encode {
        message: format!("<{root}>: {e}"),
    })
}

/// Drop a byte-order mark and `<?xml ...?>` declaration so the document can
/// be nested inside the decoding envelope.
fn strip_prolog(text: &str) -> &str {
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();
    match trimmed.strip_prefix("<?xml") {
        Some(rest) => rest.split_once("?>").map_or(trimmed, |(_, doc)| doc),
        None => trimmed,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::error::ErrorKind;

    fn credentials() -> Credentials {
        Credentials::new("fake-username", "mock-password-cool".to_owned())
    }

    fn client() -> ClassicClient {
        ClassicClient::with_client(
            "https://jss.example.com",
            "computers",
            credentials(),
            reqwest::Client::new(),
        )
        .unwrap()
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Status {
        status: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct StatusResponse {
        mock: Status,
    }

    #[test]
    fn endpoint_is_resource_root_plus_context() {
        let c = client();
        assert_eq!(c.endpoint().as_str(), "https://jss.example.com/JSSResource/computers");
        assert_eq!(c.context(), "computers");
        assert_eq!(c.username(), "fake-username");
    }

    #[test]
    fn trailing_slash_on_base_is_stripped() {
        let c = ClassicClient::with_client(
            "https://jss.example.com/",
            "policies",
            credentials(),
            reqwest::Client::new(),
        )
        .unwrap();
        assert_eq!(c.endpoint().as_str(), "https://jss.example.com/JSSResource/policies");
    }

    #[test]
    fn empty_parameters_are_rejected() {
        let cases = [
            ("", Credentials::new("user", "pw".to_owned())),
            ("https://jss.example.com", Credentials::new("", "pw".to_owned())),
            ("https://jss.example.com", Credentials::new("user", String::new())),
        ];
        for (base, creds) in cases {
            let err =
                ClassicClient::with_client(base, "computers", creds, reqwest::Client::new())
                    .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
            assert_eq!(
                err.to_string(),
                "Invalid configuration: you must provide a valid Jamf base url, username, and password"
            );
        }
    }

    #[test]
    fn unparseable_base_url_is_rejected() {
        for base in ["not a url", "ftp://jss.example.com"] {
            let err = ClassicClient::with_client(base, "computers", credentials(), reqwest::Client::new())
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration, "{base}");
        }
    }

    #[test]
    fn identifier_endpoints() {
        let c = client();
        assert_eq!(
            c.id_endpoint(82).unwrap().as_str(),
            "https://jss.example.com/JSSResource/computers/id/82"
        );
        assert_eq!(
            c.name_endpoint("mymac").unwrap().as_str(),
            "https://jss.example.com/JSSResource/computers/name/mymac"
        );
        assert_eq!(
            c.sub_endpoint(&["serialnumber", "C02XK1", "subset", "Hardware"])
                .unwrap()
                .as_str(),
            "https://jss.example.com/JSSResource/computers/serialnumber/C02XK1/subset/Hardware"
        );
    }

    #[test]
    fn prepare_sets_negotiation_and_auth_headers() {
        let c = client();
        let url = c.sub_endpoint(&["test"]).unwrap();
        let request = c.prepare(c.request(Method::GET, url)).build().unwrap();
        let headers = request.headers();

        assert_eq!(headers[ACCEPT], "application/json, application/xml;q=0.9");
        assert_eq!(headers[CACHE_CONTROL], CACHE_CONTROL_VALUE);
        assert_eq!(headers[STRICT_TRANSPORT_SECURITY], STRICT_TRANSPORT_SECURITY_VALUE);
        // base64("fake-username:mock-password-cool")
        assert_eq!(
            headers[reqwest::header::AUTHORIZATION],
            "Basic ZmFrZS11c2VybmFtZTptb2NrLXBhc3N3b3JkLWNvb2w="
        );
    }

    #[test]
    fn content_type_classification() {
        let cases = [
            ("application/json", BodyFormat::Json),
            ("application/json; charset=UTF-8", BodyFormat::Json),
            ("text/json", BodyFormat::Json),
            ("text/plain;charset=utf-8", BodyFormat::Json),
            ("text/xml;charset=UTF-8", BodyFormat::Xml),
            ("Application/XML", BodyFormat::Xml),
        ];
        for (header, expected) in cases {
            let (format, _) = BodyFormat::from_content_type(header).unwrap();
            assert_eq!(format, expected, "{header}");
        }
    }

    #[test]
    fn unknown_content_type_names_the_observed_type() {
        let err = BodyFormat::from_content_type("text/html; charset=UTF-8").unwrap_err();
        match err {
            Error::UnsupportedContentType { content_type } => assert_eq!(content_type, "text/html"),
            other => panic!("expected UnsupportedContentType, got {other:?}"),
        }
        let err = BodyFormat::from_content_type("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedContentType);
    }

    #[test]
    fn json_and_xml_decode_into_the_same_shape() {
        let json: StatusResponse =
            decode_body(BodyFormat::Json, br#"{"mock": {"status": "OK"}}"#).unwrap();
        let xml: StatusResponse = decode_body(
            BodyFormat::Xml,
            b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<mock><status>OK</status></mock>",
        )
        .unwrap();
        assert_eq!(json, xml);
        assert_eq!(xml.mock.status, "OK");
    }

    #[test]
    fn malformed_bodies_report_the_parser() {
        let err = decode_body::<StatusResponse>(BodyFormat::Json, b"{\"mock\":").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));

        let err = decode_body::<StatusResponse>(BodyFormat::Xml, b"<mock><status>OK</mock>")
            .unwrap_err();
        assert!(matches!(err, DecodeError::Xml(_)));

        let err = decode_body::<StatusResponse>(BodyFormat::Xml, &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, DecodeError::Utf8(_)));
    }

    #[test]
    fn prolog_is_stripped() {
        assert_eq!(strip_prolog("<?xml version=\"1.0\"?><a/>"), "<a/>");
        assert_eq!(strip_prolog("\u{feff}  <a/>"), "<a/>");
        assert_eq!(strip_prolog("<a/>"), "<a/>");
    }
}
