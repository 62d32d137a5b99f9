use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri, request, response};

/// An immutable snapshot of one request/response exchange.
///
/// The explainer only ever borrows an `Exchange`; it never mutates it.
/// Header lookups are case-insensitive because both header sets are
/// [`HeaderMap`]s. A header that is absent is simply not in the map.
#[derive(Debug, Clone)]
pub struct Exchange {
    method: Method,
    uri: Uri,
    request_headers: HeaderMap,
    status: StatusCode,
    response_headers: HeaderMap,
}

impl Exchange {
    pub fn new(method: Method, uri: Uri, status: StatusCode) -> Self {
        Self {
            method,
            uri,
            request_headers: HeaderMap::new(),
            status,
            response_headers: HeaderMap::new(),
        }
    }

    /// Builds a snapshot from the parts of a captured request and response.
    pub fn from_parts(request: &request::Parts, response: &response::Parts) -> Self {
        Self {
            method: request.method.clone(),
            uri: request.uri.clone(),
            request_headers: request.headers.clone(),
            status: response.status,
            response_headers: response.headers.clone(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Appends a request header, keeping earlier values of the same name.
    pub fn with_request_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.request_headers.append(name, value);
        self
    }

    /// Appends a response header, keeping earlier values of the same name.
    pub fn with_response_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.response_headers.append(name, value);
        self
    }

    pub fn with_request_headers(mut self, headers: HeaderMap) -> Self {
        self.request_headers = headers;
        self
    }

    pub fn with_response_headers(mut self, headers: HeaderMap) -> Self {
        self.response_headers = headers;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn request_headers(&self) -> &HeaderMap {
        &self.request_headers
    }

    pub fn response_headers(&self) -> &HeaderMap {
        &self.response_headers
    }

    /// Path and query of the request, `/` when the URI has neither.
    pub fn path_and_query(&self) -> &str {
        self.uri
            .path_and_query()
            .map(|path_and_query| path_and_query.as_str())
            .filter(|path_and_query| !path_and_query.is_empty())
            .unwrap_or("/")
    }
}

impl Default for Exchange {
    /// `GET /` answered with `200 OK` and no headers.
    fn default() -> Self {
        Self::new(Method::GET, Uri::from_static("/"), StatusCode::OK)
    }
}
