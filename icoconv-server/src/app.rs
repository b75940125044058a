// ABOUTME: Transport-independent request routing for the icon converter web front end
// ABOUTME: Handles locale pages, the guarded /generate upload, and sitemap/robots/favicon routes

use crate::config::Settings;
use crate::constants::{content_types, form, messages, routes};
use crate::error::RequestError;
use crate::locales::{self, DEFAULT_LOCALE};
use crate::{site_icon, templates, upload};
use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use icoconv_core::{read_frame, Admission, ConversionError, IconConverter, RateLimiter, TargetEdge};
use std::io::{self, Read};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// A request as seen by the router, detached from the listener that produced it.
pub struct IncomingRequest<'a> {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub remote_addr: Option<SocketAddr>,
    pub body: Box<dyn Read + 'a>,
}

impl<'a> IncomingRequest<'a> {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            remote_addr: None,
            body: Box::new(io::empty()),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    pub fn with_body<R: Read + 'a>(mut self, body: R) -> Self {
        self.body = Box::new(body);
        self
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        self.url.split(['?', '#']).next().unwrap_or_default()
    }

    pub fn header<K: header::AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn content_length(&self) -> Option<usize> {
        self.header(header::CONTENT_LENGTH)
            .and_then(|v| v.trim().parse().ok())
    }
}

#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    pub fn text(status: StatusCode, body: &str) -> Self {
        Self::new(status)
            .with_header(header::CONTENT_TYPE, content_types::TEXT)
            .with_body(body.as_bytes().to_vec())
    }

    pub fn redirect(location: &str) -> Self {
        Self::new(StatusCode::FOUND).with_header(header::LOCATION, location)
    }

    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(_) => log::warn!("Dropping invalid {} header value {:?}", name, value),
        }
        self
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn header<K: header::AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl From<RequestError> for HttpResponse {
    fn from(err: RequestError) -> Self {
        let response = HttpResponse::text(err.status(), err.user_message());
        match err.retry_after_secs() {
            Some(secs) => response.with_header(header::RETRY_AFTER, &secs.to_string()),
            None => response,
        }
    }
}

pub struct App {
    settings: Settings,
    converter: IconConverter,
    limiter: RateLimiter,
    site_icon: Vec<u8>,
    conversions: AtomicU64,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self, ConversionError> {
        let converter = IconConverter::with_options(settings.conversion.clone());
        let limiter = RateLimiter::new(settings.quotas.clone());
        let site_icon = site_icon::build()?;
        let frame = read_frame(&site_icon)?;
        log::debug!(
            "Site icon ready ({}x{}, {} bytes)",
            frame.width,
            frame.height,
            site_icon.len()
        );

        Ok(Self {
            settings,
            converter,
            limiter,
            site_icon,
            conversions: AtomicU64::new(0),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Number of uploads that reached the conversion pipeline.
    pub fn conversions(&self) -> u64 {
        self.conversions.load(Ordering::Relaxed)
    }

    pub fn handle(&self, request: IncomingRequest<'_>) -> HttpResponse {
        let started = Instant::now();
        let method = request.method.clone();
        let path = request.path().to_string();

        let response = self.route(request);

        log::info!(
            "{} {} {} {}ms",
            method,
            path,
            response.status.as_u16(),
            started.elapsed().as_millis()
        );
        response
    }

    fn route(&self, request: IncomingRequest<'_>) -> HttpResponse {
        let path = normalize_path(request.path()).to_string();

        if path == routes::GENERATE {
            if request.method != Method::POST {
                return method_not_allowed("POST");
            }
            return self.generate(request).unwrap_or_else(|err| self.reject(err));
        }

        if request.method != Method::GET && request.method != Method::HEAD {
            return method_not_allowed("GET, HEAD");
        }

        match path.as_str() {
            "/" => {
                let accept = request.header(header::ACCEPT_LANGUAGE).unwrap_or_default();
                HttpResponse::redirect(&format!("/{}", locales::negotiate(accept)))
            }
            routes::SITEMAP => {
                let today = chrono::Utc::now().date_naive();
                HttpResponse::new(StatusCode::OK)
                    .with_header(header::CONTENT_TYPE, content_types::XML)
                    .with_body(templates::render_sitemap(&self.base_url(&request), today).into_bytes())
            }
            routes::ROBOTS => HttpResponse::text(
                StatusCode::OK,
                &templates::render_robots(&self.base_url(&request)),
            ),
            routes::FAVICON => HttpResponse::new(StatusCode::OK)
                .with_header(header::CONTENT_TYPE, content_types::SITE_ICON)
                .with_body(self.site_icon.clone()),
            other => {
                let code = other.trim_start_matches('/');
                match locales::lookup(code) {
                    Some(translation) => HttpResponse::new(StatusCode::OK)
                        .with_header(header::CONTENT_TYPE, content_types::HTML)
                        .with_body(
                            templates::render_index(
                                code,
                                translation,
                                &self.base_url(&request),
                                self.settings.max_upload_bytes,
                            )
                            .into_bytes(),
                        ),
                    None => {
                        log::debug!("No page for {}, redirecting to default locale", other);
                        HttpResponse::redirect(&format!("/{}", DEFAULT_LOCALE))
                    }
                }
            }
        }
    }

    fn generate(&self, request: IncomingRequest<'_>) -> Result<HttpResponse, RequestError> {
        let client = self.client_ip(&request);
        if let Admission::Limited { retry_after } = self.limiter.check(client) {
            return Err(RequestError::RateLimited { retry_after });
        }

        let limit = self.settings.max_upload_bytes;
        if request.content_length().is_some_and(|len| len > limit) {
            return Err(RequestError::PayloadTooLarge { limit });
        }

        let content_type = request.header(header::CONTENT_TYPE).map(str::to_string);
        let upload = upload::parse_form(content_type.as_deref(), request.body, limit)?;

        let file = upload
            .file
            .filter(|file| !file.filename.is_empty())
            .ok_or(RequestError::MissingFile)?;
        let edge = TargetEdge::parse(upload.size.as_deref().unwrap_or_default())?;

        self.conversions.fetch_add(1, Ordering::Relaxed);
        let started = Instant::now();
        let ico = self.converter.convert(&file.bytes, edge)?;

        log::debug!(
            "Converted '{}' ({} bytes) from {} to a {} icon ({} bytes) in {}ms",
            file.filename,
            file.bytes.len(),
            client,
            edge,
            ico.len(),
            started.elapsed().as_millis()
        );

        Ok(HttpResponse::new(StatusCode::OK)
            .with_header(header::CONTENT_TYPE, content_types::ICON_DOWNLOAD)
            .with_header(header::CONTENT_DISPOSITION, form::DOWNLOAD_DISPOSITION)
            .with_body(ico))
    }

    fn reject(&self, err: RequestError) -> HttpResponse {
        if err.status().is_server_error() {
            log::error!("Upload failed: {}", err);
        } else {
            log::warn!("Upload rejected: {}", err);
            if let RequestError::Conversion(inner) = &err {
                if let Some(help) = inner.help_text() {
                    log::debug!("{}", help);
                }
            }
        }
        err.into()
    }

    /// Address the admission guard keys on.
    pub fn client_ip(&self, request: &IncomingRequest<'_>) -> IpAddr {
        if self.settings.trust_forwarded_for {
            let forwarded = request
                .header(X_FORWARDED_FOR)
                .and_then(|v| v.split(',').next())
                .and_then(|hop| hop.trim().parse::<IpAddr>().ok());
            if let Some(ip) = forwarded {
                return ip;
            }
        }
        request
            .remote_addr
            .map(|addr| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
    }

    /// Absolute site root used in canonical links, the sitemap and robots.txt.
    pub fn base_url(&self, request: &IncomingRequest<'_>) -> String {
        if let Some(public_url) = &self.settings.public_url {
            return public_url.clone();
        }

        let scheme = request
            .header(X_FORWARDED_PROTO)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("http");
        let host = request
            .header(header::HOST)
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.address());

        format!("{}://{}", scheme, host)
    }
}

fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn method_not_allowed(allow: &str) -> HttpResponse {
    HttpResponse::text(StatusCode::METHOD_NOT_ALLOWED, messages::METHOD_NOT_ALLOWED)
        .with_header(header::ALLOW, allow)
}
