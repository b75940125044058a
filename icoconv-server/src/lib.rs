// ABOUTME: Library exports for the icoconv web server modules
// ABOUTME: Makes routing, transport, and configuration available to integration tests and the binary

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod locales;
pub mod server;
pub mod site_icon;
pub mod templates;
pub mod upload;

pub use app::{App, HttpResponse, IncomingRequest};
pub use config::{Config, Settings};
pub use error::RequestError;
pub use server::{IconServer, ServerError, ServerHandle};
