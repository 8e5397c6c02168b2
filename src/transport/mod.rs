//! HTTP transport shared by the outbound collaborators.

mod http;

pub use http::{
    body_excerpt, resolve_api_key, secret_header, HttpTransport, TransportError,
    MAX_ERROR_BODY_CHARS,
};
