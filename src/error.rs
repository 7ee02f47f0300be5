//! Error types for the conversion handler.

use thiserror::Error;
use worker::{Headers, Response};

pub(crate) const USAGE: &str = "Please append a url query parameter, for example: \
/?url=https://raw.githubusercontent.com/ACL4SSR/ACL4SSR/master/Clash/BanAD.list";

pub(crate) const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Everything that can go wrong while serving a conversion request.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// No `url` query parameter was given
    #[error("{}", USAGE)]
    MissingUrl,

    /// The source list answered with a non-success status
    #[error("failed to fetch source list, status code: {0}")]
    Upstream(u16),

    /// Outbound request or body read failed
    #[error("conversion failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Runtime error from the Workers API
    #[error("conversion failed: {0}")]
    Worker(#[from] worker::Error),
}

impl ConvertError {
    pub fn status_code(&self) -> u16 {
        match self {
            ConvertError::MissingUrl => 400,
            ConvertError::Upstream(_) => 502,
            ConvertError::Fetch(_) | ConvertError::Worker(_) => 500,
        }
    }

    /// Plain-text response carrying the error message.
    pub fn into_response(self) -> worker::Result<Response> {
        let headers = Headers::from_iter([("content-type", TEXT_PLAIN)]);
        Ok(Response::error(self.to_string(), self.status_code())?.with_headers(headers))
    }
}
