use worker::*;

mod config;
mod error;
pub mod transcode;

pub use config::HandlerConfig;
pub use error::ConvertError;
pub use transcode::{convert_line, transcode, Header, RuleType, SourceRule};

use error::TEXT_PLAIN;

#[event(fetch)]
async fn main(req: Request, env: Env, _: Context) -> Result<Response> {
    console_error_panic_hook::set_once();
    let config = HandlerConfig::from_env(&env);

    match handle(req, &config).await {
        Ok(response) => Ok(response),
        Err(e) => {
            console_error!("conversion failed ({}): {}", e.status_code(), e);
            e.into_response()
        }
    }
}

async fn handle(req: Request, config: &HandlerConfig) -> std::result::Result<Response, ConvertError> {
    let target = source_url(&req.url()?)?;
    console_log!("converting {}", target);

    let body = fetch_source(&target, config).await?;
    let converted = transcode(&body, &target, chrono::Utc::now());

    let headers = Headers::from_iter([
        ("content-type", TEXT_PLAIN),
        ("access-control-allow-origin", config.allow_origin.as_str()),
    ]);
    Ok(Response::ok(converted)?.with_headers(headers))
}

/// The list location from the `url` query parameter.
pub fn source_url(url: &Url) -> std::result::Result<String, ConvertError> {
    url.query_pairs()
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
        .ok_or(ConvertError::MissingUrl)
}

async fn fetch_source(url: &str, config: &HandlerConfig) -> std::result::Result<String, ConvertError> {
    let response = reqwest::Client::new()
        .get(url)
        .header(reqwest::header::USER_AGENT, config.user_agent.as_str())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ConvertError::Upstream(status.as_u16()));
    }

    Ok(response.text().await?)
}
