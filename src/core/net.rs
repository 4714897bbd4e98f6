// src/core/net.rs
// Blocking HTTP GET over ureq. Non-2xx statuses come back as errors; no retries.

use ureq::Agent;

use crate::config::consts::USER_AGENT;
use crate::error::FetchError;

pub fn agent() -> Agent {
    Agent::new_with_defaults()
}

/// GET `url` with query pairs and extra headers, returning the body as text.
pub fn http_get_text(
    agent: &Agent,
    url: &str,
    query: &[(&str, String)],
    headers: &[(&str, &str)],
) -> Result<String, FetchError> {
    let mut req = agent.get(url).header("User-Agent", USER_AGENT);
    for (key, value) in query {
        req = req.query(*key, value);
    }
    for (key, value) in headers {
        req = req.header(*key, *value);
    }

    let resp = req.call()?;
    let body = resp.into_body().read_to_string()?;
    Ok(body)
}

/// GET `url` and return the raw body (map tiles).
pub fn http_get_bytes(agent: &Agent, url: &str) -> Result<Vec<u8>, FetchError> {
    let resp = agent.get(url).header("User-Agent", USER_AGENT).call()?;
    let bytes = resp.into_body().read_to_vec()?;
    Ok(bytes)
}
