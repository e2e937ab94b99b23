use battbrrr_effects::footer::VERSION_PATH;
use battbrrr_effects::{FooterError, InfoReply};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response, Window};

use crate::error::describe;

fn network(value: JsValue) -> FooterError {
    FooterError::Network(describe(&value))
}

/// GET the info document, bypassing the HTTP cache.
///
/// Only transport failures are errors here; status and body are judged by
/// `battbrrr_effects::footer`.
pub async fn fetch_info(window: &Window) -> Result<InfoReply, FooterError> {
    fetch_document(window, VERSION_PATH).await
}

/// Uncached GET of `path`. Non-OK answers carry their status and no body.
pub async fn fetch_document(window: &Window, path: &str) -> Result<InfoReply, FooterError> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_cache(RequestCache::NoStore);

    let req = Request::new_with_str_and_init(path, &opts).map_err(network)?;
    let resp_val = JsFuture::from(window.fetch_with_request(&req)).await.map_err(network)?;
    let resp: Response = resp_val.dyn_into().map_err(network)?;

    let status = resp.status();
    if !resp.ok() {
        return Ok(InfoReply { status, body: String::new() });
    }

    let text = JsFuture::from(resp.text().map_err(network)?).await.map_err(network)?;
    Ok(InfoReply {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}
