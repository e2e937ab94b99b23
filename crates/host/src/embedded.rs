//! The controller page bundled into `battbrrr-preview`
//!
//! `crates/ui/index.html` plus whatever `wasm-pack build --target web` left
//! in `crates/ui/pkg/` is baked in at compile time, so the preview server
//! ships as one file. Debug builds read the same files from disk.

use rust_embed::RustEmbed;

const INDEX: &str = "index.html";
const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(RustEmbed)]
#[folder = "../ui/"]
#[include = "index.html"]
#[include = "pkg/*.js"]
#[include = "pkg/*.wasm"]
#[include = "pkg/*.d.ts"]
pub struct ControllerPage;

/// Map a request path onto an embedded file name; the site root is the page.
fn asset_name(path: &str) -> &str {
    match path.trim_start_matches('/') {
        "" => INDEX,
        name => name,
    }
}

/// Bytes and guessed content type of an embedded file
pub fn get_asset(path: &str) -> Option<(Vec<u8>, &'static str)> {
    let name = asset_name(path);
    let file = ControllerPage::get(name)?;
    let mime = mime_guess::from_path(name).first_raw().unwrap_or(FALLBACK_MIME);
    Some((file.data.into_owned(), mime))
}
