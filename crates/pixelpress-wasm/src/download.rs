//! Browser downloads of exported files.

use js_sys::{Array, Uint8Array};
use pixelpress_core::ExportedImage;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::types::JsExportedImage;

/// Offer `exported` to the user as a file download.
///
/// Wraps the bytes in a `Blob`, points a temporary anchor with a `download`
/// attribute at its object URL, clicks it and revokes the URL again.
pub fn trigger_download(exported: &ExportedImage) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let parts = Array::new();
    parts.push(&Uint8Array::from(exported.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type(exported.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("created element is not an anchor"))?;
    anchor.set_href(&url);
    anchor.set_download(&exported.file_name);
    anchor.click();

    log::info!("download of {} started", exported.file_name);
    Url::revoke_object_url(&url)
}

/// Offer an export produced by `ImageEditor.export_image()` as a download.
#[wasm_bindgen]
pub fn download_export(exported: &JsExportedImage) -> Result<(), JsValue> {
    trigger_download(exported.inner())
}
