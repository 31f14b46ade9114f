//! Save generated text as a file through the browser.

/// Offer `contents` as a CSV download named `filename`.
#[cfg(target_arch = "wasm32")]
pub fn download_csv(filename: &str, contents: &str) -> Result<(), String> {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    fn js_error(err: JsValue) -> String {
        format!("{err:?}")
    }

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document available".to_string())?;

    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "created element is not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    Url::revoke_object_url(&url).map_err(js_error)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn download_csv(filename: &str, _contents: &str) -> Result<(), String> {
    tracing::warn!("cannot download {filename} outside the browser");
    Err("downloads are only available in the browser".to_string())
}
