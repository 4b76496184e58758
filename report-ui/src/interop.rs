use futures::future::{select, Either};
use gloo_timers::future::TimeoutFuture;
use report_types::LoadError;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Bundles that neither load nor fail within this time count as failed.
const SCRIPT_TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementRect {
    pub left: f64,
    pub width: f64,
}

/// Position and width of an element in client coordinates.
pub fn element_rect(id: &str) -> Option<ElementRect> {
    let element = web_sys::window()?.document()?.get_element_by_id(id)?;
    let rect = element.get_bounding_client_rect();
    Some(ElementRect {
        left: rect.left(),
        width: rect.width(),
    })
}

/// Percent-encode a test name for use as one URL path segment.
pub fn encode_path_segment(name: &str) -> String {
    String::from(js_sys::encode_uri_component(name))
}

/// JSON text of `window.<name>`, or `None` if the global is unset.
pub fn read_global_json(name: &str) -> Option<String> {
    let value = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&value).ok()?.as_string()
}

/// Read `window.<name>` and remove it so the next bundle starts clean.
pub fn take_global_json(name: &str) -> Option<String> {
    let text = read_global_json(name);
    let _ = js_sys::Reflect::delete_property(&js_sys::global(), &JsValue::from_str(name));
    text
}

fn js_error(err: JsValue) -> LoadError {
    LoadError::Network(
        err.as_string()
            .unwrap_or_else(|| format!("{err:?}")),
    )
}

/// Inject a `<script src>` and wait for its `load` or `error` event. The
/// element is removed again once it settles.
pub async fn load_script(src: &str) -> Result<(), LoadError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| LoadError::Network("document unavailable".to_string()))?;

    let script: web_sys::HtmlScriptElement = document
        .create_element("script")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlScriptElement>()
        .map_err(|_| LoadError::Network("script element unavailable".to_string()))?;
    script.set_src(src);
    script.set_async(true);

    let settled = js_sys::Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });

    if let Some(head) = document.head() {
        head.append_child(&script).map_err(js_error)?;
    } else if let Some(body) = document.body() {
        body.append_child(&script).map_err(js_error)?;
    }

    let outcome = select(
        JsFuture::from(settled),
        TimeoutFuture::new(SCRIPT_TIMEOUT_MS),
    )
    .await;

    script.set_onload(None);
    script.set_onerror(None);
    script.remove();

    match outcome {
        Either::Left((Ok(_), _)) => Ok(()),
        Either::Left((Err(_), _)) => Err(LoadError::Network(format!("failed to load {src}"))),
        Either::Right(_) => Err(LoadError::Network(format!("timed out loading {src}"))),
    }
}
