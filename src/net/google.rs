//! Google Identity Services auth-code flow.
//!
//! The page loads `https://accounts.google.com/gsi/client`; this module asks
//! it for an authorization code via `google.accounts.oauth2.initCodeClient`
//! in popup mode. The code is then exchanged by the backend, never here.

#![allow(clippy::unused_async)]

/// Scopes requested from Google.
pub const GOOGLE_SCOPES: &str = "openid email profile";

#[cfg(feature = "csr")]
mod sdk {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        pub type CodeClient;

        #[wasm_bindgen(catch, js_namespace = ["google", "accounts", "oauth2"], js_name = initCodeClient)]
        pub fn init_code_client(config: &js_sys::Object) -> Result<CodeClient, JsValue>;

        #[wasm_bindgen(method, js_name = requestCode)]
        pub fn request_code(this: &CodeClient);
    }
}

#[cfg(feature = "csr")]
fn js_string_field(value: &wasm_bindgen::JsValue, key: &str) -> Option<String> {
    js_sys::Reflect::get(value, &key.into()).ok().and_then(|v| v.as_string())
}

/// Run the Google popup and resolve with an authorization code.
///
/// # Errors
///
/// Returns a human-readable message when Google sign-in is not configured,
/// the SDK is missing, or the user closes or denies the popup.
pub async fn request_auth_code(client_id: Option<&str>) -> Result<String, String> {
    let Some(client_id) = client_id else {
        return Err("Google sign-in is not configured".to_owned());
    };
    #[cfg(feature = "csr")]
    {
        use std::cell::RefCell;
        use std::rc::Rc;

        use futures::channel::oneshot;
        use wasm_bindgen::JsValue;
        use wasm_bindgen::closure::Closure;

        let (tx, rx) = oneshot::channel::<Result<String, String>>();
        let tx = Rc::new(RefCell::new(Some(tx)));

        let tx_ok = tx.clone();
        let on_response = Closure::<dyn FnMut(JsValue)>::new(move |resp: JsValue| {
            let outcome = match js_string_field(&resp, "code") {
                Some(code) => Ok(code),
                None => Err(js_string_field(&resp, "error_description")
                    .or_else(|| js_string_field(&resp, "error"))
                    .unwrap_or_else(|| "No authorization code returned".to_owned())),
            };
            if let Some(tx) = tx_ok.borrow_mut().take() {
                let _ = tx.send(outcome);
            }
        });
        let tx_err = tx.clone();
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |err: JsValue| {
            let message = js_string_field(&err, "type").unwrap_or_else(|| "Google popup failed".to_owned());
            if let Some(tx) = tx_err.borrow_mut().take() {
                let _ = tx.send(Err(message));
            }
        });

        let config = js_sys::Object::new();
        let set = |key: &str, value: &JsValue| {
            let _ = js_sys::Reflect::set(&config, &key.into(), value);
        };
        set("client_id", &client_id.into());
        set("scope", &GOOGLE_SCOPES.into());
        set("ux_mode", &"popup".into());
        set("callback", on_response.as_ref());
        set("error_callback", on_error.as_ref());

        let client = sdk::init_code_client(&config).map_err(|e| {
            leptos::logging::warn!("Google SDK unavailable: {e:?}");
            "Google sign-in is unavailable".to_owned()
        })?;
        client.request_code();

        // Closures stay alive until the SDK reports back.
        let outcome = rx.await.unwrap_or_else(|_| Err("Google sign-in was interrupted".to_owned()));
        drop((on_response, on_error));
        outcome
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = client_id;
        Err("Google sign-in is only available in the browser".to_owned())
    }
}
