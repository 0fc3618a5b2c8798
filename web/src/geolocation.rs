use care_finder::{GeolocationProvider, LocationFailure};
use shared_types::Coordinate;

/// `navigator.geolocation`, wrapped as a future. Outside the browser it
/// reports geolocation as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserGeolocation {
    timeout_ms: u32,
}

impl BrowserGeolocation {
    /// A zero timeout would fail every request, so it is raised to 1 ms.
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms: timeout_ms.max(1),
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

impl Default for BrowserGeolocation {
    fn default() -> Self {
        Self::new(care_finder::config::DEFAULT_LOCATION_TIMEOUT_MS)
    }
}

impl GeolocationProvider for BrowserGeolocation {
    async fn current_position(&self) -> Result<Coordinate, LocationFailure> {
        #[cfg(feature = "hydrate")]
        {
            request_position(self.timeout_ms).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(LocationFailure::Unsupported)
        }
    }
}

#[cfg(feature = "hydrate")]
async fn request_position(timeout_ms: u32) -> Result<Coordinate, LocationFailure> {
    use futures::channel::oneshot;
    use std::{cell::RefCell, rc::Rc};
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};

    let geolocation = web_sys::window()
        .and_then(|window| window.navigator().geolocation().ok())
        .ok_or(LocationFailure::Unsupported)?;

    type Reply = Rc<RefCell<Option<oneshot::Sender<Result<Coordinate, LocationFailure>>>>>;
    fn send(tx: &Reply, result: Result<Coordinate, LocationFailure>) {
        if let Some(tx) = tx.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }

    let (tx, rx) = oneshot::channel();
    let tx: Reply = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let tx = Rc::clone(&tx);
        Closure::once(move |position: JsValue| {
            let result = read_coordinate(&position).ok_or(LocationFailure::PositionUnavailable);
            send(&tx, result);
        })
    };
    let on_error = {
        let tx = Rc::clone(&tx);
        Closure::once(move |error: JsValue| {
            let code = js_sys::Reflect::get(&error, &JsValue::from_str("code"))
                .ok()
                .and_then(|code| code.as_f64())
                .map(|code| code as u16)
                .unwrap_or(2);
            send(&tx, Err(LocationFailure::from_code(code)));
        })
    };

    // Without a timeout an unanswered permission prompt never settles.
    let options = web_sys::PositionOptions::new();
    options.set_timeout(timeout_ms);

    geolocation
        .get_current_position_with_error_callback_and_options(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
            &options,
        )
        .map_err(|_| LocationFailure::Unsupported)?;

    let result = rx
        .await
        .unwrap_or(Err(LocationFailure::PositionUnavailable));
    // callbacks must outlive the request
    drop((on_success, on_error));
    result
}

#[cfg(feature = "hydrate")]
fn read_coordinate(position: &wasm_bindgen::JsValue) -> Option<Coordinate> {
    use js_sys::Reflect;
    use wasm_bindgen::JsValue;

    let coords = Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let lat = Reflect::get(&coords, &JsValue::from_str("latitude")).ok()?.as_f64()?;
    let lng = Reflect::get(&coords, &JsValue::from_str("longitude")).ok()?.as_f64()?;
    Some(Coordinate::new(lat, lng))
}
