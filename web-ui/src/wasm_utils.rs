//! Cross-platform utilities that work in both WASM and native contexts

use chrono::NaiveDate;

/// Local calendar date, used to reject future import dates.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    pub fn set_panic_hook() {
        // Better panic messages in the browser console.
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
    }

    pub fn now_timestamp() -> u64 {
        js_sys::Date::now() as u64
    }

    pub fn spawn_async<F>(future: F)
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(future);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_impl {
    pub fn set_panic_hook() {
        // Native panics already go to stderr.
    }

    pub fn now_timestamp() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    pub fn spawn_async<F>(future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        tokio::spawn(future);
    }
}

// Re-export the appropriate implementation
#[cfg(target_arch = "wasm32")]
pub use wasm_impl::*;

#[cfg(not(target_arch = "wasm32"))]
pub use native_impl::*;
