use web_sys::{Storage, Window};

pub fn window() -> Result<Window, String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window().ok_or_else(|| "No window object".to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Err("No window object".to_string())
    }
}

/// Browser-session scoped storage; cleared when the tab closes.
pub fn session_storage() -> Result<Storage, String> {
    window()?
        .session_storage()
        .map_err(|_| "No sessionStorage".to_string())?
        .ok_or_else(|| "No sessionStorage".to_string())
}

pub fn read_session_item(key: &str) -> Option<String> {
    session_storage().ok()?.get_item(key).ok().flatten()
}

pub fn write_session_item(key: &str, value: &str) -> Result<(), String> {
    session_storage()?
        .set_item(key, value)
        .map_err(|_| format!("Failed to store {}", key))
}

pub fn remove_session_item(key: &str) {
    if let Ok(storage) = session_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn navigate_to(path: &str) {
    if let Ok(window) = window() {
        let _ = window.location().set_href(path);
    }
}
