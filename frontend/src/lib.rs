pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Browser entry point: loads runtime config, then mounts the router.
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Starting Rollcall frontend");

    wasm_bindgen_futures::spawn_local(async move {
        config::init().await;
        log::info!("Runtime config initialized");
        router::mount_app();
    });
}
