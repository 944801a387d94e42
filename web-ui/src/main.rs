//! Native desktop build of the clothing catalog.
//!
//! Same egui app as the WASM build, talking to the collection service over HTTP.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use catalog_core::CatalogConfig;
    use catalog_web_ui::app::CatalogApp;
    use eframe::egui;

    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = CatalogConfig::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Clothing Product Management",
        options,
        Box::new(move |cc| Ok(Box::new(CatalogApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start desktop app: {}", e))
}

// The browser build starts through `catalog_web_ui::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
