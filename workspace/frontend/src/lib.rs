use yew::prelude::*;

mod components;
pub mod api_client;
pub mod controller;
pub mod settings;
pub mod ui;

use components::prediction_form::PredictionForm;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <main class="min-h-screen bg-base-200 py-10 px-4">
            <PredictionForm />
        </main>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Dengue Closure Forecast Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base: {:?}", settings.api_base);
    log::debug!("Debug mode: {}", settings.debug_mode);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
