use web_sys::window;

/// Show a blocking browser alert.
///
/// Falls back to the console when there is no window or the dialog is refused.
pub fn show_alert(message: &str) {
    log::warn!("Alerting user: {}", message);

    let Some(window) = window() else {
        log::error!("No window available for alert: {}", message);
        return;
    };

    if let Err(e) = window.alert_with_message(message) {
        log::error!("Failed to show alert: {:?}", e);
    }
}
