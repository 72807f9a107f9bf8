use ambience_common::{ChangeNotifier, SubscriptionId};
use web_sys::{CustomEvent, CustomEventInit};

use super::js_error_message;

/// Re-dispatch every preference event as a `window` `CustomEvent` so
/// page scripts listening with `addEventListener` keep working.
pub fn attach_window_event_bridge(notifier: &ChangeNotifier) -> Option<SubscriptionId> {
    let window = web_sys::window()?;
    Some(notifier.subscribe(move |event| {
        let detail = match js_sys::JSON::parse(&event.detail().to_string()) {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!(event = event.name(), error = %js_error_message(&e), "event detail not representable");
                return;
            }
        };
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        match CustomEvent::new_with_event_init_dict(event.name(), &init) {
            Ok(custom) => {
                let _ = window.dispatch_event(&custom);
            }
            Err(e) => {
                tracing::warn!(event = event.name(), error = %js_error_message(&e), "failed to build CustomEvent");
            }
        }
    }))
}
