use opentelemetry::{KeyValue, metrics::UpDownCounter};
use std::sync::LazyLock;

static STATDS: LazyLock<UpDownCounter<i64>> = LazyLock::new(|| {
    logfire::i64_up_down_counter("happy_paws_statds")
        .with_description("HappyPaws booking statistics")
        .with_unit("attempt")
        .build()
});

fn incr_statds(metric: String, value: String) {
    STATDS.add(1, &[KeyValue::new(metric, value)]);
}

pub fn incr_user_action_statds(action: &str) {
    incr_statds("user_action".to_string(), action.into())
}

pub fn incr_appointment_status_statds(status: &str) {
    incr_statds("appointment_status".to_string(), status.into())
}

pub fn incr_notification_statds(notification_type: &str) {
    incr_statds("notification".to_string(), notification_type.into())
}
