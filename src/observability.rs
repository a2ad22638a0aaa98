use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("helpdesk.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("helpdesk.client.request_errors");
pub(crate) static CLIENT_AUTH_FAILURES: Counter = Counter::new("helpdesk.client.auth_failures");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("helpdesk.client.request_duration_seconds");

pub(crate) static WIDGET_OPENS: Counter = Counter::new("helpdesk.widget.opens");
pub(crate) static WIDGET_DEGRADED_OPENS: Counter = Counter::new("helpdesk.widget.degraded_opens");
pub(crate) static WIDGET_SENDS: Counter = Counter::new("helpdesk.widget.sends");
pub(crate) static WIDGET_SEND_FAILURES: Counter = Counter::new("helpdesk.widget.send_failures");
pub(crate) static WIDGET_ESCALATIONS: Counter = Counter::new("helpdesk.widget.escalations");
pub(crate) static WIDGET_FEEDBACK: Counter = Counter::new("helpdesk.widget.feedback_submissions");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_AUTH_FAILURES);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&WIDGET_OPENS);
    collector.register_counter(&WIDGET_DEGRADED_OPENS);
    collector.register_counter(&WIDGET_SENDS);
    collector.register_counter(&WIDGET_SEND_FAILURES);
    collector.register_counter(&WIDGET_ESCALATIONS);
    collector.register_counter(&WIDGET_FEEDBACK);
}
