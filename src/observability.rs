use biometrics::{Collector, Counter};

pub(crate) static CLIENT_EXCHANGES: Counter = Counter::new("enlist.client.exchanges");
pub(crate) static CLIENT_EXCHANGE_ERRORS: Counter = Counter::new("enlist.client.exchange_errors");

pub(crate) static HANDLER_TURNS: Counter = Counter::new("enlist.handler.turns");
pub(crate) static HANDLER_FIELDS_CAPTURED: Counter = Counter::new("enlist.handler.fields_captured");
pub(crate) static HANDLER_COMPLETIONS: Counter = Counter::new("enlist.handler.completions");

pub(crate) static UPSTREAM_REQUESTS: Counter = Counter::new("enlist.upstream.requests");
pub(crate) static UPSTREAM_ERRORS: Counter = Counter::new("enlist.upstream.errors");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_EXCHANGES);
    collector.register_counter(&CLIENT_EXCHANGE_ERRORS);

    collector.register_counter(&HANDLER_TURNS);
    collector.register_counter(&HANDLER_FIELDS_CAPTURED);
    collector.register_counter(&HANDLER_COMPLETIONS);

    collector.register_counter(&UPSTREAM_REQUESTS);
    collector.register_counter(&UPSTREAM_ERRORS);
}
