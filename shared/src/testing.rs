use std::{
    fmt,
    sync::{Arc, Mutex},
};

use thiserror::Error;
use tracing::{
    field::{Field, Visit},
    subscriber::DefaultGuard,
    Event, Level, Subscriber,
};
use tracing_subscriber::{layer::Context, prelude::*, Layer};

use crate::client::{ClientTransport, RawResponse, RequestConfig};

#[derive(Error, Debug)]
#[error("{0}")]
pub(crate) struct FakeError(pub String);

type Responder = dyn Fn(&str, &RequestConfig) -> Result<RawResponse, FakeError> + Send + Sync;

/// In-process transport that records every request and answers from a closure.
#[derive(Clone)]
pub(crate) struct FakeTransport {
    responder: Arc<Responder>,
    requests: Arc<Mutex<Vec<(String, RequestConfig)>>>,
}

impl FakeTransport {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(&str, &RequestConfig) -> Result<RawResponse, FakeError> + Send + Sync + 'static,
    {
        Self {
            responder: Arc::new(responder),
            requests: Arc::default(),
        }
    }

    pub(crate) fn replying(status: http::StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        Self::new(move |_, _| Ok(RawResponse::new(status, body.clone())))
    }

    pub(crate) fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::new(move |_, _| Err(FakeError(message.clone())))
    }

    pub(crate) fn requests(&self) -> Vec<(String, RequestConfig)> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> Option<(String, RequestConfig)> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl ClientTransport for FakeTransport {
    type Error = FakeError;

    async fn send(&self, url: &str, request: &RequestConfig) -> Result<RawResponse, FakeError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), request.clone()));

        (self.responder)(url, request)
    }
}

/// Messages of the `ERROR` events seen on this thread while the capture lives.
pub(crate) struct CapturedErrors {
    messages: Arc<Mutex<Vec<String>>>,
    _guard: DefaultGuard,
}

impl CapturedErrors {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

struct ErrorLayer {
    messages: Arc<Mutex<Vec<String>>>,
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for ErrorLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() != Level::ERROR {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.messages.lock().unwrap().push(visitor.0);
    }
}

/// Route this thread's tracing events into a fresh capture. Tests run on
/// tokio's current-thread runtime, so every event of the test lands here.
pub(crate) fn capture_errors() -> CapturedErrors {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let layer = ErrorLayer {
        messages: messages.clone(),
    };
    let guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(layer));

    CapturedErrors {
        messages,
        _guard: guard,
    }
}
