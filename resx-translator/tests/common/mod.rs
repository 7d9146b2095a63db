#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use resx_translator::{Error, HttpRequest, HttpResponse, ServiceConfig, Transport, Translator};

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, Error> + Send + Sync;

/// Transport that answers from a closure and records every request it sees.
pub struct ScriptedTransport {
    respond: Box<Responder>,
    requests: Mutex<Vec<HttpRequest>>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(
        respond: impl Fn(&HttpRequest) -> Result<HttpResponse, Error> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Always answers with the given status and body.
    pub fn fixed(status: u16, body: &str) -> Arc<Self> {
        let body = body.to_string();
        Self::new(move |_| Ok(HttpResponse::new(status, body.clone())))
    }

    /// Answers translate calls by prefixing every text with `[<to>] `.
    pub fn echo() -> Arc<Self> {
        Self::new(|request| {
            let to = request
                .url
                .query_pairs()
                .find(|(k, _)| k == "to")
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            let body: Vec<serde_json::Value> =
                serde_json::from_slice(request.body.as_deref().unwrap_or(b"[]")).unwrap();
            let results: Vec<_> = body
                .iter()
                .map(|item| {
                    let text = item["Text"].as_str().unwrap_or_default();
                    serde_json::json!({
                        "translations": [{ "text": format!("[{to}] {text}"), "to": to }]
                    })
                })
                .collect();
            Ok(HttpResponse::new(
                200,
                serde_json::to_vec(&results).unwrap(),
            ))
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = (self.respond)(&request);
        self.requests.lock().unwrap().push(request);
        response
    }
}

pub fn test_config() -> ServiceConfig {
    ServiceConfig::new("test-key", "westeurope").with_endpoint("https://translator.test")
}

pub fn translator_with(transport: Arc<ScriptedTransport>) -> Translator {
    Translator::new(transport, test_config())
}

/// A minimal but complete version 2.0 resx file.
pub fn resx(records: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<root>\n  <resheader name=\"resmimetype\">\n    <value>text/microsoft-resx</value>\n  </resheader>\n  <resheader name=\"version\">\n    <value>2.0</value>\n  </resheader>\n",
    );
    for (name, value) in records {
        xml.push_str(&format!(
            "  <data name=\"{name}\" xml:space=\"preserve\">\n    <value>{value}</value>\n  </data>\n"
        ));
    }
    xml.push_str("</root>\n");
    xml
}
