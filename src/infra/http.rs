//! HTTP infrastructure — implements `HttpProbe` with a blocking `ureq`
//! agent on `spawn_blocking`.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{HttpProbe, HttpResponseInfo};

/// Production implementation that performs real HTTP requests.
pub struct UreqHttpProbe;

impl HttpProbe for UreqHttpProbe {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponseInfo> {
        let url = url.to_owned();
        tokio::task::spawn_blocking(move || {
            let agent = ureq::AgentBuilder::new().timeout(timeout).build();
            let started = std::time::Instant::now();
            match agent.get(&url).call() {
                Ok(resp) => Ok(HttpResponseInfo {
                    status: resp.status(),
                    latency: started.elapsed(),
                }),
                // A 4xx/5xx answer is still an answer — callers decide
                // whether the status is acceptable.
                Err(ureq::Error::Status(status, _)) => Ok(HttpResponseInfo {
                    status,
                    latency: started.elapsed(),
                }),
                Err(e) => Err(anyhow::anyhow!("GET {url}: {e}")),
            }
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    }
}
