// Sequential HTTP requester for redirhound
// One shared reqwest client per run; batches are all-or-nothing

use reqwest::Client;
use std::time::Duration;

pub struct Requester {
    pub client: Client,
    pub num_requests: usize,
}

impl Requester {
    pub fn new(num_requests: usize) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap();
        Self {
            client,
            num_requests,
        }
    }

    /// Issue `num_requests` sequential GETs against `url` and collect the
    /// response bodies. Any transport error aborts the whole batch: the
    /// caller gets `None`, never a partial list.
    pub async fn get_batch(&self, url: &str) -> Option<Vec<String>> {
        let mut bodies = Vec::with_capacity(self.num_requests);
        for _ in 0..self.num_requests {
            let resp = self.client.get(url).send().await.ok()?;
            let body = resp.text().await.ok()?;
            bodies.push(body);
        }
        Some(bodies)
    }
}
