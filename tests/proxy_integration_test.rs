// Proxy server tests
// A real listener on a free port, with page fetches served from fixtures

use codegenie::problem::{PageFetcher, ProblemError, ProblemResult};
use codegenie::proxy::ProxyServer;

const BAEKJOON_PAGE: &str = r#"
<html><body>
  <span id="problem_title">A+B</span>
  <div id="problem_description"><p>Add two numbers.</p></div>
  <div id="problem_input"><p>A and B.</p></div>
  <div id="problem_output"><p>A+B.</p></div>
  <pre id="sample-input-1">1 2</pre>
  <pre id="sample-output-1">3</pre>
</body></html>
"#;

struct FixtureFetcher;

impl PageFetcher for FixtureFetcher {
    async fn fetch_html(&self, url: &str) -> ProblemResult<String> {
        if url.ends_with("/1000") {
            Ok(BAEKJOON_PAGE.to_string())
        } else {
            Err(ProblemError::Fetch {
                url: url.to_string(),
                reason: "status 404 Not Found".to_string(),
            })
        }
    }
}

async fn get(port: u16, query: &str) -> (u16, serde_json::Value) {
    let url = format!("http://127.0.0.1:{}/api/parse?{}", port, query);
    let response = reqwest::get(&url).await.unwrap();
    let status = response.status().as_u16();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body = response.text().await.unwrap();
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_proxy_serves_parse_requests() {
    let server = ProxyServer::bind(0).unwrap();
    let port = server.port();
    let shutdown = server.shutdown_handle();

    let client = async {
        let (status, body) = get(port, "url=1000&platform=baekjoon").await;
        assert_eq!(status, 200);
        let content = body["content"].as_str().unwrap();
        assert!(content.contains("A+B"));
        assert!(content.contains("1 2"));

        let (status, body) = get(port, "url=1001&platform=baekjoon").await;
        assert_eq!(status, 500);
        assert!(body["detail"].as_str().unwrap().contains("404"));

        let (status, _) = get(port, "platform=baekjoon").await;
        assert_eq!(status, 400);

        shutdown.shutdown();
    };

    let (served, ()) = tokio::join!(server.serve(FixtureFetcher), client);
    served.unwrap();
}
