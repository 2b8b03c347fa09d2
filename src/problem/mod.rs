//! Competitive-programming problem pages.
//!
//! Resolves a user-supplied target (URL or bare problem number) to a judge
//! page, fetches it, and extracts the statement into a plain-text bundle the
//! mentoring backend consumes.

pub mod fetch;
pub mod parse;
pub mod platform;

use thiserror::Error;

pub use fetch::{HttpFetcher, PageFetcher};
pub use platform::{Platform, ProblemRequest};

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("URL is required")]
    MissingTarget,

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to parse {platform} problem page: {reason}")]
    Parse { platform: Platform, reason: String },
}

pub type ProblemResult<T> = Result<T, ProblemError>;

/// One sample input/output pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub input: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemStatement {
    pub platform: Platform,
    pub title: String,
    pub description: String,
    pub input: String,
    pub output: String,
    pub examples: Vec<Example>,
}

impl ProblemStatement {
    /// Render the text bundle. Section headings are part of the backend's
    /// prompt format and must stay as they are.
    pub fn to_bundle(&self) -> String {
        let mut out = format!(
            "[문제 제목]: {}\n\n[문제 설명]\n{}",
            self.title, self.description
        );
        if self.platform == Platform::Programmers {
            return out;
        }

        out.push_str(&format!(
            "\n\n[입력]\n{}\n\n[출력]\n{}\n\n[예제]",
            self.input, self.output
        ));
        for (i, example) in self.examples.iter().enumerate() {
            let n = i + 1;
            out.push_str(&format!(
                "\n[예제 입력 {n}]\n{}\n\n[예제 출력 {n}]\n{}\n",
                example.input, example.output
            ));
        }
        out
    }
}

/// Fetch and extract a problem in one go.
pub async fn scrape<F: PageFetcher>(
    fetcher: &F,
    request: &ProblemRequest,
) -> ProblemResult<ProblemStatement> {
    let html = fetcher.fetch_html(&request.url).await?;
    parse::parse_page(request.platform, &html)
}
