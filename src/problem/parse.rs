// src/problem/parse.rs - CSS-selector text extraction for judge pages

use log::{debug, warn};
use scraper::{Html, Selector};

use super::{Example, Platform, ProblemError, ProblemResult, ProblemStatement};

/// Shown when a Programmers page carries no statement in its static HTML.
pub const PROGRAMMERS_DYNAMIC_NOTICE: &str = "프로그래머스 문제는 동적 렌더링으로 인해 전체 내용을 가져오기 어려울 수 있습니다. 링크를 참조하세요.";

/// Upper bound on sample pairs read from one page.
const MAX_EXAMPLES: usize = 64;

pub fn parse_page(platform: Platform, html: &str) -> ProblemResult<ProblemStatement> {
    match platform {
        Platform::Baekjoon => parse_baekjoon(html),
        Platform::Programmers => parse_programmers(html),
    }
}

struct Page {
    platform: Platform,
    document: Html,
}

impl Page {
    fn new(platform: Platform, html: &str) -> Self {
        Self {
            platform,
            document: Html::parse_document(html),
        }
    }

    fn selector(&self, css: &str) -> ProblemResult<Selector> {
        Selector::parse(css).map_err(|e| ProblemError::Parse {
            platform: self.platform,
            reason: format!("invalid selector {css}: {e:?}"),
        })
    }

    /// Trimmed text of every element matching `css`, concatenated.
    /// `None` when nothing matches.
    fn text(&self, css: &str) -> ProblemResult<Option<String>> {
        let selector = self.selector(css)?;
        let mut matched = false;
        let mut text = String::new();
        for element in self.document.select(&selector) {
            matched = true;
            text.extend(element.text());
        }
        Ok(matched.then(|| text.trim().to_string()))
    }

    fn text_or_empty(&self, css: &str) -> ProblemResult<String> {
        Ok(self.text(css)?.unwrap_or_default())
    }

    fn missing(&self, what: &str) -> ProblemError {
        ProblemError::Parse {
            platform: self.platform,
            reason: format!("{what} not found"),
        }
    }
}

pub fn parse_baekjoon(html: &str) -> ProblemResult<ProblemStatement> {
    let page = Page::new(Platform::Baekjoon, html);

    let title = page.text_or_empty("#problem_title")?;
    if title.is_empty() {
        return Err(page.missing("problem title"));
    }

    let mut examples = Vec::new();
    for n in 1..=MAX_EXAMPLES {
        let Some(input) = page.text(&format!("#sample-input-{n}"))? else {
            break;
        };
        let output = page.text_or_empty(&format!("#sample-output-{n}"))?;
        examples.push(Example { input, output });
    }
    if examples.len() == MAX_EXAMPLES
        && page
            .text(&format!("#sample-input-{}", MAX_EXAMPLES + 1))?
            .is_some()
    {
        warn!("baekjoon '{}': ignoring samples after the first {}", title, MAX_EXAMPLES);
    }
    debug!("baekjoon '{}': {} examples", title, examples.len());

    Ok(ProblemStatement {
        platform: Platform::Baekjoon,
        description: page.text_or_empty("#problem_description")?,
        input: page.text_or_empty("#problem_input")?,
        output: page.text_or_empty("#problem_output")?,
        title,
        examples,
    })
}

pub fn parse_programmers(html: &str) -> ProblemResult<ProblemStatement> {
    let page = Page::new(Platform::Programmers, html);

    let mut title = page.text_or_empty(".algorithm-title")?;
    if title.is_empty() {
        title = page.text_or_empty("title")?;
    }
    if title.is_empty() {
        return Err(page.missing("problem title"));
    }

    let mut description = page.text_or_empty(".guide-section-description")?;
    if description.is_empty() {
        description = PROGRAMMERS_DYNAMIC_NOTICE.to_string();
    }

    Ok(ProblemStatement {
        platform: Platform::Programmers,
        title,
        description,
        input: String::new(),
        output: String::new(),
        examples: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count_is_capped() {
        let samples: String = (1..=MAX_EXAMPLES + 1)
            .map(|n| {
                format!(r#"<pre id="sample-input-{n}">{n}</pre><pre id="sample-output-{n}">{n}</pre>"#)
            })
            .collect();
        let html = format!(r#"<span id="problem_title">Many</span>{samples}"#);

        let problem = parse_baekjoon(&html).unwrap();
        assert_eq!(problem.examples.len(), MAX_EXAMPLES);
        assert_eq!(problem.examples[MAX_EXAMPLES - 1].input, MAX_EXAMPLES.to_string());
    }

    const BAEKJOON_PAGE: &str = r#"<html><body>
        <span id="problem_title"> A+B </span>
        <div id="problem_description"><p>Print A+B.</p></div>
        <div id="problem_input"><p>A and B on one line.</p></div>
        <div id="problem_output"><p>A+B.</p></div>
        <pre id="sample-input-1">1 2
</pre>
        <pre id="sample-output-1">3</pre>
        <pre id="sample-input-2">4 5</pre>
        <pre id="sample-output-2">9</pre>
    </body></html>"#;

    #[test]
    fn test_baekjoon_fields() {
        let statement = parse_baekjoon(BAEKJOON_PAGE).unwrap();
        assert_eq!(statement.title, "A+B");
        assert_eq!(statement.description, "Print A+B.");
        assert_eq!(statement.input, "A and B on one line.");
        assert_eq!(statement.output, "A+B.");
        assert_eq!(
            statement.examples,
            vec![
                Example {
                    input: "1 2".to_string(),
                    output: "3".to_string()
                },
                Example {
                    input: "4 5".to_string(),
                    output: "9".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_baekjoon_without_title_is_parse_error() {
        let err = parse_baekjoon("<html><body><p>Not found</p></body></html>").unwrap_err();
        assert!(matches!(
            err,
            ProblemError::Parse {
                platform: Platform::Baekjoon,
                ..
            }
        ));
    }

    #[test]
    fn test_baekjoon_example_numbering_stops_at_gap() {
        let html = r#"<span id="problem_title">T</span>
            <pre id="sample-input-1">a</pre><pre id="sample-output-1">b</pre>
            <pre id="sample-input-3">c</pre><pre id="sample-output-3">d</pre>"#;
        let statement = parse_baekjoon(html).unwrap();
        assert_eq!(statement.examples.len(), 1);
        assert_eq!(statement.description, "");
    }

    #[test]
    fn test_programmers_prefers_algorithm_title() {
        let html = r#"<html><head><title>Programmers</title></head><body>
            <span class="algorithm-title">Marathon</span>
            <div class="guide-section-description">Find who did not finish.</div>
        </body></html>"#;
        let statement = parse_programmers(html).unwrap();
        assert_eq!(statement.title, "Marathon");
        assert_eq!(statement.description, "Find who did not finish.");
    }

    #[test]
    fn test_programmers_falls_back_to_page_title_and_notice() {
        let html = "<html><head><title>코딩테스트 연습</title></head><body></body></html>";
        let statement = parse_programmers(html).unwrap();
        assert_eq!(statement.title, "코딩테스트 연습");
        assert_eq!(statement.description, PROGRAMMERS_DYNAMIC_NOTICE);
    }

    #[test]
    fn test_programmers_empty_page_is_parse_error() {
        assert!(parse_programmers("<html></html>").is_err());
    }
}
