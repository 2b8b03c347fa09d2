use std::fmt;
use std::str::FromStr;

use url::Url;

use super::{ProblemError, ProblemResult};

const BAEKJOON_HOST: &str = "acmicpc.net";
const PROGRAMMERS_HOST: &str = "programmers.co.kr";
const BAEKJOON_PROBLEM_URL: &str = "https://www.acmicpc.net/problem/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Baekjoon,
    Programmers,
}

impl Platform {
    pub fn id(self) -> &'static str {
        match self {
            Platform::Baekjoon => "baekjoon",
            Platform::Programmers => "programmers",
        }
    }

    /// Judge serving `target`, recognised by the URL host.
    pub fn from_url(target: &str) -> Option<Platform> {
        let url = Url::parse(target).ok()?;
        let host = url.host_str()?;
        let on = |domain: &str| host == domain || host.ends_with(&format!(".{domain}"));
        if on(BAEKJOON_HOST) {
            Some(Platform::Baekjoon)
        } else if on(PROGRAMMERS_HOST) {
            Some(Platform::Programmers)
        } else {
            None
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baekjoon" | "boj" => Ok(Platform::Baekjoon),
            "programmers" => Ok(Platform::Programmers),
            other => Err(ProblemError::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// A resolved page to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemRequest {
    pub platform: Platform,
    pub url: String,
}

impl ProblemRequest {
    /// Work out which judge `target` belongs to and the page URL to fetch.
    ///
    /// A known explicit platform wins. Otherwise the judge is recognised from
    /// the URL's host; an unknown explicit id is only reported when the host
    /// does not identify a judge either. A bare problem number is expanded to
    /// a Baekjoon URL.
    pub fn resolve(target: &str, platform: Option<&str>) -> ProblemResult<Self> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ProblemError::MissingTarget);
        }

        let platform = match platform.map(str::trim).filter(|p| !p.is_empty()) {
            Some(id) => match id.parse::<Platform>() {
                Ok(platform) => platform,
                Err(e) => Platform::from_url(target).ok_or(e)?,
            },
            None => Platform::from_url(target)
                .ok_or_else(|| ProblemError::UnsupportedPlatform(target.to_string()))?,
        };

        let url = if platform == Platform::Baekjoon && target.chars().all(|c| c.is_ascii_digit())
        {
            format!("{}{}", BAEKJOON_PROBLEM_URL, target)
        } else {
            target.to_string()
        };

        Ok(Self { platform, url })
    }
}
