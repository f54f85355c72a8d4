//! Crawler detection from a User-Agent header.

const CRAWLER_KEYWORDS: [&str; 6] = ["bot", "crawler", "spider", "slurp", "crawl", "fetcher"];

/// Declared name of the crawler behind `user_agent`, or `None` for
/// ordinary browsers.
///
/// The name is the product part (before `/`) of the first token that
/// mentions a crawler keyword, e.g. `Googlebot` from
/// `Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)`.
pub fn classify_user_agent(user_agent: &str) -> Option<String> {
    user_agent
        .split(|c: char| c.is_whitespace() || matches!(c, ';' | '(' | ')' | ','))
        .filter(|token| !token.is_empty() && !token.starts_with('+') && !token.contains("://"))
        .map(|token| token.split('/').next().unwrap_or(token))
        .find(|product| {
            let lower = product.to_ascii_lowercase();
            CRAWLER_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_crawlers() {
        assert_eq!(
            classify_user_agent(
                "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"
            ),
            Some("Googlebot".to_string())
        );
        assert_eq!(
            classify_user_agent("Mozilla/5.0 (compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm)"),
            Some("bingbot".to_string())
        );
        assert_eq!(
            classify_user_agent("Mozilla/5.0 (compatible; Yahoo! Slurp; http://help.yahoo.com/help/us/ysearch/slurp)"),
            Some("Slurp".to_string())
        );
        assert_eq!(
            classify_user_agent("facebookexternalhit/1.1 Applebot/0.1"),
            Some("Applebot".to_string())
        );
    }

    #[test]
    fn browsers_are_not_crawlers() {
        assert_eq!(
            classify_user_agent(
                "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
            ),
            None
        );
        assert_eq!(classify_user_agent(""), None);
    }
}
