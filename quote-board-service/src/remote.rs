//! Client for the placeholder posts API used as the sync backend.
//!
//! The read side returns generic posts whose `title` becomes the quote text;
//! the write side is an echo service that never persists anything.

use quote_board_types::Quote;

/// Category stamped onto every quote that came from the server.
pub const SERVER_CATEGORY: &str = "Server";

/// A post from the placeholder API. Only the title is used; the other
/// fields (`userId`, `id`, `body`) are ignored on deserialization.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RemotePost {
    pub title: String,
}

/// Echo returned by the write endpoint. The endpoint assigns a fake id and
/// reflects the posted fields back; nothing is stored server-side.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct PushedQuote {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Fetch one batch of posts, asking the endpoint to limit the result via
/// the `_limit` query parameter.
pub async fn fetch_posts(
    client: &reqwest::Client,
    base_url: &str,
    limit: usize,
) -> Result<Vec<RemotePost>, String> {
    let url = format!("{}?_limit={}", base_url, limit);

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| format!("Sync request failed: {}", e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;

    if !status.is_success() {
        return Err(format!("Sync endpoint error ({}): {}", status, body));
    }

    serde_json::from_str(&body).map_err(|e| format!("Malformed sync response: {}", e))
}

/// Map a post batch into quotes tagged with the server category, truncating
/// to `limit` in case the endpoint ignored the `_limit` parameter.
pub fn posts_to_quotes(posts: Vec<RemotePost>, limit: usize) -> Vec<Quote> {
    posts
        .into_iter()
        .take(limit)
        .map(|post| Quote {
            text: post.title,
            category: SERVER_CATEGORY.to_string(),
        })
        .collect()
}

/// Send a single quote to the write endpoint. The endpoint echoes the body
/// back with a fake id and does not persist it.
pub async fn push_quote(
    client: &reqwest::Client,
    base_url: &str,
    quote: &Quote,
) -> Result<PushedQuote, String> {
    let response = client
        .post(base_url)
        .json(quote)
        .send()
        .await
        .map_err(|e| format!("Push request failed: {}", e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))?;

    if !status.is_success() {
        return Err(format!("Push endpoint error ({}): {}", status, body));
    }

    serde_json::from_str(&body).map_err(|e| format!("Malformed push response: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_post_parse_ignores_extra_fields() {
        let json = r#"[
            {"userId": 1, "id": 1, "title": "first title", "body": "first body"},
            {"userId": 1, "id": 2, "title": "second title", "body": "second body"}
        ]"#;
        let posts: Vec<RemotePost> = serde_json::from_str(json).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "first title");
    }

    #[test]
    fn test_posts_to_quotes_maps_title_and_tags_server() {
        let posts = vec![
            RemotePost {
                title: "first title".to_string(),
            },
            RemotePost {
                title: "second title".to_string(),
            },
        ];

        let quotes = posts_to_quotes(posts, 5);

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].text, "first title");
        assert!(quotes.iter().all(|q| q.category == SERVER_CATEGORY));
    }

    #[test]
    fn test_posts_to_quotes_truncates_to_limit() {
        let posts = (0..8)
            .map(|i| RemotePost {
                title: format!("title {}", i),
            })
            .collect();

        let quotes = posts_to_quotes(posts, 5);

        assert_eq!(quotes.len(), 5);
        assert_eq!(quotes.last().unwrap().text, "title 4");
    }

    #[test]
    fn test_pushed_quote_parse() {
        let json = r#"{"text": "Talk is cheap.", "category": "Programming", "id": 101}"#;
        let echo: PushedQuote = serde_json::from_str(json).unwrap();
        assert_eq!(echo.id, Some(101));
        assert_eq!(echo.text.as_deref(), Some("Talk is cheap."));
    }
}
