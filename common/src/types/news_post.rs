use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// On-disk shape of the curated social-media feed.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsFeed {
    pub posts: Vec<RawNewsPost>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNewsPost {
    pub id: String,
    pub image_url: String,
    #[serde(default)]
    pub caption: String,
    /// Link to the original post.
    #[serde(default)]
    pub lien: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    pub fn from_media_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".mp4") || lower.ends_with(".webm") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsPost {
    pub id: String,
    pub media_url: String,
    pub media_kind: MediaKind,
    pub caption: String,
    pub link: Option<String>,
}

impl From<RawNewsPost> for NewsPost {
    fn from(raw: RawNewsPost) -> Self {
        Self {
            media_kind: MediaKind::from_media_path(&raw.image_url),
            id: raw.id,
            media_url: raw.image_url,
            caption: raw.caption,
            link: raw.lien.filter(|link| !link.trim().is_empty()),
        }
    }
}

impl NewsFeed {
    pub fn parse(raw: &str) -> Result<Vec<NewsPost>, AppError> {
        let feed: NewsFeed = serde_json::from_str(raw)
            .map_err(|e| AppError::NewsFeed(format!("invalid news feed: {e}")))?;
        Ok(feed.posts.into_iter().map(NewsPost::from).collect())
    }

    /// Reads the feed fresh on every call; the file is curated outside this service.
    pub async fn load(path: impl AsRef<Path>) -> Result<Vec<NewsPost>, AppError> {
        let path = path.as_ref();
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!(
                    "news feed {} does not exist",
                    path.display()
                )))
            }
            Err(e) => return Err(AppError::Io(e)),
        };
        Self::parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "posts": [
            {"id": "1", "image_url": "posts/visite.jpg", "caption": "**Visite** du lycée", "lien": "https://www.instagram.com/p/DF-hVTUqdkh/"},
            {"id": "2", "image_url": "posts/fresque.MP4", "caption": "Fresque", "lien": ""},
            {"id": "3", "image_url": "posts/forum.webm"}
        ]
    }"#;

    #[test]
    fn test_parse_feed_annotates_media_kind() {
        let posts = NewsFeed::parse(FEED).expect("valid feed");
        assert_eq!(posts.len(), 3);

        assert_eq!(posts[0].media_kind, MediaKind::Image);
        assert_eq!(
            posts[0].link.as_deref(),
            Some("https://www.instagram.com/p/DF-hVTUqdkh/")
        );
        assert_eq!(posts[1].media_kind, MediaKind::Video);
        assert_eq!(posts[1].link, None);
        assert_eq!(posts[2].media_kind, MediaKind::Video);
        assert_eq!(posts[2].caption, "");
    }

    #[test]
    fn test_parse_rejects_invalid_feed() {
        assert!(matches!(
            NewsFeed::parse(r#"{"items": []}"#),
            Err(AppError::NewsFeed(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = NewsFeed::load(dir.path().join("insta.json")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("insta.json");
        tokio::fs::write(&path, FEED).await.expect("write feed");

        let posts = NewsFeed::load(&path).await.expect("load feed");
        assert_eq!(posts.len(), 3);
    }
}
