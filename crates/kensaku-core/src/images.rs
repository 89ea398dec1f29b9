use url::Url;

use crate::config::ImageConfig;

/// Which remote image URLs the UI may download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePolicy {
    allowed_hosts: Vec<String>,
}

impl ImagePolicy {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed_hosts: hosts
                .into_iter()
                .map(|h| h.as_ref().trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(&config.allowed_hosts)
    }

    /// `https` only, exact host match, any path.
    pub fn permits(&self, raw: &str) -> bool {
        let Ok(url) = Url::parse(raw) else {
            return false;
        };
        if url.scheme() != "https" {
            return false;
        }
        url.host_str()
            .is_some_and(|host| self.allowed_hosts.iter().any(|h| h == host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mal_only() -> ImagePolicy {
        ImagePolicy::new(["cdn.myanimelist.net"])
    }

    #[test]
    fn test_allows_listed_https_host() {
        assert!(mal_only().permits("https://cdn.myanimelist.net/images/anime/1208/94745.jpg"));
        assert!(mal_only().permits("https://CDN.MyAnimeList.net/images/x.webp"));
    }

    #[test]
    fn test_rejects_other_hosts_and_schemes() {
        let policy = mal_only();
        assert!(!policy.permits("http://cdn.myanimelist.net/images/anime/1.jpg"));
        assert!(!policy.permits("https://evil.example.com/cdn.myanimelist.net.jpg"));
        assert!(!policy.permits("https://cdn.myanimelist.net.evil.example/x.jpg"));
        assert!(!policy.permits("not a url"));
        assert!(!policy.permits(""));
    }

    #[test]
    fn test_from_config() {
        let policy = ImagePolicy::from_config(&ImageConfig {
            allowed_hosts: vec![" img.example.org ".into(), String::new()],
        });
        assert!(policy.permits("https://img.example.org/a.png"));
        assert!(!policy.permits("https://cdn.myanimelist.net/a.png"));
    }
}
