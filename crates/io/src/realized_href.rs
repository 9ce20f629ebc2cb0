use std::path::PathBuf;
use url::Url;

/// An href that has been realized to a path or a url.
#[derive(Debug, Clone, PartialEq)]
pub enum RealizedHref {
    /// A path buf
    PathBuf(PathBuf),

    /// A url
    Url(Url),
}

impl From<&str> for RealizedHref {
    fn from(href: &str) -> RealizedHref {
        match Url::parse(href) {
            Ok(url) if url.scheme() == "file" => url
                .to_file_path()
                .map(RealizedHref::PathBuf)
                .unwrap_or(RealizedHref::Url(url)),
            Ok(url) if matches!(url.scheme(), "http" | "https") => RealizedHref::Url(url),
            _ => RealizedHref::PathBuf(PathBuf::from(href)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RealizedHref;
    use std::path::PathBuf;

    #[test]
    fn file_url_is_a_path() {
        assert_eq!(
            RealizedHref::from("file:///data/catalog.json"),
            RealizedHref::PathBuf(PathBuf::from("/data/catalog.json"))
        );
    }

    #[test]
    fn relative_path() {
        assert_eq!(
            RealizedHref::from("data/catalog.json"),
            RealizedHref::PathBuf(PathBuf::from("data/catalog.json"))
        );
    }

    #[test]
    fn http_url() {
        assert!(matches!(
            RealizedHref::from("https://stac.test/catalog.json"),
            RealizedHref::Url(_)
        ));
    }
}
