use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating image URL fields on listings and ads.
    /// - Valid: "https://cdn.example.com/onion.jpg", "http://img.local/a.png"
    /// - Invalid: "ftp://x", "not-a-url", ""
    pub static ref IMAGE_URL_REGEX: Regex = Regex::new(r"^https?://[^\s]+$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_regex_valid() {
        assert!(IMAGE_URL_REGEX.is_match("https://cdn.example.com/onion.jpg"));
        assert!(IMAGE_URL_REGEX.is_match("http://img.local/a.png"));
        assert!(IMAGE_URL_REGEX.is_match("https://example.com/your-banner.jpg?w=800"));
    }

    #[test]
    fn test_image_url_regex_invalid() {
        assert!(!IMAGE_URL_REGEX.is_match("ftp://files.example.com/x.jpg"));
        assert!(!IMAGE_URL_REGEX.is_match("not-a-url"));
        assert!(!IMAGE_URL_REGEX.is_match(""));
        assert!(!IMAGE_URL_REGEX.is_match("https://has space.com/x.jpg"));
    }
}
