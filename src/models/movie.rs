use serde::{Deserialize, Serialize};

const RESIZED_IMAGE_SUFFIX: &str = "._V0_UX600_.jpg";

/// Top-250 response body as returned by the IMDb API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MostPopularMovies {
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
    #[serde(default)]
    pub items: Vec<Movie>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "fullTitle")]
    pub title: String,
    /// Kept as text; the API sends ratings like "9.2" and sometimes "".
    #[serde(rename = "imDbRating")]
    pub rating: String,
    #[serde(rename = "image")]
    pub image_url: String,
}

impl Movie {
    /// The numeric rating, or 0 when the API value doesn't parse.
    pub fn rating_value(&self) -> f32 {
        self.rating.trim().parse().unwrap_or(0.0)
    }

    /// URL of the 600px wide poster variant instead of the full size original.
    pub fn resized_image_url(&self) -> String {
        let base = self
            .image_url
            .split("._")
            .next()
            .unwrap_or(&self.image_url);
        format!("{}{}", base, RESIZED_IMAGE_SUFFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(rating: &str, image_url: &str) -> Movie {
        Movie {
            title: "The Godfather (1972)".to_string(),
            rating: rating.to_string(),
            image_url: image_url.to_string(),
        }
    }

    #[test]
    fn test_resized_image_url() {
        let m = movie(
            "9.2",
            "https://m.media-amazon.com/images/M/MV5BM2MyNjYxNmUt._V1_Ratio0.7273_AL_.jpg",
        );
        assert_eq!(
            m.resized_image_url(),
            "https://m.media-amazon.com/images/M/MV5BM2MyNjYxNmUt._V0_UX600_.jpg"
        );
    }

    #[test]
    fn test_resized_image_url_without_marker() {
        let m = movie("9.2", "https://example.com/poster");
        assert_eq!(m.resized_image_url(), "https://example.com/poster._V0_UX600_.jpg");
    }

    #[test]
    fn test_rating_value() {
        assert_eq!(movie("9.2", "").rating_value(), 9.2);
        assert_eq!(movie("", "").rating_value(), 0.0);
        assert_eq!(movie("n/a", "").rating_value(), 0.0);
    }

    #[test]
    fn test_deserialize_imdb_response() {
        let json = r#"{
            "items": [
                {
                    "id": "tt0111161",
                    "rank": "1",
                    "title": "The Shawshank Redemption",
                    "fullTitle": "The Shawshank Redemption (1994)",
                    "year": "1994",
                    "image": "https://m.media-amazon.com/images/M/abc._V1_UX128_.jpg",
                    "crew": "Frank Darabont (dir.), Tim Robbins, Morgan Freeman",
                    "imDbRating": "9.2",
                    "imDbRatingCount": "2600000"
                }
            ],
            "errorMessage": ""
        }"#;

        let movies: MostPopularMovies = serde_json::from_str(json).unwrap();
        assert!(movies.error_message.is_empty());
        assert_eq!(movies.items.len(), 1);
        assert_eq!(movies.items[0].title, "The Shawshank Redemption (1994)");
        assert_eq!(movies.items[0].rating, "9.2");
    }
}
