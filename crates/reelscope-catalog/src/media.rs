//! Image and IMDB link building.

use crate::config::MediaConfig;

/// Joins an image path such as `/kXfq.jpg` onto the configured image prefix.
///
/// Returns `None` when TMDB has no image for the movie.
#[must_use]
pub fn image_url(media: &MediaConfig, path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    Some(format!(
        "{}/{}",
        media.poster_path.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

/// IMDB title page for an `tt...` identifier.
#[must_use]
pub fn imdb_url(media: &MediaConfig, imdb_id: Option<&str>) -> Option<String> {
    let id = imdb_id.map(str::trim).filter(|id| !id.is_empty())?;
    Some(format!(
        "{}/{id}",
        media.imdb_title_path.trim_end_matches('/')
    ))
}

/// Detail page link for a movie.
#[must_use]
pub fn detail_href(movie_id: u64) -> String {
    format!("/{movie_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_joins_single_slash() {
        // Arrange
        let media = MediaConfig {
            poster_path: String::from("https://image.tmdb.org/t/p/w500/"),
            ..MediaConfig::default()
        };

        // Act
        let url = image_url(&media, Some("/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg"));

        // Assert
        assert_eq!(
            url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg")
        );
    }

    #[test]
    fn test_image_url_missing_path() {
        // Arrange
        let media = MediaConfig::default();

        // Act & Assert
        assert!(image_url(&media, None).is_none());
        assert!(image_url(&media, Some("  ")).is_none());
    }

    #[test]
    fn test_imdb_url() {
        // Arrange
        let media = MediaConfig::default();

        // Act
        let url = imdb_url(&media, Some("tt0137523"));

        // Assert
        assert_eq!(url.as_deref(), Some("https://www.imdb.com/title/tt0137523"));
        assert!(imdb_url(&media, Some("")).is_none());
    }

    #[test]
    fn test_detail_href() {
        // Arrange & Act & Assert
        assert_eq!(detail_href(550), "/550");
    }
}
