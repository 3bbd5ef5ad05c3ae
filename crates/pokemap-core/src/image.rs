//! Image URL resolution.
//!
//! Every image surfaced to a page (species cards, map markers, evolution
//! links) goes through [`ImageResolver::resolve`], so a species without a
//! stored image always shows the same placeholder.

use serde::{Deserialize, Serialize};

/// Placeholder shown for any species without a stored image.
pub const DEFAULT_IMAGE_URL: &str = "https://vignette.wikia.nocookie.net/pokemon/images/6/6e/%21.png/revision/latest/fixed-aspect-ratio-down/width/240/height/240?cb=20130525215832&fill=transparent";

/// Turns stored image paths into absolute URLs rooted at the serving origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResolver {
  /// Serving origin, e.g. `http://127.0.0.1:8000`.
  pub base_url:    String,
  /// URL prefix under which the media directory is served, e.g. `/media/`.
  pub media_url:   String,
  /// Substituted when no image is stored.
  pub placeholder: String,
}

impl ImageResolver {
  /// A resolver using [`DEFAULT_IMAGE_URL`] as placeholder.
  pub fn new(base_url: impl Into<String>, media_url: impl Into<String>) -> Self {
    Self {
      base_url:    base_url.into(),
      media_url:   media_url.into(),
      placeholder: DEFAULT_IMAGE_URL.to_owned(),
    }
  }

  /// Resolve an optional stored image path. Empty paths count as absent.
  pub fn resolve(&self, image: Option<&str>) -> String {
    match image.map(str::trim).filter(|p| !p.is_empty()) {
      Some(path) => {
        let mut url = self.base_url.trim_end_matches('/').to_owned();
        for segment in [self.media_url.trim_matches('/'), path.trim_start_matches('/')] {
          if !segment.is_empty() {
            url.push('/');
            url.push_str(segment);
          }
        }
        url
      }
      None => self.placeholder.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn resolver() -> ImageResolver {
    ImageResolver::new("http://127.0.0.1:8000", "/media/")
  }

  #[test]
  fn missing_image_yields_placeholder() {
    assert_eq!(resolver().resolve(None), DEFAULT_IMAGE_URL);
    assert_eq!(resolver().resolve(Some("")), DEFAULT_IMAGE_URL);
    assert_eq!(resolver().resolve(Some("  ")), DEFAULT_IMAGE_URL);
  }

  #[test]
  fn stored_image_yields_absolute_url() {
    let url = resolver().resolve(Some("img/a.png"));
    assert_eq!(url, "http://127.0.0.1:8000/media/img/a.png");
  }

  #[test]
  fn slashes_are_normalised() {
    let r = ImageResolver::new("https://example.com/", "media");
    assert_eq!(
      r.resolve(Some("/pokemons_image/bulbasaur.png")),
      "https://example.com/media/pokemons_image/bulbasaur.png"
    );
  }

  #[test]
  fn root_media_prefix_adds_no_empty_segment() {
    let r = ImageResolver::new("http://localhost", "/");
    assert_eq!(r.resolve(Some("a.png")), "http://localhost/a.png");
  }

  #[test]
  fn custom_placeholder_is_honoured() {
    let r = ImageResolver {
      placeholder: "https://example.com/unknown.png".into(),
      ..resolver()
    };
    assert_eq!(r.resolve(None), "https://example.com/unknown.png");
  }
}
