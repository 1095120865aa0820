// ABOUTME: Container image reference composed from registry, repository, and tag.
// ABOUTME: Validates the caller-supplied tag before it reaches the control plane.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseImageRefError {
    #[error("image tag cannot be empty")]
    EmptyTag,

    #[error("invalid character in image tag: {0:?}")]
    InvalidChar(char),

    #[error("repository cannot be empty")]
    EmptyRepository,
}

/// Fully qualified image: `registry/repository:tag`.
///
/// The tag is opaque (usually a commit SHA). It only has to be non-empty and
/// free of whitespace and control characters; whether it exists in the
/// registry is discovered by the rollout itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    registry: String,
    repository: String,
    tag: String,
}

impl ImageRef {
    pub fn new(registry: &str, repository: &str, tag: &str) -> Result<Self, ParseImageRefError> {
        let repository = repository.trim().trim_matches('/');
        if repository.is_empty() {
            return Err(ParseImageRefError::EmptyRepository);
        }

        let tag = tag.trim();
        validate_tag(tag)?;

        Ok(Self {
            registry: registry.trim().trim_end_matches('/').to_string(),
            repository: repository.to_string(),
            tag: tag.to_string(),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

fn validate_tag(tag: &str) -> Result<(), ParseImageRefError> {
    if tag.is_empty() {
        return Err(ParseImageRefError::EmptyTag);
    }

    match tag.chars().find(|c| c.is_whitespace() || c.is_control()) {
        Some(c) => Err(ParseImageRefError::InvalidChar(c)),
        None => Ok(()),
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.registry.is_empty() {
            write!(f, "{}/", self.registry)?;
        }
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = "123456789012.dkr.ecr.us-east-1.amazonaws.com";

    #[test]
    fn composes_full_reference() {
        let image = ImageRef::new(REGISTRY, "video-processor", "abc123").unwrap();
        assert_eq!(
            image.to_string(),
            "123456789012.dkr.ecr.us-east-1.amazonaws.com/video-processor:abc123"
        );
        assert_eq!(image.tag(), "abc123");
    }

    #[test]
    fn registry_is_optional() {
        let image = ImageRef::new("", "nginx", "1.27").unwrap();
        assert_eq!(image.to_string(), "nginx:1.27");
    }

    #[test]
    fn trailing_slash_on_registry_is_dropped() {
        let image = ImageRef::new("ghcr.io/org/", "app", "v1").unwrap();
        assert_eq!(image.to_string(), "ghcr.io/org/app:v1");
    }

    #[test]
    fn empty_tag_rejected() {
        assert_eq!(
            ImageRef::new(REGISTRY, "video-processor", "  "),
            Err(ParseImageRefError::EmptyTag)
        );
    }

    #[test]
    fn tag_with_whitespace_rejected() {
        assert_eq!(
            ImageRef::new(REGISTRY, "video-processor", "abc 123"),
            Err(ParseImageRefError::InvalidChar(' '))
        );
    }

    #[test]
    fn tag_with_control_character_rejected() {
        assert_eq!(
            ImageRef::new(REGISTRY, "video-processor", "abc\u{7}123"),
            Err(ParseImageRefError::InvalidChar('\u{7}'))
        );
    }

    #[test]
    fn tag_is_otherwise_opaque() {
        let tag = format!("-release+build.{}", "x".repeat(200));
        let image = ImageRef::new(REGISTRY, "video-processor", &tag).unwrap();
        assert_eq!(image.tag(), tag);
    }

    #[test]
    fn empty_repository_rejected() {
        assert_eq!(
            ImageRef::new(REGISTRY, "", "abc"),
            Err(ParseImageRefError::EmptyRepository)
        );
    }
}
