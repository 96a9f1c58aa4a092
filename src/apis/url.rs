use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A URI that is either absolute or relative.
///
/// Relative URIs are kept verbatim so they can later be resolved
/// against the address of a referenced object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Url {
    Absolute(url::Url),
    /// A scheme with an empty authority, e.g. `http://`. Kept verbatim.
    Hostless(String),
    Relative(String),
}

impl Url {
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        match url::Url::parse(input) {
            Ok(url) => Ok(Url::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                // a relative reference must at least resolve against some base
                url::Url::parse("http://localhost/")?.join(input)?;
                Ok(Url::Relative(input.to_owned()))
            }
            Err(url::ParseError::EmptyHost) => Ok(Url::Hostless(input.to_owned())),
            Err(err) => Err(err),
        }
    }

    /// Whether the URI has a scheme.
    pub fn is_abs(&self) -> bool {
        !matches!(self, Url::Relative(_))
    }

    /// The host, or `None` for relative URIs and host-less schemes.
    pub fn host(&self) -> Option<&str> {
        match self {
            Url::Absolute(url) => url.host_str().filter(|host| !host.is_empty()),
            Url::Hostless(_) | Url::Relative(_) => None,
        }
    }

    /// Resolves `reference` against this URI.
    ///
    /// Only a relative `reference` against a parsed absolute base is joined.
    /// Every other reference is returned unchanged.
    pub fn resolve_reference(&self, reference: &Url) -> Result<Url, url::ParseError> {
        match (self, reference) {
            (Url::Absolute(base), Url::Relative(rel)) => Ok(Url::Absolute(base.join(rel)?)),
            _ => Ok(reference.clone()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Url::Absolute(url) => url.as_str(),
            Url::Hostless(raw) | Url::Relative(raw) => raw,
        }
    }
}

impl From<url::Url> for Url {
    fn from(url: url::Url) -> Self {
        Url::Absolute(url)
    }
}

impl FromStr for Url {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Url::parse(s)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Url {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Url {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Url::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_and_relative() {
        let abs = Url::parse("https://tableflip.dev/?flip=mattmoor").unwrap();
        assert!(abs.is_abs());
        assert_eq!(abs.host(), Some("tableflip.dev"));

        let rel = Url::parse("/foo/bar").unwrap();
        assert!(!rel.is_abs());
        assert_eq!(rel.host(), None);
        assert_eq!(rel.to_string(), "/foo/bar");

        let hostless = Url::parse("mailto:someone@example.com").unwrap();
        assert!(hostless.is_abs());
        assert_eq!(hostless.host(), None);
    }

    #[test]
    fn empty_authority_is_kept() {
        let url = Url::parse("http://").unwrap();
        assert_eq!(url, Url::Hostless("http://".to_owned()));
        assert!(url.is_abs());
        assert_eq!(url.host(), None);
        assert_eq!(url.to_string(), "http://");

        let base = Url::parse("http://example.com/").unwrap();
        assert_eq!(base.resolve_reference(&url).unwrap(), url);
    }

    #[test]
    fn resolves_relative_against_base() {
        let base = Url::parse("http://broker.default.svc.cluster.local/").unwrap();
        let rel = Url::parse("/extra/path").unwrap();
        assert_eq!(
            base.resolve_reference(&rel).unwrap().to_string(),
            "http://broker.default.svc.cluster.local/extra/path"
        );

        let abs = Url::parse("https://example.com/x").unwrap();
        assert_eq!(base.resolve_reference(&abs).unwrap(), abs);
    }

    #[test]
    fn serializes_as_string() {
        let url: Url = serde_json::from_str("\"/relative\"").unwrap();
        assert_eq!(url, Url::Relative("/relative".to_owned()));
        assert_eq!(serde_json::to_string(&url).unwrap(), "\"/relative\"");
    }
}
