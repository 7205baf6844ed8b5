//! Reference-marker decoding.
//!
//! A heading is a marker iff its inline content is exactly one hyperlink
//! with a plain-text label whose target uses the reserved scheme. Headings
//! carrying any other link shape or scheme are ordinary content.

use diurnum_config::ReferenceSettings;
use diurnum_markdown::{heading_link, Heading};
use url::Url;
use uuid::Uuid;

use crate::error::{BuildError, DecodeError, PolicyError};
use crate::model::RefType;

/// A decoded reference marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRef {
    pub id: String,
    pub alias: String,
    pub kind: String,
    pub ref_type: RefType,
}

/// Decode `heading` against the marker grammar. `Ok(None)` means the
/// heading is ordinary content; a target in the reserved scheme that fails
/// to decode is an error, never silently ordinary.
pub fn decode_marker(
    heading: &Heading,
    reference: &ReferenceSettings,
    prohibit_embeds: bool,
) -> Result<Option<MarkerRef>, BuildError> {
    let link = match heading_link(heading) {
        Some(link) => link,
        None => return Ok(None),
    };

    let prefix_len = reference.scheme.len();
    let reserved = link
        .target
        .get(..prefix_len)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(&reference.scheme))
        && link.target.get(prefix_len..prefix_len + 3) == Some("://");
    if !reserved {
        return Ok(None);
    }

    let url = Url::parse(&link.target).map_err(|source| DecodeError::MalformedTarget {
        target: link.target.clone(),
        source,
    })?;

    let host = match url.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => {
            return Err(DecodeError::MissingId {
                target: link.target.clone(),
            }
            .into())
        }
    };

    let id = if host == reference.new_id_host {
        Uuid::new_v4().to_string()
    } else {
        host.to_string()
    };

    let mut kind = reference.default_kind.clone();
    let mut ref_type = if prohibit_embeds {
        RefType::Link
    } else {
        RefType::Embed
    };

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "type" => kind = value.into_owned(),
            "ref" => {
                ref_type = value.parse().map_err(|_| DecodeError::InvalidRefKind {
                    value: value.into_owned(),
                })?;
            }
            _ => {}
        }
    }

    if ref_type == RefType::Embed && prohibit_embeds {
        return Err(PolicyError::EmbedsProhibited {
            alias: link.text.clone(),
        }
        .into());
    }

    Ok(Some(MarkerRef {
        id,
        alias: link.text,
        kind,
        ref_type,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diurnum_config::Config;

    fn heading(text: &str) -> Heading {
        Heading {
            depth: 1,
            text: text.to_string(),
            line: 1,
        }
    }

    fn reference() -> ReferenceSettings {
        Config::default().reference
    }

    #[test]
    fn decodes_id_kind_and_ref() {
        let marker = decode_marker(
            &heading("[Notes](diurnum://abc?type=note&ref=link)"),
            &reference(),
            false,
        )
        .unwrap()
        .unwrap();
        assert_eq!(marker.id, "abc");
        assert_eq!(marker.alias, "Notes");
        assert_eq!(marker.kind, "note");
        assert_eq!(marker.ref_type, RefType::Link);
    }

    #[test]
    fn defaults_to_plain_embed() {
        let marker = decode_marker(&heading("[Intro](diurnum://abc)"), &reference(), false)
            .unwrap()
            .unwrap();
        assert_eq!(marker.kind, "plain");
        assert_eq!(marker.ref_type, RefType::Embed);
    }

    #[test]
    fn new_host_generates_a_unique_id() {
        let first = decode_marker(&heading("[A](diurnum://new)"), &reference(), false)
            .unwrap()
            .unwrap();
        let second = decode_marker(&heading("[B](diurnum://new)"), &reference(), false)
            .unwrap()
            .unwrap();
        assert_ne!(first.id, second.id);
        assert_ne!(first.id, "new");
    }

    #[test]
    fn foreign_scheme_is_ordinary_content() {
        let result = decode_marker(
            &heading("[docs](https://example.com)"),
            &reference(),
            false,
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn plain_heading_is_ordinary_content() {
        let result = decode_marker(&heading("Release notes"), &reference(), false).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn unknown_ref_kind_is_a_decode_error() {
        let err = decode_marker(
            &heading("[A](diurnum://abc?ref=inline)"),
            &reference(),
            false,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Decode(DecodeError::InvalidRefKind { .. })
        ));
    }

    #[test]
    fn missing_host_is_a_decode_error() {
        let err = decode_marker(&heading("[A](diurnum:///body)"), &reference(), false).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Decode(DecodeError::MissingId { .. })
        ));
    }

    #[test]
    fn prohibited_embed_is_a_policy_error() {
        let err = decode_marker(
            &heading("[A](diurnum://abc?ref=embed)"),
            &reference(),
            true,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BuildError::Policy(PolicyError::EmbedsProhibited { .. })
        ));
    }

    #[test]
    fn prohibition_flips_the_default_to_link() {
        let marker = decode_marker(&heading("[A](diurnum://abc)"), &reference(), true)
            .unwrap()
            .unwrap();
        assert_eq!(marker.ref_type, RefType::Link);
    }
}
