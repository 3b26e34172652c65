//! Share links.
//!
//! A share link has the form `<origin>/import?id=<list id>&data=<token>`.
//! The `id` parameter is informational; the list id inside the token is what
//! an import merges into.

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::Result;
use crate::model::List;

/// Route that receives share links.
pub const IMPORT_PATH: &str = "/import";

/// Which token encoding share links are produced with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareEncoding {
    /// Plain base64 tokens
    #[default]
    Plain,
    /// Gzip-compressed base64 tokens, shorter for long lists
    Compressed,
}

/// Query parameters pulled out of a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLinkParts {
    /// The `id` parameter, if present
    pub id: Option<String>,
    /// The `data` parameter (the token), if present and non-empty
    pub data: Option<String>,
}

/// Encode a list as a share token.
pub fn share_token(list: &List, encoding: ShareEncoding) -> Result<String> {
    let json = list.to_json()?;
    let token = match encoding {
        ShareEncoding::Plain => codec::encode(&json),
        ShareEncoding::Compressed => codec::encode_compressed(&json)?,
    };
    Ok(token)
}

/// Build a share link for a list.
pub fn share_link(origin: &str, list: &List, encoding: ShareEncoding) -> Result<String> {
    let token = share_token(list, encoding)?;

    Ok(format!(
        "{}{}?id={}&data={}",
        origin.trim_end_matches('/'),
        IMPORT_PATH,
        urlencoding::encode(&list.id),
        urlencoding::encode(&token)
    ))
}

/// Pull the `id` and `data` parameters out of pasted text.
///
/// Accepts a full link, a bare query string (`?id=..&data=..` or
/// `id=..&data=..`), or a raw token. The `data` value is returned still
/// percent-encoded; the codec undoes that itself.
pub fn parse_share_link(text: &str) -> ShareLinkParts {
    let text = text.trim();

    let query = match text.split_once('?') {
        Some((_, query)) => query,
        None if text.starts_with("id=") || text.contains("data=") => text,
        None => {
            return ShareLinkParts {
                id: None,
                data: (!text.is_empty()).then(|| text.to_string()),
            };
        }
    };
    let query = query.split('#').next().unwrap_or_default();

    let mut parts = ShareLinkParts {
        id: None,
        data: None,
    };
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "id" if parts.id.is_none() => {
                let decoded = urlencoding::decode(value)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| value.to_string());
                parts.id = Some(decoded);
            }
            "data" if parts.data.is_none() && !value.is_empty() => {
                parts.data = Some(value.to_string());
            }
            _ => {}
        }
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LIST_ID, list_with_items};

    #[test]
    fn test_share_link_format() {
        let list = list_with_items(&["Milk"]);
        let link = share_link("https://grocerease.app/", &list, ShareEncoding::Plain).unwrap();

        let prefix = format!("https://grocerease.app/import?id={}&data=ey", LIST_ID);
        assert!(link.starts_with(&prefix), "{link}");
    }

    #[test]
    fn test_compressed_link_has_gzip_token() {
        let list = list_with_items(&["Milk", "Eggs"]);
        let link = share_link("http://localhost", &list, ShareEncoding::Compressed).unwrap();

        let parts = parse_share_link(&link);
        assert!(parts.data.unwrap().starts_with("H4sI"));
    }

    #[test]
    fn test_parse_round_trip() {
        let list = list_with_items(&["Bread"]);
        let link = share_link("http://localhost:5173", &list, ShareEncoding::Plain).unwrap();

        let parts = parse_share_link(&link);
        assert_eq!(parts.id.as_deref(), Some(LIST_ID));

        let value = codec::auto_detect_and_decode(&parts.data.unwrap()).unwrap();
        assert_eq!(List::from_value(&value).unwrap(), list);
    }

    #[test]
    fn test_parse_query_string_and_raw_token() {
        let parts = parse_share_link("?data=abc%3D&id=x");
        assert_eq!(parts.data.as_deref(), Some("abc%3D"));
        assert_eq!(parts.id.as_deref(), Some("x"));

        let parts = parse_share_link("  eyJhIjoxfQ==  ");
        assert_eq!(parts.data.as_deref(), Some("eyJhIjoxfQ=="));
        assert_eq!(parts.id, None);
    }

    #[test]
    fn test_parse_missing_data() {
        let parts = parse_share_link("https://grocerease.app/import?id=abc&data=");
        assert_eq!(parts.data, None);

        assert_eq!(parse_share_link("").data, None);
    }

    #[test]
    fn test_encoding_serde() {
        assert_eq!(
            serde_json::to_string(&ShareEncoding::Compressed).unwrap(),
            "\"compressed\""
        );
        assert_eq!(ShareEncoding::default(), ShareEncoding::Plain);
    }
}
