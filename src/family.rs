//! figuring out which family the user asked for

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ResolutionError;

/// Host of the CSS API, e.g. `https://fonts.googleapis.com/css2?family=Roboto`
static CSS_API_HOST: &str = "googleapis.com";
/// Host of the specimen pages, e.g. `https://fonts.google.com/specimen/Roboto`
static SPECIMEN_HOST: &str = "fonts.google.com";

#[allow(clippy::expect_used)]
static FAMILY_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"family=([^:&]+)").expect("family regex is valid"));

#[allow(clippy::expect_used)]
static SPECIMEN_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/specimen/([^/?]+)").expect("specimen regex is valid"));

/// Return the font family named by `input`.
///
/// `input` is either a family name, which is returned as is, or a URL of the
/// CSS API or of a specimen page, from which the family is extracted and
/// decoded.
pub fn resolve_family(input: &str) -> Result<String, ResolutionError> {
    if input.is_empty() {
        return Err(ResolutionError {
            input: input.to_owned(),
        });
    }
    if !input.starts_with("http") {
        return Ok(input.to_owned());
    }

    let pattern = if input.contains(CSS_API_HOST) {
        &FAMILY_PARAM
    } else if input.contains(SPECIMEN_HOST) {
        &SPECIMEN_PATH
    } else {
        return Err(ResolutionError {
            input: input.to_owned(),
        });
    };

    pattern
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|raw| decode_component(raw.as_str()))
        .filter(|family| !family.is_empty())
        .ok_or_else(|| ResolutionError {
            input: input.to_owned(),
        })
}

// query strings use '+' for spaces, so we treat it like form encoding
fn decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        for name in ["Roboto", "Open Sans", "Noto Sans JP", "family=Foo:bar"] {
            assert_eq!(resolve_family(name).unwrap(), name);
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(resolve_family("").is_err());
    }

    #[test]
    fn css_api_url() {
        assert_eq!(
            resolve_family("https://fonts.googleapis.com/css2?family=Open+Sans:wght@400").unwrap(),
            "Open Sans"
        );
        assert_eq!(
            resolve_family("https://fonts.googleapis.com/css2?family=Roboto&display=swap")
                .unwrap(),
            "Roboto"
        );
        assert_eq!(
            resolve_family("https://fonts.googleapis.com/css?family=Noto%20Serif").unwrap(),
            "Noto Serif"
        );
    }

    #[test]
    fn css_api_url_without_family() {
        let err = resolve_family("https://fonts.googleapis.com/css2?display=swap").unwrap_err();
        assert_eq!(err.input, "https://fonts.googleapis.com/css2?display=swap");
    }

    #[test]
    fn specimen_url() {
        assert_eq!(
            resolve_family("https://fonts.google.com/specimen/Roboto").unwrap(),
            "Roboto"
        );
        assert_eq!(
            resolve_family("https://fonts.google.com/specimen/Open+Sans?query=open").unwrap(),
            "Open Sans"
        );
        assert_eq!(
            resolve_family("https://fonts.google.com/specimen/Roboto%20Mono/tester").unwrap(),
            "Roboto Mono"
        );
    }

    #[test]
    fn specimen_url_without_family() {
        assert!(resolve_family("https://fonts.google.com/?query=roboto").is_err());
    }

    #[test]
    fn unknown_host() {
        let err = resolve_family("https://example.com/fonts/Roboto").unwrap_err();
        assert!(err.to_string().contains("unable to extract font family"));
    }
}
