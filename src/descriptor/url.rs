use std::path::PathBuf;

/// Resolved reference to an external media resource.
///
/// Absolute URLs carry a scheme (`https://…`, `file://…`); anything else is a bare
/// filesystem-style path.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ResourceUrl(String);

impl ResourceUrl {
    /// Wrap an already-resolved URL string.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Resolve `src` against an optional base URL.
    ///
    /// Returns `None` for blank sources.
    pub fn resolve(src: &str, base: Option<&ResourceUrl>) -> Option<Self> {
        let src = src.trim();
        if src.is_empty() {
            return None;
        }
        if scheme_len(src).is_some() {
            return Some(Self(src.to_owned()));
        }
        let Some(base) = base else {
            return Some(Self(src.to_owned()));
        };

        let (origin, base_path) = base.split_origin();
        let joined = if src.starts_with('/') {
            src.to_owned()
        } else {
            match base_path.rfind('/') {
                Some(idx) => format!("{}{}", &base_path[..=idx], src),
                None => src.to_owned(),
            }
        };
        Some(Self(format!("{origin}{}", normalize_segments(&joined))))
    }

    /// The URL text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return `true` when the URL carries a scheme.
    pub fn is_absolute(&self) -> bool {
        scheme_len(&self.0).is_some()
    }

    /// Local filesystem path for `file://` URLs and bare paths.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if let Some(rest) = self.0.strip_prefix("file://") {
            // `file:///abs` and `file://localhost/abs`
            let path = rest.strip_prefix("localhost").unwrap_or(rest);
            return Some(PathBuf::from(path));
        }
        if self.is_absolute() {
            return None;
        }
        Some(PathBuf::from(&self.0))
    }

    /// Lower-cased file extension of the last path segment, if any.
    pub fn extension(&self) -> Option<String> {
        let path = self.0.split(['?', '#']).next().unwrap_or_default();
        let name = path.rsplit('/').next().unwrap_or_default();
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// Split into `scheme://authority` (possibly empty) and the path remainder.
    fn split_origin(&self) -> (&str, &str) {
        let Some(scheme_end) = scheme_len(&self.0) else {
            return ("", &self.0);
        };
        let after_scheme = &self.0[scheme_end..];
        let Some(authority) = after_scheme.strip_prefix("//") else {
            return (&self.0[..scheme_end], after_scheme);
        };
        let split = scheme_end + 2 + authority.find('/').unwrap_or(authority.len());
        (&self.0[..split], &self.0[split..])
    }
}

impl std::fmt::Display for ResourceUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Length of `scheme:` including the colon.
fn scheme_len(s: &str) -> Option<usize> {
    let idx = s.find(':')?;
    let scheme = &s[..idx];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    // Single letters are Windows drive prefixes, not schemes.
    if scheme.len() < 2 || !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some(idx + 1)
}

fn normalize_segments(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut out = Vec::<&str>::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            _ => out.push(part),
        }
    }
    let mut joined = out.join("/");
    if path.ends_with('/') && !joined.is_empty() {
        joined.push('/');
    }
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

#[cfg(test)]
#[path = "../../tests/unit/descriptor/url.rs"]
mod tests;
