//! Origin-based site selection.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::adapter::{Netflix, SiteAdapter, YouTube};
use crate::error::SiteError;
use crate::host::Dom;

/// A supported streaming site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    YouTube,
    Netflix,
}

impl Site {
    /// Every supported site, in match order.
    pub const ALL: [Site; 2] = [Site::YouTube, Site::Netflix];

    /// The registrable domain this site is served from.
    pub fn domain(self) -> &'static str {
        match self {
            Site::YouTube => "youtube.com",
            Site::Netflix => "netflix.com",
        }
    }

    /// Select the site for a page origin. Accepts a full URL, an origin
    /// (`https://www.youtube.com`) or a bare host name.
    pub fn from_origin(origin: &str) -> Option<Site> {
        origin.parse().ok()
    }

    /// The adapter implementing this site's lookups.
    pub fn adapter<D: Dom>(self) -> Box<dyn SiteAdapter<D>> {
        match self {
            Site::YouTube => Box::new(YouTube),
            Site::Netflix => Box::new(Netflix),
        }
    }

    fn serves(self, host: &str) -> bool {
        let domain = self.domain();
        host == domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

impl FromStr for Site {
    type Err = SiteError;

    fn from_str(origin: &str) -> Result<Self, Self::Err> {
        let unsupported = || SiteError::Unsupported(origin.to_string());
        let host = host_of(origin).ok_or_else(unsupported)?;

        Site::ALL
            .into_iter()
            .find(|site| site.serves(&host))
            .ok_or_else(unsupported)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.domain())
    }
}

fn host_of(origin: &str) -> Option<String> {
    if let Ok(url) = Url::parse(origin) {
        if let Some(host) = url.host_str() {
            return Some(host.trim_end_matches('.').to_ascii_lowercase());
        }
    }

    // Bare hosts like "www.youtube.com" or "youtube.com:443" are not URLs
    let bare = origin.trim().split(['/', ':']).next()?;
    if bare.is_empty() {
        return None;
    }
    Some(bare.trim_end_matches('.').to_ascii_lowercase())
}
