use crate::utils::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    /// Follow the browser's color scheme preference
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> Option<&'static str> {
        use Theme::*;
        match self {
            Auto => None,
            Light => Some("light"),
            Dark => Some("dark"),
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        use Theme::*;
        match self {
            Auto => "auto",
            Light => "light",
            Dark => "dark",
        }
    }

    pub(crate) const fn cycle(self) -> Self {
        use Theme::*;
        match self {
            Auto => Light,
            Light => Dark,
            Dark => Auto,
        }
    }

    /// Reflects the choice onto the `html` element; `Auto` leaves it to CSS.
    pub(crate) fn apply(self) {
        use gloo::utils::document;

        let html = document()
            .query_selector("html")
            .expect("query must be correct")
            .expect("must have html element");
        match self.scheme() {
            Some(scheme) => {
                log::debug!("theme-scheme: {scheme}");
                if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
                    log::error!("failed to set theme: {err:?}");
                }
            }
            None => {
                log::debug!("no theme preference");
                if let Err(err) = html.remove_attribute(Self::ATTR_NAME) {
                    log::error!("failed to set theme: {err:?}");
                }
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Auto
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "pexeso:theme";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycling_visits_every_theme_and_wraps() {
        assert_eq!(Theme::Auto.cycle(), Theme::Light);
        assert_eq!(Theme::Light.cycle(), Theme::Dark);
        assert_eq!(Theme::Dark.cycle(), Theme::Auto);
    }

    #[test]
    fn only_auto_leaves_the_scheme_unset() {
        assert_eq!(Theme::Auto.scheme(), None);
        assert_eq!(Theme::Light.scheme(), Some("light"));
        assert_eq!(Theme::Dark.scheme(), Some("dark"));
    }

    #[test]
    fn theme_storage_key_is_namespaced() {
        assert_eq!(<Theme as StorageKey>::KEY, "pexeso:theme");
    }
}
