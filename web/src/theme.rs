use crate::utils::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Theme {
    /// Follow the browser's color scheme
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";
    pub const ALL: [Self; 3] = [Self::Auto, Self::Light, Self::Dark];

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
            Auto => "Auto",
            Light => "Light",
            Dark => "Dark",
        }
    }

    fn update_html(self) {
        let Some(html) = gloo::utils::document().document_element() else {
            log::error!("document has no root element");
            return;
        };
        let result = match self.scheme() {
            Some(scheme) => {
                log::debug!("theme-scheme: {}", scheme);
                html.set_attribute(Self::ATTR_NAME, scheme)
            }
            None => {
                log::debug!("no theme preference");
                html.remove_attribute(Self::ATTR_NAME)
            }
        };
        if let Err(err) = result {
            log::error!("failed to set theme: {:?}", err);
        }
    }

    pub(crate) fn init() {
        Self::local_or_default().update_html();
    }

    pub(crate) fn apply(self) {
        self.local_save();
        self.update_html();
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "gambit:theme";
}
