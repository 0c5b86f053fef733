use crate::theme::Theme;
use crate::utils::*;
use gambit_core::Orientation;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub orientation: Orientation,
    pub show_coordinates: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            orientation: Orientation::White,
            show_coordinates: true,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "gambit:settings";
}

#[derive(Properties, PartialEq)]
pub(crate) struct SettingsProps {
    #[prop_or_default]
    pub open: bool,
    pub settings: Settings,
    pub theme: Theme,
    pub on_change: Callback<Settings>,
    pub on_theme: Callback<Theme>,
    pub on_close: Callback<()>,
}

#[function_component]
pub(crate) fn SettingsView(props: &SettingsProps) -> Html {
    let SettingsProps {
        open,
        settings,
        theme,
        on_change,
        on_theme,
        on_close,
    } = props;

    let flip = {
        let on_change = on_change.clone();
        let settings = settings.clone();
        Callback::from(move |_: MouseEvent| {
            on_change.emit(Settings {
                orientation: settings.orientation.flipped(),
                ..settings.clone()
            })
        })
    };

    let toggle_coordinates = {
        let on_change = on_change.clone();
        let settings = settings.clone();
        Callback::from(move |_: MouseEvent| {
            on_change.emit(Settings {
                show_coordinates: !settings.show_coordinates,
                ..settings.clone()
            })
        })
    };

    let close = on_close.reform(|_: MouseEvent| ());

    html! {
        <dialog id="settings" open={*open}>
            <article>
                <h2>{"Settings"}</h2>
                <label>
                    <input type="checkbox" checked={settings.show_coordinates} onclick={toggle_coordinates}/>
                    {"Show coordinates"}
                </label>
                <button onclick={flip}>
                    {match settings.orientation {
                        Orientation::White => "Play from black's side",
                        Orientation::Black => "Play from white's side",
                    }}
                </button>
                <ul>
                    {
                        for Theme::ALL.into_iter().map(|choice| {
                            let onclick = on_theme.reform(move |e: MouseEvent| {
                                e.prevent_default();
                                choice
                            });
                            html! {
                                <li>
                                    <a href="#" class={(choice == *theme).then_some("active")} {onclick}>
                                        {choice.label()}
                                    </a>
                                </li>
                            }
                        })
                    }
                </ul>
                <footer>
                    <button onclick={close}>{"Close"}</button>
                </footer>
            </article>
        </dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"orientation":"Black"}"#).unwrap();
        assert_eq!(settings.orientation, Orientation::Black);
        assert!(settings.show_coordinates);
    }
}
