use gloo::storage::{LocalStorage, Storage};
use serde::{Serialize, de::DeserializeOwned};
use yew::prelude::*;

/// Values persisted in `localStorage` under a fixed key.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + Default + DeserializeOwned> LocalOrDefault for T {
    fn local_or_default() -> Self {
        match LocalStorage::get(T::KEY) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("{}: using default ({})", T::KEY, err);
                T::default()
            }
        }
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("failed to save {}: {}", T::KEY, err);
        }
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attatch the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use serde::Deserialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Probe {
        value: u32,
    }

    impl StorageKey for Probe {
        const KEY: &'static str = "gambit:test:probe";
    }

    #[wasm_bindgen_test]
    fn saved_values_load_back() {
        LocalStorage::delete(Probe::KEY);
        assert_eq!(Probe::local_or_default(), Probe::default());

        Probe { value: 7 }.local_save();
        assert_eq!(Probe::local_or_default(), Probe { value: 7 });

        LocalStorage::set(Probe::KEY, "not a probe").unwrap();
        assert_eq!(Probe::local_or_default(), Probe::default());
        LocalStorage::delete(Probe::KEY);
    }
}
