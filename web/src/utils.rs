use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key a value lives under in the browser's local storage.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

/// Loads the stored value, falling back to the default on a miss or an
/// unreadable entry.
pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + DeserializeOwned + Default> LocalOrDefault for T {
    fn local_or_default() -> Self {
        match LocalStorage::get(Self::KEY) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("no usable {} in storage: {err}", Self::KEY);
                Self::default()
            }
        }
    }
}

/// Writes the value back under its key, logging failures.
pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(Self::KEY, self) {
            log::error!("failed to save {}: {err:?}", Self::KEY);
        }
    }
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Formats a counter value the way the three digit displays expect.
pub(crate) fn format_for_counter(value: i32) -> String {
    let clamped = value.clamp(-99, 999);
    if clamped < 0 {
        format!("-{:02}", clamped.abs())
    } else {
        format!("{clamped:03}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_pads_to_three_digits() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(7), "007");
        assert_eq!(format_for_counter(42), "042");
        assert_eq!(format_for_counter(999), "999");
    }

    #[test]
    fn counter_clamps_out_of_range_values() {
        assert_eq!(format_for_counter(1000), "999");
        assert_eq!(format_for_counter(-3), "-03");
        assert_eq!(format_for_counter(-100), "-99");
    }
}
