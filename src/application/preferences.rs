use crate::domain::Theme;
use crate::storage::{KeyValueStore, THEME_KEY};

use super::LedgerError;

/// Read the stored theme. Missing or unrecognized values mean `Theme::Light`.
pub async fn load_theme<S: KeyValueStore>(store: &S) -> Result<Theme, LedgerError> {
    let stored = store.get(THEME_KEY).await?;
    let theme = match stored.as_deref() {
        Some(value) => Theme::from_str(value).unwrap_or_else(|| {
            log::warn!("Ignoring unrecognized theme '{}'", value);
            Theme::default()
        }),
        None => Theme::default(),
    };
    Ok(theme)
}

/// Persist the theme preference.
pub async fn save_theme<S: KeyValueStore>(store: &S, theme: Theme) -> Result<(), LedgerError> {
    store.set(THEME_KEY, theme.as_str()).await?;
    log::debug!("Saved theme '{}'", theme);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_theme_defaults_to_light() -> Result<(), LedgerError> {
        let store = MemoryStore::new();
        assert_eq!(load_theme(&store).await?, Theme::Light);
        Ok(())
    }

    #[tokio::test]
    async fn test_unrecognized_theme_falls_back() -> Result<(), LedgerError> {
        let store = MemoryStore::with_entries([(THEME_KEY, "neon")]);
        assert_eq!(load_theme(&store).await?, Theme::Light);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load() -> Result<(), LedgerError> {
        let store = MemoryStore::new();
        save_theme(&store, Theme::Dark).await?;
        assert_eq!(store.get(THEME_KEY).await?, Some("dark".to_string()));
        assert_eq!(load_theme(&store).await?, Theme::Dark);
        Ok(())
    }
}
