/// Localization capability: resolves a translation key to display text.
///
/// Unknown keys should resolve to something printable (usually the key itself).
pub trait TranslatorPort: Send + Sync {
    fn translate(&self, key: &str) -> String;
}
