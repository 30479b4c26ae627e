// i18n.rs
//
// Runtime i18n:
// - Built-in strings come from assets/i18n.json (embedded, format: { "<lang>": { "key": "value" } })
// - assets/i18n/<lang>.json, if found, overrides individual keys
// - Lookup chain: selected lang -> en -> the key itself; empty strings count as missing
// - tr("key") / tr_with("key", [("name", "...")]) with {name} placeholders
//
// Language selection at startup:
// - CLI: --lang <code> (en, zh)
// - Env: MEGA_COMPARISON_LANG
// - Saved preference
// - Default: en

use crate::catalog::{Resolution, SensorFormat};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path, sync::RwLock};

const BUILTIN: &str = include_str!("../assets/i18n.json");

pub const LANG_ENV: &str = "MEGA_COMPARISON_LANG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Accepts `en`, `zh` and regional variants such as `zh-Hans` or `en_US`.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        let base = code.split(['-', '_']).next().unwrap_or_default();
        match base {
            "en" => Some(Language::En),
            "zh" => Some(Language::Zh),
            _ => None,
        }
    }

    /// The language the toggle button switches to.
    pub fn other(self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }
}

#[derive(Debug, Clone)]
pub struct I18n {
    pub lang: Language,
    map: HashMap<String, String>,
    fallback_map: HashMap<String, String>,
}

static I18N: OnceCell<RwLock<I18n>> = OnceCell::new();

fn load_builtin(lang: Language) -> HashMap<String, String> {
    let all: HashMap<String, HashMap<String, String>> =
        serde_json::from_str(BUILTIN).unwrap_or_default();
    all.get(lang.code()).cloned().unwrap_or_default()
}

fn load_json_map(path: &Path) -> Option<HashMap<String, String>> {
    let text = std::fs::read_to_string(path).ok()?;
    let map: HashMap<String, String> = serde_json::from_str(&text).ok()?;
    Some(map)
}

fn load_lang(lang: Language) -> HashMap<String, String> {
    let mut map = load_builtin(lang);

    let file = format!("{}.json", lang.code());
    if let Some(p) = crate::assets::find_asset(&Path::new("i18n").join(file)) {
        if let Some(overrides) = load_json_map(&p) {
            map.extend(overrides);
        }
    }

    map
}

impl I18n {
    pub fn load(lang: Language) -> Self {
        let map = load_lang(lang);
        let fallback_map = if lang == Language::En {
            map.clone()
        } else {
            load_lang(Language::En)
        };
        Self { lang, map, fallback_map }
    }

    pub fn tr(&self, key: &str) -> String {
        [&self.map, &self.fallback_map]
            .into_iter()
            .filter_map(|m| m.get(key))
            .find(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn tr_with(&self, key: &str, args: &[(&str, String)]) -> String {
        let mut s = self.tr(key);
        for (k, v) in args {
            let placeholder = format!("{{{}}}", k);
            s = s.replace(&placeholder, v);
        }
        s
    }

    pub fn megapixel_label(&self, r: Resolution) -> String {
        let mp = r.megapixels();
        match self.lang {
            Language::Zh if mp == 100 => "1亿像素".to_string(),
            Language::Zh => format!("{}千万像素", mp / 10),
            Language::En => format!("{} {}", mp, self.tr("controls.megapixels")),
        }
    }

    pub fn sensor_name(&self, s: SensorFormat) -> String {
        match self.lang {
            Language::Zh => self.tr(&format!("sensor.{}", s.key())),
            Language::En => s.english_name().to_string(),
        }
    }
}

/// Initialize global i18n. Safe to call multiple times; later calls replace the tables.
pub fn init(lang: Language) {
    let i = I18n::load(lang);

    if let Some(lock) = I18N.get() {
        if let Ok(mut w) = lock.write() {
            *w = i;
        }
    } else {
        let _ = I18N.set(RwLock::new(i));
    }
}

fn get_locked() -> Option<std::sync::RwLockReadGuard<'static, I18n>> {
    I18N.get().and_then(|l| l.read().ok())
}

pub fn current() -> Language {
    get_locked().map(|i| i.lang).unwrap_or_default()
}

/// Get localized text by key. If key missing, returns key itself.
pub fn tr(key: &str) -> String {
    match get_locked() {
        Some(i) => i.tr(key),
        None => key.to_string(),
    }
}

/// Get localized text and substitute `{name}` placeholders.
/// Any placeholder not provided is kept as-is.
pub fn tr_with(key: &str, args: &[(&str, String)]) -> String {
    match get_locked() {
        Some(i) => i.tr_with(key, args),
        None => key.to_string(),
    }
}

pub fn megapixel_label(r: Resolution) -> String {
    match get_locked() {
        Some(i) => i.megapixel_label(r),
        None => format!("{} MP", r.megapixels()),
    }
}

pub fn sensor_name(s: SensorFormat) -> String {
    match get_locked() {
        Some(i) => i.sensor_name(s),
        None => s.english_name().to_string(),
    }
}

/// Label of the toggle button: the name of the language it switches to.
pub fn toggle_label() -> String {
    tr(&format!("language.{}", current().other().code()))
}

/// Pick the startup language: CLI, then env, then the saved preference.
pub fn resolve_lang(args: &[String], saved: Option<Language>) -> Language {
    let mut it = args.iter();
    while let Some(a) = it.next() {
        if a == "--lang" {
            if let Some(lang) = it.next().and_then(|v| Language::from_code(v)) {
                return lang;
            }
        }
    }

    if let Ok(v) = std::env::var(LANG_ENV) {
        if let Some(lang) = Language::from_code(&v) {
            return lang;
        }
    }

    saved.unwrap_or_default()
}

/// Group digits in threes, e.g. 10077696 -> "10,077,696".
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builtin_tables_parse() {
        assert_eq!(I18n::load(Language::En).tr("app.title"), "MegaComparison");
        assert_eq!(I18n::load(Language::Zh).tr("tabs.focal"), "焦距");
    }

    #[test]
    fn test_fallback_chain() {
        let zh = I18n::load(Language::Zh);
        assert_eq!(zh.tr("menu.file"), "文件");
        // Missing in zh, present in en.
        assert_eq!(zh.tr("log.image_loaded_size"), "Image loaded: {w}x{h}");
        // Empty in zh counts as missing.
        assert_eq!(zh.tr("controls.megapixels"), "Megapixels");
        assert_eq!(zh.tr("no.such.key"), "no.such.key");
    }

    #[test]
    fn test_tr_with_placeholders() {
        let en = I18n::load(Language::En);
        let s = en.tr_with("size.pixels", &[("w", "3888".into()), ("h", "2592".into())]);
        assert_eq!(s, "3888 × 2592 pixels");
        let partial = en.tr_with("size.pixels", &[("w", "1".into())]);
        assert_eq!(partial, "1 × {h} pixels");
    }

    #[test]
    fn test_megapixel_labels() {
        let en = I18n::load(Language::En);
        let zh = I18n::load(Language::Zh);
        assert_eq!(en.megapixel_label(Resolution::Mp40), "40 Megapixels");
        assert_eq!(zh.megapixel_label(Resolution::Mp100), "1亿像素");
        assert_eq!(zh.megapixel_label(Resolution::Mp20), "2千万像素");
        assert_eq!(zh.megapixel_label(Resolution::Mp60), "6千万像素");
    }

    #[test]
    fn test_sensor_names() {
        let en = I18n::load(Language::En);
        let zh = I18n::load(Language::Zh);
        assert_eq!(en.sensor_name(SensorFormat::FullFrame), "Full Frame (35mm)");
        assert_eq!(zh.sensor_name(SensorFormat::MicroFourThirds), "M4/3画幅");
        for s in SensorFormat::ALL {
            assert_ne!(zh.sensor_name(s), format!("sensor.{}", s.key()));
        }
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("zh-Hans"), Some(Language::Zh));
        assert_eq!(Language::from_code(" EN_us "), Some(Language::En));
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::En.other(), Language::Zh);
        assert_eq!(Language::Zh.other().code(), "en");
    }

    #[test]
    fn test_resolve_lang_prefers_cli() {
        assert_eq!(
            resolve_lang(&args(&["mega_comparison", "--lang", "zh"]), Some(Language::En)),
            Language::Zh
        );
    }

    #[test]
    fn test_resolve_lang_uses_saved_when_no_cli() {
        if std::env::var(LANG_ENV).is_ok() {
            return;
        }
        assert_eq!(resolve_lang(&args(&["mega_comparison"]), Some(Language::Zh)), Language::Zh);
        assert_eq!(resolve_lang(&args(&["mega_comparison", "--lang"]), None), Language::En);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(10_077_696), "10,077,696");
        assert_eq!(group_thousands(Resolution::Mp100.total_pixels()), "101,756,928");
    }
}
