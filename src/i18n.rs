use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SCENARIO: &str = "main_menu.scenario";
    pub const MAIN_MENU_METRICS: &str = "main_menu.metrics";
    pub const MAIN_MENU_PRICES: &str = "main_menu.prices";
    pub const MAIN_MENU_EXPENSES: &str = "main_menu.expenses";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_KEEP_CURRENT: &str = "prompt.keep_current";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const SCENARIO_HEADING: &str = "scenario.heading";
    pub const SCENARIO_ENGINE: &str = "scenario.engine";
    pub const SCENARIO_NUM_ENGINES: &str = "scenario.num_engines";
    pub const SCENARIO_LOAD: &str = "scenario.load";
    pub const SCENARIO_GAS_PRICE: &str = "scenario.gas_price";

    pub const METRICS_HEADING: &str = "metrics.heading";
    pub const METRICS_SUMMARY: &str = "metrics.summary";
    pub const METRICS_CONSUMPTION: &str = "metrics.consumption";
    pub const METRICS_ANNUAL_REVENUE: &str = "metrics.annual_revenue";

    pub const PRICES_HEADING: &str = "prices.heading";
    pub const PRICES_SHAPE: &str = "prices.shape";
    pub const PRICES_MIN_MAX_AVG: &str = "prices.min_max_avg";
    pub const PRICES_HISTOGRAM: &str = "prices.histogram";

    pub const EXPENSES_HEADING: &str = "expenses.heading";
    pub const EXPENSES_TOTAL: &str = "expenses.total";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드에 따라 내장 문자열만 쓰는 번역기를 만든다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 언어팩을 쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    /// 언어팩에서 키를 조회한다. 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 언어팩 > 내장 문자열 > 키 순으로 문자열을 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        builtin.unwrap_or(key).to_string()
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫/중첩 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    lang.split_once(['-', '_'])
        .and_then(|(base, _)| try_load(base))
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 발전소 경제성 분석 ===",
        MAIN_MENU_SCENARIO => "1) 시나리오 설정",
        MAIN_MENU_METRICS => "2) 경제성 지표",
        MAIN_MENU_PRICES => "3) 가격 분석",
        MAIN_MENU_EXPENSES => "4) 월간 운영비",
        MAIN_MENU_SETTINGS => "5) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        PROMPT_KEEP_CURRENT => "(엔터 = 현재 값 유지)",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        SCENARIO_HEADING => "\n-- 시나리오 설정 --",
        SCENARIO_ENGINE => "엔진 종류",
        SCENARIO_NUM_ENGINES => "엔진 대수",
        SCENARIO_LOAD => "부하율 [%]",
        SCENARIO_GAS_PRICE => "가스 단가 [/m³]",
        METRICS_HEADING => "\n-- 경제성 지표 --",
        METRICS_SUMMARY => "\n-- 주요 재무 지표 --",
        METRICS_CONSUMPTION => "연료 소비율",
        METRICS_ANNUAL_REVENUE => "연간 매출",
        PRICES_HEADING => "\n-- 가격 분석 --",
        PRICES_SHAPE => "가격표 크기",
        PRICES_MIN_MAX_AVG => "최저 / 최고 / 평균",
        PRICES_HISTOGRAM => "가격 분포",
        EXPENSES_HEADING => "\n-- 월간 운영비 --",
        EXPENSES_TOTAL => "합계",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어",
        SETTINGS_OPTIONS => "1) 시스템  2) English  3) 한국어",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        _ => return None,
    };
    Some(s)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Power Plant Economic Analysis ===",
        MAIN_MENU_SCENARIO => "1) Scenario configuration",
        MAIN_MENU_METRICS => "2) Economic metrics",
        MAIN_MENU_PRICES => "3) Price analysis",
        MAIN_MENU_EXPENSES => "4) Monthly expenses",
        MAIN_MENU_SETTINGS => "5) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        PROMPT_KEEP_CURRENT => "(Enter = keep current value)",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        SCENARIO_HEADING => "\n-- Scenario configuration --",
        SCENARIO_ENGINE => "Engine type",
        SCENARIO_NUM_ENGINES => "Number of engines",
        SCENARIO_LOAD => "Load percentage [%]",
        SCENARIO_GAS_PRICE => "Gas price [per m³]",
        METRICS_HEADING => "\n-- Economic metrics --",
        METRICS_SUMMARY => "\n-- Key financial metrics --",
        METRICS_CONSUMPTION => "Fuel consumption",
        METRICS_ANNUAL_REVENUE => "Annual revenue",
        PRICES_HEADING => "\n-- Price analysis --",
        PRICES_SHAPE => "Price table size",
        PRICES_MIN_MAX_AVG => "Min / Max / Average",
        PRICES_HISTOGRAM => "Price distribution",
        EXPENSES_HEADING => "\n-- Monthly expenses --",
        EXPENSES_TOTAL => "Total",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language",
        SETTINGS_OPTIONS => "1) System  2) English  3) 한국어",
        SETTINGS_INVALID => "Invalid input, nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko", Some("en-us")), "ko-kr");
        assert_eq!(resolve_language("auto", Some("en")), "en-us");
        assert_eq!(resolve_language("EN-UK", None), "en-us");
    }

    #[test]
    fn builtin_strings_follow_language() {
        let ko = Translator::new("ko-kr");
        let en = Translator::new("en-us");
        assert_eq!(ko.t(keys::MAIN_MENU_EXIT), "0) 종료");
        assert_eq!(en.t(keys::MAIN_MENU_EXIT), "0) Exit");
        assert_eq!(en.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn nested_pack_is_flattened() {
        let map = parse_toml_to_map("[gui.metrics]\nroe = \"ROE\"\n").unwrap();
        assert_eq!(map.get("gui.metrics.roe").map(String::as_str), Some("ROE"));
    }

    #[test]
    fn built_in_korean_pack_has_gui_keys() {
        let tr = Translator::new_with_pack("ko-kr", Some("/nonexistent"));
        assert!(tr.lookup("gui.nav.app_title").is_some());
    }
}
